//! Motion-template operations
//!
//! Operations over motion history images (MHI): decaying-timestamp
//! accumulation, gradient-based orientation estimation, time-windowed
//! segmentation and global orientation of a region.

/// Motion history accumulation.
mod history;
pub use history::*;

/// Motion gradient orientation estimation.
mod gradient;
pub use gradient::*;

/// Connected motion component segmentation.
mod segment;
pub use segment::*;

/// Global orientation of a motion region.
mod orientation;
pub use orientation::*;
