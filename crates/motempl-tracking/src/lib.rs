#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//! A [`MotionHistoryTracker`] accumulates a decaying motion history image
//! over a rolling buffer of grayscale frames and answers queries about
//! motion masks, connected motion components and per-region direction.

/// Error types for the tracking module.
pub mod error;

/// Motion history tracking logic.
pub mod tracker;

pub use crate::error::TrackerError;
pub use crate::tracker::{MotionHistoryTracker, MotionInfo, TrackerConfig};

pub use motempl_imgproc::motion::MotionSegment;
