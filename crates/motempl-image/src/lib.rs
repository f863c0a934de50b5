#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// image representation for motion-template analysis.
pub mod image;

/// Error types for the image module.
pub mod error;

/// Rectangular regions and borrowed image views.
pub mod view;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
pub use crate::view::{ImageView, Rect};
