use motempl_image::{ImageError, ImageSize, Rect};

/// An error type for the tracking module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TrackerError {
    /// Error when the tracker configuration is rejected at construction.
    #[error("Invalid tracker configuration: {0}")]
    InvalidConfiguration(String),

    /// Error when a query is made before any frame has been submitted.
    #[error("No frame has been submitted yet")]
    NotReady,

    /// Error when a query region lies outside the tracked image bounds.
    #[error("Region {0} lies outside the tracked image bounds {1}")]
    InvalidRegion(Rect, ImageSize),

    /// Error when a submitted frame has zero area.
    #[error("Frame size {0} has zero area")]
    EmptyFrame(ImageSize),

    /// Error when a frame does not match the size established by the first frame.
    #[error("Frame size {0} does not match the tracked size {1}")]
    DimensionMismatch(ImageSize, ImageSize),

    /// Error coming from an underlying image operation.
    #[error(transparent)]
    Image(#[from] ImageError),
}
