/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the data length does not match the image shape.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when two images are expected to share the same size.
    #[error("Invalid image size ({0} x {1}), expected ({2} x {3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when a view rectangle does not fit inside the image bounds.
    #[error("Rectangle ({0} x {1} at {2},{3}) out of bounds for image ({4} x {5})")]
    RectOutOfBounds(usize, usize, usize, usize, usize, usize),

    /// Error when casting the image pixel data to a different type.
    #[error("Failed to cast image data")]
    CastError,
}
