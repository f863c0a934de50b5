#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use motempl_image as image;

#[doc(inline)]
pub use motempl_imgproc as imgproc;

#[doc(inline)]
pub use motempl_tracking as tracking;
