#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// image basic operations module.
pub mod core;

/// motion-template operations module.
pub mod motion;

/// module containing parallelization utilities.
pub mod parallel;

/// operations to threshold images.
pub mod threshold;
