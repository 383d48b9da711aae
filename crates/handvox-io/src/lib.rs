#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Ground-truth joint and validity-mask parsers.
pub mod annotations;

/// MSRA dataset directory layout.
pub mod dataset;

/// Binary depth frame reader and writer.
pub mod depth_bin;

/// Named float32 array persistence.
pub mod store;
