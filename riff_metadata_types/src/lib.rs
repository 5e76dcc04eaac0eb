//! # `riff_metadata_types`
//!
//! Types and lookup tables used by `riff_metadata` when it translates RIFF
//! chunks into metadata entries.
//!
//! Nothing in here touches I/O. Every table is immutable and may be shared
//! freely between threads.

#![forbid(unsafe_code)]

pub mod audio;
pub mod fourcc;
pub mod info;
pub mod nikon;
pub mod value;
pub mod video;
