//! # `riff_metadata`
//!
//! A library to read metadata from RIFF files, like AVI videos and WAV audio.
//!
//! ## Usage
//!
//! Open a file with [`RiffVideo`], or hand any `Read + Seek` source to
//! [`read_metadata`] along with somewhere to put the results:
//!
//! ```
//! use std::io::Cursor;
//! use riff_metadata::{metadata::VideoMetadata, read_metadata};
//!
//! # let bytes = b"RIFF\x04\x00\x00\x00AVI ".to_vec();
//! let mut meta = VideoMetadata::new();
//! let field_errors = read_metadata(&mut Cursor::new(bytes), &mut meta).unwrap();
//!
//! for (key, value) in meta.iter() {
//!     println!("{key}: {value}");
//! }
//! # assert!(field_errors.is_empty());
//! # assert_eq!(meta.get("video.FileType").unwrap().as_text(), Some("AVI "));
//! ```
//!
//! Keys are namespaced by what they describe: `video.*`, `audio.*`, and a
//! couple of `xmp.*` keys for thumbnail sizes.
//!
//! Problems with single fields don't stop parsing. They're logged (through
//! the [`log`] crate) and returned as [`RiffFieldError`]s. Anything that
//! makes the rest of the file unreadable is a [`RiffFatalError`].
//!
//! ## Contributing
//!
//! Contributions are welcome! Please submit PRs or issues at your leisure.
//!
//! ## License
//!
//! This project is dual-licensed under either the Apache License 2.0 or the MIT License at your option.
//!
//! For more information, please see the [`LICENSE-APACHE`](LICENSE-APACHE) and [`LICENSE-MIT`](LICENSE-MIT) files at the root of this repository.

#![forbid(unsafe_code)]

use std::{
    io::{Read, Seek},
    sync::Arc,
};

use parking_lot::RwLock;

use crate::metadata::VideoMetadata;

pub mod metadata;
pub mod providers;

pub use providers::riff::{
    PrintStructureOption, ReadOptions, RiffFatalError, RiffFatalResult, RiffFieldError,
    RiffVideo, StreamKind, StructurePrinter, SubFormatPrinter, is_riff, read_metadata,
    read_metadata_with,
};

/// A media file with support for various metadata formats.
///
/// Each file format is a "provider" - it'll yield its metadata through parsing.
pub trait MetadataProvider: Clone + core::fmt::Debug + Sized + Send + Sync {
    /// An error that can occur when calling [`MetadataProvider::new`].
    type ConstructionError: Clone + core::fmt::Debug + core::error::Error + Sized + Send + Sync;

    /// Checks whether `reader` holds this provider's format.
    ///
    /// The reader's position is left as it was.
    fn magic_number<R: Read + Seek>(reader: &mut R) -> bool;

    /// Parses a media file for its metadata.
    fn new<R: Read + Seek>(
        reader: &mut R,
    ) -> Result<Self, <Self as MetadataProvider>::ConstructionError>;

    /// Returns the parsed metadata.
    ///
    /// This is shared, so clones of the provider all see the same store.
    fn metadata(&self) -> Arc<RwLock<VideoMetadata>>;

    /// Returns a copy of the raw Exif block, if the file had one.
    ///
    /// It isn't parsed here. Hand it to an Exif library of your choice.
    fn exif_raw(&self) -> Option<Vec<u8>> {
        let metadata = self.metadata();
        let locked = metadata.read();
        match locked.exif_raw() {
            Some(exif) => Some(exif.to_vec()),
            None => {
                log::trace!("No Exif is present in this file.");
                None
            }
        }
    }
}

/// Internal utility methods.
pub(crate) mod util {
    /// Helper function to initialize the logger for testing.
    #[cfg(test)]
    pub fn logger() {
        _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::max())
            .format_file(true)
            .format_line_number(true)
            .try_init();
    }
}
