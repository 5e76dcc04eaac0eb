//! # RIFF
//!
//! AVI and WAV files, along with anything else that keeps its metadata in
//! RIFF chunks.
//!
//! A RIFF file is one big `RIFF` chunk holding a form type (like `AVI ` or
//! `WAVE`) followed by nested chunks. Each chunk has a four-character code,
//! a little-endian size, and a payload padded to an even length. `LIST`
//! chunks hold more chunks.
//!
//! Parsing walks the chunk tree front to back and stops where the media
//! data begins, at `movi` (AVI) or `data` (WAV).

use std::{
    fs::File,
    io::{BufReader, Read, Seek},
    path::Path,
    sync::Arc,
};

use parking_lot::RwLock;
use riff_metadata_types::{fourcc::FourCc, value::MetadataValue};

use crate::{
    MetadataProvider,
    metadata::{MetadataSink, VideoMetadata},
};

use self::{
    context::TraversalContext,
    header::{RiffFileHeader, Signature},
    reader::ChunkReader,
};

pub use self::{
    context::{ReadOptions, StreamKind},
    error::{RiffFatalError, RiffFatalResult, RiffFieldError},
    header::is_riff,
    structure::{PrintStructureOption, StructurePrinter, SubFormatPrinter},
};

mod chunk;
mod context;
mod derive;
mod error;
mod handlers;
mod header;
mod reader;
mod structure;
mod walker;

const BYTES_PER_MIB: f64 = 1_048_576.0;

/// Reads all metadata from a RIFF stream into `sink`.
///
/// The stream is read from its start. Returns the problems found with
/// individual fields, which didn't stop the walk.
///
/// # Errors
///
/// Fails if the stream isn't RIFF, is cut short, or can't be read. Entries
/// written before the failure stay in `sink`.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use riff_metadata::{metadata::VideoMetadata, read_metadata};
///
/// let mut bytes = b"RIFF\x0e\x00\x00\x00AVI ".to_vec();
/// bytes.extend_from_slice(b"strn\x02\x00\x00\x00A\0");
///
/// let mut meta = VideoMetadata::new();
/// let field_errors = read_metadata(&mut Cursor::new(bytes), &mut meta).unwrap();
///
/// assert!(field_errors.is_empty());
/// assert_eq!(meta.get("video.StreamName").unwrap().as_text(), Some("A"));
/// ```
pub fn read_metadata<R: Read + Seek>(
    reader: &mut R,
    sink: &mut dyn MetadataSink,
) -> RiffFatalResult<Vec<RiffFieldError>> {
    read_metadata_with(reader, sink, ReadOptions::default())
}

/// Like [`read_metadata`], with custom limits.
pub fn read_metadata_with<R: Read + Seek>(
    reader: &mut R,
    sink: &mut dyn MetadataSink,
    options: ReadOptions,
) -> RiffFatalResult<Vec<RiffFieldError>> {
    walk(reader, sink, options).map(|(_, field_errors)| field_errors)
}

fn walk<R: Read + Seek>(
    reader: &mut R,
    sink: &mut dyn MetadataSink,
    options: ReadOptions,
) -> RiffFatalResult<(RiffFileHeader, Vec<RiffFieldError>)> {
    reader.rewind()?;
    match header::probe(reader)? {
        Signature::Riff => (),
        Signature::Other | Signature::Truncated => {
            log::debug!("No `RIFF` signature. Not a RIFF file.");
            return Err(RiffFatalError::NotThisFormat);
        }
    }

    let mut chunks = ChunkReader::new(reader)?;
    let stream_len = chunks.len();
    let header = RiffFileHeader::read(&mut chunks)?;

    if header.end() > stream_len {
        log::error!(
            "The `RIFF` chunk claims `{}` bytes, but the stream has `{stream_len}`.",
            header.end()
        );
        return Err(RiffFatalError::TruncatedOrCorrupt {
            offset: 0,
            declared: u64::from(header.size),
            available: stream_len.saturating_sub(8),
        });
    }

    log::debug!(
        "Found a RIFF `{}` file covering `{}` of `{stream_len}` bytes.",
        header.form_type,
        header.end()
    );
    sink.set(
        "video.FileSize",
        MetadataValue::Real(stream_len as f64 / BYTES_PER_MIB),
    );
    sink.set("video.MimeType", "video/riff".into());
    sink.set("video.Container", "RIFF".into());
    sink.set("video.FileType", header.form_type.printable().into());

    let mut ctx = TraversalContext::new(options, stream_len);
    while !ctx.terminate && chunks.position()? < header.end() {
        walker::decode_block(&mut chunks, &mut ctx, sink, header.end())?;
    }

    Ok((header, ctx.into_field_errors()))
}

/// A parsed RIFF file.
///
/// This parses everything on construction. Afterwards, the metadata can be
/// shared between threads.
#[derive(Clone, Debug)]
pub struct RiffVideo {
    form_type: FourCc,
    metadata: Arc<RwLock<VideoMetadata>>,
    field_errors: Vec<RiffFieldError>,
}

impl RiffVideo {
    /// Opens and parses the file at `path`.
    ///
    /// This also records the file's name under `video.FileName`.
    pub fn open(path: impl AsRef<Path>) -> RiffFatalResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            log::error!("Failed to open `{}`! err: {e}", path.display());
            RiffFatalError::SourceOpenFailed {
                path: path.to_path_buf(),
                source: Arc::new(e),
            }
        })?;

        let s = Self::new(&mut BufReader::new(file))?;
        s.metadata
            .write()
            .set("video.FileName", path.display().to_string().into());
        Ok(s)
    }

    /// The form type from the file header, like `AVI ` or `WAVE`.
    pub fn form_type(&self) -> FourCc {
        self.form_type
    }

    /// Problems with individual fields found while parsing.
    pub fn field_errors(&self) -> &[RiffFieldError] {
        &self.field_errors
    }
}

impl MetadataProvider for RiffVideo {
    type ConstructionError = RiffFatalError;

    fn magic_number<R: Read + Seek>(reader: &mut R) -> bool {
        is_riff(reader, false)
    }

    fn new<R: Read + Seek>(reader: &mut R) -> Result<Self, Self::ConstructionError> {
        let mut metadata = VideoMetadata::new();
        let (header, field_errors) = walk(reader, &mut metadata, ReadOptions::default())?;

        if !field_errors.is_empty() {
            log::debug!("Parsed with `{}` field errors.", field_errors.len());
        }

        Ok(Self {
            form_type: header.form_type,
            metadata: Arc::new(RwLock::new(metadata)),
            field_errors,
        })
    }

    fn metadata(&self) -> Arc<RwLock<VideoMetadata>> {
        Arc::clone(&self.metadata)
    }
}
