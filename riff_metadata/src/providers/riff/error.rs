use std::{io, path::PathBuf, sync::Arc};

use riff_metadata_types::fourcc::FourCc;

/// This type describes the parsing result.
///
/// If it's the `Err` variant, the walk stopped and no more metadata will be
/// produced. Entries written to the sink before the failure are left there.
pub type RiffFatalResult<T> = Result<T, RiffFatalError>;

/// An error that stops the walk entirely.
#[derive(Clone, Debug)]
pub enum RiffFatalError {
    /// The input doesn't start with the `RIFF` signature.
    ///
    /// Callers can try another format.
    NotThisFormat,

    /// The file couldn't be opened.
    SourceOpenFailed {
        /// Where we tried to open it.
        path: PathBuf,

        /// What went wrong.
        source: Arc<io::Error>,
    },

    /// A chunk claimed more bytes than its container (or the stream) has,
    /// or the stream ended in the middle of a record.
    TruncatedOrCorrupt {
        /// Where the offending record starts.
        offset: u64,

        /// How many payload bytes the record declared.
        declared: u64,

        /// How many bytes were actually available for it.
        available: u64,
    },

    /// The chunks nest deeper than [`ReadOptions::max_depth`] allows.
    ///
    /// [`ReadOptions::max_depth`]: crate::providers::riff::ReadOptions::max_depth
    TooDeep {
        /// The depth we reached.
        depth: usize,
    },

    /// The underlying reader failed.
    Io(
        // note: `Arc` allows us to impl `Clone`
        Arc<io::Error>,
    ),
}

impl From<io::Error> for RiffFatalError {
    fn from(value: io::Error) -> Self {
        RiffFatalError::Io(value.into())
    }
}

impl core::fmt::Display for RiffFatalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotThisFormat => f.write_str("The input isn't a RIFF file: no `RIFF` signature."),
            Self::SourceOpenFailed { path, source } => {
                write!(f, "Failed to open `{}`. err: {source}", path.display())
            }
            Self::TruncatedOrCorrupt {
                offset,
                declared,
                available,
            } => write!(
                f,
                "Record at offset `{offset}` declared `{declared}` bytes, but only \
                `{available}` were available. The file is truncated or corrupt."
            ),
            Self::TooDeep { depth } => write!(
                f,
                "Chunks nest too deeply (reached depth `{depth}`). Refusing to continue."
            ),
            Self::Io(e) => write!(f, "The reader failed. err: {e}"),
        }
    }
}

impl core::error::Error for RiffFatalError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::SourceOpenFailed { source, .. } => Some(source.as_ref()),
            Self::Io(e) => Some(e.as_ref()),
            Self::NotThisFormat | Self::TruncatedOrCorrupt { .. } | Self::TooDeep { .. } => None,
        }
    }
}

/// A problem with one field of one chunk.
///
/// These never stop the walk. The field is left out of the metadata, the
/// error is logged, and it's handed back to the caller alongside the result.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RiffFieldError {
    /// The payload ended before a fixed-size record was complete.
    FieldTooShort {
        /// The chunk being decoded.
        chunk: FourCc,

        /// Bytes needed to decode the next field.
        needed: usize,

        /// Bytes the payload actually had.
        got: usize,
    },

    /// A value that should have content was empty.
    EmptyValue {
        /// The chunk being decoded.
        chunk: FourCc,

        /// The metadata key that was skipped.
        field: &'static str,
    },

    /// A rate's divisor was zero.
    ZeroDivisor {
        /// The chunk being decoded.
        chunk: FourCc,

        /// The metadata key that was skipped.
        field: &'static str,
    },

    /// A nested record declared more bytes than its parent had left. Its
    /// data was cut at the parent's end.
    SubChunkOverrun {
        /// The chunk holding the record.
        chunk: FourCc,

        /// The record's own code.
        sub_chunk: FourCc,

        /// How many bytes the record declared.
        declared: u32,

        /// How many bytes were left in the parent.
        available: usize,
    },
}

impl core::fmt::Display for RiffFieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::FieldTooShort { chunk, needed, got } => write!(
                f,
                "`{chunk}` chunk is too short: needed `{needed}` bytes, got `{got}`."
            ),
            Self::EmptyValue { chunk, field } => {
                write!(f, "`{chunk}` chunk had an empty value for `{field}`.")
            }
            Self::ZeroDivisor { chunk, field } => {
                write!(f, "`{chunk}` chunk had a zero divisor for `{field}`.")
            }
            Self::SubChunkOverrun {
                chunk,
                sub_chunk,
                declared,
                available,
            } => write!(
                f,
                "`{sub_chunk}` record in `{chunk}` declared `{declared}` bytes, \
                but only `{available}` remained. Cut at the parent's end."
            ),
        }
    }
}

impl core::error::Error for RiffFieldError {}
