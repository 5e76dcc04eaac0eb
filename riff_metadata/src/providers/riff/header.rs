use std::io::{self, Read, Seek, SeekFrom};

use riff_metadata_types::fourcc::FourCc;
use winnow::{
    ModalResult, Parser as _,
    binary::le_u32,
    error::{ContextError, ErrMode},
    token::literal,
};

use super::{
    chunk::fourcc,
    error::{RiffFatalError, RiffFatalResult},
    reader::ChunkReader,
};

/// The signature every RIFF file starts with.
pub const RIFF: &[u8; 4] = b"RIFF";

/// The twelve bytes at the start of the file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RiffFileHeader {
    /// How many bytes follow the size field.
    ///
    /// This counts the form type.
    pub size: u32,

    /// What kind of RIFF file this is, like `AVI ` or `WAVE`.
    pub form_type: FourCc,
}

impl RiffFileHeader {
    pub const LEN: u64 = 12;

    /// Parses the file header out of a byte slice.
    pub fn parse(input: &mut &[u8]) -> ModalResult<RiffFileHeader, ContextError> {
        // first, we should ensure there's `RIFF` (in ASCII) at the beginning
        literal(RIFF.as_slice()).void().parse_next(input)?;

        // then, the size and the form type
        let size: u32 = le_u32.parse_next(input)?;
        let form_type: FourCc = fourcc::<ErrMode<ContextError>>(input)?;

        Ok(RiffFileHeader { size, form_type })
    }

    /// Reads the header from the start of the stream.
    pub fn read<R: Read + Seek>(reader: &mut ChunkReader<'_, R>) -> RiffFatalResult<Self> {
        reader.seek_to(0)?;

        let mut raw = [0_u8; Self::LEN as usize];
        if let Err(e) = reader.read_exact(&mut raw) {
            if e.kind() != io::ErrorKind::UnexpectedEof {
                return Err(e.into());
            }

            log::error!("The stream ended inside the RIFF file header.");
            return Err(RiffFatalError::TruncatedOrCorrupt {
                offset: 0,
                declared: Self::LEN,
                available: reader.len(),
            });
        }

        Self::parse(&mut raw.as_slice()).map_err(|e| {
            log::error!("Failed to parse the RIFF file header! err: {e}");
            RiffFatalError::NotThisFormat
        })
    }

    /// The offset just past the last byte the header says it covers.
    pub const fn end(&self) -> u64 {
        8 + self.size as u64
    }
}

/// What the first four bytes of a stream told us.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Signature {
    Riff,
    Other,

    /// There weren't even four bytes.
    Truncated,
}

/// Reads the first four bytes at the current position and compares them with
/// the signature.
///
/// The position is left just past those four bytes.
pub(crate) fn probe<R: Read + Seek>(reader: &mut R) -> io::Result<Signature> {
    let mut magic = [0_u8; 4];
    match reader.read_exact(&mut magic) {
        Ok(()) if &magic == RIFF => Ok(Signature::Riff),
        Ok(()) => Ok(Signature::Other),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(Signature::Truncated),
        Err(e) => Err(e),
    }
}

/// Checks whether the stream holds a RIFF file.
///
/// The position is restored afterwards unless `advance` is set and the
/// signature matched, in which case it's left just past the signature.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use riff_metadata::is_riff;
///
/// let mut cursor = Cursor::new(b"RIFF\x04\x00\x00\x00AVI ".to_vec());
/// assert!(is_riff(&mut cursor, false));
/// assert_eq!(cursor.position(), 0);
///
/// assert!(is_riff(&mut cursor, true));
/// assert_eq!(cursor.position(), 4);
/// ```
pub fn is_riff<R: Read + Seek>(reader: &mut R, advance: bool) -> bool {
    let start = match reader.stream_position() {
        Ok(s) => s,
        Err(e) => {
            log::error!("Couldn't get the reader's position! err: {e}");
            return false;
        }
    };

    let matched = match probe(reader) {
        Ok(sig) => sig == Signature::Riff,
        Err(e) => {
            log::error!("Couldn't read the signature! err: {e}");
            false
        }
    };

    if !(advance && matched) {
        if let Err(e) = reader.seek(SeekFrom::Start(start)) {
            log::error!("Failed to restore the reader's position! err: {e}");
        }
    }

    matched
}
