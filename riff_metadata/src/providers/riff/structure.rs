//! A human-readable listing of a file's top-level chunks.
//!
//! This is a debugging aid. It's independent of metadata parsing and reads
//! the file on its own.

use std::io::{self, Read, Seek, Write};

use super::{
    chunk::ChunkHeader,
    error::{RiffFatalError, RiffFatalResult},
    header::{self, RiffFileHeader, Signature},
    reader::ChunkReader,
};

/// Chunks bigger than this aren't read, just listed.
pub const DISPLAY_CAP: u32 = 200;

/// The most bytes of a marker chunk that will be read.
pub const MAX_MARKER_PAYLOAD: u64 = 16 * 1024 * 1024;

/// How many payload bytes are shown per chunk.
const PREVIEW_LEN: usize = 32;

/// What to print.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PrintStructureOption {
    /// Print nothing.
    #[default]
    None,

    /// A table of the top-level chunks.
    Basic,

    /// The table, with `EXIF` chunks handed to an embedded printer.
    Recursive,

    /// Only the raw payload of `XMP ` chunks.
    Xmp,

    /// Only the raw payload of `ICCP` chunks.
    IccProfile,
}

impl PrintStructureOption {
    const fn prints_table(self) -> bool {
        matches!(self, Self::Basic | Self::Recursive)
    }

    /// The chunk this mode extracts, if any.
    const fn marker(self) -> Option<&'static [u8; 4]> {
        match self {
            Self::Recursive => Some(b"EXIF"),
            Self::Xmp => Some(b"XMP "),
            Self::IccProfile => Some(b"ICCP"),
            Self::None | Self::Basic => None,
        }
    }
}

/// Prints the structure of an embedded format, like an Exif block.
pub trait SubFormatPrinter {
    fn print_structure(&mut self, payload: &[u8], out: &mut dyn Write, depth: usize)
    -> io::Result<()>;
}

/// Prints a RIFF file's chunk layout.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use riff_metadata::{PrintStructureOption, StructurePrinter};
///
/// let mut file = Cursor::new(b"RIFF\x04\x00\x00\x00WAVE".to_vec());
/// let mut out = Vec::new();
/// StructurePrinter::new(PrintStructureOption::Basic)
///     .with_name("tone.wav")
///     .print(&mut file, &mut out)
///     .unwrap();
///
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.starts_with("STRUCTURE OF RIFF FILE: tone.wav"));
/// ```
pub struct StructurePrinter<'a> {
    option: PrintStructureOption,
    depth: usize,
    name: Option<&'a str>,
    embedded: Option<&'a mut dyn SubFormatPrinter>,
}

impl<'a> StructurePrinter<'a> {
    pub fn new(option: PrintStructureOption) -> Self {
        Self {
            option,
            depth: 0,
            name: None,
            embedded: None,
        }
    }

    /// Indents everything by `depth` levels.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// The name shown in the banner.
    pub fn with_name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    /// Where `EXIF` chunks go in [`PrintStructureOption::Recursive`] mode.
    pub fn with_embedded(mut self, embedded: &'a mut dyn SubFormatPrinter) -> Self {
        self.embedded = Some(embedded);
        self
    }

    /// Prints the structure of the file in `reader` to `out`.
    ///
    /// # Errors
    ///
    /// Fails if the file isn't RIFF, its header is cut short, or either
    /// stream fails.
    pub fn print<R: Read + Seek, W: Write>(
        mut self,
        reader: &mut R,
        out: &mut W,
    ) -> RiffFatalResult<()> {
        reader.rewind()?;
        match header::probe(reader)? {
            Signature::Riff => (),
            Signature::Other => return Err(RiffFatalError::NotThisFormat),
            Signature::Truncated => {
                return Err(RiffFatalError::TruncatedOrCorrupt {
                    offset: 0,
                    declared: 4,
                    available: reader.stream_position()?,
                });
            }
        }

        if self.option == PrintStructureOption::None {
            return Ok(());
        }

        let mut chunks = ChunkReader::new(reader)?;
        let file_header = RiffFileHeader::read(&mut chunks)?;
        let end = file_header.end();
        let indent = "  ".repeat(self.depth);

        if self.option.prints_table() {
            writeln!(
                out,
                "{indent}STRUCTURE OF RIFF FILE: {}",
                self.name.unwrap_or("")
            )?;
            writeln!(
                out,
                "{indent} Chunk |       Length |       Offset | Payload"
            )?;
        }

        chunks.seek_to(0)?;
        loop {
            let offset = chunks.position()?;
            if offset >= end {
                break;
            }

            let Some(chunk) = ChunkHeader::read(&mut chunks)? else {
                log::debug!("The stream ended at offset `{offset}`.");
                break;
            };

            // the file header's payload is just the form type
            let is_file_header = offset == 0;
            let is_marker = self
                .option
                .marker()
                .is_some_and(|marker| chunk.fourcc.matches(marker));
            let payload_len = if is_file_header { 4 } else { u64::from(chunk.size) };

            let payload = if is_file_header || is_marker || chunk.size <= DISPLAY_CAP {
                let len = if is_marker {
                    payload_len.min(MAX_MARKER_PAYLOAD)
                } else {
                    payload_len
                };
                let bytes = chunks.read_up_to(len)?;
                if (bytes.len() as u64) < len {
                    log::warn!("`{}` at offset `{offset}` is cut short.", chunk.fourcc);
                }
                Some(bytes)
            } else {
                None
            };

            if self.option.prints_table() {
                writeln!(
                    out,
                    "{indent}  {} | {:>12} | {:>12} | {}",
                    chunk.fourcc.printable(),
                    chunk.size,
                    offset,
                    payload.as_deref().map(preview).unwrap_or_default(),
                )?;
            }

            if let Some(payload) = payload.as_deref().filter(|_| is_marker) {
                self.print_marker(payload, out)?;
            }

            // whatever was or wasn't read, carry on after the payload
            let next = if is_file_header {
                RiffFileHeader::LEN
            } else {
                offset + ChunkHeader::LEN + payload_len
            };
            chunks.seek_to(next)?;

            if !is_file_header && next % 2 == 1 {
                chunks.skip(1)?;
            }
        }

        Ok(())
    }

    fn print_marker<W: Write>(&mut self, payload: &[u8], out: &mut W) -> io::Result<()> {
        match self.option {
            PrintStructureOption::Recursive => match self.embedded.as_deref_mut() {
                Some(embedded) => embedded.print_structure(payload, out, self.depth + 1),
                None => {
                    log::debug!("No printer for embedded Exif. Skipping...");
                    Ok(())
                }
            },
            PrintStructureOption::Xmp | PrintStructureOption::IccProfile => out.write_all(payload),
            PrintStructureOption::None | PrintStructureOption::Basic => Ok(()),
        }
    }
}

/// The start of a payload, with anything unprintable shown as `.`.
fn preview(payload: &[u8]) -> String {
    let shown = &payload[..payload.len().min(PREVIEW_LEN)];
    shown
        .iter()
        .map(|b| match b {
            0x20..=0x7e => *b as char,
            _ => '.',
        })
        .collect()
}

impl core::fmt::Debug for StructurePrinter<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StructurePrinter")
            .field("option", &self.option)
            .field("depth", &self.depth)
            .field("name", &self.name)
            .field("embedded", &self.embedded.is_some())
            .finish()
    }
}
