use riff_metadata_types::fourcc::FourCc;
use std::io::{self, Read, Seek};
use winnow::{
    ModalResult, Parser as _,
    binary::le_u32,
    error::{ContextError, ErrMode, ParserError},
    token::take,
};

use super::reader::ChunkReader;

/// The eight bytes in front of every chunk: a four-character code and a
/// little-endian payload length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkHeader {
    pub fourcc: FourCc,
    pub size: u32,
}

impl ChunkHeader {
    /// How many bytes a descriptor takes up.
    pub const LEN: u64 = 8;

    /// Parses a descriptor out of a byte slice.
    pub fn parse(input: &mut &[u8]) -> ModalResult<ChunkHeader, ContextError> {
        let fourcc: FourCc = fourcc::<ErrMode<ContextError>>(input)?;
        let size: u32 = le_u32.parse_next(input)?;
        Ok(ChunkHeader { fourcc, size })
    }

    /// Reads a descriptor from the stream.
    ///
    /// Returns `Ok(None)` if the stream ends before all eight bytes are
    /// there.
    pub fn read<R: Read + Seek>(reader: &mut ChunkReader<'_, R>) -> io::Result<Option<Self>> {
        let mut raw = [0_u8; Self::LEN as usize];
        match reader.read_exact(&mut raw) {
            Ok(()) => (),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(e),
        }

        Ok(Self::parse(&mut raw.as_slice()).ok())
    }

    /// The payload size plus its padding byte, if it has one.
    pub const fn padded_size(&self) -> u64 {
        self.size as u64 + (self.size & 1) as u64
    }
}

/// Grabs a four-character code.
pub fn fourcc<'i, E>(input: &mut &'i [u8]) -> Result<FourCc, E>
where
    E: ParserError<&'i [u8]>,
{
    let slice: &[u8] = take(4_usize).parse_next(input)?;

    // `take` only succeeds with exactly four bytes
    let Ok(code) = <[u8; 4]>::try_from(slice) else {
        unreachable!("fourcc slice is known to be 4 elements long. please report this - it's a bug!");
    };

    Ok(FourCc::new(code))
}

#[cfg(test)]
mod tests {
    use riff_metadata_types::fourcc::FourCc;
    use winnow::error::EmptyError;

    use crate::util::logger;

    use super::{ChunkHeader, fourcc};

    #[test]
    fn parses_descriptor() {
        logger();

        let mut input: &[u8] = b"avih\x38\x00\x00\x00rest";
        let header = ChunkHeader::parse(&mut input).unwrap();

        assert_eq!(
            header,
            ChunkHeader {
                fourcc: FourCc::new(*b"avih"),
                size: 0x38,
            }
        );
        assert_eq!(input, b"rest", "only the descriptor should be consumed");
    }

    #[test]
    fn short_descriptor_fails() {
        logger();

        let mut input: &[u8] = b"avih\x38\x00";
        assert!(ChunkHeader::parse(&mut input).is_err());
    }

    #[test]
    fn padded_size_rounds_up_to_even() {
        let odd = ChunkHeader {
            fourcc: FourCc::new(*b"strn"),
            size: 5,
        };
        let even = ChunkHeader { size: 6, ..odd };

        assert_eq!(odd.padded_size(), 6);
        assert_eq!(even.padded_size(), 6);
    }

    #[test]
    fn fourcc_needs_four_bytes() {
        let mut input: &[u8] = b"vid";
        assert!(fourcc::<EmptyError>(&mut input).is_err());

        let mut input: &[u8] = b"vids!";
        assert_eq!(
            fourcc::<EmptyError>(&mut input).unwrap(),
            FourCc::new(*b"vids")
        );
        assert_eq!(input, b"!");
    }
}
