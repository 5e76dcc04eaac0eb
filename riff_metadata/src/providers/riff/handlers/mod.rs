//! Decoders for the chunks that carry metadata.
//!
//! Every handler gets the chunk's payload as a byte slice, so it can't move
//! the stream. The walker puts the cursor at the chunk's end afterwards,
//! whatever the handler did or didn't read.

use riff_metadata_types::fourcc::FourCc;
use winnow::{
    binary::{le_u16, le_u32},
    error::EmptyError,
};

use crate::metadata::MetadataSink;

use super::{chunk::ChunkHeader, context::TraversalContext};

mod avih;
mod info;
mod junk;
mod nikon;
mod odml;
mod strf;
mod strh;
mod text;

/// A chunk decoder.
pub type Handler = fn(&[u8], &mut TraversalContext, &mut dyn MetadataSink);

/// Chunks decoded wherever they show up.
static LEAF_HANDLERS: &[(&[u8; 4], Handler)] = &[
    (b"AVIH", avih::main_header),
    (b"STRH", strh::stream_header),
    (b"STRF", strf::stream_format),
    (b"FMT ", strf::wave_format),
    (b"STRN", text::stream_name),
    (b"IDIT", text::date_utc),
    (b"STRD", text::stream_data),
    (b"JUNK", junk::junk),
];

/// Lists whose whole body is decoded at once, by list type.
static LIST_BODY_HANDLERS: &[(&[u8; 4], Handler)] = &[
    (b"INFO", info::info_list),
    (b"NCDT", nikon::nikon_list),
    (b"ODML", odml::odml_list),
];

fn lookup(table: &[(&[u8; 4], Handler)], tag: FourCc) -> Option<Handler> {
    table
        .iter()
        .find(|(code, _)| tag.matches(code))
        .map(|(_, handler)| *handler)
}

/// Finds the decoder for a leaf chunk.
pub fn leaf_handler(tag: FourCc) -> Option<Handler> {
    lookup(LEAF_HANDLERS, tag)
}

/// Finds the decoder for a list body, given the list's type.
pub fn list_body_handler(tag: FourCc) -> Option<Handler> {
    lookup(LIST_BODY_HANDLERS, tag)
}

/// Text up to the first NUL (or the end), with invalid UTF-8 replaced.
pub(crate) fn c_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Reads one little-endian field that's `width` bytes wide.
///
/// Only widths of 2 and 4 exist in these records.
pub(crate) fn le_field(input: &mut &[u8], width: usize) -> Option<u32> {
    match width {
        2 => le_u16::<_, EmptyError>(input).ok().map(u32::from),
        4 => le_u32::<_, EmptyError>(input).ok(),
        _ => None,
    }
}

/// One record found by [`SubChunks`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SubChunk<'p> {
    pub fourcc: FourCc,
    pub data: &'p [u8],

    /// Set to the declared size when it ran past the parent's end.
    pub overrun: Option<u32>,
}

/// Iterates over `(fourcc, size, data)` records packed inside a chunk body.
///
/// A record that claims more than is left gets the remainder and ends the
/// iteration. Odd sizes are followed by a padding byte.
pub(crate) struct SubChunks<'p> {
    input: &'p [u8],
    done: bool,
}

impl<'p> SubChunks<'p> {
    pub fn new(input: &'p [u8]) -> Self {
        Self { input, done: false }
    }
}

impl<'p> Iterator for SubChunks<'p> {
    type Item = SubChunk<'p>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let Ok(header) = ChunkHeader::parse(&mut self.input) else {
            if !self.input.is_empty() {
                log::trace!("Ignoring `{}` trailing bytes.", self.input.len());
            }
            self.done = true;
            return None;
        };

        let declared = header.size as usize;
        if declared > self.input.len() {
            self.done = true;
            let data = core::mem::take(&mut self.input);
            return Some(SubChunk {
                fourcc: header.fourcc,
                data,
                overrun: Some(header.size),
            });
        }

        let (data, rest) = self.input.split_at(declared);
        self.input = rest;

        // odd records are padded
        if declared % 2 == 1 && !self.input.is_empty() {
            self.input = &self.input[1..];
        }

        Some(SubChunk {
            fourcc: header.fourcc,
            data,
            overrun: None,
        })
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use riff_metadata_types::fourcc::FourCc;

    use crate::{
        metadata::VideoMetadata,
        providers::riff::context::{ReadOptions, TraversalContext},
    };

    use super::Handler;

    /// Builds one chunk: fourcc, size, data, and a pad byte if needed.
    pub fn chunk(fourcc: &[u8; 4], data: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(data.len() + 9);
        bytes.extend_from_slice(fourcc);
        bytes.extend((data.len() as u32).to_le_bytes());
        bytes.extend_from_slice(data);
        if data.len() % 2 != 0 {
            bytes.push(0_u8);
        }
        bytes
    }

    /// Builds a `LIST` chunk holding `children`.
    pub fn list(list_type: &[u8; 4], children: &[Vec<u8>]) -> Vec<u8> {
        let mut body = list_type.to_vec();
        children.iter().for_each(|c| body.extend_from_slice(c));
        chunk(b"LIST", &body)
    }

    /// Wraps `chunks` in a `RIFF` header, like a real file.
    pub fn make_riff_sample(form_type: &[u8; 4], chunks: &[Vec<u8>]) -> Vec<u8> {
        let mut bytes = b"RIFF".to_vec();
        bytes.extend([0; 4]); // we'll fill this in just a sec
        bytes.extend_from_slice(form_type);
        chunks.iter().for_each(|c| bytes.extend_from_slice(c));

        let size = (bytes.len() as u32) - 8;
        bytes[4..8].copy_from_slice(&size.to_le_bytes());
        bytes
    }

    /// Runs `handler` on `payload` with a fresh context.
    pub fn run(handler: Handler, payload: &[u8]) -> (VideoMetadata, TraversalContext) {
        let mut meta = VideoMetadata::new();
        let mut ctx = TraversalContext::new(ReadOptions::default(), 0);
        handler(payload, &mut ctx, &mut meta);
        (meta, ctx)
    }

    pub fn fcc(code: &[u8; 4]) -> FourCc {
        FourCc::new(*code)
    }
}
