//! Walks the chunk tree and hands each chunk to its decoder.
//!
//! The walker only ever moves forward. Every dispatched chunk ends with the
//! cursor at exactly `P + size`, where `P` is where its payload began, so a
//! decoder can never knock the walk out of step with the file.

use std::io::{self, Read, Seek};

use riff_metadata_types::fourcc::FourCc;

use crate::metadata::MetadataSink;

use super::{
    chunk::ChunkHeader,
    context::{ListFrame, TraversalContext},
    error::{RiffFatalError, RiffFatalResult},
    handlers::{leaf_handler, list_body_handler},
    reader::ChunkReader,
};

/// Once seen, nothing after these is metadata.
const TERMINATORS: [&[u8; 4]; 2] = [b"MOVI", b"DATA"];

/// Bare markers that are stepped into right away, without a size.
const DESCENDERS: [&[u8; 4]; 2] = [b"HDRL", b"STRL"];

const LIST: &[u8; 4] = b"LIST";

fn is_any(tag: FourCc, vocabulary: &[&[u8; 4]]) -> bool {
    vocabulary.iter().any(|code| tag.matches(code))
}

/// Decodes one block starting at the cursor.
///
/// `bound` is the end of whatever encloses the block: the outer `RIFF`
/// chunk or a `LIST`.
pub(crate) fn decode_block<R: Read + Seek>(
    reader: &mut ChunkReader<'_, R>,
    ctx: &mut TraversalContext,
    sink: &mut dyn MetadataSink,
    bound: u64,
) -> RiffFatalResult<()> {
    if ctx.depth > ctx.options.max_depth {
        log::error!("Chunks nest deeper than `{}`. Stopping.", ctx.options.max_depth);
        return Err(RiffFatalError::TooDeep { depth: ctx.depth });
    }

    let tag_offset = reader.position()?;
    if bound.saturating_sub(tag_offset) < 4 {
        log::trace!("Ignoring `{}` slack bytes before the bound.", bound.saturating_sub(tag_offset));
        reader.seek_to(bound)?;
        return Ok(());
    }

    let Some(tag) = reader.read_fourcc()? else {
        log::debug!("The stream ended. Done walking.");
        ctx.terminate = true;
        return Ok(());
    };

    if is_any(tag, &TERMINATORS) {
        log::debug!("Found `{tag}` at offset `{tag_offset}`. The media data starts here.");
        ctx.terminate = true;
        return Ok(());
    }

    if is_any(tag, &DESCENDERS) {
        log::trace!("Descending into `{tag}`.");
        ctx.depth += 1;
        decode_block(reader, ctx, sink, bound)?;
        ctx.depth -= 1;
        return Ok(());
    }

    // the first thing in a list is its type
    if let Some(frame) = ctx.current_list().copied() {
        if tag_offset == frame.payload_start {
            let Some(handler) = list_body_handler(tag) else {
                log::trace!("Walking the children of `LIST {tag}`.");
                return Ok(());
            };

            let len = (frame.end - frame.body_start()).min(ctx.options.max_payload_len);
            log::trace!("Decoding the body of `LIST {tag}` ({len} bytes).");

            let body = reader.read_payload(len)?;
            handler(&body, ctx, sink);
            ctx.within_list = false;
            ctx.just_closed_list = false;

            reader.seek_to(frame.end)?;
            return Ok(());
        }
    }

    if bound - tag_offset < ChunkHeader::LEN {
        log::trace!("`{tag}` has no room for a size before the bound. Skipping to it.");
        reader.seek_to(bound)?;
        return Ok(());
    }

    let mut raw_size = [0_u8; 4];
    if let Err(e) = reader.read_exact(&mut raw_size) {
        return Err(truncated_or_io(e, tag_offset, reader.len()));
    }
    let header = ChunkHeader {
        fourcc: tag,
        size: u32::from_le_bytes(raw_size),
    };

    dispatch(reader, ctx, sink, header, bound)?;

    // chunks are word-aligned, unless the pad byte would cross the bound
    let end = reader.position()?;
    let padded_end = end - u64::from(header.size) + header.padded_size();
    if padded_end > end && padded_end <= bound {
        reader.seek_to(padded_end)?;
    }

    Ok(())
}

/// Runs the right decoder for a chunk whose descriptor was just read.
///
/// Always leaves the cursor at the end of the chunk's payload.
pub(crate) fn dispatch<R: Read + Seek>(
    reader: &mut ChunkReader<'_, R>,
    ctx: &mut TraversalContext,
    sink: &mut dyn MetadataSink,
    header: ChunkHeader,
    bound: u64,
) -> RiffFatalResult<()> {
    let start = reader.position()?;
    let end = start + u64::from(header.size);

    if end > bound {
        log::error!(
            "`{}` at offset `{}` runs past its container (`{end}` > `{bound}`).",
            header.fourcc,
            start - ChunkHeader::LEN,
        );
        return Err(RiffFatalError::TruncatedOrCorrupt {
            offset: start - ChunkHeader::LEN,
            declared: u64::from(header.size),
            available: bound.saturating_sub(start),
        });
    }

    if let Some(handler) = leaf_handler(header.fourcc) {
        let len = u64::from(header.size).min(ctx.options.max_payload_len);
        if len < u64::from(header.size) {
            log::debug!(
                "`{}` is `{}` bytes. Only decoding the first `{len}`.",
                header.fourcc,
                header.size,
            );
        }

        let payload = reader.read_payload(len)?;
        handler(&payload, ctx, sink);
        ctx.within_list = false;
        ctx.just_closed_list = false;
    } else if header.fourcc.matches(LIST) {
        ctx.within_list = true;
        ctx.just_closed_list = false;
        ctx.open_list(ListFrame {
            payload_start: start,
            end,
        });

        ctx.depth += 1;
        while !ctx.terminate && reader.position()? < end {
            decode_block(reader, ctx, sink, end)?;
        }
        ctx.depth -= 1;

        ctx.close_list();
        ctx.within_list = ctx.current_list().is_some();
        ctx.just_closed_list = true;
    } else {
        log::trace!(
            "Skipping unknown `{}` (in a list: `{}`).",
            header.fourcc,
            ctx.within_list,
        );
        ctx.just_closed_list = false;
    }

    reader.seek_to(end)?;
    Ok(())
}

/// Running out of stream in the middle of a record means the file is cut
/// short. Anything else is the reader's fault.
fn truncated_or_io(e: io::Error, offset: u64, len: u64) -> RiffFatalError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        log::error!("The stream ended inside the record at offset `{offset}`.");
        return RiffFatalError::TruncatedOrCorrupt {
            offset,
            declared: ChunkHeader::LEN,
            available: len.saturating_sub(offset),
        };
    }

    e.into()
}
