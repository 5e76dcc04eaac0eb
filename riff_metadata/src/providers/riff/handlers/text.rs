//! Small chunks holding a single value: `strn`, `IDIT` and `strd`.

use riff_metadata_types::fourcc::FourCc;

use crate::{
    metadata::MetadataSink,
    providers::riff::{context::TraversalContext, error::RiffFieldError},
};

use super::c_string;

const STRN: FourCc = FourCc::new(*b"strn");
const IDIT: FourCc = FourCc::new(*b"IDIT");
const STRD: FourCc = FourCc::new(*b"strd");

/// Marks the Exif block some cameras put in `strd`.
const AVIF: &[u8; 4] = b"AVIF";

/// Where the Exif block starts, past the marker and four reserved bytes.
const EXIF_OFFSET: usize = 8;

fn text_chunk(
    chunk: FourCc,
    key: &'static str,
    payload: &[u8],
    ctx: &mut TraversalContext,
    sink: &mut dyn MetadataSink,
) {
    let text = c_string(payload);
    if text.is_empty() {
        ctx.record(RiffFieldError::EmptyValue { chunk, field: key });
        return;
    }

    sink.set(key, text.into());
}

pub(super) fn stream_name(payload: &[u8], ctx: &mut TraversalContext, sink: &mut dyn MetadataSink) {
    text_chunk(STRN, "video.StreamName", payload, ctx, sink);
}

pub(super) fn date_utc(
    payload: &[u8],
    ctx: &mut TraversalContext,
    sink: &mut dyn MetadataSink,
) {
    text_chunk(IDIT, "video.DateUTC", payload, ctx, sink);
}

pub(super) fn stream_data(payload: &[u8], ctx: &mut TraversalContext, sink: &mut dyn MetadataSink) {
    if payload.len() < EXIF_OFFSET {
        ctx.record(RiffFieldError::FieldTooShort {
            chunk: STRD,
            needed: EXIF_OFFSET,
            got: payload.len(),
        });
        return;
    }

    let marker = FourCc::new([payload[0], payload[1], payload[2], payload[3]]);
    if !marker.matches(AVIF) {
        log::trace!("`strd` holds `{marker}` data, which isn't Exif. Skipping...");
        return;
    }

    log::debug!(
        "Found `{}` bytes of Exif in a `strd` chunk.",
        payload.len() - EXIF_OFFSET
    );
    sink.set_exif_blob(payload[EXIF_OFFSET..].to_vec());
}
