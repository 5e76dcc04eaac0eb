//! The main AVI header, `avih`.

use riff_metadata_types::{fourcc::FourCc, value::MetadataValue};

use crate::{
    metadata::MetadataSink,
    providers::riff::{
        context::TraversalContext,
        derive::{fill_aspect_ratio, fill_duration, frame_rate},
        error::RiffFieldError,
    },
};

use super::le_field;

const AVIH: FourCc = FourCc::new(*b"avih");

/// Ten little-endian `u32`s, in file order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MainHeaderField {
    MicroSecPerFrame,
    MaxBytesPerSec,
    PaddingGranularity,
    Flags,
    TotalFrames,
    InitialFrames,
    Streams,
    SuggestedBufferSize,
    Width,
    Height,
}

impl MainHeaderField {
    const ORDER: [Self; 10] = [
        Self::MicroSecPerFrame,
        Self::MaxBytesPerSec,
        Self::PaddingGranularity,
        Self::Flags,
        Self::TotalFrames,
        Self::InitialFrames,
        Self::Streams,
        Self::SuggestedBufferSize,
        Self::Width,
        Self::Height,
    ];
}

pub(super) fn main_header(payload: &[u8], ctx: &mut TraversalContext, sink: &mut dyn MetadataSink) {
    let mut input = payload;
    let (mut micro_sec_per_frame, mut total_frames) = (None, 0_u32);
    let (mut width, mut height) = (None, None);

    for field in MainHeaderField::ORDER {
        let Some(value) = le_field(&mut input, 4) else {
            ctx.record(RiffFieldError::FieldTooShort {
                chunk: AVIH,
                needed: MainHeaderField::ORDER.len() * 4,
                got: payload.len(),
            });
            break;
        };

        match field {
            MainHeaderField::MicroSecPerFrame => {
                sink.set("video.MicroSecPerFrame", value.into());
                micro_sec_per_frame = Some(value);
            }
            MainHeaderField::MaxBytesPerSec => {
                sink.set(
                    "video.MaxDataRate",
                    MetadataValue::Real(f64::from(value) / 1024.0),
                );
            }
            MainHeaderField::TotalFrames => {
                sink.set("video.FrameCount", value.into());
                total_frames = value;
            }
            MainHeaderField::Streams => sink.set("video.StreamCount", value.into()),
            MainHeaderField::Width => {
                sink.set("video.Width", value.into());
                width = Some(value);
            }
            MainHeaderField::Height => {
                sink.set("video.Height", value.into());
                height = Some(value);
            }

            // read for position only
            MainHeaderField::PaddingGranularity
            | MainHeaderField::Flags
            | MainHeaderField::InitialFrames
            | MainHeaderField::SuggestedBufferSize => (),
        }
    }

    if let (Some(width), Some(height)) = (width, height) {
        fill_aspect_ratio(width, height, sink);
    }

    if let Some(rate) = micro_sec_per_frame.and_then(frame_rate) {
        fill_duration(rate, total_frames, ctx.stream_len, sink);
    }
}
