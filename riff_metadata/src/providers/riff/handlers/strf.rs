//! Stream formats: `strf` in AVI files and `fmt ` in WAV files.
//!
//! What the payload holds depends on the stream kind the preceding `strh`
//! set: a `BITMAPINFOHEADER` for video or a `WAVEFORMATEX` for audio.

use riff_metadata_types::{
    audio::{audio_encoding_label, channel_layout},
    fourcc::FourCc,
    value::MetadataValue,
};

use crate::{
    metadata::MetadataSink,
    providers::riff::{
        context::{StreamKind, TraversalContext},
        error::RiffFieldError,
    },
};

use super::{c_string, le_field};

const STRF: FourCc = FourCc::new(*b"strf");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BitmapField {
    HeaderSize,
    Width,
    Height,
    Planes,
    BitCount,
    Compression,
    SizeImage,
    XPelsPerMeter,
    YPelsPerMeter,
    ColorsUsed,
    ColorsImportant,
}

impl BitmapField {
    const ORDER: [Self; 11] = [
        Self::HeaderSize,
        Self::Width,
        Self::Height,
        Self::Planes,
        Self::BitCount,
        Self::Compression,
        Self::SizeImage,
        Self::XPelsPerMeter,
        Self::YPelsPerMeter,
        Self::ColorsUsed,
        Self::ColorsImportant,
    ];

    const fn width(self) -> usize {
        match self {
            Self::Planes | Self::BitCount => 2,
            _ => 4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WaveField {
    FormatTag,
    Channels,
    SamplesPerSec,
    AvgBytesPerSec,
    BlockAlign,
    BitsPerSample,
}

impl WaveField {
    const ORDER: [Self; 6] = [
        Self::FormatTag,
        Self::Channels,
        Self::SamplesPerSec,
        Self::AvgBytesPerSec,
        Self::BlockAlign,
        Self::BitsPerSample,
    ];

    const fn width(self) -> usize {
        match self {
            Self::SamplesPerSec | Self::AvgBytesPerSec => 4,
            _ => 2,
        }
    }
}

pub(super) fn stream_format(payload: &[u8], ctx: &mut TraversalContext, sink: &mut dyn MetadataSink) {
    match ctx.stream_kind {
        StreamKind::Video => bitmap_info(payload, ctx, sink),
        StreamKind::Audio => wave_format_ex(payload, ctx, sink),
        kind => log::trace!("Nothing to decode in a `strf` for a {kind:?} stream."),
    }
}

/// `fmt ` only shows up in WAV files, which are always audio.
pub(super) fn wave_format(payload: &[u8], ctx: &mut TraversalContext, sink: &mut dyn MetadataSink) {
    ctx.stream_kind = StreamKind::Audio;
    stream_format(payload, ctx, sink);
}

fn bitmap_info(payload: &[u8], ctx: &mut TraversalContext, sink: &mut dyn MetadataSink) {
    let mut input = payload;

    for field in BitmapField::ORDER {
        let Some(value) = le_field(&mut input, field.width()) else {
            ctx.record(RiffFieldError::FieldTooShort {
                chunk: STRF,
                needed: BitmapField::ORDER.iter().map(|f| f.width()).sum(),
                got: payload.len(),
            });
            return;
        };

        match field {
            // the main header already gave us the frame size
            BitmapField::HeaderSize | BitmapField::Width | BitmapField::Height => (),

            BitmapField::Planes => sink.set("video.Planes", value.into()),
            BitmapField::BitCount => sink.set("video.PixelDepth", value.into()),
            BitmapField::Compression => {
                sink.set("video.Compressor", c_string(&value.to_le_bytes()).into())
            }
            BitmapField::SizeImage => sink.set("video.ImageLength", value.into()),
            BitmapField::XPelsPerMeter => sink.set("video.PixelPerMeterX", value.into()),
            BitmapField::YPelsPerMeter => sink.set("video.PixelPerMeterY", value.into()),
            BitmapField::ColorsUsed => sink.set(
                "video.NumOfColours",
                match value {
                    0 => MetadataValue::from("Unspecified"),
                    n => n.into(),
                },
            ),
            BitmapField::ColorsImportant => sink.set(
                "video.NumOfImpColours",
                match value {
                    0 => MetadataValue::from("All"),
                    n => n.into(),
                },
            ),
        }
    }
}

fn wave_format_ex(payload: &[u8], ctx: &mut TraversalContext, sink: &mut dyn MetadataSink) {
    let mut input = payload;

    for field in WaveField::ORDER {
        let Some(value) = le_field(&mut input, field.width()) else {
            ctx.record(RiffFieldError::FieldTooShort {
                chunk: STRF,
                needed: WaveField::ORDER.iter().map(|f| f.width()).sum(),
                got: payload.len(),
            });
            return;
        };

        match field {
            WaveField::FormatTag => {
                // two bytes wide, so this always fits
                let code = value as u16;
                sink.set(
                    "audio.Compressor",
                    match audio_encoding_label(code) {
                        Some(label) => label.into(),
                        None => {
                            log::debug!("Unknown audio encoding `{code:#06x}`.");
                            code.into()
                        }
                    },
                );
            }
            WaveField::Channels => {
                sink.set("audio.ChannelType", channel_layout(value as u16).into())
            }
            WaveField::SamplesPerSec => sink.set("audio.SampleRate", value.into()),
            WaveField::AvgBytesPerSec => sink.set("audio.AvgBytesPerSec", value.into()),
            WaveField::BlockAlign => (),
            WaveField::BitsPerSample => sink.set("audio.BitsPerSample", value.into()),
        }
    }
}
