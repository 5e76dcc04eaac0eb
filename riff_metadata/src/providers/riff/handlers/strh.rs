//! Stream headers, `strh`.

use riff_metadata_types::{fourcc::FourCc, value::MetadataValue};
use winnow::error::EmptyError;

use crate::{
    metadata::MetadataSink,
    providers::riff::{
        chunk::fourcc,
        context::{StreamKind, TraversalContext},
        error::RiffFieldError,
    },
};

use super::{c_string, le_field};

const STRH: FourCc = FourCc::new(*b"strh");

/// The `strh` fields we read, after `fccType`. Each is four bytes wide.
const CODEC: usize = 1;
const RATE_DIVISOR: usize = 5;
const RATE: usize = 6;
const SAMPLE_COUNT: usize = 8;
const QUALITY: usize = 10;
const SAMPLE_SIZE: usize = 11;

/// Where each `strh` value goes for a kind of stream.
struct StreamKeys {
    codec: &'static str,
    rate: &'static str,
    sample_count: &'static str,
    quality: Option<&'static str>,
    sample_size: Option<&'static str>,
}

impl StreamKind {
    const fn keys(self) -> StreamKeys {
        match self {
            StreamKind::Video => StreamKeys {
                codec: "video.Codec",
                rate: "video.FrameRate",
                sample_count: "video.FrameCount",
                quality: Some("video.VideoQuality"),
                sample_size: Some("video.VideoSampleSize"),
            },
            StreamKind::Audio => StreamKeys {
                codec: "audio.Codec",
                rate: "audio.SampleRate",
                sample_count: "audio.SampleCount",
                quality: None,
                sample_size: None,
            },
            StreamKind::Midi | StreamKind::Text | StreamKind::Unknown => StreamKeys {
                codec: "video.Codec",
                rate: "video.StreamSampleRate",
                sample_count: "video.StreamSampleCount",
                quality: Some("video.StreamQuality"),
                sample_size: Some("video.StreamSampleSize"),
            },
        }
    }
}

pub(super) fn stream_header(payload: &[u8], ctx: &mut TraversalContext, sink: &mut dyn MetadataSink) {
    let mut input = payload;
    let needed = (SAMPLE_SIZE + 1) * 4;

    let Ok(fcc_type) = fourcc::<EmptyError>(&mut input) else {
        ctx.record(RiffFieldError::FieldTooShort {
            chunk: STRH,
            needed,
            got: payload.len(),
        });
        return;
    };

    ctx.stream_kind = StreamKind::from_fcc_type(fcc_type);
    log::trace!("Stream `{fcc_type}` is {:?}.", ctx.stream_kind);
    let keys = ctx.stream_kind.keys();

    let mut divisor: u32 = 1;
    for idx in CODEC..=SAMPLE_SIZE {
        let Some(value) = le_field(&mut input, 4) else {
            ctx.record(RiffFieldError::FieldTooShort {
                chunk: STRH,
                needed,
                got: payload.len(),
            });
            return;
        };

        match idx {
            CODEC => {
                // `fccHandler` is often all zeroes for audio
                let codec = c_string(&value.to_le_bytes());
                if codec.is_empty() {
                    log::trace!("Stream has no codec code.");
                } else {
                    sink.set(keys.codec, codec.into());
                }
            }
            RATE_DIVISOR => divisor = value,
            RATE => {
                if divisor == 0 {
                    ctx.record(RiffFieldError::ZeroDivisor {
                        chunk: STRH,
                        field: keys.rate,
                    });
                } else {
                    sink.set(
                        keys.rate,
                        MetadataValue::Real(f64::from(value) / f64::from(divisor)),
                    );
                }
            }
            SAMPLE_COUNT => sink.set(keys.sample_count, value.into()),
            QUALITY => {
                if let Some(key) = keys.quality {
                    sink.set(key, value.into());
                }
            }
            SAMPLE_SIZE => {
                if let Some(key) = keys.sample_size {
                    sink.set(key, value.into());
                }
            }
            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use riff_metadata_types::value::MetadataValue;

    use crate::{
        metadata::{MetadataSink as _, VideoMetadata},
        providers::riff::{
            context::{ReadOptions, StreamKind, TraversalContext},
            error::RiffFieldError,
        },
        util::logger,
    };

    use super::{super::test_util::run, STRH, stream_header};

    /// `fccType`, then fields 1 through 11.
    fn strh(fcc_type: &[u8; 4], codec: &[u8; 4], scale: u32, rate: u32, length: u32) -> Vec<u8> {
        let mut bytes = fcc_type.to_vec();
        bytes.extend_from_slice(codec);
        for field in [0_u32, 0, 0, scale, rate, 0, length, 0, 10_000, 0] {
            bytes.extend(field.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn video_stream() {
        logger();

        let (meta, ctx) = run(stream_header, &strh(b"vids", b"XVID", 1001, 30_000, 300));
        assert_eq!(ctx.stream_kind, StreamKind::Video);
        assert!(ctx.field_errors().is_empty());
        assert_eq!(
            meta.iter().collect::<Vec<_>>(),
            vec![
                ("video.Codec", &MetadataValue::from("XVID")),
                (
                    "video.FrameRate",
                    &MetadataValue::Real(30_000.0 / 1001.0)
                ),
                ("video.FrameCount", &MetadataValue::Integer(300)),
                ("video.VideoQuality", &MetadataValue::Integer(10_000)),
                ("video.VideoSampleSize", &MetadataValue::Integer(0)),
            ]
        );
    }

    #[test]
    fn audio_stream_skips_quality_and_empty_codec() {
        logger();

        let (meta, ctx) = run(stream_header, &strh(b"auds", &[0; 4], 1, 44_100, 441_000));
        assert_eq!(ctx.stream_kind, StreamKind::Audio);
        assert_eq!(
            meta.iter().collect::<Vec<_>>(),
            vec![
                ("audio.SampleRate", &MetadataValue::Real(44_100.0)),
                ("audio.SampleCount", &MetadataValue::Integer(441_000)),
            ]
        );
    }

    #[test]
    fn other_streams_use_generic_keys() {
        logger();

        let (meta, ctx) = run(stream_header, &strh(b"txts", b"sub ", 1, 1, 12));
        assert_eq!(ctx.stream_kind, StreamKind::Text);
        assert!(meta.contains_key("video.StreamSampleRate"));
        assert!(meta.contains_key("video.StreamSampleCount"));
        assert!(meta.contains_key("video.StreamQuality"));
        assert!(meta.contains_key("video.StreamSampleSize"));

        let (_, ctx) = run(stream_header, &strh(b"mids", b"\0\0\0\0", 1, 1, 1));
        assert_eq!(ctx.stream_kind, StreamKind::Midi);

        let (_, ctx) = run(stream_header, &strh(b"iavs", b"dvsd", 1, 1, 1));
        assert_eq!(ctx.stream_kind, StreamKind::Unknown);
    }

    #[test]
    fn zero_divisor_is_reported() {
        logger();

        let (meta, ctx) = run(stream_header, &strh(b"vids", b"DIV3", 0, 25, 100));
        assert!(!meta.contains_key("video.FrameRate"));
        assert_eq!(meta.get("video.FrameCount"), Some(&MetadataValue::Integer(100)));
        assert_eq!(
            ctx.field_errors(),
            &[RiffFieldError::ZeroDivisor {
                chunk: STRH,
                field: "video.FrameRate",
            }]
        );
    }

    #[test]
    fn replaces_earlier_stream_values() {
        logger();

        let mut meta = VideoMetadata::new();
        meta.set("video.FrameCount", 1_u32.into());
        let mut ctx = TraversalContext::new(ReadOptions::default(), 0);
        stream_header(&strh(b"vids", b"MJPG", 1, 25, 500), &mut ctx, &mut meta);

        assert_eq!(meta.get("video.FrameCount"), Some(&MetadataValue::Integer(500)));
    }
}
