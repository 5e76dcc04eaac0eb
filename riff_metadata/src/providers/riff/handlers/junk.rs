//! `JUNK` chunks.
//!
//! These are usually padding. Pentax cameras hide a fixed-layout record in
//! the one right after the header list, and some encoders leave a text
//! note.

use riff_metadata_types::{fourcc::FourCc, value::MetadataValue};
use winnow::{binary::le_i32, error::EmptyError};

use crate::{
    metadata::MetadataSink,
    providers::riff::{context::TraversalContext, error::RiffFieldError},
};

use super::{c_string, le_field};

const JUNK: FourCc = FourCc::new(*b"JUNK");
const PENTAX: &[u8; 4] = b"PENT";

/// A field of the Pentax record: its offset, width, and how to read it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PentaxField {
    Text { key: &'static str, offset: usize, len: usize },
    Ratio { key: &'static str, offset: usize },
    ThumbnailDimension { key: &'static str, offset: usize },
}

impl PentaxField {
    const fn end(self) -> usize {
        match self {
            Self::Text { offset, len, .. } => offset + len,
            Self::Ratio { offset, .. } => offset + 8,
            Self::ThumbnailDimension { offset, .. } => offset + 2,
        }
    }
}

/// In file order, so a missing field means all later ones are missing too.
const PENTAX_FIELDS: &[PentaxField] = &[
    PentaxField::Text {
        key: "video.Make",
        offset: 18,
        len: 26,
    },
    PentaxField::Text {
        key: "video.Model",
        offset: 44,
        len: 50,
    },
    PentaxField::Ratio {
        key: "video.FNumber",
        offset: 94,
    },
    PentaxField::Text {
        key: "video.DateTimeOriginal",
        offset: 131,
        len: 26,
    },
    PentaxField::Text {
        key: "video.DateTimeDigitized",
        offset: 157,
        len: 26,
    },
    PentaxField::ThumbnailDimension {
        key: "xmp.Thumbnails/xmpGImg:width",
        offset: 299,
    },
    PentaxField::ThumbnailDimension {
        key: "xmp.Thumbnails/xmpGImg:height",
        offset: 301,
    },
];

pub(super) fn junk(payload: &[u8], ctx: &mut TraversalContext, sink: &mut dyn MetadataSink) {
    let is_pentax = payload
        .first_chunk::<4>()
        .is_some_and(|marker| FourCc::new(*marker).matches(PENTAX));

    if ctx.just_closed_list && is_pentax {
        log::debug!("Found a Pentax record in `JUNK`.");
        pentax(payload, ctx, sink);
        return;
    }

    let text = c_string(payload);
    if text.is_empty() {
        log::trace!("`JUNK` is just padding.");
        return;
    }

    sink.set("video.Junk", text.into());
}

fn pentax(payload: &[u8], ctx: &mut TraversalContext, sink: &mut dyn MetadataSink) {
    for field in PENTAX_FIELDS.iter().copied() {
        if payload.len() < field.end() {
            ctx.record(RiffFieldError::FieldTooShort {
                chunk: JUNK,
                needed: field.end(),
                got: payload.len(),
            });
            return;
        }

        match field {
            PentaxField::Text { key, offset, len } => {
                let text = c_string(&payload[offset..offset + len]);
                if text.is_empty() {
                    ctx.record(RiffFieldError::EmptyValue { chunk: JUNK, field: key });
                } else {
                    sink.set(key, text.into());
                }
            }

            PentaxField::Ratio { key, offset } => {
                let mut input = &payload[offset..offset + 8];
                let (Ok(numerator), Ok(denominator)) = (
                    le_i32::<_, EmptyError>(&mut input),
                    le_i32::<_, EmptyError>(&mut input),
                ) else {
                    continue;
                };

                if denominator == 0 {
                    ctx.record(RiffFieldError::ZeroDivisor { chunk: JUNK, field: key });
                } else {
                    sink.set(
                        key,
                        MetadataValue::Real(f64::from(numerator) / f64::from(denominator)),
                    );
                }
            }

            PentaxField::ThumbnailDimension { key, offset } => {
                let mut input = &payload[offset..offset + 2];
                if let Some(value) = le_field(&mut input, 2) {
                    sink.add(key, value.into());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use riff_metadata_types::value::MetadataValue;

    use crate::{
        metadata::VideoMetadata,
        providers::riff::{
            context::{ReadOptions, TraversalContext},
            error::RiffFieldError,
        },
        util::logger,
    };

    use super::{JUNK, junk};

    fn put(buf: &mut [u8], offset: usize, bytes: &[u8]) {
        buf[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    fn pentax_record() -> Vec<u8> {
        let mut buf = vec![0_u8; 303];
        put(&mut buf, 0, b"PENTDigital Cam");
        put(&mut buf, 18, b"PENTAX Corporation");
        put(&mut buf, 44, b"PENTAX Optio RZ10");
        put(&mut buf, 94, &35_i32.to_le_bytes());
        put(&mut buf, 98, &10_i32.to_le_bytes());
        put(&mut buf, 131, b"2012:01:02 03:04:05");
        put(&mut buf, 157, b"2012:01:02 03:04:06");
        put(&mut buf, 299, &160_u16.to_le_bytes());
        put(&mut buf, 301, &120_u16.to_le_bytes());
        buf
    }

    fn decode(payload: &[u8], just_closed_list: bool) -> (VideoMetadata, TraversalContext) {
        let mut meta = VideoMetadata::new();
        let mut ctx = TraversalContext::new(ReadOptions::default(), 0);
        ctx.just_closed_list = just_closed_list;
        junk(payload, &mut ctx, &mut meta);
        (meta, ctx)
    }

    #[test]
    fn pentax_record_after_list() {
        logger();

        let (meta, ctx) = decode(&pentax_record(), true);
        assert!(ctx.field_errors().is_empty());
        assert_eq!(
            meta.iter().collect::<Vec<_>>(),
            vec![
                ("video.Make", &MetadataValue::from("PENTAX Corporation")),
                ("video.Model", &MetadataValue::from("PENTAX Optio RZ10")),
                ("video.FNumber", &MetadataValue::Real(3.5)),
                (
                    "video.DateTimeOriginal",
                    &MetadataValue::from("2012:01:02 03:04:05")
                ),
                (
                    "video.DateTimeDigitized",
                    &MetadataValue::from("2012:01:02 03:04:06")
                ),
                ("xmp.Thumbnails/xmpGImg:width", &MetadataValue::Integer(160)),
                ("xmp.Thumbnails/xmpGImg:height", &MetadataValue::Integer(120)),
            ]
        );
    }

    #[test]
    fn pentax_record_needs_a_closed_list() {
        logger();

        let (meta, _) = decode(&pentax_record(), false);
        assert!(!meta.contains_key("video.Make"));
        assert_eq!(
            meta.get("video.Junk"),
            Some(&MetadataValue::from("PENTDigital Cam"))
        );
    }

    #[test]
    fn short_pentax_record_keeps_leading_fields() {
        logger();

        let (meta, ctx) = decode(&pentax_record()[..150], true);
        assert!(meta.contains_key("video.FNumber"));
        assert!(!meta.contains_key("video.DateTimeOriginal"));
        assert_eq!(
            ctx.field_errors(),
            &[RiffFieldError::FieldTooShort {
                chunk: JUNK,
                needed: 157,
                got: 150,
            }]
        );
    }

    #[test]
    fn zero_aperture_divisor_is_reported() {
        logger();

        let mut record = pentax_record();
        record[98..102].copy_from_slice(&0_i32.to_le_bytes());
        let (meta, ctx) = decode(&record, true);

        assert!(!meta.contains_key("video.FNumber"));
        assert!(ctx.field_errors().contains(&RiffFieldError::ZeroDivisor {
            chunk: JUNK,
            field: "video.FNumber",
        }));
    }

    #[test]
    fn text_and_padding() {
        logger();

        let (meta, _) = decode(b"encoded by someone\0\0\0", false);
        assert_eq!(
            meta.get("video.Junk"),
            Some(&MetadataValue::from("encoded by someone"))
        );

        let (meta, ctx) = decode(&[0; 64], true);
        assert!(meta.is_empty());
        assert!(ctx.field_errors().is_empty());
    }
}
