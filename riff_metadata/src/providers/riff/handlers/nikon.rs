//! Nikon's `LIST ncdt` vendor block.
//!
//! The body holds sub-chunks. Two of them carry metadata as little-endian
//! `{u16 tag, u16 len, bytes}` records:
//!
//! - `NCVR`: the maker note's type and version.
//! - `NCTG`: camera settings, looked up in [`NikonTag`].
//!
//! The `NCTH` thumbnail and `NCVW` preview are skipped.

use riff_metadata_types::{
    fourcc::FourCc,
    nikon::{NikonTag, NikonValueKind},
    value::MetadataValue,
};
use winnow::{
    binary::{le_i32, le_u16},
    error::EmptyError,
};

use crate::{
    metadata::MetadataSink,
    providers::riff::{context::TraversalContext, error::RiffFieldError},
};

use super::{SubChunks, c_string};

const NCDT: FourCc = FourCc::new(*b"ncdt");
const NCVR: FourCc = FourCc::new(*b"NCVR");
const NCTG: FourCc = FourCc::new(*b"NCTG");

const MAKER_NOTE_TYPE: u16 = 0x0001;
const MAKER_NOTE_VERSION: u16 = 0x0002;

/// One `{tag, len, bytes}` record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Record<'p> {
    tag: u16,
    data: &'p [u8],

    /// The declared length, if it ran past the sub-chunk's end.
    overrun: Option<u16>,
}

/// Iterates over the records of an `NCVR` or `NCTG` sub-chunk.
struct Records<'p> {
    input: &'p [u8],
}

impl<'p> Iterator for Records<'p> {
    type Item = Record<'p>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.input.len() < 4 {
            return None;
        }

        let tag = le_u16::<_, EmptyError>(&mut self.input).ok()?;
        let len = le_u16::<_, EmptyError>(&mut self.input).ok()?;

        if usize::from(len) > self.input.len() {
            return Some(Record {
                tag,
                data: core::mem::take(&mut self.input),
                overrun: Some(len),
            });
        }

        let (data, rest) = self.input.split_at(usize::from(len));
        self.input = rest;
        Some(Record {
            tag,
            data,
            overrun: None,
        })
    }
}

/// Decodes the sub-chunks of a `LIST ncdt` body, just past the list type.
pub(super) fn nikon_list(body: &[u8], ctx: &mut TraversalContext, sink: &mut dyn MetadataSink) {
    for sub in SubChunks::new(body) {
        if let Some(declared) = sub.overrun {
            ctx.record(RiffFieldError::SubChunkOverrun {
                chunk: NCDT,
                sub_chunk: sub.fourcc,
                declared,
                available: sub.data.len(),
            });
        }

        if sub.fourcc.matches(NCVR.as_bytes()) {
            version_records(sub.data, ctx, sink);
        } else if sub.fourcc.matches(NCTG.as_bytes()) {
            tag_records(sub.data, ctx, sink);
        } else {
            log::trace!("Skipping Nikon `{}` sub-chunk.", sub.fourcc);
        }
    }
}

/// Reports records that ran long or came up empty.
///
/// Returns `false` for records that have nothing to decode.
fn check_record(
    chunk: FourCc,
    field: &'static str,
    record: &Record<'_>,
    ctx: &mut TraversalContext,
) -> bool {
    // the data is cut at the sub-chunk's end, but is still decoded
    if let Some(declared) = record.overrun {
        ctx.record(RiffFieldError::FieldTooShort {
            chunk,
            needed: usize::from(declared),
            got: record.data.len(),
        });
    }

    if record.data.is_empty() {
        ctx.record(RiffFieldError::EmptyValue { chunk, field });
        return false;
    }

    true
}

fn version_records(data: &[u8], ctx: &mut TraversalContext, sink: &mut dyn MetadataSink) {
    for record in (Records { input: data }) {
        match record.tag {
            MAKER_NOTE_TYPE => {
                let key = "video.MakerNoteType";
                if check_record(NCVR, key, &record, ctx) {
                    sink.set(key, c_string(record.data).into());
                }
            }
            MAKER_NOTE_VERSION => {
                let key = "video.MakerNoteVersion";
                if check_record(NCVR, key, &record, ctx) {
                    let version = record
                        .data
                        .iter()
                        .map(u8::to_string)
                        .collect::<Vec<_>>()
                        .join(".");
                    sink.set(key, version.into());
                }
            }
            other => log::trace!("Skipping `NCVR` record `{other:#06x}`."),
        }
    }
}

fn tag_records(data: &[u8], ctx: &mut TraversalContext, sink: &mut dyn MetadataSink) {
    for record in (Records { input: data }) {
        let Ok(tag) = NikonTag::try_from(record.tag) else {
            log::trace!("Unknown `NCTG` record `{:#06x}`. Skipping...", record.tag);
            continue;
        };

        let key = tag.key();
        if !check_record(NCTG, key, &record, ctx) {
            continue;
        }

        let value = match tag.kind() {
            NikonValueKind::Text => MetadataValue::from(c_string(record.data)),

            // zero-extend anything shorter than four bytes
            NikonValueKind::Integer => {
                let mut raw = [0_u8; 4];
                let len = record.data.len().min(4);
                raw[..len].copy_from_slice(&record.data[..len]);
                MetadataValue::from(u32::from_le_bytes(raw))
            }

            NikonValueKind::Ratio => {
                let mut input = record.data;
                let (Ok(numerator), Ok(denominator)) = (
                    le_i32::<_, EmptyError>(&mut input),
                    le_i32::<_, EmptyError>(&mut input),
                ) else {
                    ctx.record(RiffFieldError::FieldTooShort {
                        chunk: NCTG,
                        needed: 8,
                        got: record.data.len(),
                    });
                    continue;
                };

                match denominator {
                    0 => MetadataValue::Real(0.0),
                    d => MetadataValue::Real(f64::from(numerator) / f64::from(d)),
                }
            }
        };

        sink.set(key, value);
    }
}

#[cfg(test)]
mod tests {
    use riff_metadata_types::value::MetadataValue;

    use crate::{providers::riff::error::RiffFieldError, util::logger};

    use super::{
        super::test_util::{chunk, run},
        NCTG, nikon_list,
    };

    fn record(tag: u16, data: &[u8]) -> Vec<u8> {
        let mut bytes = tag.to_le_bytes().to_vec();
        bytes.extend((data.len() as u16).to_le_bytes());
        bytes.extend_from_slice(data);
        bytes
    }

    fn ratio(numerator: i32, denominator: i32) -> Vec<u8> {
        [numerator.to_le_bytes(), denominator.to_le_bytes()].concat()
    }

    #[test]
    fn version_block() {
        logger();

        let ncvr = [
            record(0x0001, b"NIKON DIGITAL CAMERA\0"),
            record(0x0002, &[1, 0, 0]),
            record(0x0042, b"ignored"),
        ]
        .concat();
        let (meta, ctx) = run(nikon_list, &chunk(b"NCVR", &ncvr));

        assert!(ctx.field_errors().is_empty());
        assert_eq!(
            meta.iter().collect::<Vec<_>>(),
            vec![
                (
                    "video.MakerNoteType",
                    &MetadataValue::from("NIKON DIGITAL CAMERA")
                ),
                ("video.MakerNoteVersion", &MetadataValue::from("1.0.0")),
            ]
        );
    }

    #[test]
    fn tag_block() {
        logger();

        let nctg = [
            record(0x0003, b"NIKON\0"),
            record(0x0004, b"COOLPIX P7000\0"),
            record(0x0007, &[1]),
            record(0x0009, &ratio(28, 10)),
            record(0x0013, b"2010:09:08 10:44:17\0"),
            record(0x7777, b"unknown"),
        ]
        .concat();
        let body = [chunk(b"NCTH", &[0xFF; 6]), chunk(b"NCTG", &nctg)].concat();
        let (meta, ctx) = run(nikon_list, &body);

        assert!(ctx.field_errors().is_empty());
        assert_eq!(
            meta.iter().collect::<Vec<_>>(),
            vec![
                ("video.Make", &MetadataValue::from("NIKON")),
                ("video.Model", &MetadataValue::from("COOLPIX P7000")),
                ("video.Orientation", &MetadataValue::Integer(1)),
                ("video.FNumber", &MetadataValue::Real(2.8)),
                (
                    "video.DateTimeOriginal",
                    &MetadataValue::from("2010:09:08 10:44:17")
                ),
            ]
        );
    }

    #[test]
    fn ratio_with_zero_denominator_is_zero() {
        logger();

        let nctg = record(0x0008, &ratio(1, 0));
        let (meta, ctx) = run(nikon_list, &chunk(b"NCTG", &nctg));

        assert!(ctx.field_errors().is_empty());
        assert_eq!(
            meta.get("video.ExposureTime"),
            Some(&MetadataValue::Real(0.0))
        );
    }

    #[test]
    fn empty_and_short_records_are_reported() {
        logger();

        let nctg = [record(0x0003, b""), record(0x000f, &[1, 0, 0, 0])].concat();
        let (meta, ctx) = run(nikon_list, &chunk(b"NCTG", &nctg));

        assert!(meta.is_empty());
        assert_eq!(
            ctx.field_errors(),
            &[
                RiffFieldError::EmptyValue {
                    chunk: NCTG,
                    field: "video.Make",
                },
                RiffFieldError::FieldTooShort {
                    chunk: NCTG,
                    needed: 8,
                    got: 4,
                },
            ]
        );
    }
}
