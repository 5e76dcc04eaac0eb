//! The `LIST INFO` free-text dictionary.

use riff_metadata_types::{fourcc::FourCc, info::info_key};

use crate::{
    metadata::MetadataSink,
    providers::riff::{context::TraversalContext, error::RiffFieldError},
};

use super::{SubChunks, c_string};

const INFO: FourCc = FourCc::new(*b"INFO");

/// Decodes the records in a `LIST INFO` body, just past the list type.
pub(super) fn info_list(body: &[u8], ctx: &mut TraversalContext, sink: &mut dyn MetadataSink) {
    for record in SubChunks::new(body) {
        if record.fourcc.0 == [0; 4] {
            log::trace!("Hit a zero code. Done with `INFO`.");
            break;
        }

        if let Some(declared) = record.overrun {
            ctx.record(RiffFieldError::SubChunkOverrun {
                chunk: INFO,
                sub_chunk: record.fourcc,
                declared,
                available: record.data.len(),
            });
        }

        let Some(key) = info_key(record.fourcc) else {
            log::trace!("Unknown `INFO` code `{}`. Skipping...", record.fourcc);
            continue;
        };

        let text = c_string(record.data);
        if text.is_empty() {
            ctx.record(RiffFieldError::EmptyValue {
                chunk: INFO,
                field: key,
            });
            continue;
        }

        sink.set(key, text.into());
    }
}

#[cfg(test)]
mod tests {
    use riff_metadata_types::value::MetadataValue;

    use crate::{providers::riff::error::RiffFieldError, util::logger};

    use super::{
        super::test_util::{chunk, fcc, run},
        INFO, info_list,
    };

    #[test]
    fn known_codes_are_stored() {
        logger();

        let body = [
            chunk(b"INAM", b"Holiday\0"),
            chunk(b"IART", b"Someone\0"),
            chunk(b"ISFT", b"Lavf58.29.100\0"),
        ]
        .concat();
        let (meta, ctx) = run(info_list, &body);

        assert!(ctx.field_errors().is_empty());
        assert_eq!(
            meta.iter().collect::<Vec<_>>(),
            vec![
                ("video.Title", &MetadataValue::from("Holiday")),
                ("video.Artist", &MetadataValue::from("Someone")),
                ("video.Software", &MetadataValue::from("Lavf58.29.100")),
            ]
        );
    }

    #[test]
    fn unknown_codes_are_skipped() {
        logger();

        let body = [chunk(b"IZZZ", b"who knows\0"), chunk(b"INAM", b"Title\0")].concat();
        let (meta, ctx) = run(info_list, &body);

        assert_eq!(meta.len(), 1);
        assert_eq!(meta.get("video.Title"), Some(&MetadataValue::from("Title")));
        assert!(ctx.field_errors().is_empty());
    }

    #[test]
    fn odd_sizes_are_padded() {
        logger();

        // "abc" is three bytes, so a pad byte follows it
        let body = [chunk(b"INAM", b"abc"), chunk(b"ICMT", b"comment")].concat();
        let (meta, _) = run(info_list, &body);

        assert_eq!(meta.get("video.Title"), Some(&MetadataValue::from("abc")));
        assert_eq!(
            meta.get("video.Comment"),
            Some(&MetadataValue::from("comment"))
        );
    }

    #[test]
    fn zero_code_ends_the_list() {
        logger();

        let mut body = chunk(b"INAM", b"Title\0");
        body.extend_from_slice(&[0; 8]);
        body.extend(chunk(b"ICMT", b"never read\0"));
        let (meta, _) = run(info_list, &body);

        assert_eq!(meta.len(), 1);
    }

    #[test]
    fn overrun_is_clamped_and_reported() {
        logger();

        let mut body = chunk(b"INAM", b"Title\0");
        body.extend_from_slice(b"ICMT\xff\x00\x00\x00cut");
        let (meta, ctx) = run(info_list, &body);

        assert_eq!(meta.get("video.Comment"), Some(&MetadataValue::from("cut")));
        assert_eq!(
            ctx.field_errors(),
            &[RiffFieldError::SubChunkOverrun {
                chunk: INFO,
                sub_chunk: fcc(b"ICMT"),
                declared: 0xff,
                available: 3,
            }]
        );
    }

    #[test]
    fn empty_values_are_reported() {
        logger();

        let (meta, ctx) = run(info_list, &chunk(b"INAM", b""));
        assert!(meta.is_empty());
        assert_eq!(
            ctx.field_errors(),
            &[RiffFieldError::EmptyValue {
                chunk: INFO,
                field: "video.Title",
            }]
        );
    }
}
