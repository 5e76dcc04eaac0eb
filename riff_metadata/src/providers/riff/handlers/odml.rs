//! The OpenDML extended header, `LIST odml`.

use riff_metadata_types::fourcc::FourCc;

use crate::{
    metadata::MetadataSink,
    providers::riff::{context::TraversalContext, error::RiffFieldError},
};

use super::{SubChunks, le_field};

const ODML: FourCc = FourCc::new(*b"odml");
const DMLH: FourCc = FourCc::new(*b"dmlh");

/// Decodes a `LIST odml` body, just past the list type.
pub(super) fn odml_list(body: &[u8], ctx: &mut TraversalContext, sink: &mut dyn MetadataSink) {
    for sub in SubChunks::new(body) {
        if let Some(declared) = sub.overrun {
            ctx.record(RiffFieldError::SubChunkOverrun {
                chunk: ODML,
                sub_chunk: sub.fourcc,
                declared,
                available: sub.data.len(),
            });
        }

        if !sub.fourcc.matches(&DMLH.to_ascii_uppercase()) {
            log::trace!("Skipping `{}` in `odml`.", sub.fourcc);
            continue;
        }

        let mut input = sub.data;
        match le_field(&mut input, 4) {
            Some(total_frames) => sink.set("video.TotalFrameCount", total_frames.into()),
            None => ctx.record(RiffFieldError::FieldTooShort {
                chunk: DMLH,
                needed: 4,
                got: sub.data.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use riff_metadata_types::value::MetadataValue;

    use crate::{providers::riff::error::RiffFieldError, util::logger};

    use super::{
        super::test_util::{chunk, run},
        DMLH, odml_list,
    };

    #[test]
    fn total_frames() {
        logger();

        let mut dmlh = 54_000_u32.to_le_bytes().to_vec();
        dmlh.extend_from_slice(&[0; 244]);
        let (meta, ctx) = run(odml_list, &chunk(b"dmlh", &dmlh));

        assert!(ctx.field_errors().is_empty());
        assert_eq!(
            meta.get("video.TotalFrameCount"),
            Some(&MetadataValue::Integer(54_000))
        );
    }

    #[test]
    fn short_dmlh_is_reported() {
        logger();

        let (meta, ctx) = run(odml_list, &chunk(b"dmlh", &[1, 2]));
        assert!(meta.is_empty());
        assert_eq!(
            ctx.field_errors(),
            &[RiffFieldError::FieldTooShort {
                chunk: DMLH,
                needed: 4,
                got: 2,
            }]
        );
    }
}
