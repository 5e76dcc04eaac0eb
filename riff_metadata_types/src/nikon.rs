//! Tags found in the `NCTG` records of Nikon's `LIST ncdt` vendor block.
//!
//! ## For contributors
//!
//! Each tag has an ID, the metadata key its value lands in, and a
//! [`NikonValueKind`] saying how the record's bytes are read. To support a
//! new tag, add a line to the `make_nikon_tags!` call below:
//!
//! ```ignore
//! make_nikon_tags!(
//!     // ...snip!
//!     YourNewTag = 0x0042 => {
//!         key: "video.YourNewTag",
//!         kind: NikonValueKind::Text,
//!     },
//! );
//! ```

/// How the bytes of a Nikon tag record are turned into a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NikonValueKind {
    /// A string, up to the first NUL.
    Text,

    /// An unsigned little-endian 32-bit integer.
    Integer,

    /// A signed little-endian 32-bit numerator followed by a signed 32-bit
    /// denominator.
    Ratio,
}

/// Creates the [`NikonTag`] enum alongside its lookup methods.
macro_rules! make_nikon_tags {
    ($( $variant:ident = $tag_id:expr => {
        key: $key:expr,
        kind: $kind:expr,
    }, )+) => {
        /// A list of all known `NCTG` tags.
        #[repr(u16)]
        #[non_exhaustive]
        #[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
        pub enum NikonTag {
            $( $variant = $tag_id, )+
        }

        impl core::convert::TryFrom<u16> for NikonTag {
            type Error = ();

            fn try_from(value: u16) -> Result<Self, Self::Error> {
                match value {
                    $( $tag_id => Ok(NikonTag::$variant), )+
                    _ => Err(()),
                }
            }
        }

        impl NikonTag {
            /// Every known tag, in ID order.
            pub const ALL: &[NikonTag] = &[$( NikonTag::$variant, )+];

            /// The metadata key this tag's value is stored under.
            ///
            /// ```
            /// use riff_metadata_types::nikon::NikonTag;
            ///
            /// assert_eq!(NikonTag::Make.key(), "video.Make");
            /// ```
            pub const fn key(&self) -> &'static str {
                match self {
                    $( NikonTag::$variant => $key, )+
                }
            }

            /// How this tag's record bytes should be read.
            pub const fn kind(&self) -> NikonValueKind {
                match self {
                    $( NikonTag::$variant => $kind, )+
                }
            }

            /// Returns this tag's ID.
            pub const fn tag_id(&self) -> u16 {
                *self as u16
            }
        }
    };
}

use NikonValueKind::{Integer, Ratio, Text};

make_nikon_tags!(
    Make = 0x0003 => { key: "video.Make", kind: Text, },
    Model = 0x0004 => { key: "video.Model", kind: Text, },
    Software = 0x0005 => { key: "video.Software", kind: Text, },
    Equipment = 0x0006 => { key: "video.Equipment", kind: Text, },
    Orientation = 0x0007 => { key: "video.Orientation", kind: Integer, },
    ExposureTime = 0x0008 => { key: "video.ExposureTime", kind: Ratio, },
    FNumber = 0x0009 => { key: "video.FNumber", kind: Ratio, },
    ExposureCompensation = 0x000a => { key: "video.ExposureCompensation", kind: Ratio, },
    MaxApertureValue = 0x000b => { key: "video.MaxApertureValue", kind: Ratio, },
    MeteringMode = 0x000c => { key: "video.MeteringMode", kind: Integer, },
    FocalLength = 0x000f => { key: "video.FocalLength", kind: Ratio, },
    XResolution = 0x0010 => { key: "video.XResolution", kind: Integer, },
    YResolution = 0x0011 => { key: "video.YResolution", kind: Integer, },
    ResolutionUnit = 0x0012 => { key: "video.ResolutionUnit", kind: Integer, },
    DateTimeOriginal = 0x0013 => { key: "video.DateTimeOriginal", kind: Text, },
    DateTimeDigitized = 0x0014 => { key: "video.DateTimeDigitized", kind: Text, },
    Duration = 0x0016 => { key: "video.duration", kind: Ratio, },
    FocusMode = 0x0018 => { key: "video.FocusMode", kind: Text, },
    DigitalZoomRatio = 0x001b => { key: "video.DigitalZoomRatio", kind: Ratio, },
    ColorMode = 0x001d => { key: "video.ColorMode", kind: Text, },
    Sharpness = 0x001e => { key: "video.Sharpness", kind: Text, },
    WhiteBalance = 0x001f => { key: "video.WhiteBalance", kind: Text, },
    ColorNoiseReduction = 0x0020 => { key: "video.ColorNoiseReduction", kind: Text, },
);

#[cfg(test)]
mod tests {
    use super::{NikonTag, NikonValueKind};

    #[test]
    fn ids_round_trip_through_try_from() {
        for tag in NikonTag::ALL {
            assert_eq!(NikonTag::try_from(tag.tag_id()), Ok(*tag));
        }
    }

    #[test]
    fn unknown_ids_are_rejected() {
        assert_eq!(NikonTag::try_from(0x0001), Err(()));
        assert_eq!(NikonTag::try_from(0x000e), Err(()));
    }

    #[test]
    fn aperture_is_a_ratio() {
        assert_eq!(NikonTag::FNumber.kind(), NikonValueKind::Ratio);
        assert_eq!(NikonTag::Orientation.kind(), NikonValueKind::Integer);
        assert_eq!(NikonTag::Model.kind(), NikonValueKind::Text);
    }
}
