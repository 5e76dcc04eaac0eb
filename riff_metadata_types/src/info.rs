//! The vocabulary of the `LIST INFO` free-text dictionary.
//!
//! Each entry in an `INFO` list is a short code (like `INAM`) followed by a
//! string. This module says which metadata key each known code is stored
//! under.
//!
//! The table also carries a few non-standard codes written by popular
//! editors (Sony Vegas, for example), since they show up in the wild.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::fourcc::FourCc;

/// A map, (key, value), where:
///
/// - `key` is the upper-cased short code
/// - `value` is the metadata key the code's text is stored under
pub static INFO_TAGS: LazyLock<FxHashMap<[u8; 4], &'static str>> = LazyLock::new(|| {
    let mut m: FxHashMap<[u8; 4], &'static str> = FxHashMap::default();
    map(&mut m);
    m
});

/// Finds the metadata key for an `INFO` short code.
///
/// Codes are compared without regard to ASCII case.
///
/// ```
/// use riff_metadata_types::{fourcc::FourCc, info::info_key};
///
/// assert_eq!(info_key(FourCc::new(*b"INAM")), Some("video.Title"));
/// assert_eq!(info_key(FourCc::new(*b"inam")), Some("video.Title"));
/// assert_eq!(info_key(FourCc::new(*b"ZZZZ")), None);
/// ```
pub fn info_key(code: FourCc) -> Option<&'static str> {
    INFO_TAGS.get(&code.to_ascii_uppercase()).copied()
}

/// Adds all (key, value) pairs to the currently empty map.
fn map(m: &mut FxHashMap<[u8; 4], &'static str>) {
    // helper lambda to make things slightly shorter :D
    let mut i = |code: &[u8; 4], key: &'static str| m.insert(*code, key);

    i(b"AGES", "video.Rated");
    i(b"CMNT", "video.Comment");
    i(b"CODE", "video.EncodedBy");
    i(b"COMM", "video.Comment");
    i(b"DIRC", "video.Director");
    i(b"DISP", "audio.SchemeTitle");
    i(b"DTIM", "video.DateTimeOriginal");
    i(b"GENR", "video.Genre");
    i(b"IARL", "video.ArchivalLocation");
    i(b"IART", "video.Artist");
    i(b"IAS1", "video.Edit1");
    i(b"IAS2", "video.Edit2");
    i(b"IAS3", "video.Edit3");
    i(b"IAS4", "video.Edit4");
    i(b"IAS5", "video.Edit5");
    i(b"IAS6", "video.Edit6");
    i(b"IAS7", "video.Edit7");
    i(b"IAS8", "video.Edit8");
    i(b"IAS9", "video.Edit9");
    i(b"IBSU", "video.BaseURL");
    i(b"ICAS", "audio.DefaultStream");
    i(b"ICDS", "video.CostumeDesigner");
    i(b"ICMS", "video.Commissioned");
    i(b"ICMT", "video.Comment");
    i(b"ICNM", "video.Cinematographer");
    i(b"ICNT", "video.Country");
    i(b"ICOP", "video.Copyright");
    i(b"ICRD", "video.DateTimeDigitized");
    i(b"ICRP", "video.Cropped");
    i(b"IDIM", "video.Dimensions");
    i(b"IDPI", "video.DotsPerInch");
    i(b"IDST", "video.DistributedBy");
    i(b"IEDT", "video.EditedBy");
    i(b"IENC", "video.EncodedBy");
    i(b"IENG", "video.Engineer");
    i(b"IGNR", "video.Genre");
    i(b"IKEY", "video.PerformerKeywords");
    i(b"ILGT", "video.Lightness");
    i(b"ILGU", "video.LogoURL");
    i(b"ILIU", "video.LogoIconURL");
    i(b"ILNG", "video.Language");
    i(b"IMBI", "video.InfoBannerImage");
    i(b"IMBU", "video.InfoBannerURL");
    i(b"IMED", "video.Medium");
    i(b"IMIT", "video.InfoText");
    i(b"IMIU", "video.InfoURL");
    i(b"IMUS", "video.MusicBy");
    i(b"INAM", "video.Title");
    i(b"IPDS", "video.ProductionDesigner");
    i(b"IPLT", "video.NumOfColors");
    i(b"IPRD", "video.Product");
    i(b"IPRO", "video.ProducedBy");
    i(b"IRIP", "video.RippedBy");
    i(b"IRTD", "video.Rating");
    i(b"ISBJ", "video.Subject");
    i(b"ISFT", "video.Software");
    i(b"ISGN", "video.SecondaryGenre");
    i(b"ISHP", "video.Sharpness");
    i(b"ISRC", "video.Source");
    i(b"ISRF", "video.SourceForm");
    i(b"ISTD", "video.ProductionStudio");
    i(b"ISTR", "video.Starring");
    i(b"ITCH", "video.Technician");
    i(b"IWMU", "video.WatermarkURL");
    i(b"IWRI", "video.WrittenBy");
    i(b"LANG", "video.Language");
    i(b"LOCA", "video.LocationInfo");
    i(b"PRT1", "video.Part");
    i(b"PRT2", "video.NumOfParts");
    i(b"RATE", "video.Rate");
    i(b"STAR", "video.Starring");
    i(b"STAT", "video.Statistics");
    i(b"TAPE", "video.TapeName");
    i(b"TCDO", "video.EndTimecode");
    i(b"TCOD", "video.StartTimecode");
    i(b"TITL", "video.Title");
    i(b"TLEN", "video.Length");
    i(b"TORG", "video.Organization");
    i(b"TRCK", "video.TrackNumber");
    i(b"TURL", "video.URL");
    i(b"TVER", "video.SoftwareVersion");
    i(b"VMAJ", "video.VegasVersionMajor");
    i(b"VMIN", "video.VegasVersionMinor");
    i(b"YEAR", "video.Year");
}
