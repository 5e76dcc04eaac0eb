//! Video lookup tables.

/// Named aspect ratios, keyed by the ratio times ten (truncated to one
/// decimal place first).
pub static ASPECT_RATIO_LABELS: &[(i32, &str)] = &[
    (10, "1:1"),
    (12, "5:4"),
    (13, "4:3"),
    (16, "16:10"),
    (17, "16:9"),
    (22, "2.21:1"),
    (23, "2.35:1"),
];

/// Finds the label of an aspect ratio code, if it has one.
///
/// ```
/// use riff_metadata_types::video::aspect_ratio_label;
///
/// assert_eq!(aspect_ratio_label(17), Some("16:9"));
/// assert_eq!(aspect_ratio_label(15), None);
/// ```
pub fn aspect_ratio_label(code: i32) -> Option<&'static str> {
    ASPECT_RATIO_LABELS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
}
