//! Four-character codes, the identifiers used by every RIFF chunk.

/// A four-character code (FourCC) identifying a chunk or a list type.
///
/// The bytes are kept exactly as read. They aren't always printable ASCII,
/// so don't assume they're valid UTF-8.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FourCc(pub [u8; 4]);

impl FourCc {
    /// Creates a code from its raw bytes.
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes of this code.
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Returns the code with every ASCII letter upper-cased.
    ///
    /// Known vocabulary is always stored upper-cased, so this is the form
    /// used for lookups.
    pub const fn to_ascii_uppercase(&self) -> [u8; 4] {
        let [a, b, c, d] = self.0;
        [
            a.to_ascii_uppercase(),
            b.to_ascii_uppercase(),
            c.to_ascii_uppercase(),
            d.to_ascii_uppercase(),
        ]
    }

    /// Compares against an upper-case vocabulary entry, ignoring ASCII case.
    ///
    /// ```
    /// use riff_metadata_types::fourcc::FourCc;
    ///
    /// assert!(FourCc::new(*b"avih").matches(b"AVIH"));
    /// assert!(FourCc::new(*b"LIST").matches(b"LIST"));
    /// assert!(!FourCc::new(*b"strh").matches(b"STRF"));
    /// ```
    pub const fn matches(&self, upper: &[u8; 4]) -> bool {
        let ours = self.to_ascii_uppercase();
        ours[0] == upper[0] && ours[1] == upper[1] && ours[2] == upper[2] && ours[3] == upper[3]
    }

    /// Renders the code for display, swapping non-printable bytes for `.`.
    pub fn printable(&self) -> String {
        self.0
            .iter()
            .map(|b| match b {
                0x20..=0x7e => *b as char,
                _ => '.',
            })
            .collect()
    }
}

impl From<[u8; 4]> for FourCc {
    fn from(value: [u8; 4]) -> Self {
        Self(value)
    }
}

impl core::fmt::Debug for FourCc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FourCc(`{}`)", self.printable())
    }
}

impl core::fmt::Display for FourCc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.printable())
    }
}
