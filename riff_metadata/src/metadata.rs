//! # Metadata
//!
//! Where decoded values end up.
//!
//! The walker never touches a concrete store. It writes through
//! [`MetadataSink`], so callers can collect values however they like. The
//! crate's own store is [`VideoMetadata`].

use riff_metadata_types::value::MetadataValue;

/// Receives decoded `(key, value)` pairs.
pub trait MetadataSink {
    /// Sets `key` to `value`, replacing anything already stored under it.
    fn set(&mut self, key: &str, value: MetadataValue);

    /// Appends another value under `key`, keeping the existing ones.
    fn add(&mut self, key: &str, value: MetadataValue);

    /// Takes an embedded Exif block, found in a stream's `strd` chunk.
    ///
    /// The block is a little-endian IFD without a TIFF header. By default,
    /// it's dropped.
    fn set_exif_blob(&mut self, blob: Vec<u8>) {
        log::debug!(
            "This sink doesn't keep Exif. Dropping `{}` bytes...",
            blob.len()
        );
    }
}

/// An ordered store of metadata entries.
///
/// Entries stay in the order they were first written.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VideoMetadata {
    entries: Vec<(String, MetadataValue)>,
    exif: Option<Vec<u8>>,
}

impl VideoMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the first value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Returns every value stored under `key`, in insertion order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a MetadataValue> + 'a {
        self.entries
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over all entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The raw Exif block from a `strd` chunk, if there was one.
    pub fn exif_raw(&self) -> Option<&[u8]> {
        self.exif.as_deref()
    }
}

impl MetadataSink for VideoMetadata {
    fn set(&mut self, key: &str, value: MetadataValue) {
        let Some(first) = self.entries.iter().position(|(k, _)| k == key) else {
            self.entries.push((key.to_owned(), value));
            return;
        };

        // replace the first one in place, then drop any others
        self.entries[first].1 = value;
        let mut seen = 0_usize;
        self.entries.retain(|(k, _)| {
            if k != key {
                return true;
            }
            seen += 1;
            seen == 1
        });
    }

    fn add(&mut self, key: &str, value: MetadataValue) {
        self.entries.push((key.to_owned(), value));
    }

    fn set_exif_blob(&mut self, blob: Vec<u8>) {
        if self.exif.is_some() {
            log::debug!("Replacing an earlier Exif block.");
        }
        self.exif = Some(blob);
    }
}
