use riff_metadata_types::fourcc::FourCc;

use super::error::RiffFieldError;

/// What kind of stream the most recent `strh` chunk described.
///
/// This decides which keys the following `strh`/`strf` fields go to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StreamKind {
    #[default]
    Unknown,
    Audio,
    Midi,
    Text,
    Video,
}

impl StreamKind {
    /// Classifies a stream from its `fccType`.
    pub const fn from_fcc_type(code: FourCc) -> Self {
        if code.matches(b"VIDS") {
            Self::Video
        } else if code.matches(b"AUDS") {
            Self::Audio
        } else if code.matches(b"MIDS") {
            Self::Midi
        } else if code.matches(b"TXTS") {
            Self::Text
        } else {
            Self::Unknown
        }
    }
}

/// A `LIST` container we're inside of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListFrame {
    /// Where the list's payload begins. The list type sits here.
    pub payload_start: u64,

    /// One past the list's last payload byte.
    pub end: u64,
}

impl ListFrame {
    /// Where the list's body begins, just past the list type.
    pub const fn body_start(&self) -> u64 {
        self.payload_start + 4
    }
}

/// Limits on how far the walker will go.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReadOptions {
    /// How many containers may nest inside each other.
    pub max_depth: usize,

    /// The most bytes of any one chunk that are read into memory.
    ///
    /// Longer chunks are still skipped over correctly. Handlers just see the
    /// first `max_payload_len` bytes.
    pub max_payload_len: u64,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            max_depth: 16,
            max_payload_len: 4 * 1024 * 1024,
        }
    }
}

/// State that carries across chunks during one walk.
#[derive(Clone, Debug)]
pub struct TraversalContext {
    /// Set once the media data starts. Nothing after it is metadata.
    pub terminate: bool,

    pub stream_kind: StreamKind,

    /// Whether the last structural thing we saw was a `LIST`.
    ///
    /// Unknown chunks inside lists are skipped quietly.
    pub within_list: bool,

    /// Whether the chunk being dispatched directly follows a `LIST` that
    /// just closed.
    pub just_closed_list: bool,

    /// How deeply we're nested right now.
    pub depth: usize,

    pub options: ReadOptions,

    /// The total stream length, used for the data rate.
    pub stream_len: u64,

    lists: Vec<ListFrame>,
    field_errors: Vec<RiffFieldError>,
}

impl TraversalContext {
    pub fn new(options: ReadOptions, stream_len: u64) -> Self {
        Self {
            terminate: false,
            stream_kind: StreamKind::Unknown,
            within_list: false,
            just_closed_list: false,
            depth: 0,
            options,
            stream_len,
            lists: Vec::new(),
            field_errors: Vec::new(),
        }
    }

    pub fn open_list(&mut self, frame: ListFrame) {
        self.lists.push(frame);
    }

    pub fn close_list(&mut self) -> Option<ListFrame> {
        self.lists.pop()
    }

    /// The innermost open list.
    pub fn current_list(&self) -> Option<&ListFrame> {
        self.lists.last()
    }

    /// Logs a field error and keeps it for the caller.
    pub fn record(&mut self, err: RiffFieldError) {
        log::warn!("{err}");
        self.field_errors.push(err);
    }

    #[cfg(test)]
    pub fn field_errors(&self) -> &[RiffFieldError] {
        &self.field_errors
    }

    pub fn into_field_errors(self) -> Vec<RiffFieldError> {
        self.field_errors
    }
}
