use std::io::{self, Read, Seek, SeekFrom};

use riff_metadata_types::fourcc::FourCc;

/// A cursor over the caller's stream.
///
/// This caches the stream's total length, which the walker needs for every
/// bounds check, and gives the few primitive reads the format is made of.
pub struct ChunkReader<'r, R: Read + Seek> {
    inner: &'r mut R,
    len: u64,
}

impl<'r, R: Read + Seek> ChunkReader<'r, R> {
    /// Wraps `inner`, leaving its position where it was.
    pub fn new(inner: &'r mut R) -> io::Result<Self> {
        let start = inner.stream_position()?;
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(start))?;
        Ok(Self { inner, len })
    }

    /// The total length of the stream, in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn position(&mut self) -> io::Result<u64> {
        self.inner.stream_position()
    }

    pub fn seek_to(&mut self, pos: u64) -> io::Result<()> {
        self.inner.seek(SeekFrom::Start(pos)).map(|_| ())
    }

    /// Moves forward by `n` bytes without reading them.
    pub fn skip(&mut self, n: u64) -> io::Result<()> {
        let pos = self.position()?;
        let target = pos.checked_add(n).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "seek target overflowed")
        })?;
        self.seek_to(target)
    }

    /// Reads a four-character code.
    ///
    /// Returns `Ok(None)` if the stream ends first.
    pub fn read_fourcc(&mut self) -> io::Result<Option<FourCc>> {
        let mut code = [0_u8; 4];
        match self.inner.read_exact(&mut code) {
            Ok(()) => Ok(Some(FourCc::new(code))),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Reads `buf.len()` bytes exactly.
    pub fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.inner.read_exact(buf)
    }

    /// Reads at most `len` bytes, stopping early at the end of the stream.
    pub fn read_up_to(&mut self, len: u64) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        (&mut *self.inner).take(len).read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Reads exactly `len` bytes.
    ///
    /// Fails with [`io::ErrorKind::UnexpectedEof`] if the stream is shorter.
    pub fn read_payload(&mut self, len: u64) -> io::Result<Vec<u8>> {
        let buf = self.read_up_to(len)?;
        if (buf.len() as u64) < len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("wanted `{len}` bytes, but the stream only had `{}`", buf.len()),
            ));
        }
        Ok(buf)
    }
}
