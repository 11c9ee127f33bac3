use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{Error, Result};

/// Random-access reader over one log file.
///
/// Every read is a single seek followed by one exact read, with no buffering
/// in between: a buffered reader throws its buffer away on every seek. The
/// length is captured once at construction; the file is assumed not to change
/// while it is being parsed.
pub struct LogSource<R> {
    inner: R,
    len: u64,
}

impl LogSource<File> {
    /// Open a log file for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(File::open(path)?)
    }
}

impl<R: Read + Seek> LogSource<R> {
    pub fn new(mut inner: R) -> Result<Self> {
        let len = inner.seek(SeekFrom::End(0))?;
        Ok(Self { inner, len })
    }

    /// Total length of the source in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Fill `buf` from `offset`.
    ///
    /// A window reaching past the end of the source is a `CorruptedFile`
    /// error, since every offset we read from is derived from counts stored
    /// earlier in the file.
    pub fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<()> {
        let end = offset
            .checked_add(buf.len() as u64)
            .ok_or_else(|| Error::CorruptedFile(format!("offset {offset:#x} overflows")))?;

        if end > self.len {
            return Err(Error::CorruptedFile(format!(
                "read of {} bytes at {:#x} exceeds file length {}",
                buf.len(),
                offset,
                self.len
            )));
        }

        self.inner.seek(SeekFrom::Start(offset))?;
        self.inner.read_exact(buf)?;
        Ok(())
    }

    /// Read an unsigned 32-bit little-endian integer at `offset`.
    pub fn read_u32_at(&mut self, offset: u64) -> Result<u32> {
        let mut bytes = [0u8; 4];
        self.read_exact_at(offset, &mut bytes)?;
        Ok(u32::from_le_bytes(bytes))
    }
}
