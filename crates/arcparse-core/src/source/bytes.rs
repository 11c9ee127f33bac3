//! Byte buffer utilities for decoding fixed-width log records.
//!
//! `ByteBuffer` is a position-tracking reader over one record window that was
//! read from the log in a single call. Every multi-byte read is little-endian
//! unless the method name says otherwise.

use encoding_rs::UTF_8;
use tracing::debug;

use crate::error::{Error, Result};

/// A position-tracking byte reader for one decoded record.
///
/// # Example
///
/// ```
/// use arcparse_core::source::ByteBuffer;
///
/// let data = [0x78, 0x56, 0x34, 0x12, 0x00, 0x00, 0x00, 0x00];
/// let mut buf = ByteBuffer::new(&data);
///
/// let value = buf.read_i32().unwrap();
/// assert_eq!(value, 0x12345678);
/// assert_eq!(buf.position(), 4);
/// ```
pub struct ByteBuffer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteBuffer<'a> {
    /// Creates a new `ByteBuffer` wrapping the given byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current read position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes remaining from the current position.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns a slice of bytes at the specified offset without advancing position.
    pub fn slice_at(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        let end = offset
            .checked_add(len)
            .ok_or_else(|| Error::CorruptedFile(format!("record offset {offset} overflows")))?;

        if end > self.data.len() {
            return Err(Error::CorruptedFile(format!(
                "record field {}..{} exceeds record length {}",
                offset,
                end,
                self.data.len()
            )));
        }

        Ok(&self.data[offset..end])
    }

    /// Reads the specified number of bytes and advances the position.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.slice_at(self.pos, count)?;
        self.pos += count;
        Ok(bytes)
    }

    /// Reads a fixed-size byte array and advances the position.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    fn array_at<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.slice_at(offset, N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_u8_at(&self, offset: usize) -> Result<u8> {
        Ok(self.array_at::<1>(offset)?[0])
    }

    pub fn read_u16_at(&self, offset: usize) -> Result<u16> {
        Ok(u16::from_le_bytes(self.array_at(offset)?))
    }

    pub fn read_i32_at(&self, offset: usize) -> Result<i32> {
        Ok(i32::from_le_bytes(self.array_at(offset)?))
    }

    pub fn read_u32_at(&self, offset: usize) -> Result<u32> {
        Ok(u32::from_le_bytes(self.array_at(offset)?))
    }

    pub fn read_u64_at(&self, offset: usize) -> Result<u64> {
        Ok(u64::from_le_bytes(self.array_at(offset)?))
    }
}

/// Decodes UTF-8 bytes up to the first NUL, replacing invalid sequences.
pub fn decode_utf8(bytes: &[u8]) -> String {
    let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    let bytes = &bytes[..len];

    let (decoded, had_errors) = UTF_8.decode_without_bom_handling(bytes);
    if had_errors {
        debug!(
            "UTF-8 decoding had errors for bytes: {:?}",
            &bytes[..bytes.len().min(20)]
        );
    }
    decoded.into_owned()
}

/// Splits `blob` into exactly `N` consecutive NUL-terminated UTF-8 strings.
///
/// Returns `None` if fewer than `N` terminators are present. Bytes after the
/// last terminator are ignored.
pub fn split_nul_strings<const N: usize>(blob: &[u8]) -> Option<[String; N]> {
    let mut rest = blob;
    let mut out: [String; N] = std::array::from_fn(|_| String::new());

    for slot in out.iter_mut() {
        let end = rest.iter().position(|&b| b == 0)?;
        *slot = decode_utf8(&rest[..end]);
        rest = &rest[end + 1..];
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_buffer_sequential_reads() {
        let data = [
            0x01, 0x00, 0x00, 0x00, // i32: 1
            0x02, 0x00, // u16: 2
            0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // u64: 3
        ];
        let mut buf = ByteBuffer::new(&data);

        assert_eq!(buf.read_i32().unwrap(), 1);
        assert_eq!(buf.read_u16().unwrap(), 2);
        assert_eq!(buf.read_u64().unwrap(), 3);
        assert_eq!(buf.position(), 14);
        assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn test_byte_buffer_read_at() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        let buf = ByteBuffer::new(&data);

        assert_eq!(buf.read_u32_at(4).unwrap(), 0x08070605);
        assert_eq!(buf.read_u16_at(6).unwrap(), 0x0807);
        assert_eq!(buf.read_u8_at(0).unwrap(), 0x01);
        assert_eq!(buf.position(), 0);
    }

    #[test]
    fn test_byte_buffer_negative_i32() {
        let data = [0xFF, 0xFF, 0xFF, 0xFF];
        let buf = ByteBuffer::new(&data);
        assert_eq!(buf.read_i32_at(0).unwrap(), -1);
    }

    #[test]
    fn test_byte_buffer_overflow_error() {
        let data = [0x01, 0x02];
        let mut buf = ByteBuffer::new(&data);

        assert!(matches!(buf.read_i32(), Err(Error::CorruptedFile(_))));
        assert!(buf.read_u64_at(usize::MAX).is_err());
    }

    #[test]
    fn test_split_nul_strings() {
        let mut blob = b"Char Name\0:Account.1234\x001\0".to_vec();
        blob.resize(64, 0);

        let [character, account, subgroup] = split_nul_strings::<3>(&blob).unwrap();
        assert_eq!(character, "Char Name");
        assert_eq!(account, ":Account.1234");
        assert_eq!(subgroup, "1");
    }

    #[test]
    fn test_split_nul_strings_missing_terminator() {
        let blob = b"only\0two\0".to_vec();
        assert!(split_nul_strings::<3>(&blob).is_none());
        assert!(split_nul_strings::<2>(&blob).is_some());
    }

    #[test]
    fn test_decode_utf8_lossy() {
        let data = [b'A', 0xFF, b'B', 0x00, b'C'];
        assert_eq!(decode_utf8(&data), "A\u{FFFD}B");
    }
}
