//! Buffered byte reader for header parsing.
//!
//! [`ByteReader`] pulls exact-length reads from any [`Read`] source and keeps a
//! copy of every byte it hands out. The gzip FHCRC check is computed over
//! that copy, so the reader must see the header bytes exactly once and in
//! order: there is no seeking and no peeking.

use crate::error::{GzheadError, Result};
use std::io::Read;

/// Forward-only reader that records everything it consumes.
///
/// # Example
///
/// ```
/// use gzhead_core::reader::ByteReader;
///
/// let data = [0x1F, 0x8B, 0x08, 0x00];
/// let mut reader = ByteReader::new(&data[..]);
/// assert_eq!(reader.read(2).unwrap(), &[0x1F, 0x8B]);
/// assert_eq!(reader.read_u8().unwrap(), 0x08);
/// assert_eq!(reader.buffer(), &[0x1F, 0x8B, 0x08]);
/// ```
#[derive(Debug)]
pub struct ByteReader<R: Read> {
    /// Underlying source.
    inner: R,
    /// Every byte returned so far.
    buf: Vec<u8>,
}

impl<R: Read> ByteReader<R> {
    /// Wrap a byte source.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
        }
    }

    /// Read exactly `n` bytes.
    ///
    /// Fails with [`GzheadError::UnexpectedEof`] if the source ends first.
    pub fn read(&mut self, n: usize) -> Result<&[u8]> {
        let start = self.buf.len();
        let got = (&mut self.inner)
            .take(n as u64)
            .read_to_end(&mut self.buf)?;

        if got < n {
            self.buf.truncate(start);
            return Err(GzheadError::unexpected_eof(n, got));
        }

        Ok(&self.buf[start..])
    }

    /// Read exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read a little-endian u16.
    #[inline]
    pub fn read_u16_le(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u32.
    #[inline]
    pub fn read_u32_le(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read bytes one at a time up to a zero byte.
    ///
    /// The terminator is consumed but not returned. There is no length
    /// limit; an unterminated string runs into [`GzheadError::UnexpectedEof`].
    pub fn read_until_nul(&mut self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        loop {
            let byte = self.read_u8()?;
            if byte == 0 {
                break;
            }
            bytes.push(byte);
        }
        Ok(bytes)
    }

    /// All bytes consumed so far.
    pub fn buffer(&self) -> &[u8] {
        &self.buf
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    /// Unwrap the reader, returning the source.
    pub fn into_inner(self) -> R {
        self.inner
    }
}
