//! Sequential byte cursor over a forward-only input stream.
//!
//! Every read is tagged with the name of the field being read so that a
//! short stream surfaces as [`ExrError::Truncated`] with useful context.

use crate::error::{ExrError, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, BufRead, BufReader, Read};

/// Default upper bound for a single underlying read when accumulating values
pub const DEFAULT_MAX_READ_CHUNK: usize = 64 * 1024;

/// Default capacity of the internal read buffer
pub const DEFAULT_READ_BUFFER_SIZE: usize = 8 * 1024;

/// Buffered, position-tracking reader
pub struct ByteCursor<R: Read> {
    inner: BufReader<R>,
    position: u64,
    max_read_chunk: usize,
}

impl<R: Read> ByteCursor<R> {
    /// Create a cursor with default buffer and chunk sizes
    pub fn new(reader: R) -> Self {
        Self::with_limits(reader, DEFAULT_READ_BUFFER_SIZE, DEFAULT_MAX_READ_CHUNK)
    }

    /// Create a cursor with an explicit buffer capacity and read chunk limit.
    ///
    /// Zero values are clamped to one byte.
    pub fn with_limits(reader: R, buffer_size: usize, max_read_chunk: usize) -> Self {
        ByteCursor {
            inner: BufReader::with_capacity(buffer_size.max(1), reader),
            position: 0,
            max_read_chunk: max_read_chunk.max(1),
        }
    }

    /// Number of bytes consumed so far
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Unwrap the underlying reader. Buffered but unconsumed bytes are lost.
    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }

    fn truncated(&self, field: &'static str, offset: u64, source: io::Error) -> ExrError {
        ExrError::Truncated {
            field,
            offset,
            source,
        }
    }

    /// Read a little-endian `u32`
    pub fn read_u32_le(&mut self, field: &'static str) -> Result<u32> {
        let start = self.position;
        let value = self
            .inner
            .read_u32::<LittleEndian>()
            .map_err(|e| self.truncated(field, start, e))?;
        self.position += 4;
        Ok(value)
    }

    /// Read a little-endian `i64`
    pub fn read_i64_le(&mut self, field: &'static str) -> Result<i64> {
        let start = self.position;
        let value = self
            .inner
            .read_i64::<LittleEndian>()
            .map_err(|e| self.truncated(field, start, e))?;
        self.position += 8;
        Ok(value)
    }

    /// Read bytes up to and including the next NUL.
    ///
    /// Returns the bytes before the terminator. Reaching end of stream before
    /// a terminator is a truncation.
    pub fn read_null_terminated(&mut self, field: &'static str) -> Result<Vec<u8>> {
        let start = self.position;
        let mut bytes = Vec::new();
        let read = self
            .inner
            .read_until(0, &mut bytes)
            .map_err(|e| self.truncated(field, start, e))?;
        self.position += read as u64;

        if bytes.pop() != Some(0) {
            return Err(self.truncated(
                field,
                start,
                io::Error::new(io::ErrorKind::UnexpectedEof, "missing NUL terminator"),
            ));
        }
        Ok(bytes)
    }

    /// Read exactly `len` bytes.
    ///
    /// The underlying reader is asked for at most `max_read_chunk` bytes per
    /// call and may return fewer; the loop keeps reading until `len` bytes
    /// have been collected. The output grows with the data actually received,
    /// so a bogus length on a short stream fails without a large allocation.
    pub fn read_bytes(&mut self, len: usize, field: &'static str) -> Result<Vec<u8>> {
        let start = self.position;
        let mut value = Vec::with_capacity(len.min(self.max_read_chunk));
        let mut chunk = vec![0u8; len.min(self.max_read_chunk)];
        let mut remaining = len;

        while remaining > 0 {
            let want = remaining.min(self.max_read_chunk);
            match self.inner.read(&mut chunk[..want]) {
                Ok(0) => {
                    return Err(self.truncated(
                        field,
                        start,
                        io::Error::new(
                            io::ErrorKind::UnexpectedEof,
                            format!("needed {} bytes, got {}", len, len - remaining),
                        ),
                    ));
                }
                Ok(n) => {
                    value.extend_from_slice(&chunk[..n]);
                    remaining -= n;
                    self.position += n as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(self.truncated(field, start, e)),
            }
        }

        Ok(value)
    }
}
