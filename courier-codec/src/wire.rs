//! Wire primitives for the record format.
//!
//! All multi-byte integers are little-endian. Strings and byte blobs are
//! carried length-prefixed: a `u32` byte length followed by the raw bytes.
//! Writes are infallible and deterministic; every read is positional and
//! returns a typed error on underrun or type mismatch.

use crate::DecodeError;

/// Hard ceiling on any single length-prefixed field (16 MB).
const MAX_FIELD_SIZE: usize = 16 * 1024 * 1024;

/// Append-only byte sink for encoding one record.
#[derive(Debug, Default)]
pub struct RecordWriter {
    buf: Vec<u8>,
}

impl RecordWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a `u32`.
    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes an `i32`.
    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes an `i64`.
    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a bool as a single byte (0 or 1).
    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    /// Writes a single raw byte.
    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Writes a length-prefixed byte blob.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.write_u32(bytes.len() as u32);
        self.buf.extend_from_slice(bytes);
    }

    /// Writes a length-prefixed UTF-8 string.
    pub fn write_str(&mut self, value: &str) {
        self.write_bytes(value.as_bytes());
    }

    /// Consumes the writer, returning the encoded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

/// Positional cursor over one record's bytes.
#[derive(Debug)]
pub struct RecordReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> RecordReader<'a> {
    /// Creates a reader over a record blob.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes left to read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize, context: &str) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < n {
            return Err(DecodeError::malformed(format!(
                "{context}: need {n} bytes, {} left",
                self.remaining()
            )));
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self, context: &str) -> Result<[u8; N], DecodeError> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.take(N, context)?);
        Ok(array)
    }

    /// Reads a `u32`.
    pub fn read_u32(&mut self, context: &str) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.take_array(context)?))
    }

    /// Reads an `i32`.
    pub fn read_i32(&mut self, context: &str) -> Result<i32, DecodeError> {
        Ok(i32::from_le_bytes(self.take_array(context)?))
    }

    /// Reads an `i64`.
    pub fn read_i64(&mut self, context: &str) -> Result<i64, DecodeError> {
        Ok(i64::from_le_bytes(self.take_array(context)?))
    }

    /// Reads a single raw byte.
    pub fn read_u8(&mut self, context: &str) -> Result<u8, DecodeError> {
        Ok(self.take(1, context)?[0])
    }

    /// Reads a bool; any byte other than 0 or 1 is a type mismatch.
    pub fn read_bool(&mut self, context: &str) -> Result<bool, DecodeError> {
        match self.read_u8(context)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(DecodeError::malformed(format!(
                "{context}: expected bool, got byte {other}"
            ))),
        }
    }

    /// Reads a length-prefixed byte blob.
    pub fn read_bytes(&mut self, context: &str) -> Result<Vec<u8>, DecodeError> {
        let len = self.read_u32(context)? as usize;
        if len > MAX_FIELD_SIZE {
            return Err(DecodeError::malformed(format!(
                "{context}: field length {len} exceeds limit"
            )));
        }
        Ok(self.take(len, context)?.to_vec())
    }

    /// Reads a length-prefixed UTF-8 string; invalid UTF-8 is a type mismatch.
    pub fn read_str(&mut self, context: &str) -> Result<String, DecodeError> {
        let bytes = self.read_bytes(context)?;
        String::from_utf8(bytes)
            .map_err(|_| DecodeError::malformed(format!("{context}: invalid UTF-8")))
    }

    /// Asserts the record has been fully consumed.
    pub fn expect_end(&self, context: &str) -> Result<(), DecodeError> {
        if self.remaining() != 0 {
            return Err(DecodeError::malformed(format!(
                "{context}: {} trailing bytes",
                self.remaining()
            )));
        }
        Ok(())
    }
}
