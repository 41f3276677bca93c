// ---------------------------------------------------------------------------
// Little-endian byte stream primitives
// ---------------------------------------------------------------------------
//
// The overlay's payloads are fixed-layout little-endian with no padding, so
// the reader/writer stay deliberately minimal: fixed-width integers, f32,
// and length-prefixed UTF-8 strings. No varints, no alignment.

use crate::save_error::SaveError;

/// Append-only little-endian writer.
#[derive(Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_f32(&mut self, v: f32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Length-prefixed (u16) UTF-8 string.
    pub fn write_str(&mut self, s: &str) {
        debug_assert!(s.len() <= usize::from(u16::MAX));
        self.write_u16(s.len() as u16);
        self.buf.extend_from_slice(s.as_bytes());
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

/// Forward-only little-endian reader. Every read is bounds-checked and
/// truncation surfaces as `SaveError::Decode`.
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Bytes left in the stream.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub fn read_u16(&mut self) -> Result<u16, SaveError> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_i32(&mut self) -> Result<i32, SaveError> {
        let bytes = self.take(4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_f32(&mut self) -> Result<f32, SaveError> {
        let bytes = self.take(4)?;
        Ok(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Length-prefixed (u16) UTF-8 string.
    pub fn read_str(&mut self) -> Result<String, SaveError> {
        let len = usize::from(self.read_u16()?);
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| SaveError::Decode(format!("invalid UTF-8 in string: {e}")))
    }

    /// The rest of the stream, consuming it.
    pub fn read_remaining(&mut self) -> &'a [u8] {
        let rest = &self.bytes[self.pos..];
        self.pos = self.bytes.len();
        rest
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], SaveError> {
        if self.remaining() < len {
            return Err(SaveError::Decode(format!(
                "unexpected end of data: need {len} bytes at offset {}, have {}",
                self.pos,
                self.remaining()
            )));
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }
}
