//! Sequential, bounds-checked reads over a single record buffer.

use super::unsigned::{u16_from_le, u32_from_le};
use crate::{InterOpError, Result};

/// Cursor over one fixed-length record.
///
/// Each `read_*` call consumes exactly the width of the requested type and
/// advances the position. Reading past the end fails with
/// [`InterOpError::TruncatedRecord`] and leaves the position unchanged.
#[derive(Debug, Clone)]
pub struct RecordCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> RecordCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Current read offset from the start of the record.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Consume `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .position
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| InterOpError::truncated_record(self.position, len, self.remaining()))?;

        let bytes = &self.data[self.position..end];
        self.position = end;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    /// Read an unsigned 16-bit field, widened.
    pub fn read_u16(&mut self) -> Result<u32> {
        Ok(u16_from_le(self.read_array()?))
    }

    /// Read an unsigned 32-bit field, widened.
    pub fn read_u32(&mut self) -> Result<u64> {
        Ok(u32_from_le(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    /// Read `count` consecutive 32-bit floats.
    pub fn read_f32_array(&mut self, count: usize) -> Result<Vec<f32>> {
        let width = count.checked_mul(4).ok_or_else(|| {
            InterOpError::truncated_record(self.position, usize::MAX, self.remaining())
        })?;
        let bytes = self.read_bytes(width)?;

        Ok(bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect())
    }
}
