//! Chunk offset tables

use crate::cursor::ByteCursor;
use crate::error::Result;
use std::io::Read;
use std::ops::Deref;

/// Entries reserved up front; larger tables grow as offsets actually arrive.
const MAX_RESERVED_OFFSETS: u64 = 1 << 16;

/// Absolute file offsets of a part's chunks, in table order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetTable {
    offsets: Vec<i64>,
}

impl OffsetTable {
    /// Read `count` little-endian `i64` offsets
    pub fn read<R: Read>(cursor: &mut ByteCursor<R>, count: u64) -> Result<Self> {
        let mut offsets = Vec::with_capacity(count.min(MAX_RESERVED_OFFSETS) as usize);
        for _ in 0..count {
            offsets.push(cursor.read_i64_le("chunk offset")?);
        }
        tracing::trace!(count, "read offset table");
        Ok(OffsetTable { offsets })
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.offsets
    }

    pub fn into_vec(self) -> Vec<i64> {
        self.offsets
    }
}

impl From<Vec<i64>> for OffsetTable {
    fn from(offsets: Vec<i64>) -> Self {
        OffsetTable { offsets }
    }
}

impl Deref for OffsetTable {
    type Target = [i64];

    fn deref(&self) -> &[i64] {
        &self.offsets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExrError;
    use std::io::Cursor;

    fn encode(offsets: &[i64]) -> Vec<u8> {
        offsets.iter().flat_map(|o| o.to_le_bytes()).collect()
    }

    #[test]
    fn test_read_in_order() {
        let mut cursor = ByteCursor::new(Cursor::new(encode(&[100, 200, 300, 400])));
        let table = OffsetTable::read(&mut cursor, 4).unwrap();
        assert_eq!(table.as_slice(), &[100, 200, 300, 400]);
        assert_eq!(table.len(), 4);
        assert_eq!(cursor.position(), 32);
    }

    #[test]
    fn test_empty_table() {
        let mut cursor = ByteCursor::new(Cursor::new(Vec::new()));
        assert!(OffsetTable::read(&mut cursor, 0).unwrap().is_empty());
    }

    #[test]
    fn test_short_table() {
        let mut data = encode(&[8, 16]);
        data.extend_from_slice(&[1, 2, 3]);
        let mut cursor = ByteCursor::new(Cursor::new(data));

        match OffsetTable::read(&mut cursor, 3).unwrap_err() {
            ExrError::Truncated { field, offset, .. } => {
                assert_eq!(field, "chunk offset");
                assert_eq!(offset, 16);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_huge_count_fails_without_allocating() {
        let mut cursor = ByteCursor::new(Cursor::new(encode(&[1])));
        assert!(OffsetTable::read(&mut cursor, u64::MAX).unwrap_err().is_truncated());
    }
}
