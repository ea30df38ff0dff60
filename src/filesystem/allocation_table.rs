//! In-memory copy of the first File Allocation Table.
//!
//! The table is loaded as an opaque byte blob. It is never walked: cluster
//! chains are not followed anywhere in this crate.

/// Owned copy of one allocation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationTable {
    bytes: Vec<u8>,
    offset: u64,
}

impl AllocationTable {
    pub(crate) fn new(bytes: Vec<u8>, offset: u64) -> Self {
        Self { bytes, offset }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Byte offset the table was read from.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Media descriptor copy stored in the first byte of the table.
    pub fn media_byte(&self) -> Option<u8> {
        self.bytes.first().copied()
    }
}
