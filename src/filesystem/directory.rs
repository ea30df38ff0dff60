//! Fixed-capacity root directory table.
//!
//! The whole table is read as one contiguous block. Decoding stops at the first
//! entry whose name starts with 0x00; the slots after it are kept in the raw
//! buffer but never interpreted.

use super::dir_entry::{DirEntry, END_OF_DIR_MARKER};
use super::fat_error::FATError;
use crate::constants::DIR_ENTRY_SIZE;

/// Root directory table of a FAT volume.
#[derive(Debug, Clone)]
pub struct Directory {
    raw: Vec<u8>,
    capacity: u32,
    entries: Vec<DirEntry>,
}

impl Directory {
    /// Decodes a directory table from its raw bytes.
    ///
    /// `raw` holds `capacity` slots of 32 bytes.
    pub fn from_bytes(raw: Vec<u8>, capacity: u32) -> Result<Self, FATError> {
        let entries = Self::decode(&raw, capacity)?;

        Ok(Self {
            raw,
            capacity,
            entries,
        })
    }

    /// Decodes the entries of a raw directory table up to the end-of-directory marker.
    ///
    /// At most `capacity` entries are returned, whatever the buffer length.
    pub fn decode(raw: &[u8], capacity: u32) -> Result<Vec<DirEntry>, FATError> {
        let mut entries = vec![];

        for slot in raw
            .chunks_exact(DIR_ENTRY_SIZE as usize)
            .take(capacity as usize)
        {
            if slot[0] == END_OF_DIR_MARKER {
                break;
            }
            entries.push(DirEntry::from_slice(slot)?);
        }

        Ok(entries)
    }

    /// Entries in on-disk order, up to the end-of-directory marker.
    pub fn entries(&self) -> &[DirEntry] {
        &self.entries
    }

    /// Returns the entry at `index`.
    ///
    /// # Errors
    /// - `FATError::EntryNotFound` if the index is at or past the end-of-directory marker
    pub fn entry(&self, index: usize) -> Result<&DirEntry, FATError> {
        self.entries.get(index).ok_or(FATError::EntryNotFound(index))
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::dir_entry::tests::raw_entry;

    fn table(names: &[&[u8; 11]], capacity: u32) -> Vec<u8> {
        let mut raw = vec![0u8; capacity as usize * 32];
        for (i, name) in names.iter().enumerate() {
            raw[i * 32..(i + 1) * 32].copy_from_slice(&raw_entry(name, 0x20, i as u32 + 2, 10));
        }
        raw
    }

    #[test]
    fn stops_at_end_marker() {
        let mut raw = table(&[b"ONE     TXT", b"TWO     TXT"], 16);
        // A stale entry after the marker must stay hidden
        raw[3 * 32..4 * 32].copy_from_slice(&raw_entry(b"STALE   TXT", 0x20, 9, 10));

        let dir = Directory::from_bytes(raw, 16).unwrap();
        let names: Vec<String> = dir
            .entries()
            .iter()
            .map(|e| e.short_name().unwrap())
            .collect();

        assert_eq!(names, ["ONE.TXT", "TWO.TXT"]);
        assert_eq!(dir.raw().len(), 16 * 32);
        assert!(matches!(dir.entry(2), Err(FATError::EntryNotFound(2))));
    }

    #[test]
    fn decoding_is_idempotent() {
        let raw = table(&[b"ONE     TXT", b"TWO     TXT", b"THREE   BIN"], 8);

        let first = Directory::decode(&raw, 8).unwrap();
        let second = Directory::decode(&raw, 8).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn full_table_is_bounded_by_capacity() {
        let names: Vec<&[u8; 11]> = vec![b"FILE    TXT"; 8];
        let mut raw = table(&names, 8);
        // Bytes past the capacity look like more entries
        raw.extend_from_slice(&raw_entry(b"EXTRA   TXT", 0x20, 2, 1));

        assert_eq!(Directory::decode(&raw, 8).unwrap().len(), 8);
    }

    #[test]
    fn empty_directory() {
        let dir = Directory::from_bytes(vec![0u8; 512 * 32], 512).unwrap();
        assert!(dir.entries().is_empty());
        assert_eq!(dir.capacity(), 512);
    }
}
