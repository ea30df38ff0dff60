//! Simplified MFT record header.
//!
//! Records sit at a fixed 1024-byte stride after the reserved sectors. Only the
//! fixed header is decoded: attributes, run lists and the resident/non-resident
//! distinction are out of reach of this decoder.

use binread::{BinRead, BinReaderExt};
use getset::Getters;
use std::fmt;
use std::io;

use super::ntfs_error::NtfsError;
use crate::constants::MFT_RECORD_SIZE;

/// Signature of an in-use MFT record.
pub const FILE_SIGNATURE: [u8; 4] = *b"FILE";

/// The size in bytes of a decoded MFT record header.
pub const MFT_HEADER_SIZE: usize = 60;

/// Fixed header at the start of an MFT record.
#[derive(BinRead, Debug, Clone, PartialEq, Eq, Getters)]
#[br(little)]
#[get = "pub"]
pub struct MftRecordHeader {
    /// Record signature ("FILE" when in use)
    magic: u32,
    /// Offset of the update sequence array
    update_sequence_offset: u16,
    /// Size in words of the update sequence array
    update_sequence_size: u16,
    log_file_start: u64,
    sequence_number: u64,
    log_file_seq_number: u64,
    volume_flags: u32,
    max_component_name_length: u32,
    file_system_attributes: u32,
    /// Byte offset of the root directory
    root_directory_start: u64,
    /// Byte offset of the data file
    data_file_start: u64,
}

impl MftRecordHeader {
    /// Decodes a header from the first 60 bytes of `buf`.
    ///
    /// # Errors
    /// - `NtfsError::IOError` if the slice holds fewer than 60 bytes
    pub fn from_slice(buf: &[u8]) -> Result<Self, NtfsError> {
        let mut reader = io::Cursor::new(buf);
        reader.read_le().map_err(NtfsError::from)
    }

    /// Checks if the record starts with the "FILE" signature of an in-use record.
    pub fn has_file_signature(&self) -> bool {
        self.magic.to_le_bytes() == FILE_SIGNATURE
    }
}

impl fmt::Display for MftRecordHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magic = self.magic.to_le_bytes();
        writeln!(
            f,
            "  {:<26} {:02X?} ({})",
            "signature",
            magic,
            if self.has_file_signature() { "FILE" } else { "not in use" }
        )?;
        writeln!(f, "  {:<26} 0x{:04X}", "update_sequence_offset", self.update_sequence_offset)?;
        writeln!(f, "  {:<26} {}", "update_sequence_size", self.update_sequence_size)?;
        writeln!(f, "  {:<26} 0x{:X}", "log_file_start", self.log_file_start)?;
        writeln!(f, "  {:<26} {}", "sequence_number", self.sequence_number)?;
        writeln!(f, "  {:<26} {}", "log_file_seq_number", self.log_file_seq_number)?;
        writeln!(f, "  {:<26} 0x{:08X}", "volume_flags", self.volume_flags)?;
        writeln!(f, "  {:<26} {}", "max_component_name_length", self.max_component_name_length)?;
        writeln!(f, "  {:<26} 0x{:08X}", "file_system_attributes", self.file_system_attributes)?;
        writeln!(f, "  {:<26} 0x{:X}", "root_directory_start", self.root_directory_start)?;
        writeln!(f, "  {:<26} 0x{:X}", "data_file_start", self.data_file_start)
    }
}

/// Raw copy of the beginning of the MFT.
#[derive(Debug, Clone)]
pub struct MftTable {
    raw: Vec<u8>,
}

impl MftTable {
    pub(crate) fn new(raw: Vec<u8>) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Decodes the header of every complete record slot in the table.
    pub fn records(&self) -> Result<Vec<MftRecordHeader>, NtfsError> {
        self.raw
            .chunks_exact(MFT_RECORD_SIZE as usize)
            .map(MftRecordHeader::from_slice)
            .collect()
    }
}
