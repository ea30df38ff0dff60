//! FAT directory entry structure and parsing.
//!
//! Each directory entry is 32 bytes and contains metadata about a file or
//! directory: 8.3 name, attributes, timestamps, first cluster and size.

use binread::{BinRead, BinReaderExt};
use getset::Getters;
use std::fmt;
use std::io;
use std::str::Utf8Error;

use crate::constants::FIRST_DATA_CLUSTER;
use crate::filesystem::fat_error::FATError;
use crate::geometry::VolumeGeometry;

/// First name byte of an entry that marks the end of the directory.
pub const END_OF_DIR_MARKER: u8 = 0x00;

/// First name byte of a deleted entry.
pub const DELETED_MARKER: u8 = 0xE5;

/// Attribute bit of a directory.
const ATTR_DIRECTORY: u8 = 0x10;

/// Attribute bit of a volume label.
const ATTR_VOLUME_ID: u8 = 0x08;

/// FAT directory entry structure.
///
/// # Notes
/// - Name and extension are space padded
/// - Dates and times are kept in their packed on-disk form
#[derive(BinRead, Debug, Clone, PartialEq, Eq, Getters)]
#[br(little)]
pub struct DirEntry {
    /// File name, space padded
    #[get = "pub"]
    name: [u8; 8],
    /// Extension, space padded
    #[get = "pub"]
    ext: [u8; 3],
    /// File attributes byte
    #[get = "pub"]
    attr: u8,
    /// NT reserved (unused)
    _n_t_res: u8,
    /// Creation time in 10ms units
    #[get = "pub"]
    crt_time_tenth: u8,
    /// Creation time
    #[get = "pub"]
    crt_time: u16,
    /// Creation date
    #[get = "pub"]
    crt_date: u16,
    /// Last access date
    #[get = "pub"]
    lst_acc_date: u16,
    /// High 16 bits of first cluster number
    fst_clus_hi: u16,
    /// Last write time
    #[get = "pub"]
    wrt_time: u16,
    /// Last write date
    #[get = "pub"]
    wrt_date: u16,
    /// Low 16 bits of first cluster number
    fst_clus_lo: u16,
    /// File size in bytes (0 for directories)
    #[get = "pub"]
    file_size: u32,
}

impl DirEntry {
    /// Creates a directory entry from the first 32 bytes of a slice.
    ///
    /// # Errors
    /// - `FATError::IOError` if the slice holds fewer than 32 bytes
    pub fn from_slice(buf: &[u8]) -> Result<Self, FATError> {
        let mut reader = io::Cursor::new(buf);
        reader.read_le().map_err(FATError::from)
    }

    /// Returns the complete first cluster number for this entry.
    ///
    /// `(fst_clus_hi << 16) | fst_clus_lo`
    pub fn cluster_number(&self) -> u32 {
        ((self.fst_clus_hi as u32) << 16) | self.fst_clus_lo as u32
    }

    /// Checks if this directory entry represents a directory.
    pub fn is_dir(&self) -> bool {
        self.attr & ATTR_DIRECTORY != 0
    }

    pub fn is_volume_label(&self) -> bool {
        self.attr & ATTR_VOLUME_ID != 0
    }

    /// Checks if the entry was deleted (first name byte is 0xE5).
    pub fn is_deleted(&self) -> bool {
        self.name[0] == DELETED_MARKER
    }

    /// Returns the name in `NAME.EXT` form, with padding removed.
    pub fn short_name(&self) -> Result<String, Utf8Error> {
        let name = std::str::from_utf8(&self.name)?.trim_end();
        let ext = std::str::from_utf8(&self.ext)?.trim_end();

        if ext.is_empty() {
            Ok(name.to_string())
        } else {
            Ok(format!("{name}.{ext}"))
        }
    }
}

/// Decodes a packed FAT date into `(year, month, day)`.
pub fn decode_date(date: u16) -> (u16, u8, u8) {
    (
        1980 + (date >> 9),
        ((date >> 5) & 0x0F) as u8,
        (date & 0x1F) as u8,
    )
}

impl fmt::Display for DirEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.short_name() {
            Ok(name) => write!(f, "{name:<12}")?,
            Err(_) => write!(f, "{:02X?}", self.name)?,
        }

        let (year, month, day) = decode_date(self.wrt_date);
        write!(
            f,
            " {:>10}B attr=0x{:02X} cluster={} created=0x{:04X} modified=0x{:04X} ({year:04}-{month:02}-{day:02})",
            self.file_size,
            self.attr,
            self.cluster_number(),
            self.crt_date,
            self.wrt_date,
        )?;

        if self.is_deleted() {
            write!(f, " (deleted)")?;
        }
        Ok(())
    }
}

/// Location of the first allocation unit of a file in the data region.
///
/// Only the first cluster is located: the allocation table is never walked, so a
/// file spanning more than one cluster is not reassembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct FileLocation {
    /// First cluster of the file
    #[get = "pub"]
    start_cluster: u32,
    /// Absolute byte offset of the first cluster
    #[get = "pub"]
    byte_offset: u64,
}

impl FileLocation {
    /// Computes `data_region_start + (start_cluster - 2) * cluster_size`.
    ///
    /// # Errors
    /// - `FATError::InvalidClusterError` if the entry points to cluster 0 or 1
    pub fn new(
        entry: &DirEntry,
        geometry: &VolumeGeometry,
        data_region_start: u64,
    ) -> Result<Self, FATError> {
        let start_cluster = entry.cluster_number();
        if start_cluster < FIRST_DATA_CLUSTER {
            return Err(FATError::InvalidClusterError(start_cluster));
        }

        Ok(Self {
            start_cluster,
            byte_offset: geometry.cluster_offset(data_region_start, start_cluster),
        })
    }

    /// Returns whether a payload of `size` bytes needs more than one cluster.
    pub fn spans_multiple_clusters(size: u64, cluster_size: u64) -> bool {
        size > cluster_size
    }
}
