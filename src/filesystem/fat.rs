//! FAT volume region and its readers.
//!
//! This module implements the functions that locate and load the regions of a FAT volume:
//! - Reading and validating the Bpb
//! - Loading the first allocation table
//! - Loading the fixed-capacity root directory
//! - Loading a preview window of the data region
//! - Reading a file's payload from its first cluster
//! - Displaying the volume layout

use log::{debug, warn};
use std::fmt::Write as FmtWrite;
use std::io::{Read, Seek};

use super::allocation_table::AllocationTable;
use super::bpb::Bpb;
use super::dir_entry::{DirEntry, FileLocation};
use super::directory::Directory;
use super::fat_error::FATError;
use super::fat_type::FATType;
use crate::constants::DIR_ENTRY_SIZE;
use crate::geometry::VolumeGeometry;
use crate::options::ReadOptions;
use crate::traits::LayoutDisplay;
use crate::utils::{self, AllocError};

/// Structure for a FAT volume region.
///
/// It holds the decoded Bpb and the geometry derived from it. No handle is kept:
/// every reader takes the disk image as a parameter.
#[derive(Debug, Clone)]
pub struct FATVol {
    bpb: Bpb,
    geometry: VolumeGeometry,
    start: u64,
    dir_capacity: u32,
    preview_sectors: u32,
}

impl FATVol {
    /// Reads the Bpb of a volume region starting at byte offset `start`.
    ///
    /// # Errors
    /// - Returns `FATError::IOError` if the boot sector cannot be read in full
    /// - Returns various `FATError` variants if validation is enabled and fails
    pub fn from_reader<T: Read + Seek>(
        reader: &mut T,
        start: u64,
        options: &ReadOptions,
    ) -> Result<FATVol, FATError> {
        let bpb = Bpb::from(reader, start, options.validate)?;
        let geometry = bpb.geometry();
        let dir_capacity = options.directory_capacity_for(*geometry.root_ent_cnt());

        debug!(
            "FAT volume at {start}: {} bytes/sector, {} sectors/cluster, FAT of {} sectors x {}, {dir_capacity} root entries",
            geometry.bytes_per_sec(),
            geometry.sec_per_clus(),
            geometry.fat_sz(),
            geometry.num_fat(),
        );

        Ok(Self {
            bpb,
            geometry,
            start,
            dir_capacity,
            preview_sectors: options.preview_sectors,
        })
    }

    pub fn bpb(&self) -> &Bpb {
        &self.bpb
    }

    pub fn geometry(&self) -> &VolumeGeometry {
        &self.geometry
    }

    /// Returns the byte offset of the volume region in the image.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Returns the number of slots of the root directory table.
    pub fn dir_capacity(&self) -> u32 {
        self.dir_capacity
    }

    pub fn fat_type(&self) -> FATType {
        FATType::from_cluster_count(self.geometry.cluster_count(self.dir_capacity))
    }

    /// Returns the absolute byte offset of the first FAT.
    pub fn fat_start(&self) -> u64 {
        self.start + self.geometry.fat_start()
    }

    /// Returns the absolute byte offset of the root directory.
    pub fn directory_start(&self) -> u64 {
        self.start + self.geometry.directory_start()
    }

    /// Returns the absolute byte offset of the data region (cluster 2).
    pub fn data_region_start(&self) -> u64 {
        self.start + self.geometry.data_region_start(self.dir_capacity)
    }

    /// Returns the absolute byte offset of the end of the data region.
    fn data_region_end(&self) -> u64 {
        self.data_region_start()
            + self.geometry.cluster_count(self.dir_capacity) * self.geometry.cluster_size()
    }

    /// Loads the first allocation table.
    ///
    /// # Errors
    /// - `FATError::AllocationError` if the declared table size is zero or cannot be allocated
    /// - `FATError::IOError` if the table cannot be read in full
    pub fn read_allocation_table<T: Read + Seek>(
        &self,
        reader: &mut T,
    ) -> Result<AllocationTable, FATError> {
        let size = self.geometry.fat_size_bytes();
        if size == 0 {
            return Err(AllocError { what: "FAT", size }.into());
        }

        let mut buf = utils::alloc_buffer(size, "FAT")?;
        let offset = self.fat_start();
        debug!("Reading {size}-byte FAT at offset {offset}");
        utils::read_at(reader, offset, &mut buf, "FAT")?;

        Ok(AllocationTable::new(buf, offset))
    }

    /// Loads the root directory table.
    ///
    /// # Errors
    /// - `FATError::IOError` if the table cannot be read in full
    pub fn read_root_directory<T: Read + Seek>(
        &self,
        reader: &mut T,
    ) -> Result<Directory, FATError> {
        let size = self.dir_capacity as u64 * DIR_ENTRY_SIZE;
        let mut buf = utils::alloc_buffer(size, "root directory")?;
        let offset = self.directory_start();
        debug!(
            "Reading {} directory entries at offset {offset}",
            self.dir_capacity
        );
        utils::read_at(reader, offset, &mut buf, "root directory")?;

        Directory::from_bytes(buf, self.dir_capacity)
    }

    /// Loads a fixed-size sample of the data region.
    ///
    /// The window is `preview_sectors` sectors long; it is not the whole data region.
    pub fn read_data_preview<T: Read + Seek>(&self, reader: &mut T) -> Result<Vec<u8>, FATError> {
        let size = self.preview_sectors as u64 * *self.geometry.bytes_per_sec() as u64;
        let mut buf = utils::alloc_buffer(size, "data area")?;
        let offset = self.data_region_start();
        debug!("Reading {size}-byte data preview at offset {offset}");
        utils::read_at(reader, offset, &mut buf, "data area")?;

        Ok(buf)
    }

    /// Locates the first cluster of a file.
    pub fn file_location(&self, entry: &DirEntry) -> Result<FileLocation, FATError> {
        FileLocation::new(entry, &self.geometry, self.data_region_start())
    }

    /// Reads the `file_size` bytes of a file starting at its first cluster.
    ///
    /// The allocation table is not followed: a file whose clusters are not
    /// contiguous is read incorrectly past its first cluster.
    ///
    /// # Errors
    /// - `FATError::InvalidClusterError` if a non-empty file points to cluster 0 or 1
    /// - `FATError::AllocationError` if the payload buffer cannot be allocated
    /// - `FATError::IOError` if fewer than `file_size` bytes can be read
    pub fn read_file<T: Read + Seek>(
        &self,
        reader: &mut T,
        entry: &DirEntry,
    ) -> Result<Vec<u8>, FATError> {
        let size = *entry.file_size() as u64;
        if size == 0 {
            return Ok(vec![]);
        }

        let location = self.file_location(entry)?;
        let cluster_size = self.geometry.cluster_size();
        if FileLocation::spans_multiple_clusters(size, cluster_size) {
            warn!(
                "{entry}: {size} bytes span more than one {cluster_size}-byte cluster, \
                 the cluster chain is not followed and the bytes past cluster {} may belong to other files",
                location.start_cluster()
            );
        }

        let mut buf = utils::alloc_buffer(size, "file data")?;
        debug!(
            "Reading {size} bytes of file data at offset {}",
            location.byte_offset()
        );
        utils::read_at(reader, *location.byte_offset(), &mut buf, "file data")?;

        Ok(buf)
    }
}

/// Implements the LayoutDisplay trait for FATVol
impl LayoutDisplay for FATVol {
    fn display_layout(&self, indent: u8) -> Result<String, std::fmt::Error> {
        let mut out = String::from("");
        let indent = " ".repeat(indent.into());

        writeln!(
            out,
            "{}┌{:─^59}┐",
            indent,
            format!(" {} Volume Layout ", self.fat_type())
        )?;
        writeln!(
            out,
            "{}├{:^12}┬{:^14}┬{:^14}┬{:^16}┤",
            indent, "Region", "Start", "End", "Description"
        )?;
        writeln!(
            out,
            "{}├{:─<12}┼{:─<14}┼{:─<14}┼{:─<16}┤",
            indent, "", "", "", ""
        )?;

        writeln!(
            out,
            "{}│{:<12}│{:<14}│{:<14}│{:<16}│",
            indent,
            "Reserved",
            self.start,
            self.fat_start(),
            "Boot + Reserved"
        )?;
        for i in 0..*self.geometry.num_fat() {
            let fat_i_start = self.fat_start() + i as u64 * self.geometry.fat_size_bytes();
            let fat_i_end = fat_i_start + self.geometry.fat_size_bytes();
            writeln!(
                out,
                "{}│{:<12}│{:<14}│{:<14}│{:<16}│",
                indent,
                format!("FAT #{i}"),
                fat_i_start,
                fat_i_end,
                "FAT Tables"
            )?;
        }
        writeln!(
            out,
            "{}│{:<12}│{:<14}│{:<14}│{:<16}│",
            indent,
            "Root Dir",
            self.directory_start(),
            self.data_region_start(),
            format!("{} entries", self.dir_capacity)
        )?;
        writeln!(
            out,
            "{}│{:<12}│{:<14}│{:<14}│{:<16}│",
            indent,
            "Data",
            self.data_region_start(),
            self.data_region_end(),
            "Cluster Data"
        )?;

        writeln!(
            out,
            "{}└{:─<12}┴{:─<14}┴{:─<14}┴{:─<16}┘",
            indent, "", "", "", ""
        )?;

        Ok(out)
    }
}
