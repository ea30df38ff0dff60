//! NTFS volume region and its readers.
//!
//! The region is decoded with a simplified model: the MFT starts right after
//! the reserved sectors, records have a fixed 1024-byte stride and the data
//! area preview follows the first 4096 bytes of the MFT.

use log::debug;
use std::fmt::Write as FmtWrite;
use std::io::{self, Read, Seek, Write};

use super::boot_sector::NtfsBootSector;
use super::mft::{MFT_HEADER_SIZE, MftRecordHeader, MftTable};
use super::ntfs_error::NtfsError;
use crate::constants::{MFT_RECORD_SIZE, MFT_REGION_SIZE, NTFS_PREVIEW_SIZE};
use crate::geometry::VolumeGeometry;
use crate::options::ReadOptions;
use crate::traits::LayoutDisplay;
use crate::utils;

/// Structure for an NTFS volume region.
#[derive(Debug, Clone)]
pub struct NTFSVol {
    boot_sector: NtfsBootSector,
    geometry: VolumeGeometry,
    start: u64,
}

impl NTFSVol {
    /// Reads the boot sector of a volume region starting at byte offset `start`.
    pub fn from_reader<T: Read + Seek>(
        reader: &mut T,
        start: u64,
        options: &ReadOptions,
    ) -> Result<Self, NtfsError> {
        let boot_sector = NtfsBootSector::from(reader, start, options.validate)?;
        let geometry = boot_sector.geometry();

        debug!(
            "NTFS volume at {start}: {} bytes/sector, {} sectors/cluster, MFT at sector {}",
            geometry.bytes_per_sec(),
            geometry.sec_per_clus(),
            geometry.rsvd_sec_cnt()
        );

        Ok(Self {
            boot_sector,
            geometry,
            start,
        })
    }

    pub fn boot_sector(&self) -> &NtfsBootSector {
        &self.boot_sector
    }

    pub fn geometry(&self) -> &VolumeGeometry {
        &self.geometry
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    /// Returns the absolute byte offset of the MFT.
    pub fn mft_start(&self) -> u64 {
        self.start + self.geometry.fat_start()
    }

    /// Returns the absolute byte offset of the data area preview.
    pub fn data_start(&self) -> u64 {
        self.mft_start() + MFT_REGION_SIZE
    }

    /// Returns the absolute byte offset of MFT record `index`.
    pub fn record_offset(&self, index: u64) -> io::Result<u64> {
        index
            .checked_mul(MFT_RECORD_SIZE)
            .and_then(|off| off.checked_add(self.mft_start()))
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("MFT record {index} lies past the addressable range"),
                )
            })
    }

    /// Loads the first 4096 bytes of the MFT.
    pub fn read_mft<T: Read + Seek>(&self, reader: &mut T) -> Result<MftTable, NtfsError> {
        let mut buf = utils::alloc_buffer(MFT_REGION_SIZE, "MFT")?;
        debug!("Reading {MFT_REGION_SIZE}-byte MFT at offset {}", self.mft_start());
        utils::read_at(reader, self.mft_start(), &mut buf, "MFT")?;

        Ok(MftTable::new(buf))
    }

    /// Loads one 4096-byte window of the data area following the MFT.
    pub fn read_data_preview<T: Read + Seek>(&self, reader: &mut T) -> Result<Vec<u8>, NtfsError> {
        let mut buf = utils::alloc_buffer(NTFS_PREVIEW_SIZE, "data area")?;
        utils::read_at(reader, self.data_start(), &mut buf, "data area")?;

        Ok(buf)
    }

    /// Reads and decodes the header of MFT record `index`.
    ///
    /// The header is not resolved into file data.
    pub fn read_record<T: Read + Seek>(
        &self,
        reader: &mut T,
        index: u64,
    ) -> Result<MftRecordHeader, NtfsError> {
        let offset = self.record_offset(index)?;
        let mut buf = [0u8; MFT_HEADER_SIZE];
        debug!("Reading MFT record {index} at offset {offset}");
        utils::read_at(reader, offset, &mut buf, "MFT record")?;

        MftRecordHeader::from_slice(&buf)
    }

    /// Overwrites the bytes starting at `cluster` with `data`.
    ///
    /// See [`write_ntfs_file`].
    pub fn write_file<T: Write + Seek>(
        &self,
        disk: &mut T,
        cluster: u64,
        data: &[u8],
    ) -> Result<(), NtfsError> {
        write_ntfs_file(disk, self.start, cluster, self.geometry.cluster_size(), data)
    }
}

/// Writes `data` verbatim at `region_start + cluster * cluster_size`.
///
/// This is a raw block write: nothing is backed up or read back, and no
/// allocation structure records the cluster as used.
///
/// # Errors
/// - `NtfsError::InvalidClusSz` if `cluster_size` is zero
/// - `NtfsError::IOError` if the offset overflows or the write does not complete
pub fn write_ntfs_file<T: Write + Seek>(
    disk: &mut T,
    region_start: u64,
    cluster: u64,
    cluster_size: u64,
    data: &[u8],
) -> Result<(), NtfsError> {
    if cluster_size == 0 {
        return Err(NtfsError::InvalidClusSz(cluster_size));
    }

    let offset = cluster
        .checked_mul(cluster_size)
        .and_then(|off| off.checked_add(region_start))
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Cluster {cluster} lies past the addressable range"),
            )
        })?;

    debug!("Writing {} bytes at cluster {cluster} (offset {offset})", data.len());
    utils::write_at(disk, offset, data)?;

    Ok(())
}

impl LayoutDisplay for NTFSVol {
    fn display_layout(&self, indent: u8) -> Result<String, std::fmt::Error> {
        let mut out = String::from("");
        let indent = " ".repeat(indent.into());

        writeln!(out, "{}┌{:─^59}┐", indent, " NTFS Volume Layout ")?;
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
            self.mft_start(),
            "Boot + Reserved"
        )?;
        writeln!(
            out,
            "{}│{:<12}│{:<14}│{:<14}│{:<16}│",
            indent,
            "MFT",
            self.mft_start(),
            self.data_start(),
            format!("{} records", MFT_REGION_SIZE / MFT_RECORD_SIZE)
        )?;
        writeln!(
            out,
            "{}│{:<12}│{:<14}│{:<14}│{:<16}│",
            indent,
            "Data",
            self.data_start(),
            self.data_start() + NTFS_PREVIEW_SIZE,
            "Preview"
        )?;
        writeln!(
            out,
            "{}└{:─<12}┴{:─<14}┴{:─<14}┴{:─<16}┘",
            indent, "", "", "", ""
        )?;

        Ok(out)
    }
}
