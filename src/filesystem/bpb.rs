//! FAT boot sector structure.
//!
//! This module implements:
//! - BIOS Parameter Block (Bpb) parsing and optional validation
//! - Conversion of the Bpb into the [`VolumeGeometry`] used for every offset computation

use binread::{BinRead, BinReaderExt};
use getset::Getters;
use std::fmt;
use std::io;

use super::fat_error::FATError;
use crate::constants::BOOT_SECTOR_SIZE;
use crate::geometry::VolumeGeometry;
use crate::utils;

/// BIOS Parameter Block structure for FAT filesystems.
///
/// Only the first 90 bytes of the boot sector are decoded; the boot code and
/// the signature that follow them are not part of the geometry.
#[derive(BinRead, Debug, Clone, Getters)]
#[br(little)]
pub struct Bpb {
    /// Jump instruction to boot code
    #[get = "pub"]
    jmp: [u8; 3],
    /// OEM identifier (e.g., "MSWIN4.1")
    #[get = "pub"]
    oem_name: [u8; 8],
    /// Number of bytes per sector (512, 1024, 2048, or 4096)
    bytes_per_sec: u16,
    /// Number of sectors per cluster (power of 2: 1, 2, 4, 8, 16, 32, 64, or 128)
    sec_per_clus: u8,
    /// Number of reserved sectors from start of volume
    rsvd_sec_cnt: u16,
    /// Number of FAT copies (typically 2 for redundancy)
    num_fat: u8,
    /// Maximum number of root directory entries (0 for FAT32)
    root_ent_cnt: u16,
    /// Total sectors for volumes < 32MB (0 for FAT32)
    tot_sec_16: u16,
    /// Media descriptor (0xF8 for fixed disk)
    #[get = "pub"]
    media: u8,
    /// Sectors per FAT for FAT12/FAT16 (0 for FAT32)
    fat_sz_16: u16,
    /// Sectors per track
    sec_per_trl: u16,
    /// Number of heads
    num_heds: u16,
    /// Number of hidden sectors preceding the partition
    hidd_sec: u32,
    /// Total sectors for volumes >= 32MB
    tot_sec_32: u32,

    // FAT32-specific fields
    /// Sectors per FAT
    fat_sz_32: u32,
    /// FAT flags (mirroring, active FAT)
    ext_flags: u16,
    /// Filesystem version (should be 0:0)
    fs_ver: u16,
    /// First cluster of root directory (typically 2)
    root_clus: u32,
    /// Sector number of FSINFO structure
    fs_info: u16,
    /// Sector number of backup boot sector
    bk_boot_sec: u16,
    /// Reserved for future expansion
    reserved: [u8; 12],
    /// Drive number (0x80 for hard disk)
    drv_num: u8,
    /// Reserved (used by Windows NT)
    reserved_1: u8,
    /// Extended boot signature (0x29)
    boot_sig: u8,
    /// Volume serial number
    vol_id: u32,
    /// Volume label (11 bytes)
    #[get = "pub"]
    vol_lab: [u8; 11],
    /// Filesystem type label ("FAT32   ")
    #[get = "pub"]
    fil_sys_type: [u8; 8],
}

impl Bpb {
    /// Reads and optionally validates a Bpb located at byte offset `start`.
    ///
    /// # Parameters
    /// - `reader`: The disk image
    /// - `start`: The byte offset of the volume region
    /// - `validate`: Whether to perform validation checks on the Bpb
    ///
    /// # Errors
    /// - Returns `FATError::IOError` if the seek fails or if the image ends before the Bpb does
    /// - Returns various `FATError` variants if validation fails and `validate` is true
    pub fn from<T: io::Read + io::Seek>(
        reader: &mut T,
        start: u64,
        validate: bool,
    ) -> Result<Bpb, FATError> {
        let mut buf = [0u8; BOOT_SECTOR_SIZE];
        utils::read_at(reader, start, &mut buf, "FAT boot sector")?;

        let bpb = Self::from_slice(&buf)?;

        if validate { bpb.validate() } else { Ok(bpb) }
    }

    /// Decodes a Bpb from the first 90 bytes of `buf`.
    pub fn from_slice(buf: &[u8]) -> Result<Bpb, FATError> {
        let mut reader = io::Cursor::new(buf);
        reader.read_le().map_err(FATError::from)
    }

    /// Returns the size in sectors of one FAT.
    ///
    /// The 16-bit field is authoritative when set: on FAT12/16 volumes the bytes of the
    /// 32-bit field hold the extended boot record (drive number, signature, volume id).
    /// FAT32 volumes leave the 16-bit field at 0.
    pub fn fat_sz(&self) -> u32 {
        if self.fat_sz_16 != 0 {
            self.fat_sz_16.into()
        } else {
            self.fat_sz_32
        }
    }

    pub fn tot_sec(&self) -> u32 {
        if self.tot_sec_16 == 0 {
            self.tot_sec_32
        } else {
            self.tot_sec_16.into()
        }
    }

    /// Builds the geometry record every offset of the volume is derived from.
    pub fn geometry(&self) -> VolumeGeometry {
        VolumeGeometry {
            bytes_per_sec: self.bytes_per_sec,
            sec_per_clus: self.sec_per_clus,
            rsvd_sec_cnt: self.rsvd_sec_cnt,
            num_fat: self.num_fat,
            fat_sz: self.fat_sz(),
            root_ent_cnt: self.root_ent_cnt,
            root_clus: self.root_clus,
            tot_sec: self.tot_sec(),
            vol_id: self.vol_id,
        }
    }

    /// Validates the fields every offset computation depends on.
    ///
    /// # Errors
    /// - `FATError::InvalidBytesPerSec`: If bytes per sector is not a valid value
    /// - `FATError::InvalidSecPerClus`: If sectors per cluster is not a valid value
    /// - `FATError::InvalidRsvdSecCnt`: If reserved sector count is 0
    /// - `FATError::InvalidNumFat`: If number of FATs is 0
    fn validate(self) -> Result<Self, FATError> {
        const VALID_BYTES_PER_SEC: [u16; 4] = [512, 1024, 2048, 4096];
        if !VALID_BYTES_PER_SEC.contains(&self.bytes_per_sec) {
            return Err(FATError::InvalidBytesPerSec(self.bytes_per_sec));
        }

        const VALID_SEC_PER_CLUS: [u8; 8] = [1, 2, 4, 8, 16, 32, 64, 128];
        if !VALID_SEC_PER_CLUS.contains(&self.sec_per_clus) {
            return Err(FATError::InvalidSecPerClus(self.sec_per_clus));
        }

        if self.rsvd_sec_cnt == 0 {
            return Err(FATError::InvalidRsvdSecCnt(self.rsvd_sec_cnt));
        }

        if self.num_fat == 0 {
            return Err(FATError::InvalidNumFat(self.num_fat));
        }

        Ok(self)
    }
}

/// Implements the Display trait for Bpb
impl fmt::Display for Bpb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut offset = 0;

        macro_rules! field {
            ($name:expr, $val:expr, $size:expr) => {{
                writeln!(f, "  {:<20} 0x{:>04X}: {}", $name, offset, $val)?;
                offset += $size;
            }};
        }

        writeln!(f, "FAT Boot Sector:")?;

        field!("jmp", format!("{:02X?}", self.jmp), 3);
        field!("oem_name", String::from_utf8_lossy(&self.oem_name), 8);
        field!("bytes_per_sec", self.bytes_per_sec, 2);
        field!("sec_per_clus", self.sec_per_clus, 1);
        field!("rsvd_sec_cnt", self.rsvd_sec_cnt, 2);
        field!("num_fat", self.num_fat, 1);
        field!("root_ent_cnt", self.root_ent_cnt, 2);
        field!("tot_sec_16", self.tot_sec_16, 2);
        field!("media", format!("0x{:02X}", self.media), 1);
        field!("fat_sz_16", self.fat_sz_16, 2);
        field!("sec_per_trl", self.sec_per_trl, 2);
        field!("num_heds", self.num_heds, 2);
        field!("hidd_sec", self.hidd_sec, 4);
        field!("tot_sec_32", self.tot_sec_32, 4);
        field!("fat_sz_32", self.fat_sz_32, 4);
        field!("ext_flags", self.ext_flags, 2);
        field!("fs_ver", self.fs_ver, 2);
        field!("root_clus", self.root_clus, 4);
        field!("fs_info", self.fs_info, 2);
        field!("bk_boot_sec", self.bk_boot_sec, 2);
        field!("reserved", format!("{:02X?}", &self.reserved[..]), 12);
        field!("drv_num", format!("0x{:X}", self.drv_num), 1);
        field!("reserved_1", self.reserved_1, 1);
        field!("boot_sig", format!("0x{:X}", self.boot_sig), 1);
        field!("vol_id", format!("{:08X}", self.vol_id), 4);
        field!("vol_lab", String::from_utf8_lossy(&self.vol_lab), 11);
        field!(
            "fil_sys_type",
            String::from_utf8_lossy(&self.fil_sys_type),
            8
        );

        debug_assert_eq!(offset, BOOT_SECTOR_SIZE);
        Ok(())
    }
}
