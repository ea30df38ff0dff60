//! Simplified NTFS boot sector.
//!
//! The layout mirrors the FAT boot sector byte for byte; the slots FAT uses for
//! its table count and root directory size are zero fields here.

use binread::{BinRead, BinReaderExt};
use getset::Getters;
use std::fmt;
use std::io;

use super::ntfs_error::NtfsError;
use crate::constants::BOOT_SECTOR_SIZE;
use crate::geometry::VolumeGeometry;
use crate::utils;

/// Boot sector of an NTFS region.
///
/// Only the geometry fields are meaningful; the FAT-specific slots are kept so the
/// byte offsets line up with the FAT boot sector.
#[derive(BinRead, Debug, Clone, Getters)]
#[br(little)]
pub struct NtfsBootSector {
    jmp: [u8; 3],
    /// OEM identifier ("NTFS    ")
    #[get = "pub"]
    oem_id: [u8; 8],
    bytes_per_sec: u16,
    sec_per_clus: u8,
    /// Reserved sectors preceding the MFT
    rsvd_sec_cnt: u16,
    zero_1: u8,
    zero_2: u8,
    zero_3: u16,
    #[get = "pub"]
    media: u8,
    sec_per_fat: u16,
    sec_per_trk: u16,
    num_heds: u16,
    hidd_sec: u32,
    tot_sec: u32,
    sec_per_fat_32: u32,
    flags: u16,
    version: u16,
    root_clus: u32,
    fs_info: u16,
    bk_boot_sec: u16,
    reserved: [u8; 12],
    drv_num: u8,
    reserved_1: u8,
    boot_sig: u8,
    vol_id: u32,
    #[get = "pub"]
    vol_lab: [u8; 11],
    #[get = "pub"]
    fil_sys_type: [u8; 8],
}

impl NtfsBootSector {
    /// Reads and optionally validates the boot sector of a region starting at byte `start`.
    pub fn from<T: io::Read + io::Seek>(
        reader: &mut T,
        start: u64,
        validate: bool,
    ) -> Result<Self, NtfsError> {
        let mut buf = [0u8; BOOT_SECTOR_SIZE];
        utils::read_at(reader, start, &mut buf, "NTFS boot sector")?;

        let boot_sector = Self::from_slice(&buf)?;

        if validate {
            boot_sector.validate()
        } else {
            Ok(boot_sector)
        }
    }

    /// Decodes a boot sector from the first 90 bytes of `buf`.
    pub fn from_slice(buf: &[u8]) -> Result<Self, NtfsError> {
        let mut reader = io::Cursor::new(buf);
        reader.read_le().map_err(NtfsError::from)
    }

    /// Builds the geometry of the region. The MFT starts after the reserved sectors.
    pub fn geometry(&self) -> VolumeGeometry {
        VolumeGeometry {
            bytes_per_sec: self.bytes_per_sec,
            sec_per_clus: self.sec_per_clus,
            rsvd_sec_cnt: self.rsvd_sec_cnt,
            num_fat: 0,
            fat_sz: if self.sec_per_fat != 0 {
                self.sec_per_fat.into()
            } else {
                self.sec_per_fat_32
            },
            root_ent_cnt: 0,
            root_clus: self.root_clus,
            tot_sec: self.tot_sec,
            vol_id: self.vol_id,
        }
    }

    fn validate(self) -> Result<Self, NtfsError> {
        const VALID_BYTES_PER_SEC: [u16; 4] = [512, 1024, 2048, 4096];
        if !VALID_BYTES_PER_SEC.contains(&self.bytes_per_sec) {
            return Err(NtfsError::InvalidBytesPerSec(self.bytes_per_sec));
        }

        if !self.sec_per_clus.is_power_of_two() {
            return Err(NtfsError::InvalidSecPerClus(self.sec_per_clus));
        }

        Ok(self)
    }
}

impl fmt::Display for NtfsBootSector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "NTFS Boot Sector:")?;
        writeln!(f, "  {:<20} {}", "oem_id", String::from_utf8_lossy(&self.oem_id))?;
        writeln!(f, "  {:<20} {}", "bytes_per_sec", self.bytes_per_sec)?;
        writeln!(f, "  {:<20} {}", "sec_per_clus", self.sec_per_clus)?;
        writeln!(f, "  {:<20} {}", "rsvd_sec_cnt", self.rsvd_sec_cnt)?;
        writeln!(f, "  {:<20} 0x{:02X}", "media", self.media)?;
        writeln!(f, "  {:<20} {}", "tot_sec", self.tot_sec)?;
        writeln!(f, "  {:<20} {}", "root_clus", self.root_clus)?;
        writeln!(f, "  {:<20} {:08X}", "vol_id", self.vol_id)?;
        writeln!(
            f,
            "  {:<20} {}",
            "vol_lab",
            String::from_utf8_lossy(&self.vol_lab)
        )
    }
}
