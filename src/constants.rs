/// The size in bytes of the decoded part of a boot sector.
pub const BOOT_SECTOR_SIZE: usize = 90;

/// The size in bytes of a FAT directory entry.
pub const DIR_ENTRY_SIZE: u64 = 32;

/// Root directory capacity used when the boot sector declares none.
pub const DEFAULT_DIR_CAPACITY: u32 = 512;

/// The first cluster of the data region.
pub const FIRST_DATA_CLUSTER: u32 = 2;

/// The number of sectors loaded by a FAT data region preview.
pub const DEFAULT_PREVIEW_SECTORS: u32 = 1024;

/// The size in bytes of one MFT record slot.
pub const MFT_RECORD_SIZE: u64 = 1024;

/// The size in bytes of the MFT region loaded in one go.
pub const MFT_REGION_SIZE: u64 = 4096;

/// The size in bytes of the NTFS data region preview.
pub const NTFS_PREVIEW_SIZE: u64 = 4096;
