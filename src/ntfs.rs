//! NTFS region decoder.
//!
//! Boot sector, MFT record headers at a fixed stride, data area preview and the
//! raw cluster write path.

pub mod boot_sector;
pub mod mft;
pub mod ntfs_error;
pub mod ntfs_vol;
