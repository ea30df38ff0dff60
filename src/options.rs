//! Options controlling how volume regions are decoded.

use std::num::NonZeroU32;

use crate::constants::{DEFAULT_DIR_CAPACITY, DEFAULT_PREVIEW_SECTORS};

/// Knobs shared by the FAT and NTFS readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Enable the validation of boot sector fields
    pub validate: bool,
    /// Root directory capacity overriding the boot sector's root entry count
    pub directory_capacity: Option<NonZeroU32>,
    /// Number of sectors loaded by the FAT data region preview
    pub preview_sectors: u32,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            validate: true,
            directory_capacity: None,
            preview_sectors: DEFAULT_PREVIEW_SECTORS,
        }
    }
}

impl ReadOptions {
    /// Resolves the root directory capacity for a volume declaring `root_ent_cnt` entries.
    ///
    /// The override wins, then the boot sector field, then [`DEFAULT_DIR_CAPACITY`].
    pub fn directory_capacity_for(&self, root_ent_cnt: u16) -> u32 {
        match (self.directory_capacity, root_ent_cnt) {
            (Some(capacity), _) => capacity.get(),
            (None, 0) => DEFAULT_DIR_CAPACITY,
            (None, cnt) => cnt.into(),
        }
    }
}
