//! FAT region decoder.
//!
//! Boot sector, first allocation table, fixed-capacity root directory, data
//! region preview and first-cluster file reads.

pub mod allocation_table;
pub mod bpb;
pub mod dir_entry;
pub mod directory;
pub mod fat;
pub mod fat_error;
pub mod fat_type;
