//!
//! DualVolumeForensics: A library and CLI for inspecting disk images holding a FAT
//! region and an NTFS region.
//!
//! This crate provides tools for:
//! - Decoding boot sectors into a typed volume geometry
//! - Loading the FAT allocation table, root directory and data region preview
//! - Reading FAT files from their first cluster
//! - Decoding NTFS MFT record headers and writing raw clusters
//! - Printing the layout of both regions
//!
//! Every structure is decoded from fixed byte offsets computed from the boot
//! sector; no OS filesystem driver is involved. Cluster chains are never
//! followed, so a FAT file spanning several clusters is only correct when its
//! clusters happen to be contiguous.
//!
//! # Re-exports
//! - [`FATVol`]: FAT volume region
//! - [`NTFSVol`]: NTFS volume region
//! - [`VolumeGeometry`]: Layout parameters shared by both

pub mod commands;
pub mod constants;
pub mod filesystem;
pub mod geometry;
pub mod ntfs;
pub mod options;
pub mod traits;
pub mod utils;

/// FAT volume region (see [`filesystem::fat::FATVol`]).
pub use crate::filesystem::fat::FATVol;
/// Geometry record (see [`geometry::VolumeGeometry`]).
pub use crate::geometry::VolumeGeometry;
/// NTFS volume region (see [`ntfs::ntfs_vol::NTFSVol`]).
pub use crate::ntfs::ntfs_vol::{NTFSVol, write_ntfs_file};
/// Reader options (see [`options::ReadOptions`]).
pub use crate::options::ReadOptions;
