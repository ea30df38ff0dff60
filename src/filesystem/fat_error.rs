//! Error types for the FAT region decoder.
//!
//! Boot sector validation errors follow Microsoft's FAT specification. Every other
//! failure is either an I/O error (failed seek, short read) or an allocation error.

use std::io;
use thiserror::Error;

use crate::utils::AllocError;

/// Errors that can occur while decoding the FAT region of a disk image.
#[derive(Error, Debug)]
pub enum FATError {
    /// Bytes per sector must be 512, 1024, 2048 or 4096.
    #[error("Invalid count of bytes per sector: `{0}`. Legal values: 512, 1024, 2048 or 4096")]
    InvalidBytesPerSec(u16),

    /// Sectors per cluster must be a power of 2: 1, 2, 4, 8, 16, 32, 64, or 128.
    #[error(
        "Invalid number of sector per cluster: `{0}`. Legal values: 1, 2, 4, 8, 16, 32, 64, 128"
    )]
    InvalidSecPerClus(u8),

    /// The count of reserved sectors must be greater than 0.
    #[error("Invalid count of reserved sectors: `{0}`. Any value greater than 0 is valid.")]
    InvalidRsvdSecCnt(u16),

    /// At least one allocation table must be present.
    #[error("Invalid number of FATs on this volume: `{0}`.")]
    InvalidNumFat(u8),

    /// Clusters 0 and 1 are reserved, the data region starts at cluster 2.
    #[error("Invalid cluster number `{0}`: data clusters start at 2.")]
    InvalidClusterError(u32),

    /// No directory entry at this index before the end-of-directory marker.
    #[error("No directory entry #{0}")]
    EntryNotFound(usize),

    /// Seek, read or write did not complete.
    #[error("IO Error: `{0}`")]
    IOError(io::Error),

    /// A buffer could not be obtained, or its declared size is zero.
    #[error("Allocation Error: `{0}`")]
    AllocationError(AllocError),

    /// Parsing error occured during structure initialization
    #[error("BinRead Error: `{0}`")]
    BinReadError(binread::Error),
}

/// Converts standard I/O errors into FATError.
impl From<io::Error> for FATError {
    fn from(err: io::Error) -> Self {
        FATError::IOError(err)
    }
}

impl From<AllocError> for FATError {
    fn from(err: AllocError) -> Self {
        FATError::AllocationError(err)
    }
}

/// Converts BinRead errors into FATError.
///
/// Short reads surface as I/O errors.
impl From<binread::Error> for FATError {
    fn from(err: binread::Error) -> Self {
        match err {
            binread::Error::Io(io_err) => FATError::IOError(io_err),
            other => FATError::BinReadError(other),
        }
    }
}

impl FATError {
    /// Returns whether the error must abort the session.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            FATError::IOError(_) | FATError::AllocationError(_) | FATError::BinReadError(_)
        )
    }
}
