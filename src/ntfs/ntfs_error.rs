//! Error types for the NTFS region decoder.

use std::io;
use thiserror::Error;

use crate::utils::AllocError;

/// Errors that can occur while decoding or writing the NTFS region of a disk image.
#[derive(Error, Debug)]
pub enum NtfsError {
    /// Bytes per sector must be 512, 1024, 2048 or 4096.
    #[error("Invalid count of bytes per sector: `{0}`. Legal values: 512, 1024, 2048 or 4096")]
    InvalidBytesPerSec(u16),

    /// Sectors per cluster must be a power of 2.
    #[error("Invalid number of sector per cluster: `{0}`. Any power of 2 up to 128 is valid.")]
    InvalidSecPerClus(u8),

    /// A cluster size of zero maps every cluster onto the boot sector.
    #[error("Invalid cluster size: `{0}`.")]
    InvalidClusSz(u64),

    /// Seek, read or write did not complete.
    #[error("IO Error: `{0}`")]
    IOError(io::Error),

    /// A buffer could not be obtained.
    #[error("Allocation Error: `{0}`")]
    AllocationError(AllocError),

    /// Parsing error occured during structure initialization
    #[error("BinRead Error: `{0}`")]
    BinReadError(binread::Error),
}

impl From<io::Error> for NtfsError {
    fn from(err: io::Error) -> Self {
        NtfsError::IOError(err)
    }
}

impl From<AllocError> for NtfsError {
    fn from(err: AllocError) -> Self {
        NtfsError::AllocationError(err)
    }
}

impl From<binread::Error> for NtfsError {
    fn from(err: binread::Error) -> Self {
        match err {
            binread::Error::Io(io_err) => NtfsError::IOError(io_err),
            other => NtfsError::BinReadError(other),
        }
    }
}

impl NtfsError {
    /// Returns whether the error must abort the session.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            NtfsError::IOError(_) | NtfsError::AllocationError(_) | NtfsError::BinReadError(_)
        )
    }
}
