use std::io::{self, Read, Seek, SeekFrom, Write};

/// Failure to obtain a buffer for an on-disk region.
#[derive(thiserror::Error, Debug)]
#[error("Memory allocation failed for {what}: cannot allocate {size} bytes")]
pub struct AllocError {
    /// The region the buffer was meant for.
    pub what: &'static str,
    /// The requested size in bytes.
    pub size: u64,
}

/// Allocates a zeroed buffer of `size` bytes.
///
/// # Errors
///
/// Returns an `AllocError` if the size does not fit in memory or if the allocator refuses it.
pub fn alloc_buffer(size: u64, what: &'static str) -> Result<Vec<u8>, AllocError> {
    let len = usize::try_from(size).map_err(|_| AllocError { what, size })?;

    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| AllocError { what, size })?;
    buf.resize(len, 0);

    Ok(buf)
}

/// Reads exactly `buffer.len()` bytes at a byte offset.
///
/// # Arguments
///
/// - `reader`: The disk image to read from.
/// - `offset`: The absolute offset in bytes.
/// - `buffer`: The buffer to fill.
/// - `what`: Name of the region, used in the error message.
///
/// # Errors
///
/// Returns an `io::Error` if the seek fails or if fewer bytes than requested are available.
pub fn read_at<T: Read + Seek>(
    reader: &mut T,
    offset: u64,
    buffer: &mut [u8],
    what: &str,
) -> io::Result<()> {
    reader.seek(SeekFrom::Start(offset)).map_err(|err| {
        io::Error::new(
            err.kind(),
            format!("Error seeking to {what} at offset {offset}: {err}"),
        )
    })?;

    reader.read_exact(buffer).map_err(|err| {
        io::Error::new(
            err.kind(),
            format!(
                "Error reading {what} ({} bytes at offset {offset}): {err}",
                buffer.len()
            ),
        )
    })
}

/// Writes data to a disk image at a specific offset.
///
/// # Arguments
///
/// - `disk`: A mutable reference to the image to write to.
/// - `offset`: The offset in bytes where the data will be written.
/// - `data`: The bytes to write.
pub fn write_at<T: Write + Seek>(disk: &mut T, offset: u64, data: &[u8]) -> io::Result<()> {
    disk.seek(SeekFrom::Start(offset)).map_err(|err| {
        io::Error::new(
            err.kind(),
            format!("Error seeking to offset {offset}: {err}"),
        )
    })?;
    disk.write_all(data).map_err(|err| {
        io::Error::new(
            err.kind(),
            format!(
                "Error writing {} bytes at offset {offset}: {err}",
                data.len()
            ),
        )
    })?;
    disk.flush()
}

/// Renders a buffer as rows of 16 hex bytes prefixed with their offset.
pub fn hexdump(data: &[u8], indent: usize) -> String {
    let mut out = String::new();
    let pad = " ".repeat(indent);

    for (i, chunk) in data.chunks(16).enumerate() {
        out.push_str(&format!("{pad}0x{:06X}: ", i * 16));
        for byte in chunk {
            out.push_str(&format!("{byte:02X} "));
        }
        out.push('\n');
    }

    out
}
