//! Synthetic disk images for the integration tests.

#![allow(dead_code)]

/// Byte offset of the NTFS region in [`combined_image`].
pub const NTFS_REGION: u64 = 600 * 1024;

/// Size in bytes of [`combined_image`].
pub const IMAGE_LEN: usize = 1024 * 1024;

/// Writes a 90-byte FAT boot sector at `offset`.
pub fn put_fat_boot_sector(
    image: &mut [u8],
    offset: usize,
    bytes_per_sec: u16,
    sec_per_clus: u8,
    rsvd_sec_cnt: u16,
    num_fat: u8,
    fat_sz_32: u32,
) {
    let b = &mut image[offset..offset + 90];
    b[0..3].copy_from_slice(&[0xEB, 0x3C, 0x90]);
    b[3..11].copy_from_slice(b"MSDOS5.0");
    b[11..13].copy_from_slice(&bytes_per_sec.to_le_bytes());
    b[13] = sec_per_clus;
    b[14..16].copy_from_slice(&rsvd_sec_cnt.to_le_bytes());
    b[16] = num_fat;
    b[17..19].copy_from_slice(&512u16.to_le_bytes());
    b[19..21].copy_from_slice(&2048u16.to_le_bytes());
    b[21] = 0xF0;
    b[36..40].copy_from_slice(&fat_sz_32.to_le_bytes());
    b[66] = 0x29;
    b[67..71].copy_from_slice(&0x0BAD_CAFEu32.to_le_bytes());
    b[71..82].copy_from_slice(b"EVIDENCE   ");
    b[82..90].copy_from_slice(b"FAT12   ");
}

/// Writes a FAT12 boot sector at `offset`: the FAT size sits in the 16-bit field and
/// the extended boot record starts at byte 36.
pub fn put_fat12_boot_sector(image: &mut [u8], offset: usize, fat_sz_16: u16) {
    let b = &mut image[offset..offset + 62];
    b.fill(0);
    b[0..3].copy_from_slice(&[0xEB, 0x3C, 0x90]);
    b[3..11].copy_from_slice(b"MSDOS5.0");
    b[11..13].copy_from_slice(&512u16.to_le_bytes());
    b[13] = 1;
    b[14..16].copy_from_slice(&1u16.to_le_bytes());
    b[16] = 2;
    b[17..19].copy_from_slice(&512u16.to_le_bytes());
    b[19..21].copy_from_slice(&2048u16.to_le_bytes());
    b[21] = 0xF0;
    b[22..24].copy_from_slice(&fat_sz_16.to_le_bytes());
    b[36] = 0x00;
    b[38] = 0x29;
    b[39..43].copy_from_slice(&0x0BAD_CAFEu32.to_le_bytes());
    b[43..54].copy_from_slice(b"EVIDENCE   ");
    b[54..62].copy_from_slice(b"FAT12   ");
}

/// Writes a 90-byte NTFS boot sector at `offset`.
pub fn put_ntfs_boot_sector(
    image: &mut [u8],
    offset: usize,
    bytes_per_sec: u16,
    sec_per_clus: u8,
    rsvd_sec_cnt: u16,
) {
    let b = &mut image[offset..offset + 90];
    b[0..3].copy_from_slice(&[0xEB, 0x52, 0x90]);
    b[3..11].copy_from_slice(b"NTFS    ");
    b[11..13].copy_from_slice(&bytes_per_sec.to_le_bytes());
    b[13] = sec_per_clus;
    b[14..16].copy_from_slice(&rsvd_sec_cnt.to_le_bytes());
    b[21] = 0xF8;
    b[32..36].copy_from_slice(&2048u32.to_le_bytes());
    b[67..71].copy_from_slice(&0x5EED_0001u32.to_le_bytes());
}

/// Writes a 32-byte directory entry at `offset`.
pub fn put_dir_entry(image: &mut [u8], offset: usize, name: &[u8; 11], cluster: u32, size: u32) {
    let e = &mut image[offset..offset + 32];
    e[0..11].copy_from_slice(name);
    e[11] = 0x20;
    e[20..22].copy_from_slice(&((cluster >> 16) as u16).to_le_bytes());
    e[26..28].copy_from_slice(&(cluster as u16).to_le_bytes());
    e[28..32].copy_from_slice(&size.to_le_bytes());
}

/// Writes the header of a used MFT record at `offset`.
pub fn put_mft_header(image: &mut [u8], offset: usize, sequence_number: u64) {
    let h = &mut image[offset..offset + 60];
    h[0..4].copy_from_slice(b"FILE");
    h[4..6].copy_from_slice(&0x30u16.to_le_bytes());
    h[6..8].copy_from_slice(&3u16.to_le_bytes());
    h[16..24].copy_from_slice(&sequence_number.to_le_bytes());
}

/// A 1 MiB image with a floppy-like FAT region at byte 0 and an NTFS region at [`NTFS_REGION`].
///
/// FAT: 512 bytes/sector, 1 sector/cluster, 1 reserved sector, 2 FATs of 9 sectors,
/// 512 root entries. The directory starts at 9728 and the data region at 26112.
///
/// NTFS: 512 bytes/sector, 8 sectors/cluster, 4 reserved sectors.
pub fn combined_image() -> Vec<u8> {
    let mut image = vec![0u8; IMAGE_LEN];
    put_fat_boot_sector(&mut image, 0, 512, 1, 1, 2, 9);
    // FAT12 media entries
    image[512..515].copy_from_slice(&[0xF0, 0xFF, 0xFF]);

    let ntfs = NTFS_REGION as usize;
    put_ntfs_boot_sector(&mut image, ntfs, 512, 8, 4);
    put_mft_header(&mut image, ntfs + 2048, 1);
    put_mft_header(&mut image, ntfs + 2048 + 1024, 2);

    image
}
