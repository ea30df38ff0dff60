mod common;

use common::*;
use dual_volume_forensics::filesystem::fat_error::FATError;
use dual_volume_forensics::utils::read_at;
use dual_volume_forensics::{FATVol, NTFSVol, ReadOptions, write_ntfs_file};
use std::io::Cursor;

const DIR_START: usize = 9728;
const DATA_START: usize = DIR_START + 512 * 32;

#[test]
fn floppy_scenario() {
    let mut image = combined_image();
    put_dir_entry(&mut image, DIR_START, b"HELLO   TXT", 2, 100);
    let payload: Vec<u8> = (0..100u8).collect();
    image[DATA_START..DATA_START + 100].copy_from_slice(&payload);
    // Trailing bytes of the cluster are not part of the file
    image[DATA_START + 100] = 0xFF;
    let mut disk = Cursor::new(image);

    let vol = FATVol::from_reader(&mut disk, 0, &ReadOptions::default()).unwrap();
    assert_eq!(vol.directory_start(), 9728);
    assert_eq!(vol.data_region_start(), DATA_START as u64);

    let dir = vol.read_root_directory(&mut disk).unwrap();
    assert_eq!(dir.entries().len(), 1);
    let entry = dir.entry(0).unwrap();

    let location = vol.file_location(entry).unwrap();
    assert_eq!(*location.byte_offset(), vol.data_region_start());

    let data = vol.read_file(&mut disk, entry).unwrap();
    assert_eq!(data, payload);
}

#[test]
fn full_fat_sequence() {
    let mut image = combined_image();
    put_dir_entry(&mut image, DIR_START, b"ONE     TXT", 2, 5);
    put_dir_entry(&mut image, DIR_START + 32, b"TWO     TXT", 3, 0);
    // Leftover entry after the end-of-directory marker
    put_dir_entry(&mut image, DIR_START + 96, b"GHOST   TXT", 4, 5);
    let mut disk = Cursor::new(image);

    let vol = FATVol::from_reader(&mut disk, 0, &ReadOptions::default()).unwrap();
    let fat = vol.read_allocation_table(&mut disk).unwrap();
    assert_eq!(fat.len(), 9 * 512);
    assert_eq!(&fat.as_bytes()[..3], &[0xF0, 0xFF, 0xFF]);

    let dir = vol.read_root_directory(&mut disk).unwrap();
    let names: Vec<String> = dir
        .entries()
        .iter()
        .map(|e| e.short_name().unwrap())
        .collect();
    assert_eq!(names, ["ONE.TXT", "TWO.TXT"]);
    assert!(matches!(dir.entry(2), Err(FATError::EntryNotFound(2))));

    let preview = vol.read_data_preview(&mut disk).unwrap();
    assert_eq!(preview.len(), 1024 * 512);

    // Zero-length file
    assert!(vol.read_file(&mut disk, dir.entry(1).unwrap()).unwrap().is_empty());
}

#[test]
fn fragmented_file_is_not_reassembled() {
    let mut image = combined_image();
    // 1024-byte file: 2 clusters of 512 bytes, chained 2 -> 5 in the FAT.
    put_dir_entry(&mut image, DIR_START, b"FRAG    BIN", 2, 1024);
    // FAT12 entries: cluster 2 -> 5, cluster 5 -> end of chain
    image[512 + 3] = 0x05;
    image[512 + 4] = 0x00;
    image[512 + 7] = 0xF0;
    image[512 + 8] = 0xFF;

    let cluster = |n: usize| DATA_START + (n - 2) * 512;
    image[cluster(2)..cluster(2) + 512].fill(b'A');
    image[cluster(3)..cluster(3) + 512].fill(b'X');
    image[cluster(5)..cluster(5) + 512].fill(b'B');
    let mut disk = Cursor::new(image);

    let vol = FATVol::from_reader(&mut disk, 0, &ReadOptions::default()).unwrap();
    let dir = vol.read_root_directory(&mut disk).unwrap();
    let data = vol.read_file(&mut disk, dir.entry(0).unwrap()).unwrap();

    let mut reassembled = vec![b'A'; 512];
    reassembled.extend(vec![b'B'; 512]);
    assert_ne!(data, reassembled);

    // The bytes past the first cluster come from the next contiguous cluster
    assert!(data[..512].iter().all(|b| *b == b'A'));
    assert!(data[512..].iter().all(|b| *b == b'X'));
}

#[test]
fn fat12_boot_sector_with_extended_boot_record() {
    let mut image = combined_image();
    put_fat12_boot_sector(&mut image, 0, 9);
    put_dir_entry(&mut image, DIR_START, b"HELLO   TXT", 2, 4);
    image[DATA_START..DATA_START + 4].copy_from_slice(b"fat!");
    let mut disk = Cursor::new(image);

    let vol = FATVol::from_reader(&mut disk, 0, &ReadOptions::default()).unwrap();
    assert_eq!(*vol.geometry().fat_sz(), 9);
    assert_eq!(vol.directory_start(), DIR_START as u64);
    assert_eq!(vol.read_allocation_table(&mut disk).unwrap().len(), 9 * 512);

    let dir = vol.read_root_directory(&mut disk).unwrap();
    assert_eq!(vol.read_file(&mut disk, dir.entry(0).unwrap()).unwrap(), b"fat!");
}

#[test]
fn zero_sized_fat_is_rejected() {
    let mut image = combined_image();
    put_fat_boot_sector(&mut image, 0, 512, 1, 1, 2, 0);
    let mut disk = Cursor::new(image);

    let vol = FATVol::from_reader(&mut disk, 0, &ReadOptions::default()).unwrap();
    assert!(matches!(
        vol.read_allocation_table(&mut disk),
        Err(FATError::AllocationError(_))
    ));
}

#[test]
fn truncated_image_fails_with_io_errors() {
    let image = combined_image()[..20_000].to_vec();
    let mut disk = Cursor::new(image);

    let vol = FATVol::from_reader(&mut disk, 0, &ReadOptions::default()).unwrap();
    assert!(vol.read_allocation_table(&mut disk).is_ok());
    assert!(matches!(
        vol.read_root_directory(&mut disk),
        Err(FATError::IOError(_))
    ));
    assert!(matches!(
        vol.read_data_preview(&mut disk),
        Err(FATError::IOError(_))
    ));
}

#[test]
fn ntfs_region_is_independent() {
    let mut disk = Cursor::new(combined_image());

    let ntfs = NTFSVol::from_reader(&mut disk, NTFS_REGION, &ReadOptions::default()).unwrap();
    assert_eq!(ntfs.boot_sector().oem_id(), b"NTFS    ");
    assert_eq!(ntfs.mft_start(), NTFS_REGION + 2048);

    let first = ntfs.read_record(&mut disk, 0).unwrap();
    let second = ntfs.read_record(&mut disk, 1).unwrap();
    let unused = ntfs.read_record(&mut disk, 2).unwrap();
    assert_eq!(*first.sequence_number(), 1);
    assert_eq!(*second.sequence_number(), 2);
    assert!(!unused.has_file_signature());

    let mft = ntfs.read_mft(&mut disk).unwrap();
    assert_eq!(mft.records().unwrap().len(), 4);
    assert_eq!(ntfs.read_data_preview(&mut disk).unwrap().len(), 4096);

    // The FAT region decodes the same way regardless of the NTFS one
    let fat = FATVol::from_reader(&mut disk, 0, &ReadOptions::default()).unwrap();
    assert_eq!(fat.directory_start(), 9728);
}

#[test]
fn ntfs_write_round_trip() {
    let mut disk = Cursor::new(combined_image());
    let ntfs = NTFSVol::from_reader(&mut disk, NTFS_REGION, &ReadOptions::default()).unwrap();
    let cluster_size = ntfs.geometry().cluster_size();
    let data: Vec<u8> = (0..cluster_size).map(|i| (i * 7 % 256) as u8).collect();

    ntfs.write_file(&mut disk, 10, &data).unwrap();

    let mut back = vec![0u8; cluster_size as usize];
    read_at(&mut disk, NTFS_REGION + 10 * cluster_size, &mut back, "cluster").unwrap();
    assert_eq!(back, data);

    // The MFT is untouched
    assert_eq!(*ntfs.read_record(&mut disk, 0).unwrap().sequence_number(), 1);
}

#[test]
fn raw_write_from_image_start() {
    let mut disk = Cursor::new(vec![0u8; 8 * 4096]);
    let data = vec![0x5Au8; 4096];

    write_ntfs_file(&mut disk, 0, 3, 4096, &data).unwrap();

    let mut back = vec![0u8; 4096];
    read_at(&mut disk, 3 * 4096, &mut back, "cluster").unwrap();
    assert_eq!(back, data);
}
