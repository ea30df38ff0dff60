//! This is the main entry point of the disk image inspector.
//!
//! The program decodes the FAT region and the NTFS region of the disk image given
//! as its only argument, prints them, then provides an interactive command-line
//! interface to read files and MFT records or write raw clusters.

use dual_volume_forensics::commands::Command;
use dual_volume_forensics::filesystem::directory::Directory;
use dual_volume_forensics::filesystem::fat_error::FATError;
use dual_volume_forensics::ntfs::ntfs_error::NtfsError;
use dual_volume_forensics::traits::LayoutDisplay;
use dual_volume_forensics::utils::hexdump;
use dual_volume_forensics::{FATVol, NTFSVol, ReadOptions};
use log::{error, info, warn};
use std::fmt::Display;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use std::{env, process};

/// Represents the runtime state of the program.
///
/// The disk image stays open for the whole session; both regions are decoded from it.
struct RunState {
    /// The opened disk image, read and write.
    disk: File,
    /// The decoded FAT region.
    fat_vol: FATVol,
    /// The FAT root directory.
    fat_dir: Directory,
    /// The decoded NTFS region.
    ntfs_vol: NTFSVol,
    /// Options used to decode regions
    options: ReadOptions,
}

fn main() {
    if let Err(e) = stderrlog::new()
        .module(module_path!())
        .module("dual_volume_forensics")
        .verbosity(2usize)
        .init()
    {
        eprintln!("Failed to initialise logging: {e}");
    }

    let args: Vec<String> = env::args().collect();
    let disk_path = match args.len() {
        2 => args[1].as_str(),
        _ => {
            eprintln!(
                "Usage: {} <disk image>",
                args.first().map(String::as_str).unwrap_or("main")
            );
            process::exit(2);
        }
    };

    let mut run_state = open_image(Path::new(disk_path), ReadOptions::default());
    print_regions(&mut run_state);

    loop {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            abort("Flushing stdout", e);
        }

        let mut s = String::new();
        match io::stdin().read_line(&mut s) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => abort("Reading command", e),
        }

        match Command::from_string(&s) {
            Command::Quit => break,
            Command::Print => print_regions(&mut run_state),
            Command::Dir => print_directory(&run_state.fat_dir),
            Command::Cat(index) => cat_file(&mut run_state, index),
            Command::Mft(index) => {
                match run_state.ntfs_vol.read_record(&mut run_state.disk, index) {
                    Ok(header) => print!("MFT Record #{index}:\n{header}"),
                    Err(e) => handle_ntfs_error("Reading MFT record", e),
                }
            }
            Command::Write((file_path, cluster)) => {
                write_file_to_disk(&mut run_state, Path::new(&file_path), cluster)
            }
            Command::Ntfs(offset) => {
                match NTFSVol::from_reader(&mut run_state.disk, offset, &run_state.options) {
                    Ok(ntfs_vol) => {
                        run_state.ntfs_vol = ntfs_vol;
                        print_ntfs(&mut run_state);
                    }
                    Err(e) => handle_ntfs_error("Reading NTFS boot sector", e),
                }
            }
            Command::Skip => run_state.options.validate = false,
            Command::Unknown(s) => error!("Unknown command: {s:?}"),
            Command::Invalid(s) => error!("{s}"),
            Command::Empty => {}
        }
    }
}

/// Reports the failing operation and terminates the process.
fn abort(operation: &str, err: impl Display) -> ! {
    error!("{operation}: {err}");
    process::exit(1);
}

fn handle_fat_error(operation: &str, err: FATError) {
    if err.is_fatal() {
        abort(operation, err);
    }
    error!("{operation}: {err}");
}

fn handle_ntfs_error(operation: &str, err: NtfsError) {
    if err.is_fatal() {
        abort(operation, err);
    }
    error!("{operation}: {err}");
}

/// Opens the disk image and runs the decoding sequence of both regions.
///
/// Any failure is fatal.
fn open_image(path: &Path, options: ReadOptions) -> RunState {
    let mut disk = match File::options().read(true).write(true).open(path) {
        Ok(file) => file,
        Err(e) => abort("Failed to open disk image", e),
    };

    let fat_vol = FATVol::from_reader(&mut disk, 0, &options)
        .unwrap_or_else(|e| abort("Reading FAT boot sector", e));
    let fat = fat_vol
        .read_allocation_table(&mut disk)
        .unwrap_or_else(|e| abort("Reading FAT", e));
    let fat_dir = fat_vol
        .read_root_directory(&mut disk)
        .unwrap_or_else(|e| abort("Reading root directory", e));
    let preview = fat_vol
        .read_data_preview(&mut disk)
        .unwrap_or_else(|e| abort("Reading data area", e));
    info!(
        "Loaded {}-byte FAT, {} directory entries, {}-byte data preview",
        fat.len(),
        fat_dir.entries().len(),
        preview.len()
    );

    let ntfs_vol = NTFSVol::from_reader(&mut disk, 0, &options)
        .unwrap_or_else(|e| abort("Reading NTFS boot sector", e));

    RunState {
        disk,
        fat_vol,
        fat_dir,
        ntfs_vol,
        options,
    }
}

fn print_regions(run_state: &mut RunState) {
    print!("{}", run_state.fat_vol.bpb());
    match run_state.fat_vol.display_layout(3) {
        Ok(layout) => print!("\n{layout}"),
        Err(e) => error!("Print layout error: {e}"),
    }
    print_directory(&run_state.fat_dir);

    print_ntfs(run_state);
}

fn print_ntfs(run_state: &mut RunState) {
    print!("\n{}", run_state.ntfs_vol.boot_sector());
    match run_state.ntfs_vol.display_layout(3) {
        Ok(layout) => print!("\n{layout}"),
        Err(e) => error!("Print layout error: {e}"),
    }

    match run_state.ntfs_vol.read_mft(&mut run_state.disk) {
        Ok(mft) => match mft.records() {
            Ok(records) => {
                let in_use = records.iter().filter(|r| r.has_file_signature()).count();
                println!("MFT: {in_use}/{} records in use", records.len());
            }
            Err(e) => handle_ntfs_error("Decoding MFT", e),
        },
        Err(e) => return handle_ntfs_error("Reading MFT", e),
    }

    match run_state.ntfs_vol.read_data_preview(&mut run_state.disk) {
        Ok(preview) => print!("\nNTFS Data Area:\n{}", hexdump(&preview, 2)),
        Err(e) => handle_ntfs_error("Reading NTFS data area", e),
    }
}

fn print_directory(dir: &Directory) {
    println!("\nRoot Directory ({} of {} slots):", dir.entries().len(), dir.capacity());
    for (i, entry) in dir.entries().iter().enumerate() {
        let kind = if entry.is_volume_label() {
            "label"
        } else if entry.is_dir() {
            "dir"
        } else {
            "file"
        };
        println!("  #{i:<4} {kind:<5} {entry}");
    }
}

fn cat_file(run_state: &mut RunState, index: usize) {
    let entry = match run_state.fat_dir.entry(index) {
        Ok(entry) => entry,
        Err(e) => return handle_fat_error("Looking up directory entry", e),
    };

    if entry.is_dir() {
        warn!("{entry} is a directory, its cluster is dumped as file data");
    }

    match run_state.fat_vol.read_file(&mut run_state.disk, entry) {
        Ok(data) => {
            if let Ok(location) = run_state.fat_vol.file_location(entry) {
                println!(
                    "{} bytes from cluster {} (offset {}):",
                    data.len(),
                    location.start_cluster(),
                    location.byte_offset()
                );
            }
            print!("{}", hexdump(&data, 2));
        }
        Err(e) => handle_fat_error("Reading file data", e),
    }
}

fn write_file_to_disk(run_state: &mut RunState, file_path: &Path, cluster: u64) {
    let data = match fs::read(file_path) {
        Ok(data) => data,
        Err(e) => {
            error!(
                "Can't read {}: {}",
                file_path.to_str().unwrap_or("invalid_file_name"),
                e
            );
            return;
        }
    };

    match run_state
        .ntfs_vol
        .write_file(&mut run_state.disk, cluster, &data)
    {
        Ok(()) => println!("Wrote {} bytes at cluster {cluster}.", data.len()),
        Err(e) => handle_ntfs_error("Writing file data", e),
    }
}
