//! Volume geometry shared by the FAT and NTFS decoders.
//!
//! Every byte offset used to locate a region of a volume is derived from a
//! [`VolumeGeometry`]. The record is built once from a decoded boot sector and
//! never changes afterwards.

use getset::Getters;

use crate::constants::{DIR_ENTRY_SIZE, FIRST_DATA_CLUSTER};

/// Layout parameters of a volume, as declared by its boot sector.
///
/// All offsets returned by the helper methods are relative to the start of the volume region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct VolumeGeometry {
    /// Number of bytes per sector
    #[get = "pub"]
    pub(crate) bytes_per_sec: u16,
    /// Number of sectors per cluster
    #[get = "pub"]
    pub(crate) sec_per_clus: u8,
    /// Number of reserved sectors from start of volume
    #[get = "pub"]
    pub(crate) rsvd_sec_cnt: u16,
    /// Number of allocation table copies
    #[get = "pub"]
    pub(crate) num_fat: u8,
    /// Size in sectors of one allocation table
    #[get = "pub"]
    pub(crate) fat_sz: u32,
    /// Maximum number of root directory entries (0 for FAT32)
    #[get = "pub"]
    pub(crate) root_ent_cnt: u16,
    /// First cluster of the root directory (FAT32)
    #[get = "pub"]
    pub(crate) root_clus: u32,
    /// Total count of sectors on the volume
    #[get = "pub"]
    pub(crate) tot_sec: u32,
    /// Volume serial number
    #[get = "pub"]
    pub(crate) vol_id: u32,
}

impl VolumeGeometry {
    /// Returns the size in bytes of a cluster.
    pub fn cluster_size(&self) -> u64 {
        self.sec_per_clus as u64 * self.bytes_per_sec as u64
    }

    /// Returns the byte offset of the first allocation table.
    pub fn fat_start(&self) -> u64 {
        self.rsvd_sec_cnt as u64 * self.bytes_per_sec as u64
    }

    /// Returns the size in bytes of one allocation table.
    pub fn fat_size_bytes(&self) -> u64 {
        self.fat_sz as u64 * self.bytes_per_sec as u64
    }

    /// Returns the byte offset right after the first allocation table.
    pub fn fat_end(&self) -> u64 {
        self.fat_start() + self.fat_size_bytes()
    }

    /// Returns the byte offset of the root directory table.
    ///
    /// `(rsvd_sec_cnt + fat_sz * num_fat) * bytes_per_sec`
    pub fn directory_start(&self) -> u64 {
        (self.rsvd_sec_cnt as u64 + self.fat_sz as u64 * self.num_fat as u64)
            * self.bytes_per_sec as u64
    }

    /// Returns the byte offset of the data region for a root directory of `capacity` entries.
    pub fn data_region_start(&self, capacity: u32) -> u64 {
        self.directory_start() + capacity as u64 * DIR_ENTRY_SIZE
    }

    /// Returns the byte offset of a cluster in the data region.
    ///
    /// Cluster numbering starts at 2, so `cluster` must be at least 2.
    pub fn cluster_offset(&self, data_region_start: u64, cluster: u32) -> u64 {
        data_region_start + (cluster - FIRST_DATA_CLUSTER) as u64 * self.cluster_size()
    }

    /// Returns the number of clusters in the data region.
    pub fn cluster_count(&self, capacity: u32) -> u64 {
        let bytes_per_sec = self.bytes_per_sec as u64;
        if bytes_per_sec == 0 || self.sec_per_clus == 0 {
            return 0;
        }

        let data_start_sec = self.data_region_start(capacity).div_ceil(bytes_per_sec);
        (self.tot_sec as u64).saturating_sub(data_start_sec) / self.sec_per_clus as u64
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn geometry(
        bytes_per_sec: u16,
        sec_per_clus: u8,
        rsvd_sec_cnt: u16,
        num_fat: u8,
        fat_sz: u32,
    ) -> VolumeGeometry {
        VolumeGeometry {
            bytes_per_sec,
            sec_per_clus,
            rsvd_sec_cnt,
            num_fat,
            fat_sz,
            root_ent_cnt: 512,
            root_clus: 2,
            tot_sec: 2880,
            vol_id: 0x1234_5678,
        }
    }

    #[test]
    fn floppy_layout() {
        let geo = geometry(512, 1, 1, 2, 9);

        assert_eq!(geo.fat_start(), 512);
        assert_eq!(geo.fat_size_bytes(), 9 * 512);
        assert_eq!(geo.directory_start(), 9728);
        assert_eq!(geo.data_region_start(512), 9728 + 512 * 32);
        assert_eq!(geo.cluster_size(), 512);
    }

    #[test]
    fn regions_are_strictly_ordered() {
        for bytes_per_sec in [512u16, 1024, 2048, 4096] {
            for sec_per_clus in [1u8, 2, 8, 64] {
                for rsvd_sec_cnt in [1u16, 32] {
                    for num_fat in [2u8, 3] {
                        for fat_sz in [1u32, 9, 1009] {
                            let geo = geometry(
                                bytes_per_sec,
                                sec_per_clus,
                                rsvd_sec_cnt,
                                num_fat,
                                fat_sz,
                            );
                            assert!(geo.directory_start() > geo.fat_end());
                            for capacity in [1u32, 16, 512] {
                                assert!(geo.data_region_start(capacity) > geo.directory_start());
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn cluster_two_is_the_data_region_start() {
        let geo = geometry(512, 4, 1, 2, 9);
        let data_start = geo.data_region_start(512);

        assert_eq!(geo.cluster_offset(data_start, 2), data_start);
        assert_eq!(geo.cluster_offset(data_start, 3), data_start + 2048);
    }

    #[test]
    fn cluster_count_of_a_floppy() {
        let geo = geometry(512, 1, 1, 2, 9);
        // 1 reserved + 18 FAT sectors, then 14 or 32 root directory sectors
        assert_eq!(geo.cluster_count(224), 2880 - 19 - 14);
        assert_eq!(geo.cluster_count(512), 2880 - 19 - 32);
    }
}
