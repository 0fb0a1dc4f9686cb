//! MBR (Master Boot Record) partition table implementation

pub mod types;

use crate::field::{u32_le_at, u8_at};
use types::MbrPartitionType;
use zonescan_core::MbrPartitionRecord;

/// MBR partition table
///
/// The Master Boot Record is the traditional partitioning scheme used by BIOS-based systems.
/// It holds up to 4 primary partitions. Extended partitions are reported like any
/// other entry; the logical volumes chained inside them are not followed.
///
/// # Structure
///
/// ```text
/// Offset  Size  Field
/// ------  ----  -----
/// 0x000   446   Bootstrap code
/// 0x1B8   4     Disk signature
/// 0x1BE   16    Partition entry 1
/// 0x1CE   16    Partition entry 2
/// 0x1DE   16    Partition entry 3
/// 0x1EE   16    Partition entry 4
/// 0x1FE   2     Boot signature (0xAA55)
/// ```
///
/// Each entry: status (+0, 0x80 = active), type (+4), start LBA (+8, u32 LE),
/// size in sectors (+12, u32 LE).
#[derive(Debug, Clone, PartialEq)]
pub struct MbrTable {
    records: Vec<MbrPartitionRecord>,
    disk_signature: u32,
}

impl MbrTable {
    /// Offset of the first partition entry
    pub const PARTITION_TABLE_OFFSET: usize = 0x1BE;

    /// Offset of the disk signature
    pub const DISK_SIGNATURE_OFFSET: usize = 0x1B8;

    /// Size of each partition entry
    pub const PARTITION_ENTRY_SIZE: usize = 16;

    /// Number of partition entries in MBR
    pub const NUM_PARTITIONS: usize = 4;

    /// Status byte marking the bootable entry
    pub const ACTIVE_STATUS: u8 = 0x80;

    /// Decode a boot sector already checked by [`boot_sector`](crate::detect::boot_sector)
    pub fn from_sector(sector: &[u8; 512]) -> Self {
        Self {
            records: read_mbr(sector),
            disk_signature: u32_le_at(sector, Self::DISK_SIGNATURE_OFFSET).unwrap_or(0),
        }
    }

    /// Take ownership of the records for every non-empty slot
    pub fn into_records(self) -> Vec<MbrPartitionRecord> {
        self.records
    }

    /// Get the disk signature
    pub fn disk_signature(&self) -> u32 {
        self.disk_signature
    }
}

/// Decode the four primary entries of an already validated boot sector
///
/// Slots whose type byte is 0 are skipped; the remaining records keep their
/// original 1-based slot number.
pub fn read_mbr(sector: &[u8; 512]) -> Vec<MbrPartitionRecord> {
    let mut records = Vec::with_capacity(MbrTable::NUM_PARTITIONS);

    for i in 0..MbrTable::NUM_PARTITIONS {
        let offset = MbrTable::PARTITION_TABLE_OFFSET + i * MbrTable::PARTITION_ENTRY_SIZE;
        let slot = (i + 1) as u8;

        let partition_type = MbrPartitionType::from_byte(u8_at(sector, offset + 4).unwrap_or(0));
        if partition_type.is_empty() {
            tracing::trace!(slot, "skipping empty MBR slot");
            continue;
        }

        let status = u8_at(sector, offset).unwrap_or(0);
        let start_lba = u32_le_at(sector, offset + 8).unwrap_or(0);
        let sectors = u32_le_at(sector, offset + 12).unwrap_or(0);

        if partition_type.is_extended() {
            tracing::debug!(slot, code = partition_type.to_byte(), "extended partition not traversed");
        }

        records.push(MbrPartitionRecord {
            slot,
            active: status == MbrTable::ACTIVE_STATUS,
            type_code: partition_type.to_byte(),
            start_lba,
            sectors,
            description: partition_type.name().to_string(),
        });
    }

    records
}
