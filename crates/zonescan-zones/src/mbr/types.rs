//! MBR partition type codes and their descriptions

use std::fmt;

/// Description returned for codes missing from the catalog
pub const UNKNOWN_DESCRIPTION: &str = "Unknown";

/// Well-known MBR partition type codes, sorted by code for binary search
const CATALOG: &[(u8, &str)] = &[
    (0x00, "Empty"),
    (0x01, "FAT12"),
    (0x04, "FAT16 <32M"),
    (0x05, "Extended"),
    (0x06, "FAT16"),
    (0x07, "HPFS/NTFS/exFAT"),
    (0x0B, "W95 FAT32"),
    (0x0C, "W95 FAT32 (LBA)"),
    (0x0E, "W95 FAT16 (LBA)"),
    (0x0F, "W95 Ext'd (LBA)"),
    (0x11, "Hidden FAT12"),
    (0x14, "Hidden FAT16 <32M"),
    (0x16, "Hidden FAT16"),
    (0x17, "Hidden HPFS/NTFS"),
    (0x1B, "Hidden W95 FAT32"),
    (0x1C, "Hidden W95 FAT32 (LBA)"),
    (0x1E, "Hidden W95 FAT16 (LBA)"),
    (0x82, "Linux swap"),
    (0x83, "Linux"),
    (0x85, "Linux extended"),
    (0x8E, "Linux LVM"),
    (0xA0, "Hibernation"),
    (0xA5, "FreeBSD"),
    (0xA6, "OpenBSD"),
    (0xA8, "Darwin UFS"),
    (0xA9, "NetBSD"),
    (0xAB, "Darwin boot"),
    (0xAF, "HFS / HFS+"),
    (0xBE, "Solaris boot"),
    (0xBF, "Solaris"),
    (0xEB, "BeOS fs"),
    (0xEE, "GPT"),
    (0xEF, "EFI (FAT-12/16/32)"),
    (0xFB, "VMware VMFS"),
    (0xFC, "VMware VMKCORE"),
    (0xFD, "Linux raid autodetect"),
];

/// MBR partition type code
///
/// Any byte is a valid code; the catalog only decides how it is described.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MbrPartitionType(pub u8);

impl MbrPartitionType {
    /// Empty/unused partition entry
    pub const EMPTY: Self = Self(0x00);
    /// Extended partition, CHS
    pub const EXTENDED: Self = Self(0x05);
    /// Extended partition, LBA
    pub const EXTENDED_LBA: Self = Self(0x0F);
    /// Linux extended partition
    pub const LINUX_EXTENDED: Self = Self(0x85);
    /// GPT protective MBR
    pub const GPT_PROTECTIVE: Self = Self(0xEE);

    /// Create a partition type from a byte value
    pub fn from_byte(b: u8) -> Self {
        Self(b)
    }

    /// Get the byte value of this partition type
    pub fn to_byte(self) -> u8 {
        self.0
    }

    /// Catalog description, "Unknown" for unmapped codes
    pub fn name(&self) -> &'static str {
        self.lookup().unwrap_or(UNKNOWN_DESCRIPTION)
    }

    /// True if the code is in the catalog
    pub fn is_known(&self) -> bool {
        self.lookup().is_some()
    }

    /// True for unused slots
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// True for container entries whose logical volumes are not traversed
    pub fn is_extended(&self) -> bool {
        matches!(*self, Self::EXTENDED | Self::EXTENDED_LBA | Self::LINUX_EXTENDED)
    }

    fn lookup(&self) -> Option<&'static str> {
        CATALOG
            .binary_search_by_key(&self.0, |&(code, _)| code)
            .ok()
            .map(|i| CATALOG[i].1)
    }
}

impl fmt::Display for MbrPartitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Describe a raw type byte
pub fn describe(code: u8) -> &'static str {
    MbrPartitionType(code).name()
}
