//! GPT header and partition entry decoding

use crate::field::{array_at, u32_le_at, u64_le_at};
use zonescan_core::{GptHeaderInfo, GptRevision};

/// GPT header signature
pub const SIGNATURE: &[u8; 8] = b"EFI PART";

/// Typical GPT header size
pub const HEADER_SIZE: usize = 92;

/// Field offsets inside the header sector
pub mod header_offset {
    pub const REVISION: usize = 8;
    pub const HEADER_SIZE: usize = 12;
    pub const CURRENT_LBA: usize = 24;
    pub const BACKUP_LBA: usize = 32;
    pub const FIRST_USABLE_LBA: usize = 40;
    pub const LAST_USABLE_LBA: usize = 48;
    pub const DISK_GUID: usize = 56;
    pub const PARTITION_TABLE_LBA: usize = 72;
    pub const PARTITION_COUNT: usize = 80;
    pub const ENTRY_SIZE: usize = 84;
}

/// Field offsets inside one partition entry
pub mod entry_offset {
    pub const TYPE_GUID: usize = 0;
    pub const UNIQUE_GUID: usize = 16;
    pub const START_LBA: usize = 32;
    pub const END_LBA: usize = 40;
    pub const ATTRIBUTES: usize = 48;
    pub const NAME: usize = 56;
}

/// Length of the UTF-16LE name field (36 code units)
pub const NAME_LENGTH: usize = 72;

/// Smallest entry that still holds both LBA fields
pub const MIN_ENTRY_SIZE: u32 = (entry_offset::END_LBA + 8) as u32;

/// Name reported when an entry's decoded name is empty
pub const UNNAMED: &str = "Unnamed";

/// Check the 8-byte signature at the start of the header sector
pub fn has_signature(header: &[u8]) -> bool {
    header.get(..SIGNATURE.len()) == Some(&SIGNATURE[..])
}

/// Decode a GPT header sector
///
/// Returns `None` if the sector is shorter than [`HEADER_SIZE`] or does not
/// carry the "EFI PART" signature.
pub fn decode_header(header: &[u8]) -> Option<GptHeaderInfo> {
    if header.len() < HEADER_SIZE || !has_signature(header) {
        return None;
    }

    Some(GptHeaderInfo {
        signature: array_at(header, 0)?,
        revision: GptRevision::from_raw(u32_le_at(header, header_offset::REVISION)?),
        header_size: u32_le_at(header, header_offset::HEADER_SIZE)?,
        current_lba: u64_le_at(header, header_offset::CURRENT_LBA)?,
        backup_lba: u64_le_at(header, header_offset::BACKUP_LBA)?,
        first_usable_lba: u64_le_at(header, header_offset::FIRST_USABLE_LBA)?,
        last_usable_lba: u64_le_at(header, header_offset::LAST_USABLE_LBA)?,
        disk_guid: array_at(header, header_offset::DISK_GUID)?,
        partition_table_lba: u64_le_at(header, header_offset::PARTITION_TABLE_LBA)?,
        partition_count: u32_le_at(header, header_offset::PARTITION_COUNT)?,
        entry_size: u32_le_at(header, header_offset::ENTRY_SIZE)?,
    })
}

/// An in-use entry before it is numbered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub type_guid: [u8; 16],
    pub unique_guid: [u8; 16],
    pub start_lba: u64,
    pub end_lba: u64,
    pub attributes: u64,
    pub name: String,
}

/// Outcome of decoding one slot of the entry array
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySlot {
    /// Type GUID is all zero
    Unused,
    /// Type GUID present
    Used(RawEntry),
    /// Slot is too short to hold the LBA fields
    Malformed,
}

/// Decode one partition entry
///
/// Only the type GUID decides whether a slot is in use; other fields of an
/// unused slot are ignored even when non-zero. Fields past the end of a short
/// entry read as zero (attributes) or are clipped (name).
pub fn decode_entry(entry: &[u8]) -> EntrySlot {
    let Some(type_guid) = array_at::<16>(entry, entry_offset::TYPE_GUID) else {
        return EntrySlot::Malformed;
    };

    if type_guid.iter().all(|&b| b == 0) {
        return EntrySlot::Unused;
    }

    let (Some(start_lba), Some(end_lba)) = (
        u64_le_at(entry, entry_offset::START_LBA),
        u64_le_at(entry, entry_offset::END_LBA),
    ) else {
        return EntrySlot::Malformed;
    };

    let name_field = entry
        .get(entry_offset::NAME..)
        .map(|rest| &rest[..rest.len().min(NAME_LENGTH)])
        .unwrap_or(&[]);

    EntrySlot::Used(RawEntry {
        type_guid,
        unique_guid: array_at(entry, entry_offset::UNIQUE_GUID).unwrap_or([0; 16]),
        start_lba,
        end_lba,
        attributes: u64_le_at(entry, entry_offset::ATTRIBUTES).unwrap_or(0),
        name: decode_name(name_field),
    })
}

/// Decode a partition name using the ASCII subset of UTF-16LE
///
/// Scanning stops at the first 0x0000 code unit. Code units whose high byte is
/// zero and whose low byte is printable ASCII (0x20..=0x7E) are kept; every
/// other unit, including surrogates and non-ASCII characters, is dropped. An
/// odd trailing byte is ignored. An empty result becomes "Unnamed".
pub fn decode_name(field: &[u8]) -> String {
    let name: String = field
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .take_while(|&unit| unit != (0, 0))
        .filter(|&(low, high)| high == 0 && (0x20..=0x7E).contains(&low))
        .map(|(low, _)| low as char)
        .collect();

    if name.is_empty() {
        UNNAMED.to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{gpt_header_image, LINUX_FILESYSTEM_GUID};

    fn utf16(s: &str) -> Vec<u8> {
        s.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
    }

    fn entry_bytes() -> Vec<u8> {
        let mut entry = vec![0u8; 128];
        entry[..16].copy_from_slice(&LINUX_FILESYSTEM_GUID);
        entry[32..40].copy_from_slice(&100u64.to_le_bytes());
        entry[40..48].copy_from_slice(&199u64.to_le_bytes());
        entry[48..56].copy_from_slice(&(1u64 << 63).to_le_bytes());
        let name = utf16("Test");
        entry[56..56 + name.len()].copy_from_slice(&name);
        entry
    }

    #[test]
    fn test_decode_header() {
        let image = gpt_header_image(2, 128, 128);
        let header = decode_header(&image[512..1024]).unwrap();

        assert_eq!(&header.signature, SIGNATURE);
        assert_eq!(header.revision.to_string(), "1.0");
        assert_eq!(header.header_size, 92);
        assert_eq!(header.current_lba, 1);
        assert_eq!(header.first_usable_lba, 34);
        assert_eq!(header.disk_guid, [0x11; 16]);
        assert_eq!(header.partition_table_lba, 2);
        assert_eq!(header.partition_count, 128);
        assert_eq!(header.entry_size, 128);
    }

    #[test]
    fn test_gpt_header_signature_validation() {
        let mut header_bytes = vec![0u8; HEADER_SIZE];
        assert!(decode_header(&header_bytes).is_none());

        header_bytes[0..8].copy_from_slice(b"EFI PART");
        assert!(decode_header(&header_bytes).is_some());

        // Signature alone is not enough without the full header
        assert!(decode_header(b"EFI PART").is_none());
    }

    #[test]
    fn test_decode_entry() {
        let EntrySlot::Used(entry) = decode_entry(&entry_bytes()) else {
            panic!("expected used entry");
        };

        assert_eq!(entry.type_guid, LINUX_FILESYSTEM_GUID);
        assert_eq!(entry.start_lba, 100);
        assert_eq!(entry.end_lba, 199);
        assert_eq!(entry.attributes, 1 << 63);
        assert_eq!(entry.name, "Test");
    }

    #[test]
    fn test_unused_entry_ignores_other_fields() {
        let mut entry = entry_bytes();
        entry[..16].fill(0);
        assert_eq!(decode_entry(&entry), EntrySlot::Unused);
    }

    #[test]
    fn test_short_entries() {
        let entry = entry_bytes();
        assert_eq!(decode_entry(&entry[..40]), EntrySlot::Malformed);
        assert_eq!(decode_entry(&entry[..8]), EntrySlot::Malformed);

        // 48 bytes: both LBAs, no attributes, no name
        let EntrySlot::Used(short) = decode_entry(&entry[..48]) else {
            panic!("expected used entry");
        };
        assert_eq!(short.attributes, 0);
        assert_eq!(short.name, UNNAMED);

        // Name clipped to the entry
        let EntrySlot::Used(clipped) = decode_entry(&entry[..60]) else {
            panic!("expected used entry");
        };
        assert_eq!(clipped.name, "Te");
    }

    #[test]
    fn test_decode_name_ascii() {
        assert_eq!(decode_name(&utf16("EFI System Partition")), "EFI System Partition");
    }

    #[test]
    fn test_decode_name_stops_at_null() {
        let mut field = utf16("boot");
        field.extend_from_slice(&[0, 0]);
        field.extend_from_slice(&utf16("junk"));
        assert_eq!(decode_name(&field), "boot");
    }

    #[test]
    fn test_decode_name_drops_non_ascii() {
        assert_eq!(decode_name(&utf16("Daten-Ü-Disk")), "Daten--Disk");
        assert_eq!(decode_name(&utf16("日本語")), UNNAMED);
        // Control characters are dropped too
        assert_eq!(decode_name(&utf16("a\tb")), "ab");
        // A low byte of zero with a non-zero high byte is not a terminator
        assert_eq!(decode_name(&[0x00, 0x01, b'x', 0x00]), "x");
    }

    #[test]
    fn test_decode_name_empty() {
        assert_eq!(decode_name(&[0u8; NAME_LENGTH]), UNNAMED);
        assert_eq!(decode_name(&[]), UNNAMED);
        assert_eq!(decode_name(&[b'a']), UNNAMED);
    }

    #[test]
    fn test_min_entry_size() {
        assert_eq!(MIN_ENTRY_SIZE, 48);
    }
}
