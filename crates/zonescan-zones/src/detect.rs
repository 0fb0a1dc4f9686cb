//! Partition table detection from the first sector

use crate::field::{u16_le_at, u8_at};
use crate::mbr::types::MbrPartitionType;
use zonescan_core::{Error, Result, TableKind, SECTOR_SIZE};

/// Boot signature required at offset 0x1FE
pub const BOOT_SIGNATURE: u16 = 0xAA55;

/// Offset of the boot signature
pub const BOOT_SIGNATURE_OFFSET: usize = 0x1FE;

/// Offset of the type byte of the first MBR entry (0x1BE + 4)
pub const FIRST_ENTRY_TYPE_OFFSET: usize = 0x1BE + 4;

/// Borrow the boot sector after checking its length and signature
///
/// # Errors
///
/// - [`Error::TooSmall`] when fewer than 512 bytes are available
/// - [`Error::InvalidBootSignature`] when bytes 510..512 are not 0xAA55
pub fn boot_sector(bytes: &[u8]) -> Result<&[u8; 512]> {
    let sector: &[u8; 512] = bytes
        .get(..SECTOR_SIZE as usize)
        .and_then(|s| s.try_into().ok())
        .ok_or(Error::TooSmall {
            needed: SECTOR_SIZE,
            available: bytes.len() as u64,
        })?;

    let found = u16_le_at(sector, BOOT_SIGNATURE_OFFSET).unwrap_or(0);
    if found != BOOT_SIGNATURE {
        return Err(Error::InvalidBootSignature { found });
    }

    Ok(sector)
}

/// Classify an image as MBR or GPT
///
/// A valid boot sector whose first entry has type 0xEE is a protective MBR, so
/// the real table is a GPT at LBA 1. Anything else is read as a plain MBR.
pub fn detect(bytes: &[u8]) -> Result<TableKind> {
    boot_sector(bytes).map(classify)
}

/// Classify an already validated boot sector
pub fn classify(sector: &[u8; 512]) -> TableKind {
    let first_type = u8_at(sector, FIRST_ENTRY_TYPE_OFFSET).map(MbrPartitionType);
    let kind = if first_type == Some(MbrPartitionType::GPT_PROTECTIVE) {
        TableKind::Gpt
    } else {
        TableKind::Mbr
    };

    tracing::debug!(%kind, "detected partition table");
    kind
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{boot_sector as blank_sector, set_mbr_slot};

    #[test]
    fn test_detect_mbr() {
        let mut mbr = blank_sector();
        set_mbr_slot(&mut mbr, 1, 0x80, 0x83, 2048, 4096);
        assert_eq!(detect(&mbr).unwrap(), TableKind::Mbr);
    }

    #[test]
    fn test_detect_empty_table_is_mbr() {
        assert_eq!(detect(&blank_sector()).unwrap(), TableKind::Mbr);
    }

    #[test]
    fn test_detect_gpt() {
        let mut mbr = blank_sector();
        mbr[450] = 0xEE;
        assert_eq!(detect(&mbr).unwrap(), TableKind::Gpt);
    }

    #[test]
    fn test_protective_type_only_counts_in_first_slot() {
        let mut mbr = blank_sector();
        set_mbr_slot(&mut mbr, 2, 0x00, 0xEE, 1, 100);
        assert_eq!(detect(&mbr).unwrap(), TableKind::Mbr);
    }

    #[test]
    fn test_every_type_byte_classifies() {
        for code in 0u8..=255 {
            let mut mbr = blank_sector();
            mbr[450] = code;
            let expected = if code == 0xEE { TableKind::Gpt } else { TableKind::Mbr };
            assert_eq!(detect(&mbr).unwrap(), expected);
        }
    }

    #[test]
    fn test_invalid_boot_signature() {
        let mut mbr = blank_sector();
        mbr[0x1FE] = 0x00;
        mbr[450] = 0xEE;

        let err = detect(&mbr).unwrap_err();
        assert!(matches!(err, Error::InvalidBootSignature { found: 0xAA00 }));
    }

    #[test]
    fn test_swapped_signature_bytes() {
        let mut mbr = blank_sector();
        mbr[0x1FE] = 0xAA;
        mbr[0x1FF] = 0x55;
        assert!(matches!(
            detect(&mbr),
            Err(Error::InvalidBootSignature { found: 0x55AA })
        ));
    }

    #[test]
    fn test_too_small() {
        let err = detect(&[0u8; 511]).unwrap_err();
        assert!(matches!(
            err,
            Error::TooSmall {
                needed: 512,
                available: 511
            }
        ));
        assert!(detect(&[]).is_err());
    }

    #[test]
    fn test_extra_bytes_ignored() {
        let mut image = blank_sector();
        image.resize(4096, 0xFF);
        assert_eq!(detect(&image).unwrap(), TableKind::Mbr);
    }
}
