//! GPT (GUID Partition Table) partition table implementation

pub mod types;

use types::{decode_entry, decode_header, EntrySlot, MIN_ENTRY_SIZE};
use zonescan_core::{
    AdvisoryKind, AdvisoryRecord, GptHeaderInfo, GptPartitionRecord, ReportEntry, SECTOR_SIZE,
};

/// Bytes needed before the GPT header can be read (LBA 0 and LBA 1)
pub const MIN_HEADER_BYTES: u64 = 2 * SECTOR_SIZE;

/// Entries produced by the GPT reader
///
/// `entries` holds partition records, advisories, or a mix of both. It is
/// never empty: a table with no usable partition yields one advisory.
#[derive(Debug, Clone, PartialEq)]
pub struct GptOutcome {
    /// Decoded header, when LBA 1 was present and signed
    pub header: Option<GptHeaderInfo>,

    /// Records and advisories in scan order
    pub entries: Vec<ReportEntry>,
}

impl GptOutcome {
    fn advisory(header: Option<GptHeaderInfo>, advisory: AdvisoryRecord) -> Self {
        tracing::info!(kind = ?advisory.kind, info = %advisory.info, "GPT advisory");
        Self {
            header,
            entries: vec![ReportEntry::Advisory(advisory)],
        }
    }
}

/// Read the GPT behind a protective MBR
///
/// The layout read is:
///
/// ```text
/// LBA 0:    Protective MBR (already validated by the caller)
/// LBA 1:    Primary GPT header
/// LBA N+:   Partition entry array (N from the header, usually 2)
/// ```
///
/// Short or inconsistent input never fails: it is reported as advisory
/// entries so a caller holding a partial image can decide to fetch more.
pub fn read_gpt(bytes: &[u8]) -> GptOutcome {
    let available = bytes.len() as u64;

    if available < MIN_HEADER_BYTES {
        return GptOutcome::advisory(
            None,
            AdvisoryRecord::new(
                AdvisoryKind::InsufficientHeaderData,
                "GPT detected but insufficient data",
                format!(
                    "Need at least {} bytes of data to read GPT header",
                    MIN_HEADER_BYTES
                ),
            )
            .with_required_bytes(MIN_HEADER_BYTES),
        );
    }

    let header_sector = &bytes[SECTOR_SIZE as usize..MIN_HEADER_BYTES as usize];
    let header = match decode_header(header_sector) {
        Some(header) => header,
        None => {
            return GptOutcome::advisory(
                None,
                AdvisoryRecord::new(
                    AdvisoryKind::InvalidGptSignature,
                    "Invalid GPT signature in header",
                    "GPT structure may be corrupted",
                ),
            );
        }
    };

    tracing::debug!(
        revision = %header.revision,
        table_lba = header.partition_table_lba,
        count = header.partition_count,
        entry_size = header.entry_size,
        "decoded GPT header"
    );

    let required = header.required_bytes();
    let table_offset = header.table_offset();
    let (Some(required), Some(table_offset)) = (required.filter(|&r| r <= available), table_offset)
    else {
        let note = match required {
            Some(required) => format!(
                "Need at least {} bytes to read all partition entries",
                required
            ),
            None => "Partition table location exceeds the addressable range".to_string(),
        };
        let mut advisory = AdvisoryRecord::new(
            AdvisoryKind::TruncatedPartitionTable,
            format!(
                "GPT detected (Rev {}, {} partitions)",
                header.revision, header.partition_count
            ),
            note,
        );
        advisory.required_bytes = required;
        return GptOutcome::advisory(Some(header), advisory);
    };

    if header.partition_count > 0 && header.entry_size < MIN_ENTRY_SIZE {
        let advisory = AdvisoryRecord::new(
            AdvisoryKind::MalformedEntryLayout,
            format!("GPT detected (Rev {})", header.revision),
            format!(
                "Partition entry size {} is smaller than the minimum {} bytes",
                header.entry_size, MIN_ENTRY_SIZE
            ),
        );
        return GptOutcome::advisory(Some(header), advisory);
    }

    // Both bounds were checked against `available` above
    let table = &bytes[table_offset as usize..required as usize];
    let mut entries = scan_entries(table, &header);

    if entries.iter().any(ReportEntry::is_partition) {
        return GptOutcome {
            header: Some(header),
            entries,
        };
    }

    let advisory = AdvisoryRecord::new(
        AdvisoryKind::NoPartitions,
        format!("GPT structure valid (Rev {})", header.revision),
        "No active partitions found in partition table",
    );
    tracing::info!(kind = ?advisory.kind, "GPT advisory");
    entries.push(ReportEntry::Advisory(advisory));

    GptOutcome {
        header: Some(header),
        entries,
    }
}

/// Walk the entry array, numbering in-use entries from 1 in scan order
fn scan_entries(table: &[u8], header: &GptHeaderInfo) -> Vec<ReportEntry> {
    let mut entries = Vec::new();
    if header.partition_count == 0 {
        return entries;
    }

    let mut number = 0u32;
    for (slot, entry) in table.chunks_exact(header.entry_size as usize).enumerate() {
        let slot = slot as u32;
        let raw = match decode_entry(entry) {
            EntrySlot::Unused => continue,
            EntrySlot::Used(raw) => raw,
            // Entry size was validated, so a short slot cannot occur here
            EntrySlot::Malformed => continue,
        };

        if raw.end_lba < raw.start_lba {
            tracing::warn!(slot, start = raw.start_lba, end = raw.end_lba, "GPT entry ends before it starts");
            entries.push(ReportEntry::Advisory(AdvisoryRecord::new(
                AdvisoryKind::InvalidExtent,
                format!("Invalid partition extent in slot {}", slot),
                format!(
                    "End LBA {} is before start LBA {}",
                    raw.end_lba, raw.start_lba
                ),
            )));
            continue;
        }

        number += 1;
        entries.push(ReportEntry::Gpt(GptPartitionRecord {
            number,
            slot,
            type_guid: raw.type_guid,
            unique_guid: raw.unique_guid,
            start_lba: raw.start_lba,
            end_lba: raw.end_lba,
            attributes: raw.attributes,
            name: raw.name,
        }));
    }

    entries
}

/// Bytes a stream reader must capture so [`read_gpt`] can see the whole table
///
/// Returns `None` when `bytes` does not yet hold a signed GPT header, or when
/// the header describes a table past the addressable range.
pub fn required_capture(bytes: &[u8]) -> Option<u64> {
    let header_sector = bytes.get(SECTOR_SIZE as usize..MIN_HEADER_BYTES as usize)?;
    decode_header(header_sector)?.required_bytes()
}
