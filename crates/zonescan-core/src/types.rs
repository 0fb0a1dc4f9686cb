//! Report types produced by a zone table analysis

use crate::security::multiply_u32_to_u64;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sector size used for every LBA in MBR and GPT tables
pub const SECTOR_SIZE: u64 = 512;

/// Bytes in one binary gigabyte (2^30)
pub const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Partition table scheme found on an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    /// Master Boot Record
    Mbr,
    /// GUID Partition Table behind a protective MBR
    Gpt,
}

impl TableKind {
    /// Short name used by both shells ("MBR" or "GPT")
    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Mbr => "MBR",
            TableKind::Gpt => "GPT",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A primary MBR partition entry with a non-zero type byte
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MbrPartitionRecord {
    /// 1-based slot in the MBR table (1..=4); empty slots keep their number
    pub slot: u8,

    /// Status byte was 0x80
    pub active: bool,

    /// Raw partition type byte
    pub type_code: u8,

    /// First sector of the partition
    pub start_lba: u32,

    /// Length in sectors
    pub sectors: u32,

    /// Description from the partition type catalog, "Unknown" when unmapped
    pub description: String,
}

impl MbrPartitionRecord {
    /// Size of the partition in bytes
    pub fn size_bytes(&self) -> u64 {
        self.sectors as u64 * SECTOR_SIZE
    }

    /// Size of the partition in binary gigabytes
    pub fn size_gb(&self) -> f64 {
        self.size_bytes() as f64 / BYTES_PER_GIB
    }
}

/// GPT revision, packed on disk as major (high 16 bits) and minor (low 16 bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GptRevision {
    pub major: u16,
    pub minor: u16,
}

impl GptRevision {
    /// Unpack the on-disk revision field
    pub fn from_raw(raw: u32) -> Self {
        Self {
            major: (raw >> 16) as u16,
            minor: (raw & 0xFFFF) as u16,
        }
    }
}

impl fmt::Display for GptRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Decoded primary GPT header (LBA 1)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GptHeaderInfo {
    /// Header signature ("EFI PART")
    pub signature: [u8; 8],
    /// GPT revision (usually 1.0)
    pub revision: GptRevision,
    /// Header size in bytes (usually 92)
    pub header_size: u32,
    /// Location of this header
    pub current_lba: u64,
    /// Location of the backup header
    pub backup_lba: u64,
    /// First usable LBA for partitions
    pub first_usable_lba: u64,
    /// Last usable LBA for partitions
    pub last_usable_lba: u64,
    /// Disk GUID (mixed-endian on disk)
    pub disk_guid: [u8; 16],
    /// Starting LBA of the partition entry array
    pub partition_table_lba: u64,
    /// Number of entries in the array
    pub partition_count: u32,
    /// Size of one entry in bytes
    pub entry_size: u32,
}

impl GptHeaderInfo {
    /// Byte offset of the partition entry array, `None` on overflow
    pub fn table_offset(&self) -> Option<u64> {
        self.partition_table_lba.checked_mul(SECTOR_SIZE)
    }

    /// Byte length of the full partition entry array
    pub fn table_length(&self) -> u64 {
        multiply_u32_to_u64(self.partition_count, self.entry_size)
    }

    /// Bytes the source must hold to read every partition entry, `None` on overflow
    pub fn required_bytes(&self) -> Option<u64> {
        self.table_offset()?.checked_add(self.table_length())
    }
}

/// A GPT partition entry with a non-zero type GUID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GptPartitionRecord {
    /// 1-based position among emitted records, in scan order
    pub number: u32,

    /// 0-based raw slot in the entry array
    pub slot: u32,

    /// Partition type GUID; only tested for presence
    pub type_guid: [u8; 16],

    /// Unique partition GUID
    pub unique_guid: [u8; 16],

    /// First LBA (inclusive)
    pub start_lba: u64,

    /// Last LBA (inclusive), never below `start_lba`
    pub end_lba: u64,

    /// Attribute flags
    pub attributes: u64,

    /// ASCII subset of the UTF-16LE name, "Unnamed" when empty
    pub name: String,
}

impl GptPartitionRecord {
    /// Length in sectors, saturating for an entry spanning the whole LBA range
    pub fn sectors(&self) -> u64 {
        (self.end_lba - self.start_lba).saturating_add(1)
    }

    /// Size of the partition in bytes (saturates for absurd extents)
    pub fn size_bytes(&self) -> u64 {
        self.sectors().saturating_mul(SECTOR_SIZE)
    }

    /// Size of the partition in binary gigabytes
    pub fn size_gb(&self) -> f64 {
        self.size_bytes() as f64 / BYTES_PER_GIB
    }
}

/// Why an advisory record was emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdvisoryKind {
    /// Protective MBR found but fewer than two sectors available
    InsufficientHeaderData,
    /// LBA 1 does not start with "EFI PART"
    InvalidGptSignature,
    /// Header is valid but the entry array extends past the available data
    TruncatedPartitionTable,
    /// Header is valid but every entry is unused
    NoPartitions,
    /// Entry size too small to hold the LBA fields
    MalformedEntryLayout,
    /// An in-use entry ends before it starts
    InvalidExtent,
}

/// Non-fatal note describing why full partition data could not be produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryRecord {
    pub kind: AdvisoryKind,

    /// Headline, e.g. "GPT detected but insufficient data"
    pub info: String,

    /// Detail for the caller
    pub note: String,

    /// Byte count the source must reach for a complete read, when known
    pub required_bytes: Option<u64>,
}

impl AdvisoryRecord {
    /// Create an advisory without a byte requirement
    pub fn new(kind: AdvisoryKind, info: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            kind,
            info: info.into(),
            note: note.into(),
            required_bytes: None,
        }
    }

    /// Attach the byte count needed to complete the read
    pub fn with_required_bytes(mut self, required: u64) -> Self {
        self.required_bytes = Some(required);
        self
    }
}

impl fmt::Display for AdvisoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.info, self.note)
    }
}

/// One line of an analysis report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReportEntry {
    Mbr(MbrPartitionRecord),
    Gpt(GptPartitionRecord),
    Advisory(AdvisoryRecord),
}

impl ReportEntry {
    /// True for MBR and GPT partition records
    pub fn is_partition(&self) -> bool {
        !matches!(self, ReportEntry::Advisory(_))
    }

    /// Borrow the advisory, if this entry is one
    pub fn as_advisory(&self) -> Option<&AdvisoryRecord> {
        match self {
            ReportEntry::Advisory(advisory) => Some(advisory),
            _ => None,
        }
    }
}

/// Result of analysing one disk image
///
/// Built once by the decoder and never mutated afterwards. Hard failures carry
/// an error string and no table kind; everything else is a successful report
/// whose entries may include advisories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    label: String,
    table_kind: Option<TableKind>,
    entries: Vec<ReportEntry>,
    gpt_header: Option<GptHeaderInfo>,
    disk_signature: Option<u32>,
    error: Option<String>,
    bytes_examined: u64,
}

impl AnalysisReport {
    /// Create a report for a successfully classified image
    pub fn success(
        label: impl Into<String>,
        table_kind: TableKind,
        entries: Vec<ReportEntry>,
        gpt_header: Option<GptHeaderInfo>,
        bytes_examined: u64,
    ) -> Self {
        Self {
            label: label.into(),
            table_kind: Some(table_kind),
            entries,
            gpt_header,
            disk_signature: None,
            error: None,
            bytes_examined,
        }
    }

    /// Create a report for an analysis that aborted
    pub fn failure(label: impl Into<String>, error: impl fmt::Display, bytes_examined: u64) -> Self {
        Self {
            label: label.into(),
            table_kind: None,
            entries: Vec::new(),
            gpt_header: None,
            disk_signature: None,
            error: Some(error.to_string()),
            bytes_examined,
        }
    }

    /// Attach the MBR disk signature (offset 0x1B8)
    pub fn with_disk_signature(mut self, signature: u32) -> Self {
        self.disk_signature = Some(signature);
        self
    }

    /// Caller supplied label (usually the file name)
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Detected table kind, `None` on hard failure
    pub fn table_kind(&self) -> Option<TableKind> {
        self.table_kind
    }

    /// All entries in scan order
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Decoded GPT header, when one was read
    pub fn gpt_header(&self) -> Option<&GptHeaderInfo> {
        self.gpt_header.as_ref()
    }

    /// MBR disk signature, present for MBR reports
    pub fn disk_signature(&self) -> Option<u32> {
        self.disk_signature
    }

    /// Hard failure message
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Number of source bytes the decoder had available
    pub fn bytes_examined(&self) -> u64 {
        self.bytes_examined
    }

    /// True unless the analysis aborted
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Partition records, skipping advisories
    pub fn partitions(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| e.is_partition())
    }

    /// Advisory records only
    pub fn advisories(&self) -> impl Iterator<Item = &AdvisoryRecord> {
        self.entries.iter().filter_map(ReportEntry::as_advisory)
    }

    /// Number of partition records
    pub fn partition_count(&self) -> usize {
        self.partitions().count()
    }
}
