//! JSON view of an analysis report
//!
//! External callers (the web endpoint and `zonescan --json`) receive this
//! flattened shape rather than [`AnalysisReport`] itself. Absent fields are
//! omitted and names are camelCase.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zonescan_core::{AdvisoryRecord, AnalysisReport, GptPartitionRecord, MbrPartitionRecord, ReportEntry};

/// Top-level analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub filename: String,

    /// "MBR", "GPT", or empty on hard failure
    pub table_type: String,

    pub partitions: Vec<PartitionInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpt_revision: Option<String>,

    /// MBR disk signature as `0xNNNNNNNN`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_signature: Option<String>,
}

/// One partition or advisory line
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionInfo {
    pub number: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_code: Option<String>,

    #[serde(rename = "startLBA", default, skip_serializing_if = "Option::is_none")]
    pub start_lba: Option<u64>,

    #[serde(rename = "endLBA", default, skip_serializing_if = "Option::is_none")]
    pub end_lba: Option<u64>,

    #[serde(rename = "sizeGB", default, skip_serializing_if = "Option::is_none")]
    pub size_gb: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<&MbrPartitionRecord> for PartitionInfo {
    fn from(record: &MbrPartitionRecord) -> Self {
        Self {
            number: record.slot as u32,
            status: Some(status_label(record.active).to_string()),
            type_code: Some(format_type_code(record.type_code)),
            start_lba: Some(record.start_lba as u64),
            size_gb: Some(record.size_gb()),
            description: Some(record.description.clone()),
            ..Self::default()
        }
    }
}

impl From<&GptPartitionRecord> for PartitionInfo {
    fn from(record: &GptPartitionRecord) -> Self {
        Self {
            number: record.number,
            start_lba: Some(record.start_lba),
            end_lba: Some(record.end_lba),
            size_gb: Some(record.size_gb()),
            name: Some(record.name.clone()),
            ..Self::default()
        }
    }
}

impl From<&AdvisoryRecord> for PartitionInfo {
    fn from(advisory: &AdvisoryRecord) -> Self {
        Self {
            number: 1,
            info: Some(advisory.info.clone()),
            note: Some(advisory.note.clone()),
            ..Self::default()
        }
    }
}

impl From<&ReportEntry> for PartitionInfo {
    fn from(entry: &ReportEntry) -> Self {
        match entry {
            ReportEntry::Mbr(record) => record.into(),
            ReportEntry::Gpt(record) => record.into(),
            ReportEntry::Advisory(advisory) => advisory.into(),
        }
    }
}

impl From<&AnalysisReport> for AnalysisResult {
    fn from(report: &AnalysisReport) -> Self {
        Self {
            filename: report.label().to_string(),
            table_type: report
                .table_kind()
                .map(|kind| kind.as_str().to_string())
                .unwrap_or_default(),
            partitions: report.entries().iter().map(PartitionInfo::from).collect(),
            error: report.error().map(str::to_string),
            gpt_revision: report.gpt_header().map(|h| h.revision.to_string()),
            disk_signature: report.disk_signature().map(format_disk_signature),
        }
    }
}

/// "Active" for a 0x80 status byte, "Inactive" otherwise
pub fn status_label(active: bool) -> &'static str {
    if active {
        "Active"
    } else {
        "Inactive"
    }
}

/// Format an MBR type byte as `0xNN`
pub fn format_type_code(code: u8) -> String {
    format!("0x{:02X}", code)
}

/// Format an MBR disk signature as `0xNNNNNNNN`
pub fn format_disk_signature(signature: u32) -> String {
    format!("0x{:08X}", signature)
}

/// Format an on-disk (mixed-endian) GUID in its canonical text form
pub fn format_guid(bytes: &[u8; 16]) -> String {
    Uuid::from_bytes_le(*bytes).hyphenated().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyze;
    use crate::testutil::{boot_sector, gpt_image, set_mbr_slot, TestEntry, LINUX_FILESYSTEM_GUID};
    use serde_json::{json, Value};

    #[test]
    fn test_mbr_view() {
        let mut mbr = boot_sector();
        set_mbr_slot(&mut mbr, 3, 0x00, 0x83, 2048, 204_800);

        let result = AnalysisResult::from(&analyze(&mbr, "disk.img"));
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["filename"], "disk.img");
        assert_eq!(value["tableType"], "MBR");
        assert!(value.get("error").is_none());
        assert!(value.get("gptRevision").is_none());
        assert_eq!(value["diskSignature"], "0x00000000");

        let partition = &value["partitions"][0];
        assert_eq!(partition["number"], 3);
        assert_eq!(partition["status"], "Inactive");
        assert_eq!(partition["type"], "0x83");
        assert_eq!(partition["startLBA"], 2048);
        assert_eq!(partition["description"], "Linux");
        assert!((partition["sizeGB"].as_f64().unwrap() - 0.09765625).abs() < 1e-12);
        assert!(partition.get("endLBA").is_none());
        assert!(partition.get("name").is_none());
        assert!(partition.get("info").is_none());
    }

    #[test]
    fn test_gpt_view() {
        let image = gpt_image(2, 128, 128, &[TestEntry::new(4, 34, 2047, "EFI System")]);
        let value = serde_json::to_value(AnalysisResult::from(&analyze(&image, "gpt.img"))).unwrap();

        assert_eq!(value["tableType"], "GPT");
        assert_eq!(value["gptRevision"], "1.0");
        assert!(value.get("diskSignature").is_none());

        let partition = &value["partitions"][0];
        assert_eq!(partition["number"], 1);
        assert_eq!(partition["startLBA"], 34);
        assert_eq!(partition["endLBA"], 2047);
        assert_eq!(partition["name"], "EFI System");
        assert!(partition.get("status").is_none());
        assert!(partition.get("type").is_none());
    }

    #[test]
    fn test_full_range_gpt_entry_view() {
        let image = gpt_image(2, 4, 128, &[TestEntry::new(0, 0, u64::MAX, "whole")]);
        let result = AnalysisResult::from(&analyze(&image, "whole.img"));

        let partition = &result.partitions[0];
        assert_eq!(partition.start_lba, Some(0));
        assert_eq!(partition.end_lba, Some(u64::MAX));
        assert!(partition.size_gb.unwrap() > 1.0e10);
    }

    #[test]
    fn test_advisory_view() {
        let image = gpt_image(2, 128, 128, &[]);
        let value = serde_json::to_value(AnalysisResult::from(&analyze(&image[..512], "short.img"))).unwrap();

        assert_eq!(
            value["partitions"],
            json!([{
                "number": 1,
                "info": "GPT detected but insufficient data",
                "note": "Need at least 1024 bytes of data to read GPT header",
            }])
        );
    }

    #[test]
    fn test_failure_view() {
        let value = serde_json::to_value(AnalysisResult::from(&analyze(&[0u8; 10], "tiny.img"))).unwrap();

        assert_eq!(value["tableType"], "");
        assert_eq!(value["partitions"], json!([]));
        assert!(value["error"].as_str().unwrap().starts_with("Data too small to contain MBR"));
    }

    #[test]
    fn test_view_deserializes() {
        let parsed: AnalysisResult = serde_json::from_value(json!({
            "filename": "x.img",
            "tableType": "GPT",
            "partitions": [{"number": 1, "startLBA": 34, "endLBA": 99, "sizeGB": 0.5, "name": "a"}],
        }))
        .unwrap();

        assert_eq!(parsed.partitions[0].start_lba, Some(34));
        assert_eq!(parsed.partitions[0].status, None);
        assert_eq!(parsed.gpt_revision, None);
        assert!(matches!(serde_json::to_value(&parsed).unwrap(), Value::Object(_)));
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_type_code(0x07), "0x07");
        assert_eq!(format_type_code(0xEE), "0xEE");
        assert_eq!(format_disk_signature(0x7856_3412), "0x78563412");
        assert_eq!(status_label(true), "Active");
        assert_eq!(status_label(false), "Inactive");
        assert_eq!(
            format_guid(&LINUX_FILESYSTEM_GUID),
            "0fc63daf-8483-4772-8e79-3d69d8477de4"
        );
    }
}
