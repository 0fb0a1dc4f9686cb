//! Terminal rendering of analysis reports

use std::io::{self, Write};
use zonescan_core::{AnalysisReport, GptPartitionRecord, MbrPartitionRecord, ReportEntry, TableKind};
use zonescan_zones::view::{format_disk_signature, format_guid, format_type_code, status_label, AnalysisResult};

/// Display switches for the table view
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Print the type and unique GUID under each GPT row
    pub show_guids: bool,
}

/// Write the human-readable report
///
/// Hard failures are not rendered here; the caller reports them as errors.
pub fn write_report<W: Write>(out: &mut W, report: &AnalysisReport, options: RenderOptions) -> io::Result<()> {
    writeln!(out, "Disk Image: {}", report.label())?;
    writeln!(out, "{}", "=".repeat(report.label().chars().count() + 12))?;

    let Some(kind) = report.table_kind() else {
        return Ok(());
    };

    writeln!(out, "Partition Table Type: {}", kind)?;
    if let Some(signature) = report.disk_signature() {
        writeln!(out, "Disk Signature: {}", format_disk_signature(signature))?;
    }
    if let Some(header) = report.gpt_header() {
        writeln!(out, "GPT Revision: {}", header.revision)?;
        writeln!(out, "Number of Partitions: {}", header.partition_count)?;
    }

    writeln!(out)?;
    writeln!(out, "Partitions:")?;

    if report.partition_count() == 0 {
        writeln!(out, "No partitions found")?;
    } else {
        match kind {
            TableKind::Mbr => {
                writeln!(
                    out,
                    "{:<4} {:<8} {:<12} {:<12} {:<12} {}",
                    "#", "Status", "Type", "Start LBA", "Size (GB)", "Description"
                )?;
                writeln!(out, "{}", "-".repeat(70))?;
            }
            TableKind::Gpt => {
                writeln!(
                    out,
                    "{:<4} {:<12} {:<12} {:<12} {}",
                    "#", "Start LBA", "End LBA", "Size (GB)", "Name"
                )?;
                writeln!(out, "{}", "-".repeat(60))?;
            }
        }

        for entry in report.partitions() {
            match entry {
                ReportEntry::Mbr(record) => write_mbr_row(out, record)?,
                ReportEntry::Gpt(record) => write_gpt_row(out, record, options)?,
                ReportEntry::Advisory(_) => {}
            }
        }
    }

    for advisory in report.advisories() {
        writeln!(out, "Note: {}", advisory)?;
    }

    Ok(())
}

fn write_mbr_row<W: Write>(out: &mut W, record: &MbrPartitionRecord) -> io::Result<()> {
    writeln!(
        out,
        "{:<4} {:<8} {:<12} {:<12} {:<12.2} {}",
        record.slot,
        status_label(record.active),
        format_type_code(record.type_code),
        record.start_lba,
        record.size_gb(),
        record.description
    )
}

fn write_gpt_row<W: Write>(out: &mut W, record: &GptPartitionRecord, options: RenderOptions) -> io::Result<()> {
    writeln!(
        out,
        "{:<4} {:<12} {:<12} {:<12.2} {}",
        record.number,
        record.start_lba,
        record.end_lba,
        record.size_gb(),
        record.name
    )?;

    if options.show_guids {
        writeln!(out, "     Type GUID:   {}", format_guid(&record.type_guid))?;
        writeln!(out, "     Unique GUID: {}", format_guid(&record.unique_guid))?;
    }

    Ok(())
}

/// Write the JSON view, pretty-printed
pub fn write_json<W: Write>(out: &mut W, report: &AnalysisReport) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &AnalysisResult::from(report))?;
    writeln!(out)
}
