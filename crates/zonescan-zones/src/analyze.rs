//! Report assembly

use crate::detect::{boot_sector, classify};
use crate::gpt::read_gpt;
use crate::mbr::MbrTable;
use zonescan_core::{AnalysisReport, ReportEntry, TableKind};

/// Analyse the partition table at the start of `bytes`
///
/// `label` is opaque and only copied into the report. The result is a pure
/// function of the input: calling this twice on the same bytes gives equal
/// reports. Hard failures (short input, bad boot signature) are returned as a
/// report with `error` set, never as a panic or `Err`.
pub fn analyze(bytes: &[u8], label: &str) -> AnalysisReport {
    let span = tracing::debug_span!("analyze", label, bytes = bytes.len());
    let _guard = span.enter();

    let examined = bytes.len() as u64;

    let sector = match boot_sector(bytes) {
        Ok(sector) => sector,
        Err(e) => {
            tracing::warn!(error = %e, "partition table analysis failed");
            return AnalysisReport::failure(label, e, examined);
        }
    };

    match classify(sector) {
        kind @ TableKind::Mbr => {
            let table = MbrTable::from_sector(sector);
            let disk_signature = table.disk_signature();
            let entries = table.into_records().into_iter().map(ReportEntry::Mbr).collect();
            AnalysisReport::success(label, kind, entries, None, examined).with_disk_signature(disk_signature)
        }
        kind @ TableKind::Gpt => {
            let outcome = read_gpt(bytes);
            AnalysisReport::success(label, kind, outcome.entries, outcome.header, examined)
        }
    }
}
