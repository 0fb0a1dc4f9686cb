//! Decoding straight from a seekable stream
//!
//! A stream is reduced to the prefix the decoder needs, read in at most three
//! steps: LBA 0, then LBA 1 on a protective MBR, then the partition entry array
//! once the header says where it ends. Decoding that prefix gives the same
//! report as decoding the whole image.

use crate::analyze::analyze;
use crate::detect::detect;
use crate::gpt::{required_capture, MIN_HEADER_BYTES};
use std::io::{self, Read, Seek};
use zonescan_core::{AnalysisReport, ReadSeek, TableKind, MAX_ALLOCATION_SIZE};
use zonescan_pipeline::SectorReader;

/// Read the bytes needed to analyse the image behind `stream`
///
/// At most `max_bytes` are captured. A stream that ends early yields a short
/// capture; reporting that is left to the decoder.
pub fn capture_prefix<R: Read + Seek>(stream: R, max_bytes: u64) -> io::Result<Vec<u8>> {
    let limit = max_bytes.min(MAX_ALLOCATION_SIZE as u64);
    let mut reader = SectorReader::new(stream);

    let mut captured = reader.read_sectors(0, 1)?;
    if !matches!(detect(&captured), Ok(TableKind::Gpt)) {
        tracing::debug!(bytes = captured.len(), "captured boot sector only");
        return Ok(captured);
    }

    captured.extend(reader.read_sectors(1, 1)?);
    if (captured.len() as u64) < MIN_HEADER_BYTES {
        return Ok(captured);
    }

    if let Some(required) = required_capture(&captured) {
        let wanted = required.min(limit);
        let have = captured.len() as u64;
        if wanted > have {
            captured.extend(reader.read_range(have, wanted - have)?);
        }
        if required > limit {
            tracing::warn!(required, limit, "partition table larger than capture limit");
        }
    }

    tracing::debug!(bytes = captured.len(), "captured GPT prefix");
    Ok(captured)
}

/// Analyse an image read from a stream
///
/// I/O failures become the report's error, like every other hard failure.
pub fn analyze_stream(stream: &mut dyn ReadSeek, label: &str, max_bytes: u64) -> AnalysisReport {
    match capture_prefix(stream, max_bytes) {
        Ok(captured) => analyze(&captured, label),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read image");
            AnalysisReport::failure(label, zonescan_core::Error::from(e), 0)
        }
    }
}
