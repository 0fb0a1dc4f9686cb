//! # zonescan Zones
//!
//! Partition table decoding for zonescan.
//!
//! One pure decoder shared by every host shell:
//! - **detect**: boot signature check and MBR/GPT classification
//! - **mbr**: the four primary MBR entries and the partition type catalog
//! - **gpt**: GPT header and partition entry array, with truncation handling
//! - **analyze**: assembles an [`AnalysisReport`](zonescan_core::AnalysisReport)
//! - **source**: captures just enough of a stream to decode it
//! - **view**: the JSON shape handed to external callers
//!
//! ## Example
//!
//! ```rust,no_run
//! use zonescan_zones::analyze;
//!
//! let bytes = std::fs::read("disk.img").unwrap();
//! let report = analyze(&bytes, "disk.img");
//!
//! if let Some(kind) = report.table_kind() {
//!     println!("Partition table: {}", kind);
//! }
//! for advisory in report.advisories() {
//!     println!("  {}", advisory);
//! }
//! ```

pub mod analyze;
pub mod detect;
pub mod field;
pub mod gpt;
pub mod mbr;
pub mod source;
pub mod view;

pub use analyze::analyze;
pub use detect::detect;
pub use gpt::{read_gpt, GptOutcome};
pub use mbr::{read_mbr, MbrTable};
pub use source::{analyze_stream, capture_prefix};
pub use view::{AnalysisResult, PartitionInfo};

#[cfg(test)]
pub(crate) mod testutil;
