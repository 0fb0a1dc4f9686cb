//! # zonescan Core
//!
//! Core types, error handling and safety helpers shared by every zonescan crate.
//!
//! This crate provides the foundational pieces for partition table analysis:
//! - **Reports**: the immutable [`AnalysisReport`] produced for one disk image
//! - **Records**: MBR and GPT partition records plus advisory records
//! - **Errors**: the hard failures that abort an analysis
//! - **Security**: checked arithmetic and path validation for untrusted input
//!
//! ## Terminology
//!
//! - **Zone** = Partition (segregated storage area)
//! - **Zone table** = Partition table (MBR or GPT)
//! - **Advisory** = Non-fatal note explaining why a zone table could not be read in full
//!
//! ## Example
//!
//! ```rust
//! use zonescan_core::{AnalysisReport, TableKind};
//!
//! let report = AnalysisReport::success("disk.img", TableKind::Mbr, Vec::new(), None, 512);
//! assert!(report.is_success());
//! assert_eq!(report.partition_count(), 0);
//! ```

pub mod error;
pub mod security;
pub mod traits;
pub mod types;

// Re-export commonly used items
pub use error::{Error, Result};
pub use security::*;
pub use traits::ReadSeek;
pub use types::{
    AdvisoryKind, AdvisoryRecord, AnalysisReport, GptHeaderInfo, GptPartitionRecord, GptRevision,
    MbrPartitionRecord, ReportEntry, TableKind, BYTES_PER_GIB, SECTOR_SIZE,
};
