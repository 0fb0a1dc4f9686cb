//! # zonescan Pipeline
//!
//! Byte sources for the zonescan decoder.
//!
//! The decoder itself only ever sees a byte slice. This crate gets one from disk:
//! - **MappedImage**: read-only memory map of an image file (direct action)
//! - **SectorReader**: sector-addressed reads over any `Read + Seek` stream
//! - **ImageSource**: opens a path as one or the other according to [`SourceConfig`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use zonescan_pipeline::{ImageSource, SourceConfig};
//! use std::path::Path;
//!
//! let source = ImageSource::open(Path::new("disk.img"), SourceConfig::default()).unwrap();
//! println!("{} ({} bytes)", source.identify(), source.len());
//! ```

pub mod mmap;
pub mod sector;
pub mod source;

pub use mmap::MappedImage;
pub use sector::SectorReader;
pub use source::{ImageSource, SourceConfig};
