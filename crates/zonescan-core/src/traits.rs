//! Core traits for zonescan

use std::io::{Read, Seek};

/// Combined trait for Read + Seek
///
/// Stream shells hand the decoder a `&mut dyn ReadSeek`; it is only ever read from.
pub trait ReadSeek: Read + Seek + Send {}

/// Blanket implementation for any type that implements Read + Seek
impl<T: Read + Seek + Send> ReadSeek for T {}
