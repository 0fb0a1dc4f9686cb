//! Opening image files as byte sources

use crate::MappedImage;
use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::path::Path;
use zonescan_core::{Result, MAX_CAPTURE_SIZE};

/// Configuration for opening an image
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Use memory mapping for direct action (high performance)
    pub use_mmap: bool,

    /// Upper bound on bytes captured from a stream for one analysis
    pub max_capture: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            use_mmap: true,
            max_capture: MAX_CAPTURE_SIZE,
        }
    }
}

/// An opened disk image
///
/// Either the whole image mapped into memory, or a file handle that is read
/// sector by sector.
pub enum ImageSource {
    /// Memory-mapped image
    Mapped(MappedImage),

    /// Plain file or device stream and its length
    Stream { file: File, length: u64 },
}

impl ImageSource {
    /// Open an image file or raw device
    ///
    /// Only regular files are memory-mapped. Devices are always streamed, with
    /// their length taken from the end of the stream since their metadata
    /// reports zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be opened, sized, or mapped
    pub fn open(path: &Path, config: SourceConfig) -> Result<Self> {
        let mut file = File::open(path)?;
        let is_regular = file.metadata()?.is_file();

        let source = if config.use_mmap && is_regular {
            Self::Mapped(MappedImage::from_file(&file)?)
        } else {
            let length = file.seek(SeekFrom::End(0))?;
            file.rewind()?;
            Self::Stream { file, length }
        };
        let length = source.len();

        tracing::debug!(path = %path.display(), kind = source.identify(), length, "opened image");
        Ok(source)
    }

    /// Human-readable kind of source
    pub fn identify(&self) -> &str {
        match self {
            Self::Mapped(_) => "Memory-mapped image",
            Self::Stream { .. } => "Streamed image",
        }
    }

    /// Total size of the image in bytes
    pub fn len(&self) -> u64 {
        match self {
            Self::Mapped(image) => image.len(),
            Self::Stream { length, .. } => *length,
        }
    }

    /// Check if the image is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
