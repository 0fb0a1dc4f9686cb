//! Memory-mapped image access

use memmap2::Mmap;
use std::fs::File;
use std::io;
use std::path::Path;
use zonescan_core::MAX_MMAP_SIZE;

/// A disk image mapped read-only into memory.
///
/// The whole image is exposed as one byte slice, so the decoder can run over it
/// without any reads or copies.
///
/// # Example
///
/// ```rust,no_run
/// use zonescan_pipeline::MappedImage;
/// use std::path::Path;
///
/// let image = MappedImage::open(Path::new("disk.img")).unwrap();
/// assert!(image.bytes().len() as u64 == image.len());
/// ```
pub struct MappedImage {
    mmap: Mmap,
}

impl MappedImage {
    /// Map a file by path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, is not a regular file,
    /// exceeds [`MAX_MMAP_SIZE`], or cannot be mapped.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        Self::from_file(&file)
    }

    /// Map an already opened file
    ///
    /// # Safety
    ///
    /// Uses `unsafe` for memory mapping because:
    /// - The OS guarantees memory safety for valid file descriptors
    /// - We validate the file is a regular file before mapping
    /// - The mapping is read-only
    /// - File must not be truncated during access (caller responsibility)
    pub fn from_file(file: &File) -> io::Result<Self> {
        let metadata = file.metadata()?;

        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Only regular files can be memory-mapped",
            ));
        }

        if metadata.len() > MAX_MMAP_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "File size {} exceeds memory mapping limit {} (16 GB)",
                    metadata.len(),
                    MAX_MMAP_SIZE
                ),
            ));
        }

        // SAFETY: regular file, bounded size, valid descriptor, read-only map.
        let mmap = unsafe { Mmap::map(file)? };

        tracing::debug!(bytes = mmap.len(), "mapped image");

        Ok(Self { mmap })
    }

    /// Length of the mapped image in bytes
    pub fn len(&self) -> u64 {
        self.mmap.len() as u64
    }

    /// Check if the mapped image is empty
    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }

    /// The whole image
    pub fn bytes(&self) -> &[u8] {
        &self.mmap
    }

    /// At most the first `max` bytes of the image
    pub fn prefix(&self, max: u64) -> &[u8] {
        let end = usize::try_from(max).unwrap_or(usize::MAX).min(self.mmap.len());
        &self.mmap[..end]
    }
}
