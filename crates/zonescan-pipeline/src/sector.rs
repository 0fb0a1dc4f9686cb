//! Sector-addressed reads over a seekable stream

use std::io::{self, Read, Seek, SeekFrom};
use zonescan_core::{
    checked_add_u64, checked_multiply_u64, validate_allocation_size, MAX_ALLOCATION_SIZE, SECTOR_SIZE,
};

fn to_io(e: zonescan_core::Error) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
}

/// Reads whole sectors or byte ranges from a stream.
///
/// Reads stop quietly at end of stream: asking for more than is there returns
/// the bytes that exist. Partial images are ordinary input, so a short read is
/// left for the decoder to report.
///
/// # Example
///
/// ```rust
/// use zonescan_pipeline::SectorReader;
/// use std::io::Cursor;
///
/// let mut reader = SectorReader::new(Cursor::new(vec![0u8; 700]));
/// let lba1 = reader.read_sectors(1, 1).unwrap();
/// assert_eq!(lba1.len(), 188);
/// ```
pub struct SectorReader<R: Read + Seek> {
    inner: R,
}

impl<R: Read + Seek> SectorReader<R> {
    /// Wrap a stream
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Read up to `len` bytes starting at `offset`
    pub fn read_range(&mut self, offset: u64, len: u64) -> io::Result<Vec<u8>> {
        checked_add_u64(offset, len, "sector read end").map_err(to_io)?;
        let len = validate_allocation_size(len, MAX_ALLOCATION_SIZE, "sector read").map_err(to_io)?;

        self.inner.seek(SeekFrom::Start(offset))?;

        let mut buf = Vec::with_capacity(len);
        (&mut self.inner).take(len as u64).read_to_end(&mut buf)?;

        tracing::trace!(offset, requested = len, read = buf.len(), "sector read");
        Ok(buf)
    }

    /// Read up to `count` sectors starting at `lba`
    pub fn read_sectors(&mut self, lba: u64, count: u64) -> io::Result<Vec<u8>> {
        let offset = checked_multiply_u64(lba, SECTOR_SIZE, "sector offset").map_err(to_io)?;
        let len = checked_multiply_u64(count, SECTOR_SIZE, "sector count").map_err(to_io)?;
        self.read_range(offset, len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn numbered(len: usize) -> Vec<u8> {
        (0u8..=255).cycle().take(len).collect()
    }

    #[test]
    fn test_read_full_sectors() {
        let data = numbered(2048);
        let mut reader = SectorReader::new(Cursor::new(data.clone()));

        let sector = reader.read_sectors(1, 2).unwrap();
        assert_eq!(sector.len(), 1024);
        assert_eq!(&sector[..], &data[512..1536]);
    }

    #[test]
    fn test_short_read_at_end() {
        let data = numbered(600);
        let mut reader = SectorReader::new(Cursor::new(data.clone()));

        let sector = reader.read_sectors(1, 1).unwrap();
        assert_eq!(sector.len(), 88);
        assert_eq!(&sector[..], &data[512..]);
    }

    #[test]
    fn test_read_past_end_is_empty() {
        let mut reader = SectorReader::new(Cursor::new(numbered(512)));
        assert!(reader.read_range(4096, 512).unwrap().is_empty());
    }

    #[test]
    fn test_read_range() {
        let data = numbered(1024);
        let mut reader = SectorReader::new(Cursor::new(data.clone()));
        assert_eq!(reader.read_range(510, 2).unwrap(), vec![data[510], data[511]]);
    }

    #[test]
    fn test_oversized_request_rejected() {
        let mut reader = SectorReader::new(Cursor::new(numbered(512)));
        let err = reader.read_range(0, MAX_ALLOCATION_SIZE as u64 + 1).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(reader.read_sectors(u64::MAX, 1).is_err());
        assert!(reader.read_range(u64::MAX - 10, 512).is_err());
    }
}
