//! Bounds-checked little-endian field readers
//!
//! Every fixed-offset field is read through these helpers. A field that does
//! not fit in the buffer reads as `None`; nothing here can index out of range.

/// Borrow `N` bytes at `offset` as an array
pub fn array_at<const N: usize>(bytes: &[u8], offset: usize) -> Option<[u8; N]> {
    let end = offset.checked_add(N)?;
    bytes.get(offset..end)?.try_into().ok()
}

/// Single byte at `offset`
pub fn u8_at(bytes: &[u8], offset: usize) -> Option<u8> {
    bytes.get(offset).copied()
}

/// Little-endian u16 at `offset`
pub fn u16_le_at(bytes: &[u8], offset: usize) -> Option<u16> {
    array_at(bytes, offset).map(u16::from_le_bytes)
}

/// Little-endian u32 at `offset`
pub fn u32_le_at(bytes: &[u8], offset: usize) -> Option<u32> {
    array_at(bytes, offset).map(u32::from_le_bytes)
}

/// Little-endian u64 at `offset`
pub fn u64_le_at(bytes: &[u8], offset: usize) -> Option<u64> {
    array_at(bytes, offset).map(u64::from_le_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_little_endian() {
        let bytes = [0x55, 0xAA, 0x34, 0x12, 0x78, 0x56, 0x00, 0x00, 0x01, 0x00];
        assert_eq!(u16_le_at(&bytes, 0), Some(0xAA55));
        assert_eq!(u32_le_at(&bytes, 2), Some(0x5678_1234));
        assert_eq!(u64_le_at(&bytes, 2), Some(0x0001_0000_5678_1234));
        assert_eq!(u8_at(&bytes, 9), Some(0x00));
    }

    #[test]
    fn test_out_of_range_is_none() {
        let bytes = [0u8; 8];
        assert_eq!(u64_le_at(&bytes, 1), None);
        assert_eq!(u32_le_at(&bytes, 5), None);
        assert_eq!(u8_at(&bytes, 8), None);
        assert_eq!(array_at::<4>(&bytes, usize::MAX), None);
    }

    #[test]
    fn test_array_at() {
        let bytes = *b"xxEFI PARTyy";
        assert_eq!(array_at::<8>(&bytes, 2), Some(*b"EFI PART"));
    }
}
