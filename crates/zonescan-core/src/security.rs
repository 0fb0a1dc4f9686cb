//! Security validation constants and helpers
//!
//! Partition headers are untrusted input: every size or offset derived from them
//! goes through these helpers before it is used to index or allocate.

use crate::Error;
use std::path::{Path, PathBuf};

/// Maximum number of bytes captured from a stream for one analysis (256 MB)
pub const MAX_CAPTURE_SIZE: u64 = 256 * 1024 * 1024;

/// Maximum allocation size for single buffer (256 MB)
pub const MAX_ALLOCATION_SIZE: usize = 256 * 1024 * 1024;

/// Maximum file size for memory mapping (16 GB - practical limit for most systems)
pub const MAX_MMAP_SIZE: u64 = 16 * 1024 * 1024 * 1024;

/// Validate that a size is within allocation limits
///
/// # Security
/// Prevents memory exhaustion from a header claiming an enormous entry array
pub fn validate_allocation_size(size: u64, limit: usize, context: &str) -> crate::Result<usize> {
    if size > limit as u64 {
        return Err(Error::overflow(format!(
            "{} size {} exceeds limit {}",
            context, size, limit
        )));
    }

    size.try_into()
        .map_err(|_| Error::overflow(format!("{} size exceeds platform limits", context)))
}

/// Safely multiply two u64 values with overflow checking
///
/// # Security
/// Prevents integer overflow in size calculations
pub fn checked_multiply_u64(a: u64, b: u64, context: &str) -> crate::Result<u64> {
    a.checked_mul(b)
        .ok_or_else(|| Error::overflow(format!("{}: multiplication overflow", context)))
}

/// Safely add two u64 values with overflow checking
pub fn checked_add_u64(a: u64, b: u64, context: &str) -> crate::Result<u64> {
    a.checked_add(b)
        .ok_or_else(|| Error::overflow(format!("{}: addition overflow", context)))
}

/// Safely multiply u32 values and return u64
///
/// Two u32 factors always fit in a u64, so this cannot fail.
pub fn multiply_u32_to_u64(a: u32, b: u32) -> u64 {
    (a as u64) * (b as u64)
}

/// Sanitize and validate a file path for safe access
///
/// # Returns
/// Canonical absolute path if valid, error otherwise
pub fn validate_file_path(path: &str) -> crate::Result<PathBuf> {
    if path.is_empty() {
        return Err(Error::not_found("Empty path"));
    }

    if path.contains('\0') {
        return Err(Error::invalid_path("Path contains null byte"));
    }

    if path.chars().any(|c| c.is_control() && c != '\t') {
        return Err(Error::invalid_path(
            "Path contains invalid control characters",
        ));
    }

    // Canonicalize to resolve symlinks
    let canonical = Path::new(path).canonicalize().map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => Error::permission_denied(path.to_string()),
        _ => Error::not_found(format!("Path does not exist or is inaccessible: {}", e)),
    })?;

    let file_type = std::fs::metadata(&canonical)?.file_type();
    if !file_type.is_file() && !is_device(&file_type) {
        return Err(Error::invalid_path(format!(
            "Path is not a regular file or device: {}",
            canonical.display()
        )));
    }

    Ok(canonical)
}

/// Block and character devices hold raw disks
#[cfg(unix)]
fn is_device(file_type: &std::fs::FileType) -> bool {
    use std::os::unix::fs::FileTypeExt;
    file_type.is_block_device() || file_type.is_char_device()
}

#[cfg(not(unix))]
fn is_device(_file_type: &std::fs::FileType) -> bool {
    false
}

/// Replace control characters in a caller supplied label
///
/// Labels are opaque to the decoder but end up in terminal output and JSON.
pub fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_control() { '?' } else { c })
        .take(255)
        .collect()
}
