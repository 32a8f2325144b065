//! Pass-through of the `.ptinfo` capability header
//!
//! The dump writer records the CPU's processor-trace capabilities in
//! `<prefix>.ptinfo`. The decoder expects that block ahead of the region
//! table, byte for byte, so it is never parsed here.

use crate::domain::DecodeError;
use std::fs;
use std::path::Path;

/// Read the info file unchanged
///
/// # Errors
/// Returns [`DecodeError::FileAccess`] naming `path` if it cannot be opened
/// or read
pub fn read_info(path: &Path) -> Result<Vec<u8>, DecodeError> {
    fs::read(path).map_err(|e| DecodeError::file_access(path, e))
}
