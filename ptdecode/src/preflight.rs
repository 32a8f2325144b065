//! Pre-flight checks for live map capture
//!
//! When `--pid` is given the memory map comes straight from `/proc`.
//! These checks fail early with actionable messages instead of a bare
//! "No such file or directory" from the read itself.

use crate::domain::{DecodeError, Pid};
use std::path::Path;

/// Run all pre-flight checks for reading a live process's map
///
/// # Errors
/// See [`check_process_exists`] and [`check_proc_access`]
pub fn run_preflight_checks(pid: Pid) -> Result<(), DecodeError> {
    check_process_exists(pid)?;
    check_proc_access(pid)
}

/// Check if the target process exists
///
/// # Errors
/// Returns [`DecodeError::ProcessNotFound`] if `/proc/<pid>` is absent
pub fn check_process_exists(pid: Pid) -> Result<(), DecodeError> {
    let proc_path = format!("/proc/{}", pid.0);
    if !Path::new(&proc_path).exists() {
        return Err(DecodeError::ProcessNotFound(pid));
    }
    Ok(())
}

/// Check if we can read the process's memory maps
///
/// # Errors
/// Returns [`DecodeError::MapsUnreadable`] if the maps file cannot be read
pub fn check_proc_access(pid: Pid) -> Result<(), DecodeError> {
    std::fs::File::open(pid.maps_path())
        .map(drop)
        .map_err(|source| DecodeError::MapsUnreadable { pid, source })
}
