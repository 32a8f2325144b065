//! Domain types providing compile-time safety and self-documentation
//!
//! These newtype wrappers keep the opaque register value from being confused
//! with the other strings that flow through a decode run (paths, map lines).

use std::fmt;

/// Process ID
///
/// Identifies a live process whose memory map is read from `/proc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pid(pub u32);

impl Pid {
    /// Path of the kernel's memory-map listing for this process
    #[must_use]
    pub fn maps_path(self) -> std::path::PathBuf {
        std::path::PathBuf::from(format!("/proc/{}/maps", self.0))
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PID:{}", self.0)
    }
}

/// Register value stamped into every emitted record
///
/// Usually the CR3 (page-table root) of the traced process, written as hex.
/// The value is never validated or reinterpreted: whatever the caller passed
/// is what the decoder sees.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegisterValue(String);

impl RegisterValue {
    /// Get the register value as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegisterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RegisterValue {
    fn from(s: String) -> Self {
        RegisterValue(s)
    }
}

impl From<&str> for RegisterValue {
    fn from(s: &str) -> Self {
        RegisterValue(s.to_string())
    }
}
