//! Structured error types for ptdecode
//!
//! Using thiserror for automatic Display implementation and error chaining.
//! File-level failures end the run; line-level failures are reported and the
//! offending line is skipped.

use super::types::Pid;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("cannot read {}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("process {0} not found\n\nIs the process still running?")]
    ProcessNotFound(Pid),

    #[error(
        "cannot read memory maps of {pid}\n\n\
         This usually means:\n\
         - The process exited while we were looking at it\n\
         - Permission denied (run as the same user, or with sudo)\n\
         - /proc is not mounted"
    )]
    MapsUnreadable {
        pid: Pid,
        #[source]
        source: std::io::Error,
    },
}

impl DecodeError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DecodeError::FileAccess { path: path.into(), source }
    }
}

/// Why a single memory-map line did not match the listing grammar
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("missing {0} field")]
    MissingField(&'static str),

    #[error("address range {0:?} is not <hex>-<hex>")]
    MalformedRange(String),

    #[error("device {0:?} is not <hex>:<hex>")]
    MalformedDevice(String),

    #[error("{field} {value:?} is not lowercase hex")]
    InvalidHex { field: &'static str, value: String },

    #[error("inode {0:?} is not a decimal number")]
    InvalidDecimal(String),

    #[error("region end 0x{end:x} lies below start 0x{start:x}")]
    InvertedRange { start: u64, end: u64 },

    #[error("{0} field is not valid UTF-8")]
    NonUtf8(&'static str),
}

/// Why a line of translated output could not be read back as a record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("record has no tab-separated path field")]
    MissingPath,

    #[error("record path {0:?} is not absolute")]
    RelativePath(String),

    #[error("expected 6 space-separated fields before the path, found {0}")]
    FieldCount(usize),

    #[error("unexpected marker {0:?} (expected \"1\")")]
    BadMarker(String),

    #[error("{field} {value:?} is not hex")]
    InvalidHex { field: &'static str, value: String },

    #[error("record columns are not valid UTF-8")]
    NonUtf8,

    #[error("region 0x{start:x} + 0x{len:x} runs past the end of the address space")]
    RangeOverflow { start: u64, len: u64 },
}
