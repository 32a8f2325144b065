//! Trace dump file sets
//!
//! A dump is saved as a family of files sharing one prefix
//! (`run1.ptdump`, `run1.ptinfo`, `run1.ptmap`, ...). Decoding reads the
//! info header and the memory map, then writes them out as one stream.

use crate::domain::{DecodeError, Pid, RegisterValue};
use crate::maps::{translate_file, Translation};
use crate::ptinfo::read_info;
use log::info;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const INFO_EXTENSION: &str = "ptinfo";
pub const MAP_EXTENSION: &str = "ptmap";

/// Input files of one decode run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpFiles {
    pub info: PathBuf,
    pub map: PathBuf,
}

impl DumpFiles {
    /// `<prefix>.ptinfo` and `<prefix>.ptmap`
    ///
    /// The extension is appended, never substituted: `run.v2` becomes
    /// `run.v2.ptinfo`.
    #[must_use]
    pub fn from_prefix(prefix: &Path) -> Self {
        Self { info: with_suffix(prefix, INFO_EXTENSION), map: with_suffix(prefix, MAP_EXTENSION) }
    }

    /// Take the memory map from a live process instead of the dump
    #[must_use]
    pub fn with_live_map(self, pid: Pid) -> Self {
        Self { map: pid.maps_path(), ..self }
    }
}

fn with_suffix(prefix: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(prefix.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Fully loaded dump, ready to be written
#[derive(Debug)]
pub struct DecodedDump {
    pub info: Vec<u8>,
    pub translation: Translation,
}

impl DecodedDump {
    /// Read the info header, then read and translate the map
    ///
    /// Both files are read completely before anything is returned, so a
    /// failure leaves nothing half-written downstream.
    ///
    /// # Errors
    /// Returns [`DecodeError::FileAccess`] for the first input that cannot be
    /// read
    pub fn load(files: &DumpFiles, register: &RegisterValue) -> Result<Self, DecodeError> {
        let info = read_info(&files.info)?;
        info!("read {} bytes of trace info from {}", info.len(), files.info.display());

        let translation = translate_file(&files.map, register)?;
        Ok(Self { info, translation })
    }

    /// Write the info header immediately followed by the region records
    ///
    /// # Errors
    /// Returns any error from the underlying writer
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        out.write_all(&self.info)?;
        out.write_all(&self.translation.render())?;
        out.flush()
    }
}
