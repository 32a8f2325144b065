//! Listing-to-sideband translation
//!
//! Walks a memory-map listing once, keeps the executable file-backed
//! regions and turns each into an [`EmittedRecord`]. Lines that do not parse
//! are collected as [`MalformedLine`]s so the caller can report them; they
//! never stop the pass.

use super::record::EmittedRecord;
use super::region::Region;
use crate::domain::{DecodeError, LineError, RegisterValue};
use log::{debug, info};
use std::fs;
use std::path::Path;

/// A listing line that did not match the memory-map grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    /// 1-based line number in the listing
    pub line_no: usize,
    /// Line text for display; bytes that are not UTF-8 are replaced
    pub text: String,
    pub reason: LineError,
}

/// Result of translating one listing
#[derive(Debug, Default)]
pub struct Translation {
    /// Records in listing order
    pub records: Vec<EmittedRecord>,
    pub malformed: Vec<MalformedLine>,
    /// Lines that parsed as regions, kept or not
    pub regions_seen: usize,
}

impl Translation {
    /// Render the records as newline-terminated wire lines
    #[must_use]
    pub fn render(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for record in &self.records {
            out.extend_from_slice(&record.to_bytes());
            out.push(b'\n');
        }
        out
    }
}

/// A region is translated only when both hold
#[must_use]
pub fn is_translated(region: &Region) -> bool {
    region.is_file_backed() && region.is_executable()
}

/// Split a listing into lines, dropping `\n` (and a `\r` before it)
fn listing_lines(listing: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = listing.strip_suffix(b"\n").unwrap_or(listing);
    let count = if listing.is_empty() { 0 } else { usize::MAX };
    body.split(|&b| b == b'\n')
        .take(count)
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}

/// Translate a memory-map listing
///
/// The listing is handled as bytes so that file names which are not UTF-8
/// reach the output unchanged.
#[must_use]
pub fn translate(listing: &[u8], register: &RegisterValue) -> Translation {
    let mut translation = Translation::default();

    for (idx, line) in listing_lines(listing).enumerate() {
        let region = match Region::parse(line) {
            Ok(region) => region,
            Err(reason) => {
                debug!("line {}: {reason}", idx + 1);
                translation.malformed.push(MalformedLine {
                    line_no: idx + 1,
                    text: String::from_utf8_lossy(line).into_owned(),
                    reason,
                });
                continue;
            }
        };
        translation.regions_seen += 1;

        if !is_translated(&region) {
            debug!(
                "skipping 0x{:x}-0x{:x} {} \"{}\"",
                region.start,
                region.end,
                region.perms,
                region.pathname.escape_ascii()
            );
            continue;
        }
        translation.records.push(EmittedRecord::new(&region, register));
    }

    info!(
        "translated {} of {} regions ({} malformed lines skipped)",
        translation.records.len(),
        translation.regions_seen,
        translation.malformed.len()
    );
    translation
}

/// Read and translate a memory-map listing file
///
/// # Errors
/// Returns [`DecodeError::FileAccess`] if the file cannot be read
pub fn translate_file(path: &Path, register: &RegisterValue) -> Result<Translation, DecodeError> {
    let listing = fs::read(path).map_err(|e| DecodeError::file_access(path, e))?;
    Ok(translate(&listing, register))
}
