//! Sideband region records consumed by the trace decoder
//!
//! Wire format, one record per line:
//!
//! ```text
//! 1 1 <register> <start> <pgoff> <len>\t<path>
//! ```
//!
//! Numbers are lowercase hex without prefix or padding. The path is the only
//! free-form field and is set off by a tab so it may contain spaces.

use super::region::Region;
use crate::domain::{RecordError, RegisterValue};
use std::fmt;
use std::str::FromStr;

/// Leading marker columns expected by the decoder
const MARKER: &str = "1";

/// One translated region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedRecord {
    pub register: RegisterValue,
    pub start: u64,
    pub offset: u64,
    pub len: u64,
    /// Backing file path, raw bytes as found in the listing
    pub path: Vec<u8>,
}

impl EmittedRecord {
    /// Build the record for a region that passed the filters
    #[must_use]
    pub fn new(region: &Region, register: &RegisterValue) -> Self {
        Self {
            register: register.clone(),
            start: region.start,
            offset: region.offset,
            len: region.len(),
            path: region.pathname.clone(),
        }
    }

    /// End address of the region (exclusive), if it fits in 64 bits
    #[must_use]
    pub fn end(&self) -> Option<u64> {
        self.start.checked_add(self.len)
    }

    /// Wire form of the record, without line terminator
    ///
    /// The path bytes are copied unchanged.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut line = self.columns().into_bytes();
        line.extend_from_slice(&self.path);
        line
    }

    /// Read a record back from its wire form
    ///
    /// The register column is split on single spaces like every other
    /// column, so a register value containing spaces cannot be read back.
    ///
    /// # Errors
    /// Returns the [`RecordError`] for the first column that is out of place
    pub fn parse(line: &[u8]) -> Result<Self, RecordError> {
        let tab = line.iter().position(|&b| b == b'\t').ok_or(RecordError::MissingPath)?;
        let (head, path) = (&line[..tab], &line[tab + 1..]);
        if !path.starts_with(b"/") {
            return Err(RecordError::RelativePath(String::from_utf8_lossy(path).into_owned()));
        }
        let head = std::str::from_utf8(head).map_err(|_| RecordError::NonUtf8)?;

        let fields: Vec<&str> = head.split(' ').collect();
        let &[first, second, register, start, offset, len] = fields.as_slice() else {
            return Err(RecordError::FieldCount(fields.len()));
        };
        for marker in [first, second] {
            if marker != MARKER {
                return Err(RecordError::BadMarker(marker.to_string()));
            }
        }

        let start = hex_field(start, "start")?;
        let len = hex_field(len, "length")?;
        if start.checked_add(len).is_none() {
            return Err(RecordError::RangeOverflow { start, len });
        }

        Ok(Self {
            register: RegisterValue::from(register),
            start,
            offset: hex_field(offset, "offset")?,
            len,
            path: path.to_vec(),
        })
    }

    fn columns(&self) -> String {
        format!(
            "{MARKER} {MARKER} {} {:x} {:x} {:x}\t",
            self.register, self.start, self.offset, self.len
        )
    }
}

/// Human-readable form. A path that is not UTF-8 is shown lossily, so the
/// decoder's output goes through [`EmittedRecord::to_bytes`] instead.
impl fmt::Display for EmittedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.columns(), String::from_utf8_lossy(&self.path))
    }
}

impl FromStr for EmittedRecord {
    type Err = RecordError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        EmittedRecord::parse(line.as_bytes())
    }
}

fn hex_field(value: &str, field: &'static str) -> Result<u64, RecordError> {
    u64::from_str_radix(value, 16)
        .map_err(|_| RecordError::InvalidHex { field, value: value.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(line: &str) -> Region {
        line.parse().expect("valid map line")
    }

    #[test]
    fn test_record_wire_format() {
        let region = region("00400000-00401000 r-xp 00000000 08:01 131099 /usr/bin/true");
        let record = EmittedRecord::new(&region, &RegisterValue::from("0xdead"));
        assert_eq!(record.to_string(), "1 1 0xdead 400000 0 1000\t/usr/bin/true");
    }

    #[test]
    fn test_record_drops_zero_padding() {
        let region = region(
            "00007f3c2a1d2000-00007f3c2a1f4000 r-xp 00028000 fd:01 3946841 /usr/lib/libc.so.6",
        );
        let record = EmittedRecord::new(&region, &RegisterValue::from("1b2c3000"));
        assert_eq!(record.to_string(), "1 1 1b2c3000 7f3c2a1d2000 28000 22000\t/usr/lib/libc.so.6");
    }

    #[test]
    fn test_record_reads_back_region_bounds() {
        let region = region("7f3c2a1d2000-7f3c2a1f4000 r-xp 00028000 fd:01 7 /usr/lib/libc.so.6");
        let line = EmittedRecord::new(&region, &RegisterValue::from("cr3")).to_string();

        let decoded: EmittedRecord = line.parse().unwrap();
        assert_eq!(decoded.start, region.start);
        assert_eq!(decoded.offset, region.offset);
        assert_eq!(decoded.end(), Some(region.end));
        assert_eq!(decoded.register.as_str(), "cr3");
        assert_eq!(decoded.path, b"/usr/lib/libc.so.6");
    }

    #[test]
    fn test_record_path_keeps_spaces() {
        let decoded: EmittedRecord = "1 1 0 1000 0 1000\t/opt/My App/bin".parse().unwrap();
        assert_eq!(decoded.path, b"/opt/My App/bin");
    }

    #[test]
    fn test_record_parse_errors() {
        assert_eq!("1 1 0 1000 0 1000".parse::<EmittedRecord>(), Err(RecordError::MissingPath));
        assert_eq!(
            "1 1 0 1000 0 1000\t[heap]".parse::<EmittedRecord>(),
            Err(RecordError::RelativePath("[heap]".to_string()))
        );
        assert_eq!("1 1 0 1000 0\t/bin/x".parse::<EmittedRecord>(), Err(RecordError::FieldCount(5)));
        assert_eq!(
            "2 1 0 1000 0 1000\t/bin/x".parse::<EmittedRecord>(),
            Err(RecordError::BadMarker("2".to_string()))
        );
        assert!(matches!(
            "1 1 0 zz 0 1000\t/bin/x".parse::<EmittedRecord>(),
            Err(RecordError::InvalidHex { field: "start", .. })
        ));
    }

    #[test]
    fn test_record_bytes_keep_raw_path() {
        let region = Region::parse(b"1000-2000 r-xp 00000000 08:01 1 /tmp/bad\xffname").unwrap();
        let record = EmittedRecord::new(&region, &RegisterValue::from("0xdead"));

        assert_eq!(record.to_bytes(), b"1 1 0xdead 1000 0 1000\t/tmp/bad\xffname");
        assert_eq!(EmittedRecord::parse(&record.to_bytes()), Ok(record));
    }

    #[test]
    fn test_record_rejects_range_past_address_space() {
        assert_eq!(
            "1 1 x ffffffffffffffff 0 2\t/x".parse::<EmittedRecord>(),
            Err(RecordError::RangeOverflow { start: u64::MAX, len: 2 })
        );
        let record: EmittedRecord = "1 1 x ffffffffff600000 0 1000\t/x".parse().unwrap();
        assert_eq!(record.end(), Some(0xffff_ffff_ff60_1000));
    }

    #[test]
    fn test_record_end_without_parse() {
        let record = EmittedRecord {
            register: RegisterValue::from("x"),
            start: u64::MAX,
            offset: 0,
            len: 1,
            path: b"/x".to_vec(),
        };
        assert_eq!(record.end(), None);
    }
}
