//! Parsing of single memory-map listing lines
//!
//! Each line of `/proc/<pid>/maps` describes one mapping:
//!
//! ```text
//! address           perms offset   dev   inode    pathname
//! 00400000-00452000 r-xp 00000000 08:02 173521    /usr/bin/ls
//! 7ffff7a0d000-7ffff7a0e000 rw-p 00000000 00:00 0
//! 7ffffffde000-7ffffffff000 rw-p 00000000 00:00 0 [stack]
//! ```
//!
//! The kernel prints addresses, offsets and device numbers as lowercase hex
//! without a prefix, the inode in decimal, and pads the pathname column with
//! spaces. The pathname may be empty, a bracketed pseudo-name, or a file path.

use crate::domain::LineError;
use std::fmt;
use std::str::FromStr;

/// Permission token of a mapping, e.g. `r-xp`
///
/// The token is kept verbatim. Flag accessors follow the kernel's fixed
/// 4-character layout, except [`Permissions::is_executable`] which looks for
/// an `x` anywhere in the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permissions(String);

impl Permissions {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_readable(&self) -> bool {
        self.flag(0) == Some(b'r')
    }

    #[must_use]
    pub fn is_writable(&self) -> bool {
        self.flag(1) == Some(b'w')
    }

    #[must_use]
    pub fn is_executable(&self) -> bool {
        self.0.contains('x')
    }

    /// `s` in the last column; `p` means private copy-on-write
    #[must_use]
    pub fn is_shared(&self) -> bool {
        self.flag(3) == Some(b's')
    }

    fn flag(&self, idx: usize) -> Option<u8> {
        self.0.as_bytes().get(idx).copied()
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Backing device of a mapping (`major:minor`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Device {
    pub major: u32,
    pub minor: u32,
}

/// One parsed line of a memory-map listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub start: u64,
    pub end: u64,
    pub perms: Permissions,
    /// File offset the mapping starts at
    pub offset: u64,
    pub device: Device,
    pub inode: u64,
    /// Backing path or pseudo-name as raw bytes; empty for anonymous mappings
    ///
    /// Linux file names are arbitrary bytes, so no encoding is assumed.
    pub pathname: Vec<u8>,
}

impl Region {
    /// Parse one listing line
    ///
    /// Every column before the pathname is ASCII; the pathname is taken
    /// byte for byte.
    ///
    /// # Errors
    /// Returns the [`LineError`] describing the first column that does not
    /// match the listing grammar
    pub fn parse(line: &[u8]) -> Result<Self, LineError> {
        let mut rest = line;

        let range = next_field(&mut rest, "address range")?;
        let (start, end) =
            split_pair(range, b'-').ok_or_else(|| LineError::MalformedRange(lossy(range)))?;
        let start = parse_hex(start, "start address")?;
        let end = parse_hex(end, "end address")?;
        if end < start {
            return Err(LineError::InvertedRange { start, end });
        }

        let perms = next_field(&mut rest, "permissions")?;
        let perms = std::str::from_utf8(perms).map_err(|_| LineError::NonUtf8("permissions"))?;
        let perms = Permissions(perms.to_string());
        let offset = parse_hex(next_field(&mut rest, "offset")?, "offset")?;

        let dev = next_field(&mut rest, "device")?;
        let (major, minor) =
            split_pair(dev, b':').ok_or_else(|| LineError::MalformedDevice(lossy(dev)))?;
        let device_number = |value: &[u8], field| {
            parse_hex(value, field)
                .and_then(|v| u32::try_from(v).map_err(|_| LineError::MalformedDevice(lossy(dev))))
        };
        let device = Device {
            major: device_number(major, "device major")?,
            minor: device_number(minor, "device minor")?,
        };

        let inode = next_field(&mut rest, "inode")?;
        let inode = std::str::from_utf8(inode)
            .ok()
            .filter(|digits| digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse().ok())
            .ok_or_else(|| LineError::InvalidDecimal(lossy(inode)))?;

        // Everything after the inode column is the pathname, spaces included
        let pathname = trim_start(rest).to_vec();

        Ok(Region { start, end, perms, offset, device, inode, pathname })
    }

    /// Size of the mapping in bytes
    #[must_use]
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if an address falls within this region
    #[must_use]
    pub fn contains(&self, addr: u64) -> bool {
        addr >= self.start && addr < self.end
    }

    /// Mapped from a file named by an absolute path
    ///
    /// Anonymous mappings and pseudo-regions (`[heap]`, `[stack]`, `[vdso]`,
    /// ...) are not file backed.
    #[must_use]
    pub fn is_file_backed(&self) -> bool {
        self.pathname.starts_with(b"/")
    }

    #[must_use]
    pub fn is_executable(&self) -> bool {
        self.perms.is_executable()
    }
}

impl FromStr for Region {
    type Err = LineError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        Region::parse(line.as_bytes())
    }
}

fn trim_start(bytes: &[u8]) -> &[u8] {
    let skip = bytes.iter().take_while(|b| b.is_ascii_whitespace()).count();
    &bytes[skip..]
}

/// Split the next whitespace-delimited field off `rest`
fn next_field<'a>(rest: &mut &'a [u8], name: &'static str) -> Result<&'a [u8], LineError> {
    let trimmed = trim_start(*rest);
    if trimmed.is_empty() {
        return Err(LineError::MissingField(name));
    }
    let end = trimmed.iter().position(u8::is_ascii_whitespace).unwrap_or(trimmed.len());
    let (field, tail) = trimmed.split_at(end);
    *rest = tail;
    Ok(field)
}

fn split_pair(field: &[u8], sep: u8) -> Option<(&[u8], &[u8])> {
    let at = field.iter().position(|&b| b == sep)?;
    Some((&field[..at], &field[at + 1..]))
}

/// Parse lowercase, unprefixed hex as printed by the kernel
fn parse_hex(value: &[u8], field: &'static str) -> Result<u64, LineError> {
    let invalid = || LineError::InvalidHex { field, value: lossy(value) };
    if value.is_empty() || !value.iter().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
        return Err(invalid());
    }
    std::str::from_utf8(value)
        .ok()
        .and_then(|digits| u64::from_str_radix(digits, 16).ok())
        .ok_or_else(invalid)
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
