//! CLI argument definitions

use crate::domain::RegisterValue;
use clap::{CommandFactory, Parser};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "ptdecode",
    version,
    about = "Translate a trace dump's memory map into a decoder region table",
    after_help = "\
EXAMPLES:
    ptdecode /tmp/run1 0x1b2c3000                 Read run1.ptinfo and run1.ptmap
    ptdecode /tmp/run1 0x1b2c3000 -o run1.sb      Write the table to a file
    ptdecode /tmp/run1 0x1b2c3000 --pid 4242      Take the map from a live process"
)]
pub struct Args {
    /// Dump file prefix (reads <PREFIX>.ptinfo and <PREFIX>.ptmap)
    #[arg(value_name = "PREFIX")]
    pub prefix: Option<PathBuf>,

    /// Register value stamped into every record, usually the traced CR3
    #[arg(value_name = "CR3", allow_hyphen_values = true)]
    pub register: Option<String>,

    /// Write output to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Read the memory map from /proc/<PID>/maps instead of <PREFIX>.ptmap
    #[arg(short, long)]
    pub pid: Option<u32>,

    /// Suppress warnings about malformed map lines
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Both positionals, or `None` when the invocation is incomplete
    #[must_use]
    pub fn positionals(&self) -> Option<(&Path, RegisterValue)> {
        let prefix = self.prefix.as_deref()?;
        let register = self.register.as_deref()?;
        Some((prefix, RegisterValue::from(register)))
    }

    /// One-line usage string
    #[must_use]
    pub fn usage() -> String {
        Self::command().render_usage().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_positionals() {
        let args = Args::try_parse_from(["ptdecode", "/tmp/run1", "0xdead"]).unwrap();
        let (prefix, register) = args.positionals().unwrap();
        assert_eq!(prefix, Path::new("/tmp/run1"));
        assert_eq!(register.as_str(), "0xdead");
        assert!(args.output.is_none());
        assert!(args.pid.is_none());
    }

    #[test]
    fn test_args_incomplete() {
        let args = Args::try_parse_from(["ptdecode", "/tmp/run1"]).unwrap();
        assert!(args.positionals().is_none());

        let args = Args::try_parse_from(["ptdecode"]).unwrap();
        assert!(args.positionals().is_none());
    }

    #[test]
    fn test_args_options() {
        let args = Args::try_parse_from([
            "ptdecode", "run", "cr3", "--output", "out.sb", "--pid", "42", "-q",
        ])
        .unwrap();
        assert_eq!(args.output, Some(PathBuf::from("out.sb")));
        assert_eq!(args.pid, Some(42));
        assert!(args.quiet);
    }

    #[test]
    fn test_args_register_may_start_with_hyphen() {
        let args = Args::try_parse_from(["ptdecode", "run", "-1"]).unwrap();
        let (_, register) = args.positionals().unwrap();
        assert_eq!(register.as_str(), "-1");

        let args = Args::try_parse_from(["ptdecode", "run", "-0x10", "-q"]).unwrap();
        assert_eq!(args.register.as_deref(), Some("-0x10"));
        assert!(args.quiet);
    }

    #[test]
    fn test_usage_mentions_positionals() {
        let usage = Args::usage();
        assert!(usage.contains("PREFIX"));
        assert!(usage.contains("CR3"));
    }

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }
}
