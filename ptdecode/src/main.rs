//! # ptdecode - Main Entry Point
//!
//! `ptdecode <PREFIX> <CR3>` writes `<PREFIX>.ptinfo` followed by the region
//! table translated from `<PREFIX>.ptmap`. With fewer than two positionals it
//! prints usage and exits successfully.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use ptdecode::cli::Args;
use ptdecode::domain::Pid;
use ptdecode::dump::{DecodedDump, DumpFiles};
use ptdecode::preflight::run_preflight_checks;
use std::fs::File;
use std::io::{self, BufWriter};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_NOPERM: i32 = 77;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e:#}");
            code
        }
    });
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    let denied = err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::PermissionDenied)
    });
    if denied {
        EXIT_NOPERM
    } else {
        EXIT_ERROR
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    // Incomplete invocations are not an error
    let Some((prefix, register)) = args.positionals() else {
        println!("{}", Args::usage());
        return Ok(());
    };

    let mut files = DumpFiles::from_prefix(prefix);
    if let Some(pid) = args.pid.map(Pid) {
        run_preflight_checks(pid)?;
        files = files.with_live_map(pid);
    }
    info!("info: {}, map: {}", files.info.display(), files.map.display());

    let dump = DecodedDump::load(&files, &register)?;

    if !args.quiet {
        for line in &dump.translation.malformed {
            eprintln!(
                "warning: no match at line {} ({}): {}",
                line.line_no, line.reason, line.text
            );
        }
    }

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            dump.write_to(BufWriter::new(file))
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => dump.write_to(io::stdout().lock()).context("Failed to write output")?,
    }

    Ok(())
}
