//! # ptdecode - Processor Trace Sideband Generator
//!
//! ptdecode prepares the sideband a processor-trace decoder needs to
//! reconstruct control flow from a raw trace dump. Alongside the trace
//! buffer, the dump writer saves two small files per run:
//!
//! - `<prefix>.ptinfo`: the CPU's trace capabilities, as text
//! - `<prefix>.ptmap`: a copy of the traced process's `/proc/<pid>/maps`
//!
//! The decoder wants the info block followed by a region table naming every
//! executable file mapping and the address space (CR3) it belongs to.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────┐      ┌──────────────┐
//! │ run1.ptinfo  │      │  run1.ptmap  │   (or /proc/<pid>/maps)
//! └──────┬───────┘      └──────┬───────┘
//!        │ verbatim            │ parse + filter
//!        ▼                     ▼
//! ┌──────────────┐      ┌──────────────┐
//! │    ptinfo    │      │     maps     │──▶ warnings for malformed lines
//! └──────┬───────┘      └──────┬───────┘
//!        └──────────┬──────────┘
//!                   ▼
//!            ┌──────────────┐
//!            │     dump     │──▶ stdout / --output FILE
//!            └──────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`maps`]: memory-map parsing, filtering and the region record format
//! - [`ptinfo`]: pass-through of the capability header
//! - [`dump`]: the file set of one dump and the combined output
//! - [`preflight`]: checks before reading a live process's map
//! - [`cli`]: command-line argument parsing
//! - [`domain`]: core domain types (`Pid`, `RegisterValue`) and errors
//!
//! ## Typical Usage
//!
//! ```bash
//! # Region table for a saved dump, traced with CR3 0x1b2c3000
//! ptdecode /tmp/run1 0x1b2c3000 > run1.sideband
//!
//! # Same, but with the map of a process that is still running
//! ptdecode /tmp/run1 0x1b2c3000 --pid 4242
//! ```

pub mod cli;
pub mod domain;
pub mod dump;
pub mod maps;
pub mod preflight;
pub mod ptinfo;
