//! # Memory-Map Translation
//!
//! Converts a process memory-map listing (the text of `/proc/<pid>/maps`,
//! saved as `<prefix>.ptmap` next to a trace dump) into the region table a
//! processor-trace decoder uses to find the code that was executing.
//!
//! ## Why only executable file mappings
//!
//! The decoder walks instructions to reconstruct control flow, so it only
//! needs to know where code came from. A mapping is useful when it is:
//! - **File backed**: the pathname is absolute, so the decoder can open the
//!   binary. Anonymous memory and pseudo-regions (`[heap]`, `[vdso]`) are not.
//! - **Executable**: the permission token contains `x`.
//!
//! ## Address Translation
//!
//! ```text
//! 7ffff7dfb000-7ffff7e1c000 r-xp 00022000 08:01 131081 /lib/ld-2.27.so
//!       │            │              │                      │
//!     start         end           pgoff                   path
//!
//! 1 1 <cr3> 7ffff7dfb000 22000 21000\t/lib/ld-2.27.so
//!               start    pgoff  len = end - start
//! ```
//!
//! The register column (typically CR3) ties the regions to the address
//! space the trace was filtered on.
//!
//! ## Module Structure
//!
//! - **`region`**: parse one listing line into a [`Region`]
//! - **`record`**: the [`EmittedRecord`] wire format
//! - **`translate`**: the filtering pass over a whole listing
//!
//! ## References
//!
//! - [Linux `/proc/pid/maps` format](https://man7.org/linux/man-pages/man5/proc_pid_maps.5.html)

pub mod record;
pub mod region;
pub mod translate;

pub use record::EmittedRecord;
pub use region::{Device, Permissions, Region};
pub use translate::{is_translated, translate, translate_file, MalformedLine, Translation};
