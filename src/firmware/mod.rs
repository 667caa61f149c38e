//! Recovered payload handling.
//!
//! ## Archive format
//!
//! Netlist archives are a small table of contents followed by the entry
//! data, all little-endian:
//!
//! ```text
//! +0   i32 magic (always 0)
//! +4   i32 count
//! +8   count x { i32 id, i32 length, i32 offset }
//! ...  entry data, addressed by offset from the start of the payload
//! ```
//!
//! There is no real signature, so the [`Processor`] only treats a payload as
//! an archive when it is large, has a plausible entry count, and every entry
//! points past the table. Everything else is written out whole.

mod names;
mod processor;
mod structures;

pub use names::{SECTION_NAMES, known_name, section_name};
pub use processor::{Disposition, Processor};
pub use structures::{ArchiveEntry, ArchiveHeader, ArchiveRejection, parse_archive};
