//! # fwcarve
//!
//! Recover firmware blobs and netlist archives packed into the read-only
//! data of a compiled object file.
//!
//! Some driver objects carry their firmware as a run of raw deflate streams
//! (no zlib or gzip header) placed back to back in `.rodata`, with nothing
//! recording where each stream starts except the relocations that code uses
//! to reference them. This crate uses those relocations as candidate
//! boundaries, tries to inflate every range between two boundaries, and
//! sorts whatever inflates into multi-entry archives or single blobs.
//!
//! ## Features
//!
//! - ELF64 relocatable objects, either byte order
//! - Boundary discovery from `RELA` records against section symbols
//! - Strict raw-deflate decoding (truncated streams are rejected)
//! - Netlist archive demultiplexing with known section names
//! - Dry-run listing through a pluggable output [`Sink`]
//!
//! ## Example
//!
//! ```no_run
//! use fwcarve::{DirectorySink, Processor, ScanConfig, Scanner};
//!
//! fn main() -> anyhow::Result<()> {
//!     let object = std::fs::read("nv-kernel.o_binary")?;
//!
//!     let config = ScanConfig::default();
//!     let mut processor = Processor::new(DirectorySink::new("out"), config.thresholds);
//!     let report = Scanner::new(config).scan(&object, &mut processor)?;
//!
//!     println!("{} archives, {} blobs", report.archives, report.wholes);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod elf;
pub mod error;
pub mod firmware;
pub mod io;
pub mod scan;

pub use cli::Cli;
pub use elf::ObjectImage;
pub use error::{Result, ScanError};
pub use firmware::{Disposition, Processor};
pub use io::{DirectorySink, ListingSink, MemorySink, Sink};
pub use scan::{ScanConfig, ScanReport, Scanner, Thresholds};
