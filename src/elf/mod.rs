//! Object file access.
//!
//! [`ObjectImage`] wraps the `goblin` ELF parser and keeps only the section
//! table and symbol table; [`relocation_offsets`] walks a `RELA` section and
//! returns the addends that point into a chosen data section.

mod image;
mod relocations;

pub use image::{ObjectImage, SectionInfo, SymbolInfo};
pub use relocations::{RELA64_SIZE, Rela64, parse_rela64, relocation_offsets};
