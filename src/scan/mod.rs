//! The scanning pipeline.
//!
//! ## Pipeline
//!
//! 1. [`relocation_offsets`](crate::elf::relocation_offsets) collects every
//!    place in the data section that code refers to.
//! 2. [`segment`] sorts those offsets and cuts the section into candidate
//!    ranges, assuming the payloads are packed back to back.
//! 3. [`inflate_raw`] tries each range as a raw deflate stream. Ranges that
//!    are not streams are skipped.
//! 4. [`Processor`](crate::firmware::Processor) classifies and writes out
//!    every payload that inflated.
//!
//! [`Scanner`] runs these steps in order over one object file.

mod config;
mod decoder;
mod scanner;
mod segmenter;

pub use config::{
    DEFAULT_SECTION, MAX_ARCHIVE_ENTRIES, MAX_INFLATED_SIZE, MIN_ARCHIVE_SIZE, MIN_SEGMENT_SIZE,
    MIN_WHOLE_SIZE, ScanConfig, Thresholds, rela_section_for,
};
pub use decoder::{DecodeError, inflate_raw};
pub use scanner::{ScanReport, Scanner};
pub use segmenter::{Segment, segment};
