use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a scan.
///
/// Everything here means an assumption about the object file or the output
/// location did not hold. Per-candidate problems (a range that does not
/// inflate, a payload that is not an archive) never end up here; they are
/// reported through [`DecodeError`](crate::scan::DecodeError) and
/// [`ArchiveRejection`](crate::firmware::ArchiveRejection) and consumed
/// inside the pipeline.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to read {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse object file: {0}")]
    Object(#[from] goblin::error::Error),

    #[error("unsupported object file: {0}")]
    Unsupported(&'static str),

    #[error("section {0} not found")]
    MissingSection(String),

    #[error("section {name} lies outside the file ({offset:#x}+{size:#x})")]
    SectionOutOfBounds { name: String, offset: u64, size: u64 },

    #[error("unexpected length for {section}: {len:#x}")]
    MalformedRelocations { section: String, len: usize },

    #[error("failed to decode relocations in {section}: {source}")]
    Relocation {
        section: String,
        #[source]
        source: std::io::Error,
    },

    #[error("relocation references symbol {index}, but only {count} symbols exist")]
    SymbolOutOfRange { index: u64, count: usize },

    #[error(
        "archive entry {id} ({offset:#x}+{length:#x}) exceeds payload of {payload:#x} bytes"
    )]
    EntryOutOfBounds {
        id: i32,
        offset: i32,
        length: i32,
        payload: usize,
    },

    #[error("failed to write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ScanError>;
