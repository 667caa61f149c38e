/// Shortest candidate range worth trying to inflate.
pub const MIN_SEGMENT_SIZE: usize = 32;

/// Smallest payload that may be interpreted as an archive.
///
/// Lots of small payloads happen to start with a zero word; requiring a
/// large payload keeps those from being mistaken for archives.
pub const MIN_ARCHIVE_SIZE: usize = 32768;

/// Largest entry count accepted in an archive header.
pub const MAX_ARCHIVE_ENTRIES: i32 = 64;

/// Smallest non-archive payload that is written out.
pub const MIN_WHOLE_SIZE: usize = 128;

/// Upper bound on the inflated size of a single segment (256 MiB).
pub const MAX_INFLATED_SIZE: usize = 256 * 1024 * 1024;

/// Default data section to scan.
pub const DEFAULT_SECTION: &str = ".rodata";

/// Heuristic limits used by the segmenter, the decoder and the processor.
///
/// The defaults were tuned against real driver blobs and have no deeper
/// derivation; they are kept overridable rather than recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub min_segment_size: usize,
    pub min_archive_size: usize,
    pub max_archive_entries: i32,
    pub min_whole_size: usize,
    pub max_inflated_size: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_segment_size: MIN_SEGMENT_SIZE,
            min_archive_size: MIN_ARCHIVE_SIZE,
            max_archive_entries: MAX_ARCHIVE_ENTRIES,
            min_whole_size: MIN_WHOLE_SIZE,
            max_inflated_size: MAX_INFLATED_SIZE,
        }
    }
}

/// What to scan and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Data section holding the packed payloads.
    pub section: String,
    /// `RELA` section whose addends point into [`section`](Self::section).
    pub rela_section: String,
    pub thresholds: Thresholds,
}

impl ScanConfig {
    /// Scan `section`, using the conventional `.rela<section>` relocations.
    pub fn for_section(section: &str) -> Self {
        Self {
            section: section.to_string(),
            rela_section: rela_section_for(section),
            thresholds: Thresholds::default(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::for_section(DEFAULT_SECTION)
    }
}

/// Name of the `RELA` section that relocates `section`.
pub fn rela_section_for(section: &str) -> String {
    format!(".rela{section}")
}
