use tracing::{debug, trace};

use super::config::ScanConfig;
use super::decoder::inflate_raw;
use super::segmenter::segment;
use crate::elf::{ObjectImage, relocation_offsets};
use crate::error::Result;
use crate::firmware::{Disposition, Processor};
use crate::io::Sink;

/// Counters describing one scan.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    /// Relocations pointing into the scanned section.
    pub relocations: usize,
    /// Candidate ranges that passed the minimum size.
    pub segments: usize,
    /// Candidates that inflated cleanly.
    pub inflated: usize,
    /// Candidates that did not inflate.
    pub undecodable: usize,
    pub archives: usize,
    pub archive_entries: usize,
    pub wholes: usize,
    /// Inflated payloads too small to keep.
    pub dropped: usize,
}

/// Drives the pipeline: relocations, segments, inflate, classify.
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan an object file held in memory, handing every recovered payload
    /// to `processor`.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error: an object file the scanner cannot
    /// read, a malformed relocation section, an archive entry out of bounds,
    /// or a failed write. Candidates that do not inflate are skipped.
    pub fn scan<S: Sink>(&self, object: &[u8], processor: &mut Processor<S>) -> Result<ScanReport> {
        let image = ObjectImage::parse(object)?;
        let section = image.section_data(&self.config.section)?;
        let offsets = relocation_offsets(&image, &self.config.rela_section, &self.config.section)?;

        debug!(
            "{} is {:#x} bytes with {} relocation targets",
            self.config.section,
            section.len(),
            offsets.len()
        );

        self.scan_section(section, offsets, processor)
    }

    /// Scan raw section bytes given the boundary offsets directly.
    pub fn scan_section<S: Sink>(
        &self,
        section: &[u8],
        offsets: Vec<i64>,
        processor: &mut Processor<S>,
    ) -> Result<ScanReport> {
        let thresholds = &self.config.thresholds;
        let mut report = ScanReport {
            relocations: offsets.len(),
            ..ScanReport::default()
        };

        let segments = segment(offsets, section.len(), thresholds.min_segment_size);
        report.segments = segments.len();

        for seg in segments {
            trace!("candidate {:#x}..{:#x}", seg.start, seg.end);

            let payload = match inflate_raw(&section[seg.range()], thresholds.max_inflated_size) {
                Ok(payload) => payload,
                Err(err) => {
                    debug!("skipping {:#x}..{:#x}: {}", seg.start, seg.end, err);
                    report.undecodable += 1;
                    continue;
                }
            };
            report.inflated += 1;

            match processor.process(&payload)? {
                Disposition::Archive { entries, .. } => {
                    report.archives += 1;
                    report.archive_entries += entries;
                }
                Disposition::Whole { .. } => report.wholes += 1,
                Disposition::Dropped => report.dropped += 1,
            }
        }

        Ok(report)
    }
}
