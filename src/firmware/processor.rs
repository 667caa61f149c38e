use std::path::PathBuf;

use tracing::{debug, info, trace};

use super::structures::{ArchiveEntry, ArchiveRejection, parse_archive};
use crate::error::{Result, ScanError};
use crate::io::Sink;
use crate::scan::Thresholds;

/// What happened to one payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Split into `entries` files under `archive_<index>`.
    Archive { index: usize, entries: usize },
    /// Written as `whole_<index>`.
    Whole { index: usize },
    /// Too small to keep.
    Dropped,
}

/// Classifies inflated payloads and writes them out.
///
/// The archive and whole-file counters only ever go up, so every output
/// name is used once per run.
pub struct Processor<S: Sink> {
    sink: S,
    thresholds: Thresholds,
    archive_counter: usize,
    whole_counter: usize,
}

impl<S: Sink> Processor<S> {
    pub fn new(sink: S, thresholds: Thresholds) -> Self {
        Self {
            sink,
            thresholds,
            archive_counter: 0,
            whole_counter: 0,
        }
    }

    /// Number of archives written so far.
    pub fn archive_count(&self) -> usize {
        self.archive_counter
    }

    /// Number of whole payloads written so far.
    pub fn whole_count(&self) -> usize {
        self.whole_counter
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Handle one inflated payload.
    ///
    /// Payloads that look like an archive are split into one file per entry;
    /// anything else that is large enough is written as a single file.
    ///
    /// # Errors
    ///
    /// Fails if an output cannot be written, or if an accepted archive has
    /// an entry that runs past the end of the payload.
    pub fn process(&mut self, data: &[u8]) -> Result<Disposition> {
        match parse_archive(data, &self.thresholds) {
            Ok(entries) => self.emit_archive(data, &entries),
            Err(rejection) => {
                self.log_rejection(data, &rejection);
                self.emit_whole(data)
            }
        }
    }

    fn emit_archive(&mut self, data: &[u8], entries: &[ArchiveEntry]) -> Result<Disposition> {
        let index = self.archive_counter;
        let dir = PathBuf::from(format!("archive_{index:02}"));
        self.sink.create_dir(&dir)?;

        for entry in entries {
            let bytes = entry.slice(data).ok_or(ScanError::EntryOutOfBounds {
                id: entry.id,
                offset: entry.offset,
                length: entry.length,
                payload: data.len(),
            })?;

            let path = dir.join(&*entry.name());
            self.sink.write_file(&path, bytes)?;
            info!("  extracting: {} ({} bytes)", path.display(), bytes.len());
        }

        self.archive_counter += 1;
        Ok(Disposition::Archive {
            index,
            entries: entries.len(),
        })
    }

    fn emit_whole(&mut self, data: &[u8]) -> Result<Disposition> {
        if data.len() < self.thresholds.min_whole_size {
            return Ok(Disposition::Dropped);
        }

        let index = self.whole_counter;
        let path = PathBuf::from(format!("whole_{index:03}"));
        self.sink.write_file(&path, data)?;
        info!("  extracting: {} ({} bytes)", path.display(), data.len());

        self.whole_counter += 1;
        Ok(Disposition::Whole { index })
    }

    fn log_rejection(&self, data: &[u8], rejection: &ArchiveRejection) {
        if data.len() < self.thresholds.min_whole_size {
            return;
        }
        match rejection {
            // a zero magic and sane count that still failed is worth seeing
            ArchiveRejection::ShortEntryTable(_) | ArchiveRejection::OffsetInTable { .. } => {
                debug!("not an archive: {}", rejection);
            }
            _ => trace!("not an archive: {}", rejection),
        }
    }
}
