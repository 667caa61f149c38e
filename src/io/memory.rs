use super::Sink;
use crate::error::Result;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Keeps recovered files in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self, path: &Path) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn has_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    /// Files in path order.
    pub fn files(&self) -> impl Iterator<Item = (&Path, &[u8])> {
        self.files.iter().map(|(p, d)| (p.as_path(), d.as_slice()))
    }

    pub fn dirs(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }
}

impl Sink for MemorySink {
    fn create_dir(&mut self, path: &Path) -> Result<()> {
        self.dirs.insert(path.to_path_buf());
        Ok(())
    }

    fn write_file(&mut self, path: &Path, data: &[u8]) -> Result<()> {
        self.files.insert(path.to_path_buf(), data.to_vec());
        Ok(())
    }
}
