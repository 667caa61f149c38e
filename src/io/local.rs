use super::Sink;
use crate::error::{Result, ScanError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Read the whole input object file.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| ScanError::Input {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes recovered files under an existing output directory.
///
/// The root itself is never created; only the per-archive directories
/// inside it are.
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Sink for DirectorySink {
    fn create_dir(&mut self, path: &Path) -> Result<()> {
        let full = self.root.join(path);
        match fs::create_dir(&full) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists && full.is_dir() => Ok(()),
            Err(source) => Err(ScanError::Output { path: full, source }),
        }
    }

    fn write_file(&mut self, path: &Path, data: &[u8]) -> Result<()> {
        let full = self.root.join(path);
        fs::write(&full, data).map_err(|source| ScanError::Output { path: full, source })
    }
}
