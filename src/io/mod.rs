mod listing;
mod local;
mod memory;

pub use listing::ListingSink;
pub use local::{DirectorySink, read_input};
pub use memory::MemorySink;

use std::path::Path;

use crate::error::Result;

/// Destination for recovered files.
///
/// Paths are relative to the output root, e.g. `archive_00/fecs_data` or
/// `whole_000`.
pub trait Sink {
    /// Create a directory. A directory that already exists is not an error.
    fn create_dir(&mut self, path: &Path) -> Result<()>;

    /// Write a new file with the given contents.
    fn write_file(&mut self, path: &Path, data: &[u8]) -> Result<()>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn create_dir(&mut self, path: &Path) -> Result<()> {
        (**self).create_dir(path)
    }

    fn write_file(&mut self, path: &Path, data: &[u8]) -> Result<()> {
        (**self).write_file(path, data)
    }
}
