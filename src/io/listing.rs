use super::Sink;
use crate::error::Result;
use std::path::Path;

/// Dry-run sink: prints what would be written instead of writing it.
#[derive(Debug, Default)]
pub struct ListingSink {
    files: usize,
    bytes: u64,
}

impl ListingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print the table header.
    pub fn print_header(&self) {
        println!("{:>10}  Name", "Length");
        println!("{}", "-".repeat(40));
    }

    /// Print the totals line.
    pub fn print_footer(&self) {
        println!("{}", "-".repeat(40));
        println!("{:>10}  {} files", self.bytes, self.files);
    }
}

impl Sink for ListingSink {
    fn create_dir(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn write_file(&mut self, path: &Path, data: &[u8]) -> Result<()> {
        println!("{:>10}  {}", data.len(), path.display());
        self.files += 1;
        self.bytes += data.len() as u64;
        Ok(())
    }
}
