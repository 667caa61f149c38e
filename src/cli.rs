use clap::Parser;

use crate::scan::{
    DEFAULT_SECTION, MAX_ARCHIVE_ENTRIES, MAX_INFLATED_SIZE, MIN_ARCHIVE_SIZE, MIN_SEGMENT_SIZE,
    MIN_WHOLE_SIZE, ScanConfig, Thresholds, rela_section_for,
};

#[derive(Parser, Debug)]
#[command(name = "fwcarve")]
#[command(version)]
#[command(about = "Recover deflate-packed firmware from an object file's rodata", long_about = None)]
#[command(after_help = "Examples:\n  \
  fwcarve nv-kernel.o_binary out/        extract everything into out/\n  \
  fwcarve -l nv-kernel.o_binary          list what would be extracted\n  \
  fwcarve --section .data nv-kernel.o out/   scan .data using .rela.data")]
pub struct Cli {
    /// Object file to scan
    #[arg(value_name = "OBJECT")]
    pub object: String,

    /// Existing directory to write recovered files into
    #[arg(value_name = "OUTDIR", required_unless_present = "list")]
    pub outdir: Option<String>,

    /// List recovered files without writing them
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Data section holding the packed payloads
    #[arg(long, value_name = "NAME", default_value = DEFAULT_SECTION)]
    pub section: String,

    /// Relocation section pointing into the data section [default: .rela<SECTION>]
    #[arg(long, value_name = "NAME")]
    pub rela_section: Option<String>,

    /// Smallest candidate range to try inflating
    #[arg(long, value_name = "BYTES", default_value_t = MIN_SEGMENT_SIZE)]
    pub min_segment: usize,

    /// Smallest payload considered as an archive
    #[arg(long, value_name = "BYTES", default_value_t = MIN_ARCHIVE_SIZE)]
    pub min_archive_size: usize,

    /// Largest entry count accepted in an archive header
    #[arg(
        long,
        value_name = "COUNT",
        default_value_t = MAX_ARCHIVE_ENTRIES,
        value_parser = clap::value_parser!(i32).range(1..)
    )]
    pub max_entries: i32,

    /// Smallest non-archive payload to write out
    #[arg(long, value_name = "BYTES", default_value_t = MIN_WHOLE_SIZE)]
    pub min_whole_size: usize,

    /// Give up on a candidate that inflates past this size
    #[arg(long, value_name = "BYTES", default_value_t = MAX_INFLATED_SIZE)]
    pub max_inflated_size: usize,

    /// More logging (-vv => trace)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (-qq => quieter)
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    pub fn is_quiet(&self) -> bool {
        self.quiet > 0
    }

    /// Default log filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (q, _) if q > 1 => "error",
            (1, _) => "warn",
            (_, 0) => "info",
            (_, 1) => "debug",
            _ => "trace",
        }
    }

    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            section: self.section.clone(),
            rela_section: self
                .rela_section
                .clone()
                .unwrap_or_else(|| rela_section_for(&self.section)),
            thresholds: Thresholds {
                min_segment_size: self.min_segment,
                min_archive_size: self.min_archive_size,
                max_archive_entries: self.max_entries,
                min_whole_size: self.min_whole_size,
                max_inflated_size: self.max_inflated_size,
            },
        }
    }
}
