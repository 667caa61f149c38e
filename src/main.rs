//! Main entry point for the fwcarve CLI application.
//!
//! Reads one object file, scans its data section for packed payloads and
//! writes whatever it recovers into the output directory (or lists it with
//! `-l`).

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use fwcarve::io::read_input;
use fwcarve::{Cli, DirectorySink, ListingSink, Processor, ScanReport, Scanner, Sink};

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let object = read_input(Path::new(&cli.object))?;
    let scanner = Scanner::new(cli.scan_config());

    let report = match cli.outdir.as_deref() {
        Some(outdir) if !cli.list => {
            let sink = DirectorySink::new(outdir);
            scan(&scanner, &object, sink)?
        }
        _ => {
            // List mode: print the outputs instead of writing them
            let mut sink = ListingSink::new();
            sink.print_header();
            let report = scan(&scanner, &object, &mut sink)?;
            sink.print_footer();
            report
        }
    };

    if !cli.is_quiet() {
        print_summary(&scanner, &report);
    }

    Ok(())
}

fn scan<S: Sink>(scanner: &Scanner, object: &[u8], sink: S) -> Result<ScanReport> {
    let mut processor = Processor::new(sink, scanner.config().thresholds);
    Ok(scanner.scan(object, &mut processor)?)
}

/// Print run statistics to stderr.
fn print_summary(scanner: &Scanner, report: &ScanReport) {
    eprintln!(
        "\n{}: {} relocations, {} candidates, {} inflated ({} not deflate)",
        scanner.config().section,
        report.relocations,
        report.segments,
        report.inflated,
        report.undecodable
    );
    eprintln!(
        "Recovered {} archives ({} files), {} whole blobs; dropped {} small payloads",
        report.archives, report.archive_entries, report.wholes, report.dropped
    );
}
