// src/main.rs
//! Command line entry point.
//!
//! ```text
//! nvtfix VT1.nvt [VT1_fixed.nvt] VT1.csv
//! ```
//!
//! Without the corrected file name only the CSV export is produced. Any other
//! argument count prints the usage text and exits successfully.

use clap::Parser;
use nvtfix::{logging, run, Invocation, RepairOptions, LIBRARY_VERSION};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "nvtfix", version)]
#[command(about = "Replace zero position entries in Neuralynx *.nvt files by interpolated values")]
struct Cli {
    /// VT1.nvt [VT1_fixed.nvt] VT1.csv
    #[arg(value_name = "FILE")]
    paths: Vec<PathBuf>,

    /// Do not print progress counters
    #[arg(short, long)]
    quiet: bool,
}

const USAGE: &str = "\
Scan Neuralynx *.nvt file for zero position entries
and replace them by average value calculated based on
position data taken from right and left side entries
Usage: nvtfix VT1.nvt [VT1_fixed.nvt] VT1.csv
If output *.nvt file name is not provided
then only CSV file will be generated";

fn print_usage() {
    println!("nvtfix {}", LIBRARY_VERSION);
    println!("{}", USAGE);
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                let _ = e.print();
            } else {
                print_usage();
            }
            process::exit(0);
        }
    };

    let invocation = match Invocation::from_paths(cli.paths) {
        Some(invocation) => invocation,
        None => {
            print_usage();
            process::exit(0);
        }
    };

    let options = RepairOptions {
        show_progress: !cli.quiet,
        ..RepairOptions::default()
    };

    if let Err(e) = logging::init(&options.debug_log) {
        eprintln!("{}", e);
        process::exit(1);
    }

    if options.show_progress {
        println!("nvtfix {}", LIBRARY_VERSION);
    }

    match run(&invocation, &options) {
        Ok(report) => {
            if options.show_progress {
                println!(
                    "{} records, {} zero intervals, {} records corrected",
                    report.records, report.intervals, report.patched_records
                );
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}
