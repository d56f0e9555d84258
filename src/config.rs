// src/config.rs
use crate::progress::DEFAULT_PROGRESS_EVERY;
use std::path::PathBuf;

/// Name of the file that switches on diagnostic logging when it exists
pub const DEFAULT_DEBUG_LOG: &str = "debug.txt";

/// Where the corrected binary file goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Keep the corrected file at this path
    File(PathBuf),
    /// Repair into a temporary file that is deleted once the CSV is written
    Temporary,
}

/// The files one repair run works on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub input: PathBuf,
    pub output: OutputTarget,
    pub csv: PathBuf,
}

impl Invocation {
    /// Map positional command line paths to an invocation.
    ///
    /// * `input output csv` keeps the corrected file
    /// * `input csv` only produces the CSV export
    ///
    /// Any other count yields `None`.
    pub fn from_paths(paths: Vec<PathBuf>) -> Option<Self> {
        let mut paths = paths.into_iter();
        match (paths.next(), paths.next(), paths.next(), paths.next()) {
            (Some(input), Some(output), Some(csv), None) => Some(Invocation {
                input,
                output: OutputTarget::File(output),
                csv,
            }),
            (Some(input), Some(csv), None, None) => Some(Invocation {
                input,
                output: OutputTarget::Temporary,
                csv,
            }),
            _ => None,
        }
    }

    pub fn keeps_output(&self) -> bool {
        matches!(self.output, OutputTarget::File(_))
    }
}

/// Knobs of a repair run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairOptions {
    /// Print `Label: N\r` progress counters to stdout
    pub show_progress: bool,
    /// Items between two progress updates
    pub progress_every: u64,
    /// Diagnostics are written here, but only if the file already exists
    pub debug_log: PathBuf,
    /// Directory for the temporary corrected file of a CSV-only run
    pub temp_dir: PathBuf,
}

impl Default for RepairOptions {
    fn default() -> Self {
        RepairOptions {
            show_progress: true,
            progress_every: DEFAULT_PROGRESS_EVERY,
            debug_log: PathBuf::from(DEFAULT_DEBUG_LOG),
            temp_dir: PathBuf::from("."),
        }
    }
}

impl RepairOptions {
    /// Options with progress output switched off
    pub fn quiet() -> Self {
        RepairOptions {
            show_progress: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_three_paths_keep_output() {
        let inv = Invocation::from_paths(paths(&["VT1.nvt", "VT1_fixed.nvt", "VT1.csv"])).unwrap();
        assert_eq!(inv.input, PathBuf::from("VT1.nvt"));
        assert_eq!(inv.output, OutputTarget::File(PathBuf::from("VT1_fixed.nvt")));
        assert_eq!(inv.csv, PathBuf::from("VT1.csv"));
        assert!(inv.keeps_output());
    }

    #[test]
    fn test_two_paths_use_temporary_output() {
        let inv = Invocation::from_paths(paths(&["VT1.nvt", "VT1.csv"])).unwrap();
        assert_eq!(inv.output, OutputTarget::Temporary);
        assert_eq!(inv.csv, PathBuf::from("VT1.csv"));
        assert!(!inv.keeps_output());
    }

    #[test]
    fn test_other_counts_are_rejected() {
        assert!(Invocation::from_paths(paths(&[])).is_none());
        assert!(Invocation::from_paths(paths(&["a"])).is_none());
        assert!(Invocation::from_paths(paths(&["a", "b", "c", "d"])).is_none());
    }

    #[test]
    fn test_default_options() {
        let options = RepairOptions::default();
        assert!(options.show_progress);
        assert_eq!(options.progress_every, 1000);
        assert_eq!(options.debug_log, PathBuf::from("debug.txt"));
        assert!(!RepairOptions::quiet().show_progress);
    }
}
