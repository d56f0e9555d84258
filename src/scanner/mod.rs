// src/scanner/mod.rs
mod interval;
mod zero_scanner;

pub use interval::{IntervalQueue, ZeroInterval};
pub use zero_scanner::{scan, ScanOutcome, ScanState, Scanner, TrailingRun};
