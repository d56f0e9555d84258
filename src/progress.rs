// src/progress.rs
use std::io::{self, Write};

/// Default number of items between two progress updates
pub const DEFAULT_PROGRESS_EVERY: u64 = 1000;

/// Carriage-return progress counter for one pipeline stage.
///
/// Every `every` items the counter prints `Label: N\r` to stdout, where `N`
/// is the number of completed blocks. [`finish`](Progress::finish) ends the
/// line. A hidden counter still counts but never prints.
#[derive(Debug)]
pub struct Progress {
    label: &'static str,
    every: u64,
    pending: u64,
    blocks: u64,
    visible: bool,
}

impl Progress {
    pub fn new(label: &'static str, every: u64, visible: bool) -> Self {
        Progress {
            label,
            every: every.max(1),
            pending: 0,
            blocks: 0,
            visible,
        }
    }

    pub fn hidden(label: &'static str) -> Self {
        Self::new(label, DEFAULT_PROGRESS_EVERY, false)
    }

    /// Count one item
    pub fn tick(&mut self) {
        self.pending += 1;
        if self.pending == self.every {
            self.pending = 0;
            self.blocks += 1;
            if self.visible {
                let mut out = io::stdout().lock();
                // Progress output is informational; a closed stdout is ignored
                let _ = write!(out, "{}: {}\r", self.label, self.blocks);
                let _ = out.flush();
            }
        }
    }

    /// Number of completed blocks of `every` items
    pub fn blocks(&self) -> u64 {
        self.blocks
    }

    /// Total items counted so far
    pub fn count(&self) -> u64 {
        self.blocks * self.every + self.pending
    }

    pub fn finish(self) {
        if self.visible {
            println!();
        }
    }
}
