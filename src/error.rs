// src/error.rs
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NvtError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Can't open file {} for reading: {source}", .path.display())]
    OpenInput { path: PathBuf, source: io::Error },

    #[error("Can't open file {} for writing: {source}", .path.display())]
    OpenOutput { path: PathBuf, source: io::Error },

    #[error("Truncated header: expected {expected} bytes, found {found}")]
    TruncatedHeader { expected: usize, found: usize },

    #[error("Invalid record length: expected {expected} bytes, found {found}")]
    InvalidRecordLength { expected: usize, found: usize },

    #[error("Algorithm error. interval start ({start}) >= interval stop ({stop})")]
    InvalidInterval { start: u64, stop: u64 },

    #[error("Algorithm error. Wrong record size at record {index}: expected {expected} bytes, read {found}")]
    ShortRecord { index: u64, expected: usize, found: usize },

    #[error("Algorithm error. Record {index} is past the end of the output")]
    MissingRecord { index: u64 },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl NvtError {
    /// True for failures that indicate a broken invariant rather than bad input
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            NvtError::InvalidInterval { .. }
                | NvtError::ShortRecord { .. }
                | NvtError::MissingRecord { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, NvtError>;
