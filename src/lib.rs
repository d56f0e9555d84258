// src/lib.rs
//! # nvtfix
//!
//! Repair Neuralynx video tracker (`.nvt`) recordings in which the tracker
//! lost the animal and wrote `(0, 0)` positions.
//!
//! An NVT file is a 16 KiB opaque header followed by fixed-size position
//! records. The repair runs in strictly sequential stages:
//!
//! 1. **Detect**: scan every record and collect each run of zero positions
//!    together with the record before it and the first non-zero record after it.
//! 2. **Copy**: duplicate header and records into the output.
//! 3. **Patch**: rewrite every record after the run's left boundary up to and
//!    including its right boundary with the truncated average of both
//!    boundaries.
//! 4. **Export**: dump `TimeStamp,x,y,angle` rows of the corrected file to CSV.
//!
//! A zero run that reaches the end of the file has no right boundary and is
//! left untouched.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nvtfix::*;
//!
//! fn main() -> Result<()> {
//!     let report = repair_files("VT1.nvt", "VT1_fixed.nvt", "VT1.csv", &RepairOptions::default())?;
//!     println!("patched {} records in {} intervals", report.patched_records, report.intervals);
//!     Ok(())
//! }
//! ```
//!
//! ### Running the stages yourself
//!
//! ```rust,no_run
//! use nvtfix::*;
//!
//! fn main() -> Result<()> {
//!     let mut reader = RecordReader::open("VT1.nvt")?;
//!     let outcome = scan(&mut reader, &mut Progress::hidden("Detecting"))?;
//!
//!     for interval in outcome.intervals.iter() {
//!         println!("{} -> {}: fill {}", interval.start, interval.stop, interval.fill());
//!     }
//!     Ok(())
//! }
//! ```

// Modules
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod progress;
pub mod reader;
pub mod record;
pub mod scanner;
pub mod types;
pub mod writer;

// Re-export commonly used types at the crate root for convenience
pub use error::{NvtError, Result};

pub use types::{Boundary, Position};

pub use config::{Invocation, OutputTarget, RepairOptions};

pub use record::{
    record_offset,
    FieldSpec,
    FileHeader,
    PositionRecord,
    RawRecord,
    HEADER_SIZE,
    RECORD_SIZE,
};

pub use reader::{RecordReader, RecordIter};

pub use scanner::{
    scan,
    IntervalQueue,
    ScanOutcome,
    ScanState,
    Scanner,
    TrailingRun,
    ZeroInterval,
};

pub use writer::{copy_header, copy_records, export_csv, PatchSummary, Patcher, CSV_HEADER};

pub use pipeline::{repair_files, repair_streams, run, RepairReport};

pub use progress::Progress;

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use nvtfix::prelude::*;
    //! ```

    pub use crate::config::{Invocation, RepairOptions};
    pub use crate::error::{NvtError, Result};
    pub use crate::pipeline::{repair_files, repair_streams, RepairReport};
    pub use crate::types::Position;
}

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert!(!LIBRARY_VERSION.is_empty());
    }

    #[test]
    fn test_layout_constants() {
        assert_eq!(HEADER_SIZE, 0x4000);
        assert_eq!(RECORD_SIZE, 1828);
        assert_eq!(record_offset(2), 0x4000 + 2 * 1828);
    }

    #[test]
    fn test_csv_header() {
        assert_eq!(CSV_HEADER.join(","), "TimeStamp,x,y,angle");
    }
}
