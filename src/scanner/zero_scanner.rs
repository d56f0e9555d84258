// src/scanner/zero_scanner.rs
use crate::error::Result;
use crate::progress::Progress;
use crate::reader::{ReadSeek, RecordReader};
use crate::record::RawRecord;
use crate::scanner::{IntervalQueue, ZeroInterval};
use crate::types::{Boundary, Position};
use log::{debug, info, trace, warn};

/// Run state of the zero detector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// The last record seen was not part of a zero run
    Outside,
    /// A zero run is open; `start` is the record scanned right before it
    InsideRun { start: Boundary },
}

/// A zero run still open when the stream ended. It is reported but never
/// patched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailingRun {
    pub start: Boundary,
    /// Number of records after `start` up to the end of the stream
    pub length: u64,
}

/// Result of the detection stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    pub intervals: IntervalQueue,
    /// Number of complete records scanned
    pub records: u64,
    pub trailing_run: Option<TrailingRun>,
}

/// Zero-run detector.
///
/// Feed records in file order with [`observe`](Scanner::observe); every time
/// a run closes the resulting [`ZeroInterval`] is appended to the queue.
///
/// The "previous record" state is overwritten after every record, zero or
/// not. It starts zeroed (index 0, position (0, 0, 0)), so a run at the very
/// beginning of the file is bounded on the left by that zeroed state.
#[derive(Debug, Clone)]
pub struct Scanner {
    state: ScanState,
    previous: Boundary,
    next_index: u64,
    queue: IntervalQueue,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    pub fn new() -> Self {
        Scanner {
            state: ScanState::Outside,
            previous: Boundary::default(),
            next_index: 0,
            queue: IntervalQueue::new(),
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn previous(&self) -> Boundary {
        self.previous
    }

    /// Consume the next record's position.
    ///
    /// # Returns
    ///
    /// The interval closed by this record, if any (it has also been queued)
    pub fn observe(&mut self, position: Position) -> Option<ZeroInterval> {
        let current = Boundary::new(self.next_index, position);
        let mut closed = None;

        match self.state {
            ScanState::Outside if position.is_zero() => {
                debug!("------- Zero-interval start -------");
                debug!("{}", self.previous.index);
                self.state = ScanState::InsideRun { start: self.previous };
            }
            ScanState::InsideRun { start } if !position.is_zero() => {
                let interval = ZeroInterval::new(start, current);
                debug!("{}", current.index);
                debug!("-------- Zero-interval end --------");
                self.queue.push(interval);
                self.state = ScanState::Outside;
                closed = Some(interval);
            }
            _ => {}
        }

        self.previous = current;
        self.next_index += 1;
        closed
    }

    /// Finish the scan. A run still open is returned as a [`TrailingRun`]
    /// and left out of the queue.
    pub fn finish(self) -> ScanOutcome {
        let trailing_run = match self.state {
            ScanState::InsideRun { start } => Some(TrailingRun {
                start,
                length: self.next_index.saturating_sub(start.index + 1),
            }),
            ScanState::Outside => None,
        };

        ScanOutcome {
            intervals: self.queue,
            records: self.next_index,
            trailing_run,
        }
    }
}

/// Detection stage: scan every record of `reader` from the start of the
/// record area and collect the closed zero intervals.
pub fn scan<R: ReadSeek>(reader: &mut RecordReader<R>, progress: &mut Progress) -> Result<ScanOutcome> {
    reader.rewind()?;

    let mut scanner = Scanner::new();
    let mut record = RawRecord::zeroed();

    while reader.read_next(&mut record)?.is_some() {
        progress.tick();
        scanner.observe(record.position());

        trace!("TimeStamp {}", record.timestamp());
        trace!("Xpos {}", record.x());
        trace!("Ypos {}", record.y());
        trace!("Angle {}\n", record.angle());
    }

    let outcome = scanner.finish();
    debug!("zero intervals found: {}", outcome.intervals.len());
    info!(
        "scanned {} records, {} zero intervals",
        outcome.records,
        outcome.intervals.len()
    );
    if let Some(run) = outcome.trailing_run {
        warn!(
            "{} zero records after record {} run to end of file and are left unpatched",
            run.length, run.start.index
        );
    }

    Ok(outcome)
}
