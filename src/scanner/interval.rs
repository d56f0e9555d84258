// src/scanner/interval.rs
use crate::error::{NvtError, Result};
use crate::types::{Boundary, Position};
use std::collections::VecDeque;
use std::ops::RangeInclusive;

/// One closed run of zero records.
///
/// `start` is the record scanned just before the run and `stop` is the first
/// non-zero record after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroInterval {
    pub start: Boundary,
    pub stop: Boundary,
}

impl ZeroInterval {
    pub fn new(start: Boundary, stop: Boundary) -> Self {
        ZeroInterval { start, stop }
    }

    /// Check `start < stop`
    pub fn validate(&self) -> Result<()> {
        if self.start.index >= self.stop.index {
            return Err(NvtError::InvalidInterval {
                start: self.start.index,
                stop: self.stop.index,
            });
        }
        Ok(())
    }

    /// Indices rewritten by the patcher: `start + 1 ..= stop`.
    ///
    /// The stop record is part of the range and receives the interpolated
    /// value as well.
    pub fn patch_range(&self) -> RangeInclusive<u64> {
        (self.start.index + 1)..=self.stop.index
    }

    /// Number of zero records between the boundaries
    pub fn zero_count(&self) -> u64 {
        self.stop.index.saturating_sub(self.start.index + 1)
    }

    /// Value written over every record of the patch range
    pub fn fill(&self) -> Position {
        self.start.position.midpoint(&self.stop.position)
    }
}

/// First-in first-out queue of zero intervals in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalQueue {
    intervals: VecDeque<ZeroInterval>,
}

impl IntervalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, interval: ZeroInterval) {
        self.intervals.push_back(interval);
    }

    pub fn pop(&mut self) -> Option<ZeroInterval> {
        self.intervals.pop_front()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ZeroInterval> {
        self.intervals.iter()
    }
}

impl IntoIterator for IntervalQueue {
    type Item = ZeroInterval;
    type IntoIter = std::collections::vec_deque::IntoIter<ZeroInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.into_iter()
    }
}

impl FromIterator<ZeroInterval> for IntervalQueue {
    fn from_iter<I: IntoIterator<Item = ZeroInterval>>(iter: I) -> Self {
        IntervalQueue { intervals: iter.into_iter().collect() }
    }
}
