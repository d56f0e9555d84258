// src/writer/patcher.rs
use crate::error::{NvtError, Result};
use crate::progress::Progress;
use crate::reader::fill_buffer;
use crate::record::{record_offset, RawRecord, RECORD_SIZE};
use crate::scanner::{IntervalQueue, ZeroInterval};
use crate::types::Position;
use log::{debug, info};
use std::io::{Read, Seek, SeekFrom, Write};

/// Totals of a patch pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchSummary {
    pub intervals: u64,
    pub records: u64,
}

/// Random-access rewriter for the output file.
///
/// Each record is patched with its own seek/read/seek/write cycle; the
/// patcher never relies on the stream position left by a previous call.
pub struct Patcher<'a, F: Read + Write + Seek> {
    file: &'a mut F,
    record: RawRecord,
}

impl<'a, F: Read + Write + Seek> Patcher<'a, F> {
    pub fn new(file: &'a mut F) -> Self {
        Patcher { file, record: RawRecord::zeroed() }
    }

    /// Overwrite x, y and angle of every record in the interval's patch
    /// range with the interval's fill value. Timestamps and all other
    /// fields are kept.
    ///
    /// # Returns
    ///
    /// The number of records rewritten
    pub fn patch_interval(&mut self, interval: &ZeroInterval) -> Result<u64> {
        interval.validate()?;

        let fill = interval.fill();
        debug!(
            "patching records {}..={} with {} (from {} and {})",
            interval.start.index + 1,
            interval.stop.index,
            fill,
            interval.start,
            interval.stop
        );

        let mut patched = 0;
        for index in interval.patch_range() {
            self.patch_record(index, fill)?;
            patched += 1;
        }
        Ok(patched)
    }

    fn patch_record(&mut self, index: u64, fill: Position) -> Result<()> {
        let offset = record_offset(index);

        self.file.seek(SeekFrom::Start(offset))?;
        let read = fill_buffer(&mut *self.file, self.record.as_mut_bytes())?;
        if read == 0 {
            return Err(NvtError::MissingRecord { index });
        }
        if read != RECORD_SIZE {
            return Err(NvtError::ShortRecord {
                index,
                expected: RECORD_SIZE,
                found: read,
            });
        }

        self.record.set_position(fill);

        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(self.record.as_bytes())?;
        Ok(())
    }

    /// Patch every interval of the queue in insertion order
    pub fn patch_all(&mut self, queue: IntervalQueue, progress: &mut Progress) -> Result<PatchSummary> {
        let mut summary = PatchSummary::default();
        for interval in queue {
            progress.tick();
            summary.records += self.patch_interval(&interval)?;
            summary.intervals += 1;
        }
        self.file.flush()?;

        info!(
            "patched {} records in {} zero intervals",
            summary.records, summary.intervals
        );
        Ok(summary)
    }
}
