// src/reader/record_reader.rs
use crate::error::{NvtError, Result};
use crate::record::{RawRecord, HEADER_SIZE, RECORD_SIZE};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

#[cfg(feature = "mmap")]
use memmap2::Mmap;
#[cfg(feature = "mmap")]
use std::io::Cursor;

/// Trait alias for Read + Seek
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/// Sequential reader over the record area of an NVT stream.
///
/// The reader tracks the index of the next record. A partial record at the
/// end of the stream is treated as end of data, never as an error.
pub struct RecordReader<R: ReadSeek> {
    inner: R,
    next_index: u64,
}

/// Constructor for standard file I/O
impl RecordReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| NvtError::OpenInput {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(RecordReader::new(BufReader::with_capacity(64 * RECORD_SIZE, file)))
    }
}

/// Constructor for memory-mapped file I/O (requires "mmap" feature)
#[cfg(feature = "mmap")]
impl RecordReader<Cursor<Mmap>> {
    pub fn open_mmap(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| NvtError::OpenInput {
            path: path.to_path_buf(),
            source,
        })?;
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(RecordReader::new(Cursor::new(mmap)))
    }
}

impl<R: ReadSeek> RecordReader<R> {
    /// Wrap a stream. The caller must [`rewind`](Self::rewind) before reading
    /// records unless the stream is already positioned at the record area.
    pub fn new(inner: R) -> Self {
        RecordReader { inner, next_index: 0 }
    }

    /// Seek to the first record and reset the record index
    pub fn rewind(&mut self) -> Result<()> {
        self.inner.seek(SeekFrom::Start(HEADER_SIZE as u64))?;
        self.next_index = 0;
        Ok(())
    }

    /// Read the next complete record into `record`.
    ///
    /// # Returns
    ///
    /// `Some(index)` of the record just read, or `None` once the stream has
    /// no complete record left
    pub fn read_next(&mut self, record: &mut RawRecord) -> Result<Option<u64>> {
        let filled = fill_buffer(&mut self.inner, record.as_mut_bytes())?;
        if filled < RECORD_SIZE {
            return Ok(None);
        }
        let index = self.next_index;
        self.next_index += 1;
        Ok(Some(index))
    }

    /// Index the next call to [`read_next`](Self::read_next) will return
    pub fn position(&self) -> u64 {
        self.next_index
    }

    /// Iterate over the remaining records
    pub fn records(&mut self) -> RecordIter<'_, R> {
        RecordIter { reader: self, done: false }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// Iterator over `(index, record)` pairs, returned by [`RecordReader::records`]
pub struct RecordIter<'a, R: ReadSeek> {
    reader: &'a mut RecordReader<R>,
    done: bool,
}

impl<'a, R: ReadSeek> Iterator for RecordIter<'a, R> {
    type Item = Result<(u64, RawRecord)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut record = RawRecord::zeroed();
        match self.reader.read_next(&mut record) {
            Ok(Some(index)) => Some(Ok((index, record))),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Read until `buf` is full or the stream ends.
///
/// Returns the number of bytes read, which is less than `buf.len()` only at
/// end of stream.
pub(crate) fn fill_buffer<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

/// Number of complete records following the header in a stream of
/// `stream_len` bytes
pub fn record_count(stream_len: u64) -> u64 {
    stream_len.saturating_sub(HEADER_SIZE as u64) / RECORD_SIZE as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PositionRecord;
    use crate::types::Position;
    use std::io::Cursor;

    fn build_stream(count: u64, trailing_bytes: usize) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_SIZE];
        for i in 0..count {
            let record = PositionRecord::new(i * 10, Position::new(i as i32, 1, 0));
            data.extend_from_slice(record.to_raw().as_bytes());
        }
        data.extend(std::iter::repeat(0xFF).take(trailing_bytes));
        data
    }

    #[test]
    fn test_reads_all_records_in_order() {
        let mut reader = RecordReader::new(Cursor::new(build_stream(5, 0)));
        reader.rewind().unwrap();

        let records: Vec<_> = reader.records().collect::<Result<_>>().unwrap();
        assert_eq!(records.len(), 5);
        for (expected, (index, record)) in records.iter().enumerate() {
            assert_eq!(*index, expected as u64);
            assert_eq!(record.timestamp(), expected as u64 * 10);
            assert_eq!(record.x(), expected as i32);
        }
    }

    #[test]
    fn test_partial_trailing_record_ends_stream() {
        let mut reader = RecordReader::new(Cursor::new(build_stream(3, RECORD_SIZE / 2)));
        reader.rewind().unwrap();

        let mut record = RawRecord::zeroed();
        let mut count = 0;
        while reader.read_next(&mut record).unwrap().is_some() {
            count += 1;
        }
        assert_eq!(count, 3);
        assert_eq!(reader.position(), 3);
    }

    #[test]
    fn test_rewind_resets_index() {
        let mut reader = RecordReader::new(Cursor::new(build_stream(2, 0)));
        reader.rewind().unwrap();
        assert_eq!(reader.records().count(), 2);

        reader.rewind().unwrap();
        assert_eq!(reader.position(), 0);
        let first = reader.records().next().unwrap().unwrap();
        assert_eq!(first.0, 0);
    }

    #[test]
    fn test_header_only_stream_has_no_records() {
        let mut reader = RecordReader::new(Cursor::new(vec![0u8; HEADER_SIZE]));
        reader.rewind().unwrap();
        assert_eq!(reader.records().count(), 0);
    }

    #[test]
    fn test_record_count() {
        assert_eq!(record_count(0), 0);
        assert_eq!(record_count(HEADER_SIZE as u64), 0);
        assert_eq!(record_count((HEADER_SIZE + RECORD_SIZE * 3 + 7) as u64), 3);
    }
}
