// src/reader/mod.rs
mod record_reader;

pub use record_reader::{record_count, ReadSeek, RecordIter, RecordReader};
pub(crate) use record_reader::fill_buffer;
