// src/writer/copier.rs
use crate::error::Result;
use crate::progress::Progress;
use crate::reader::{ReadSeek, RecordReader};
use crate::record::{FileHeader, RawRecord, HEADER_SIZE, RECORD_SIZE};
use log::info;
use std::io::{BufWriter, Seek, SeekFrom, Write};

/// Copy the header of the input to offset 0 of the output
pub fn copy_header<R, W>(input: &mut R, output: &mut W) -> Result<FileHeader>
where
    R: ReadSeek,
    W: Write + Seek,
{
    let header = FileHeader::read(input)?;
    header.write_to(output)?;
    Ok(header)
}

/// Copy every complete record of `input` to the record area of `output`.
///
/// Both streams are repositioned explicitly: the input to its first record,
/// the output to the end of the header. Records are copied byte for byte. A
/// partial record at the end of the input is not copied.
///
/// # Returns
///
/// The number of records copied
pub fn copy_records<R, W>(
    input: &mut RecordReader<R>,
    output: &mut W,
    progress: &mut Progress,
) -> Result<u64>
where
    R: ReadSeek,
    W: Write + Seek,
{
    input.rewind()?;
    output.seek(SeekFrom::Start(HEADER_SIZE as u64))?;

    let mut writer = BufWriter::with_capacity(64 * RECORD_SIZE, &mut *output);
    let mut record = RawRecord::zeroed();
    let mut copied = 0u64;

    while input.read_next(&mut record)?.is_some() {
        progress.tick();
        writer.write_all(record.as_bytes())?;
        copied += 1;
    }
    writer.flush()?;

    info!("copied {} records", copied);
    Ok(copied)
}
