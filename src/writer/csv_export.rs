// src/writer/csv_export.rs
use crate::error::Result;
use crate::progress::Progress;
use crate::reader::{ReadSeek, RecordReader};
use crate::record::RawRecord;
use log::info;
use std::io::Write;

/// Column names of the exported table
pub const CSV_HEADER: [&str; 4] = ["TimeStamp", "x", "y", "angle"];

/// Export stage: stream every record of `reader` from the start of the record
/// area and write one `timestamp,x,y,angle` row per record after the header
/// row.
///
/// # Returns
///
/// The number of data rows written
pub fn export_csv<R, W>(reader: &mut RecordReader<R>, sink: W, progress: &mut Progress) -> Result<u64>
where
    R: ReadSeek,
    W: Write,
{
    reader.rewind()?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(sink);
    writer.write_record(CSV_HEADER)?;

    let mut record = RawRecord::zeroed();
    let mut rows = 0u64;
    while reader.read_next(&mut record)?.is_some() {
        progress.tick();
        writer.write_record(&[
            record.timestamp().to_string(),
            record.x().to_string(),
            record.y().to_string(),
            record.angle().to_string(),
        ])?;
        rows += 1;
    }
    writer.flush()?;

    info!("exported {} rows", rows);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{PositionRecord, HEADER_SIZE};
    use crate::types::Position;
    use std::io::Cursor;

    #[test]
    fn test_export_format() {
        let mut data = vec![0u8; HEADER_SIZE];
        for record in [
            PositionRecord::new(1_234_567_890_123, Position::new(10, 20, 30)),
            PositionRecord::new(u64::MAX, Position::new(-1, 0, -359)),
        ] {
            data.extend_from_slice(record.to_raw().as_bytes());
        }

        let mut reader = RecordReader::new(Cursor::new(data));
        let mut out = Vec::new();
        let rows = export_csv(&mut reader, &mut out, &mut Progress::hidden("Dumping")).unwrap();

        assert_eq!(rows, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "TimeStamp,x,y,angle\n\
             1234567890123,10,20,30\n\
             18446744073709551615,-1,0,-359\n"
        );
    }

    #[test]
    fn test_export_empty_record_area() {
        let mut reader = RecordReader::new(Cursor::new(vec![0u8; HEADER_SIZE]));
        let mut out = Vec::new();
        let rows = export_csv(&mut reader, &mut out, &mut Progress::hidden("Dumping")).unwrap();

        assert_eq!(rows, 0);
        assert_eq!(out, b"TimeStamp,x,y,angle\n");
    }
}
