// src/pipeline.rs
use crate::config::{Invocation, OutputTarget, RepairOptions};
use crate::error::{NvtError, Result};
use crate::progress::Progress;
use crate::reader::{ReadSeek, RecordReader};
use crate::record::RECORD_SIZE;
use crate::scanner::{scan, TrailingRun};
use crate::writer::{copy_header, copy_records, export_csv, Patcher};
use log::{debug, info};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

/// What a repair run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// Complete records found in the input
    pub records: u64,
    /// Zero intervals detected and patched
    pub intervals: u64,
    /// Records rewritten with interpolated positions
    pub patched_records: u64,
    /// Data rows written to the CSV export
    pub csv_rows: u64,
    /// Zero run at the end of the input that could not be patched
    pub trailing_run: Option<TrailingRun>,
}

/// Run the whole repair over open streams.
///
/// Stages run strictly one after the other: header copy, detection, record
/// copy, patching and CSV export. Each stage repositions the streams it
/// uses, so `input` and `output` may be passed in at any position. `output`
/// is written, then read back and rewritten in place, so it must support all
/// three of `Read`, `Write` and `Seek`.
///
/// # Example
///
/// ```
/// use nvtfix::{repair_streams, PositionRecord, Position, RepairOptions, HEADER_SIZE};
/// use std::io::Cursor;
///
/// let mut data = vec![0u8; HEADER_SIZE];
/// for (t, (x, y)) in [(5, 5), (0, 0), (0, 0), (9, 9)].into_iter().enumerate() {
///     let record = PositionRecord::new(t as u64, Position::new(x, y, 0));
///     data.extend_from_slice(record.to_raw().as_bytes());
/// }
///
/// let mut output = Cursor::new(Vec::new());
/// let mut csv = Vec::new();
/// let report = repair_streams(Cursor::new(data), &mut output, &mut csv, &RepairOptions::quiet()).unwrap();
///
/// assert_eq!(report.intervals, 1);
/// assert_eq!(report.patched_records, 3);
/// assert_eq!(
///     String::from_utf8(csv).unwrap(),
///     "TimeStamp,x,y,angle\n0,5,5,0\n1,7,7,0\n2,7,7,0\n3,7,7,0\n"
/// );
/// ```
pub fn repair_streams<R, F, W>(
    input: R,
    output: &mut F,
    csv: W,
    options: &RepairOptions,
) -> Result<RepairReport>
where
    R: ReadSeek,
    F: Read + Write + Seek,
    W: Write,
{
    let mut input = input;
    let header = copy_header(&mut input, output)?;
    debug!("Record size: {}", RECORD_SIZE);
    debug!("Header size: {}", header.len());
    debug!("Scan for zero-entry intervals...\n");

    let mut reader = RecordReader::new(input);

    let mut progress = stage_progress("Detecting", options);
    let outcome = scan(&mut reader, &mut progress)?;
    progress.finish();

    let mut progress = stage_progress("Copying", options);
    copy_records(&mut reader, output, &mut progress)?;
    progress.finish();

    let mut progress = stage_progress("Correction", options);
    let summary = Patcher::new(output).patch_all(outcome.intervals, &mut progress)?;
    progress.finish();

    let mut progress = stage_progress("Dumping", options);
    let mut corrected = RecordReader::new(BufReader::new(&mut *output));
    let csv_rows = export_csv(&mut corrected, csv, &mut progress)?;
    progress.finish();

    Ok(RepairReport {
        records: outcome.records,
        intervals: summary.intervals,
        patched_records: summary.records,
        csv_rows,
        trailing_run: outcome.trailing_run,
    })
}

fn stage_progress(label: &'static str, options: &RepairOptions) -> Progress {
    Progress::new(label, options.progress_every, options.show_progress)
}

/// Open the files named by `invocation` and repair them.
///
/// Files are opened in the order input, corrected output, CSV. For a
/// CSV-only run the corrected output is a temporary file in
/// `options.temp_dir`, removed when the run ends.
pub fn run(invocation: &Invocation, options: &RepairOptions) -> Result<RepairReport> {
    info!("Input file: {}", invocation.input.display());

    let input = open_input(&invocation.input)?;

    let report = match &invocation.output {
        OutputTarget::File(path) => {
            info!("Output file: {}", path.display());
            let mut output = open_output(path)?;
            let csv = create_csv(&invocation.csv)?;
            repair_streams(input, &mut output, csv, options)?
        }
        OutputTarget::Temporary => {
            let mut temp = tempfile::Builder::new()
                .prefix("nvtfix_tmp")
                .suffix(".nvt")
                .tempfile_in(&options.temp_dir)
                .map_err(|source| NvtError::OpenOutput {
                    path: options.temp_dir.clone(),
                    source,
                })?;
            info!("Output file: {} (temporary)", temp.path().display());
            let csv = create_csv(&invocation.csv)?;
            let report = repair_streams(input, temp.as_file_mut(), csv, options)?;
            temp.close()?;
            report
        }
    };

    info!("CSV file: {}", invocation.csv.display());
    Ok(report)
}

/// Convenience wrapper keeping the corrected file at `output`
pub fn repair_files(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    csv: impl AsRef<Path>,
    options: &RepairOptions,
) -> Result<RepairReport> {
    let invocation = Invocation {
        input: input.as_ref().to_path_buf(),
        output: OutputTarget::File(output.as_ref().to_path_buf()),
        csv: csv.as_ref().to_path_buf(),
    };
    run(&invocation, options)
}

#[cfg(not(feature = "mmap"))]
fn open_input(path: &Path) -> Result<impl ReadSeek> {
    Ok(RecordReader::open(path)?.into_inner())
}

#[cfg(feature = "mmap")]
fn open_input(path: &Path) -> Result<impl ReadSeek> {
    Ok(RecordReader::open_mmap(path)?.into_inner())
}

fn open_output(path: &Path) -> Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|source| NvtError::OpenOutput {
            path: path.to_path_buf(),
            source,
        })
}

fn create_csv(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|source| NvtError::OpenOutput {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::build_nvt;
    use std::io::Cursor;

    fn build(positions: &[(i32, i32)]) -> Vec<u8> {
        build_nvt(positions, 1000)
    }

    #[test]
    fn test_clean_input_is_copied_unchanged() {
        let data = build(&[(1, 1), (2, 2), (3, 3)]);
        let mut output = Cursor::new(Vec::new());
        let mut csv = Vec::new();

        let report = repair_streams(Cursor::new(data.clone()), &mut output, &mut csv, &RepairOptions::quiet()).unwrap();

        assert_eq!(report.records, 3);
        assert_eq!(report.intervals, 0);
        assert_eq!(report.csv_rows, 3);
        assert_eq!(output.into_inner(), data);
    }

    #[test]
    fn test_report_includes_trailing_run() {
        let data = build(&[(1, 1), (0, 0), (0, 0)]);
        let mut output = Cursor::new(Vec::new());

        let report = repair_streams(Cursor::new(data.clone()), &mut output, std::io::sink(), &RepairOptions::quiet()).unwrap();

        assert_eq!(report.intervals, 0);
        assert_eq!(report.trailing_run.map(|run| run.length), Some(2));
        assert_eq!(output.into_inner(), data);
    }

    #[test]
    fn test_truncated_header_fails() {
        let mut output = Cursor::new(Vec::new());
        let err = repair_streams(Cursor::new(vec![0u8; 10]), &mut output, std::io::sink(), &RepairOptions::quiet()).unwrap_err();
        assert!(matches!(err, NvtError::TruncatedHeader { .. }));
    }

    #[test]
    fn test_missing_input_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.nvt");
        let err = repair_files(&missing, dir.path().join("out.nvt"), dir.path().join("out.csv"), &RepairOptions::quiet()).unwrap_err();

        match err {
            NvtError::OpenInput { path, .. } => assert_eq!(path, missing),
            other => panic!("expected OpenInput, got {:?}", other),
        }
    }
}
