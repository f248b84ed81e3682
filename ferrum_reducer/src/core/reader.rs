use crate::core::record::{decode_line, KeyValue};
use crate::framework::errors::{FerrumReducerError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A line that could not be decoded. The line is dropped, the task goes on.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeWarning {
    pub file: PathBuf,
    /// 1-based
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReadSummary {
    pub files_read: usize,
    pub records_read: usize,
    pub warnings: Vec<DecodeWarning>,
}

/// Streams every record of `paths`, in order, into `on_record`.
///
/// Every path must open; the first one that does not aborts the read with
/// `MissingInputError`. Undecodable lines are reported in the summary.
pub fn read_intermediate_files<F>(paths: &[PathBuf], mut on_record: F) -> Result<ReadSummary>
where
    F: FnMut(KeyValue),
{
    let mut summary = ReadSummary::default();
    for path in paths {
        let file = File::open(path).map_err(|err| {
            FerrumReducerError::MissingInputError(format!("{}: {}", path.display(), err))
        })?;

        // the handle is dropped at the end of this iteration, or on `?`
        read_records(BufReader::new(file), path, &mut on_record, &mut summary)?;
        summary.files_read += 1;
        debug!("consumed intermediate file {}", path.display());
    }
    Ok(summary)
}

/// Decodes newline-delimited records from `reader`. A final line without a
/// terminator is decoded like any other.
pub fn read_records<R, F>(
    mut reader: R,
    path: &Path,
    on_record: &mut F,
    summary: &mut ReadSummary,
) -> Result<()>
where
    R: BufRead,
    F: FnMut(KeyValue),
{
    let mut buf = Vec::new();
    let mut line_number = 0;
    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf).map_err(|err| {
            FerrumReducerError::IntermediateReadError(format!(
                "{} after line {}: {}",
                path.display(),
                line_number,
                err
            ))
        })?;
        if read == 0 {
            return Ok(());
        }
        line_number += 1;

        let line = trim_line_end(&buf);
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        match decode_line(line) {
            Ok(kv) => {
                summary.records_read += 1;
                on_record(kv);
            }
            Err(err) => {
                warn!(
                    "cannot decode line {} of {}: {}",
                    line_number,
                    path.display(),
                    err
                );
                summary.warnings.push(DecodeWarning {
                    file: path.to_path_buf(),
                    line: line_number,
                    message: err.to_string(),
                });
            }
        }
    }
}

fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
