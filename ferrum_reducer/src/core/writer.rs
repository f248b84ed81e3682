use crate::core::record::{encode_line, KeyValue};
use crate::framework::errors::{FerrumReducerError, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Writes one record per key to `path` and syncs the file before returning.
/// Returns the number of records written.
pub fn write_output_file(path: &Path, results: BTreeMap<String, String>) -> Result<usize> {
    let file = File::create(path).map_err(|err| {
        FerrumReducerError::OutputCreateError(format!("{}: {}", path.display(), err))
    })?;

    let mut writer = BufWriter::new(file);
    let written = write_records(&mut writer, results)?;

    let file = writer
        .into_inner()
        .map_err(|err| flush_error(path, err.error()))?;
    file.sync_all().map_err(|err| flush_error(path, &err))?;

    debug!("wrote {} records to {}", written, path.display());
    Ok(written)
}

/// Encodes every (key, result) pair as a record line and flushes `writer`.
pub fn write_records<W: Write>(writer: &mut W, results: BTreeMap<String, String>) -> Result<usize> {
    let mut written = 0;
    for (key, value) in results {
        let line = encode_line(&KeyValue { key, value })
            .map_err(|err| FerrumReducerError::OutputWriteError(err.to_string()))?;
        writer
            .write_all(line.as_bytes())
            .map_err(|err| FerrumReducerError::OutputWriteError(err.to_string()))?;
        written += 1;
    }
    writer
        .flush()
        .map_err(|err| FerrumReducerError::FlushError(err.to_string()))?;
    Ok(written)
}

fn flush_error(path: &Path, err: &std::io::Error) -> FerrumReducerError {
    FerrumReducerError::FlushError(format!("{}: {}", path.display(), err))
}
