//! Report and corrected-axis writers.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use homog_calendar::FormatTemplate;
use homog_timecheck::{TimeAxis, date_to_str};
use serde::Serialize;
use tracing::info;

use crate::error::IoError;

fn create(path: &Path) -> Result<BufWriter<File>, IoError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| IoError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Write `value` as pretty-printed JSON followed by a newline.
///
/// # Errors
///
/// Returns [`IoError::Write`] if the file cannot be written and
/// [`IoError::Serialization`] if `value` cannot be serialized.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), IoError> {
    let mut out = create(path)?;
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)
        .and_then(|()| out.flush())
        .map_err(|source| IoError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    info!(path = %path.display(), "wrote JSON");
    Ok(())
}

/// Write `axis` as a text axis file that [`crate::read_time_coordinate`]
/// reads back.
///
/// The header carries `calendar` and, when known, `frequency` directives
/// and the `variables` list if it is non-empty.
///
/// # Errors
///
/// Returns [`IoError::Write`] if the file cannot be written.
pub fn write_axis_text(
    path: &Path,
    axis: &TimeAxis,
    variables: &[String],
    template: &FormatTemplate,
) -> Result<(), IoError> {
    let mut out = create(path)?;
    let io = |source| IoError::Write {
        path: path.to_path_buf(),
        source,
    };

    writeln!(out, "# calendar: {}", axis.calendar()).map_err(io)?;
    if let Some(frequency) = axis.frequency() {
        writeln!(out, "# frequency: {frequency}").map_err(io)?;
    }
    if !variables.is_empty() {
        writeln!(out, "# variables: {}", variables.join(", ")).map_err(io)?;
    }
    for value in axis.values() {
        writeln!(out, "{}", date_to_str(value, template)).map_err(io)?;
    }
    out.flush().map_err(io)?;

    info!(path = %path.display(), n = axis.len(), "wrote time axis");
    Ok(())
}
