//! Shared input loading for the subcommands.

use std::path::Path;

use anyhow::{Context, Result};
use homog_calendar::{CalendarKind, FormatTemplate};
use homog_io::read_time_coordinate;
use homog_timecheck::{Frequency, TimeAxis};
use tracing::info;

use crate::config::HomogConfig;
use crate::convert;

/// A loaded time axis and the data variables that share it.
pub struct Input {
    pub axis: TimeAxis,
    pub variables: Vec<String>,
    /// Template the text axis was read with; derived axis files reuse it.
    pub template: FormatTemplate,
}

/// Reads `path` with `[io]` settings and CLI overrides applied.
pub fn load(
    config: &HomogConfig,
    path: &Path,
    time_var: Option<&str>,
    calendar: Option<CalendarKind>,
    frequency: Option<Frequency>,
    format: Option<&str>,
) -> Result<Input> {
    let reader_cfg =
        convert::build_reader_config(&config.io, time_var, calendar, frequency, format)?;
    info!(path = %path.display(), "reading time coordinate");
    let coordinate = read_time_coordinate(path, &reader_cfg)
        .with_context(|| format!("failed to read time coordinate: {}", path.display()))?;
    let variables = coordinate.variables.clone();
    let axis = coordinate
        .into_axis()
        .with_context(|| format!("invalid time axis in {}", path.display()))?;
    Ok(Input {
        axis,
        variables,
        template: reader_cfg.template().clone(),
    })
}
