//! High-level time-coordinate reader configuration and orchestration.

use std::path::Path;

use homog_calendar::{CalendarKind, CalendarTimestamp, FormatTemplate};
use homog_timecheck::{Frequency, TimeAxis};
use tracing::{debug, info};

use crate::error::IoError;
use crate::text_read;

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for reading a time coordinate.
///
/// The [`Default`] implementation reads the CF `time` variable, takes the
/// calendar and frequency from the file, and parses text timestamps with
/// [`homog_calendar::DEFAULT_TEMPLATE`]. Overrides set with the `with_*`
/// builder methods win over whatever the file declares.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// NetCDF variable name for the time axis.
    time_var: String,
    /// Calendar that replaces the file's own declaration.
    calendar: Option<CalendarKind>,
    /// Frequency that replaces the file's own declaration.
    frequency: Option<Frequency>,
    /// Template for timestamps in text files.
    template: FormatTemplate,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            time_var: "time".into(),
            calendar: None,
            frequency: None,
            template: FormatTemplate::default(),
        }
    }
}

impl ReaderConfig {
    /// Set the time variable name.
    pub fn with_time_var(mut self, name: impl Into<String>) -> Self {
        self.time_var = name.into();
        self
    }

    /// Override the calendar, or `None` to use the file's.
    pub fn with_calendar(mut self, calendar: Option<CalendarKind>) -> Self {
        self.calendar = calendar;
        self
    }

    /// Override the frequency, or `None` to use the file's.
    pub fn with_frequency(mut self, frequency: Option<Frequency>) -> Self {
        self.frequency = frequency;
        self
    }

    /// Set the template used for text timestamps.
    pub fn with_template(mut self, template: FormatTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn time_var(&self) -> &str {
        &self.time_var
    }

    /// Template used for text timestamps.
    pub fn template(&self) -> &FormatTemplate {
        &self.template
    }
}

// ---------------------------------------------------------------------------
// TimeCoordinate
// ---------------------------------------------------------------------------

/// A decoded time coordinate and what the file says about it.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeCoordinate {
    /// Timestamps in file order.
    pub values: Vec<CalendarTimestamp>,
    pub calendar: CalendarKind,
    /// Declared frequency, if any.
    pub frequency: Option<Frequency>,
    /// Names of the data variables sharing this time axis.
    pub variables: Vec<String>,
}

impl TimeCoordinate {
    /// Converts into a [`TimeAxis`] carrying the declared frequency.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::TimeCheck`] if a value does not exist in the
    /// coordinate's calendar.
    pub fn into_axis(self) -> Result<TimeAxis, IoError> {
        Ok(TimeAxis::new(self.values, self.calendar)?.with_frequency(self.frequency))
    }
}

// ---------------------------------------------------------------------------
// Format detection
// ---------------------------------------------------------------------------

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// One timestamp per line.
    Text,
    /// A CF NetCDF file.
    Netcdf,
}

impl InputFormat {
    /// Picks the format from the file extension; anything that is not
    /// `.nc`, `.nc4` or `.netcdf` is read as text.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("nc" | "nc4" | "netcdf") => Self::Netcdf,
            _ => Self::Text,
        }
    }
}

// ---------------------------------------------------------------------------
// read_time_coordinate
// ---------------------------------------------------------------------------

/// Read the time coordinate of a text or NetCDF file.
///
/// When the file names no data variables, the file stem is used as the
/// single variable name so that reports always have a key.
///
/// # Errors
///
/// Returns [`IoError`] on missing files, undecodable timestamps, unknown
/// calendar or frequency declarations, or NetCDF input in a build without
/// the `netcdf` feature.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn read_time_coordinate(path: &Path, config: &ReaderConfig) -> Result<TimeCoordinate, IoError> {
    let format = InputFormat::from_path(path);
    debug!(?format, "detected input format");

    let mut coordinate = match format {
        InputFormat::Text => read_text(path, config)?,
        InputFormat::Netcdf => read_netcdf(path, config)?,
    };

    if coordinate.variables.is_empty() {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("data")
            .to_string();
        coordinate.variables.push(stem);
    }

    info!(
        n = coordinate.values.len(),
        calendar = %coordinate.calendar,
        frequency = coordinate.frequency.map(Frequency::cf_token),
        "read time coordinate",
    );
    Ok(coordinate)
}

fn read_text(path: &Path, config: &ReaderConfig) -> Result<TimeCoordinate, IoError> {
    let axis = text_read::read_text_file(path)?;
    let declared = config.calendar.or(axis.calendar);
    let values = text_read::parse_lines(&axis.lines, &config.template, declared)?;
    Ok(TimeCoordinate {
        values,
        calendar: declared.unwrap_or_default(),
        frequency: config.frequency.or(axis.frequency),
        variables: axis.variables,
    })
}

#[cfg(feature = "netcdf")]
fn read_netcdf(path: &Path, config: &ReaderConfig) -> Result<TimeCoordinate, IoError> {
    let raw = crate::netcdf_read::read_time(path, &config.time_var)?;

    let calendar = match (config.calendar, raw.calendar.as_deref()) {
        (Some(calendar), _) => calendar,
        (None, Some(name)) => name.parse()?,
        (None, None) => CalendarKind::default(),
    };

    let values = homog_timecheck::decode_time_coordinate(&raw.offsets, &raw.units, Some(calendar))
        .map_err(|e| IoError::InvalidTime {
            reason: e.to_string(),
        })?;

    let declared = raw
        .frequency
        .as_deref()
        .and_then(|token| match token.parse::<Frequency>() {
            Ok(frequency) => Some(frequency),
            Err(e) => {
                tracing::warn!(%e, "ignoring frequency attribute");
                None
            }
        });

    Ok(TimeCoordinate {
        values,
        calendar,
        frequency: config.frequency.or(declared),
        variables: raw.variables,
    })
}

#[cfg(not(feature = "netcdf"))]
fn read_netcdf(path: &Path, _config: &ReaderConfig) -> Result<TimeCoordinate, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Err(IoError::UnsupportedFormat {
        path: path.to_path_buf(),
        reason: "built without the `netcdf` feature".to_string(),
    })
}
