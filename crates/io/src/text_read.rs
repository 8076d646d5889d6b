//! Plain-text time coordinates: one timestamp per line.
//!
//! Blank lines are skipped and `#` starts a comment. A comment of the form
//! `# key: value` is a header directive; `calendar`, `frequency` and
//! `variables` (comma-separated) are recognised, anything else is ignored.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use homog_calendar::{CalendarKind, CalendarTimestamp, FormatTemplate};
use homog_timecheck::{Frequency, Mode, RawTime, str_to_timestamp_with, to_calendar_timestamp};
use tracing::debug;

use crate::error::IoError;

/// Contents of a text axis file before timestamps are parsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct TextAxis {
    /// Timestamp lines with their 1-based line numbers.
    pub(crate) lines: Vec<(usize, String)>,
    pub(crate) calendar: Option<CalendarKind>,
    pub(crate) frequency: Option<Frequency>,
    pub(crate) variables: Vec<String>,
}

pub(crate) fn read_text_file(path: &Path) -> Result<TextAxis, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_text(&content)
}

/// Splits `content` into directives and timestamp lines.
pub(crate) fn parse_text(content: &str) -> Result<TextAxis, IoError> {
    let mut axis = TextAxis::default();
    for (i, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let Some(comment) = line.strip_prefix('#') else {
            axis.lines.push((i + 1, line.to_string()));
            continue;
        };
        let Some((key, value)) = comment.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "calendar" => axis.calendar = Some(value.parse::<CalendarKind>()?),
            "frequency" => axis.frequency = Some(value.parse::<Frequency>()?),
            "variables" => {
                axis.variables = value
                    .split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(String::from)
                    .collect();
            }
            other => debug!(directive = other, "ignoring unknown header directive"),
        }
    }
    Ok(axis)
}

/// Parses every timestamp line in start mode.
///
/// Without a declared `calendar` the lines are plain Gregorian date-times
/// and end up tagged `standard`.
///
/// # Errors
///
/// Returns [`IoError::InvalidTime`] naming the first line that does not
/// parse.
pub(crate) fn parse_lines(
    lines: &[(usize, String)],
    template: &FormatTemplate,
    calendar: Option<CalendarKind>,
) -> Result<Vec<CalendarTimestamp>, IoError> {
    lines
        .iter()
        .map(|(n, text)| {
            let invalid = |e: &dyn std::fmt::Display| IoError::InvalidTime {
                reason: format!("line {n}: {e}"),
            };
            let raw = match calendar {
                Some(kind) => str_to_timestamp_with(text, template, Mode::Start, kind)
                    .map(RawTime::Calendar)
                    .map_err(|e| invalid(&e))?,
                None => RawTime::Naive(parse_naive(text, template).map_err(|e| invalid(&e))?),
            };
            to_calendar_timestamp(raw).map_err(|e| invalid(&e))
        })
        .collect()
}

fn parse_naive(text: &str, template: &FormatTemplate) -> Result<NaiveDateTime, IoError> {
    let t = str_to_timestamp_with(text, template, Mode::Start, CalendarKind::ProlepticGregorian)?;
    NaiveDate::from_ymd_opt(t.year(), t.month().into(), t.day().into())
        .and_then(|d| {
            d.and_hms_micro_opt(
                t.hour().into(),
                t.minute().into(),
                t.second().into(),
                t.microsecond(),
            )
        })
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("{text} is not a Gregorian date-time"),
        })
}
