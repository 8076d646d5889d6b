//! Per-variable timestamp diagnostics.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use homog_calendar::{CalendarKind, CalendarTimestamp, FormatTemplate};
use serde::{Deserialize, Serialize};

use crate::diff::{AxisDiff, diff_axis, retained_indices};
use crate::error::TimeCheckError;
use crate::frequency::Frequency;

/// A category of irregular timestamps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    Duplicates,
    Redundants,
    Missings,
}

impl CheckKind {
    /// Every check, in reporting order.
    pub const ALL: [CheckKind; 3] = [CheckKind::Duplicates, CheckKind::Redundants, CheckKind::Missings];

    /// Metadata attribute the diagnostic is stored under.
    pub const fn attribute_name(self) -> &'static str {
        match self {
            CheckKind::Duplicates => "duplicated_timesteps",
            CheckKind::Redundants => "redundant_timesteps",
            CheckKind::Missings => "missing_timesteps",
        }
    }

    /// Selection name used on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            CheckKind::Duplicates => "duplicates",
            CheckKind::Redundants => "redundants",
            CheckKind::Missings => "missings",
        }
    }

    fn pick(self, diff: &AxisDiff) -> &[CalendarTimestamp] {
        match self {
            CheckKind::Duplicates => &diff.duplicates,
            CheckKind::Redundants => &diff.redundant,
            CheckKind::Missings => &diff.missing,
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CheckKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "duplicates" | "duplicated" => Ok(CheckKind::Duplicates),
            "redundants" | "redundant" => Ok(CheckKind::Redundants),
            "missings" | "missing" => Ok(CheckKind::Missings),
            other => Err(format!(
                "unknown check '{other}' (expected duplicates, redundants or missings)"
            )),
        }
    }
}

/// How diagnostics are rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    /// Separator between rendered timestamps.
    pub delimiter: String,
    /// Template each timestamp is rendered with.
    pub template: FormatTemplate,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            template: FormatTemplate::default(),
        }
    }
}

/// Diagnostics of one time axis, keyed by data variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimestampReport {
    pub frequency: Frequency,
    pub calendar: String,
    /// Variable name → metadata attribute → rendered timestamps.
    pub variables: BTreeMap<String, BTreeMap<String, String>>,
    /// Positions kept by the correction policy.
    pub retained: Vec<usize>,
    /// Number of positions in the checked axis.
    pub total: usize,
}

impl TimestampReport {
    /// `true` if no selected check found anything.
    pub fn is_clean(&self) -> bool {
        self.variables
            .values()
            .all(|attrs| attrs.values().all(String::is_empty))
    }

    /// Number of positions the correction policy drops.
    pub fn dropped(&self) -> usize {
        self.total - self.retained.len()
    }

    /// One `variable: attribute = values` line per entry.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (variable, attrs) in &self.variables {
            for (attribute, value) in attrs {
                out.push_str(&format!("{variable}: {attribute} = {value}\n"));
            }
        }
        out
    }
}

/// Runs the selected checks on `values` and renders them for each variable.
///
/// Every call builds a fresh report. Only duplicates are ever dropped by
/// the correction policy: when they are selected, `retained` holds the
/// first occurrence of each value, otherwise every position.
///
/// # Errors
///
/// Propagates [`diff_axis`] errors.
#[tracing::instrument(skip_all, fields(n = values.len(), %frequency))]
pub fn check_timestamps(
    values: &[CalendarTimestamp],
    variables: &[String],
    frequency: Frequency,
    calendar: CalendarKind,
    selection: &[CheckKind],
    options: &ReportOptions,
) -> Result<TimestampReport, TimeCheckError> {
    let diff = diff_axis(values, frequency, calendar)?;
    let mut rendered = BTreeMap::new();
    for &kind in selection {
        let text = kind
            .pick(&diff)
            .iter()
            .map(|t| options.template.format(t))
            .collect::<Vec<_>>()
            .join(&options.delimiter);
        rendered.insert(kind.attribute_name().to_string(), text);
    }
    let variables = variables
        .iter()
        .map(|name| (name.clone(), rendered.clone()))
        .collect();
    let retained = if selection.contains(&CheckKind::Duplicates) {
        retained_indices(values, frequency)
    } else {
        (0..values.len()).collect()
    };
    Ok(TimestampReport {
        frequency,
        calendar: calendar.to_string(),
        variables,
        retained,
        total: values.len(),
    })
}
