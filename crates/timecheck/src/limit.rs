//! Trimming a date range to frequency-aligned season boundaries.

use homog_calendar::{CalendarKind, CalendarTimestamp, TimeDelta};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TimeCheckError;
use crate::frequency::Frequency;

/// An inclusive range of timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: CalendarTimestamp,
    pub end: CalendarTimestamp,
}

/// Where the candidate timestamps come from.
#[derive(Debug, Clone, Copy)]
pub enum RangeSource<'a> {
    /// Generate the frequency grid between two bounds.
    Bounds(CalendarTimestamp, CalendarTimestamp),
    /// Use the timestamps of an existing axis.
    Axis(&'a [CalendarTimestamp]),
}

/// Constraints on the limited range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOptions {
    /// Months the range may start in.
    pub start_months: Vec<u8>,
    /// Months the range may end in.
    pub end_months: Vec<u8>,
    /// Require the start to be the first day of its month. `None` lets
    /// the frequency decide (required below monthly resolution).
    pub month_start: Option<bool>,
    /// Require the end to be the last day of its month. `None` lets the
    /// frequency decide.
    pub month_end: Option<bool>,
}

impl Default for LimitOptions {
    fn default() -> Self {
        Self {
            start_months: (1..=12).collect(),
            end_months: (1..=12).collect(),
            month_start: None,
            month_end: None,
        }
    }
}

impl LimitOptions {
    /// Checks that every month lies in 1..=12.
    ///
    /// # Errors
    ///
    /// Returns [`TimeCheckError::InvalidMonth`] for the first offending month.
    pub fn validate(&self) -> Result<(), TimeCheckError> {
        match self
            .start_months
            .iter()
            .chain(&self.end_months)
            .find(|m| !(1..=12).contains(*m))
        {
            Some(&month) => Err(TimeCheckError::InvalidMonth { month }),
            None => Ok(()),
        }
    }
}

fn is_month_start(t: &CalendarTimestamp) -> bool {
    t.checked_sub_signed(TimeDelta::days(1))
        .is_none_or(|prev| prev.month() != t.month())
}

fn is_month_end(t: &CalendarTimestamp) -> bool {
    t.checked_add_signed(TimeDelta::days(1))
        .is_none_or(|next| next.month() != t.month())
}

/// Finds the widest sub-range that starts in an allowed start month and
/// ends in an allowed end month.
///
/// With [`RangeSource::Bounds`] the result always lies inside the bounds.
/// Returns `Ok(None)` if no such range exists.
///
/// # Errors
///
/// Returns [`TimeCheckError::InvalidMonth`] for invalid options and
/// [`TimeCheckError::Calendar`] if grid generation fails.
///
/// # Example
///
/// ```ignore
/// // Monthly 360-day data trimmed to whole seasons:
/// let options = LimitOptions {
///     start_months: vec![3, 6, 9, 12],
///     end_months: vec![2, 5, 8, 11],
///     ..LimitOptions::default()
/// };
/// let range = limit_range(RangeSource::Bounds(start, end), Frequency::Month, CalendarKind::Day360, &options)?;
/// // Some(2005-03-16 ..= 2005-11-16)
/// ```
#[tracing::instrument(skip_all, fields(%frequency, %calendar))]
pub fn limit_range(
    source: RangeSource<'_>,
    frequency: Frequency,
    calendar: CalendarKind,
    options: &LimitOptions,
) -> Result<Option<DateRange>, TimeCheckError> {
    options.validate()?;
    let grid = match source {
        // Mid-step grids may place a point just outside the bounds.
        RangeSource::Bounds(start, end) => {
            let bounds = start.with_calendar(calendar)?..=end.with_calendar(calendar)?;
            frequency
                .sampling()
                .generate(start, end, calendar)?
                .into_iter()
                .filter(|t| bounds.contains(t))
                .collect::<Vec<_>>()
        }
        RangeSource::Axis(values) => {
            let mut sorted = values.to_vec();
            sorted.sort();
            sorted
        }
    };
    if grid.is_empty() {
        return Ok(None);
    }

    let month_start = options.month_start.unwrap_or(frequency.is_submonthly());
    let month_end = options.month_end.unwrap_or(frequency.is_submonthly());
    let starts: Vec<_> = grid
        .iter()
        .filter(|t| !month_start || is_month_start(t))
        .collect();
    let ends: Vec<_> = grid
        .iter()
        .filter(|t| !month_end || is_month_end(t))
        .collect();
    if starts.is_empty() || ends.is_empty() {
        debug!("no month-aligned candidates");
        return Ok(None);
    }

    let start = starts
        .iter()
        .find(|t| options.start_months.contains(&t.month()));
    let end = ends
        .iter()
        .rev()
        .find(|t| options.end_months.contains(&t.month()));
    match (start, end) {
        (Some(&&start), Some(&&end)) if start <= end => {
            debug!(%start, %end, "range limited");
            Ok(Some(DateRange { start, end }))
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(kind: CalendarKind, y: i32, m: u8, d: u8) -> CalendarTimestamp {
        CalendarTimestamp::new(kind, y, m, d).unwrap()
    }

    fn seasons() -> LimitOptions {
        LimitOptions {
            start_months: vec![3, 6, 9, 12],
            end_months: vec![2, 5, 8, 11],
            ..LimitOptions::default()
        }
    }

    #[test]
    fn monthly_360_day_seasons() {
        let kind = CalendarKind::Day360;
        let range = limit_range(
            RangeSource::Bounds(ts(kind, 2005, 1, 1), ts(kind, 2005, 12, 30)),
            Frequency::Month,
            kind,
            &seasons(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(range.start.to_string(), "2005-03-16T00:00:00");
        assert_eq!(range.end.to_string(), "2005-11-16T00:00:00");
    }

    #[test]
    fn result_stays_inside_bounds() {
        let kind = CalendarKind::Day360;
        let (lower, upper) = (ts(kind, 2005, 1, 20), ts(kind, 2005, 12, 10));
        let range = limit_range(
            RangeSource::Bounds(lower, upper),
            Frequency::Month,
            kind,
            &LimitOptions::default(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(range.start.to_string(), "2005-02-16T00:00:00");
        assert_eq!(range.end.to_string(), "2005-11-16T00:00:00");
        assert!(lower <= range.start && range.end <= upper);
    }

    #[test]
    fn daily_requires_month_boundaries() {
        let kind = CalendarKind::Standard;
        let range = limit_range(
            RangeSource::Bounds(ts(kind, 2005, 1, 10), ts(kind, 2005, 12, 20)),
            Frequency::Day,
            kind,
            &seasons(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(range.start, ts(kind, 2005, 3, 1));
        assert_eq!(range.end, ts(kind, 2005, 11, 30));
    }

    #[test]
    fn month_flags_can_be_disabled() {
        let kind = CalendarKind::Standard;
        let options = LimitOptions {
            month_start: Some(false),
            month_end: Some(false),
            ..seasons()
        };
        let range = limit_range(
            RangeSource::Bounds(ts(kind, 2005, 3, 10), ts(kind, 2005, 12, 20)),
            Frequency::Day,
            kind,
            &options,
        )
        .unwrap()
        .unwrap();
        assert_eq!(range.start, ts(kind, 2005, 3, 10));
        assert_eq!(range.end, ts(kind, 2005, 11, 30));
    }

    #[test]
    fn no_month_start_candidates() {
        let kind = CalendarKind::NoLeap;
        let range = limit_range(
            RangeSource::Bounds(ts(kind, 2005, 1, 2), ts(kind, 2005, 1, 31)),
            Frequency::Day,
            kind,
            &LimitOptions::default(),
        )
        .unwrap();
        assert_eq!(range, None);
    }

    #[test]
    fn unsatisfiable_start_months() {
        let kind = CalendarKind::Day360;
        let options = LimitOptions {
            start_months: vec![12],
            ..LimitOptions::default()
        };
        let range = limit_range(
            RangeSource::Bounds(ts(kind, 2005, 1, 1), ts(kind, 2005, 11, 30)),
            Frequency::Month,
            kind,
            &options,
        )
        .unwrap();
        assert_eq!(range, None);
    }

    #[test]
    fn axis_source_is_sorted() {
        let kind = CalendarKind::Day360;
        let mut values = Frequency::Month
            .sampling()
            .generate(ts(kind, 2005, 1, 1), ts(kind, 2006, 12, 30), kind)
            .unwrap();
        values.reverse();
        let range = limit_range(RangeSource::Axis(&values), Frequency::Month, kind, &seasons())
            .unwrap()
            .unwrap();
        assert_eq!(range.start.date(), (2005, 3, 16));
        assert_eq!(range.end.date(), (2006, 11, 16));
    }

    #[test]
    fn invalid_month() {
        let options = LimitOptions {
            end_months: vec![0],
            ..LimitOptions::default()
        };
        assert_eq!(
            options.validate().unwrap_err(),
            TimeCheckError::InvalidMonth { month: 0 }
        );
    }
}
