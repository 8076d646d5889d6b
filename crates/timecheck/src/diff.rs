//! Duplicate, missing and redundant timestamp detection.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use homog_calendar::{CalendarKind, CalendarTimestamp};
use tracing::debug;

use crate::error::TimeCheckError;
use crate::frequency::Frequency;
use crate::normalize::{EqualizeOutcome, equalize};

/// Result of comparing a time axis against its expected grid.
///
/// All three lists hold equalized values in ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisDiff {
    /// Values that occur more than once, each listed once.
    pub duplicates: Vec<CalendarTimestamp>,
    /// Grid values absent from the axis.
    pub missing: Vec<CalendarTimestamp>,
    /// Axis values that are not on the grid and not duplicated.
    pub redundant: Vec<CalendarTimestamp>,
    /// How the axis was equalized before comparing.
    pub outcome: EqualizeOutcome,
}

impl AxisDiff {
    /// `true` if the axis matches its grid exactly.
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty() && self.missing.is_empty() && self.redundant.is_empty()
    }
}

/// Compares `values` against the `frequency` grid spanning them in `calendar`.
///
/// # Errors
///
/// Returns [`TimeCheckError::Calendar`] if the axis cannot be re-tagged into
/// `calendar` or the grid leaves the supported years.
#[tracing::instrument(skip_all, fields(n = values.len(), %frequency, %calendar))]
pub fn diff_axis(
    values: &[CalendarTimestamp],
    frequency: Frequency,
    calendar: CalendarKind,
) -> Result<AxisDiff, TimeCheckError> {
    let actual = equalize(values, frequency);
    let outcome = actual.outcome;
    let actual = actual.values;
    let (Some(&first), Some(&last)) = (actual.iter().min(), actual.iter().max()) else {
        return Ok(AxisDiff {
            duplicates: Vec::new(),
            missing: Vec::new(),
            redundant: Vec::new(),
            outcome,
        });
    };

    let grid = frequency.sampling().generate(first, last, calendar)?;
    let expected: BTreeSet<CalendarTimestamp> = equalize(&grid, frequency).values.into_iter().collect();
    debug!(grid = expected.len(), "expected grid generated");

    let mut counts: BTreeMap<CalendarTimestamp, usize> = BTreeMap::new();
    for t in &actual {
        // Compare in the target calendar so grid and axis agree on tags.
        *counts.entry(t.with_calendar(calendar)?).or_default() += 1;
    }

    let duplicates: Vec<_> = counts
        .iter()
        .filter(|&(_, &n)| n > 1)
        .map(|(&t, _)| t)
        .collect();
    let missing: Vec<_> = expected
        .iter()
        .filter(|t| !counts.contains_key(t))
        .copied()
        .collect();
    let redundant: Vec<_> = counts
        .iter()
        .filter(|&(t, &n)| n == 1 && !expected.contains(t))
        .map(|(&t, _)| t)
        .collect();

    debug!(
        duplicates = duplicates.len(),
        missing = missing.len(),
        redundant = redundant.len(),
        "axis compared"
    );
    Ok(AxisDiff {
        duplicates,
        missing,
        redundant,
        outcome,
    })
}

/// Positions to keep when correcting `values`: the first occurrence of
/// every equalized value, in positional order.
pub fn retained_indices(values: &[CalendarTimestamp], frequency: Frequency) -> Vec<usize> {
    let equalized = equalize(values, frequency).values;
    let mut seen = HashSet::with_capacity(equalized.len());
    equalized
        .iter()
        .enumerate()
        .filter(|&(_, t)| seen.insert(*t))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(kind: CalendarKind, y: i32, m: u8, d: u8) -> CalendarTimestamp {
        CalendarTimestamp::new(kind, y, m, d).unwrap()
    }

    #[test]
    fn daily_duplicates_and_missing() {
        let kind = CalendarKind::Standard;
        let values = [
            day(kind, 2005, 1, 1),
            day(kind, 2005, 1, 2),
            day(kind, 2005, 1, 2),
            day(kind, 2005, 1, 4),
        ];
        let diff = diff_axis(&values, Frequency::Day, kind).unwrap();
        assert_eq!(diff.duplicates, vec![day(kind, 2005, 1, 2)]);
        assert_eq!(diff.missing, vec![day(kind, 2005, 1, 3)]);
        assert!(diff.redundant.is_empty());
        assert!(!diff.is_clean());
    }

    #[test]
    fn regular_axis_is_clean() {
        let kind = CalendarKind::Day360;
        let grid = Frequency::Month
            .sampling()
            .generate(day(kind, 2000, 1, 1), day(kind, 2004, 12, 30), kind)
            .unwrap();
        let diff = diff_axis(&grid, Frequency::Month, kind).unwrap();
        assert!(diff.is_clean(), "{diff:?}");
    }

    #[test]
    fn off_grid_value_is_redundant() {
        let kind = CalendarKind::Day360;
        let mut values = Frequency::Month
            .sampling()
            .generate(day(kind, 2005, 1, 1), day(kind, 2005, 6, 30), kind)
            .unwrap();
        values.push(day(kind, 2005, 3, 20));
        let diff = diff_axis(&values, Frequency::Month, kind).unwrap();
        assert_eq!(diff.redundant, vec![day(kind, 2005, 3, 20)]);
        assert!(diff.duplicates.is_empty());
        assert!(diff.missing.is_empty());
    }

    #[test]
    fn jitter_below_resolution_is_ignored() {
        let kind = CalendarKind::NoLeap;
        let values = [
            day(kind, 2005, 1, 1),
            CalendarTimestamp::from_ymd_hms(kind, 2005, 1, 2, 0, 0, 30).unwrap(),
            day(kind, 2005, 1, 3),
        ];
        assert!(diff_axis(&values, Frequency::Day, kind).unwrap().is_clean());
    }

    #[test]
    fn empty_axis() {
        let diff = diff_axis(&[], Frequency::Day, CalendarKind::Standard).unwrap();
        assert!(diff.is_clean());
    }

    #[test]
    fn retained_keeps_first_occurrence() {
        let kind = CalendarKind::Standard;
        let values = [
            day(kind, 2005, 1, 2),
            day(kind, 2005, 1, 1),
            CalendarTimestamp::from_ymd_hms(kind, 2005, 1, 2, 0, 5, 0).unwrap(),
            day(kind, 2005, 1, 3),
            day(kind, 2005, 1, 1),
        ];
        assert_eq!(retained_indices(&values, Frequency::Day), vec![0, 1, 3]);
    }
}
