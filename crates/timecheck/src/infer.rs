//! Frequency inference from the spacing of timestamps.

use std::collections::BTreeMap;

use homog_calendar::{CalendarTimestamp, TimeDelta};

use crate::frequency::Frequency;

fn classify(gap: TimeDelta) -> Option<Frequency> {
    let days = |n| TimeDelta::days(n);
    if gap == TimeDelta::hours(1) {
        Some(Frequency::Hour1)
    } else if gap == TimeDelta::hours(3) {
        Some(Frequency::Hour3)
    } else if gap == TimeDelta::hours(6) {
        Some(Frequency::Hour6)
    } else if gap == days(1) {
        Some(Frequency::Day)
    } else if (days(28)..=days(31)).contains(&gap) {
        Some(Frequency::Month)
    } else if (days(89)..=days(92)).contains(&gap) {
        Some(Frequency::Season)
    } else if (days(360)..=days(366)).contains(&gap) {
        Some(Frequency::Year)
    } else if (days(3600)..=days(3660)).contains(&gap) {
        Some(Frequency::Decade)
    } else {
        None
    }
}

/// Most common frequency class among the non-zero gaps of the sorted values.
///
/// Ties go to the finer frequency. Returns `None` if no gap can be
/// classified.
pub fn infer_frequency(values: &[CalendarTimestamp]) -> Option<Frequency> {
    let mut sorted = values.to_vec();
    sorted.sort();
    let mut counts: BTreeMap<Frequency, usize> = BTreeMap::new();
    for pair in sorted.windows(2) {
        let gap = pair[1].signed_duration_since(pair[0]);
        if gap.is_zero() {
            continue;
        }
        if let Some(frequency) = classify(gap) {
            *counts.entry(frequency).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .rev()
        .max_by_key(|&(_, n)| n)
        .map(|(frequency, _)| frequency)
}
