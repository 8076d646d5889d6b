//! Time slicing and axis intersection.

use homog_calendar::{CalendarKind, CalendarTimestamp};

use crate::error::TimeCheckError;
use crate::limit::DateRange;
use crate::normalize::Mode;
use crate::within::Bound;

/// Positions of the timestamps inside `[start, end]`, in positional order.
///
/// Text bounds are parsed in start mode (left) and end mode (right). End
/// mode closes the matched date, so `"2005-01"` ends on 2005-01-01T23:59:59.
///
/// # Errors
///
/// Returns [`TimeCheckError::UnparsableTimestamp`] for unparsable text bounds.
pub fn select_range(
    values: &[CalendarTimestamp],
    start: &Bound,
    end: &Bound,
    calendar: CalendarKind,
) -> Result<Vec<usize>, TimeCheckError> {
    let start = start.resolve(Mode::Start, calendar)?;
    let end = end.resolve(Mode::End, calendar)?;
    Ok(values
        .iter()
        .enumerate()
        .filter(|&(_, t)| (start..=end).contains(t))
        .map(|(i, _)| i)
        .collect())
}

/// The range covered by every axis: latest first value to earliest last value.
///
/// Returns `None` for no axes, an empty axis, or disjoint axes.
pub fn max_intersection<'a, I>(axes: I) -> Option<DateRange>
where
    I: IntoIterator<Item = &'a [CalendarTimestamp]>,
{
    let mut range: Option<DateRange> = None;
    for axis in axes {
        let (first, last) = (*axis.iter().min()?, *axis.iter().max()?);
        range = Some(match range {
            None => DateRange {
                start: first,
                end: last,
            },
            Some(r) => DateRange {
                start: r.start.max(first),
                end: r.end.min(last),
            },
        });
    }
    range.filter(|r| r.start <= r.end)
}
