//! Range containment at the resolution of a frequency.

use std::cmp::Ordering;

use homog_calendar::{AttributeName, CalendarKind, CalendarTimestamp};

use crate::error::TimeCheckError;
use crate::frequency::Frequency;
use crate::normalize::{Mode, str_to_timestamp};

/// One side of a requested range.
#[derive(Debug, Clone, PartialEq)]
pub enum Bound {
    /// Text parsed in start mode (left bound) or end mode (right bound).
    Text(String),
    Timestamp(CalendarTimestamp),
}

impl Bound {
    pub(crate) fn resolve(
        &self,
        mode: Mode,
        calendar: CalendarKind,
    ) -> Result<CalendarTimestamp, TimeCheckError> {
        match self {
            Bound::Text(text) => str_to_timestamp(text, mode, calendar),
            Bound::Timestamp(t) => Ok(t.with_calendar(calendar)?),
        }
    }
}

impl From<&str> for Bound {
    fn from(value: &str) -> Self {
        Bound::Text(value.to_string())
    }
}

impl From<CalendarTimestamp> for Bound {
    fn from(value: CalendarTimestamp) -> Self {
        Bound::Timestamp(value)
    }
}

/// Compares `a` and `b` over `attributes`, coarsest first.
fn compare(a: &CalendarTimestamp, b: &CalendarTimestamp, attributes: &[AttributeName]) -> Ordering {
    attributes
        .iter()
        .map(|attribute| attribute.get(a).cmp(&attribute.get(b)))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// `true` if the axis covers `[start, end]` at the resolution of `frequency`.
///
/// Only the attributes from year down to the governing attribute of
/// `frequency` are compared.
///
/// # Errors
///
/// Returns [`TimeCheckError::EmptyAxis`] for an empty axis and
/// [`TimeCheckError::UnparsableTimestamp`] for unparsable text bounds.
pub fn contains(
    values: &[CalendarTimestamp],
    start: &Bound,
    end: &Bound,
    frequency: Frequency,
    calendar: CalendarKind,
) -> Result<bool, TimeCheckError> {
    let (Some(first), Some(last)) = (values.iter().min(), values.iter().max()) else {
        return Err(TimeCheckError::EmptyAxis);
    };
    let start = start.resolve(Mode::Start, calendar)?;
    let end = end.resolve(Mode::End, calendar)?;
    let attributes = frequency.relevant_attributes();
    Ok(compare(first, &start, attributes).is_le() && compare(last, &end, attributes).is_ge())
}
