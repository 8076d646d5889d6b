//! Conversion of raw time values into comparable calendar timestamps.

use chrono::{Datelike, NaiveDateTime, TimeDelta, Timelike};
use homog_calendar::{AttributeName, CalendarError, CalendarKind, CalendarTimestamp, FormatTemplate, TimeUnits};
use tracing::{debug, warn};

use crate::error::TimeCheckError;
use crate::frequency::Frequency;

/// A time coordinate entry as delivered by a reader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawTime {
    /// Already tagged with a calendar.
    Calendar(CalendarTimestamp),
    /// A plain date-time without calendar information.
    Naive(NaiveDateTime),
}

/// Converts a raw time entry, tagging untagged values as `standard`.
///
/// Nanoseconds are truncated to microseconds.
///
/// # Errors
///
/// Returns [`TimeCheckError::Calendar`] if a naive value falls into the
/// 1582 reform gap of the `standard` calendar.
pub fn to_calendar_timestamp(raw: RawTime) -> Result<CalendarTimestamp, TimeCheckError> {
    match raw {
        RawTime::Calendar(t) => Ok(t),
        RawTime::Naive(naive) => {
            let t = CalendarTimestamp::from_ymd_hms(
                CalendarKind::Standard,
                naive.year(),
                naive.month() as u8,
                naive.day() as u8,
                naive.hour() as u8,
                naive.minute() as u8,
                naive.second() as u8,
            )?;
            Ok(t.with_microsecond((naive.nanosecond() / 1_000).min(999_999))?)
        }
    }
}

/// Decodes CF numeric offsets (`"<unit> since <reference>"`).
///
/// A missing calendar defaults to `standard`.
///
/// # Errors
///
/// Returns [`TimeCheckError::Calendar`] for malformed units or values that
/// leave the supported years.
pub fn decode_time_coordinate(
    values: &[f64],
    units: &str,
    calendar: Option<CalendarKind>,
) -> Result<Vec<CalendarTimestamp>, TimeCheckError> {
    let units = TimeUnits::parse(units, calendar.unwrap_or_default())?;
    values
        .iter()
        .map(|&v| units.decode(v).map_err(TimeCheckError::from))
        .collect()
}

/// Which attribute list an [`equalize`] call ended up applying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EqualizeOutcome {
    /// The full list of the frequency was applied.
    Full,
    /// Only the coarsest `applied` attributes could be applied.
    Relaxed { applied: Vec<AttributeName> },
    /// No candidate list could be applied; values are unchanged.
    Unmodified,
}

/// Timestamps with sub-resolution attributes forced to canonical values.
#[derive(Debug, Clone, PartialEq)]
pub struct Equalization {
    pub values: Vec<CalendarTimestamp>,
    pub outcome: EqualizeOutcome,
}

fn equalize_one(
    t: CalendarTimestamp,
    attributes: &[AttributeName],
) -> Result<CalendarTimestamp, CalendarError> {
    attributes
        .iter()
        .rev()
        .try_fold(t, |acc, attribute| attribute.set(&acc, attribute.canonical()))
}

/// Forces the attributes `frequency` ignores to their canonical values.
///
/// The full [`Frequency::equalize_below`] list is tried first, then the
/// list without its finest attribute, and so on until every timestamp can
/// be rewritten. Within an attempt the attributes are applied finest first.
/// If no attempt succeeds the values are returned unchanged.
pub fn equalize(values: &[CalendarTimestamp], frequency: Frequency) -> Equalization {
    let attributes = frequency.equalize_below();
    for len in (1..=attributes.len()).rev() {
        let candidate = &attributes[..len];
        let Ok(equalized) = values
            .iter()
            .map(|&t| equalize_one(t, candidate))
            .collect::<Result<Vec<_>, _>>()
        else {
            continue;
        };
        let outcome = if len == attributes.len() {
            EqualizeOutcome::Full
        } else {
            debug!(%frequency, ?candidate, "relaxed equalization");
            EqualizeOutcome::Relaxed {
                applied: candidate.to_vec(),
            }
        };
        return Equalization {
            values: equalized,
            outcome,
        };
    }
    warn!(%frequency, "timestamps could not be equalized; comparing raw values");
    Equalization {
        values: values.to_vec(),
        outcome: EqualizeOutcome::Unmodified,
    }
}

/// Which end of a period a partial timestamp string denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Unmatched attributes take their minimum.
    #[default]
    Start,
    /// One second before the start of the day after the matched date.
    End,
}

/// Parses `text` with [`homog_calendar::DEFAULT_TEMPLATE`].
///
/// See [`str_to_timestamp_with`].
pub fn str_to_timestamp(
    text: &str,
    mode: Mode,
    calendar: CalendarKind,
) -> Result<CalendarTimestamp, TimeCheckError> {
    str_to_timestamp_with(text, &FormatTemplate::default(), mode, calendar)
}

/// Parses `text` against `template` and its truncations.
///
/// Each truncation drops the least significant field. The first one that
/// consumes the whole text and yields a date valid in `calendar` wins.
///
/// # Errors
///
/// Returns [`TimeCheckError::UnparsableTimestamp`] if no truncation matches.
pub fn str_to_timestamp_with(
    text: &str,
    template: &FormatTemplate,
    mode: Mode,
    calendar: CalendarKind,
) -> Result<CalendarTimestamp, TimeCheckError> {
    let trimmed = text.trim();
    for candidate in template.truncations() {
        let Some(fields) = candidate.parse_fields(trimmed) else {
            continue;
        };
        if fields.finest().is_none() {
            continue;
        }
        let start = CalendarTimestamp::from_ymd_hms(
            calendar,
            fields.year.unwrap_or(1900),
            fields.month.unwrap_or(1),
            fields.day.unwrap_or(1),
            fields.hour.unwrap_or(0),
            fields.minute.unwrap_or(0),
            fields.second.unwrap_or(0),
        )
        .and_then(|t| t.with_microsecond(fields.microsecond.unwrap_or(0)));
        let Ok(start) = start else {
            continue;
        };
        return match mode {
            Mode::Start => Ok(start),
            Mode::End => Ok(end_of_day(start)?),
        };
    }
    Err(TimeCheckError::UnparsableTimestamp {
        text: text.to_string(),
    })
}

fn end_of_day(start: CalendarTimestamp) -> Result<CalendarTimestamp, CalendarError> {
    start
        .start_of_day()
        .checked_add_signed(TimeDelta::days(1))
        .and_then(|t| t.checked_sub_signed(TimeDelta::seconds(1)))
        .ok_or(CalendarError::OutOfRange)
}

/// Renders `timestamp` with `template`.
pub fn date_to_str(timestamp: &CalendarTimestamp, template: &FormatTemplate) -> String {
    template.format(timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn hms(kind: CalendarKind, y: i32, m: u8, d: u8, h: u8, mi: u8, s: u8) -> CalendarTimestamp {
        CalendarTimestamp::from_ymd_hms(kind, y, m, d, h, mi, s).unwrap()
    }

    #[test]
    fn naive_is_tagged_standard() {
        let naive = NaiveDate::from_ymd_opt(2005, 1, 2)
            .unwrap()
            .and_hms_nano_opt(3, 4, 5, 6_789)
            .unwrap();
        let t = to_calendar_timestamp(RawTime::Naive(naive)).unwrap();
        assert_eq!(t.calendar(), CalendarKind::Standard);
        assert_eq!(t.date(), (2005, 1, 2));
        assert_eq!(t.microsecond(), 6);
    }

    #[test]
    fn calendar_tag_is_kept() {
        let t = hms(CalendarKind::Day360, 2005, 2, 30, 0, 0, 0);
        assert_eq!(to_calendar_timestamp(RawTime::Calendar(t)).unwrap(), t);
    }

    #[test]
    fn equalize_daily_relaxes_past_nanoseconds() {
        let values = vec![hms(CalendarKind::NoLeap, 2005, 1, 1, 12, 30, 59)];
        let eq = equalize(&values, Frequency::Day);
        assert_eq!(eq.values, vec![hms(CalendarKind::NoLeap, 2005, 1, 1, 12, 0, 0)]);
        assert_eq!(
            eq.outcome,
            EqualizeOutcome::Relaxed {
                applied: vec![
                    AttributeName::Minute,
                    AttributeName::Second,
                    AttributeName::Microsecond
                ]
            }
        );
    }

    #[test]
    fn equalize_hourly_keeps_minutes() {
        let values = vec![hms(CalendarKind::Standard, 2005, 1, 1, 3, 15, 10)];
        let eq = equalize(&values, Frequency::Hour3);
        assert_eq!(eq.values[0].minute(), 15);
        assert_eq!(eq.values[0].second(), 0);
    }

    #[test]
    fn equalize_is_idempotent() {
        let values = vec![
            hms(CalendarKind::Julian, 2005, 1, 1, 0, 0, 1),
            hms(CalendarKind::Julian, 2005, 1, 2, 23, 59, 59),
        ];
        let once = equalize(&values, Frequency::Day);
        let twice = equalize(&once.values, Frequency::Day);
        assert_eq!(once.values, twice.values);
    }

    #[test]
    fn equalize_empty() {
        let eq = equalize(&[], Frequency::Month);
        assert!(eq.values.is_empty());
        assert_eq!(eq.outcome, EqualizeOutcome::Full);
    }

    #[test]
    fn parse_start_mode_truncates() {
        let t = str_to_timestamp("2005-02", Mode::Start, CalendarKind::Day360).unwrap();
        assert_eq!(t, hms(CalendarKind::Day360, 2005, 2, 1, 0, 0, 0));
        let t = str_to_timestamp("2005-02-03T04", Mode::Start, CalendarKind::Standard).unwrap();
        assert_eq!(t, hms(CalendarKind::Standard, 2005, 2, 3, 4, 0, 0));
    }

    #[test]
    fn parse_end_mode() {
        let t = str_to_timestamp("2005-12-31", Mode::End, CalendarKind::Standard).unwrap();
        assert_eq!(t, hms(CalendarKind::Standard, 2005, 12, 31, 23, 59, 59));
        let t = str_to_timestamp("2005-12", Mode::End, CalendarKind::Standard).unwrap();
        assert_eq!(t, hms(CalendarKind::Standard, 2005, 12, 1, 23, 59, 59));
        let t = str_to_timestamp("2005-02", Mode::End, CalendarKind::Day360).unwrap();
        assert_eq!(t, hms(CalendarKind::Day360, 2005, 2, 1, 23, 59, 59));
        let t = str_to_timestamp("2004", Mode::End, CalendarKind::NoLeap).unwrap();
        assert_eq!(t, hms(CalendarKind::NoLeap, 2004, 1, 1, 23, 59, 59));
        let t = str_to_timestamp("2005-01-01T06:30:15", Mode::End, CalendarKind::Standard).unwrap();
        assert_eq!(t, hms(CalendarKind::Standard, 2005, 1, 1, 23, 59, 59));
        let t = str_to_timestamp("2005-02-30", Mode::End, CalendarKind::Day360).unwrap();
        assert_eq!(t, hms(CalendarKind::Day360, 2005, 2, 30, 23, 59, 59));
    }

    #[test]
    fn parse_rejects_invalid_dates() {
        assert_eq!(
            str_to_timestamp("2005-02-30", Mode::Start, CalendarKind::Standard).unwrap_err(),
            TimeCheckError::UnparsableTimestamp {
                text: "2005-02-30".to_string()
            }
        );
        assert!(str_to_timestamp("yesterday", Mode::Start, CalendarKind::Standard).is_err());
    }

    #[test]
    fn custom_template() {
        let template = FormatTemplate::parse("%d.%m.%Y").unwrap();
        let t = str_to_timestamp_with("16.01.2005", &template, Mode::Start, CalendarKind::Standard)
            .unwrap();
        assert_eq!(t.date(), (2005, 1, 16));
    }

    #[test]
    fn render_round_trip() {
        let template = FormatTemplate::default();
        for kind in CalendarKind::ALL {
            let t = hms(kind, 1999, 2, 28, 21, 0, 5);
            let text = date_to_str(&t, &template);
            assert_eq!(str_to_timestamp(&text, Mode::Start, kind).unwrap(), t);
        }
    }

    #[test]
    fn decode_defaults_to_standard() {
        let values = decode_time_coordinate(&[0.0, 1.0], "days since 2005-02-28", None).unwrap();
        assert_eq!(values[1].date(), (2005, 3, 1));
        assert_eq!(values[1].calendar(), CalendarKind::Standard);
        let values =
            decode_time_coordinate(&[1.0], "days since 2005-02-28", Some(CalendarKind::Day360)).unwrap();
        assert_eq!(values[0].date(), (2005, 2, 29));
        assert!(decode_time_coordinate(&[1.0], "days", None).is_err());
    }
}
