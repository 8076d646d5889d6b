//! Decoding of CF `"<unit> since <reference>"` time coordinates.

use chrono::TimeDelta;

use crate::date::CalendarTimestamp;
use crate::error::CalendarError;
use crate::kind::CalendarKind;

/// Length unit of encoded time offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    fn micros(self) -> f64 {
        match self {
            TimeUnit::Microseconds => 1.0,
            TimeUnit::Milliseconds => 1e3,
            TimeUnit::Seconds => 1e6,
            TimeUnit::Minutes => 60e6,
            TimeUnit::Hours => 3_600e6,
            TimeUnit::Days => 86_400e6,
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        let unit = match name.to_ascii_lowercase().as_str() {
            "microseconds" | "microsecond" | "us" => TimeUnit::Microseconds,
            "milliseconds" | "millisecond" | "ms" => TimeUnit::Milliseconds,
            "seconds" | "second" | "secs" | "sec" | "s" => TimeUnit::Seconds,
            "minutes" | "minute" | "mins" | "min" => TimeUnit::Minutes,
            "hours" | "hour" | "hrs" | "hr" | "h" => TimeUnit::Hours,
            "days" | "day" | "d" => TimeUnit::Days,
            _ => return None,
        };
        Some(unit)
    }
}

/// A parsed CF `units` attribute of a time coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeUnits {
    pub unit: TimeUnit,
    pub reference: CalendarTimestamp,
}

impl TimeUnits {
    /// Parses e.g. `"days since 1850-01-01"` or
    /// `"hours since 2000-01-01 00:00:00 UTC"` for `calendar`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidUnits`] if the string is malformed or
    /// the reference date does not exist in `calendar`.
    pub fn parse(units: &str, calendar: CalendarKind) -> Result<Self, CalendarError> {
        let invalid = || CalendarError::InvalidUnits {
            units: units.to_string(),
        };
        let mut parts = units.trim().splitn(3, char::is_whitespace);
        let unit = parts.next().and_then(TimeUnit::from_name).ok_or_else(invalid)?;
        if !parts.next().is_some_and(|w| w.eq_ignore_ascii_case("since")) {
            return Err(invalid());
        }
        let reference = parts
            .next()
            .and_then(|r| parse_reference(r.trim(), calendar))
            .ok_or_else(invalid)?;
        Ok(Self { unit, reference })
    }

    /// Converts an encoded offset to a timestamp, rounded to the nearest
    /// microsecond.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] for non-finite values or results
    /// outside the supported years.
    pub fn decode(&self, value: f64) -> Result<CalendarTimestamp, CalendarError> {
        let micros = (value * self.unit.micros()).round();
        if !micros.is_finite() || micros.abs() > i64::MAX as f64 {
            return Err(CalendarError::OutOfRange);
        }
        self.reference
            .checked_add_signed(TimeDelta::microseconds(micros as i64))
            .ok_or(CalendarError::OutOfRange)
    }
}

fn parse_reference(text: &str, calendar: CalendarKind) -> Option<CalendarTimestamp> {
    let text = text
        .strip_suffix("UTC")
        .or_else(|| text.strip_suffix('Z'))
        .unwrap_or(text)
        .trim_end();
    let (date, time) = match text.split_once(['T', ' ']) {
        Some((date, time)) => (date, time.trim()),
        None => (text, ""),
    };
    let (negative, date) = match date.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, date),
    };
    let mut fields = date.split('-');
    let year: i32 = fields.next()?.parse().ok()?;
    let month: u8 = fields.next()?.parse().ok()?;
    let day: u8 = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    let year = if negative { -year } else { year };

    // Drop a numeric UTC offset such as "+00:00".
    let time = time.split_once('+').map_or(time, |(t, _)| t.trim());
    let (clock, fraction) = time.split_once('.').unwrap_or((time, ""));
    let mut hms = clock.split(':').filter(|s| !s.is_empty());
    let hour: u8 = hms.next().map_or(Some(0), |s| s.parse().ok())?;
    let minute: u8 = hms.next().map_or(Some(0), |s| s.parse().ok())?;
    let second: u8 = hms.next().map_or(Some(0), |s| s.parse().ok())?;
    let microsecond = if fraction.is_empty() {
        0
    } else {
        let digits: String = fraction.chars().take(6).collect();
        let value: u32 = digits.parse().ok()?;
        value * 10_u32.pow(6 - digits.len() as u32)
    };
    CalendarTimestamp::from_ymd_hms(calendar, year, month, day, hour, minute, second)
        .and_then(|t| t.with_microsecond(microsecond))
        .ok()
}
