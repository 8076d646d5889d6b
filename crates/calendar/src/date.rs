//! Calendar-aware timestamp with microsecond resolution.

use std::fmt;

use chrono::TimeDelta;

use crate::error::CalendarError;
use crate::format::FormatTemplate;
use crate::kind::CalendarKind;

const MICROS_PER_SECOND: i64 = 1_000_000;
const MICROS_PER_DAY: i64 = 86_400 * MICROS_PER_SECOND;

/// A date-time tagged with the calendar whose rules govern its arithmetic.
///
/// Fields are validated on construction, so every value names an instant
/// that exists in its calendar. Ordering compares the fields coarsest
/// first, which is chronological for timestamps of the same calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarTimestamp {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    microsecond: u32,
    calendar: CalendarKind,
}

impl CalendarTimestamp {
    /// Smallest supported year.
    pub const MIN_YEAR: i32 = -99_999;
    /// Largest supported year.
    pub const MAX_YEAR: i32 = 99_999;

    /// Creates a timestamp at midnight of the given date.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDate`] if the date does not exist in
    /// `calendar` or the year is outside [`Self::MIN_YEAR`]..=[`Self::MAX_YEAR`].
    pub fn new(calendar: CalendarKind, year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        Self::from_ymd_hms(calendar, year, month, day, 0, 0, 0)
    }

    /// Creates a timestamp from date and time-of-day fields.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDate`] or [`CalendarError::InvalidTime`]
    /// when a field is out of range for `calendar`.
    pub fn from_ymd_hms(
        calendar: CalendarKind,
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, CalendarError> {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            microsecond: 0,
            calendar,
        }
        .validated()
    }

    fn validated(self) -> Result<Self, CalendarError> {
        if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&self.year)
            || !self.calendar.is_valid_date(self.year, self.month, self.day)
        {
            return Err(CalendarError::InvalidDate {
                year: self.year,
                month: self.month,
                day: self.day,
                calendar: self.calendar,
            });
        }
        if self.hour > 23 || self.minute > 59 || self.second > 59 || self.microsecond > 999_999 {
            return Err(CalendarError::InvalidTime {
                hour: self.hour,
                minute: self.minute,
                second: self.second,
                microsecond: self.microsecond,
            });
        }
        Ok(self)
    }

    /// Returns the calendar the timestamp is tagged with.
    pub fn calendar(self) -> CalendarKind {
        self.calendar
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        self.month
    }

    /// Returns the day within the month.
    pub fn day(self) -> u8 {
        self.day
    }

    /// Returns the hour (0..=23).
    pub fn hour(self) -> u8 {
        self.hour
    }

    /// Returns the minute (0..=59).
    pub fn minute(self) -> u8 {
        self.minute
    }

    /// Returns the second (0..=59).
    pub fn second(self) -> u8 {
        self.second
    }

    /// Returns the microsecond (0..=999_999).
    pub fn microsecond(self) -> u32 {
        self.microsecond
    }

    /// Returns `(year, month, day)`.
    pub fn date(self) -> (i32, u8, u8) {
        (self.year, self.month, self.day)
    }

    /// Returns `true` if all time-of-day fields are zero.
    pub fn is_midnight(self) -> bool {
        self.hour == 0 && self.minute == 0 && self.second == 0 && self.microsecond == 0
    }

    /// Returns a copy with the year replaced.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDate`] if the date does not exist.
    pub fn with_year(self, year: i32) -> Result<Self, CalendarError> {
        Self { year, ..self }.validated()
    }

    /// Returns a copy with the month replaced.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDate`] if the date does not exist.
    pub fn with_month(self, month: u8) -> Result<Self, CalendarError> {
        Self { month, ..self }.validated()
    }

    /// Returns a copy with the day replaced.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDate`] if the date does not exist.
    pub fn with_day(self, day: u8) -> Result<Self, CalendarError> {
        Self { day, ..self }.validated()
    }

    /// Returns a copy with the hour replaced.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidTime`] if `hour` exceeds 23.
    pub fn with_hour(self, hour: u8) -> Result<Self, CalendarError> {
        Self { hour, ..self }.validated()
    }

    /// Returns a copy with the minute replaced.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidTime`] if `minute` exceeds 59.
    pub fn with_minute(self, minute: u8) -> Result<Self, CalendarError> {
        Self { minute, ..self }.validated()
    }

    /// Returns a copy with the second replaced.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidTime`] if `second` exceeds 59.
    pub fn with_second(self, second: u8) -> Result<Self, CalendarError> {
        Self { second, ..self }.validated()
    }

    /// Returns a copy with the microsecond replaced.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidTime`] if `microsecond` exceeds 999_999.
    pub fn with_microsecond(self, microsecond: u32) -> Result<Self, CalendarError> {
        Self { microsecond, ..self }.validated()
    }

    /// Re-tags the same fields with another calendar.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDate`] if the date does not exist in
    /// `calendar` (e.g. February 30 outside `360_day`).
    pub fn with_calendar(self, calendar: CalendarKind) -> Result<Self, CalendarError> {
        Self { calendar, ..self }.validated()
    }

    /// Returns midnight of the same day.
    pub fn start_of_day(self) -> Self {
        Self {
            hour: 0,
            minute: 0,
            second: 0,
            microsecond: 0,
            ..self
        }
    }

    /// Microseconds since the calendar's day-number epoch.
    pub fn timestamp_micros(self) -> i64 {
        let days = self.calendar.day_number(self.year, self.month, self.day);
        let seconds =
            i64::from(self.hour) * 3_600 + i64::from(self.minute) * 60 + i64::from(self.second);
        days * MICROS_PER_DAY + seconds * MICROS_PER_SECOND + i64::from(self.microsecond)
    }

    /// Inverse of [`CalendarTimestamp::timestamp_micros`].
    ///
    /// Returns `None` if the result falls outside the supported year range.
    pub fn from_timestamp_micros(calendar: CalendarKind, micros: i64) -> Option<Self> {
        let days = micros.div_euclid(MICROS_PER_DAY);
        let rem = micros.rem_euclid(MICROS_PER_DAY);
        let (year, month, day) = calendar.date_from_day_number(days)?;
        let seconds = rem / MICROS_PER_SECOND;
        Self {
            year,
            month,
            day,
            hour: (seconds / 3_600) as u8,
            minute: (seconds % 3_600 / 60) as u8,
            second: (seconds % 60) as u8,
            microsecond: (rem % MICROS_PER_SECOND) as u32,
            calendar,
        }
        .validated()
        .ok()
    }

    /// Adds a duration, honouring the calendar's day-count rules.
    ///
    /// Returns `None` on overflow or when leaving the supported year range.
    pub fn checked_add_signed(self, delta: TimeDelta) -> Option<Self> {
        let micros = self.timestamp_micros().checked_add(delta.num_microseconds()?)?;
        Self::from_timestamp_micros(self.calendar, micros)
    }

    /// Subtracts a duration, honouring the calendar's day-count rules.
    pub fn checked_sub_signed(self, delta: TimeDelta) -> Option<Self> {
        self.checked_add_signed(-delta)
    }

    /// Adds whole calendar months, clamping the day to the target month length.
    pub fn checked_add_months(self, months: i64) -> Option<Self> {
        let index = self.month_index().checked_add(months)?;
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        let month = (index.rem_euclid(12) + 1) as u8;
        let day = self.day.min(self.calendar.days_in_month(year, month));
        Self {
            year,
            month,
            day,
            ..self
        }
        .validated()
        .ok()
    }

    /// Returns the duration `self - other`.
    ///
    /// Both timestamps are measured in their own calendars; differences are
    /// only meaningful between timestamps of the same calendar.
    pub fn signed_duration_since(self, other: Self) -> TimeDelta {
        TimeDelta::microseconds(self.timestamp_micros() - other.timestamp_micros())
    }

    /// Months since year 0, January.
    pub(crate) fn month_index(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month - 1)
    }

    /// First or last day of the month `index` months after year 0, January.
    pub(crate) fn month_boundary(
        calendar: CalendarKind,
        index: i64,
        last_day: bool,
    ) -> Result<Self, CalendarError> {
        let year = i32::try_from(index.div_euclid(12)).map_err(|_| CalendarError::OutOfRange)?;
        let month = (index.rem_euclid(12) + 1) as u8;
        let day = if last_day {
            calendar.days_in_month(year, month)
        } else {
            1
        };
        Self::new(calendar, year, month, day).map_err(|_| CalendarError::OutOfRange)
    }

    /// Renders the timestamp with a format template.
    pub fn format(self, template: &FormatTemplate) -> String {
        template.format(&self)
    }
}

impl fmt::Display for CalendarTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year < 0 {
            write!(f, "-{:04}", -i64::from(self.year))?;
        } else {
            write!(f, "{:04}", self.year)?;
        }
        write!(
            f,
            "-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(calendar: CalendarKind, y: i32, m: u8, d: u8) -> CalendarTimestamp {
        CalendarTimestamp::new(calendar, y, m, d).unwrap()
    }

    #[test]
    fn new_valid() {
        let t = ts(CalendarKind::Day360, 2005, 2, 30);
        assert_eq!(t.date(), (2005, 2, 30));
        assert_eq!(t.calendar(), CalendarKind::Day360);
        assert!(t.is_midnight());
    }

    #[test]
    fn new_invalid_date() {
        assert_eq!(
            CalendarTimestamp::new(CalendarKind::Standard, 2005, 2, 30).unwrap_err(),
            CalendarError::InvalidDate {
                year: 2005,
                month: 2,
                day: 30,
                calendar: CalendarKind::Standard,
            }
        );
        assert!(CalendarTimestamp::new(CalendarKind::NoLeap, 2004, 2, 29).is_err());
        assert!(CalendarTimestamp::new(CalendarKind::Standard, 2005, 13, 1).is_err());
        assert!(CalendarTimestamp::new(CalendarKind::Standard, 100_000, 1, 1).is_err());
    }

    #[test]
    fn new_invalid_time() {
        assert!(matches!(
            CalendarTimestamp::from_ymd_hms(CalendarKind::Standard, 2005, 1, 1, 24, 0, 0),
            Err(CalendarError::InvalidTime { hour: 24, .. })
        ));
    }

    #[test]
    fn with_calendar_validates() {
        let t = ts(CalendarKind::Day360, 2005, 2, 30);
        assert!(t.with_calendar(CalendarKind::Standard).is_err());
        let t = ts(CalendarKind::Standard, 2005, 2, 28);
        assert_eq!(
            t.with_calendar(CalendarKind::Day360).unwrap().calendar(),
            CalendarKind::Day360
        );
    }

    #[test]
    fn add_day_360() {
        let t = ts(CalendarKind::Day360, 2005, 2, 30);
        let next = t.checked_add_signed(TimeDelta::days(1)).unwrap();
        assert_eq!(next.date(), (2005, 3, 1));
    }

    #[test]
    fn add_day_noleap_and_standard() {
        let t = ts(CalendarKind::NoLeap, 2004, 2, 28);
        assert_eq!(
            t.checked_add_signed(TimeDelta::days(1)).unwrap().date(),
            (2004, 3, 1)
        );
        let t = ts(CalendarKind::Standard, 2004, 2, 28);
        assert_eq!(
            t.checked_add_signed(TimeDelta::days(1)).unwrap().date(),
            (2004, 2, 29)
        );
    }

    #[test]
    fn add_day_across_reform() {
        let t = ts(CalendarKind::Standard, 1582, 10, 4);
        assert_eq!(
            t.checked_add_signed(TimeDelta::days(1)).unwrap().date(),
            (1582, 10, 15)
        );
    }

    #[test]
    fn add_hours_and_subtract() {
        let t = CalendarTimestamp::from_ymd_hms(CalendarKind::Julian, 2005, 12, 31, 23, 0, 0).unwrap();
        let next = t.checked_add_signed(TimeDelta::hours(2)).unwrap();
        assert_eq!(next.date(), (2006, 1, 1));
        assert_eq!(next.hour(), 1);
        assert_eq!(next.checked_sub_signed(TimeDelta::hours(2)).unwrap(), t);
    }

    #[test]
    fn duration_since() {
        let a = ts(CalendarKind::Day360, 2005, 1, 1);
        let b = ts(CalendarKind::Day360, 2006, 1, 1);
        assert_eq!(b.signed_duration_since(a), TimeDelta::days(360));
        assert_eq!(a.signed_duration_since(b), TimeDelta::days(-360));
    }

    #[test]
    fn add_months_clamps_day() {
        let t = ts(CalendarKind::Standard, 2005, 1, 31);
        assert_eq!(t.checked_add_months(1).unwrap().date(), (2005, 2, 28));
        assert_eq!(t.checked_add_months(-2).unwrap().date(), (2004, 11, 30));
        assert_eq!(t.checked_add_months(12).unwrap().date(), (2006, 1, 31));
    }

    #[test]
    fn micros_round_trip() {
        let t = CalendarTimestamp::from_ymd_hms(CalendarKind::AllLeap, -12, 2, 29, 7, 8, 9)
            .unwrap()
            .with_microsecond(42)
            .unwrap();
        let back = CalendarTimestamp::from_timestamp_micros(t.calendar(), t.timestamp_micros());
        assert_eq!(back, Some(t));
    }

    #[test]
    fn ordering_is_chronological() {
        let a = ts(CalendarKind::Standard, 2005, 1, 2);
        let b = CalendarTimestamp::from_ymd_hms(CalendarKind::Standard, 2005, 1, 1, 23, 0, 0).unwrap();
        assert!(b < a);
    }

    #[test]
    fn display() {
        let t = CalendarTimestamp::from_ymd_hms(CalendarKind::Standard, 5, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(t.to_string(), "0005-03-04T05:06:07");
        let t = ts(CalendarKind::Julian, -44, 3, 15);
        assert_eq!(t.to_string(), "-0044-03-15T00:00:00");
    }

    #[test]
    fn start_of_day() {
        let t = CalendarTimestamp::from_ymd_hms(CalendarKind::Standard, 2005, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(t.start_of_day(), ts(CalendarKind::Standard, 2005, 3, 4));
    }

    #[test]
    fn copy_and_hash() {
        fn assert_impl<T: Copy + std::hash::Hash + Send + Sync>() {}
        assert_impl::<CalendarTimestamp>();
    }
}
