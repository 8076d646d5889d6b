//! CF calendar kinds and their day-count rules.

use std::fmt;
use std::str::FromStr;

use crate::error::CalendarError;

/// A CF day-counting convention.
///
/// The kind decides month lengths, leap years and how a date maps onto a
/// continuous day number, which in turn drives all timestamp arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum CalendarKind {
    /// Mixed Julian/Gregorian calendar switching on 1582-10-15.
    #[default]
    Standard,
    /// Gregorian rules extended backwards in time.
    ProlepticGregorian,
    /// 365 days every year (`noleap`, `365_day`).
    NoLeap,
    /// 366 days every year (`all_leap`, `366_day`).
    AllLeap,
    /// Twelve 30-day months (`360_day`).
    Day360,
    /// Julian rules: every fourth year is a leap year.
    Julian,
}

/// Number of days in each month of a common year (index 0 unused).
const DAYS_PER_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days elapsed before the first of each month in a common year (index 0 unused).
const DAYS_BEFORE_MONTH: [u16; 13] = [0, 0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Julian day number of 1582-10-15, the first Gregorian day of `standard`.
const GREGORIAN_REFORM: i64 = 2_299_161;

const GREGORIAN_CYCLE_DAYS: i64 = 146_097;
const GREGORIAN_CYCLE_YEARS: i64 = 400;
const JULIAN_CYCLE_DAYS: i64 = 1_461;
const JULIAN_CYCLE_YEARS: i64 = 4;

impl CalendarKind {
    /// Every supported calendar kind.
    pub const ALL: [CalendarKind; 6] = [
        CalendarKind::Standard,
        CalendarKind::ProlepticGregorian,
        CalendarKind::NoLeap,
        CalendarKind::AllLeap,
        CalendarKind::Day360,
        CalendarKind::Julian,
    ];

    /// Returns the canonical CF name of the calendar.
    pub fn name(self) -> &'static str {
        match self {
            CalendarKind::Standard => "standard",
            CalendarKind::ProlepticGregorian => "proleptic_gregorian",
            CalendarKind::NoLeap => "noleap",
            CalendarKind::AllLeap => "all_leap",
            CalendarKind::Day360 => "360_day",
            CalendarKind::Julian => "julian",
        }
    }

    /// Returns `true` if `year` has a February 29 in this calendar.
    pub fn is_leap_year(self, year: i32) -> bool {
        match self {
            CalendarKind::Standard if year < 1582 => julian_leap(year),
            CalendarKind::Standard | CalendarKind::ProlepticGregorian => gregorian_leap(year),
            CalendarKind::Julian => julian_leap(year),
            CalendarKind::NoLeap | CalendarKind::Day360 => false,
            CalendarKind::AllLeap => true,
        }
    }

    /// Returns the number of days in `month` (1..=12) of `year`, or 0 for an
    /// invalid month.
    pub fn days_in_month(self, year: i32, month: u8) -> u8 {
        if !(1..=12).contains(&month) {
            return 0;
        }
        if self == CalendarKind::Day360 {
            return 30;
        }
        if month == 2 && self.is_leap_year(year) {
            29
        } else {
            DAYS_PER_MONTH[month as usize]
        }
    }

    /// Returns the number of days in `year`.
    pub fn days_in_year(self, year: i32) -> u16 {
        match self {
            CalendarKind::Day360 => 360,
            _ if self.is_leap_year(year) => 366,
            _ => 365,
        }
    }

    /// Returns `true` if the date exists in this calendar.
    ///
    /// The `standard` calendar skips 1582-10-05 through 1582-10-14.
    pub fn is_valid_date(self, year: i32, month: u8, day: u8) -> bool {
        if day == 0 || day > self.days_in_month(year, month) {
            return false;
        }
        !(self == CalendarKind::Standard && year == 1582 && month == 10 && (5..=14).contains(&day))
    }

    /// Maps a valid date onto a continuous day number.
    ///
    /// Julian, Gregorian and `standard` dates use the Julian day number, so
    /// these three calendars agree on the instant a day number denotes.
    pub(crate) fn day_number(self, year: i32, month: u8, day: u8) -> i64 {
        let y = i64::from(year);
        match self {
            CalendarKind::Day360 => y * 360 + i64::from(month - 1) * 30 + i64::from(day - 1),
            CalendarKind::NoLeap => y * 365 + days_before(month, false) + i64::from(day - 1),
            CalendarKind::AllLeap => y * 366 + days_before(month, true) + i64::from(day - 1),
            CalendarKind::Julian => civil_day_number(y, month, day, false),
            CalendarKind::ProlepticGregorian => civil_day_number(y, month, day, true),
            CalendarKind::Standard => {
                let gregorian = (year, month, day) >= (1582, 10, 15);
                civil_day_number(y, month, day, gregorian)
            }
        }
    }

    /// Inverse of [`CalendarKind::day_number`].
    pub(crate) fn date_from_day_number(self, n: i64) -> Option<(i32, u8, u8)> {
        let (year, month, day) = match self {
            CalendarKind::Day360 => {
                let rem = n.rem_euclid(360);
                (n.div_euclid(360), (rem / 30 + 1) as u8, (rem % 30 + 1) as u8)
            }
            CalendarKind::NoLeap => fixed_length_date(n, false),
            CalendarKind::AllLeap => fixed_length_date(n, true),
            CalendarKind::Julian => civil_date(n, false),
            CalendarKind::ProlepticGregorian => civil_date(n, true),
            CalendarKind::Standard => civil_date(n, n >= GREGORIAN_REFORM),
        };
        Some((i32::try_from(year).ok()?, month, day))
    }
}

impl fmt::Display for CalendarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CalendarKind {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "gregorian" => Ok(CalendarKind::Standard),
            "proleptic_gregorian" => Ok(CalendarKind::ProlepticGregorian),
            "noleap" | "no_leap" | "365_day" => Ok(CalendarKind::NoLeap),
            "all_leap" | "allleap" | "366_day" => Ok(CalendarKind::AllLeap),
            "360_day" => Ok(CalendarKind::Day360),
            "julian" => Ok(CalendarKind::Julian),
            _ => Err(CalendarError::UnknownCalendar {
                name: s.to_string(),
            }),
        }
    }
}

fn gregorian_leap(year: i32) -> bool {
    (year.rem_euclid(4) == 0 && year.rem_euclid(100) != 0) || year.rem_euclid(400) == 0
}

fn julian_leap(year: i32) -> bool {
    year.rem_euclid(4) == 0
}

fn days_before(month: u8, leap: bool) -> i64 {
    let extra = u16::from(leap && month > 2);
    i64::from(DAYS_BEFORE_MONTH[month as usize] + extra)
}

/// Date of day number `n` in a calendar whose years all have the same length.
fn fixed_length_date(n: i64, leap: bool) -> (i64, u8, u8) {
    let year_len = if leap { 366 } else { 365 };
    let mut rem = n.rem_euclid(year_len);
    let mut month = 1_u8;
    while month < 12 {
        let len = i64::from(DAYS_PER_MONTH[month as usize]) + i64::from(leap && month == 2);
        if rem < len {
            break;
        }
        rem -= len;
        month += 1;
    }
    (n.div_euclid(year_len), month, (rem + 1) as u8)
}

/// Julian day number of a Julian or Gregorian calendar date.
fn civil_day_number(year: i64, month: u8, day: u8, gregorian: bool) -> i64 {
    let (cycle_days, cycle_years) = cycle(gregorian);
    // Whole cycles keep the year positive so the divisions below floor.
    let shift = if year < 1 {
        (1 - year) / cycle_years + 1
    } else {
        0
    };
    let y = year + shift * cycle_years;
    let m = i64::from(month);
    let a = (14 - m) / 12;
    let yy = y + 4800 - a;
    let mm = m + 12 * a - 3;
    let mut jdn = i64::from(day) + (153 * mm + 2) / 5 + 365 * yy + yy / 4 - 32_083;
    if gregorian {
        jdn += -yy / 100 + yy / 400 + 38;
    }
    jdn - shift * cycle_days
}

/// Julian or Gregorian calendar date of a Julian day number.
fn civil_date(n: i64, gregorian: bool) -> (i64, u8, u8) {
    let (cycle_days, cycle_years) = cycle(gregorian);
    let shift = if n < 0 { -n / cycle_days + 1 } else { 0 };
    let j = n + shift * cycle_days;
    let mut f = j + 1401;
    if gregorian {
        f += (((4 * j + 274_277) / 146_097) * 3) / 4 - 38;
    }
    let e = 4 * f + 3;
    let g = (e % 1461) / 4;
    let h = 5 * g + 2;
    let day = (h % 153) / 5 + 1;
    let month = (h / 153 + 2) % 12 + 1;
    let year = e / 1461 - 4716 + (14 - month) / 12;
    (year - shift * cycle_years, month as u8, day as u8)
}

fn cycle(gregorian: bool) -> (i64, i64) {
    if gregorian {
        (GREGORIAN_CYCLE_DAYS, GREGORIAN_CYCLE_YEARS)
    } else {
        (JULIAN_CYCLE_DAYS, JULIAN_CYCLE_YEARS)
    }
}
