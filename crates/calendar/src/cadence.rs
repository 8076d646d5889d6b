//! Stepping rules for point grids.

use std::fmt;
use std::str::FromStr;

use chrono::TimeDelta;

use crate::date::CalendarTimestamp;
use crate::error::CalendarError;

const MONTH_NAMES: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// A run of `months` consecutive months whose first month is `anchor`.
///
/// Periods tile the month axis: a month index `i` (months since year 0,
/// January) belongs to the period starting at the largest index `<= i` that
/// is congruent to `anchor - 1` modulo `months`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    months: u32,
    anchor: u8,
}

impl Period {
    /// Calendar months.
    pub const MONTH: Period = Period { months: 1, anchor: 1 };
    /// Meteorological seasons (DJF, MAM, JJA, SON).
    pub const SEASON: Period = Period {
        months: 3,
        anchor: 12,
    };
    /// Calendar years.
    pub const YEAR: Period = Period {
        months: 12,
        anchor: 1,
    };
    /// Decades starting in years divisible by ten.
    pub const DECADE: Period = Period {
        months: 120,
        anchor: 1,
    };

    /// Creates a period, or `None` for a zero length or invalid anchor month.
    pub const fn new(months: u32, anchor: u8) -> Option<Self> {
        if months == 0 || anchor == 0 || anchor > 12 {
            None
        } else {
            Some(Self { months, anchor })
        }
    }

    /// Length in months.
    pub fn months(self) -> u32 {
        self.months
    }

    /// First month (1..=12) of one of the periods.
    pub fn anchor(self) -> u8 {
        self.anchor
    }

    fn start_index(self, index: i64) -> i64 {
        index - (index - i64::from(self.anchor - 1)).rem_euclid(i64::from(self.months))
    }

    fn first_day(self, t: CalendarTimestamp, offset: i64) -> Result<CalendarTimestamp, CalendarError> {
        let index = self.start_index(t.month_index()) + offset * i64::from(self.months);
        CalendarTimestamp::month_boundary(t.calendar(), index, false)
    }

    fn last_day(self, t: CalendarTimestamp, offset: i64) -> Result<CalendarTimestamp, CalendarError> {
        let index =
            self.start_index(t.month_index()) + (offset + 1) * i64::from(self.months) - 1;
        CalendarTimestamp::month_boundary(t.calendar(), index, true)
    }
}

/// The stepping rule of a point grid.
///
/// Unanchored cadences step from wherever they start. Anchored cadences only
/// produce midnight on the first (`PeriodStart`) or last (`PeriodEnd`) day of
/// each [`Period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cadence {
    Hours(u32),
    Days(u32),
    /// Calendar months; the day is clamped to the target month length.
    Months(u32),
    Years(u32),
    PeriodStart(Period),
    PeriodEnd(Period),
}

impl Cadence {
    fn is_zero(self) -> bool {
        matches!(
            self,
            Cadence::Hours(0) | Cadence::Days(0) | Cadence::Months(0) | Cadence::Years(0)
        )
    }

    /// First value of the cadence at or after `t`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] if the value leaves the
    /// supported year range.
    pub fn rollforward(self, t: CalendarTimestamp) -> Result<CalendarTimestamp, CalendarError> {
        match self {
            Cadence::PeriodStart(p) => {
                let start = p.first_day(t, 0)?;
                if start == t { Ok(start) } else { p.first_day(t, 1) }
            }
            Cadence::PeriodEnd(p) => {
                let end = p.last_day(t, 0)?;
                if t <= end { Ok(end) } else { p.last_day(t, 1) }
            }
            _ => Ok(t),
        }
    }

    /// Last value of the cadence at or before `t`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] if the value leaves the
    /// supported year range.
    pub fn rollback(self, t: CalendarTimestamp) -> Result<CalendarTimestamp, CalendarError> {
        match self {
            Cadence::PeriodStart(p) => p.first_day(t, 0),
            Cadence::PeriodEnd(p) => {
                let end = p.last_day(t, 0)?;
                if end <= t { Ok(end) } else { p.last_day(t, -1) }
            }
            _ => Ok(t),
        }
    }

    /// The `k`-th value after `first`, which must lie on the cadence.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] on overflow.
    pub fn nth(self, first: CalendarTimestamp, k: i64) -> Result<CalendarTimestamp, CalendarError> {
        let stepped = match self {
            Cadence::Hours(n) => TimeDelta::try_hours(i64::from(n) * k)
                .and_then(|delta| first.checked_add_signed(delta)),
            Cadence::Days(n) => TimeDelta::try_days(i64::from(n) * k)
                .and_then(|delta| first.checked_add_signed(delta)),
            Cadence::Months(n) => first.checked_add_months(i64::from(n) * k),
            Cadence::Years(n) => first.checked_add_months(12 * i64::from(n) * k),
            Cadence::PeriodStart(p) => return p.first_day(first, k),
            Cadence::PeriodEnd(p) => return p.last_day(first, k),
        };
        stepped.ok_or(CalendarError::OutOfRange)
    }

    /// Every value of the cadence in `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidRange`] if `end < start` and
    /// [`CalendarError::InvalidCadence`] for a zero step.
    pub fn range(
        self,
        start: CalendarTimestamp,
        end: CalendarTimestamp,
    ) -> Result<Vec<CalendarTimestamp>, CalendarError> {
        if end < start {
            return Err(CalendarError::InvalidRange { start, end });
        }
        if self.is_zero() {
            return Err(CalendarError::InvalidCadence {
                alias: self.to_string(),
            });
        }
        let first = self.rollforward(start)?;
        let mut out = Vec::new();
        let mut k = 0;
        loop {
            let t = self.nth(first, k)?;
            if t > end {
                break;
            }
            out.push(t);
            k += 1;
        }
        Ok(out)
    }

    /// `count` consecutive values starting at the roll-forward of `start`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] on overflow.
    pub fn periods(
        self,
        start: CalendarTimestamp,
        count: usize,
    ) -> Result<Vec<CalendarTimestamp>, CalendarError> {
        let first = self.rollforward(start)?;
        (0..count as i64).map(|k| self.nth(first, k)).collect()
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Cadence::Hours(n) => write!(f, "{n}H"),
            Cadence::Days(n) => write!(f, "{n}D"),
            Cadence::Months(n) => write!(f, "{n} months"),
            Cadence::Years(n) => write!(f, "{n} years"),
            Cadence::PeriodStart(p) => write_period(f, p, true),
            Cadence::PeriodEnd(p) => write_period(f, p, false),
        }
    }
}

fn write_period(f: &mut fmt::Formatter<'_>, p: Period, start: bool) -> fmt::Result {
    let suffix = if start { "S" } else { "" };
    let multiple = |unit: u32| {
        let n = p.months / unit;
        if n == 1 { String::new() } else { n.to_string() }
    };
    if p.months % 12 == 0 && p.anchor == 1 {
        write!(f, "{}A{suffix}", multiple(12))
    } else if p.months % 3 == 0 {
        let month = if start {
            p.anchor
        } else {
            (i64::from(p.anchor) - 2 + i64::from(p.months)).rem_euclid(12) as u8 + 1
        };
        write!(f, "{}Q{suffix}-{}", multiple(3), MONTH_NAMES[usize::from(month - 1)])
    } else {
        write!(f, "{}M{suffix}", multiple(1))
    }
}

fn month_from_name(name: &str) -> Option<u8> {
    MONTH_NAMES
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name))
        .map(|i| i as u8 + 1)
}

/// First month of periods of `months` months that end in `end_month`.
fn anchor_ending_in(end_month: u8, months: u32) -> u8 {
    (i64::from(end_month) - i64::from(months)).rem_euclid(12) as u8 + 1
}

impl FromStr for Cadence {
    type Err = CalendarError;

    /// Parses offset aliases such as `D`, `3H`, `MS`, `QS-DEC`, `Q-FEB`,
    /// `AS` or `10A`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidCadence {
            alias: s.to_string(),
        };
        let alias = s.trim();
        let digits = alias.bytes().take_while(u8::is_ascii_digit).count();
        let n: u32 = if digits == 0 {
            1
        } else {
            alias[..digits].parse().map_err(|_| invalid())?
        };
        if n == 0 {
            return Err(invalid());
        }
        let (body, month) = match alias[digits..].split_once('-') {
            Some((body, name)) => (body, Some(month_from_name(name).ok_or_else(invalid)?)),
            None => (&alias[digits..], None),
        };
        let period = |months: u32, anchor: u8| Period::new(months, anchor).ok_or_else(invalid);
        let cadence = match (body.to_ascii_uppercase().as_str(), month) {
            ("H", None) => Cadence::Hours(n),
            ("D", None) => Cadence::Days(n),
            ("MS", None) => Cadence::PeriodStart(period(n, 1)?),
            ("M" | "ME", None) => Cadence::PeriodEnd(period(n, 1)?),
            ("QS", m) => Cadence::PeriodStart(period(3 * n, m.unwrap_or(1))?),
            ("Q" | "QE", m) => {
                Cadence::PeriodEnd(period(3 * n, anchor_ending_in(m.unwrap_or(12), 3 * n))?)
            }
            ("AS" | "YS", m) => Cadence::PeriodStart(period(12 * n, m.unwrap_or(1))?),
            ("A" | "Y" | "YE", m) => {
                Cadence::PeriodEnd(period(12 * n, anchor_ending_in(m.unwrap_or(12), 12 * n))?)
            }
            _ => return Err(invalid()),
        };
        Ok(cadence)
    }
}
