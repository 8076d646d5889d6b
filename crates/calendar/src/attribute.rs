//! Named calendar attributes and their accessor table.

use std::fmt;

use crate::date::CalendarTimestamp;
use crate::error::CalendarError;

/// A named field of a calendar timestamp, ordered coarsest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeName {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Microsecond,
    /// Finer than the timestamp resolution; never readable or writable.
    Nanosecond,
}

static ORDERED: [AttributeName; 8] = AttributeName::ALL;

type Getter = fn(&CalendarTimestamp) -> Option<i64>;
type Setter = fn(&CalendarTimestamp, i64) -> Result<CalendarTimestamp, CalendarError>;

struct Accessor {
    get: Getter,
    set: Setter,
}

/// Getter/setter pair for every attribute, indexed by discriminant.
const ACCESSORS: [Accessor; 8] = [
    Accessor {
        get: |t| Some(i64::from(t.year())),
        set: |t, v| t.with_year(narrow(AttributeName::Year, v)?),
    },
    Accessor {
        get: |t| Some(i64::from(t.month())),
        set: |t, v| t.with_month(narrow(AttributeName::Month, v)?),
    },
    Accessor {
        get: |t| Some(i64::from(t.day())),
        set: |t, v| t.with_day(narrow(AttributeName::Day, v)?),
    },
    Accessor {
        get: |t| Some(i64::from(t.hour())),
        set: |t, v| t.with_hour(narrow(AttributeName::Hour, v)?),
    },
    Accessor {
        get: |t| Some(i64::from(t.minute())),
        set: |t, v| t.with_minute(narrow(AttributeName::Minute, v)?),
    },
    Accessor {
        get: |t| Some(i64::from(t.second())),
        set: |t, v| t.with_second(narrow(AttributeName::Second, v)?),
    },
    Accessor {
        get: |t| Some(i64::from(t.microsecond())),
        set: |t, v| t.with_microsecond(narrow(AttributeName::Microsecond, v)?),
    },
    Accessor {
        get: |_| None,
        set: |_, _| {
            Err(CalendarError::UnsupportedAttribute {
                attribute: AttributeName::Nanosecond,
            })
        },
    },
];

impl AttributeName {
    /// Every attribute, coarsest first.
    pub const ALL: [AttributeName; 8] = [
        AttributeName::Year,
        AttributeName::Month,
        AttributeName::Day,
        AttributeName::Hour,
        AttributeName::Minute,
        AttributeName::Second,
        AttributeName::Microsecond,
        AttributeName::Nanosecond,
    ];

    /// Returns the lowercase attribute name.
    pub fn name(self) -> &'static str {
        match self {
            AttributeName::Year => "year",
            AttributeName::Month => "month",
            AttributeName::Day => "day",
            AttributeName::Hour => "hour",
            AttributeName::Minute => "minute",
            AttributeName::Second => "second",
            AttributeName::Microsecond => "microsecond",
            AttributeName::Nanosecond => "nanosecond",
        }
    }

    /// Returns the smallest legal value of the attribute.
    pub fn canonical(self) -> i64 {
        match self {
            AttributeName::Year | AttributeName::Month | AttributeName::Day => 1,
            _ => 0,
        }
    }

    /// Returns every attribute from `Year` down to and including `self`.
    pub fn with_coarser(self) -> &'static [AttributeName] {
        &ORDERED[..=self as usize]
    }

    /// Reads the attribute from `timestamp`, or `None` if unsupported.
    pub fn get(self, timestamp: &CalendarTimestamp) -> Option<i64> {
        (ACCESSORS[self as usize].get)(timestamp)
    }

    /// Returns a copy of `timestamp` with the attribute replaced by `value`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::UnsupportedAttribute`] for
    /// [`AttributeName::Nanosecond`], [`CalendarError::InvalidAttributeValue`]
    /// if `value` does not fit the field, or the validation error of the
    /// resulting timestamp.
    pub fn set(
        self,
        timestamp: &CalendarTimestamp,
        value: i64,
    ) -> Result<CalendarTimestamp, CalendarError> {
        (ACCESSORS[self as usize].set)(timestamp, value)
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn narrow<T: TryFrom<i64>>(attribute: AttributeName, value: i64) -> Result<T, CalendarError> {
    T::try_from(value).map_err(|_| CalendarError::InvalidAttributeValue { attribute, value })
}
