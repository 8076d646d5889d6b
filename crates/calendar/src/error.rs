//! Error types for the homog-calendar crate.

use crate::attribute::AttributeName;
use crate::date::CalendarTimestamp;
use crate::kind::CalendarKind;

/// Error type for all fallible operations in the homog-calendar crate.
///
/// This enum covers calendar-name lookups, validation of date and time
/// fields against a calendar's day-count rules, timestamp arithmetic that
/// leaves the supported year range, and malformed cadence, template or
/// CF time-unit strings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a calendar name is not one of the recognised CF calendars.
    #[error("unknown calendar: '{name}'")]
    UnknownCalendar {
        /// The calendar name that was provided.
        name: String,
    },

    /// Returned when a year/month/day triple does not exist in a calendar.
    #[error("invalid date: {year:04}-{month:02}-{day:02} does not exist in the {calendar} calendar")]
    InvalidDate {
        /// The year that was provided.
        year: i32,
        /// The month that was provided.
        month: u8,
        /// The day that was provided.
        day: u8,
        /// The calendar the date was validated against.
        calendar: CalendarKind,
    },

    /// Returned when a time-of-day field is out of range.
    #[error("invalid time: {hour:02}:{minute:02}:{second:02}.{microsecond:06}")]
    InvalidTime {
        /// The hour that was provided.
        hour: u8,
        /// The minute that was provided.
        minute: u8,
        /// The second that was provided.
        second: u8,
        /// The microsecond that was provided.
        microsecond: u32,
    },

    /// Returned when an attribute cannot be represented by a timestamp.
    #[error("attribute '{attribute}' is not supported by calendar timestamps")]
    UnsupportedAttribute {
        /// The attribute that was accessed.
        attribute: AttributeName,
    },

    /// Returned when a value does not fit the attribute it is assigned to.
    #[error("invalid value {value} for attribute '{attribute}'")]
    InvalidAttributeValue {
        /// The attribute that was assigned.
        attribute: AttributeName,
        /// The rejected value.
        value: i64,
    },

    /// Returned when the end of a range precedes its start.
    #[error("invalid range: end {end} precedes start {start}")]
    InvalidRange {
        /// Start of the requested range.
        start: CalendarTimestamp,
        /// End of the requested range.
        end: CalendarTimestamp,
    },

    /// Returned when timestamp arithmetic leaves the supported year range.
    #[error("timestamp arithmetic out of range")]
    OutOfRange,

    /// Returned when a cadence alias cannot be parsed or has a zero step.
    #[error("invalid cadence: '{alias}'")]
    InvalidCadence {
        /// The offending cadence alias.
        alias: String,
    },

    /// Returned when a CF `units` string cannot be parsed.
    #[error("invalid time units: '{units}'")]
    InvalidUnits {
        /// The offending units string.
        units: String,
    },

    /// Returned when a format template contains an unknown directive.
    #[error("invalid format template: '{template}'")]
    InvalidTemplate {
        /// The offending template.
        template: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_unknown_calendar() {
        let err = CalendarError::UnknownCalendar {
            name: "lunar".to_string(),
        };
        assert_eq!(err.to_string(), "unknown calendar: 'lunar'");
    }

    #[test]
    fn error_invalid_date() {
        let err = CalendarError::InvalidDate {
            year: 2001,
            month: 2,
            day: 29,
            calendar: CalendarKind::NoLeap,
        };
        assert_eq!(
            err.to_string(),
            "invalid date: 2001-02-29 does not exist in the noleap calendar"
        );
    }

    #[test]
    fn error_unsupported_attribute() {
        let err = CalendarError::UnsupportedAttribute {
            attribute: AttributeName::Nanosecond,
        };
        assert_eq!(
            err.to_string(),
            "attribute 'nanosecond' is not supported by calendar timestamps"
        );
    }

    #[test]
    fn error_invalid_range() {
        let start = CalendarTimestamp::new(CalendarKind::Standard, 2005, 2, 1).unwrap();
        let end = CalendarTimestamp::new(CalendarKind::Standard, 2005, 1, 1).unwrap();
        let err = CalendarError::InvalidRange { start, end };
        assert_eq!(
            err.to_string(),
            "invalid range: end 2005-01-01T00:00:00 precedes start 2005-02-01T00:00:00"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<CalendarError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<CalendarError>();
    }
}
