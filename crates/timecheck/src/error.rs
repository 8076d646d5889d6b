//! Error types for the homog-timecheck crate.

use homog_calendar::CalendarError;

/// Error type for all fallible operations in the homog-timecheck crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimeCheckError {
    /// Returned when a frequency token is not in the catalog.
    #[error("unknown frequency: '{token}'")]
    UnknownFrequency {
        /// The token that was provided.
        token: String,
    },

    /// Returned when no truncation of the format template matches the text.
    #[error("cannot parse '{text}' as a timestamp")]
    UnparsableTimestamp {
        /// The text that was provided.
        text: String,
    },

    /// Returned when an operation needs at least one timestamp.
    #[error("time axis is empty")]
    EmptyAxis,

    /// Returned when neither a declared nor an inferred frequency exists.
    #[error("could not determine the frequency of the time axis")]
    FrequencyUnavailable,

    /// Returned when a month filter contains a value outside 1..=12.
    #[error("invalid month: {month} (expected 1..=12)")]
    InvalidMonth {
        /// The month that was provided.
        month: u8,
    },

    /// Calendar arithmetic or validation failed.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_unknown_frequency() {
        let err = TimeCheckError::UnknownFrequency {
            token: "fortnightly".to_string(),
        };
        assert_eq!(err.to_string(), "unknown frequency: 'fortnightly'");
    }

    #[test]
    fn error_invalid_month() {
        let err = TimeCheckError::InvalidMonth { month: 13 };
        assert_eq!(err.to_string(), "invalid month: 13 (expected 1..=12)");
    }

    #[test]
    fn error_from_calendar() {
        let err: TimeCheckError = CalendarError::OutOfRange.into();
        assert_eq!(err.to_string(), "timestamp arithmetic out of range");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<TimeCheckError>();
    }
}
