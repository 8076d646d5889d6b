//! A dataset's time coordinate together with its calendar and frequency.

use homog_calendar::{CalendarKind, CalendarTimestamp};
use tracing::{debug, warn};

use crate::error::TimeCheckError;
use crate::frequency::Frequency;
use crate::infer::infer_frequency;

/// Timestamps in the positional order they were read, with their calendar
/// and optionally a declared frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    values: Vec<CalendarTimestamp>,
    calendar: CalendarKind,
    frequency: Option<Frequency>,
}

impl TimeAxis {
    /// Creates an axis; every value is re-tagged with `calendar`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeCheckError::Calendar`] if a value does not exist in
    /// `calendar`.
    pub fn new(values: Vec<CalendarTimestamp>, calendar: CalendarKind) -> Result<Self, TimeCheckError> {
        let values = values
            .into_iter()
            .map(|t| t.with_calendar(calendar))
            .collect::<Result<_, _>>()?;
        Ok(Self {
            values,
            calendar,
            frequency: None,
        })
    }

    /// Attaches a declared frequency.
    pub fn with_frequency(mut self, frequency: Option<Frequency>) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn values(&self) -> &[CalendarTimestamp] {
        &self.values
    }

    pub fn calendar(&self) -> CalendarKind {
        self.calendar
    }

    /// The declared frequency, if any.
    pub fn frequency(&self) -> Option<Frequency> {
        self.frequency
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// A new axis holding the values at `indices`.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            values: indices.iter().filter_map(|&i| self.values.get(i).copied()).collect(),
            calendar: self.calendar,
            frequency: self.frequency,
        }
    }

    /// Picks the frequency to work with.
    ///
    /// An explicit `requested` frequency wins, then the declared one, then
    /// the frequency inferred from the spacing of the values.
    ///
    /// # Errors
    ///
    /// Returns [`TimeCheckError::FrequencyUnavailable`] if none exists.
    pub fn resolve_frequency(&self, requested: Option<Frequency>) -> Result<Frequency, TimeCheckError> {
        if let Some(frequency) = requested.or(self.frequency) {
            return Ok(frequency);
        }
        match infer_frequency(&self.values) {
            Some(frequency) => {
                debug!(%frequency, "frequency inferred from time axis");
                Ok(frequency)
            }
            None => {
                warn!(n = self.values.len(), "could not determine any frequency");
                Err(TimeCheckError::FrequencyUnavailable)
            }
        }
    }
}
