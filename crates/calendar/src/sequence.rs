//! Regular grid generation in any calendar.

use chrono::TimeDelta;

use crate::cadence::Cadence;
use crate::date::CalendarTimestamp;
use crate::error::CalendarError;
use crate::kind::CalendarKind;

/// How samples of a frequency are placed on the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sampling {
    /// One sample per cadence step.
    Point(Cadence),
    /// One sample half-way between each `lower` value and the matching
    /// `upper` value, e.g. mid-month between month start and month end.
    MidStep { lower: Cadence, upper: Cadence },
}

impl Sampling {
    /// Generates the grid between `start` and `end` inclusive.
    ///
    /// See [`date_range`].
    pub fn generate(
        self,
        start: CalendarTimestamp,
        end: CalendarTimestamp,
        calendar: CalendarKind,
    ) -> Result<Vec<CalendarTimestamp>, CalendarError> {
        date_range(self, start, end, calendar)
    }
}

/// Generates a regular grid between `start` and `end` inclusive.
///
/// Both bounds are re-tagged with `calendar` first. Point grids contain every
/// cadence value in the range. Mid-step grids snap `start` back to the
/// enclosing `lower` period, take the `lower` grid `G_a` up to `end` and as
/// many `upper` values `G_b`, and place each sample at
/// `G_a[i] + ((G_b[i] - G_a[i]) + 1 day) / 2`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidDate`] if a bound does not exist in
/// `calendar`, [`CalendarError::InvalidRange`] if `end < start` and
/// [`CalendarError::OutOfRange`] if the grid leaves the supported years.
///
/// # Example
///
/// ```ignore
/// let start = CalendarTimestamp::new(CalendarKind::Day360, 2005, 1, 1)?;
/// let end = CalendarTimestamp::new(CalendarKind::Day360, 2005, 12, 30)?;
/// let monthly = Sampling::MidStep {
///     lower: "MS".parse()?,
///     upper: "M".parse()?,
/// };
/// let grid = date_range(monthly, start, end, CalendarKind::Day360)?;
/// // 2005-01-16, 2005-02-16, ..., 2005-12-16
/// ```
pub fn date_range(
    sampling: Sampling,
    start: CalendarTimestamp,
    end: CalendarTimestamp,
    calendar: CalendarKind,
) -> Result<Vec<CalendarTimestamp>, CalendarError> {
    let start = start.with_calendar(calendar)?;
    let end = end.with_calendar(calendar)?;
    if end < start {
        return Err(CalendarError::InvalidRange { start, end });
    }
    match sampling {
        Sampling::Point(cadence) => cadence.range(start, end),
        Sampling::MidStep { lower, upper } => {
            let origin = lower.rollback(start)?;
            let grid_a = lower.range(origin, end)?;
            let grid_b = upper.periods(origin, grid_a.len())?;
            grid_a
                .iter()
                .zip(&grid_b)
                .map(|(&a, &b)| {
                    let half = (b.signed_duration_since(a) + TimeDelta::days(1)) / 2;
                    a.checked_add_signed(half).ok_or(CalendarError::OutOfRange)
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cadence::Period;

    fn ts(calendar: CalendarKind, y: i32, m: u8, d: u8) -> CalendarTimestamp {
        CalendarTimestamp::new(calendar, y, m, d).unwrap()
    }

    fn monthly() -> Sampling {
        Sampling::MidStep {
            lower: Cadence::PeriodStart(Period::MONTH),
            upper: Cadence::PeriodEnd(Period::MONTH),
        }
    }

    #[test]
    fn daily_point_grid() {
        let cal = CalendarKind::NoLeap;
        let dates = date_range(
            Sampling::Point(Cadence::Days(1)),
            ts(cal, 2000, 2, 27),
            ts(cal, 2000, 3, 1),
            cal,
        )
        .unwrap();
        assert_eq!(
            dates,
            vec![ts(cal, 2000, 2, 27), ts(cal, 2000, 2, 28), ts(cal, 2000, 3, 1)]
        );
    }

    #[test]
    fn single_element() {
        let cal = CalendarKind::Standard;
        let t = ts(cal, 2005, 6, 15);
        let dates = date_range(Sampling::Point(Cadence::Days(1)), t, t, cal).unwrap();
        assert_eq!(dates, vec![t]);
    }

    #[test]
    fn monthly_mid_step_360_day() {
        let cal = CalendarKind::Day360;
        let dates = date_range(monthly(), ts(cal, 2005, 1, 1), ts(cal, 2005, 12, 30), cal).unwrap();
        assert_eq!(dates.len(), 12);
        for (i, d) in dates.iter().enumerate() {
            assert_eq!(d.date(), (2005, i as u8 + 1, 16));
            assert!(d.is_midnight());
        }
    }

    #[test]
    fn monthly_mid_step_standard() {
        let cal = CalendarKind::Standard;
        let dates = date_range(monthly(), ts(cal, 2005, 1, 1), ts(cal, 2005, 3, 31), cal).unwrap();
        // Odd month lengths land on noon.
        let noon = |m, d| CalendarTimestamp::from_ymd_hms(cal, 2005, m, d, 12, 0, 0).unwrap();
        assert_eq!(dates[0], noon(1, 16));
        assert_eq!(dates[1], ts(cal, 2005, 2, 15));
        assert_eq!(dates[2], noon(3, 16));
    }

    #[test]
    fn mid_step_snaps_to_period_start() {
        let cal = CalendarKind::Day360;
        let dates = date_range(monthly(), ts(cal, 2005, 1, 20), ts(cal, 2005, 3, 30), cal).unwrap();
        assert_eq!(dates.first().unwrap().date(), (2005, 1, 16));
        assert_eq!(dates.len(), 3);
    }

    #[test]
    fn seasonal_mid_step() {
        let cal = CalendarKind::Day360;
        let seasonal = Sampling::MidStep {
            lower: Cadence::PeriodStart(Period::SEASON),
            upper: Cadence::PeriodEnd(Period::SEASON),
        };
        let dates = date_range(seasonal, ts(cal, 2005, 1, 1), ts(cal, 2005, 12, 30), cal).unwrap();
        // DJF starting 2004-12-01 through DJF starting 2005-12-01.
        let months: Vec<(i32, u8)> = dates.iter().map(|d| (d.year(), d.month())).collect();
        assert_eq!(
            months,
            vec![(2005, 1), (2005, 4), (2005, 7), (2005, 10), (2006, 1)]
        );
        assert_eq!(dates[0].day(), 16);
    }

    #[test]
    fn bounds_are_retagged() {
        let start = ts(CalendarKind::Standard, 2005, 1, 1);
        let end = ts(CalendarKind::Standard, 2005, 1, 3);
        let dates = date_range(
            Sampling::Point(Cadence::Days(1)),
            start,
            end,
            CalendarKind::Day360,
        )
        .unwrap();
        assert!(dates.iter().all(|d| d.calendar() == CalendarKind::Day360));
        let bad = ts(CalendarKind::Day360, 2005, 2, 30);
        assert!(matches!(
            date_range(Sampling::Point(Cadence::Days(1)), bad, bad, CalendarKind::Standard),
            Err(CalendarError::InvalidDate { .. })
        ));
    }

    #[test]
    fn reversed_bounds() {
        let cal = CalendarKind::Julian;
        assert!(matches!(
            date_range(monthly(), ts(cal, 2005, 2, 1), ts(cal, 2005, 1, 1), cal),
            Err(CalendarError::InvalidRange { .. })
        ));
    }
}
