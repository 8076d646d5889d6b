//! The closed catalog of sampling frequencies.
//!
//! Each [`Frequency`] fixes how its grid is generated, which timestamp
//! attribute governs it, how it is rendered and which finer attributes are
//! ignored when comparing timestamps.

use std::fmt;
use std::str::FromStr;

use homog_calendar::{AttributeName, Cadence, Period, Sampling};
use serde::{Deserialize, Serialize};

use crate::error::TimeCheckError;

/// A recognised sampling frequency of a time series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Frequency {
    /// Hourly samples.
    Hour1,
    /// Three-hourly samples.
    Hour3,
    /// Six-hourly samples.
    Hour6,
    /// Daily samples.
    Day,
    /// Monthly means stamped mid-month.
    Month,
    /// Monthly instantaneous samples.
    MonthPoint,
    /// Seasonal (DJF, MAM, JJA, SON) means stamped mid-season.
    Season,
    /// Annual means stamped mid-year.
    Year,
    /// Annual instantaneous samples.
    YearPoint,
    /// Decadal means stamped mid-decade.
    Decade,
}

const SUB_DAILY_EQUALIZE: [AttributeName; 3] = [
    AttributeName::Second,
    AttributeName::Microsecond,
    AttributeName::Nanosecond,
];

const DAILY_EQUALIZE: [AttributeName; 4] = [
    AttributeName::Minute,
    AttributeName::Second,
    AttributeName::Microsecond,
    AttributeName::Nanosecond,
];

impl Frequency {
    /// Every catalog entry, finest first.
    pub const ALL: [Frequency; 10] = [
        Frequency::Hour1,
        Frequency::Hour3,
        Frequency::Hour6,
        Frequency::Day,
        Frequency::Month,
        Frequency::MonthPoint,
        Frequency::Season,
        Frequency::Year,
        Frequency::YearPoint,
        Frequency::Decade,
    ];

    /// Canonical CF `frequency` attribute value.
    pub const fn cf_token(self) -> &'static str {
        match self {
            Frequency::Hour1 => "1hr",
            Frequency::Hour3 => "3hr",
            Frequency::Hour6 => "6hr",
            Frequency::Day => "day",
            Frequency::Month => "mon",
            Frequency::MonthPoint => "monPt",
            Frequency::Season => "sem",
            Frequency::Year => "yr",
            Frequency::YearPoint => "yrPt",
            Frequency::Decade => "dec",
        }
    }

    /// The attribute that identifies one sample.
    pub const fn governing_attribute(self) -> AttributeName {
        match self {
            Frequency::Hour1 | Frequency::Hour3 | Frequency::Hour6 => AttributeName::Hour,
            Frequency::Day => AttributeName::Day,
            Frequency::Month | Frequency::MonthPoint | Frequency::Season => AttributeName::Month,
            Frequency::Year | Frequency::YearPoint | Frequency::Decade => AttributeName::Year,
        }
    }

    /// Template used to render timestamps of this frequency.
    pub const fn format_template(self) -> &'static str {
        match self {
            Frequency::Hour1 | Frequency::Hour3 | Frequency::Hour6 => "%Y-%m-%dT%H:%M:%S",
            Frequency::Day => "%Y-%m-%d",
            Frequency::Month | Frequency::MonthPoint | Frequency::Season => "%Y-%m",
            Frequency::Year | Frequency::YearPoint | Frequency::Decade => "%Y",
        }
    }

    /// Attributes forced to their canonical value before comparing
    /// timestamps, coarsest first.
    pub fn equalize_below(self) -> &'static [AttributeName] {
        if self.is_subdaily() {
            &SUB_DAILY_EQUALIZE
        } else {
            &DAILY_EQUALIZE
        }
    }

    /// Attributes compared by range containment, coarsest first down to
    /// the governing attribute.
    pub fn relevant_attributes(self) -> &'static [AttributeName] {
        self.governing_attribute().with_coarser()
    }

    /// `true` for frequencies finer than one month.
    pub const fn is_submonthly(self) -> bool {
        matches!(
            self,
            Frequency::Hour1 | Frequency::Hour3 | Frequency::Hour6 | Frequency::Day
        )
    }

    const fn is_subdaily(self) -> bool {
        matches!(self, Frequency::Hour1 | Frequency::Hour3 | Frequency::Hour6)
    }

    /// How samples are placed on the grid.
    pub const fn sampling(self) -> Sampling {
        match self {
            Frequency::Hour1 => Sampling::Point(Cadence::Hours(1)),
            Frequency::Hour3 => Sampling::Point(Cadence::Hours(3)),
            Frequency::Hour6 => Sampling::Point(Cadence::Hours(6)),
            Frequency::Day => Sampling::Point(Cadence::Days(1)),
            Frequency::Month => mid_step(Period::MONTH),
            Frequency::MonthPoint => Sampling::Point(Cadence::Months(1)),
            Frequency::Season => mid_step(Period::SEASON),
            Frequency::Year => mid_step(Period::YEAR),
            Frequency::YearPoint => Sampling::Point(Cadence::Years(1)),
            Frequency::Decade => mid_step(Period::DECADE),
        }
    }
}

const fn mid_step(period: Period) -> Sampling {
    Sampling::MidStep {
        lower: Cadence::PeriodStart(period),
        upper: Cadence::PeriodEnd(period),
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cf_token())
    }
}

impl FromStr for Frequency {
    type Err = TimeCheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let frequency = match s.trim() {
            "1hr" | "1hrPt" | "hourly" => Frequency::Hour1,
            "3hr" | "3hrPt" => Frequency::Hour3,
            "6hr" | "6hrPt" => Frequency::Hour6,
            "day" | "daily" => Frequency::Day,
            "mon" | "monthly" => Frequency::Month,
            "monPt" => Frequency::MonthPoint,
            "sem" | "seasonal" => Frequency::Season,
            "yr" | "yearly" | "annual" => Frequency::Year,
            "yrPt" => Frequency::YearPoint,
            "dec" | "decadal" => Frequency::Decade,
            _ => {
                return Err(TimeCheckError::UnknownFrequency {
                    token: s.to_string(),
                });
            }
        };
        Ok(frequency)
    }
}

impl TryFrom<String> for Frequency {
    type Error = TimeCheckError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Frequency> for &'static str {
    fn from(value: Frequency) -> Self {
        value.cf_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_round_trip() {
        for f in Frequency::ALL {
            assert_eq!(f.cf_token().parse::<Frequency>().unwrap(), f);
        }
    }

    #[test]
    fn human_aliases() {
        assert_eq!("daily".parse::<Frequency>().unwrap(), Frequency::Day);
        assert_eq!("monthly".parse::<Frequency>().unwrap(), Frequency::Month);
        assert_eq!("3hrPt".parse::<Frequency>().unwrap(), Frequency::Hour3);
        assert_eq!("annual".parse::<Frequency>().unwrap(), Frequency::Year);
    }

    #[test]
    fn unknown_token() {
        assert_eq!(
            "fx".parse::<Frequency>().unwrap_err(),
            TimeCheckError::UnknownFrequency {
                token: "fx".to_string()
            }
        );
    }

    #[test]
    fn governing_attributes() {
        assert_eq!(Frequency::Hour3.governing_attribute(), AttributeName::Hour);
        assert_eq!(Frequency::Day.governing_attribute(), AttributeName::Day);
        assert_eq!(Frequency::Season.governing_attribute(), AttributeName::Month);
        assert_eq!(Frequency::Decade.governing_attribute(), AttributeName::Year);
    }

    #[test]
    fn equalize_lists() {
        assert_eq!(Frequency::Hour1.equalize_below()[0], AttributeName::Second);
        assert_eq!(Frequency::Day.equalize_below()[0], AttributeName::Minute);
        assert_eq!(Frequency::Year.equalize_below().len(), 4);
    }

    #[test]
    fn submonthly() {
        let sub: Vec<Frequency> = Frequency::ALL.into_iter().filter(|f| f.is_submonthly()).collect();
        assert_eq!(
            sub,
            vec![Frequency::Hour1, Frequency::Hour3, Frequency::Hour6, Frequency::Day]
        );
    }

    #[test]
    fn relevant_attributes_for_daily() {
        assert_eq!(
            Frequency::Day.relevant_attributes(),
            &[AttributeName::Year, AttributeName::Month, AttributeName::Day]
        );
    }

    #[test]
    fn serde_uses_cf_tokens() {
        let json = serde_json::to_string(&Frequency::MonthPoint).unwrap();
        assert_eq!(json, "\"monPt\"");
        let f: Frequency = serde_json::from_str("\"seasonal\"").unwrap();
        assert_eq!(f, Frequency::Season);
        assert!(serde_json::from_str::<Frequency>("\"weekly\"").is_err());
    }
}
