//! # homog-calendar
//!
//! Date arithmetic and regular grids for the CF calendars used by climate
//! model output.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["CalendarKind"] -->|"day-count rules"| B["CalendarTimestamp"]
//!     B -->|"AttributeName::get / set"| C["field values"]
//!     D["Cadence"] -->|".range() / .periods()"| E["point grid"]
//!     E -->|"Sampling::MidStep"| F["mid-step grid"]
//!     G["TimeUnits"] -->|".decode()"| B
//!     H["FormatTemplate"] -->|".format() / .parse_fields()"| B
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use homog_calendar::{CalendarKind, CalendarTimestamp, Sampling, date_range};
//!
//! // A 360-day calendar has 30 days in every month
//! let t = CalendarTimestamp::new(CalendarKind::Day360, 2005, 2, 30)?;
//!
//! // Mid-month grid
//! let monthly = Sampling::MidStep { lower: "MS".parse()?, upper: "M".parse()? };
//! let end = CalendarTimestamp::new(CalendarKind::Day360, 2005, 12, 30)?;
//! let grid = date_range(monthly, t, end, CalendarKind::Day360)?;
//!
//! // CF time coordinates
//! let units = TimeUnits::parse("days since 1850-01-01", CalendarKind::NoLeap)?;
//! let first = units.decode(15.5)?;
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `kind` | CF calendar kinds and their day-count rules |
//! | `date` | Calendar-tagged timestamp with checked arithmetic |
//! | `attribute` | Named timestamp fields and their accessor table |
//! | `format` | `strftime`-style templates valid in every calendar |
//! | `cadence` | Stepping rules and period anchoring |
//! | `sequence` | Point and mid-step grid generation |
//! | `units` | CF `"<unit> since <reference>"` decoding |
//! | `error` | Error types |

mod attribute;
mod cadence;
mod date;
mod error;
mod format;
mod kind;
mod sequence;
mod units;

pub use attribute::AttributeName;
pub use cadence::{Cadence, Period};
pub use date::CalendarTimestamp;
pub use error::CalendarError;
pub use format::{DEFAULT_TEMPLATE, FormatTemplate, ParsedFields};
pub use kind::CalendarKind;
pub use sequence::{Sampling, date_range};
pub use units::{TimeUnit, TimeUnits};

/// Re-exported so callers can build durations without depending on chrono.
pub use chrono::TimeDelta;
