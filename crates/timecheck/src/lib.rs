//! # homog-timecheck
//!
//! Consistency checks for the time axis of gridded climate time series:
//! duplicated, missing and redundant timestamps, frequency-aligned range
//! limiting and range containment.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["RawTime / CF offsets"] -->|"normalize"| B["TimeAxis"]
//!     B -->|"equalize()"| C["equalized values"]
//!     C -->|"diff_axis()"| D["AxisDiff"]
//!     D -->|"check_timestamps()"| E["TimestampReport"]
//!     B -->|"limit_range()"| F["DateRange"]
//!     B -->|"contains()"| G["bool"]
//!     H["Frequency"] -.->|"sampling / attributes"| C
//!     H -.-> F
//!     H -.-> G
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use homog_timecheck::{CheckKind, Frequency, ReportOptions, check_timestamps};
//!
//! let report = check_timestamps(
//!     axis.values(),
//!     &["tas".to_string()],
//!     Frequency::Day,
//!     axis.calendar(),
//!     &CheckKind::ALL,
//!     &ReportOptions::default(),
//! )?;
//! print!("{}", report.render());
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `frequency` | Closed catalog of CF frequencies |
//! | `normalize` | Raw time conversion, equalization, string parsing |
//! | `diff` | Duplicate / missing / redundant detection and correction indices |
//! | `report` | Per-variable rendered diagnostics |
//! | `limit` | Season-aligned range limiting |
//! | `within` | Frequency-resolution range containment |
//! | `select` | Time slicing and axis intersection |
//! | `infer` | Frequency inference from timestamp spacing |
//! | `axis` | Time axis with calendar and declared frequency |
//! | `error` | Error types |

mod axis;
mod diff;
mod error;
mod frequency;
mod infer;
mod limit;
mod normalize;
mod report;
mod select;
mod within;

pub use axis::TimeAxis;
pub use diff::{AxisDiff, diff_axis, retained_indices};
pub use error::TimeCheckError;
pub use frequency::Frequency;
pub use infer::infer_frequency;
pub use limit::{DateRange, LimitOptions, RangeSource, limit_range};
pub use normalize::{
    EqualizeOutcome, Equalization, Mode, RawTime, date_to_str, decode_time_coordinate, equalize,
    str_to_timestamp, str_to_timestamp_with, to_calendar_timestamp,
};
pub use report::{CheckKind, ReportOptions, TimestampReport, check_timestamps};
pub use select::{max_intersection, select_range};
pub use within::{Bound, contains};
