//! # homog-io
//!
//! Read time coordinates from plain-text axis files (and CF NetCDF files with
//! the `netcdf` feature) and write timestamp reports and corrected axes.
//! Bridges external files into the `CalendarTimestamp` slices that
//! `homog-timecheck` works on.

mod error;
#[cfg(feature = "netcdf")]
mod netcdf_read;
mod reader;
mod text_read;
mod writer;

pub use error::IoError;
pub use reader::{InputFormat, ReaderConfig, TimeCoordinate, read_time_coordinate};
pub use writer::{write_axis_text, write_json};
