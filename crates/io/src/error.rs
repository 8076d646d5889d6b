//! Error types for homog-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the homog-io crate.
///
/// This enum covers file-system failures, NetCDF errors, time-coordinate
/// decoding problems, and report serialization failures.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when a file exists but cannot be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// Path of the file being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Returned when an output file cannot be created or written.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        /// Path of the file being written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Returned when a required variable is not present in a file.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a time value or time attribute cannot be decoded.
    #[error("invalid time: {reason}")]
    InvalidTime {
        /// Description of the time decoding issue.
        reason: String,
    },

    /// Returned when a report cannot be serialized.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the serializer failure.
        reason: String,
    },

    /// Returned when a file's format cannot be handled by this build.
    #[error("unsupported format for {}: {reason}", path.display())]
    UnsupportedFormat {
        /// Path of the offending file.
        path: PathBuf,
        /// Why the format is not supported.
        reason: String,
    },

    /// Wraps an error originating from the homog-timecheck crate.
    #[error("time check error: {reason}")]
    TimeCheck {
        /// Description of the underlying failure.
        reason: String,
    },

    /// Wraps an error originating from the homog-calendar crate.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },
}

#[cfg(feature = "netcdf")]
impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::Serialization {
            reason: e.to_string(),
        }
    }
}

impl From<homog_timecheck::TimeCheckError> for IoError {
    fn from(e: homog_timecheck::TimeCheckError) -> Self {
        IoError::TimeCheck {
            reason: e.to_string(),
        }
    }
}

impl From<homog_calendar::CalendarError> for IoError {
    fn from(e: homog_calendar::CalendarError) -> Self {
        IoError::Calendar {
            reason: e.to_string(),
        }
    }
}
