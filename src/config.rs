use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Config file looked up in the working directory when `--config` is absent.
const DEFAULT_CONFIG: &str = "homog.toml";

/// Top-level homog configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct HomogConfig {
    /// Input settings.
    #[serde(default)]
    pub io: IoToml,

    /// Report rendering settings.
    #[serde(default)]
    pub report: ReportToml,

    /// Range limiting settings.
    #[serde(default)]
    pub limit: LimitToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    #[serde(default = "default_time_var")]
    pub time_var: String,
    #[serde(default)]
    pub calendar: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    /// Template of the timestamps in text axis files.
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            time_var: default_time_var(),
            calendar: None,
            frequency: None,
            format: default_format(),
        }
    }
}

fn default_time_var() -> String {
    "time".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportToml {
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_checks")]
    pub checks: Vec<String>,
}

impl Default for ReportToml {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            format: default_format(),
            checks: default_checks(),
        }
    }
}

fn default_delimiter() -> String {
    ",".to_string()
}
fn default_format() -> String {
    homog_calendar::DEFAULT_TEMPLATE.to_string()
}
fn default_checks() -> Vec<String> {
    vec![
        "duplicates".to_string(),
        "redundants".to_string(),
        "missings".to_string(),
    ]
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitToml {
    #[serde(default = "default_months")]
    pub start_months: Vec<u8>,
    #[serde(default = "default_months")]
    pub end_months: Vec<u8>,
    #[serde(default)]
    pub month_start: Option<bool>,
    #[serde(default)]
    pub month_end: Option<bool>,
}

impl Default for LimitToml {
    fn default() -> Self {
        Self {
            start_months: default_months(),
            end_months: default_months(),
            month_start: None,
            month_end: None,
        }
    }
}

fn default_months() -> Vec<u8> {
    (1..=12).collect()
}

/// Loads `path`, or `./homog.toml` if it exists, or the defaults.
pub fn load(path: Option<&Path>) -> Result<HomogConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG);
            if !fallback.exists() {
                debug!("no config file, using defaults");
                return Ok(HomogConfig::default());
            }
            fallback
        }
    };
    let toml_str = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: HomogConfig = toml::from_str(&toml_str)
        .with_context(|| format!("failed to parse TOML config: {}", path.display()))?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: HomogConfig = toml::from_str("").unwrap();
        assert_eq!(config.io.time_var, "time");
        assert_eq!(config.io.format, "%Y-%m-%dT%H:%M:%S");
        assert_eq!(config.report.delimiter, ",");
        assert_eq!(config.report.format, "%Y-%m-%dT%H:%M:%S");
        assert_eq!(config.report.checks.len(), 3);
        assert_eq!(config.limit.start_months, (1..=12).collect::<Vec<u8>>());
        assert_eq!(config.limit.month_end, None);
    }

    #[test]
    fn full_config() {
        let config: HomogConfig = toml::from_str(
            r#"
            [io]
            time_var = "t"
            calendar = "360_day"
            frequency = "mon"
            format = "%d.%m.%Y"

            [report]
            delimiter = ";"

            [limit]
            start_months = [3, 6, 9, 12]
            end_months = [2, 5, 8, 11]
            month_end = true
            "#,
        )
        .unwrap();
        assert_eq!(config.io.calendar.as_deref(), Some("360_day"));
        assert_eq!(config.io.frequency.as_deref(), Some("mon"));
        assert_eq!(config.io.format, "%d.%m.%Y");
        assert_eq!(config.report.format, "%Y-%m-%dT%H:%M:%S");
        assert_eq!(config.report.delimiter, ";");
        assert_eq!(config.limit.end_months, vec![2, 5, 8, 11]);
        assert_eq!(config.limit.month_end, Some(true));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(toml::from_str::<HomogConfig>("[io]\nprecip_var = \"pr\"\n").is_err());
        assert!(toml::from_str::<HomogConfig>("[output]\n").is_err());
    }

    #[test]
    fn load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("homog.toml");
        std::fs::write(&path, "[io]\ncalendar = \"noleap\"\n").unwrap();
        let config = load(Some(&path)).unwrap();
        assert_eq!(config.io.calendar.as_deref(), Some("noleap"));
        assert!(load(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
