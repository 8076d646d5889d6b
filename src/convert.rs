//! Pure conversion functions: TOML config structs + CLI overrides -> crate API config types.

use anyhow::{Context, Result};

use homog_calendar::{CalendarKind, FormatTemplate};
use homog_io::ReaderConfig;
use homog_timecheck::{CheckKind, Frequency, LimitOptions, ReportOptions};

use crate::cli::LimitArgs;
use crate::config::{IoToml, LimitToml, ReportToml};

/// Parses a CF calendar name.
pub fn parse_calendar(s: &str) -> Result<CalendarKind> {
    s.parse().with_context(|| format!("invalid calendar in config: {s:?}"))
}

/// Parses a CF frequency token.
pub fn parse_frequency(s: &str) -> Result<Frequency> {
    s.parse().with_context(|| format!("invalid frequency in config: {s:?}"))
}

/// Parses the text-axis template, CLI value first.
pub fn build_input_template(io: &IoToml, format: Option<&str>) -> Result<FormatTemplate> {
    let format = format.unwrap_or(&io.format);
    FormatTemplate::parse(format).with_context(|| format!("invalid input template: {format:?}"))
}

/// Builds a reader config; CLI values win over `[io]`.
pub fn build_reader_config(
    io: &IoToml,
    time_var: Option<&str>,
    calendar: Option<CalendarKind>,
    frequency: Option<Frequency>,
    format: Option<&str>,
) -> Result<ReaderConfig> {
    let calendar = match calendar {
        Some(c) => Some(c),
        None => io.calendar.as_deref().map(parse_calendar).transpose()?,
    };
    let frequency = match frequency {
        Some(f) => Some(f),
        None => io.frequency.as_deref().map(parse_frequency).transpose()?,
    };
    Ok(ReaderConfig::default()
        .with_time_var(time_var.unwrap_or(&io.time_var))
        .with_calendar(calendar)
        .with_frequency(frequency)
        .with_template(build_input_template(io, format)?))
}

/// Parses a timestamp template, CLI value first.
pub fn build_template(report: &ReportToml, format: Option<&str>) -> Result<FormatTemplate> {
    let format = format.unwrap_or(&report.format);
    FormatTemplate::parse(format).with_context(|| format!("invalid format template: {format:?}"))
}

/// Builds report rendering options; CLI values win over `[report]`.
pub fn build_report_options(
    report: &ReportToml,
    delimiter: Option<&str>,
    format: Option<&str>,
) -> Result<ReportOptions> {
    Ok(ReportOptions {
        delimiter: delimiter.unwrap_or(&report.delimiter).to_string(),
        template: build_template(report, format)?,
    })
}

/// The checks to run: the CLI selection if non-empty, otherwise `[report].checks`.
pub fn build_checks(report: &ReportToml, cli: &[CheckKind]) -> Result<Vec<CheckKind>> {
    if !cli.is_empty() {
        return Ok(cli.to_vec());
    }
    report
        .checks
        .iter()
        .map(|s| s.parse::<CheckKind>().map_err(anyhow::Error::msg))
        .collect::<Result<Vec<_>>>()
        .context("invalid [report].checks")
}

/// Builds limit options; CLI values win over `[limit]`.
pub fn build_limit_options(limit: &LimitToml, args: &LimitArgs) -> Result<LimitOptions> {
    let options = LimitOptions {
        start_months: args
            .start_months
            .clone()
            .unwrap_or_else(|| limit.start_months.clone()),
        end_months: args
            .end_months
            .clone()
            .unwrap_or_else(|| limit.end_months.clone()),
        month_start: args.month_start.or(limit.month_start),
        month_end: args.month_end.or(limit.month_end),
    };
    options.validate().context("invalid limit options")?;
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_io_section() {
        let io = IoToml {
            time_var: "t".to_string(),
            calendar: Some("noleap".to_string()),
            frequency: Some("mon".to_string()),
            format: "%d.%m.%Y".to_string(),
        };
        let config = build_reader_config(&io, None, None, None, None).unwrap();
        assert_eq!(config.time_var(), "t");
        assert_eq!(config.template().as_str(), "%d.%m.%Y");
        let config = build_reader_config(
            &io,
            Some("time"),
            Some(CalendarKind::Day360),
            Some(Frequency::Day),
            Some("%Y%m%d"),
        )
        .unwrap();
        assert_eq!(config.time_var(), "time");
        assert_eq!(config.template().as_str(), "%Y%m%d");
    }

    #[test]
    fn bad_input_template() {
        let io = IoToml {
            format: "%Y-%q".to_string(),
            ..IoToml::default()
        };
        assert!(build_reader_config(&io, None, None, None, None).is_err());
        assert!(build_reader_config(&io, None, None, None, Some("%Y")).is_ok());
    }

    #[test]
    fn bad_config_values() {
        let io = IoToml {
            calendar: Some("mayan".to_string()),
            ..IoToml::default()
        };
        assert!(build_reader_config(&io, None, None, None, None).is_err());
        // A CLI calendar makes the config value irrelevant.
        assert!(build_reader_config(&io, None, Some(CalendarKind::Julian), None, None).is_ok());

        let report = ReportToml {
            checks: vec!["gaps".to_string()],
            ..ReportToml::default()
        };
        assert!(build_checks(&report, &[]).is_err());
        assert_eq!(
            build_checks(&report, &[CheckKind::Missings]).unwrap(),
            vec![CheckKind::Missings]
        );
    }

    #[test]
    fn report_options() {
        let report = ReportToml::default();
        let options = build_report_options(&report, Some(";"), Some("%Y-%m")).unwrap();
        assert_eq!(options.delimiter, ";");
        assert_eq!(options.template.as_str(), "%Y-%m");
        assert!(build_report_options(&report, None, Some("%Q")).is_err());
        assert_eq!(build_checks(&report, &[]).unwrap(), CheckKind::ALL.to_vec());
    }
}
