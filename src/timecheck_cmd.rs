//! Timecheck command: report and optionally drop irregular timestamps.

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use homog_io::{write_axis_text, write_json};
use homog_timecheck::check_timestamps;

use crate::cli::TimecheckArgs;
use crate::config::HomogConfig;
use crate::{convert, input};

/// Run the timestamp checks on one input.
pub fn run(args: TimecheckArgs, config: &HomogConfig) -> Result<()> {
    let _cmd = info_span!("timecheck").entered();

    // 1. Resolve settings
    let checks = convert::build_checks(&config.report, &args.checks)?;
    let options = convert::build_report_options(
        &config.report,
        args.delimiter.as_deref(),
        args.format.as_deref(),
    )?;

    // 2. Read the time axis
    let input = input::load(
        config,
        &args.input.input,
        args.input.time_var.as_deref(),
        args.input.calendar,
        args.frequency,
        args.input.input_format.as_deref(),
    )?;
    let frequency = input
        .axis
        .resolve_frequency(None)
        .context("use --frequency or set [io].frequency")?;

    // 3. Check
    let report = check_timestamps(
        input.axis.values(),
        &input.variables,
        frequency,
        input.axis.calendar(),
        &checks,
        &options,
    )
    .context("timestamp check failed")?;

    if report.is_clean() {
        info!(n = report.total, "time axis is clean");
    } else {
        warn!(dropped = report.dropped(), "irregular timestamps found");
    }
    print!("{}", report.render());

    // 4. Write outputs
    if let Some(path) = &args.output {
        write_json(path, &report)
            .with_context(|| format!("failed to write report: {}", path.display()))?;
    }
    if let Some(path) = &args.corrected {
        let corrected = input
            .axis
            .select(&report.retained)
            .with_frequency(Some(frequency));
        write_axis_text(path, &corrected, &input.variables, &input.template)
            .with_context(|| format!("failed to write corrected axis: {}", path.display()))?;
        info!(kept = corrected.len(), dropped = report.dropped(), "corrected axis written");
    }

    Ok(())
}
