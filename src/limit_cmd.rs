//! Limit command: trim a time axis to season-aligned boundaries.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use homog_io::write_axis_text;
use homog_timecheck::{Bound, RangeSource, limit_range, select_range};

use crate::cli::LimitArgs;
use crate::config::HomogConfig;
use crate::{convert, input};

/// Run the range limiter on one input.
pub fn run(args: LimitArgs, config: &HomogConfig) -> Result<()> {
    let _cmd = info_span!("limit").entered();

    let options = convert::build_limit_options(&config.limit, &args)?;
    let template = convert::build_template(&config.report, None)?;
    let input = input::load(
        config,
        &args.input.input,
        args.input.time_var.as_deref(),
        args.input.calendar,
        args.frequency,
        args.input.input_format.as_deref(),
    )?;
    let axis = &input.axis;
    let frequency = axis
        .resolve_frequency(None)
        .context("use --frequency or set [io].frequency")?;

    let range = limit_range(
        RangeSource::Axis(axis.values()),
        frequency,
        axis.calendar(),
        &options,
    )
    .context("range limiting failed")?;

    let Some(range) = range else {
        println!("no valid range");
        return Ok(());
    };
    println!(
        "{} {}",
        template.format(&range.start),
        template.format(&range.end)
    );

    if let Some(path) = &args.output {
        let indices = select_range(
            axis.values(),
            &Bound::from(range.start),
            &Bound::from(range.end),
            axis.calendar(),
        )?;
        let limited = axis.select(&indices).with_frequency(Some(frequency));
        write_axis_text(path, &limited, &input.variables, &input.template)
            .with_context(|| format!("failed to write limited axis: {}", path.display()))?;
        info!(kept = limited.len(), total = axis.len(), "limited axis written");
    }

    Ok(())
}
