//! Range commands: containment check, time slicing and axis intersection.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, info_span};

use homog_io::{write_axis_text, write_json};
use homog_timecheck::{Bound, contains, max_intersection, select_range};

use crate::cli::{IntersectArgs, SelectArgs, WithinArgs};
use crate::config::HomogConfig;
use crate::{convert, input};

/// Print `true` if the input covers the requested range.
pub fn within(args: WithinArgs, config: &HomogConfig) -> Result<()> {
    let _cmd = info_span!("within").entered();

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

    let covered = contains(
        axis.values(),
        &Bound::from(args.start.as_str()),
        &Bound::from(args.end.as_str()),
        frequency,
        axis.calendar(),
    )
    .context("containment check failed")?;
    info!(covered, start = %args.start, end = %args.end, "range checked");
    println!("{covered}");
    Ok(())
}

/// Print the positions inside the requested range, or write them as an axis.
pub fn select(args: SelectArgs, config: &HomogConfig) -> Result<()> {
    let _cmd = info_span!("select").entered();

    let input = input::load(
        config,
        &args.input.input,
        args.input.time_var.as_deref(),
        args.input.calendar,
        None,
        args.input.input_format.as_deref(),
    )?;
    let axis = &input.axis;
    let indices = select_range(
        axis.values(),
        &Bound::from(args.start.as_str()),
        &Bound::from(args.end.as_str()),
        axis.calendar(),
    )
    .context("time selection failed")?;
    info!(selected = indices.len(), total = axis.len(), "range selected");

    match &args.output {
        Some(path) => {
            let selected = axis.select(&indices);
            write_axis_text(path, &selected, &input.variables, &input.template)
                .with_context(|| format!("failed to write selected axis: {}", path.display()))?;
        }
        None => {
            for i in indices {
                println!("{i}");
            }
        }
    }
    Ok(())
}

/// JSON form of a common range.
#[derive(Serialize)]
struct RangeJson {
    start: String,
    end: String,
}

/// Print the range covered by every input.
pub fn intersect(args: IntersectArgs, config: &HomogConfig) -> Result<()> {
    let _cmd = info_span!("intersect").entered();

    let template = convert::build_template(&config.report, None)?;
    let inputs = args
        .inputs
        .iter()
        .map(|path| {
            input::load(
                config,
                path,
                args.time_var.as_deref(),
                args.calendar,
                None,
                args.input_format.as_deref(),
            )
        })
        .collect::<Result<Vec<_>>>()?;

    let Some(range) = max_intersection(inputs.iter().map(|i| i.axis.values())) else {
        bail!("inputs have no common time range");
    };
    let json = RangeJson {
        start: template.format(&range.start),
        end: template.format(&range.end),
    };
    println!("{} {}", json.start, json.end);

    if let Some(path) = &args.output {
        write_json(path, &json)
            .with_context(|| format!("failed to write range: {}", path.display()))?;
    }
    Ok(())
}
