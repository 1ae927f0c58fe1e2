use dclock_core::{AppConfig, GROUP_COUNT, IndicatorState, Layout, RingGeometry, compose, encode};
use dclock_types::formatting::{format_day_fraction, format_pct_of_day, format_wall_clock};
use serde::Serialize;

use crate::cli::StateArgs;
use crate::error::CliError;

const LIT: char = '●';
const OFF: char = '·';

#[derive(Serialize)]
struct StateReport<'a> {
    time_of_day: f64,
    decimal_time: String,
    state: &'a IndicatorState,
    layout: &'a Layout,
}

pub fn run(args: &StateArgs, config: &AppConfig) -> Result<(), CliError> {
    let time_of_day = args.time.time_of_day()?;
    let geometry = RingGeometry::from_appearance(&config.appearance)?;
    let state = encode(time_of_day)?;

    let output = if args.json {
        let layout = compose(&state, &geometry);
        serde_json::to_string_pretty(&StateReport {
            time_of_day,
            decimal_time: state.decimal_time(),
            state: &state,
            layout: &layout,
        })?
    } else {
        describe(time_of_day, &state, config.appearance.european_number_format)
    };

    println!("{output}");
    Ok(())
}

/// Header line with the decimal and wall-clock readings, then the rings
pub fn describe(time_of_day: f64, state: &IndicatorState, european: bool) -> String {
    let fraction = state.day_fraction().get();
    format!(
        "{}  ({}, day {}, {})\n{}",
        state.decimal_time(),
        format_wall_clock(time_of_day),
        format_day_fraction(fraction, 5, european),
        format_pct_of_day(fraction, european),
        ring_diagram(state)
    )
}

/// One line per group, innermost first: ten minors, then the major.
pub fn ring_diagram(state: &IndicatorState) -> String {
    (0..GROUP_COUNT)
        .map(|group| {
            let minors: String = state
                .minor_chunk(group)
                .iter()
                .map(|&on| if on { LIT } else { OFF })
                .collect();
            let major = if state.major_digits()[group] { LIT } else { OFF };
            format!("{group} {minors} {major}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
