use std::path::Path;

use dclock_core::{AppConfig, RingGeometry, compose, encode};
use dclock_overlay::utils::write_file_atomic;
use dclock_overlay::{OutputFormat, RenderError, render_layout};

use crate::cli::RenderArgs;
use crate::error::CliError;

/// Explicit format, else the output extension, else PNG
pub fn output_format(explicit: Option<OutputFormat>, output: &Path) -> OutputFormat {
    explicit
        .or_else(|| OutputFormat::from_path(output))
        .unwrap_or_default()
}

pub fn run(args: &RenderArgs, config: &AppConfig) -> Result<(), CliError> {
    let time_of_day = args.time.time_of_day()?;
    let format = output_format(args.format, &args.output);

    let mut appearance = config.appearance.clone();
    if let Some(size) = args.size {
        appearance.image_size = size;
    }

    let geometry = RingGeometry::from_appearance(&appearance)?;
    let state = encode(time_of_day)?;
    let layout = compose(&state, &geometry);
    let decimal_time = state.decimal_time();
    let bytes = render_layout(&layout, &appearance, format, Some(&decimal_time))?;

    write_file_atomic(&args.output, &bytes).map_err(|source| RenderError::Io {
        path: args.output.clone(),
        source,
    })?;

    tracing::info!(
        path = %args.output.display(),
        %format,
        %decimal_time,
        "Rendered frame"
    );
    Ok(())
}
