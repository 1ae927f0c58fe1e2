//! Rendering for the decimal clock
//!
//! This crate turns a ring [`Layout`] into pixels or vector markup:
//! - [`RasterFrame`]: tiny-skia pixmap with hand-rolled bloom, exported as PNG
//! - [`SvgFrame`]: standalone SVG using native filter effects
//! - [`ClockOverlay`]: draws the neon rings onto either surface
//! - [`spawn_overlay`]: runs an overlay on a dedicated renderer thread

pub mod error;
pub mod frame;
pub mod glow;
pub mod overlays;
pub mod spawn;
pub mod surface;
pub mod svg;
pub mod utils;
pub mod widgets;

pub use error::RenderError;
pub use frame::RasterFrame;
pub use overlays::{ClockOverlay, Overlay};
pub use spawn::{OverlayCommand, spawn_overlay};
pub use surface::{CircleStroke, RingSurface};
pub use svg::SvgFrame;
pub use widgets::NeonRing;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use dclock_core::Layout;
use dclock_types::ClockAppearance;

/// File format of a rendered clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
}

impl OutputFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()?.to_str()?.parse().ok()
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            other => Err(RenderError::UnknownFormat(other.to_string())),
        }
    }
}

/// Render one layout to an encoded image in memory.
///
/// `title` is embedded as the SVG `<title>`; raster output ignores it.
pub fn render_layout(
    layout: &Layout,
    appearance: &ClockAppearance,
    format: OutputFormat,
    title: Option<&str>,
) -> Result<Vec<u8>, RenderError> {
    match format {
        OutputFormat::Png => {
            let frame = RasterFrame::new(appearance.image_size, appearance.glow.clone())?;
            let mut overlay = ClockOverlay::new(frame, appearance.clone());
            overlay.set_data(layout.clone());
            overlay.render();
            overlay.surface().encode_png()
        }
        OutputFormat::Svg => {
            let mut frame = SvgFrame::new(appearance.glow.clone());
            frame.set_title(title.map(str::to_string));
            let mut overlay = ClockOverlay::new(frame, appearance.clone());
            overlay.set_data(layout.clone());
            overlay.render();
            Ok(overlay.into_surface().into_string().into_bytes())
        }
    }
}
