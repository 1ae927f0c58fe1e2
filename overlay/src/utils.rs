//! Common utility functions for clock rendering
//!
//! These are shared between the raster and SVG surfaces.

use std::fs;
use std::io;
use std::path::Path;

use dclock_types::Rgba;
use tiny_skia::Color;

/// Convert [u8; 4] RGBA array to tiny_skia Color
#[inline]
pub fn color_from_rgba(rgba: [u8; 4]) -> Color {
    Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
}

/// Convert to tiny_skia Color with an extra opacity multiplier (0.0-1.0)
pub fn color_with_opacity(rgba: Rgba, opacity: f32) -> Color {
    let mut color = color_from_rgba(rgba);
    let opacity = if opacity.is_finite() { opacity.clamp(0.0, 1.0) } else { 1.0 };
    color.set_alpha(color.alpha() * opacity);
    color
}

/// `#rrggbb` for SVG attributes (alpha is carried separately)
pub fn rgba_hex(rgba: Rgba) -> String {
    format!("#{:02x}{:02x}{:02x}", rgba[0], rgba[1], rgba[2])
}

/// Write `bytes` to `path` through a sibling temp file and a rename, so a
/// viewer polling the file never observes a half-written frame.
pub fn write_file_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut tmp_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, bytes)?;
    fs::rename(&tmp_path, path)
}
