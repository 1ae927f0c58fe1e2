//! Shared appearance types for the decimal clock.
//!
//! These types are deserialized from the user's config file and consumed by
//! both the layout code in `dclock-core` and the renderers in
//! `dclock-overlay`, so they live in their own dependency-light crate.

pub mod formatting;

use serde::{Deserialize, Serialize};

/// RGBA color, 0-255 per channel
pub type Rgba = [u8; 4];

/// Rings in a full display, innermost to outermost
pub const RING_COUNT: usize = 110;

/// Innermost ring radius in scene units
pub const DEFAULT_BASE_RADIUS: f32 = 30.0;
/// Distance between two neighbouring rings in scene units
pub const DEFAULT_SPACING: f32 = 8.0;
/// Stroke width of a neon tube in scene units
pub const DEFAULT_NEON_WIDTH: f32 = 4.0;

pub const WHITE: Rgba = [255, 255, 255, 255];
pub const ORANGE: Rgba = [255, 140, 0, 255];
pub const BLACK: Rgba = [0, 0, 0, 255];
pub const SLATE: Rgba = [107, 114, 128, 255];

/// Visual appearance of the ring display.
///
/// Every field has a default so a partial config file (or none at all)
/// still yields a complete appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockAppearance {
    /// Radius of the innermost ring
    pub base_radius: f32,
    /// Spacing between consecutive rings
    pub spacing: f32,
    /// Stroke width of each neon tube
    pub neon_width: f32,
    /// Color of the 100 minor rings
    pub minor_color: Rgba,
    /// Color of the 10 major rings
    pub major_color: Rgba,
    /// Rim color used while a ring is off
    pub rim_off_color: Rgba,
    /// Opacity of the tube while a ring is off (0.0-1.0)
    pub off_opacity: f32,
    /// Canvas background
    pub background: Rgba,
    /// Output edge length in pixels for raster renders
    pub image_size: u32,
    /// Swap `.` and `,` in numeric output
    pub european_number_format: bool,
    pub glow: GlowConfig,
}

impl Default for ClockAppearance {
    fn default() -> Self {
        Self {
            base_radius: DEFAULT_BASE_RADIUS,
            spacing: DEFAULT_SPACING,
            neon_width: DEFAULT_NEON_WIDTH,
            minor_color: WHITE,
            major_color: ORANGE,
            rim_off_color: BLACK,
            off_opacity: 0.3,
            background: SLATE,
            image_size: 1024,
            european_number_format: false,
            glow: GlowConfig::default(),
        }
    }
}

impl ClockAppearance {
    /// Outermost radius the display can reach, used for viewport sizing
    pub fn bounding_radius(&self) -> f32 {
        self.base_radius + self.spacing * RING_COUNT as f32
    }
}

/// Bloom applied around lit rings.
///
/// The halo is a sum of blurred copies of the lit tubes, one per entry in
/// `halo_sigmas`, multiplied per channel by the role tint. A tighter,
/// untinted `core_sigma` blur sits between the halo and the crisp tube.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlowConfig {
    pub enabled: bool,
    /// Blur radii (standard deviation, scene units) merged into the halo
    pub halo_sigmas: Vec<f32>,
    /// Blur radius of the inner glow
    pub core_sigma: f32,
    /// Per-channel RGB multiplier for the halo of minor rings
    pub minor_tint: [f32; 3],
    /// Per-channel RGB multiplier for the halo of major rings
    pub major_tint: [f32; 3],
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            halo_sigmas: vec![10.0, 20.0, 30.0, 50.0],
            core_sigma: 5.0,
            minor_tint: [1.0, 1.0, 1.0],
            major_tint: [1.0, 0.06, 0.44],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let appearance: ClockAppearance = toml::from_str("").unwrap();
        assert_eq!(appearance, ClockAppearance::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let toml = r#"
spacing = 10.0
major_color = [255, 0, 0, 255]

[glow]
enabled = false
"#;
        let appearance: ClockAppearance = toml::from_str(toml).unwrap();
        assert_eq!(appearance.spacing, 10.0);
        assert_eq!(appearance.major_color, [255, 0, 0, 255]);
        assert_eq!(appearance.base_radius, DEFAULT_BASE_RADIUS);
        assert!(!appearance.glow.enabled);
        assert_eq!(appearance.glow.halo_sigmas, vec![10.0, 20.0, 30.0, 50.0]);
    }

    #[test]
    fn test_bounding_radius() {
        let appearance = ClockAppearance::default();
        assert_eq!(appearance.bounding_radius(), 30.0 + 8.0 * 110.0);
    }
}
