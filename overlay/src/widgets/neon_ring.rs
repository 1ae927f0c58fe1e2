//! Neon ring widget
//!
//! A ring is drawn as a thick tube with a thin rim on either side. Lit tubes
//! are fully opaque and feed the bloom pass of their role; unlit tubes are
//! dimmed and their rims fall back to the off color.

use dclock_core::{Indicator, IndicatorRole};
use dclock_types::{ClockAppearance, Rgba};

use crate::surface::{CircleStroke, RingSurface};

/// Stroke width of the rims in scene units
const RIM_WIDTH: f32 = 1.0;

/// One concentric neon tube
#[derive(Debug, Clone, PartialEq)]
pub struct NeonRing {
    pub radius: f32,
    pub color: Rgba,
    pub is_on: bool,
    pub role: IndicatorRole,
    pub neon_width: f32,
    pub off_opacity: f32,
    pub rim_off_color: Rgba,
    pub glow: bool,
}

impl NeonRing {
    pub fn new(radius: f32, role: IndicatorRole) -> Self {
        let defaults = ClockAppearance::default();
        let color = match role {
            IndicatorRole::Major => defaults.major_color,
            IndicatorRole::Minor => defaults.minor_color,
        };
        Self {
            radius,
            color,
            is_on: false,
            role,
            neon_width: defaults.neon_width,
            off_opacity: defaults.off_opacity,
            rim_off_color: defaults.rim_off_color,
            glow: defaults.glow.enabled,
        }
    }

    /// Build a ring for a laid-out indicator using the configured look
    pub fn from_indicator(indicator: &Indicator, appearance: &ClockAppearance) -> Self {
        let color = match indicator.role {
            IndicatorRole::Major => appearance.major_color,
            IndicatorRole::Minor => appearance.minor_color,
        };
        Self {
            radius: indicator.radius,
            color,
            is_on: indicator.is_on,
            role: indicator.role,
            neon_width: appearance.neon_width,
            off_opacity: appearance.off_opacity,
            rim_off_color: appearance.rim_off_color,
            glow: appearance.glow.enabled,
        }
    }

    pub fn with_on(mut self, is_on: bool) -> Self {
        self.is_on = is_on;
        self
    }

    pub fn with_neon_width(mut self, width: f32) -> Self {
        self.neon_width = width;
        self
    }

    pub fn with_glow(mut self, glow: bool) -> Self {
        self.glow = glow;
        self
    }

    /// The tube followed by its inner and outer rim
    pub fn strokes(&self) -> impl Iterator<Item = CircleStroke> + '_ {
        let tube = CircleStroke {
            radius: self.radius,
            width: self.neon_width,
            color: self.color,
            opacity: if self.is_on { 1.0 } else { self.off_opacity },
            bloom: (self.is_on && self.glow).then_some(self.role),
        };

        let rim_color = if self.is_on { self.color } else { self.rim_off_color };
        let half = self.neon_width / 2.0;
        let rims = [self.radius - half, self.radius + half].map(|radius| CircleStroke {
            radius,
            width: RIM_WIDTH,
            color: rim_color,
            opacity: 1.0,
            bloom: None,
        });

        std::iter::once(tube)
            .chain(rims)
            .filter(|stroke| stroke.radius > 0.0)
    }

    pub fn render<S: RingSurface + ?Sized>(&self, surface: &mut S) {
        for stroke in self.strokes() {
            surface.stroke_circle(&stroke);
        }
    }
}
