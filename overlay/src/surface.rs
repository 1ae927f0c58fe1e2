//! Drawing surface abstraction
//!
//! The clock only ever draws one primitive: a circle centred on the origin,
//! stroked with a given width and color, optionally feeding a bloom pass.
//! Surfaces work in scene units; mapping to pixels is their own business.

use dclock_core::IndicatorRole;
use dclock_types::{ClockAppearance, Rgba};

/// A single stroked circle centred on the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleStroke {
    pub radius: f32,
    pub width: f32,
    pub color: Rgba,
    /// Multiplied into the color's own alpha (0.0-1.0)
    pub opacity: f32,
    /// Bloom filter to apply, keyed by the ring role it belongs to
    pub bloom: Option<IndicatorRole>,
}

/// Something the ring display can be drawn onto
pub trait RingSurface {
    /// Pick up surface-level settings such as glow or output size.
    fn apply_appearance(&mut self, _appearance: &ClockAppearance) {}

    /// Start a frame whose scene spans `[-viewport_radius, viewport_radius]`
    /// on both axes.
    fn begin_frame(&mut self, viewport_radius: f32, background: Rgba);

    fn stroke_circle(&mut self, stroke: &CircleStroke);

    /// Finish the frame. Deferred work such as bloom happens here.
    fn end_frame(&mut self);
}
