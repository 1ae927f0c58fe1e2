//! Decimal clock overlay
//!
//! Draws the 110 concentric rings of a [`Layout`] as neon tubes onto any
//! ring surface.

use dclock_core::Layout;
use dclock_types::ClockAppearance;

use super::Overlay;
use crate::surface::RingSurface;
use crate::widgets::NeonRing;

/// Ring display bound to a drawing surface
pub struct ClockOverlay<S: RingSurface> {
    surface: S,
    appearance: ClockAppearance,
    layout: Option<Layout>,
    dirty: bool,
}

impl<S: RingSurface> ClockOverlay<S> {
    pub fn new(mut surface: S, appearance: ClockAppearance) -> Self {
        surface.apply_appearance(&appearance);
        Self {
            surface,
            appearance,
            layout: None,
            dirty: true,
        }
    }

    /// Update the appearance
    pub fn set_config(&mut self, appearance: ClockAppearance) {
        self.surface.apply_appearance(&appearance);
        self.appearance = appearance;
        self.dirty = true;
    }

    pub fn appearance(&self) -> &ClockAppearance {
        &self.appearance
    }

    /// Update the layout. Returns whether it differs from the current one.
    pub fn set_data(&mut self, layout: Layout) -> bool {
        if self.layout.as_ref() == Some(&layout) {
            return false;
        }
        self.layout = Some(layout);
        self.dirty = true;
        true
    }

    /// Whether data or config changed since the last render
    pub fn needs_render(&self) -> bool {
        self.dirty
    }

    /// Render the overlay
    pub fn render(&mut self) {
        let viewport = self
            .layout
            .as_ref()
            .map(Layout::bounding_radius)
            .unwrap_or_else(|| self.appearance.bounding_radius());

        self.surface.begin_frame(viewport, self.appearance.background);

        if let Some(layout) = &self.layout {
            for indicator in layout.indicators() {
                NeonRing::from_indicator(indicator, &self.appearance).render(&mut self.surface);
            }
        }

        self.surface.end_frame();
        self.dirty = false;
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Overlay Trait Implementation
// ─────────────────────────────────────────────────────────────────────────────

impl<S: RingSurface> Overlay for ClockOverlay<S> {
    fn update_data(&mut self, layout: Layout) -> bool {
        self.set_data(layout)
    }

    fn update_config(&mut self, appearance: ClockAppearance) {
        self.set_config(appearance);
    }

    fn render(&mut self) {
        ClockOverlay::render(self);
    }
}
