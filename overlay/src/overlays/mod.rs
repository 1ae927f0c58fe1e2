//! Complete overlay implementations
//!
//! # Overlay Trait
//!
//! All overlays implement the `Overlay` trait, which provides a unified
//! interface for the renderer thread to drive any overlay type.

mod clock;

pub use clock::ClockOverlay;

use dclock_core::Layout;
use dclock_types::ClockAppearance;

/// Unified interface for the renderer thread
pub trait Overlay {
    /// Replace the displayed layout. Returns `true` if a re-render is needed.
    fn update_data(&mut self, layout: Layout) -> bool;

    fn update_config(&mut self, appearance: ClockAppearance);

    fn render(&mut self);
}
