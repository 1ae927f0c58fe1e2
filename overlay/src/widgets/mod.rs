//! Reusable widgets for the clock display
//!
//! Each widget renders to any [`RingSurface`](crate::surface::RingSurface).
//!
//! # Available Widgets
//!
//! - [`NeonRing`] - Glowing tube with inner and outer rim

mod neon_ring;

pub use neon_ring::NeonRing;
