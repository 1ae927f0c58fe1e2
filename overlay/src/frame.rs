//! Raster frame
//!
//! `RasterFrame` owns the pixel buffer a clock frame is drawn into and
//! handles everything around the rings themselves:
//! - Background fill
//! - Mapping scene units (origin at the centre) to pixels
//! - Deferred bloom for lit tubes, composited before their crisp stroke
//! - PNG export
//!
//! This lets the overlay focus solely on which rings to draw.

use std::path::Path;

use dclock_core::IndicatorRole;
use dclock_types::{ClockAppearance, GlowConfig, Rgba};
use tiny_skia::{Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform};

use crate::error::RenderError;
use crate::glow;
use crate::surface::{CircleStroke, RingSurface};
use crate::utils::{color_from_rgba, color_with_opacity, write_file_atomic};

/// A square pixel canvas implementing [`RingSurface`]
pub struct RasterFrame {
    pixmap: Pixmap,
    glow: GlowConfig,
    viewport_radius: f32,
    /// Lit tubes, drawn in `end_frame` on top of their bloom
    deferred: Vec<CircleStroke>,
}

impl RasterFrame {
    /// Create a new `size` x `size` frame
    pub fn new(size: u32, glow: GlowConfig) -> Result<Self, RenderError> {
        Ok(Self {
            pixmap: new_pixmap(size, size)?,
            glow,
            viewport_radius: 1.0,
            deferred: Vec::new(),
        })
    }

    pub fn set_glow(&mut self, glow: GlowConfig) {
        self.glow = glow;
    }

    /// Reallocate the pixel buffer if the edge length changed
    pub fn resize(&mut self, size: u32) -> Result<(), RenderError> {
        if self.pixmap.width() != size || self.pixmap.height() != size {
            self.pixmap = new_pixmap(size, size)?;
        }
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Scaling
    // ─────────────────────────────────────────────────────────────────────────

    /// Pixels per scene unit, fitting the viewport into the shorter edge
    pub fn scale_factor(&self) -> f32 {
        let edge = self.pixmap.width().min(self.pixmap.height()) as f32;
        edge / (2.0 * self.viewport_radius)
    }

    /// Scale a scene value to pixels
    #[inline]
    pub fn scaled(&self, scene_value: f32) -> f32 {
        scene_value * self.scale_factor()
    }

    fn transform(&self) -> Transform {
        let scale = self.scale_factor();
        Transform::from_row(
            scale,
            0.0,
            0.0,
            scale,
            self.pixmap.width() as f32 / 2.0,
            self.pixmap.height() as f32 / 2.0,
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────────

    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))
    }

    /// Encode and write atomically to `path`
    pub fn save_png(&self, path: &Path) -> Result<(), RenderError> {
        let bytes = self.encode_png()?;
        write_file_atomic(path, &bytes).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Bloom
    // ─────────────────────────────────────────────────────────────────────────

    /// Draw the halo and inner glow of `strokes` onto the frame.
    ///
    /// The halo merges progressively wider blurs of the lit tubes, then tints
    /// them. Each blur starts from the previous one, so only the variance
    /// still missing is added per step.
    fn composite_bloom(&mut self, role: IndicatorRole, strokes: &[CircleStroke]) -> Result<(), RenderError> {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let transform = self.transform();
        let scale = self.scale_factor();

        let mut source = new_pixmap(width, height)?;
        for stroke in strokes {
            draw_stroke(&mut source, transform, stroke);
        }

        let mut sigmas: Vec<f32> = self
            .glow
            .halo_sigmas
            .iter()
            .copied()
            .filter(|s| s.is_finite() && *s > 0.0)
            .collect();
        sigmas.sort_by(f32::total_cmp);

        let mut halo = new_pixmap(width, height)?;
        let mut blurred = source.clone();
        let mut applied = 0.0_f32;
        for sigma in sigmas {
            let target = sigma * scale;
            let step = (target * target - applied * applied).max(0.0).sqrt();
            glow::gaussian_blur(&mut blurred, step);
            applied = target;
            halo.draw_pixmap(0, 0, blurred.as_ref(), &PixmapPaint::default(), Transform::identity(), None);
        }
        let tint = match role {
            IndicatorRole::Minor => self.glow.minor_tint,
            IndicatorRole::Major => self.glow.major_tint,
        };
        glow::tint(&mut halo, tint);

        let mut inner = source;
        glow::gaussian_blur(&mut inner, self.glow.core_sigma * scale);

        let paint = PixmapPaint::default();
        self.pixmap
            .draw_pixmap(0, 0, halo.as_ref(), &paint, Transform::identity(), None);
        self.pixmap
            .draw_pixmap(0, 0, inner.as_ref(), &paint, Transform::identity(), None);
        Ok(())
    }
}

impl RingSurface for RasterFrame {
    fn apply_appearance(&mut self, appearance: &ClockAppearance) {
        self.set_glow(appearance.glow.clone());
        if let Err(e) = self.resize(appearance.image_size) {
            tracing::warn!(error = %e, "Keeping previous frame size");
        }
    }

    fn begin_frame(&mut self, viewport_radius: f32, background: Rgba) {
        self.viewport_radius = if viewport_radius.is_finite() && viewport_radius > 0.0 {
            viewport_radius
        } else {
            1.0
        };
        self.deferred.clear();
        self.pixmap.fill(color_from_rgba(background));
    }

    fn stroke_circle(&mut self, stroke: &CircleStroke) {
        if stroke.bloom.is_some() && self.glow.enabled {
            self.deferred.push(*stroke);
            return;
        }
        let transform = self.transform();
        draw_stroke(&mut self.pixmap, transform, stroke);
    }

    fn end_frame(&mut self) {
        let deferred = std::mem::take(&mut self.deferred);

        for role in [IndicatorRole::Minor, IndicatorRole::Major] {
            let strokes: Vec<CircleStroke> = deferred
                .iter()
                .filter(|s| s.bloom == Some(role))
                .copied()
                .collect();
            if strokes.is_empty() {
                continue;
            }
            if let Err(e) = self.composite_bloom(role, &strokes) {
                tracing::warn!(error = %e, ?role, "Skipping bloom");
            }
        }

        let transform = self.transform();
        for stroke in &deferred {
            draw_stroke(&mut self.pixmap, transform, stroke);
        }
    }
}

fn new_pixmap(width: u32, height: u32) -> Result<Pixmap, RenderError> {
    Pixmap::new(width, height).ok_or(RenderError::Allocation { width, height })
}

fn draw_stroke(pixmap: &mut Pixmap, transform: Transform, stroke: &CircleStroke) {
    if !(stroke.radius > 0.0 && stroke.width > 0.0) {
        return;
    }
    let Some(path) = PathBuilder::from_circle(0.0, 0.0, stroke.radius) else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color(color_with_opacity(stroke.color, stroke.opacity));
    paint.anti_alias = true;

    let style = Stroke {
        width: stroke.width,
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, &paint, &style, transform, None);
}
