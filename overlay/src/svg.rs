//! SVG frame
//!
//! Emits the ring display as a standalone SVG document. Bloom is expressed
//! with native filter primitives: the lit tubes are blurred at each halo
//! radius, merged, tinted through a color matrix, then topped with the
//! inner glow and the crisp tube.

use std::path::Path;

use dclock_core::IndicatorRole;
use dclock_types::{ClockAppearance, GlowConfig, Rgba};

use crate::error::RenderError;
use crate::surface::{CircleStroke, RingSurface};
use crate::utils::{rgba_hex, write_file_atomic};

/// A vector canvas implementing [`RingSurface`]
#[derive(Debug, Clone)]
pub struct SvgFrame {
    glow: GlowConfig,
    title: Option<String>,
    viewport_radius: f32,
    background: Rgba,
    body: String,
    document: String,
}

impl SvgFrame {
    pub fn new(glow: GlowConfig) -> Self {
        Self {
            glow,
            title: None,
            viewport_radius: 1.0,
            background: [0, 0, 0, 0],
            body: String::new(),
            document: String::new(),
        }
    }

    pub fn set_glow(&mut self, glow: GlowConfig) {
        self.glow = glow;
    }

    /// Accessible title embedded in the next finished document
    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    /// The last finished document, empty before the first `end_frame`
    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn into_string(self) -> String {
        self.document
    }

    pub fn save(&self, path: &Path) -> Result<(), RenderError> {
        write_file_atomic(path, self.document.as_bytes()).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn filter_defs(&self) -> String {
        let r = self.viewport_radius;
        let mut defs = String::from("<defs>");
        for role in [IndicatorRole::Minor, IndicatorRole::Major] {
            let tint = match role {
                IndicatorRole::Minor => self.glow.minor_tint,
                IndicatorRole::Major => self.glow.major_tint,
            };
            defs.push_str(&format!(
                r#"<filter id="{}" filterUnits="userSpaceOnUse" x="{}" y="{}" width="{}" height="{}">"#,
                filter_id(role),
                -r,
                -r,
                2.0 * r,
                2.0 * r
            ));
            defs.push_str(&format!(
                r#"<feGaussianBlur in="SourceGraphic" stdDeviation="{}" result="core"/>"#,
                self.glow.core_sigma
            ));

            let mut merge_nodes = String::new();
            for (i, sigma) in self.glow.halo_sigmas.iter().enumerate() {
                defs.push_str(&format!(
                    r#"<feGaussianBlur in="SourceGraphic" stdDeviation="{sigma}" result="halo{i}"/>"#
                ));
                merge_nodes.push_str(&format!(r#"<feMergeNode in="halo{i}"/>"#));
            }
            defs.push_str(&format!(r#"<feMerge result="halo">{merge_nodes}</feMerge>"#));
            defs.push_str(&format!(
                r#"<feColorMatrix in="halo" type="matrix" values="{} 0 0 0 0 0 {} 0 0 0 0 0 {} 0 0 0 0 0 1 0" result="tinted"/>"#,
                tint[0], tint[1], tint[2]
            ));
            defs.push_str(
                r#"<feMerge><feMergeNode in="tinted"/><feMergeNode in="core"/><feMergeNode in="SourceGraphic"/></feMerge>"#,
            );
            defs.push_str("</filter>");
        }
        defs.push_str("</defs>");
        defs
    }
}

impl RingSurface for SvgFrame {
    fn apply_appearance(&mut self, appearance: &ClockAppearance) {
        self.set_glow(appearance.glow.clone());
    }

    fn begin_frame(&mut self, viewport_radius: f32, background: Rgba) {
        self.viewport_radius = if viewport_radius.is_finite() && viewport_radius > 0.0 {
            viewport_radius
        } else {
            1.0
        };
        self.background = background;
        self.body.clear();
    }

    fn stroke_circle(&mut self, stroke: &CircleStroke) {
        if !(stroke.radius > 0.0 && stroke.width > 0.0) {
            return;
        }
        let opacity = if stroke.opacity.is_finite() {
            stroke.opacity.clamp(0.0, 1.0)
        } else {
            1.0
        };
        let opacity = opacity * stroke.color[3] as f32 / 255.0;

        self.body.push_str(&format!(
            r#"<circle cx="0" cy="0" r="{}" fill="none" stroke="{}" stroke-width="{}" stroke-opacity="{}""#,
            stroke.radius,
            rgba_hex(stroke.color),
            stroke.width,
            opacity
        ));
        if let Some(role) = stroke.bloom.filter(|_| self.glow.enabled) {
            self.body
                .push_str(&format!(r#" filter="url(#{})""#, filter_id(role)));
        }
        self.body.push_str("/>");
    }

    fn end_frame(&mut self) {
        let r = self.viewport_radius;
        let mut doc = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            -r,
            -r,
            2.0 * r,
            2.0 * r
        );
        if let Some(title) = &self.title {
            doc.push_str(&format!("<title>{}</title>", escape_xml(title)));
        }
        if self.glow.enabled {
            doc.push_str(&self.filter_defs());
        }
        doc.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" fill-opacity="{}"/>"#,
            -r,
            -r,
            2.0 * r,
            2.0 * r,
            rgba_hex(self.background),
            self.background[3] as f32 / 255.0
        ));
        doc.push_str(&self.body);
        doc.push_str("</svg>\n");
        self.document = doc;
    }
}

fn filter_id(role: IndicatorRole) -> &'static str {
    match role {
        IndicatorRole::Minor => "minor-bloom",
        IndicatorRole::Major => "major-bloom",
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
