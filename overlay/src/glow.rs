//! Bloom helpers for raster rendering
//!
//! tiny-skia has no filter effects, so the glow around lit rings is built by
//! hand on the pixmap's premultiplied RGBA bytes:
//! - Gaussian blur approximated by three successive box blurs
//! - Per-channel tint (the equivalent of an SVG color matrix)
//!
//! Pixels outside the image are treated as fully transparent.

use tiny_skia::Pixmap;

const BOX_PASSES: usize = 3;

/// Box radii whose three-pass convolution approximates a gaussian of `sigma`
pub(crate) fn box_radii_for_sigma(sigma: f32) -> [usize; BOX_PASSES] {
    if !sigma.is_finite() || sigma <= 0.0 {
        return [0; BOX_PASSES];
    }
    let n = BOX_PASSES as f32;
    let variance = 12.0 * sigma * sigma;
    let ideal_width = (variance / n + 1.0).sqrt();

    let mut lower = ideal_width.floor() as i64;
    if lower % 2 == 0 {
        lower -= 1;
    }
    let lower = lower.max(1);
    let upper = lower + 2;

    let lw = lower as f32;
    let ideal_lower_count = (variance - n * lw * lw - 4.0 * n * lw - 3.0 * n) / (-4.0 * lw - 4.0);
    let lower_count = ideal_lower_count.round().max(0.0) as usize;

    std::array::from_fn(|i| {
        let width = if i < lower_count { lower } else { upper };
        ((width - 1) / 2) as usize
    })
}

/// Gaussian-ish blur of the whole pixmap, `sigma` in pixels
pub fn gaussian_blur(pixmap: &mut Pixmap, sigma: f32) {
    let width = pixmap.width() as usize;
    let height = pixmap.height() as usize;
    let data = pixmap.data_mut();
    let mut scratch = vec![0u8; data.len()];

    for radius in box_radii_for_sigma(sigma) {
        if radius == 0 {
            continue;
        }
        blur_horizontal(data, &mut scratch, width, height, radius);
        blur_vertical(&scratch, data, width, height, radius);
    }
}

/// Scale the RGB channels by `tint`, leaving alpha alone.
///
/// Factors are clamped to `[0, 1]` so premultiplied channels never exceed
/// their alpha.
pub fn tint(pixmap: &mut Pixmap, tint: [f32; 3]) {
    let factors = tint.map(|f| if f.is_finite() { f.clamp(0.0, 1.0) } else { 1.0 });
    if factors == [1.0; 3] {
        return;
    }
    for px in pixmap.data_mut().chunks_exact_mut(4) {
        for (channel, factor) in px[..3].iter_mut().zip(factors) {
            *channel = (*channel as f32 * factor).round() as u8;
        }
    }
}

fn blur_horizontal(src: &[u8], dst: &mut [u8], width: usize, height: usize, radius: usize) {
    let window = (2 * radius + 1) as u32;
    for y in 0..height {
        let row = y * width * 4;
        for c in 0..4 {
            let at = |x: usize| src[row + x * 4 + c] as u32;
            let mut sum: u32 = (0..=radius.min(width - 1)).map(at).sum();
            for x in 0..width {
                dst[row + x * 4 + c] = ((sum + window / 2) / window) as u8;
                if x + radius + 1 < width {
                    sum += at(x + radius + 1);
                }
                if x >= radius {
                    sum -= at(x - radius);
                }
            }
        }
    }
}

fn blur_vertical(src: &[u8], dst: &mut [u8], width: usize, height: usize, radius: usize) {
    let window = (2 * radius + 1) as u32;
    let stride = width * 4;
    for x in 0..width {
        for c in 0..4 {
            let at = |y: usize| src[y * stride + x * 4 + c] as u32;
            let mut sum: u32 = (0..=radius.min(height - 1)).map(at).sum();
            for y in 0..height {
                dst[y * stride + x * 4 + c] = ((sum + window / 2) / window) as u8;
                if y + radius + 1 < height {
                    sum += at(y + radius + 1);
                }
                if y >= radius {
                    sum -= at(y - radius);
                }
            }
        }
    }
}
