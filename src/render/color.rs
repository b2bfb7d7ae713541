//! Per-pixel color transform chain.
//!
//! Nine arithmetic stages applied to every pixel, in place, in a fixed
//! order. The order is part of the contract: contrast after brightness and
//! saturation after contrast compose differently than any other ordering,
//! and the editor's sliders are calibrated against exactly this chain.
//!
//! All stages run in `f32` on the raw channel values; nothing clamps until
//! the final write-back, so intermediate stages may push channels outside
//! `0-255` and later stages see those unclamped values.

use ndarray::Array3;

use super::effects::EffectSettings;

/// Rec. 601 luma coefficients, the pivot for saturation and grayscale.
const LUMA_R: f32 = 0.2989;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

// ============================================================================
// Deterministic RNG for the noise stage
// ============================================================================

/// MINSTD linear congruential generator. Deterministic under a caller
/// seed so noisy renders are reproducible in tests and previews.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng {
            state: seed.wrapping_add(1), // Avoid zero
        }
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(48271).wrapping_add(1) % 2147483647;
        self.state as u32
    }

    /// Uniform random f32 in [0, 1).
    fn next_f32(&mut self) -> f32 {
        (self.next_u32() as f32) / (2147483647.0f32)
    }
}

// ============================================================================
// Stage coefficients
// ============================================================================

/// Contrast transfer factor: `259*(c*255+255) / (255*(259-c*255))`.
///
/// At `contrast = 0` this is exactly 1 (identity). The denominator reaches
/// zero as `contrast` approaches `259/255 ~= 1.0157`, which the parameter
/// domain permits; the factor then blows up toward infinity and the final
/// clamp hard-limits the result. Inherited behavior, deliberately not
/// clamped away.
fn contrast_factor(contrast: f32) -> f32 {
    (259.0 * (contrast * 255.0 + 255.0)) / (255.0 * (259.0 - contrast * 255.0))
}

/// NTSC-luma hue rotation matrix for an angle in degrees, row-major,
/// applied as `new = M * [r, g, b]`.
fn hue_rotation_matrix(degrees: f32) -> [f32; 9] {
    let rad = degrees.to_radians();
    let cos_a = rad.cos();
    let sin_a = rad.sin();

    [
        0.213 + cos_a * 0.787 - sin_a * 0.213,
        0.715 - cos_a * 0.715 - sin_a * 0.715,
        0.072 - cos_a * 0.072 + sin_a * 0.928,
        0.213 - cos_a * 0.213 + sin_a * 0.143,
        0.715 + cos_a * 0.285 + sin_a * 0.140,
        0.072 - cos_a * 0.072 - sin_a * 0.283,
        0.213 - cos_a * 0.213 - sin_a * 0.787,
        0.715 - cos_a * 0.715 + sin_a * 0.715,
        0.072 + cos_a * 0.928 + sin_a * 0.072,
    ]
}

// ============================================================================
// Color chain
// ============================================================================

/// Apply the nine-stage color chain to a buffer, in place.
///
/// Stage order: brightness, contrast, saturation, grayscale, sepia, invert,
/// hue rotate, opacity (alpha only), noise. Stages with a zero mix skip
/// their per-pixel work; brightness, contrast, saturation and opacity run
/// unconditionally because their identity values make them no-ops anyway.
///
/// Noise draws from a MINSTD generator seeded with `noise_seed`, one fresh
/// draw per color channel per pixel, so channels decorrelate instead of
/// shifting together.
///
/// # Arguments
/// * `buf` - Image (height, width, 4) RGBA, mutated in place
/// * `settings` - Effect parameters; only the nine color stages are read
/// * `noise_seed` - Seed for the noise stage; irrelevant when `noise == 0`
pub fn apply_color_rgba(buf: &mut Array3<u8>, settings: &EffectSettings, noise_seed: u64) {
    let (height, width, _) = buf.dim();

    let EffectSettings {
        brightness,
        contrast,
        saturation,
        grayscale,
        sepia,
        invert,
        hue_rotate,
        opacity,
        noise,
        ..
    } = *settings;

    let factor = contrast_factor(contrast);
    let hue = hue_rotation_matrix(hue_rotate);
    let mut rng = SimpleRng::new(noise_seed);

    for y in 0..height {
        for x in 0..width {
            let mut r = buf[[y, x, 0]] as f32;
            let mut g = buf[[y, x, 1]] as f32;
            let mut b = buf[[y, x, 2]] as f32;

            // 1. Brightness
            r *= brightness;
            g *= brightness;
            b *= brightness;

            // 2. Contrast
            r = factor * (r - 128.0) + 128.0;
            g = factor * (g - 128.0) + 128.0;
            b = factor * (b - 128.0) + 128.0;

            // 3. Saturation, pivoting on luma
            let luma = LUMA_R * r + LUMA_G * g + LUMA_B * b;
            r = luma + (r - luma) * saturation;
            g = luma + (g - luma) * saturation;
            b = luma + (b - luma) * saturation;

            // 4. Grayscale mix, luma recomputed post-saturation
            if grayscale > 0.0 {
                let gray = LUMA_R * r + LUMA_G * g + LUMA_B * b;
                r = r * (1.0 - grayscale) + gray * grayscale;
                g = g * (1.0 - grayscale) + gray * grayscale;
                b = b * (1.0 - grayscale) + gray * grayscale;
            }

            // 5. Sepia mix
            if sepia > 0.0 {
                let sr = 0.393 * r + 0.769 * g + 0.189 * b;
                let sg = 0.349 * r + 0.686 * g + 0.168 * b;
                let sb = 0.272 * r + 0.534 * g + 0.131 * b;
                r = r * (1.0 - sepia) + sr * sepia;
                g = g * (1.0 - sepia) + sg * sepia;
                b = b * (1.0 - sepia) + sb * sepia;
            }

            // 6. Invert mix
            if invert > 0.0 {
                r = r * (1.0 - invert) + (255.0 - r) * invert;
                g = g * (1.0 - invert) + (255.0 - g) * invert;
                b = b * (1.0 - invert) + (255.0 - b) * invert;
            }

            // 7. Hue rotate
            if hue_rotate != 0.0 {
                let nr = r * hue[0] + g * hue[1] + b * hue[2];
                let ng = r * hue[3] + g * hue[4] + b * hue[5];
                let nb = r * hue[6] + g * hue[7] + b * hue[8];
                r = nr;
                g = ng;
                b = nb;
            }

            // 8. Opacity, alpha channel only (non-premultiplied)
            let a = buf[[y, x, 3]] as f32 * opacity;
            buf[[y, x, 3]] = a.clamp(0.0, 255.0).round() as u8;

            // 9. Noise, independent draw per channel
            if noise > 0.0 {
                r += (rng.next_f32() - 0.5) * 255.0 * noise;
                g += (rng.next_f32() - 0.5) * 255.0 * noise;
                b += (rng.next_f32() - 0.5) * 255.0 * noise;
            }

            buf[[y, x, 0]] = r.clamp(0.0, 255.0).round() as u8;
            buf[[y, x, 1]] = g.clamp(0.0, 255.0).round() as u8;
            buf[[y, x, 2]] = b.clamp(0.0, 255.0).round() as u8;
        }
    }
}
