//! Effect parameter record.
//!
//! Thirteen independent scalars, one per slider in the editor. Each has a
//! documented domain and an identity value at which its stage is a no-op;
//! [`EffectSettings::default`] is the all-identity record (a full render
//! with defaults reproduces the cropped source, modulo clamp rounding).
//!
//! The record deserializes from the JSON the editor store persists
//! (camelCase field names, missing fields falling back to identity), so a
//! partially saved `{"hueRotate": 90}` is a valid settings document.

use serde::{Deserialize, Serialize};

/// Named effect parameters for one render call.
///
/// | Field | Domain | Identity |
/// |-------|--------|----------|
/// | `brightness` | 0..3 | 1 |
/// | `contrast` | 0..3 | 0 |
/// | `saturation` | 0..3 | 1 |
/// | `grayscale` | 0..1 | 0 |
/// | `sepia` | 0..1 | 0 |
/// | `invert` | 0..1 | 0 |
/// | `hue_rotate` | -180..180 degrees | 0 |
/// | `opacity` | 0..1 | 1 |
/// | `noise` | 0..1 | 0 |
/// | `pixelate` | 0..50 block size | 0 |
/// | `blur` | 0..10 | 0 |
/// | `sharpen` | 0..3 | 0 |
/// | `emboss` | 0..1 | 0 |
///
/// Out-of-domain values are not rejected: every stage formula is defined
/// (if sometimes numerically unstable) over all of `f32`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EffectSettings {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub grayscale: f32,
    pub sepia: f32,
    pub invert: f32,
    pub hue_rotate: f32,
    pub opacity: f32,
    pub noise: f32,
    pub pixelate: f32,
    pub blur: f32,
    pub sharpen: f32,
    pub emboss: f32,
}

impl Default for EffectSettings {
    fn default() -> Self {
        EffectSettings {
            brightness: 1.0,
            contrast: 0.0,
            saturation: 1.0,
            grayscale: 0.0,
            sepia: 0.0,
            invert: 0.0,
            hue_rotate: 0.0,
            opacity: 1.0,
            noise: 0.0,
            pixelate: 0.0,
            blur: 0.0,
            sharpen: 0.0,
            emboss: 0.0,
        }
    }
}

impl EffectSettings {
    /// True when any of the three kernel weights is active, i.e. the
    /// spatial-filter stage would actually convolve.
    pub fn needs_convolution(&self) -> bool {
        self.blur > 0.0 || self.sharpen > 0.0 || self.emboss > 0.0
    }
}
