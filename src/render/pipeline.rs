//! Pipeline orchestration.
//!
//! Fixed stage order: crop, pixelate, color chain, spatial filter. One
//! call, one finished buffer; no state survives between calls, so the
//! preview layer may fire overlapping renders and keep whichever result is
//! newest.

use log::debug;
use ndarray::{Array3, ArrayView3};

use super::color::apply_color_rgba;
use super::crop::{crop_rgba, CropRegion};
use super::effects::EffectSettings;
use super::pixelate::pixelate_rgba;
use super::spatial::apply_spatial_rgba;

/// Run the full render pipeline.
///
/// Total over well-formed inputs: out-of-domain effect values compute
/// through, and degenerate geometry (a zero-area crop) produces a `0x0`
/// buffer rather than an error. Decode failures belong to the caller's
/// image-loading layer; by the time a buffer exists, rendering cannot fail.
///
/// # Arguments
/// * `source` - Decoded source image (height, width, 4) RGBA
/// * `crop` - Optional crop rectangle, ratio or absolute
/// * `settings` - Effect parameters for every stage
/// * `noise_seed` - Seed for the noise stage; pass anything when `noise == 0`
///
/// # Returns
/// The finished buffer, sized by the crop (or the source when `crop` is
/// `None`)
pub fn render_rgba(
    source: ArrayView3<u8>,
    crop: Option<&CropRegion>,
    settings: &EffectSettings,
    noise_seed: u64,
) -> Array3<u8> {
    let (source_height, source_width, _) = source.dim();

    let cropped = crop_rgba(source, crop);
    let (height, width, _) = cropped.dim();
    debug!(
        "render: source {source_width}x{source_height}, crop -> {width}x{height}"
    );

    let mut buf = pixelate_rgba(cropped.view(), settings.pixelate);
    apply_color_rgba(&mut buf, settings, noise_seed);

    if settings.needs_convolution() {
        debug!(
            "render: convolving (blur {}, sharpen {}, emboss {})",
            settings.blur, settings.sharpen, settings.emboss
        );
        apply_spatial_rgba(buf.view(), settings.blur, settings.sharpen, settings.emboss)
    } else {
        buf
    }
}
