//! WebAssembly exports for the render pipeline.
//!
//! These functions are exposed to JavaScript via wasm-bindgen and operate
//! on flat RGBA byte arrays, the layout `CanvasRenderingContext2D`'s
//! `getImageData`/`putImageData` already uses. Crop and effect records
//! arrive as JSON, the same documents the editor store persists, so the
//! JavaScript side passes its state through unchanged.

use ndarray::Array3;
use wasm_bindgen::prelude::*;

use crate::render::crop::CropRegion;
use crate::render::effects::EffectSettings;
use crate::render::pipeline::render_rgba;

/// A finished render. Cropping changes dimensions, so the output carries
/// its own width and height alongside the bytes.
#[wasm_bindgen]
pub struct RenderedImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

#[wasm_bindgen]
impl RenderedImage {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Flat RGBA bytes, row-major (length = width * height * 4).
    #[wasm_bindgen(getter)]
    pub fn data(&self) -> Vec<u8> {
        self.data.clone()
    }
}

/// Run the full pipeline on flat RGBA bytes.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Source width in pixels
/// * `height` - Source height in pixels
/// * `crop_json` - `""`, `"null"`, or `{"x":..,"y":..,"width":..,"height":..}`
/// * `settings_json` - The effects record; missing fields fall back to
///   their identity values, `""` means all-identity
/// * `noise_seed` - Seed for the noise stage
///
/// # Returns
/// A [`RenderedImage`], or a JS error for a malformed buffer or record
#[wasm_bindgen]
pub fn render_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    crop_json: &str,
    settings_json: &str,
    noise_seed: u64,
) -> Result<RenderedImage, JsError> {
    let input = Array3::from_shape_vec((height, width, 4), data.to_vec())
        .map_err(|_| JsError::new("data length must equal width * height * 4"))?;

    let crop: Option<CropRegion> = match crop_json.trim() {
        "" | "null" => None,
        json => Some(
            serde_json::from_str(json)
                .map_err(|e| JsError::new(&format!("invalid crop region: {e}")))?,
        ),
    };

    let settings: EffectSettings = match settings_json.trim() {
        "" | "null" => EffectSettings::default(),
        json => serde_json::from_str(json)
            .map_err(|e| JsError::new(&format!("invalid effect settings: {e}")))?,
    };

    let rendered = render_rgba(input.view(), crop.as_ref(), &settings, noise_seed);
    let (out_height, out_width, _) = rendered.dim();

    Ok(RenderedImage {
        width: out_width,
        height: out_height,
        data: rendered.into_raw_vec_and_offset().0,
    })
}

/// Identity-settings JSON, handy for resetting the editor's effects state
/// from one source of truth.
#[wasm_bindgen]
pub fn default_settings_json() -> String {
    serde_json::to_string(&EffectSettings::default()).expect("settings always serialize")
}
