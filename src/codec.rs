//! Decode and encode for the export path.
//!
//! The editor proper decodes with the browser and encodes with
//! `canvas.toBlob`; this module is the native equivalent so the pipeline is
//! usable (and testable) without a browser. Formats mirror the editor's
//! format picker: PNG, WebP, JPEG, selected by MIME string, with a quality
//! factor in `0.1..=1.0`.
//!
//! Quality only reaches the JPEG encoder. PNG is lossless by nature, and
//! the `image` crate's WebP encoder is lossless-only, so both accept and
//! ignore the factor.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};
use log::debug;
use ndarray::{Array3, ArrayView3};

/// Errors surfaced by the codec layer. Rendering itself is total; only
/// getting pixels in or out can fail.
#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    /// Source bytes could not be decoded into an image.
    #[error("decode failure: {0}")]
    DecodeFailure(String),

    /// The buffer could not be serialized to the requested format.
    #[error("encode failure: {0}")]
    EncodeFailure(String),

    /// The format string is not one the editor offers.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Export format, one per entry in the editor's format picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    WebP,
    Jpeg,
}

impl OutputFormat {
    /// Parse the MIME strings the editor stores (`"image/png"` etc.).
    pub fn from_mime(mime: &str) -> Result<Self, CodecError> {
        match mime {
            "image/png" => Ok(OutputFormat::Png),
            "image/webp" => Ok(OutputFormat::WebP),
            "image/jpeg" => Ok(OutputFormat::Jpeg),
            other => Err(CodecError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::WebP => "image/webp",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }

    /// Extension used for the downloaded file name.
    pub fn file_extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::WebP => "webp",
            OutputFormat::Jpeg => "jpeg",
        }
    }
}

/// Map the editor's quality factor (0.1..=1.0) to the JPEG encoder's
/// 1-100 scale.
fn jpeg_quality(quality: f32) -> u8 {
    (quality.clamp(0.1, 1.0) * 100.0).round() as u8
}

/// Decode encoded image bytes into an RGBA buffer.
///
/// Any format the `image` crate recognizes is accepted; the result is
/// always expanded to RGBA.
///
/// # Arguments
/// * `bytes` - Encoded image data (PNG, JPEG, WebP, ...)
///
/// # Returns
/// Buffer of shape (height, width, 4), or [`CodecError::DecodeFailure`]
pub fn decode_rgba(bytes: &[u8]) -> Result<Array3<u8>, CodecError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| CodecError::DecodeFailure(e.to_string()))?
        .to_rgba8();

    let (width, height) = decoded.dimensions();
    debug!("decode: {width}x{height}");

    Array3::from_shape_vec((height as usize, width as usize, 4), decoded.into_raw())
        .map_err(|e| CodecError::DecodeFailure(e.to_string()))
}

/// Encode an RGBA buffer to the requested format.
///
/// JPEG has no alpha channel; the buffer is flattened onto black first
/// (`c * a/255`), matching what the browser's canvas export does.
///
/// # Arguments
/// * `input` - Image (height, width, 4) RGBA
/// * `format` - Target format
/// * `quality` - Quality factor in 0.1..=1.0; only JPEG uses it
///
/// # Returns
/// Encoded bytes, or [`CodecError::EncodeFailure`]
pub fn encode_rgba(
    input: ArrayView3<u8>,
    format: OutputFormat,
    quality: f32,
) -> Result<Vec<u8>, CodecError> {
    let (height, width, channels) = input.dim();
    if channels != 4 {
        return Err(CodecError::EncodeFailure(format!(
            "expected 4 channels, got {channels}"
        )));
    }

    let data = input.to_owned().into_raw_vec_and_offset().0;
    let (width, height) = (width as u32, height as u32);
    let mut out = Cursor::new(Vec::new());

    match format {
        OutputFormat::Png => {
            PngEncoder::new(&mut out)
                .write_image(&data, width, height, ExtendedColorType::Rgba8)
                .map_err(|e| CodecError::EncodeFailure(e.to_string()))?;
        }
        OutputFormat::WebP => {
            WebPEncoder::new_lossless(&mut out)
                .write_image(&data, width, height, ExtendedColorType::Rgba8)
                .map_err(|e| CodecError::EncodeFailure(e.to_string()))?;
        }
        OutputFormat::Jpeg => {
            let rgb: Vec<u8> = data
                .chunks_exact(4)
                .flat_map(|px| {
                    let a = px[3] as u16;
                    [
                        ((px[0] as u16 * a) / 255) as u8,
                        ((px[1] as u16 * a) / 255) as u8,
                        ((px[2] as u16 * a) / 255) as u8,
                    ]
                })
                .collect();

            JpegEncoder::new_with_quality(&mut out, jpeg_quality(quality))
                .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
                .map_err(|e| CodecError::EncodeFailure(e.to_string()))?;
        }
    }

    Ok(out.into_inner())
}
