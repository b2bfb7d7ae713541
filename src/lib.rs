//! Retouch render core
//!
//! The pixel-buffer rendering pipeline behind the Retouch browser image
//! editor: crop extraction, pixelation, a per-pixel color-transform chain,
//! and a kernel-based spatial filter, composed into a single synchronous
//! render call. The UI (upload, step wizard, sliders, persisted state) lives
//! on the JavaScript side; this crate only turns a decoded source image, an
//! optional crop region and an effects record into finished RGBA bytes.
//!
//! ## Image Format
//!
//! Images are `ndarray` arrays of shape `(height, width, 4)` holding
//! interleaved RGBA bytes, row-major with the origin at the top-left.
//! Stages compute in `f32` internally and clamp back to `0-255` only when
//! writing pixels, so chained effects don't lose range mid-stage.
//!
//! ## Surfaces
//!
//! - Native (`rlib`): call [`render::pipeline::render_rgba`] directly;
//!   the `codec` feature (default) adds PNG/WebP/JPEG decode and encode.
//! - Browser (`wasm` feature): `wasm-bindgen` exports in [`wasm`] operating
//!   on flat RGBA byte arrays, the same data `CanvasRenderingContext2D`
//!   hands out via `getImageData`.

pub mod render;

#[cfg(feature = "codec")]
pub mod codec;

#[cfg(feature = "wasm")]
pub mod wasm;
