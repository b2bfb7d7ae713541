//! Render pipeline stages.
//!
//! One module per stage, composed in fixed order by [`pipeline::render_rgba`]:
//!
//! | Stage | Module | Consumes | Produces |
//! |-------|--------|----------|----------|
//! | 1. Crop | [`crop`] | source + optional [`crop::CropRegion`] | fresh buffer, possibly resized |
//! | 2. Pixelate | [`pixelate`] | buffer + block size | fresh buffer, same size |
//! | 3. Color chain | [`color`] | buffer + [`effects::EffectSettings`] | same buffer, in place |
//! | 4. Spatial filter | [`spatial`] | buffer + blur/sharpen/emboss | fresh buffer, same size |
//!
//! ## Architecture
//!
//! All stages follow these principles:
//! - **Total functions** - no stage returns an error; degenerate geometry
//!   (a zero-area crop) flows through as a valid `0x0` buffer
//! - **Pure and reentrant** - nothing is cached between calls; concurrent
//!   renders with different inputs are safe
//! - **Owned buffers** - each stage reads a snapshot and hands ownership of
//!   its output to the next stage; only the color chain mutates in place,
//!   by contract
//! - **f32 arithmetic, u8 boundaries** - values are clamped to `0-255` only
//!   when a stage writes pixels back

pub mod color;
pub mod crop;
pub mod effects;
pub mod pipeline;
pub mod pixelate;
pub mod spatial;
