//! Pixelation (block mosaic).
//!
//! Shrinks the buffer by the block size with a smoothing (box average)
//! filter, then stretches it back with nearest-neighbor sampling. The
//! asymmetry is the effect: averaging on the way down picks each block's
//! representative color, the hard-edged upsample turns it into visible
//! squares instead of a soft blur.

use ndarray::{Array3, ArrayView3};

/// Apply the mosaic effect.
///
/// No-op (fresh copy) for `block_size <= 0` or an empty buffer. Otherwise
/// the buffer is box-averaged down to
/// `max(1, width/block) x max(1, height/block)` and scaled back up to the
/// original size with nearest-neighbor sampling.
///
/// # Arguments
/// * `input` - Image (height, width, 4) RGBA
/// * `block_size` - Mosaic block edge in pixels; fractional values floor
///
/// # Returns
/// Owned buffer with the same dimensions as the input
pub fn pixelate_rgba(input: ArrayView3<u8>, block_size: f32) -> Array3<u8> {
    let (height, width, channels) = input.dim();

    if block_size <= 0.0 || height == 0 || width == 0 {
        return input.to_owned();
    }

    let block = (block_size.floor() as usize).max(1);
    let small_width = (width / block).max(1);
    let small_height = (height / block).max(1);

    // Downsample: average the source cell behind each small pixel. All four
    // channels participate; alpha averages across the block like the colors.
    let mut small = Array3::<f32>::zeros((small_height, small_width, channels));
    for sy in 0..small_height {
        let y0 = sy * height / small_height;
        let y1 = ((sy + 1) * height / small_height).max(y0 + 1);
        for sx in 0..small_width {
            let x0 = sx * width / small_width;
            let x1 = ((sx + 1) * width / small_width).max(x0 + 1);
            let count = ((y1 - y0) * (x1 - x0)) as f32;

            for c in 0..channels {
                let mut sum = 0.0f32;
                for y in y0..y1 {
                    for x in x0..x1 {
                        sum += input[[y, x, c]] as f32;
                    }
                }
                small[[sy, sx, c]] = sum / count;
            }
        }
    }

    // Upsample: nearest neighbor, no smoothing, so block edges stay hard.
    let mut output = Array3::<u8>::zeros((height, width, channels));
    for y in 0..height {
        let sy = (y * small_height / height).min(small_height - 1);
        for x in 0..width {
            let sx = (x * small_width / width).min(small_width - 1);
            for c in 0..channels {
                output[[y, x, c]] = small[[sy, sx, c]].clamp(0.0, 255.0).round() as u8;
            }
        }
    }

    output
}
