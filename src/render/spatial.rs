//! Blended spatial filter (blur / sharpen / emboss).
//!
//! Three fixed 3x3 kernels are mixed into a single kernel by their effect
//! weights, then the buffer is convolved once. This is not the same as
//! applying the three filters one after another: blending first keeps one
//! convolution pass per render, and the sliders are calibrated against the
//! blended kernel. A sequential reimplementation diverges visually; the
//! single-blend design is the contract, not an optimization detail.

use ndarray::{Array3, ArrayView3};

/// Gaussian blur, normalized to sum 1.
const BLUR_KERNEL: [f32; 9] = [
    1.0 / 16.0,
    2.0 / 16.0,
    1.0 / 16.0,
    2.0 / 16.0,
    4.0 / 16.0,
    2.0 / 16.0,
    1.0 / 16.0,
    2.0 / 16.0,
    1.0 / 16.0,
];

/// Laplacian-style sharpen, sum 1.
const SHARPEN_KERNEL: [f32; 9] = [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0];

/// Directional emboss, sum 1.
const EMBOSS_KERNEL: [f32; 9] = [-2.0, -1.0, 0.0, -1.0, 1.0, 1.0, 0.0, 1.0, 2.0];

/// Blend the three preset kernels elementwise by their weights.
pub fn blend_kernel(blur: f32, sharpen: f32, emboss: f32) -> [f32; 9] {
    let mut kernel = [0.0f32; 9];
    for i in 0..9 {
        kernel[i] =
            blur * BLUR_KERNEL[i] + sharpen * SHARPEN_KERNEL[i] + emboss * EMBOSS_KERNEL[i];
    }
    kernel
}

/// Convolve the buffer once with the blended kernel.
///
/// No-op (fresh copy) when all three weights are zero. The convolution
/// reads only the pre-filter snapshot and writes a new buffer, so there is
/// no read/write aliasing.
///
/// Two inherited edge behaviors are part of the contract:
/// - Neighborhood cells outside the buffer are skipped entirely rather
///   than zero-padded. For kernels that sum to 1 this slightly darkens
///   border pixels (the border's effective kernel sums below 1).
/// - Output alpha is forced to 255, discarding any opacity applied by the
///   color chain. Callers mixing opacity with blur/sharpen/emboss get an
///   opaque result.
///
/// # Arguments
/// * `input` - Image (height, width, 4) RGBA
/// * `blur` - Gaussian kernel weight (0..10)
/// * `sharpen` - Sharpen kernel weight (0..3)
/// * `emboss` - Emboss kernel weight (0..1)
///
/// # Returns
/// Owned buffer with the same dimensions as the input
pub fn apply_spatial_rgba(input: ArrayView3<u8>, blur: f32, sharpen: f32, emboss: f32) -> Array3<u8> {
    let (height, width, _) = input.dim();

    if blur <= 0.0 && sharpen <= 0.0 && emboss <= 0.0 {
        return input.to_owned();
    }

    let kernel = blend_kernel(blur, sharpen, emboss);
    let mut output = Array3::<u8>::zeros((height, width, 4));

    for y in 0..height {
        for x in 0..width {
            let mut r = 0.0f32;
            let mut g = 0.0f32;
            let mut b = 0.0f32;

            for ky in 0..3 {
                let sy = y as isize + ky as isize - 1;
                if sy < 0 || sy >= height as isize {
                    continue;
                }
                for kx in 0..3 {
                    let sx = x as isize + kx as isize - 1;
                    if sx < 0 || sx >= width as isize {
                        continue;
                    }

                    let kval = kernel[ky * 3 + kx];
                    let (sy, sx) = (sy as usize, sx as usize);
                    r += input[[sy, sx, 0]] as f32 * kval;
                    g += input[[sy, sx, 1]] as f32 * kval;
                    b += input[[sy, sx, 2]] as f32 * kval;
                }
            }

            output[[y, x, 0]] = r.clamp(0.0, 255.0).round() as u8;
            output[[y, x, 1]] = g.clamp(0.0, 255.0).round() as u8;
            output[[y, x, 2]] = b.clamp(0.0, 255.0).round() as u8;
            output[[y, x, 3]] = 255;
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn uniform_rgba(height: usize, width: usize, value: u8, alpha: u8) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((height, width, 4));
        for y in 0..height {
            for x in 0..width {
                for c in 0..3 {
                    img[[y, x, c]] = value;
                }
                img[[y, x, 3]] = alpha;
            }
        }
        img
    }

    #[test]
    fn test_all_zero_weights_is_noop() {
        let img = uniform_rgba(3, 3, 100, 180);

        let result = apply_spatial_rgba(img.view(), 0.0, 0.0, 0.0);

        // Copy, alpha included: the alpha=255 side effect only applies
        // when a convolution actually runs.
        assert_eq!(result, img);
    }

    #[test]
    fn test_alpha_forced_opaque_when_active() {
        let img = uniform_rgba(3, 3, 100, 50);

        let result = apply_spatial_rgba(img.view(), 1.0, 0.0, 0.0);

        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(result[[y, x, 3]], 255);
            }
        }
    }

    #[test]
    fn test_blur_preserves_uniform_interior() {
        let img = uniform_rgba(5, 5, 100, 255);

        let result = apply_spatial_rgba(img.view(), 1.0, 0.0, 0.0);

        // Kernel sums to 1 where the full neighborhood exists.
        assert_eq!(result[[2, 2, 0]], 100);
    }

    #[test]
    fn test_border_cells_are_skipped_not_zero_padded() {
        let img = uniform_rgba(5, 5, 100, 255);

        let result = apply_spatial_rgba(img.view(), 1.0, 0.0, 0.0);

        // Corner sees only the 2x2 in-bounds quadrant: weights
        // (4+2+2+1)/16 = 9/16, so 100 * 9/16 = 56.25 -> 56.
        assert_eq!(result[[0, 0, 0]], 56);
        // Edge (non-corner) sees 2x3: (2+4+2+1+2+1)/16 = 12/16 -> 75.
        assert_eq!(result[[0, 2, 0]], 75);
    }

    #[test]
    fn test_sharpen_preserves_uniform_interior_boosts_border() {
        let img = uniform_rgba(5, 5, 100, 255);

        let result = apply_spatial_rgba(img.view(), 0.0, 1.0, 0.0);

        // Sharpen sums to 1 -> interior unchanged.
        assert_eq!(result[[2, 2, 0]], 100);
        // Corner keeps 5 - 2 = 3 of its weight -> 300, clamped.
        assert_eq!(result[[0, 0, 0]], 255);
    }

    #[test]
    fn test_sharpen_amplifies_center_detail() {
        let mut img = uniform_rgba(3, 3, 100, 255);
        img[[1, 1, 0]] = 150;

        let result = apply_spatial_rgba(img.view(), 0.0, 1.0, 0.0);

        // 150*5 - 4*100 = 350 -> clamped
        assert_eq!(result[[1, 1, 0]], 255);
    }

    #[test]
    fn test_kernel_blend_is_elementwise_linear() {
        let combined = blend_kernel(1.0, 1.0, 0.0);
        let blur_only = blend_kernel(1.0, 0.0, 0.0);
        let sharpen_only = blend_kernel(0.0, 1.0, 0.0);

        for i in 0..9 {
            assert!((combined[i] - (blur_only[i] + sharpen_only[i])).abs() < 1e-6);
        }
    }

    #[test]
    fn test_blend_differs_from_sequential_application() {
        // The design choice pinned down: one blended pass is not the same
        // as blur-then-sharpen.
        let mut img = uniform_rgba(5, 5, 100, 255);
        img[[2, 2, 0]] = 200;

        let blended = apply_spatial_rgba(img.view(), 1.0, 1.0, 0.0);

        let blurred = apply_spatial_rgba(img.view(), 1.0, 0.0, 0.0);
        let sequential = apply_spatial_rgba(blurred.view(), 0.0, 1.0, 0.0);

        assert_ne!(blended, sequential);
    }

    #[test]
    fn test_emboss_flat_region_keeps_value() {
        let img = uniform_rgba(5, 5, 100, 255);

        let result = apply_spatial_rgba(img.view(), 0.0, 0.0, 1.0);

        // Emboss kernel sums to 1, so flat interiors pass through.
        assert_eq!(result[[2, 2, 0]], 100);
    }

    #[test]
    fn test_empty_buffer_is_accepted() {
        let img = Array3::<u8>::zeros((0, 0, 4));

        let result = apply_spatial_rgba(img.view(), 1.0, 0.0, 0.0);

        assert_eq!(result.dim(), (0, 0, 4));
    }
}
