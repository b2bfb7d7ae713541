//! Crop extraction.
//!
//! Pulls a sub-rectangle of the source buffer into a fresh buffer. The
//! region comes from the editor's crop tool in one of two encodings,
//! resolved by magnitude (see [`CropRegion`]).

use ndarray::{Array3, ArrayView3};
use serde::{Deserialize, Serialize};

/// Rectangle selection from the crop step.
///
/// Two encodings share this struct:
/// - **Ratio mode**: when both `width` and `height` are <= 1, all four
///   fields are fractions of the source dimensions.
/// - **Absolute mode**: otherwise, all four fields are pixel values.
///
/// The mode is inferred, never stored. A deliberate consequence: an
/// absolute one-pixel crop (`width: 1, height: 1`) parses as ratio mode
/// and selects the full image. Known edge case of the encoding, kept
/// as-is rather than papered over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CropRegion {
    /// True when the fields are fractions of the source size.
    pub fn is_ratio(&self) -> bool {
        self.width <= 1.0 && self.height <= 1.0
    }

    /// Resolve to pixel coordinates `(x, y, width, height)` against a
    /// source of the given size. Values round to the nearest integer and
    /// may lie outside the source, or be non-positive; the caller decides
    /// what out-of-range means.
    pub fn resolve(&self, source_width: usize, source_height: usize) -> (i64, i64, i64, i64) {
        if self.is_ratio() {
            (
                (self.x * source_width as f32).round() as i64,
                (self.y * source_height as f32).round() as i64,
                (self.width * source_width as f32).round() as i64,
                (self.height * source_height as f32).round() as i64,
            )
        } else {
            (
                self.x.round() as i64,
                self.y.round() as i64,
                self.width.round() as i64,
                self.height.round() as i64,
            )
        }
    }
}

/// Extract a crop region into a new buffer.
///
/// With no region the full source is copied. Pixels requested outside the
/// source bounds read as transparent black `(0,0,0,0)`; a zero- or
/// negative-area region yields a `0x0` buffer rather than an error, and
/// downstream stages accept `0x0` as a valid no-op input.
///
/// # Arguments
/// * `input` - Source image (height, width, 4) RGBA
/// * `region` - Optional crop rectangle, ratio or absolute
///
/// # Returns
/// Owned buffer of the resolved region size
pub fn crop_rgba(input: ArrayView3<u8>, region: Option<&CropRegion>) -> Array3<u8> {
    let (height, width, channels) = input.dim();

    let Some(region) = region else {
        return input.to_owned();
    };

    let (x, y, crop_width, crop_height) = region.resolve(width, height);
    if crop_width <= 0 || crop_height <= 0 {
        return Array3::zeros((0, 0, channels));
    }

    let out_width = crop_width as usize;
    let out_height = crop_height as usize;
    let mut output = Array3::<u8>::zeros((out_height, out_width, channels));

    for dy in 0..out_height {
        let sy = y + dy as i64;
        if sy < 0 || sy >= height as i64 {
            continue;
        }
        for dx in 0..out_width {
            let sx = x + dx as i64;
            if sx < 0 || sx >= width as i64 {
                continue;
            }
            for c in 0..channels {
                output[[dy, dx, c]] = input[[sy as usize, sx as usize, c]];
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_rgba(height: usize, width: usize) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((height, width, 4));
        for y in 0..height {
            for x in 0..width {
                img[[y, x, 0]] = ((x * 7 + y * 13) % 256) as u8;
                img[[y, x, 1]] = ((x * 3 + y * 5) % 256) as u8;
                img[[y, x, 2]] = ((x + y) % 256) as u8;
                img[[y, x, 3]] = 255;
            }
        }
        img
    }

    #[test]
    fn test_no_region_copies_source() {
        let img = gradient_rgba(4, 6);

        let result = crop_rgba(img.view(), None);

        assert_eq!(result.dim(), (4, 6, 4));
        assert_eq!(result, img);
    }

    #[test]
    fn test_ratio_equals_absolute() {
        let img = gradient_rgba(100, 100);

        let ratio = CropRegion {
            x: 0.25,
            y: 0.25,
            width: 0.5,
            height: 0.5,
        };
        let absolute = CropRegion {
            x: 25.0,
            y: 25.0,
            width: 50.0,
            height: 50.0,
        };

        let a = crop_rgba(img.view(), Some(&ratio));
        let b = crop_rgba(img.view(), Some(&absolute));

        assert_eq!(a.dim(), (50, 50, 4));
        assert_eq!(a, b);
    }

    #[test]
    fn test_absolute_offset_samples_source() {
        let img = gradient_rgba(10, 10);
        let region = CropRegion {
            x: 3.0,
            y: 2.0,
            width: 4.0,
            height: 5.0,
        };

        let result = crop_rgba(img.view(), Some(&region));

        assert_eq!(result.dim(), (5, 4, 4));
        for dy in 0..5 {
            for dx in 0..4 {
                for c in 0..4 {
                    assert_eq!(result[[dy, dx, c]], img[[dy + 2, dx + 3, c]]);
                }
            }
        }
    }

    #[test]
    fn test_out_of_bounds_reads_transparent_black() {
        let img = gradient_rgba(4, 4);
        // Extends two pixels past the right and bottom edges.
        let region = CropRegion {
            x: 2.0,
            y: 2.0,
            width: 4.0,
            height: 4.0,
        };

        let result = crop_rgba(img.view(), Some(&region));

        assert_eq!(result.dim(), (4, 4, 4));
        // In-bounds corner still maps to the source.
        assert_eq!(result[[0, 0, 0]], img[[2, 2, 0]]);
        // Out-of-bounds area is fully transparent black.
        for c in 0..4 {
            assert_eq!(result[[3, 3, c]], 0);
            assert_eq!(result[[0, 3, c]], 0);
        }
    }

    #[test]
    fn test_negative_origin_reads_transparent_black() {
        let img = gradient_rgba(4, 4);
        let region = CropRegion {
            x: -2.0,
            y: -2.0,
            width: 4.0,
            height: 4.0,
        };

        let result = crop_rgba(img.view(), Some(&region));

        assert_eq!(result.dim(), (4, 4, 4));
        assert_eq!(result[[0, 0, 3]], 0);
        assert_eq!(result[[2, 2, 0]], img[[0, 0, 0]]);
    }

    #[test]
    fn test_zero_area_yields_empty_buffer() {
        let img = gradient_rgba(4, 4);
        let region = CropRegion {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
        };

        let result = crop_rgba(img.view(), Some(&region));

        assert_eq!(result.dim(), (0, 0, 4));
    }

    #[test]
    fn test_one_pixel_absolute_parses_as_ratio() {
        // Documented ambiguity: width=1, height=1 is ratio mode and selects
        // the whole image, not a single pixel.
        let img = gradient_rgba(8, 8);
        let region = CropRegion {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
        };

        assert!(region.is_ratio());
        let result = crop_rgba(img.view(), Some(&region));
        assert_eq!(result.dim(), (8, 8, 4));
    }

    #[test]
    fn test_region_serde_round_trip() {
        let region = CropRegion {
            x: 0.25,
            y: 0.1,
            width: 0.5,
            height: 0.75,
        };

        let json = serde_json::to_string(&region).unwrap();
        let back: CropRegion = serde_json::from_str(&json).unwrap();

        assert_eq!(region, back);
    }
}
