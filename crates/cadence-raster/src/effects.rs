//! Pixel-level effects on RGBA buffers.
//!
//! | Effect | In place | Sampling |
//! |--------|----------|----------|
//! | `pixelate` | yes | top-left pixel of each block, alpha kept |
//! | `wave` | no | per-row horizontal shift, out-of-range stays transparent |
//! | `box_blur` | no | square mean over in-bounds neighbors |

use image::{Rgba, RgbaImage};

use crate::error::{RasterError, Result};

/// Wrap raw RGBA bytes as an image.
pub fn buffer_from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<RgbaImage> {
    let expected = width as usize * height as usize * 4;
    let actual = data.len();
    let mismatch = RasterError::BufferSize {
        width,
        height,
        expected,
        actual,
    };

    if actual != expected {
        return Err(mismatch);
    }
    RgbaImage::from_raw(width, height, data).ok_or(mismatch)
}

/// Replace each `block x block` tile with the RGB of its top-left pixel.
///
/// Alpha is left untouched. A block size of 0 or 1 leaves the image as is.
pub fn pixelate(image: &mut RgbaImage, block: u32) {
    if block <= 1 {
        return;
    }
    let (width, height) = image.dimensions();

    for block_y in (0..height).step_by(block as usize) {
        for block_x in (0..width).step_by(block as usize) {
            let Rgba([r, g, b, _]) = *image.get_pixel(block_x, block_y);

            for y in block_y..block_y.saturating_add(block).min(height) {
                for x in block_x..block_x.saturating_add(block).min(width) {
                    let pixel = image.get_pixel_mut(x, y);
                    pixel.0[0] = r;
                    pixel.0[1] = g;
                    pixel.0[2] = b;
                }
            }
        }
    }
}

/// Shift each row horizontally by `intensity * sin((y + time) / 10)`.
///
/// Output pixels whose source falls outside the row are transparent black.
pub fn wave(image: &RgbaImage, intensity: f64, time: f64) -> RgbaImage {
    let (width, height) = image.dimensions();
    let mut output = RgbaImage::new(width, height);

    for y in 0..height {
        let offset = intensity * ((y as f64 + time) / 10.0).sin();
        for x in 0..width {
            let source_x = (x as f64 + offset).floor();
            if source_x >= 0.0 && source_x < width as f64 {
                output.put_pixel(x, y, *image.get_pixel(source_x as u32, y));
            }
        }
    }

    output
}

/// Box blur with a `(2 * radius + 1)` square kernel.
///
/// Each channel is averaged over the neighbors that lie inside the image, so
/// edges are not darkened. Averages are rounded to nearest.
pub fn box_blur(image: &RgbaImage, radius: u32) -> RgbaImage {
    if radius == 0 {
        return image.clone();
    }
    let (width, height) = image.dimensions();
    let mut output = RgbaImage::new(width, height);
    let r = radius as i64;

    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let mut sum = [0u64; 4];
            let mut count = 0u64;

            for sy in (y - r).max(0)..=(y + r).min(height as i64 - 1) {
                for sx in (x - r).max(0)..=(x + r).min(width as i64 - 1) {
                    let Rgba(channels) = image.get_pixel(sx as u32, sy as u32);
                    for (total, value) in sum.iter_mut().zip(channels) {
                        *total += *value as u64;
                    }
                    count += 1;
                }
            }

            let average = sum.map(|total| ((total + count / 2) / count) as u8);
            output.put_pixel(x as u32, y as u32, Rgba(average));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pixels: &[[u8; 4]]) -> RgbaImage {
        let data = pixels.iter().flatten().copied().collect();
        buffer_from_raw(pixels.len() as u32, 1, data).unwrap()
    }

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 20) as u8, (y * 20) as u8, ((x + y) * 7) as u8, 200 + x as u8])
        })
    }

    #[test]
    fn test_buffer_from_raw_checks_length() {
        assert!(buffer_from_raw(2, 2, vec![0; 16]).is_ok());
        assert_eq!(
            buffer_from_raw(2, 2, vec![0; 15]),
            Err(RasterError::BufferSize {
                width: 2,
                height: 2,
                expected: 16,
                actual: 15,
            })
        );
    }

    #[test]
    fn test_pixelate_block_of_one_is_identity() {
        let original = gradient(7, 5);
        for block in [0, 1] {
            let mut image = original.clone();
            pixelate(&mut image, block);
            assert_eq!(image, original);
        }
    }

    #[test]
    fn test_pixelate_samples_top_left_and_keeps_alpha() {
        let original = gradient(5, 5);
        let mut image = original.clone();
        pixelate(&mut image, 2);

        for (x, y, pixel) in image.enumerate_pixels() {
            let anchor = original.get_pixel(x - x % 2, y - y % 2);
            assert_eq!(&pixel.0[..3], &anchor.0[..3], "at {},{}", x, y);
            assert_eq!(pixel.0[3], original.get_pixel(x, y).0[3]);
        }
    }

    #[test]
    fn test_pixelate_block_larger_than_image() {
        let original = gradient(3, 2);
        let mut image = original.clone();
        pixelate(&mut image, 16);

        let anchor = original.get_pixel(0, 0);
        assert!(image.pixels().all(|p| p.0[..3] == anchor.0[..3]));
    }

    #[test]
    fn test_pixelate_huge_block_only_visits_image() {
        let original = gradient(2, 2);
        let mut image = original.clone();
        pixelate(&mut image, u32::MAX);

        let anchor = original.get_pixel(0, 0);
        assert!(image.pixels().all(|p| p.0[..3] == anchor.0[..3]));
        assert_eq!(image.get_pixel(1, 1).0[3], original.get_pixel(1, 1).0[3]);
    }

    #[test]
    fn test_wave_zero_intensity_is_copy() {
        let original = gradient(6, 4);
        assert_eq!(wave(&original, 0.0, 12.0), original);
    }

    #[test]
    fn test_wave_shifts_rows_and_leaves_gaps_transparent() {
        let a = [10, 0, 0, 255];
        let b = [20, 0, 0, 255];
        let c = [30, 0, 0, 255];
        let d = [40, 0, 0, 255];
        let clear = [0, 0, 0, 0];
        let source = row(&[a, b, c, d]);

        // sin(pi / 2) = 1: sample one pixel to the right
        let shifted = wave(&source, 1.5, 5.0 * std::f64::consts::PI);
        assert_eq!(shifted, row(&[b, c, d, clear]));

        // sin(3 pi / 2) = -1: floor(x - 1.5) samples two pixels to the left
        let shifted = wave(&source, 1.5, 15.0 * std::f64::consts::PI);
        assert_eq!(shifted, row(&[clear, clear, a, b]));
    }

    #[test]
    fn test_box_blur_uniform_is_unchanged() {
        let uniform = RgbaImage::from_pixel(9, 6, Rgba([40, 80, 120, 255]));
        for radius in [0, 1, 2, 3, 5, 8, 20] {
            assert_eq!(box_blur(&uniform, radius), uniform, "radius {}", radius);
        }
    }

    #[test]
    fn test_box_blur_radius_zero_is_copy() {
        let original = gradient(4, 4);
        assert_eq!(box_blur(&original, 0), original);
    }

    #[test]
    fn test_box_blur_divides_by_in_bounds_count() {
        let source = row(&[[0, 0, 0, 0], [90, 90, 90, 90], [180, 180, 180, 180]]);
        let blurred = box_blur(&source, 1);
        assert_eq!(
            blurred,
            row(&[[45, 45, 45, 45], [90, 90, 90, 90], [135, 135, 135, 135]])
        );
    }

    #[test]
    fn test_box_blur_rounds_to_nearest() {
        let source = row(&[[0, 0, 0, 0], [1, 2, 3, 4]]);
        let blurred = box_blur(&source, 1);
        // Means 0.5, 1, 1.5, 2
        assert_eq!(blurred, row(&[[1, 1, 2, 2], [1, 1, 2, 2]]));
    }
}
