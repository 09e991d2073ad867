//! Raster frames for the pixel-backed catalog transitions.

use cadence_motion::{TransitionConfig, TransitionDirection, TransitionKind};
use image::RgbaImage;
use log::trace;

use crate::effects::{box_blur, pixelate, wave};

/// Blur radius at intensity 100, in pixels.
pub const MAX_BLUR_RADIUS: f64 = 12.0;
/// Pixel block size at intensity 100.
pub const MAX_PIXEL_BLOCK: f64 = 32.0;
/// Wave amplitude at intensity 100, in pixels.
pub const MAX_WAVE_AMPLITUDE: f64 = 24.0;

/// Effect strength in `[0, 1]` at `progress`.
///
/// Entering transitions start at full strength and settle to none; exiting
/// ones do the reverse.
pub fn effect_strength(config: &TransitionConfig, direction: TransitionDirection, progress: f64) -> f64 {
    let eased = config.easing.apply(progress.clamp(0.0, 1.0));
    match direction {
        TransitionDirection::In => 1.0 - eased,
        TransitionDirection::Out => eased,
    }
}

/// Render one frame of a `blur`, `pixelate` or `wave` transition.
///
/// Returns `None` for kinds without a raster effect. `time` only affects the
/// wave phase.
pub fn transition_frame(
    source: &RgbaImage,
    config: &TransitionConfig,
    direction: TransitionDirection,
    progress: f64,
    time: f64,
) -> Option<RgbaImage> {
    let scale = config.intensity() / 100.0 * effect_strength(config, direction, progress);

    let frame = match config.kind {
        TransitionKind::Blur => {
            let radius = (MAX_BLUR_RADIUS * scale).round() as u32;
            trace!("blur radius {}", radius);
            box_blur(source, radius)
        }
        TransitionKind::Pixelate => {
            let block = (MAX_PIXEL_BLOCK * scale).round() as u32;
            trace!("pixel block {}", block);
            let mut frame = source.clone();
            pixelate(&mut frame, block);
            frame
        }
        TransitionKind::Wave => {
            let amplitude = MAX_WAVE_AMPLITUDE * scale;
            trace!("wave amplitude {:.2}", amplitude);
            wave(source, amplitude, time)
        }
        _ => return None,
    };

    Some(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_motion::Easing;
    use image::Rgba;

    fn checkerboard() -> RgbaImage {
        RgbaImage::from_fn(16, 16, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        })
    }

    #[test]
    fn test_non_raster_kinds_return_none() {
        let source = checkerboard();
        for kind in TransitionKind::ALL.into_iter().filter(|k| !k.is_raster()) {
            let config = TransitionConfig::new(kind, 300.0);
            assert!(transition_frame(&source, &config, TransitionDirection::In, 0.5, 0.0).is_none());
        }
    }

    #[test]
    fn test_strength_follows_direction() {
        let config = TransitionConfig::new(TransitionKind::Blur, 300.0);
        assert_eq!(effect_strength(&config, TransitionDirection::In, 0.0), 1.0);
        assert_eq!(effect_strength(&config, TransitionDirection::In, 1.0), 0.0);
        assert_eq!(effect_strength(&config, TransitionDirection::Out, 0.25), 0.25);
        assert_eq!(effect_strength(&config, TransitionDirection::Out, 7.0), 1.0);

        let eased = config.with_easing(Easing::EaseInQuart);
        assert!(effect_strength(&eased, TransitionDirection::Out, 0.5) < 0.5);
    }

    #[test]
    fn test_settled_frames_match_source() {
        let source = checkerboard();
        for kind in [TransitionKind::Blur, TransitionKind::Pixelate, TransitionKind::Wave] {
            let config = TransitionConfig::new(kind, 300.0).with_intensity(100.0);
            let entered = transition_frame(&source, &config, TransitionDirection::In, 1.0, 3.0).unwrap();
            assert_eq!(entered, source, "{}", kind);
            let leaving = transition_frame(&source, &config, TransitionDirection::Out, 0.0, 3.0).unwrap();
            assert_eq!(leaving, source, "{}", kind);
        }
    }

    #[test]
    fn test_full_strength_blur_flattens_checkerboard() {
        let source = checkerboard();
        let config = TransitionConfig::new(TransitionKind::Blur, 300.0).with_intensity(100.0);
        let frame = transition_frame(&source, &config, TransitionDirection::Out, 1.0, 0.0).unwrap();

        let center = frame.get_pixel(8, 8).0[0];
        assert!((120..=135).contains(&center), "center {}", center);
    }

    #[test]
    fn test_zero_intensity_is_identity() {
        let source = checkerboard();
        for kind in [TransitionKind::Blur, TransitionKind::Pixelate, TransitionKind::Wave] {
            let config = TransitionConfig::new(kind, 300.0).with_intensity(0.0);
            let frame = transition_frame(&source, &config, TransitionDirection::In, 0.0, 5.0).unwrap();
            assert_eq!(frame, source);
        }
    }
}
