//! Easing functions for animation timing.
//!
//! The table is closed: fourteen named curves, each mapping normalized
//! progress in `[0, 1]` to eased progress with `f(0) = 0` and `f(1) = 1`.
//!
//! - `linear`
//! - CSS keywords `ease`, `ease-in`, `ease-out`, `ease-in-out` (evaluated as
//!   their CSS cubic béziers)
//! - `sine`, `cubic` and `quart` families, each with `in`, `out` and `in-out`
//!   variants (evaluated in closed form)
//!
//! Every curve also has a cubic-bézier control-point form
//! ([`Easing::control_points`]) used when emitting CSS.
//!
//! # Usage
//!
//! ```
//! use cadence_motion::easing::Easing;
//!
//! let ease: Easing = "ease-out-cubic".parse().unwrap();
//! let progress = ease.apply(0.5);
//! assert!(progress > 0.5);
//! assert_eq!(ease.css_timing_function(), "cubic-bezier(0.215, 0.61, 0.355, 1)");
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::AnimationError;

/// Precision of the bézier x solver.
const SOLVE_EPSILON: f64 = 1e-7;

/// A named easing curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant speed.
    #[default]
    Linear,
    /// CSS `ease`, `cubic-bezier(0.25, 0.1, 0.25, 1)`.
    Ease,
    /// CSS `ease-in`, `cubic-bezier(0.42, 0, 1, 1)`.
    EaseIn,
    /// CSS `ease-out`, `cubic-bezier(0, 0, 0.58, 1)`.
    EaseOut,
    /// CSS `ease-in-out`, `cubic-bezier(0.42, 0, 0.58, 1)`.
    EaseInOut,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
}

impl Easing {
    /// Every curve in the table, in declaration order.
    pub const ALL: [Easing; 14] = [
        Easing::Linear,
        Easing::Ease,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::EaseInSine,
        Easing::EaseOutSine,
        Easing::EaseInOutSine,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseInQuart,
        Easing::EaseOutQuart,
        Easing::EaseInOutQuart,
    ];

    /// Evaluate the curve at `t`.
    ///
    /// `t` is expected in `[0, 1]`; callers clamp before calling.
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::Ease | Self::EaseIn | Self::EaseOut | Self::EaseInOut => {
                let [x1, y1, x2, y2] = self.control_points();
                cubic_bezier(x1, y1, x2, y2, t)
            }
            Self::EaseInSine => 1.0 - (t * PI / 2.0).cos(),
            Self::EaseOutSine => (t * PI / 2.0).sin(),
            Self::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Self::EaseInCubic => t * t * t,
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Self::EaseInQuart => t * t * t * t,
            Self::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Self::EaseInOutQuart => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
        }
    }

    /// Cubic-bézier control points `[x1, y1, x2, y2]` for this curve.
    ///
    /// This is the CSS-facing representation of the same fourteen curves
    /// that [`Easing::apply`] evaluates numerically.
    pub fn control_points(&self) -> [f64; 4] {
        match self {
            Self::Linear => [0.0, 0.0, 1.0, 1.0],
            Self::Ease => [0.25, 0.1, 0.25, 1.0],
            Self::EaseIn => [0.42, 0.0, 1.0, 1.0],
            Self::EaseOut => [0.0, 0.0, 0.58, 1.0],
            Self::EaseInOut => [0.42, 0.0, 0.58, 1.0],
            Self::EaseInSine => [0.47, 0.0, 0.745, 0.715],
            Self::EaseOutSine => [0.39, 0.575, 0.565, 1.0],
            Self::EaseInOutSine => [0.445, 0.05, 0.55, 0.95],
            Self::EaseInCubic => [0.55, 0.055, 0.675, 0.19],
            Self::EaseOutCubic => [0.215, 0.61, 0.355, 1.0],
            Self::EaseInOutCubic => [0.645, 0.045, 0.355, 1.0],
            Self::EaseInQuart => [0.895, 0.03, 0.685, 0.22],
            Self::EaseOutQuart => [0.165, 0.84, 0.44, 1.0],
            Self::EaseInOutQuart => [0.77, 0.0, 0.175, 1.0],
        }
    }

    /// CSS `cubic-bezier(...)` timing function for this curve.
    pub fn css_timing_function(&self) -> String {
        let [x1, y1, x2, y2] = self.control_points();
        format!("cubic-bezier({}, {}, {}, {})", x1, y1, x2, y2)
    }

    /// Kebab-case name, as used in definitions and config files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Ease => "ease",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
            Self::EaseInSine => "ease-in-sine",
            Self::EaseOutSine => "ease-out-sine",
            Self::EaseInOutSine => "ease-in-out-sine",
            Self::EaseInCubic => "ease-in-cubic",
            Self::EaseOutCubic => "ease-out-cubic",
            Self::EaseInOutCubic => "ease-in-out-cubic",
            Self::EaseInQuart => "ease-in-quart",
            Self::EaseOutQuart => "ease-out-quart",
            Self::EaseInOutQuart => "ease-in-out-quart",
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Easing {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|e| e.name() == needle)
            .ok_or_else(|| AnimationError::UnknownEasing(s.to_string()))
    }
}

/// Evaluate a CSS cubic bézier `(0,0) (x1,y1) (x2,y2) (1,1)` at `progress`.
///
/// Solves for the curve parameter whose x equals `progress`, then returns
/// the y coordinate at that parameter.
pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, progress: f64) -> f64 {
    if progress <= 0.0 {
        return 0.0;
    }
    if progress >= 1.0 {
        return 1.0;
    }

    let t = solve_bezier_x(x1, x2, progress);
    bezier_component(y1, y2, t)
}

/// Newton-Raphson first, bisection when the slope flattens out.
fn solve_bezier_x(x1: f64, x2: f64, target_x: f64) -> f64 {
    let mut t = target_x;
    for _ in 0..8 {
        let x = bezier_component(x1, x2, t) - target_x;
        if x.abs() < SOLVE_EPSILON {
            return t;
        }
        let dx = bezier_derivative(x1, x2, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    let mut lo = 0.0;
    let mut hi = 1.0;
    t = target_x;
    for _ in 0..64 {
        let x = bezier_component(x1, x2, t);
        if (x - target_x).abs() < SOLVE_EPSILON {
            break;
        }
        if target_x > x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) / 2.0;
    }
    t
}

/// One coordinate of the bézier at parameter t.
/// B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_component(p1: f64, p2: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;

    3.0 * mt2 * t * p1 + 3.0 * mt * t2 * p2 + t3
}

/// dB/dt = 3(1-t)²·p1 + 6(1-t)t·(p2-p1) + 3t²·(1-p2)
#[inline]
fn bezier_derivative(p1: f64, p2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 0.001;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_endpoints_for_every_curve() {
        for easing in Easing::ALL {
            assert!(approx_eq(easing.apply(0.0), 0.0), "{} f(0) = {}", easing, easing.apply(0.0));
            assert!(approx_eq(easing.apply(1.0), 1.0), "{} f(1) = {}", easing, easing.apply(1.0));
        }
    }

    #[test]
    fn test_every_curve_is_monotonic() {
        for easing in Easing::ALL {
            let mut previous = easing.apply(0.0);
            for step in 1..=200 {
                let value = easing.apply(step as f64 / 200.0);
                assert!(
                    value >= previous - 1e-5,
                    "{} decreased at step {}: {} -> {}",
                    easing,
                    step,
                    previous,
                    value
                );
                previous = value;
            }
        }
    }

    #[test]
    fn test_linear() {
        let ease = Easing::Linear;
        assert!(approx_eq(ease.apply(0.25), 0.25));
        assert!(approx_eq(ease.apply(0.5), 0.5));
        assert!(approx_eq(ease.apply(0.75), 0.75));
    }

    #[test]
    fn test_css_ease_shape() {
        // CSS ease climbs fast: ~0.8 at the midpoint
        let mid = Easing::Ease.apply(0.5);
        assert!(mid > 0.7 && mid < 0.9, "CSS ease mid-point should be ~0.8, got {}", mid);
    }

    #[test]
    fn test_in_and_out_shapes() {
        assert!(Easing::EaseIn.apply(0.25) < 0.25);
        assert!(Easing::EaseOut.apply(0.25) > 0.25);
        assert!(Easing::EaseInCubic.apply(0.5) < 0.5);
        assert!(Easing::EaseOutQuart.apply(0.5) > 0.5);
        assert!(approx_eq(Easing::EaseInCubic.apply(0.5), 0.125));
        assert!(approx_eq(Easing::EaseOutCubic.apply(0.5), 0.875));
        assert!(approx_eq(Easing::EaseInQuart.apply(0.5), 0.0625));
    }

    #[test]
    fn test_in_out_symmetry() {
        for easing in [
            Easing::EaseInOut,
            Easing::EaseInOutSine,
            Easing::EaseInOutCubic,
            Easing::EaseInOutQuart,
        ] {
            assert!(approx_eq(easing.apply(0.5), 0.5), "{} midpoint", easing);
            let early = easing.apply(0.25);
            let late = easing.apply(0.75);
            assert!(approx_eq(early + late, 1.0), "{} symmetry", easing);
        }
    }

    #[test]
    fn test_control_point_table_matches_numeric_table() {
        for easing in Easing::ALL {
            let [x1, y1, x2, y2] = easing.control_points();
            for step in 0..=20 {
                let t = step as f64 / 20.0;
                let numeric = easing.apply(t);
                let css = cubic_bezier(x1, y1, x2, y2, t);
                assert!(
                    (numeric - css).abs() < 0.1,
                    "{} drifted at t={}: numeric {} vs css {}",
                    easing,
                    t,
                    numeric,
                    css
                );
            }
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("linear".parse::<Easing>().unwrap(), Easing::Linear);
        assert_eq!("ease".parse::<Easing>().unwrap(), Easing::Ease);
        assert_eq!("ease-in-out".parse::<Easing>().unwrap(), Easing::EaseInOut);
        assert_eq!("ease-out-sine".parse::<Easing>().unwrap(), Easing::EaseOutSine);
        assert_eq!(" ease-in-quart ".parse::<Easing>().unwrap(), Easing::EaseInQuart);
        for easing in Easing::ALL {
            assert_eq!(easing.name().parse::<Easing>().unwrap(), easing);
        }
    }

    #[test]
    fn test_unknown_name_fails_lookup() {
        assert_eq!(
            "bouncy".parse::<Easing>(),
            Err(AnimationError::UnknownEasing("bouncy".to_string()))
        );
    }

    #[test]
    fn test_serde_uses_kebab_names() {
        let json = serde_json::to_string(&Easing::EaseInOutCubic).unwrap();
        assert_eq!(json, "\"ease-in-out-cubic\"");
        let parsed: Easing = serde_json::from_str("\"ease-out\"").unwrap();
        assert_eq!(parsed, Easing::EaseOut);
    }

    #[test]
    fn test_css_timing_function() {
        assert_eq!(Easing::Linear.css_timing_function(), "cubic-bezier(0, 0, 1, 1)");
        assert_eq!(Easing::Ease.css_timing_function(), "cubic-bezier(0.25, 0.1, 0.25, 1)");
    }

    #[test]
    fn test_default() {
        assert_eq!(Easing::default(), Easing::Linear);
    }
}
