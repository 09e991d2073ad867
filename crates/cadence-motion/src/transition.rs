//! Catalog of named enter/exit transitions.
//!
//! This module provides:
//! - `TransitionKind`: the 16 catalog transitions
//! - `TransitionDirection`: enter (`in`) or exit (`out`)
//! - `TransitionConfig`: kind, duration, easing and optional direction/intensity
//! - `TransitionRecipe`: the declarative keyframe steps behind each kind
//! - `generate_css_animation`: the CSS `animation` shorthand for a config
//!
//! Recipes are static tables. They can be rendered as `@keyframes` blocks or
//! converted into an [`AnimationDefinition`] and played by an engine.
//!
//! # Example
//!
//! ```
//! use cadence_motion::{Easing, TransitionConfig, TransitionDirection, TransitionKind};
//! use cadence_motion::transition::generate_css_animation;
//!
//! let config = TransitionConfig::new(TransitionKind::SlideUp, 300.0).with_easing(Easing::EaseOut);
//! assert_eq!(
//!     generate_css_animation(&config, TransitionDirection::In),
//!     "slide-up-in 300ms cubic-bezier(0, 0, 0.58, 1) forwards"
//! );
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use crate::keyframes::{AnimationDefinition, AnimationKeyframe};
use crate::property::{PropertyMap, StyleProperty};
use crate::style::{StyleUnits, create_transform_string, format_number};

/// Catalog transition kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionKind {
    Fade,
    SlideUp,
    SlideDown,
    SlideLeft,
    SlideRight,
    ZoomIn,
    ZoomOut,
    Rotate,
    Flip,
    ScaleBounce,
    Blur,
    Pixelate,
    Wave,
    Curtain,
    Vignette,
    Morph,
}

impl TransitionKind {
    pub const ALL: [TransitionKind; 16] = [
        TransitionKind::Fade,
        TransitionKind::SlideUp,
        TransitionKind::SlideDown,
        TransitionKind::SlideLeft,
        TransitionKind::SlideRight,
        TransitionKind::ZoomIn,
        TransitionKind::ZoomOut,
        TransitionKind::Rotate,
        TransitionKind::Flip,
        TransitionKind::ScaleBounce,
        TransitionKind::Blur,
        TransitionKind::Pixelate,
        TransitionKind::Wave,
        TransitionKind::Curtain,
        TransitionKind::Vignette,
        TransitionKind::Morph,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fade => "fade",
            Self::SlideUp => "slide-up",
            Self::SlideDown => "slide-down",
            Self::SlideLeft => "slide-left",
            Self::SlideRight => "slide-right",
            Self::ZoomIn => "zoom-in",
            Self::ZoomOut => "zoom-out",
            Self::Rotate => "rotate",
            Self::Flip => "flip",
            Self::ScaleBounce => "scale-bounce",
            Self::Blur => "blur",
            Self::Pixelate => "pixelate",
            Self::Wave => "wave",
            Self::Curtain => "curtain",
            Self::Vignette => "vignette",
            Self::Morph => "morph",
        }
    }

    /// One-line human description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Fade => "Smoothly fades content in or out",
            Self::SlideUp => "Slides content in from below and out through the top",
            Self::SlideDown => "Slides content in from above and out through the bottom",
            Self::SlideLeft => "Slides content in from the right and out to the left",
            Self::SlideRight => "Slides content in from the left and out to the right",
            Self::ZoomIn => "Grows content from a smaller scale while fading in",
            Self::ZoomOut => "Shrinks content from a larger scale while fading in",
            Self::Rotate => "Spins content into place while scaling up",
            Self::Flip => "Flips content around its vertical axis like a card",
            Self::ScaleBounce => "Pops content in with an elastic overshoot",
            Self::Blur => "Brings content into focus from a heavy blur",
            Self::Pixelate => "Resolves content from coarse pixel blocks",
            Self::Wave => "Ripples content into place with a horizontal wave",
            Self::Curtain => "Unrolls content vertically like a curtain",
            Self::Vignette => "Lifts content out of darkness",
            Self::Morph => "Morphs content into shape with blur, scale and rotation",
        }
    }

    /// Kinds whose pixel effect is rendered by the raster crate.
    pub fn is_raster(&self) -> bool {
        matches!(self, Self::Blur | Self::Pixelate | Self::Wave)
    }

    /// Static keyframe recipe for this kind.
    pub fn recipe(&self) -> &'static TransitionRecipe {
        match self {
            Self::Fade => &FADE,
            Self::SlideUp => &SLIDE_UP,
            Self::SlideDown => &SLIDE_DOWN,
            Self::SlideLeft => &SLIDE_LEFT,
            Self::SlideRight => &SLIDE_RIGHT,
            Self::ZoomIn => &ZOOM_IN,
            Self::ZoomOut => &ZOOM_OUT,
            Self::Rotate => &ROTATE,
            Self::Flip => &FLIP,
            Self::ScaleBounce => &SCALE_BOUNCE,
            Self::Blur => &BLUR,
            Self::Pixelate => &PIXELATE,
            Self::Wave => &WAVE,
            Self::Curtain => &CURTAIN,
            Self::Vignette => &VIGNETTE,
            Self::Morph => &MORPH,
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransitionKind {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == needle)
            .ok_or_else(|| AnimationError::UnknownTransition(s.to_string()))
    }
}

/// Whether a transition brings content in or takes it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionDirection {
    #[default]
    In,
    Out,
}

impl TransitionDirection {
    pub fn name(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

impl fmt::Display for TransitionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransitionDirection {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            other => Err(AnimationError::Parse(format!(
                "unknown transition direction '{}', expected 'in' or 'out'",
                other
            ))),
        }
    }
}

/// Configuration of one transition run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionConfig {
    #[serde(rename = "type")]
    pub kind: TransitionKind,
    /// Duration in milliseconds.
    pub duration: f64,
    #[serde(default)]
    pub easing: Easing,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<TransitionDirection>,
    /// Effect strength, 0 to 100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f64>,
}

impl TransitionConfig {
    pub const DEFAULT_INTENSITY: f64 = 50.0;

    pub fn new(kind: TransitionKind, duration: f64) -> Self {
        Self {
            kind,
            duration,
            easing: Easing::default(),
            direction: None,
            intensity: None,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_direction(mut self, direction: TransitionDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = Some(intensity);
        self
    }

    /// Configured direction, `in` when unset.
    pub fn direction(&self) -> TransitionDirection {
        self.direction.unwrap_or_default()
    }

    /// Intensity clamped to `[0, 100]`, `50` when unset.
    pub fn intensity(&self) -> f64 {
        self.intensity
            .filter(|v| v.is_finite())
            .unwrap_or(Self::DEFAULT_INTENSITY)
            .clamp(0.0, 100.0)
    }
}

/// Build the CSS `animation` shorthand for a transition.
///
/// Format: `<kind>-<direction> <duration>ms cubic-bezier(x1, y1, x2, y2) forwards`.
pub fn generate_css_animation(config: &TransitionConfig, direction: TransitionDirection) -> String {
    format!(
        "{}-{} {}ms {} forwards",
        config.kind.name(),
        direction.name(),
        format_number(config.duration),
        config.easing.css_timing_function()
    )
}

/// One step of a recipe: style values at a fractional offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyframeStep {
    /// Position in `[0, 1]`.
    pub offset: f64,
    pub values: &'static [(StyleProperty, f64)],
}

impl KeyframeStep {
    /// Values as a property map.
    pub fn properties(&self) -> PropertyMap {
        self.values
            .iter()
            .map(|(property, value)| ((*property).into(), *value))
            .collect()
    }
}

/// Declarative enter/exit keyframes for a transition kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionRecipe {
    pub kind: TransitionKind,
    pub enter: &'static [KeyframeStep],
    pub exit: Option<&'static [KeyframeStep]>,
}

impl TransitionRecipe {
    /// Steps for a direction.
    pub fn steps(&self, direction: TransitionDirection) -> Result<&'static [KeyframeStep]> {
        match direction {
            TransitionDirection::In => Ok(self.enter),
            TransitionDirection::Out => self
                .exit
                .ok_or_else(|| AnimationError::MissingExitRecipe(self.kind.name().to_string())),
        }
    }

    /// Render an `@keyframes <kind>-<direction>` block.
    pub fn to_css_keyframes(&self, direction: TransitionDirection, units: &StyleUnits) -> Result<String> {
        let steps = self.steps(direction)?;
        let mut css = format!("@keyframes {}-{} {{\n", self.kind.name(), direction.name());

        for step in steps {
            let mut style = create_transform_string(&step.properties(), units);
            if !step.values.iter().any(|(p, _)| *p == StyleProperty::Opacity) {
                // Leave opacity to the surrounding keyframes
                style.opacity.clear();
            }
            css.push_str(&format!(
                "  {}% {{ {} }}\n",
                format_number(step.offset * 100.0),
                style.to_css_declarations()
            ));
        }

        css.push('}');
        Ok(css)
    }

    /// Convert into a playable definition.
    ///
    /// Keyframe times are `offset * duration`; every keyframe after the first
    /// is approached with the config's easing.
    pub fn to_definition(
        &self,
        config: &TransitionConfig,
        direction: TransitionDirection,
    ) -> Result<AnimationDefinition> {
        let steps = self.steps(direction)?;
        let id = format!("{}-{}", self.kind.name(), direction.name());

        let mut definition = AnimationDefinition::new(id.clone(), self.kind.description(), config.duration);
        for (index, step) in steps.iter().enumerate() {
            let easing = if index == 0 { Easing::Linear } else { config.easing };
            let mut keyframe = AnimationKeyframe::new(
                format!("{}-{}", id, format_number(step.offset * 100.0)),
                step.offset * config.duration,
            )
            .with_easing(easing);
            keyframe.properties = step.properties();
            definition = definition.keyframe(keyframe);
        }

        definition.validate()?;
        Ok(definition)
    }
}

macro_rules! step {
    ($offset:expr, [$(($property:ident, $value:expr)),* $(,)?]) => {
        KeyframeStep {
            offset: $offset,
            values: &[$((StyleProperty::$property, $value)),*],
        }
    };
}

static FADE: TransitionRecipe = TransitionRecipe {
    kind: TransitionKind::Fade,
    enter: &[step!(0.0, [(Opacity, 0.0)]), step!(1.0, [(Opacity, 1.0)])],
    exit: Some(&[step!(0.0, [(Opacity, 1.0)]), step!(1.0, [(Opacity, 0.0)])]),
};

static SLIDE_UP: TransitionRecipe = TransitionRecipe {
    kind: TransitionKind::SlideUp,
    enter: &[
        step!(0.0, [(TranslateY, 100.0), (Opacity, 0.0)]),
        step!(1.0, [(TranslateY, 0.0), (Opacity, 1.0)]),
    ],
    exit: Some(&[
        step!(0.0, [(TranslateY, 0.0), (Opacity, 1.0)]),
        step!(1.0, [(TranslateY, -100.0), (Opacity, 0.0)]),
    ]),
};

static SLIDE_DOWN: TransitionRecipe = TransitionRecipe {
    kind: TransitionKind::SlideDown,
    enter: &[
        step!(0.0, [(TranslateY, -100.0), (Opacity, 0.0)]),
        step!(1.0, [(TranslateY, 0.0), (Opacity, 1.0)]),
    ],
    exit: Some(&[
        step!(0.0, [(TranslateY, 0.0), (Opacity, 1.0)]),
        step!(1.0, [(TranslateY, 100.0), (Opacity, 0.0)]),
    ]),
};

static SLIDE_LEFT: TransitionRecipe = TransitionRecipe {
    kind: TransitionKind::SlideLeft,
    enter: &[
        step!(0.0, [(TranslateX, 100.0), (Opacity, 0.0)]),
        step!(1.0, [(TranslateX, 0.0), (Opacity, 1.0)]),
    ],
    exit: Some(&[
        step!(0.0, [(TranslateX, 0.0), (Opacity, 1.0)]),
        step!(1.0, [(TranslateX, -100.0), (Opacity, 0.0)]),
    ]),
};

static SLIDE_RIGHT: TransitionRecipe = TransitionRecipe {
    kind: TransitionKind::SlideRight,
    enter: &[
        step!(0.0, [(TranslateX, -100.0), (Opacity, 0.0)]),
        step!(1.0, [(TranslateX, 0.0), (Opacity, 1.0)]),
    ],
    exit: Some(&[
        step!(0.0, [(TranslateX, 0.0), (Opacity, 1.0)]),
        step!(1.0, [(TranslateX, 100.0), (Opacity, 0.0)]),
    ]),
};

static ZOOM_IN: TransitionRecipe = TransitionRecipe {
    kind: TransitionKind::ZoomIn,
    enter: &[
        step!(0.0, [(Scale, 0.5), (Opacity, 0.0)]),
        step!(1.0, [(Scale, 1.0), (Opacity, 1.0)]),
    ],
    exit: Some(&[
        step!(0.0, [(Scale, 1.0), (Opacity, 1.0)]),
        step!(1.0, [(Scale, 1.5), (Opacity, 0.0)]),
    ]),
};

static ZOOM_OUT: TransitionRecipe = TransitionRecipe {
    kind: TransitionKind::ZoomOut,
    enter: &[
        step!(0.0, [(Scale, 1.5), (Opacity, 0.0)]),
        step!(1.0, [(Scale, 1.0), (Opacity, 1.0)]),
    ],
    exit: Some(&[
        step!(0.0, [(Scale, 1.0), (Opacity, 1.0)]),
        step!(1.0, [(Scale, 0.5), (Opacity, 0.0)]),
    ]),
};

static ROTATE: TransitionRecipe = TransitionRecipe {
    kind: TransitionKind::Rotate,
    enter: &[
        step!(0.0, [(Scale, 0.5), (Rotate, -180.0), (Opacity, 0.0)]),
        step!(1.0, [(Scale, 1.0), (Rotate, 0.0), (Opacity, 1.0)]),
    ],
    exit: Some(&[
        step!(0.0, [(Scale, 1.0), (Rotate, 0.0), (Opacity, 1.0)]),
        step!(1.0, [(Scale, 0.5), (Rotate, 180.0), (Opacity, 0.0)]),
    ]),
};

static FLIP: TransitionRecipe = TransitionRecipe {
    kind: TransitionKind::Flip,
    enter: &[
        step!(0.0, [(RotateY, 90.0), (Opacity, 0.0)]),
        step!(1.0, [(RotateY, 0.0), (Opacity, 1.0)]),
    ],
    exit: Some(&[
        step!(0.0, [(RotateY, 0.0), (Opacity, 1.0)]),
        step!(1.0, [(RotateY, -90.0), (Opacity, 0.0)]),
    ]),
};

static SCALE_BOUNCE: TransitionRecipe = TransitionRecipe {
    kind: TransitionKind::ScaleBounce,
    enter: &[
        step!(0.0, [(Scale, 0.0), (Opacity, 0.0)]),
        step!(0.6, [(Scale, 1.1), (Opacity, 1.0)]),
        step!(0.8, [(Scale, 0.95), (Opacity, 1.0)]),
        step!(1.0, [(Scale, 1.0), (Opacity, 1.0)]),
    ],
    exit: Some(&[
        step!(0.0, [(Scale, 1.0), (Opacity, 1.0)]),
        step!(0.2, [(Scale, 1.1), (Opacity, 1.0)]),
        step!(1.0, [(Scale, 0.0), (Opacity, 0.0)]),
    ]),
};

static BLUR: TransitionRecipe = TransitionRecipe {
    kind: TransitionKind::Blur,
    enter: &[
        step!(0.0, [(Blur, 20.0), (Opacity, 0.0)]),
        step!(1.0, [(Blur, 0.0), (Opacity, 1.0)]),
    ],
    exit: Some(&[
        step!(0.0, [(Blur, 0.0), (Opacity, 1.0)]),
        step!(1.0, [(Blur, 20.0), (Opacity, 0.0)]),
    ]),
};

static PIXELATE: TransitionRecipe = TransitionRecipe {
    kind: TransitionKind::Pixelate,
    enter: &[
        step!(0.0, [(Blur, 8.0), (Contrast, 2.0), (Opacity, 0.0)]),
        step!(1.0, [(Blur, 0.0), (Contrast, 1.0), (Opacity, 1.0)]),
    ],
    exit: Some(&[
        step!(0.0, [(Blur, 0.0), (Contrast, 1.0), (Opacity, 1.0)]),
        step!(1.0, [(Blur, 8.0), (Contrast, 2.0), (Opacity, 0.0)]),
    ]),
};

static WAVE: TransitionRecipe = TransitionRecipe {
    kind: TransitionKind::Wave,
    enter: &[
        step!(0.0, [(TranslateX, -20.0), (SkewX, 10.0), (Opacity, 0.0)]),
        step!(0.5, [(TranslateX, 10.0), (SkewX, -5.0), (Opacity, 1.0)]),
        step!(1.0, [(TranslateX, 0.0), (SkewX, 0.0), (Opacity, 1.0)]),
    ],
    exit: None,
};

static CURTAIN: TransitionRecipe = TransitionRecipe {
    kind: TransitionKind::Curtain,
    enter: &[step!(0.0, [(ScaleY, 0.0)]), step!(1.0, [(ScaleY, 1.0)])],
    exit: Some(&[step!(0.0, [(ScaleY, 1.0)]), step!(1.0, [(ScaleY, 0.0)])]),
};

static VIGNETTE: TransitionRecipe = TransitionRecipe {
    kind: TransitionKind::Vignette,
    enter: &[
        step!(0.0, [(Brightness, 0.0), (Opacity, 0.0)]),
        step!(1.0, [(Brightness, 1.0), (Opacity, 1.0)]),
    ],
    exit: Some(&[
        step!(0.0, [(Brightness, 1.0), (Opacity, 1.0)]),
        step!(1.0, [(Brightness, 0.0), (Opacity, 0.0)]),
    ]),
};

static MORPH: TransitionRecipe = TransitionRecipe {
    kind: TransitionKind::Morph,
    enter: &[
        step!(0.0, [(Scale, 0.8), (Rotate, -10.0), (Blur, 10.0), (Opacity, 0.0)]),
        step!(0.5, [(Scale, 1.05), (Rotate, 5.0), (Blur, 2.0), (Opacity, 0.8)]),
        step!(1.0, [(Scale, 1.0), (Rotate, 0.0), (Blur, 0.0), (Opacity, 1.0)]),
    ],
    exit: None,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyframes::interpolate_properties;
    use crate::property::PropertyKey;

    #[test]
    fn test_every_kind_has_description_and_matching_recipe() {
        for kind in TransitionKind::ALL {
            assert!(!kind.description().is_empty(), "{} has no description", kind);
            assert_eq!(kind.recipe().kind, kind);
            assert!(kind.recipe().enter.len() >= 2);
        }
    }

    #[test]
    fn test_exit_recipes() {
        for kind in TransitionKind::ALL {
            let has_exit = kind.recipe().exit.is_some();
            let expected = !matches!(kind, TransitionKind::Wave | TransitionKind::Morph);
            assert_eq!(has_exit, expected, "{}", kind);
        }
    }

    #[test]
    fn test_steps_start_at_zero_end_at_one_and_ascend() {
        for kind in TransitionKind::ALL {
            let recipe = kind.recipe();
            for steps in std::iter::once(recipe.enter).chain(recipe.exit) {
                assert_eq!(steps.first().map(|s| s.offset), Some(0.0), "{}", kind);
                assert_eq!(steps.last().map(|s| s.offset), Some(1.0), "{}", kind);
                assert!(steps.windows(2).all(|w| w[0].offset < w[1].offset), "{}", kind);
            }
        }
    }

    #[test]
    fn test_steps_declare_the_same_properties() {
        for kind in TransitionKind::ALL {
            let recipe = kind.recipe();
            for steps in std::iter::once(recipe.enter).chain(recipe.exit) {
                let first = steps[0].properties();
                for step in steps {
                    assert!(step.properties().keys().eq(first.keys()), "{} at {}", kind, step.offset);
                }
            }
        }
    }

    #[test]
    fn test_kind_parse_and_serde() {
        for kind in TransitionKind::ALL {
            assert_eq!(kind.name().parse::<TransitionKind>().unwrap(), kind);
        }
        assert_eq!(
            "dissolve".parse::<TransitionKind>(),
            Err(AnimationError::UnknownTransition("dissolve".to_string()))
        );

        let json = serde_json::to_string(&TransitionKind::ScaleBounce).unwrap();
        assert_eq!(json, "\"scale-bounce\"");
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("out".parse::<TransitionDirection>().unwrap(), TransitionDirection::Out);
        assert!("sideways".parse::<TransitionDirection>().is_err());
    }

    #[test]
    fn test_generate_css_animation_format_and_purity() {
        let config = TransitionConfig::new(TransitionKind::Fade, 250.0).with_easing(Easing::EaseInOutQuart);
        let first = generate_css_animation(&config, TransitionDirection::Out);
        assert_eq!(first, "fade-out 250ms cubic-bezier(0.77, 0, 0.175, 1) forwards");
        assert_eq!(first, generate_css_animation(&config, TransitionDirection::Out));
    }

    #[test]
    fn test_intensity_clamped_with_default() {
        let config = TransitionConfig::new(TransitionKind::Pixelate, 400.0);
        assert_eq!(config.intensity(), 50.0);
        assert_eq!(config.clone().with_intensity(140.0).intensity(), 100.0);
        assert_eq!(config.clone().with_intensity(-3.0).intensity(), 0.0);
        assert_eq!(config.with_intensity(f64::NAN).intensity(), 50.0);
    }

    #[test]
    fn test_config_json_uses_type_key() {
        let config: TransitionConfig =
            serde_json::from_str(r#"{"type":"zoom-in","duration":300,"easing":"ease-out","direction":"out"}"#)
                .unwrap();
        assert_eq!(config.kind, TransitionKind::ZoomIn);
        assert_eq!(config.direction(), TransitionDirection::Out);
        assert_eq!(config.intensity, None);
    }

    #[test]
    fn test_to_css_keyframes() {
        let css = TransitionKind::SlideUp
            .recipe()
            .to_css_keyframes(TransitionDirection::In, &StyleUnits::default())
            .unwrap();
        assert_eq!(
            css,
            "@keyframes slide-up-in {\n  \
             0% { transform: translateY(100px); opacity: 0; }\n  \
             100% { transform: translateY(0px); opacity: 1; }\n}"
        );
    }

    #[test]
    fn test_css_keyframes_omit_unset_opacity() {
        let css = TransitionKind::Curtain
            .recipe()
            .to_css_keyframes(TransitionDirection::Out, &StyleUnits::default())
            .unwrap();
        assert!(css.contains("0% { transform: scaleY(1); }"));
        assert!(!css.contains("opacity"));
    }

    #[test]
    fn test_missing_exit_is_an_error() {
        let config = TransitionConfig::new(TransitionKind::Wave, 300.0);
        let recipe = TransitionKind::Wave.recipe();
        assert_eq!(
            recipe.to_definition(&config, TransitionDirection::Out),
            Err(AnimationError::MissingExitRecipe("wave".to_string()))
        );
        assert!(recipe.to_css_keyframes(TransitionDirection::Out, &StyleUnits::default()).is_err());
    }

    #[test]
    fn test_to_definition() {
        let config = TransitionConfig::new(TransitionKind::ScaleBounce, 500.0).with_easing(Easing::EaseOut);
        let definition = TransitionKind::ScaleBounce
            .recipe()
            .to_definition(&config, TransitionDirection::In)
            .unwrap();

        assert_eq!(definition.id, "scale-bounce-in");
        assert_eq!(definition.duration, 500.0);
        let times: Vec<f64> = definition.keyframes.iter().map(|kf| kf.time).collect();
        assert_eq!(times, vec![0.0, 300.0, 400.0, 500.0]);
        assert_eq!(definition.keyframes[0].easing, Easing::Linear);
        assert!(definition.keyframes[1..].iter().all(|kf| kf.easing == Easing::EaseOut));

        let end = interpolate_properties(&definition, 1.0);
        assert_eq!(end[&PropertyKey::from("scale")], 1.0);
        assert_eq!(end[&PropertyKey::from("opacity")], 1.0);
    }

    #[test]
    fn test_every_recipe_converts_to_valid_definition() {
        for kind in TransitionKind::ALL {
            let config = TransitionConfig::new(kind, 300.0);
            for direction in [TransitionDirection::In, TransitionDirection::Out] {
                match kind.recipe().to_definition(&config, direction) {
                    Ok(definition) => assert!(definition.validate().is_ok()),
                    Err(err) => assert_eq!(err, AnimationError::MissingExitRecipe(kind.name().to_string())),
                }
            }
        }
    }
}
