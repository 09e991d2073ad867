//! Keyframes, animation definitions and keyframe interpolation.
//!
//! - `AnimationKeyframe`: property values at a point in time, plus the easing
//!   used to approach it from the previous keyframe
//! - `AnimationDefinition`: a complete animation (duration, delay, looping)
//! - `interpolate_properties`: resolve every animated property at a progress
//!
//! # Easing is keyframe-local
//!
//! The easing that shapes a segment belongs to the segment's *upcoming*
//! keyframe. A keyframe's own easing is never used to leave it.
//!
//! # Example
//!
//! ```
//! use cadence_motion::{AnimationDefinition, AnimationKeyframe, Easing, PropertyKey, StyleProperty};
//! use cadence_motion::keyframes::interpolate_properties;
//!
//! let spin = AnimationDefinition::new("spin", "Spin", 1000.0)
//!     .keyframe(AnimationKeyframe::new("from", 0.0).set(StyleProperty::Rotate, 0.0))
//!     .keyframe(
//!         AnimationKeyframe::new("to", 1000.0)
//!             .set(StyleProperty::Rotate, 360.0)
//!             .with_easing(Easing::Linear),
//!     );
//!
//! let values = interpolate_properties(&spin, 0.25);
//! assert_eq!(values[&PropertyKey::from(StyleProperty::Rotate)], 90.0);
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeSet;

use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use crate::property::{PropertyKey, PropertyMap};

/// A single keyframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationKeyframe {
    pub id: String,
    /// Position on the timeline in milliseconds.
    pub time: f64,
    pub properties: PropertyMap,
    /// Easing used when interpolating TO this keyframe.
    #[serde(default)]
    pub easing: Easing,
}

impl AnimationKeyframe {
    /// Create an empty keyframe at `time` milliseconds with linear easing.
    pub fn new(id: impl Into<String>, time: f64) -> Self {
        Self {
            id: id.into(),
            time,
            properties: PropertyMap::new(),
            easing: Easing::Linear,
        }
    }

    /// Set a property value for this keyframe.
    pub fn set(mut self, key: impl Into<PropertyKey>, value: f64) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Set the easing used to approach this keyframe.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Get a property value from this keyframe.
    pub fn get(&self, key: &PropertyKey) -> Option<f64> {
        self.properties.get(key).copied()
    }
}

/// Definition of a keyframe animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationDefinition {
    pub id: String,
    pub name: String,
    /// Length of one cycle in milliseconds.
    pub duration: f64,
    /// Keyframes; may arrive unsorted, the engine sorts them on registration.
    pub keyframes: Vec<AnimationKeyframe>,
    #[serde(default, rename = "loop")]
    pub looping: bool,
    #[serde(default)]
    pub auto_play: bool,
    /// Delay before the first keyframe, in milliseconds.
    #[serde(default)]
    pub delay: f64,
}

impl AnimationDefinition {
    /// Create a definition with no keyframes.
    pub fn new(id: impl Into<String>, name: impl Into<String>, duration: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration,
            keyframes: Vec::new(),
            looping: false,
            auto_play: false,
            delay: 0.0,
        }
    }

    /// Append a keyframe.
    pub fn keyframe(mut self, keyframe: AnimationKeyframe) -> Self {
        self.keyframes.push(keyframe);
        self
    }

    /// Set whether the animation restarts after each cycle.
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Set the start delay.
    pub fn delay_ms(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn auto_play(mut self, auto_play: bool) -> Self {
        self.auto_play = auto_play;
        self
    }

    /// Parse a definition from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let definition: Self = serde_json::from_str(json)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Sort keyframes by time. Equal times keep their authored order.
    pub fn sort_keyframes(&mut self) {
        self.keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    /// Check that the definition can be played meaningfully.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| AnimationError::InvalidDefinition {
            id: self.id.clone(),
            reason,
        };

        if self.id.is_empty() {
            return Err(invalid("id must not be empty".to_string()));
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(invalid(format!("duration must be positive, got {}", self.duration)));
        }
        if !self.delay.is_finite() || self.delay < 0.0 {
            return Err(invalid(format!("delay must be non-negative, got {}", self.delay)));
        }
        if self.keyframes.is_empty() {
            return Err(invalid("at least one keyframe is required".to_string()));
        }
        for keyframe in &self.keyframes {
            if !keyframe.time.is_finite() || keyframe.time < 0.0 {
                return Err(invalid(format!(
                    "keyframe '{}' has invalid time {}",
                    keyframe.id, keyframe.time
                )));
            }
            if let Some((key, value)) = keyframe.properties.iter().find(|(_, v)| !v.is_finite()) {
                return Err(invalid(format!(
                    "keyframe '{}' has non-finite value {} for '{}'",
                    keyframe.id, value, key
                )));
            }
        }
        Ok(())
    }

    /// Every property that appears in any keyframe.
    pub fn animated_properties(&self) -> BTreeSet<PropertyKey> {
        self.keyframes
            .iter()
            .flat_map(|kf| kf.properties.keys().cloned())
            .collect()
    }

    /// Keyframe time normalized to `[0, 1]` of the duration.
    fn normalized_time(&self, keyframe: &AnimationKeyframe) -> f64 {
        if self.duration > 0.0 {
            keyframe.time / self.duration
        } else {
            0.0
        }
    }
}

/// Resolve every animated property of `definition` at `progress`.
///
/// For each property, the first adjacent keyframe pair whose normalized times
/// bracket `progress` is used; when none does (e.g. before the first
/// keyframe), the first two keyframes are used. The local factor is clamped to
/// `[0, 1]` and shaped by the later keyframe's easing. A value missing from
/// the earlier keyframe counts as `0`; one missing from the later keyframe
/// holds the earlier value.
pub fn interpolate_properties(definition: &AnimationDefinition, progress: f64) -> PropertyMap {
    let keyframes: Cow<'_, [AnimationKeyframe]> =
        if definition.keyframes.is_sorted_by(|a, b| a.time <= b.time) {
            Cow::Borrowed(&definition.keyframes)
        } else {
            let mut sorted = definition.keyframes.clone();
            sorted.sort_by(|a, b| a.time.total_cmp(&b.time));
            Cow::Owned(sorted)
        };

    let mut values = PropertyMap::new();

    match keyframes.as_ref() {
        [] => {}
        [only] => {
            for (key, value) in &only.properties {
                values.insert(key.clone(), *value);
            }
        }
        _ => {
            let (prev, next) = bracketing_pair(definition, &keyframes, progress);
            let prev_t = definition.normalized_time(prev);
            let next_t = definition.normalized_time(next);

            let span = next_t - prev_t;
            let local = if span > 0.0 {
                ((progress - prev_t) / span).clamp(0.0, 1.0)
            } else {
                1.0
            };
            let eased = next.easing.apply(local);

            for key in definition.animated_properties() {
                let start = prev.get(&key).unwrap_or(0.0);
                let end = next.get(&key).unwrap_or(start);
                values.insert(key, start + (end - start) * eased);
            }
        }
    }

    values
}

/// Find the keyframes surrounding `progress`, falling back to the first pair.
fn bracketing_pair<'a>(
    definition: &AnimationDefinition,
    keyframes: &'a [AnimationKeyframe],
    progress: f64,
) -> (&'a AnimationKeyframe, &'a AnimationKeyframe) {
    keyframes
        .windows(2)
        .find(|pair| {
            definition.normalized_time(&pair[0]) <= progress
                && progress <= definition.normalized_time(&pair[1])
        })
        .map(|pair| (&pair[0], &pair[1]))
        .unwrap_or((&keyframes[0], &keyframes[1]))
}
