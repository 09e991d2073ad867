//! Keyframe animation core for per-element property animation.
//!
//! This crate provides:
//! - **Easing**: the 14 standard timing curves
//! - **Keyframe definitions**: multi-step animations over arbitrary numeric properties
//! - **Playback engine**: a frame-driven state machine with session-scoped callbacks
//! - **Manager**: one engine per element, with bulk control
//! - **Transition catalog**: 16 named enter/exit recipes and their CSS output
//! - **Style serializer**: property values to `transform` / `filter` / `opacity`
//!
//! # Architecture
//!
//! ```text
//! AnimationManager
//!   └── AnimationEngine (per element)
//!         ├── AnimationDefinition registry
//!         ├── Clock (shared, injected)
//!         └── PlaybackSession (callbacks of the current play())
//!
//! TransitionKind ── recipe() ──> TransitionRecipe ── to_definition() ──> AnimationDefinition
//! PropertyMap ── create_transform_string() ──> RenderStyle
//! ```

pub mod clock;
pub mod easing;
pub mod engine;
pub mod error;
pub mod keyframes;
pub mod manager;
pub mod property;
pub mod style;
pub mod transition;

pub use clock::{Clock, ManualClock, SystemClock};
pub use easing::Easing;
pub use engine::{AnimationEngine, AnimationState, PlaybackCallbacks, SessionId};
pub use error::{AnimationError, Result};
pub use keyframes::{AnimationDefinition, AnimationKeyframe, interpolate_properties};
pub use manager::AnimationManager;
pub use property::{AnimationProperty, PropertyKey, PropertyMap, StyleChannel, StyleProperty};
pub use style::{RenderStyle, StyleUnits, create_transform_string};
pub use transition::{
    KeyframeStep, TransitionConfig, TransitionDirection, TransitionKind, TransitionRecipe,
    generate_css_animation,
};
