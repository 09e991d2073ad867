//! Per-element playback engine.
//!
//! An [`AnimationEngine`] owns a registry of [`AnimationDefinition`]s and a
//! small state machine:
//!
//! ```text
//! Stopped --play--> Playing --pause--> Paused --resume--> Playing
//!    ^                 |                  |
//!    +------stop-------+------stop--------+
//!    +---- natural completion (non-looping) ----+
//! ```
//!
//! Frames are not pushed by a timer. While playing, the engine holds a
//! pending frame request; the host calls [`AnimationEngine::tick`] once per
//! paint and the engine delivers a frame only if one is pending. Each
//! delivered frame re-requests the next one until playback ends.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::clock::Clock;
use crate::error::{AnimationError, Result};
use crate::keyframes::{AnimationDefinition, interpolate_properties};
use crate::property::PropertyMap;

/// Playback state of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Identity of one `play()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl SessionId {
    /// Generate a new unique session ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

type FrameCallback = Box<dyn FnMut(f64, f64)>;
type UpdateCallback = Box<dyn FnMut(&PropertyMap)>;
type CompleteCallback = Box<dyn FnOnce()>;

/// Observers for one playback session.
///
/// All callbacks are optional. Per delivered frame, `on_frame(adjusted_ms,
/// progress)` runs first, then `on_update(properties)`. `on_complete` runs at
/// most once, after the final frame of a non-looping animation.
#[derive(Default)]
pub struct PlaybackCallbacks {
    on_frame: Option<FrameCallback>,
    on_update: Option<UpdateCallback>,
    on_complete: Option<CompleteCallback>,
}

impl PlaybackCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_frame(mut self, callback: impl FnMut(f64, f64) + 'static) -> Self {
        self.on_frame = Some(Box::new(callback));
        self
    }

    pub fn on_update(mut self, callback: impl FnMut(&PropertyMap) + 'static) -> Self {
        self.on_update = Some(Box::new(callback));
        self
    }

    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for PlaybackCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackCallbacks")
            .field("on_frame", &self.on_frame.is_some())
            .field("on_update", &self.on_update.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

#[derive(Debug)]
struct PlaybackSession {
    id: SessionId,
    animation_id: String,
    callbacks: PlaybackCallbacks,
}

/// Keyframe playback engine for a single element.
pub struct AnimationEngine {
    clock: Rc<dyn Clock>,
    animations: Vec<AnimationDefinition>,
    state: AnimationState,
    /// Clock time at which the current cycle started (adjusted for pauses).
    start_time: f64,
    /// Elapsed time frozen by `pause()`.
    paused_time: f64,
    frame_requested: bool,
    /// Set after a looping cycle ends; the next frame re-anchors the cycle start.
    restart_pending: bool,
    session: Option<PlaybackSession>,
}

impl AnimationEngine {
    /// Create an idle engine reading time from `clock`.
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            animations: Vec::new(),
            state: AnimationState::Stopped,
            start_time: 0.0,
            paused_time: 0.0,
            frame_requested: false,
            restart_pending: false,
            session: None,
        }
    }

    /// Register a definition.
    ///
    /// Keyframes are sorted by time. An existing definition with the same id
    /// is replaced in place. Playback is not affected.
    pub fn add_animation(&mut self, mut definition: AnimationDefinition) {
        if let Err(err) = definition.validate() {
            warn!("Registering questionable animation: {}", err);
        }
        definition.sort_keyframes();

        match self.animations.iter_mut().find(|a| a.id == definition.id) {
            Some(existing) => {
                debug!("Replacing animation '{}'", definition.id);
                *existing = definition;
            }
            None => {
                debug!("Registered animation '{}'", definition.id);
                self.animations.push(definition);
            }
        }
    }

    /// Remove a definition. Returns it if it was registered.
    pub fn remove_animation(&mut self, id: &str) -> Option<AnimationDefinition> {
        let index = self.animations.iter().position(|a| a.id == id)?;
        Some(self.animations.remove(index))
    }

    /// Start (or continue after `pause`) playback.
    ///
    /// `id` must name a registered definition, but the frames delivered always
    /// come from the *first registered* definition. Engines hold one animation
    /// each in practice; use one engine per element (see
    /// [`AnimationManager`](crate::manager::AnimationManager)) to run several
    /// animations independently.
    ///
    /// Any previous session is replaced and its callbacks are dropped unfired.
    /// The first frame is delivered on the next [`tick`](Self::tick).
    pub fn play(&mut self, id: &str, callbacks: PlaybackCallbacks) -> Result<SessionId> {
        if !self.animations.iter().any(|a| a.id == id) {
            debug!("Ignoring play for unregistered animation '{}'", id);
            return Err(AnimationError::UnknownAnimation(id.to_string()));
        }

        let session_id = SessionId::new();
        let resume_from = self.paused_time;
        self.start_time = self.clock.now_ms() - resume_from;
        self.paused_time = 0.0;
        self.restart_pending = false;
        self.state = AnimationState::Playing;
        self.frame_requested = true;
        self.session = Some(PlaybackSession {
            id: session_id,
            animation_id: id.to_string(),
            callbacks,
        });

        debug!(
            "Playing '{}' (session {}) from {:.1}ms",
            id, session_id.0, resume_from
        );
        Ok(session_id)
    }

    /// Freeze playback. Only valid while playing.
    pub fn pause(&mut self) {
        if self.state != AnimationState::Playing {
            return;
        }
        self.paused_time = if self.restart_pending {
            0.0
        } else {
            self.clock.now_ms() - self.start_time
        };
        self.restart_pending = false;
        self.frame_requested = false;
        self.state = AnimationState::Paused;
        debug!("Paused at {:.1}ms", self.paused_time);
    }

    /// Continue from the frozen elapsed time. Only valid while paused.
    pub fn resume(&mut self) {
        if self.state != AnimationState::Paused {
            return;
        }
        self.start_time = self.clock.now_ms() - self.paused_time;
        self.paused_time = 0.0;
        self.frame_requested = true;
        self.state = AnimationState::Playing;
        debug!("Resumed");
    }

    /// Halt playback, reset elapsed time and end the session.
    ///
    /// `on_complete` is not called.
    pub fn stop(&mut self) {
        if self.state != AnimationState::Stopped {
            debug!("Stopped");
        }
        self.state = AnimationState::Stopped;
        self.start_time = 0.0;
        self.paused_time = 0.0;
        self.frame_requested = false;
        self.restart_pending = false;
        self.session = None;
    }

    /// Stop and drop every registered definition.
    pub fn dispose(&mut self) {
        self.stop();
        self.animations.clear();
    }

    /// Deliver one frame if one is pending.
    ///
    /// Returns `true` when a frame was delivered.
    pub fn tick(&mut self) -> bool {
        if !self.frame_requested || self.state != AnimationState::Playing {
            return false;
        }
        self.frame_requested = false;

        let Some(animation) = self.animations.first() else {
            debug!("No animations registered, stopping");
            self.stop();
            return false;
        };

        let now = self.clock.now_ms();
        if self.restart_pending {
            self.start_time = now;
            self.restart_pending = false;
        }
        let (adjusted, progress) = frame_progress(animation, now - self.start_time);
        let properties = interpolate_properties(animation, progress);
        let looping = animation.looping;

        trace!("Frame {:.1}ms progress {:.4}", adjusted, progress);

        if let Some(session) = self.session.as_mut() {
            if let Some(on_frame) = session.callbacks.on_frame.as_mut() {
                on_frame(adjusted, progress);
            }
            if let Some(on_update) = session.callbacks.on_update.as_mut() {
                on_update(&properties);
            }
        }

        if progress < 1.0 {
            self.frame_requested = true;
        } else if looping {
            self.start_time = now;
            self.paused_time = 0.0;
            self.restart_pending = true;
            self.frame_requested = true;
            trace!("Loop restart");
        } else {
            self.state = AnimationState::Stopped;
            self.paused_time = 0.0;
            if let Some(session) = self.session.take() {
                debug!("Completed '{}' (session {})", session.animation_id, session.id.0);
                if let Some(on_complete) = session.callbacks.on_complete {
                    on_complete();
                }
            }
        }

        true
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == AnimationState::Playing
    }

    /// Whether the next `tick` will deliver a frame.
    pub fn has_pending_frame(&self) -> bool {
        self.frame_requested
    }

    pub fn animation(&self, id: &str) -> Option<&AnimationDefinition> {
        self.animations.iter().find(|a| a.id == id)
    }

    /// Registered definitions in registration order.
    pub fn animations(&self) -> &[AnimationDefinition] {
        &self.animations
    }

    /// Elapsed time of the current cycle; frozen while paused, zero when stopped.
    pub fn elapsed_ms(&self) -> f64 {
        match self.state {
            AnimationState::Playing if self.restart_pending => 0.0,
            AnimationState::Playing => (self.clock.now_ms() - self.start_time).max(0.0),
            AnimationState::Paused => self.paused_time,
            AnimationState::Stopped => 0.0,
        }
    }

    /// Property values at the current elapsed time, without firing callbacks.
    pub fn current_properties(&self) -> Option<PropertyMap> {
        let animation = self.animations.first()?;
        let (_, progress) = frame_progress(animation, self.elapsed_ms());
        Some(interpolate_properties(animation, progress))
    }

    /// Current playback session, if any.
    pub fn session(&self) -> Option<SessionId> {
        self.session.as_ref().map(|s| s.id)
    }
}

impl fmt::Debug for AnimationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationEngine")
            .field("animations", &self.animations.len())
            .field("state", &self.state)
            .field("start_time", &self.start_time)
            .field("paused_time", &self.paused_time)
            .field("frame_requested", &self.frame_requested)
            .field("restart_pending", &self.restart_pending)
            .field("session", &self.session)
            .finish()
    }
}

/// Delay-adjusted time and clamped progress for an elapsed time.
fn frame_progress(animation: &AnimationDefinition, elapsed: f64) -> (f64, f64) {
    let adjusted = (elapsed - animation.delay).max(0.0);
    let progress = if animation.duration > 0.0 {
        (adjusted / animation.duration).min(1.0)
    } else {
        1.0
    };
    (adjusted, progress)
}
