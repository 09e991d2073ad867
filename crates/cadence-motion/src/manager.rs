//! Registry of per-element animation engines.
//!
//! The `AnimationManager` hands out one [`AnimationEngine`] per element id and
//! fans out bulk playback control and host frames to all of them. It is built
//! at the composition root and passed to whoever needs it.
//!
//! # Usage
//!
//! ```
//! use std::rc::Rc;
//! use cadence_motion::{
//!     AnimationDefinition, AnimationKeyframe, AnimationManager, ManualClock, PlaybackCallbacks,
//! };
//!
//! let clock = ManualClock::new();
//! let mut manager = AnimationManager::new(Rc::new(clock.clone()));
//!
//! let fade = AnimationDefinition::new("fade", "Fade", 300.0)
//!     .keyframe(AnimationKeyframe::new("from", 0.0).set("opacity", 0.0))
//!     .keyframe(AnimationKeyframe::new("to", 300.0).set("opacity", 1.0));
//! manager.play_animation("card", fade, PlaybackCallbacks::new()).unwrap();
//!
//! // Host paint loop
//! while !manager.is_idle() {
//!     manager.tick();
//!     clock.advance(16.0);
//! }
//! ```

use log::debug;
use std::collections::HashMap;
use std::rc::Rc;

use crate::clock::Clock;
use crate::engine::{AnimationEngine, PlaybackCallbacks, SessionId};
use crate::error::Result;
use crate::keyframes::AnimationDefinition;

/// Map from element id to its dedicated engine.
pub struct AnimationManager {
    clock: Rc<dyn Clock>,
    engines: HashMap<String, AnimationEngine>,
}

impl AnimationManager {
    /// Create an empty manager. Every engine it creates shares `clock`.
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            engines: HashMap::new(),
        }
    }

    /// Return the engine for `element_id`, creating it on first use.
    pub fn get_engine(&mut self, element_id: &str) -> &mut AnimationEngine {
        let clock = Rc::clone(&self.clock);
        self.engines
            .entry(element_id.to_string())
            .or_insert_with(|| {
                debug!("Creating engine for '{}'", element_id);
                AnimationEngine::new(clock)
            })
    }

    /// Register `definition` on the element's engine and play it.
    ///
    /// The engine advances its first registered definition, so an element
    /// that already holds a different animation keeps playing that one.
    pub fn play_animation(
        &mut self,
        element_id: &str,
        definition: AnimationDefinition,
        callbacks: PlaybackCallbacks,
    ) -> Result<SessionId> {
        let id = definition.id.clone();
        let engine = self.get_engine(element_id);
        engine.add_animation(definition);
        engine.play(&id, callbacks)
    }

    pub fn pause_all(&mut self) {
        self.engines.values_mut().for_each(AnimationEngine::pause);
    }

    pub fn resume_all(&mut self) {
        self.engines.values_mut().for_each(AnimationEngine::resume);
    }

    pub fn stop_all(&mut self) {
        self.engines.values_mut().for_each(AnimationEngine::stop);
    }

    /// Evict the engine for `element_id` and hand it back.
    ///
    /// The engine is not stopped. Call `stop()` first, or stop or drop the
    /// returned engine, otherwise its session stays live in the caller's hands.
    pub fn clear_engine(&mut self, element_id: &str) -> Option<AnimationEngine> {
        let engine = self.engines.remove(element_id);
        if engine.is_some() {
            debug!("Cleared engine for '{}'", element_id);
        }
        engine
    }

    /// Deliver one host frame to every engine.
    ///
    /// Returns how many engines actually delivered a frame.
    pub fn tick(&mut self) -> usize {
        self.engines
            .values_mut()
            .map(AnimationEngine::tick)
            .filter(|delivered| *delivered)
            .count()
    }

    pub fn engine(&self, element_id: &str) -> Option<&AnimationEngine> {
        self.engines.get(element_id)
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    /// Element ids with a live engine, sorted.
    pub fn element_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.engines.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// True when no engine is waiting for a frame.
    pub fn is_idle(&self) -> bool {
        !self.engines.values().any(AnimationEngine::has_pending_frame)
    }
}
