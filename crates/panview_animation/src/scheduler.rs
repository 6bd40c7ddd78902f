//! Animation scheduler
//!
//! Owns all active tweens and advances them each frame.

use slotmap::{new_key_type, SlotMap};

use crate::tween::Tween;

new_key_type! {
    pub struct TweenId;
}

/// The animation scheduler that ticks all active tweens
pub struct AnimationScheduler {
    tweens: SlotMap<TweenId, Tween>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            tweens: SlotMap::with_key(),
        }
    }

    /// Start a tween and return its id
    pub fn start(&mut self, tween: Tween) -> TweenId {
        let target = tween.target();
        let id = self.tweens.insert(tween);
        tracing::trace!("tween {:?} started toward {:.3}", id, target);
        id
    }

    pub fn get(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(id)
    }

    /// Current value of a tween, if it still exists
    pub fn value(&self, id: TweenId) -> Option<f32> {
        self.tweens.get(id).map(Tween::value)
    }

    /// Stop and drop a tween, leaving its property wherever it was
    pub fn stop(&mut self, id: TweenId) -> Option<Tween> {
        self.tweens.remove(id)
    }

    /// Tick all tweens by `dt_ms` milliseconds
    ///
    /// Finished tweens stay readable until stopped so the last value can be
    /// applied by the owner.
    pub fn tick(&mut self, dt_ms: f32) {
        for (_, tween) in self.tweens.iter_mut() {
            tween.tick(dt_ms);
        }
    }

    /// Check if any tweens are still playing
    pub fn has_active_animations(&self) -> bool {
        self.tweens.iter().any(|(_, t)| t.is_playing())
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
