//! Panview Animation System
//!
//! Easing curves and property tweens, ticked by an [`AnimationScheduler`].

pub mod easing;
pub mod scheduler;
pub mod tween;

pub use easing::Easing;
pub use scheduler::{AnimationScheduler, TweenId};
pub use tween::Tween;
