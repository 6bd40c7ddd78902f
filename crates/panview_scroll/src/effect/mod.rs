//! Per-axis kinematic effects
//!
//! A [`KinematicEffect`] turns pointer positions into a scroll value with
//! velocity, bounds and an [`OverscrollPolicy`]. The policy is a closed set
//! of variants chosen by configuration.

mod kinematic;

pub use kinematic::KinematicEffect;

use serde::{Deserialize, Serialize};

/// Velocity tracking and friction
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KineticParams {
    /// Fraction of velocity lost per standard frame
    pub friction: f32,
    /// Deltas smaller than this zero the velocity
    pub min_distance: f32,
    /// Velocity (px/s) below which motion stops
    pub min_velocity: f32,
    /// Frame duration (s) the friction is expressed against
    pub std_dt: f32,
    /// Total drag travel (px) under which a release does not fling
    pub drag_threshold: f32,
}

impl Default for KineticParams {
    fn default() -> Self {
        Self {
            friction: 0.05,
            min_distance: 0.1,
            min_velocity: 0.5,
            std_dt: 0.017,
            drag_threshold: 20.0,
        }
    }
}

/// Spring parameters for elastic overscroll
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DampedParams {
    /// Pull back toward the bound per pixel of overscroll
    pub spring_constant: f32,
    /// Extra velocity damping while overscrolled
    pub edge_damping: f32,
    /// Overscroll (px) below which the value snaps onto the bound
    pub min_overscroll: f32,
    /// Maximum stretch while dragging, as a fraction of the frame length
    pub max_overscroll: f32,
    /// Round the value to a whole pixel once settled
    pub round_value: bool,
}

impl Default for DampedParams {
    fn default() -> Self {
        Self {
            spring_constant: 2.0,
            edge_damping: 0.25,
            min_overscroll: 0.5,
            max_overscroll: 0.3,
            round_value: true,
        }
    }
}

/// What happens when the value leaves `[min, max]`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OverscrollPolicy {
    /// Hard clamp at the bounds
    Bounded,
    /// Rubber-band past the bounds, spring back on release
    Damped(DampedParams),
    /// Like `Damped`, and fade the content while overscrolled
    DampedWithFade(DampedParams),
}

impl OverscrollPolicy {
    pub fn damped_params(&self) -> Option<&DampedParams> {
        match self {
            OverscrollPolicy::Bounded => None,
            OverscrollPolicy::Damped(params) | OverscrollPolicy::DampedWithFade(params) => {
                Some(params)
            }
        }
    }

    /// Whether the value may sit outside its bounds
    pub fn is_elastic(&self) -> bool {
        self.damped_params().is_some()
    }
}

impl Default for OverscrollPolicy {
    fn default() -> Self {
        OverscrollPolicy::Damped(DampedParams::default())
    }
}
