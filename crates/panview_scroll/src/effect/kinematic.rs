//! Kinetic value with velocity, bounds and overscroll

use smallvec::SmallVec;

use super::{DampedParams, KineticParams, OverscrollPolicy};

/// Samples kept for the release velocity estimate
const MAX_HISTORY: usize = 5;

/// Shortest duration used when dividing by the drag time
const MIN_DURATION: f64 = 1e-4;

/// Scroll value along one axis
///
/// The value is in content pixels and is typically `<= 0`: `min` is
/// `-(content - frame)` and `max` is `0`. Pointer positions go in through
/// [`start`](Self::start) / [`update`](Self::update) / [`stop`](Self::stop);
/// inertia and spring-back run in [`tick`](Self::tick), which the owner calls
/// once per frame.
#[derive(Clone, Debug)]
pub struct KinematicEffect {
    policy: OverscrollPolicy,
    params: KineticParams,
    value: f32,
    velocity: f32,
    min: f32,
    max: f32,
    overscroll: f32,
    /// Frame length along the axis; scales elastic stretch and fading
    extent: f32,
    is_manual: bool,
    displacement: f32,
    history: SmallVec<[(f64, f32); MAX_HISTORY + 1]>,
    needs_update: bool,
}

impl KinematicEffect {
    pub fn new(policy: OverscrollPolicy, params: KineticParams) -> Self {
        Self {
            policy,
            params,
            value: 0.0,
            velocity: 0.0,
            min: 0.0,
            max: 0.0,
            overscroll: 0.0,
            extent: 0.0,
            is_manual: false,
            displacement: 0.0,
            history: SmallVec::new(),
            needs_update: false,
        }
    }

    /// Hard-clamped effect with default kinetics
    pub fn bounded() -> Self {
        Self::new(OverscrollPolicy::Bounded, KineticParams::default())
    }

    /// Elastic effect with default spring
    pub fn damped() -> Self {
        Self::new(OverscrollPolicy::default(), KineticParams::default())
    }

    pub fn policy(&self) -> OverscrollPolicy {
        self.policy
    }

    pub fn params(&self) -> &KineticParams {
        &self.params
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Velocity in px/s
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    /// Distance past the nearest bound (negative below `min`)
    pub fn overscroll(&self) -> f32 {
        self.overscroll
    }

    pub fn extent(&self) -> f32 {
        self.extent
    }

    /// Whether a pointer is currently driving the value
    pub fn is_manual(&self) -> bool {
        self.is_manual
    }

    /// Whether [`tick`](Self::tick) has work to do
    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Overscroll to draw; always zero for a bounded effect
    pub fn visual_overscroll(&self) -> f32 {
        if self.policy.is_elastic() {
            self.overscroll
        } else {
            0.0
        }
    }

    /// Content opacity for the fading policy, `1.0` otherwise
    pub fn content_opacity(&self) -> f32 {
        match self.policy {
            OverscrollPolicy::DampedWithFade(_) if self.extent > 0.0 => {
                (1.0 - self.overscroll.abs() / self.extent).clamp(0.0, 1.0)
            }
            _ => 1.0,
        }
    }

    pub fn set_bounds(&mut self, min: f32, max: f32) {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.min = min;
        self.max = max;
        self.apply_bounds();
    }

    pub fn set_extent(&mut self, extent: f32) {
        self.extent = extent.max(0.0);
    }

    /// Jump to `value` without inertia
    pub fn reposition(&mut self, value: f32) {
        self.value = value;
        self.velocity = 0.0;
        self.apply_bounds();
    }

    /// Begin tracking a pointer at `pos`
    pub fn start(&mut self, pos: f32, t: f64) {
        self.is_manual = true;
        self.velocity = 0.0;
        self.displacement = 0.0;
        self.needs_update = false;
        self.history.clear();
        self.history.push((t, pos));
    }

    /// Shift the value by the pointer travel since the last sample
    pub fn update(&mut self, pos: f32, t: f64) {
        let Some(&(_, last)) = self.history.last() else {
            self.history.push((t, pos));
            return;
        };

        let mut distance = pos - last;
        self.displacement += distance.abs();
        if let Some(params) = self.policy.damped_params().copied() {
            distance = self.resist(distance, &params);
        }
        self.apply_distance(distance);
        self.limit_stretch();

        self.history.push((t, pos));
        if self.history.len() > MAX_HISTORY {
            self.history.remove(0);
        }
    }

    /// Release the pointer at `pos` and hand over to inertia
    pub fn stop(&mut self, pos: f32, t: f64) {
        self.is_manual = false;
        let Some(&(_, last)) = self.history.last() else {
            self.needs_update = self.overscroll != 0.0;
            return;
        };
        self.displacement += (pos - last).abs();

        if self.displacement <= self.params.drag_threshold {
            self.velocity = 0.0;
            self.needs_update = self.overscroll != 0.0;
            return;
        }

        self.history.push((t, pos));
        let (t0, p0) = self.history[0];
        let duration = (t - t0).max(MIN_DURATION);
        self.velocity = (pos - p0) / duration as f32;
        tracing::trace!(
            "effect released: value={:.1} velocity={:.1}px/s",
            self.value,
            self.velocity
        );
        self.trigger_velocity_update();
    }

    /// Drop any drag or inertia, leaving the value where it is
    ///
    /// An elastic effect that is past its bounds still springs back.
    pub fn cancel(&mut self) {
        self.is_manual = false;
        self.velocity = 0.0;
        self.history.clear();
        self.needs_update = self.policy.is_elastic() && self.overscroll != 0.0;
    }

    /// Request a velocity update on the next tick
    pub fn trigger_velocity_update(&mut self) {
        self.needs_update = true;
    }

    /// Discrete step (wheel): clamp into bounds, no inertia
    pub fn nudge(&mut self, delta: f32) {
        self.value = (self.value + delta).clamp(self.min, self.max);
        self.velocity = 0.0;
        self.apply_bounds();
        self.trigger_velocity_update();
    }

    /// Run the pending velocity update for a frame of `dt` seconds
    ///
    /// Returns whether the effect wants another frame.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.needs_update {
            return false;
        }
        self.needs_update = false;
        if self.is_manual {
            return false;
        }
        if dt <= 0.0 {
            self.needs_update = true;
            return true;
        }

        match self.policy {
            OverscrollPolicy::Bounded => self.kinetic_step(dt),
            OverscrollPolicy::Damped(params) | OverscrollPolicy::DampedWithFade(params) => {
                self.damped_step(dt, &params)
            }
        }
        self.needs_update
    }

    fn kinetic_step(&mut self, dt: f32) {
        if self.velocity.abs() <= self.params.min_velocity {
            self.velocity = 0.0;
            return;
        }
        self.velocity -= self.velocity * self.params.friction * dt / self.params.std_dt;
        self.apply_distance(self.velocity * dt);
        self.needs_update = true;
    }

    fn damped_step(&mut self, dt: f32, params: &DampedParams) {
        // Residual overscroll that is not moving outward snaps onto the bound
        if self.overscroll != 0.0
            && self.overscroll.abs() <= params.min_overscroll
            && self.velocity * self.overscroll <= 0.0
        {
            self.value = self.value.clamp(self.min, self.max);
            self.velocity = 0.0;
            self.apply_bounds();
        }

        if self.velocity.abs() <= self.params.min_velocity && self.overscroll == 0.0 {
            self.velocity = 0.0;
            if params.round_value {
                self.value = self.value.round();
                self.apply_bounds();
            }
            tracing::trace!("effect settled at {:.1}", self.value);
            return;
        }

        let mut force = self.velocity * self.params.friction * dt / self.params.std_dt;
        if self.overscroll != 0.0 {
            force += self.velocity * params.edge_damping + self.overscroll * params.spring_constant;
        }

        // Heading back toward the range: stop exactly on the bound once crossed
        let stop_at = if self.overscroll > 0.0 && self.velocity < 0.0 {
            Some(self.max)
        } else if self.overscroll < 0.0 && self.velocity > 0.0 {
            Some(self.min)
        } else {
            None
        };

        self.velocity -= force;
        self.apply_distance(self.velocity * dt);

        let crossed = match stop_at {
            Some(bound) if bound == self.max => self.value < self.max,
            Some(_) => self.value > self.min,
            None => false,
        };
        if let (true, Some(bound)) = (crossed, stop_at) {
            self.value = bound;
            self.velocity = 0.0;
            self.apply_bounds();
            tracing::trace!("effect returned to bound {:.1}", bound);
            return;
        }

        self.needs_update = true;
    }

    /// Scale a drag that pushes further past a bound
    fn resist(&self, distance: f32, params: &DampedParams) -> f32 {
        if self.overscroll == 0.0 || distance.signum() != self.overscroll.signum() {
            return distance;
        }
        let max_over = self.extent * params.max_overscroll;
        let stretch = if max_over > 0.0 {
            (self.overscroll.abs() / max_over).min(1.0)
        } else {
            1.0
        };
        distance * (0.55 - stretch * 0.45)
    }

    /// Keep a dragged elastic value within its maximum stretch
    fn limit_stretch(&mut self) {
        let Some(params) = self.policy.damped_params() else {
            return;
        };
        let max_over = self.extent * params.max_overscroll;
        if max_over <= 0.0 {
            return;
        }
        let limited = self.value.clamp(self.min - max_over, self.max + max_over);
        if limited != self.value {
            self.value = limited;
            self.apply_bounds();
        }
    }

    fn apply_distance(&mut self, distance: f32) {
        if distance.abs() < self.params.min_distance {
            self.velocity = 0.0;
        }
        self.value += distance;
        self.apply_bounds();
    }

    /// Recompute overscroll; a bounded effect is pushed back onto the bound
    fn apply_bounds(&mut self) {
        self.overscroll = if self.value < self.min {
            self.value - self.min
        } else if self.value > self.max {
            self.value - self.max
        } else {
            0.0
        };

        if self.overscroll != 0.0 && !self.policy.is_elastic() {
            let bound = if self.overscroll < 0.0 { self.min } else { self.max };
            self.reset(bound);
        }
    }

    /// Pin to `pos`, keeping only the latest pointer sample
    fn reset(&mut self, pos: f32) {
        self.value = pos;
        self.velocity = 0.0;
        if let Some(&last) = self.history.last() {
            self.history.clear();
            self.history.push(last);
        }
    }
}

impl Default for KinematicEffect {
    fn default() -> Self {
        Self::damped()
    }
}
