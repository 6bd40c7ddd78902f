//! Touch sessions
//!
//! One [`TouchSession`] exists per grabbed pointer while the view decides
//! whether the pointer is scrolling, dragging a bar, or belongs to the
//! child. The decision itself is made by the view; the session records what
//! the decision is based on.

use panview_core::events::EventType;
use panview_core::{PointerEvent, PointerId, StateTransitions, TaskId, Vec2};

use crate::geometry::{Axis, BarHit};

/// Gesture events driving [`TouchMode`]
pub mod gesture_events {
    use panview_core::events::EventType;

    /// Travel on an enabled axis went past the scroll distance
    pub const DISTANCE_EXCEEDED: EventType = 100;
    /// The press landed on a scrollbar track
    pub const BAR_GRABBED: EventType = 101;
}

/// What a session turned out to be
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TouchMode {
    /// Not decided yet
    #[default]
    Unknown,
    /// Dragging the content
    Scrolling,
    /// Dragging a scrollbar
    BarDragging,
}

impl StateTransitions for TouchMode {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use gesture_events::*;

        match (self, event) {
            (TouchMode::Unknown, DISTANCE_EXCEEDED) => Some(TouchMode::Scrolling),
            (TouchMode::Unknown, BAR_GRABBED) => Some(TouchMode::BarDragging),
            _ => None,
        }
    }
}

/// How the last finished gesture was handled
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureOutcome {
    /// Content was scrolled
    Scrolled,
    /// A scrollbar was dragged
    BarDragged,
    /// Released undecided; replayed to the child as a tap
    Tapped,
    /// Given up to the child (timeout or disabled axis)
    PassedThrough,
}

/// Identity of a session, used to key its deferred tasks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);

/// State of one grabbed pointer
#[derive(Clone, Debug)]
pub struct TouchSession {
    id: SessionId,
    pointer: PointerId,
    mode: TouchMode,
    accum: Vec2,
    start_time: f64,
    last_update_time: f64,
    last_dt: f64,
    start_frame: u64,
    user_stopped: bool,
    hit_bar: BarHit,
    pub(crate) resolve_task: Option<TaskId>,
    /// Copy of the sequence, kept current, for redelivery after a timeout
    pub(crate) press: PointerEvent,
}

impl TouchSession {
    pub fn new(id: SessionId, event: &PointerEvent, frame: u64, hit_bar: BarHit) -> Self {
        let mut mode = TouchMode::Unknown;
        if hit_bar.any() {
            mode.transition(gesture_events::BAR_GRABBED);
        }

        Self {
            id,
            pointer: event.id,
            mode,
            accum: Vec2::ZERO,
            start_time: event.time_start,
            last_update_time: event.time_update,
            last_dt: 0.0,
            start_frame: frame,
            user_stopped: false,
            hit_bar,
            resolve_task: None,
            press: event.clone(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn pointer(&self) -> PointerId {
        self.pointer
    }

    pub fn mode(&self) -> TouchMode {
        self.mode
    }

    /// Absolute travel per axis since the press
    pub fn accum(&self) -> Vec2 {
        self.accum
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn last_update_time(&self) -> f64 {
        self.last_update_time
    }

    /// Time between the last two scrolling moves
    pub fn last_dt(&self) -> f64 {
        self.last_dt
    }

    pub fn start_frame(&self) -> u64 {
        self.start_frame
    }

    pub fn user_stopped(&self) -> bool {
        self.user_stopped
    }

    pub fn hit_bar(&self) -> BarHit {
        self.hit_bar
    }

    pub fn frames_since_start(&self, frame: u64) -> u64 {
        frame.saturating_sub(self.start_frame)
    }

    /// Add a move's displacement to the travel accumulators
    pub(crate) fn accumulate(&mut self, delta: Vec2) {
        self.accum.x += delta.x.abs();
        self.accum.y += delta.y.abs();
    }

    /// First axis whose travel went past `distance`, X before Y
    pub fn exceeded_axis(&self, distance: f32) -> Option<Axis> {
        if self.accum.x > distance {
            Some(Axis::X)
        } else if self.accum.y > distance {
            Some(Axis::Y)
        } else {
            None
        }
    }

    /// Resolve to scrolling; returns false if the mode was already decided
    pub(crate) fn begin_scrolling(&mut self) -> bool {
        self.mode.transition(gesture_events::DISTANCE_EXCEEDED)
    }

    /// Bookkeeping for a move while scrolling
    pub(crate) fn mark_scrolling(&mut self, time: f64) {
        self.last_dt = time - self.last_update_time;
        self.last_update_time = time;
        self.user_stopped = true;
    }

    /// Follow the live sequence
    pub(crate) fn track(&mut self, event: &PointerEvent) {
        self.press.move_to(event.pos, event.time_update);
    }
}
