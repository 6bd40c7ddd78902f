//! Pointer input model
//!
//! A [`PointerEvent`] follows one pointer from press to release. It carries
//! an annotation bag (per-widget marks used to avoid double processing) and
//! an exclusive grab list so a widget can claim the rest of the sequence.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::geometry::{Point, Vec2};
use crate::registry::WidgetId;

/// Event type identifier
pub type EventType = u32;

/// Identity of a physical pointer (mouse, finger, pen)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct PointerId(pub u64);

/// Which button produced a press
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    #[default]
    Left,
    Middle,
    Right,
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
}

impl PointerButton {
    /// Whether this "button" is really a wheel step
    pub fn is_wheel(&self) -> bool {
        matches!(
            self,
            PointerButton::ScrollUp
                | PointerButton::ScrollDown
                | PointerButton::ScrollLeft
                | PointerButton::ScrollRight
        )
    }

    /// Vertical wheel step
    pub fn is_vertical_wheel(&self) -> bool {
        matches!(self, PointerButton::ScrollUp | PointerButton::ScrollDown)
    }

    /// Horizontal wheel step
    pub fn is_horizontal_wheel(&self) -> bool {
        matches!(self, PointerButton::ScrollLeft | PointerButton::ScrollRight)
    }
}

/// Per-widget annotations attached to a pointer sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    /// The widget decided to stay out of this sequence entirely
    Avoid,
    /// The widget owns (or owned) a gesture session for this sequence
    Claimed,
}

/// A pointer press / move / release, or a wheel step
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    /// Current position, in the coordinate space of the receiving widget
    pub pos: Point,
    /// Displacement since the previous event of this sequence
    pub delta: Vec2,
    pub button: PointerButton,
    /// Time of the press, in seconds
    pub time_start: f64,
    /// Time of the latest event, in seconds
    pub time_update: f64,
    /// Widget the event is being delivered to through its grab, if any
    pub grab_current: Option<WidgetId>,
    marks: FxHashSet<(WidgetId, Mark)>,
    grab_list: SmallVec<[WidgetId; 4]>,
}

impl PointerEvent {
    /// A fresh press at `pos`
    pub fn new(id: PointerId, pos: Point, time: f64) -> Self {
        Self {
            id,
            pos,
            delta: Vec2::ZERO,
            button: PointerButton::Left,
            time_start: time,
            time_update: time,
            grab_current: None,
            marks: FxHashSet::default(),
            grab_list: SmallVec::new(),
        }
    }

    /// A wheel step at `pos`
    pub fn wheel(id: PointerId, pos: Point, button: PointerButton, time: f64) -> Self {
        Self {
            button,
            ..Self::new(id, pos, time)
        }
    }

    /// Advance the sequence to a new position, updating delta and timestamp
    pub fn move_to(&mut self, pos: Point, time: f64) {
        self.delta = Vec2::new(pos.x - self.pos.x, pos.y - self.pos.y);
        self.pos = pos;
        self.time_update = time;
    }

    /// Whether this event is a wheel step rather than a press
    pub fn is_wheel(&self) -> bool {
        self.button.is_wheel()
    }

    // =========================================================================
    // Annotations
    // =========================================================================

    pub fn mark(&mut self, widget: WidgetId, mark: Mark) {
        self.marks.insert((widget, mark));
    }

    pub fn is_marked(&self, widget: WidgetId, mark: Mark) -> bool {
        self.marks.contains(&(widget, mark))
    }

    // =========================================================================
    // Exclusive grab
    // =========================================================================

    /// Claim the remaining events of this sequence for `widget`
    pub fn grab(&mut self, widget: WidgetId) {
        if !self.grab_list.contains(&widget) {
            self.grab_list.push(widget);
        }
    }

    /// Release a previous grab; no-op when `widget` never grabbed
    pub fn ungrab(&mut self, widget: WidgetId) {
        self.grab_list.retain(|w| *w != widget);
    }

    pub fn is_grabbed_by(&self, widget: WidgetId) -> bool {
        self.grab_list.contains(&widget)
    }

    pub fn grab_list(&self) -> &[WidgetId] {
        &self.grab_list
    }

    /// Empty the grab list, returning its previous contents
    pub fn take_grab_list(&mut self) -> SmallVec<[WidgetId; 4]> {
        std::mem::take(&mut self.grab_list)
    }

    /// Merge the marks and grabs recorded on `other` into this event
    ///
    /// Used when a widget re-dispatched a stored copy of the sequence and the
    /// changes have to reach the live event.
    pub fn absorb(&mut self, other: &PointerEvent) {
        self.marks.extend(other.marks.iter().copied());
        for widget in &other.grab_list {
            self.grab(*widget);
        }
    }

    // =========================================================================
    // Coordinate transforms
    // =========================================================================

    /// Run `f` with the position shifted by `offset`, restoring it afterwards
    ///
    /// Marks and grabs made inside `f` are kept.
    pub fn transformed<R>(&mut self, offset: Vec2, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.pos;
        self.pos = self.pos.offset(offset);
        let result = f(self);
        self.pos = saved;
        result
    }
}
