//! Scroll view
//!
//! [`ScrollView`] hosts one child larger than its frame. For every press it
//! decides whether the pointer scrolls the content, drags a scrollbar, or
//! belongs to the child:
//!
//! - A press inside the frame opens a [`TouchSession`] in
//!   [`TouchMode::Unknown`] and grabs the pointer. The child does not see
//!   the press yet.
//! - Moving more than `scroll_distance` on an enabled axis resolves the
//!   session to [`TouchMode::Scrolling`]. Moving that far on a disabled axis
//!   hands the pointer to the child at once.
//! - If neither happens within `scroll_timeout_ms`, the press is redelivered
//!   to the child, provided at least three frames have passed.
//! - Releasing while still undecided replays the press and (after a short
//!   grace period) the release to the child as a tap.
//!
//! Wheel steps bypass sessions entirely. All timing comes from
//! [`ScrollView::tick`], which the host calls once per frame.

use std::cell::Cell;
use std::rc::Rc;

use panview_animation::{AnimationScheduler, Tween, TweenId};
use panview_core::{
    Clock, Mark, Observable, Point, PointerButton, PointerEvent, Rect, Size, SubscriptionId,
    TaskId, Vec2, Widget, WidgetId, WidgetRegistry,
};

use crate::config::{ScrollConfig, ScrollKind};
use crate::effect::KinematicEffect;
use crate::error::{Result, ScrollError};
use crate::geometry::{self, Axis, BarHit, BarMetrics};
use crate::render::{BarRender, ScrollRenderInfo};
use crate::session::{GestureOutcome, SessionId, TouchMode, TouchSession};

/// Delay (s) between a replayed tap press and its release
const TAP_RELEASE_DELAY: f64 = 0.2;

/// Frames that must pass before an undecided press goes to the child
const MIN_RESOLVE_FRAMES: u64 = 3;

/// Deferred work owned by the view's clock
enum ViewportTask {
    /// Scroll timeout for a session
    ResolveMode(SessionId),
    /// Synthetic release of a replayed tap
    ReleaseTap(Box<PointerEvent>),
    StartBarFade,
    RefreshBounds,
}

#[derive(Clone, Copy)]
enum Phase {
    Down,
    Move,
    Up,
}

/// Single-child scrolling viewport
pub struct ScrollView {
    id: WidgetId,
    registry: WidgetRegistry,
    config: ScrollConfig,
    frame: Rect,
    content_size: Size,
    disabled: bool,

    child: Option<Box<dyn Widget>>,
    child_size_sub: Option<SubscriptionId>,
    /// Written by the child's size subscription, picked up on tick
    pending_child_size: Rc<Cell<Option<Size>>>,

    effect_x: KinematicEffect,
    effect_y: KinematicEffect,

    session: Option<TouchSession>,
    next_session: u64,
    /// Sequence redelivered after a timeout; its grabs reach the live event
    /// on the next delivery for that pointer
    handoff: Option<PointerEvent>,
    last_outcome: Option<GestureOutcome>,

    clock: Clock<ViewportTask>,
    animations: AnimationScheduler,
    bar_fade: Option<TweenId>,
    bar_fade_task: Option<TaskId>,
    bounds_task: Option<TaskId>,

    translation: Vec2,
    /// Fraction each axis takes whenever its content overflows the frame
    requested: Vec2,
    scroll_x: Observable<f32>,
    scroll_y: Observable<f32>,
    viewport_size: Observable<Size>,
    bar_alpha: Observable<f32>,
    render_info: Observable<ScrollRenderInfo>,
}

impl ScrollView {
    /// Create a view and register it in `registry`
    pub fn new(registry: &WidgetRegistry, config: ScrollConfig) -> Self {
        let id = registry.register("ScrollView");
        let effect_x = KinematicEffect::new(config.effect, config.kinetic);
        let effect_y = KinematicEffect::new(config.effect, config.kinetic);

        let mut view = Self {
            id,
            registry: registry.clone(),
            config,
            frame: Rect::ZERO,
            content_size: Size::ZERO,
            disabled: false,
            child: None,
            child_size_sub: None,
            pending_child_size: Rc::new(Cell::new(None)),
            effect_x,
            effect_y,
            session: None,
            next_session: 0,
            handoff: None,
            last_outcome: None,
            clock: Clock::new(),
            animations: AnimationScheduler::new(),
            bar_fade: None,
            bar_fade_task: None,
            bounds_task: None,
            translation: Vec2::ZERO,
            requested: Vec2::new(0.0, 1.0),
            scroll_x: Observable::new(0.0),
            scroll_y: Observable::new(0.0),
            viewport_size: Observable::new(Size::ZERO),
            bar_alpha: Observable::new(1.0),
            render_info: Observable::new(ScrollRenderInfo::default()),
        };
        view.update_from_scroll();
        view
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Size of the child as last observed
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn scroll_x(&self) -> f32 {
        *self.scroll_x.get()
    }

    pub fn scroll_y(&self) -> f32 {
        *self.scroll_y.get()
    }

    pub fn bar_alpha(&self) -> f32 {
        *self.bar_alpha.get()
    }

    pub fn viewport_size(&self) -> Size {
        *self.viewport_size.get()
    }

    pub fn render_info(&self) -> &ScrollRenderInfo {
        self.render_info.get()
    }

    /// Content origin in parent coordinates
    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    pub fn scroll_x_observable(&mut self) -> &mut Observable<f32> {
        &mut self.scroll_x
    }

    pub fn scroll_y_observable(&mut self) -> &mut Observable<f32> {
        &mut self.scroll_y
    }

    pub fn viewport_size_observable(&mut self) -> &mut Observable<Size> {
        &mut self.viewport_size
    }

    pub fn bar_alpha_observable(&mut self) -> &mut Observable<f32> {
        &mut self.bar_alpha
    }

    pub fn render_info_observable(&mut self) -> &mut Observable<ScrollRenderInfo> {
        &mut self.render_info
    }

    pub fn effect_x(&self) -> &KinematicEffect {
        &self.effect_x
    }

    pub fn effect_y(&self) -> &KinematicEffect {
        &self.effect_y
    }

    /// Session of the pointer currently held, if any
    pub fn session(&self) -> Option<&TouchSession> {
        self.session.as_ref()
    }

    /// How the most recent gesture ended
    pub fn last_outcome(&self) -> Option<GestureOutcome> {
        self.last_outcome
    }

    /// Horizontal bar position and length
    pub fn hbar(&self) -> BarMetrics {
        geometry::bar_metrics(self.frame.width(), self.content_size.width, self.scroll_x())
    }

    /// Vertical bar position and length
    pub fn vbar(&self) -> BarMetrics {
        geometry::bar_metrics(self.frame.height(), self.content_size.height, self.scroll_y())
    }

    /// Whether the content is larger than the frame along `axis`
    pub fn is_scrollable(&self, axis: Axis) -> bool {
        self.range(axis).is_some()
    }

    /// Convert a parent-space point into content space
    pub fn to_local(&self, point: Point) -> Point {
        point.offset(-self.translation)
    }

    /// Convert a content-space point into parent space
    pub fn to_parent(&self, point: Point) -> Point {
        point.offset(self.translation)
    }

    // =========================================================================
    // Child management
    // =========================================================================

    /// Attach the single child
    pub fn add_child(&mut self, mut child: Box<dyn Widget>) -> Result<()> {
        if self.child.is_some() {
            return Err(ScrollError::ChildAlreadyAttached);
        }

        let pending = Rc::clone(&self.pending_child_size);
        let sub = child
            .size_observable()
            .subscribe(move |size| pending.set(Some(*size)));
        let size = child.size();
        tracing::debug!("scroll view {:?} attached child {:?}", self.id, child.id());

        self.child = Some(child);
        self.child_size_sub = Some(sub);
        self.set_content_size(size);
        Ok(())
    }

    /// Detach and return the child
    pub fn remove_child(&mut self) -> Option<Box<dyn Widget>> {
        let mut child = self.child.take()?;
        if let Some(sub) = self.child_size_sub.take() {
            child.size_observable().unsubscribe(sub);
        }
        tracing::debug!("scroll view {:?} detached child {:?}", self.id, child.id());

        self.pending_child_size.set(None);
        self.abort_session();
        let dropped = self
            .clock
            .cancel_where(|task| matches!(task, ViewportTask::ReleaseTap(_)));
        if dropped > 0 {
            tracing::trace!("dropped {} pending tap releases", dropped);
        }
        self.set_content_size(Size::ZERO);
        Some(child)
    }

    pub fn child(&self) -> Option<&dyn Widget> {
        self.child.as_deref()
    }

    pub fn child_mut(&mut self) -> Option<&mut (dyn Widget + 'static)> {
        self.child.as_deref_mut()
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// Place the view in its parent
    pub fn set_frame(&mut self, frame: Rect) {
        if self.frame == frame {
            return;
        }
        self.frame = frame;
        self.refresh_effect_bounds();
        self.update_from_scroll();
    }

    /// A disabled view swallows presses without scrolling
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn set_scroll_x(&mut self, scroll: f32) {
        self.apply_scroll_fraction(Axis::X, scroll);
    }

    pub fn set_scroll_y(&mut self, scroll: f32) {
        self.apply_scroll_fraction(Axis::Y, scroll);
    }

    pub fn set_do_scroll_x(&mut self, enabled: bool) {
        self.config.do_scroll_x = enabled;
        self.publish_render_info();
    }

    pub fn set_do_scroll_y(&mut self, enabled: bool) {
        self.config.do_scroll_y = enabled;
        self.publish_render_info();
    }

    /// Enable or disable both axes
    pub fn set_do_scroll(&mut self, enabled: bool) {
        self.config.do_scroll_x = enabled;
        self.config.do_scroll_y = enabled;
        self.publish_render_info();
    }

    pub fn set_scroll_type(&mut self, kind: ScrollKind) {
        self.config.scroll_type = kind;
    }

    /// Replace the horizontal effect; it is placed at the current scroll
    pub fn set_effect_x(&mut self, effect: KinematicEffect) {
        self.effect_x = effect;
        self.adopt_effect(Axis::X);
    }

    /// Replace the vertical effect; it is placed at the current scroll
    pub fn set_effect_y(&mut self, effect: KinematicEffect) {
        self.effect_y = effect;
        self.adopt_effect(Axis::Y);
    }

    // =========================================================================
    // Frame driving
    // =========================================================================

    /// Advance one frame of `dt` seconds
    ///
    /// Fires due tasks, follows child resizes, integrates the effects and
    /// advances the bar fade. Returns whether more frames are needed.
    pub fn tick(&mut self, dt: f64) -> bool {
        for (_, task) in self.clock.advance(dt) {
            match task {
                ViewportTask::ResolveMode(session) => self.resolve_mode(session),
                ViewportTask::ReleaseTap(event) => self.replay_release(*event),
                ViewportTask::StartBarFade => self.start_bar_fade(),
                ViewportTask::RefreshBounds => {
                    self.bounds_task = None;
                    self.refresh_effect_bounds();
                    self.publish_render_info();
                }
            }
        }

        if let Some(size) = self.pending_child_size.take() {
            self.set_content_size(size);
        }

        for axis in Axis::BOTH {
            if self.effect(axis).needs_update() {
                self.effect_mut(axis).tick(dt as f32);
                self.sync_scroll_from_effect(axis);
            }
        }

        if let Some(fade) = self.bar_fade {
            self.animations.tick(dt as f32 * 1000.0);
            if let Some(alpha) = self.animations.value(fade) {
                self.bar_alpha.set(alpha);
            }
            if !self.animations.get(fade).is_some_and(Tween::is_playing) {
                self.animations.stop(fade);
                self.bar_fade = None;
            }
            self.publish_render_info();
        }

        self.is_animating()
    }

    /// Whether effects, fades or deferred tasks are still in flight
    pub fn is_animating(&self) -> bool {
        self.effect_x.needs_update()
            || self.effect_y.needs_update()
            || self.animations.has_active_animations()
            || self.clock.pending_count() > 0
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    pub fn on_pointer_down(&mut self, event: &mut PointerEvent) -> bool {
        if !self.frame.contains(event.pos) {
            event.mark(self.id, Mark::Avoid);
            return false;
        }
        if self.disabled {
            return true;
        }
        if self.handoff.as_ref().is_some_and(|h| h.id == event.id) {
            self.handoff = None;
        }

        if self.session.is_some() || !(self.config.do_scroll_x || self.config.do_scroll_y) {
            return self.dispatch(event, Phase::Down);
        }
        if self.child.is_none() {
            return true;
        }

        let enabled = BarHit {
            x: self.axis_enabled(Axis::X),
            y: self.axis_enabled(Axis::Y),
        };
        if !enabled.any() {
            return self.dispatch(event, Phase::Down);
        }

        let hit = if self.config.scroll_type.includes_bars() {
            geometry::bar_hit_test(event.pos, self.frame, &self.config.bar_placement(), enabled)
        } else {
            BarHit::default()
        };

        if event.is_wheel() {
            return self.on_wheel(event, hit);
        }

        let session_id = SessionId(self.next_session);
        self.next_session += 1;
        event.grab(self.id);
        event.mark(self.id, Mark::Claimed);

        if self.config.scroll_type.includes_content() {
            for axis in Axis::BOTH {
                if enabled.on(axis) && !hit.on(axis) {
                    let pos = axis.of_point(event.pos);
                    self.effect_mut(axis).start(pos, event.time_update);
                }
            }
        }

        let session = TouchSession::new(session_id, event, self.clock.frames(), hit);
        let mode = session.mode();
        self.session = Some(session);
        tracing::debug!(
            "scroll view {:?} opened session {:?} in {:?} (bar hit {:?})",
            self.id,
            session_id,
            mode,
            hit
        );

        if mode == TouchMode::BarDragging {
            return true;
        }

        if self.config.scroll_type == ScrollKind::Bars {
            // Nothing but the bars can scroll, so there is nothing to wait for
            self.resolve_mode(session_id);
        } else {
            let task = self.clock.schedule_once(
                self.config.scroll_timeout_secs(),
                ViewportTask::ResolveMode(session_id),
            );
            if let Some(session) = self.session.as_mut() {
                session.resolve_task = Some(task);
            }
        }
        true
    }

    pub fn on_pointer_move(&mut self, event: &mut PointerEvent) -> bool {
        if event.is_marked(self.id, Mark::Avoid) {
            return false;
        }
        self.apply_handoff(event);

        if !self.owns(event) {
            let handled = self.dispatch(event, Phase::Move);
            return handled || event.is_marked(self.id, Mark::Claimed);
        }
        if event.grab_current != Some(self.id) {
            return true;
        }
        self.drag(event)
    }

    pub fn on_pointer_up(&mut self, event: &mut PointerEvent) -> bool {
        if event.is_marked(self.id, Mark::Avoid) {
            return false;
        }
        self.apply_handoff(event);

        if !self.owns(event) {
            if event.is_grabbed_by(self.id) {
                // Grab without a session: nothing to finish
                event.ungrab(self.id);
                return true;
            }
            let handled = self.dispatch(event, Phase::Up);
            return handled || event.is_marked(self.id, Mark::Claimed);
        }

        event.ungrab(self.id);
        let Some(session) = self.session.take() else {
            return true;
        };
        if let Some(task) = session.resolve_task {
            self.clock.cancel(task);
        }

        if self.config.scroll_type.includes_content() {
            let hit = session.hit_bar();
            for axis in Axis::BOTH {
                if self.axis_enabled(axis) && !hit.on(axis) {
                    let pos = axis.of_point(event.pos);
                    self.effect_mut(axis).stop(pos, event.time_update);
                    self.sync_scroll_from_effect(axis);
                }
            }
        }

        let outcome = match session.mode() {
            TouchMode::Unknown => {
                if !session.user_stopped() {
                    self.dispatch(event, Phase::Down);
                }
                let mut release = event.clone();
                release.grab_current = None;
                self.clock
                    .schedule_once(TAP_RELEASE_DELAY, ViewportTask::ReleaseTap(Box::new(release)));
                GestureOutcome::Tapped
            }
            TouchMode::Scrolling => GestureOutcome::Scrolled,
            TouchMode::BarDragging => GestureOutcome::BarDragged,
        };
        tracing::debug!(
            "scroll view {:?} closed session {:?}: {:?}",
            self.id,
            session.id(),
            outcome
        );
        self.last_outcome = Some(outcome);

        // Content may have resized during the gesture
        if let Some(task) = self.bounds_task.take() {
            self.clock.cancel(task);
        }
        self.bounds_task = Some(self.clock.schedule_once(0.0, ViewportTask::RefreshBounds));
        true
    }

    // =========================================================================
    // Gesture handling
    // =========================================================================

    fn owns(&self, event: &PointerEvent) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.pointer() == event.id)
            && event.is_grabbed_by(self.id)
    }

    fn drag(&mut self, event: &mut PointerEvent) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.track(event);
        let hit = session.hit_bar();
        let mode = session.mode();

        for axis in Axis::BOTH {
            if !self.axis_enabled(axis) {
                continue;
            }
            if hit.on(axis) {
                self.drag_bar(axis, axis.of_vec(event.delta));
            } else if self.config.scroll_type.includes_content() {
                let pos = axis.of_point(event.pos);
                self.effect_mut(axis).update(pos, event.time_update);
                self.sync_scroll_from_effect(axis);
            }
        }

        if mode == TouchMode::Unknown {
            let distance = self.config.scroll_distance;
            let exceeded = self.session.as_mut().and_then(|s| {
                s.accumulate(event.delta);
                s.exceeded_axis(distance)
            });

            if let Some(axis) = exceeded {
                if !self.axis_enabled(axis) {
                    self.release_to_child(event);
                    return false;
                }
                if let Some(session) = self.session.as_mut() {
                    session.begin_scrolling();
                    if let Some(task) = session.resolve_task.take() {
                        self.clock.cancel(task);
                    }
                    tracing::debug!(
                        "scroll view {:?} session {:?} scrolling along {:?}",
                        self.id,
                        session.id(),
                        axis
                    );
                }
            }
        }

        if let Some(session) = self.session.as_mut() {
            if session.mode() == TouchMode::Scrolling {
                session.mark_scrolling(event.time_update);
            }
        }
        true
    }

    /// Map a pointer delta on a bar to a scroll fraction change
    fn drag_bar(&mut self, axis: Axis, delta: f32) {
        let frame_len = axis.of_size(self.frame.size);
        let length = match axis {
            Axis::X => self.hbar().length,
            Axis::Y => self.vbar().length,
        };
        let track = frame_len * (1.0 - length);
        if track <= 0.0 {
            return;
        }
        let scroll = self.scroll_value(axis) + delta / track;
        self.apply_scroll_fraction(axis, scroll);
    }

    /// Give up the live pointer and press the child with it
    fn release_to_child(&mut self, event: &mut PointerEvent) {
        let Some(session) = self.session.take() else {
            return;
        };
        if let Some(task) = session.resolve_task {
            self.clock.cancel(task);
        }
        self.cancel_effects();
        event.ungrab(self.id);
        tracing::debug!(
            "scroll view {:?} released session {:?} to child (travel {:?})",
            self.id,
            session.id(),
            session.accum()
        );
        self.last_outcome = Some(GestureOutcome::PassedThrough);
        self.dispatch(event, Phase::Down);
    }

    /// Scroll timeout: hand an undecided press to the child
    fn resolve_mode(&mut self, session_id: SessionId) {
        let frames = self.clock.frames();
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.id() != session_id {
            return;
        }
        session.resolve_task = None;
        if session.mode() != TouchMode::Unknown || session.user_stopped() {
            return;
        }

        if session.frames_since_start(frames) < MIN_RESOLVE_FRAMES {
            let task = self
                .clock
                .schedule_once(0.0, ViewportTask::ResolveMode(session_id));
            session.resolve_task = Some(task);
            return;
        }

        let Some(session) = self.session.take() else {
            return;
        };
        self.cancel_effects();
        tracing::debug!(
            "scroll view {:?} session {:?} timed out, pressing child",
            self.id,
            session_id
        );
        self.last_outcome = Some(GestureOutcome::PassedThrough);

        let mut press = session.press;
        press.ungrab(self.id);
        self.dispatch(&mut press, Phase::Down);
        self.handoff = Some(press);
    }

    /// Carry grabs made on a redelivered copy over to the live event
    fn apply_handoff(&mut self, event: &mut PointerEvent) {
        if !self.handoff.as_ref().is_some_and(|h| h.id == event.id) {
            return;
        }
        if let Some(press) = self.handoff.take() {
            event.ungrab(self.id);
            event.absorb(&press);
        }
    }

    /// Release a replayed tap, then notify every widget that grabbed it
    fn replay_release(&mut self, mut event: PointerEvent) {
        self.dispatch(&mut event, Phase::Up);
        for widget in event.take_grab_list() {
            if !self.registry.is_alive(widget) {
                tracing::trace!("skipping released grab {:?}", widget);
                continue;
            }
            event.grab_current = Some(widget);
            self.dispatch(&mut event, Phase::Up);
        }
        event.grab_current = None;
    }

    fn on_wheel(&mut self, event: &mut PointerEvent, hit: BarHit) -> bool {
        let target = if event.button.is_vertical_wheel() && self.axis_enabled(Axis::Y) {
            Some(if hit.x { Axis::X } else { Axis::Y })
        } else if event.button.is_horizontal_wheel() && self.axis_enabled(Axis::X) {
            Some(if hit.y { Axis::Y } else { Axis::X })
        } else {
            None
        };
        let Some(axis) = target else {
            return self.dispatch(event, Phase::Down);
        };

        let step = self.config.scroll_wheel_distance;
        let delta = match event.button {
            PointerButton::ScrollDown | PointerButton::ScrollLeft => -step,
            _ => step,
        };
        self.effect_mut(axis).nudge(delta);
        tracing::trace!("wheel {:?} on {:?}: {:.1}", event.button, axis, delta);
        self.sync_scroll_from_effect(axis);

        // The matching release is not ours to forward
        event.mark(self.id, Mark::Avoid);
        true
    }

    fn abort_session(&mut self) {
        self.handoff = None;
        if let Some(session) = self.session.take() {
            if let Some(task) = session.resolve_task {
                self.clock.cancel(task);
            }
            self.cancel_effects();
        }
    }

    fn cancel_effects(&mut self) {
        for axis in Axis::BOTH {
            self.effect_mut(axis).cancel();
            self.sync_scroll_from_effect(axis);
        }
    }

    /// Deliver an event to the child in content coordinates
    fn dispatch(&mut self, event: &mut PointerEvent, phase: Phase) -> bool {
        let offset = -self.translation;
        let Some(child) = self.child.as_mut() else {
            return false;
        };
        event.transformed(offset, |ev| match phase {
            Phase::Down => child.on_pointer_down(ev),
            Phase::Move => child.on_pointer_move(ev),
            Phase::Up => child.on_pointer_up(ev),
        })
    }

    // =========================================================================
    // Scroll state
    // =========================================================================

    fn effect(&self, axis: Axis) -> &KinematicEffect {
        match axis {
            Axis::X => &self.effect_x,
            Axis::Y => &self.effect_y,
        }
    }

    fn effect_mut(&mut self, axis: Axis) -> &mut KinematicEffect {
        match axis {
            Axis::X => &mut self.effect_x,
            Axis::Y => &mut self.effect_y,
        }
    }

    fn scroll_value(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.scroll_x(),
            Axis::Y => self.scroll_y(),
        }
    }

    fn scroll_observable_mut(&mut self, axis: Axis) -> &mut Observable<f32> {
        match axis {
            Axis::X => &mut self.scroll_x,
            Axis::Y => &mut self.scroll_y,
        }
    }

    fn do_scroll(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.config.do_scroll_x,
            Axis::Y => self.config.do_scroll_y,
        }
    }

    fn range(&self, axis: Axis) -> Option<f32> {
        geometry::scroll_range(axis.of_size(self.frame.size), axis.of_size(self.content_size))
    }

    /// Allowed by configuration and larger than the frame
    fn axis_enabled(&self, axis: Axis) -> bool {
        self.do_scroll(axis) && self.is_scrollable(axis)
    }

    fn set_content_size(&mut self, size: Size) {
        if self.content_size == size {
            return;
        }
        self.content_size = size;
        self.viewport_size.set(size);
        self.refresh_effect_bounds();
        self.update_from_scroll();
    }

    /// Recompute effect bounds from the frame and content sizes
    ///
    /// An effect is only repositioned when its bounds actually change, so a
    /// refresh with unchanged sizes leaves it untouched. An axis whose content
    /// fits is pinned at 0; once it overflows it resumes the requested
    /// fraction.
    pub fn refresh_effect_bounds(&mut self) {
        let mut moved = false;
        for axis in Axis::BOTH {
            let frame_len = axis.of_size(self.frame.size);
            let range = self.range(axis);
            let min = range.map_or(0.0, |range| -range);
            let scroll = if range.is_some() {
                axis.of_vec(self.requested)
            } else {
                0.0
            };

            let effect = self.effect_mut(axis);
            effect.set_extent(frame_len);
            if effect.bounds() == (min, 0.0) {
                continue;
            }
            effect.set_bounds(min, 0.0);
            effect.reposition(min * scroll);
            tracing::trace!("{:?} effect bounds ({:.1}, 0.0)", axis, min);
            moved |= self.scroll_observable_mut(axis).set(scroll);
        }
        if moved {
            self.update_from_scroll();
        }
    }

    /// Give a new effect the current bounds and scroll position
    fn adopt_effect(&mut self, axis: Axis) {
        let frame_len = axis.of_size(self.frame.size);
        let min = self.range(axis).map_or(0.0, |range| -range);
        let scroll = self.scroll_value(axis);

        let effect = self.effect_mut(axis);
        effect.set_extent(frame_len);
        effect.set_bounds(min, 0.0);
        effect.reposition(min * scroll);
        self.publish_render_info();
    }

    /// Re-derive a scroll fraction from its effect
    fn sync_scroll_from_effect(&mut self, axis: Axis) {
        let scroll = match self.range(axis) {
            Some(range) => {
                let scroll = (-self.effect(axis).value() / range).clamp(0.0, 1.0);
                self.set_requested(axis, scroll);
                scroll
            }
            None => 0.0,
        };
        if self.scroll_observable_mut(axis).set(scroll) {
            self.update_from_scroll();
        } else {
            self.publish_render_info();
        }
    }

    fn set_requested(&mut self, axis: Axis, scroll: f32) {
        match axis {
            Axis::X => self.requested.x = scroll,
            Axis::Y => self.requested.y = scroll,
        }
    }

    /// Write a scroll fraction and move the effect to match
    ///
    /// On an axis whose content fits, the fraction stays at 0 and `scroll`
    /// is kept for when the content overflows.
    fn apply_scroll_fraction(&mut self, axis: Axis, scroll: f32) {
        if !scroll.is_finite() {
            return;
        }
        let scroll = scroll.clamp(0.0, 1.0);
        self.set_requested(axis, scroll);
        let scroll = if self.is_scrollable(axis) { scroll } else { 0.0 };
        let min = self.effect(axis).min();
        self.effect_mut(axis).reposition(min * scroll);
        if self.scroll_observable_mut(axis).set(scroll) {
            self.update_from_scroll();
        }
    }

    /// Recompute the translation and wake the bars
    fn update_from_scroll(&mut self) {
        self.translation = geometry::content_translation(
            self.frame,
            self.content_size,
            self.scroll_x(),
            self.scroll_y(),
        );
        self.show_bars();
        self.publish_render_info();
    }

    // =========================================================================
    // Bar fade
    // =========================================================================

    fn show_bars(&mut self) {
        if let Some(fade) = self.bar_fade.take() {
            self.animations.stop(fade);
        }
        if let Some(task) = self.bar_fade_task.take() {
            self.clock.cancel(task);
        }
        self.bar_alpha.set(1.0);

        let delay = f64::from(self.config.bar_fade_delay_ms) / 1000.0;
        self.bar_fade_task = Some(self.clock.schedule_once(delay, ViewportTask::StartBarFade));
    }

    fn start_bar_fade(&mut self) {
        self.bar_fade_task = None;
        // Bars that take input stay faintly visible
        let target = if self.config.scroll_type == ScrollKind::Content {
            0.0
        } else {
            self.config.bar_rest_alpha
        };
        let tween = Tween::new(
            self.bar_alpha(),
            target,
            self.config.bar_fade_duration_ms,
            self.config.bar_fade_easing,
        );
        if let Some(previous) = self.bar_fade.replace(self.animations.start(tween)) {
            self.animations.stop(previous);
        }
    }

    fn publish_render_info(&mut self) {
        let visible = BarHit {
            x: self.axis_enabled(Axis::X),
            y: self.axis_enabled(Axis::Y),
        };
        let (hbar, vbar) = geometry::bar_rects(
            self.frame,
            self.hbar(),
            self.vbar(),
            &self.config.bar_placement(),
            visible,
        );
        let alpha = self.bar_alpha();
        let color = self.config.bar_color().fade(alpha);

        let info = ScrollRenderInfo {
            translation: self.translation,
            overscroll: Vec2::new(
                self.effect_x.visual_overscroll(),
                self.effect_y.visual_overscroll(),
            ),
            hbar: hbar.map(|rect| BarRender { rect, color }),
            vbar: vbar.map(|rect| BarRender { rect, color }),
            bar_alpha: alpha,
            content_opacity: self
                .effect_x
                .content_opacity()
                .min(self.effect_y.content_opacity()),
        };
        self.render_info.set(info);
    }
}

impl Drop for ScrollView {
    fn drop(&mut self) {
        if let (Some(child), Some(sub)) = (self.child.as_mut(), self.child_size_sub.take()) {
            child.size_observable().unsubscribe(sub);
        }
        self.registry.unregister(self.id);
    }
}

impl std::fmt::Debug for ScrollView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollView")
            .field("id", &self.id)
            .field("frame", &self.frame)
            .field("content_size", &self.content_size)
            .field("scroll_x", &self.scroll_x())
            .field("scroll_y", &self.scroll_y())
            .field("session", &self.session.as_ref().map(TouchSession::mode))
            .finish()
    }
}
