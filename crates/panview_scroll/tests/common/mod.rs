//! Shared harness for scroll view integration tests
//!
//! A [`RecordingChild`] logs every event the view forwards to it, and a
//! [`Harness`] drives a 400x400 view with a single pointer and a 60 fps
//! frame clock.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use panview_core::{
    Observable, Point, PointerEvent, PointerId, Rect, Size, Widget, WidgetId, WidgetRegistry,
};
use panview_scroll::{ScrollConfig, ScrollView};

pub const FRAME: f64 = 1.0 / 60.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Down,
    Move,
    Up,
}

/// One event as seen by the child
#[derive(Clone, Debug)]
pub struct Delivery {
    pub kind: Kind,
    pub pointer: PointerId,
    pub pos: Point,
    pub grab_current: Option<WidgetId>,
}

pub type Log = Rc<RefCell<Vec<Delivery>>>;

pub struct RecordingChild {
    id: WidgetId,
    size: Observable<Size>,
    log: Log,
    grab_on_down: bool,
}

impl RecordingChild {
    pub fn new(registry: &WidgetRegistry, size: Size) -> (Self, Log) {
        let log = Log::default();
        let child = Self {
            id: registry.register("RecordingChild"),
            size: Observable::new(size),
            log: Rc::clone(&log),
            grab_on_down: false,
        };
        (child, log)
    }

    /// Grab every press, like a button would
    pub fn grabbing(mut self) -> Self {
        self.grab_on_down = true;
        self
    }

    fn record(&self, kind: Kind, event: &PointerEvent) {
        self.log.borrow_mut().push(Delivery {
            kind,
            pointer: event.id,
            pos: event.pos,
            grab_current: event.grab_current,
        });
    }
}

impl Widget for RecordingChild {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn on_pointer_down(&mut self, event: &mut PointerEvent) -> bool {
        self.record(Kind::Down, event);
        if self.grab_on_down {
            event.grab(self.id);
        }
        true
    }

    fn on_pointer_move(&mut self, event: &mut PointerEvent) -> bool {
        self.record(Kind::Move, event);
        true
    }

    fn on_pointer_up(&mut self, event: &mut PointerEvent) -> bool {
        self.record(Kind::Up, event);
        true
    }

    fn size(&self) -> Size {
        *self.size.get()
    }

    fn size_observable(&mut self) -> &mut Observable<Size> {
        &mut self.size
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

pub struct Harness {
    pub registry: WidgetRegistry,
    pub view: ScrollView,
    pub log: Log,
    pub child_id: WidgetId,
    pub time: f64,
}

impl Harness {
    pub fn new(config: ScrollConfig, content: Size) -> Self {
        Self::build(config, content, false)
    }

    /// Child grabs every press it receives
    pub fn with_grabbing_child(config: ScrollConfig, content: Size) -> Self {
        Self::build(config, content, true)
    }

    fn build(config: ScrollConfig, content: Size, grabbing: bool) -> Self {
        init_tracing();
        let registry = WidgetRegistry::new();
        let mut view = ScrollView::new(&registry, config);
        view.set_frame(Rect::new(0.0, 0.0, 400.0, 400.0));

        let (child, log) = RecordingChild::new(&registry, content);
        let child = if grabbing { child.grabbing() } else { child };
        let child_id = child.id();
        view.add_child(Box::new(child)).expect("fresh view accepts a child");

        Self {
            registry,
            view,
            log,
            child_id,
            time: 0.0,
        }
    }

    pub fn press(&mut self, pos: Point) -> PointerEvent {
        self.press_with(PointerId(1), pos)
    }

    pub fn press_with(&mut self, pointer: PointerId, pos: Point) -> PointerEvent {
        let mut event = PointerEvent::new(pointer, pos, self.time);
        self.view.on_pointer_down(&mut event);
        event
    }

    /// Move the pointer after `dt` seconds, delivering through the view's
    /// grab when it holds one
    pub fn move_to(&mut self, event: &mut PointerEvent, pos: Point, dt: f64) -> bool {
        self.time += dt;
        event.move_to(pos, self.time);
        let view_id = self.view.id();
        event.grab_current = event.is_grabbed_by(view_id).then_some(view_id);
        self.view.on_pointer_move(event)
    }

    /// Move by `(dx, dy)` in `steps` equal moves, `dt` seconds apart
    pub fn drag_by(&mut self, event: &mut PointerEvent, dx: f32, dy: f32, steps: u32, dt: f64) {
        for _ in 0..steps {
            let pos = Point::new(event.pos.x + dx / steps as f32, event.pos.y + dy / steps as f32);
            self.move_to(event, pos, dt);
        }
    }

    pub fn release(&mut self, event: &mut PointerEvent, dt: f64) -> bool {
        self.time += dt;
        event.time_update = self.time;
        let view_id = self.view.id();
        event.grab_current = event.is_grabbed_by(view_id).then_some(view_id);
        self.view.on_pointer_up(event)
    }

    pub fn frames(&mut self, count: usize) {
        for _ in 0..count {
            self.time += FRAME;
            self.view.tick(FRAME);
        }
    }

    /// Run frames until `seconds` have passed
    pub fn advance(&mut self, seconds: f64) {
        let frames = (seconds / FRAME).ceil() as usize;
        self.frames(frames);
    }

    /// Tick until effects and fades are idle
    pub fn settle(&mut self) {
        let mut frames = 0;
        while self.view.tick(FRAME) {
            self.time += FRAME;
            frames += 1;
            assert!(frames < 5000, "view never settled");
        }
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.log.borrow().clone()
    }

    pub fn kinds(&self) -> Vec<Kind> {
        self.log.borrow().iter().map(|d| d.kind).collect()
    }
}
