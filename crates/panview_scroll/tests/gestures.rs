//! Integration tests for press classification
//!
//! These tests drive a full view through pointer sequences and check:
//! - When a drag turns into a scroll and when it is handed to the child
//! - Tap replay, including the delayed release and grab-list walk
//! - Timeout hand-off and its three-frame floor
//! - Scrollbar dragging

mod common;

use common::{Harness, Kind};
use panview_core::{Mark, Point, PointerEvent, PointerId, Size};
use panview_scroll::{GestureOutcome, ScrollConfig, ScrollKind, TouchMode};

const TALL: Size = Size::new(400.0, 1600.0);

fn center() -> Point {
    Point::new(200.0, 200.0)
}

/// Pointer travels 30px up (y-up) within 100ms, pulling the content along
#[test]
fn test_drag_past_distance_scrolls() {
    let mut h = Harness::new(ScrollConfig::default(), TALL);
    assert_eq!(h.view.scroll_y(), 1.0);

    let mut ev = h.press(center());
    assert_eq!(h.view.session().unwrap().mode(), TouchMode::Unknown);

    h.drag_by(&mut ev, 0.0, 20.0, 2, 0.03);
    assert_eq!(h.view.session().unwrap().mode(), TouchMode::Unknown);

    h.drag_by(&mut ev, 0.0, 10.0, 1, 0.03);
    let session = h.view.session().unwrap();
    assert_eq!(session.mode(), TouchMode::Scrolling);
    assert!(session.user_stopped());

    // 30px over a 1200px range
    assert!((h.view.scroll_y() - 0.975).abs() < 1e-4);
    assert!(h.kinds().is_empty());

    h.release(&mut ev, 0.01);
    assert_eq!(h.view.last_outcome(), Some(GestureOutcome::Scrolled));
    assert!(h.view.session().is_none());
    assert!(!ev.is_grabbed_by(h.view.id()));

    // The release carries momentum and the child never hears about any of it
    h.settle();
    assert!(h.view.scroll_y() < 0.975);
    assert!(h.kinds().is_empty());
}

#[test]
fn test_short_press_is_replayed_as_tap() {
    let mut h = Harness::new(ScrollConfig::default(), TALL);
    let mut ev = h.press(center());
    h.move_to(&mut ev, Point::new(200.0, 205.0), 0.02);

    let session = h.view.session().unwrap();
    assert_eq!(session.mode(), TouchMode::Unknown);
    assert!(!session.user_stopped());
    assert!(h.kinds().is_empty());

    h.release(&mut ev, 0.03);
    assert_eq!(h.view.last_outcome(), Some(GestureOutcome::Tapped));
    assert_eq!(h.kinds(), vec![Kind::Down]);
    let down = &h.deliveries()[0];
    assert_eq!(down.pos, h.view.to_local(Point::new(200.0, 205.0)));

    // The synthetic release waits out the grace period
    h.advance(0.1);
    assert_eq!(h.kinds(), vec![Kind::Down]);
    h.advance(0.15);
    assert_eq!(h.kinds(), vec![Kind::Down, Kind::Up]);

    // No fling from a tap
    assert!((h.view.scroll_y() - 1195.0 / 1200.0).abs() < 1e-4);
}

#[test]
fn test_tap_release_walks_grab_list() {
    let mut h = Harness::with_grabbing_child(ScrollConfig::default(), TALL);
    let listener = h.registry.register("listener");
    let gone = h.registry.register("gone");

    let mut ev = h.press(center());
    ev.grab(listener);
    ev.grab(gone);
    h.release(&mut ev, 0.05);

    // Widget released before the replay is skipped
    h.registry.unregister(gone);
    h.advance(0.25);

    let deliveries = h.deliveries();
    let grabs: Vec<_> = deliveries
        .iter()
        .filter(|d| d.kind == Kind::Up)
        .map(|d| d.grab_current)
        .collect();
    assert_eq!(deliveries[0].kind, Kind::Down);
    assert_eq!(grabs, vec![None, Some(listener), Some(h.child_id)]);
}

#[test]
fn test_disabled_axis_drag_goes_to_child() {
    let config = ScrollConfig::default().with_do_scroll_y(false);
    let mut h = Harness::new(config, Size::new(800.0, 1600.0));

    let mut ev = h.press(center());
    assert!(h.view.session().is_some());

    h.drag_by(&mut ev, 0.0, 20.0, 2, 0.01);
    assert!(h.kinds().is_empty());

    let handled = h.move_to(&mut ev, Point::new(200.0, 230.0), 0.01);
    assert!(!handled);
    assert!(h.view.session().is_none());
    assert_eq!(h.view.last_outcome(), Some(GestureOutcome::PassedThrough));
    assert!(!ev.is_grabbed_by(h.view.id()));
    assert_eq!(h.kinds(), vec![Kind::Down]);
    assert_eq!(h.view.scroll_y(), 1.0);

    // The rest of the sequence flows to the child
    h.move_to(&mut ev, Point::new(200.0, 240.0), 0.01);
    h.release(&mut ev, 0.01);
    assert_eq!(h.kinds(), vec![Kind::Down, Kind::Move, Kind::Up]);
}

#[test]
fn test_narrow_content_never_scrolls_horizontally() {
    let mut h = Harness::new(ScrollConfig::default(), Size::new(300.0, 1600.0));
    let hbar = h.view.hbar();
    assert_eq!(hbar.length, 1.0);
    assert_eq!(hbar.position, 0.0);
    assert!(h.view.render_info().hbar.is_none());

    let mut ev = h.press(center());
    for _ in 0..20 {
        let to = Point::new(ev.pos.x + 10.0, ev.pos.y);
        h.move_to(&mut ev, to, 0.01);
        if let Some(session) = h.view.session() {
            assert_ne!(session.mode(), TouchMode::Scrolling);
        }
    }
    assert_eq!(h.view.last_outcome(), Some(GestureOutcome::PassedThrough));
    assert_eq!(h.view.scroll_x(), 0.0);
    assert_eq!(h.view.scroll_y(), 1.0);
}

#[test]
fn test_still_press_times_out_to_child() {
    let mut h = Harness::with_grabbing_child(ScrollConfig::default(), TALL);
    let mut ev = h.press(center());

    h.advance(0.2);
    assert!(h.kinds().is_empty());
    assert!(h.view.session().is_some());

    h.advance(0.1);
    assert_eq!(h.kinds(), vec![Kind::Down]);
    assert!(h.view.session().is_none());
    assert_eq!(h.view.last_outcome(), Some(GestureOutcome::PassedThrough));

    // The live event picks up the child's grab and loses the view's
    h.move_to(&mut ev, Point::new(200.0, 210.0), 0.01);
    assert!(!ev.is_grabbed_by(h.view.id()));
    assert!(ev.is_grabbed_by(h.child_id));
    assert_eq!(h.kinds(), vec![Kind::Down, Kind::Move]);

    h.release(&mut ev, 0.01);
    assert_eq!(h.kinds(), vec![Kind::Down, Kind::Move, Kind::Up]);
}

#[test]
fn test_timeout_waits_for_three_frames() {
    let mut h = Harness::new(ScrollConfig::default(), TALL);
    h.press(center());

    // 5 fps: the timeout is due on the second frame
    h.view.tick(0.2);
    h.view.tick(0.2);
    assert!(h.kinds().is_empty());
    assert!(h.view.session().is_some());

    h.view.tick(0.2);
    assert_eq!(h.kinds(), vec![Kind::Down]);
}

#[test]
fn test_resolution_does_not_depend_on_frame_rate() {
    for dt in [1.0 / 240.0, 1.0 / 60.0, 0.2] {
        // Too little travel: hand-off
        let mut h = Harness::new(ScrollConfig::default(), TALL);
        let mut ev = h.press(center());
        h.drag_by(&mut ev, 0.0, 16.0, 2, 0.05);
        for _ in 0..((0.6 / dt) as usize).max(3) {
            h.view.tick(dt);
        }
        assert_eq!(
            h.view.last_outcome(),
            Some(GestureOutcome::PassedThrough),
            "dt={dt}"
        );

        // Enough travel before the timeout: scroll
        let mut h = Harness::new(ScrollConfig::default(), TALL);
        let mut ev = h.press(center());
        h.view.tick(dt);
        h.drag_by(&mut ev, 0.0, 30.0, 3, 0.02);
        for _ in 0..((0.6 / dt) as usize).max(3) {
            h.view.tick(dt);
        }
        assert_eq!(
            h.view.session().map(|s| s.mode()),
            Some(TouchMode::Scrolling),
            "dt={dt}"
        );
        assert!(h.kinds().is_empty(), "dt={dt}");
    }
}

#[test]
fn test_vertical_bar_drag() {
    let config = ScrollConfig::default()
        .with_scroll_type(ScrollKind::Bars)
        .with_bar_width(10.0);
    let mut h = Harness::new(config, TALL);

    let mut ev = h.press(Point::new(395.0, 200.0));
    let session = h.view.session().unwrap();
    assert_eq!(session.mode(), TouchMode::BarDragging);
    assert!(session.hit_bar().y);

    // Bar is a quarter of the track: 300px of travel covers the whole range
    h.move_to(&mut ev, Point::new(395.0, 160.0), 0.02);
    assert!((h.view.scroll_y() - (1.0 - 40.0 / 300.0)).abs() < 1e-4);
    assert!((h.view.effect_y().value() - h.view.effect_y().min() * h.view.scroll_y()).abs() < 1e-2);

    h.drag_by(&mut ev, 0.0, -1000.0, 4, 0.02);
    assert_eq!(h.view.scroll_y(), 0.0);

    h.release(&mut ev, 0.02);
    assert_eq!(h.view.last_outcome(), Some(GestureOutcome::BarDragged));
    h.advance(0.5);
    assert!(h.kinds().is_empty());
}

#[test]
fn test_bars_only_content_press_goes_to_child() {
    let config = ScrollConfig::default()
        .with_scroll_type(ScrollKind::Bars)
        .with_bar_width(10.0);
    let mut h = Harness::new(config, TALL);

    h.press(center());
    assert_eq!(h.view.session().unwrap().mode(), TouchMode::Unknown);

    h.frames(2);
    assert!(h.kinds().is_empty());
    h.frames(1);
    assert_eq!(h.kinds(), vec![Kind::Down]);
    assert_eq!(h.view.scroll_y(), 1.0);
}

#[test]
fn test_content_drag_ignores_bar_zone_without_bar_input() {
    let config = ScrollConfig::default().with_bar_width(10.0);
    let mut h = Harness::new(config, TALL);

    let ev = h.press(Point::new(395.0, 200.0));
    assert!(!h.view.session().unwrap().hit_bar().any());
    assert!(ev.is_marked(h.view.id(), Mark::Claimed));
}

#[test]
fn test_press_outside_frame_is_avoided() {
    let mut h = Harness::new(ScrollConfig::default(), TALL);
    let mut ev = h.press(Point::new(500.0, 200.0));
    assert!(ev.is_marked(h.view.id(), Mark::Avoid));
    assert!(h.view.session().is_none());

    assert!(!h.move_to(&mut ev, Point::new(510.0, 260.0), 0.02));
    assert!(!h.release(&mut ev, 0.02));
    assert!(h.kinds().is_empty());
}

#[test]
fn test_disabled_view_swallows_press() {
    let mut h = Harness::new(ScrollConfig::default(), TALL);
    h.view.set_disabled(true);

    let mut ev = PointerEvent::new(PointerId(1), center(), 0.0);
    assert!(h.view.on_pointer_down(&mut ev));
    assert!(h.view.session().is_none());
    assert!(h.kinds().is_empty());
}

#[test]
fn test_second_pointer_goes_to_child() {
    let mut h = Harness::new(ScrollConfig::default(), TALL);
    let _first = h.press_with(PointerId(1), center());
    let _second = h.press_with(PointerId(2), Point::new(100.0, 100.0));

    assert_eq!(h.view.session().unwrap().pointer(), PointerId(1));
    let deliveries = h.deliveries();
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].pointer, PointerId(2));
    assert_eq!(deliveries[0].kind, Kind::Down);
}

#[test]
fn test_fitting_content_passes_press_through() {
    let mut h = Harness::new(ScrollConfig::default(), Size::new(300.0, 300.0));
    h.press(center());
    assert!(h.view.session().is_none());
    assert_eq!(h.kinds(), vec![Kind::Down]);

    // Short content is anchored to the top of the frame
    assert_eq!(h.deliveries()[0].pos, Point::new(200.0, 100.0));
}
