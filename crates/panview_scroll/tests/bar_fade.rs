//! Scrollbar fade timing

mod common;

use common::Harness;
use panview_core::{Point, Size};
use panview_scroll::{Easing, ScrollConfig, ScrollKind};

const TALL: Size = Size::new(400.0, 1600.0);

#[test]
fn test_content_bars_fade_out_completely() {
    let mut h = Harness::new(ScrollConfig::default(), TALL);
    assert_eq!(h.view.bar_alpha(), 1.0);

    // Fully visible through the delay
    h.advance(0.45);
    assert_eq!(h.view.bar_alpha(), 1.0);

    h.advance(0.15);
    let alpha = h.view.bar_alpha();
    assert!(alpha > 0.0 && alpha < 1.0, "alpha={alpha}");

    h.advance(0.5);
    assert_eq!(h.view.bar_alpha(), 0.0);
    assert!(!h.view.is_animating());

    let vbar = h.view.render_info().vbar.expect("vertical bar");
    assert_eq!(vbar.color.a, 0.0);
}

#[test]
fn test_interactive_bars_rest_visible() {
    let config = ScrollConfig::default().with_scroll_type(ScrollKind::Both);
    let mut h = Harness::new(config, TALL);
    h.advance(1.1);
    assert!((h.view.bar_alpha() - 0.2).abs() < 1e-5);

    let vbar = h.view.render_info().vbar.expect("vertical bar");
    assert!((vbar.color.a - 0.9 * 0.2).abs() < 1e-5);
}

#[test]
fn test_scrolling_wakes_bars() {
    let mut h = Harness::new(ScrollConfig::default(), TALL);
    h.advance(1.1);
    assert_eq!(h.view.bar_alpha(), 0.0);

    h.view.set_scroll_y(0.5);
    assert_eq!(h.view.bar_alpha(), 1.0);
    assert_eq!(h.view.render_info().bar_alpha, 1.0);

    // A drag keeps them awake while it lasts
    let mut ev = h.press(Point::new(200.0, 200.0));
    for _ in 0..60 {
        let to = Point::new(200.0, ev.pos.y + 2.0);
        h.move_to(&mut ev, to, 1.0 / 60.0);
        h.frames(1);
    }
    assert_eq!(h.view.bar_alpha(), 1.0);
    h.release(&mut ev, 0.0);

    h.settle();
    assert_eq!(h.view.bar_alpha(), 0.0);
}

#[test]
fn test_fade_interrupted_by_scroll_restarts_delay() {
    let mut h = Harness::new(ScrollConfig::default(), TALL);
    h.advance(0.7);
    assert!(h.view.bar_alpha() < 1.0);

    h.view.set_scroll_y(0.25);
    assert_eq!(h.view.bar_alpha(), 1.0);
    h.advance(0.45);
    assert_eq!(h.view.bar_alpha(), 1.0);
    h.advance(0.7);
    assert_eq!(h.view.bar_alpha(), 0.0);
}

#[test]
fn test_linear_fade_curve() {
    let config = ScrollConfig::default().with_bar_fade_easing(Easing::Linear);
    let mut h = Harness::new(config, TALL);

    // Roughly halfway through the fade
    h.frames(45);
    let alpha = h.view.bar_alpha();
    assert!(alpha > 0.35 && alpha < 0.6, "alpha={alpha}");

    h.advance(0.5);
    assert_eq!(h.view.bar_alpha(), 0.0);
}
