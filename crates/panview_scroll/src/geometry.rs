//! Scroll geometry
//!
//! Pure functions from frame size, content size and scroll fraction to bar
//! metrics, content translation and bar hit zones. Coordinates are y-up:
//! `scroll_y = 1` shows the top of the content.

use panview_core::{Point, Rect, Size, Vec2};

use crate::config::{BarPlacement, HorizontalBarSide, VerticalBarSide};

/// Scroll axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::X, Axis::Y];

    /// Component of a size along this axis
    pub fn of_size(self, size: Size) -> f32 {
        match self {
            Axis::X => size.width,
            Axis::Y => size.height,
        }
    }

    pub fn of_point(self, point: Point) -> f32 {
        match self {
            Axis::X => point.x,
            Axis::Y => point.y,
        }
    }

    pub fn of_vec(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }
}

/// Position and length of a bar as fractions of its track
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarMetrics {
    pub position: f32,
    pub length: f32,
}

impl BarMetrics {
    /// Bar covering the whole track (nothing to scroll)
    pub const FULL: BarMetrics = BarMetrics {
        position: 0.0,
        length: 1.0,
    };
}

/// Which bar hit zones contain a point
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BarHit {
    /// On the horizontal bar's track
    pub x: bool,
    /// On the vertical bar's track
    pub y: bool,
}

impl BarHit {
    pub fn any(&self) -> bool {
        self.x || self.y
    }

    pub fn on(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

/// Scrollable range along one axis, or `None` when the content fits
pub fn scroll_range(frame_len: f32, content_len: f32) -> Option<f32> {
    let range = content_len - frame_len;
    (range.is_finite() && range > 0.0).then_some(range)
}

/// Bar position and length for one axis
pub fn bar_metrics(frame_len: f32, content_len: f32, scroll: f32) -> BarMetrics {
    if scroll_range(frame_len, content_len).is_none() {
        return BarMetrics::FULL;
    }
    let length = (frame_len / content_len).max(0.01);
    BarMetrics {
        position: (1.0 - length) * scroll.clamp(0.0, 1.0),
        length,
    }
}

/// Origin of the content, in parent coordinates
///
/// Content narrower than the frame is anchored left; content shorter than
/// the frame is anchored to the top.
pub fn content_translation(frame: Rect, content: Size, scroll_x: f32, scroll_y: f32) -> Vec2 {
    let x = match scroll_range(frame.width(), content.width) {
        Some(range) => frame.x() - scroll_x * range,
        None => frame.x(),
    };
    let y = match scroll_range(frame.height(), content.height) {
        Some(range) => frame.y() - scroll_y * range,
        None => frame.top() - content.height,
    };
    Vec2::new(x, y)
}

/// Test a point against the bar tracks
///
/// `scrollable` gates each axis: a bar that cannot scroll has no hit zone.
pub fn bar_hit_test(
    pointer: Point,
    frame: Rect,
    placement: &BarPlacement,
    scrollable: BarHit,
) -> BarHit {
    let width = placement.width;
    let in_x_track = match placement.side_x {
        HorizontalBarSide::Bottom => pointer.y < frame.y() + width,
        HorizontalBarSide::Top => pointer.y > frame.top() - width,
    };
    let in_y_track = match placement.side_y {
        VerticalBarSide::Left => pointer.x < frame.x() + width,
        VerticalBarSide::Right => pointer.x > frame.right() - width,
    };
    BarHit {
        x: scrollable.x && in_x_track,
        y: scrollable.y && in_y_track,
    }
}

/// Drawable rectangles for the horizontal and vertical bars
///
/// A bar is returned only when `visible` says its axis can scroll.
pub fn bar_rects(
    frame: Rect,
    hbar: BarMetrics,
    vbar: BarMetrics,
    placement: &BarPlacement,
    visible: BarHit,
) -> (Option<Rect>, Option<Rect>) {
    let horizontal = visible.x.then(|| {
        let y = match placement.side_x {
            HorizontalBarSide::Bottom => frame.y() + placement.margin,
            HorizontalBarSide::Top => frame.top() - placement.margin - placement.width,
        };
        Rect::new(
            frame.x() + frame.width() * hbar.position,
            y,
            frame.width() * hbar.length,
            placement.width,
        )
    });

    let vertical = visible.y.then(|| {
        let x = match placement.side_y {
            VerticalBarSide::Right => frame.right() - placement.margin - placement.width,
            VerticalBarSide::Left => frame.x() + placement.margin,
        };
        Rect::new(
            x,
            frame.y() + frame.height() * vbar.position,
            placement.width,
            frame.height() * vbar.length,
        )
    });

    (horizontal, vertical)
}
