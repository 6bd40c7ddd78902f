//! Render information
//!
//! The view never draws. Whenever the translation, bars or fade change it
//! publishes a [`ScrollRenderInfo`] for the renderer to consume.

use panview_core::{Color, Rect, Vec2};

/// One scrollbar, ready to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRender {
    /// Bar rectangle in parent coordinates
    pub rect: Rect,
    /// Bar color with the current fade already applied to alpha
    pub color: Color,
}

/// Information about the viewport for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRenderInfo {
    /// Origin of the content in parent coordinates
    pub translation: Vec2,
    /// Elastic overscroll to add on top of the translation
    pub overscroll: Vec2,
    /// Horizontal bar, if the x axis can scroll
    pub hbar: Option<BarRender>,
    /// Vertical bar, if the y axis can scroll
    pub vbar: Option<BarRender>,
    /// Current bar fade (0.0 to 1.0)
    pub bar_alpha: f32,
    /// Content opacity (below 1.0 only for a fading overscroll)
    pub content_opacity: f32,
}

impl ScrollRenderInfo {
    /// Content origin including overscroll
    pub fn content_offset(&self) -> Vec2 {
        Vec2::new(
            self.translation.x + self.overscroll.x,
            self.translation.y + self.overscroll.y,
        )
    }
}

impl Default for ScrollRenderInfo {
    fn default() -> Self {
        Self {
            translation: Vec2::ZERO,
            overscroll: Vec2::ZERO,
            hbar: None,
            vbar: None,
            bar_alpha: 1.0,
            content_opacity: 1.0,
        }
    }
}
