//! Scroll view configuration
//!
//! Every knob has a named default. A config can be built in code with the
//! `with_*` helpers or loaded from TOML:
//!
//! ```
//! use panview_scroll::{ScrollConfig, ScrollKind};
//!
//! let config = ScrollConfig::from_toml_str(
//!     r#"
//!     scroll_timeout_ms = 55
//!     scroll_type = "both"
//!
//!     [effect]
//!     kind = "bounded"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.scroll_timeout_ms, ScrollConfig::LEGACY_SCROLL_TIMEOUT_MS);
//! assert_eq!(config.scroll_type, ScrollKind::Both);
//! ```

use panview_animation::Easing;
use panview_core::Color;
use serde::{Deserialize, Serialize};

use crate::effect::{KineticParams, OverscrollPolicy};
use crate::error::{Result, ScrollError};

/// Which input surfaces may start a scroll
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollKind {
    /// Dragging the content scrolls
    #[default]
    Content,
    /// Only the scrollbars are draggable
    Bars,
    /// Both content and bars
    Both,
}

impl ScrollKind {
    pub fn includes_content(&self) -> bool {
        matches!(self, ScrollKind::Content | ScrollKind::Both)
    }

    pub fn includes_bars(&self) -> bool {
        matches!(self, ScrollKind::Bars | ScrollKind::Both)
    }
}

/// Edge hosting the horizontal bar
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalBarSide {
    Top,
    #[default]
    Bottom,
}

/// Edge hosting the vertical bar
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalBarSide {
    Left,
    #[default]
    Right,
}

/// Bar placement shared by hit testing and rendering
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarPlacement {
    pub width: f32,
    pub margin: f32,
    pub side_x: HorizontalBarSide,
    pub side_y: VerticalBarSide,
}

/// Scroll view configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Travel (px) on one axis before a drag is considered a scroll
    pub scroll_distance: f32,
    /// Time allowed to reach `scroll_distance` before the press goes to the child
    pub scroll_timeout_ms: u32,
    /// Step applied per wheel notch (px)
    pub scroll_wheel_distance: f32,
    pub do_scroll_x: bool,
    pub do_scroll_y: bool,
    pub bar_width: f32,
    pub bar_color: [f32; 4],
    pub bar_margin: f32,
    pub bar_pos_x: HorizontalBarSide,
    pub bar_pos_y: VerticalBarSide,
    pub scroll_type: ScrollKind,
    /// Overscroll policy used for both axes
    pub effect: OverscrollPolicy,
    /// Velocity tracking and friction shared by both axes
    pub kinetic: KineticParams,
    pub bar_fade_delay_ms: u32,
    pub bar_fade_duration_ms: u32,
    pub bar_fade_easing: Easing,
    /// Alpha the bars fade to when they are an input surface
    pub bar_rest_alpha: f32,
}

impl ScrollConfig {
    /// Timeout used by an earlier revision, kept for hosts that want the
    /// snappier hand-off to children
    pub const LEGACY_SCROLL_TIMEOUT_MS: u32 = 55;

    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ScrollConfig = toml::from_str(text)?;
        config.validate()?;
        tracing::debug!(
            "loaded scroll config: timeout={}ms distance={} type={:?}",
            config.scroll_timeout_ms,
            config.scroll_distance,
            config.scroll_type
        );
        Ok(config)
    }

    /// Reject values the gesture machinery cannot work with
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("scroll_distance", self.scroll_distance),
            ("scroll_wheel_distance", self.scroll_wheel_distance),
            ("bar_width", self.bar_width),
            ("bar_margin", self.bar_margin),
            ("kinetic.friction", self.kinetic.friction),
            ("kinetic.min_velocity", self.kinetic.min_velocity),
            ("kinetic.min_distance", self.kinetic.min_distance),
            ("kinetic.drag_threshold", self.kinetic.drag_threshold),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ScrollError::InvalidConfig(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }

        if !self.kinetic.std_dt.is_finite() || self.kinetic.std_dt <= 0.0 {
            return Err(ScrollError::InvalidConfig(format!(
                "kinetic.std_dt must be positive (got {})",
                self.kinetic.std_dt
            )));
        }

        if !(0.0..=1.0).contains(&self.bar_rest_alpha) {
            return Err(ScrollError::InvalidConfig(format!(
                "bar_rest_alpha must be within [0, 1] (got {})",
                self.bar_rest_alpha
            )));
        }

        if self.bar_color.iter().any(|c| !c.is_finite()) {
            return Err(ScrollError::InvalidConfig(
                "bar_color components must be finite".to_string(),
            ));
        }

        if let Some(params) = self.effect.damped_params() {
            if !params.spring_constant.is_finite()
                || params.spring_constant < 0.0
                || !params.edge_damping.is_finite()
                || params.edge_damping < 0.0
                || !params.max_overscroll.is_finite()
                || params.max_overscroll < 0.0
            {
                return Err(ScrollError::InvalidConfig(
                    "damped effect parameters must be finite and non-negative".to_string(),
                ));
            }
        }

        Ok(())
    }

    pub fn with_scroll_distance(mut self, distance: f32) -> Self {
        self.scroll_distance = distance;
        self
    }

    pub fn with_scroll_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.scroll_timeout_ms = timeout_ms;
        self
    }

    pub fn with_scroll_wheel_distance(mut self, distance: f32) -> Self {
        self.scroll_wheel_distance = distance;
        self
    }

    /// Enable or disable both axes at once
    pub fn with_do_scroll(mut self, enabled: bool) -> Self {
        self.do_scroll_x = enabled;
        self.do_scroll_y = enabled;
        self
    }

    pub fn with_do_scroll_x(mut self, enabled: bool) -> Self {
        self.do_scroll_x = enabled;
        self
    }

    pub fn with_do_scroll_y(mut self, enabled: bool) -> Self {
        self.do_scroll_y = enabled;
        self
    }

    pub fn with_scroll_type(mut self, kind: ScrollKind) -> Self {
        self.scroll_type = kind;
        self
    }

    pub fn with_effect(mut self, effect: OverscrollPolicy) -> Self {
        self.effect = effect;
        self
    }

    pub fn with_bar_width(mut self, width: f32) -> Self {
        self.bar_width = width;
        self
    }

    pub fn with_bar_color(mut self, color: Color) -> Self {
        self.bar_color = color.to_array();
        self
    }

    pub fn with_bar_fade_easing(mut self, easing: Easing) -> Self {
        self.bar_fade_easing = easing;
        self
    }

    /// Timeout in seconds, as consumed by the clock
    pub fn scroll_timeout_secs(&self) -> f64 {
        f64::from(self.scroll_timeout_ms) / 1000.0
    }

    pub fn bar_color(&self) -> Color {
        Color::from(self.bar_color)
    }

    pub fn bar_placement(&self) -> BarPlacement {
        BarPlacement {
            width: self.bar_width,
            margin: self.bar_margin,
            side_x: self.bar_pos_x,
            side_y: self.bar_pos_y,
        }
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            scroll_distance: 20.0,
            scroll_timeout_ms: 250,
            scroll_wheel_distance: 20.0,
            do_scroll_x: true,
            do_scroll_y: true,
            bar_width: 2.0,
            bar_color: [0.7, 0.7, 0.7, 0.9],
            bar_margin: 0.0,
            bar_pos_x: HorizontalBarSide::Bottom,
            bar_pos_y: VerticalBarSide::Right,
            scroll_type: ScrollKind::Content,
            effect: OverscrollPolicy::default(),
            kinetic: KineticParams::default(),
            bar_fade_delay_ms: 500,
            bar_fade_duration_ms: 500,
            bar_fade_easing: Easing::EaseOutQuart,
            bar_rest_alpha: 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::DampedParams;

    #[test]
    fn test_defaults() {
        let config = ScrollConfig::default();
        assert_eq!(config.scroll_distance, 20.0);
        assert_eq!(config.scroll_timeout_ms, 250);
        assert_eq!(config.scroll_wheel_distance, 20.0);
        assert_eq!(config.bar_width, 2.0);
        assert_eq!(config.bar_pos_x, HorizontalBarSide::Bottom);
        assert_eq!(config.bar_pos_y, VerticalBarSide::Right);
        assert_eq!(config.effect, OverscrollPolicy::Damped(DampedParams::default()));
        assert_eq!(config.bar_fade_easing, Easing::EaseOutQuart);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ScrollConfig::from_toml_str(
            r#"
            do_scroll_x = false
            bar_pos_y = "left"
            bar_fade_easing = "linear"

            [effect]
            kind = "damped_with_fade"
            spring_constant = 3.0
            "#,
        )
        .unwrap();

        assert!(!config.do_scroll_x);
        assert!(config.do_scroll_y);
        assert_eq!(config.bar_pos_y, VerticalBarSide::Left);
        assert_eq!(config.bar_fade_easing, Easing::Linear);
        assert_eq!(config.scroll_distance, 20.0);
        match config.effect {
            OverscrollPolicy::DampedWithFade(params) => {
                assert_eq!(params.spring_constant, 3.0);
                assert_eq!(params.edge_damping, 0.25);
            }
            other => panic!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn test_malformed_toml_is_a_config_error() {
        let err = ScrollConfig::from_toml_str("scroll_distance = \"far\"").unwrap_err();
        assert!(matches!(err, ScrollError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ScrollConfig::default().with_scroll_distance(-1.0);
        assert!(matches!(config.validate(), Err(ScrollError::InvalidConfig(_))));

        let config = ScrollConfig {
            bar_rest_alpha: 1.5,
            ..ScrollConfig::default()
        };
        assert!(matches!(config.validate(), Err(ScrollError::InvalidConfig(_))));

        let config = ScrollConfig::default().with_scroll_wheel_distance(f32::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_scroll_kind_surfaces() {
        assert!(ScrollKind::Content.includes_content());
        assert!(!ScrollKind::Content.includes_bars());
        assert!(ScrollKind::Bars.includes_bars());
        assert!(!ScrollKind::Bars.includes_content());
        assert!(ScrollKind::Both.includes_content() && ScrollKind::Both.includes_bars());
    }

    #[test]
    fn test_with_do_scroll_sets_both_axes() {
        let config = ScrollConfig::default().with_do_scroll(false);
        assert!(!config.do_scroll_x && !config.do_scroll_y);
        assert_eq!(config.scroll_timeout_secs(), 0.25);
    }
}
