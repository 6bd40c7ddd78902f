//! Panview Scroll
//!
//! A single-child scrolling viewport:
//!
//! - **Gesture classification**: each press is resolved to a content scroll,
//!   a scrollbar drag, or a hand-off to the child, under a distance and
//!   timeout race
//! - **Kinetic effects**: per-axis value with velocity, fling and an
//!   overscroll policy (hard clamp or spring-back)
//! - **Geometry**: bar metrics, content translation and bar hit zones
//! - **Wheel input**: discrete steps without inertia
//! - **Bar fade**: bars wake on every scroll and fade out after a delay
//!
//! # Example
//!
//! ```
//! use panview_core::{Rect, WidgetRegistry};
//! use panview_scroll::{ScrollConfig, ScrollView};
//!
//! let registry = WidgetRegistry::new();
//! let mut view = ScrollView::new(&registry, ScrollConfig::default());
//! view.set_frame(Rect::new(0.0, 0.0, 400.0, 400.0));
//!
//! // Nothing overflows yet, so both fractions rest at 0
//! assert_eq!(view.scroll_y(), 0.0);
//!
//! // The host forwards pointer events and calls `tick` once per frame
//! view.tick(1.0 / 60.0);
//! ```

pub mod config;
pub mod effect;
pub mod error;
pub mod geometry;
pub mod render;
pub mod session;
pub mod view;

pub use config::{BarPlacement, HorizontalBarSide, ScrollConfig, ScrollKind, VerticalBarSide};
pub use effect::{DampedParams, KinematicEffect, KineticParams, OverscrollPolicy};
pub use error::{Result, ScrollError};
pub use geometry::{Axis, BarHit, BarMetrics};
pub use render::{BarRender, ScrollRenderInfo};
pub use session::{GestureOutcome, SessionId, TouchMode, TouchSession};
pub use view::ScrollView;

pub use panview_animation::Easing;
