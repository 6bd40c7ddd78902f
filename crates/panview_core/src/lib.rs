//! Panview Core
//!
//! Foundational primitives shared by the panview crates:
//!
//! - **Geometry**: points, sizes, rects and colors in y-up coordinates
//! - **Pointer input**: press/move/release events with annotations and grabs
//! - **Widget arena**: stable ids that tolerate widgets going away
//! - **Observables**: values that notify subscribers synchronously on change
//! - **Frame clock**: a cancellable, fire-once deferred task queue

pub mod clock;
pub mod events;
pub mod fsm;
pub mod geometry;
pub mod observer;
pub mod registry;
pub mod widget;

pub use clock::{Clock, TaskId};
pub use events::{Mark, PointerButton, PointerEvent, PointerId};
pub use fsm::StateTransitions;
pub use geometry::{Color, Point, Rect, Size, Vec2};
pub use observer::{Observable, SubscriptionId};
pub use registry::{WidgetId, WidgetRegistry};
pub use widget::Widget;
