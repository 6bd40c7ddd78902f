//! Widget collaborator trait
//!
//! The scroll view hosts exactly one child implementing [`Widget`]. Events
//! reach the child already converted to the child's coordinate space.

use crate::events::PointerEvent;
use crate::geometry::Size;
use crate::observer::Observable;
use crate::registry::WidgetId;

/// A widget that can receive pointer input
///
/// Handlers return `true` when they consumed the event.
pub trait Widget {
    /// Arena id of this widget
    fn id(&self) -> WidgetId;

    fn on_pointer_down(&mut self, event: &mut PointerEvent) -> bool;

    fn on_pointer_move(&mut self, event: &mut PointerEvent) -> bool;

    fn on_pointer_up(&mut self, event: &mut PointerEvent) -> bool;

    /// Current size
    fn size(&self) -> Size;

    /// Size as an observable, so a container can follow resizes
    fn size_observable(&mut self) -> &mut Observable<Size>;
}
