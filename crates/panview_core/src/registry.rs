//! Widget arena
//!
//! Widgets are referred to by stable [`WidgetId`]s. Pointer grab lists keep
//! ids rather than references, so a widget that went away between a grab
//! and a later replay simply fails to resolve.

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Unique identifier for a live widget
    pub struct WidgetId;
}

struct WidgetEntry {
    name: &'static str,
}

/// Shared registry of live widgets
///
/// Cloning the registry yields another handle to the same arena.
#[derive(Clone, Default)]
pub struct WidgetRegistry {
    widgets: Rc<RefCell<SlotMap<WidgetId, WidgetEntry>>>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a widget and return its id
    pub fn register(&self, name: &'static str) -> WidgetId {
        let id = self.widgets.borrow_mut().insert(WidgetEntry { name });
        tracing::trace!("registered widget {:?} ({})", id, name);
        id
    }

    /// Remove a widget; later lookups for `id` resolve to nothing
    pub fn unregister(&self, id: WidgetId) -> bool {
        self.widgets.borrow_mut().remove(id).is_some()
    }

    /// Whether the widget is still alive
    pub fn is_alive(&self, id: WidgetId) -> bool {
        self.widgets.borrow().contains_key(id)
    }

    /// Debug name of a live widget
    pub fn name(&self, id: WidgetId) -> Option<&'static str> {
        self.widgets.borrow().get(id).map(|w| w.name)
    }

    pub fn len(&self) -> usize {
        self.widgets.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.borrow().is_empty()
    }
}
