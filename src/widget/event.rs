//! Input events and per-widget UI event dispatch
//!
//! Raw [`Event`]s come from the platform layer. Widgets translate the ones
//! that concern them into [`UiEvent`]s and hand them to their
//! [`UiEventDispatcher`], which keeps an observer list per event kind.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::geom::Point;

/// Raw event discriminant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    MouseButtonDown,
    MouseButtonUp,
    MouseMotion,
    MouseWheel,
    KeyDown,
    KeyUp,
    WindowResized,
    Quit,
}

/// A platform input event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    /// Mouse position in screen coordinates
    pub mouse: Point,
    /// Wheel delta for `MouseWheel`
    pub wheel: Point,
    /// Key code for key events
    pub key: u32,
    pub window_id: u32,
    /// Milliseconds since startup
    pub timestamp: u32,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            mouse: Point::ZERO,
            wheel: Point::ZERO,
            key: 0,
            window_id: 0,
            timestamp: 0,
        }
    }

    pub fn mouse_down(x: i32, y: i32) -> Self {
        Self {
            mouse: Point::new(x, y),
            ..Self::new(EventKind::MouseButtonDown)
        }
    }

    pub fn mouse_up(x: i32, y: i32) -> Self {
        Self {
            mouse: Point::new(x, y),
            ..Self::new(EventKind::MouseButtonUp)
        }
    }

    pub fn mouse_motion(x: i32, y: i32) -> Self {
        Self {
            mouse: Point::new(x, y),
            ..Self::new(EventKind::MouseMotion)
        }
    }

    pub fn mouse_wheel(x: i32, y: i32, dx: i32, dy: i32) -> Self {
        Self {
            mouse: Point::new(x, y),
            wheel: Point::new(dx, dy),
            ..Self::new(EventKind::MouseWheel)
        }
    }

    pub fn key_down(key: u32) -> Self {
        Self {
            key,
            ..Self::new(EventKind::KeyDown)
        }
    }

    pub fn with_window(mut self, window_id: u32) -> Self {
        self.window_id = window_id;
        self
    }

    pub fn with_timestamp(mut self, timestamp: u32) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Widget-level event kinds observers can subscribe to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UiEventKind {
    MouseDown,
    MouseUp,
    MouseWheel,
    MouseEnter,
    MouseLeave,
}

/// Event emitted by a widget to its observers
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiEvent {
    pub kind: UiEventKind,
    /// Integer id of the emitting widget
    pub widget_id: u32,
    pub widget_name: String,
    /// Raw event that triggered the emission
    pub event: Event,
}

/// Observer registration handle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Rc<dyn Fn(&UiEvent)>;

/// Observer table keyed by event kind
///
/// Emission snapshots the observer list before invoking it, so observers
/// may register or unregister (on this dispatcher) while being called.
#[derive(Default)]
pub struct UiEventDispatcher {
    observers: RefCell<HashMap<UiEventKind, Vec<(ObserverId, Observer)>>>,
    next_id: Cell<u64>,
}

impl UiEventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer for `kind`
    pub fn register(&self, kind: UiEventKind, observer: impl Fn(&UiEvent) + 'static) -> ObserverId {
        let id = ObserverId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.observers
            .borrow_mut()
            .entry(kind)
            .or_default()
            .push((id, Rc::new(observer)));
        id
    }

    /// Remove an observer; false if it was not registered
    pub fn unregister(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.borrow_mut();
        for list in observers.values_mut() {
            if let Some(index) = list.iter().position(|(oid, _)| *oid == id) {
                list.remove(index);
                return true;
            }
        }
        false
    }

    /// Number of observers for `kind`
    pub fn count(&self, kind: UiEventKind) -> usize {
        self.observers.borrow().get(&kind).map_or(0, Vec::len)
    }

    pub fn clear(&self) {
        self.observers.borrow_mut().clear();
    }

    /// Call every observer of `event.kind`; true if there was at least one
    pub fn emit(&self, event: &UiEvent) -> bool {
        let snapshot: Vec<Observer> = self
            .observers
            .borrow()
            .get(&event.kind)
            .map(|list| list.iter().map(|(_, o)| Rc::clone(o)).collect())
            .unwrap_or_default();

        tracing::trace!(
            kind = ?event.kind,
            widget = %event.widget_name,
            observers = snapshot.len(),
            "emit ui event"
        );

        for observer in &snapshot {
            observer(event);
        }
        !snapshot.is_empty()
    }
}
