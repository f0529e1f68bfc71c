//! Widget system
//!
//! Widgets live in a [`WidgetTree`] arena and are addressed by [`WidgetId`].
//! A widget may own a [`BoxLayout`](crate::layout::BoxLayout) that arranges
//! some of its children; the tree runs the layout whenever the widget's
//! geometry or the layout's contents change.

pub mod base;
pub mod decorator;
pub mod event;
pub mod font;
pub mod tree;

pub use base::{FocusPolicy, IdAllocator, Widget, WidgetId};
pub use decorator::{Decorator, FrameDecorator};
pub use event::{Event, EventKind, ObserverId, UiEvent, UiEventDispatcher, UiEventKind};
pub use font::{Font, MonoFont};
pub use tree::WidgetTree;
