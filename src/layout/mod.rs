//! Layout system
//!
//! A [`BoxLayout`] arranges [`LayoutItem`]s (widget references and spacers)
//! along one axis according to each item's [`SizePolicy`]. Layouts never own
//! the widgets they arrange; they reach them through a [`LayoutHost`].

pub mod box_layout;
pub mod item;
pub mod policy;

pub use box_layout::BoxLayout;
pub use item::{ItemKind, LayoutHost, LayoutItem, SpacerItem, WidgetMetrics};
pub use policy::{Policy, SizePolicy};
