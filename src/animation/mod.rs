//! Timed action system
//!
//! Actions mutate a [`Transformable`](crate::sprite::Transformable) target
//! over time. They are advanced frame by frame by a [`DispatchQueue`],
//! usually owned by an [`ActionPlayer`] that the main loop ticks.

pub mod action;
pub mod composite;
pub mod easing;
pub mod player;
pub mod queue;
pub mod tween;

pub use action::{Action, FrameState};
pub use composite::{Group, Repeat, Sequence};
pub use easing::Easing;
pub use player::ActionPlayer;
pub use queue::{Completion, DispatchQueue, PlayerState};
pub use tween::{Goal, Property, Target, Tween, Wait};
