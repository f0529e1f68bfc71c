//! Trellis - box layouts, widget trees and timed actions for 2D front ends
//!
//! Rendering, fonts and input come from the host application through the
//! [`render::RenderTarget`], [`widget::Font`] and [`widget::Event`] seams;
//! everything here is backend independent.

// Logging setup (tracing subscriber, log file location)
pub mod log;

pub mod error;

// Geometry shared by layouts, widgets and actions
pub mod geom;

// Configuration (trellis.toml)
pub mod shared;

// Layout engine (no widget storage of its own)
pub mod layout;

pub mod render;

// Widget tree, events, decorators
pub mod widget;

// Timed actions and the players that drive them
pub mod animation;

pub mod sprite;

pub use error::{Error, Result};
