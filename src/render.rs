//! Rendering target abstraction
//!
//! The engine never rasterises anything itself. Widgets, decorators and
//! sprites describe what to draw through [`RenderTarget`]; the backend
//! (SDL renderer, software canvas, test recorder) decides how.

use crate::geom::{Point, Rect};

/// RGBA color, 8 bits per channel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const GRAY: Color = Color::rgba(128, 128, 128, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse hex color string (#RGB, #RRGGBB, #RRGGBBAA)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let byte = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let mut it = hex.chars().map(|c| c.to_digit(16).map(|d| d as u8 * 17));
                Some(Self::rgb(it.next()??, it.next()??, it.next()??))
            }
            6 => Some(Self::rgb(
                byte(hex.get(0..2)?)?,
                byte(hex.get(2..4)?)?,
                byte(hex.get(4..6)?)?,
            )),
            8 => Some(Self::rgba(
                byte(hex.get(0..2)?)?,
                byte(hex.get(2..4)?)?,
                byte(hex.get(4..6)?)?,
                byte(hex.get(6..8)?)?,
            )),
            _ => None,
        }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

/// Backend-facing drawing surface
pub trait RenderTarget {
    /// Fill a rectangle
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a rectangle outline `width` pixels thick
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: i32);

    /// Draw a single line of text with its top-left corner at `pos`
    fn draw_text(&mut self, pos: Point, text: &str, color: Color);
}

/// A single recorded draw call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawCommand {
    Fill(Rect, Color),
    Stroke(Rect, Color, i32),
    Text(Point, String, Color),
}

/// Render target that records draw calls instead of drawing
///
/// Used by headless front-ends and tests to inspect draw order.
#[derive(Clone, Debug, Default)]
pub struct RecordingTarget {
    pub commands: Vec<DrawCommand>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded text draws, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text(_, s, _) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl RenderTarget for RecordingTarget {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Fill(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: i32) {
        self.commands.push(DrawCommand::Stroke(rect, color, width));
    }

    fn draw_text(&mut self, pos: Point, text: &str, color: Color) {
        self.commands
            .push(DrawCommand::Text(pos, text.to_string(), color));
    }
}
