//! Decorators - pluggable visual skins drawn behind a widget

use crate::geom::Rect;
use crate::render::{Color, RenderTarget};

/// Background/border renderer attached to a widget
pub trait Decorator {
    /// Called when the owning widget is updated
    fn update(&mut self) {}

    fn draw(&self, target: &mut dyn RenderTarget);

    /// Follow the owning widget's global bounds
    fn set_bounds(&mut self, bounds: Rect);

    fn bounds(&self) -> Rect;
}

/// Solid fill with an optional border
#[derive(Clone, Debug, PartialEq)]
pub struct FrameDecorator {
    bounds: Rect,
    pub fill: Color,
    pub border_color: Color,
    pub border_width: i32,
}

impl Default for FrameDecorator {
    fn default() -> Self {
        Self {
            bounds: Rect::zero(),
            fill: Color::TRANSPARENT,
            border_color: Color::TRANSPARENT,
            border_width: 0,
        }
    }
}

impl FrameDecorator {
    pub fn new(fill: Color) -> Self {
        Self {
            fill,
            ..Default::default()
        }
    }

    pub fn with_border(mut self, color: Color, width: i32) -> Self {
        self.border_color = color;
        self.border_width = width.max(0);
        self
    }
}

impl Decorator for FrameDecorator {
    fn update(&mut self) {
        // A border can never be thicker than half the frame
        let limit = self.bounds.width.min(self.bounds.height) / 2;
        self.border_width = self.border_width.min(limit.max(0));
    }

    fn draw(&self, target: &mut dyn RenderTarget) {
        if self.bounds.width <= 0 || self.bounds.height <= 0 {
            return;
        }
        if !self.fill.is_transparent() {
            target.fill_rect(self.bounds, self.fill);
        }
        if self.border_width > 0 && !self.border_color.is_transparent() {
            target.stroke_rect(self.bounds, self.border_color, self.border_width);
        }
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
