//! Drawable objects that actions can animate

use crate::geom::{Point, Rect, Size};
use crate::render::{Color, RenderTarget};

/// Properties an action may mutate
pub trait Transformable {
    fn position(&self) -> Point;
    fn set_position(&mut self, position: Point);

    fn size(&self) -> Size;
    fn set_size(&mut self, size: Size);

    /// Opacity, 0 (transparent) to 255 (opaque)
    fn alpha(&self) -> u8;
    fn set_alpha(&mut self, alpha: u8);
}

/// A colored rectangle with position, size and opacity
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub name: String,
    position: Point,
    size: Size,
    color: Color,
    visible: bool,
}

impl Sprite {
    pub fn new(name: impl Into<String>, position: Point, size: Size, color: Color) -> Self {
        Self {
            name: name.into(),
            position,
            size,
            color,
            visible: true,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn draw(&self, target: &mut dyn RenderTarget) {
        if !self.visible || self.color.is_transparent() {
            return;
        }
        target.fill_rect(self.bounds(), self.color);
    }
}

impl Transformable for Sprite {
    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn size(&self) -> Size {
        self.size
    }

    fn set_size(&mut self, size: Size) {
        self.size = Size::new(size.width.max(0), size.height.max(0));
    }

    fn alpha(&self) -> u8 {
        self.color.a
    }

    fn set_alpha(&mut self, alpha: u8) {
        self.color = self.color.with_alpha(alpha);
    }
}
