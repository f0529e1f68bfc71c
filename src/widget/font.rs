//! Text measurement
//!
//! Glyph rasterisation lives in the backend; widgets only need metrics to
//! compute a size hint from their title text.

use crate::geom::Size;

/// Glyph metrics provider
pub trait Font {
    /// Horizontal advance of one glyph
    fn glyph_width(&self, c: char) -> i32;

    /// Height of one line of glyphs
    fn line_height(&self) -> i32;

    /// Extra advance between adjacent glyphs
    fn spacing(&self) -> i32 {
        0
    }

    /// Vertical advance from one line to the next
    fn newline(&self) -> i32 {
        self.line_height()
    }

    /// Bounding size of `text`, which may span several lines
    fn text_size(&self, text: &str) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        let mut width = 0;
        let mut lines = 0;
        for line in text.split('\n') {
            let glyphs = line.chars().count() as i32;
            let advance: i32 = line.chars().map(|c| self.glyph_width(c)).sum();
            width = width.max(advance + self.spacing() * (glyphs - 1).max(0));
            lines += 1;
        }
        Size::new(width, self.line_height() + self.newline() * (lines - 1))
    }
}

/// Fixed-cell font, as produced by bitmap font sheets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonoFont {
    pub glyph: Size,
    pub spacing: i32,
    pub newline: i32,
}

impl MonoFont {
    pub fn new(glyph_width: i32, glyph_height: i32) -> Self {
        Self {
            glyph: Size::new(glyph_width, glyph_height),
            spacing: 0,
            newline: glyph_height,
        }
    }

    pub fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }
}

impl Font for MonoFont {
    fn glyph_width(&self, c: char) -> i32 {
        if c == '\t' {
            self.glyph.width * 4
        } else {
            self.glyph.width
        }
    }

    fn line_height(&self) -> i32 {
        self.glyph.height
    }

    fn spacing(&self) -> i32 {
        self.spacing
    }

    fn newline(&self) -> i32 {
        self.newline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        let font = MonoFont::new(8, 16);
        assert_eq!(font.text_size("Hello"), Size::new(40, 16));
    }

    #[test]
    fn test_spacing_between_glyphs_only() {
        let font = MonoFont::new(8, 16).with_spacing(2);
        assert_eq!(font.text_size("ab"), Size::new(18, 16));
        assert_eq!(font.text_size("a"), Size::new(8, 16));
    }

    #[test]
    fn test_multi_line() {
        let font = MonoFont::new(8, 16);
        assert_eq!(font.text_size("ab\nlonger"), Size::new(48, 32));
        assert_eq!(font.text_size(""), Size::ZERO);
    }
}
