//! Core geometry types: Point, Size, Rect, Orientation, Alignment
//!
//! All units are integer pixels. `Point::NULL` and `Size::NULL` are the
//! "not yet computed" sentinels used by spacers and widgets.

/// A position in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };
    pub const NULL: Point = Point { x: -1, y: -1 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A width/height pair in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0,
        height: 0,
    };
    pub const NULL: Size = Size {
        width: -1,
        height: -1,
    };

    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Square size
    pub fn square(extent: i32) -> Self {
        Self::new(extent, extent)
    }

    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }

    /// Replace the null sentinel with zero
    pub fn or_zero(self) -> Self {
        if self.is_null() {
            Self::ZERO
        } else {
            self
        }
    }
}

/// Rectangle for layout
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(pos: Point, size: Size) -> Self {
        Self::new(pos.x, pos.y, size.width, size.height)
    }

    /// Create a zero-sized rect at origin
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Whether a point lies inside (right and bottom edges exclusive)
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.right() && p.y < self.bottom()
    }

    /// Whether `other` lies entirely inside this rect
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Shrink rect by padding amounts
    pub fn inset(&self, padding: &Padding) -> Self {
        Self {
            x: self.x + padding.left,
            y: self.y + padding.top,
            width: (self.width - padding.left - padding.right).max(0),
            height: (self.height - padding.top - padding.bottom).max(0),
        }
    }
}

/// Four-sided padding in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Padding {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Padding {
    pub fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn uniform(v: i32) -> Self {
        Self::new(v, v, v, v)
    }

    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

/// Layout orientation for box layouts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Extent of `size` along the major axis
    pub fn major(&self, size: Size) -> i32 {
        match self {
            Orientation::Horizontal => size.width,
            Orientation::Vertical => size.height,
        }
    }

    /// Extent of `size` along the minor axis
    pub fn minor(&self, size: Size) -> i32 {
        match self {
            Orientation::Horizontal => size.height,
            Orientation::Vertical => size.width,
        }
    }

    /// Coordinate of `p` along the major axis
    pub fn major_pos(&self, p: Point) -> i32 {
        match self {
            Orientation::Horizontal => p.x,
            Orientation::Vertical => p.y,
        }
    }

    /// Coordinate of `p` along the minor axis
    pub fn minor_pos(&self, p: Point) -> i32 {
        match self {
            Orientation::Horizontal => p.y,
            Orientation::Vertical => p.x,
        }
    }

    /// Build a size from major/minor extents
    pub fn size(&self, major: i32, minor: i32) -> Size {
        match self {
            Orientation::Horizontal => Size::new(major, minor),
            Orientation::Vertical => Size::new(minor, major),
        }
    }

    /// Build a point from major/minor coordinates
    pub fn point(&self, major: i32, minor: i32) -> Point {
        match self {
            Orientation::Horizontal => Point::new(major, minor),
            Orientation::Vertical => Point::new(minor, major),
        }
    }
}

/// Placement of leftover space along one axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

impl Align {
    /// Offset of an item of `extent` inside `available`
    pub fn offset(&self, available: i32, extent: i32) -> i32 {
        let free = (available - extent).max(0);
        match self {
            Align::Start => 0,
            Align::Center => free / 2,
            Align::End => free,
        }
    }
}

/// Two-axis alignment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Alignment {
    pub horizontal: Align,
    pub vertical: Align,
}

impl Alignment {
    pub const TOP_LEFT: Alignment = Alignment::new(Align::Start, Align::Start);
    pub const TOP_CENTER: Alignment = Alignment::new(Align::Center, Align::Start);
    pub const TOP_RIGHT: Alignment = Alignment::new(Align::End, Align::Start);
    pub const MIDDLE_LEFT: Alignment = Alignment::new(Align::Start, Align::Center);
    pub const CENTER: Alignment = Alignment::new(Align::Center, Align::Center);
    pub const MIDDLE_RIGHT: Alignment = Alignment::new(Align::End, Align::Center);
    pub const BOTTOM_LEFT: Alignment = Alignment::new(Align::Start, Align::End);
    pub const BOTTOM_CENTER: Alignment = Alignment::new(Align::Center, Align::End);
    pub const BOTTOM_RIGHT: Alignment = Alignment::new(Align::End, Align::End);

    pub const fn new(horizontal: Align, vertical: Align) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Parse from string (used in config), e.g. "top-left", "center"
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().replace('_', "-").as_str() {
            "top-left" => Some(Self::TOP_LEFT),
            "top" | "top-center" => Some(Self::TOP_CENTER),
            "top-right" => Some(Self::TOP_RIGHT),
            "left" | "middle-left" => Some(Self::MIDDLE_LEFT),
            "center" | "middle" => Some(Self::CENTER),
            "right" | "middle-right" => Some(Self::MIDDLE_RIGHT),
            "bottom-left" => Some(Self::BOTTOM_LEFT),
            "bottom" | "bottom-center" => Some(Self::BOTTOM_CENTER),
            "bottom-right" => Some(Self::BOTTOM_RIGHT),
            _ => None,
        }
    }

    /// The component that applies across a layout of `orientation`
    pub fn minor(&self, orientation: Orientation) -> Align {
        match orientation {
            Orientation::Horizontal => self.vertical,
            Orientation::Vertical => self.horizontal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(10, 10, 20, 20);
        assert!(r.contains(Point::new(10, 10)));
        assert!(r.contains(Point::new(29, 29)));
        assert!(!r.contains(Point::new(30, 10)));
        assert!(r.contains_rect(&Rect::new(12, 12, 18, 18)));
        assert!(!r.contains_rect(&Rect::new(12, 12, 19, 18)));
    }

    #[test]
    fn test_orientation_axes() {
        let s = Size::new(50, 16);
        assert_eq!(Orientation::Horizontal.major(s), 50);
        assert_eq!(Orientation::Vertical.major(s), 16);
        assert_eq!(Orientation::Vertical.point(3, 7), Point::new(7, 3));
    }

    #[test]
    fn test_align_offset() {
        assert_eq!(Align::Start.offset(20, 8), 0);
        assert_eq!(Align::Center.offset(20, 8), 6);
        assert_eq!(Align::End.offset(20, 8), 12);
        // Oversized items never get a negative offset
        assert_eq!(Align::End.offset(4, 8), 0);
    }

    #[test]
    fn test_alignment_from_name() {
        assert_eq!(Alignment::from_name("center"), Some(Alignment::CENTER));
        assert_eq!(
            Alignment::from_name("Bottom_Right"),
            Some(Alignment::BOTTOM_RIGHT)
        );
        assert_eq!(Alignment::from_name("sideways"), None);
    }
}
