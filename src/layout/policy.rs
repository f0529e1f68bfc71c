//! Size policies
//!
//! A policy tells the box layout what it may do with an item's size hint
//! when the available space differs from the natural total:
//!
//! - [`Policy::Fixed`]: the hint is the only acceptable size
//! - [`Policy::Minimum`]: the hint is the minimum; growing is allowed but never requested
//! - [`Policy::Maximum`]: the hint is the maximum; shrinking is allowed
//! - [`Policy::Preferred`]: may grow or shrink, but the hint is best
//! - [`Policy::Expanding`]: may shrink, actively wants extra space
//! - [`Policy::MinimumExpanding`]: the hint is the minimum, actively wants extra space
//! - [`Policy::Ignored`]: the hint is ignored, takes as much space as possible

const GROW: u8 = 1;
const EXPAND: u8 = 2;
const SHRINK: u8 = 4;
const IGNORE: u8 = 8;

/// Sizing rule for one axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Policy {
    Fixed,
    Minimum,
    Maximum,
    Preferred,
    Expanding,
    MinimumExpanding,
    Ignored,
}

impl Policy {
    fn flags(self) -> u8 {
        match self {
            Policy::Fixed => 0,
            Policy::Minimum => GROW,
            Policy::Maximum => SHRINK,
            Policy::Preferred => GROW | SHRINK,
            Policy::Expanding => GROW | SHRINK | EXPAND,
            Policy::MinimumExpanding => GROW | EXPAND,
            Policy::Ignored => GROW | SHRINK | EXPAND | IGNORE,
        }
    }

    /// May be given more than its hint
    pub fn can_grow(self) -> bool {
        self.flags() & GROW != 0
    }

    /// Asks for any slack the layout has
    pub fn wants_expand(self) -> bool {
        self.flags() & EXPAND != 0
    }

    /// May be given less than its hint
    pub fn can_shrink(self) -> bool {
        self.flags() & SHRINK != 0
    }

    /// Size hint is disregarded
    pub fn ignores_hint(self) -> bool {
        self.flags() & IGNORE != 0
    }
}

/// Horizontal and vertical policy pair
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SizePolicy {
    pub horizontal: Policy,
    pub vertical: Policy,
}

impl Default for SizePolicy {
    fn default() -> Self {
        Self::new(Policy::Preferred, Policy::Preferred)
    }
}

impl SizePolicy {
    pub const fn new(horizontal: Policy, vertical: Policy) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Same policy on both axes
    pub const fn uniform(policy: Policy) -> Self {
        Self::new(policy, policy)
    }

    pub fn fixed() -> Self {
        Self::uniform(Policy::Fixed)
    }

    pub fn expanding() -> Self {
        Self::uniform(Policy::Expanding)
    }

    /// Policy along the layout's major axis
    pub fn major(&self, orientation: crate::geom::Orientation) -> Policy {
        match orientation {
            crate::geom::Orientation::Horizontal => self.horizontal,
            crate::geom::Orientation::Vertical => self.vertical,
        }
    }

    /// Policy along the layout's minor axis
    pub fn minor(&self, orientation: crate::geom::Orientation) -> Policy {
        match orientation {
            crate::geom::Orientation::Horizontal => self.vertical,
            crate::geom::Orientation::Vertical => self.horizontal,
        }
    }
}
