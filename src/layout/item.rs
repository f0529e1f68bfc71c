//! Layout items: the slots a box layout arranges
//!
//! An item is either a reference to a widget owned by the widget tree or a
//! spacer owned by the item itself. The layout never owns widgets.

use crate::geom::{Alignment, Point, Rect, Size};
use crate::widget::WidgetId;

use super::policy::{Policy, SizePolicy};

/// What a layout needs to know about a widget
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WidgetMetrics {
    /// Explicitly requested size, `Size::NULL` if none
    pub size: Size,
    /// Natural size computed by the widget
    pub size_hint: Size,
    /// `Size::NULL` if unset
    pub minimum_size: Size,
    /// `Size::NULL` if unset
    pub maximum_size: Size,
    pub policy: SizePolicy,
}

impl Default for WidgetMetrics {
    fn default() -> Self {
        Self {
            size: Size::NULL,
            size_hint: Size::ZERO,
            minimum_size: Size::NULL,
            maximum_size: Size::NULL,
            policy: SizePolicy::default(),
        }
    }
}

/// Access to the widgets a layout references
///
/// Implemented by the widget arena; tests can supply their own.
pub trait LayoutHost {
    /// Metrics for a live widget, `None` if the handle is stale
    fn metrics(&self, id: WidgetId) -> Option<WidgetMetrics>;

    /// Store the computed geometry on the widget
    fn place(&mut self, id: WidgetId, rect: Rect);
}

/// A slot with no visible content
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpacerItem {
    size: Size,
    policy: SizePolicy,
    /// `Point::NULL` until a layout pass has run
    position: Point,
}

impl SpacerItem {
    /// A spacer with the default Minimum policy
    pub fn new(size: Size) -> Self {
        Self::with_policy(size, SizePolicy::uniform(Policy::Minimum))
    }

    pub fn with_policy(size: Size, policy: SizePolicy) -> Self {
        Self {
            size,
            policy,
            position: Point::NULL,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn policy(&self) -> SizePolicy {
        self.policy
    }

    pub fn position(&self) -> Point {
        self.position
    }
}

/// Either a widget reference or a spacer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Widget(WidgetId),
    Spacer(SpacerItem),
}

/// Resolved sizing constraints for one pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ItemMetrics {
    pub natural: Size,
    pub minimum: Size,
    pub maximum: Size,
    pub policy: SizePolicy,
    /// Spacers take their own minor extent regardless of policy
    pub is_spacer: bool,
}

fn axis_bounds(natural: i32, min: i32, max: i32, policy: Policy) -> (i32, i32, i32) {
    let floor = if policy.can_shrink() {
        min.max(0)
    } else {
        natural.max(min).max(0)
    };
    let ceil = if policy.can_grow() {
        if max >= 0 {
            max.max(floor)
        } else {
            i32::MAX
        }
    } else {
        natural.max(floor)
    };
    let natural = if policy.ignores_hint() { floor } else { natural };
    (natural.clamp(floor, ceil), floor, ceil)
}

impl ItemMetrics {
    pub(crate) fn for_spacer(spacer: &SpacerItem) -> Self {
        Self::resolve(spacer.size.or_zero(), Size::NULL, Size::NULL, spacer.policy, true)
    }

    pub(crate) fn for_widget(m: &WidgetMetrics) -> Self {
        let natural = if m.size.is_null() {
            m.size_hint.or_zero()
        } else {
            m.size
        };
        Self::resolve(natural, m.minimum_size, m.maximum_size, m.policy, false)
    }

    fn resolve(natural: Size, min: Size, max: Size, policy: SizePolicy, is_spacer: bool) -> Self {
        let (nw, minw, maxw) = axis_bounds(natural.width, min.width, max.width, policy.horizontal);
        let (nh, minh, maxh) = axis_bounds(natural.height, min.height, max.height, policy.vertical);
        Self {
            natural: Size::new(nw, nh),
            minimum: Size::new(minw, minh),
            maximum: Size::new(maxw, maxh),
            policy,
            is_spacer,
        }
    }
}

/// One entry in a box layout
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutItem {
    kind: ItemKind,
    alignment: Option<Alignment>,
    geometry: Option<Rect>,
}

impl LayoutItem {
    pub fn widget(id: WidgetId) -> Self {
        Self {
            kind: ItemKind::Widget(id),
            alignment: None,
            geometry: None,
        }
    }

    pub fn spacer(spacer: SpacerItem) -> Self {
        Self {
            kind: ItemKind::Spacer(spacer),
            alignment: None,
            geometry: None,
        }
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// The referenced widget, if this is a widget item
    pub fn widget_id(&self) -> Option<WidgetId> {
        match self.kind {
            ItemKind::Widget(id) => Some(id),
            ItemKind::Spacer(_) => None,
        }
    }

    /// The spacer, if this is a spacer item
    pub fn as_spacer(&self) -> Option<&SpacerItem> {
        match &self.kind {
            ItemKind::Spacer(s) => Some(s),
            ItemKind::Widget(_) => None,
        }
    }

    pub fn is_spacer(&self) -> bool {
        matches!(self.kind, ItemKind::Spacer(_))
    }

    /// Per-item alignment override
    pub fn alignment(&self) -> Option<Alignment> {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: Option<Alignment>) {
        self.alignment = alignment;
    }

    /// Geometry from the last layout pass
    pub fn geometry(&self) -> Option<Rect> {
        self.geometry
    }

    /// Position from the last pass, `Point::NULL` before the first
    pub fn position(&self) -> Point {
        self.geometry.map(|r| r.position()).unwrap_or(Point::NULL)
    }

    /// Size from the last pass, `Size::NULL` before the first
    pub fn size(&self) -> Size {
        self.geometry.map(|r| r.size()).unwrap_or(Size::NULL)
    }

    pub(crate) fn metrics(&self, host: &dyn LayoutHost) -> Option<ItemMetrics> {
        match &self.kind {
            ItemKind::Spacer(s) => Some(ItemMetrics::for_spacer(s)),
            ItemKind::Widget(id) => host.metrics(*id).map(|m| ItemMetrics::for_widget(&m)),
        }
    }

    pub(crate) fn apply(&mut self, rect: Rect, host: &mut dyn LayoutHost) {
        self.geometry = Some(rect);
        match &mut self.kind {
            ItemKind::Spacer(s) => s.position = rect.position(),
            ItemKind::Widget(id) => host.place(*id, rect),
        }
    }

    pub(crate) fn clear_geometry(&mut self) {
        self.geometry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacer_starts_with_null_position() {
        let spacer = SpacerItem::new(Size::square(8));
        assert_eq!(spacer.position(), Point::NULL);
        assert_eq!(spacer.policy(), SizePolicy::uniform(Policy::Minimum));
    }

    #[test]
    fn test_spacer_metrics_do_not_shrink() {
        let m = ItemMetrics::for_spacer(&SpacerItem::new(Size::square(8)));
        assert_eq!(m.natural, Size::square(8));
        assert_eq!(m.minimum, Size::square(8));
        assert_eq!(m.maximum, Size::new(i32::MAX, i32::MAX));
    }

    #[test]
    fn test_widget_metrics_prefer_explicit_size() {
        let m = ItemMetrics::for_widget(&WidgetMetrics {
            size: Size::new(56, 16),
            size_hint: Size::new(50, 16),
            ..Default::default()
        });
        assert_eq!(m.natural, Size::new(56, 16));
        // Preferred may shrink to nothing when no minimum is set
        assert_eq!(m.minimum, Size::ZERO);
    }

    #[test]
    fn test_widget_metrics_clamped_to_min_max() {
        let m = ItemMetrics::for_widget(&WidgetMetrics {
            size_hint: Size::new(200, 10),
            minimum_size: Size::new(20, 20),
            maximum_size: Size::new(100, 100),
            ..Default::default()
        });
        assert_eq!(m.natural, Size::new(100, 20));
        assert_eq!(m.minimum, Size::new(20, 20));
        assert_eq!(m.maximum, Size::new(100, 100));
    }

    #[test]
    fn test_fixed_widget_cannot_shrink() {
        let m = ItemMetrics::for_widget(&WidgetMetrics {
            size_hint: Size::new(40, 12),
            policy: SizePolicy::fixed(),
            ..Default::default()
        });
        assert_eq!(m.minimum, Size::new(40, 12));
        assert_eq!(m.maximum, Size::new(40, 12));
    }

    #[test]
    fn test_ignored_hint() {
        let m = ItemMetrics::for_widget(&WidgetMetrics {
            size_hint: Size::new(40, 12),
            policy: SizePolicy::uniform(Policy::Ignored),
            ..Default::default()
        });
        assert_eq!(m.natural, Size::ZERO);
    }
}
