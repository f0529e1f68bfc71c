//! Box layout - HBox/VBox arrangement of widgets and spacers
//!
//! Items are laid out in insertion order along the major axis. Each pass:
//!
//! 1. resolves every item's natural extent (spacer size, explicit widget
//!    size, or the widget's size hint)
//! 2. hands slack to expanding items, or takes a deficit back from
//!    shrinkable ones, never below an item's minimum
//! 3. walks the items with a cursor starting at `bounds.position`, adding
//!    `spacing` between items but not before the first or after the last
//! 4. sizes each item on the minor axis (stretching expanding items,
//!    aligning the rest)
//!
//! Bounds are expressed in the same space as the owner's global position,
//! so computed rects are absolute and need no further translation.

use crate::geom::{Alignment, Orientation, Rect, Size};
use crate::shared::config::LayoutConfig;
use crate::widget::WidgetId;

use super::item::{ItemMetrics, LayoutHost, LayoutItem, SpacerItem};
use super::policy::{Policy, SizePolicy};

/// Arranges items in a single row or column
#[derive(Clone, Debug, PartialEq)]
pub struct BoxLayout {
    orientation: Orientation,
    items: Vec<LayoutItem>,
    spacing: i32,
    bounds: Rect,
    alignment: Alignment,
    /// Widget this layout is attached to, if any
    owner: Option<WidgetId>,
    /// Set by every mutation, cleared by `update`
    dirty: bool,
}

impl BoxLayout {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            items: Vec::new(),
            spacing: 0,
            bounds: Rect::zero(),
            alignment: Alignment::TOP_LEFT,
            owner: None,
            dirty: true,
        }
    }

    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    /// Create with spacing and alignment from the `[layout]` config section
    pub fn with_config(orientation: Orientation, config: &LayoutConfig) -> Self {
        let mut layout = Self::new(orientation);
        layout.set_spacing(config.spacing);
        layout.set_alignment(config.alignment());
        layout
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Append a widget reference; the layout does not take ownership
    pub fn append_widget(&mut self, widget: WidgetId) {
        self.items.push(LayoutItem::widget(widget));
        self.dirty = true;
    }

    /// Insert a widget reference at `index`, clamped to `count()`
    pub fn insert_widget(&mut self, index: usize, widget: WidgetId) {
        let index = index.min(self.items.len());
        self.items.insert(index, LayoutItem::widget(widget));
        self.dirty = true;
    }

    /// Append a square spacer of `size` pixels
    ///
    /// The minor-axis extent mirrors the major one, so a spacer of 8 in a
    /// horizontal layout occupies 8x8 rather than stretching to the row height.
    pub fn append_spacer(&mut self, size: i32) {
        let size = size.max(0);
        self.append_spacer_item(SpacerItem::new(Size::square(size)));
    }

    /// Append a zero-size spacer that soaks up slack along the major axis
    pub fn append_stretch(&mut self) {
        let policy = match self.orientation {
            Orientation::Horizontal => SizePolicy::new(Policy::Expanding, Policy::Minimum),
            Orientation::Vertical => SizePolicy::new(Policy::Minimum, Policy::Expanding),
        };
        self.append_spacer_item(SpacerItem::with_policy(Size::ZERO, policy));
    }

    pub fn append_spacer_item(&mut self, spacer: SpacerItem) {
        self.items.push(LayoutItem::spacer(spacer));
        self.dirty = true;
    }

    /// Remove and return the item at `index`
    pub fn remove_at(&mut self, index: usize) -> Option<LayoutItem> {
        if index >= self.items.len() {
            tracing::warn!(index, count = self.items.len(), "remove_at out of range");
            return None;
        }
        self.dirty = true;
        Some(self.items.remove(index))
    }

    /// Remove the first item referencing `widget`
    pub fn remove_widget(&mut self, widget: WidgetId) -> bool {
        match self.find_widget(widget) {
            Some(index) => self.remove_at(index).is_some(),
            None => false,
        }
    }

    /// Drop items whose widget no longer exists; returns how many were removed
    pub fn prune(&mut self, host: &dyn LayoutHost) -> usize {
        let before = self.items.len();
        self.items
            .retain(|item| item.widget_id().map_or(true, |id| host.metrics(id).is_some()));
        let removed = before - self.items.len();
        if removed > 0 {
            tracing::debug!(removed, "pruned stale layout items");
            self.dirty = true;
        }
        removed
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.dirty = true;
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Set the gap between items; negative values are clamped to zero
    pub fn set_spacing(&mut self, spacing: i32) {
        if spacing < 0 {
            tracing::warn!(spacing, "negative layout spacing clamped to 0");
        }
        self.spacing = spacing.max(0);
        self.dirty = true;
    }

    pub fn spacing(&self) -> i32 {
        self.spacing
    }

    /// Default alignment for items narrower than the layout's minor extent
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
        self.dirty = true;
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Per-widget alignment override; false if the widget is not in this layout
    pub fn set_widget_alignment(&mut self, widget: WidgetId, alignment: Alignment) -> bool {
        match self.find_widget(widget) {
            Some(index) => {
                self.items[index].set_alignment(Some(alignment));
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Item at `index`; callers should check `count()` first
    pub fn at(&self, index: usize) -> Option<&LayoutItem> {
        let item = self.items.get(index);
        if item.is_none() {
            tracing::warn!(index, count = self.items.len(), "layout index out of range");
        }
        item
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &LayoutItem> {
        self.items.iter()
    }

    pub fn find_widget(&self, widget: WidgetId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.widget_id() == Some(widget))
    }

    pub fn owner(&self) -> Option<WidgetId> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: Option<WidgetId>) {
        self.owner = owner;
        self.dirty = true;
    }

    /// Whether a mutation happened since the last `update`
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn gaps(&self) -> i32 {
        let count = i32::try_from(self.items.len()).unwrap_or(i32::MAX);
        self.spacing.saturating_mul(count.saturating_sub(1).max(0))
    }

    fn collect_metrics(&self, host: &dyn LayoutHost) -> Vec<Option<ItemMetrics>> {
        self.items
            .iter()
            .map(|item| {
                let m = item.metrics(host);
                if m.is_none() {
                    tracing::warn!(widget = ?item.widget_id(), "layout item references a removed widget");
                }
                m
            })
            .collect()
    }

    fn sum_sizes(&self, sizes: impl Iterator<Item = Size>) -> Size {
        let o = self.orientation;
        let (major, minor) = sizes.fold((0i32, 0i32), |(major, minor), s| {
            (major.saturating_add(o.major(s)), minor.max(o.minor(s)))
        });
        if self.items.is_empty() {
            Size::ZERO
        } else {
            o.size(major.saturating_add(self.gaps()), minor)
        }
    }

    /// Smallest size the layout can take without violating an item's minimum
    pub fn minimum_size(&self, host: &dyn LayoutHost) -> Size {
        let metrics = self.collect_metrics(host);
        self.sum_sizes(metrics.iter().map(|m| m.map_or(Size::ZERO, |m| m.minimum)))
    }

    /// Size the layout would take if every item got its natural extent
    pub fn size_hint(&self, host: &dyn LayoutHost) -> Size {
        let metrics = self.collect_metrics(host);
        self.sum_sizes(metrics.iter().map(|m| m.map_or(Size::ZERO, |m| m.natural)))
    }

    /// Run the layout pass against the current bounds
    pub fn update(&mut self, host: &mut dyn LayoutHost) {
        self.dirty = false;
        if self.items.is_empty() {
            return;
        }

        let o = self.orientation;
        let metrics = self.collect_metrics(&*host);
        let available_major = o.major(self.bounds.size()).max(0);
        let available_minor = o.minor(self.bounds.size()).max(0);

        let mut extents: Vec<i32> = metrics
            .iter()
            .map(|m| m.map_or(0, |m| o.major(m.natural)))
            .collect();
        let natural_total = extents
            .iter()
            .fold(0i32, |acc, e| acc.saturating_add(*e))
            .saturating_add(self.gaps());

        if natural_total < available_major {
            distribute_slack(&mut extents, &metrics, o, available_major - natural_total);
        } else if natural_total > available_major {
            reclaim_deficit(&mut extents, &metrics, o, natural_total - available_major);
        }

        tracing::trace!(
            ?o,
            bounds = ?self.bounds,
            natural_total,
            available_major,
            "box layout pass"
        );

        let major_origin = o.major_pos(self.bounds.position());
        let minor_origin = o.minor_pos(self.bounds.position());
        let mut cursor = major_origin;
        let default_alignment = self.alignment;

        for (i, (item, m)) in self.items.iter_mut().zip(metrics.iter()).enumerate() {
            let extent = extents[i];
            match m {
                Some(m) => {
                    let (minor_extent, minor_offset) = minor_geometry(
                        m,
                        o,
                        available_minor,
                        item.alignment().unwrap_or(default_alignment),
                    );
                    let rect = Rect::from_parts(
                        o.point(cursor, minor_origin.saturating_add(minor_offset)),
                        o.size(extent, minor_extent),
                    );
                    item.apply(rect, host);
                }
                None => item.clear_geometry(),
            }
            cursor = cursor.saturating_add(extent).saturating_add(self.spacing);
        }
    }
}

/// Minor-axis extent and offset (relative to the bounds) for one item
fn minor_geometry(m: &ItemMetrics, o: Orientation, available: i32, alignment: Alignment) -> (i32, i32) {
    let natural = o.minor(m.natural);
    if m.is_spacer {
        return (natural, 0);
    }
    let policy = m.policy.minor(o);
    let min = o.minor(m.minimum);
    let max = o.minor(m.maximum);
    if policy.wants_expand() {
        return (available.clamp(min, max), 0);
    }
    let extent = if natural > available && policy.can_shrink() {
        available.max(min)
    } else {
        natural
    };
    (extent, alignment.minor(o).offset(available, extent))
}

/// Give `slack` pixels to expanding items, equal shares with the remainder
/// going to the earliest items, capped at each item's maximum
fn distribute_slack(extents: &mut [i32], metrics: &[Option<ItemMetrics>], o: Orientation, mut slack: i32) {
    let mut open: Vec<usize> = metrics
        .iter()
        .enumerate()
        .filter(|(_, m)| m.map_or(false, |m| m.policy.major(o).wants_expand()))
        .map(|(i, _)| i)
        .collect();

    while slack > 0 && !open.is_empty() {
        let share = slack / open.len() as i32;
        let remainder = slack % open.len() as i32;
        let mut given = 0;
        let mut still_open = Vec::with_capacity(open.len());
        for (n, &i) in open.iter().enumerate() {
            let want = share + i32::from((n as i32) < remainder);
            let max = metrics[i].map_or(0, |m| o.major(m.maximum));
            let take = want.min(max - extents[i]);
            extents[i] += take;
            given += take;
            if extents[i] < max {
                still_open.push(i);
            }
        }
        open = still_open;
        slack -= given;
        if given == 0 {
            break;
        }
    }
}

/// Take `deficit` pixels back from shrinkable items, never below their minimum
fn reclaim_deficit(extents: &mut [i32], metrics: &[Option<ItemMetrics>], o: Orientation, mut deficit: i32) {
    let mut open: Vec<usize> = metrics
        .iter()
        .enumerate()
        .filter(|(i, m)| {
            m.map_or(false, |m| {
                m.policy.major(o).can_shrink() && extents[*i] > o.major(m.minimum)
            })
        })
        .map(|(i, _)| i)
        .collect();

    while deficit > 0 && !open.is_empty() {
        let share = deficit / open.len() as i32;
        let remainder = deficit % open.len() as i32;
        let mut taken = 0;
        let mut still_open = Vec::with_capacity(open.len());
        for (n, &i) in open.iter().enumerate() {
            let want = share + i32::from((n as i32) < remainder);
            let min = metrics[i].map_or(0, |m| o.major(m.minimum));
            let take = want.min(extents[i] - min);
            extents[i] -= take;
            taken += take;
            if extents[i] > min {
                still_open.push(i);
            }
        }
        open = still_open;
        deficit -= taken;
        if taken == 0 {
            break;
        }
    }
}
