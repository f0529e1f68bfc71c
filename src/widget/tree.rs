//! Widget tree - arena ownership of widgets plus layout integration
//!
//! The tree is the single owner of every widget. Parents refer to children
//! and children to parents through [`WidgetId`] handles, so removing a
//! subtree never leaves a dangling reference: a stale handle simply stops
//! resolving.

use slotmap::SlotMap;

use crate::error::{Error, Result};
use crate::geom::{Point, Rect, Size};
use crate::layout::{BoxLayout, LayoutHost, WidgetMetrics};
use crate::render::RenderTarget;

use super::base::{FocusPolicy, IdAllocator, Widget, WidgetId};
use super::event::{Event, EventKind, UiEvent, UiEventKind};

/// Widget storage; this is what layouts measure and place
#[derive(Default)]
pub(crate) struct Arena {
    nodes: SlotMap<WidgetId, Widget>,
}

impl LayoutHost for Arena {
    fn metrics(&self, id: WidgetId) -> Option<WidgetMetrics> {
        let widget = self.nodes.get(id)?;
        let mut metrics = widget.base_metrics();
        if widget.size_hint.is_null() {
            if let Some(layout) = &widget.layout {
                let inner = layout.size_hint(self);
                metrics.size_hint = Size::new(
                    inner.width + widget.padding.horizontal(),
                    inner.height + widget.padding.vertical(),
                );
            }
        }
        Some(metrics)
    }

    fn place(&mut self, id: WidgetId, rect: Rect) {
        let parent_pos = match self.nodes.get(id) {
            Some(w) => w.parent.and_then(|p| self.nodes.get(p)).map(|p| p.position),
            None => return,
        };
        if let Some(widget) = self.nodes.get_mut(id) {
            widget.position = rect.position();
            widget.local = parent_pos.map_or(rect.position(), |p| rect.position() - p);
            widget.laid_out = Some(rect.size());
        }
    }
}

/// Owner of a forest of widgets
#[derive(Default)]
pub struct WidgetTree {
    arena: Arena,
    roots: Vec<WidgetId>,
    ids: IdAllocator,
    focused: Option<WidgetId>,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live widgets
    pub fn len(&self) -> usize {
        self.arena.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.nodes.is_empty()
    }

    /// Top-level widgets (windows) in creation order
    pub fn roots(&self) -> &[WidgetId] {
        &self.roots
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.arena.nodes.contains_key(id)
    }

    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.arena.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.arena.nodes.get_mut(id)
    }

    fn node(&self, id: WidgetId) -> Result<&Widget> {
        self.arena.nodes.get(id).ok_or(Error::WidgetNotFound(id))
    }

    fn node_mut(&mut self, id: WidgetId) -> Result<&mut Widget> {
        self.arena.nodes.get_mut(id).ok_or(Error::WidgetNotFound(id))
    }

    /// Create a top-level widget positioned in screen coordinates
    pub fn create_window(&mut self, name: Option<&str>, position: Point, size: Size) -> WidgetId {
        let id = self.ids.next_id();
        let key = self.arena.nodes.insert(Widget::new(id, name, position, size));
        self.roots.push(key);
        tracing::debug!(id, ?position, ?size, "created window");
        key
    }

    /// Create a widget, optionally as a child of `parent`
    ///
    /// With a parent, `position` is an offset from the parent's position.
    pub fn create(
        &mut self,
        parent: Option<WidgetId>,
        name: Option<&str>,
        position: Point,
        size: Size,
    ) -> Result<WidgetId> {
        match parent {
            None => Ok(self.create_window(name, position, size)),
            Some(parent) => {
                self.node(parent)?;
                let id = self.ids.next_id();
                let key = self.arena.nodes.insert(Widget::new(id, name, position, size));
                self.attach(parent, key);
                Ok(key)
            }
        }
    }

    /// Make `child` the last child of `parent`
    ///
    /// The child is detached from any previous parent first. This does not
    /// add the child to the parent's layout; use [`append_widget`](Self::append_widget).
    pub fn insert_child(&mut self, parent: WidgetId, child: WidgetId) -> Result<()> {
        self.node(parent)?;
        self.node(child)?;
        if self.is_ancestor(child, parent) {
            tracing::warn!(?parent, ?child, "refusing to parent a widget under itself");
            return Err(Error::InvalidArgument(
                "a widget cannot become a descendant of itself".to_string(),
            ));
        }
        self.detach(child);
        self.attach(parent, child);
        Ok(())
    }

    fn attach(&mut self, parent: WidgetId, child: WidgetId) {
        if let Some(p) = self.arena.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.arena.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
        self.roots.retain(|r| *r != child);
        self.reposition(child);
    }

    fn detach(&mut self, child: WidgetId) {
        let Some(parent) = self.arena.nodes.get(child).and_then(|c| c.parent) else {
            self.roots.retain(|r| *r != child);
            return;
        };
        if let Some(p) = self.arena.nodes.get_mut(parent) {
            p.children.retain(|c| *c != child);
            if let Some(layout) = p.layout.as_mut() {
                layout.remove_widget(child);
            }
        }
        if let Some(c) = self.arena.nodes.get_mut(child) {
            c.parent = None;
            c.managed_by = None;
        }
    }

    /// Whether `ancestor` is `id` or one of its ancestors
    fn is_ancestor(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.arena.nodes.get(current).and_then(|w| w.parent);
        }
        false
    }

    /// Whether the layout of `manager` arranges `id`, directly or through
    /// nested layouts (true when they are the same widget)
    fn manages(&self, manager: WidgetId, id: WidgetId) -> bool {
        let mut cursor = Some(id);
        let mut steps = 0;
        while let Some(current) = cursor {
            if current == manager || steps > self.arena.nodes.len() {
                return true;
            }
            steps += 1;
            cursor = self.arena.nodes.get(current).and_then(|w| w.managed_by);
        }
        false
    }

    /// Recompute the global position of `id` and its subtree from local offsets
    ///
    /// A child whose origin falls outside a sized parent gets `Point::NULL`.
    fn reposition(&mut self, id: WidgetId) {
        let Some(widget) = self.arena.nodes.get(id) else {
            return;
        };
        let global = match widget.parent.and_then(|p| self.arena.nodes.get(p)) {
            None => widget.local,
            Some(parent) => {
                let bounds = parent.global_bounds();
                let global = parent.position + widget.local;
                let sized = bounds.width > 0 && bounds.height > 0;
                if parent.position.is_null() || (sized && !bounds.contains(global)) {
                    tracing::warn!(
                        widget = widget.id,
                        ?global,
                        parent_bounds = ?bounds,
                        "widget position outside parent bounds"
                    );
                    Point::NULL
                } else {
                    global
                }
            }
        };
        let children = widget.children.clone();
        if let Some(widget) = self.arena.nodes.get_mut(id) {
            widget.position = global;
        }
        for child in children {
            self.reposition(child);
        }
        self.sync_decorator(id);
    }

    fn sync_decorator(&mut self, id: WidgetId) {
        if let Some(widget) = self.arena.nodes.get_mut(id) {
            let bounds = widget.global_bounds();
            if let Some(decorator) = widget.decorator.as_mut() {
                decorator.set_bounds(bounds);
            }
        }
    }

    /// Move a widget; for children `position` is relative to the parent
    pub fn set_position(&mut self, id: WidgetId, position: Point) -> Result<()> {
        self.node_mut(id)?.local = position;
        self.reposition(id);
        self.relayout(id);
        Ok(())
    }

    /// Shift a widget by a delta
    pub fn move_by(&mut self, id: WidgetId, dx: i32, dy: i32) -> Result<()> {
        let local = self.node(id)?.local;
        self.set_position(id, local.offset(dx, dy))
    }

    /// Request an explicit size; `Size::NULL` returns to the size hint
    pub fn set_size(&mut self, id: WidgetId, size: Size) -> Result<()> {
        let widget = self.node_mut(id)?;
        widget.size = size;
        widget.laid_out = None;
        let container = widget.managed_by;
        self.sync_decorator(id);
        match container {
            Some(container) => self.relayout(container),
            None => self.relayout(id),
        }
        Ok(())
    }

    /// Destroy a widget and its whole subtree
    pub fn remove(&mut self, id: WidgetId) -> Result<()> {
        self.node(id)?;
        let container = self.arena.nodes.get(id).and_then(|w| w.managed_by);
        self.detach(id);
        self.roots.retain(|r| *r != id);

        let mut stack = vec![id];
        let mut removed = 0;
        while let Some(current) = stack.pop() {
            if let Some(widget) = self.arena.nodes.remove(current) {
                stack.extend(widget.children);
                removed += 1;
                if self.focused == Some(current) {
                    self.focused = None;
                }
            }
        }
        tracing::debug!(?id, removed, "removed widget subtree");

        if let Some(container) = container {
            self.relayout(container);
        }
        Ok(())
    }

    /// First direct child of `parent` with integer id `id`
    pub fn find_child_by_id(&self, parent: WidgetId, id: u32) -> Option<WidgetId> {
        self.get(parent)?
            .children
            .iter()
            .copied()
            .find(|c| self.get(*c).is_some_and(|w| w.id == id))
    }

    /// First direct child of `parent` named `name`
    pub fn find_child_by_name(&self, parent: WidgetId, name: &str) -> Option<WidgetId> {
        self.get(parent)?
            .children
            .iter()
            .copied()
            .find(|c| self.get(*c).is_some_and(|w| w.name == name))
    }

    /// Size hint including a layout the widget owns
    pub fn size_hint(&self, id: WidgetId) -> Option<Size> {
        self.arena.metrics(id).map(|m| m.size_hint)
    }

    /// Attach `layout` to `id`, replacing (and dropping) any previous one
    ///
    /// The layout is bound to the widget's bounds, computed immediately,
    /// and the widget is updated.
    pub fn set_layout(&mut self, id: WidgetId, mut layout: BoxLayout) -> Result<()> {
        self.node(id)?;
        let members: Vec<WidgetId> = layout.items().filter_map(|i| i.widget_id()).collect();
        if let Some(member) = members.iter().find(|m| self.manages(**m, id)) {
            tracing::warn!(container = ?id, widget = ?member, "layout would arrange its own container");
            return Err(Error::InvalidArgument(
                "a layout cannot arrange a widget that lays out its container".to_string(),
            ));
        }
        layout.set_owner(Some(id));
        let previous = self.node_mut(id)?.layout.replace(layout);
        if let Some(previous) = previous {
            for item in previous.items() {
                if let Some(w) = item.widget_id().and_then(|w| self.arena.nodes.get_mut(w)) {
                    w.managed_by = None;
                    w.laid_out = None;
                }
            }
        }
        for member in members {
            if let Some(w) = self.arena.nodes.get_mut(member) {
                w.managed_by = Some(id);
            }
        }
        self.relayout(id);
        self.update(id);
        Ok(())
    }

    /// Detach and return the layout of `id`
    pub fn take_layout(&mut self, id: WidgetId) -> Option<BoxLayout> {
        let mut layout = self.get_mut(id)?.layout.take()?;
        layout.set_owner(None);
        Some(layout)
    }

    pub fn layout(&self, id: WidgetId) -> Option<&BoxLayout> {
        self.get(id)?.layout.as_ref()
    }

    /// Mutate the layout of `id`, then recompute it
    pub fn with_layout<R>(&mut self, id: WidgetId, f: impl FnOnce(&mut BoxLayout) -> R) -> Result<R> {
        let layout = self
            .node_mut(id)?
            .layout
            .as_mut()
            .ok_or(Error::NoLayout(id))?;
        let result = f(layout);
        self.relayout(id);
        Ok(result)
    }

    /// Append `child` to the layout of `container`
    ///
    /// Fails without touching the layout when `child` already arranges
    /// `container` (or is `container`).
    pub fn append_widget(&mut self, container: WidgetId, child: WidgetId) -> Result<()> {
        self.node(child)?;
        if self.manages(child, container) {
            tracing::warn!(?container, ?child, "refusing a cyclic layout");
            return Err(Error::InvalidArgument(
                "a widget cannot be laid out by a layout it arranges".to_string(),
            ));
        }
        self.with_layout(container, |layout| layout.append_widget(child))?;
        if let Some(w) = self.arena.nodes.get_mut(child) {
            w.managed_by = Some(container);
        }
        Ok(())
    }

    /// Append a square spacer to the layout of `container`
    pub fn append_spacer(&mut self, container: WidgetId, size: i32) -> Result<()> {
        self.with_layout(container, |layout| layout.append_spacer(size))
    }

    /// Recompute the layout of `id` (if any) against its current bounds,
    /// then the layouts of every widget it placed
    pub fn relayout(&mut self, id: WidgetId) {
        let Some(widget) = self.arena.nodes.get_mut(id) else {
            return;
        };
        let bounds = widget.global_bounds().inset(&widget.padding);
        let Some(mut layout) = widget.layout.take() else {
            return;
        };

        layout.set_bounds(bounds);
        layout.update(&mut self.arena);

        let placed: Vec<WidgetId> = layout.items().filter_map(|i| i.widget_id()).collect();
        if let Some(widget) = self.arena.nodes.get_mut(id) {
            widget.layout = Some(layout);
        }
        for child in placed {
            self.reposition_children(child);
            self.sync_decorator(child);
            self.relayout(child);
        }
    }

    /// Children of a freshly placed widget follow it
    fn reposition_children(&mut self, id: WidgetId) {
        let children = self.get(id).map(|w| w.children.clone()).unwrap_or_default();
        for child in children {
            self.reposition(child);
        }
    }

    /// Refresh decorator bounds and layouts for `id` and its subtree
    pub fn update(&mut self, id: WidgetId) {
        let Some(widget) = self.arena.nodes.get_mut(id) else {
            return;
        };
        let bounds = widget.global_bounds();
        if let Some(decorator) = widget.decorator.as_mut() {
            decorator.set_bounds(bounds);
            decorator.update();
        }
        let children = widget.children.clone();
        self.relayout(id);
        for child in children {
            self.update(child);
        }
    }

    pub fn set_visible(&mut self, id: WidgetId, visible: bool) -> Result<()> {
        self.node_mut(id)?.visible = visible;
        Ok(())
    }

    /// Give keyboard focus to `id`; false if its policy refuses focus
    pub fn set_focus(&mut self, id: WidgetId) -> bool {
        match self.get(id) {
            Some(w) if w.focus_policy != FocusPolicy::NoFocus && w.visible => {}
            _ => return false,
        }
        if let Some(previous) = self.focused.and_then(|f| self.arena.nodes.get_mut(f)) {
            previous.focused = false;
        }
        if let Some(w) = self.arena.nodes.get_mut(id) {
            w.focused = true;
        }
        self.focused = Some(id);
        true
    }

    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// Dispatch a raw event to `id`'s subtree
    ///
    /// Children (in insertion order, depth first) see the event before the
    /// widget itself. Returns true if any widget emitted to an observer.
    pub fn process_event(&mut self, id: WidgetId, event: &Event) -> bool {
        let children = match self.get(id) {
            Some(w) if w.visible => w.children.clone(),
            _ => return false,
        };
        let mut consumed = false;
        for child in children {
            consumed |= self.process_event(child, event);
        }
        consumed | self.handle_own_event(id, event)
    }

    fn handle_own_event(&mut self, id: WidgetId, event: &Event) -> bool {
        let Some(widget) = self.arena.nodes.get_mut(id) else {
            return false;
        };
        let inside = !widget.position.is_null() && widget.global_bounds().contains(event.mouse);

        let kind = match event.kind {
            EventKind::MouseButtonDown if inside => UiEventKind::MouseDown,
            EventKind::MouseButtonUp if inside => UiEventKind::MouseUp,
            EventKind::MouseWheel if inside => UiEventKind::MouseWheel,
            EventKind::MouseMotion if inside != widget.hovered => {
                widget.hovered = inside;
                if inside {
                    UiEventKind::MouseEnter
                } else {
                    UiEventKind::MouseLeave
                }
            }
            _ => return false,
        };

        let ui_event = UiEvent {
            kind,
            widget_id: widget.id,
            widget_name: widget.name.clone(),
            event: *event,
        };
        let dispatcher = widget.dispatcher();
        if kind == UiEventKind::MouseDown && widget.focus_policy == FocusPolicy::ClickFocus {
            self.set_focus(id);
        }
        dispatcher.emit(&ui_event)
    }

    /// Draw `id` and its visible subtree
    ///
    /// Order: decorator, title text, then children in insertion order.
    pub fn draw(&self, id: WidgetId, target: &mut dyn RenderTarget) {
        let Some(widget) = self.get(id) else {
            return;
        };
        if !widget.visible || widget.position.is_null() {
            return;
        }
        if let Some(decorator) = &widget.decorator {
            decorator.draw(target);
        }
        if let Some(title) = &widget.title {
            let pos = widget
                .position
                .offset(widget.padding.left, widget.padding.top);
            target.draw_text(pos, title, widget.title_color);
        }
        for child in &widget.children {
            self.draw(*child, target);
        }
    }

    /// Draw every window
    pub fn draw_all(&self, target: &mut dyn RenderTarget) {
        for root in &self.roots {
            self.draw(*root, target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::geom::Padding;
    use crate::layout::{Policy, SizePolicy};
    use crate::render::{Color, DrawCommand, RecordingTarget};
    use crate::widget::decorator::FrameDecorator;
    use crate::widget::font::MonoFont;

    #[test]
    fn test_child_position_is_parent_plus_offset() {
        let mut tree = WidgetTree::new();
        let win = tree.create_window(Some("win"), Point::new(25, 25), Size::new(300, 200));
        let child = tree
            .create(Some(win), None, Point::new(12, 25), Size::new(100, 20))
            .unwrap();

        assert_eq!(tree.get(child).unwrap().position(), Point::new(37, 50));
        assert!(tree.get(win).unwrap().is_window());
        assert!(!tree.get(child).unwrap().is_window());

        tree.set_position(win, Point::new(0, 0)).unwrap();
        assert_eq!(tree.get(child).unwrap().position(), Point::new(12, 25));
    }

    #[test]
    fn test_child_outside_parent_gets_null_position() {
        let mut tree = WidgetTree::new();
        let win = tree.create_window(None, Point::new(0, 0), Size::new(50, 50));
        let child = tree
            .create(Some(win), None, Point::new(80, 10), Size::new(10, 10))
            .unwrap();
        assert!(tree.get(child).unwrap().position().is_null());
    }

    #[test]
    fn test_create_with_missing_parent_fails() {
        let mut tree = WidgetTree::new();
        let win = tree.create_window(None, Point::ZERO, Size::new(10, 10));
        tree.remove(win).unwrap();
        assert!(matches!(
            tree.create(Some(win), None, Point::ZERO, Size::NULL),
            Err(Error::WidgetNotFound(_))
        ));
    }

    #[test]
    fn test_insert_child_reparents() {
        let mut tree = WidgetTree::new();
        let a = tree.create_window(None, Point::ZERO, Size::new(100, 100));
        let b = tree.create_window(None, Point::ZERO, Size::new(100, 100));
        let c = tree.create(Some(a), None, Point::new(1, 1), Size::NULL).unwrap();

        tree.insert_child(b, c).unwrap();
        assert!(tree.get(a).unwrap().children().is_empty());
        assert_eq!(tree.get(b).unwrap().children(), &[c]);
        assert_eq!(tree.get(c).unwrap().parent(), Some(b));

        // No cycles
        assert!(tree.insert_child(c, b).is_err());
        assert_eq!(tree.roots(), &[a, b]);
    }

    #[test]
    fn test_find_child() {
        let mut tree = WidgetTree::new();
        let win = tree.create_window(None, Point::ZERO, Size::new(100, 100));
        let first = tree.create(Some(win), Some("ok"), Point::ZERO, Size::NULL).unwrap();
        let _second = tree.create(Some(win), Some("ok"), Point::ZERO, Size::NULL).unwrap();

        assert_eq!(tree.find_child_by_name(win, "ok"), Some(first));
        let int_id = tree.get(first).unwrap().id();
        assert_eq!(tree.find_child_by_id(win, int_id), Some(first));
        assert_eq!(tree.find_child_by_name(win, "cancel"), None);
    }

    #[test]
    fn test_remove_subtree_and_layout_item() {
        let mut tree = WidgetTree::new();
        let win = tree.create_window(None, Point::ZERO, Size::new(100, 20));
        tree.set_layout(win, BoxLayout::horizontal()).unwrap();
        let a = tree.create(Some(win), None, Point::ZERO, Size::new(10, 10)).unwrap();
        let b = tree.create(Some(win), None, Point::ZERO, Size::new(10, 10)).unwrap();
        let grandchild = tree.create(Some(a), None, Point::ZERO, Size::NULL).unwrap();
        tree.append_widget(win, a).unwrap();
        tree.append_widget(win, b).unwrap();
        assert_eq!(tree.get(b).unwrap().position(), Point::new(10, 0));

        tree.remove(a).unwrap();
        assert!(!tree.contains(a));
        assert!(!tree.contains(grandchild));
        assert_eq!(tree.layout(win).unwrap().count(), 1);
        assert_eq!(tree.get(b).unwrap().position(), Point::new(0, 0));
        assert!(tree.remove(a).is_err());
    }

    #[test]
    fn test_layout_with_padding_and_nested_container() {
        let mut tree = WidgetTree::new();
        let win = tree.create_window(None, Point::new(10, 10), Size::new(200, 100));
        tree.get_mut(win).unwrap().set_padding(Padding::uniform(5));
        tree.set_layout(win, BoxLayout::vertical()).unwrap();

        let row = tree.create(Some(win), None, Point::ZERO, Size::NULL).unwrap();
        tree.get_mut(row)
            .unwrap()
            .set_policy(SizePolicy::new(Policy::Expanding, Policy::Fixed));
        tree.set_layout(row, BoxLayout::horizontal()).unwrap();
        let button = tree.create(Some(row), None, Point::ZERO, Size::new(30, 12)).unwrap();
        tree.append_widget(row, button).unwrap();
        tree.append_widget(win, row).unwrap();

        // Row takes its hint height from its own layout and the full inner width
        let row_bounds = tree.get(row).unwrap().global_bounds();
        assert_eq!(row_bounds, Rect::new(15, 15, 190, 12));
        assert_eq!(tree.get(button).unwrap().position(), Point::new(15, 15));
        assert_eq!(tree.size_hint(row), Some(Size::new(30, 12)));
    }

    #[test]
    fn test_with_layout_requires_layout() {
        let mut tree = WidgetTree::new();
        let win = tree.create_window(None, Point::ZERO, Size::new(10, 10));
        assert!(matches!(
            tree.with_layout(win, |l| l.set_spacing(2)),
            Err(Error::NoLayout(_))
        ));
        assert!(tree.append_spacer(win, 4).is_err());
    }

    #[test]
    fn test_process_event_children_first() {
        let mut tree = WidgetTree::new();
        let win = tree.create_window(Some("win"), Point::ZERO, Size::new(100, 100));
        let button = tree
            .create(Some(win), Some("button"), Point::new(10, 10), Size::new(20, 20))
            .unwrap();

        let order = Rc::new(RefCell::new(Vec::new()));
        for id in [win, button] {
            let o = order.clone();
            tree.get(id)
                .unwrap()
                .on(UiEventKind::MouseDown, move |e| o.borrow_mut().push(e.widget_name.clone()));
        }

        assert!(tree.process_event(win, &Event::mouse_down(15, 15)));
        assert_eq!(*order.borrow(), vec!["button", "win"]);

        order.borrow_mut().clear();
        assert!(tree.process_event(win, &Event::mouse_down(50, 50)));
        assert_eq!(*order.borrow(), vec!["win"]);

        assert!(!tree.process_event(win, &Event::mouse_down(500, 500)));
    }

    #[test]
    fn test_hover_and_click_focus() {
        let mut tree = WidgetTree::new();
        let win = tree.create_window(None, Point::ZERO, Size::new(100, 100));
        let field = tree.create(Some(win), None, Point::new(0, 0), Size::new(10, 10)).unwrap();
        tree.get_mut(field)
            .unwrap()
            .set_focus_policy(FocusPolicy::ClickFocus);

        let events = Rc::new(RefCell::new(Vec::new()));
        let e = events.clone();
        tree.get(field)
            .unwrap()
            .on(UiEventKind::MouseEnter, move |ev| e.borrow_mut().push(ev.kind));
        let e = events.clone();
        tree.get(field)
            .unwrap()
            .on(UiEventKind::MouseLeave, move |ev| e.borrow_mut().push(ev.kind));

        tree.process_event(win, &Event::mouse_motion(5, 5));
        tree.process_event(win, &Event::mouse_motion(6, 6));
        tree.process_event(win, &Event::mouse_motion(50, 50));
        assert_eq!(
            *events.borrow(),
            vec![UiEventKind::MouseEnter, UiEventKind::MouseLeave]
        );

        tree.process_event(win, &Event::mouse_down(5, 5));
        assert_eq!(tree.focused(), Some(field));
        assert!(tree.get(field).unwrap().has_focus());
        assert!(!tree.set_focus(win));
    }

    #[test]
    fn test_hidden_widgets_ignore_events_and_draw() {
        let mut tree = WidgetTree::new();
        let win = tree.create_window(None, Point::ZERO, Size::new(100, 100));
        tree.get(win).unwrap().on(UiEventKind::MouseDown, |_| {});
        tree.set_visible(win, false).unwrap();
        assert!(!tree.process_event(win, &Event::mouse_down(1, 1)));

        let mut target = RecordingTarget::new();
        tree.get_mut(win).unwrap().set_title("hidden");
        tree.draw(win, &mut target);
        assert!(target.commands.is_empty());
    }

    #[test]
    fn test_draw_order() {
        let mut tree = WidgetTree::new();
        let win = tree.create_window(None, Point::new(0, 0), Size::new(100, 100));
        {
            let w = tree.get_mut(win).unwrap();
            w.set_decorator(FrameDecorator::new(Color::GRAY));
            w.set_title("Window");
            w.set_font(Rc::new(MonoFont::new(8, 16)));
        }
        let label = tree.create(Some(win), None, Point::new(4, 20), Size::NULL).unwrap();
        {
            let w = tree.get_mut(label).unwrap();
            w.set_font(Rc::new(MonoFont::new(8, 16)));
            w.set_title("Label");
        }
        tree.update(win);

        let mut target = RecordingTarget::new();
        tree.draw_all(&mut target);
        assert_eq!(
            target.commands[0],
            DrawCommand::Fill(Rect::new(0, 0, 100, 100), Color::GRAY)
        );
        assert_eq!(target.texts(), vec!["Window", "Label"]);
        assert_eq!(
            target.commands[2],
            DrawCommand::Text(Point::new(4, 20), "Label".to_string(), Color::WHITE)
        );
    }

    #[test]
    fn test_set_layout_replaces_previous() {
        let mut tree = WidgetTree::new();
        let win = tree.create_window(None, Point::ZERO, Size::new(100, 100));
        tree.set_layout(win, BoxLayout::horizontal()).unwrap();
        let a = tree.create(Some(win), None, Point::ZERO, Size::new(10, 10)).unwrap();
        tree.append_widget(win, a).unwrap();
        assert_eq!(tree.get(a).unwrap().managed_by(), Some(win));

        tree.set_layout(win, BoxLayout::vertical()).unwrap();
        assert_eq!(tree.layout(win).unwrap().count(), 0);
        assert_eq!(tree.get(a).unwrap().managed_by(), None);
        assert_eq!(tree.layout(win).unwrap().owner(), Some(win));

        let taken = tree.take_layout(win).unwrap();
        assert_eq!(taken.owner(), None);
        assert!(tree.layout(win).is_none());
    }

    #[test]
    fn test_cyclic_layouts_rejected() {
        let mut tree = WidgetTree::new();
        let win = tree.create_window(None, Point::ZERO, Size::new(100, 100));
        let row = tree.create(Some(win), None, Point::ZERO, Size::NULL).unwrap();
        let cell = tree.create(Some(row), None, Point::ZERO, Size::NULL).unwrap();
        tree.set_layout(win, BoxLayout::vertical()).unwrap();
        tree.set_layout(row, BoxLayout::horizontal()).unwrap();
        tree.set_layout(cell, BoxLayout::horizontal()).unwrap();
        tree.append_widget(win, row).unwrap();
        tree.append_widget(row, cell).unwrap();

        assert!(matches!(
            tree.append_widget(row, win),
            Err(Error::InvalidArgument(_))
        ));
        assert!(tree.append_widget(cell, win).is_err());
        assert!(tree.append_widget(win, win).is_err());
        assert_eq!(tree.layout(row).unwrap().count(), 1);
        assert_eq!(tree.layout(cell).unwrap().count(), 0);
        assert_eq!(tree.get(win).unwrap().managed_by(), None);

        // A prebuilt layout gets the same check
        let mut sneaky = BoxLayout::horizontal();
        sneaky.append_widget(win);
        assert!(tree.set_layout(cell, sneaky).is_err());
        assert_eq!(tree.layout(cell).unwrap().count(), 0);

        // Sizing still terminates
        assert!(tree.size_hint(win).is_some());
    }

    #[test]
    fn test_set_layout_claims_prebuilt_members() {
        let mut tree = WidgetTree::new();
        let win = tree.create_window(None, Point::ZERO, Size::new(100, 20));
        let a = tree.create(Some(win), None, Point::ZERO, Size::new(10, 10)).unwrap();
        let mut layout = BoxLayout::horizontal();
        layout.append_widget(a);
        tree.set_layout(win, layout).unwrap();
        assert_eq!(tree.get(a).unwrap().managed_by(), Some(win));
    }
}
