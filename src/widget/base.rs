//! Widget node data
//!
//! A [`Widget`] is plain data stored in the [`WidgetTree`](super::WidgetTree)
//! arena. Anything that touches more than one node (positions, parenting,
//! layouts) goes through the tree; per-node properties are set here.

use std::rc::Rc;

use slotmap::new_key_type;

use crate::geom::{Padding, Point, Rect, Size};
use crate::layout::{BoxLayout, SizePolicy, WidgetMetrics};
use crate::render::Color;

use super::decorator::Decorator;
use super::event::{ObserverId, UiEvent, UiEventDispatcher, UiEventKind};
use super::font::Font;

new_key_type! {
    /// Generation-checked handle to a widget in a tree
    pub struct WidgetId;
}

/// Hands out process-visible integer widget ids
///
/// Owned by a tree; ids start at 1 and only ever increase.
#[derive(Clone, Debug)]
pub struct IdAllocator {
    next: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Id the next call will return
    pub fn peek(&self) -> u32 {
        self.next
    }
}

/// How a widget accepts keyboard focus
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FocusPolicy {
    #[default]
    NoFocus,
    /// Focused when clicked
    ClickFocus,
}

/// A rectangular UI node
pub struct Widget {
    pub(crate) id: u32,
    pub(crate) name: String,
    pub(crate) parent: Option<WidgetId>,
    pub(crate) children: Vec<WidgetId>,
    /// Global position; `Point::NULL` if it fell outside the parent
    pub(crate) position: Point,
    /// Offset from the parent's position (equals `position` for windows)
    pub(crate) local: Point,
    /// Explicitly requested size, `Size::NULL` if none
    pub(crate) size: Size,
    /// Size assigned by the last layout pass
    pub(crate) laid_out: Option<Size>,
    pub(crate) minimum_size: Size,
    pub(crate) maximum_size: Size,
    pub(crate) size_hint: Size,
    pub(crate) policy: SizePolicy,
    pub(crate) padding: Padding,
    pub(crate) focus_policy: FocusPolicy,
    pub(crate) focused: bool,
    pub(crate) hovered: bool,
    pub(crate) visible: bool,
    pub(crate) decorator: Option<Box<dyn Decorator>>,
    pub(crate) font: Option<Rc<dyn Font>>,
    pub(crate) title: Option<String>,
    pub(crate) title_color: Color,
    pub(crate) layout: Option<BoxLayout>,
    /// Container whose layout arranges this widget
    pub(crate) managed_by: Option<WidgetId>,
    pub(crate) dispatcher: Rc<UiEventDispatcher>,
}

impl Widget {
    pub(crate) fn new(id: u32, name: Option<&str>, local: Point, size: Size) -> Self {
        Self {
            id,
            name: name.map_or_else(|| format!("widget_{}", id), str::to_string),
            parent: None,
            children: Vec::new(),
            position: local,
            local,
            size,
            laid_out: None,
            minimum_size: Size::NULL,
            maximum_size: Size::NULL,
            size_hint: Size::NULL,
            policy: SizePolicy::default(),
            padding: Padding::default(),
            focus_policy: FocusPolicy::default(),
            focused: false,
            hovered: false,
            visible: true,
            decorator: None,
            font: None,
            title: None,
            title_color: Color::WHITE,
            layout: None,
            managed_by: None,
            dispatcher: Rc::new(UiEventDispatcher::new()),
        }
    }

    /// Unique integer id
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    /// A widget without a parent is a window; its position is in screen space
    pub fn is_window(&self) -> bool {
        self.parent.is_none()
    }

    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    /// Global position
    pub fn position(&self) -> Point {
        self.position
    }

    /// Position relative to the parent
    pub fn local_position(&self) -> Point {
        self.local
    }

    /// Current size: layout-assigned, else explicit, else the size hint
    pub fn size(&self) -> Size {
        match self.laid_out {
            Some(size) => size,
            None if !self.size.is_null() => self.size,
            None => self.content_hint(),
        }
    }

    /// Explicitly requested size, `Size::NULL` if none
    pub fn requested_size(&self) -> Size {
        self.size
    }

    pub fn global_bounds(&self) -> Rect {
        Rect::from_parts(self.position, self.size())
    }

    pub fn minimum_size(&self) -> Size {
        self.minimum_size
    }

    pub fn set_minimum_size(&mut self, size: Size) {
        self.minimum_size = size;
    }

    pub fn maximum_size(&self) -> Size {
        self.maximum_size
    }

    pub fn set_maximum_size(&mut self, size: Size) {
        self.maximum_size = size;
    }

    /// Override the computed size hint; `Size::NULL` restores it
    pub fn set_size_hint(&mut self, hint: Size) {
        self.size_hint = hint;
    }

    /// Natural size ignoring any layout the widget owns
    ///
    /// An explicit hint wins; otherwise the title measured with the font
    /// plus padding; otherwise the minimum size.
    pub fn content_hint(&self) -> Size {
        if !self.size_hint.is_null() {
            return self.size_hint;
        }
        if let (Some(font), Some(title)) = (&self.font, &self.title) {
            let text = font.text_size(title);
            return Size::new(
                text.width + self.padding.horizontal(),
                text.height + self.padding.vertical(),
            );
        }
        self.minimum_size.or_zero()
    }

    pub fn policy(&self) -> SizePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: SizePolicy) {
        self.policy = policy;
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn set_padding(&mut self, padding: Padding) {
        self.padding = padding;
    }

    pub fn focus_policy(&self) -> FocusPolicy {
        self.focus_policy
    }

    pub fn set_focus_policy(&mut self, policy: FocusPolicy) {
        self.focus_policy = policy;
    }

    pub fn has_focus(&self) -> bool {
        self.focused
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn decorator(&self) -> Option<&dyn Decorator> {
        self.decorator.as_deref()
    }

    pub fn set_decorator(&mut self, decorator: impl Decorator + 'static) {
        let mut decorator = Box::new(decorator);
        decorator.set_bounds(self.global_bounds());
        self.decorator = Some(decorator);
    }

    pub fn clear_decorator(&mut self) {
        self.decorator = None;
    }

    pub fn font(&self) -> Option<&Rc<dyn Font>> {
        self.font.as_ref()
    }

    pub fn set_font(&mut self, font: Rc<dyn Font>) {
        self.font = Some(font);
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn set_title_color(&mut self, color: Color) {
        self.title_color = color;
    }

    pub fn layout(&self) -> Option<&BoxLayout> {
        self.layout.as_ref()
    }

    /// Container whose layout arranges this widget
    pub fn managed_by(&self) -> Option<WidgetId> {
        self.managed_by
    }

    /// Shared observer table; clone it to register from inside an observer
    pub fn dispatcher(&self) -> Rc<UiEventDispatcher> {
        Rc::clone(&self.dispatcher)
    }

    /// Register an observer for a UI event kind
    pub fn on(&self, kind: UiEventKind, observer: impl Fn(&UiEvent) + 'static) -> ObserverId {
        self.dispatcher.register(kind, observer)
    }

    pub(crate) fn base_metrics(&self) -> WidgetMetrics {
        WidgetMetrics {
            size: self.size,
            size_hint: self.content_hint(),
            minimum_size: self.minimum_size,
            maximum_size: self.maximum_size,
            policy: self.policy,
        }
    }
}
