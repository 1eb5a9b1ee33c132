pub mod decorator;
pub mod gesture;

use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crossterm::event::Event;
use ratatui::prelude::Rect;

use crate::components::{Component, ComponentContext};
use crate::geometry::{PixelRect, Point, Size};
use crate::ui::UiFrame;

/// Signed cell rectangle: windows may hang off any edge of the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl FloatRect {
    pub fn right(&self) -> i32 {
        self.x + i32::from(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y + i32::from(self.height)
    }

    pub fn contains(&self, column: i32, row: i32) -> bool {
        column >= self.x && column < self.right() && row >= self.y && row < self.bottom()
    }
}

/// Identity assigned by the desktop at open time. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u64);

impl WindowId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

/// Display handle for a window's icon. The manager stores it and hands it to
/// the chrome and the taskbar without interpreting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon(Cow<'static, str>);

impl Icon {
    pub fn new(glyph: impl Into<Cow<'static, str>>) -> Self {
        Self(glyph.into())
    }

    pub fn glyph(&self) -> &str {
        &self.0
    }
}

/// Shared handle to a window's content component.
#[derive(Clone)]
pub struct Surface(Rc<RefCell<dyn Component>>);

impl Surface {
    pub fn new<C: Component + 'static>(component: C) -> Self {
        Self(Rc::new(RefCell::new(component)))
    }

    pub fn render(&self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.0.borrow_mut().render(frame, area, ctx);
    }

    pub fn handle_event(&self, event: &Event, ctx: &ComponentContext) -> bool {
        self.0.borrow_mut().handle_event(event, ctx)
    }

    pub fn ptr_eq(&self, other: &Surface) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface").finish_non_exhaustive()
    }
}

/// One entry of the desktop's window collection.
///
/// Only the desktop mutates these; everyone else reads through the getters.
#[derive(Debug, Clone)]
pub struct ManagedWindow {
    pub(crate) id: WindowId,
    pub(crate) title: String,
    pub(crate) icon: Icon,
    pub(crate) content: Surface,
    pub(crate) position: Point,
    pub(crate) size: Size,
    pub(crate) minimized: bool,
    pub(crate) z_index: u64,
}

impl ManagedWindow {
    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn icon(&self) -> &Icon {
        &self.icon
    }

    pub fn content(&self) -> &Surface {
        &self.content
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn bounds(&self) -> PixelRect {
        PixelRect::from_parts(self.position, self.size)
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn z_index(&self) -> u64 {
        self.z_index
    }
}
