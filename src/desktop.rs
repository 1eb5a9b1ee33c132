//! Desktop controller: the one owner of the window collection.
//!
//! The controller assigns identity and stacking order, tracks which window
//! is active and whether the start menu is open. Every id-keyed operation is
//! total: an unknown id leaves the state untouched and returns `false`.
//!
//! The collection lives behind an `Rc` and every mutation goes through
//! `Rc::make_mut`, so a `snapshot()` taken earlier never observes later
//! changes.

use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{
    DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, WINDOW_BASE_X, WINDOW_BASE_Y,
    WINDOW_PLACEMENT_JITTER,
};
use crate::geometry::{PixelRect, Point, Size};
use crate::window::{Icon, ManagedWindow, Surface, WindowId};

/// Source of initial window positions: a base point plus random jitter.
#[derive(Debug, Clone)]
pub struct Placement {
    rng: StdRng,
}

impl Placement {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn next_position(&mut self) -> Point {
        Point::new(
            WINDOW_BASE_X + self.rng.gen_range(0..WINDOW_PLACEMENT_JITTER),
            WINDOW_BASE_Y + self.rng.gen_range(0..WINDOW_PLACEMENT_JITTER),
        )
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[derive(Debug)]
pub struct Desktop {
    windows: Rc<Vec<ManagedWindow>>,
    active: Option<WindowId>,
    next_z_index: u64,
    next_window_id: u64,
    start_menu_open: bool,
    placement: Placement,
}

impl Desktop {
    pub fn new(placement: Placement) -> Self {
        Self {
            windows: Rc::new(Vec::new()),
            active: None,
            next_z_index: 1,
            next_window_id: 1,
            start_menu_open: false,
            placement,
        }
    }

    fn index_of(&self, id: WindowId) -> Option<usize> {
        self.windows.iter().position(|window| window.id == id)
    }

    fn window_mut(&mut self, id: WindowId) -> Option<&mut ManagedWindow> {
        let index = self.index_of(id)?;
        Rc::make_mut(&mut self.windows).get_mut(index)
    }

    fn take_z_index(&mut self) -> u64 {
        let z_index = self.next_z_index;
        self.next_z_index += 1;
        z_index
    }

    /// Appends a new window on top of the stack and makes it active.
    /// Opening a window also closes the start menu.
    pub fn open_window(&mut self, title: impl Into<String>, content: Surface, icon: Icon) -> WindowId {
        let id = WindowId::new(self.next_window_id);
        self.next_window_id += 1;
        let z_index = self.take_z_index();
        let window = ManagedWindow {
            id,
            title: title.into(),
            icon,
            content,
            position: self.placement.next_position(),
            size: Size::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
            minimized: false,
            z_index,
        };
        tracing::debug!(window_id = %id, z_index, title = %window.title, "opened window");
        Rc::make_mut(&mut self.windows).push(window);
        self.active = Some(id);
        self.start_menu_open = false;
        id
    }

    pub fn close_window(&mut self, id: WindowId) -> bool {
        let Some(index) = self.index_of(id) else {
            tracing::debug!(window_id = %id, "close ignored for unknown window");
            return false;
        };
        Rc::make_mut(&mut self.windows).remove(index);
        if self.active == Some(id) {
            self.active = None;
        }
        tracing::debug!(window_id = %id, "closed window");
        true
    }

    pub fn minimize_window(&mut self, id: WindowId) -> bool {
        let Some(window) = self.window_mut(id) else {
            tracing::debug!(window_id = %id, "minimize ignored for unknown window");
            return false;
        };
        window.minimized = true;
        if self.active == Some(id) {
            self.active = None;
        }
        tracing::debug!(window_id = %id, "minimized window");
        true
    }

    /// Un-minimizes, raises and activates. Always takes a fresh z-index,
    /// even when the window was already visible.
    pub fn restore_window(&mut self, id: WindowId) -> bool {
        if self.index_of(id).is_none() {
            tracing::debug!(window_id = %id, "restore ignored for unknown window");
            return false;
        }
        self.raise(id);
        tracing::debug!(window_id = %id, "restored window");
        true
    }

    /// Raises and activates. A no-op when the window is already active.
    /// Activating a minimized window restores it.
    pub fn activate_window(&mut self, id: WindowId) -> bool {
        if self.active == Some(id) {
            return false;
        }
        if self.index_of(id).is_none() {
            tracing::debug!(window_id = %id, "activate ignored for unknown window");
            return false;
        }
        self.raise(id);
        tracing::debug!(window_id = %id, "activated window");
        true
    }

    fn raise(&mut self, id: WindowId) {
        let z_index = self.take_z_index();
        if let Some(window) = self.window_mut(id) {
            window.minimized = false;
            window.z_index = z_index;
            self.active = Some(id);
        }
    }

    /// Pure translation; windows may be placed anywhere, including off-screen.
    pub fn move_window(&mut self, id: WindowId, position: Point) -> bool {
        let Some(window) = self.window_mut(id) else {
            tracing::debug!(window_id = %id, "move ignored for unknown window");
            return false;
        };
        window.position = position;
        true
    }

    /// Writes position and size together; the size floor is applied here.
    pub fn set_window_bounds(&mut self, id: WindowId, bounds: PixelRect) -> bool {
        let Some(window) = self.window_mut(id) else {
            tracing::debug!(window_id = %id, "resize ignored for unknown window");
            return false;
        };
        window.position = bounds.position();
        window.size = bounds.size().floored();
        true
    }

    pub fn toggle_start_menu(&mut self) -> bool {
        self.start_menu_open = !self.start_menu_open;
        self.start_menu_open
    }

    pub fn close_start_menu(&mut self) {
        self.start_menu_open = false;
    }

    pub fn start_menu_open(&self) -> bool {
        self.start_menu_open
    }

    /// Every window in open order, minimized ones included.
    pub fn windows(&self) -> &[ManagedWindow] {
        &self.windows
    }

    pub fn window(&self, id: WindowId) -> Option<&ManagedWindow> {
        self.windows.iter().find(|window| window.id == id)
    }

    pub fn active_window_id(&self) -> Option<WindowId> {
        self.active
    }

    pub fn next_z_index(&self) -> u64 {
        self.next_z_index
    }

    /// Immutable view of the collection as it is right now.
    pub fn snapshot(&self) -> Rc<Vec<ManagedWindow>> {
        Rc::clone(&self.windows)
    }

    /// Visible windows, bottom-most first.
    pub fn paint_order(&self) -> Vec<&ManagedWindow> {
        let mut visible: Vec<&ManagedWindow> = self
            .windows
            .iter()
            .filter(|window| !window.minimized)
            .collect();
        visible.sort_by_key(|window| window.z_index);
        visible
    }

    pub fn visible_count(&self) -> usize {
        self.windows.iter().filter(|window| !window.minimized).count()
    }
}

impl Default for Desktop {
    fn default() -> Self {
        Self::new(Placement::default())
    }
}
