//! The shell owns every piece of desktop state and routes input to it.
//!
//! Pointer-down priority: shut-down confirmation, active gesture, modal
//! dialogs, taskbar, start menu, windows (topmost first), desktop icons.
//! Hit rects come from the previous `render`, so the shell must be drawn
//! at least once before pointer input means anything.

use std::time::Instant;

use crossterm::event::{Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::apps::LauncherRegistry;
use crate::clock::Clock;
use crate::components::{
    ComponentContext, ConfirmAction, ConfirmOverlay, NetworkAction, NetworkDialog, RunAction,
    RunDialog, ToastQueue,
};
use crate::desktop::{Desktop, Placement};
use crate::desktop_icons::DesktopIcons;
use crate::event_loop::ControlFlow;
use crate::geometry::CellMetrics;
use crate::keybindings::{Action, KeyBindings};
use crate::network::NetworkStatus;
use crate::start_menu::{MenuCommand, MenuHit, StartMenu, local_user_label};
use crate::taskbar::{Taskbar, TaskbarHit};
use crate::theme;
use crate::ui::UiFrame;
use crate::window::decorator::{ChromeHit, ChromeLayout, ClassicDecorator, WindowDecorator};
use crate::window::gesture::{Gesture, GestureStep};
use crate::window::{FloatRect, Icon, Surface, WindowId};

const SHUT_DOWN_TITLE: &str = "Shut Down Windows";
const SHUT_DOWN_BODY: &str = "Are you sure you want to shut down the computer?";

pub struct Shell {
    desktop: Desktop,
    launchers: LauncherRegistry,
    taskbar: Taskbar,
    start_menu: StartMenu,
    icons: DesktopIcons,
    run_dialog: RunDialog,
    network_dialog: NetworkDialog,
    confirm: ConfirmOverlay,
    network: NetworkStatus,
    toasts: ToastQueue,
    clock: Clock,
    gesture: Option<Gesture>,
    metrics: CellMetrics,
    decorator: Box<dyn WindowDecorator>,
    bindings: KeyBindings,
}

impl Shell {
    pub fn new(metrics: CellMetrics, placement: Placement) -> Self {
        Self {
            desktop: Desktop::new(placement),
            launchers: LauncherRegistry::builtin(),
            taskbar: Taskbar::new(),
            start_menu: StartMenu::classic(&local_user_label()),
            icons: DesktopIcons::default(),
            run_dialog: RunDialog::new(),
            network_dialog: NetworkDialog::new(),
            confirm: ConfirmOverlay::new(),
            network: NetworkStatus::default(),
            toasts: ToastQueue::default(),
            clock: Clock::new(),
            gesture: None,
            metrics,
            decorator: Box::new(ClassicDecorator),
            bindings: KeyBindings::default(),
        }
    }

    pub fn with_launchers(mut self, launchers: LauncherRegistry) -> Self {
        self.launchers = launchers;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn desktop(&self) -> &Desktop {
        &self.desktop
    }

    pub fn launchers(&self) -> &LauncherRegistry {
        &self.launchers
    }

    pub fn taskbar(&self) -> &Taskbar {
        &self.taskbar
    }

    pub fn start_menu(&self) -> &StartMenu {
        &self.start_menu
    }

    pub fn icons(&self) -> &DesktopIcons {
        &self.icons
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn network(&self) -> NetworkStatus {
        self.network
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    pub fn run_dialog_open(&self) -> bool {
        self.run_dialog.is_open()
    }

    pub fn network_dialog_open(&self) -> bool {
        self.network_dialog.is_open()
    }

    pub fn confirm_visible(&self) -> bool {
        self.confirm.visible()
    }

    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    /// Opens a window with caller-supplied content.
    pub fn open_window(
        &mut self,
        title: impl Into<String>,
        content: Surface,
        icon: Icon,
    ) -> WindowId {
        let id = self.desktop.open_window(title, content, icon);
        self.start_menu.close_all();
        id
    }

    /// Opens a window for a registered launcher name.
    pub fn launch(&mut self, name: &str) -> Option<WindowId> {
        let id = self.launchers.launch(name, &mut self.desktop)?;
        self.start_menu.close_all();
        Some(id)
    }

    pub fn close_window(&mut self, id: WindowId) -> bool {
        self.desktop.close_window(id)
    }

    pub fn minimize_window(&mut self, id: WindowId) -> bool {
        self.desktop.minimize_window(id)
    }

    pub fn restore_window(&mut self, id: WindowId) -> bool {
        self.desktop.restore_window(id)
    }

    pub fn activate_window(&mut self, id: WindowId) -> bool {
        self.desktop.activate_window(id)
    }

    pub fn toggle_start_menu(&mut self) -> bool {
        let open = self.desktop.toggle_start_menu();
        if !open {
            self.start_menu.close_all();
        }
        open
    }

    fn close_start_menu(&mut self) {
        self.desktop.close_start_menu();
        self.start_menu.close_all();
    }

    pub fn open_run_dialog(&mut self) {
        self.network_dialog.close();
        self.run_dialog.open();
    }

    pub fn open_network_dialog(&mut self) {
        self.run_dialog.close();
        self.network_dialog.open();
    }

    pub fn open_shut_down_confirm(&mut self) {
        self.close_start_menu();
        self.confirm.open(SHUT_DOWN_TITLE, SHUT_DOWN_BODY);
    }

    /// Advances the clock and the toast queue. Returns whether a redraw is
    /// needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let clock = self.clock.tick(now);
        let toasts = self.toasts.tick(now);
        clock || toasts
    }

    pub fn handle_event(&mut self, event: &Event) -> ControlFlow {
        if self.confirm.visible() {
            return self.handle_confirm(event);
        }
        match event {
            Event::Key(key) => self.handle_key(event, key),
            Event::Mouse(mouse) => self.handle_mouse(event, mouse),
            _ => {}
        }
        ControlFlow::Continue
    }

    fn handle_confirm(&mut self, event: &Event) -> ControlFlow {
        match self.confirm.handle_confirm_event(event) {
            Some(ConfirmAction::Confirm) => {
                tracing::info!("shut down confirmed");
                self.confirm.close();
                ControlFlow::Quit
            }
            Some(ConfirmAction::Cancel) => {
                self.confirm.close();
                ControlFlow::Continue
            }
            None => ControlFlow::Continue,
        }
    }

    fn handle_key(&mut self, event: &Event, key: &KeyEvent) {
        if self.bindings.matches(Action::ShutDown, key) {
            self.open_shut_down_confirm();
            return;
        }
        if self.run_dialog.is_open() {
            if let Some(action) = self.run_dialog.handle_event(event) {
                self.apply_run_action(action);
            }
            return;
        }
        if self.network_dialog.is_open() {
            if let Some(action) = self.network_dialog.handle_event(event) {
                self.apply_network_action(action);
            }
            return;
        }
        if self.bindings.matches(Action::ToggleStartMenu, key) {
            self.toggle_start_menu();
            return;
        }
        if self.desktop.start_menu_open() && self.bindings.matches(Action::Dismiss, key) {
            self.close_start_menu();
            return;
        }
        if let Some(window) = self
            .desktop
            .active_window_id()
            .and_then(|id| self.desktop.window(id))
        {
            window
                .content()
                .handle_event(event, &ComponentContext::new(true));
        }
    }

    fn handle_mouse(&mut self, event: &Event, mouse: &MouseEvent) {
        if let Some(gesture) = &self.gesture {
            match mouse.kind {
                MouseEventKind::Drag(_) | MouseEventKind::Moved => {
                    let pointer = self.metrics.to_pixels(mouse.column, mouse.row);
                    let id = gesture.window_id();
                    match gesture.step(pointer) {
                        GestureStep::Move(position) => {
                            self.desktop.move_window(id, position);
                        }
                        GestureStep::Bounds(bounds) => {
                            self.desktop.set_window_bounds(id, bounds);
                        }
                    }
                    return;
                }
                MouseEventKind::Up(_) => {
                    tracing::debug!(window_id = %gesture.window_id(), "gesture finished");
                    self.gesture = None;
                    return;
                }
                // A press without the matching release: drop the gesture.
                MouseEventKind::Down(_) => self.gesture = None,
                _ => return,
            }
        }
        if self.run_dialog.is_open() {
            if let Some(action) = self.run_dialog.handle_event(event) {
                self.apply_run_action(action);
            }
            return;
        }
        if self.network_dialog.is_open() {
            if let Some(action) = self.network_dialog.handle_event(event) {
                self.apply_network_action(action);
            }
            return;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.pointer_down(mouse),
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                if self.desktop.start_menu_open()
                    && let Some(MenuHit::Item { depth, index }) =
                        self.start_menu.hit_test(mouse.column, mouse.row)
                {
                    self.start_menu.hover(depth, index);
                }
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                if let Some((id, rect)) = self.window_at(mouse.column, mouse.row) {
                    let focused = self.desktop.active_window_id() == Some(id);
                    self.forward_to_content(id, rect, mouse, focused);
                }
            }
            _ => {}
        }
    }

    fn pointer_down(&mut self, mouse: &MouseEvent) {
        let (column, row) = (mouse.column, mouse.row);
        if let Some(hit) = self.taskbar.hit_test(column, row) {
            match hit {
                TaskbarHit::Start => {
                    self.toggle_start_menu();
                }
                TaskbarHit::Window(id) => {
                    self.close_start_menu();
                    self.desktop.restore_window(id);
                }
                TaskbarHit::More => {
                    self.close_start_menu();
                    self.taskbar.next_page();
                }
                TaskbarHit::Network => {
                    self.close_start_menu();
                    self.open_network_dialog();
                }
                TaskbarHit::Clock | TaskbarHit::Bar => self.close_start_menu(),
            }
            return;
        }
        if self.desktop.start_menu_open() {
            match self.start_menu.hit_test(column, row) {
                Some(MenuHit::Item { depth, index }) => {
                    if let Some(command) = self.start_menu.activate(depth, index) {
                        self.close_start_menu();
                        self.run_menu_command(command);
                    }
                    return;
                }
                Some(MenuHit::Panel) => return,
                None => self.close_start_menu(),
            }
        }
        if let Some((id, rect)) = self.window_at(column, row) {
            let hit = ChromeLayout::new(rect).hit(i32::from(column), i32::from(row));
            let pointer = self.metrics.to_pixels(column, row);
            match hit {
                Some(ChromeHit::Close) => {
                    self.desktop.close_window(id);
                }
                Some(ChromeHit::Minimize) => {
                    self.desktop.minimize_window(id);
                }
                Some(ChromeHit::TitleBar) => {
                    self.desktop.activate_window(id);
                    self.gesture = self
                        .desktop
                        .window(id)
                        .map(|window| Gesture::begin_drag(window, pointer));
                }
                Some(ChromeHit::Resize(edge)) => {
                    self.desktop.activate_window(id);
                    self.gesture = self
                        .desktop
                        .window(id)
                        .map(|window| Gesture::begin_resize(window, edge, pointer));
                }
                Some(ChromeHit::Body) | None => {
                    self.desktop.activate_window(id);
                    self.forward_to_content(id, rect, mouse, true);
                }
            }
            return;
        }
        if let Some(name) = self.icons.hit_test(column, row) {
            self.launch(name);
        }
    }

    /// Topmost visible window under a cell, with its cell rect.
    fn window_at(&self, column: u16, row: u16) -> Option<(WindowId, FloatRect)> {
        self.desktop
            .paint_order()
            .into_iter()
            .rev()
            .map(|window| (window.id(), self.metrics.to_cells(window.bounds())))
            .find(|(_, rect)| rect.contains(i32::from(column), i32::from(row)))
    }

    fn forward_to_content(&self, id: WindowId, rect: FloatRect, mouse: &MouseEvent, focused: bool) {
        let Some(window) = self.desktop.window(id) else {
            return;
        };
        let local = MouseEvent {
            column: (i32::from(mouse.column) - rect.x).clamp(0, i32::from(u16::MAX)) as u16,
            row: (i32::from(mouse.row) - rect.y).clamp(0, i32::from(u16::MAX)) as u16,
            ..*mouse
        };
        window
            .content()
            .handle_event(&Event::Mouse(local), &ComponentContext::new(focused));
    }

    fn run_menu_command(&mut self, command: MenuCommand) {
        match command {
            MenuCommand::Launch(name) => {
                self.launch(name);
            }
            MenuCommand::Notify(message) => self.toasts.push(message),
            MenuCommand::ShowRun => self.open_run_dialog(),
            MenuCommand::ShowNetwork => self.open_network_dialog(),
            MenuCommand::ShutDown => self.open_shut_down_confirm(),
            MenuCommand::Inert => {}
        }
    }

    fn apply_run_action(&mut self, action: RunAction) {
        match action {
            RunAction::Submit(command) => match self.launchers.resolve(&command) {
                Some(name) => {
                    self.run_dialog.close();
                    self.launch(name);
                }
                None => {
                    tracing::debug!(%command, "run: unknown program");
                    self.toasts.push(format!(
                        "Cannot find '{command}'. Make sure you typed the name correctly."
                    ));
                }
            },
            RunAction::Browse => self.toasts.push("Browsing is not available."),
            RunAction::Cancel => self.run_dialog.close(),
        }
    }

    fn apply_network_action(&mut self, action: NetworkAction) {
        match action {
            NetworkAction::ToggleConnection => {
                self.network.toggle();
                self.toasts.push(self.network.describe());
                self.network_dialog.close();
            }
            NetworkAction::Cancel => self.network_dialog.close(),
        }
    }

    /// Draws the whole desktop, refreshing every hit rect for the next event.
    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        let area = frame.area();
        let (desktop_area, _) = self.taskbar.split_area(area);
        frame.fill(
            desktop_area,
            Style::default().bg(theme::desktop_bg()).fg(theme::desktop_fg()),
        );
        self.icons.render(frame, desktop_area);

        let active = self.desktop.active_window_id();
        for window in self.desktop.paint_order() {
            let rect = self.metrics.to_cells(window.bounds());
            if rect.width == 0 || rect.height == 0 {
                continue;
            }
            let local = Rect::new(0, 0, rect.width, rect.height);
            let mut buffer = Buffer::empty(local);
            let focused = active == Some(window.id());
            self.decorator
                .render_window(&mut buffer, local, window.title(), window.icon(), focused);
            {
                let mut surface = UiFrame::from_parts(local, &mut buffer);
                window.content().render(
                    &mut surface,
                    ChromeLayout::content_area(local),
                    &ComponentContext::new(focused),
                );
            }
            frame.blit_from_signed(&buffer, rect);
        }

        self.taskbar.render(
            frame,
            self.desktop.windows(),
            active,
            self.desktop.start_menu_open(),
            self.network.is_connected(),
            self.clock.text(),
        );
        if self.desktop.start_menu_open() {
            let anchor = self.taskbar.start_rect().map_or(area.x, |rect| rect.x);
            self.start_menu.render(frame, anchor, desktop_area);
        } else {
            self.start_menu.close_all();
        }
        self.toasts.render(frame, desktop_area);
        self.run_dialog.render(frame, area);
        self.network_dialog
            .render(frame, area, self.network.is_connected());
        self.confirm.render(frame, area);
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(CellMetrics::default(), Placement::default())
    }
}
