use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::constants::TASKBAR_HEIGHT;
use crate::theme;
use crate::ui::{UiFrame, rect_contains, safe_set_string, truncate_to_width};
use crate::window::{ManagedWindow, WindowId};

const START_LABEL: &str = " ⊞ Start ";
const NETWORK_ONLINE: &str = " ≋ ";
const NETWORK_OFFLINE: &str = " ≠ ";
const ENTRY_MAX_WIDTH: u16 = 24;
/// Narrowest entry: the brackets around a single glyph.
const CHIP_WIDTH: u16 = 3;
const MORE_LABEL: &str = " » ";

/// What a pointer-down on the taskbar landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskbarHit {
    Start,
    Window(WindowId),
    /// The overflow button shown when entries need more than one page.
    More,
    Network,
    Clock,
    /// Empty taskbar space.
    Bar,
}

/// The bottom bar: Start button, one entry per window, tray.
///
/// Hit rects are rebuilt on every `render` and answer the next event.
#[derive(Debug, Default)]
pub struct Taskbar {
    area: Rect,
    start_rect: Option<Rect>,
    window_hits: Vec<(WindowId, Rect)>,
    network_rect: Option<Rect>,
    clock_rect: Option<Rect>,
    more_rect: Option<Rect>,
    page: usize,
}

impl Taskbar {
    pub fn new() -> Self {
        Self::default()
    }

    fn begin_frame(&mut self) {
        self.start_rect = None;
        self.window_hits.clear();
        self.network_rect = None;
        self.clock_rect = None;
        self.more_rect = None;
    }

    /// Splits the screen into the desktop area and the taskbar row.
    pub fn split_area(&mut self, area: Rect) -> (Rect, Rect) {
        let height = TASKBAR_HEIGHT.min(area.height);
        let bar = Rect {
            x: area.x,
            y: area.y + area.height - height,
            width: area.width,
            height,
        };
        let desktop = Rect {
            height: area.height - height,
            ..area
        };
        self.area = bar;
        (desktop, bar)
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn start_rect(&self) -> Option<Rect> {
        self.start_rect
    }

    pub fn render(
        &mut self,
        frame: &mut UiFrame<'_>,
        windows: &[ManagedWindow],
        active: Option<WindowId>,
        start_open: bool,
        network_connected: bool,
        clock_text: &str,
    ) {
        self.begin_frame();
        let area = self.area;
        if area.width == 0 || area.height == 0 {
            return;
        }
        let face = Style::default().bg(theme::face_bg()).fg(theme::face_fg());
        frame.fill(area, face);
        let bounds = area.intersection(frame.area());
        let buffer = frame.buffer_mut();
        let y = area.y;
        let max_x = area.x + area.width;
        let mut x = area.x;

        let start_width = START_LABEL.chars().count() as u16;
        let start_style = if start_open {
            face.add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            face.add_modifier(Modifier::BOLD)
        };
        safe_set_string(buffer, bounds, x, y, START_LABEL, start_style);
        self.start_rect = Some(Rect::new(x, y, start_width.min(area.width), 1));
        x = x.saturating_add(start_width + 1);

        // Tray sits on the right: network indicator then the clock.
        let clock = format!(" {clock_text} ");
        let clock_width = clock.chars().count() as u16;
        let network_width = NETWORK_ONLINE.chars().count() as u16;
        let tray_width = clock_width + network_width + 1;
        let tray_x = max_x.saturating_sub(tray_width).max(x);
        let network_style = if network_connected {
            face.fg(theme::online_fg()).add_modifier(Modifier::BOLD)
        } else {
            face.fg(theme::face_disabled_fg())
        };
        let network_label = if network_connected {
            NETWORK_ONLINE
        } else {
            NETWORK_OFFLINE
        };
        safe_set_string(buffer, bounds, tray_x, y, network_label, network_style);
        self.network_rect = Some(Rect::new(tray_x, y, network_width, 1).intersection(bounds));
        let clock_x = tray_x + network_width + 1;
        safe_set_string(buffer, bounds, clock_x, y, &clock, face);
        self.clock_rect = Some(Rect::new(clock_x, y, clock_width, 1).intersection(bounds));

        if windows.is_empty() {
            self.page = 0;
            return;
        }
        let available = tray_x.saturating_sub(x).saturating_sub(1);
        let count = windows.len() as u16;
        let fit = (available / count).saturating_sub(1).min(ENTRY_MAX_WIDTH);
        let (entry_width, per_page) = if fit >= CHIP_WIDTH {
            (fit, windows.len())
        } else {
            // Chips still overflow: page them behind a more button.
            let pager_width = MORE_LABEL.chars().count() as u16 + 1;
            let slots = available.saturating_sub(pager_width) / (CHIP_WIDTH + 1);
            (CHIP_WIDTH, usize::from(slots.max(1)))
        };
        let pages = windows.len().div_ceil(per_page);
        self.page %= pages;
        let first = self.page * per_page;
        for window in windows.iter().skip(first).take(per_page) {
            let pressed = active == Some(window.id()) && !window.is_minimized();
            let style = if pressed {
                face.add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                face
            };
            let label = format!("{} {}", window.icon().glyph(), window.title());
            let text = truncate_to_width(&label, usize::from(entry_width - 2));
            let chunk = format!("[{text:<width$}]", width = usize::from(entry_width - 2));
            safe_set_string(buffer, bounds, x, y, &chunk, style);
            self.window_hits
                .push((window.id(), Rect::new(x, y, entry_width, 1).intersection(bounds)));
            x = x.saturating_add(entry_width + 1);
        }
        if pages > 1 {
            let width = MORE_LABEL.chars().count() as u16;
            safe_set_string(buffer, bounds, x, y, MORE_LABEL, face.add_modifier(Modifier::BOLD));
            self.more_rect = Some(Rect::new(x, y, width, 1).intersection(bounds));
        }
    }

    /// Shows the next page of entries when they do not all fit.
    pub fn next_page(&mut self) {
        self.page = self.page.wrapping_add(1);
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        rect_contains(self.area, column, row)
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<TaskbarHit> {
        if !self.contains(column, row) {
            return None;
        }
        let inside = |rect: Option<Rect>| rect.is_some_and(|r| rect_contains(r, column, row));
        if inside(self.start_rect) {
            return Some(TaskbarHit::Start);
        }
        if let Some((id, _)) = self
            .window_hits
            .iter()
            .find(|(_, rect)| rect_contains(*rect, column, row))
        {
            return Some(TaskbarHit::Window(*id));
        }
        if inside(self.more_rect) {
            return Some(TaskbarHit::More);
        }
        if inside(self.network_rect) {
            return Some(TaskbarHit::Network);
        }
        if inside(self.clock_rect) {
            return Some(TaskbarHit::Clock);
        }
        Some(TaskbarHit::Bar)
    }

    /// Entries in the order they were drawn, for inspection in tests.
    pub fn entries(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.window_hits.iter().map(|(id, _)| *id)
    }
}
