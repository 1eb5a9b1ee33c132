use std::ops::Range;

use ratatui::buffer::Buffer;
use ratatui::prelude::Rect;
use ratatui::style::{Modifier, Style};

use crate::theme;
use crate::ui::{fill_rect, safe_set_string};
use crate::window::gesture::ResizeEdge;
use crate::window::{FloatRect, Icon};

const MINIMIZE_LABEL: &str = "[_]";
const CLOSE_LABEL: &str = "[X]";
const CONTROL_WIDTH: i32 = 3;
/// Below this width the title bar has no room for controls.
const CONTROLS_MIN_WIDTH: u16 = 10;

/// What a pointer-down on a window's chrome lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeHit {
    Resize(ResizeEdge),
    Minimize,
    Close,
    TitleBar,
    Body,
}

/// Cell layout of a window's frame.
///
/// The outer ring is the resize border (corner cells are the corner
/// handles), the row below the top border is the title bar, and everything
/// under it inside the border is the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeLayout {
    rect: FloatRect,
}

impl ChromeLayout {
    pub fn new(rect: FloatRect) -> Self {
        Self { rect }
    }

    pub fn title_row(&self) -> i32 {
        self.rect.y + 1
    }

    pub fn close_columns(&self) -> Range<i32> {
        if self.rect.width < CONTROLS_MIN_WIDTH {
            return 0..0;
        }
        let end = self.rect.right() - 1;
        end - CONTROL_WIDTH..end
    }

    pub fn minimize_columns(&self) -> Range<i32> {
        let close = self.close_columns();
        if close.is_empty() {
            return 0..0;
        }
        close.start - CONTROL_WIDTH..close.start
    }

    pub fn hit(&self, column: i32, row: i32) -> Option<ChromeHit> {
        if !self.rect.contains(column, row) {
            return None;
        }
        let left = column == self.rect.x;
        let right = column == self.rect.right() - 1;
        let top = row == self.rect.y;
        let bottom = row == self.rect.bottom() - 1;
        let edge = match (top, bottom, left, right) {
            (true, _, true, _) => Some(ResizeEdge::NorthWest),
            (true, _, _, true) => Some(ResizeEdge::NorthEast),
            (_, true, true, _) => Some(ResizeEdge::SouthWest),
            (_, true, _, true) => Some(ResizeEdge::SouthEast),
            (true, _, _, _) => Some(ResizeEdge::North),
            (_, true, _, _) => Some(ResizeEdge::South),
            (_, _, true, _) => Some(ResizeEdge::West),
            (_, _, _, true) => Some(ResizeEdge::East),
            _ => None,
        };
        if let Some(edge) = edge {
            return Some(ChromeHit::Resize(edge));
        }
        if row == self.title_row() {
            if self.close_columns().contains(&column) {
                return Some(ChromeHit::Close);
            }
            if self.minimize_columns().contains(&column) {
                return Some(ChromeHit::Minimize);
            }
            return Some(ChromeHit::TitleBar);
        }
        Some(ChromeHit::Body)
    }

    /// Content area of a window drawn at `area`.
    pub fn content_area(area: Rect) -> Rect {
        Rect {
            x: area.x.saturating_add(1),
            y: area.y.saturating_add(2),
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(3),
        }
    }
}

pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(&self, buffer: &mut Buffer, area: Rect, title: &str, icon: &Icon, active: bool);
}

/// Grey bevelled frame with a navy title bar when active.
#[derive(Debug, Default)]
pub struct ClassicDecorator;

impl WindowDecorator for ClassicDecorator {
    fn render_window(&self, buffer: &mut Buffer, area: Rect, title: &str, icon: &Icon, active: bool) {
        if area.width < 2 || area.height < 2 {
            return;
        }
        let face = Style::default().bg(theme::face_bg()).fg(theme::face_fg());
        let light = Style::default().bg(theme::face_bg()).fg(theme::content_bg());
        let dark = Style::default().bg(theme::face_bg()).fg(theme::face_shadow());
        fill_rect(buffer, area, face);

        let left = area.x;
        let top = area.y;
        let right = area.x + area.width - 1;
        let bottom = area.y + area.height - 1;
        for x in left..=right {
            let (top_symbol, bottom_symbol) = if x == left {
                ("┌", "└")
            } else if x == right {
                ("┐", "┘")
            } else {
                ("─", "─")
            };
            if let Some(cell) = buffer.cell_mut((x, top)) {
                cell.set_symbol(top_symbol).set_style(light);
            }
            if let Some(cell) = buffer.cell_mut((x, bottom)) {
                cell.set_symbol(bottom_symbol).set_style(dark);
            }
        }
        for y in top + 1..bottom {
            if let Some(cell) = buffer.cell_mut((left, y)) {
                cell.set_symbol("│").set_style(light);
            }
            if let Some(cell) = buffer.cell_mut((right, y)) {
                cell.set_symbol("│").set_style(dark);
            }
        }

        let title_y = top + 1;
        if title_y >= bottom {
            return;
        }
        let title_bg = if active {
            theme::title_active_bg()
        } else {
            theme::title_inactive_bg()
        };
        let title_style = Style::default()
            .bg(title_bg)
            .fg(theme::title_fg())
            .add_modifier(Modifier::BOLD);
        let bar = Rect {
            x: left + 1,
            y: title_y,
            width: area.width - 2,
            height: 1,
        };
        fill_rect(buffer, bar, title_style);

        let layout = ChromeLayout::new(FloatRect {
            x: i32::from(area.x),
            y: i32::from(area.y),
            width: area.width,
            height: area.height,
        });
        let minimize = layout.minimize_columns();
        let text_end = if minimize.is_empty() {
            bar.x + bar.width
        } else {
            minimize.start as u16
        };
        let text_bounds = Rect {
            width: text_end.saturating_sub(bar.x),
            ..bar
        };
        let label = format!(" {} {}", icon.glyph(), title);
        safe_set_string(buffer, text_bounds, bar.x, title_y, &label, title_style);

        if !minimize.is_empty() {
            safe_set_string(buffer, bar, minimize.start as u16, title_y, MINIMIZE_LABEL, face);
            let close = layout.close_columns();
            safe_set_string(buffer, bar, close.start as u16, title_y, CLOSE_LABEL, face);
        }
    }
}
