use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Clear};

use crate::theme;
use crate::ui::{UiFrame, rect_contains, safe_set_string};

const CLOSE_LABEL: &str = "[X]";

/// Frame shared by the modal dialogs: a raised box with a title bar and a
/// close control, centered on the desktop.
///
/// Hit rects are recorded during `render` and used by the next event.
#[derive(Debug, Clone)]
pub struct DialogFrame {
    title: String,
    width: u16,
    height: u16,
    rect: Option<Rect>,
    close_rect: Option<Rect>,
}

impl DialogFrame {
    pub fn new(title: impl Into<String>, width: u16, height: u16) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            rect: None,
            close_rect: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Preferred size clamped to `area`, centered.
    pub fn rect_for(&self, area: Rect) -> Rect {
        let width = area.width.min(self.width).max(1);
        let height = area.height.min(self.height).max(1);
        Rect {
            x: area.x.saturating_add(area.width.saturating_sub(width) / 2),
            y: area.y.saturating_add(area.height.saturating_sub(height) / 2),
            width,
            height,
        }
    }

    /// Draws the frame and returns the body area below the title bar.
    pub fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) -> Rect {
        let rect = self.rect_for(area);
        self.rect = Some(rect);
        self.close_rect = None;
        let face = Style::default().bg(theme::face_bg()).fg(theme::face_fg());
        frame.render_widget(Clear, rect);
        frame.render_widget(Block::bordered().style(face), rect);
        if rect.width < 3 || rect.height < 3 {
            return Rect::default();
        }

        let bar = Rect {
            x: rect.x + 1,
            y: rect.y + 1,
            width: rect.width - 2,
            height: 1,
        };
        let title_style = Style::default()
            .bg(theme::title_active_bg())
            .fg(theme::title_fg())
            .add_modifier(Modifier::BOLD);
        frame.fill(bar, title_style);
        let bounds = frame.area();
        let buffer = frame.buffer_mut();
        safe_set_string(buffer, bar, bar.x, bar.y, &format!(" {}", self.title), title_style);
        let close_width = CLOSE_LABEL.len() as u16;
        if bar.width > close_width + 2 {
            let close_x = bar.x + bar.width - close_width;
            safe_set_string(buffer, bounds, close_x, bar.y, CLOSE_LABEL, face);
            self.close_rect = Some(Rect::new(close_x, bar.y, close_width, 1));
        }

        Rect {
            x: rect.x + 1,
            y: rect.y + 2,
            width: rect.width - 2,
            height: rect.height.saturating_sub(3),
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.rect
            .is_some_and(|rect| rect_contains(rect, column, row))
    }

    pub fn hits_close(&self, column: u16, row: u16) -> bool {
        self.close_rect
            .is_some_and(|rect| rect_contains(rect, column, row))
    }

    /// Forgets the last rendered geometry, e.g. when the dialog closes.
    pub fn reset(&mut self) {
        self.rect = None;
        self.close_rect = None;
    }
}

/// Draws a right-aligned row of push buttons ending at `right` (exclusive)
/// and returns their rects in the order given.
pub fn render_buttons(
    frame: &mut UiFrame<'_>,
    right: u16,
    y: u16,
    labels: &[&str],
    selected: Option<usize>,
) -> Vec<Rect> {
    let plain = Style::default()
        .bg(theme::face_bg())
        .fg(theme::face_fg())
        .add_modifier(Modifier::BOLD);
    let highlighted = Style::default()
        .bg(theme::selection_bg())
        .fg(theme::selection_fg())
        .add_modifier(Modifier::BOLD);
    let texts: Vec<String> = labels.iter().map(|label| format!("[ {label} ]")).collect();
    let total: u16 = texts
        .iter()
        .map(|text| text.chars().count() as u16 + 1)
        .sum::<u16>()
        .saturating_sub(1);
    let mut x = right.saturating_sub(total);
    let bounds = frame.area();
    let buffer = frame.buffer_mut();
    let mut rects = Vec::with_capacity(texts.len());
    for (index, text) in texts.iter().enumerate() {
        let width = text.chars().count() as u16;
        let style = if selected == Some(index) {
            highlighted
        } else {
            plain
        };
        safe_set_string(buffer, bounds, x, y, text, style);
        rects.push(Rect::new(x, y, width, 1));
        x = x.saturating_add(width + 1);
    }
    rects
}
