use crossterm::event::{Event, KeyCode, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Paragraph, Wrap};

use crate::components::{Component, ComponentContext};
use crate::theme;
use crate::ui::UiFrame;

/// Read-only wrapped text with line scrolling.
#[derive(Debug, Clone)]
pub struct TextView {
    text: String,
    scroll: u16,
}

impl TextView {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            scroll: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    fn max_scroll(&self) -> u16 {
        (self.text.lines().count() as u16).saturating_sub(1)
    }

    fn scroll_by(&mut self, delta: i32) -> bool {
        let next = (i32::from(self.scroll) + delta).clamp(0, i32::from(self.max_scroll())) as u16;
        let changed = next != self.scroll;
        self.scroll = next;
        changed
    }
}

impl Component for TextView {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        let style = Style::default().bg(theme::content_bg()).fg(theme::content_fg());
        frame.fill(area, style);
        let inner = Rect {
            x: area.x.saturating_add(1),
            width: area.width.saturating_sub(2),
            ..area
        };
        frame.render_widget(
            Paragraph::new(self.text.as_str())
                .style(style)
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0)),
            inner,
        );
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        match event {
            Event::Key(key) if ctx.focused() => match key.code {
                KeyCode::Up => self.scroll_by(-1),
                KeyCode::Down => self.scroll_by(1),
                KeyCode::PageUp => self.scroll_by(-10),
                KeyCode::PageDown => self.scroll_by(10),
                KeyCode::Home => self.scroll_by(-i32::from(self.scroll)),
                _ => false,
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => self.scroll_by(-3),
                MouseEventKind::ScrollDown => self.scroll_by(3),
                _ => false,
            },
            _ => false,
        }
    }
}
