use crossterm::event::{Event, MouseEventKind};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::components::{DialogFrame, render_buttons};
use crate::keybindings::{Action, KeyBindings};
use crate::theme;
use crate::ui::{UiFrame, rect_contains, safe_set_string};

const PROVIDER: &str = "Internet Service Provider";
const PHONE: &str = "Phone number: 1-800-INTERNET";
const USERNAME: &str = "user";
const PASSWORD_MASK: &str = "•••••••";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkAction {
    ToggleConnection,
    Cancel,
}

/// "Dial-Up Networking" box. The primary button reads Connect or
/// Disconnect depending on the link state passed to `render`.
#[derive(Debug)]
pub struct NetworkDialog {
    dialog: DialogFrame,
    open: bool,
    connect_rect: Option<Rect>,
    cancel_rect: Option<Rect>,
    bindings: KeyBindings,
}

impl NetworkDialog {
    pub fn new() -> Self {
        Self {
            dialog: DialogFrame::new("Dial-Up Networking", 44, 14),
            open: false,
            connect_rect: None,
            cancel_rect: None,
            bindings: KeyBindings::default(),
        }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.dialog.reset();
        self.connect_rect = None;
        self.cancel_rect = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn handle_event(&mut self, event: &Event) -> Option<NetworkAction> {
        match event {
            Event::Key(key) if self.bindings.matches(Action::Dismiss, key) => {
                Some(NetworkAction::Cancel)
            }
            Event::Key(key) if self.bindings.matches(Action::DialogSubmit, key) => {
                Some(NetworkAction::ToggleConnection)
            }
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                let (column, row) = (mouse.column, mouse.row);
                if !self.dialog.contains(column, row) || self.dialog.hits_close(column, row) {
                    return Some(NetworkAction::Cancel);
                }
                if self
                    .connect_rect
                    .is_some_and(|rect| rect_contains(rect, column, row))
                {
                    Some(NetworkAction::ToggleConnection)
                } else if self
                    .cancel_rect
                    .is_some_and(|rect| rect_contains(rect, column, row))
                {
                    Some(NetworkAction::Cancel)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, connected: bool) {
        if !self.open {
            return;
        }
        let body = self.dialog.render(frame, area);
        if body.height < 10 || body.width < 20 {
            return;
        }
        let face = Style::default().bg(theme::face_bg()).fg(theme::face_fg());
        let well = Style::default().bg(theme::content_bg()).fg(theme::content_fg());

        let info = Rect {
            x: body.x + 1,
            y: body.y,
            width: body.width - 2,
            height: 4,
        };
        let status = if connected {
            "▣ Connected to: ◎"
        } else {
            "▣ Dial to: ◎"
        };
        let lines = vec![
            Line::from(status),
            Line::from(PROVIDER).style(Style::default().add_modifier(Modifier::BOLD)),
            Line::from(PHONE),
        ];
        frame.fill(info, well);
        frame.render_widget(
            Paragraph::new(lines).style(well).alignment(Alignment::Center),
            Rect {
                y: info.y + 1,
                height: 3,
                ..info
            },
        );

        let label_x = info.x;
        let field_x = info.x + 11;
        let field_width = info.width.saturating_sub(11);
        for (offset, (label, value)) in [("Username:", USERNAME), ("Password:", PASSWORD_MASK)]
            .into_iter()
            .enumerate()
        {
            let y = info.y + 5 + offset as u16;
            frame.fill(Rect::new(field_x, y, field_width, 1), well);
            let bounds = frame.area();
            let buffer = frame.buffer_mut();
            safe_set_string(buffer, bounds, label_x, y, label, face);
            safe_set_string(buffer, bounds, field_x + 1, y, value, well);
        }
        let bounds = frame.area();
        safe_set_string(frame.buffer_mut(), bounds, label_x, info.y + 8, "[x] Save password", face);

        let primary = if connected { "Disconnect" } else { "Connect" };
        let rects = render_buttons(
            frame,
            info.x + info.width,
            body.y + body.height - 1,
            &[primary, "Cancel"],
            Some(0),
        );
        self.connect_rect = rects.first().copied();
        self.cancel_rect = rects.get(1).copied();
    }
}

impl Default for NetworkDialog {
    fn default() -> Self {
        Self::new()
    }
}
