use crossterm::event::{Event, MouseEventKind};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Paragraph, Wrap};

use crate::components::{DialogFrame, render_buttons};
use crate::keybindings::{Action, KeyBindings};
use crate::theme;
use crate::ui::{UiFrame, rect_contains};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Confirm,
    Cancel,
}

/// Yes/No confirmation box. Keyboard focus starts on "Yes".
#[derive(Debug)]
pub struct ConfirmOverlay {
    dialog: DialogFrame,
    visible: bool,
    body: String,
    selected_confirm: bool,
    confirm_rect: Option<Rect>,
    cancel_rect: Option<Rect>,
    bindings: KeyBindings,
}

impl ConfirmOverlay {
    pub fn new() -> Self {
        Self {
            dialog: DialogFrame::new("", 46, 8),
            visible: false,
            body: String::new(),
            selected_confirm: true,
            confirm_rect: None,
            cancel_rect: None,
            bindings: KeyBindings::default(),
        }
    }

    pub fn open(&mut self, title: &str, body: &str) {
        self.dialog = DialogFrame::new(title, 46, 8);
        self.body = body.to_string();
        self.visible = true;
        self.selected_confirm = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.dialog.reset();
        self.confirm_rect = None;
        self.cancel_rect = None;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        if !self.visible || area.width == 0 || area.height == 0 {
            return;
        }
        let body = self.dialog.render(frame, area);
        self.confirm_rect = None;
        self.cancel_rect = None;
        if body.height < 3 || body.width < 4 {
            return;
        }
        let text_rect = Rect {
            x: body.x + 1,
            y: body.y + 1,
            width: body.width - 2,
            height: body.height - 2,
        };
        let paragraph = Paragraph::new(self.body.as_str())
            .alignment(Alignment::Left)
            .style(Style::default().bg(theme::face_bg()).fg(theme::face_fg()))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, text_rect);

        let button_y = body.y + body.height - 1;
        let selected = if self.selected_confirm { 0 } else { 1 };
        let rects = render_buttons(
            frame,
            body.x + body.width - 1,
            button_y,
            &["Yes", "No"],
            Some(selected),
        );
        self.confirm_rect = rects.first().copied();
        self.cancel_rect = rects.get(1).copied();
    }

    /// Resolves an event into an action. Clicks outside the buttons are
    /// swallowed; keys move the selection or answer.
    pub fn handle_confirm_event(&mut self, event: &Event) -> Option<ConfirmAction> {
        match event {
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                if self
                    .confirm_rect
                    .is_some_and(|rect| rect_contains(rect, mouse.column, mouse.row))
                {
                    return Some(ConfirmAction::Confirm);
                }
                if self
                    .cancel_rect
                    .is_some_and(|rect| rect_contains(rect, mouse.column, mouse.row))
                    || self.dialog.hits_close(mouse.column, mouse.row)
                {
                    return Some(ConfirmAction::Cancel);
                }
                None
            }
            Event::Key(key) => {
                let kb = &self.bindings;
                if kb.matches(Action::ConfirmToggle, key) {
                    self.selected_confirm = !self.selected_confirm;
                    None
                } else if kb.matches(Action::ConfirmLeft, key) {
                    self.selected_confirm = true;
                    None
                } else if kb.matches(Action::ConfirmRight, key) {
                    self.selected_confirm = false;
                    None
                } else if kb.matches(Action::ConfirmAccept, key) {
                    if self.selected_confirm {
                        Some(ConfirmAction::Confirm)
                    } else {
                        Some(ConfirmAction::Cancel)
                    }
                } else if kb.matches(Action::ConfirmCancel, key) {
                    Some(ConfirmAction::Cancel)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl Default for ConfirmOverlay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent};
    use ratatui::buffer::Buffer;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn keys_toggle_and_answer() {
        let mut overlay = ConfirmOverlay::new();
        overlay.open("Shut Down Windows", "Are you sure?");
        assert_eq!(overlay.handle_confirm_event(&key(KeyCode::Tab)), None);
        assert_eq!(
            overlay.handle_confirm_event(&key(KeyCode::Enter)),
            Some(ConfirmAction::Cancel)
        );
        assert_eq!(overlay.handle_confirm_event(&key(KeyCode::Left)), None);
        assert_eq!(
            overlay.handle_confirm_event(&key(KeyCode::Enter)),
            Some(ConfirmAction::Confirm)
        );
        assert_eq!(
            overlay.handle_confirm_event(&key(KeyCode::Char('n'))),
            Some(ConfirmAction::Cancel)
        );
    }

    #[test]
    fn rendered_buttons_respond_to_clicks() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        let mut overlay = ConfirmOverlay::new();
        overlay.open("Shut Down Windows", "Are you sure?");
        {
            let mut frame = UiFrame::from_parts(area, &mut buffer);
            overlay.render(&mut frame, area);
        }
        let yes = overlay.confirm_rect.expect("yes button rendered");
        let no = overlay.cancel_rect.expect("no button rendered");
        assert_eq!(
            overlay.handle_confirm_event(&click(yes.x, yes.y)),
            Some(ConfirmAction::Confirm)
        );
        assert_eq!(
            overlay.handle_confirm_event(&click(no.x + 1, no.y)),
            Some(ConfirmAction::Cancel)
        );
        assert_eq!(overlay.handle_confirm_event(&click(0, 0)), None);
    }
}
