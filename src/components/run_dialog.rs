use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Paragraph, Wrap};

use crate::components::{DialogFrame, render_buttons};
use crate::keybindings::{Action, KeyBindings};
use crate::theme;
use crate::ui::{UiFrame, rect_contains, safe_set_string};

const PROMPT: &str = "Type the name of a program, folder, document, or Internet resource, and Windows will open it for you.";
const OPEN_LABEL: &str = "Open:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunAction {
    Submit(String),
    Browse,
    Cancel,
}

/// The "Run" command box: a one-line input with OK / Cancel / Browse....
#[derive(Debug)]
pub struct RunDialog {
    dialog: DialogFrame,
    open: bool,
    input: String,
    ok_rect: Option<Rect>,
    cancel_rect: Option<Rect>,
    browse_rect: Option<Rect>,
    bindings: KeyBindings,
}

impl RunDialog {
    pub fn new() -> Self {
        Self {
            dialog: DialogFrame::new("Run", 58, 10),
            open: false,
            input: String::new(),
            ok_rect: None,
            cancel_rect: None,
            browse_rect: None,
            bindings: KeyBindings::default(),
        }
    }

    pub fn open(&mut self) {
        self.open = true;
        self.input.clear();
    }

    pub fn close(&mut self) {
        self.open = false;
        self.dialog.reset();
        self.ok_rect = None;
        self.cancel_rect = None;
        self.browse_rect = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    fn submit(&self) -> Option<RunAction> {
        let command = self.input.trim();
        if command.is_empty() {
            None
        } else {
            Some(RunAction::Submit(command.to_string()))
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Option<RunAction> {
        if self.bindings.matches(Action::Dismiss, key) {
            return Some(RunAction::Cancel);
        }
        if self.bindings.matches(Action::DialogSubmit, key) {
            return self.submit();
        }
        match key.code {
            KeyCode::Char(c)
                if key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT =>
            {
                self.input.push(c);
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            _ => {}
        }
        None
    }

    /// Handles an event while the dialog is open. Every event is consumed;
    /// a pointer-down outside the dialog cancels it.
    pub fn handle_event(&mut self, event: &Event) -> Option<RunAction> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                let (column, row) = (mouse.column, mouse.row);
                if !self.dialog.contains(column, row) || self.dialog.hits_close(column, row) {
                    return Some(RunAction::Cancel);
                }
                let hit = |rect: Option<Rect>| rect.is_some_and(|r| rect_contains(r, column, row));
                if hit(self.ok_rect) {
                    self.submit()
                } else if hit(self.cancel_rect) {
                    Some(RunAction::Cancel)
                } else if hit(self.browse_rect) {
                    Some(RunAction::Browse)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        if !self.open {
            return;
        }
        let body = self.dialog.render(frame, area);
        if body.height < 6 || body.width < 12 {
            return;
        }
        let face = Style::default().bg(theme::face_bg()).fg(theme::face_fg());
        let content = Rect {
            x: body.x + 1,
            y: body.y,
            width: body.width - 2,
            height: body.height,
        };
        let prompt = Rect {
            height: 2,
            ..content
        };
        frame.render_widget(
            Paragraph::new(PROMPT).style(face).wrap(Wrap { trim: true }),
            prompt,
        );

        let input_y = content.y + 3;
        let field_x = content.x + OPEN_LABEL.len() as u16 + 1;
        let field = Rect {
            x: field_x,
            y: input_y,
            width: (content.x + content.width).saturating_sub(field_x),
            height: 1,
        };
        let well = Style::default().bg(theme::content_bg()).fg(theme::content_fg());
        frame.fill(field, well);
        let bounds = frame.area();
        let buffer = frame.buffer_mut();
        safe_set_string(buffer, bounds, content.x, input_y, OPEN_LABEL, face);
        // Keep the tail of long input visible next to the cursor.
        let visible = usize::from(field.width.saturating_sub(1));
        let skip = self.input.chars().count().saturating_sub(visible);
        let shown: String = self.input.chars().skip(skip).collect();
        safe_set_string(buffer, field, field.x, input_y, &format!("{shown}▏"), well);

        let rects = render_buttons(
            frame,
            content.x + content.width,
            content.y + content.height - 1,
            &["OK", "Cancel", "Browse..."],
            Some(0),
        );
        self.ok_rect = rects.first().copied();
        self.cancel_rect = rects.get(1).copied();
        self.browse_rect = rects.get(2).copied();
    }
}

impl Default for RunDialog {
    fn default() -> Self {
        Self::new()
    }
}
