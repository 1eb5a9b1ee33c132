use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::components::{Component, ComponentContext};
use crate::theme;
use crate::ui::{UiFrame, rect_contains, safe_set_string};

const MENU_BAR: &str = " File  Edit  Search  Help";
const TAB_WIDTH: usize = 4;

/// Plain multi-line text editor. Cursor positions are in characters.
#[derive(Debug, Clone)]
pub struct Notepad {
    lines: Vec<String>,
    row: usize,
    col: usize,
    top: usize,
    text_area: Rect,
}

impl Notepad {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            top: 0,
            text_area: Rect::default(),
        }
    }

    pub fn with_text(text: &str) -> Self {
        let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            lines,
            ..Self::new()
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |line| line.chars().count())
    }

    fn byte_index(line: &str, col: usize) -> usize {
        line.char_indices()
            .nth(col)
            .map_or(line.len(), |(index, _)| index)
    }

    fn insert_str(&mut self, text: &str) {
        let line = &mut self.lines[self.row];
        let at = Self::byte_index(line, self.col);
        line.insert_str(at, text);
        self.col += text.chars().count();
    }

    fn newline(&mut self) {
        let line = &mut self.lines[self.row];
        let at = Self::byte_index(line, self.col);
        let rest = line.split_off(at);
        self.row += 1;
        self.lines.insert(self.row, rest);
        self.col = 0;
    }

    fn backspace(&mut self) {
        if self.col > 0 {
            let line = &mut self.lines[self.row];
            let at = Self::byte_index(line, self.col - 1);
            line.remove(at);
            self.col -= 1;
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_len(self.row);
            self.lines[self.row].push_str(&line);
        }
    }

    fn delete(&mut self) {
        if self.col < self.line_len(self.row) {
            let line = &mut self.lines[self.row];
            let at = Self::byte_index(line, self.col);
            line.remove(at);
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
        }
    }

    fn move_vertical(&mut self, delta: isize) {
        let target = self.row.saturating_add_signed(delta).min(self.lines.len() - 1);
        self.row = target;
        self.col = self.col.min(self.line_len(target));
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => {
                let mut buf = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut buf));
            }
            KeyCode::Tab => self.insert_str(&" ".repeat(TAB_WIDTH)),
            KeyCode::Enter => self.newline(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => {
                if self.col > 0 {
                    self.col -= 1;
                } else if self.row > 0 {
                    self.row -= 1;
                    self.col = self.line_len(self.row);
                }
            }
            KeyCode::Right => {
                if self.col < self.line_len(self.row) {
                    self.col += 1;
                } else if self.row + 1 < self.lines.len() {
                    self.row += 1;
                    self.col = 0;
                }
            }
            KeyCode::Up => self.move_vertical(-1),
            KeyCode::Down => self.move_vertical(1),
            KeyCode::Home => self.col = 0,
            KeyCode::End => self.col = self.line_len(self.row),
            _ => return false,
        }
        true
    }

    fn scroll_into_view(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.row < self.top {
            self.top = self.row;
        } else if self.row >= self.top + height {
            self.top = self.row + 1 - height;
        }
    }
}

impl Default for Notepad {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Notepad {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.height < 2 || area.width < 2 {
            return;
        }
        let face = Style::default().bg(theme::face_bg()).fg(theme::face_fg());
        let well = Style::default().bg(theme::content_bg()).fg(theme::content_fg());
        let menu = Rect { height: 1, ..area };
        frame.fill(menu, face);
        let text_area = Rect {
            y: area.y + 1,
            height: area.height - 1,
            ..area
        };
        self.text_area = text_area;
        frame.fill(text_area, well);
        self.scroll_into_view(usize::from(text_area.height));

        let bounds = frame.area();
        let buffer = frame.buffer_mut();
        safe_set_string(buffer, menu, menu.x, menu.y, MENU_BAR, face);
        let left = self.col.saturating_sub(usize::from(text_area.width.saturating_sub(1)));
        for (offset, line) in self
            .lines
            .iter()
            .skip(self.top)
            .take(usize::from(text_area.height))
            .enumerate()
        {
            let visible: String = line.chars().skip(left).collect();
            safe_set_string(buffer, text_area, text_area.x, text_area.y + offset as u16, &visible, well);
        }
        if ctx.focused() {
            let x = text_area.x + (self.col - left) as u16;
            let y = text_area.y + (self.row - self.top) as u16;
            if rect_contains(text_area.intersection(bounds), x, y)
                && let Some(cell) = buffer.cell_mut((x, y))
            {
                cell.set_style(well.add_modifier(Modifier::REVERSED));
            }
        }
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        match event {
            Event::Key(key) if ctx.focused() => self.handle_key(key),
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                if !rect_contains(self.text_area, mouse.column, mouse.row) {
                    return false;
                }
                let row = self.top + usize::from(mouse.row - self.text_area.y);
                self.row = row.min(self.lines.len() - 1);
                self.col = usize::from(mouse.column - self.text_area.x).min(self.line_len(self.row));
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{MouseButton, MouseEvent};
    use ratatui::buffer::Buffer;

    fn press(pad: &mut Notepad, code: KeyCode) {
        pad.handle_event(
            &Event::Key(KeyEvent::new(code, KeyModifiers::NONE)),
            &ComponentContext::new(true),
        );
    }

    fn type_str(pad: &mut Notepad, text: &str) {
        for c in text.chars() {
            press(pad, KeyCode::Char(c));
        }
    }

    #[test]
    fn typing_and_line_editing() {
        let mut pad = Notepad::new();
        type_str(&mut pad, "héllo");
        press(&mut pad, KeyCode::Enter);
        type_str(&mut pad, "world");
        assert_eq!(pad.text(), "héllo\nworld");
        press(&mut pad, KeyCode::Home);
        press(&mut pad, KeyCode::Backspace);
        assert_eq!(pad.text(), "hélloworld");
        assert_eq!(pad.cursor(), (0, 5));
        press(&mut pad, KeyCode::Delete);
        assert_eq!(pad.text(), "hélloorld");
    }

    #[test]
    fn tab_inserts_spaces() {
        let mut pad = Notepad::new();
        press(&mut pad, KeyCode::Tab);
        type_str(&mut pad, "x");
        assert_eq!(pad.text(), "    x");
    }

    #[test]
    fn vertical_moves_clamp_column() {
        let mut pad = Notepad::with_text("long line\nab");
        press(&mut pad, KeyCode::End);
        press(&mut pad, KeyCode::Down);
        assert_eq!(pad.cursor(), (1, 2));
        press(&mut pad, KeyCode::Down);
        assert_eq!(pad.cursor(), (1, 2));
    }

    #[test]
    fn unfocused_ignores_keys() {
        let mut pad = Notepad::new();
        let handled = pad.handle_event(
            &Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)),
            &ComponentContext::new(false),
        );
        assert!(!handled);
        assert_eq!(pad.text(), "");
    }

    #[test]
    fn click_places_cursor() {
        let area = Rect::new(1, 2, 20, 6);
        let mut buffer = Buffer::empty(Rect::new(0, 0, 22, 9));
        let mut pad = Notepad::with_text("first\nsecond line");
        {
            let mut frame = UiFrame::from_parts(buffer.area, &mut buffer);
            pad.render(&mut frame, area, &ComponentContext::new(true));
        }
        assert_eq!(buffer.cell((1, 3)).map(|c| c.symbol()), Some("f"));
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 4,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert!(pad.handle_event(&click, &ComponentContext::new(true)));
        assert_eq!(pad.cursor(), (1, 3));
    }
}
