use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::theme;
use crate::ui::{UiFrame, rect_contains, safe_set_string, truncate_to_width};

const ICON_WIDTH: u16 = 14;
const ICON_HEIGHT: u16 = 3;
const ICON_GAP: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopIcon {
    pub label: &'static str,
    pub glyph: &'static str,
    pub launcher: &'static str,
}

/// A column of launch icons in the top-left corner of the desktop.
#[derive(Debug, Clone)]
pub struct DesktopIcons {
    icons: Vec<DesktopIcon>,
    rects: Vec<Rect>,
}

impl Default for DesktopIcons {
    fn default() -> Self {
        Self::new(vec![
            DesktopIcon {
                label: "My Computer",
                glyph: "▣",
                launcher: "my_computer",
            },
            DesktopIcon {
                label: "My Documents",
                glyph: "▭",
                launcher: "my_documents",
            },
            DesktopIcon {
                label: "Notepad",
                glyph: "¶",
                launcher: "notepad",
            },
        ])
    }
}

impl DesktopIcons {
    pub fn new(icons: Vec<DesktopIcon>) -> Self {
        Self {
            icons,
            rects: Vec::new(),
        }
    }

    pub fn icons(&self) -> &[DesktopIcon] {
        &self.icons
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        self.rects.clear();
        let label_style = Style::default()
            .bg(theme::desktop_bg())
            .fg(theme::desktop_fg());
        let glyph_style = Style::default()
            .bg(theme::face_bg())
            .fg(theme::face_fg())
            .add_modifier(Modifier::BOLD);
        let mut y = area.y + 1;
        for icon in &self.icons {
            if y + ICON_HEIGHT > area.y + area.height {
                break;
            }
            let rect = Rect::new(area.x + 1, y, ICON_WIDTH.min(area.width), ICON_HEIGHT);
            let glyph = format!(" {} ", icon.glyph);
            let glyph_x = rect.x + (rect.width.saturating_sub(3)) / 2;
            let label = truncate_to_width(icon.label, usize::from(rect.width));
            let label_x = rect.x + (rect.width.saturating_sub(label.chars().count() as u16)) / 2;
            let buffer = frame.buffer_mut();
            safe_set_string(buffer, area, glyph_x, rect.y, &glyph, glyph_style);
            safe_set_string(buffer, area, label_x, rect.y + 1, &label, label_style);
            self.rects.push(rect);
            y += ICON_HEIGHT + ICON_GAP;
        }
    }

    /// Launcher name of the icon under the pointer, as of the last render.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<&'static str> {
        self.rects
            .iter()
            .zip(&self.icons)
            .find(|(rect, _)| rect_contains(**rect, column, row))
            .map(|(_, icon)| icon.launcher)
    }
}
