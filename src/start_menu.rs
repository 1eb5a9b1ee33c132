//! Start menu: a tree of categories and commands shown as cascading panels.
//!
//! `expanded` holds the open path through the tree, one index per level.
//! Hovering or clicking a category replaces everything below its level
//! with that category, so only one branch is open at a time.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Clear};

use crate::theme;
use crate::ui::{UiFrame, rect_contains, safe_set_string};

pub const GAMES_NOT_IMPLEMENTED: &str = "Game functionality is not implemented yet!";

/// What a leaf does when clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuCommand {
    Launch(&'static str),
    Notify(&'static str),
    ShowRun,
    ShowNetwork,
    ShutDown,
    /// Closes the menu and nothing else.
    Inert,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItemKind {
    Submenu(Vec<MenuItem>),
    Command(MenuCommand),
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    label: String,
    icon: &'static str,
    kind: MenuItemKind,
}

impl MenuItem {
    pub fn submenu(label: impl Into<String>, icon: &'static str, items: Vec<MenuItem>) -> Self {
        Self {
            label: label.into(),
            icon,
            kind: MenuItemKind::Submenu(items),
        }
    }

    pub fn command(label: impl Into<String>, icon: &'static str, command: MenuCommand) -> Self {
        Self {
            label: label.into(),
            icon,
            kind: MenuItemKind::Command(command),
        }
    }

    pub fn inert(label: impl Into<String>, icon: &'static str) -> Self {
        Self::command(label, icon, MenuCommand::Inert)
    }

    pub fn separator() -> Self {
        Self {
            label: String::new(),
            icon: "",
            kind: MenuItemKind::Separator,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> &MenuItemKind {
        &self.kind
    }
}

/// Where a pointer landed on the open menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuHit {
    Item { depth: usize, index: usize },
    /// Inside a panel but not on a selectable row.
    Panel,
}

#[derive(Debug, Clone)]
struct MenuPanel {
    rect: Rect,
    rows: Vec<(usize, Rect)>,
}

#[derive(Debug, Clone)]
pub struct StartMenu {
    items: Vec<MenuItem>,
    expanded: Vec<usize>,
    hovered: Option<(usize, usize)>,
    panels: Vec<MenuPanel>,
}

enum Selected {
    Branch,
    Leaf(MenuCommand),
    Nothing,
}

impl StartMenu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self {
            items,
            expanded: Vec::new(),
            hovered: None,
            panels: Vec::new(),
        }
    }

    /// The stock menu; `user` appears in the Log Off entry.
    pub fn classic(user: &str) -> Self {
        use MenuCommand::*;
        let games = || MenuCommand::Notify(GAMES_NOT_IMPLEMENTED);
        Self::new(vec![
            MenuItem::submenu(
                "Programs",
                "▤",
                vec![
                    MenuItem::submenu(
                        "Accessories",
                        "▤",
                        vec![
                            MenuItem::command("Notepad", "¶", Launch("notepad")),
                            MenuItem::command("Paint", "✎", Launch("paint")),
                            MenuItem::command("Calculator", "±", Launch("calculator")),
                            MenuItem::command("Calendar", "▦", Launch("calendar")),
                            MenuItem::inert("Clock", "◷"),
                            MenuItem::inert("WordPad", "¶"),
                        ],
                    ),
                    MenuItem::submenu(
                        "Games",
                        "▤",
                        vec![
                            MenuItem::command("Minesweeper", "✹", games()),
                            MenuItem::command("Solitaire", "♠", games()),
                            MenuItem::command("FreeCell", "♣", games()),
                            MenuItem::command("Hearts", "♥", games()),
                        ],
                    ),
                    MenuItem::submenu(
                        "System Tools",
                        "▤",
                        vec![
                            MenuItem::inert("System Information", "i"),
                            MenuItem::inert("Disk Defragmenter", "▥"),
                            MenuItem::inert("Backup", "▧"),
                            MenuItem::inert("Resource Monitor", "▨"),
                        ],
                    ),
                    MenuItem::command("Internet Explorer", "e", Launch("internet_explorer")),
                    MenuItem::command("Media Player", "♫", Launch("media_player")),
                    MenuItem::inert("Outlook Express", "✉"),
                    MenuItem::inert("Microsoft Fax", "☏"),
                ],
            ),
            MenuItem::submenu(
                "Documents",
                "▭",
                vec![
                    MenuItem::command("My Documents", "▭", Launch("my_documents")),
                    MenuItem::inert("Recent Documents", "▭"),
                ],
            ),
            MenuItem::submenu(
                "Settings",
                "⚙",
                vec![
                    MenuItem::inert("Control Panel", "⚙"),
                    MenuItem::inert("Printers", "⎙"),
                    MenuItem::command("Network", "≋", ShowNetwork),
                    MenuItem::inert("Taskbar & Start Menu", "▬"),
                ],
            ),
            MenuItem::command("My Computer", "▣", Launch("my_computer")),
            MenuItem::inert("Find", "⌕"),
            MenuItem::command("Help", "?", Launch("help")),
            MenuItem::command("Run...", "▶", ShowRun),
            MenuItem::separator(),
            MenuItem::inert(format!("Log Off {user}..."), "⎋"),
            MenuItem::command("Shut Down...", "⏻", ShutDown),
        ])
    }

    pub fn expanded_path(&self) -> &[usize] {
        &self.expanded
    }

    /// Collapses every open branch.
    pub fn close_all(&mut self) {
        self.expanded.clear();
        self.hovered = None;
        self.panels.clear();
    }

    fn level(&self, depth: usize) -> Option<&[MenuItem]> {
        if depth > self.expanded.len() {
            return None;
        }
        let mut items = self.items.as_slice();
        for &index in &self.expanded[..depth] {
            match items.get(index).map(MenuItem::kind) {
                Some(MenuItemKind::Submenu(children)) => items = children,
                _ => return None,
            }
        }
        Some(items)
    }

    /// Items shown at `depth` given the current open path.
    pub fn items_at(&self, depth: usize) -> Option<&[MenuItem]> {
        self.level(depth)
    }

    /// Highlights a row; a category also opens, closing sibling branches.
    /// Returns whether anything changed.
    pub fn hover(&mut self, depth: usize, index: usize) -> bool {
        let Some(item) = self.level(depth).and_then(|items| items.get(index)) else {
            return false;
        };
        let opens = matches!(item.kind, MenuItemKind::Submenu(_));
        let selectable = !matches!(item.kind, MenuItemKind::Separator);
        let mut path = self.expanded[..depth].to_vec();
        if opens {
            path.push(index);
        }
        let hovered = selectable.then_some((depth, index));
        let changed = path != self.expanded || hovered != self.hovered;
        self.expanded = path;
        self.hovered = hovered;
        changed
    }

    /// Clicks a row. Categories expand; leaves collapse the whole menu and
    /// hand back their command.
    pub fn activate(&mut self, depth: usize, index: usize) -> Option<MenuCommand> {
        let selected = match self
            .level(depth)
            .and_then(|items| items.get(index))
            .map(MenuItem::kind)
        {
            Some(MenuItemKind::Submenu(_)) => Selected::Branch,
            Some(MenuItemKind::Command(command)) => Selected::Leaf(command.clone()),
            Some(MenuItemKind::Separator) | None => Selected::Nothing,
        };
        match selected {
            Selected::Branch => {
                self.hover(depth, index);
                None
            }
            Selected::Leaf(command) => {
                tracing::debug!(?command, "start menu command");
                self.close_all();
                Some(command)
            }
            Selected::Nothing => None,
        }
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<MenuHit> {
        for (depth, panel) in self.panels.iter().enumerate().rev() {
            if !rect_contains(panel.rect, column, row) {
                continue;
            }
            return Some(
                panel
                    .rows
                    .iter()
                    .find(|(_, rect)| rect_contains(*rect, column, row))
                    .map_or(MenuHit::Panel, |(index, _)| MenuHit::Item {
                        depth,
                        index: *index,
                    }),
            );
        }
        None
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.hit_test(column, row).is_some()
    }

    /// Draws the root panel rising from `anchor_x` at the bottom of
    /// `bounds`, then one cascading panel per open branch.
    pub fn render(&mut self, frame: &mut UiFrame<'_>, anchor_x: u16, bounds: Rect) {
        self.panels.clear();
        if bounds.width < 8 || bounds.height < 3 {
            return;
        }
        let mut parent: Option<(Rect, u16)> = None;
        for depth in 0..=self.expanded.len() {
            let Some(items) = self.level(depth) else {
                break;
            };
            let banner = u16::from(depth == 0);
            let label_width = items
                .iter()
                .map(|item| item.label.chars().count() as u16)
                .max()
                .unwrap_or(0);
            let width = (label_width + 7 + banner).min(bounds.width);
            let height = (items.len() as u16 + 2).min(bounds.height);
            let bottom = bounds.y + bounds.height;
            let right = bounds.x + bounds.width;
            let (x, y) = match parent {
                None => (anchor_x.min(right.saturating_sub(width)), bottom - height),
                Some((parent_rect, row_y)) => {
                    let mut x = parent_rect.x + parent_rect.width;
                    if x + width > right {
                        x = parent_rect.x.saturating_sub(width).max(bounds.x);
                    }
                    let y = row_y.saturating_sub(1).min(bottom - height).max(bounds.y);
                    (x, y)
                }
            };
            let rect = Rect::new(x, y, width, height);
            let rows = self.draw_panel(frame, depth, items, rect, banner);
            let open_row = self
                .expanded
                .get(depth)
                .and_then(|open| rows.iter().find(|(index, _)| index == open))
                .map(|(_, row)| row.y);
            self.panels.push(MenuPanel { rect, rows });
            match open_row {
                Some(row_y) => parent = Some((rect, row_y)),
                None => break,
            }
        }
    }

    fn draw_panel(
        &self,
        frame: &mut UiFrame<'_>,
        depth: usize,
        items: &[MenuItem],
        rect: Rect,
        banner: u16,
    ) -> Vec<(usize, Rect)> {
        let face = Style::default().bg(theme::face_bg()).fg(theme::face_fg());
        let selected = Style::default()
            .bg(theme::selection_bg())
            .fg(theme::selection_fg());
        frame.render_widget(Clear, rect);
        frame.render_widget(Block::bordered().style(face), rect);
        let inner = Rect {
            x: rect.x + 1,
            y: rect.y + 1,
            width: rect.width.saturating_sub(2),
            height: rect.height.saturating_sub(2),
        };
        if banner > 0 && inner.width > 0 {
            let strip = Rect { width: 1, ..inner };
            frame.fill(strip, Style::default().bg(theme::title_active_bg()));
        }
        let text_x = inner.x + banner;
        let text_width = inner.width.saturating_sub(banner);
        let bounds = frame.area();
        let buffer = frame.buffer_mut();
        let mut rows = Vec::new();
        for (index, item) in items.iter().enumerate().take(usize::from(inner.height)) {
            let y = inner.y + index as u16;
            let row = Rect::new(text_x, y, text_width, 1);
            if let MenuItemKind::Separator = item.kind {
                let line = "─".repeat(usize::from(text_width));
                safe_set_string(buffer, row.intersection(bounds), text_x, y, &line, face.fg(theme::face_shadow()));
                continue;
            }
            let open = self.expanded.get(depth) == Some(&index);
            let hovered = self.hovered == Some((depth, index));
            let style = if open || hovered { selected } else { face };
            let arrow = if matches!(item.kind, MenuItemKind::Submenu(_)) {
                "▸"
            } else {
                " "
            };
            let label_width = usize::from(text_width.saturating_sub(5));
            let text = format!(" {} {:<label_width$} {} ", item.icon, item.label, arrow);
            safe_set_string(buffer, row.intersection(bounds), text_x, y, &text, style);
            if open
                && let Some(cell) = buffer.cell_mut((text_x + 1, y))
            {
                cell.modifier.insert(Modifier::BOLD);
            }
            rows.push((index, row));
        }
        rows
    }
}

/// Short host name for the Log Off entry.
pub fn local_user_label() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .and_then(|name| name.split('.').next().map(str::to_string))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "user".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    fn render(menu: &mut StartMenu) -> Buffer {
        let area = Rect::new(0, 0, 120, 30);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        menu.render(&mut frame, 0, Rect::new(0, 0, 120, 29));
        buffer
    }

    fn find(menu: &StartMenu, depth: usize, label: &str) -> usize {
        menu.items_at(depth)
            .and_then(|items| items.iter().position(|item| item.label() == label))
            .unwrap_or_else(|| panic!("{label} not found at depth {depth}"))
    }

    #[test]
    fn hover_opens_one_branch_at_a_time() {
        let mut menu = StartMenu::classic("host");
        let programs = find(&menu, 0, "Programs");
        let settings = find(&menu, 0, "Settings");
        assert!(menu.hover(0, programs));
        let games = find(&menu, 1, "Games");
        menu.hover(1, games);
        assert_eq!(menu.expanded_path(), &[programs, games]);
        menu.hover(0, settings);
        assert_eq!(menu.expanded_path(), &[settings]);
        let help = find(&menu, 0, "Help");
        menu.hover(0, help);
        assert!(menu.expanded_path().is_empty());
    }

    #[test]
    fn leaf_in_nested_branch_returns_command_and_collapses() {
        let mut menu = StartMenu::classic("host");
        let programs = find(&menu, 0, "Programs");
        assert_eq!(menu.activate(0, programs), None);
        let accessories = find(&menu, 1, "Accessories");
        assert_eq!(menu.activate(1, accessories), None);
        let notepad = find(&menu, 2, "Notepad");
        assert_eq!(
            menu.activate(2, notepad),
            Some(MenuCommand::Launch("notepad"))
        );
        assert!(menu.expanded_path().is_empty());
        assert_eq!(menu.activate(2, notepad), None);
    }

    #[test]
    fn games_notify_and_log_off_names_host() {
        let mut menu = StartMenu::classic("retro");
        assert!(menu.items_at(0).unwrap().iter().any(|i| i.label() == "Log Off retro..."));
        let programs = find(&menu, 0, "Programs");
        menu.hover(0, programs);
        let games = find(&menu, 1, "Games");
        menu.hover(1, games);
        let hearts = find(&menu, 2, "Hearts");
        assert_eq!(
            menu.activate(2, hearts),
            Some(MenuCommand::Notify(GAMES_NOT_IMPLEMENTED))
        );
    }

    #[test]
    fn separators_do_nothing() {
        let mut menu = StartMenu::classic("host");
        let separator = menu
            .items_at(0)
            .unwrap()
            .iter()
            .position(|item| matches!(item.kind(), MenuItemKind::Separator))
            .unwrap();
        assert_eq!(menu.activate(0, separator), None);
        assert!(!menu.hover(0, separator));
    }

    #[test]
    fn rendered_panels_cascade_and_hit_test() {
        let mut menu = StartMenu::classic("host");
        let programs = find(&menu, 0, "Programs");
        menu.hover(0, programs);
        render(&mut menu);
        assert_eq!(menu.panels.len(), 2);
        let root = menu.panels[0].rect;
        let sub = menu.panels[1].rect;
        assert_eq!(root.y + root.height, 29);
        assert_eq!(sub.x, root.x + root.width);
        let (index, row) = menu.panels[1].rows[0];
        assert_eq!(
            menu.hit_test(row.x + 1, row.y),
            Some(MenuHit::Item { depth: 1, index })
        );
        assert_eq!(menu.hit_test(root.x, root.y), Some(MenuHit::Panel));
        assert_eq!(menu.hit_test(119, 0), None);
        menu.close_all();
        assert!(!menu.contains(row.x + 1, row.y));
    }
}
