//! Built-in applications and the registry that launches them by name.
//!
//! The start menu, desktop icons and the Run dialog only know launcher
//! names; the registry turns a name into a fresh window on the desktop.

pub mod notepad;

use indoc::indoc;

use crate::components::TextView;
use crate::desktop::Desktop;
use crate::keybindings::{GLOBAL_ACTIONS, KeyBindings};
use crate::window::{Icon, Surface, WindowId};

pub use notepad::Notepad;

include!(concat!(env!("OUT_DIR"), "/generated_help.rs"));

/// Zero-argument factory for a window: title, icon and a new content surface.
pub struct Launcher {
    name: &'static str,
    title: &'static str,
    icon: &'static str,
    aliases: &'static [&'static str],
    build: Box<dyn Fn() -> Surface>,
}

impl Launcher {
    pub fn new(
        name: &'static str,
        title: &'static str,
        icon: &'static str,
        build: impl Fn() -> Surface + 'static,
    ) -> Self {
        Self {
            name,
            title,
            icon,
            aliases: &[],
            build: Box::new(build),
        }
    }

    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn icon(&self) -> &'static str {
        self.icon
    }

    fn answers_to(&self, command: &str) -> bool {
        self.name.eq_ignore_ascii_case(command)
            || self
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(command))
    }
}

impl std::fmt::Debug for Launcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Launcher")
            .field("name", &self.name)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct LauncherRegistry {
    launchers: Vec<Launcher>,
}

impl LauncherRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a launcher; a later registration with the same name wins.
    pub fn register(&mut self, launcher: Launcher) {
        self.launchers.retain(|existing| existing.name != launcher.name);
        self.launchers.push(launcher);
    }

    pub fn get(&self, name: &str) -> Option<&Launcher> {
        self.launchers.iter().find(|launcher| launcher.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.launchers.iter().map(Launcher::name)
    }

    /// Maps a typed command to a launcher name: names and aliases match
    /// case-insensitively, with an optional `.exe` suffix.
    pub fn resolve(&self, command: &str) -> Option<&'static str> {
        let command = command.trim();
        let lower = command.to_ascii_lowercase();
        let stem = lower.strip_suffix(".exe").unwrap_or(&lower);
        self.launchers
            .iter()
            .find(|launcher| launcher.answers_to(stem) || launcher.answers_to(&lower))
            .map(Launcher::name)
    }

    /// Opens a new window for `name` on `desktop`.
    pub fn launch(&self, name: &str, desktop: &mut Desktop) -> Option<WindowId> {
        let Some(launcher) = self.get(name) else {
            tracing::warn!(launcher = name, "no launcher registered");
            return None;
        };
        let id = desktop.open_window(launcher.title, (launcher.build)(), Icon::new(launcher.icon));
        tracing::info!(launcher = name, window_id = %id, "launched");
        Some(id)
    }

    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(
            Launcher::new("notepad", "Untitled - Notepad", "¶", || Surface::new(Notepad::new()))
                .with_aliases(&["edit", "write", "wordpad"]),
        );
        registry.register(
            Launcher::new("my_computer", "My Computer", "▣", || {
                Surface::new(TextView::new(indoc! {"
                    ▤ (C:)        Local Disk
                    ◎ (D:)        CD-ROM
                    ⚙ Control Panel
                    ⎙ Printers
                "}))
            })
            .with_aliases(&["my computer", "explorer"]),
        );
        registry.register(
            Launcher::new("my_documents", "My Documents", "▭", || {
                Surface::new(TextView::new("¶ Document.txt"))
            })
            .with_aliases(&["my documents", "documents"]),
        );
        registry.register(placeholder(
            "paint",
            "Untitled - Paint",
            "✎",
            &["mspaint", "pbrush"],
            "The canvas is not available in a terminal.",
        ));
        registry.register(placeholder(
            "calculator",
            "Calculator",
            "±",
            &["calc"],
            "The calculator is not available in a terminal.",
        ));
        registry.register(placeholder(
            "calendar",
            "Calendar",
            "▦",
            &["cal"],
            "Use the clock on the taskbar for today's time.",
        ));
        registry.register(placeholder(
            "internet_explorer",
            "Internet Explorer",
            "e",
            &["iexplore", "internet explorer", "ie"],
            "The page cannot be displayed.\n\nConnect with Dial-Up Networking first.",
        ));
        registry.register(placeholder(
            "media_player",
            "Media Player",
            "♫",
            &["mplayer", "wmplayer", "media player"],
            "No media loaded.",
        ));
        registry.register(
            Launcher::new("help", "Help Topics", "?", || Surface::new(TextView::new(help_text())))
            .with_aliases(&["winhelp"]),
        );
        registry
    }
}

/// The embedded help document followed by the default key bindings.
fn help_text() -> String {
    let mut text = EMBEDDED_HELP.content.to_string();
    text.push_str("\nKeyboard\n\n");
    text.push_str(&KeyBindings::default().describe(GLOBAL_ACTIONS));
    if !EMBEDDED_HELP.modified.is_empty() {
        text.push_str(&format!("\nLast updated {}\n", EMBEDDED_HELP.modified));
    }
    text
}

fn placeholder(
    name: &'static str,
    title: &'static str,
    icon: &'static str,
    aliases: &'static [&'static str],
    body: &'static str,
) -> Launcher {
    Launcher::new(name, title, icon, move || Surface::new(TextView::new(body))).with_aliases(aliases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentContext;
    use crate::desktop::Placement;
    use crate::ui::UiFrame;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;

    #[test]
    fn builtin_registers_every_app() {
        let registry = LauncherRegistry::builtin();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(
            names,
            vec![
                "notepad",
                "my_computer",
                "my_documents",
                "paint",
                "calculator",
                "calendar",
                "internet_explorer",
                "media_player",
                "help",
            ]
        );
    }

    #[test]
    fn resolve_is_case_insensitive_and_strips_exe() {
        let registry = LauncherRegistry::builtin();
        assert_eq!(registry.resolve("NOTEPAD.EXE"), Some("notepad"));
        assert_eq!(registry.resolve("  Calc "), Some("calculator"));
        assert_eq!(registry.resolve("mspaint"), Some("paint"));
        assert_eq!(registry.resolve("iexplore.exe"), Some("internet_explorer"));
        assert_eq!(registry.resolve("help.exe"), Some("help"));
        assert_eq!(registry.resolve("format c:"), None);
    }

    #[test]
    fn launch_opens_a_window_with_launcher_metadata() {
        let registry = LauncherRegistry::builtin();
        let mut desktop = Desktop::new(Placement::seeded(1));
        let id = registry.launch("notepad", &mut desktop).expect("launched");
        let window = desktop.window(id).expect("window exists");
        assert_eq!(window.title(), "Untitled - Notepad");
        assert_eq!(window.icon().glyph(), "¶");
        assert_eq!(registry.launch("solitaire", &mut desktop), None);
        assert_eq!(desktop.windows().len(), 1);
    }

    #[test]
    fn each_launch_gets_a_fresh_surface() {
        let registry = LauncherRegistry::builtin();
        let mut desktop = Desktop::new(Placement::seeded(1));
        let a = registry.launch("help", &mut desktop).expect("launched");
        let b = registry.launch("help", &mut desktop).expect("launched");
        let first = desktop.window(a).expect("a").content().clone();
        let second = desktop.window(b).expect("b").content();
        assert!(!first.ptr_eq(second));
    }

    #[test]
    fn help_lists_the_keyboard_shortcuts() {
        let text = help_text();
        assert!(text.starts_with(EMBEDDED_HELP.content));
        assert!(text.contains("Ctrl+Esc, F10"), "{text}");
        assert!(text.contains("Open / close the Start menu"));
        assert!(text.contains("Ctrl+Q"));
    }

    #[test]
    fn calculator_explains_it_is_unavailable() {
        let registry = LauncherRegistry::builtin();
        let mut desktop = Desktop::new(Placement::seeded(1));
        let id = registry.launch("calculator", &mut desktop).expect("launched");
        let area = Rect::new(0, 0, 60, 3);
        let mut buffer = Buffer::empty(area);
        {
            let mut frame = UiFrame::from_parts(area, &mut buffer);
            let content = desktop.window(id).expect("window").content();
            content.render(&mut frame, area, &ComponentContext::default());
        }
        let row: String = (0..area.width)
            .map(|x| buffer.cell((x, 0)).map(|c| c.symbol().to_string()).unwrap_or_default())
            .collect();
        assert!(row.contains("The calculator is not available"), "{row:?}");
    }

    #[test]
    fn registering_same_name_replaces() {
        let mut registry = LauncherRegistry::new();
        registry.register(Launcher::new("x", "One", "1", || Surface::new(TextView::new(""))));
        registry.register(Launcher::new("x", "Two", "2", || Surface::new(TextView::new(""))));
        assert_eq!(registry.get("x").map(Launcher::title), Some("Two"));
    }
}
