use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ShutDown,
    ToggleStartMenu,
    Dismiss,
    // Dialog forms
    DialogSubmit,
    // Shut-down confirmation
    ConfirmToggle,
    ConfirmLeft,
    ConfirmRight,
    ConfirmAccept,
    ConfirmCancel,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::ShutDown => "Shut down",
            Action::ToggleStartMenu => "Open / close the Start menu",
            Action::Dismiss => "Close menu or dialog",
            Action::DialogSubmit => "Submit dialog",
            Action::ConfirmToggle => "Confirm toggle (Tab)",
            Action::ConfirmLeft => "Confirm left",
            Action::ConfirmRight => "Confirm right",
            Action::ConfirmAccept => "Confirm accept",
            Action::ConfirmCancel => "Confirm cancel",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        parts.push(match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        write!(f, "{}", parts.join("+"))
    }
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        self.map
            .get(&action)
            .is_some_and(|list| list.iter().any(|combo| combo.matches(key)))
    }

    /// Display strings for every combo bound to `action`.
    pub fn combos_for(&self, action: Action) -> Vec<String> {
        self.map
            .get(&action)
            .map(|list| list.iter().map(ToString::to_string).collect())
            .unwrap_or_default()
    }

    /// One `keys  description` line per action, for the help window.
    pub fn describe(&self, actions: &[Action]) -> String {
        let rows: Vec<(String, String)> = actions
            .iter()
            .map(|action| (self.combos_for(*action).join(", "), action.to_string()))
            .filter(|(keys, _)| !keys.is_empty())
            .collect();
        let width = rows.iter().map(|(keys, _)| keys.len()).max().unwrap_or(0);
        rows.iter()
            .map(|(keys, what)| format!("  {keys:<width$}  {what}\n"))
            .collect()
    }
}

/// Actions a user can reach from anywhere on the desktop.
pub const GLOBAL_ACTIONS: &[Action] = &[
    Action::ToggleStartMenu,
    Action::Dismiss,
    Action::DialogSubmit,
    Action::ShutDown,
];

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let mut kb = Self::empty();
        kb.add(ShutDown, KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        // Many terminals swallow Ctrl+Esc, so F10 opens the menu too.
        kb.add(ToggleStartMenu, KeyCombo::new(KeyCode::Esc, KeyModifiers::CONTROL));
        kb.add(ToggleStartMenu, KeyCombo::plain(KeyCode::F(10)));
        kb.add(Dismiss, KeyCombo::plain(KeyCode::Esc));
        kb.add(DialogSubmit, KeyCombo::plain(KeyCode::Enter));
        kb.add(ConfirmToggle, KeyCombo::plain(KeyCode::Tab));
        kb.add(ConfirmToggle, KeyCombo::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        kb.add(ConfirmToggle, KeyCombo::plain(KeyCode::BackTab));
        kb.add(ConfirmLeft, KeyCombo::plain(KeyCode::Left));
        kb.add(ConfirmRight, KeyCombo::plain(KeyCode::Right));
        kb.add(ConfirmAccept, KeyCombo::plain(KeyCode::Enter));
        kb.add(ConfirmAccept, KeyCombo::plain(KeyCode::Char('y')));
        kb.add(ConfirmCancel, KeyCombo::plain(KeyCode::Esc));
        kb.add(ConfirmCancel, KeyCombo::plain(KeyCode::Char('n')));
        kb
    }
}
