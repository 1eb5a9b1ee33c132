use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::ui::UiFrame;

pub mod confirm_overlay;
pub mod dialog_overlay;
pub mod network_dialog;
pub mod run_dialog;
pub mod text_view;
pub mod toast;

pub use confirm_overlay::{ConfirmAction, ConfirmOverlay};
pub use dialog_overlay::{DialogFrame, render_buttons};
pub use network_dialog::{NetworkAction, NetworkDialog};
pub use run_dialog::{RunAction, RunDialog};
pub use text_view::TextView;
pub use toast::ToastQueue;

/// UI state handed to components while rendering and handling events.
///
/// `focused` is true when the component's window is the active one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentContext {
    focused: bool,
}

impl ComponentContext {
    pub const fn new(focused: bool) -> Self {
        Self { focused }
    }

    pub const fn focused(&self) -> bool {
        self.focused
    }
}

/// Anything that can be drawn as the body of a window.
///
/// Events reaching `handle_event` are already translated into the
/// component's own coordinate space: mouse positions are relative to the
/// window's top-left cell, matching the `area` passed to `render`.
pub trait Component {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    fn handle_event(&mut self, _event: &Event, _ctx: &ComponentContext) -> bool {
        false
    }
}
