use std::sync::OnceLock;

use ratatui::style::Color;

// Classic desktop palette. Colors are RGB and resolved to whatever the
// terminal can display through `rgb`.

pub const DESKTOP_RGB: (u8, u8, u8) = (0, 128, 128);
pub const NAVY_RGB: (u8, u8, u8) = (0, 0, 128);
pub const FACE_RGB: (u8, u8, u8) = (192, 192, 192);
pub const SHADOW_RGB: (u8, u8, u8) = (128, 128, 128);
pub const TOOLTIP_RGB: (u8, u8, u8) = (255, 255, 225);
pub const LINK_GREEN_RGB: (u8, u8, u8) = (0, 128, 0);

fn truecolor() -> bool {
    static TRUECOLOR: OnceLock<bool> = OnceLock::new();
    *TRUECOLOR.get_or_init(|| {
        std::env::var("COLORTERM")
            .map(|value| {
                let value = value.to_lowercase();
                value.contains("truecolor") || value.contains("24bit")
            })
            .unwrap_or(false)
    })
}

/// Resolves an RGB triple to `Color::Rgb` on truecolor terminals and to the
/// nearest xterm-256 entry elsewhere.
pub fn rgb(value: (u8, u8, u8)) -> Color {
    if truecolor() {
        Color::Rgb(value.0, value.1, value.2)
    } else {
        Color::Indexed(xterm_index(value))
    }
}

fn xterm_index((r, g, b): (u8, u8, u8)) -> u8 {
    const LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];
    let step = |v: u8| ((u16::from(v) * 5 + 127) / 255) as u8;
    let (r6, g6, b6) = (step(r), step(g), step(b));
    let cube = (
        LEVELS[r6 as usize],
        LEVELS[g6 as usize],
        LEVELS[b6 as usize],
    );

    let avg = ((u16::from(r) + u16::from(g) + u16::from(b)) / 3) as u8;
    let gray_step = ((u16::from(avg) * 23 + 127) / 255) as u8;
    let gray_level = (8 + u16::from(gray_step) * 10).min(255) as u8;
    let gray = (gray_level, gray_level, gray_level);

    if distance((r, g, b), gray) < distance((r, g, b), cube) {
        232 + gray_step
    } else {
        16 + 36 * r6 + 6 * g6 + b6
    }
}

fn distance(a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
    let d = |x: u8, y: u8| (i32::from(x) - i32::from(y)).pow(2) as u32;
    d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
}

// Desktop
pub fn desktop_bg() -> Color {
    rgb(DESKTOP_RGB)
}
pub fn desktop_fg() -> Color {
    Color::White
}

// Raised surfaces: taskbar, menus, window frames, dialogs
pub fn face_bg() -> Color {
    rgb(FACE_RGB)
}
pub fn face_fg() -> Color {
    Color::Black
}
pub fn face_shadow() -> Color {
    rgb(SHADOW_RGB)
}
pub fn face_disabled_fg() -> Color {
    rgb(SHADOW_RGB)
}

// Title bars
pub fn title_active_bg() -> Color {
    rgb(NAVY_RGB)
}
pub fn title_inactive_bg() -> Color {
    rgb(SHADOW_RGB)
}
pub fn title_fg() -> Color {
    Color::White
}

// Menu / list selection
pub fn selection_bg() -> Color {
    rgb(NAVY_RGB)
}
pub fn selection_fg() -> Color {
    Color::White
}

// Editable content wells
pub fn content_bg() -> Color {
    Color::White
}
pub fn content_fg() -> Color {
    Color::Black
}

// Notifications
pub fn toast_bg() -> Color {
    rgb(TOOLTIP_RGB)
}
pub fn toast_fg() -> Color {
    Color::Black
}

// Network indicator
pub fn online_fg() -> Color {
    rgb(LINK_GREEN_RGB)
}
