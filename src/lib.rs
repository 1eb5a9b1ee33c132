pub mod apps;
pub mod clock;
pub mod components;
pub mod config;
pub mod constants;
pub mod desktop;
pub mod desktop_icons;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod geometry;
pub mod keybindings;
pub mod network;
pub mod runner;
pub mod shell;
pub mod start_menu;
pub mod taskbar;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod window;
