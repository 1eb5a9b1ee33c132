use std::io;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

use retro_desk::desktop::Placement;
use retro_desk::drivers::ScriptedDriver;
use retro_desk::geometry::CellMetrics;
use retro_desk::runner::run_shell;
use retro_desk::shell::Shell;

fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
    Event::Key(KeyEvent::new(code, modifiers))
}

#[test]
fn confirmed_shut_down_ends_the_loop() {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    let mut shell = Shell::new(CellMetrics::default(), Placement::seeded(1));
    let driver = ScriptedDriver::new([
        key(KeyCode::Esc, KeyModifiers::CONTROL),
        key(KeyCode::Char('q'), KeyModifiers::CONTROL),
        key(KeyCode::Char('y'), KeyModifiers::NONE),
    ]);
    run_shell(&mut terminal, driver, &mut shell, Duration::ZERO).unwrap();
    assert!(!shell.desktop().start_menu_open());
}

#[test]
fn exhausted_input_is_an_error() {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    let mut shell = Shell::new(CellMetrics::default(), Placement::seeded(1));
    let driver = ScriptedDriver::new([key(KeyCode::Char('q'), KeyModifiers::CONTROL)]);
    let err = run_shell(&mut terminal, driver, &mut shell, Duration::ZERO).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    assert!(shell.confirm_visible());
}

#[test]
fn first_frame_draws_the_taskbar() {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    let mut shell = Shell::new(CellMetrics::default(), Placement::seeded(1));
    let _ = run_shell(&mut terminal, ScriptedDriver::default(), &mut shell, Duration::ZERO);
    let buffer = terminal.backend().buffer();
    let bottom: String = (0..100)
        .map(|x| buffer[(x, 29)].symbol().to_string())
        .collect();
    assert!(bottom.contains("Start"));
}
