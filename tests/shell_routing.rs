use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use retro_desk::desktop::Placement;
use retro_desk::event_loop::ControlFlow;
use retro_desk::geometry::{CellMetrics, Point};
use retro_desk::shell::Shell;
use retro_desk::start_menu::{GAMES_NOT_IMPLEMENTED, MenuHit};
use retro_desk::taskbar::TaskbarHit;
use retro_desk::ui::UiFrame;
use retro_desk::window::decorator::ChromeLayout;
use retro_desk::window::{FloatRect, WindowId};

const SCREEN: Rect = Rect {
    x: 0,
    y: 0,
    width: 120,
    height: 40,
};

fn shell() -> Shell {
    Shell::new(CellMetrics::default(), Placement::seeded(5))
}

fn draw(shell: &mut Shell) -> Buffer {
    let mut buffer = Buffer::empty(SCREEN);
    let mut frame = UiFrame::from_parts(SCREEN, &mut buffer);
    shell.render(&mut frame);
    buffer
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn click(shell: &mut Shell, column: u16, row: u16) -> ControlFlow {
    let flow = shell.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), column, row));
    shell.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), column, row));
    flow
}

fn press(shell: &mut Shell, code: KeyCode) {
    shell.handle_event(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
}

fn type_text(shell: &mut Shell, text: &str) {
    for c in text.chars() {
        press(shell, KeyCode::Char(c));
    }
}

fn cells(shell: &Shell, id: WindowId) -> FloatRect {
    let window = shell.desktop().window(id).expect("window exists");
    shell.metrics().to_cells(window.bounds())
}

fn find_taskbar(shell: &Shell, wanted: TaskbarHit) -> (u16, u16) {
    let row = SCREEN.height - 1;
    (0..SCREEN.width)
        .find(|&column| shell.taskbar().hit_test(column, row) == Some(wanted))
        .map(|column| (column, row))
        .unwrap_or_else(|| panic!("{wanted:?} not on the taskbar"))
}

fn find_menu_item(shell: &Shell, depth: usize, label: &str) -> (u16, u16) {
    let index = shell
        .start_menu()
        .items_at(depth)
        .and_then(|items| items.iter().position(|item| item.label() == label))
        .unwrap_or_else(|| panic!("{label} not in menu level {depth}"));
    for row in 0..SCREEN.height {
        for column in 0..SCREEN.width {
            if shell.start_menu().hit_test(column, row) == Some(MenuHit::Item { depth, index }) {
                return (column, row);
            }
        }
    }
    panic!("{label} was not drawn");
}

fn open_start_menu(shell: &mut Shell) {
    draw(shell);
    let (column, row) = find_taskbar(shell, TaskbarHit::Start);
    click(shell, column, row);
    assert!(shell.desktop().start_menu_open());
    draw(shell);
}

#[test]
fn dragging_the_title_bar_moves_by_whole_cells() {
    let mut shell = shell();
    let id = shell.launch("notepad").unwrap();
    draw(&mut shell);
    let rect = cells(&shell, id);
    let before = shell.desktop().window(id).unwrap().position();
    let (column, row) = ((rect.x + 3) as u16, (rect.y + 1) as u16);

    shell.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), column, row));
    assert!(shell.gesture().is_some());
    shell.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), column + 5, row + 2));
    shell.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), column + 5, row + 2));

    assert!(shell.gesture().is_none());
    let after = shell.desktop().window(id).unwrap().position();
    assert_eq!(after, before + Point::new(40, 32));
}

#[test]
fn dragging_the_east_edge_stops_at_the_minimum_width() {
    let mut shell = shell();
    let id = shell.launch("notepad").unwrap();
    draw(&mut shell);
    let rect = cells(&shell, id);
    let before = shell.desktop().window(id).unwrap().bounds();
    let (column, row) = ((rect.right() - 1) as u16, (rect.y + 5) as u16);

    shell.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), column, row));
    shell.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), column - 30, row));
    shell.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), column - 30, row));

    let after = shell.desktop().window(id).unwrap().bounds();
    assert_eq!(after.width, 200);
    assert_eq!(after.x, before.x);
    assert_eq!(after.height, before.height);
}

#[test]
fn any_pointer_motion_feeds_the_active_gesture() {
    let mut shell = shell();
    let id = shell.launch("notepad").unwrap();
    draw(&mut shell);
    let rect = cells(&shell, id);
    let before = shell.desktop().window(id).unwrap().position();
    let (column, row) = ((rect.x + 3) as u16, (rect.y + 1) as u16);
    shell.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), column, row));
    // Far outside the window, over the taskbar row.
    shell.handle_event(&mouse(MouseEventKind::Moved, column + 1, SCREEN.height - 1));
    let after = shell.desktop().window(id).unwrap().position();
    assert_eq!(after.x, before.x + 8);
    assert!(after.y > before.y);
}

#[test]
fn minimize_control_then_taskbar_entry_restores() {
    let mut shell = shell();
    let first = shell.launch("notepad").unwrap();
    let second = shell.launch("my_computer").unwrap();
    shell.activate_window(first);
    draw(&mut shell);
    let rect = cells(&shell, first);
    let layout = ChromeLayout::new(rect);
    click(
        &mut shell,
        layout.minimize_columns().start as u16,
        layout.title_row() as u16,
    );
    assert!(shell.desktop().window(first).unwrap().is_minimized());
    assert_eq!(shell.desktop().active_window_id(), None);
    assert_eq!(shell.desktop().windows().len(), 2);

    draw(&mut shell);
    let entries: Vec<_> = shell.taskbar().entries().collect();
    assert_eq!(entries, vec![first, second]);
    let (column, row) = find_taskbar(&shell, TaskbarHit::Window(first));
    click(&mut shell, column, row);
    assert!(!shell.desktop().window(first).unwrap().is_minimized());
    assert_eq!(shell.desktop().active_window_id(), Some(first));
}

fn restore_through_taskbar(shell: &mut Shell, id: WindowId) {
    draw(shell);
    let row = SCREEN.height - 1;
    for _ in 0..shell.desktop().windows().len() {
        if let Some(column) = (0..SCREEN.width)
            .find(|&column| shell.taskbar().hit_test(column, row) == Some(TaskbarHit::Window(id)))
        {
            click(shell, column, row);
            return;
        }
        let (column, row) = find_taskbar(shell, TaskbarHit::More);
        click(shell, column, row);
        draw(shell);
    }
    panic!("{id:?} never reached the taskbar");
}

#[test]
fn every_window_keeps_a_taskbar_entry_when_crowded() {
    let mut shell = shell();
    let ids: Vec<_> = (0..15).map(|_| shell.launch("notepad").unwrap()).collect();
    let last = *ids.last().unwrap();
    assert!(shell.minimize_window(last));
    draw(&mut shell);
    assert_eq!(shell.taskbar().entries().collect::<Vec<_>>(), ids);

    restore_through_taskbar(&mut shell, last);
    assert!(!shell.desktop().window(last).unwrap().is_minimized());
    assert_eq!(shell.desktop().active_window_id(), Some(last));
}

#[test]
fn overflowing_taskbar_pages_to_a_minimized_window() {
    let mut shell = shell();
    let ids: Vec<_> = (0..30).map(|_| shell.launch("notepad").unwrap()).collect();
    let last = *ids.last().unwrap();
    assert!(shell.minimize_window(last));
    draw(&mut shell);
    assert!(!shell.taskbar().entries().any(|id| id == last));

    restore_through_taskbar(&mut shell, last);
    assert!(!shell.desktop().window(last).unwrap().is_minimized());
    assert_eq!(shell.desktop().active_window_id(), Some(last));
    assert_eq!(shell.taskbar().page(), 1);
}

#[test]
fn close_control_removes_the_window() {
    let mut shell = shell();
    let id = shell.launch("help").unwrap();
    draw(&mut shell);
    let layout = ChromeLayout::new(cells(&shell, id));
    click(
        &mut shell,
        layout.close_columns().start as u16,
        layout.title_row() as u16,
    );
    assert!(shell.desktop().windows().is_empty());
}

#[test]
fn nested_leaf_runs_once_and_closes_every_level() {
    let mut shell = shell();
    open_start_menu(&mut shell);
    let (column, row) = find_menu_item(&shell, 0, "Programs");
    click(&mut shell, column, row);
    draw(&mut shell);
    let (column, row) = find_menu_item(&shell, 1, "Accessories");
    click(&mut shell, column, row);
    draw(&mut shell);
    let (column, row) = find_menu_item(&shell, 2, "Notepad");
    click(&mut shell, column, row);

    assert_eq!(shell.desktop().windows().len(), 1);
    assert_eq!(shell.desktop().windows()[0].title(), "Untitled - Notepad");
    assert!(!shell.desktop().start_menu_open());
    assert!(shell.start_menu().expanded_path().is_empty());
    draw(&mut shell);
    assert!(!shell.start_menu().contains(column, row));
}

#[test]
fn hovering_a_category_opens_it() {
    let mut shell = shell();
    open_start_menu(&mut shell);
    let (column, row) = find_menu_item(&shell, 0, "Settings");
    shell.handle_event(&mouse(MouseEventKind::Moved, column, row));
    draw(&mut shell);
    let (column, row) = find_menu_item(&shell, 1, "Network");
    click(&mut shell, column, row);
    assert!(shell.network_dialog_open());
    assert!(!shell.desktop().start_menu_open());
}

#[test]
fn games_report_through_the_toast_queue() {
    let mut shell = shell();
    open_start_menu(&mut shell);
    let (column, row) = find_menu_item(&shell, 0, "Programs");
    click(&mut shell, column, row);
    draw(&mut shell);
    let (column, row) = find_menu_item(&shell, 1, "Games");
    click(&mut shell, column, row);
    draw(&mut shell);
    let (column, row) = find_menu_item(&shell, 2, "Solitaire");
    click(&mut shell, column, row);
    assert_eq!(shell.toasts().messages().last(), Some(GAMES_NOT_IMPLEMENTED));
    assert!(shell.desktop().windows().is_empty());
}

#[test]
fn click_outside_the_menu_closes_it_and_still_lands() {
    let mut shell = shell();
    open_start_menu(&mut shell);
    click(&mut shell, 2, 1);
    assert!(!shell.desktop().start_menu_open());
    assert_eq!(shell.desktop().windows().len(), 1);
    assert_eq!(shell.desktop().windows()[0].title(), "My Computer");
}

#[test]
fn run_dialog_resolves_aliases_and_reports_unknown_names() {
    let mut shell = shell();
    open_start_menu(&mut shell);
    let (column, row) = find_menu_item(&shell, 0, "Run...");
    click(&mut shell, column, row);
    assert!(shell.run_dialog_open());

    type_text(&mut shell, "doom");
    press(&mut shell, KeyCode::Enter);
    assert!(shell.run_dialog_open());
    assert!(shell.toasts().messages().last().is_some_and(|t| t.contains("doom")));
    assert!(shell.desktop().windows().is_empty());

    for _ in 0..4 {
        press(&mut shell, KeyCode::Backspace);
    }
    type_text(&mut shell, "CALC.exe");
    press(&mut shell, KeyCode::Enter);
    assert!(!shell.run_dialog_open());
    assert_eq!(shell.desktop().windows()[0].title(), "Calculator");
}

#[test]
fn pointer_down_outside_a_dialog_closes_it() {
    let mut shell = shell();
    shell.open_run_dialog();
    draw(&mut shell);
    click(&mut shell, 0, 0);
    assert!(!shell.run_dialog_open());
}

#[test]
fn network_indicator_connects_through_the_dialog() {
    let mut shell = shell();
    draw(&mut shell);
    let (column, row) = find_taskbar(&shell, TaskbarHit::Network);
    click(&mut shell, column, row);
    assert!(shell.network_dialog_open());
    press(&mut shell, KeyCode::Enter);
    assert!(shell.network().is_connected());
    assert_eq!(shell.toasts().messages().last(), Some("Connected to Internet"));
}

#[test]
fn shut_down_entry_asks_for_confirmation() {
    let mut shell = shell();
    open_start_menu(&mut shell);
    let (column, row) = find_menu_item(&shell, 0, "Shut Down...");
    click(&mut shell, column, row);
    assert!(shell.confirm_visible());
    press(&mut shell, KeyCode::Esc);
    assert!(!shell.confirm_visible());
}

#[test]
fn desktop_icon_launches_its_app() {
    let mut shell = shell();
    draw(&mut shell);
    let (column, row) = (2..SCREEN.width)
        .flat_map(|column| (0..SCREEN.height).map(move |row| (column, row)))
        .find(|&(column, row)| shell.icons().hit_test(column, row) == Some("notepad"))
        .expect("notepad icon drawn");
    click(&mut shell, column, row);
    assert_eq!(shell.desktop().windows()[0].title(), "Untitled - Notepad");
}
