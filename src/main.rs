use std::io;

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use retro_desk::config::{Cli, DeskConfig};
use retro_desk::drivers::ConsoleInputDriver;
use retro_desk::error::DeskError;
use retro_desk::runner::run_shell;
use retro_desk::shell::Shell;
use retro_desk::tracing_sub;

fn main() -> Result<(), DeskError> {
    let config = DeskConfig::try_from(Cli::parse())?;
    tracing_sub::init(config.log_file.as_deref(), config.log_level)?;

    let mut shell = Shell::new(config.metrics, config.placement());
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    if let Err(err) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        let _ = terminal::disable_raw_mode();
        return Err(err.into());
    }
    let result = Terminal::new(CrosstermBackend::new(stdout)).and_then(|mut terminal| {
        let outcome = run_shell(
            &mut terminal,
            ConsoleInputDriver::new(),
            &mut shell,
            config.tick,
        );
        let _ = terminal.show_cursor();
        outcome
    });

    // Restore the terminal before reporting anything.
    terminal::disable_raw_mode()?;
    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
    if let Err(err) = &result {
        tracing::error!(%err, "desktop stopped with an error");
    }
    result.map_err(DeskError::from)
}
