use std::io;
use std::time::{Duration, Instant};

use crossterm::event::Event;
use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::drivers::InputDriver;
use crate::event_loop::{ControlFlow, EventLoop};
use crate::shell::Shell;
use crate::ui::UiFrame;

/// Pumps `driver` into `shell` and redraws when something changed, until
/// the shut-down confirmation is accepted.
pub fn run_shell<B, D>(
    terminal: &mut Terminal<B>,
    driver: D,
    shell: &mut Shell,
    poll_interval: Duration,
) -> io::Result<()>
where
    B: Backend,
    D: InputDriver,
{
    tracing::info!("desktop started");
    let mut event_loop = EventLoop::new(driver, poll_interval);
    let mut dirty = true;
    event_loop.run(|event| match event {
        Some(event) => {
            if let Event::Resize(columns, rows) = event {
                tracing::debug!(columns, rows, "terminal resized");
            }
            dirty = true;
            let flow = shell.handle_event(&event);
            if flow == ControlFlow::Quit {
                tracing::info!("desktop shutting down");
            }
            Ok(flow)
        }
        None => {
            dirty |= shell.tick(Instant::now());
            if dirty {
                terminal
                    .draw(|frame| {
                        let mut ui = UiFrame::new(frame);
                        shell.render(&mut ui);
                    })
                    .map_err(|err| io::Error::other(err.to_string()))?;
                dirty = false;
            }
            Ok(ControlFlow::Continue)
        }
    })
}
