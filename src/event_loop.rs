use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::drivers::InputDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// The single-threaded message pump that drives the desktop.
///
/// It is the only place that polls the input driver. Each turn the handler
/// first sees `None` (time to tick and draw), then every queued event in
/// order. All state is mutated from inside the handler, so there is no
/// locking anywhere in the desktop.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Runs until the handler returns `ControlFlow::Quit` or the driver
    /// fails.
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if let ControlFlow::Quit = handler(None)? {
                break;
            }

            if self.driver.poll(self.poll_interval)? {
                // Drain bursts (drags, wheel scrolling) before the next draw
                // so rendering never falls behind the input stream.
                loop {
                    let event = self.driver.read()?;
                    if let ControlFlow::Quit = handler(Some(event))? {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::ZERO)? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::ScriptedDriver;

    #[test]
    fn quits_when_handler_says_so() {
        let driver = ScriptedDriver::new([Event::Resize(1, 1), Event::Resize(2, 2)]);
        let mut event_loop = EventLoop::new(driver, Duration::ZERO);
        let mut seen = Vec::new();
        event_loop
            .run(|event| {
                if let Some(event) = event {
                    seen.push(event);
                    return Ok(ControlFlow::Quit);
                }
                Ok(ControlFlow::Continue)
            })
            .unwrap();
        assert_eq!(seen, vec![Event::Resize(1, 1)]);
        assert_eq!(event_loop.driver().remaining(), 1);
    }

    #[test]
    fn driver_errors_end_the_loop() {
        let mut event_loop = EventLoop::new(ScriptedDriver::default(), Duration::ZERO);
        let result = event_loop.run(|_| Ok(ControlFlow::Continue));
        assert!(result.is_err());
    }
}
