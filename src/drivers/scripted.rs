use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::Event;

use super::InputDriver;

/// Replays a fixed list of events. Once the script runs out, `poll`
/// fails with `UnexpectedEof` so a loop that never quits cannot hang.
#[derive(Debug, Default)]
pub struct ScriptedDriver {
    events: VecDeque<Event>,
}

impl ScriptedDriver {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl InputDriver for ScriptedDriver {
    fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
        if self.events.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input script exhausted",
            ));
        }
        Ok(true)
    }

    fn read(&mut self) -> io::Result<Event> {
        self.events.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "input script exhausted")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn replays_then_fails() {
        let mut driver = ScriptedDriver::new([Event::Key(KeyEvent::new(
            KeyCode::Char('x'),
            KeyModifiers::NONE,
        ))]);
        assert!(driver.poll(Duration::ZERO).unwrap());
        assert!(matches!(driver.read().unwrap(), Event::Key(_)));
        assert_eq!(driver.remaining(), 0);
        let err = driver.poll(Duration::ZERO).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn works_through_a_mutable_reference() {
        let mut driver = ScriptedDriver::new([Event::Resize(1, 1)]);
        let mut by_ref = &mut driver;
        assert!(InputDriver::poll(&mut by_ref, Duration::ZERO).unwrap());
        assert_eq!(by_ref.read().unwrap(), Event::Resize(1, 1));
    }
}
