//! Transient notifications shown above the taskbar, one at a time.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::constants::{TOAST_CAPACITY, TOAST_DURATION_MS};
use crate::theme;
use crate::ui::{UiFrame, truncate_to_width};

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    shown_at: Option<Instant>,
}

/// FIFO of pending messages. The head stays up for `duration` after it
/// first becomes visible; pushing past `capacity` drops the oldest entry.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    queue: VecDeque<Toast>,
    duration: Duration,
    capacity: usize,
}

impl ToastQueue {
    pub fn new(duration: Duration, capacity: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            duration,
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(%message, "queued notification");
        if self.queue.len() == self.capacity {
            self.queue.pop_front();
        }
        self.queue.push_back(Toast {
            message,
            shown_at: None,
        });
    }

    /// Expires the head once its time is up and stamps the next one.
    /// Returns whether the visible message changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if let Some(head) = self.queue.front()
            && let Some(shown_at) = head.shown_at
            && now.saturating_duration_since(shown_at) >= self.duration
        {
            self.queue.pop_front();
            changed = true;
        }
        if let Some(head) = self.queue.front_mut()
            && head.shown_at.is_none()
        {
            head.shown_at = Some(now);
            changed = true;
        }
        changed
    }

    pub fn current(&self) -> Option<&str> {
        self.queue
            .front()
            .filter(|toast| toast.shown_at.is_some())
            .map(|toast| toast.message.as_str())
    }

    /// Every queued message, oldest first, shown or not.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(|toast| toast.message.as_str())
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Draws the visible message in the bottom-right corner of `area`.
    pub fn render(&self, frame: &mut UiFrame<'_>, area: Rect) {
        let Some(message) = self.current() else {
            return;
        };
        if area.width < 6 || area.height < 3 {
            return;
        }
        let max_text = usize::from(area.width - 4);
        let text = truncate_to_width(message, max_text);
        let width = text.chars().count() as u16 + 4;
        let rect = Rect {
            x: area.x + area.width - width,
            y: area.y + area.height - 3,
            width,
            height: 3,
        };
        let style = Style::default().bg(theme::toast_bg()).fg(theme::toast_fg());
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(format!(" {text}"))
                .style(style)
                .block(Block::bordered().style(style)),
            rect,
        );
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(Duration::from_millis(TOAST_DURATION_MS), TOAST_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    #[test]
    fn head_expires_then_next_is_shown() {
        let mut toasts = ToastQueue::new(Duration::from_secs(3), 8);
        let t0 = Instant::now();
        toasts.push("first");
        toasts.push("second");
        assert_eq!(toasts.current(), None);
        assert!(toasts.tick(t0));
        assert_eq!(toasts.current(), Some("first"));
        assert!(!toasts.tick(t0 + Duration::from_secs(2)));
        assert!(toasts.tick(t0 + Duration::from_secs(3)));
        assert_eq!(toasts.current(), Some("second"));
        assert!(toasts.tick(t0 + Duration::from_secs(6)));
        assert_eq!(toasts.current(), None);
        assert!(toasts.is_empty());
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut toasts = ToastQueue::new(Duration::from_secs(3), 2);
        toasts.push("a");
        toasts.push("b");
        toasts.push("c");
        assert_eq!(toasts.len(), 2);
        toasts.tick(Instant::now());
        assert_eq!(toasts.current(), Some("b"));
    }

    #[test]
    fn renders_in_bottom_right_corner() {
        let area = Rect::new(0, 0, 30, 10);
        let mut buffer = Buffer::empty(area);
        let mut toasts = ToastQueue::default();
        toasts.push("Hi");
        toasts.tick(Instant::now());
        {
            let mut frame = UiFrame::from_parts(area, &mut buffer);
            toasts.render(&mut frame, area);
        }
        // " Hi" inside a 6-wide bordered box
        assert_eq!(buffer.cell((26, 8)).map(|c| c.symbol()), Some("H"));
        assert_eq!(buffer.cell((29, 9)).map(|c| c.symbol()), Some("┘"));
    }
}
