//! Low-level input collection: crossterm polling, horizontal-scroll coalescing, and translation
//! into primitive events that the higher-level input service can consume.
//!
//! Terminals have no touch events. A trackpad two-finger swipe arrives as a burst of
//! horizontal scroll ticks, so the ticks of one burst are summed into a single
//! [`SwipeGesture`].

use crate::error::Result;
use crate::input::gesture::SwipeGesture;
use ratatui::crossterm::event::{self, Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Default quiet period that ends a swipe burst.
pub const DEFAULT_SWIPE_WINDOW_MS: u64 = 120;
/// Pixels contributed by one horizontal scroll tick.
pub const DEFAULT_SCROLL_TICK_PX: f32 = 20.0;
/// Poll timeout used when the caller does not provide one.
const DEFAULT_POLL_TIMEOUT_MS: u64 = 50;

/// Horizontal direction of a scroll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

/// Low-level events surfaced by the raw input collector.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInputEvent {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
    PointerDown { column: u16, row: u16 },
    PointerUp { column: u16, row: u16 },
    Swipe(SwipeGesture),
}

/// Tunables for turning scroll bursts into swipes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeSettings {
    pub window: Duration,
    pub tick_px: f32,
}

impl Default for SwipeSettings {
    fn default() -> Self {
        Self {
            window: Duration::from_millis(DEFAULT_SWIPE_WINDOW_MS),
            tick_px: DEFAULT_SCROLL_TICK_PX,
        }
    }
}

/// Aggregates a burst of horizontal scroll ticks into one gesture.
#[derive(Debug, Clone)]
pub struct SwipeCoalescer {
    settings: SwipeSettings,
    pending: Option<PendingSwipe>,
}

#[derive(Debug, Clone)]
struct PendingSwipe {
    direction: SwipeDirection,
    ticks: u32,
    last_event: Instant,
}

impl SwipeCoalescer {
    pub fn new(settings: SwipeSettings) -> Self {
        Self {
            settings,
            pending: None,
        }
    }

    /// Register a scroll tick, returning a previous burst that ended because the direction flipped.
    pub fn push(&mut self, direction: SwipeDirection, now: Instant) -> Option<SwipeGesture> {
        match self.pending {
            Some(ref mut pending) if pending.direction == direction => {
                pending.ticks = pending.ticks.saturating_add(1);
                pending.last_event = now;
                None
            }
            _ => {
                let flushed = self.flush();
                self.pending = Some(PendingSwipe {
                    direction,
                    ticks: 1,
                    last_event: now,
                });
                flushed
            }
        }
    }

    /// Flush the burst once the quiet window has passed.
    pub fn flush_if_stale(&mut self, now: Instant) -> Option<SwipeGesture> {
        if let Some(pending) = &self.pending {
            if now.duration_since(pending.last_event) >= self.settings.window {
                return self.flush();
            }
        }
        None
    }

    /// Flush the burst immediately.
    pub fn flush(&mut self) -> Option<SwipeGesture> {
        let tick_px = self.settings.tick_px;
        self.pending.take().map(|pending| {
            let travel = pending.ticks as f32 * tick_px;
            // ScrollLeft pulls the content rightwards, like a finger moving right.
            let end_x = match pending.direction {
                SwipeDirection::Left => travel,
                SwipeDirection::Right => -travel,
            };
            SwipeGesture::new(0.0, end_x)
        })
    }
}

/// Collector that polls crossterm for events and applies swipe coalescing.
#[derive(Debug)]
pub struct RawInputCollector {
    coalescer: SwipeCoalescer,
    pending_events: VecDeque<RawInputEvent>,
}

impl RawInputCollector {
    pub fn new() -> Self {
        Self::with_settings(SwipeSettings::default())
    }

    pub fn with_settings(settings: SwipeSettings) -> Self {
        Self {
            coalescer: SwipeCoalescer::new(settings),
            pending_events: VecDeque::new(),
        }
    }

    /// Feed one crossterm event into the queue.
    pub fn process_event(&mut self, event: Event) {
        self.enqueue_event(event, Instant::now());
    }

    /// Pop the next queued event, flushing a finished swipe burst first.
    pub fn try_flush(&mut self) -> Option<RawInputEvent> {
        self.coalescer
            .flush_if_stale(Instant::now())
            .map(RawInputEvent::Swipe)
            .or_else(|| self.pending_events.pop_front())
    }

    /// Retrieve the next raw input event, blocking up to `timeout`.
    pub fn poll_event(&mut self, timeout: Option<Duration>) -> Result<Option<RawInputEvent>> {
        if let Some(event) = self.try_flush() {
            return Ok(Some(event));
        }

        let poll_timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS));

        if !event::poll(poll_timeout)? {
            return Ok(self.try_flush());
        }

        let event = event::read()?;
        self.process_event(event);
        Ok(self.pending_events.pop_front())
    }

    fn enqueue_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key_event) => {
                self.flush_pending_swipe();
                self.pending_events.push_back(RawInputEvent::Key(key_event));
            }
            Event::Resize(width, height) => {
                self.flush_pending_swipe();
                self.pending_events
                    .push_back(RawInputEvent::Resize { width, height });
            }
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event, now),
            _ => {}
        }
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent, now: Instant) {
        let MouseEvent {
            kind, column, row, ..
        } = mouse_event;

        let direction = match kind {
            MouseEventKind::ScrollLeft => SwipeDirection::Left,
            MouseEventKind::ScrollRight => SwipeDirection::Right,
            MouseEventKind::Down(MouseButton::Left) => {
                self.flush_pending_swipe();
                self.pending_events
                    .push_back(RawInputEvent::PointerDown { column, row });
                return;
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.flush_pending_swipe();
                self.pending_events
                    .push_back(RawInputEvent::PointerUp { column, row });
                return;
            }
            _ => return,
        };

        if let Some(gesture) = self.coalescer.push(direction, now) {
            self.pending_events.push_back(RawInputEvent::Swipe(gesture));
        }
    }

    fn flush_pending_swipe(&mut self) {
        if let Some(gesture) = self.coalescer.flush() {
            self.pending_events.push_back(RawInputEvent::Swipe(gesture));
        }
    }
}

impl Default for RawInputCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    fn mouse(kind: MouseEventKind, column: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row: 3,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn settings(window_ms: u64) -> SwipeSettings {
        SwipeSettings {
            window: Duration::from_millis(window_ms),
            tick_px: 20.0,
        }
    }

    #[test]
    fn accumulates_ticks_within_window() {
        let mut coalescer = SwipeCoalescer::new(settings(10));
        let now = Instant::now();

        assert!(coalescer.push(SwipeDirection::Right, now).is_none());
        assert!(coalescer
            .push(SwipeDirection::Right, now + Duration::from_millis(4))
            .is_none());
        assert!(coalescer
            .push(SwipeDirection::Right, now + Duration::from_millis(8))
            .is_none());

        assert!(coalescer
            .flush_if_stale(now + Duration::from_millis(12))
            .is_none());
        let gesture = coalescer
            .flush_if_stale(now + Duration::from_millis(18))
            .unwrap();
        assert_eq!(gesture.distance(), -60.0);
        assert!(coalescer.flush().is_none());
    }

    #[test]
    fn flushes_on_direction_change() {
        let mut coalescer = SwipeCoalescer::new(settings(10));
        let now = Instant::now();

        coalescer.push(SwipeDirection::Left, now);
        coalescer.push(SwipeDirection::Left, now + Duration::from_millis(2));
        let flushed = coalescer
            .push(SwipeDirection::Right, now + Duration::from_millis(3))
            .unwrap();
        assert_eq!(flushed.distance(), 40.0);

        let rest = coalescer.flush().unwrap();
        assert_eq!(rest.distance(), -20.0);
    }

    #[test]
    fn pointer_events_flush_pending_swipe_first() {
        let mut collector = RawInputCollector::with_settings(settings(1_000));

        collector.process_event(mouse(MouseEventKind::ScrollLeft, 0));
        collector.process_event(mouse(MouseEventKind::Down(MouseButton::Left), 12));

        let first = collector.try_flush().unwrap();
        assert_eq!(first, RawInputEvent::Swipe(SwipeGesture::new(0.0, 20.0)));
        let second = collector.try_flush().unwrap();
        assert_eq!(second, RawInputEvent::PointerDown { column: 12, row: 3 });
        assert!(collector.try_flush().is_none());
    }

    #[test]
    fn ignores_other_mouse_buttons_and_vertical_scroll() {
        let mut collector = RawInputCollector::new();
        collector.process_event(mouse(MouseEventKind::Down(MouseButton::Right), 1));
        collector.process_event(mouse(MouseEventKind::ScrollDown, 1));
        collector.process_event(mouse(MouseEventKind::Moved, 1));
        assert!(collector.try_flush().is_none());
    }

    #[test]
    fn queues_key_and_resize_events() {
        let mut collector = RawInputCollector::new();
        collector.process_event(Event::Key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE)));
        collector.process_event(Event::Resize(100, 30));

        match collector.try_flush().unwrap() {
            RawInputEvent::Key(key) => assert_eq!(key.code, KeyCode::Right),
            other => panic!("expected key event, got {:?}", other),
        }
        assert_eq!(
            collector.try_flush().unwrap(),
            RawInputEvent::Resize {
                width: 100,
                height: 30
            }
        );
    }
}
