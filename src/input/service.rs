//! High-level input service.
//!
//! Consumes coalesced raw events, runs them through the key map, and yields domain-level
//! `InputAction`s for the application loop. Pointer presses and releases are passed through
//! unchanged: only the application knows the layout needed to hit-test them.

use crate::book::Direction;
use crate::error::Result;
use crate::input::gesture::{InputChannel, SwipeGesture};
use crate::input::raw::{RawInputCollector, RawInputEvent, SwipeSettings};
use log::error;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// High-level input actions emitted by the input service.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    Navigate {
        direction: Direction,
        channel: InputChannel,
    },
    Swipe(SwipeGesture),
    PointerDown {
        column: u16,
        row: u16,
    },
    PointerUp {
        column: u16,
        row: u16,
    },
    ToggleMusic,
    Quit,
    Resize {
        width: u16,
        height: u16,
    },
    NoAction,
}

/// Keyboard bindings. Arrow keys turn pages; every other unbound key is ignored.
#[derive(Debug, Clone, Default)]
pub struct KeyMap;

impl KeyMap {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key_event: KeyEvent) -> InputAction {
        if key_event.kind != KeyEventKind::Press {
            return InputAction::NoAction;
        }

        let plain = !key_event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        match key_event.code {
            KeyCode::Left => InputAction::Navigate {
                direction: Direction::Previous,
                channel: InputChannel::Keyboard,
            },
            KeyCode::Right => InputAction::Navigate {
                direction: Direction::Next,
                channel: InputChannel::Keyboard,
            },
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                InputAction::Quit
            }
            KeyCode::Char('m') | KeyCode::Char('M') if plain => InputAction::ToggleMusic,
            KeyCode::Char('q') | KeyCode::Char('Q') if plain => InputAction::Quit,
            KeyCode::Esc => InputAction::Quit,
            _ => InputAction::NoAction,
        }
    }
}

/// Service responsible for producing high-level `InputAction`s from terminal events.
pub struct InputService {
    key_map: KeyMap,
    raw_input: RawInputCollector,
}

impl InputService {
    pub fn new() -> Self {
        Self::with_settings(SwipeSettings::default())
    }

    pub fn with_settings(settings: SwipeSettings) -> Self {
        Self {
            key_map: KeyMap::new(),
            raw_input: RawInputCollector::with_settings(settings),
        }
    }

    pub fn poll_actions(&mut self, timeout: Option<Duration>) -> Result<Vec<InputAction>> {
        let mut actions = Vec::new();

        if let Some(raw_event) = self.raw_input.poll_event(timeout)? {
            actions.extend(self.process_raw_event(raw_event));

            while let Some(extra_event) = self.raw_input.try_flush() {
                actions.extend(self.process_raw_event(extra_event));
            }
        }

        Ok(actions)
    }

    #[cfg(test)]
    pub fn process_event(&mut self, event: ratatui::crossterm::event::Event) -> Vec<InputAction> {
        self.raw_input.process_event(event);
        let mut actions = Vec::new();
        while let Some(raw_event) = self.raw_input.try_flush() {
            actions.extend(self.process_raw_event(raw_event));
        }
        actions
    }

    fn process_raw_event(&mut self, event: RawInputEvent) -> Option<InputAction> {
        let action = match event {
            RawInputEvent::Key(key_event) => self.key_map.handle_key_event(key_event),
            RawInputEvent::Resize { width, height } => InputAction::Resize { width, height },
            RawInputEvent::PointerDown { column, row } => InputAction::PointerDown { column, row },
            RawInputEvent::PointerUp { column, row } => InputAction::PointerUp { column, row },
            RawInputEvent::Swipe(gesture) => InputAction::Swipe(gesture),
        };

        match action {
            InputAction::NoAction => None,
            _ => Some(action),
        }
    }
}

impl Default for InputService {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn a blocking thread that polls for terminal events and forwards actions to the app loop.
pub fn spawn_input_thread(
    tx: UnboundedSender<InputAction>,
    shutdown: Arc<AtomicBool>,
    poll_interval: Duration,
    settings: SwipeSettings,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut service = InputService::with_settings(settings);
        while !shutdown.load(Ordering::SeqCst) {
            match service.poll_actions(Some(poll_interval)) {
                Ok(actions) => {
                    for action in actions {
                        if tx.send(action).is_err() {
                            return;
                        }
                    }
                }
                Err(err) => {
                    error!("Input thread error: {}", err);
                    break;
                }
            }
        }
    })
}
