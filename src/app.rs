//! Application orchestration layer
//!
//! Owns the navigator and wires every input channel, the visual effects, and the audio
//! controller around it. All page changes go through [`Application::navigate`], so the
//! animation lock applies to keys, clicks, swipes and drags alike.

use crate::audio::{chord_gain, AudioController, SharedSink};
use crate::book::{Book, Direction, PageNavigator, PageTurn};
use crate::config::CardConfig;
use crate::effects::{intro_level, LightField, RevealSchedule, INITIAL_REVEAL_DELAY};
use crate::error::Result;
use crate::input::{
    spawn_input_thread, Control, InputAction, InputChannel, PointerOutcome, PointerTracker,
    SwipeGesture, SwipeSettings,
};
use crate::render::{FlipFrame, LightSprite, MusicView, UIRenderer, ViewState};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::{interval, Duration, Instant, Interval, MissedTickBehavior};

/// Redraw cadence while idle; keeps lights and fades moving.
const FRAME_INTERVAL: Duration = Duration::from_millis(33);
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Application orchestrator
pub struct Application {
    book: Book,
    navigator: PageNavigator,
    last_turn: Option<PageTurn>,
    view_state: ViewState,
    reveal: RevealSchedule,
    lights: LightField,
    started: Instant,
    pointer: PointerTracker,
    swipe_threshold: f32,
    swipe_settings: SwipeSettings,
    audio: AudioController,
    ui_renderer: Box<dyn UIRenderer>,
}

impl Application {
    /// Build the card from a validated configuration.
    pub fn new(
        config: &CardConfig,
        ui_renderer: Box<dyn UIRenderer>,
        sink: SharedSink,
    ) -> Result<Self> {
        let book = config.book()?;
        let navigator = PageNavigator::new(book.len(), config.lock_duration());
        let (width, height) = ui_renderer.get_terminal_size()?;

        let first_page = book.page(navigator.current_page()).unwrap_or(&book.pages()[0]);
        let view_state = ViewState::new(first_page, navigator.state(), width, height);

        let started = Instant::now();
        let reveal =
            RevealSchedule::start_after(started, INITIAL_REVEAL_DELAY, first_page.paragraphs.len());

        let mut rng = match config.effects.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let lights = LightField::generate(config.effects.light_count, &mut rng);

        let audio = AudioController::new(&config.audio_settings(), sink);

        info!(
            "card ready: {} pages, lock {:?}",
            book.len(),
            navigator.lock_duration()
        );

        Ok(Self {
            book,
            navigator,
            last_turn: None,
            view_state,
            reveal,
            lights,
            started,
            pointer: PointerTracker::new(config.navigation.cell_width_px),
            swipe_threshold: config.navigation.swipe_threshold_px,
            swipe_settings: config.swipe_settings(),
            audio,
            ui_renderer,
        })
    }

    /// Run until the user quits or input closes.
    pub async fn run(&mut self) -> Result<()> {
        self.ui_renderer.initialize()?;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let input_handle = spawn_input_thread(
            tx,
            Arc::clone(&shutdown),
            INPUT_POLL_INTERVAL,
            self.swipe_settings,
        );

        let mut frames = interval(FRAME_INTERVAL);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let result = self.event_loop(&mut rx, &mut frames).await;

        shutdown.store(true, Ordering::SeqCst);
        drop(rx);
        if input_handle.join().is_err() {
            warn!("input thread panicked");
        }

        self.audio.shutdown().await;
        self.ui_renderer.cleanup()?;
        result
    }

    async fn event_loop(
        &mut self,
        rx: &mut UnboundedReceiver<InputAction>,
        frames: &mut Interval,
    ) -> Result<()> {
        loop {
            tokio::select! {
                maybe_action = rx.recv() => match maybe_action {
                    Some(action) => {
                        if !self.handle_action(action, Instant::now()).await? {
                            return Ok(());
                        }
                    }
                    None => {
                        debug!("input channel closed");
                        return Ok(());
                    }
                },
                _ = frames.tick() => self.supervise_music().await,
            }

            self.render_frame(Instant::now())?;
        }
    }

    /// Apply one input action. Returns false when the application should quit.
    pub async fn handle_action(&mut self, action: InputAction, now: Instant) -> Result<bool> {
        match action {
            InputAction::Quit => return Ok(false),

            InputAction::Navigate { direction, channel } => {
                self.navigate(direction, channel, now);
            }

            InputAction::Swipe(gesture) => {
                self.gesture(gesture, InputChannel::Swipe, now);
            }

            InputAction::PointerDown { column, row } => {
                let region = self.view_state.layout().hit_test(column, row);
                self.pointer.press(column, region);
            }

            InputAction::PointerUp { column, row } => {
                let region = self.view_state.layout().hit_test(column, row);
                match self.pointer.release(column, region) {
                    Some(PointerOutcome::Click(Control::Previous)) => {
                        self.navigate(Direction::Previous, InputChannel::Control, now);
                    }
                    Some(PointerOutcome::Click(Control::Next)) => {
                        self.navigate(Direction::Next, InputChannel::Control, now);
                    }
                    Some(PointerOutcome::Click(Control::Music)) => self.toggle_music().await,
                    Some(PointerOutcome::Drag(gesture)) => {
                        self.gesture(gesture, InputChannel::Drag, now);
                    }
                    None => {}
                }
            }

            InputAction::ToggleMusic => self.toggle_music().await,

            InputAction::Resize { width, height } => {
                if self.view_state.update_terminal_size(width, height) {
                    debug!("terminal resized to {}x{}", width, height);
                }
            }

            InputAction::NoAction => {}
        }
        Ok(true)
    }

    fn gesture(
        &mut self,
        gesture: SwipeGesture,
        channel: InputChannel,
        now: Instant,
    ) -> Option<PageTurn> {
        match gesture.direction(self.swipe_threshold) {
            Some(direction) => self.navigate(direction, channel, now),
            None => {
                debug!(
                    "{:?} of {:.0}px below threshold",
                    channel,
                    gesture.distance()
                );
                None
            }
        }
    }

    /// Request a page turn from any channel.
    pub fn navigate(
        &mut self,
        direction: Direction,
        channel: InputChannel,
        now: Instant,
    ) -> Option<PageTurn> {
        let turn = self.navigator.navigate(direction, now)?;
        debug!("page {} -> {} via {:?}", turn.from, turn.to, channel);

        if let Some(page) = self.book.page(turn.to) {
            self.view_state.show_page(page, self.navigator.state());
            self.reveal = RevealSchedule::start(now, page.paragraphs.len());
        }
        self.last_turn = Some(turn);
        self.audio.play_flip();
        Some(turn)
    }

    async fn supervise_music(&mut self) {
        if let Err(err) = self.audio.supervise().await {
            warn!("music fallback failed: {}", err);
            self.view_state.set_message("Music unavailable");
        }
    }

        async fn toggle_music(&mut self) {
        match self.audio.toggle().await {
            Ok(playing) => {
                debug!("music {}", if playing { "on" } else { "off" });
                self.view_state.clear_message();
            }
            Err(err) => {
                warn!("music toggle failed: {}", err);
                self.view_state.set_message("Music unavailable");
            }
        }
    }

    /// Advance time-driven state: the animation lock, fades, lights and the music indicator.
    pub fn refresh(&mut self, now: Instant) {
        self.navigator.poll(now);

        self.view_state.flip = match (self.navigator.flip_progress(now), self.last_turn) {
            (Some(progress), Some(turn)) => Some(FlipFrame {
                progress,
                direction: turn.direction,
            }),
            _ => None,
        };

        let since_start = now.saturating_duration_since(self.started);
        let intro = intro_level(since_start);
        self.view_state.intro = intro;
        self.view_state.paragraph_opacity = self
            .reveal
            .opacities(now)
            .into_iter()
            .map(|opacity| opacity * intro)
            .collect();

        let (width, height) = (self.view_state.width, self.view_state.height);
        let t = since_start.as_secs_f32();
        self.view_state.lights = self
            .lights
            .lights()
            .iter()
            .map(|light| {
                let (column, row) = light.cell(width, height);
                LightSprite {
                    column,
                    row,
                    color: light.color,
                    intensity: light.intensity(t),
                }
            })
            .collect();

        let status = self.audio.status();
        let level = match (status.current_note, status.note_started) {
            (Some(note), Some(started)) => {
                chord_gain(now.saturating_duration_since(started), note.duration)
            }
            _ => 0.0,
        };
        self.view_state.music = MusicView {
            playing: status.playing,
            backend: status.backend,
            note: status.current_note.map(|note| note.name),
            level,
        };
    }

    /// Refresh and draw one frame.
    pub fn render_frame(&mut self, now: Instant) -> Result<()> {
        self.refresh(now);
        self.ui_renderer.render(&self.view_state)
    }

    pub fn navigator(&self) -> &PageNavigator {
        &self.navigator
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    pub fn audio(&self) -> &AudioController {
        &self.audio
    }

    pub fn current_page(&self) -> usize {
        self.navigator.current_page()
    }
}
