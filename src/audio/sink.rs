//! Audio output sinks.
//!
//! A terminal cannot synthesize waveforms, so the stock sink rings the terminal bell for the
//! page-flip sound and leaves the melody to the on-screen "now playing" indicator.

use crate::audio::tone::Sound;
use crate::error::Result;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Destination for short sounds.
pub trait AudioSink: Send {
    fn play(&mut self, sound: &Sound) -> Result<()>;
}

/// Sink shared between the application loop and the melody task.
pub type SharedSink = Arc<Mutex<Box<dyn AudioSink>>>;

pub fn shared(sink: impl AudioSink + 'static) -> SharedSink {
    Arc::new(Mutex::new(Box::new(sink)))
}

/// Rings the terminal bell for page flips.
pub struct TerminalBell<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl TerminalBell<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> AudioSink for TerminalBell<W> {
    fn play(&mut self, sound: &Sound) -> Result<()> {
        if sound.is_page_flip() {
            self.out.write_all(b"\x07")?;
            self.out.flush()?;
        }
        Ok(())
    }
}

/// Drops every sound.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _sound: &Sound) -> Result<()> {
        Ok(())
    }
}

/// Records every sound it is asked to play.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    played: Arc<Mutex<Vec<Sound>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the recorded sounds, usable after the sink has been boxed.
    pub fn log(&self) -> Arc<Mutex<Vec<Sound>>> {
        Arc::clone(&self.played)
    }
}

impl AudioSink for RecordingSink {
    fn play(&mut self, sound: &Sound) -> Result<()> {
        self.played.lock().push(*sound);
        Ok(())
    }
}
