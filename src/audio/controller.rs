//! Background music controller.
//!
//! Music is a simple play/pause toggle, independent of page navigation. When an audio file and
//! a player command are configured, the file is played by an external player process; when the
//! file is missing or the player cannot be spawned, the controller falls back to the
//! synthesized melody.

use crate::audio::sink::SharedSink;
use crate::audio::tone::{Note, Sound, LOOP_GAP, MELODY};
use crate::error::{CardError, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Default music volume.
pub const DEFAULT_VOLUME: f32 = 0.3;

/// Which backend is producing music.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    ExternalPlayer,
    Synthetic,
}

/// Music state shared with the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MusicStatus {
    pub playing: bool,
    pub backend: Option<BackendKind>,
    pub current_note: Option<Note>,
    pub note_started: Option<Instant>,
}

pub type SharedMusicStatus = Arc<Mutex<MusicStatus>>;

/// Settings the controller is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSettings {
    pub flip_sound: bool,
    pub volume: f32,
    pub music_file: Option<PathBuf>,
    /// Player command line; `{file}` and `{volume}` (percent) are substituted.
    pub player: Vec<String>,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            flip_sound: true,
            volume: DEFAULT_VOLUME,
            music_file: None,
            player: default_player_command(),
        }
    }
}

pub fn default_player_command() -> Vec<String> {
    ["mpv", "--no-video", "--really-quiet", "--loop=inf", "--volume={volume}", "{file}"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// A source of background music that can be started and stopped.
#[async_trait]
pub trait MusicBackend: Send {
    fn kind(&self) -> BackendKind;
    async fn start(&mut self) -> Result<()>;
    async fn stop(&mut self) -> Result<()>;

    /// Whether playback ended without `stop` being called.
    fn has_exited(&mut self) -> bool {
        false
    }
}

/// Plays an audio file through an external player process.
pub struct ExternalPlayer {
    program: String,
    args: Vec<String>,
    child: Option<Child>,
}

impl ExternalPlayer {
    pub fn new(command: &[String], file: &Path, volume: f32) -> Result<Self> {
        let (program, rest) = command
            .split_first()
            .ok_or_else(|| CardError::audio("player command is empty"))?;

        let file_arg = file.display().to_string();
        let volume_arg = format!("{}", (volume.clamp(0.0, 1.0) * 100.0).round() as u32);
        let mut has_file = false;
        let mut args: Vec<String> = rest
            .iter()
            .map(|arg| {
                has_file |= arg.contains("{file}");
                arg.replace("{file}", &file_arg)
                    .replace("{volume}", &volume_arg)
            })
            .collect();
        if !has_file {
            args.push(file_arg);
        }

        Ok(Self {
            program: program.clone(),
            args,
            child: None,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

#[async_trait]
impl MusicBackend for ExternalPlayer {
    fn kind(&self) -> BackendKind {
        BackendKind::ExternalPlayer
    }

    async fn start(&mut self) -> Result<()> {
        if self.child.is_some() {
            return Ok(());
        }
        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| {
                CardError::audio(format!("failed to start player `{}`: {}", self.program, err))
            })?;
        debug!("started music player `{}`", self.program);
        self.child = Some(child);
        Ok(())
    }

    fn has_exited(&mut self) -> bool {
        let status = match self.child.as_mut() {
            Some(child) => child.try_wait(),
            None => return false,
        };
        match status {
            Ok(None) => false,
            Ok(Some(status)) => {
                debug!("music player `{}` exited: {}", self.program, status);
                self.child = None;
                true
            }
            Err(err) => {
                debug!("cannot poll music player `{}`: {}", self.program, err);
                self.child = None;
                true
            }
        }
    }

    async fn stop(&mut self) -> Result<()> {
        if let Some(mut child) = self.child.take() {
            if let Err(err) = child.kill().await {
                debug!("music player already gone: {}", err);
            }
        }
        Ok(())
    }
}

/// Loops the synthesized melody on a tokio task.
pub struct SyntheticMelody {
    sink: SharedSink,
    status: SharedMusicStatus,
    task: Option<JoinHandle<()>>,
}

impl SyntheticMelody {
    pub fn new(sink: SharedSink, status: SharedMusicStatus) -> Self {
        Self {
            sink,
            status,
            task: None,
        }
    }
}

async fn melody_loop(sink: SharedSink, status: SharedMusicStatus) {
    loop {
        for note in MELODY.iter() {
            {
                let mut status = status.lock();
                status.current_note = Some(*note);
                status.note_started = Some(Instant::now());
            }
            if let Err(err) = sink.lock().play(&Sound::chord(note)) {
                debug!("chord {} not played: {}", note.name, err);
            }
            tokio::time::sleep(note.duration).await;
        }
        {
            let mut status = status.lock();
            status.current_note = None;
            status.note_started = None;
        }
        tokio::time::sleep(LOOP_GAP).await;
    }
}

#[async_trait]
impl MusicBackend for SyntheticMelody {
    fn kind(&self) -> BackendKind {
        BackendKind::Synthetic
    }

    async fn start(&mut self) -> Result<()> {
        if self.task.is_none() {
            let sink = Arc::clone(&self.sink);
            let status = Arc::clone(&self.status);
            self.task = Some(tokio::spawn(melody_loop(sink, status)));
        }
        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
        }
        let mut status = self.status.lock();
        status.current_note = None;
        status.note_started = None;
        Ok(())
    }
}

/// Owns the flip sound and the music toggle.
pub struct AudioController {
    sink: SharedSink,
    status: SharedMusicStatus,
    flip_sound: bool,
    primary: Option<Box<dyn MusicBackend>>,
    fallback: SyntheticMelody,
    active: Option<BackendKind>,
}

impl AudioController {
    pub fn new(settings: &AudioSettings, sink: SharedSink) -> Self {
        let primary: Option<Box<dyn MusicBackend>> = match &settings.music_file {
            Some(path) if path.is_file() => {
                match ExternalPlayer::new(&settings.player, path, settings.volume) {
                    Ok(player) => Some(Box::new(player)),
                    Err(err) => {
                        warn!("music player unavailable: {}", err);
                        None
                    }
                }
            }
            Some(path) => {
                info!(
                    "music file {} not found; using synthesized melody",
                    path.display()
                );
                None
            }
            None => None,
        };
        Self::with_backend(settings.flip_sound, sink, primary)
    }

    /// Build a controller around an explicit primary backend.
    pub fn with_backend(
        flip_sound: bool,
        sink: SharedSink,
        primary: Option<Box<dyn MusicBackend>>,
    ) -> Self {
        let status = SharedMusicStatus::default();
        let fallback = SyntheticMelody::new(Arc::clone(&sink), Arc::clone(&status));
        Self {
            sink,
            status,
            flip_sound,
            primary,
            fallback,
            active: None,
        }
    }

    /// Play the page-flip sound. Sink failures are swallowed.
    pub fn play_flip(&self) {
        if !self.flip_sound {
            return;
        }
        if let Err(err) = self.sink.lock().play(&Sound::page_flip()) {
            debug!("page flip sound skipped: {}", err);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.active.is_some()
    }

    pub fn status(&self) -> MusicStatus {
        self.status.lock().clone()
    }

    /// Toggle music; returns whether music is playing afterwards.
    pub async fn toggle(&mut self) -> Result<bool> {
        if self.is_playing() {
            self.pause().await?;
        } else {
            self.play().await?;
        }
        Ok(self.is_playing())
    }

    pub async fn play(&mut self) -> Result<()> {
        if self.active.is_some() {
            return Ok(());
        }

        let mut kind = None;
        if let Some(primary) = self.primary.as_mut() {
            match primary.start().await {
                Ok(()) => kind = Some(primary.kind()),
                Err(err) => warn!("{}; falling back to synthesized melody", err),
            }
        }
        let kind = match kind {
            Some(kind) => kind,
            None => {
                self.fallback.start().await?;
                BackendKind::Synthetic
            }
        };

        self.active = Some(kind);
        let mut status = self.status.lock();
        status.playing = true;
        status.backend = Some(kind);
        Ok(())
    }

    /// Switch to the melody when the external player quit on its own.
    pub async fn supervise(&mut self) -> Result<()> {
        if self.active != Some(BackendKind::ExternalPlayer) {
            return Ok(());
        }
        let exited = self
            .primary
            .as_mut()
            .map_or(false, |primary| primary.has_exited());
        if !exited {
            return Ok(());
        }

        warn!("music player exited; falling back to synthesized melody");
        self.fallback.start().await?;
        self.active = Some(BackendKind::Synthetic);
        self.status.lock().backend = Some(BackendKind::Synthetic);
        Ok(())
    }

    pub async fn pause(&mut self) -> Result<()> {
        match self.active.take() {
            Some(BackendKind::Synthetic) => self.fallback.stop().await?,
            Some(BackendKind::ExternalPlayer) => {
                if let Some(primary) = self.primary.as_mut() {
                    primary.stop().await?;
                }
            }
            None => {}
        }
        let mut status = self.status.lock();
        status.playing = false;
        status.backend = None;
        Ok(())
    }

    /// Stop whatever is playing before exit.
    pub async fn shutdown(&mut self) {
        if let Err(err) = self.pause().await {
            debug!("audio shutdown: {}", err);
        }
    }
}
