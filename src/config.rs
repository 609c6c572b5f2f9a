//! Configuration: defaults, TOML loading and validation.
//!
//! File loading is available with the `config` feature (enabled by default). Without it the
//! card always runs with built-in defaults plus command-line overrides.
//!
//! ```toml
//! theme = "christmas"
//!
//! [navigation]
//! lock_ms = 800
//! swipe_threshold_px = 50.0
//!
//! [audio]
//! music_file = "~/Music/carol.mp3"
//! player = ["mpv", "--loop=inf", "{file}"]
//!
//! [[pages]]
//! title = "Season's Greetings"
//! paragraphs = ["Warm wishes", "from all of us"]
//! ```

use crate::audio::controller::{default_player_command, AudioSettings, DEFAULT_VOLUME};
use crate::book::{Book, PageContent, DEFAULT_LOCK_DURATION};
use crate::effects::DEFAULT_LIGHT_COUNT;
use crate::error::{CardError, Result};
use crate::input::raw::{DEFAULT_SCROLL_TICK_PX, DEFAULT_SWIPE_WINDOW_MS};
use crate::input::{SwipeSettings, DEFAULT_CELL_WIDTH_PX, SWIPE_THRESHOLD_PX};
use crate::render::ColorTheme;
use std::path::{Path, PathBuf};
use tokio::time::Duration;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct CardConfig {
    pub theme: String,
    pub navigation: NavigationConfig,
    pub effects: EffectsConfig,
    pub audio: AudioConfig,
    pub pages: Option<Vec<PageContent>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct NavigationConfig {
    pub lock_ms: u64,
    pub swipe_threshold_px: f32,
    pub cell_width_px: f32,
    pub scroll_tick_px: f32,
    pub swipe_window_ms: u64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct EffectsConfig {
    pub light_count: usize,
    /// Fixed seed for light placement; random when unset.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct AudioConfig {
    pub flip_sound: bool,
    pub volume: f32,
    pub music_file: Option<PathBuf>,
    pub player: Vec<String>,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            theme: "christmas".to_string(),
            navigation: NavigationConfig::default(),
            effects: EffectsConfig::default(),
            audio: AudioConfig::default(),
            pages: None,
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            lock_ms: DEFAULT_LOCK_DURATION.as_millis() as u64,
            swipe_threshold_px: SWIPE_THRESHOLD_PX,
            cell_width_px: DEFAULT_CELL_WIDTH_PX,
            scroll_tick_px: DEFAULT_SCROLL_TICK_PX,
            swipe_window_ms: DEFAULT_SWIPE_WINDOW_MS,
        }
    }
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            light_count: DEFAULT_LIGHT_COUNT,
            seed: None,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            flip_sound: true,
            volume: DEFAULT_VOLUME,
            music_file: None,
            player: default_player_command(),
        }
    }
}

impl CardConfig {
    /// Default location: `<config_dir>/cardbook/config.toml`.
    #[cfg(feature = "config")]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cardbook").join("config.toml"))
    }

    /// Load from an explicit path, or from the default location when it exists.
    #[cfg(feature = "config")]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) if !path.is_file() => {
                return Err(CardError::ConfigNotFound {
                    path: path.to_path_buf(),
                })
            }
            Some(path) => path.to_path_buf(),
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => path,
                None => {
                    log::debug!("no configuration file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let text = std::fs::read_to_string(&path)
            .map_err(|err| CardError::io(format!("reading {}", path.display()), err))?;
        let config = Self::from_toml_str(&text, &path)?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    #[cfg(not(feature = "config"))]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(_) => Err(CardError::config(
                "configuration files need the `config` feature",
            )),
            None => Ok(Self::default()),
        }
    }

    /// Parse and validate TOML text; `origin` is used in error messages.
    #[cfg(feature = "config")]
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|err| CardError::ConfigParse {
            path: origin.to_path_buf(),
            message: err.message().to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.navigation.lock_ms == 0 {
            return Err(CardError::config("navigation.lock_ms must be positive"));
        }
        if !(self.navigation.swipe_threshold_px > 0.0) {
            return Err(CardError::config(
                "navigation.swipe_threshold_px must be positive",
            ));
        }
        if !(self.navigation.cell_width_px > 0.0) || !(self.navigation.scroll_tick_px > 0.0) {
            return Err(CardError::config(
                "navigation.cell_width_px and navigation.scroll_tick_px must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(CardError::config("audio.volume must be between 0 and 1"));
        }
        if ColorTheme::named(&self.theme).is_none() {
            return Err(CardError::config(format!("unknown theme `{}`", self.theme)));
        }
        if matches!(&self.pages, Some(pages) if pages.is_empty()) {
            return Err(CardError::config("pages must not be empty"));
        }
        Ok(())
    }

    pub fn lock_duration(&self) -> Duration {
        Duration::from_millis(self.navigation.lock_ms)
    }

    pub fn swipe_settings(&self) -> SwipeSettings {
        SwipeSettings {
            window: Duration::from_millis(self.navigation.swipe_window_ms),
            tick_px: self.navigation.scroll_tick_px,
        }
    }

    pub fn audio_settings(&self) -> AudioSettings {
        AudioSettings {
            flip_sound: self.audio.flip_sound,
            volume: self.audio.volume,
            music_file: self.audio.music_file.clone(),
            player: self.audio.player.clone(),
        }
    }

    /// Configured theme, falling back to the default palette.
    pub fn color_theme(&self) -> ColorTheme {
        ColorTheme::named(&self.theme).unwrap_or_default()
    }

    /// Configured pages, or the built-in Christmas card.
    pub fn book(&self) -> Result<Book> {
        match &self.pages {
            Some(pages) => Book::new(pages.clone()),
            None => Ok(Book::christmas()),
        }
    }
}
