//! cardbook - an animated Christmas card for the terminal.

use anyhow::{Context, Result};
use cardbook::audio::{shared, NullSink, TerminalBell};
use cardbook::render::TerminalUI;
use cardbook::{Application, CardConfig};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "cardbook",
    version = cardbook::VERSION,
    about = "An animated Christmas card you page through in the terminal",
    long_about = "cardbook draws a small book of greetings. Turn pages with the arrow keys, \
                  the on-screen controls, horizontal scrolling or by dragging across the page."
)]
struct Cli {
    /// Configuration file (defaults to <config dir>/cardbook/config.toml when present)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Color theme: christmas or monochrome
    #[arg(short, long, value_name = "NAME")]
    theme: Option<String>,

    /// Audio file to play as background music
    #[arg(long, value_name = "PATH")]
    music: Option<PathBuf>,

    /// Disable all sound
    #[arg(long)]
    mute: bool,

    /// Write log output to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("cannot create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn build_config(cli: &Cli) -> Result<CardConfig> {
    let config = CardConfig::load(cli.config.as_deref())?;
    apply_overrides(cli, config)
}

/// Command-line flags win over the configuration file.
fn apply_overrides(cli: &Cli, mut config: CardConfig) -> Result<CardConfig> {
    if let Some(theme) = &cli.theme {
        config.theme = theme.clone();
    }
    if let Some(music) = &cli.music {
        config.audio.music_file = Some(music.clone());
    }
    if cli.mute {
        config.audio.flip_sound = false;
        config.audio.music_file = None;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let config = build_config(&cli)?;

    let sink = if cli.mute {
        shared(NullSink)
    } else {
        shared(TerminalBell::stdout())
    };

    let ui_renderer = Box::new(TerminalUI::with_theme(config.color_theme())?);
    let mut app = Application::new(&config, ui_renderer, sink)?;

    app.run().await?;

    Ok(())
}
