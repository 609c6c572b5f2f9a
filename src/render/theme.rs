//! Color theme and styling definitions using ratatui colors
//!
//! Faded text and twinkling lights are drawn by blending towards the background, so every
//! theme carries its key colors as RGB triples.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the card
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTheme {
    /// Screen background behind the book
    pub background: (u8, u8, u8),

    /// Page paper color
    pub page_bg: (u8, u8, u8),

    /// Paragraph text color at full opacity
    pub text: (u8, u8, u8),

    /// Page titles
    pub title: (u8, u8, u8),

    /// Book border and fold line
    pub ornament: Color,

    /// Enabled navigation controls
    pub control: Style,

    /// Disabled navigation controls
    pub control_disabled: Style,

    /// Music control while playing
    pub music_on: Style,

    /// Status line background
    pub status_bg: Color,

    /// Status line text
    pub status_fg: Color,

    /// Draw lights in their own colors (false renders them all white)
    pub colored_lights: bool,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self::christmas()
    }
}

pub(crate) fn rgb(color: (u8, u8, u8)) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

fn lerp_channel(from: u8, to: u8, t: f32) -> u8 {
    let from = f32::from(from);
    let to = f32::from(to);
    (from + (to - from) * t.clamp(0.0, 1.0)).round() as u8
}

/// Blend `from` towards `to` by `t` in `[0, 1]`.
pub fn blend(from: (u8, u8, u8), to: (u8, u8, u8), t: f32) -> Color {
    Color::Rgb(
        lerp_channel(from.0, to.0, t),
        lerp_channel(from.1, to.1, t),
        lerp_channel(from.2, to.2, t),
    )
}

impl ColorTheme {
    /// Deep green night with gold, crimson and white accents.
    pub fn christmas() -> Self {
        Self {
            background: (0x0b, 0x1f, 0x14),
            page_bg: (0xfd, 0xf6, 0xe3),
            text: (0x5a, 0x1a, 0x1a),
            title: (0xdc, 0x14, 0x3c),
            ornament: Color::Rgb(0xd4, 0xaf, 0x37),
            control: Style::default()
                .fg(Color::Rgb(0xff, 0xd7, 0x00))
                .add_modifier(Modifier::BOLD),
            control_disabled: Style::default().fg(Color::DarkGray),
            music_on: Style::default()
                .fg(Color::Rgb(0x22, 0x8b, 0x22))
                .add_modifier(Modifier::BOLD),
            status_bg: Color::Rgb(0x22, 0x8b, 0x22),
            status_fg: Color::White,
            colored_lights: true,
        }
    }

    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            background: (0, 0, 0),
            page_bg: (0, 0, 0),
            text: (0xff, 0xff, 0xff),
            title: (0xff, 0xff, 0xff),
            ornament: Color::White,
            control: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            control_disabled: Style::default().fg(Color::DarkGray),
            music_on: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::REVERSED),
            status_bg: Color::White,
            status_fg: Color::Black,
            colored_lights: false,
        }
    }

    /// Look up a theme by its configuration name.
    pub fn named(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "christmas" | "default" => Some(Self::christmas()),
            "monochrome" | "mono" => Some(Self::monochrome()),
            _ => None,
        }
    }

    /// Paragraph style at the given opacity.
    pub fn faded_text(&self, opacity: f32) -> Style {
        Style::default()
            .fg(blend(self.page_bg, self.text, opacity))
            .bg(rgb(self.page_bg))
    }

    /// Title style at the given opacity.
    pub fn faded_title(&self, opacity: f32) -> Style {
        Style::default()
            .fg(blend(self.page_bg, self.title, opacity))
            .bg(rgb(self.page_bg))
            .add_modifier(Modifier::BOLD)
    }

    /// Light color at the given intensity.
    pub fn light(&self, color: Color, intensity: f32) -> Color {
        let target = match color {
            Color::Rgb(r, g, b) if self.colored_lights => (r, g, b),
            _ => (0xff, 0xff, 0xff),
        };
        blend(self.background, target, intensity)
    }
}
