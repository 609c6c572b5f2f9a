//! Rendering subsystem: view state, themes and the ratatui terminal renderer.

pub mod renderer;
pub mod state;
pub mod terminal;
pub mod theme;

pub use renderer::UIRenderer;
pub use state::{CardLayout, FlipFrame, LightSprite, MusicView, ViewState};
pub use terminal::{draw_card, TerminalUI};
pub use theme::ColorTheme;

#[cfg(test)]
pub use renderer::tests::MockUIRenderer;
