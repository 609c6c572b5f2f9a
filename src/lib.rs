//! # cardbook - Terminal Greeting Card
//!
//! An animated Christmas card drawn in the terminal as a small book. Pages turn with the
//! arrow keys, the on-screen controls, horizontal swipes or mouse drags; every channel feeds
//! a single navigator that ignores requests while a page-turn animation is running.
//!
//! ## Architecture
//!
//! - [`book`] - Page content and the page navigation state machine
//! - [`input`] - Terminal events, swipe coalescing, and pointer gestures
//! - [`effects`] - Twinkling lights and staggered paragraph reveals
//! - [`audio`] - Page-flip sound and the background music toggle
//! - [`render`] - View state, themes, and the ratatui renderer
//! - [`config`] - Defaults and TOML configuration
//! - [`app`] - Wires everything around the navigator
//! - [`error`] - Centralized error types and handling

// Core modules
pub mod book;
pub mod error;

// Subsystems
pub mod audio;
pub mod config;
pub mod effects;
pub mod input;
pub mod render;

pub mod app;

// Re-export commonly used types for convenience
pub use error::{CardError, Result};

// Public API surface for external usage
pub use app::Application;
pub use book::{Book, Direction, PageNavigator};
pub use config::CardConfig;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
