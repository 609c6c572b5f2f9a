//! UI renderer trait
//!
//! This module defines the `UIRenderer` trait for drawing the card and managing terminal
//! lifecycle hooks such as initialization and cleanup.

use crate::error::Result;
use crate::render::state::ViewState;

/// Core trait for UI rendering
pub trait UIRenderer {
    /// Render the current view state to the terminal
    ///
    /// This method should:
    /// - Draw the background lights and the book with the visible page
    /// - Draw the page-turn fold while a turn is animating
    /// - Draw the controls, greying out the disabled ones, and the page indicator
    /// - Update the status line
    fn render(&mut self, view_state: &ViewState) -> Result<()>;

    /// Initialize the terminal UI
    ///
    /// This method should:
    /// - Set up raw mode
    /// - Enable mouse capture
    /// - Enter the alternate screen
    fn initialize(&mut self) -> Result<()>;

    /// Clean up and restore terminal state
    fn cleanup(&mut self) -> Result<()>;

    /// Get current terminal dimensions
    fn get_terminal_size(&self) -> Result<(u16, u16)>; // (width, height)
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Mock UI renderer for testing
    ///
    /// Records render invocations and the last indicator drawn.
    pub struct MockUIRenderer {
        pub render_count: usize,
        pub terminal_size: (u16, u16),
        pub is_initialized: bool,
        pub last_indicator: Option<String>,
    }

    impl Default for MockUIRenderer {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockUIRenderer {
        pub fn new() -> Self {
            Self {
                render_count: 0,
                terminal_size: (80, 24),
                is_initialized: false,
                last_indicator: None,
            }
        }

        pub fn set_terminal_size(&mut self, width: u16, height: u16) {
            self.terminal_size = (width, height);
        }
    }

    impl UIRenderer for MockUIRenderer {
        fn render(&mut self, view_state: &ViewState) -> Result<()> {
            self.render_count += 1;
            self.last_indicator = Some(view_state.indicator.clone());
            Ok(())
        }

        fn initialize(&mut self) -> Result<()> {
            self.is_initialized = true;
            Ok(())
        }

        fn cleanup(&mut self) -> Result<()> {
            self.is_initialized = false;
            Ok(())
        }

        fn get_terminal_size(&self) -> Result<(u16, u16)> {
            Ok(self.terminal_size)
        }
    }

    #[test]
    fn test_mock_renderer_basic() {
        use crate::book::{Book, PageNavigator, DEFAULT_LOCK_DURATION};

        let book = Book::christmas();
        let nav = PageNavigator::new(book.len(), DEFAULT_LOCK_DURATION);
        let view_state = ViewState::new(book.page(1).unwrap(), nav.state(), 80, 24);
        let mut renderer = MockUIRenderer::new();

        assert!(!renderer.is_initialized);
        renderer.initialize().unwrap();
        assert!(renderer.is_initialized);

        renderer.render(&view_state).unwrap();
        assert_eq!(renderer.render_count, 1);
        assert_eq!(renderer.last_indicator.as_deref(), Some("1 / 4"));

        renderer.set_terminal_size(120, 30);
        assert_eq!(renderer.get_terminal_size().unwrap(), (120, 30));

        renderer.cleanup().unwrap();
        assert!(!renderer.is_initialized);
    }
}
