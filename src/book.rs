//! The book: page content and the navigation state machine that turns its pages.

pub mod navigator;
pub mod pages;

pub use navigator::{
    Direction, NavigationState, PageNavigator, PageTurn, DEFAULT_LOCK_DURATION,
};
pub use pages::{Book, PageContent};
