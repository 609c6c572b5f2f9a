//! Gesture interpretation: swipe thresholds, pointer clicks and drags.
//!
//! Swipes and drags share one rule: a horizontal travel strictly greater than the threshold
//! turns the page, rightward travel goes back and leftward travel goes forward.

use crate::book::Direction;

/// Minimum horizontal travel (exclusive) for a swipe or drag to count.
pub const SWIPE_THRESHOLD_PX: f32 = 50.0;

/// Approximate width of one terminal cell, used to express column travel in pixels.
pub const DEFAULT_CELL_WIDTH_PX: f32 = 10.0;

/// Which input channel produced a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputChannel {
    Control,
    Swipe,
    Drag,
    Keyboard,
}

/// A transient horizontal gesture; consumed as soon as its direction is known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeGesture {
    pub start_x: f32,
    pub end_x: f32,
}

impl SwipeGesture {
    pub fn new(start_x: f32, end_x: f32) -> Self {
        Self { start_x, end_x }
    }

    /// Signed travel, positive to the right.
    pub fn distance(&self) -> f32 {
        self.end_x - self.start_x
    }

    /// Direction implied by the gesture, or `None` when it stays within the threshold.
    pub fn direction(&self, threshold: f32) -> Option<Direction> {
        let distance = self.distance();
        if distance.abs() > threshold {
            if distance > 0.0 {
                Some(Direction::Previous)
            } else {
                Some(Direction::Next)
            }
        } else {
            None
        }
    }
}

/// On-screen controls that respond to clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Previous,
    Next,
    Music,
}

/// What lies under a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRegion {
    Book,
    Control(Control),
    Outside,
}

/// Result of a completed press/release pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutcome {
    Click(Control),
    Drag(SwipeGesture),
}

/// Pairs pointer presses with releases.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    cell_width_px: f32,
    pressed: Option<(u16, HitRegion)>,
}

impl PointerTracker {
    pub fn new(cell_width_px: f32) -> Self {
        Self {
            cell_width_px,
            pressed: None,
        }
    }

    pub fn press(&mut self, column: u16, region: HitRegion) {
        self.pressed = Some((column, region));
    }

    /// A click needs press and release on the same control; a drag needs a press on the book.
    pub fn release(&mut self, column: u16, region: HitRegion) -> Option<PointerOutcome> {
        let (start_column, origin) = self.pressed.take()?;
        match origin {
            HitRegion::Control(control) if region == HitRegion::Control(control) => {
                Some(PointerOutcome::Click(control))
            }
            HitRegion::Book => Some(PointerOutcome::Drag(SwipeGesture::new(
                f32::from(start_column) * self.cell_width_px,
                f32::from(column) * self.cell_width_px,
            ))),
            _ => None,
        }
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_WIDTH_PX)
    }
}
