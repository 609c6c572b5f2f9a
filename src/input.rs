//! Input subsystem.
//!
//! Raw crossterm events are collected on a dedicated thread, swipe bursts are coalesced, and
//! keys are mapped to actions. Gesture thresholds and pointer pairing live in [`gesture`].

pub mod gesture;
pub mod raw;
pub mod service;

// Public re-exports for convenience. Modules outside this crate should prefer importing
// from `crate::input` rather than reaching into submodules.
pub use gesture::{
    Control, HitRegion, InputChannel, PointerOutcome, PointerTracker, SwipeGesture,
    DEFAULT_CELL_WIDTH_PX, SWIPE_THRESHOLD_PX,
};
pub use raw::SwipeSettings;
pub use service::{spawn_input_thread, InputAction, InputService, KeyMap};
