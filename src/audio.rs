//! Audio: the page-flip sound and the background music toggle.
//!
//! Audio never affects navigation. Missing devices, players or files degrade to quieter
//! behaviour instead of surfacing errors to the user.

pub mod controller;
pub mod sink;
pub mod tone;

pub use controller::{
    AudioController, AudioSettings, BackendKind, ExternalPlayer, MusicBackend, MusicStatus,
    SharedMusicStatus, SyntheticMelody,
};
pub use sink::{shared, AudioSink, NullSink, RecordingSink, SharedSink, TerminalBell};
pub use tone::{chord_gain, Note, Sound, FLIP_SOUND, MELODY};
