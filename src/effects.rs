//! Cosmetic effects triggered around page turns: twinkling lights and paragraph reveals.

pub mod lights;
pub mod reveal;

pub use lights::{Light, LightField, DEFAULT_LIGHT_COUNT, LIGHT_PALETTE};
pub use reveal::{intro_level, RevealSchedule, INITIAL_REVEAL_DELAY};
