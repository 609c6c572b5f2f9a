//! Staggered fade-in of a page's paragraphs, plus the one-off intro fade of the whole card.

use tokio::time::{Duration, Instant};

/// Time between a page being shown and its first paragraph becoming eligible to fade in.
pub const RESET_DELAY: Duration = Duration::from_millis(300);
/// Delay before the very first page starts its reveal.
pub const INITIAL_REVEAL_DELAY: Duration = Duration::from_millis(500);

const FIRST_PARAGRAPH_DELAY_SECS: f32 = 0.3;
const PARAGRAPH_STAGGER_SECS: f32 = 0.3;
const FADE_SECS: f32 = 1.0;

const INTRO_DELAY_SECS: f32 = 0.1;
const INTRO_FADE_SECS: f32 = 1.0;

/// Reveal timing for the paragraphs of the currently shown page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealSchedule {
    triggered_at: Instant,
    paragraphs: usize,
}

impl RevealSchedule {
    /// Schedule a reveal for a page shown at `now`.
    pub fn start(now: Instant, paragraphs: usize) -> Self {
        Self {
            triggered_at: now,
            paragraphs,
        }
    }

    /// Schedule a reveal that only begins after `delay`.
    pub fn start_after(now: Instant, delay: Duration, paragraphs: usize) -> Self {
        Self::start(now + delay, paragraphs)
    }

    fn fade_start_secs(index: usize) -> f32 {
        RESET_DELAY.as_secs_f32()
            + FIRST_PARAGRAPH_DELAY_SECS
            + PARAGRAPH_STAGGER_SECS * index as f32
    }

    /// Opacity of paragraph `index` at `now`, in `[0, 1]`.
    pub fn opacity(&self, index: usize, now: Instant) -> f32 {
        if index >= self.paragraphs {
            return 0.0;
        }
        let elapsed = now.saturating_duration_since(self.triggered_at).as_secs_f32();
        let begin = Self::fade_start_secs(index);
        ((elapsed - begin) / FADE_SECS).clamp(0.0, 1.0)
    }

    pub fn opacities(&self, now: Instant) -> Vec<f32> {
        (0..self.paragraphs)
            .map(|index| self.opacity(index, now))
            .collect()
    }
}

/// Opacity of the whole card `since_start` after launch.
pub fn intro_level(since_start: Duration) -> f32 {
    ((since_start.as_secs_f32() - INTRO_DELAY_SECS) / INTRO_FADE_SECS).clamp(0.0, 1.0)
}
