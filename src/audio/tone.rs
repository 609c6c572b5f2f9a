//! Sound definitions: the page-flip sweep and the looping Christmas melody.
//!
//! Each melody note is played as a triad (`f`, `1.25·f`, `1.5·f`) with a short linear attack
//! followed by an exponential decay.

use tokio::time::Duration;

/// An exponential frequency/gain sweep, handed to the sink as part of [`Sound::PageFlip`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    pub start_hz: f32,
    pub end_hz: f32,
    pub start_gain: f32,
    pub end_gain: f32,
    pub duration: Duration,
}

/// Short descending chirp played on every page turn.
pub const FLIP_SOUND: Sweep = Sweep {
    start_hz: 800.0,
    end_hz: 200.0,
    start_gain: 0.1,
    end_gain: 0.01,
    duration: Duration::from_millis(100),
};

fn exp_ramp(from: f32, to: f32, fraction: f32) -> f32 {
    from * (to / from).powf(fraction.clamp(0.0, 1.0))
}

/// One note of the melody.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub name: &'static str,
    pub frequency: f32,
    pub duration: Duration,
}

impl Note {
    const fn new(name: &'static str, frequency: f32, secs: u64) -> Self {
        Self {
            name,
            frequency,
            duration: Duration::from_secs(secs),
        }
    }

    /// Root, major third and fifth.
    pub fn chord(&self) -> [f32; 3] {
        [self.frequency, self.frequency * 1.25, self.frequency * 1.5]
    }
}

pub const MELODY: [Note; 8] = [
    Note::new("C4", 261.63, 1),
    Note::new("D4", 293.66, 1),
    Note::new("E4", 329.63, 1),
    Note::new("F4", 349.23, 1),
    Note::new("G4", 392.00, 2),
    Note::new("F4", 349.23, 1),
    Note::new("E4", 329.63, 1),
    Note::new("D4", 293.66, 2),
];

/// Silence between two passes of the melody.
pub const LOOP_GAP: Duration = Duration::from_secs(2);

const ATTACK_SECS: f32 = 0.1;
const PEAK_GAIN: f32 = 0.1;
const FLOOR_GAIN: f32 = 0.01;

/// Chord envelope `t` into a note lasting `duration`.
pub fn chord_gain(t: Duration, duration: Duration) -> f32 {
    let t = t.as_secs_f32();
    let total = duration.as_secs_f32();
    if t >= total {
        return 0.0;
    }
    if t < ATTACK_SECS {
        return PEAK_GAIN * t / ATTACK_SECS;
    }
    let decay = (total - ATTACK_SECS).max(f32::EPSILON);
    exp_ramp(PEAK_GAIN, FLOOR_GAIN, (t - ATTACK_SECS) / decay)
}

/// Something the audio sink is asked to play.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sound {
    PageFlip(Sweep),
    Chord {
        frequencies: [f32; 3],
        duration: Duration,
    },
}

impl Sound {
    pub fn page_flip() -> Self {
        Sound::PageFlip(FLIP_SOUND)
    }

    /// The triad for one melody note.
    pub fn chord(note: &Note) -> Self {
        Sound::Chord {
            frequencies: note.chord(),
            duration: note.duration,
        }
    }

    pub fn is_page_flip(&self) -> bool {
        matches!(self, Sound::PageFlip(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn page_flip_carries_the_sweep() {
        match Sound::page_flip() {
            Sound::PageFlip(sweep) => {
                assert_eq!(sweep.start_hz, 800.0);
                assert_eq!(sweep.end_hz, 200.0);
                assert_eq!(sweep.end_gain, 0.01);
                assert_eq!(sweep.duration, ms(100));
            }
            other => panic!("expected page flip, got {:?}", other),
        }
        assert!(Sound::page_flip().is_page_flip());
        assert!(!Sound::chord(&MELODY[0]).is_page_flip());
    }

    #[test]
    fn melody_is_ten_seconds() {
        let length: Duration = MELODY.iter().map(|note| note.duration).sum();
        assert_eq!(length, Duration::from_secs(10));
        assert_eq!(MELODY[4].name, "G4");
        assert_eq!(MELODY[4].duration, Duration::from_secs(2));
    }

    #[test]
    fn chord_is_major_triad() {
        let Sound::Chord {
            frequencies: [root, third, fifth],
            duration,
        } = Sound::chord(&MELODY[0])
        else {
            panic!("expected chord");
        };
        assert_eq!(duration, Duration::from_secs(1));
        assert_eq!(root, 261.63);
        assert!((third - 327.0375).abs() < 1e-3);
        assert!((fifth - 392.445).abs() < 1e-3);
    }

    #[test]
    fn chord_envelope_attacks_then_decays() {
        let note = Duration::from_secs(1);
        assert_eq!(chord_gain(ms(0), note), 0.0);
        assert!((chord_gain(ms(50), note) - 0.05).abs() < 1e-4);
        assert!((chord_gain(ms(100), note) - 0.1).abs() < 1e-4);
        assert!(chord_gain(ms(500), note) < 0.1);
        assert!((chord_gain(ms(999), note) - 0.01).abs() < 1e-3);
        assert_eq!(chord_gain(ms(1000), note), 0.0);
    }
}
