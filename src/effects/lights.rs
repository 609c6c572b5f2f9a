//! Decorative twinkling lights scattered over the screen.

use rand::seq::SliceRandom;
use rand::Rng;
use ratatui::style::Color;
use std::f32::consts::TAU;

/// Gold, crimson, forest green, white and bright gold.
pub const LIGHT_PALETTE: [Color; 5] = [
    Color::Rgb(0xd4, 0xaf, 0x37),
    Color::Rgb(0xdc, 0x14, 0x3c),
    Color::Rgb(0x22, 0x8b, 0x22),
    Color::Rgb(0xff, 0xff, 0xff),
    Color::Rgb(0xff, 0xd7, 0x00),
];

pub const DEFAULT_LIGHT_COUNT: usize = 20;

const MIN_INTENSITY: f32 = 0.3;
const MAX_INTENSITY: f32 = 1.0;

/// A single light; position is relative to the screen, in `[0, 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub x: f32,
    pub y: f32,
    pub color: Color,
    pub period_secs: f32,
    pub delay_secs: f32,
}

impl Light {
    /// Brightness at `t` seconds after startup: dim at the ends of each period, full in the middle.
    pub fn intensity(&self, t: f32) -> f32 {
        if t < self.delay_secs || self.period_secs <= 0.0 {
            return MIN_INTENSITY;
        }
        let phase = ((t - self.delay_secs) % self.period_secs) / self.period_secs;
        let wave = (1.0 - (TAU * phase).cos()) / 2.0;
        MIN_INTENSITY + (MAX_INTENSITY - MIN_INTENSITY) * wave
    }

    /// Cell position inside a `width` x `height` area.
    pub fn cell(&self, width: u16, height: u16) -> (u16, u16) {
        let col = (self.x * f32::from(width)) as u16;
        let row = (self.y * f32::from(height)) as u16;
        (
            col.min(width.saturating_sub(1)),
            row.min(height.saturating_sub(1)),
        )
    }
}

/// The set of lights generated once at startup.
#[derive(Debug, Clone, Default)]
pub struct LightField {
    lights: Vec<Light>,
}

impl LightField {
    pub fn generate<R: Rng>(count: usize, rng: &mut R) -> Self {
        let lights = (0..count)
            .map(|_| Light {
                x: rng.gen_range(0.0..1.0),
                y: rng.gen_range(0.0..1.0),
                color: *LIGHT_PALETTE.choose(rng).unwrap_or(&LIGHT_PALETTE[0]),
                period_secs: rng.gen_range(2.0..5.0),
                delay_secs: rng.gen_range(0.0..2.0),
            })
            .collect();
        Self { lights }
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn light(period: f32, delay: f32) -> Light {
        Light {
            x: 0.5,
            y: 0.5,
            color: LIGHT_PALETTE[0],
            period_secs: period,
            delay_secs: delay,
        }
    }

    #[test]
    fn generates_requested_count_within_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let field = LightField::generate(DEFAULT_LIGHT_COUNT, &mut rng);

        assert_eq!(field.lights().len(), 20);
        for light in field.lights() {
            assert!((0.0..1.0).contains(&light.x));
            assert!((0.0..1.0).contains(&light.y));
            assert!((2.0..5.0).contains(&light.period_secs));
            assert!((0.0..2.0).contains(&light.delay_secs));
            assert!(LIGHT_PALETTE.contains(&light.color));
        }
    }

    #[test]
    fn same_seed_same_field() {
        let a = LightField::generate(5, &mut StdRng::seed_from_u64(42));
        let b = LightField::generate(5, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.lights(), b.lights());
    }

    #[test]
    fn twinkle_peaks_mid_period() {
        let l = light(2.0, 0.5);
        assert_eq!(l.intensity(0.0), 0.3);
        assert!((l.intensity(0.5) - 0.3).abs() < 1e-4);
        assert!((l.intensity(1.5) - 1.0).abs() < 1e-4);
        assert!((l.intensity(2.5) - 0.3).abs() < 1e-4);
    }

    #[test]
    fn intensity_stays_in_range() {
        let l = light(3.3, 1.1);
        for step in 0..200 {
            let v = l.intensity(step as f32 * 0.05);
            assert!((0.3..=1.0 + 1e-6).contains(&v), "intensity {} out of range", v);
        }
    }

    #[test]
    fn cell_is_clamped_to_area() {
        let mut l = light(2.0, 0.0);
        l.x = 0.999;
        l.y = 0.999;
        assert_eq!(l.cell(80, 24), (79, 23));
        assert_eq!(l.cell(0, 0), (0, 0));
    }
}
