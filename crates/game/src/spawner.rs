//! Startup target generation.
//!
//! Targets alternate between circular and figure-eight paths. Every parameter
//! is drawn from a configured range with a seeded RNG, so a given config
//! always produces the same sky.

use engine_core::Vec2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::targets::{HeadingConfig, Hover, MotionProfile, Target};

/// Target population tunables. Ranges are `(min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub count: usize,
    pub seed: u64,

    // ── Path geometry ───────────────────────────────────────────────────
    /// Half-width of the square path centres are scattered in.
    pub center_spread: f32,
    pub circle_radius: (f32, f32),
    pub figure_eight_radius_x: (f32, f32),
    pub figure_eight_radius_z: (f32, f32),
    /// Path phase speed in radians per second.
    pub angular_speed: (f32, f32),

    // ── Hover ───────────────────────────────────────────────────────────
    pub height: (f32, f32),
    pub hover_amplitude: (f32, f32),
    pub hover_frequency: (f32, f32),

    pub heading: HeadingConfig,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            count: 8,
            seed: 0x5eed,
            center_spread: 150.0,
            circle_radius: (30.0, 80.0),
            figure_eight_radius_x: (60.0, 120.0),
            figure_eight_radius_z: (40.0, 90.0),
            angular_speed: (0.15, 0.45),
            height: (30.0, 90.0),
            hover_amplitude: (1.0, 4.0),
            hover_frequency: (0.5, 1.5),
            heading: HeadingConfig::default(),
        }
    }
}

/// Uniform sample from `(min, max)`; tolerates a degenerate or reversed range.
fn sample(rng: &mut impl Rng, (a, b): (f32, f32)) -> f32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

/// Build the target population.
pub fn generate_targets(config: &TargetConfig, rng: &mut impl Rng) -> Vec<Target> {
    let spread = config.center_spread.abs();
    (0..config.count)
        .map(|i| {
            let center = Vec2::new(
                sample(rng, (-spread, spread)),
                sample(rng, (-spread, spread)),
            );
            let angular_speed = sample(rng, config.angular_speed);
            let phase = rng.gen_range(0.0..TAU);

            let motion = if i % 2 == 0 {
                MotionProfile::Circular {
                    center,
                    radius: sample(rng, config.circle_radius),
                    angular_speed,
                    phase,
                }
            } else {
                MotionProfile::FigureEight {
                    center,
                    radius_x: sample(rng, config.figure_eight_radius_x),
                    radius_z: sample(rng, config.figure_eight_radius_z),
                    angular_speed,
                    phase,
                }
            };

            let hover = Hover {
                initial_height: sample(rng, config.height),
                amplitude: sample(rng, config.hover_amplitude),
                frequency: sample(rng, config.hover_frequency),
                phase: rng.gen_range(0.0..TAU),
            };

            Target::new(motion, hover)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternates_profiles() {
        let config = TargetConfig { count: 5, ..Default::default() };
        let mut rng = StdRng::seed_from_u64(config.seed);
        let targets = generate_targets(&config, &mut rng);
        assert_eq!(targets.len(), 5);
        for (i, t) in targets.iter().enumerate() {
            let circular = matches!(t.motion, MotionProfile::Circular { .. });
            assert_eq!(circular, i % 2 == 0);
            assert!(!t.destroyed);
        }
    }

    #[test]
    fn parameters_fall_in_configured_ranges() {
        let config = TargetConfig { count: 40, ..Default::default() };
        let mut rng = StdRng::seed_from_u64(3);
        for t in generate_targets(&config, &mut rng) {
            assert!(t.hover.initial_height >= config.height.0);
            assert!(t.hover.initial_height < config.height.1);
            match t.motion {
                MotionProfile::Circular { radius, angular_speed, .. } => {
                    assert!(radius >= config.circle_radius.0 && radius < config.circle_radius.1);
                    assert!(angular_speed >= config.angular_speed.0);
                }
                MotionProfile::FigureEight { radius_x, radius_z, .. } => {
                    assert!(radius_x >= config.figure_eight_radius_x.0);
                    assert!(radius_z < config.figure_eight_radius_z.1);
                }
            }
        }
    }

    #[test]
    fn same_seed_same_targets() {
        let config = TargetConfig::default();
        let a = generate_targets(&config, &mut StdRng::seed_from_u64(9));
        let b = generate_targets(&config, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_range_is_constant() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sample(&mut rng, (2.0, 2.0)), 2.0);
        let v = sample(&mut rng, (5.0, 1.0));
        assert!((1.0..5.0).contains(&v));
    }
}
