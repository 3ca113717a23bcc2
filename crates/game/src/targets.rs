//! Scripted target motion: closed-form paths, hover bob and smoothed heading.
//!
//! Targets aren't simulated physically. Each one walks its own parametric path
//! by phase, bobs on the global clock, and turns to face where it is going.

use engine_core::{Transform, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

/// Path a target follows in the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionProfile {
    Circular {
        /// XZ-plane centre.
        center: Vec2,
        radius: f32,
        angular_speed: f32,
        phase: f32,
    },
    /// Lemniscate of Bernoulli scaled per axis.
    FigureEight {
        center: Vec2,
        radius_x: f32,
        radius_z: f32,
        angular_speed: f32,
        phase: f32,
    },
}

impl MotionProfile {
    /// Step the path parameter forward.
    pub fn advance(&mut self, dt: f32) {
        match self {
            MotionProfile::Circular { angular_speed, phase, .. }
            | MotionProfile::FigureEight { angular_speed, phase, .. } => {
                *phase = (*phase + *angular_speed * dt).rem_euclid(TAU);
            }
        }
    }

    /// Current point on the path, as (x, z).
    pub fn planar_position(&self) -> Vec2 {
        match *self {
            MotionProfile::Circular { center, radius, phase, .. } => {
                center + Vec2::new(phase.cos(), phase.sin()) * radius
            }
            MotionProfile::FigureEight { center, radius_x, radius_z, phase, .. } => {
                let (sin, cos) = phase.sin_cos();
                // 1 + sin² >= 1, so no guard needed.
                let denom = 1.0 + sin * sin;
                center + Vec2::new(radius_x * cos / denom, radius_z * sin * cos / denom)
            }
        }
    }

    pub fn phase(&self) -> f32 {
        match *self {
            MotionProfile::Circular { phase, .. } | MotionProfile::FigureEight { phase, .. } => {
                phase
            }
        }
    }
}

/// Vertical bob, driven by the global clock rather than path phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hover {
    pub initial_height: f32,
    pub amplitude: f32,
    pub frequency: f32,
    pub phase: f32,
}

impl Hover {
    pub fn height(&self, time: f32) -> f32 {
        self.initial_height + self.amplitude * (time * self.frequency + self.phase).sin()
    }
}

/// How targets turn toward their direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingConfig {
    /// Fraction of the remaining heading error removed per tick, in (0, 1].
    pub blend: f32,
    /// Constant idle spin in radians per second.
    pub spin: f32,
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self { blend: 0.1, spin: 0.2 }
    }
}

/// A drone the player shoots at. Never removed, only flagged destroyed.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub position: Vec3,
    /// Yaw about +Y; zero faces -Z.
    pub facing: f32,
    pub motion: MotionProfile,
    pub hover: Hover,
    pub destroyed: bool,
    /// Position at the previous tick, `None` until the first update.
    previous: Option<Vec3>,
}

impl Target {
    pub fn new(motion: MotionProfile, hover: Hover) -> Self {
        let planar = motion.planar_position();
        Self {
            position: Vec3::new(planar.x, hover.height(0.0), planar.y),
            facing: 0.0,
            motion,
            hover,
            destroyed: false,
            previous: None,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.destroyed
    }

    pub fn transform(&self) -> Transform {
        Transform::from_yaw_pitch_roll(self.position, self.facing, 0.0, 0.0)
    }

    /// Advance one tick. `time` is the session clock in seconds.
    pub fn update(&mut self, dt: f32, time: f32, heading: &HeadingConfig) {
        self.motion.advance(dt);
        let planar = self.motion.planar_position();
        self.position = Vec3::new(planar.x, self.hover.height(time), planar.y);

        if let Some(previous) = self.previous {
            let delta = self.position - previous;
            if delta.x != 0.0 || delta.z != 0.0 {
                let desired = heading_of(delta);
                self.facing = blend_heading(self.facing, desired, heading.blend);
            }
        }
        self.facing = wrap_angle(self.facing + heading.spin * dt);
        self.previous = Some(self.position);
    }
}

/// Advance every live target.
pub fn update_targets(targets: &mut [Target], dt: f32, time: f32, heading: &HeadingConfig) {
    for target in targets.iter_mut().filter(|t| t.is_active()) {
        target.update(dt, time, heading);
    }
}

/// Yaw that points the -Z nose along `delta` in the XZ plane.
pub fn heading_of(delta: Vec3) -> f32 {
    (-delta.x).atan2(-delta.z)
}

/// Wrap to (-PI, PI].
pub fn wrap_angle(angle: f32) -> f32 {
    let a = (angle + PI).rem_euclid(TAU) - PI;
    if a <= -PI {
        a + TAU
    } else {
        a
    }
}

/// Signed difference `to - from` along the shorter arc.
pub fn shortest_angle(from: f32, to: f32) -> f32 {
    wrap_angle(to - from)
}

/// Move `current` toward `desired` by `factor` of the shorter-arc difference.
pub fn blend_heading(current: f32, desired: f32, factor: f32) -> f32 {
    wrap_angle(current + shortest_angle(current, desired) * factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still_hover(height: f32) -> Hover {
        Hover { initial_height: height, amplitude: 0.0, frequency: 0.0, phase: 0.0 }
    }

    fn circle(radius: f32, angular_speed: f32) -> MotionProfile {
        MotionProfile::Circular { center: Vec2::ZERO, radius, angular_speed, phase: 0.0 }
    }

    #[test]
    fn circular_path_stays_on_radius() {
        let mut t = Target::new(circle(40.0, 0.7), still_hover(30.0));
        let heading = HeadingConfig::default();
        for i in 0..500 {
            t.update(1.0 / 60.0, i as f32 / 60.0, &heading);
            let r = Vec2::new(t.position.x, t.position.z).length();
            assert!((r - 40.0).abs() < 1e-3);
            assert_eq!(t.position.y, 30.0);
        }
    }

    #[test]
    fn figure_eight_matches_closed_form() {
        let center = Vec2::new(10.0, -5.0);
        let mut motion = MotionProfile::FigureEight {
            center,
            radius_x: 60.0,
            radius_z: 30.0,
            angular_speed: 1.0,
            phase: 0.0,
        };
        assert!((motion.planar_position() - Vec2::new(70.0, -5.0)).length() < 1e-4);

        motion.advance(0.8);
        let p = motion.planar_position();
        let (s, c) = 0.8f32.sin_cos();
        let d = 1.0 + s * s;
        assert!((p.x - (10.0 + 60.0 * c / d)).abs() < 1e-4);
        assert!((p.y - (-5.0 + 30.0 * s * c / d)).abs() < 1e-4);
    }

    #[test]
    fn figure_eight_is_finite_everywhere() {
        let mut motion = MotionProfile::FigureEight {
            center: Vec2::ZERO,
            radius_x: 50.0,
            radius_z: 50.0,
            angular_speed: 0.01,
            phase: 0.0,
        };
        for _ in 0..1000 {
            motion.advance(1.0);
            assert!(motion.planar_position().is_finite());
        }
    }

    #[test]
    fn hover_uses_global_time_not_phase() {
        let hover = Hover { initial_height: 20.0, amplitude: 2.0, frequency: 1.5, phase: 0.3 };
        let mut a = Target::new(circle(10.0, 0.1), hover);
        let mut b = Target::new(circle(10.0, 3.0), hover);
        let heading = HeadingConfig::default();
        a.update(0.5, 4.0, &heading);
        b.update(0.5, 4.0, &heading);
        assert_eq!(a.position.y, b.position.y);
        assert!((a.position.y - (20.0 + 2.0 * (4.0f32 * 1.5 + 0.3).sin())).abs() < 1e-5);
    }

    #[test]
    fn first_tick_skips_heading_blend() {
        let heading = HeadingConfig { blend: 0.5, spin: 0.0 };
        let mut t = Target::new(circle(30.0, 1.0), still_hover(10.0));
        t.update(0.1, 0.1, &heading);
        assert_eq!(t.facing, 0.0);
        t.update(0.1, 0.2, &heading);
        assert!(t.facing != 0.0);
    }

    #[test]
    fn heading_blend_takes_short_way_round() {
        let deg = |d: f32| d.to_radians();

        // +179 degrees away: turn positive.
        let up = blend_heading(0.0, deg(179.0), 0.1);
        assert!(up > 0.0 && up < deg(179.0));

        // -179 degrees away: turn negative.
        let down = blend_heading(0.0, deg(-179.0), 0.1);
        assert!(down < 0.0 && down > deg(-179.0));

        // Across the seam: 170 -> -170 is +20, not -340.
        let across = blend_heading(deg(170.0), deg(-170.0), 0.5);
        assert!((across - deg(180.0)).abs() < 1e-4 || (across + deg(180.0)).abs() < 1e-4);
        let nudged = blend_heading(deg(170.0), deg(-170.0), 0.25);
        assert!((nudged - deg(175.0)).abs() < 1e-4);
    }

    #[test]
    fn facing_converges_on_direction_of_travel() {
        let heading = HeadingConfig { blend: 0.2, spin: 0.0 };
        // Phase 0 on a counter-clockwise circle moves toward +Z.
        let mut t = Target::new(circle(500.0, 0.01), still_hover(10.0));
        for i in 0..200 {
            t.update(1.0 / 60.0, i as f32 / 60.0, &heading);
        }
        let forward = t.transform().forward();
        assert!(forward.z > 0.99);
    }

    #[test]
    fn destroyed_targets_are_frozen() {
        let heading = HeadingConfig::default();
        let mut targets = vec![
            Target::new(circle(20.0, 1.0), still_hover(5.0)),
            Target::new(circle(20.0, 1.0), still_hover(5.0)),
        ];
        targets[1].destroyed = true;
        let frozen = targets[1].position;
        update_targets(&mut targets, 0.5, 0.5, &heading);
        assert_eq!(targets[1].position, frozen);
        assert!(targets[0].position != frozen);
    }

    #[test]
    fn wrap_angle_range() {
        for a in [-10.0f32, -PI, 0.0, PI, 3.5, 12.0] {
            let w = wrap_angle(a);
            assert!(w > -PI - 1e-6 && w <= PI + 1e-6);
            assert!(((w - a).rem_euclid(TAU)).min(TAU - (w - a).rem_euclid(TAU)) < 1e-4);
        }
    }
}
