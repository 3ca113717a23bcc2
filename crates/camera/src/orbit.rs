//! Drag-to-rotate, wheel-to-zoom orbit controller.
//!
//! The eye sits on a sphere around `target`. Angles and distance are the
//! controller's own state, so moving the target carries the eye along without
//! changing how the user has framed the view.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Tunables for [`OrbitController`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Radians of rotation per pixel of drag.
    pub rotate_speed: f32,
    /// Distance scale per wheel unit (> 1).
    pub zoom_scale: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Polar angle limits, measured from +Y.
    pub min_polar: f32,
    pub max_polar: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            rotate_speed: 0.005,
            zoom_scale: 1.1,
            min_distance: 5.0,
            max_distance: 200.0,
            min_polar: 0.05,
            max_polar: PI - 0.05,
        }
    }
}

/// Orbit camera state: a target point plus spherical offset (azimuth, polar, distance).
#[derive(Debug, Clone)]
pub struct OrbitController {
    pub target: Vec3,
    /// Rotation about +Y, zero looking down -Z from +Z.
    azimuth: f32,
    /// Angle from +Y.
    polar: f32,
    distance: f32,
    config: OrbitConfig,
}

impl OrbitController {
    pub fn new(config: OrbitConfig) -> Self {
        let mut orbit = Self {
            target: Vec3::ZERO,
            azimuth: 0.0,
            polar: PI / 3.0,
            distance: 30.0,
            config,
        };
        orbit.distance = orbit.clamp_distance(orbit.distance);
        orbit
    }

    /// Re-derive angles and distance so the eye sits exactly at `eye` around `target`.
    pub fn look_from(&mut self, eye: Vec3, target: Vec3) {
        self.target = target;
        let offset = eye - target;
        let len = offset.length();
        if len > 1e-6 {
            self.polar = self.clamp_polar((offset.y / len).clamp(-1.0, 1.0).acos());
            self.azimuth = offset.x.atan2(offset.z);
        }
        self.distance = self.clamp_distance(len);
    }

    /// Move the orbit centre, keeping angles and distance.
    pub fn recenter(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Apply a pointer drag in pixels.
    pub fn rotate(&mut self, drag: Vec2) {
        self.azimuth -= drag.x * self.config.rotate_speed;
        self.polar = self.clamp_polar(self.polar - drag.y * self.config.rotate_speed);
    }

    /// Apply wheel movement. Positive values move the eye closer.
    pub fn zoom(&mut self, wheel: f32) {
        if wheel != 0.0 {
            let scaled = self.distance / self.config.zoom_scale.powf(wheel);
            self.distance = self.clamp_distance(scaled);
        }
    }

    /// Eye position in world space.
    pub fn position(&self) -> Vec3 {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        self.target + Vec3::new(sin_p * sin_a, cos_p, sin_p * cos_a) * self.distance
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    fn clamp_polar(&self, polar: f32) -> f32 {
        polar.clamp(self.config.min_polar, self.config.max_polar)
    }

    fn clamp_distance(&self, distance: f32) -> f32 {
        distance.clamp(self.config.min_distance, self.config.max_distance)
    }
}
