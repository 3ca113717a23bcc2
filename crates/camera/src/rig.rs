//! Two-mode camera rig: smoothed chase camera or free orbit around the tracked entity.

use crate::camera::Camera;
use crate::orbit::{OrbitConfig, OrbitController};
use engine_core::Transform;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Which strategy drives the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    #[default]
    Follow,
    Orbit,
}

impl CameraMode {
    pub fn is_orbit(self) -> bool {
        self == CameraMode::Orbit
    }
}

/// Chase camera tunables. Offsets are in the tracked entity's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowConfig {
    /// Eye offset (behind and above for a nose along -Z).
    pub offset: Vec3,
    /// Look-at offset, ahead of the nose.
    pub look_offset: Vec3,
    /// Fraction of the remaining gap closed each tick, in (0, 1].
    pub smoothing: f32,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 3.0, 12.0),
            look_offset: Vec3::new(0.0, 0.0, -20.0),
            smoothing: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub follow: FollowConfig,
    pub orbit: OrbitConfig,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            follow: FollowConfig::default(),
            orbit: OrbitConfig::default(),
            fov_degrees: 75.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

/// Pointer input the orbit strategy consumes. Ignored in follow mode.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrbitInput {
    pub drag: Vec2,
    pub wheel: f32,
}

/// Produces the camera transform each tick from the tracked entity and user input.
#[derive(Debug, Clone)]
pub struct CameraRig {
    mode: CameraMode,
    /// Follow mode's smoothed eye position.
    smoothed: Vec3,
    orbit: OrbitController,
    follow: FollowConfig,
    camera: Camera,
}

impl CameraRig {
    /// Create a rig in follow mode with the eye already at its resting offset.
    pub fn new(config: &CameraConfig, tracked: &Transform) -> Self {
        let eye = tracked.local_to_world(config.follow.offset);
        let look = tracked.local_to_world(config.follow.look_offset);
        let mut camera = Camera::new(eye, look);
        camera.fov_degrees = config.fov_degrees;
        camera.near = config.near;
        camera.far = config.far;

        Self {
            mode: CameraMode::Follow,
            smoothed: eye,
            orbit: OrbitController::new(config.orbit),
            follow: config.follow,
            camera,
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Flip between follow and orbit, returning the new mode.
    pub fn toggle(&mut self, tracked: &Transform) -> CameraMode {
        let next = match self.mode {
            CameraMode::Follow => CameraMode::Orbit,
            CameraMode::Orbit => CameraMode::Follow,
        };
        self.set_mode(next, tracked);
        next
    }

    /// Switch strategy, seeding the incoming one from where the camera is now.
    pub fn set_mode(&mut self, mode: CameraMode, tracked: &Transform) {
        if mode == self.mode {
            return;
        }
        let eye = self.camera.position();
        match mode {
            CameraMode::Orbit => self.orbit.look_from(eye, tracked.position),
            CameraMode::Follow => self.smoothed = eye,
        }
        log::info!("Camera mode: {:?}", mode);
        self.mode = mode;
    }

    /// Advance one tick and return the updated camera.
    pub fn update(&mut self, tracked: &Transform, input: OrbitInput) -> &Camera {
        match self.mode {
            CameraMode::Follow => {
                let desired = tracked.local_to_world(self.follow.offset);
                self.smoothed = self.smoothed.lerp(desired, self.follow.smoothing);
                // Look-at is not smoothed, so the horizon stays steady while the eye lags.
                let look = tracked.local_to_world(self.follow.look_offset);
                self.camera.set_view(self.smoothed, look);
            }
            CameraMode::Orbit => {
                self.orbit.recenter(tracked.position);
                self.orbit.rotate(input.drag);
                self.orbit.zoom(input.wheel);
                self.camera.set_view(self.orbit.position(), self.orbit.target);
            }
        }
        &self.camera
    }

    pub fn orbit(&self) -> &OrbitController {
        &self.orbit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    fn aircraft_at(position: Vec3, yaw: f32) -> Transform {
        Transform::from_yaw_pitch_roll(position, yaw, 0.0, 0.0)
    }

    #[test]
    fn new_rig_rests_at_follow_offset() {
        let config = CameraConfig::default();
        let t = aircraft_at(Vec3::new(0.0, 50.0, 0.0), 0.0);
        let rig = CameraRig::new(&config, &t);
        assert_eq!(rig.mode(), CameraMode::Follow);
        assert!(close(rig.camera().position(), Vec3::new(0.0, 53.0, 12.0)));
    }

    #[test]
    fn follow_position_lags_but_look_at_does_not() {
        let config = CameraConfig::default();
        let mut t = aircraft_at(Vec3::ZERO, 0.0);
        let mut rig = CameraRig::new(&config, &t);

        t.position = Vec3::new(0.0, 0.0, -100.0);
        let cam = rig.update(&t, OrbitInput::default());
        let desired = t.local_to_world(config.follow.offset);
        let start = Vec3::new(0.0, 3.0, 12.0);
        assert!(close(cam.position(), start.lerp(desired, config.follow.smoothing)));
        assert!(close(cam.target, t.local_to_world(config.follow.look_offset)));
    }

    #[test]
    fn follow_converges_on_offset() {
        let config = CameraConfig::default();
        let mut t = aircraft_at(Vec3::ZERO, 0.0);
        let mut rig = CameraRig::new(&config, &t);
        t = aircraft_at(Vec3::new(40.0, 10.0, -40.0), 1.0);
        for _ in 0..400 {
            rig.update(&t, OrbitInput::default());
        }
        assert!(close(rig.camera().position(), t.local_to_world(config.follow.offset)));
    }

    #[test]
    fn switching_to_orbit_does_not_snap() {
        let config = CameraConfig::default();
        let t = aircraft_at(Vec3::new(10.0, 20.0, 30.0), 0.4);
        let mut rig = CameraRig::new(&config, &t);
        rig.update(&t, OrbitInput::default());
        let eye = rig.camera().position();

        assert_eq!(rig.toggle(&t), CameraMode::Orbit);
        assert!(close(rig.orbit().target, t.position));
        rig.update(&t, OrbitInput::default());
        assert!(close(rig.camera().position(), eye));
    }

    #[test]
    fn orbit_follows_entity_and_keeps_framing() {
        let config = CameraConfig::default();
        let mut t = aircraft_at(Vec3::ZERO, 0.0);
        let mut rig = CameraRig::new(&config, &t);
        rig.set_mode(CameraMode::Orbit, &t);
        rig.update(&t, OrbitInput { drag: Vec2::new(40.0, 10.0), wheel: 1.0 });
        let offset = rig.camera().position() - t.position;

        t.position += Vec3::new(0.0, 5.0, -60.0);
        rig.update(&t, OrbitInput::default());
        assert!(close(rig.camera().position() - t.position, offset));
        assert!(close(rig.camera().target, t.position));
    }

    #[test]
    fn switching_back_to_follow_starts_from_orbit_eye() {
        let config = CameraConfig::default();
        let t = aircraft_at(Vec3::ZERO, 0.0);
        let mut rig = CameraRig::new(&config, &t);
        rig.toggle(&t);
        rig.update(&t, OrbitInput { drag: Vec2::new(300.0, 0.0), wheel: 0.0 });
        let orbit_eye = rig.camera().position();

        assert_eq!(rig.toggle(&t), CameraMode::Follow);
        rig.update(&t, OrbitInput::default());
        let desired = t.local_to_world(config.follow.offset);
        assert!(close(rig.camera().position(), orbit_eye.lerp(desired, config.follow.smoothing)));
    }

    #[test]
    fn follow_ignores_pointer_input() {
        let config = CameraConfig::default();
        let t = aircraft_at(Vec3::ZERO, 0.0);
        let mut a = CameraRig::new(&config, &t);
        let mut b = CameraRig::new(&config, &t);
        a.update(&t, OrbitInput::default());
        b.update(&t, OrbitInput { drag: Vec2::new(99.0, 99.0), wheel: 3.0 });
        assert!(close(a.camera().position(), b.camera().position()));
    }
}
