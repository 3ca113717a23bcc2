//! Transform component and utilities for spatial positioning.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Local axis a model's nose points along (negative Z in right-handed coordinates).
pub const FORWARD_AXIS: Vec3 = Vec3::NEG_Z;

/// A 3D transform representing position, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new transform with position and rotation.
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Create a transform whose rotation is composed yaw (outer, about Y),
    /// then pitch (about X), then roll (inner, about Z).
    pub fn from_yaw_pitch_roll(position: Vec3, yaw: f32, pitch: f32, roll: f32) -> Self {
        Self::from_position_rotation(position, yaw_pitch_roll(yaw, pitch, roll))
    }

    /// Create the model matrix for this transform.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Get the forward direction.
    pub fn forward(&self) -> Vec3 {
        self.rotation * FORWARD_AXIS
    }

    /// Get the right direction (positive X).
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Get the up direction (positive Y).
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Map a point expressed in this transform's local frame (ignoring scale) to world space.
    pub fn local_to_world(&self, offset: Vec3) -> Vec3 {
        self.position + self.rotation * offset
    }

    /// Translate the transform by a delta.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Look at a target position. Leaves the rotation alone when the target coincides with us.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        if (target - self.position).length_squared() > 0.0001 {
            self.rotation = Quat::from_mat4(&Mat4::look_at_rh(self.position, target, up)).inverse();
        }
    }
}

/// Orientation from yaw/pitch/roll with a fixed composition order.
pub fn yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> Quat {
    Quat::from_euler(EulerRot::YXZ, yaw, pitch, roll)
}
