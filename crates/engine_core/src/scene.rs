//! Scene-node data handed to the external render engine.
//!
//! The simulation never builds meshes or materials. It owns a handful of nodes
//! and, once per frame, writes their transform, visibility and opacity.

use crate::transform::Transform;
use glam::Vec3;

/// The per-node fields the simulation is allowed to touch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneNode {
    pub transform: Transform,
    pub visible: bool,
    /// Material opacity in [0, 1].
    pub opacity: f32,
}

impl Default for SceneNode {
    fn default() -> Self {
        Self {
            transform: Transform::default(),
            visible: true,
            opacity: 1.0,
        }
    }
}

impl SceneNode {
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            ..Default::default()
        }
    }

    pub fn hidden(transform: Transform) -> Self {
        Self {
            transform,
            visible: false,
            opacity: 1.0,
        }
    }

    /// Builder: uniform scale.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.transform.scale = Vec3::splat(scale);
        self
    }

    /// Builder: opacity, clamped to [0, 1].
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_keeps_position() {
        let node = SceneNode::new(Transform::from_position(Vec3::new(1.0, 2.0, 3.0))).with_scale(2.5);
        assert_eq!(node.transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(node.transform.scale, Vec3::splat(2.5));
        assert!(node.visible);
    }

    #[test]
    fn opacity_is_clamped() {
        let node = SceneNode::default().with_opacity(-0.5);
        assert_eq!(node.opacity, 0.0);
        assert!(!SceneNode::hidden(Transform::default()).visible);
    }
}
