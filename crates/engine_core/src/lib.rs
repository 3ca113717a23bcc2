//! Core engine types and utilities for Skyfire.
//!
//! This crate provides the foundational types used across all simulation systems:
//! - Transform and spatial helpers
//! - Frame time management (host-timestamp driven, with a delta clamp)
//! - The scene-node seam towards the external render engine

pub mod scene;
pub mod time;
pub mod transform;

pub use scene::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{EulerRot, Mat4, Quat, Vec2, Vec3, Vec4};
