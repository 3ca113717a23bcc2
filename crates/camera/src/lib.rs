//! Camera rig for Skyfire: a smoothed chase camera and a free orbit camera.

pub mod camera;
pub mod orbit;
pub mod rig;

pub use camera::*;
pub use orbit::*;
pub use rig::*;
