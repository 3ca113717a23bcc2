//! Skyfire gameplay core: arcade flight, fire control, scripted targets,
//! explosion effects and the per-frame session that ties them together.
//!
//! Rendering, terrain and the HUD overlay belong to the host; see
//! [`render::RenderHost`] and [`hud::Hud`].

pub mod config;
pub mod effects;
pub mod flight;
pub mod hud;
pub mod render;
pub mod session;
pub mod spawner;
pub mod targets;
pub mod weapons;

pub use config::{ConfigError, GameConfig};
pub use session::Session;
