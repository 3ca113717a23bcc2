//! Game configuration (flight, camera, weapon, targets, effects, bindings).
//! Loaded from `skyfire.ron` at startup.

use camera::CameraConfig;
use input::KeyBindings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::effects::ExplosionConfig;
use crate::flight::FlightConfig;
use crate::spawner::TargetConfig;
use crate::weapons::WeaponConfig;

/// File name looked up in the current directory.
pub const CONFIG_FILE: &str = "skyfire.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("{field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Frame pacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Largest simulation step in seconds; longer frames are clamped.
    pub max_delta: f32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_delta: engine_core::DEFAULT_MAX_DELTA,
        }
    }
}

/// Every tunable of a session. Missing sections fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub flight: FlightConfig,
    pub camera: CameraConfig,
    pub weapon: WeaponConfig,
    pub targets: TargetConfig,
    pub explosion: ExplosionConfig,
    pub frame: FrameConfig,
    pub bindings: KeyBindings,
}

impl GameConfig {
    /// Load config from `skyfire.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Invalid config at {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&data)
    }

    pub fn from_ron_str(data: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation can't honour (inverted clamps, negative lifetimes).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let f = &self.flight;
        if f.min_speed > f.max_speed {
            return Err(invalid("flight.min_speed", "greater than max_speed"));
        }
        if f.max_pitch < 0.0 || f.max_roll < 0.0 {
            return Err(invalid("flight.max_pitch/max_roll", "must not be negative"));
        }
        let s = self.camera.follow.smoothing;
        if !(s > 0.0 && s <= 1.0) {
            return Err(invalid("camera.follow.smoothing", "must be in (0, 1]"));
        }
        let orbit = &self.camera.orbit;
        if orbit.min_distance > orbit.max_distance || orbit.min_polar > orbit.max_polar {
            return Err(invalid("camera.orbit", "min limit greater than max"));
        }
        if self.weapon.projectile_lifetime < 0.0 || self.weapon.fire_cooldown < 0.0 {
            return Err(invalid("weapon", "timers must not be negative"));
        }
        if self.explosion.lifetime <= 0.0 {
            return Err(invalid("explosion.lifetime", "must be positive"));
        }
        if self.frame.max_delta <= 0.0 {
            return Err(invalid("frame.max_delta", "must be positive"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_owned(),
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(CONFIG_FILE)
}
