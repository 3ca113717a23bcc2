//! HUD (Heads-Up Display) bridge.
//!
//! The overlay itself lives in the host. The simulation only pushes four
//! values through [`Hud`] once per tick.

/// One-way sink for HUD values. Implemented by the host overlay.
pub trait Hud {
    fn set_speed(&mut self, speed: f32);
    /// `true` while the orbit camera is active.
    fn set_camera_mode(&mut self, orbit: bool);
    fn set_kills(&mut self, destroyed: usize, total: usize);
    fn set_weapon_ready(&mut self, ready: bool);
}

/// HUD sink that drops everything, for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHud;

impl Hud for NullHud {
    fn set_speed(&mut self, _speed: f32) {}
    fn set_camera_mode(&mut self, _orbit: bool) {}
    fn set_kills(&mut self, _destroyed: usize, _total: usize) {}
    fn set_weapon_ready(&mut self, _ready: bool) {}
}

/// All HUD data for a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HUDData {
    pub speed: f32,
    pub orbit_camera: bool,
    pub kills: usize,
    pub total_targets: usize,
    pub weapon_ready: bool,
}

impl HUDData {
    /// Push every field through the sink.
    pub fn apply(&self, hud: &mut dyn Hud) {
        hud.set_speed(self.speed);
        hud.set_camera_mode(self.orbit_camera);
        hud.set_kills(self.kills, self.total_targets);
        hud.set_weapon_ready(self.weapon_ready);
    }

    /// Kill count as shown on the overlay.
    pub fn kills_display(&self) -> String {
        format!("{} / {}", self.kills, self.total_targets)
    }
}
