//! Skyfire - headless flight-combat demo.
//!
//! Runs a session at 60 Hz with a simple autopilot pressing the bound keys:
//! it banks and climbs toward the nearest live target and holds the trigger
//! when the nose is on it. Usage: `skyfire [seconds]`.

use anyhow::{Context, Result};
use engine_core::Vec3;
use game::hud::Hud;
use game::render::CountingHost;
use game::targets::{heading_of, shortest_angle};
use game::{GameConfig, Session};
use input::{KeyBindings, KeyState};

const FRAME_RATE: f64 = 60.0;
const DEFAULT_DURATION: f64 = 90.0;

/// Heading / pitch error (radians) the autopilot tolerates before steering.
const STEER_DEADBAND: f32 = 0.05;
/// Cone around the nose (radians) inside which the autopilot fires.
const FIRE_CONE: f32 = 0.08;

/// HUD sink that logs when something worth reading changes.
#[derive(Default)]
struct LogHud {
    kills: usize,
    orbit: bool,
}

impl Hud for LogHud {
    fn set_speed(&mut self, _speed: f32) {}

    fn set_camera_mode(&mut self, orbit: bool) {
        if orbit != self.orbit {
            log::info!("HUD camera: {}", if orbit { "orbit" } else { "follow" });
            self.orbit = orbit;
        }
    }

    fn set_kills(&mut self, destroyed: usize, total: usize) {
        if destroyed != self.kills {
            log::info!("HUD kills: {} / {}", destroyed, total);
            self.kills = destroyed;
        }
    }

    fn set_weapon_ready(&mut self, _ready: bool) {}
}

/// Keys the autopilot wants held this frame.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Stick {
    pitch_up: bool,
    pitch_down: bool,
    roll_left: bool,
    roll_right: bool,
    fire: bool,
}

fn autopilot(session: &Session) -> Stick {
    let aircraft = session.aircraft();
    let nearest = session
        .targets()
        .iter()
        .filter(|t| t.is_active())
        .map(|t| t.position - aircraft.position)
        .min_by(|a, b| a.length_squared().total_cmp(&b.length_squared()));
    let Some(to_target) = nearest else {
        return Stick::default();
    };

    let heading_error = shortest_angle(aircraft.yaw, heading_of(to_target));
    let horizontal = Vec3::new(to_target.x, 0.0, to_target.z).length();
    let pitch_error = to_target.y.atan2(horizontal) - aircraft.pitch;

    let weapon = session.weapons().config();
    let range = weapon.muzzle_speed * weapon.projectile_lifetime;
    let on_nose = aircraft.forward().angle_between(to_target) < FIRE_CONE;

    Stick {
        pitch_up: pitch_error > STEER_DEADBAND,
        pitch_down: pitch_error < -STEER_DEADBAND,
        // Bank left turns left (yaw grows).
        roll_left: heading_error > STEER_DEADBAND,
        roll_right: heading_error < -STEER_DEADBAND,
        fire: on_nose && to_target.length() < range,
    }
}

fn press(session: &mut Session, keys: &[String], down: bool) {
    if let Some(code) = keys.first() {
        let state = if down { KeyState::Pressed } else { KeyState::Released };
        session.input_mut().process_keyboard(code, state);
    }
}

fn apply_stick(session: &mut Session, bindings: &KeyBindings, stick: Stick) {
    press(session, &bindings.pitch_up, stick.pitch_up);
    press(session, &bindings.pitch_down, stick.pitch_down);
    press(session, &bindings.roll_left, stick.roll_left);
    press(session, &bindings.roll_right, stick.roll_right);
    press(session, &bindings.fire, stick.fire);
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let duration = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<f64>()
            .with_context(|| format!("duration must be a number of seconds, got {:?}", arg))?,
        None => DEFAULT_DURATION,
    };

    let config = GameConfig::load();
    config.validate().context("config failed validation")?;
    let bindings = config.bindings.clone();
    let toggle = bindings.camera_toggle.clone();

    log::info!("Starting Skyfire demo: {:.0}s at {:.0} Hz", duration, FRAME_RATE);

    let mut session = Session::new(config);
    session.set_viewport(1280, 720);
    let mut hud = LogHud::default();
    let mut host = CountingHost::default();

    let frames = (duration * FRAME_RATE).ceil() as u64;
    // Show off the orbit camera for a few seconds mid-flight.
    let orbit_window = (10.0 * FRAME_RATE) as u64..(14.0 * FRAME_RATE) as u64;

    for frame in 0..=frames {
        let timestamp = frame as f64 / FRAME_RATE;

        let stick = autopilot(&session);
        apply_stick(&mut session, &bindings, stick);

        if frame == orbit_window.start || frame == orbit_window.end {
            session.input_mut().process_keyboard(&toggle, KeyState::Pressed);
        } else if frame == orbit_window.start + 1 || frame == orbit_window.end + 1 {
            session.input_mut().process_keyboard(&toggle, KeyState::Released);
        }
        if orbit_window.contains(&frame) {
            let input = session.input_mut();
            input.process_pointer_button(KeyState::Pressed);
            input.process_pointer_motion((4.0, 0.5));
        } else if frame == orbit_window.end {
            session.input_mut().process_pointer_button(KeyState::Released);
        }

        session.frame(timestamp, &mut hud);
        session.sync_scene(&mut host);

        if session.kills() == session.targets().len() {
            break;
        }
    }

    let hud_data = session.hud_data();
    log::info!(
        "Demo finished after {:.1}s: kills {}, {} frames rendered ({} visible / {} hidden nodes)",
        session.elapsed_seconds(),
        hud_data.kills_display(),
        host.frames,
        host.visible_nodes,
        host.hidden_nodes
    );

    Ok(())
}
