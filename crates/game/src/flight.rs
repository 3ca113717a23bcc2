//! Arcade flight model: self-centring control surfaces and bank-to-turn.
//!
//! There is no force model. Intents move the attitude angles directly, the bank
//! angle bleeds into yaw, and the aircraft flies along its nose at its speed.

use engine_core::{yaw_pitch_roll, Quat, Transform, Vec3, FORWARD_AXIS};
use input::{InputState, KeyBindings};
use serde::{Deserialize, Serialize};

/// Flight tunables. Angles in radians, rates per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    pub start_position: Vec3,
    pub initial_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Speed change per second while speed-up/down is held.
    pub acceleration: f32,
    pub pitch_rate: f32,
    pub roll_rate: f32,
    /// How fast pitch returns to level with no input.
    pub pitch_relax_rate: f32,
    /// How fast roll returns to level with no input.
    pub roll_relax_rate: f32,
    pub max_pitch: f32,
    pub max_roll: f32,
    /// Yaw rate per radian of bank.
    pub turn_coupling: f32,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            start_position: Vec3::new(0.0, 50.0, 0.0),
            initial_speed: 30.0,
            min_speed: 10.0,
            max_speed: 50.0,
            acceleration: 10.0,
            pitch_rate: 1.0,
            roll_rate: 1.5,
            pitch_relax_rate: 0.8,
            roll_relax_rate: 1.2,
            max_pitch: 0.6,
            max_roll: 0.8,
            turn_coupling: 0.8,
        }
    }
}

/// Resolved control intents for one tick, each in {-1, 0, 1}.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlightIntents {
    /// +1 raises the nose.
    pub pitch: f32,
    /// +1 banks left (left wing down).
    pub roll: f32,
    /// +1 speeds up.
    pub speed: f32,
}

impl FlightIntents {
    pub fn new(pitch: f32, roll: f32, speed: f32) -> Self {
        Self { pitch, roll, speed }
    }

    pub fn from_input(input: &InputState, bindings: &KeyBindings) -> Self {
        Self {
            pitch: KeyBindings::axis(input, &bindings.pitch_up, &bindings.pitch_down),
            roll: KeyBindings::axis(input, &bindings.roll_left, &bindings.roll_right),
            speed: KeyBindings::axis(input, &bindings.speed_up, &bindings.speed_down),
        }
    }
}

/// Kinematic state of the player aircraft.
///
/// The attitude angles are the only rotation state; the orientation is rebuilt
/// from them on demand and never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AircraftState {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
    pub speed: f32,
}

impl AircraftState {
    pub fn new(config: &FlightConfig) -> Self {
        Self {
            position: config.start_position,
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            speed: config.initial_speed.clamp(config.min_speed, config.max_speed),
        }
    }

    pub fn orientation(&self) -> Quat {
        yaw_pitch_roll(self.yaw, self.pitch, self.roll)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_position_rotation(self.position, self.orientation())
    }

    /// Unit vector along the nose.
    pub fn forward(&self) -> Vec3 {
        self.orientation() * FORWARD_AXIS
    }
}

/// Applies intents to an [`AircraftState`] once per tick.
#[derive(Debug, Clone)]
pub struct FlightController {
    config: FlightConfig,
}

impl FlightController {
    pub fn new(config: FlightConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FlightConfig {
        &self.config
    }

    pub fn update(&self, state: &mut AircraftState, intents: FlightIntents, dt: f32) {
        let c = &self.config;
        let dt = dt.max(0.0);

        state.speed = (state.speed + intents.speed.clamp(-1.0, 1.0) * c.acceleration * dt)
            .clamp(c.min_speed, c.max_speed);

        state.pitch = steer(
            state.pitch,
            intents.pitch,
            c.pitch_rate,
            c.pitch_relax_rate,
            c.max_pitch,
            dt,
        );
        state.roll = steer(
            state.roll,
            intents.roll,
            c.roll_rate,
            c.roll_relax_rate,
            c.max_roll,
            dt,
        );

        // Coordinated turn: bank produces yaw whether or not the stick is held.
        state.yaw += state.roll * c.turn_coupling * dt;

        let velocity = state.forward() * state.speed * dt;
        state.position += velocity;
    }
}

/// Drive one control surface: input moves it within ±max, no input relaxes it to level.
fn steer(angle: f32, intent: f32, rate: f32, relax_rate: f32, max: f32, dt: f32) -> f32 {
    let intent = intent.clamp(-1.0, 1.0);
    if intent != 0.0 {
        return (angle + intent * rate * dt).clamp(-max, max);
    }
    if angle == 0.0 {
        return 0.0;
    }
    let step = relax_rate * dt;
    // Snap instead of stepping past zero, or the surface would chatter around level.
    if angle.abs() <= step {
        0.0
    } else {
        angle - angle.signum() * step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use input::KeyState;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const DT: f32 = 1.0 / 60.0;

    fn controller() -> (FlightController, AircraftState) {
        let config = FlightConfig::default();
        (FlightController::new(config), AircraftState::new(&config))
    }

    #[test]
    fn speed_up_held_two_seconds_hits_max_exactly() {
        let config = FlightConfig {
            initial_speed: 30.0,
            acceleration: 10.0,
            max_speed: 50.0,
            ..Default::default()
        };
        let flight = FlightController::new(config);
        let mut state = AircraftState::new(&config);
        for _ in 0..8 {
            flight.update(&mut state, FlightIntents::new(0.0, 0.0, 1.0), 0.25);
        }
        assert_eq!(state.speed, 50.0);
        for _ in 0..8 {
            flight.update(&mut state, FlightIntents::new(0.0, 0.0, 1.0), 0.25);
        }
        assert_eq!(state.speed, 50.0);
    }

    #[test]
    fn random_inputs_respect_envelope() {
        let (flight, mut state) = controller();
        let c = *flight.config();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..5_000 {
            let intents = FlightIntents::new(
                rng.gen_range(-1i32..=1) as f32,
                rng.gen_range(-1i32..=1) as f32,
                rng.gen_range(-1i32..=1) as f32,
            );
            let dt = rng.gen_range(0.0..0.25);
            flight.update(&mut state, intents, dt);
            assert!(state.speed >= c.min_speed && state.speed <= c.max_speed);
            assert!(state.pitch.abs() <= c.max_pitch);
            assert!(state.roll.abs() <= c.max_roll);
        }
    }

    #[test]
    fn huge_step_still_clamps() {
        let (flight, mut state) = controller();
        flight.update(&mut state, FlightIntents::new(1.0, -1.0, -1.0), 100.0);
        assert_eq!(state.pitch, flight.config().max_pitch);
        assert_eq!(state.roll, -flight.config().max_roll);
        assert_eq!(state.speed, flight.config().min_speed);
    }

    #[test]
    fn released_controls_settle_exactly_level() {
        let (flight, mut state) = controller();
        for _ in 0..120 {
            flight.update(&mut state, FlightIntents::new(1.0, -1.0, 0.0), DT);
        }
        assert!(state.pitch > 0.0 && state.roll < 0.0);

        for _ in 0..300 {
            flight.update(&mut state, FlightIntents::default(), DT);
            assert!(state.pitch >= 0.0, "pitch overshot level");
            assert!(state.roll <= 0.0, "roll overshot level");
        }
        assert_eq!(state.pitch, 0.0);
        assert_eq!(state.roll, 0.0);
    }

    #[test]
    fn bank_turns_the_aircraft() {
        let (flight, mut state) = controller();
        state.roll = 0.5;
        flight.update(&mut state, FlightIntents::new(0.0, 1.0, 0.0), DT);
        assert!(state.yaw > 0.0);

        let mut level = AircraftState::new(flight.config());
        flight.update(&mut level, FlightIntents::default(), DT);
        assert_eq!(level.yaw, 0.0);
    }

    #[test]
    fn level_flight_moves_along_nose() {
        let (flight, mut state) = controller();
        let start = state.position;
        flight.update(&mut state, FlightIntents::default(), 0.5);
        let moved = state.position - start;
        assert!((moved - Vec3::new(0.0, 0.0, -15.0)).length() < 1e-4);
    }

    #[test]
    fn orientation_tracks_angles() {
        let (flight, mut state) = controller();
        for _ in 0..90 {
            flight.update(&mut state, FlightIntents::new(1.0, 1.0, 0.0), DT);
        }
        let expected = yaw_pitch_roll(state.yaw, state.pitch, state.roll);
        assert!(state.orientation().angle_between(expected) < 1e-6);
        assert!((state.forward().length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn intents_come_from_bindings() {
        let bindings = KeyBindings::default();
        let mut input = bindings.input_state();
        input.process_keyboard("KeyS", KeyState::Pressed);
        input.process_keyboard("KeyA", KeyState::Pressed);
        input.process_keyboard("ControlLeft", KeyState::Pressed);
        let intents = FlightIntents::from_input(&input, &bindings);
        assert_eq!(intents, FlightIntents::new(1.0, 1.0, -1.0));
    }
}
