//! One play session: owns every piece of simulation state and runs the frame.
//!
//! Nothing here is global, so any number of sessions can run side by side and
//! tests can drive one tick at a time with a fixed delta.

use camera::{Camera, CameraMode, CameraRig, OrbitInput};
use engine_core::Time;
use input::InputState;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::GameConfig;
use crate::effects::ExplosionPool;
use crate::flight::{AircraftState, FlightController, FlightIntents};
use crate::hud::{HUDData, Hud};
use crate::render::{self, RenderHost};
use crate::spawner::generate_targets;
use crate::targets::{update_targets, Target};
use crate::weapons::WeaponSystem;

pub struct Session {
    config: GameConfig,
    input: InputState,
    time: Time,

    // ── Player ──────────────────────────────────────────────────────────
    flight: FlightController,
    aircraft: AircraftState,
    weapons: WeaponSystem,

    // ── World ───────────────────────────────────────────────────────────
    targets: Vec<Target>,
    explosions: ExplosionPool,
    rig: CameraRig,

    /// Effects randomness; seeded from the target seed for reproducible runs.
    rng: StdRng,
    /// Simulated seconds since the session began; drives target hover.
    elapsed: f32,
    kills: usize,
}

impl Session {
    /// Start a session with targets generated from `config.targets`.
    pub fn new(config: GameConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.targets.seed);
        let targets = generate_targets(&config.targets, &mut rng);
        Self::build(config, targets, rng)
    }

    /// Start a session with a caller-supplied target list.
    pub fn with_targets(config: GameConfig, targets: Vec<Target>) -> Self {
        let rng = StdRng::seed_from_u64(config.targets.seed);
        Self::build(config, targets, rng)
    }

    fn build(config: GameConfig, targets: Vec<Target>, rng: StdRng) -> Self {
        let aircraft = AircraftState::new(&config.flight);
        let rig = CameraRig::new(&config.camera, &aircraft.transform());
        log::info!(
            "Session started: {} targets, speed {:.0} ({:.0}-{:.0})",
            targets.len(),
            aircraft.speed,
            config.flight.min_speed,
            config.flight.max_speed
        );

        Self {
            input: config.bindings.input_state(),
            time: Time::with_max_delta(config.frame.max_delta),
            flight: FlightController::new(config.flight),
            aircraft,
            weapons: WeaponSystem::new(config.weapon),
            targets,
            explosions: ExplosionPool::new(config.explosion),
            rig,
            rng,
            elapsed: 0.0,
            kills: 0,
            config,
        }
    }

    /// Host-driven entry point: derive a clamped delta from the frame timestamp
    /// (seconds) and run one tick. Returns the delta used.
    pub fn frame(&mut self, timestamp: f64, hud: &mut dyn Hud) -> f32 {
        let dt = self.time.advance(timestamp);
        self.tick(dt, hud);
        dt
    }

    /// Run one simulation step.
    pub fn tick(&mut self, dt: f32, hud: &mut dyn Hud) {
        let dt = dt.max(0.0);
        self.elapsed += dt;
        self.input.begin_frame();

        // Flight first: fire control and camera read the fresh transform.
        let intents = FlightIntents::from_input(&self.input, &self.config.bindings);
        self.flight.update(&mut self.aircraft, intents, dt);
        let shooter = self.aircraft.transform();

        update_targets(&mut self.targets, dt, self.elapsed, &self.config.targets.heading);

        self.weapons.update(dt);
        if self.config.bindings.is_firing(&self.input) {
            self.weapons.fire(&shooter);
        }
        let explosions = &mut self.explosions;
        let rng = &mut self.rng;
        let hits = self.weapons.resolve_hits(&mut self.targets, |hit| {
            log::info!(
                "Target {} destroyed at ({:.1}, {:.1}, {:.1})",
                hit.target,
                hit.position.x,
                hit.position.y,
                hit.position.z
            );
            explosions.spawn(hit.position, rng);
        });
        if hits > 0 {
            self.kills += hits;
            if self.kills == self.targets.len() {
                log::info!("All {} targets destroyed in {:.1}s", self.kills, self.elapsed);
            }
        }

        self.explosions.update(dt);

        if self.input.consume_toggle() {
            self.rig.toggle(&shooter);
        }
        let orbit_input = OrbitInput {
            drag: self.input.drag_delta(),
            wheel: self.input.wheel_delta(),
        };
        self.rig.update(&shooter, orbit_input);

        self.hud_data().apply(hud);
    }

    /// Submit every node to the render host and draw one frame.
    pub fn sync_scene(&self, host: &mut dyn RenderHost) {
        render::run(self, host);
    }

    /// Resize the viewport.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.rig.camera_mut().set_aspect(width, height);
    }

    pub fn hud_data(&self) -> HUDData {
        HUDData {
            speed: self.aircraft.speed,
            orbit_camera: self.rig.mode().is_orbit(),
            kills: self.kills,
            total_targets: self.targets.len(),
            weapon_ready: self.weapons.is_ready(),
        }
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Where the host writes key and pointer events.
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn aircraft(&self) -> &AircraftState {
        &self.aircraft
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn weapons(&self) -> &WeaponSystem {
        &self.weapons
    }

    pub fn explosions(&self) -> &ExplosionPool {
        &self.explosions
    }

    pub fn camera(&self) -> &Camera {
        self.rig.camera()
    }

    pub fn camera_mode(&self) -> CameraMode {
        self.rig.mode()
    }

    pub fn kills(&self) -> usize {
        self.kills
    }

    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed
    }

    pub fn time(&self) -> &Time {
        &self.time
    }
}
