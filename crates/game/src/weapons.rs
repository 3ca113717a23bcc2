//! Fire control: cooldown-gated cannon, projectile flight, expiry and hits.

use engine_core::{Transform, Vec3};
use physics::{first_overlap, CollisionSphere, SweptSphere};
use serde::{Deserialize, Serialize};

use crate::targets::Target;

/// Cannon and projectile tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    /// Projectile speed in units per second.
    pub muzzle_speed: f32,
    /// Minimum seconds between shots.
    pub fire_cooldown: f32,
    /// Seconds a projectile lives before it is discarded.
    pub projectile_lifetime: f32,
    pub projectile_radius: f32,
    pub target_radius: f32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            muzzle_speed: 200.0,
            fire_cooldown: 0.2,
            projectile_lifetime: 2.0,
            projectile_radius: 0.5,
            target_radius: 3.0,
        }
    }
}

/// A cannon round in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: Vec3,
    /// Position before the last integration step; hit tests sweep from here.
    pub previous: Vec3,
    /// Constant velocity; magnitude is the muzzle speed.
    pub velocity: Vec3,
    /// Seconds since it was fired.
    pub lifetime: f32,
    pub active: bool,
}

impl Projectile {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            previous: position,
            velocity,
            lifetime: 0.0,
            active: true,
        }
    }

    pub fn transform(&self) -> Transform {
        let mut t = Transform::from_position(self.position);
        t.look_at(self.position + self.velocity, Vec3::Y);
        t
    }
}

/// A projectile struck a target this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Index into the target slice passed to [`WeaponSystem::resolve_hits`].
    pub target: usize,
    /// Target position at the moment of the hit.
    pub position: Vec3,
}

/// Owns the cannon cooldown and every projectile in flight.
#[derive(Debug, Clone)]
pub struct WeaponSystem {
    config: WeaponConfig,
    /// Seconds until the cannon may fire again; zero when ready.
    cooldown: f32,
    projectiles: Vec<Projectile>,
}

impl WeaponSystem {
    pub fn new(config: WeaponConfig) -> Self {
        Self {
            config,
            cooldown: 0.0,
            projectiles: Vec::new(),
        }
    }

    pub fn config(&self) -> &WeaponConfig {
        &self.config
    }

    /// Check if the cannon can fire.
    pub fn is_ready(&self) -> bool {
        self.cooldown <= 0.0
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Fire one round along the shooter's nose. Returns false while cooling down.
    pub fn fire(&mut self, shooter: &Transform) -> bool {
        if !self.is_ready() {
            return false;
        }
        let velocity = shooter.forward().normalize_or_zero() * self.config.muzzle_speed;
        self.projectiles.push(Projectile::new(shooter.position, velocity));
        self.cooldown = self.config.fire_cooldown;
        log::debug!(
            "Fired from ({:.1}, {:.1}, {:.1}), {} in flight",
            shooter.position.x,
            shooter.position.y,
            shooter.position.z,
            self.projectiles.len()
        );
        true
    }

    /// Tick the cooldown, move projectiles and drop the ones past their lifetime.
    ///
    /// Returns how many expired this tick.
    pub fn update(&mut self, dt: f32) -> usize {
        self.cooldown = (self.cooldown - dt).max(0.0);

        let max_lifetime = self.config.projectile_lifetime;
        for p in self.projectiles.iter_mut().filter(|p| p.active) {
            p.previous = p.position;
            p.position += p.velocity * dt;
            p.lifetime += dt;
            if p.lifetime > max_lifetime {
                p.active = false;
            }
        }
        self.compact()
    }

    /// Test every live projectile against every live target, sweeping each
    /// projectile over the step it just flew.
    ///
    /// A hit deactivates the projectile, destroys the target and is reported
    /// through `on_hit`; each projectile hits at most one target. Returns the hit count.
    pub fn resolve_hits<F>(&mut self, targets: &mut [Target], mut on_hit: F) -> usize
    where
        F: FnMut(Hit),
    {
        let target_radius = self.config.target_radius;
        let projectile_radius = self.config.projectile_radius;
        let mut hits = 0;

        for p in self.projectiles.iter_mut().filter(|p| p.active) {
            let probe = SweptSphere::new(p.previous, p.position, projectile_radius);
            let candidates = targets
                .iter()
                .map(|t| t.is_active().then(|| CollisionSphere::new(t.position, target_radius)));

            if let Some(index) = first_overlap(&probe, candidates) {
                let target = &mut targets[index];
                target.destroyed = true;
                p.active = false;
                hits += 1;
                on_hit(Hit {
                    target: index,
                    position: target.position,
                });
            }
        }

        self.compact();
        hits
    }

    /// Remove inactive projectiles in one pass after marking. Returns how many went.
    fn compact(&mut self) -> usize {
        let before = self.projectiles.len();
        self.projectiles.retain(|p| p.active);
        before - self.projectiles.len()
    }
}
