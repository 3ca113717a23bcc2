//! Explosion bursts: a growing core plus a shell of outward-flying sparks.
//!
//! Finished bursts hand their particle buffers back to a free list, so steady
//! play doesn't allocate once a few bursts have been seen.

use engine_core::{SceneNode, Transform, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Explosion tunables. Ranges are `(min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionConfig {
    pub particle_count: usize,
    /// Seconds from spawn until fully faded.
    pub lifetime: f32,
    /// Outward speed of each spark.
    pub particle_speed: (f32, f32),
    /// Starting scale of each spark.
    pub particle_scale: (f32, f32),
    pub core_scale: f32,
    /// Extra core scale reached at the end of the lifetime.
    pub core_growth: f32,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            particle_count: 24,
            lifetime: 1.2,
            particle_speed: (8.0, 20.0),
            particle_scale: (0.4, 1.0),
            core_scale: 2.0,
            core_growth: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExplosionParticle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub initial_scale: f32,
    pub scale: f32,
}

/// One burst in progress.
#[derive(Debug, Clone)]
pub struct Explosion {
    pub origin: Vec3,
    pub elapsed: f32,
    pub max_lifetime: f32,
    pub particles: Vec<ExplosionParticle>,
    core_base: f32,
    core_growth: f32,
}

impl Explosion {
    /// Fraction of the lifetime used, in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.max_lifetime <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.max_lifetime).clamp(0.0, 1.0)
    }

    /// Shared opacity of the core and every spark. Falls linearly to zero.
    pub fn opacity(&self) -> f32 {
        1.0 - self.progress()
    }

    pub fn core_scale(&self) -> f32 {
        self.core_base * (1.0 + self.core_growth * self.progress())
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.max_lifetime
    }

    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        let fade = 1.0 - self.progress();
        for p in &mut self.particles {
            p.position += p.velocity * dt;
            p.scale = p.initial_scale * fade;
        }
    }

    pub fn core_node(&self) -> SceneNode {
        SceneNode::new(Transform::from_position(self.origin))
            .with_scale(self.core_scale())
            .with_opacity(self.opacity())
    }

    pub fn particle_nodes(&self) -> impl Iterator<Item = SceneNode> + '_ {
        let opacity = self.opacity();
        self.particles.iter().map(move |p| {
            SceneNode::new(Transform::from_position(p.position))
                .with_scale(p.scale)
                .with_opacity(opacity)
        })
    }
}

/// Live explosions plus recycled particle buffers.
#[derive(Debug, Default)]
pub struct ExplosionPool {
    config: ExplosionConfig,
    active: Vec<Explosion>,
    free: Vec<Vec<ExplosionParticle>>,
}

impl ExplosionPool {
    pub fn new(config: ExplosionConfig) -> Self {
        Self {
            config,
            active: Vec::new(),
            free: Vec::new(),
        }
    }

    pub fn active(&self) -> &[Explosion] {
        &self.active
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Number of particle buffers waiting for reuse.
    pub fn pooled(&self) -> usize {
        self.free.len()
    }

    /// Start a burst at `origin`.
    pub fn spawn(&mut self, origin: Vec3, rng: &mut impl Rng) {
        let mut particles = self.free.pop().unwrap_or_default();
        particles.clear();
        particles.reserve(self.config.particle_count);

        for _ in 0..self.config.particle_count {
            let speed = sample(rng, self.config.particle_speed);
            let scale = sample(rng, self.config.particle_scale);
            particles.push(ExplosionParticle {
                position: origin,
                velocity: random_unit_vector(rng) * speed,
                initial_scale: scale,
                scale,
            });
        }

        self.active.push(Explosion {
            origin,
            elapsed: 0.0,
            max_lifetime: self.config.lifetime,
            particles,
            core_base: self.config.core_scale,
            core_growth: self.config.core_growth,
        });
    }

    /// Age every burst and retire the finished ones. Returns how many retired.
    pub fn update(&mut self, dt: f32) -> usize {
        for explosion in &mut self.active {
            explosion.update(dt);
        }

        let mut retired = 0;
        let mut i = 0;
        while i < self.active.len() {
            if self.active[i].is_finished() {
                let done = self.active.swap_remove(i);
                self.free.push(done.particles);
                retired += 1;
            } else {
                i += 1;
            }
        }
        retired
    }
}

fn sample(rng: &mut impl Rng, (lo, hi): (f32, f32)) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

/// Uniformly distributed direction on the unit sphere.
fn random_unit_vector(rng: &mut impl Rng) -> Vec3 {
    let z: f32 = rng.gen_range(-1.0..1.0);
    let theta: f32 = rng.gen_range(0.0..TAU);
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * theta.cos(), z, r * theta.sin())
}
