//! Particles and emitters
//!
//! Exhaust, meteor trails and explosion debris. Particles are force-driven but
//! never collide; they decay by a fixed amount each tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_LIFESPAN, MAX_PARTICLES};

/// Lifespan lost per tick
pub const PARTICLE_DECAY: f32 = 2.0;

/// A single short-lived particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub lifespan: f32,
    pub size: f32,
}

impl Particle {
    /// Spawn a particle drifting upward with a little gaussian jitter
    pub fn new<R: Rng + ?Sized>(position: Vec2, size: f32, rng: &mut R) -> Self {
        let velocity = Vec2::new(gaussian(rng, 0.0, 0.3), gaussian(rng, -1.0, 0.3));
        Self {
            position,
            velocity,
            acceleration: Vec2::ZERO,
            lifespan: DEFAULT_LIFESPAN,
            size,
        }
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    pub fn update(&mut self) {
        self.velocity += self.acceleration;
        self.position += self.velocity;
        self.lifespan -= PARTICLE_DECAY;
        self.acceleration = Vec2::ZERO;
    }

    pub fn is_dead(&self) -> bool {
        self.lifespan < 0.0
    }

    /// Opacity in [0, 1] for renderers
    pub fn alpha(&self) -> f32 {
        (self.lifespan / DEFAULT_LIFESPAN).clamp(0.0, 1.0)
    }
}

/// A particle system anchored to its owner
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Emitter {
    pub particles: Vec<Particle>,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit one particle at `origin`. `scale` is the larger viewport side.
    pub fn add_particle<R: Rng + ?Sized>(&mut self, origin: Vec2, scale: f32, rng: &mut R) -> Option<&mut Particle> {
        if self.particles.len() >= MAX_PARTICLES {
            return None;
        }
        let size = scale / rng.random_range(30.0..50.0);
        self.particles.push(Particle::new(origin, size, rng));
        self.particles.last_mut()
    }

    /// Advance all particles one tick and drop the dead ones
    pub fn run(&mut self) {
        for particle in &mut self.particles {
            particle.update();
        }
        self.particles.retain(|p| !p.is_dead());
    }
}

/// Box-Muller normal sample
fn gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f32, std_dev: f32) -> f32 {
    let u1: f32 = rng.random::<f32>().max(f32::MIN_POSITIVE);
    let u2: f32 = rng.random();
    let z = (-2.0 * u1.ln()).sqrt() * (std::f32::consts::TAU * u2).cos();
    mean + z * std_dev
}
