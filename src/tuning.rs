//! Canvas-scaled game balance
//!
//! Sizes and speeds scale with the canvas (the shorter viewport side) so the
//! game plays the same on any screen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Derived balance values for a given viewport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Viewport size in world units
    pub viewport: Vec2,
    /// Shorter viewport side
    pub canvas_size: f32,
    pub craft_speed: f32,
    pub craft_size: f32,
    pub bullet_speed: f32,
    pub bullet_size: f32,
    pub rock_size: f32,
    pub rock_speed: f32,
    /// Rocks at or below this size drop a power-up instead of splitting
    pub split_threshold: f32,
    /// Enemy craft engage the player inside this distance
    pub chase_distance: f32,
    /// Turrets fire when the craft is inside this distance
    pub turret_range: f32,
    /// Explosion pulse reach
    pub explosion_reach: f32,
    /// Gravitational constant
    pub gravity: f32,
    /// Particle size is `particle_scale / random(30, 50)`
    pub particle_scale: f32,
}

impl Tuning {
    pub fn new(width: f32, height: f32) -> Self {
        let canvas = width.min(height);
        let craft_speed = canvas / 5000.0;
        let star_size = canvas / 300.0;
        Self {
            viewport: Vec2::new(width, height),
            canvas_size: canvas,
            craft_speed,
            craft_size: canvas / 13.0,
            bullet_speed: canvas / 50.0,
            bullet_size: star_size * 2.0,
            rock_size: canvas / 2.5,
            rock_speed: craft_speed * 10.0,
            split_threshold: canvas / 25.0,
            chase_distance: canvas,
            turret_range: canvas * 0.6,
            explosion_reach: canvas * 0.7,
            gravity: canvas / 900.0,
            particle_scale: width.max(height),
        }
    }

    /// Pull radius of a singularity with the given range fraction
    pub fn singularity_reach(&self, range: f32) -> f32 {
        self.canvas_size * range
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}
