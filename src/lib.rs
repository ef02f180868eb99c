//! Kessel Run - a scrolling 2D space-arcade game
//!
//! Core modules:
//! - `sim`: Simulation core (entities, movement, collisions, world streaming)
//! - `map`: Translation of parsed map records into factory calls
//! - `renderer`: Draw boundary (entities emit draw commands, backends consume them)
//! - `audio`: Named sound events and the audio sink boundary
//! - `platform`: Polled input
//! - `settings` / `tuning`: Configuration and canvas-scaled game balance

pub mod audio;
pub mod error;
pub mod game;
pub mod map;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use game::Game;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants that do not scale with the canvas
pub mod consts {
    /// Steering delta per tick while a turn input is held (radians)
    pub const TURN_SPEED: f32 = 0.1;
    /// Velocity cap for frictioned bodies
    pub const TOP_SPEED: f32 = 10.0;
    /// Per-tick velocity decay for frictioned bodies
    pub const FRICTION: f32 = 0.99;
    /// Below this speed a frictioned body comes to rest
    pub const REST_SPEED: f32 = 0.02;
    /// Above this speed a body counts as moving for windowing
    pub const MOVING_SPEED: f32 = 0.01;

    /// Default lifespan in ticks (bullets, particles)
    pub const DEFAULT_LIFESPAN: f32 = 30.0;
    /// Default body mass
    pub const DEFAULT_MASS: f32 = 10.0;
    /// Gravity separation clamp (world units)
    pub const GRAVITY_MIN_DISTANCE: f32 = 10.0;
    pub const GRAVITY_MAX_DISTANCE: f32 = 30.0;

    /// Wall-clock cooldown between shots for enemies and turrets (ms)
    pub const FIRE_INTERVAL_MS: f64 = 1000.0;

    /// Craft resources
    pub const CRAFT_LIVES: u32 = 6;
    pub const CRAFT_POWER: f32 = 10.0;
    pub const THRUST_COST: f32 = 0.01;
    pub const SHOT_COST: f32 = 0.3;
    /// Ticks the craft stays tinted after a hit (cosmetic only)
    pub const HIT_TINT_TICKS: u32 = 20;

    /// Craft screen position as a fraction of the viewport from the top-left
    pub const CAMERA_THRESHOLD: f32 = 0.5;

    /// Solid response tuning
    pub const EXCLUSION_NUDGE: f32 = 0.1;
    pub const SELF_DAMPING: f32 = 0.9;
    pub const OTHER_DAMPING: f32 = 0.75;
    pub const IMPULSE_TRANSFER: f32 = 0.5;

    /// Launch speed of split asteroid children
    pub const SPLIT_SPEED: f32 = 5.0;
    /// Split children diverge by these offsets from the parent heading (degrees)
    pub const SPLIT_ANGLES_DEG: [f32; 2] = [45.0, 270.0];

    /// Explosion lifespan = sqrt(size) * this; decays by 2 per tick
    pub const EXPLOSION_LIFESPAN_FACTOR: f32 = 1.6;
    pub const EXPLOSION_DECAY: f32 = 2.0;
    pub const EXPLOSION_PARTICLES_PER_TICK: usize = 5;
    pub const EXPLOSION_MASS: f32 = 10.0;
    pub const SHOCKWAVE_MASS: f32 = 80.0;

    /// Singularity pull range as a fraction of the canvas
    pub const SINGULARITY_RANGE: f32 = 0.7;
    pub const SINGULARITY_MASS: f32 = 1.0;

    /// Maximum particles carried by a single emitter
    pub const MAX_PARTICLES: usize = 256;
}

/// Convert degrees to radians
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU { 0.0 } else { wrapped }
}

/// Unit heading for a body angle.
///
/// Angle 0 points up the screen (negative y) and positive angles turn
/// counter-clockwise on screen: the direction is `-angle + 270°`.
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::from_angle(-angle + 3.0 * std::f32::consts::FRAC_PI_2)
}

/// Body angle that makes `heading` point from `from` toward `to`
#[inline]
pub fn facing(from: Vec2, to: Vec2) -> f32 {
    let away = from - to;
    wrap_angle(-away.y.atan2(away.x) - 3.0 * std::f32::consts::FRAC_PI_2)
}
