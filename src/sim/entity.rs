//! Entity model and movement integration
//!
//! Every simulated body is one flat `Entity` tagged with a `Kind`. Behaviour
//! that differs per kind is dispatched on the tag (see `collision` and
//! `tick`); capabilities are plain flags set by the factory.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::particle::Emitter;
use crate::consts::*;
use crate::heading;

/// Stable handle into the world store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Entity variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    /// The player
    Craft,
    EnemyCraft,
    /// Splittable asteroid
    Rock,
    /// Splitless storm asteroid
    Meteor,
    Mine,
    Turret,
    Bullet,
    PowerUp,
    /// Objective beacon (HUD-adjacent, not in the store)
    Pointer,
    /// Checkpoint goal marker
    Target,
    Singularity,
    Explosion,
    SafeZone,
    NoFlyZone,
    /// Background art, never collides or moves
    Decoration,
}

impl Kind {
    /// Solid bodies: pulled by singularities, pushed by explosions
    pub fn is_physical(self) -> bool {
        matches!(
            self,
            Kind::Craft
                | Kind::EnemyCraft
                | Kind::Rock
                | Kind::Meteor
                | Kind::Mine
                | Kind::PowerUp
                | Kind::Target
        )
    }

    /// Short-lived entities that stay simulated after leaving the window
    pub fn is_transient(self) -> bool {
        matches!(self, Kind::Bullet | Kind::Explosion)
    }

    /// Kinds that set their own speed every tick; for everything else
    /// `speed` is a one-shot launch impulse
    pub fn is_self_propelled(self) -> bool {
        matches!(self, Kind::Craft | Kind::EnemyCraft)
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::Craft => "craft",
            Kind::EnemyCraft => "enemy",
            Kind::Rock => "rock",
            Kind::Meteor => "meteor",
            Kind::Mine => "mine",
            Kind::Turret => "turret",
            Kind::Bullet => "bullet",
            Kind::PowerUp => "power-up",
            Kind::Pointer => "pointer",
            Kind::Target => "target",
            Kind::Singularity => "singularity",
            Kind::Explosion => "explosion",
            Kind::SafeZone => "safe-zone",
            Kind::NoFlyZone => "no-fly-zone",
            Kind::Decoration => "decoration",
        }
    }
}

/// Collision geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Shape {
    #[default]
    Circle,
    /// Axis-aligned box spanning `position ± half_extents`
    Rectangle,
}

/// Opaque visual data handed through to the draw boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skin {
    /// Asset id, e.g. `#AeonFalcone`
    pub asset: String,
    pub view_box: String,
}

/// Player resources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pilot {
    /// Hits left before destruction
    pub lives: u32,
    /// Fuel and ammunition
    pub power: f32,
    /// Checkpoints still to reach, head first
    pub targets: VecDeque<EntityId>,
    /// Hit flash countdown. Cosmetic: hits still land while tinted.
    pub tint_ticks: u32,
    /// Engine burning this tick
    pub thrusting: bool,
}

impl Default for Pilot {
    fn default() -> Self {
        Self {
            lives: CRAFT_LIVES,
            power: CRAFT_POWER,
            targets: VecDeque::new(),
            tint_ticks: 0,
            thrusting: false,
        }
    }
}

impl Pilot {
    /// Register a hit. Returns true when the hit is fatal.
    pub fn take_hit(&mut self) -> bool {
        if self.lives <= 1 {
            self.lives = 0;
            return true;
        }
        self.lives -= 1;
        self.tint_ticks = HIT_TINT_TICKS;
        false
    }

    /// Reaching the head checkpoint dequeues it and restores resources
    pub fn reach(&mut self, target: EntityId) -> bool {
        if self.targets.front() != Some(&target) {
            return false;
        }
        self.targets.pop_front();
        self.lives = CRAFT_LIVES;
        self.power = CRAFT_POWER;
        true
    }

    pub fn has_power(&self) -> bool {
        self.power >= 0.0
    }
}

/// Wall-clock driven weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gun {
    /// Timestamp of the last shot (ms)
    pub last_fire_ms: f64,
    pub interval_ms: f64,
    /// Engagement distance
    pub range: f32,
    /// Finite ammunition, spent at `SHOT_COST` per shot; `None` is unlimited
    pub ammo: Option<f32>,
}

impl Gun {
    pub fn new(range: f32, ammo: Option<f32>) -> Self {
        Self {
            last_fire_ms: f64::NEG_INFINITY,
            interval_ms: FIRE_INTERVAL_MS,
            range,
            ammo,
        }
    }

    /// Cooldown elapsed and ammunition left
    pub fn ready(&self, now_ms: f64) -> bool {
        let loaded = self.ammo.is_none_or(|a| a >= 0.0);
        loaded && now_ms - self.last_fire_ms > self.interval_ms
    }

    pub fn fire(&mut self, now_ms: f64) {
        self.last_fire_ms = now_ms;
        if let Some(ammo) = &mut self.ammo {
            *ammo -= SHOT_COST;
        }
    }
}

/// A simulated body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Assigned by the world on insertion
    pub id: EntityId,
    pub kind: Kind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    /// Body angle (radians), see [`crate::heading`]
    pub angle: f32,
    /// Scalar thrust along the heading
    pub speed: f32,
    pub size: f32,
    /// Always `size / 2`
    pub radius: f32,
    /// Horizontal/vertical radii (bounding ellipse or box half-size)
    pub half_extents: Vec2,
    pub mass: f32,
    /// Countdown in ticks
    pub lifespan: f32,
    pub shape: Shape,
    pub collides: bool,
    pub explodes: bool,
    pub spawns_power_up: bool,
    /// Flagged for excision by the world's removal pass
    pub to_be_removed: bool,
    pub emitter: Emitter,
    pub pilot: Option<Pilot>,
    pub gun: Option<Gun>,
    /// Singularity pull range as a fraction of the canvas
    pub range: f32,
    /// Explosion is a heavy mine shockwave
    pub shockwave: bool,
    /// Shooter of a bullet; never collides with it
    pub owner: Option<EntityId>,
    pub skin: Option<Skin>,
}

impl Entity {
    pub fn new(kind: Kind, position: Vec2, speed: f32, angle: f32, size: f32) -> Self {
        let radius = size / 2.0;
        Self {
            id: EntityId::default(),
            kind,
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            angle,
            speed,
            size,
            radius,
            half_extents: Vec2::splat(radius),
            mass: DEFAULT_MASS,
            lifespan: DEFAULT_LIFESPAN,
            shape: Shape::Circle,
            collides: false,
            explodes: false,
            spawns_power_up: false,
            to_be_removed: false,
            emitter: Emitter::new(),
            pilot: None,
            gun: None,
            range: 0.0,
            shockwave: false,
            owner: None,
            skin: None,
        }
    }

    /// Resize, keeping the radius invariant
    pub fn set_size(&mut self, size: f32) {
        let ratio = if self.size > 0.0 { size / self.size } else { 1.0 };
        self.size = size;
        self.radius = size / 2.0;
        self.half_extents *= ratio;
    }

    /// Value comparison: same kind, speed, angle and position
    pub fn equals(&self, other: &Entity) -> bool {
        self.kind == other.kind
            && self.speed == other.speed
            && self.angle == other.angle
            && self.position == other.position
    }

    pub fn is_moving(&self) -> bool {
        self.velocity.length() > MOVING_SPEED
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    /// Attract (or repel) `body` toward this entity.
    ///
    /// Only `body` is affected; mutual attraction takes two calls.
    pub fn apply_gravity(&self, body: &mut Entity, gravity: f32, repel: bool) {
        apply_gravity_from(self.position, self.mass, body, gravity, repel);
    }

    /// Integrate one tick
    pub fn handle_movement(&mut self, friction: bool) {
        self.acceleration += heading(self.angle) * self.speed;
        self.velocity += self.acceleration;

        if friction {
            self.velocity = self.velocity.clamp_length_max(TOP_SPEED);
            if self.velocity.length() > REST_SPEED {
                self.velocity *= FRICTION;
            } else {
                self.velocity = Vec2::ZERO;
            }
            self.acceleration = Vec2::ZERO;
        }

        self.position += self.velocity;
    }

    /// Bounding box corners (min, max)
    pub fn bounds(&self) -> (Vec2, Vec2) {
        (self.position - self.half_extents, self.position + self.half_extents)
    }

    /// Whether any part of this entity lies within the rectangle `[min, max]`
    pub fn is_inside_rect(&self, min: Vec2, max: Vec2) -> bool {
        match self.shape {
            Shape::Rectangle => {
                let (lo, hi) = self.bounds();
                lo.x <= max.x && hi.x >= min.x && lo.y <= max.y && hi.y >= min.y
            }
            Shape::Circle => {
                let nearest = self.position.clamp(min, max);
                let r = self.half_extents.max(Vec2::splat(f32::EPSILON));
                let d = (self.position - nearest) / r;
                d.length_squared() <= 1.0
            }
        }
    }

    /// Point just beyond the hull along the heading
    pub fn nozzle(&self, clearance: f32) -> Vec2 {
        self.position + heading(self.angle) * (self.radius + clearance)
    }

    /// Point just behind the hull, opposite the heading
    pub fn exhaust(&self) -> Vec2 {
        self.position - heading(self.angle) * self.radius
    }

    pub fn distance_to(&self, other: &Entity) -> f32 {
        self.position.distance(other.position)
    }
}

/// Inverse-square pull of a point mass on `body`, separation clamped to
/// `[GRAVITY_MIN_DISTANCE, GRAVITY_MAX_DISTANCE]`
pub fn apply_gravity_from(position: Vec2, mass: f32, body: &mut Entity, gravity: f32, repel: bool) {
    let towards = position - body.position;
    let d = towards
        .length()
        .clamp(GRAVITY_MIN_DISTANCE, GRAVITY_MAX_DISTANCE);
    let strength = gravity * mass * body.mass / (d * d);
    let magnitude = if repel { -strength } else { strength };
    body.apply_force(towards.normalize_or_zero() * magnitude);
}
