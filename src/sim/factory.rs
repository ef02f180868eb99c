//! Entity construction
//!
//! Every kind is built here with its capability flags, per-kind state and
//! canvas-scaled size. Visual data is attached as an opaque [`Skin`] that the
//! simulation never reads.

use std::collections::HashMap;

use glam::Vec2;

use super::entity::{Entity, Gun, Kind, Pilot, Shape, Skin};
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{heading, radians};

/// Builds typed entities from position, speed, angle and size
#[derive(Debug, Clone)]
pub struct GameObjectFactory {
    pub tuning: Tuning,
    skins: HashMap<Kind, Skin>,
}

impl GameObjectFactory {
    pub fn new(tuning: Tuning) -> Self {
        let skins = [
            (Kind::Craft, "#AeonFalcone"),
            (Kind::EnemyCraft, "#PI-Fighter"),
            (Kind::Rock, "#asteroid"),
            (Kind::Meteor, "#asteroid"),
            (Kind::Mine, "#mine"),
            (Kind::PowerUp, "#power-up"),
            (Kind::Pointer, "#Target"),
            (Kind::Target, "#Goal"),
        ]
        .into_iter()
        .map(|(kind, asset)| {
            let skin = Skin {
                asset: asset.to_string(),
                view_box: "0 0 100 100".to_string(),
            };
            (kind, skin)
        })
        .collect();

        Self { tuning, skins }
    }

    /// Replace the visual data for a kind
    pub fn set_skin(&mut self, kind: Kind, skin: Skin) {
        self.skins.insert(kind, skin);
    }

    fn base(&self, kind: Kind, position: Vec2, speed: f32, angle: f32, size: f32) -> Entity {
        let mut entity = Entity::new(kind, position, speed, angle, size);
        entity.skin = self.skins.get(&kind).cloned();
        entity
    }

    /// The player, starting at rest facing up
    pub fn create_craft(&self, position: Vec2) -> Entity {
        let mut craft = self.base(Kind::Craft, position, 0.0, 0.0, self.tuning.craft_size);
        craft.collides = true;
        craft.explodes = true;
        craft.pilot = Some(Pilot::default());
        craft
    }

    pub fn create_enemy_craft(&self, position: Vec2, angle: f32) -> Entity {
        let size = self.tuning.craft_size / 1.6;
        let mut enemy = self.base(Kind::EnemyCraft, position, 0.0, angle, size);
        enemy.collides = true;
        enemy.explodes = true;
        enemy.spawns_power_up = true;
        enemy.gun = Some(Gun::new(self.tuning.chase_distance, Some(CRAFT_POWER)));
        enemy
    }

    /// Asteroid that splits on destruction, or drops a power-up once small
    pub fn create_rock(&self, position: Vec2, speed: f32, angle: f32, size: f32) -> Entity {
        let mut rock = self.base(Kind::Rock, position, speed, angle, size);
        rock.collides = true;
        rock.explodes = true;
        rock.spawns_power_up = size <= self.tuning.split_threshold;
        rock
    }

    /// Full-size rock with the default drift heading
    pub fn create_default_rock(&self, position: Vec2) -> Entity {
        self.create_rock(position, 0.0, radians(200.0), self.tuning.rock_size)
    }

    /// Splitless storm asteroid
    pub fn create_meteor(&self, position: Vec2, speed: f32, angle: f32, size: f32) -> Entity {
        let mut meteor = self.base(Kind::Meteor, position, speed, angle, size);
        meteor.collides = true;
        meteor.explodes = true;
        meteor
    }

    pub fn create_mine(&self, position: Vec2) -> Entity {
        let mut mine = self.base(Kind::Mine, position, 0.0, 0.0, self.tuning.craft_size);
        mine.collides = true;
        mine.explodes = true;
        mine
    }

    /// Stationary gun emplacement
    pub fn create_turret(&self, position: Vec2) -> Entity {
        let size = self.tuning.craft_size / 2.0;
        let mut turret = self.base(Kind::Turret, position, 0.0, 0.0, size);
        turret.collides = true;
        turret.explodes = true;
        turret.gun = Some(Gun::new(self.tuning.turret_range, None));
        turret
    }

    /// Power-up pickup. Only the craft can touch it.
    pub fn create_power_up(&self, position: Vec2, speed: f32) -> Entity {
        let size = self.tuning.craft_size / 2.0;
        self.base(Kind::PowerUp, position, speed, 0.0, size)
    }

    /// Projectile launched along `angle` at bullet speed
    pub fn create_bullet(&self, position: Vec2, angle: f32) -> Entity {
        let mut bullet = self.base(Kind::Bullet, position, 0.0, angle, self.tuning.bullet_size);
        bullet.collides = true;
        bullet.velocity = heading(angle) * self.tuning.bullet_speed;
        bullet
    }

    /// Blast left behind by a destroyed entity. Shockwaves hit much harder.
    pub fn create_explosion(&self, position: Vec2, size: f32, shockwave: bool) -> Entity {
        let mut explosion = Entity::new(Kind::Explosion, position, 0.0, 0.0, size);
        explosion.lifespan = size.sqrt() * EXPLOSION_LIFESPAN_FACTOR;
        explosion.mass = if shockwave { SHOCKWAVE_MASS } else { EXPLOSION_MASS };
        explosion.shockwave = shockwave;
        explosion
    }

    /// Objective beacon
    pub fn create_pointer(&self, position: Vec2) -> Entity {
        let craft = self.tuning.craft_size;
        let mut pointer = self.base(Kind::Pointer, position, 0.0, 0.0, craft * 0.7);
        pointer.half_extents = Vec2::new(craft * 0.2, craft * 0.35);
        pointer
    }

    /// Checkpoint marker
    pub fn create_target(&self, position: Vec2) -> Entity {
        self.base(Kind::Target, position, 0.0, 0.0, self.tuning.craft_size / 2.0)
    }

    pub fn create_singularity(&self, position: Vec2) -> Entity {
        let mut singularity = Entity::new(Kind::Singularity, position, 0.0, 0.0, self.tuning.craft_size / 2.0);
        singularity.mass = SINGULARITY_MASS;
        singularity.range = SINGULARITY_RANGE;
        singularity
    }

    /// Axis-aligned area volume (safe zone, no-fly zone or decoration)
    pub fn create_zone(&self, kind: Kind, top_left: Vec2, extent: Vec2) -> Entity {
        let half = extent / 2.0;
        let size = extent.max_element();
        let mut zone = self.base(kind, top_left + half, 0.0, 0.0, size);
        zone.shape = Shape::Rectangle;
        zone.half_extents = half;
        zone.collides = kind != Kind::Decoration;
        zone
    }
}
