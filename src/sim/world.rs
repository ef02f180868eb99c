//! World store and camera windowing
//!
//! `coordinates` holds every placed entity (the craft included), sorted by id.
//! `objects_on_screen` is the working set the tick iterates: entities inside
//! the camera rectangle plus anything moving or transient. Singularities live
//! in their own list and are always simulated.
//!
//! All structural changes go through [`World::add`] and
//! [`World::remove_from_world`]; the latter is the only place removal
//! cascades (explosions, power-up drops, rock splits) happen.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{self, Contact};
use super::entity::{Entity, EntityId, Kind};
use super::factory::GameObjectFactory;
use super::state::{Endgame, GameEvent};
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{facing, heading, radians};

/// Simulation context: every entity plus camera, endgame and event queue
#[derive(Debug, Clone)]
pub struct World {
    /// Every placed entity, sorted by id
    pub coordinates: Vec<Entity>,
    /// Ids of the entities simulated this tick (never the craft)
    pub objects_on_screen: Vec<EntityId>,
    /// Gravity wells, always simulated
    pub singularities: Vec<Entity>,
    pub craft: Option<EntityId>,
    /// Objective beacon, kept outside the store
    pub pointer: Option<Entity>,
    pub endgame: Option<Endgame>,
    /// Camera origin in world space
    pub screen_top_left: Vec2,
    pub viewport: Vec2,
    pub factory: GameObjectFactory,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    /// Wall clock of the current tick (ms)
    pub now_ms: f64,
    pub ticks: u64,
    /// Meteor storm cadence; `None` disables timed storms
    pub storm_interval_ms: Option<f64>,
    last_storm_ms: f64,
    pub(crate) rng: Pcg32,
    next_id: u32,
    /// Entities created mid-pass, registered once the pass is over
    pending: Vec<Entity>,
}

impl World {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            coordinates: Vec::new(),
            objects_on_screen: Vec::new(),
            singularities: Vec::new(),
            craft: None,
            pointer: None,
            endgame: None,
            screen_top_left: Vec2::ZERO,
            viewport: tuning.viewport,
            factory: GameObjectFactory::new(tuning),
            events: Vec::new(),
            now_ms: 0.0,
            ticks: 0,
            storm_interval_ms: None,
            last_storm_ms: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            pending: Vec::new(),
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.factory.tuning
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Place an entity in the world and return its id.
    ///
    /// Singularities go to their own list and the pointer replaces the
    /// current beacon; everything else is appended to `coordinates`.
    pub fn add(&mut self, mut entity: Entity) -> EntityId {
        let id = self.allocate_id();
        entity.id = id;
        match entity.kind {
            Kind::Singularity => self.singularities.push(entity),
            Kind::Pointer => self.pointer = Some(entity),
            // Ids only grow, so pushing keeps the list sorted
            _ => self.coordinates.push(entity),
        }
        id
    }

    /// Place an entity and put it straight into the working set
    pub fn add_on_screen(&mut self, entity: Entity) -> EntityId {
        let kind = entity.kind;
        let id = self.add(entity);
        if !matches!(kind, Kind::Singularity | Kind::Pointer) {
            self.objects_on_screen.push(id);
        }
        id
    }

    /// Queue an entity created during a pass
    pub fn spawn(&mut self, entity: Entity) {
        self.pending.push(entity);
    }

    /// Register everything queued with [`World::spawn`]
    pub fn apply_pending_spawns(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending);
        let count = pending.len();
        for entity in pending {
            self.add_on_screen(entity);
        }
        count
    }

    /// Install the player craft with its ordered checkpoint queue
    pub fn set_craft(&mut self, mut craft: Entity, targets: impl IntoIterator<Item = EntityId>) -> EntityId {
        if let Some(pilot) = &mut craft.pilot {
            pilot.targets = targets.into_iter().collect::<VecDeque<_>>();
        }
        let id = self.add(craft);
        self.craft = Some(id);
        id
    }

    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.coordinates.binary_search_by_key(&id, |e| e.id).ok()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id).map(|i| &self.coordinates[i])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.index_of(id).map(|i| &mut self.coordinates[i])
    }

    pub fn craft(&self) -> Option<&Entity> {
        self.craft.and_then(|id| self.get(id))
    }

    pub fn craft_mut(&mut self) -> Option<&mut Entity> {
        let id = self.craft?;
        self.get_mut(id)
    }

    fn craft_index(&self) -> Option<usize> {
        self.craft.and_then(|id| self.index_of(id))
    }

    pub fn is_on_screen(&self, id: EntityId) -> bool {
        self.objects_on_screen.contains(&id)
    }

    /// Record a terminal state. The first one set wins.
    pub fn set_endgame(&mut self, endgame: Endgame) {
        if self.endgame.is_some() {
            return;
        }
        log::info!("Endgame after {} ticks: {}", self.ticks, endgame);
        self.endgame = Some(endgame);
        self.events.push(GameEvent::Ended(endgame));
    }

    /// Excise an entity and run its removal cascade.
    ///
    /// Removing an id that is no longer in the store is a no-op and returns
    /// false.
    pub fn remove_from_world(&mut self, id: EntityId) -> bool {
        let Some(index) = self.index_of(id) else {
            log::trace!("Stale removal of {:?}", id);
            return false;
        };
        let entity = self.coordinates.remove(index);
        self.objects_on_screen.retain(|&other| other != id);
        log::debug!("Removed {} {:?}", entity.kind.name(), id);

        if entity.explodes {
            self.events.push(GameEvent::Explosion);
            let explosion = self
                .factory
                .create_explosion(entity.position, entity.size, entity.kind == Kind::Mine);
            self.add_on_screen(explosion);
        }

        if self.craft == Some(id) {
            self.craft = None;
            self.set_endgame(Endgame::GameOver);
        }

        if entity.spawns_power_up {
            let power_up = self.factory.create_power_up(entity.position, entity.speed);
            self.add_on_screen(power_up);
        } else if entity.kind == Kind::Rock {
            for offset in SPLIT_ANGLES_DEG {
                let child = self.factory.create_rock(
                    entity.position,
                    SPLIT_SPEED,
                    entity.angle + radians(offset),
                    entity.size / 2.0,
                );
                self.add_on_screen(child);
            }
        }

        true
    }

    /// Deferred removal pass: excise everything flagged. Returns the count.
    pub fn flush_removals(&mut self) -> usize {
        let flagged: Vec<EntityId> = self
            .coordinates
            .iter()
            .filter(|e| e.to_be_removed)
            .map(|e| e.id)
            .collect();

        flagged
            .into_iter()
            .filter(|&id| self.remove_from_world(id))
            .count()
    }

    /// Ids of entities inside the rectangle, plus every moving or transient
    /// one regardless of position. The craft is never included.
    pub fn get_points_inside_square(&self, top_left: Vec2, bottom_right: Vec2) -> Vec<EntityId> {
        self.coordinates
            .iter()
            .filter(|e| Some(e.id) != self.craft)
            .filter(|e| e.is_inside_rect(top_left, bottom_right) || e.is_moving() || e.kind.is_transient())
            .map(|e| e.id)
            .collect()
    }

    /// Current camera rectangle (top-left, bottom-right)
    pub fn screen_rect(&self) -> (Vec2, Vec2) {
        (self.screen_top_left, self.screen_top_left + self.viewport)
    }

    /// Recompute the working set for the current camera
    pub fn update_objects_on_screen(&mut self) {
        let (top_left, bottom_right) = self.screen_rect();
        self.objects_on_screen = self.get_points_inside_square(top_left, bottom_right);
    }

    /// Keep the craft at the camera threshold. Returns true if the window moved.
    pub fn recentre_camera(&mut self) -> bool {
        let Some(craft) = self.craft() else {
            return false;
        };
        let top_left = craft.position - self.viewport * CAMERA_THRESHOLD;
        if top_left == self.screen_top_left {
            return false;
        }
        self.screen_top_left = top_left;
        self.update_objects_on_screen();
        true
    }

    /// Snap the camera to the craft and rebuild the working set
    pub fn reset_camera(&mut self) {
        if let Some(craft) = self.craft() {
            self.screen_top_left = craft.position - self.viewport * CAMERA_THRESHOLD;
        }
        self.update_objects_on_screen();
    }

    /// Singularity nearest to `point`
    pub fn closest_singularity(&self, point: Vec2) -> Option<&Entity> {
        self.singularities
            .iter()
            .min_by(|a, b| a.position.distance_squared(point).total_cmp(&b.position.distance_squared(point)))
    }

    /// Where the craft should head: the next checkpoint, or the nearest
    /// singularity once every checkpoint is cleared
    pub fn objective(&self) -> Option<Vec2> {
        let craft = self.craft()?;
        let head = craft.pilot.as_ref().and_then(|p| p.targets.front().copied());
        match head {
            Some(target) => self.get(target).map(|t| t.position),
            None => self.closest_singularity(craft.position).map(|s| s.position),
        }
    }

    /// Place the objective beacon between the craft and its objective,
    /// clamped inside the screen
    pub fn update_pointer(&mut self) {
        let (Some(craft), Some(objective)) = (self.craft(), self.objective()) else {
            return;
        };
        let origin = craft.position;
        let margin = craft.radius * 2.0;
        let canvas = self.tuning().canvas_size;

        let mut distance = origin.distance(objective);
        if distance < canvas * 0.5 {
            distance *= 0.3;
        }
        let angle = facing(origin, objective);
        let (min, max) = self.screen_rect();
        let mut position = origin + heading(angle) * distance;
        if position.x > max.x {
            position.x = max.x - margin;
        }
        if position.y > max.y {
            position.y = max.y - margin;
        }
        if position.x < min.x {
            position.x = min.x + margin;
        }
        if position.y < min.y {
            position.y = min.y + margin;
        }

        match &mut self.pointer {
            Some(pointer) => {
                pointer.position = position;
                pointer.angle = angle;
            }
            None => {
                let mut pointer = self.factory.create_pointer(position);
                pointer.angle = angle;
                self.add(pointer);
            }
        }
    }

    /// Random point on the camera rectangle's border
    pub fn random_edge_position(&mut self) -> Vec2 {
        let Vec2 { x, y } = self.screen_top_left;
        let Vec2 { x: w, y: h } = self.viewport;
        match self.rng.random_range(0..4) {
            0 => Vec2::new(x + self.rng.random::<f32>() * w, y),
            1 => Vec2::new(x + w, y + self.rng.random::<f32>() * h),
            2 => Vec2::new(x + self.rng.random::<f32>() * w, y + h),
            _ => Vec2::new(x, y + self.rng.random::<f32>() * h),
        }
    }

    /// Two small meteors from the screen edges sharing one heading
    pub fn spawn_meteor_storm(&mut self, angle: f32) {
        log::info!("Meteor storm at tick {}", self.ticks);
        self.events.push(GameEvent::Alarm);
        let (speed, size) = (self.tuning().rock_speed, self.tuning().rock_size / 10.0);
        for _ in 0..2 {
            let position = self.random_edge_position();
            let meteor = self.factory.create_meteor(position, speed, angle, size);
            self.add_on_screen(meteor);
        }
    }

    /// Fire a storm when the wall-clock interval has elapsed
    pub fn update_storm_timer(&mut self) {
        let Some(interval) = self.storm_interval_ms else {
            return;
        };
        if self.now_ms - self.last_storm_ms >= interval {
            self.last_storm_ms = self.now_ms;
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            self.spawn_meteor_storm(angle);
        }
    }

    /// Two distinct store entries, mutably
    fn pair_mut(&mut self, i: usize, j: usize) -> (&mut Entity, &mut Entity) {
        debug_assert_ne!(i, j);
        if i < j {
            let (head, tail) = self.coordinates.split_at_mut(j);
            (&mut head[i], &mut tail[0])
        } else {
            let (head, tail) = self.coordinates.split_at_mut(i);
            (&mut tail[0], &mut head[j])
        }
    }

    /// Run entry `i`'s collision check against entry `j`
    pub fn check_pair(&mut self, i: usize, j: usize) -> bool {
        if i == j {
            return false;
        }
        let mut events = std::mem::take(&mut self.events);
        let mut contact = Contact {
            endgame: self.endgame.is_some(),
            craft_size: self.tuning().craft_size,
            gravity: self.tuning().gravity,
            events: &mut events,
        };
        let (this, other) = self.pair_mut(i, j);
        let hit = collision::check_collision(this, other, &mut contact);
        self.events = events;
        hit
    }

    /// Run entry `i`'s collision check against the craft
    pub fn check_against_craft(&mut self, i: usize) -> bool {
        if self.endgame.is_some() {
            return false;
        }
        match self.craft_index() {
            Some(c) => self.check_pair(i, c),
            None => false,
        }
    }
}
