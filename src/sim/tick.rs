//! Per-frame simulation step
//!
//! One call to [`tick`] advances the world by one rendered frame. Removal and
//! spawning are deferred to the end of the step so the on-screen pass never
//! mutates the collections it walks.

use glam::Vec2;
use rand::Rng;

use super::collision::{self, Contact};
use super::entity::{Entity, EntityId, Kind, apply_gravity_from};
use super::state::{Endgame, GameEvent};
use super::world::World;
use crate::consts::*;
use crate::{facing, heading, wrap_angle};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    /// Thrust held
    pub thrust: bool,
    /// Fire one shot this tick
    pub fire: bool,
    /// Trigger a meteor storm now (debug bind)
    pub spawn_storm: bool,
    /// Wall clock (ms) used for fire cooldowns and storm timing
    pub now_ms: f64,
}

/// Advance the world by one frame
pub fn tick(world: &mut World, input: &TickInput) {
    world.now_ms = input.now_ms;
    world.ticks += 1;

    if input.spawn_storm {
        let angle = world.rng.random_range(0.0..std::f32::consts::TAU);
        world.spawn_meteor_storm(angle);
    }

    if world.endgame.is_none() {
        pilot_craft(world, input);
        world.recentre_camera();
    }

    // Snapshot: the working set is not rebuilt until the pass is over
    let on_screen = world.objects_on_screen.clone();
    for &id in &on_screen {
        let Some(i) = world.index_of(id) else {
            continue;
        };
        world.check_against_craft(i);
        behave(world, i, &on_screen);

        if !world.coordinates[i].collides {
            continue;
        }
        for &other in &on_screen {
            if other == id {
                continue;
            }
            let Some(j) = world.index_of(other) else {
                continue;
            };
            if world.coordinates[j].collides {
                world.check_pair(i, j);
            }
        }
    }

    run_singularities(world, &on_screen);

    world.apply_pending_spawns();
    let removed = world.flush_removals();
    if removed > 0 {
        log::trace!("Tick {}: removed {}", world.ticks, removed);
    }

    for entity in &mut world.coordinates {
        entity.emitter.run();
    }

    let mut drained = false;
    if let Some(pilot) = world.craft_mut().and_then(|c| c.pilot.as_mut()) {
        pilot.tint_ticks = pilot.tint_ticks.saturating_sub(1);
        drained = pilot.power <= 0.0;
    }
    if drained {
        world.set_endgame(Endgame::OutOfPower);
    }

    world.update_storm_timer();
    world.update_pointer();
}

/// Steering, thrust, firing and movement of the player craft
fn pilot_craft(world: &mut World, input: &TickInput) {
    let Some(id) = world.craft else {
        return;
    };
    let Some(i) = world.index_of(id) else {
        return;
    };
    let tuning = world.tuning().clone();
    let craft = &mut world.coordinates[i];
    let Some(pilot) = craft.pilot.as_mut() else {
        return;
    };

    if input.turn_left {
        craft.angle = wrap_angle(craft.angle + TURN_SPEED);
    }
    if input.turn_right {
        craft.angle = wrap_angle(craft.angle - TURN_SPEED);
    }

    let was_thrusting = pilot.thrusting;
    if input.thrust && pilot.has_power() {
        pilot.power -= THRUST_COST;
        pilot.thrusting = true;
        craft.speed = tuning.craft_speed;
        let exhaust = craft.exhaust();
        let push = -heading(craft.angle) / 50.0;
        if let Some(particle) = craft.emitter.add_particle(exhaust, tuning.particle_scale, &mut world.rng) {
            particle.apply_force(push);
        }
    } else {
        pilot.thrusting = false;
        craft.speed = 0.0;
    }
    let thrusting = craft.pilot.as_ref().is_some_and(|p| p.thrusting);
    if thrusting != was_thrusting {
        world
            .events
            .push(if thrusting { GameEvent::ThrustStart } else { GameEvent::ThrustStop });
    }

    let craft = &mut world.coordinates[i];
    let can_fire = craft.pilot.as_ref().is_some_and(|p| p.has_power());
    if input.fire && can_fire {
        if let Some(pilot) = craft.pilot.as_mut() {
            pilot.power -= SHOT_COST;
        }
        let mut bullet = world
            .factory
            .create_bullet(craft.nozzle(tuning.bullet_size), craft.angle);
        bullet.owner = Some(craft.id);
        world.spawn(bullet);
        world.events.push(GameEvent::Blaster);
    }

    world.coordinates[i].handle_movement(true);
}

/// Kind-specific behaviour and movement of on-screen entry `i`
fn behave(world: &mut World, i: usize, on_screen: &[EntityId]) {
    let craft_position = match world.endgame {
        None => world.craft().map(|c| c.position),
        Some(_) => None,
    };
    let tuning = world.tuning().clone();
    let now_ms = world.now_ms;

    match world.coordinates[i].kind {
        Kind::EnemyCraft => {
            let enemy = &mut world.coordinates[i];
            let in_range = craft_position.filter(|&p| enemy.position.distance(p) < tuning.chase_distance);
            match in_range {
                Some(target) => {
                    enemy.angle = facing(enemy.position, target);
                    enemy.speed = tuning.craft_speed / 2.0;
                    if fire_gun(enemy, now_ms) {
                        let mut bullet = world
                            .factory
                            .create_bullet(enemy.nozzle(tuning.bullet_size), enemy.angle);
                        bullet.owner = Some(enemy.id);
                        world.spawn(bullet);
                        world.events.push(GameEvent::Blaster);
                    }
                }
                None => enemy.speed = 0.0,
            }
            world.coordinates[i].handle_movement(true);
        }
        Kind::Turret => {
            let turret = &mut world.coordinates[i];
            let Some(target) = craft_position else {
                return;
            };
            turret.angle = facing(turret.position, target);
            let range = turret.gun.as_ref().map_or(0.0, |g| g.range);
            if turret.position.distance(target) <= range && fire_gun(turret, now_ms) {
                let mut bullet = world
                    .factory
                    .create_bullet(turret.nozzle(tuning.bullet_size), turret.angle);
                bullet.owner = Some(turret.id);
                world.spawn(bullet);
                world.events.push(GameEvent::Laser);
            }
        }
        Kind::Bullet => {
            let bullet = &mut world.coordinates[i];
            bullet.handle_movement(false);
            bullet.acceleration = Vec2::ZERO;
            if bullet.lifespan > 0.0 {
                bullet.lifespan -= 1.0;
            } else {
                bullet.to_be_removed = true;
            }
        }
        Kind::Explosion => explode(world, i, on_screen),
        Kind::Meteor => {
            let meteor = &mut world.coordinates[i];
            meteor.emitter.add_particle(meteor.position, tuning.particle_scale, &mut world.rng);
            drift(meteor);
        }
        Kind::Rock | Kind::Mine | Kind::PowerUp | Kind::Target => drift(&mut world.coordinates[i]),
        Kind::Craft
        | Kind::Pointer
        | Kind::Singularity
        | Kind::SafeZone
        | Kind::NoFlyZone
        | Kind::Decoration => {}
    }
}

/// Passive bodies: launch speed is a one-shot impulse
fn drift(entity: &mut Entity) {
    entity.handle_movement(true);
    if !entity.kind.is_self_propelled() {
        entity.speed = 0.0;
    }
}

/// Fire the entity's gun if its wall-clock cooldown has elapsed
fn fire_gun(entity: &mut Entity, now_ms: f64) -> bool {
    match &mut entity.gun {
        Some(gun) if gun.ready(now_ms) => {
            gun.fire(now_ms);
            true
        }
        _ => false,
    }
}

/// Explosion pulse: debris particles and a repulsive push on nearby bodies
fn explode(world: &mut World, i: usize, on_screen: &[EntityId]) {
    let (reach, gravity, scale) = {
        let t = world.tuning();
        (t.explosion_reach, t.gravity, t.particle_scale)
    };

    let blast = &mut world.coordinates[i];
    if blast.lifespan <= 0.0 {
        blast.to_be_removed = true;
        return;
    }
    blast.lifespan -= EXPLOSION_DECAY;

    let force = (if blast.shockwave { blast.size * 2.0 } else { blast.size }).sqrt();
    for _ in 0..EXPLOSION_PARTICLES_PER_TICK {
        let direction = Vec2::from_angle(world.rng.random_range(0.0..std::f32::consts::TAU));
        if let Some(particle) = blast.emitter.add_particle(blast.position, scale, &mut world.rng) {
            particle.apply_force(direction * force);
        }
    }

    let (id, position, mass) = (blast.id, blast.position, blast.mass);
    for &other in on_screen {
        let Some(j) = world.index_of(other) else {
            continue;
        };
        let body = &mut world.coordinates[j];
        if body.id != id && body.kind.is_physical() && body.position.distance(position) < reach {
            apply_gravity_from(position, mass, body, gravity, true);
        }
    }
    if let Some(craft) = world.craft_mut() {
        apply_gravity_from(position, mass, craft, gravity, true);
    }
}

/// Gravity wells: pull and swallow nearby bodies, decide the run when the
/// craft falls in
fn run_singularities(world: &mut World, on_screen: &[EntityId]) {
    let tuning = world.tuning().clone();
    let craft_id = world.craft;
    let endgame_active = world.endgame.is_some();
    let mut verdict = None;

    let World {
        coordinates,
        singularities,
        events,
        ..
    } = world;
    for well in singularities.iter_mut() {
        let reach = tuning.singularity_reach(well.range);

        for &id in on_screen {
            let Some(j) = index_of(coordinates, id) else {
                continue;
            };
            let body = &mut coordinates[j];
            if body.to_be_removed || !body.kind.is_physical() || body.distance_to(well) >= reach {
                continue;
            }
            well.apply_gravity(body, tuning.gravity, false);
            let mut contact = Contact {
                endgame: endgame_active,
                craft_size: tuning.craft_size,
                gravity: tuning.gravity,
                events: &mut *events,
            };
            collision::check_collision(body, well, &mut contact);
        }

        let Some(c) = craft_id.and_then(|id| index_of(coordinates, id)) else {
            continue;
        };
        let craft = &mut coordinates[c];
        let distance = craft.distance_to(well);
        if craft.to_be_removed || distance >= reach {
            continue;
        }
        if distance < well.size {
            let cleared = craft.pilot.as_ref().is_none_or(|p| p.targets.is_empty());
            verdict.get_or_insert(if cleared { Endgame::MadeIt } else { Endgame::GameOver });
            continue;
        }
        well.apply_gravity(craft, tuning.gravity, false);
    }

    if let Some(endgame) = verdict {
        world.set_endgame(endgame);
    }
}

fn index_of(coordinates: &[Entity], id: EntityId) -> Option<usize> {
    coordinates.binary_search_by_key(&id, |e| e.id).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    /// 1000×1000 world with the craft parked mid-screen
    fn world_with_craft() -> (World, EntityId) {
        world_sized(1000.0, 1000.0)
    }

    fn world_sized(width: f32, height: f32) -> (World, EntityId) {
        let mut world = World::new(Tuning::new(width, height), 42);
        let craft = world.factory.create_craft(Vec2::new(width / 2.0, height / 2.0));
        let id = world.set_craft(craft, []);
        world.reset_camera();
        (world, id)
    }

    fn lives(world: &World) -> Option<u32> {
        world.craft().and_then(|c| c.pilot.as_ref()).map(|p| p.lives)
    }

    #[test]
    fn test_steering_wraps() {
        let (mut world, _) = world_with_craft();
        let input = TickInput {
            turn_right: true,
            ..Default::default()
        };
        tick(&mut world, &input);
        let angle = world.craft().expect("craft alive").angle;
        assert!((angle - (std::f32::consts::TAU - TURN_SPEED)).abs() < 1e-5);
    }

    #[test]
    fn test_thrust_costs_power_and_moves_camera() {
        let (mut world, _) = world_with_craft();
        let input = TickInput {
            thrust: true,
            ..Default::default()
        };
        tick(&mut world, &input);
        let craft = world.craft().cloned().expect("craft alive");
        let power = craft.pilot.as_ref().expect("craft has a pilot").power;
        assert!((power - (CRAFT_POWER - THRUST_COST)).abs() < 1e-6);
        assert!(craft.position.y < 500.0);
        assert_eq!(world.screen_top_left, craft.position - Vec2::splat(500.0));
        assert!(world.events.contains(&GameEvent::ThrustStart));

        tick(&mut world, &TickInput::default());
        assert!(world.events.contains(&GameEvent::ThrustStop));
    }

    #[test]
    fn test_fire_spawns_bullet_ahead() {
        let (mut world, _) = world_with_craft();
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut world, &input);
        let bullets: Vec<&Entity> = world.coordinates.iter().filter(|e| e.kind == Kind::Bullet).collect();
        assert_eq!(bullets.len(), 1);
        assert!(bullets[0].position.y < 500.0);
        assert!(world.is_on_screen(bullets[0].id));
        let power = world.craft().and_then(|c| c.pilot.as_ref()).map(|p| p.power);
        assert_eq!(power, Some(CRAFT_POWER - SHOT_COST));
    }

    #[test]
    fn test_firing_at_cruise_speed_is_safe() {
        let (mut world, craft) = world_sized(800.0, 800.0);
        let cruise = TickInput {
            thrust: true,
            ..Default::default()
        };
        for _ in 0..40 {
            tick(&mut world, &cruise);
        }
        let speed = world.craft().expect("craft alive").velocity.length();
        assert!(speed > world.tuning().bullet_size / 2.0);

        tick(&mut world, &TickInput { fire: true, ..cruise.clone() });
        for _ in 0..3 {
            tick(&mut world, &cruise);
        }

        assert!(world.endgame.is_none());
        assert!(world.get(craft).is_some());
        assert_eq!(lives(&world), Some(CRAFT_LIVES));
        let bullet = world
            .coordinates
            .iter()
            .find(|e| e.kind == Kind::Bullet)
            .expect("bullet in flight");
        assert_eq!(bullet.owner, Some(craft));
    }

    #[test]
    fn test_moving_enemy_survives_its_own_shot() {
        let (mut world, _) = world_sized(3000.0, 1000.0);
        let mut enemy = world.factory.create_enemy_craft(Vec2::new(600.0, 500.0), 0.0);
        enemy.velocity = Vec2::new(TOP_SPEED, 0.0);
        let id = world.add_on_screen(enemy);

        for frame in 0..5 {
            tick(&mut world, &TickInput { now_ms: frame as f64 * 16.0, ..Default::default() });
        }

        assert!(world.get(id).is_some());
        let bullet = world
            .coordinates
            .iter()
            .find(|e| e.kind == Kind::Bullet)
            .expect("bullet in flight");
        assert_eq!(bullet.owner, Some(id));
        assert!(world.endgame.is_none());
    }

    #[test]
    fn test_bullet_expires_after_lifespan() {
        let (mut world, _) = world_with_craft();
        let bullet = world.factory.create_bullet(Vec2::new(100.0, 900.0), 1.5);
        let id = world.add_on_screen(bullet);
        // 30 ticks of lifespan, removed on the 31st
        for _ in 0..30 {
            tick(&mut world, &TickInput::default());
        }
        assert!(world.get(id).is_some());
        tick(&mut world, &TickInput::default());
        assert!(world.get(id).is_none());
    }

    #[test]
    fn test_bullet_one_shot_splits_rock() {
        let (mut world, _) = world_with_craft();
        let size = world.tuning().rock_size;
        let rock = world.factory.create_rock(Vec2::new(200.0, 200.0), 0.0, 0.0, size);
        let rock_id = world.add_on_screen(rock);
        let bullet = world.factory.create_bullet(Vec2::new(200.0, 200.0 + size / 2.0), 0.0);
        let bullet_id = world.add_on_screen(bullet);

        tick(&mut world, &TickInput::default());

        assert!(world.get(rock_id).is_none());
        assert!(world.get(bullet_id).is_none());
        let children: Vec<&Entity> = world.coordinates.iter().filter(|e| e.kind == Kind::Rock).collect();
        assert_eq!(children.len(), 2);
        for child in children {
            assert_eq!(child.size, size / 2.0);
            assert!(world.is_on_screen(child.id));
        }
    }

    #[test]
    fn test_fatal_hit_is_game_over() {
        let (mut world, craft) = world_with_craft();
        if let Some(pilot) = world.craft_mut().and_then(|c| c.pilot.as_mut()) {
            pilot.lives = 1;
        }
        let rock = world.factory.create_rock(Vec2::new(520.0, 500.0), 0.0, 0.0, 40.0);
        world.add_on_screen(rock);

        tick(&mut world, &TickInput::default());
        assert!(world.get(craft).is_none());
        assert_eq!(world.endgame, Some(Endgame::GameOver));
        assert_eq!(world.endgame.map(|e| e.message()), Some("Game Over"));
    }

    #[test]
    fn test_hit_costs_one_life() {
        let (mut world, _) = world_with_craft();
        let rock = world.factory.create_rock(Vec2::new(520.0, 500.0), 0.0, 0.0, 40.0);
        world.add_on_screen(rock);
        tick(&mut world, &TickInput::default());
        assert_eq!(lives(&world), Some(CRAFT_LIVES - 1));
        assert!(world.endgame.is_none());
    }

    #[test]
    fn test_target_checkpoint() {
        let mut world = World::new(Tuning::new(1000.0, 1000.0), 1);
        let t1 = world.add(world.factory.create_target(Vec2::new(510.0, 500.0)));
        let t2 = world.add(world.factory.create_target(Vec2::new(900.0, 100.0)));
        let mut craft = world.factory.create_craft(Vec2::new(500.0, 500.0));
        if let Some(pilot) = craft.pilot.as_mut() {
            pilot.lives = 2;
            pilot.power = 4.0;
        }
        world.set_craft(craft, [t1, t2]);
        world.reset_camera();

        tick(&mut world, &TickInput::default());

        let pilot = world.craft().and_then(|c| c.pilot.clone()).expect("craft has a pilot");
        assert_eq!(pilot.targets, [t2]);
        assert_eq!(pilot.lives, 6);
        assert_eq!(pilot.power, 10.0);
    }

    #[test]
    fn test_singularity_win_and_loss() {
        for (targets_left, expected) in [(false, Endgame::MadeIt), (true, Endgame::GameOver)] {
            let mut world = World::new(Tuning::new(1000.0, 1000.0), 3);
            let target = world.add(world.factory.create_target(Vec2::new(-5000.0, 0.0)));
            world.add(world.factory.create_singularity(Vec2::new(520.0, 500.0)));
            let craft = world.factory.create_craft(Vec2::new(500.0, 500.0));
            let queue = if targets_left { vec![target] } else { Vec::new() };
            world.set_craft(craft, queue);
            world.reset_camera();

            tick(&mut world, &TickInput::default());
            assert_eq!(world.endgame, Some(expected));
        }
    }

    #[test]
    fn test_singularity_swallows_rock() {
        let (mut world, _) = world_with_craft();
        world.add(world.factory.create_singularity(Vec2::new(100.0, 100.0)));
        let rock = world.factory.create_rock(Vec2::new(110.0, 100.0), 0.0, 0.0, 20.0);
        let rock_id = world.add_on_screen(rock);
        let size_before = world.singularities[0].size;

        tick(&mut world, &TickInput::default());

        assert!(world.get(rock_id).is_none());
        let well = &world.singularities[0];
        assert_eq!(well.mass, SINGULARITY_MASS + 1.0);
        assert_eq!(well.size, size_before + world.tuning().craft_size / 2.0);
    }

    #[test]
    fn test_out_of_power() {
        let (mut world, _) = world_with_craft();
        if let Some(pilot) = world.craft_mut().and_then(|c| c.pilot.as_mut()) {
            pilot.power = 0.005;
        }
        let input = TickInput {
            thrust: true,
            ..Default::default()
        };
        tick(&mut world, &input);
        assert_eq!(world.endgame, Some(Endgame::OutOfPower));
    }

    #[test]
    fn test_enemy_fires_on_wall_clock() {
        // Wide screen so the enemy sits in chase range but beyond bullet reach
        let (mut world, _) = world_sized(3000.0, 1000.0);
        let enemy = world.factory.create_enemy_craft(Vec2::new(600.0, 500.0), 0.0);
        world.add_on_screen(enemy);

        let bullets = |w: &World| w.coordinates.iter().filter(|e| e.kind == Kind::Bullet).count();

        tick(&mut world, &TickInput { now_ms: 0.0, ..Default::default() });
        assert_eq!(bullets(&world), 1);
        // Many frames inside the cooldown fire nothing
        for frame in 1..30 {
            tick(&mut world, &TickInput { now_ms: frame as f64 * 16.0, ..Default::default() });
        }
        assert_eq!(bullets(&world), 1);
        tick(&mut world, &TickInput { now_ms: 1001.0, ..Default::default() });
        assert_eq!(bullets(&world), 2);
    }

    #[test]
    fn test_enemy_turns_toward_craft() {
        let (mut world, _) = world_with_craft();
        let enemy = world.factory.create_enemy_craft(Vec2::new(200.0, 500.0), 0.0);
        let id = world.add_on_screen(enemy);
        tick(&mut world, &TickInput::default());
        let angle = world.get(id).expect("enemy alive").angle;
        let dir = heading(angle);
        assert!((dir - Vec2::X).length() < 1e-4);
    }

    #[test]
    fn test_explosion_pushes_and_expires() {
        let (mut world, _) = world_with_craft();
        let rock = world.factory.create_rock(Vec2::new(300.0, 300.0), 0.0, 0.0, 30.0);
        let rock_id = world.add_on_screen(rock);
        let blast = world.factory.create_explosion(Vec2::new(320.0, 300.0), 16.0, false);
        let blast_id = world.add_on_screen(blast);

        tick(&mut world, &TickInput::default());
        let pushed = world.get(rock_id).expect("rock alive").acceleration.x;
        assert!(pushed < 0.0);
        let particles = world.get(blast_id).expect("blast alive").emitter.particles.len();
        assert_eq!(particles, EXPLOSION_PARTICLES_PER_TICK);

        // sqrt(16) * 1.6 = 6.4 lifespan at 2 per tick
        for _ in 0..3 {
            tick(&mut world, &TickInput::default());
        }
        assert!(world.get(blast_id).is_some());
        tick(&mut world, &TickInput::default());
        assert!(world.get(blast_id).is_none());
    }

    #[test]
    fn test_endgame_freezes_craft_but_not_bullets() {
        let (mut world, _) = world_with_craft();
        world.set_endgame(Endgame::OutOfPower);
        let bullet = world.factory.create_bullet(Vec2::new(100.0, 900.0), 0.0);
        let id = world.add_on_screen(bullet);
        let input = TickInput {
            thrust: true,
            turn_left: true,
            ..Default::default()
        };
        tick(&mut world, &input);
        let craft = world.craft().cloned().expect("craft alive");
        assert_eq!(craft.position, Vec2::new(500.0, 500.0));
        assert_eq!(craft.angle, 0.0);
        assert!(world.get(id).expect("bullet alive").position.y < 900.0);
    }

    #[test]
    fn test_split_children_drift_then_coast() {
        let (mut world, _) = world_with_craft();
        let rock = world.factory.create_rock(Vec2::new(100.0, 100.0), SPLIT_SPEED, 0.0, 50.0);
        let id = world.add_on_screen(rock);
        tick(&mut world, &TickInput::default());
        let rock = world.get(id).cloned().expect("rock alive");
        assert_eq!(rock.speed, 0.0);
        assert!(rock.velocity.length() > 0.0);
    }

    proptest! {
        #[test]
        fn prop_tick_is_deterministic(seed in 0u64..1000, turns in proptest::collection::vec(0u8..4, 1..20)) {
            let build = || {
                let mut world = World::new(Tuning::new(800.0, 600.0), seed);
                let craft = world.factory.create_craft(Vec2::new(400.0, 300.0));
                world.set_craft(craft, []);
                let rock = world.factory.create_default_rock(Vec2::new(100.0, 100.0));
                world.add(rock);
                world.reset_camera();
                world
            };
            let mut a = build();
            let mut b = build();
            for (frame, &bits) in turns.iter().enumerate() {
                let input = TickInput {
                    turn_left: bits & 1 != 0,
                    thrust: bits & 2 != 0,
                    now_ms: frame as f64 * 16.0,
                    ..Default::default()
                };
                tick(&mut a, &input);
                tick(&mut b, &input);
            }
            let pa: Vec<[u32; 2]> = a.coordinates.iter().map(|e| e.position.to_array().map(f32::to_bits)).collect();
            let pb: Vec<[u32; 2]> = b.coordinates.iter().map(|e| e.position.to_array().map(f32::to_bits)).collect();
            prop_assert_eq!(pa, pb);
        }
    }
}
