//! Collision detection and response
//!
//! Detection supports circles (boundary inclusive) and axis-aligned
//! rectangles. Response is picked from a kind × kind table so the whole
//! matrix can be read and tested in one place. Responses never remove
//! anything directly: they flag `to_be_removed` and the world's removal pass
//! runs the cascades afterwards.

use glam::Vec2;

use super::entity::{Entity, Kind, Shape};
use super::state::GameEvent;
use crate::consts::*;

/// What `this` does when it touches `other`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Generic solid body: exclusion nudge, damping and impulse transfer
    Solid,
    /// One-shot projectile: always spent, kills the target unless the game is over
    BulletStrike,
    /// Destroyed by any contact
    Fragile,
    /// Mutual destruction followed by the solid response
    Detonate,
    /// Storm asteroid: mutual destruction, or a hit on the craft
    MeteorImpact,
    /// Power-up pickup by the craft
    Collect,
    /// Checkpoint reached by the craft
    Checkpoint,
    /// Soft boundary pushing the craft out
    Repel,
    /// Protected area destroying meteors
    Shield,
    /// Swallowed by a singularity
    Consumed,
    Ignore,
}

/// Kinds the generic solid response reacts to
fn is_solid(kind: Kind) -> bool {
    matches!(
        kind,
        Kind::Craft
            | Kind::EnemyCraft
            | Kind::Rock
            | Kind::Meteor
            | Kind::Mine
            | Kind::Turret
            | Kind::Bullet
    )
}

/// Collision matrix
pub fn response_for(this: Kind, other: Kind) -> Response {
    use Kind::*;

    match (this, other) {
        // Non-physical participants on either side
        (Decoration | Pointer | Explosion | Singularity, _) => Response::Ignore,
        (_, Decoration | Pointer | Explosion) => Response::Ignore,

        // The craft is only checked against singularities by their own
        // terminal test
        (Craft, Singularity) => Response::Ignore,
        (kind, Singularity) if kind.is_physical() => Response::Consumed,
        (_, Singularity) => Response::Ignore,

        (NoFlyZone, Craft) => Response::Repel,
        (SafeZone, Meteor) => Response::Shield,
        (SafeZone | NoFlyZone, _) | (_, SafeZone | NoFlyZone) => Response::Ignore,

        (PowerUp, Craft) => Response::Collect,
        (Target, Craft) => Response::Checkpoint,
        (PowerUp | Target, _) | (_, PowerUp | Target) => Response::Ignore,

        (Bullet, _) => Response::BulletStrike,
        (Turret, _) => Response::Fragile,
        (Mine, kind) if is_solid(kind) => Response::Detonate,
        (Meteor, kind) if is_solid(kind) => Response::MeteorImpact,
        (Craft | EnemyCraft | Rock, kind) if is_solid(kind) => Response::Solid,
        _ => Response::Ignore,
    }
}

/// Circle contact test.
///
/// Returns the separation vector `b - a` when the circles touch or overlap.
pub fn circle_contact(a: &Entity, b: &Entity) -> Option<Vec2> {
    let d = b.position - a.position;
    (d.length() <= a.radius + b.radius).then_some(d)
}

/// Contact test for any pair of shapes
pub fn detect(a: &Entity, b: &Entity) -> Option<Vec2> {
    let touching = match (a.shape, b.shape) {
        (Shape::Circle, Shape::Circle) => return circle_contact(a, b),
        (Shape::Rectangle, _) => {
            let (min, max) = a.bounds();
            b.is_inside_rect(min, max)
        }
        (_, Shape::Rectangle) => {
            let (min, max) = b.bounds();
            a.is_inside_rect(min, max)
        }
    };
    touching.then(|| b.position - a.position)
}

/// Shared state a response may read or append to
pub struct Contact<'a> {
    /// An endgame is already set
    pub endgame: bool,
    pub craft_size: f32,
    pub gravity: f32,
    pub events: &'a mut Vec<GameEvent>,
}

/// Test `this` against `other` and run `this`'s response on contact.
///
/// Returns true if the shapes touched.
pub fn check_collision(this: &mut Entity, other: &mut Entity, contact: &mut Contact) -> bool {
    if this.to_be_removed && other.to_be_removed {
        return false;
    }
    if this.owner == Some(other.id) || other.owner == Some(this.id) {
        return false;
    }
    match detect(this, other) {
        Some(d) => {
            handle_collision(this, other, d, contact);
            true
        }
        None => false,
    }
}

/// Apply `this`'s response to a contact with separation `d`
pub fn handle_collision(this: &mut Entity, other: &mut Entity, d: Vec2, contact: &mut Contact) {
    match response_for(this.kind, other.kind) {
        Response::Ignore => {}
        Response::Solid => {
            strike(other, contact);
            solid(this, other, d, contact);
        }
        Response::BulletStrike => {
            strike(other, contact);
            this.to_be_removed = true;
            if !contact.endgame {
                other.to_be_removed = true;
            }
        }
        Response::Fragile => {
            this.to_be_removed = true;
        }
        Response::Detonate => {
            strike(other, contact);
            this.to_be_removed = true;
            other.to_be_removed = true;
            solid(this, other, d, contact);
        }
        Response::MeteorImpact => {
            this.to_be_removed = true;
            if other.kind == Kind::Craft {
                strike(other, contact);
            } else {
                other.to_be_removed = true;
            }
        }
        Response::Collect => {
            if let Some(pilot) = &mut other.pilot {
                pilot.power += 1.0;
                this.to_be_removed = true;
                contact.events.push(GameEvent::Energy);
            }
        }
        Response::Checkpoint => {
            let reached = other.pilot.as_mut().is_some_and(|p| p.reach(this.id));
            if reached {
                log::info!("Checkpoint {:?} reached", this.id);
                contact.events.push(GameEvent::Checkpoint { target: this.id });
            }
        }
        Response::Repel => repel(this, other, contact.gravity),
        Response::Shield => {
            other.to_be_removed = true;
        }
        Response::Consumed => {
            if !this.to_be_removed {
                this.to_be_removed = true;
                other.mass += 1.0;
                other.set_size(other.size + contact.craft_size / 2.0);
                log::debug!("{} {:?} consumed by singularity {:?}", this.kind.name(), this.id, other.id);
            }
        }
    }
}

/// Base rule: touching the craft costs it a life, or kills it on the last one
fn strike(other: &mut Entity, contact: &mut Contact) {
    if other.kind != Kind::Craft || other.to_be_removed {
        return;
    }
    let Some(pilot) = &mut other.pilot else {
        return;
    };
    if pilot.take_hit() {
        other.to_be_removed = true;
    } else {
        contact.events.push(GameEvent::Shield);
    }
}

/// Push `body` out of `zone`. A body at dead centre leaves through the
/// nearest edge.
fn repel(zone: &Entity, body: &mut Entity, gravity: f32) {
    if body.position != zone.position {
        zone.apply_gravity(body, gravity, true);
        return;
    }
    let exit = if zone.half_extents.x <= zone.half_extents.y {
        Vec2::X
    } else {
        Vec2::Y
    };
    let strength = gravity * zone.mass * body.mass / (GRAVITY_MIN_DISTANCE * GRAVITY_MIN_DISTANCE);
    body.apply_force(exit * strength);
}

/// Exclusion nudge, damping and a crude inelastic impulse
fn solid(this: &mut Entity, other: &mut Entity, d: Vec2, contact: &mut Contact) {
    this.position -= d.normalize_or_zero() * EXCLUSION_NUDGE;

    let away = (this.position - other.position).normalize_or_zero();
    let transferred = other.velocity.length();

    this.velocity *= SELF_DAMPING;
    other.velocity *= OTHER_DAMPING;
    this.apply_force(away * IMPULSE_TRANSFER * transferred);
    contact.events.push(GameEvent::Boom);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{EntityId, Pilot};
    use proptest::prelude::*;
    use std::collections::VecDeque;

    fn body(kind: Kind, x: f32, y: f32, size: f32) -> Entity {
        let mut e = Entity::new(kind, Vec2::new(x, y), 0.0, 0.0, size);
        e.collides = true;
        e
    }

    fn craft(lives: u32) -> Entity {
        let mut c = body(Kind::Craft, 0.0, 0.0, 20.0);
        c.pilot = Some(Pilot {
            lives,
            ..Pilot::default()
        });
        c
    }

    fn run(this: &mut Entity, other: &mut Entity, endgame: bool) -> (bool, Vec<GameEvent>) {
        let mut events = Vec::new();
        let mut contact = Contact {
            endgame,
            craft_size: 40.0,
            gravity: 1.0,
            events: &mut events,
        };
        let hit = check_collision(this, other, &mut contact);
        (hit, events)
    }

    #[test]
    fn test_matrix_rows() {
        assert_eq!(response_for(Kind::Rock, Kind::Rock), Response::Solid);
        assert_eq!(response_for(Kind::Rock, Kind::Craft), Response::Solid);
        assert_eq!(response_for(Kind::Bullet, Kind::Turret), Response::BulletStrike);
        assert_eq!(response_for(Kind::Bullet, Kind::SafeZone), Response::Ignore);
        assert_eq!(response_for(Kind::Turret, Kind::Bullet), Response::Fragile);
        assert_eq!(response_for(Kind::Mine, Kind::EnemyCraft), Response::Detonate);
        assert_eq!(response_for(Kind::PowerUp, Kind::Craft), Response::Collect);
        assert_eq!(response_for(Kind::PowerUp, Kind::Rock), Response::Ignore);
        assert_eq!(response_for(Kind::Target, Kind::Craft), Response::Checkpoint);
        assert_eq!(response_for(Kind::NoFlyZone, Kind::Craft), Response::Repel);
        assert_eq!(response_for(Kind::NoFlyZone, Kind::Rock), Response::Ignore);
        assert_eq!(response_for(Kind::SafeZone, Kind::Meteor), Response::Shield);
        assert_eq!(response_for(Kind::Rock, Kind::Singularity), Response::Consumed);
        assert_eq!(response_for(Kind::Craft, Kind::Singularity), Response::Ignore);
        assert_eq!(response_for(Kind::Bullet, Kind::Singularity), Response::Ignore);
        assert_eq!(response_for(Kind::Decoration, Kind::Craft), Response::Ignore);
        assert_eq!(response_for(Kind::Rock, Kind::Explosion), Response::Ignore);
    }

    #[test]
    fn test_circle_boundary_is_inclusive() {
        let a = body(Kind::Rock, 0.0, 0.0, 20.0);
        let b = body(Kind::Rock, 25.0, 0.0, 30.0);
        assert_eq!(circle_contact(&a, &b), Some(Vec2::new(25.0, 0.0)));
        let c = body(Kind::Rock, 25.01, 0.0, 30.0);
        assert_eq!(circle_contact(&a, &c), None);
    }

    #[test]
    fn test_solid_response_nudges_and_damps() {
        let mut a = body(Kind::Rock, 0.0, 0.0, 20.0);
        let mut b = body(Kind::Rock, 15.0, 0.0, 20.0);
        a.velocity = Vec2::new(2.0, 0.0);
        b.velocity = Vec2::new(-4.0, 0.0);
        let (hit, events) = run(&mut a, &mut b, false);
        assert!(hit);
        assert_eq!(events, vec![GameEvent::Boom]);
        assert!((a.position.x + EXCLUSION_NUDGE).abs() < 1e-6);
        assert_eq!(a.velocity, Vec2::new(2.0 * SELF_DAMPING, 0.0));
        assert_eq!(b.velocity, Vec2::new(-4.0 * OTHER_DAMPING, 0.0));
        // Impulse points away from b, scaled by b's pre-contact speed
        assert!((a.acceleration.x + IMPULSE_TRANSFER * 4.0).abs() < 1e-5);
        assert!(!a.to_be_removed && !b.to_be_removed);
    }

    #[test]
    fn test_fatal_hit_flags_craft() {
        let mut rock = body(Kind::Rock, 10.0, 0.0, 20.0);
        let mut c = craft(1);
        run(&mut rock, &mut c, false);
        assert!(c.to_be_removed);
        assert_eq!(c.pilot.as_ref().map(|p| p.lives), Some(0));
    }

    #[test]
    fn test_non_fatal_hit_tints() {
        let mut rock = body(Kind::Rock, 10.0, 0.0, 20.0);
        let mut c = craft(3);
        let (_, events) = run(&mut rock, &mut c, false);
        assert!(!c.to_be_removed);
        let pilot = c.pilot.as_ref().map(|p| (p.lives, p.tint_ticks));
        assert_eq!(pilot, Some((2, HIT_TINT_TICKS)));
        assert!(events.contains(&GameEvent::Shield));

        // Tint does not protect: an overlapping rock hits again next tick
        run(&mut rock, &mut c, false);
        assert_eq!(c.pilot.as_ref().map(|p| p.lives), Some(1));
    }

    #[test]
    fn test_bullet_one_shot() {
        let mut bullet = body(Kind::Bullet, 0.0, 0.0, 4.0);
        let mut rock = body(Kind::Rock, 5.0, 0.0, 20.0);
        run(&mut bullet, &mut rock, false);
        assert!(bullet.to_be_removed);
        assert!(rock.to_be_removed);

        let mut bullet = body(Kind::Bullet, 0.0, 0.0, 4.0);
        let mut rock = body(Kind::Rock, 5.0, 0.0, 20.0);
        run(&mut bullet, &mut rock, true);
        assert!(bullet.to_be_removed);
        assert!(!rock.to_be_removed);
    }

    #[test]
    fn test_mine_detonates_both() {
        let mut mine = body(Kind::Mine, 0.0, 0.0, 20.0);
        let mut enemy = body(Kind::EnemyCraft, 12.0, 0.0, 20.0);
        run(&mut mine, &mut enemy, false);
        assert!(mine.to_be_removed && enemy.to_be_removed);
    }

    #[test]
    fn test_meteor_costs_craft_a_life() {
        let mut meteor = body(Kind::Meteor, 5.0, 0.0, 10.0);
        let mut c = craft(4);
        run(&mut meteor, &mut c, false);
        assert!(meteor.to_be_removed);
        assert!(!c.to_be_removed);
        assert_eq!(c.pilot.as_ref().map(|p| p.lives), Some(3));
    }

    #[test]
    fn test_power_up_collect() {
        let mut power_up = body(Kind::PowerUp, 5.0, 0.0, 10.0);
        power_up.collides = false;
        let mut c = craft(6);
        let (_, events) = run(&mut power_up, &mut c, false);
        assert!(power_up.to_be_removed);
        assert_eq!(c.pilot.as_ref().map(|p| p.power), Some(CRAFT_POWER + 1.0));
        assert_eq!(events, vec![GameEvent::Energy]);
    }

    #[test]
    fn test_checkpoint_only_for_head_target() {
        let mut t1 = body(Kind::Target, 5.0, 0.0, 10.0);
        t1.id = EntityId(1);
        let mut t2 = body(Kind::Target, 5.0, 0.0, 10.0);
        t2.id = EntityId(2);
        let mut c = craft(2);
        if let Some(p) = &mut c.pilot {
            p.targets = VecDeque::from([EntityId(1), EntityId(2)]);
            p.power = 3.0;
        }

        run(&mut t2, &mut c, false);
        assert_eq!(c.pilot.as_ref().map(|p| p.targets.len()), Some(2));

        run(&mut t1, &mut c, false);
        let pilot = c.pilot.as_ref().map(|p| (p.targets.clone(), p.lives, p.power));
        assert_eq!(pilot, Some((VecDeque::from([EntityId(2)]), CRAFT_LIVES, CRAFT_POWER)));
        assert!(!t1.to_be_removed);
    }

    #[test]
    fn test_safe_zone_destroys_meteors() {
        let mut zone = body(Kind::SafeZone, 0.0, 0.0, 0.0);
        zone.shape = Shape::Rectangle;
        zone.half_extents = Vec2::new(100.0, 50.0);
        let mut meteor = body(Kind::Meteor, 90.0, 40.0, 10.0);
        let mut rock = body(Kind::Rock, 90.0, 40.0, 10.0);
        run(&mut zone, &mut meteor, false);
        run(&mut zone, &mut rock, false);
        assert!(meteor.to_be_removed);
        assert!(!rock.to_be_removed);
        assert!(!zone.to_be_removed);
    }

    #[test]
    fn test_no_fly_zone_pushes_craft_out() {
        let mut zone = body(Kind::NoFlyZone, 0.0, 0.0, 0.0);
        zone.shape = Shape::Rectangle;
        zone.half_extents = Vec2::new(100.0, 100.0);
        let mut c = craft(6);
        c.position = Vec2::new(20.0, 0.0);
        run(&mut zone, &mut c, false);
        assert!(c.acceleration.x > 0.0);
        assert!(!c.to_be_removed);
    }

    #[test]
    fn test_no_fly_zone_pushes_centred_craft_to_nearest_edge() {
        let mut zone = body(Kind::NoFlyZone, 0.0, 0.0, 0.0);
        zone.shape = Shape::Rectangle;
        zone.half_extents = Vec2::new(100.0, 40.0);
        let mut c = craft(6);
        run(&mut zone, &mut c, false);
        assert_eq!(c.acceleration.x, 0.0);
        assert!(c.acceleration.y > 0.0);
    }

    #[test]
    fn test_bullet_ignores_its_shooter() {
        let mut c = craft(6);
        c.id = EntityId(1);
        let mut bullet = body(Kind::Bullet, 5.0, 0.0, 4.0);
        bullet.owner = Some(c.id);
        let (hit, _) = run(&mut bullet, &mut c, false);
        assert!(!hit);
        assert!(!bullet.to_be_removed && !c.to_be_removed);
        assert_eq!(c.pilot.as_ref().map(|p| p.lives), Some(6));

        bullet.owner = Some(EntityId(2));
        let (hit, _) = run(&mut bullet, &mut c, false);
        assert!(hit && bullet.to_be_removed);
    }

    #[test]
    fn test_singularity_consumes_once() {
        let mut rock = body(Kind::Rock, 0.0, 0.0, 20.0);
        let mut well = body(Kind::Singularity, 5.0, 0.0, 30.0);
        well.mass = SINGULARITY_MASS;
        run(&mut rock, &mut well, false);
        assert!(rock.to_be_removed);
        assert_eq!(well.mass, SINGULARITY_MASS + 1.0);
        assert_eq!(well.size, 50.0);
        assert_eq!(well.radius, 25.0);

        // Already swallowed
        run(&mut rock, &mut well, false);
        assert_eq!(well.mass, SINGULARITY_MASS + 1.0);
    }

    proptest! {
        #[test]
        fn prop_touching_circles_collide(
            ra in 1.0f32..50.0, rb in 1.0f32..50.0, theta in 0.0f32..6.28,
        ) {
            let a = body(Kind::Rock, 0.0, 0.0, ra * 2.0);
            let dir = Vec2::from_angle(theta);
            // Step the separation down until it is within the summed radii in f32
            let mut distance = ra + rb;
            let mut b = body(Kind::Rock, 0.0, 0.0, rb * 2.0);
            b.position = dir * distance;
            while (b.position - a.position).length() > a.radius + b.radius {
                distance = f32::from_bits(distance.to_bits() - 1);
                b.position = dir * distance;
            }
            prop_assert!(circle_contact(&a, &b).is_some());
            prop_assert!(circle_contact(&b, &a).is_some());
        }
    }
}
