//! Simulation core
//!
//! All gameplay logic lives here. The core is frame driven and deterministic
//! for a given seed and input sequence:
//! - One step per rendered frame, no suspension inside a step
//! - Seeded RNG only
//! - Stable iteration order (store sorted by entity id)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod entity;
pub mod factory;
pub mod particle;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{Response, check_collision, detect, response_for};
pub use entity::{Entity, EntityId, Gun, Kind, Pilot, Shape, Skin};
pub use factory::GameObjectFactory;
pub use particle::{Emitter, Particle};
pub use state::{Endgame, GameEvent};
pub use tick::{TickInput, tick};
pub use world::World;
