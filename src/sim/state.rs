//! Terminal states and gameplay events

use std::fmt;

use serde::{Deserialize, Serialize};

use super::entity::EntityId;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Endgame {
    /// Craft destroyed, or a singularity reached with targets left
    GameOver,
    /// Singularity reached with every target cleared
    MadeIt,
    /// Power exhausted
    OutOfPower,
}

impl Endgame {
    pub fn message(self) -> &'static str {
        match self {
            Endgame::GameOver => "Game Over",
            Endgame::MadeIt => "You made it!",
            Endgame::OutOfPower => "Out of power!",
        }
    }

    pub fn is_win(self) -> bool {
        self == Endgame::MadeIt
    }
}

impl fmt::Display for Endgame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Notifications raised by the simulation for audio and HUD consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Something blew up
    Explosion,
    /// Craft fired
    Blaster,
    /// Craft took a non-fatal hit
    Shield,
    /// Solid bodies bumped
    Boom,
    /// Power-up collected
    Energy,
    /// Turret fired
    Laser,
    ThrustStart,
    ThrustStop,
    /// Meteor storm incoming
    Alarm,
    Checkpoint { target: EntityId },
    Ended(Endgame),
}
