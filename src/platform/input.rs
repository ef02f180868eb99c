//! Polled button input with press-edge detection

use std::collections::HashSet;

use crate::sim::TickInput;

/// Logical buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    TurnLeft,
    TurnRight,
    Thrust,
    /// Fire, or restart once the run has ended
    Fire,
    /// Debug: rebuild the world
    Restart,
    /// Debug: call in a meteor storm
    SpawnStorm,
}

impl Button {
    pub const ALL: [Button; 6] = [
        Button::TurnLeft,
        Button::TurnRight,
        Button::Thrust,
        Button::Fire,
        Button::Restart,
        Button::SpawnStorm,
    ];

    /// Default key binding (arrows or WASD, space to fire)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Button::TurnLeft),
            "ArrowRight" | "d" | "D" => Some(Button::TurnRight),
            "ArrowUp" | "w" | "W" => Some(Button::Thrust),
            " " | "Space" => Some(Button::Fire),
            "r" | "R" => Some(Button::Restart),
            "m" | "M" => Some(Button::SpawnStorm),
            _ => None,
        }
    }
}

/// Anything that can report which buttons are held right now
pub trait InputSource {
    fn is_down(&self, button: Button) -> bool;
}

/// Input source driven by code (autopilot, tests)
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    held: HashSet<Button>,
}

impl ScriptedInput {
    pub fn press(&mut self, button: Button) {
        self.held.insert(button);
    }

    pub fn release(&mut self, button: Button) {
        self.held.remove(&button);
    }

    pub fn set(&mut self, button: Button, down: bool) {
        if down {
            self.press(button);
        } else {
            self.release(button);
        }
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

impl InputSource for ScriptedInput {
    fn is_down(&self, button: Button) -> bool {
        self.held.contains(&button)
    }
}

/// Button state for the current and previous tick
#[derive(Debug, Clone, Default)]
pub struct InputState {
    current: HashSet<Button>,
    previous: HashSet<Button>,
}

impl InputState {
    /// Sample the source for a new tick
    pub fn update(&mut self, source: &impl InputSource) {
        self.previous = std::mem::take(&mut self.current);
        self.current = Button::ALL.into_iter().filter(|&b| source.is_down(b)).collect();
    }

    pub fn is_down(&self, button: Button) -> bool {
        self.current.contains(&button)
    }

    /// Down this tick but not the last
    pub fn just_pressed(&self, button: Button) -> bool {
        self.current.contains(&button) && !self.previous.contains(&button)
    }

    /// Simulation input for this tick. Firing and storms trigger on the press edge.
    pub fn tick_input(&self, now_ms: f64) -> TickInput {
        TickInput {
            turn_left: self.is_down(Button::TurnLeft),
            turn_right: self.is_down(Button::TurnRight),
            thrust: self.is_down(Button::Thrust),
            fire: self.just_pressed(Button::Fire),
            spawn_storm: self.just_pressed(Button::SpawnStorm),
            now_ms,
        }
    }
}
