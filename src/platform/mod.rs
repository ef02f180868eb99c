//! Platform abstraction layer
//!
//! The core samples a handful of logical buttons once per tick. Backends
//! (keyboard, scripted autopilot) implement [`InputSource`].

pub mod input;

pub use input::{Button, InputSource, InputState, ScriptedInput};
