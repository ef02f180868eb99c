//! Headless runner: builds a world from a map file and flies an autopilot
//! through it for a bounded number of frames.
//!
//! Usage: `kessel-run [map.json] [settings.json]`

use std::f32::consts::PI;

use kessel_run::map::MapDefinition;
use kessel_run::platform::{Button, ScriptedInput};
use kessel_run::renderer::DrawList;
use kessel_run::{Game, Result, Settings, facing, wrap_angle};

const DEFAULT_MAP: &str = "assets/demo_map.json";
const DEFAULT_SETTINGS: &str = "settings.json";
/// Simulated frame time (ms)
const FRAME_MS: f64 = 16.0;
const MAX_FRAMES: u32 = 60 * 60 * 3;
/// Heading error (radians) below which the autopilot thrusts
const AIM_TOLERANCE: f32 = 0.3;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Kessel Run (headless) starting...");

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let map_path = args.next().unwrap_or_else(|| DEFAULT_MAP.to_string());
    let settings_path = args.next().unwrap_or_else(|| DEFAULT_SETTINGS.to_string());

    let settings = Settings::load(&settings_path);
    let map = MapDefinition::load(&map_path)?;
    let mut game = Game::new(settings, map)?;
    log::info!("Game initialized with seed: {}", game.settings().seed);

    let mut input = ScriptedInput::default();
    let mut frame = 0;
    while frame < MAX_FRAMES && game.endgame().is_none() {
        autopilot(&game, &mut input, frame);
        game.frame(&input, f64::from(frame) * FRAME_MS)?;
        frame += 1;
    }

    let mut list = DrawList::default();
    game.draw(&mut list);
    let world = game.world();
    let (lives, power) = world
        .craft()
        .and_then(|c| c.pilot.as_ref())
        .map_or((0, 0.0), |p| (p.lives, p.power));
    match world.endgame {
        Some(endgame) if endgame.is_win() => {
            log::info!("{endgame} after {frame} frames (lives {lives}, power {power:.2})")
        }
        Some(endgame) => log::warn!("{endgame} after {frame} frames (lives {lives}, power {power:.2})"),
        None => log::info!("Still flying after {frame} frames (lives {lives}, power {power:.2})"),
    }
    log::debug!("Final frame drew {} commands", list.commands.len());
    Ok(())
}

/// Turn toward the current objective, thrust when roughly aimed and fire
/// every half second
fn autopilot(game: &Game, input: &mut ScriptedInput, frame: u32) {
    input.release_all();
    let world = game.world();
    let (Some(craft), Some(objective)) = (world.craft(), world.objective()) else {
        return;
    };

    let wanted = facing(craft.position, objective);
    // Signed error in (-π, π]; positive means turn left
    let error = wrap_angle(wanted - craft.angle + PI) - PI;
    input.set(Button::TurnLeft, error > 0.05);
    input.set(Button::TurnRight, error < -0.05);
    input.set(Button::Thrust, error.abs() < AIM_TOLERANCE);
    input.set(Button::Fire, frame % 30 == 0);
}
