//! Frame driver
//!
//! Owns the map definition, the live world and the audio manager. One call to
//! [`Game::frame`] samples input, advances the simulation one tick and routes
//! the tick's events to audio.

use crate::audio::{AudioManager, AudioSink, MemorySink};
use crate::error::Result;
use crate::map::{MapDefinition, build_world};
use crate::platform::{Button, InputSource, InputState};
use crate::renderer::{DrawTarget, draw_world};
use crate::settings::Settings;
use crate::sim::{Endgame, World, tick};

pub struct Game<S: AudioSink = MemorySink> {
    settings: Settings,
    map: MapDefinition,
    world: World,
    audio: AudioManager<S>,
    input: InputState,
    /// Number of worlds built so far, including the first
    runs: u32,
}

impl Game<MemorySink> {
    /// Game with the headless audio backend
    pub fn new(settings: Settings, map: MapDefinition) -> Result<Self> {
        Self::with_sink(settings, map, MemorySink::default())
    }
}

impl<S: AudioSink> Game<S> {
    pub fn with_sink(settings: Settings, map: MapDefinition, sink: S) -> Result<Self> {
        let world = build_world(&map, &settings)?;
        let mut audio = AudioManager::new(sink);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        Ok(Self {
            settings,
            map,
            world,
            audio,
            input: InputState::default(),
            runs: 1,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn audio(&self) -> &AudioManager<S> {
        &self.audio
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn endgame(&self) -> Option<Endgame> {
        self.world.endgame
    }

    /// Rebuild the world from the map definition
    pub fn restart(&mut self) -> Result<()> {
        self.world = build_world(&self.map, &self.settings)?;
        self.runs += 1;
        log::info!("Restarted (run {})", self.runs);
        Ok(())
    }

    /// Run one frame at wall-clock time `now_ms`.
    ///
    /// The restart bind, or fire once the run is over, rebuilds the world
    /// instead of ticking.
    pub fn frame(&mut self, source: &impl InputSource, now_ms: f64) -> Result<()> {
        self.input.update(source);

        let ended = self.world.endgame.is_some();
        if self.input.just_pressed(Button::Restart) || (ended && self.input.just_pressed(Button::Fire)) {
            return self.restart();
        }

        tick(&mut self.world, &self.input.tick_input(now_ms));
        let events = std::mem::take(&mut self.world.events);
        self.audio.handle_all(&events);
        Ok(())
    }

    pub fn draw(&self, target: &mut dyn DrawTarget) {
        draw_world(&self.world, target);
    }
}
