//! Audio boundary
//!
//! The simulation only raises [`GameEvent`]s. [`AudioManager`] turns them into
//! calls on an [`AudioSink`], which owns actual playback. [`MemorySink`] is
//! the headless backend used by the runner and tests.

use std::collections::HashSet;

use crate::sim::GameEvent;

/// Named sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    /// Something blew up
    Explosion,
    /// Craft or enemy fired
    Blaster,
    /// Craft took a hit
    Shield,
    /// Solid bodies bumped
    Boom,
    /// Power-up collected
    Energy,
    /// Turret fired
    Laser,
    /// Engine loop while thrusting
    Burn,
    /// Meteor storm warning
    Alarm,
}

impl Sound {
    pub const ALL: [Sound; 8] = [
        Sound::Explosion,
        Sound::Blaster,
        Sound::Shield,
        Sound::Boom,
        Sound::Energy,
        Sound::Laser,
        Sound::Burn,
        Sound::Alarm,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Sound::Explosion => "explosion",
            Sound::Blaster => "blaster",
            Sound::Shield => "shield",
            Sound::Boom => "boom",
            Sound::Energy => "energy",
            Sound::Laser => "laser",
            Sound::Burn => "burn",
            Sound::Alarm => "alarm",
        }
    }
}

/// Playback backend
pub trait AudioSink {
    /// Start a sound from the beginning, restarting it if already playing
    fn play(&mut self, sound: Sound, volume: f32);
    /// Pause, keeping the playback position
    fn pause(&mut self, sound: Sound);
    /// Stop and rewind
    fn stop(&mut self, sound: Sound);
    fn is_playing(&self, sound: Sound) -> bool;
}

/// Backend that only tracks state
#[derive(Debug, Default)]
pub struct MemorySink {
    playing: HashSet<Sound>,
    /// Every `play` call in order, with its volume
    pub history: Vec<(Sound, f32)>,
}

impl AudioSink for MemorySink {
    fn play(&mut self, sound: Sound, volume: f32) {
        self.playing.insert(sound);
        self.history.push((sound, volume));
    }

    fn pause(&mut self, sound: Sound) {
        self.playing.remove(&sound);
    }

    fn stop(&mut self, sound: Sound) {
        self.playing.remove(&sound);
    }

    fn is_playing(&self, sound: Sound) -> bool {
        self.playing.contains(&sound)
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink = MemorySink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager<MemorySink> {
    fn default() -> Self {
        Self::new(MemorySink::default())
    }
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            for sound in Sound::ALL {
                self.sink.stop(sound);
            }
        }
    }

    pub fn toggle_mute(&mut self) {
        self.set_muted(!self.muted);
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, sound: Sound) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(sound, vol);
    }

    pub fn pause(&mut self, sound: Sound) {
        self.sink.pause(sound);
    }

    pub fn stop(&mut self, sound: Sound) {
        self.sink.stop(sound);
    }

    pub fn is_playing(&self, sound: Sound) -> bool {
        self.sink.is_playing(sound)
    }

    /// Play a looping sound unless it is already running
    fn ensure_playing(&mut self, sound: Sound) {
        if !self.is_playing(sound) {
            self.play(sound);
        }
    }

    /// React to one simulation event
    pub fn handle(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Explosion => self.play(Sound::Explosion),
            GameEvent::Blaster => self.play(Sound::Blaster),
            GameEvent::Shield => self.play(Sound::Shield),
            GameEvent::Boom => {
                self.stop(Sound::Burn);
                self.play(Sound::Boom);
            }
            GameEvent::Energy => self.play(Sound::Energy),
            GameEvent::Laser => self.play(Sound::Laser),
            GameEvent::ThrustStart => self.ensure_playing(Sound::Burn),
            GameEvent::ThrustStop => self.pause(Sound::Burn),
            GameEvent::Ended(_) => self.stop(Sound::Burn),
            GameEvent::Alarm => self.ensure_playing(Sound::Alarm),
            GameEvent::Checkpoint { .. } => {}
        }
    }

    pub fn handle_all<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent>) {
        for event in events {
            self.handle(event);
        }
    }
}
