//! Audio cues
//!
//! The game only knows three one-shot cues and one looping background track.
//! Playback itself is a backend concern; failures there are never fatal.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Ball hits paddle or tile
    Hit,
    /// Ball lost to the floor
    Lose,
    /// Pickup collected
    Bonus,
}

impl SoundCue {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PaddleHit | GameEvent::TileHit { .. } => Some(SoundCue::Hit),
            GameEvent::LifeLost { .. } => Some(SoundCue::Lose),
            GameEvent::BonusActivated(_) => Some(SoundCue::Bonus),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SoundCue::Hit => "hit",
            SoundCue::Lose => "lose",
            SoundCue::Bonus => "bonus",
        }
    }
}

/// Fire-and-forget playback
pub trait AudioBackend {
    fn play_cue(&mut self, cue: SoundCue, volume: f32);
    /// Start (or restart) the looping background track
    fn play_music(&mut self, volume: f32);
    fn stop_music(&mut self);
}

/// Backend that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play_cue(&mut self, cue: SoundCue, volume: f32) {
        log::debug!("cue {} at {:.2}", cue.name(), volume);
    }

    fn play_music(&mut self, volume: f32) {
        log::debug!("music on at {:.2}", volume);
    }

    fn stop_music(&mut self) {
        log::debug!("music off");
    }
}

/// Backend that remembers what it was asked to play
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub cues: Vec<SoundCue>,
    pub music_volume: Option<f32>,
}

impl AudioBackend for RecordingBackend {
    fn play_cue(&mut self, cue: SoundCue, _volume: f32) {
        self.cues.push(cue);
    }

    fn play_music(&mut self, volume: f32) {
        self.music_volume = Some(volume);
    }

    fn stop_music(&mut self) {
        self.music_volume = None;
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    /// Effective cue volume (master × sfx, zero while muted)
    sfx_volume: f32,
    /// Effective background track volume
    music_volume: f32,
    /// Music was requested; it is actually playing only while audible
    music_wanted: bool,
    music_playing: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B, settings: &Settings) -> Self {
        let mut manager = Self {
            backend,
            sfx_volume: 0.0,
            music_volume: 0.0,
            music_wanted: false,
            music_playing: false,
        };
        manager.apply_settings(settings);
        manager
    }

    /// Pick up volume and mute changes
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.sfx_volume = settings.effective_sfx_volume();
        self.music_volume = settings.effective_music_volume();
        self.sync_music();
    }

    /// Play a one-shot cue
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.sfx_volume;
        if vol <= 0.0 {
            return;
        }
        self.backend.play_cue(cue, vol);
    }

    /// Play the cue of every event that has one
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for cue in events.iter().filter_map(SoundCue::for_event) {
            self.play(cue);
        }
    }

    pub fn start_music(&mut self) {
        self.music_wanted = true;
        self.sync_music();
    }

    pub fn stop_music(&mut self) {
        self.music_wanted = false;
        self.sync_music();
    }

    fn sync_music(&mut self) {
        let vol = self.music_volume;
        let audible = self.music_wanted && vol > 0.0;
        if audible {
            // Restart picks up the new volume
            self.backend.play_music(vol);
            self.music_playing = true;
        } else if self.music_playing {
            self.backend.stop_music();
            self.music_playing = false;
        }
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
