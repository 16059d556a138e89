//! Sound effect dispatch
//!
//! The core only decides *which* effect plays and at what pitch; an
//! [`AudioSink`] supplied by the host does the actual playback.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Shot leaves the slingshot ("boing")
    Launch,
    /// Man knocked down ("oof")
    Hit,
}

/// Playback service provided by the host
pub trait AudioSink {
    /// Play `effect` at `volume` (0.0 - 1.0). `pitch` of `None` is normal speed.
    fn play(&mut self, effect: SoundEffect, volume: f32, pitch: Option<f32>);
}

/// Sink that only logs (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32, pitch: Option<f32>) {
        log::debug!("Play {:?} vol={:.2} pitch={:?}", effect, volume, pitch);
    }
}

/// Maps game events to sink calls, applying volume settings
pub struct AudioManager<S: AudioSink> {
    sink: S,
    settings: Settings,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S, settings: Settings) -> Self {
        Self { sink, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect, pitch: Option<f32>) {
        let mut vol = self.settings.effect_volume();
        if effect == SoundEffect::Launch {
            vol *= self.settings.launch_volume;
        }
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol, pitch);
    }

    /// Play whatever the frame's events call for
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::Launched { pitch, .. } => self.play(SoundEffect::Launch, Some(pitch)),
                GameEvent::TargetHit { .. } => self.play(SoundEffect::Hit, None),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[derive(Default)]
    struct Recorder {
        played: Vec<(SoundEffect, f32, Option<f32>)>,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32, pitch: Option<f32>) {
            self.played.push((effect, volume, pitch));
        }
    }

    fn events() -> Vec<GameEvent> {
        vec![
            GameEvent::Launched {
                pos: Vec2::ZERO,
                vel: Vec2::new(0.0, -1000.0),
                pitch: 1.5,
            },
            GameEvent::ShotsCulled { count: 1 },
            GameEvent::TargetHit {
                pos: Vec2::ZERO,
                score: 1,
            },
        ]
    }

    #[test]
    fn test_events_map_to_effects() {
        let mut audio = AudioManager::new(Recorder::default(), Settings::default());
        audio.handle_events(&events());

        let played = &audio.sink().played;
        assert_eq!(played.len(), 2);
        assert_eq!(played[0].0, SoundEffect::Launch);
        assert_eq!(played[0].2, Some(1.5));
        // master 0.8 * sfx 1.0 * launch 0.6
        assert!((played[0].1 - 0.48).abs() < 1e-6);
        assert_eq!(played[1], (SoundEffect::Hit, 0.8, None));
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::new(Recorder::default(), Settings::default());
        audio.set_muted(true);
        audio.handle_events(&events());
        assert!(audio.sink().played.is_empty());
    }
}
