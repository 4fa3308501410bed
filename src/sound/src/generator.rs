use common::model::settings::clamp_volume;
use tracing::{debug, warn};

use crate::effect::{SoundEffect, Tone};

/// Output device for synthesized tones. Implementations start each tone at
/// its `offset` from the moment it is handed over and never block.
pub trait AudioBackend {
    /// Wake a suspended output. Some platforms only allow this after a user
    /// gesture, so it is retried before every effect.
    fn resume(&mut self) {}

    fn play_tone(&mut self, tone: &Tone);
}

pub struct SoundGenerator {
    backend: Option<Box<dyn AudioBackend + Send>>,
    volume: f32,
    enabled: bool,
}

impl SoundGenerator {
    pub fn new(backend: Option<Box<dyn AudioBackend + Send>>) -> Self {
        if backend.is_none() {
            warn!("No audio output available, sound effects are disabled");
        }
        SoundGenerator {
            backend,
            volume: 0.5,
            enabled: true,
        }
    }

    pub fn play(&mut self, effect: SoundEffect) {
        if !self.enabled {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        debug!("Playing {:?} at volume {}", effect, self.volume);
        backend.resume();
        for tone in effect.tones() {
            backend.play_tone(&tone.with_volume(self.volume));
        }
    }

    /// Applies to sounds started after this call.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = clamp_volume(volume);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Default, Clone)]
    struct Recording {
        tones: Arc<Mutex<Vec<Tone>>>,
        resumes: Arc<Mutex<usize>>,
    }

    impl AudioBackend for Recording {
        fn resume(&mut self) {
            *self.resumes.lock().unwrap() += 1;
        }

        fn play_tone(&mut self, tone: &Tone) {
            self.tones.lock().unwrap().push(*tone);
        }
    }

    fn generator() -> (SoundGenerator, Recording) {
        let recording = Recording::default();
        let generator = SoundGenerator::new(Some(Box::new(recording.clone())));
        (generator, recording)
    }

    #[test]
    fn plays_every_tone_of_an_effect() {
        let (mut generator, recording) = generator();
        generator.play(SoundEffect::Win);
        let tones = recording.tones.lock().unwrap();
        assert_eq!(tones.len(), 3);
        assert_eq!(*recording.resumes.lock().unwrap(), 1);
        // 0.2 peak at the default volume of 0.5
        assert!(tones.iter().all(|tone| (tone.peak - 0.1).abs() < 1e-6));
    }

    #[test]
    fn disabled_generator_is_silent() {
        let (mut generator, recording) = generator();
        generator.set_enabled(false);
        generator.play(SoundEffect::Click);
        assert!(recording.tones.lock().unwrap().is_empty());

        generator.set_enabled(true);
        generator.play(SoundEffect::Click);
        assert_eq!(recording.tones.lock().unwrap().len(), 1);
    }

    #[test]
    fn missing_backend_is_a_no_op() {
        let mut generator = SoundGenerator::new(None);
        generator.set_volume(1.0);
        for effect in SoundEffect::ALL {
            generator.play(effect);
        }
    }

    #[test]
    fn volume_is_clamped_and_applies_to_later_sounds() {
        let (mut generator, recording) = generator();
        generator.play(SoundEffect::Lose);
        generator.set_volume(1.5);
        generator.play(SoundEffect::Lose);
        generator.set_volume(-3.0);
        generator.play(SoundEffect::Lose);

        let tones = recording.tones.lock().unwrap();
        assert!((tones[0].peak - 0.15).abs() < 1e-6);
        assert!((tones[1].peak - 0.3).abs() < 1e-6);
        assert_eq!(tones[2].peak, 0.0);
    }
}
