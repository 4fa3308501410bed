use std::f32::consts::TAU;

use crate::effect::Tone;

pub const SAMPLE_RATE: u32 = 44_100;

/// Mono sample stream for one tone: oscillator, optional one-pole low-pass,
/// then the envelope. Ends with the release of a decaying tone and never for
/// a sustained one.
#[derive(Debug, Clone)]
pub struct ToneSource {
    tone: Tone,
    sample_rate: u32,
    position: u64,
    total: Option<u64>,
    phase: f32,
    // Low-pass smoothing factor and its state
    smoothing: Option<f32>,
    filtered: f32,
}

impl ToneSource {
    pub fn new(tone: Tone, sample_rate: u32) -> Self {
        let total = tone
            .duration()
            .map(|duration| (duration.as_secs_f64() * f64::from(sample_rate)).round() as u64);
        let smoothing = tone.lowpass.map(|cutoff| {
            let dt = 1.0 / sample_rate as f32;
            let rc = 1.0 / (TAU * cutoff);
            dt / (rc + dt)
        });
        ToneSource {
            tone,
            sample_rate,
            position: 0,
            total,
            phase: 0.0,
            smoothing,
            filtered: 0.0,
        }
    }

    /// Samples left, `None` when sustained.
    pub fn remaining(&self) -> Option<u64> {
        self.total.map(|total| total.saturating_sub(self.position))
    }
}

impl Iterator for ToneSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.remaining() == Some(0) {
            return None;
        }
        let elapsed = self.position as f32 / self.sample_rate as f32;
        let mut sample = self.tone.waveform.sample(self.phase);
        if let Some(alpha) = self.smoothing {
            self.filtered += alpha * (sample - self.filtered);
            sample = self.filtered;
        }
        self.phase = (self.phase + self.tone.frequency / self.sample_rate as f32).fract();
        self.position += 1;
        Some(sample * self.tone.gain_at(elapsed))
    }
}

#[cfg(feature = "rodio")]
impl rodio::Source for ToneSource {
    fn current_frame_len(&self) -> Option<usize> {
        self.remaining().map(|remaining| remaining as usize)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<std::time::Duration> {
        self.tone.duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{SoundEffect, SILENCE};

    fn loudest(samples: impl Iterator<Item = f32>) -> f32 {
        samples.map(f32::abs).fold(0.0, f32::max)
    }

    #[test]
    fn decaying_tone_lasts_its_duration() {
        let click = SoundEffect::Click.tones()[0];
        let samples: Vec<f32> = ToneSource::new(click, SAMPLE_RATE).collect();
        // 100ms
        assert_eq!(samples.len(), 4410);
        assert_eq!(ToneSource::new(click, 8_000).count(), 800);
    }

    #[test]
    fn envelope_peaks_at_the_scaled_peak_and_fades_out() {
        let tone = SoundEffect::Click.tones()[0].with_volume(0.5);
        let samples: Vec<f32> = ToneSource::new(tone, SAMPLE_RATE).collect();

        let peak = loudest(samples.iter().copied());
        assert!(peak <= 0.15 + 1e-6, "{}", peak);
        assert!(peak > 0.14, "{}", peak);
        // Last 1ms is within a hair of the decay floor
        let tail = loudest(samples[samples.len() - 44..].iter().copied());
        assert!(tail <= SILENCE * 1.2, "{}", tail);
    }

    #[test]
    fn muted_tone_renders_silence() {
        let tone = SoundEffect::Lose.tones()[0].with_volume(0.0);
        assert_eq!(loudest(ToneSource::new(tone, SAMPLE_RATE)), 0.0);
    }

    #[test]
    fn sustained_tone_never_ends() {
        let ambient = SoundEffect::Ambient.tones()[0];
        let mut source = ToneSource::new(ambient, SAMPLE_RATE);
        assert_eq!(source.remaining(), None);
        assert!(source.nth(10 * SAMPLE_RATE as usize).is_some());
    }

    #[test]
    fn lowpass_softens_the_voice() {
        let filtered = SoundEffect::Ambient.tones()[0];
        let open = Tone {
            lowpass: None,
            ..filtered
        };
        // One second of steady state after the attack
        let window = |tone: Tone| {
            ToneSource::new(tone, SAMPLE_RATE)
                .skip(3 * SAMPLE_RATE as usize)
                .take(SAMPLE_RATE as usize)
        };
        let filtered = loudest(window(filtered));
        let open = loudest(window(open));
        assert!(filtered < open * 0.95, "{} vs {}", filtered, open);
        assert!(filtered > open * 0.5, "{} vs {}", filtered, open);
    }
}
