use std::time::Duration;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Choice submitted
    Click,
    /// Computer is picking
    Thinking,
    /// Player took the round
    Win,
    /// Computer took the round
    Lose,
    /// Round (or match) drawn
    Tie,
    /// Player took the match
    Victory,
    /// Computer took the match
    Defeat,
    /// Low background drone
    Ambient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    /// Oscillator output in [-1, 1] at `phase`, a fraction of one cycle.
    pub fn sample(&self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (std::f32::consts::TAU * phase).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
        }
    }
}

/// What happens after the attack peak.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// Exponential ramp down to [`SILENCE`], reached at this time after the
    /// tone starts. The oscillator stops there too.
    Decay(Duration),
    /// Hold the peak until the output is torn down.
    Sustain,
}

/// Level the decay ramp ends at. Exponential ramps cannot reach zero.
pub const SILENCE: f32 = 0.001;

const ATTACK: Duration = Duration::from_millis(10);

/// One oscillator voice, fully parameterised. `offset` is relative to the
/// start of the effect it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub offset: Duration,
    pub frequency: f32,
    pub waveform: Waveform,
    pub attack: Duration,
    /// Gain reached at the end of the attack, before volume scaling.
    pub peak: f32,
    pub release: Release,
    /// Low-pass cutoff in Hz, if the voice is filtered.
    pub lowpass: Option<f32>,
}

impl Tone {
    pub fn with_volume(self, volume: f32) -> Tone {
        Tone {
            peak: self.peak * volume,
            ..self
        }
    }

    /// How long the voice sounds. `None` for a sustained tone.
    pub fn duration(&self) -> Option<Duration> {
        match self.release {
            Release::Decay(end) => Some(end),
            Release::Sustain => None,
        }
    }

    /// Envelope gain `elapsed` seconds into the tone: a linear rise from
    /// silence to `peak` over the attack, then the release.
    pub fn gain_at(&self, elapsed: f32) -> f32 {
        if self.peak <= 0.0 {
            return 0.0;
        }
        let attack = self.attack.as_secs_f32();
        if elapsed < attack {
            return self.peak * elapsed / attack;
        }
        match self.release {
            Release::Sustain => self.peak,
            Release::Decay(end) => {
                let end = end.as_secs_f32();
                if elapsed >= end {
                    return SILENCE;
                }
                let progress = (elapsed - attack) / (end - attack);
                self.peak * (SILENCE / self.peak).powf(progress)
            }
        }
    }
}

// Catalog entry: every frequency becomes one tone, `step` apart
struct Pattern {
    frequencies: &'static [f32],
    waveform: Waveform,
    release: Release,
    step: Duration,
    peak: f32,
    attack: Duration,
    lowpass: Option<f32>,
}

impl Pattern {
    const fn tone(frequencies: &'static [f32], waveform: Waveform, millis: u64, peak: f32) -> Self {
        Pattern {
            frequencies,
            waveform,
            release: Release::Decay(Duration::from_millis(millis)),
            step: Duration::ZERO,
            peak,
            attack: ATTACK,
            lowpass: None,
        }
    }

    const fn stepped(self, step_millis: u64) -> Self {
        Pattern {
            step: Duration::from_millis(step_millis),
            ..self
        }
    }
}

const CLICK: Pattern = Pattern::tone(&[800.0], Waveform::Sine, 100, 0.3);
const THINKING: Pattern = Pattern::tone(&[400.0], Waveform::Triangle, 300, 0.3);
// C major, rolled
const WIN: Pattern = Pattern::tone(&[523.0, 659.0, 784.0], Waveform::Sine, 500, 0.2).stepped(100);
const LOSE: Pattern = Pattern::tone(&[200.0], Waveform::Sawtooth, 500, 0.3);
const TIE: Pattern = Pattern::tone(&[440.0], Waveform::Square, 300, 0.3);
const VICTORY: Pattern =
    Pattern::tone(&[523.0, 659.0, 784.0, 1047.0], Waveform::Sine, 300, 0.3).stepped(150);
const DEFEAT: Pattern =
    Pattern::tone(&[400.0, 350.0, 300.0, 250.0], Waveform::Sawtooth, 400, 0.2).stepped(200);
const AMBIENT: Pattern = Pattern {
    frequencies: &[110.0],
    waveform: Waveform::Sine,
    release: Release::Sustain,
    step: Duration::ZERO,
    peak: 0.05,
    attack: Duration::from_secs(2),
    lowpass: Some(200.0),
};

impl SoundEffect {
    pub const ALL: [SoundEffect; 8] = [
        SoundEffect::Click,
        SoundEffect::Thinking,
        SoundEffect::Win,
        SoundEffect::Lose,
        SoundEffect::Tie,
        SoundEffect::Victory,
        SoundEffect::Defeat,
        SoundEffect::Ambient,
    ];

    fn pattern(&self) -> &'static Pattern {
        match self {
            SoundEffect::Click => &CLICK,
            SoundEffect::Thinking => &THINKING,
            SoundEffect::Win => &WIN,
            SoundEffect::Lose => &LOSE,
            SoundEffect::Tie => &TIE,
            SoundEffect::Victory => &VICTORY,
            SoundEffect::Defeat => &DEFEAT,
            SoundEffect::Ambient => &AMBIENT,
        }
    }

    /// Tones making up this effect at full volume, in start order.
    pub fn tones(&self) -> Vec<Tone> {
        let pattern = self.pattern();
        pattern
            .frequencies
            .iter()
            .enumerate()
            .map(|(index, &frequency)| Tone {
                offset: pattern.step * index as u32,
                frequency,
                waveform: pattern.waveform,
                attack: pattern.attack,
                peak: pattern.peak,
                release: pattern.release,
                lowpass: pattern.lowpass,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_effect_has_tones() {
        for effect in SoundEffect::ALL {
            let tones = effect.tones();
            assert!(!tones.is_empty(), "{:?}", effect);
            assert_eq!(tones[0].offset, Duration::ZERO, "{:?}", effect);
        }
    }

    #[test]
    fn victory_arpeggio_is_spaced() {
        let offsets: Vec<u128> = SoundEffect::Victory
            .tones()
            .iter()
            .map(|tone| tone.offset.as_millis())
            .collect();
        assert_eq!(offsets, vec![0, 150, 300, 450]);
    }

    #[test]
    fn defeat_descends() {
        let frequencies: Vec<f32> = SoundEffect::Defeat
            .tones()
            .iter()
            .map(|tone| tone.frequency)
            .collect();
        assert_eq!(frequencies, vec![400.0, 350.0, 300.0, 250.0]);
        assert!(SoundEffect::Defeat
            .tones()
            .iter()
            .all(|tone| tone.waveform == Waveform::Sawtooth));
    }

    #[test]
    fn ambient_sustains_through_a_filter() {
        let tones = SoundEffect::Ambient.tones();
        assert_eq!(tones.len(), 1);
        assert_eq!(tones[0].release, Release::Sustain);
        assert_eq!(tones[0].lowpass, Some(200.0));
        assert_eq!(tones[0].attack, Duration::from_secs(2));
    }

    #[test]
    fn single_tones_decay_over_their_duration() {
        let click = SoundEffect::Click.tones()[0];
        assert_eq!(click.frequency, 800.0);
        assert_eq!(click.release, Release::Decay(Duration::from_millis(100)));
        assert_eq!(click.attack, Duration::from_millis(10));
    }

    #[test]
    fn envelope_rises_to_the_scaled_peak_then_decays_to_silence() {
        let tone = SoundEffect::Tie.tones()[0].with_volume(0.5);
        assert_eq!(tone.gain_at(0.0), 0.0);
        assert!((tone.gain_at(0.005) - 0.075).abs() < 1e-6);
        assert!((tone.gain_at(0.01) - 0.15).abs() < 1e-6);
        assert!(tone.gain_at(0.1) < tone.gain_at(0.05));
        assert!((tone.gain_at(0.3) - SILENCE).abs() < 1e-6);
        assert!((tone.gain_at(0.2999) - SILENCE).abs() < 1e-4);
        assert_eq!(tone.duration(), Some(Duration::from_millis(300)));
    }

    #[test]
    fn muted_tones_stay_silent() {
        let tone = SoundEffect::Click.tones()[0].with_volume(0.0);
        assert_eq!(tone.gain_at(0.01), 0.0);
        assert_eq!(tone.gain_at(0.05), 0.0);
    }

    #[test]
    fn sustained_tone_holds_its_peak() {
        let ambient = SoundEffect::Ambient.tones()[0];
        assert!((ambient.gain_at(1.0) - 0.025).abs() < 1e-6);
        assert_eq!(ambient.gain_at(60.0), ambient.peak);
        assert_eq!(ambient.duration(), None);
    }

    #[test]
    fn waveforms_span_the_unit_range() {
        assert!(Waveform::Sine.sample(0.25) > 0.999);
        assert_eq!(Waveform::Square.sample(0.75), -1.0);
        assert_eq!(Waveform::Sawtooth.sample(0.0), -1.0);
        assert_eq!(Waveform::Triangle.sample(0.5), 1.0);
        assert_eq!(Waveform::Triangle.sample(0.0), -1.0);
    }

    #[test]
    fn volume_scales_the_peak_only() {
        let tone = SoundEffect::Tie.tones()[0];
        let quiet = tone.with_volume(0.5);
        assert!((quiet.peak - 0.15).abs() < 1e-6);
        assert_eq!(quiet.frequency, tone.frequency);
        assert_eq!(quiet.release, tone.release);
    }
}
