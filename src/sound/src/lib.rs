//! Procedural sound effects: a fixed catalog of tone patterns, a sample
//! renderer for them and a gated generator that hands volume-scaled tones
//! to an audio backend.

pub mod effect;
pub mod generator;
#[cfg(feature = "rodio")]
pub mod output;
pub mod synth;

pub use effect::{Release, SoundEffect, Tone, Waveform};
pub use generator::{AudioBackend, SoundGenerator};
#[cfg(feature = "rodio")]
pub use output::{AudioOutput, RodioBackend};
pub use synth::{ToneSource, SAMPLE_RATE};
