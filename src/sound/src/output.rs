use rodio::{OutputStream, OutputStreamHandle, Sink, Source, StreamError};
use tracing::{debug, warn};

use crate::{
    effect::Tone,
    generator::AudioBackend,
    synth::{ToneSource, SAMPLE_RATE},
};

/// The default output device. Every sound stops once this is dropped.
pub struct AudioOutput {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl AudioOutput {
    pub fn open() -> Result<Self, StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        debug!("Opened default audio output");
        Ok(AudioOutput {
            _stream: stream,
            handle,
        })
    }

    pub fn backend(&self) -> RodioBackend {
        RodioBackend {
            handle: self.handle.clone(),
        }
    }
}

/// Plays each tone on its own detached sink, delayed by its offset.
pub struct RodioBackend {
    handle: OutputStreamHandle,
}

impl AudioBackend for RodioBackend {
    fn play_tone(&mut self, tone: &Tone) {
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.append(ToneSource::new(*tone, SAMPLE_RATE).delay(tone.offset));
                sink.detach();
            }
            Err(e) => warn!("Failed to play {} Hz tone: {}", tone.frequency, e),
        }
    }
}
