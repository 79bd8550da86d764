use std::time::Duration;

use crate::consts::BYTES_PER_FRAME;
use crate::error::SynthError;
use crate::synth;

#[derive(Debug, Clone, PartialEq)]
enum Waveform {
    Rest,
    Pcm(Vec<u8>),
    Failed(SynthError),
}

/// A single BEEP/PLAY sound event.
///
/// The waveform is synthesized once, when the tone is built, so playback
/// never waits on synthesis. A frequency of zero is a rest: no samples are
/// generated and playback sleeps for the duration instead.
///
/// If synthesis fails (the tone is too long to buffer) the failure is logged
/// and kept; the tone has no samples and playing it fails immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct Tone {
    frequency_hz: u32,
    duration_ms: u32,
    volume: f32,
    waveform: Waveform,
}

impl Tone {
    pub fn new(frequency_hz: u32, duration_ms: u32, volume: f32) -> Self {
        let waveform = if frequency_hz == 0 {
            Waveform::Rest
        } else {
            match synth::synthesize(frequency_hz, duration_ms) {
                Ok(pcm) => Waveform::Pcm(pcm),
                Err(e) => {
                    log::warn!(
                        "Tone {}Hz for {}ms not synthesized: {}",
                        frequency_hz,
                        duration_ms,
                        e
                    );
                    Waveform::Failed(e)
                }
            }
        };
        Self {
            frequency_hz,
            duration_ms,
            volume,
            waveform,
        }
    }

    /// A rest of `duration_ms`.
    pub fn silence(duration_ms: u32) -> Self {
        Self::new(0, duration_ms, 0.0)
    }

    pub fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.duration_ms))
    }

    /// Gain handed to the device at playback; synthesis is always full scale.
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// PCM16 little-endian mono samples, `None` for a rest or a failed tone.
    pub fn samples(&self) -> Option<&[u8]> {
        match &self.waveform {
            Waveform::Pcm(pcm) => Some(pcm),
            Waveform::Rest | Waveform::Failed(_) => None,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.samples().map_or(0, |pcm| pcm.len() / BYTES_PER_FRAME)
    }

    pub fn is_silence(&self) -> bool {
        self.waveform == Waveform::Rest
    }

    /// Why the waveform could not be synthesized, if it failed.
    pub fn synth_error(&self) -> Option<&SynthError> {
        match &self.waveform {
            Waveform::Failed(e) => Some(e),
            Waveform::Rest | Waveform::Pcm(_) => None,
        }
    }
}
