use thiserror::Error;

/// Failures reported by a platform audio layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SinkError {
    #[error("Audio device not available: {0}")]
    Unavailable(String),
    #[error("Audio device rejected configuration: {0}")]
    Rejected(String),
    #[error("Failed to write audio: {0}")]
    Write(String),
    #[error("Playback failed: {0}")]
    Playback(String),
}

/// Why a tone did not play to completion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaybackError {
    #[error("Failed to write audio: accepted {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },
    #[error("Playback stalled at frame {position} of {frames}")]
    Stalled { position: u64, frames: u64 },
    #[error(transparent)]
    Synth(#[from] SynthError),
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Why a tone's waveform could not be built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SynthError {
    #[error("Tone of {duration_ms}ms exceeds the {max_bytes} byte buffer limit")]
    TooLong { duration_ms: u32, max_bytes: usize },
    #[error("Failed to allocate {bytes} bytes for tone")]
    OutOfMemory { bytes: usize },
}
