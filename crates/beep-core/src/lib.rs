//! Tone synthesis and one-shot playback for BEEP/PLAY style sound commands.
//!
//! A [`tone::Tone`] is synthesized once when it is built and handed to a
//! [`controller::PlaybackController`], which blocks until the tone (or the
//! equivalent silence) has elapsed. Platforms plug in through
//! [`sink::AudioBackend`].

pub mod beeper;
pub mod consts;
pub mod controller;
pub mod error;
pub mod sink;
pub mod synth;
pub mod tone;

pub use beeper::Beeper;
pub use controller::{
    ControllerConfig, InterruptHandle, PlayOutcome, PlaybackController, PollCadence,
};
pub use error::{PlaybackError, SinkError, SynthError};
pub use sink::{AudioBackend, AudioSink, NullBackend, SinkConfig};
pub use tone::Tone;
