//! Blocking playback of a single [`Tone`].
//!
//! Each call to [`PlaybackController::play`] runs one of three paths:
//!
//! - muted: returns immediately, no device access and no delay;
//! - rest (no samples): sleeps for the tone's duration;
//! - tone: acquire a one-shot sink, write the buffer, set the gain, start,
//!   poll the playback head until it reaches the last frame, release.
//!
//! Failures on the tone path are logged and reported as
//! [`PlayOutcome::Failed`]; they never reach the caller as an error or panic.
//! The sink is released on every exit path once it has been acquired.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::PlaybackError;
use crate::sink::{AudioBackend, AudioSink, SinkConfig};
use crate::tone::Tone;

/// Upper bound on a single sleep, so interrupts are noticed promptly.
const WAIT_SLICE: Duration = Duration::from_millis(10);

/// Shortest interval between playback head polls.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// How often the playback head is polled while a tone plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollCadence {
    /// Sleep for the tone's own duration between polls.
    ToneDuration,
    Every(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    pub poll: PollCadence,
    /// Extra time past the tone's duration before a device that never
    /// reaches the last frame is given up on.
    pub stall_grace: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            poll: PollCadence::ToneDuration,
            stall_grace: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Suppressed by mute.
    Muted,
    /// A rest ran its full duration.
    Silence,
    /// The device reached the last frame.
    Played,
    /// The wait was cut short through an [`InterruptHandle`].
    Interrupted,
    /// Playback failed; the error has been logged.
    Failed,
}

/// Cooperative cancellation of the wait inside `play`.
///
/// Interrupting ends the current wait early and the controller proceeds to
/// release the device, as though the tone had finished.
#[derive(Debug, Clone, Default)]
pub struct InterruptHandle {
    flag: Arc<AtomicBool>,
}

impl InterruptHandle {
    pub fn interrupt(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_interrupted(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    fn clear(&self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Releases the sink when dropped.
struct AcquiredSink(Box<dyn AudioSink>);

impl Deref for AcquiredSink {
    type Target = dyn AudioSink;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl DerefMut for AcquiredSink {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
    }
}

impl Drop for AcquiredSink {
    fn drop(&mut self) {
        self.0.release();
        log::debug!("Audio sink released");
    }
}

/// Long-lived driver that plays tones through an [`AudioBackend`].
pub struct PlaybackController<B> {
    backend: B,
    config: ControllerConfig,
    muted: AtomicBool,
    interrupt: InterruptHandle,
}

impl<B: AudioBackend> PlaybackController<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, ControllerConfig::default())
    }

    pub fn with_config(backend: B, config: ControllerConfig) -> Self {
        Self {
            backend,
            config,
            muted: AtomicBool::new(false),
            interrupt: InterruptHandle::default(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Takes effect on the next `play`; a tone already playing is unaffected.
    pub fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::Relaxed);
    }

    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    pub fn interrupt_handle(&self) -> InterruptHandle {
        self.interrupt.clone()
    }

    /// Play `tone`, blocking until it has elapsed. Never fails.
    pub fn play(&self, tone: &Tone) -> PlayOutcome {
        match self.try_play(tone) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!(
                    "Play failed ({}Hz, {}ms): {}",
                    tone.frequency_hz(),
                    tone.duration_ms(),
                    e
                );
                PlayOutcome::Failed
            }
        }
    }

    /// Like [`play`](Self::play) but reports why a tone failed.
    pub fn try_play(&self, tone: &Tone) -> Result<PlayOutcome, PlaybackError> {
        if self.is_muted() {
            log::debug!(
                "Muted, skipping {}Hz for {}ms",
                tone.frequency_hz(),
                tone.duration_ms()
            );
            return Ok(PlayOutcome::Muted);
        }
        if let Some(e) = tone.synth_error() {
            return Err(e.clone().into());
        }
        self.interrupt.clear();

        match tone.samples() {
            None => {
                log::debug!("Rest for {}ms", tone.duration_ms());
                if self.wait(tone.duration()) {
                    Ok(PlayOutcome::Silence)
                } else {
                    Ok(PlayOutcome::Interrupted)
                }
            }
            Some(pcm) => self.play_samples(tone, pcm),
        }
    }

    fn play_samples(&self, tone: &Tone, pcm: &[u8]) -> Result<PlayOutcome, PlaybackError> {
        let config = SinkConfig::one_shot(pcm.len());
        let mut sink = AcquiredSink(self.backend.acquire(&config)?);
        log::debug!("Audio sink acquired: {:?}", config);

        let written = sink.write(pcm)?;
        if written != pcm.len() {
            return Err(PlaybackError::ShortWrite {
                written,
                expected: pcm.len(),
            });
        }

        sink.set_volume(tone.volume())?;
        sink.play()?;
        log::info!("Playing {}Hz for {}ms", tone.frequency_hz(), tone.duration_ms());

        let frames = config.frame_count() as u64;
        let interval = self.poll_interval(tone);
        let give_up_after = tone.duration() + self.config.stall_grace;
        let started = Instant::now();
        loop {
            if !self.wait(interval) {
                log::debug!("Playback interrupted");
                return Ok(PlayOutcome::Interrupted);
            }
            let position = sink.playback_position()?;
            if position >= frames {
                return Ok(PlayOutcome::Played);
            }
            if started.elapsed() >= give_up_after {
                return Err(PlaybackError::Stalled { position, frames });
            }
        }
    }

    fn poll_interval(&self, tone: &Tone) -> Duration {
        let interval = match self.config.poll {
            PollCadence::ToneDuration => tone.duration(),
            PollCadence::Every(interval) => interval,
        };
        interval.max(MIN_POLL_INTERVAL)
    }

    /// Sleep for `duration`. Returns false if interrupted first.
    fn wait(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        loop {
            if self.interrupt.is_interrupted() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            thread::sleep((deadline - now).min(WAIT_SLICE));
        }
    }
}
