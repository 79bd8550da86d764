use crate::controller::PlaybackController;
use crate::sink::AudioBackend;
use crate::tone::Tone;

/// Platform-agnostic entry point for BEEP/PLAY commands.
///
/// Blocks until the sound, or the equivalent silence, has elapsed.
/// A frequency of zero is a rest.
pub trait Beeper: Send {
    fn beep(&self, frequency_hz: u32, duration_ms: u32, volume: f32);
}

impl<B: AudioBackend> Beeper for PlaybackController<B> {
    fn beep(&self, frequency_hz: u32, duration_ms: u32, volume: f32) {
        self.play(&Tone::new(frequency_hz, duration_ms, volume));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::NullBackend;
    use std::time::{Duration, Instant};

    fn play_through(beeper: &dyn Beeper) {
        beeper.beep(0, 100, 1.0);
        beeper.beep(1000, 100, 0.5);
    }

    #[test]
    fn test_beeps_block_in_sequence() {
        let controller = PlaybackController::new(NullBackend);
        let start = Instant::now();
        play_through(&controller);
        assert!(start.elapsed() >= Duration::from_millis(200));
    }

    #[test]
    fn test_muted_beeps_return_immediately() {
        let controller = PlaybackController::new(NullBackend);
        controller.set_muted(true);
        let start = Instant::now();
        play_through(&controller);
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
