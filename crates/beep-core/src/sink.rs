//! Platform audio abstraction.
//!
//! A backend hands out one-shot sinks: the whole tone is written once,
//! started, polled until the playback head reaches the last frame, then
//! released. This is the only surface a platform has to provide.

use std::time::Instant;

use crate::consts::{BYTES_PER_FRAME, SAMPLE_RATE_HZ};
use crate::error::SinkError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    Mono,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleEncoding {
    /// Signed 16-bit little-endian.
    Pcm16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    /// The entire sound is submitted before playback starts.
    OneShot,
}

/// Output device configuration requested for a single tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    pub sample_rate_hz: u32,
    pub channels: ChannelLayout,
    pub encoding: SampleEncoding,
    pub mode: TransferMode,
    pub buffer_size_bytes: usize,
}

impl SinkConfig {
    pub fn one_shot(buffer_size_bytes: usize) -> Self {
        Self {
            sample_rate_hz: SAMPLE_RATE_HZ,
            channels: ChannelLayout::Mono,
            encoding: SampleEncoding::Pcm16,
            mode: TransferMode::OneShot,
            buffer_size_bytes,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.buffer_size_bytes / BYTES_PER_FRAME
    }
}

/// Source of output devices.
pub trait AudioBackend: Send {
    fn acquire(&self, config: &SinkConfig) -> Result<Box<dyn AudioSink>, SinkError>;
}

/// An acquired one-shot output device.
pub trait AudioSink {
    /// Submit PCM bytes, returning how many were accepted.
    fn write(&mut self, pcm: &[u8]) -> Result<usize, SinkError>;
    fn set_volume(&mut self, volume: f32) -> Result<(), SinkError>;
    fn play(&mut self) -> Result<(), SinkError>;
    /// Frames played so far.
    fn playback_position(&self) -> Result<u64, SinkError>;
    fn release(&mut self);
}

/// Backend for hosts without an audio device.
///
/// Its sinks accept every byte and advance the playback head with wall-clock
/// time, so callers still block for the length of the tone.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBackend;

impl AudioBackend for NullBackend {
    fn acquire(&self, config: &SinkConfig) -> Result<Box<dyn AudioSink>, SinkError> {
        log::debug!("Null sink acquired ({} bytes)", config.buffer_size_bytes);
        Ok(Box::new(NullSink {
            config: *config,
            written: 0,
            started: None,
        }))
    }
}

struct NullSink {
    config: SinkConfig,
    written: usize,
    started: Option<Instant>,
}

impl AudioSink for NullSink {
    fn write(&mut self, pcm: &[u8]) -> Result<usize, SinkError> {
        let accepted = pcm.len().min(self.config.buffer_size_bytes - self.written);
        self.written += accepted;
        Ok(accepted)
    }

    fn set_volume(&mut self, _volume: f32) -> Result<(), SinkError> {
        Ok(())
    }

    fn play(&mut self) -> Result<(), SinkError> {
        self.started = Some(Instant::now());
        Ok(())
    }

    fn playback_position(&self) -> Result<u64, SinkError> {
        let frames = (self.written / BYTES_PER_FRAME) as u64;
        let Some(started) = self.started else {
            return Ok(0);
        };
        let elapsed =
            started.elapsed().as_micros() * u128::from(self.config.sample_rate_hz) / 1_000_000;
        Ok(u64::try_from(elapsed).unwrap_or(u64::MAX).min(frames))
    }

    fn release(&mut self) {
        self.started = None;
        self.written = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_one_shot_config() {
        let config = SinkConfig::one_shot(3200);
        assert_eq!(config.sample_rate_hz, 8000);
        assert_eq!(config.channels, ChannelLayout::Mono);
        assert_eq!(config.encoding, SampleEncoding::Pcm16);
        assert_eq!(config.mode, TransferMode::OneShot);
        assert_eq!(config.frame_count(), 1600);
    }

    #[test]
    fn test_null_sink_caps_write_at_buffer_size() {
        let mut sink = NullBackend.acquire(&SinkConfig::one_shot(4)).unwrap();
        assert_eq!(sink.write(&[0; 6]).unwrap(), 4);
        assert_eq!(sink.write(&[0; 2]).unwrap(), 0);
    }

    #[test]
    fn test_null_sink_position_follows_clock() {
        let mut sink = NullBackend.acquire(&SinkConfig::one_shot(160)).unwrap();
        sink.write(&[0; 160]).unwrap();
        assert_eq!(sink.playback_position().unwrap(), 0);
        sink.play().unwrap();
        // 80 frames at 8kHz is 10ms
        thread::sleep(Duration::from_millis(20));
        assert_eq!(sink.playback_position().unwrap(), 80);
        sink.release();
    }
}
