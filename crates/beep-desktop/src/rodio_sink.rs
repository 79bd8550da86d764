use std::time::Instant;

use beep_core::consts::BYTES_PER_FRAME;
use beep_core::error::SinkError;
use beep_core::sink::{AudioBackend, AudioSink, SinkConfig};
use beep_core::synth::decode_pcm16;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, Sink};

/// Opens the default output device for every tone.
pub struct RodioBackend;

impl AudioBackend for RodioBackend {
    fn acquire(&self, config: &SinkConfig) -> Result<Box<dyn AudioSink>, SinkError> {
        if config.sample_rate_hz == 0 {
            return Err(SinkError::Rejected("sample rate must be non-zero".into()));
        }

        // _stream must live as long as the sink
        let (stream, stream_handle) =
            OutputStream::try_default().map_err(|e| SinkError::Unavailable(e.to_string()))?;
        let sink =
            Sink::try_new(&stream_handle).map_err(|e| SinkError::Unavailable(e.to_string()))?;
        // Nothing plays until the whole buffer is written and play() is called
        sink.pause();

        Ok(Box::new(RodioSink {
            sink: Some(sink),
            _stream: stream,
            config: *config,
            samples: Vec::with_capacity(config.frame_count()),
            frames: 0,
            started: None,
        }))
    }
}

struct RodioSink {
    sink: Option<Sink>,
    _stream: OutputStream,
    config: SinkConfig,
    samples: Vec<i16>,
    frames: u64,
    started: Option<Instant>,
}

impl RodioSink {
    fn sink(&self) -> Result<&Sink, SinkError> {
        self.sink
            .as_ref()
            .ok_or_else(|| SinkError::Playback("sink already released".into()))
    }
}

impl AudioSink for RodioSink {
    fn write(&mut self, pcm: &[u8]) -> Result<usize, SinkError> {
        if self.started.is_some() {
            return Err(SinkError::Write("one-shot buffer already playing".into()));
        }
        let room = self.config.buffer_size_bytes - self.samples.len() * BYTES_PER_FRAME;
        let accepted = pcm.len().min(room) / BYTES_PER_FRAME * BYTES_PER_FRAME;
        self.samples.extend(decode_pcm16(&pcm[..accepted]));
        Ok(accepted)
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), SinkError> {
        self.sink()?.set_volume(volume);
        Ok(())
    }

    fn play(&mut self) -> Result<(), SinkError> {
        let samples = std::mem::take(&mut self.samples);
        self.frames = samples.len() as u64;
        let source = SamplesBuffer::new(1, self.config.sample_rate_hz, samples);

        let sink = self.sink()?;
        sink.append(source);
        sink.play();
        self.started = Some(Instant::now());
        Ok(())
    }

    fn playback_position(&self) -> Result<u64, SinkError> {
        let sink = self.sink()?;
        let Some(started) = self.started else {
            return Ok(0);
        };
        if sink.empty() {
            return Ok(self.frames);
        }
        // Still queued: report elapsed frames, short of the end until the
        // device has actually drained the buffer
        let elapsed =
            started.elapsed().as_micros() * u128::from(self.config.sample_rate_hz) / 1_000_000;
        let elapsed = u64::try_from(elapsed).unwrap_or(u64::MAX);
        Ok(elapsed.min(self.frames.saturating_sub(1)))
    }

    fn release(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.samples.clear();
        self.started = None;
    }
}
