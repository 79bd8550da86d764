//! PCM16 sine synthesis with a linear attack/release envelope.
//!
//! The envelope fades the tone in from silence and back out so the device
//! does not click at either end of the buffer.

use core::f64::consts::TAU;

use crate::consts::{
    BYTES_PER_FRAME, LONG_TONE_RAMP_DIVISOR, MAX_AMPLITUDE, MAX_PCM_BYTES, ONE_SECOND_MS,
    SAMPLE_RATE_HZ, SHORT_TONE_RAMP_DIVISOR,
};
use crate::error::SynthError;

/// Number of frames for a tone of `duration_ms`, never less than one.
pub fn sample_count(duration_ms: u32) -> usize {
    let frames = u64::from(duration_ms) * u64::from(SAMPLE_RATE_HZ) / u64::from(ONE_SECOND_MS);
    usize::try_from(frames).unwrap_or(usize::MAX).max(1)
}

/// Length of the attack (and of the release) in frames.
///
/// Can be zero for very short buffers, in which case the whole buffer is
/// played at full amplitude.
pub fn envelope_ramp(sample_count: usize, duration_ms: u32) -> usize {
    let divisor = if duration_ms < ONE_SECOND_MS {
        SHORT_TONE_RAMP_DIVISOR
    } else {
        LONG_TONE_RAMP_DIVISOR
    };
    sample_count / divisor
}

/// Synthesize `duration_ms` of a pure sine at `frequency_hz` as mono,
/// little-endian, signed 16-bit PCM.
///
/// The result is `2 * sample_count(duration_ms)` bytes long and depends only
/// on the arguments. `frequency_hz` should be non-zero; zero yields a buffer
/// of silence, and frequencies above the Nyquist limit alias.
///
/// Buffers larger than [`MAX_PCM_BYTES`], or that cannot be allocated, are
/// reported as errors instead of aborting.
pub fn synthesize(frequency_hz: u32, duration_ms: u32) -> Result<Vec<u8>, SynthError> {
    let frames = sample_count(duration_ms);
    let bytes = frames
        .checked_mul(BYTES_PER_FRAME)
        .filter(|&bytes| bytes <= MAX_PCM_BYTES)
        .ok_or(SynthError::TooLong {
            duration_ms,
            max_bytes: MAX_PCM_BYTES,
        })?;
    let ramp = envelope_ramp(frames, duration_ms);
    let frequency = f64::from(frequency_hz);
    let rate = f64::from(SAMPLE_RATE_HZ);

    let mut pcm = Vec::new();
    pcm.try_reserve_exact(bytes).map_err(|_| SynthError::OutOfMemory { bytes })?;
    for i in 0..frames {
        let peak = (frequency * TAU * i as f64 / rate).sin() * f64::from(MAX_AMPLITUDE);
        let value = if i < ramp {
            peak * i as f64 / ramp as f64
        } else if i < frames - ramp {
            peak
        } else {
            peak * (frames - i) as f64 / ramp as f64
        };
        // |value| <= MAX_AMPLITUDE, so the cast only truncates the fraction
        pcm.extend_from_slice(&(value as i16).to_le_bytes());
    }
    Ok(pcm)
}

/// Decode little-endian PCM16 back into samples. A trailing odd byte is ignored.
pub fn decode_pcm16(pcm: &[u8]) -> impl Iterator<Item = i16> + '_ {
    pcm.chunks_exact(BYTES_PER_FRAME)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
}
