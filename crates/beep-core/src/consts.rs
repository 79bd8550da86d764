/// Fixed output rate; there is no negotiation with the device.
pub const SAMPLE_RATE_HZ: u32 = 8000;

/// Peak sample value, the largest positive int16.
pub const MAX_AMPLITUDE: i16 = i16::MAX;

pub const ONE_SECOND_MS: u32 = 1000;

/// Mono PCM16: one frame is one little-endian int16.
pub const BYTES_PER_FRAME: usize = 2;

/// Tones shorter than a second fade in and out over half their length each.
pub const SHORT_TONE_RAMP_DIVISOR: usize = 2;

/// Longer tones fade over a twentieth of their length.
pub const LONG_TONE_RAMP_DIVISOR: usize = 20;

/// Largest PCM buffer a single tone may synthesize (256 MiB, about 4.6 hours).
pub const MAX_PCM_BYTES: usize = 256 * 1024 * 1024;
