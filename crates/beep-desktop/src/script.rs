//! BEEP/PLAY command parsing for the desktop host.
//!
//! Script lines:
//!
//! ```text
//! BEEP 440, 200        ' frequency Hz, duration ms
//! BEEP 880, 100, 0.5   ' optional volume
//! PAUSE 250            ' rest
//! MUTE ON
//! ```
//!
//! Tones on the command line use `FREQ:DURATION[:VOLUME]`. Durations above
//! [`MAX_DURATION_MS`] are rejected.

use anyhow::{Context, Result, anyhow, bail};

/// Longest BEEP or PAUSE accepted from a script: ten minutes.
pub const MAX_DURATION_MS: u32 = 10 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Beep {
        frequency_hz: u32,
        duration_ms: u32,
        volume: Option<f32>,
    },
    Pause {
        duration_ms: u32,
    },
    Mute(bool),
}

/// Parse one script line. Blank lines and comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('\'') || line.starts_with('#') {
        return Ok(None);
    }

    let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    // Trailing comment
    let rest = rest.split('\'').next().unwrap_or_default().trim();

    let command = match keyword.to_ascii_uppercase().as_str() {
        "BEEP" | "SOUND" => {
            let args: Vec<&str> = rest.split(',').map(str::trim).collect();
            match args.as_slice() {
                [frequency, duration] => Command::Beep {
                    frequency_hz: parse_u32(frequency, "frequency")?,
                    duration_ms: parse_duration(duration)?,
                    volume: None,
                },
                [frequency, duration, volume] => Command::Beep {
                    frequency_hz: parse_u32(frequency, "frequency")?,
                    duration_ms: parse_duration(duration)?,
                    volume: Some(parse_volume(volume)?),
                },
                _ => bail!("expected `{} frequency, duration[, volume]`", keyword),
            }
        }
        "PAUSE" | "REST" => Command::Pause {
            duration_ms: parse_duration(rest)?,
        },
        "MUTE" => match rest.to_ascii_uppercase().as_str() {
            "ON" | "" => Command::Mute(true),
            "OFF" => Command::Mute(false),
            other => bail!("expected `MUTE ON` or `MUTE OFF`, got `{}`", other),
        },
        other => bail!("unknown command `{}`", other),
    };
    Ok(Some(command))
}

/// Parse a `FREQ:DURATION[:VOLUME]` command-line token.
pub fn parse_tone_token(token: &str) -> Result<Command> {
    let parts: Vec<&str> = token.split(':').collect();
    let (frequency, duration, volume) = match parts.as_slice() {
        [frequency, duration] => (frequency, duration, None),
        [frequency, duration, volume] => (frequency, duration, Some(parse_volume(volume)?)),
        _ => bail!("expected FREQ:DURATION[:VOLUME], got `{}`", token),
    };
    Ok(Command::Beep {
        frequency_hz: parse_u32(frequency, "frequency")?,
        duration_ms: parse_duration(duration)?,
        volume,
    })
}

fn parse_u32(value: &str, what: &str) -> Result<u32> {
    // Negative frequencies and durations are rejected here rather than clamped
    value
        .trim()
        .parse()
        .with_context(|| format!("invalid {} `{}`", what, value.trim()))
}

fn parse_duration(value: &str) -> Result<u32> {
    let duration_ms = parse_u32(value, "duration")?;
    if duration_ms > MAX_DURATION_MS {
        bail!("duration {}ms exceeds the {}ms limit", duration_ms, MAX_DURATION_MS);
    }
    Ok(duration_ms)
}

pub fn parse_volume(value: &str) -> Result<f32> {
    let volume: f32 = value
        .trim()
        .parse()
        .with_context(|| format!("invalid volume `{}`", value.trim()))?;
    if !volume.is_finite() || volume < 0.0 {
        return Err(anyhow!("volume must be a non-negative number, got {}", volume));
    }
    Ok(volume)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_beep() {
        assert_eq!(
            parse_line("BEEP 440, 200").unwrap(),
            Some(Command::Beep {
                frequency_hz: 440,
                duration_ms: 200,
                volume: None
            })
        );
        assert_eq!(
            parse_line("  beep 880,100,0.5  ' high").unwrap(),
            Some(Command::Beep {
                frequency_hz: 880,
                duration_ms: 100,
                volume: Some(0.5)
            })
        );
    }

    #[test]
    fn test_parse_pause_and_mute() {
        assert_eq!(parse_line("PAUSE 250").unwrap(), Some(Command::Pause { duration_ms: 250 }));
        assert_eq!(parse_line("MUTE ON").unwrap(), Some(Command::Mute(true)));
        assert_eq!(parse_line("mute off").unwrap(), Some(Command::Mute(false)));
    }

    #[test]
    fn test_skip_blank_and_comments() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("' a remark").unwrap(), None);
        assert_eq!(parse_line("# shell style").unwrap(), None);
    }

    #[test]
    fn test_reject_bad_lines() {
        assert!(parse_line("BEEP -440, 200").is_err());
        assert!(parse_line("BEEP 440").is_err());
        assert!(parse_line("BEEP 440, 200, loud").is_err());
        assert!(parse_line("MUTE MAYBE").is_err());
        assert!(parse_line("HONK 1, 2").is_err());
    }

    #[test]
    fn test_parse_tone_token() {
        assert_eq!(
            parse_tone_token("440:200").unwrap(),
            Command::Beep {
                frequency_hz: 440,
                duration_ms: 200,
                volume: None
            }
        );
        assert_eq!(
            parse_tone_token("0:500:0.2").unwrap(),
            Command::Beep {
                frequency_hz: 0,
                duration_ms: 500,
                volume: Some(0.2)
            }
        );
        assert!(parse_tone_token("440").is_err());
        assert!(parse_tone_token("440:200:1:2").is_err());
    }

    #[test]
    fn test_reject_oversized_durations() {
        assert!(parse_line("BEEP 440, 4294967295").is_err());
        assert!(parse_line("PAUSE 600001").is_err());
        assert!(parse_tone_token("440:4294967295").is_err());
        assert_eq!(
            parse_line("PAUSE 600000").unwrap(),
            Some(Command::Pause {
                duration_ms: MAX_DURATION_MS
            })
        );
    }

    #[test]
    fn test_volume_must_be_non_negative() {
        assert!(parse_volume("-0.5").is_err());
        assert!(parse_volume("NaN").is_err());
        assert_eq!(parse_volume("1.5").unwrap(), 1.5);
    }
}
