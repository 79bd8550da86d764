use std::time::Duration;

use anyhow::{Context, Result, bail};
use beep_core::controller::{ControllerConfig, PollCadence};
use log::LevelFilter;

use crate::log_capture;
use crate::script::{self, Command};

pub const USAGE: &str = "\
usage: beep-desktop [--mute] [--no-audio] [--volume V] [--poll-ms MS] [FREQ:DURATION[:VOLUME]]...

Plays each tone in turn. With no tones, reads BEEP/PAUSE/MUTE lines from stdin.
Durations are limited to 600000ms.
Set BEEP_LOG to error, warn, info, debug or trace to change log output.";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub muted: bool,
    /// Simulate playback with the wall clock instead of opening a device.
    pub no_audio: bool,
    /// Volume for tones that do not carry their own.
    pub volume: f32,
    pub poll_interval: Option<Duration>,
    pub log_level: LevelFilter,
    pub tones: Vec<Command>,
    pub show_help: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            muted: false,
            no_audio: false,
            volume: 1.0,
            poll_interval: None,
            log_level: LevelFilter::Info,
            tones: Vec::new(),
            show_help: false,
        }
    }
}

impl Settings {
    /// Build settings from command-line arguments (without the program name)
    /// and the `BEEP_LOG` environment value.
    pub fn from_args<I>(args: I, log_env: Option<&str>) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut settings = Settings {
            log_level: log_capture::level_from_env(log_env),
            ..Settings::default()
        };

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => settings.show_help = true,
                "--mute" => settings.muted = true,
                "--no-audio" => settings.no_audio = true,
                "--volume" => {
                    let value = args.next().context("--volume needs a value")?;
                    settings.volume = script::parse_volume(&value)?;
                }
                "--poll-ms" => {
                    let value = args.next().context("--poll-ms needs a value")?;
                    let ms: u64 = value
                        .parse()
                        .with_context(|| format!("invalid --poll-ms `{}`", value))?;
                    settings.poll_interval = Some(Duration::from_millis(ms));
                }
                flag if flag.starts_with("--") => bail!("unknown option `{}`\n\n{}", flag, USAGE),
                token => settings.tones.push(script::parse_tone_token(token)?),
            }
        }
        Ok(settings)
    }

    pub fn controller_config(&self) -> ControllerConfig {
        let poll = match self.poll_interval {
            Some(interval) => PollCadence::Every(interval),
            None => PollCadence::ToneDuration,
        };
        ControllerConfig {
            poll,
            ..ControllerConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_args(Vec::new(), None).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.controller_config(), ControllerConfig::default());
    }

    #[test]
    fn test_flags_and_tones() {
        let settings = Settings::from_args(
            args(&["--mute", "--volume", "0.25", "--poll-ms", "5", "440:200", "0:100"]),
            Some("debug"),
        )
        .unwrap();
        assert!(settings.muted);
        assert!(!settings.no_audio);
        assert_eq!(settings.volume, 0.25);
        assert_eq!(settings.log_level, LevelFilter::Debug);
        assert_eq!(settings.tones.len(), 2);
        assert_eq!(
            settings.controller_config().poll,
            PollCadence::Every(Duration::from_millis(5))
        );
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(Settings::from_args(args(&["--volume"]), None).is_err());
        assert!(Settings::from_args(args(&["--poll-ms", "soon"]), None).is_err());
        assert!(Settings::from_args(args(&["--loud"]), None).is_err());
        assert!(Settings::from_args(args(&["440"]), None).is_err());
        assert!(Settings::from_args(args(&["440:4294967295"]), None).is_err());
    }
}
