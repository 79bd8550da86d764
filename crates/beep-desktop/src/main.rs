use std::io::{self, BufRead};

use beep_core::{AudioBackend, Beeper, NullBackend, PlaybackController};

use crate::config::Settings;
use crate::rodio_sink::RodioBackend;
use crate::script::Command;

mod config;
mod log_capture;
mod rodio_sink;
mod script;

fn main() -> anyhow::Result<()> {
    let log_env = std::env::var("BEEP_LOG").ok();
    let settings = Settings::from_args(std::env::args().skip(1), log_env.as_deref())?;
    if settings.show_help {
        println!("{}", config::USAGE);
        return Ok(());
    }
    log_capture::init(settings.log_level);

    if settings.no_audio {
        log::info!("Audio output disabled, simulating playback");
        let controller = PlaybackController::with_config(NullBackend, settings.controller_config());
        run(controller, &settings)
    } else {
        let controller =
            PlaybackController::with_config(RodioBackend, settings.controller_config());
        run(controller, &settings)
    }
}

fn run<B: AudioBackend>(
    controller: PlaybackController<B>,
    settings: &Settings,
) -> anyhow::Result<()> {
    controller.set_muted(settings.muted);

    if !settings.tones.is_empty() {
        for command in &settings.tones {
            execute(&controller, command, settings.volume);
        }
        return Ok(());
    }

    for (index, line) in io::stdin().lock().lines().enumerate() {
        let line = line?;
        match script::parse_line(&line) {
            Ok(Some(command)) => execute(&controller, &command, settings.volume),
            Ok(None) => {}
            Err(e) => log::error!("line {}: {:#}", index + 1, e),
        }
    }
    Ok(())
}

fn execute<B: AudioBackend>(
    controller: &PlaybackController<B>,
    command: &Command,
    default_volume: f32,
) {
    match *command {
        Command::Beep {
            frequency_hz,
            duration_ms,
            volume,
        } => controller.beep(frequency_hz, duration_ms, volume.unwrap_or(default_volume)),
        Command::Pause { duration_ms } => controller.beep(0, duration_ms, default_volume),
        Command::Mute(muted) => {
            log::info!("Mute {}", if muted { "on" } else { "off" });
            controller.set_muted(muted);
        }
    }
}
