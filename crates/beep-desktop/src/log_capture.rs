//! Console logger for the desktop host.
//!
//! Prints `[LEVEL] target: message` to stdout, errors and warnings to stderr.

use log::{Level, LevelFilter, Log, Metadata, Record};

pub struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level_str = match record.level() {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        };
        if record.level() <= Level::Warn {
            eprintln!("[{}] {}: {}", level_str, record.target(), record.args());
        } else {
            println!("[{}] {}: {}", level_str, record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Install the console logger. Calling it again only changes the level.
pub fn init(max_level: LevelFilter) {
    // Logger may already be set
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(max_level);
}

/// Parse a `BEEP_LOG` value; unknown values fall back to `Info`.
pub fn level_from_env(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_env() {
        assert_eq!(level_from_env(None), LevelFilter::Info);
        assert_eq!(level_from_env(Some("debug")), LevelFilter::Debug);
        assert_eq!(level_from_env(Some(" WARN ")), LevelFilter::Warn);
        assert_eq!(level_from_env(Some("off")), LevelFilter::Off);
        assert_eq!(level_from_env(Some("loud")), LevelFilter::Info);
    }
}
