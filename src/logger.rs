// Minimal stderr logger for the `log` facade. Level comes from BINVIEW_LOG
// unless the CLI asks for verbose output.

use log::{LevelFilter, Log, Metadata, Record};
use std::io::Write;

pub const ENV_VAR: &str = "BINVIEW_LOG";

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let _ = writeln!(
            std::io::stderr().lock(),
            "[{:>5}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

pub fn parse_level(value: &str) -> Option<LevelFilter> {
    match value.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        std::env::var(ENV_VAR)
            .ok()
            .and_then(|v| parse_level(&v))
            .unwrap_or(LevelFilter::Info)
    };
    // Already installed (tests) is fine
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
