use log::{LevelFilter, Log, Metadata, Record};
use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

/// A logger that writes one line per record to stdout.
///
/// Records above `level` are dropped in `enabled`, so a logger built with
/// `LevelFilter::Info` stays quiet about per-frame classification traces.
pub struct StdoutLogger {
    level: LevelFilter,
}

impl StdoutLogger {
    pub const fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }
}

impl Default for StdoutLogger {
    fn default() -> Self {
        Self::new(default_level())
    }
}

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        println!("{}", format_record(record));
    }

    fn flush(&self) {
        std::io::stdout().flush().ok();
    }
}

/// Format a record as `<secs.millis> [LEVEL] [thread:..] file:line - message`
pub fn format_record(record: &Record) -> String {
    let file = record.file().unwrap_or("unknown");
    let line = record.line().unwrap_or(0);
    format!(
        "{} [{}] [thread:{:?}] {}:{} - {}",
        format_timestamp(),
        record.level(),
        std::thread::current().id(),
        file,
        line,
        record.args()
    )
}

/// Seconds since the Unix epoch with millisecond precision.
///
/// A clock set before the epoch formats as `0.000` rather than failing.
pub fn format_timestamp() -> String {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:03}", elapsed.as_secs(), elapsed.subsec_millis())
}

/// Parse a level name (`off`, `error`, `warn`, `info`, `debug`, `trace`).
///
/// Matching is case-insensitive and ignores surrounding whitespace.
pub fn parse_level(value: &str) -> Option<LevelFilter> {
    match value.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn install(level: LevelFilter) {
    // set_logger needs a &'static; the logger lives for the whole process.
    let logger: &'static StdoutLogger = Box::leak(Box::new(StdoutLogger::new(level)));
    if log::set_logger(logger).is_ok() {
        log::set_max_level(level);
    }
}

/// Initialize the global logger with a StdoutLogger
///
/// Sets the max level based on build mode:
/// - Debug builds: LevelFilter::Debug
/// - Release builds: LevelFilter::Info
///
/// Only the first call per process installs a logger. Later calls are ignored.
pub fn init_stdout_logger() {
    install(default_level());
}

/// Initialize the global logger, reading the level from the environment
/// variable `var` (e.g. `GESTURE_LOG=trace`).
///
/// Falls back to the build-mode default when the variable is unset or holds
/// an unknown level name. Returns the level that was requested.
pub fn init_stdout_logger_from_env(var: &str) -> LevelFilter {
    let level = std::env::var(var)
        .ok()
        .and_then(|value| parse_level(&value))
        .unwrap_or_else(default_level);
    install(level);
    level
}

/// Log a fatal error and exit the process
///
/// Logs at Error level (the log crate has no Fatal level), flushes stdout,
/// and exits with status 1.
#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)*) => {{
        $crate::log::error!($($arg)*);
        {
            use std::io::Write;
            let _ = std::io::stdout().flush();
        }
        std::process::exit(1);
    }};
}
