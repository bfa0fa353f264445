//! Logging bootstrap for the binary.
//!
//! The library crates only emit through `log`; this installs flexi_logger
//! writing to stderr so stdout stays reserved for Markdown output.

use flexi_logger::{Logger, LoggerHandle};

const LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Start logging at `level`. The returned handle must be kept alive.
pub fn init_logging(level: &str) -> Result<LoggerHandle, String> {
    let level = normalize_level(level)?;
    Logger::try_with_str(level)
        .and_then(|logger| logger.log_to_stderr().start())
        .map_err(|err| format!("failed to initialize logging: {err}"))
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    let wanted = level.trim().to_ascii_lowercase();
    LEVELS
        .iter()
        .copied()
        .find(|known| *known == wanted)
        .ok_or_else(|| format!("unsupported log level `{level}` (expected one of {})", LEVELS.join(", ")))
}
