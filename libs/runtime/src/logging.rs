use crate::config::LoggingConfig;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

fn parse_tracing_level(s: &str) -> Option<Level> {
    match s.to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        "off" | "none" => None,
        _ => Some(Level::INFO),
    }
}

/// Initialize logging from a configuration.
///
/// `RUST_LOG` takes precedence over the configured level when set. Safe to
/// call more than once; only the first call installs the subscriber.
pub fn init_logging(cfg: Option<&LoggingConfig>) {
    // Bridge `log` → `tracing` *before* installing the subscriber
    let _ = tracing_log::LogTracer::init();

    let default_directive = match cfg.and_then(|c| parse_tracing_level(&c.level)) {
        Some(level) => level.to_string().to_ascii_lowercase(),
        None if cfg.is_some() => "off".to_string(),
        None => "info".to_string(),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
