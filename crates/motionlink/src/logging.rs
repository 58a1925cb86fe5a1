use clap::ValueEnum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Overrides `--log-level` with full filter directives when set.
pub const LOG_ENV: &str = "MOTIONLINK_LOG";

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Filter for the stderr subscriber: `MOTIONLINK_LOG` if it parses,
/// otherwise `level` for every target.
fn filter_for(env: Option<&str>, level: LogLevel) -> EnvFilter {
    env.and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level.directive()))
}

/// Install the stderr subscriber. Packet diagnostics arrive here through
/// `TracingSink` on the `motionlink::packet` target at `warn` level.
pub fn init_logging(format: LogFormat, level: LogLevel) {
    let env = std::env::var(LOG_ENV).ok();
    let registry = tracing_subscriber::registry().with(filter_for(env.as_deref(), level));
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false);

    let _ = match format {
        LogFormat::Text => registry.with(layer.with_target(false)).try_init(),
        LogFormat::Json => registry.with(layer.json()).try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_used_without_env() {
        assert_eq!(filter_for(None, LogLevel::Debug).to_string(), "debug");
    }

    #[test]
    fn env_directives_take_precedence() {
        let filter = filter_for(Some("motionlink::packet=trace"), LogLevel::Error);
        assert_eq!(filter.to_string(), "motionlink::packet=trace");
    }

    #[test]
    fn unparsable_env_falls_back_to_level() {
        let filter = filter_for(Some("motionlink=loudest"), LogLevel::Warn);
        assert_eq!(filter.to_string(), "warn");
    }
}
