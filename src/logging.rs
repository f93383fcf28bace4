//! Diagnostic logging.
//!
//! Diagnostics go through `tracing` and are written to stderr so stdout
//! stays reserved for command output (plist XML, publish information).
//! `RUST_LOG` directives are added on top of `--log-level`.

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Build the filter for `level`, extended by any `RUST_LOG` directives.
pub fn filter_for(level: LogLevel, rust_log: Option<&str>) -> EnvFilter {
    let mut filter = EnvFilter::new(level.to_filter_directive());

    for directive in rust_log.unwrap_or_default().split(',') {
        let directive = directive.trim();
        if directive.is_empty() {
            continue;
        }
        match directive.parse() {
            Ok(parsed) => filter = filter.add_directive(parsed),
            Err(e) => eprintln!("ignoring invalid RUST_LOG directive '{}': {}", directive, e),
        }
    }

    filter
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init(level: LogLevel) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(level, rust_log.as_deref()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_match_level_names() {
        for level in LogLevel::value_variants() {
            let name = level
                .to_possible_value()
                .map(|v| v.get_name().to_string())
                .unwrap();
            assert_eq!(name, level.to_filter_directive());
        }
    }

    #[test]
    fn rust_log_directives_are_added() {
        let filter = filter_for(LogLevel::Warn, Some("grace_dizmo::store=debug, ,bad=[[["));
        let rendered = filter.to_string();
        assert!(rendered.contains("warn"));
        assert!(rendered.contains("grace_dizmo::store=debug"));
    }
}
