//! Tracing subscriber setup.
//!
//! Two layers share one registry:
//!
//! - console (stderr): level from `-v`/`-q`, or `RUST_LOG` when set; the
//!   session transcript is hidden here unless `RUST_LOG` names its target
//! - file: `<log_dir>/readme_crew.log.<date>`, rotated daily and appended
//!   to; always keeps the transcript at `info`

use crew_infrastructure::TRANSCRIPT_TARGET;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE_PREFIX: &str = "readme_crew.log";

/// Console filter directives. A blank `RUST_LOG` counts as unset.
fn console_directives(console_level: &str, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim).filter(|s| !s.is_empty()) {
        Some(env) if env.contains(TRANSCRIPT_TARGET) => env.to_string(),
        Some(env) => format!("{},{}=off", env, TRANSCRIPT_TARGET),
        None => format!("{},{}=off", console_level, TRANSCRIPT_TARGET),
    }
}

/// Install the global subscriber. The returned guard flushes the file
/// writer on drop and must live until the process exits.
pub fn init(console_level: &str, log_dir: &Path) -> WorkerGuard {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let console_filter = EnvFilter::try_new(console_directives(console_level, rust_log.as_deref()))
        .unwrap_or_else(|_| EnvFilter::new(console_directives(console_level, None)));

    let file_level = match console_level {
        "debug" | "trace" => console_level,
        _ => "info",
    };
    let file_filter = EnvFilter::new(format!("{},{}=info", file_level, TRANSCRIPT_TARGET));

    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact()
                .with_filter(console_filter),
        )
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_filter(file_filter),
        )
        .init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_hides_transcript() {
        assert_eq!(
            console_directives("info", None),
            "info,readme_crew::transcript=off"
        );
    }

    #[test]
    fn test_rust_log_still_hides_transcript() {
        assert_eq!(
            console_directives("warn", Some("debug,reqwest=warn")),
            "debug,reqwest=warn,readme_crew::transcript=off"
        );
        assert_eq!(
            console_directives("warn", Some("  ")),
            "warn,readme_crew::transcript=off"
        );
    }

    #[test]
    fn test_rust_log_naming_transcript_is_kept() {
        let env = "info,readme_crew::transcript=info";
        assert_eq!(console_directives("warn", Some(env)), env);
    }
}
