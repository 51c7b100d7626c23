use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset. `debug` and `trace` also let
/// dependencies log at `info`.
fn default_directives(level: &str) -> String {
    match level.to_ascii_lowercase().as_str() {
        "debug" | "trace" => format!("course_tracker={},info", level.to_ascii_lowercase()),
        other => format!("course_tracker={}", other),
    }
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

/// Compact stderr output; the level comes from `RUST_LOG`, `--verbose` or the config file.
pub fn init_cli_logger(level: &str) {
    let filter = env_filter(level);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// Structured output for log collectors; the level comes from `RUST_LOG` or the config file.
pub fn init_json_logger(level: &str) {
    let filter = env_filter(level);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .json(),
        )
        .init();
}
