use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level. Format is `json`,
/// `pretty` or anything else for the compact default. Returns `false` when a
/// subscriber was already installed.
pub fn init_tracing(settings: &LoggingSettings) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    let installed = match settings.format.as_str() {
        "json" => subscriber.json().try_init(),
        "pretty" => subscriber.pretty().try_init(),
        _ => subscriber.try_init(),
    };

    installed.is_ok()
}
