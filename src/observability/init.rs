//! Subscriber setup: `tracing` macros → OpenTelemetry → trace file.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::{Path, PathBuf};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `service.name` reported in every batch.
pub const SERVICE_NAME: &str = "Starscope";

/// Instrumentation scope of the plugin's tracer.
const SCOPE: &str = "starscope";

/// File name of the live trace file inside the data directory.
pub const TRACE_FILE_NAME: &str = "starscope-otlp.json";

/// Location of the live trace file for a data directory.
#[must_use]
pub fn trace_file_path(data_dir: &Path) -> PathBuf {
    data_dir.join(TRACE_FILE_NAME)
}

/// Installs the global subscriber, filtered by `config.trace_level`.
///
/// Tracing is optional: if the data directory cannot be created the plugin
/// runs without a subscriber. Calling this twice keeps the first subscriber.
///
/// ```no_run
/// use starscope::observability::init_tracing;
/// use starscope::Config;
///
/// init_tracing(&Config::default());
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = tracer::create_tracer_provider(trace_file_path(&data_dir), resource, SCOPE);

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(&config.trace_level))
        .with(OpenTelemetryLayer::new(provider.tracer(SCOPE)))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_file_sits_in_data_dir() {
        assert_eq!(
            trace_file_path(Path::new("/data")),
            PathBuf::from("/data/starscope-otlp.json")
        );
    }
}
