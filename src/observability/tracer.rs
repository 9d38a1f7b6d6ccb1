//! Tracer provider wired to the rotating trace file.

use super::file_writer::{FileWriter, RotationPolicy};
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::{Config, TracerProvider};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// `SpanExporter` that appends one OTLP JSON line per batch.
struct FileSpanExporter {
    writer: FileWriter,
    formatter: SpanFormatter,
    stopped: AtomicBool,
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.stopped.load(Ordering::SeqCst) {
            Err(TraceError::from("trace file exporter stopped"))
        } else {
            let line = self.formatter.format_batch(&batch).to_string();
            self.writer
                .write_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("writer", &self.writer)
            .field("formatter", &self.formatter)
            .field("stopped", &self.stopped)
            .finish()
    }
}

/// Builds a provider that exports every finished span straight to `file`.
///
/// Export is synchronous (simple processor): the plugin runs single-threaded
/// inside the host, so there is no background batching thread to rely on.
pub fn create_tracer_provider(
    file: PathBuf,
    resource: Resource,
    scope: &'static str,
) -> TracerProvider {
    let exporter = FileSpanExporter {
        writer: FileWriter::new(file, RotationPolicy::default()),
        formatter: SpanFormatter::new(resource.clone(), scope),
        stopped: AtomicBool::new(false),
    };

    TracerProvider::builder()
        .with_config(Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Tracer, TracerProvider as _};
    use opentelemetry::KeyValue;

    #[test]
    fn finished_spans_land_in_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("starscope-otlp.json");
        let resource = Resource::new(vec![KeyValue::new("service.name", "Starscope")]);
        let provider = create_tracer_provider(file.clone(), resource, "starscope");

        provider.tracer("starscope").in_span("fetch", |_cx| {});

        let written = std::fs::read_to_string(file).unwrap();
        let document: serde_json::Value =
            serde_json::from_str(written.lines().next().unwrap()).unwrap();
        assert_eq!(
            document["resourceSpans"][0]["scopeSpans"][0]["spans"][0]["name"],
            "fetch"
        );
    }
}
