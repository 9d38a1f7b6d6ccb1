//! OpenTelemetry tracing exported to a local OTLP JSON file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → FileSpanExporter → starscope-otlp.json
//! ```
//!
//! The file lives in the plugin data directory, is rotated at 10 MiB with
//! three backups, and holds one OTLP `resourceSpans` document per line. The
//! filter level comes from the `trace_level` plugin option (default `info`).
//!
//! Outbound requests carry a [`TraceContext`] in the host's request context so
//! a response can be tied back to the span that issued it.
//!
//! # Modules
//!
//! - [`init`]: Subscriber installation
//! - [`context`]: Trace ids for request correlation
//! - `tracer`: Provider and span exporter
//! - `span_formatter`: OTLP JSON encoding
//! - `file_writer`: Rotating line writer

pub mod context;
mod file_writer;
pub mod init;
mod span_formatter;
mod tracer;

pub use context::TraceContext;
pub use init::{init_tracing, trace_file_path, SERVICE_NAME, TRACE_FILE_NAME};
