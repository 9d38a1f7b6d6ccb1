//! Trace identifiers carried across the host's request/response boundary.

/// Trace and span id of the span that issued a request, as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// 32-character OpenTelemetry trace id.
    pub trace_id: String,
    /// 16-character id of the issuing span.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the ids of the current `tracing` span.
    ///
    /// `None` when no OpenTelemetry layer is installed or the span is not
    /// sampled.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let context = tracing::Span::current().context();
        let span = context.span();
        let span_context = span.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subscriber_means_no_context() {
        assert_eq!(TraceContext::from_current(), None);
    }
}
