//! Gateway backed by the Zellij host's `web_request` facility.

use super::endpoint::ApiEndpoint;
use super::response::RequestContext;
use super::Gateway;
use crate::app::FetchRequest;
use crate::domain::error::{Result, StarscopeError};
use crate::observability::TraceContext;
use zellij_tile::prelude::{web_request, HttpVerb};

/// Sends requests through the plugin host. Requires the `WebAccess` permission.
#[derive(Debug, Clone, Default)]
pub struct ZellijGateway {
    endpoint: ApiEndpoint,
}

impl ZellijGateway {
    #[must_use]
    pub const fn new(endpoint: ApiEndpoint) -> Self {
        Self { endpoint }
    }
}

impl Gateway for ZellijGateway {
    #[tracing::instrument(level = "debug", skip(self), fields(seq = request.seq, category = %request.category))]
    fn dispatch(&mut self, request: &FetchRequest) -> Result<()> {
        let url = self.endpoint.url_for(request);
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(StarscopeError::Gateway(format!(
                "unsupported API URL {:?}",
                self.endpoint.base_url()
            )));
        }
        let context = RequestContext {
            seq: request.seq,
            category: request.category,
            trace: TraceContext::from_current(),
        };

        tracing::debug!(url = %url, "sending web request");
        web_request(
            url,
            HttpVerb::Get,
            self.endpoint.headers(),
            Vec::new(),
            context.to_map(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    #[test]
    fn rejects_url_without_http_scheme() {
        let mut gateway = ZellijGateway::new(ApiEndpoint::new("localhost:8000/api", "key"));
        let request = FetchRequest {
            seq: 1,
            category: Category::People,
            params: Default::default(),
        };
        let err = gateway.dispatch(&request).unwrap_err();
        assert!(err.to_string().contains("unsupported API URL"));
    }
}
