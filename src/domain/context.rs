use reqwest::header::HeaderMap;

/// Tracing headers captured at the inbound boundary and threaded explicitly
/// through routing and submission. Request-scoped; constructed fresh per
/// message by the hosting service.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    headers: HeaderMap,
}

impl RequestContext {
    #[must_use]
    pub const fn new(headers: HeaderMap) -> Self {
        Self { headers }
    }

    /// Inbound headers worth forwarding downstream. The gateway merges these
    /// into the outbound request but owns authorization and correlation.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}
