use crate::config::EisConfig;
use crate::domain::context::RequestContext;
use crate::domain::routing::RoutingOption;
use crate::error::TransportError;
use crate::services::submission::{
    CorrelationIdProvider, EisSubmissionResult, EisSubmitter, RandomCorrelationId,
};
use anyhow::Context as _;
use async_trait::async_trait;
use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram},
};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode, Url};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Fresh per call; inbound values never survive (see [`EisSubmitter::post`]).
const CORRELATION_ID_HEADER: &str = "x-correlation-id";
/// Identifies the originating gateway process on every outbound call.
const REQUESTING_SERVICE_HEADER: &str = "x-requesting-service";
const REQUESTING_SERVICE: &str = "ctc-gateway";

#[derive(Clone, Debug)]
struct Metrics {
    requests_total: Counter<u64>,
    request_duration_seconds: Histogram<f64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("ctc-gateway");
        Self {
            requests_total: meter
                .u64_counter("ctc_eis_requests_total")
                .with_description("Completed HTTP exchanges with EIS")
                .build(),
            request_duration_seconds: meter
                .f64_histogram("ctc_eis_request_duration_seconds")
                .with_description("Round-trip time of a single EIS submission")
                .build(),
        }
    }
}

#[derive(Clone, Debug)]
struct Destination {
    url: Url,
    token: String,
}

/// HTTPS submission gateway for the two EIS instances. One pooled client is
/// shared across both legs; timeouts live in the client, not in this code.
#[derive(Clone, Debug)]
pub struct EisGateway {
    client: Client,
    gb: Destination,
    ni: Destination,
    correlation_ids: Arc<dyn CorrelationIdProvider>,
    metrics: Metrics,
}

impl EisGateway {
    /// Builds the gateway with random correlation identifiers.
    ///
    /// # Errors
    /// Fails when either base URL does not parse or the HTTP client cannot
    /// be built.
    pub fn new(config: &EisConfig) -> anyhow::Result<Self> {
        Self::with_correlation_ids(config, Arc::new(RandomCorrelationId))
    }

    /// Builds the gateway with an injected correlation-id provider.
    ///
    /// # Errors
    /// Same conditions as [`EisGateway::new`].
    pub fn with_correlation_ids(
        config: &EisConfig,
        correlation_ids: Arc<dyn CorrelationIdProvider>,
    ) -> anyhow::Result<Self> {
        let gb = Destination {
            url: Url::parse(&config.gb_url)
                .with_context(|| format!("invalid GB EIS URL: {}", config.gb_url))?,
            token: config.gb_token.clone(),
        };
        let ni = Destination {
            url: Url::parse(&config.ni_url)
                .with_context(|| format!("invalid NI EIS URL: {}", config.ni_url))?,
            token: config.ni_token.clone(),
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .context("failed to build the EIS HTTP client")?;

        Ok(Self { client, gb, ni, correlation_ids, metrics: Metrics::new() })
    }

    // Total over RoutingOption; there is deliberately no fallback arm.
    const fn destination(&self, route: RoutingOption) -> &Destination {
        match route {
            RoutingOption::Gb => &self.gb,
            RoutingOption::Xi => &self.ni,
        }
    }

    /// Verifies the EIS instance behind `route` is reachable. Any HTTP
    /// response counts as reachable; only a transport failure is an error.
    ///
    /// # Errors
    /// Returns [`TransportError`] when no HTTP response arrives at all.
    #[tracing::instrument(skip(self), fields(route = %route))]
    pub async fn health_check(&self, route: RoutingOption) -> Result<(), TransportError> {
        let destination = self.destination(route);
        let response = self.client.head(destination.url.clone()).send().await?;
        tracing::debug!(status = %response.status(), "EIS reachable");
        Ok(())
    }
}

#[async_trait]
impl EisSubmitter for EisGateway {
    #[tracing::instrument(
        skip(self, body, ctx),
        fields(route = %route, correlation_id = tracing::field::Empty)
    )]
    async fn post(
        &self,
        body: &str,
        route: RoutingOption,
        ctx: &RequestContext,
    ) -> Result<EisSubmissionResult, TransportError> {
        let destination = self.destination(route);
        let correlation_id = self.correlation_ids.next_id().to_string();
        tracing::Span::current().record("correlation_id", tracing::field::display(&correlation_id));

        // Inbound tracing headers merge in first; authorization and the
        // correlation id are always ours, whatever the caller sent.
        let mut headers = ctx.headers().clone();
        headers.remove(AUTHORIZATION);
        headers.remove(CORRELATION_ID_HEADER);

        let started = Instant::now();
        let response = self
            .client
            .post(destination.url.clone())
            .headers(headers)
            .header(CONTENT_TYPE, "application/xml")
            .header(ACCEPT, "application/xml")
            .header(REQUESTING_SERVICE_HEADER, REQUESTING_SERVICE)
            .header(CORRELATION_ID_HEADER, &correlation_id)
            .bearer_auth(&destination.token)
            .body(body.to_string())
            .send()
            .await?;

        let status = response.status();
        self.metrics.requests_total.add(1, &[
            KeyValue::new("route", route.to_string()),
            KeyValue::new("status", i64::from(status.as_u16())),
        ]);
        self.metrics
            .request_duration_seconds
            .record(started.elapsed().as_secs_f64(), &[KeyValue::new("route", route.to_string())]);

        if status == StatusCode::FORBIDDEN || status.is_server_error() {
            tracing::warn!(status = %status, "EIS refused the submission");
        } else {
            tracing::info!(status = %status, "EIS responded");
        }

        let response_body = response.text().await?;
        Ok(EisSubmissionResult::classify(status, response_body))
    }
}
