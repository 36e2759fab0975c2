use crate::domain::context::RequestContext;
use crate::domain::routing::ChannelType;
use crate::domain::transit::TransitMessage;
use crate::error::SubmissionError;
use crate::services::eligibility::RouteChecker;
use crate::services::submission::{EisSubmissionResult, EisSubmitter};
use opentelemetry::{KeyValue, global, metrics::Counter};
use std::sync::Arc;

#[derive(Clone, Debug)]
struct Metrics {
    forwarded_total: Counter<u64>,
    rejected_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("ctc-gateway");
        Self {
            forwarded_total: meter
                .u64_counter("ctc_messages_forwarded_total")
                .with_description("Messages forwarded to an EIS instance")
                .build(),
            rejected_total: meter
                .u64_counter("ctc_messages_rejected_total")
                .with_description("Messages rejected before any submission attempt")
                .build(),
        }
    }
}

/// Orchestrates one routing and submission cycle: classify, check
/// eligibility, forward. Holds no per-request state.
#[derive(Clone, Debug)]
pub struct RoutingService {
    checker: Arc<dyn RouteChecker>,
    gateway: Arc<dyn EisSubmitter>,
    metrics: Metrics,
}

impl RoutingService {
    #[must_use]
    pub fn new(checker: Arc<dyn RouteChecker>, gateway: Arc<dyn EisSubmitter>) -> Self {
        Self { checker, gateway, metrics: Metrics::new() }
    }

    /// Routes one inbound transit wrapper and forwards it downstream.
    ///
    /// The eligibility check runs exactly once; the gateway is invoked at
    /// most once, and only after the check passes.
    ///
    /// # Errors
    /// Returns [`SubmissionError::Parse`] when the message cannot be
    /// classified, [`SubmissionError::RouteNotEligible`] when the feature
    /// switch denies the (route, channel) pair, and
    /// [`SubmissionError::Transport`] when the downstream exchange itself
    /// fails.
    #[tracing::instrument(
        err(level = "warn"),
        skip(self, raw_message, ctx),
        fields(channel = %channel, route = tracing::field::Empty)
    )]
    pub async fn submit_message(
        &self,
        raw_message: &str,
        channel: ChannelType,
        ctx: &RequestContext,
    ) -> Result<EisSubmissionResult, SubmissionError> {
        let message = match TransitMessage::parse(raw_message) {
            Ok(message) => message,
            Err(e) => {
                self.metrics.rejected_total.add(1, &[KeyValue::new("reason", "parse")]);
                return Err(e.into());
            }
        };

        let route = message.routing_option();
        tracing::Span::current().record("route", tracing::field::display(route));

        if !self.checker.can_forward(route, channel) {
            tracing::warn!(code = %message.code(), "Channel not permitted to forward on this route");
            self.metrics.rejected_total.add(1, &[KeyValue::new("reason", "not_eligible")]);
            return Err(SubmissionError::RouteNotEligible { route, channel });
        }

        tracing::debug!(code = %message.code(), "Forwarding message downstream");
        // The original document goes downstream untouched.
        let result = self.gateway.post(raw_message, route, ctx).await?;

        self.metrics.forwarded_total.add(1, &[
            KeyValue::new("route", route.to_string()),
            KeyValue::new("accepted", result.is_success()),
        ]);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::routing::RoutingOption;
    use crate::error::{ParseError, TransportError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct StaticRouteChecker(bool);

    impl RouteChecker for StaticRouteChecker {
        fn can_forward(&self, _route: RoutingOption, _channel: ChannelType) -> bool {
            self.0
        }
    }

    #[derive(Debug, Default)]
    struct RecordingSubmitter {
        calls: Mutex<Vec<(String, RoutingOption)>>,
    }

    impl RecordingSubmitter {
        fn calls(&self) -> Vec<(String, RoutingOption)> {
            self.calls.lock().expect("submitter lock").clone()
        }
    }

    #[async_trait]
    impl EisSubmitter for RecordingSubmitter {
        async fn post(
            &self,
            body: &str,
            route: RoutingOption,
            _ctx: &RequestContext,
        ) -> Result<EisSubmissionResult, TransportError> {
            self.calls.lock().expect("submitter lock").push((body.to_string(), route));
            Ok(EisSubmissionResult::Accepted)
        }
    }

    fn setup_service(eligible: bool) -> (RoutingService, Arc<RecordingSubmitter>) {
        let gateway = Arc::new(RecordingSubmitter::default());
        let service = RoutingService::new(
            Arc::new(StaticRouteChecker(eligible)),
            Arc::clone(&gateway) as Arc<dyn EisSubmitter>,
        );
        (service, gateway)
    }

    fn departure(office: &str) -> String {
        format!(
            "<TransitWrapper><CC015C><CustomsOfficeOfDeparture><referenceNumber>{office}</referenceNumber></CustomsOfficeOfDeparture></CC015C></TransitWrapper>"
        )
    }

    #[tokio::test]
    async fn unrecognized_code_short_circuits_before_the_gateway() {
        let (service, gateway) = setup_service(true);

        let result = service
            .submit_message("<TransitWrapper><CC999X/></TransitWrapper>", ChannelType::Api, &RequestContext::default())
            .await;

        assert!(matches!(
            result,
            Err(SubmissionError::Parse(ParseError::InvalidMessageCode(code))) if code == "CC999X"
        ));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn ineligible_route_never_reaches_the_gateway() {
        let (service, gateway) = setup_service(false);

        let result = service
            .submit_message(&departure("GB55512"), ChannelType::Web, &RequestContext::default())
            .await;

        assert!(matches!(
            result,
            Err(SubmissionError::RouteNotEligible { route: RoutingOption::Gb, channel: ChannelType::Web })
        ));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn eligible_message_is_submitted_exactly_once() {
        let (service, gateway) = setup_service(true);
        let raw = departure("XI000142");

        let result = service
            .submit_message(&raw, ChannelType::Api, &RequestContext::default())
            .await
            .expect("submission");

        assert_eq!(result, EisSubmissionResult::Accepted);
        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, RoutingOption::Xi);
        // The body forwarded downstream is the original document.
        assert_eq!(calls[0].0, raw);
    }

    #[tokio::test]
    async fn guarantee_message_is_submitted_on_the_gb_route() {
        let (service, gateway) = setup_service(true);
        let raw = "<TransitWrapper><CC228C/></TransitWrapper>";

        service
            .submit_message(raw, ChannelType::Api, &RequestContext::default())
            .await
            .expect("submission");

        assert_eq!(gateway.calls(), vec![(raw.to_string(), RoutingOption::Gb)]);
    }
}
