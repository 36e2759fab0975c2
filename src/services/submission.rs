use crate::domain::context::RequestContext;
use crate::domain::routing::RoutingOption;
use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::StatusCode;
use uuid::Uuid;

/// Outcome of a completed HTTP exchange with EIS.
///
/// Only produced once the downstream actually answered; transport failures
/// surface as [`TransportError`] instead and are never mapped in here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EisSubmissionResult {
    /// 202 — accepted for processing.
    Accepted,
    /// 400 — failed downstream schema validation. Permanent.
    PayloadRejected,
    /// 403 — virus detected or invalid token. Permanent.
    SecurityRejected,
    /// 500 — transient downstream failure.
    DownstreamInternalError,
    /// Any other status, kept verbatim for diagnostics.
    UnexpectedResponse { status: StatusCode, body: String },
}

impl EisSubmissionResult {
    /// Total classification of an HTTP status; first match wins.
    #[must_use]
    pub fn classify(status: StatusCode, body: impl Into<String>) -> Self {
        match status.as_u16() {
            202 => Self::Accepted,
            400 => Self::PayloadRejected,
            403 => Self::SecurityRejected,
            500 => Self::DownstreamInternalError,
            _ => Self::UnexpectedResponse { status, body: body.into() },
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Permanent rejections must not be blindly retried by callers.
    #[must_use]
    pub const fn is_permanent_rejection(&self) -> bool {
        matches!(self, Self::PayloadRejected | Self::SecurityRejected)
    }
}

/// Supplies the correlation identifier attached to each outbound submission.
/// Injected so tests can pin the generated value.
pub trait CorrelationIdProvider: Send + Sync + std::fmt::Debug {
    fn next_id(&self) -> Uuid;
}

/// Production provider: a fresh random v4 per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCorrelationId;

impl CorrelationIdProvider for RandomCorrelationId {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// The submission leg of the gateway, mockable for orchestrator tests.
#[async_trait]
pub trait EisSubmitter: Send + Sync + std::fmt::Debug {
    /// Posts the serialized wrapper to the EIS instance behind `route`.
    ///
    /// # Errors
    /// Returns [`TransportError`] when the exchange itself fails; an HTTP
    /// response of any status classifies into [`EisSubmissionResult`].
    async fn post(
        &self,
        body: &str,
        route: RoutingOption,
        ctx: &RequestContext,
    ) -> Result<EisSubmissionResult, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_is_total_and_stable() {
        assert_eq!(
            EisSubmissionResult::classify(StatusCode::ACCEPTED, ""),
            EisSubmissionResult::Accepted
        );
        assert_eq!(
            EisSubmissionResult::classify(StatusCode::BAD_REQUEST, ""),
            EisSubmissionResult::PayloadRejected
        );
        assert_eq!(
            EisSubmissionResult::classify(StatusCode::FORBIDDEN, ""),
            EisSubmissionResult::SecurityRejected
        );
        assert_eq!(
            EisSubmissionResult::classify(StatusCode::INTERNAL_SERVER_ERROR, ""),
            EisSubmissionResult::DownstreamInternalError
        );
    }

    #[test]
    fn unmatched_status_carries_diagnostics() {
        let result = EisSubmissionResult::classify(StatusCode::SERVICE_UNAVAILABLE, "maintenance");
        assert_eq!(
            result,
            EisSubmissionResult::UnexpectedResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: "maintenance".to_string(),
            }
        );
        assert!(!result.is_success());
        assert!(!result.is_permanent_rejection());
    }

    #[test]
    fn rejection_predicates() {
        assert!(EisSubmissionResult::Accepted.is_success());
        assert!(EisSubmissionResult::PayloadRejected.is_permanent_rejection());
        assert!(EisSubmissionResult::SecurityRejected.is_permanent_rejection());
        assert!(!EisSubmissionResult::DownstreamInternalError.is_permanent_rejection());
    }
}
