use crate::domain::routing::{ChannelType, RoutingOption};
use thiserror::Error;

/// Reasons an inbound transit wrapper cannot be classified or routed.
///
/// These are deterministic functions of the input; none of them is worth
/// retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("document is not a well-formed transit wrapper: {0}")]
    Malformed(String),
    #[error("unrecognized message code: {0}")]
    InvalidMessageCode(String),
    #[error("departure message carries no office of departure")]
    DepartureEmpty,
    #[error("destination message carries no office of presentation")]
    PresentationEmpty,
    #[error("office code {0} matches neither the GB nor the XI country prefix")]
    UnrecognizedOfficeCountry(String),
}

/// A transport-level failure talking to EIS: connection refused, timeout, or
/// an unreadable response. Never folded into a submission result; the caller
/// decides whether to retry.
#[derive(Error, Debug)]
#[error("transport failure posting to EIS: {0}")]
pub struct TransportError(#[from] pub reqwest::Error);

/// Caller-visible failure from `RoutingService::submit_message`.
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("{channel} channel is not permitted to forward on the {route} route")]
    RouteNotEligible {
        route: RoutingOption,
        channel: ChannelType,
    },
    #[error(transparent)]
    Transport(#[from] TransportError),
}
