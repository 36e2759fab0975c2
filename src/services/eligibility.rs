use crate::config::RoutingConfig;
use crate::domain::routing::{ChannelType, RoutingOption};

/// Answers whether a channel may forward on a route right now.
///
/// Implementations must be cheap and side-effect-free; the orchestrator
/// consults this exactly once per message, before any network call.
pub trait RouteChecker: Send + Sync + std::fmt::Debug {
    fn can_forward(&self, route: RoutingOption, channel: ChannelType) -> bool;
}

/// Production checker backed by the four feature switches in
/// [`RoutingConfig`], one per (route, channel) pair.
#[derive(Debug, Clone)]
pub struct FeatureSwitchRouteChecker {
    config: RoutingConfig,
}

impl FeatureSwitchRouteChecker {
    #[must_use]
    pub const fn new(config: RoutingConfig) -> Self {
        Self { config }
    }
}

impl RouteChecker for FeatureSwitchRouteChecker {
    fn can_forward(&self, route: RoutingOption, channel: ChannelType) -> bool {
        match (route, channel) {
            (RoutingOption::Gb, ChannelType::Api) => self.config.gb_via_api,
            (RoutingOption::Gb, ChannelType::Web) => self.config.gb_via_web,
            (RoutingOption::Xi, ChannelType::Api) => self.config.xi_via_api,
            (RoutingOption::Xi, ChannelType::Web) => self.config.xi_via_web,
        }
    }
}
