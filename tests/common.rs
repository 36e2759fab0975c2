#![allow(dead_code)]

use ctc_gateway::config::{EisConfig, RoutingConfig};

pub fn setup_tracing() {
    ctc_gateway::telemetry::init_test_telemetry();
}

pub fn eis_config(gb_url: &str, ni_url: &str) -> EisConfig {
    EisConfig {
        gb_url: gb_url.to_string(),
        gb_token: "gb-secret".to_string(),
        ni_url: ni_url.to_string(),
        ni_token: "ni-secret".to_string(),
        request_timeout_secs: 5,
        connect_timeout_secs: 2,
    }
}

pub fn routing_config(gb: bool, xi: bool) -> RoutingConfig {
    RoutingConfig {
        gb_via_api: gb,
        gb_via_web: gb,
        xi_via_api: xi,
        xi_via_web: xi,
    }
}

pub fn departure_message(office: &str) -> String {
    format!(
        "<TransitWrapper><CC015C><CustomsOfficeOfDeparture><referenceNumber>{office}</referenceNumber></CustomsOfficeOfDeparture></CC015C></TransitWrapper>"
    )
}

pub fn destination_message(office: &str) -> String {
    format!(
        "<TransitWrapper><CC007C><CustomsOfficeOfPresentation><referenceNumber>{office}</referenceNumber></CustomsOfficeOfPresentation></CC007C></TransitWrapper>"
    )
}

pub fn guarantee_message() -> String {
    "<TransitWrapper><CC228C><GuaranteeReference><GRN>24GB0000010000AA1</GRN></GuaranteeReference></CC228C></TransitWrapper>"
        .to_string()
}
