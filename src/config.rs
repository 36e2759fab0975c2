use clap::{Args, Parser, ValueEnum};

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub eis: EisConfig,

    #[command(flatten)]
    pub routing: RoutingConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct EisConfig {
    /// Base URL of the Great Britain EIS instance
    #[arg(long, env = "CTC_EIS_GB_URL")]
    pub gb_url: String,

    /// Bearer token presented to the Great Britain EIS instance
    #[arg(long, env = "CTC_EIS_GB_TOKEN", hide_env_values = true)]
    pub gb_token: String,

    /// Base URL of the Northern Ireland EIS instance
    #[arg(long, env = "CTC_EIS_NI_URL")]
    pub ni_url: String,

    /// Bearer token presented to the Northern Ireland EIS instance
    #[arg(long, env = "CTC_EIS_NI_TOKEN", hide_env_values = true)]
    pub ni_token: String,

    /// Total request timeout (connection + response) in seconds
    #[arg(long, env = "CTC_EIS_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Connection timeout in seconds
    #[arg(long, env = "CTC_EIS_CONNECT_TIMEOUT_SECS", default_value_t = 5)]
    pub connect_timeout_secs: u64,
}

/// Feature switches gating which channels may forward on which route.
#[derive(Clone, Debug, Args)]
pub struct RoutingConfig {
    /// Allow API-channel traffic on the GB route
    #[arg(long, env = "CTC_ROUTE_GB_VIA_API", default_value_t = true, action = clap::ArgAction::Set)]
    pub gb_via_api: bool,

    /// Allow web-channel traffic on the GB route
    #[arg(long, env = "CTC_ROUTE_GB_VIA_WEB", default_value_t = true, action = clap::ArgAction::Set)]
    pub gb_via_web: bool,

    /// Allow API-channel traffic on the XI route
    #[arg(long, env = "CTC_ROUTE_XI_VIA_API", default_value_t = false, action = clap::ArgAction::Set)]
    pub xi_via_api: bool,

    /// Allow web-channel traffic on the XI route
    #[arg(long, env = "CTC_ROUTE_XI_VIA_WEB", default_value_t = false, action = clap::ArgAction::Set)]
    pub xi_via_web: bool,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long, env = "CTC_LOG_FORMAT", value_enum, default_value = "text")]
    pub log_format: LogFormat,

    /// OTLP endpoint for trace and metric export
    #[arg(long, env = "CTC_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}
