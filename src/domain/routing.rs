use crate::error::ParseError;
use std::fmt;

/// The downstream EIS instance a message must be forwarded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoutingOption {
    Gb,
    Xi,
}

impl fmt::Display for RoutingOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gb => f.write_str("GB"),
            Self::Xi => f.write_str("XI"),
        }
    }
}

/// The inbound submission path a message arrived on. Supplied by the caller,
/// never derived from content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelType {
    Api,
    Web,
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api => f.write_str("api"),
            Self::Web => f.write_str("web"),
        }
    }
}

/// A customs office reference as embedded in a transit message, e.g.
/// `GB000060`. The two-letter country prefix decides the route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomsOffice(String);

impl CustomsOffice {
    pub(crate) fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    #[must_use]
    pub fn reference(&self) -> &str {
        &self.0
    }

    /// Derives the routing option from the country prefix, case-insensitively.
    ///
    /// # Errors
    /// Any prefix other than `GB` or `XI` (including references shorter than
    /// two characters) is rejected; there is no default route.
    pub fn routing_option(&self) -> Result<RoutingOption, ParseError> {
        match self.0.get(..2) {
            Some(prefix) if prefix.eq_ignore_ascii_case("XI") => Ok(RoutingOption::Xi),
            Some(prefix) if prefix.eq_ignore_ascii_case("GB") => Ok(RoutingOption::Gb),
            _ => Err(ParseError::UnrecognizedOfficeCountry(self.0.clone())),
        }
    }
}

impl fmt::Display for CustomsOffice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
