use crate::domain::routing::{CustomsOffice, RoutingOption};
use crate::error::ParseError;
use roxmltree::{Document, Node};

/// Root element every inbound message must carry.
const WRAPPER_ROOT: &str = "TransitWrapper";

const DEPARTURE_CODES: &[&str] = &["CC013C", "CC014C", "CC015C", "CC170C"];
const DESTINATION_CODES: &[&str] = &["CC007C", "CC044C"];
const GUARANTEE_CODES: &[&str] = &["CC228C"];

const OFFICE_OF_DEPARTURE: &str = "CustomsOfficeOfDeparture";
const OFFICE_OF_PRESENTATION: &str = "CustomsOfficeOfPresentation";
const OFFICE_REFERENCE: &str = "referenceNumber";

/// Which extraction rule applies to a recognized message code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageCategory {
    Departure,
    Destination,
    Guarantee,
}

impl MessageCategory {
    fn classify(code: &str) -> Option<Self> {
        if DEPARTURE_CODES.contains(&code) {
            Some(Self::Departure)
        } else if DESTINATION_CODES.contains(&code) {
            Some(Self::Destination)
        } else if GUARANTEE_CODES.contains(&code) {
            Some(Self::Guarantee)
        } else {
            None
        }
    }
}

/// A classified inbound message with its routing already derived. Built fresh
/// per message; nothing here outlives the submission cycle.
#[derive(Debug, Clone)]
pub struct TransitMessage {
    code: String,
    category: MessageCategory,
    office: Option<CustomsOffice>,
    routing: RoutingOption,
}

impl TransitMessage {
    /// Parses and classifies one transit wrapper.
    ///
    /// # Errors
    /// - [`ParseError::Malformed`] for unparseable XML, a root other than
    ///   `TransitWrapper`, or a wrapper with no message element.
    /// - [`ParseError::InvalidMessageCode`] when the message element is not a
    ///   recognized code.
    /// - [`ParseError::DepartureEmpty`] / [`ParseError::PresentationEmpty`]
    ///   when the office the category requires is missing or empty.
    /// - [`ParseError::UnrecognizedOfficeCountry`] for office prefixes other
    ///   than GB/XI.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let doc = Document::parse(raw).map_err(|e| ParseError::Malformed(e.to_string()))?;
        let root = doc.root_element();
        if root.tag_name().name() != WRAPPER_ROOT {
            return Err(ParseError::Malformed(format!(
                "expected {WRAPPER_ROOT} root, found {}",
                root.tag_name().name()
            )));
        }

        let message = root
            .children()
            .find(Node::is_element)
            .ok_or_else(|| ParseError::Malformed("transit wrapper carries no message".to_string()))?;
        let code = message.tag_name().name().to_string();
        let category = MessageCategory::classify(&code)
            .ok_or_else(|| ParseError::InvalidMessageCode(code.clone()))?;

        let (office, routing) = match category {
            // Guarantee messages always route to GB, whatever the content.
            MessageCategory::Guarantee => (None, RoutingOption::Gb),
            MessageCategory::Departure => {
                let office = office_reference(message, OFFICE_OF_DEPARTURE)
                    .ok_or(ParseError::DepartureEmpty)?;
                let routing = office.routing_option()?;
                (Some(office), routing)
            }
            MessageCategory::Destination => {
                let office = office_reference(message, OFFICE_OF_PRESENTATION)
                    .ok_or(ParseError::PresentationEmpty)?;
                let routing = office.routing_option()?;
                (Some(office), routing)
            }
        };

        Ok(Self { code, category, office, routing })
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub const fn category(&self) -> MessageCategory {
        self.category
    }

    #[must_use]
    pub const fn office(&self) -> Option<&CustomsOffice> {
        self.office.as_ref()
    }

    #[must_use]
    pub const fn routing_option(&self) -> RoutingOption {
        self.routing
    }
}

/// Reads the office reference at its fixed path under the message element.
/// Whitespace-only references count as absent.
fn office_reference(message: Node<'_, '_>, office_element: &str) -> Option<CustomsOffice> {
    let reference = message
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == office_element)?
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == OFFICE_REFERENCE)?
        .text()?
        .trim();
    if reference.is_empty() {
        None
    } else {
        Some(CustomsOffice::new(reference))
    }
}
