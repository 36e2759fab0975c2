pub mod eligibility;
pub mod routing_service;
pub mod submission;
