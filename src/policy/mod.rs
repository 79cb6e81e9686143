//! airra.txt policy format
//!
//! This module defines the in-memory representation of an airra.txt policy
//! and the serializer/parser pair that converts between it and the canonical
//! text format.
//!
//! ## Key Components
//!
//! - `AirraConfig`: the canonical policy representation shared by both the
//!   generation and validation paths
//! - `render_airra_txt`: serializes an analysis result into airra.txt text
//! - `parse_airra_txt`: parses airra.txt text fetched from a remote host
//!
//! The format has five fixed top-level blocks (`global:`, `content_rules:`,
//! `attribution:`, `restrictions:`, plus a free-standing `creator:` line).
//! Values are written verbatim with no escaping, so text embedding newlines,
//! colons, or a leading `-` corrupts the document.

mod parser;
mod serializer;

pub use parser::parse_airra_txt;
pub use serializer::render_airra_txt;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Usage permission assumed for a content type that declares none.
pub const DEFAULT_USAGE: &str = "inference";

/// Error message for a policy file that could not be fetched.
pub const ERR_NOT_FOUND: &str = "Airra.txt file not found";

/// Error message for a validation attempt that failed in transit.
pub const ERR_VALIDATION_FAILED: &str = "Error validating Airra.txt";

/// Parsed airra.txt policy.
///
/// Produced by [`parse_airra_txt`] on the validation path and consumed by the
/// report renderer. List order is display-significant and always preserves
/// source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirraConfig {
    /// Content-type labels in declaration order
    pub content_types: Vec<String>,

    /// Allowed usage permissions per content type
    pub allowed_usage_types: HashMap<String, Vec<String>>,

    /// Free-text attribution requirements
    pub attribution_requirements: Vec<String>,

    /// Free-text usage restrictions
    pub restrictions: Vec<String>,

    /// Declaring party, may be empty
    #[serde(default)]
    pub creator: String,

    /// Terminal failure diagnostic; when set, all other fields are empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AirraConfig {
    /// Failure report for a policy file that was not reachable.
    pub fn not_found() -> Self {
        Self::failure(ERR_NOT_FOUND)
    }

    /// Failure report for a fetch or parse that errored out.
    pub fn validation_failed() -> Self {
        Self::failure(ERR_VALIDATION_FAILED)
    }

    fn failure(message: &str) -> Self {
        Self {
            error: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Whether this record is a terminal failure report.
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}
