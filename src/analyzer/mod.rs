//! LLM content analysis module
//!
//! This module sends crawled page content to a hosted chat-completion API and
//! validates the model's JSON reply into an [`AnalysisResult`].
//!
//! ## Key Components
//!
//! - `Analyzer`: the analysis service wrapping the completion HTTP client
//! - `AnalysisResult`: the validated analysis shape shared with the
//!   serializer and the analyze API envelope
//!
//! The reply is validated once at this boundary: it must be a JSON object
//! carrying exactly the four expected fields with the expected coarse types.
//! Anything else fails the whole request; there is no partial acceptance or
//! repair path.

mod http;
mod prompt;
mod types;

pub use prompt::{SYSTEM_PROMPT, build_analysis_prompt, sanitize_content};
pub use types::{ChatCompletionRequest, ChatCompletionResponse, Choice, Message};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::crawler::CrawlResult;
use crate::error::{Error, Result};
use http::HttpClient;

/// Model used for analysis requests
pub const ANALYSIS_MODEL: &str = "llama3-8b-8192";

/// Required top-level fields of an analysis reply
const REQUIRED_FIELDS: [&str; 4] = [
    "contentTypes",
    "suggestedPermissions",
    "attributionRequirements",
    "restrictions",
];

/// Validated result of a content analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Detected content-type labels
    pub content_types: Vec<String>,

    /// Suggested usage permissions per content type
    pub suggested_permissions: HashMap<String, Vec<String>>,

    /// Suggested attribution requirements
    pub attribution_requirements: Vec<String>,

    /// Suggested usage restrictions
    pub restrictions: Vec<String>,
}

/// Service for analyzing website content with an LLM.
#[derive(Clone, Debug)]
pub struct Analyzer {
    http_client: HttpClient,
}

impl Analyzer {
    /// Create a new analyzer with an API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::with_api_key(api_key),
        }
    }

    /// Create a new analyzer from the `GROQ_API_KEY` environment variable.
    ///
    /// A missing credential is a fatal configuration error, not a
    /// per-request failure.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GROQ_API_KEY")
            .map_err(|_| Error::Config("GROQ_API_KEY is not defined".to_string()))?;
        Ok(Self::new(api_key))
    }

    /// Analyze crawled page content against the user's stated preferences.
    #[instrument(skip(self, page), fields(url = %page.url))]
    pub async fn analyze_content(
        &self,
        page: &CrawlResult,
        user_preferences: &str,
    ) -> Result<AnalysisResult> {
        let request = ChatCompletionRequest {
            model: ANALYSIS_MODEL.to_string(),
            messages: vec![
                Message::system(SYSTEM_PROMPT),
                Message::user(build_analysis_prompt(page, user_preferences)),
            ],
            temperature: 0.3,
            max_tokens: 2048,
            top_p: 1.0,
            stream: false,
        };

        debug!("Requesting analysis from model {}", ANALYSIS_MODEL);
        let response: ChatCompletionResponse =
            self.http_client.post("chat/completions", &request).await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| Error::UnexpectedResponse("No analysis generated".to_string()))?;

        parse_and_validate(&content)
    }
}

#[cfg(test)]
impl Analyzer {
    /// Create an analyzer pointed at a test server (for testing only)
    pub(crate) fn with_base_url(api_key: impl Into<String>, base_url: String) -> Self {
        let mut http_client = HttpClient::with_api_key(api_key);
        http_client.set_base_url(base_url);
        Self { http_client }
    }
}

/// Parse a completion reply and validate its structure.
///
/// Checks field presence and coarse type (array vs. object) before
/// deserializing, so a malformed reply is rejected with a specific message.
fn parse_and_validate(response: &str) -> Result<AnalysisResult> {
    let value: serde_json::Value = serde_json::from_str(response.trim())
        .map_err(|e| Error::UnexpectedResponse(format!("Failed to parse analysis as JSON: {}", e)))?;

    for field in REQUIRED_FIELDS {
        if value.get(field).is_none() {
            return Err(Error::UnexpectedResponse(format!(
                "Missing required field: {}",
                field
            )));
        }
    }

    for field in ["contentTypes", "attributionRequirements", "restrictions"] {
        if !value[field].is_array() {
            return Err(Error::UnexpectedResponse(format!(
                "{} must be an array",
                field
            )));
        }
    }

    if !value["suggestedPermissions"].is_object() {
        return Err(Error::UnexpectedResponse(
            "suggestedPermissions must be an object".to_string(),
        ));
    }

    Ok(serde_json::from_value(value)?)
}
