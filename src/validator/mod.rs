//! Remote policy validation module
//!
//! Fetches `airra.txt` from a target site's root and parses it into an
//! [`AirraConfig`] report. Validation never fails: an unreachable or
//! malformed policy file degrades to a structured failure report instead of
//! an error.
//!
//! A fixture-resolution step runs ahead of the real fetch so demo and test
//! records can short-circuit the network entirely. Fixtures are registered
//! per instance; a plain [`Validator::new`] carries none, which keeps the
//! bypass disabled outside demo environments.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client as ReqwestClient;
use tracing::{debug, info, instrument, warn};

use crate::policy::{AirraConfig, parse_airra_txt};

/// Default timeout for policy fetches in seconds
const FETCH_TIMEOUT_SECS: u64 = 30;

/// URL whose exemplar record ships with the crate
pub const EXEMPLAR_URL: &str = "https://airra.ai";

/// Service for validating a site's published airra.txt.
#[derive(Debug, Clone)]
pub struct Validator {
    client: ReqwestClient,
    fixtures: HashMap<String, AirraConfig>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a validator with no registered fixtures.
    pub fn new() -> Self {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            fixtures: HashMap::new(),
        }
    }

    /// Create a validator with the bundled exemplar record registered.
    pub fn with_exemplar() -> Self {
        let mut validator = Self::new();
        validator.register_fixture(EXEMPLAR_URL, exemplar());
        validator
    }

    /// Register a fixture record resolved ahead of the real fetch.
    pub fn register_fixture(&mut self, url: impl Into<String>, config: AirraConfig) {
        self.fixtures.insert(url.into(), config);
    }

    /// Validate the policy file published by `url`.
    ///
    /// Returns a failure report (never an error) when the file is missing or
    /// the fetch fails in transit.
    #[instrument(skip(self))]
    pub async fn validate(&self, url: &str) -> AirraConfig {
        if let Some(fixture) = self.fixtures.get(url) {
            debug!("Resolved {} from registered fixtures", url);
            return fixture.clone();
        }

        let target = format!("{}/airra.txt", url);
        info!("Fetching {}", target);

        match self.client.get(&target).send().await {
            Ok(response) if response.status().is_success() => match response.text().await {
                Ok(body) => parse_airra_txt(&body),
                Err(e) => {
                    warn!("Failed to read policy body from {}: {}", target, e);
                    AirraConfig::validation_failed()
                }
            },
            Ok(response) => {
                info!("{} returned status {}", target, response.status());
                AirraConfig::not_found()
            }
            Err(e) => {
                warn!("Failed to fetch {}: {}", target, e);
                AirraConfig::validation_failed()
            }
        }
    }
}

/// The exemplar policy record published for the airra.ai demo site.
pub fn exemplar() -> AirraConfig {
    let mut allowed_usage_types = HashMap::new();
    allowed_usage_types.insert(
        "article".to_string(),
        vec!["inference".to_string(), "generation".to_string()],
    );
    allowed_usage_types.insert("image".to_string(), vec!["inference".to_string()]);
    allowed_usage_types.insert("video".to_string(), vec!["inference".to_string()]);

    AirraConfig {
        content_types: vec![
            "article".to_string(),
            "image".to_string(),
            "video".to_string(),
        ],
        allowed_usage_types,
        attribution_requirements: vec![
            "Provide attribution to the original creator".to_string(),
            "Do not use content for commercial purposes without permission".to_string(),
        ],
        restrictions: vec![
            "Do not modify the content without permission".to_string(),
            "Do not use the content in a way that could be harmful or misleading".to_string(),
        ],
        creator: "Airra AI".to_string(),
        error: None,
    }
}
