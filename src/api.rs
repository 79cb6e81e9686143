//! Analyze request orchestration
//!
//! The request/response contract of the analyze endpoint, kept as plain
//! serde types plus an orchestrator function so any transport (CLI, HTTP
//! route) can drive it. Every failure on the path (crawl, completion call,
//! invalid model reply) is caught here and surfaced as a `success: false`
//! envelope rather than an error.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::analyzer::{AnalysisResult, Analyzer};
use crate::crawler::ContentCrawler;
use crate::error::Result;

/// Request body of an analyze call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Target website URL
    pub url: String,

    /// Free-text user preferences forwarded to the analyzer
    pub preferences: String,
}

/// Response envelope of an analyze call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// Whether the analysis succeeded
    pub success: bool,

    /// The analysis, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResult>,

    /// Error message, present on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalyzeResponse {
    /// Success envelope
    pub fn success(analysis: AnalysisResult) -> Self {
        Self {
            success: true,
            analysis: Some(analysis),
            error: None,
        }
    }

    /// Failure envelope
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            analysis: None,
            error: Some(message.into()),
        }
    }
}

/// Run an analyze request end to end: crawl, analyze, wrap.
#[instrument(skip(crawler, analyzer), fields(url = %request.url))]
pub async fn handle_analyze(
    crawler: &ContentCrawler,
    analyzer: &Analyzer,
    request: &AnalyzeRequest,
) -> AnalyzeResponse {
    info!("Starting analysis for {}", request.url);

    match run_analysis(crawler, analyzer, request).await {
        Ok(analysis) => AnalyzeResponse::success(analysis),
        Err(e) => {
            error!("Analysis failed: {}", e);
            AnalyzeResponse::failure(e.to_string())
        }
    }
}

async fn run_analysis(
    crawler: &ContentCrawler,
    analyzer: &Analyzer,
    request: &AnalyzeRequest,
) -> Result<AnalysisResult> {
    let page = crawler.crawl_website(&request.url).await?;
    debug!("Crawl completed");

    let analysis = analyzer
        .analyze_content(&page, &request.preferences)
        .await?;
    debug!("Analysis completed");

    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    const VALID_ANALYSIS: &str = r#"{
        "contentTypes": ["article", "documentation"],
        "suggestedPermissions": {"article": ["inference"]},
        "attributionRequirements": [],
        "restrictions": ["No training on documentation"]
    }"#;

    fn completion_body(content: &str) -> String {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_handle_analyze_success_envelope() {
        let mut server = Server::new_async().await;
        let _mock_server = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body(VALID_ANALYSIS))
            .create_async()
            .await;

        let crawler = ContentCrawler::new();
        let analyzer = Analyzer::with_base_url("test-key", server.url());
        let request = AnalyzeRequest {
            url: "https://example.com".to_string(),
            preferences: "Allow inference".to_string(),
        };

        let response = handle_analyze(&crawler, &analyzer, &request).await;
        assert!(response.success);
        assert!(response.error.is_none());

        let analysis = response.analysis.unwrap();
        assert_eq!(analysis.content_types, vec!["article", "documentation"]);
    }

    #[tokio::test]
    async fn test_handle_analyze_failure_envelope() {
        let mut server = Server::new_async().await;
        let _mock_server = server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let crawler = ContentCrawler::new();
        let analyzer = Analyzer::with_base_url("test-key", server.url());
        let request = AnalyzeRequest {
            url: "https://example.com".to_string(),
            preferences: String::new(),
        };

        let response = handle_analyze(&crawler, &analyzer, &request).await;
        assert!(!response.success);
        assert!(response.analysis.is_none());
        assert!(response.error.is_some());
    }

    #[test]
    fn test_envelope_serialization_shapes() {
        let success = AnalyzeResponse::success(AnalysisResult::default());
        let json = serde_json::to_value(&success).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("analysis").is_some());
        assert!(json.get("error").is_none());

        let failure = AnalyzeResponse::failure("No analysis generated");
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("analysis").is_none());
        assert_eq!(json["error"], "No analysis generated");
    }
}
