//! Content acquisition module
//!
//! The crawler here is a hard-coded mock: it resolves known sample URLs to
//! canned HTML fixtures and falls back to a small default page for anything
//! else. No network I/O, scheduling, or rate limiting is involved. It stands
//! in for a real crawling service behind the same fallible boundary the
//! analyze orchestrator expects.

mod fixtures;

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::Result;

/// A crawled page with its content and metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlResult {
    /// URL of the page
    pub url: String,

    /// Raw HTML content of the page
    pub content: String,

    /// Title of the page
    pub title: Option<String>,

    /// Outbound links discovered on the page
    pub links: Vec<String>,

    /// Metadata extracted from the page
    pub metadata: PageMetadata,
}

/// Metadata for a crawled page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Description of the page
    pub description: Option<String>,

    /// Keywords declared by the page
    pub keywords: Vec<String>,
}

/// Mock website crawler backed by canned fixtures.
#[derive(Debug, Clone, Default)]
pub struct ContentCrawler;

impl ContentCrawler {
    /// Create a new crawler
    pub fn new() -> Self {
        Self
    }

    /// Crawl a website, returning its (canned) content.
    #[instrument(skip(self))]
    pub async fn crawl_website(&self, url: &str) -> Result<CrawlResult> {
        info!("Starting mock crawl for {}", url);
        let page = fixtures::sample_for(url);
        debug!("Resolved {} to fixture {}", url, page.url);
        Ok(page)
    }
}

/// Extract the page title from HTML
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
}

/// Extract description and keywords metadata from HTML
pub fn extract_metadata(html: &str) -> PageMetadata {
    let document = Html::parse_document(html);

    let description = Selector::parse("meta[name='description']")
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .and_then(|element| element.value().attr("content"))
                .map(|s| s.to_string())
        });

    let keywords = Selector::parse("meta[name='keywords']")
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .and_then(|element| element.value().attr("content"))
        })
        .map(|content| {
            content
                .split(',')
                .map(|keyword| keyword.trim().to_string())
                .filter(|keyword| !keyword.is_empty())
                .collect()
        })
        .unwrap_or_default();

    PageMetadata {
        description,
        keywords,
    }
}
