//! # airra - AI-Usage Policy Files for Websites
//!
//! This crate generates and validates `airra.txt` files, a machine-readable
//! policy format declaring how AI systems may use a website's content, by
//! content type, with attribution and restriction rules.
//!
//! ## Features
//!
//! - Canonical airra.txt serializer and tolerant line-oriented parser
//! - Content analysis through a hosted chat-completion API, with strict
//!   JSON-shape validation of the model's reply
//! - Mock website crawler backed by canned sample pages
//! - Remote policy validation with structured failure reports and an
//!   injectable fixture-resolution seam
//! - Time-boxed, file-backed cache for analysis results
//! - Async API with Tokio
//!
//! ## Example
//!
//! ```rust,no_run
//! use airra::analyzer::Analyzer;
//! use airra::crawler::ContentCrawler;
//! use airra::policy::render_airra_txt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let crawler = ContentCrawler::new();
//!     let analyzer = Analyzer::from_env()?;
//!
//!     let page = crawler.crawl_website("https://example.com").await?;
//!     let analysis = analyzer
//!         .analyze_content(&page, "Allow inference on articles only")
//!         .await?;
//!
//!     println!("{}", render_airra_txt(&analysis));
//!     Ok(())
//! }
//! ```

pub mod analyzer;
pub mod api;
pub mod cache;
pub mod crawler;
mod error;
pub mod policy;
pub mod validator;

pub use error::Error;

/// Re-export of common types for public use
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
    pub use crate::policy::{AirraConfig, parse_airra_txt, render_airra_txt};
}
