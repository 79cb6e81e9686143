//! Prompt construction for content analysis

use scraper::{Html, Node};

use crate::crawler::CrawlResult;

/// Character budget for page text embedded in the prompt
pub const MAX_CONTENT_CHARS: usize = 1500;

/// Fixed system prompt for the analysis request
pub const SYSTEM_PROMPT: &str = "You are an AI expert at analyzing websites and recommending \
content permissions. Always respond with valid JSON in the specified format.";

/// Build the per-request user prompt from crawled page content and the
/// free-text user preferences.
pub fn build_analysis_prompt(page: &CrawlResult, user_preferences: &str) -> String {
    let content = truncate_chars(&sanitize_content(&page.content), MAX_CONTENT_CHARS);

    format!(
        r#"As an AI content permission analyzer, analyze this website content and generate an airra.txt configuration.

Website Content:
URL: {url}
Title: {title}
Content: {content}
Links: {links}

User Preferences:
{preferences}

Generate a structured analysis in the following JSON format:
{{
  "contentTypes": ["list of detected content types"],
  "suggestedPermissions": {{
    "content-type-1": ["permission1", "permission2"],
    "content-type-2": ["permission1", "permission2"]
  }},
  "attributionRequirements": ["list of attribution requirements"],
  "restrictions": ["list of usage restrictions"]
}}

Ensure your response is valid JSON. Do not include any explanation or text outside the JSON structure."#,
        url = page.url,
        title = page.title.as_deref().unwrap_or(""),
        content = content,
        links = page.links.join(", "),
        preferences = user_preferences,
    )
}

/// Strip markup from HTML and collapse whitespace into plain text.
///
/// Script and style contents are dropped entirely, not just their tags.
pub fn sanitize_content(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut text = String::new();
    for node in document.tree.nodes() {
        if let Node::Text(fragment) = node.value() {
            let in_ignored_element = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|element| matches!(element.name(), "script" | "style"))
            });
            if !in_ignored_element {
                text.push_str(fragment);
                text.push(' ');
            }
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate a string to a fixed character budget.
fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
