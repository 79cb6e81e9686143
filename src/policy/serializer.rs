//! Serializer from analysis results to airra.txt text

use crate::analyzer::AnalysisResult;

use super::DEFAULT_USAGE;

/// Render an [`AnalysisResult`] as a canonical airra.txt document.
///
/// The output has four fixed blocks in order: a `global:` block with two
/// constant settings, a `content_rules:` block with one entry per content
/// type, an `attribution:` block, and a `restrictions:` block. A content type
/// with no suggested permissions (or an empty list) gets a single `inference`
/// entry. Values are emitted verbatim; the caller is responsible for keeping
/// newlines, colons, and leading dashes out of them.
///
/// The document round-trips through [`super::parse_airra_txt`] apart from the
/// constant global settings, which the parser does not surface.
pub fn render_airra_txt(analysis: &AnalysisResult) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("# airra.txt".to_string());
    lines.push(String::new());

    lines.push("# Global Settings".to_string());
    lines.push("global:".to_string());
    lines.push("  allow_ai_usage: partial".to_string());
    lines.push("  content_update_frequency: weekly".to_string());
    lines.push(String::new());

    lines.push("# Content-Specific Rules".to_string());
    lines.push("content_rules:".to_string());
    for content_type in &analysis.content_types {
        lines.push(format!("- type: {}", content_type));
        lines.push("  allow_usage: true".to_string());
        lines.push("  allowed_usage_types:".to_string());

        let permissions = analysis
            .suggested_permissions
            .get(content_type)
            .filter(|permissions| !permissions.is_empty());
        match permissions {
            Some(permissions) => {
                for permission in permissions {
                    lines.push(format!("  - {}", permission));
                }
            }
            None => lines.push(format!("  - {}", DEFAULT_USAGE)),
        }
    }
    lines.push(String::new());

    lines.push("# Attribution Requirements".to_string());
    lines.push("attribution:".to_string());
    for requirement in &analysis.attribution_requirements {
        lines.push(format!("- {}", requirement));
    }
    lines.push(String::new());

    lines.push("# Access Restrictions".to_string());
    lines.push("restrictions:".to_string());
    for restriction in &analysis.restrictions {
        lines.push(format!("- {}", restriction));
    }

    lines.join("\n")
}
