//! Line-oriented parser for airra.txt documents

use std::collections::HashMap;

use tracing::debug;

use super::{AirraConfig, DEFAULT_USAGE};

/// Section state for the forward pass.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    None,
    Global,
    ContentRules,
    Attribution,
    Restrictions,
}

/// Parse an airra.txt document into an [`AirraConfig`].
///
/// A single forward pass over the lines. Section headers switch the current
/// section, `- ` lines are list items interpreted according to it, and `#`
/// lines are comments skipped unconditionally. The `creator:` line is matched
/// independently of the current section. Malformed input never fails; it
/// degrades to partially-populated or empty lists.
///
/// Within `content_rules:`, each `- type: <label>` entry opens a rule whose
/// usage permissions default to `inference`; a nested `allowed_usage_types:`
/// header replaces that default with the `- <permission>` lines that follow.
pub fn parse_airra_txt(content: &str) -> AirraConfig {
    let mut content_types = Vec::new();
    let mut allowed_usage_types: HashMap<String, Vec<String>> = HashMap::new();
    let mut attribution_requirements = Vec::new();
    let mut restrictions = Vec::new();
    let mut creator = String::new();

    let mut section = Section::None;
    let mut current_type: Option<String> = None;
    let mut in_usage_list = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with('#') {
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix('-') {
            let item = rest.trim();
            match section {
                Section::ContentRules => {
                    if let Some(label) = item.strip_prefix("type:") {
                        let label = label.trim().to_string();
                        content_types.push(label.clone());
                        allowed_usage_types
                            .insert(label.clone(), vec![DEFAULT_USAGE.to_string()]);
                        current_type = Some(label);
                        in_usage_list = false;
                    } else if in_usage_list {
                        if let Some(label) = &current_type {
                            if let Some(usages) = allowed_usage_types.get_mut(label) {
                                usages.push(item.to_string());
                            }
                        }
                    }
                }
                Section::Attribution => attribution_requirements.push(item.to_string()),
                Section::Restrictions => restrictions.push(item.to_string()),
                Section::Global | Section::None => {}
            }
        } else if trimmed.starts_with("global:") {
            section = Section::Global;
            in_usage_list = false;
        } else if trimmed.starts_with("content_rules:") {
            section = Section::ContentRules;
            in_usage_list = false;
        } else if trimmed.starts_with("attribution:") {
            section = Section::Attribution;
            in_usage_list = false;
        } else if trimmed.starts_with("restrictions:") {
            section = Section::Restrictions;
            in_usage_list = false;
        } else if trimmed.starts_with("allowed_usage_types:") {
            if section == Section::ContentRules {
                if let Some(label) = &current_type {
                    allowed_usage_types.insert(label.clone(), Vec::new());
                    in_usage_list = true;
                }
            }
        } else if let Some(rest) = trimmed.strip_prefix("creator:") {
            creator = rest.trim().to_string();
        }
        // anything else (blank, allow_usage flags, unknown headers) is ignored
    }

    debug!(
        content_types = content_types.len(),
        attribution = attribution_requirements.len(),
        restrictions = restrictions.len(),
        "parsed airra.txt"
    );

    AirraConfig {
        content_types,
        allowed_usage_types,
        attribution_requirements,
        restrictions,
        creator,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restrictions_block() {
        let config = parse_airra_txt("restrictions:\n- Do not resell\n- No derivative works");
        assert_eq!(
            config.restrictions,
            vec!["Do not resell", "No derivative works"]
        );
        assert!(config.content_types.is_empty());
    }

    #[test]
    fn test_comments_are_skipped_everywhere() {
        let text = "# top comment\nattribution:\n# inside a section\n- Credit the author\nrestrictions:\n# another\n- No scraping\n";
        let config = parse_airra_txt(text);
        assert_eq!(config.attribution_requirements, vec!["Credit the author"]);
        assert_eq!(config.restrictions, vec!["No scraping"]);
    }

    #[test]
    fn test_content_rule_without_usage_list_defaults_to_inference() {
        let config = parse_airra_txt("content_rules:\n- type: article\n  allow_usage: true\n");
        assert_eq!(config.content_types, vec!["article"]);
        assert_eq!(
            config.allowed_usage_types.get("article"),
            Some(&vec!["inference".to_string()])
        );
    }

    #[test]
    fn test_nested_usage_list() {
        let text = "content_rules:\n- type: article\n  allow_usage: true\n  allowed_usage_types:\n  - inference\n  - generation\n- type: image\n  allow_usage: true\n";
        let config = parse_airra_txt(text);
        assert_eq!(config.content_types, vec!["article", "image"]);
        assert_eq!(
            config.allowed_usage_types.get("article"),
            Some(&vec!["inference".to_string(), "generation".to_string()])
        );
        // second rule never declared a list, so it keeps the default
        assert_eq!(
            config.allowed_usage_types.get("image"),
            Some(&vec!["inference".to_string()])
        );
    }

    #[test]
    fn test_explicitly_empty_usage_list_stays_empty() {
        let text = "content_rules:\n- type: video\n  allowed_usage_types:\nattribution:\n- Credit us\n";
        let config = parse_airra_txt(text);
        assert_eq!(
            config.allowed_usage_types.get("video"),
            Some(&Vec::new())
        );
    }

    #[test]
    fn test_creator_is_independent_of_section() {
        let text = "content_rules:\n- type: article\ncreator: Example Press\n- type: image\n";
        let config = parse_airra_txt(text);
        assert_eq!(config.creator, "Example Press");
        assert_eq!(config.content_types, vec!["article", "image"]);
    }

    #[test]
    fn test_creator_keeps_text_after_first_colon() {
        let config = parse_airra_txt("creator: https://example.com/team");
        assert_eq!(config.creator, "https://example.com/team");
    }

    #[test]
    fn test_list_items_outside_known_sections_are_ignored() {
        let text = "- orphan item\nglobal:\n- allow_ai_usage: partial\nrestrictions:\n- Keep this one\n";
        let config = parse_airra_txt(text);
        assert_eq!(config.restrictions, vec!["Keep this one"]);
        assert!(config.content_types.is_empty());
    }

    #[test]
    fn test_unrecognized_lines_are_ignored() {
        let text = "something: else\nweird header\nrestrictions:\n- Valid\n";
        let config = parse_airra_txt(text);
        assert_eq!(config.restrictions, vec!["Valid"]);
    }

    #[test]
    fn test_empty_input() {
        let config = parse_airra_txt("");
        assert_eq!(config, AirraConfig::default());
    }
}
