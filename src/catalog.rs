//! Built-in prompt token catalog.
//!
//! These are the scenario fields the backend fills in before a prompt
//! template is sent to the model.

use std::collections::BTreeMap;

use crate::document::TokenName;
use crate::registry::{TokenDefinition, ToolbarGroup};

/// (name, label, description)
const BUILTIN_DEFINITIONS: &[(&str, &str, &str)] = &[
    ("scenario_title", "Scenario title", "AI generated scenario title, useful as a reminder of the training topic."),
    ("scenario_summary", "Scenario summary", "Summary paragraph of the market background and cooperation goal."),
    ("student_role", "Student role", "Role and position the student plays in this scenario."),
    ("student_company_name", "Student company", "Name of the student's company."),
    ("student_company_profile", "Student company profile", "Background, strengths or main business of the student's company."),
    ("ai_role", "AI role", "Negotiation role played by the AI."),
    ("ai_company_name", "AI company", "Name of the AI side's company."),
    ("ai_company_profile", "AI company profile", "Business background or strengths of the AI side's company."),
    ("product_name", "Product name", "Name or category of the traded product."),
    ("product_specs", "Product specs", "Key specifications, quality standards or technical parameters."),
    ("product_quantity", "Quantity", "Required or available quantity."),
    ("student_target_price", "Student target price", "Price or terms the student is aiming for."),
    ("ai_bottom_line", "AI bottom line", "Lowest terms the AI side will accept."),
    ("market_landscape", "Market landscape", "Current state of the target market and industry."),
    ("timeline", "Timeline", "Delivery dates or key milestones."),
    ("logistics", "Logistics terms", "Logistics, delivery or trade terms."),
    ("communication_tone", "Communication tone", "Suggested tone and etiquette for the negotiation."),
    ("risks_summary", "Risk notes", "Combined risk reminders for the scenario."),
    ("knowledge_points_hint", "Knowledge points", "Core knowledge points to cover or check."),
    ("negotiation_focus_hint", "Negotiation focus", "Topics that need to be discussed."),
];

/// (group label, token names)
const BUILTIN_GROUPS: &[(&str, &[&str])] = &[
    (
        "Roles",
        &[
            "student_role",
            "student_company_name",
            "student_company_profile",
            "ai_role",
            "ai_company_name",
            "ai_company_profile",
        ],
    ),
    (
        "Product & terms",
        &[
            "product_name",
            "product_specs",
            "product_quantity",
            "student_target_price",
            "ai_bottom_line",
            "logistics",
        ],
    ),
    (
        "Scenario background",
        &[
            "scenario_title",
            "scenario_summary",
            "market_landscape",
            "timeline",
            "communication_tone",
            "risks_summary",
            "negotiation_focus_hint",
        ],
    ),
    ("Learning feedback", &["knowledge_points_hint"]),
];

fn builtin_name(name: &str) -> Option<TokenName> {
    match TokenName::new(name) {
        Ok(name) => Some(name),
        Err(e) => {
            tracing::error!("Invalid built-in token name: {}", e);
            None
        }
    }
}

pub fn builtin_definitions() -> BTreeMap<TokenName, TokenDefinition> {
    BUILTIN_DEFINITIONS
        .iter()
        .filter_map(|(name, label, description)| {
            builtin_name(name).map(|name| (name, TokenDefinition::new(*label, *description)))
        })
        .collect()
}

pub fn builtin_groups() -> Vec<ToolbarGroup> {
    BUILTIN_GROUPS
        .iter()
        .map(|(label, tokens)| {
            ToolbarGroup::new(*label, tokens.iter().filter_map(|t| builtin_name(t)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_grouped_token_has_definition() {
        let definitions = builtin_definitions();
        assert_eq!(definitions.len(), BUILTIN_DEFINITIONS.len());
        for group in builtin_groups() {
            assert!(!group.tokens.is_empty());
            for token in &group.tokens {
                assert!(definitions.contains_key(token), "{token} has no definition");
            }
        }
    }

    #[test]
    fn test_every_definition_is_grouped() {
        let groups = builtin_groups();
        for name in builtin_definitions().keys() {
            assert!(groups.iter().any(|g| g.tokens.contains(name)), "{name} not grouped");
        }
    }
}
