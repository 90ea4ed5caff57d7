//! Toolbar view model and custom token form.

use crate::document::TokenName;
use crate::registry::{Registration, TokenRegistry};

pub const FALLBACK_GROUP_LABEL: &str = "Available tokens";
pub const CUSTOM_GROUP_LABEL: &str = "Custom tokens";
pub const FORM_HINT: &str =
    "Need another placeholder? Add a name here and it will be substituted wherever {name} appears.";

/// One insert button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarButton {
    pub name: TokenName,
    /// Visible text: definition label or the raw name
    pub label: String,
    /// Tooltip
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarGroupView {
    pub label: String,
    pub buttons: Vec<ToolbarButton>,
    /// The trailing group of runtime-registered tokens
    pub custom: bool,
}

/// Buttons as currently rendered, rebuilt whenever the registry changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolbarModel {
    pub groups: Vec<ToolbarGroupView>,
}

impl ToolbarModel {
    pub fn from_registry(registry: &TokenRegistry) -> Self {
        let configured = registry.groups();
        let mut groups: Vec<ToolbarGroupView> = if configured.is_empty() {
            let names = registry
                .definitions()
                .into_keys()
                .filter(|name| !registry.is_custom(name))
                .collect::<Vec<_>>();
            vec![build_group(registry, FALLBACK_GROUP_LABEL, &names, false)]
        } else {
            configured
                .iter()
                .map(|g| build_group(registry, &g.label, &g.tokens, false))
                .collect()
        };

        let custom = registry.custom_tokens();
        groups.push(build_group(registry, CUSTOM_GROUP_LABEL, &custom, true));
        groups.retain(|g| !g.buttons.is_empty());

        Self { groups }
    }

    pub fn buttons(&self) -> impl Iterator<Item = &ToolbarButton> {
        self.groups.iter().flat_map(|g| g.buttons.iter())
    }

    pub fn button(&self, name: &TokenName) -> Option<&ToolbarButton> {
        self.buttons().find(|b| &b.name == name)
    }

    pub fn custom_group(&self) -> Option<&ToolbarGroupView> {
        self.groups.iter().find(|g| g.custom)
    }
}

fn build_group(
    registry: &TokenRegistry,
    label: &str,
    names: &[TokenName],
    custom: bool,
) -> ToolbarGroupView {
    let buttons = names
        .iter()
        .map(|name| {
            let definition = registry.definition(name).unwrap_or_default();
            let label = definition.display_label(name).to_string();
            let title = if definition.description.is_empty() {
                format!("{} {}", label, name.placeholder())
            } else {
                format!(
                    "{} {} | {}",
                    label,
                    name.placeholder(),
                    definition.description
                )
            };
            ToolbarButton {
                name: name.clone(),
                label,
                title,
            }
        })
        .collect();

    ToolbarGroupView {
        label: label.to_string(),
        buttons,
        custom,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedbackTone {
    #[default]
    Muted,
    Success,
    Error,
}

impl FeedbackTone {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackTone::Muted => "muted",
            FeedbackTone::Success => "success",
            FeedbackTone::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub tone: FeedbackTone,
}

/// Inputs and feedback line of the "add token" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomTokenForm {
    pub name_input: String,
    pub label_input: String,
    pub feedback: Option<Feedback>,
}

impl CustomTokenForm {
    /// Register the typed name. Returns the token to insert when a new one
    /// was added.
    pub fn submit(&mut self, registry: &TokenRegistry) -> Option<TokenName> {
        let label = Some(self.label_input.as_str());
        match registry.register(&self.name_input, label) {
            Ok(Registration::Registered(name)) => {
                self.name_input.clear();
                self.label_input.clear();
                self.set_feedback(
                    "Token added. Click it in the toolbar to insert it again.",
                    FeedbackTone::Success,
                );
                Some(name)
            }
            Ok(Registration::AlreadyExists(_)) => {
                self.set_feedback(
                    "That token already exists and can be used from the toolbar above.",
                    FeedbackTone::Success,
                );
                None
            }
            Err(e) => {
                tracing::debug!(input = %self.name_input, "rejected custom token name");
                self.set_feedback(e.to_string(), FeedbackTone::Error);
                None
            }
        }
    }

    fn set_feedback(&mut self, message: impl Into<String>, tone: FeedbackTone) {
        self.feedback = Some(Feedback {
            message: message.into(),
            tone,
        });
    }
}
