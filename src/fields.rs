//! The prompt authoring form: four template fields sharing one registry.
//!
//! A field whose editor container is missing falls back to a plain text
//! field. Tokens inserted there are appended as `{name}`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::commands::Cmd;
use crate::document::TokenName;
use crate::editor::{EditorOptions, SetValueOptions, TokenEditor};
use crate::messages::Msg;
use crate::registry::TokenRegistry;
use crate::update::update;

pub const FALLBACK_NOTICE: &str =
    "The rich editor did not load. Type into the plain text box and use {name} placeholders.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Environment,
    Conversation,
    Evaluation,
    AssignmentScenario,
}

impl FieldId {
    pub const ALL: [FieldId; 4] = [
        FieldId::Environment,
        FieldId::Conversation,
        FieldId::Evaluation,
        FieldId::AssignmentScenario,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FieldId::Environment => "environment",
            FieldId::Conversation => "conversation",
            FieldId::Evaluation => "evaluation",
            FieldId::AssignmentScenario => "assignment_scenario",
        }
    }

    /// Default container id in the admin page
    pub fn mount_id(self) -> &'static str {
        match self {
            FieldId::Environment => "section-editor-environment-host",
            FieldId::Conversation => "section-editor-conversation-host",
            FieldId::Evaluation => "section-editor-evaluation-host",
            FieldId::AssignmentScenario => "admin-assignment-scenario-host",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FieldId::Environment => {
                "Describe the system prompt used to generate the scenario. Tokens are filled in by the server."
            }
            FieldId::Conversation => {
                "Plan the AI's response strategy, tone and rules. Insert tokens at any time."
            }
            FieldId::Evaluation => {
                "Define the evaluation dimensions and output format. Tokens make the feedback specific."
            }
            FieldId::AssignmentScenario => {
                "Describe the shared assignment scenario as JSON. Token placeholders can be inserted."
            }
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FieldId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::ALL
            .into_iter()
            .find(|id| id.key() == s)
            .ok_or_else(|| format!("unknown field '{}'", s))
    }
}

/// Plain text field used when the editor could not be mounted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainField {
    value: String,
}

impl PlainField {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn insert_token(&mut self, name: &TokenName) {
        self.value.push_str(&name.placeholder());
    }

    pub fn notice(&self) -> &'static str {
        FALLBACK_NOTICE
    }
}

#[derive(Debug)]
pub enum FieldSlot {
    Rich(TokenEditor),
    Fallback(PlainField),
}

impl FieldSlot {
    pub fn get_value(&self) -> String {
        match self {
            FieldSlot::Rich(editor) => editor.get_value(),
            FieldSlot::Fallback(field) => field.value().to_string(),
        }
    }

    pub fn set_value(&mut self, value: &str, options: SetValueOptions) -> Option<Cmd> {
        match self {
            FieldSlot::Rich(editor) => Some(editor.set_value(value, options)),
            FieldSlot::Fallback(field) => {
                field.set_value(value);
                None
            }
        }
    }

    pub fn insert_token(&mut self, name: TokenName) -> Option<Cmd> {
        match self {
            FieldSlot::Rich(editor) => crate::update::insert_token(editor, name),
            FieldSlot::Fallback(field) => {
                field.insert_token(&name);
                None
            }
        }
    }

    pub fn as_editor(&self) -> Option<&TokenEditor> {
        match self {
            FieldSlot::Rich(editor) => Some(editor),
            FieldSlot::Fallback(_) => None,
        }
    }

    pub fn as_editor_mut(&mut self) -> Option<&mut TokenEditor> {
        match self {
            FieldSlot::Rich(editor) => Some(editor),
            FieldSlot::Fallback(_) => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, FieldSlot::Fallback(_))
    }
}

/// What the host page provides for one field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMount {
    /// Editor container id, if present
    pub host: Option<String>,
    /// Current value of the field's plain text input
    pub value: String,
}

impl FieldMount {
    /// Field with its editor container at the default id
    pub fn standard(id: FieldId, value: impl Into<String>) -> Self {
        Self {
            host: Some(id.mount_id().to_string()),
            value: value.into(),
        }
    }

    pub fn without_host(value: impl Into<String>) -> Self {
        Self {
            host: None,
            value: value.into(),
        }
    }
}

#[derive(Debug)]
pub struct PromptFields {
    registry: TokenRegistry,
    slots: BTreeMap<FieldId, FieldSlot>,
}

impl PromptFields {
    /// Mount an editor for every field the page provides. Fields absent from
    /// `mounts` are skipped entirely.
    pub fn mount(registry: &TokenRegistry, mounts: BTreeMap<FieldId, FieldMount>) -> Self {
        let slots = mounts
            .into_iter()
            .map(|(id, mount)| {
                let options = EditorOptions {
                    mount: mount.host,
                    backing: Some(mount.value.clone()),
                    placeholder: id.placeholder().to_string(),
                    ..EditorOptions::default()
                };
                let slot = match TokenEditor::mount(options, registry) {
                    Some(editor) => FieldSlot::Rich(editor),
                    None => {
                        tracing::warn!(field = %id, "editor container missing, using plain text field");
                        FieldSlot::Fallback(PlainField::new(mount.value))
                    }
                };
                (id, slot)
            })
            .collect();

        Self {
            registry: registry.clone(),
            slots,
        }
    }

    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    pub fn get(&self, id: FieldId) -> Option<&FieldSlot> {
        self.slots.get(&id)
    }

    pub fn get_mut(&mut self, id: FieldId) -> Option<&mut FieldSlot> {
        self.slots.get_mut(&id)
    }

    pub fn editor(&self, id: FieldId) -> Option<&TokenEditor> {
        self.get(id).and_then(FieldSlot::as_editor)
    }

    pub fn ids(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.slots.keys().copied()
    }

    /// Run a message through one field's editor. Returns that editor's
    /// command followed by toolbar refreshes for every editor whose
    /// registry view changed.
    pub fn dispatch(&mut self, id: FieldId, msg: Msg) -> Vec<(FieldId, Cmd)> {
        let mut cmds = Vec::new();
        match self.slots.get_mut(&id) {
            Some(FieldSlot::Rich(editor)) => {
                if let Some(cmd) = update(editor, msg) {
                    cmds.push((id, cmd));
                }
            }
            Some(FieldSlot::Fallback(_)) => {
                tracing::debug!(field = %id, "message for plain text field ignored");
            }
            None => tracing::warn!(field = %id, "message for unmounted field"),
        }

        for (&field, slot) in self.slots.iter_mut() {
            if let Some(cmd) = slot.as_editor_mut().and_then(TokenEditor::take_toolbar_refresh) {
                cmds.push((field, cmd));
            }
        }
        cmds
    }

    /// Current template of every field
    pub fn values(&self) -> BTreeMap<FieldId, String> {
        self.slots
            .iter()
            .map(|(&id, slot)| (id, slot.get_value()))
            .collect()
    }

    /// Load stored templates silently (e.g. when a level is opened).
    /// Returns the render and backing-field sync for every rich field.
    pub fn set_values(&mut self, values: &BTreeMap<FieldId, String>) -> Vec<(FieldId, Cmd)> {
        let mut cmds = Vec::new();
        for (&id, value) in values {
            match self.slots.get_mut(&id) {
                Some(slot) => {
                    if let Some(cmd) = slot.set_value(value, SetValueOptions::SILENT) {
                        cmds.push((id, cmd));
                    }
                }
                None => tracing::debug!(field = %id, "stored value for unmounted field"),
            }
        }
        cmds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_id_keys_round_trip() {
        for id in FieldId::ALL {
            assert_eq!(id.key().parse::<FieldId>().unwrap(), id);
        }
        assert!("nope".parse::<FieldId>().is_err());
    }

    #[test]
    fn test_fallback_appends_placeholder() {
        let registry = TokenRegistry::default();
        let mut mounts = BTreeMap::new();
        mounts.insert(FieldId::Evaluation, FieldMount::without_host("Score "));
        let mut fields = PromptFields::mount(&registry, mounts);

        let slot = fields.get_mut(FieldId::Evaluation).unwrap();
        assert!(slot.is_fallback());
        assert_eq!(slot.insert_token(TokenName::new("ai_role").unwrap()), None);
        assert_eq!(slot.get_value(), "Score {ai_role}");
        assert_eq!(registry.subscriber_count(), 0);
    }
}
