//! Scripted editor sessions.
//!
//! A replay script is a YAML document with a starting template and a list
//! of steps that are fed to a mounted editor one message at a time:
//!
//! ```yaml
//! template: "Dear {student_role},"
//! steps:
//!   - key: ArrowLeft
//!   - key: Backspace
//!   - type: " there"
//!   - insert: ai_role
//!   - register: { name: "delivery date", label: "Delivery date" }
//!   - key: Ctrl+z
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::{NameError, TokenName};
use crate::editable::SurfaceMsg;
use crate::editor::{EditorOptions, TokenEditor};
use crate::input::{map_key, Key, Modifiers};
use crate::messages::{ChipMsg, Msg, ToolbarMsg};
use crate::registry::TokenRegistry;
use crate::update::update;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("step {step}: unrecognized key chord '{chord}'")]
    UnknownKey { step: usize, chord: String },
    #[error("step {step}: {source}")]
    InvalidToken { step: usize, source: NameError },
    #[error("editor could not be mounted")]
    Mount,
    #[error("invalid replay script: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Key chord such as `Backspace`, `Shift+ArrowLeft` or `Ctrl+z`
    Key(String),
    /// Typed characters, one key press each
    Type(String),
    Paste(String),
    /// Place the caret at an atom offset
    Cursor(usize),
    Select { anchor: usize, head: usize },
    /// Toolbar button for this token
    Insert(String),
    /// Remove control of the chip with this ordinal
    RemoveChip(usize),
    /// Submit the custom token form
    Register {
        name: String,
        #[serde(default)]
        label: Option<String>,
    },
    Focus,
    Blur,
    Drop,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub template: String,
    /// Start with the surface focused (caret at the end)
    #[serde(default)]
    pub focused: bool,
    /// Steps are written as single-key maps (`- key: Backspace`) or bare
    /// names for steps without data (`- focus`)
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub steps: Vec<Step>,
}

impl ReplayScript {
    pub fn from_yaml(source: &str) -> Result<Self, ReplayError> {
        Ok(serde_yaml::from_str(source)?)
    }
}

/// State after the last step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayOutcome {
    pub value: String,
    pub caret: usize,
    pub selection: (usize, usize),
    pub empty: bool,
    pub tokens: Vec<TokenName>,
    /// Steps that produced no command (suppressed or no-op)
    pub ignored_steps: Vec<usize>,
    pub feedback: Option<String>,
}

/// Parse `Ctrl+Shift+ArrowLeft` style chords. The last part is the key, so
/// `Ctrl++` is Ctrl with the `+` key.
pub fn parse_chord(chord: &str) -> Option<(Key, Modifiers)> {
    let (mods_part, key_part) = if chord == "+" {
        ("", "+")
    } else if let Some(mods) = chord.strip_suffix("++") {
        (mods, "+")
    } else {
        chord.rsplit_once('+').unwrap_or(("", chord))
    };

    let mut mods = Modifiers::NONE;
    if !mods_part.is_empty() {
        for part in mods_part.split('+') {
            mods = mods
                | match part.to_ascii_lowercase().as_str() {
                    "ctrl" | "control" => Modifiers::CTRL,
                    "shift" => Modifiers::SHIFT,
                    "alt" | "option" => Modifiers::ALT,
                    "meta" | "cmd" | "super" => Modifiers::META,
                    _ => return None,
                };
        }
    }

    Key::from_dom(key_part).map(|key| (key, mods))
}

fn step_messages(index: usize, step: &Step) -> Result<Vec<Msg>, ReplayError> {
    let token = |raw: &str| {
        TokenName::new(raw).map_err(|source| ReplayError::InvalidToken {
            step: index,
            source,
        })
    };

    let msgs = match step {
        Step::Key(chord) => {
            let (key, mods) = parse_chord(chord).ok_or_else(|| ReplayError::UnknownKey {
                step: index,
                chord: chord.clone(),
            })?;
            map_key(key, mods).into_iter().collect()
        }
        Step::Type(text) => text
            .chars()
            .map(|ch| {
                if ch == '\n' {
                    Msg::Surface(SurfaceMsg::InsertNewline)
                } else {
                    Msg::Surface(SurfaceMsg::InsertChar(ch))
                }
            })
            .collect(),
        Step::Paste(text) => vec![Msg::Surface(SurfaceMsg::Paste(text.clone()))],
        Step::Cursor(offset) => vec![Msg::Surface(SurfaceMsg::SetCursor(*offset))],
        Step::Select { anchor, head } => vec![Msg::Surface(SurfaceMsg::Select {
            anchor: *anchor,
            head: *head,
        })],
        Step::Insert(name) => vec![Msg::Toolbar(ToolbarMsg::InsertToken(token(name)?))],
        Step::RemoveChip(ordinal) => vec![Msg::Chip(ChipMsg::Remove(*ordinal))],
        Step::Register { name, label } => vec![
            Msg::Toolbar(ToolbarMsg::EditCustomName(name.clone())),
            Msg::Toolbar(ToolbarMsg::EditCustomLabel(label.clone().unwrap_or_default())),
            Msg::Toolbar(ToolbarMsg::SubmitCustomToken),
        ],
        Step::Focus => vec![Msg::Focus],
        Step::Blur => vec![Msg::Blur],
        Step::Drop => vec![Msg::Drop],
    };
    Ok(msgs)
}

/// Run a script against a fresh editor on `registry`.
pub fn run(script: &ReplayScript, registry: &TokenRegistry) -> Result<ReplayOutcome, ReplayError> {
    let options = EditorOptions::new("replay").with_backing(script.template.clone());
    let mut editor = TokenEditor::mount(options, registry).ok_or(ReplayError::Mount)?;
    if script.focused {
        update(&mut editor, Msg::Focus);
    }

    let mut ignored_steps = Vec::new();
    for (index, step) in script.steps.iter().enumerate() {
        let msgs = step_messages(index, step)?;
        let mut produced = false;
        for msg in msgs {
            produced |= update(&mut editor, msg).is_some();
        }
        if !produced && !matches!(step, Step::Focus | Step::Blur) {
            tracing::debug!(step = index, ?step, "step had no effect");
            ignored_steps.push(index);
        }
    }

    let selection = editor.surface().selection();
    Ok(ReplayOutcome {
        value: editor.get_value(),
        caret: editor.surface().cursor().offset,
        selection: (selection.anchor, selection.head),
        empty: editor.is_empty(),
        tokens: editor.referenced_tokens(),
        ignored_steps,
        feedback: editor.form().feedback.as_ref().map(|f| f.message.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chord() {
        assert_eq!(parse_chord("Backspace"), Some((Key::Backspace, Modifiers::NONE)));
        assert_eq!(
            parse_chord("Ctrl+Shift+ArrowLeft"),
            Some((Key::ArrowLeft, Modifiers::CTRL | Modifiers::SHIFT))
        );
        assert_eq!(parse_chord("Ctrl++"), Some((Key::Char('+'), Modifiers::CTRL)));
        assert_eq!(parse_chord("+"), Some((Key::Char('+'), Modifiers::NONE)));
        assert_eq!(parse_chord("Hyper+a"), None);
    }

    #[test]
    fn test_parse_chord_rejects_malformed() {
        assert_eq!(parse_chord("é+"), None);
        assert_eq!(parse_chord("a+"), None);
        assert_eq!(parse_chord("Ctrl+"), None);
        assert_eq!(parse_chord("Ctrl++a"), None);
        assert_eq!(parse_chord("++"), Some((Key::Char('+'), Modifiers::NONE)));
        assert_eq!(parse_chord("Alt+é"), Some((Key::Char('é'), Modifiers::ALT)));
    }

    #[test]
    fn test_script_from_yaml() {
        let script = ReplayScript::from_yaml(
            "template: 'ab{x}'\nsteps:\n  - key: Backspace\n  - remove_chip: 0\n  - focus\n",
        )
        .unwrap();
        assert_eq!(
            script.steps,
            vec![Step::Key("Backspace".into()), Step::RemoveChip(0), Step::Focus]
        );
    }

    #[test]
    fn test_script_step_shapes() {
        let script = ReplayScript::from_yaml(concat!(
            "steps:\n",
            "  - type: \" there\"\n",
            "  - select: {anchor: 1, head: 3}\n",
            "  - register: {name: delivery date, label: Delivery date}\n",
            "  - register: {name: quota}\n",
            "  - blur\n",
            "  - drop\n",
        ))
        .unwrap();
        assert_eq!(
            script.steps,
            vec![
                Step::Type(" there".into()),
                Step::Select { anchor: 1, head: 3 },
                Step::Register {
                    name: "delivery date".into(),
                    label: Some("Delivery date".into()),
                },
                Step::Register {
                    name: "quota".into(),
                    label: None,
                },
                Step::Blur,
                Step::Drop,
            ]
        );
        assert!(script.template.is_empty());
        assert!(!script.focused);
    }

    #[test]
    fn test_script_yaml_round_trip() {
        let script = ReplayScript {
            template: "x".into(),
            focused: true,
            steps: vec![Step::Key("Ctrl+z".into()), Step::Cursor(1), Step::Focus],
        };
        let yaml = serde_yaml::to_string(&script).unwrap();
        assert!(yaml.contains("key: Ctrl+z"));
        assert_eq!(ReplayScript::from_yaml(&yaml).unwrap(), script);
    }

    #[test]
    fn test_run_reports_suppressed_steps() {
        let script = ReplayScript {
            template: "ab{x}".into(),
            focused: true,
            steps: vec![Step::Key("Backspace".into()), Step::RemoveChip(0)],
        };
        let outcome = run(&script, &TokenRegistry::default()).unwrap();
        assert_eq!(outcome.value, "ab");
        assert_eq!(outcome.ignored_steps, vec![0]);
        assert_eq!(outcome.caret, 2);
    }
}
