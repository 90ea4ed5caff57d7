//! View module - projections of an editor for display.
//!
//! The surface is rebuilt from the document after every change; nothing here
//! holds state. [`html`] turns the view model into markup for browser hosts.

pub mod html;

pub use html::{render_editor, render_surface, render_toolbar};

use crate::document::{Segment, TokenName};
use crate::editor::TokenEditor;
use crate::registry::TokenRegistry;

/// A chip as displayed inside the surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipView {
    /// Position among the chips; the remove control sends this back
    pub ordinal: usize,
    pub name: TokenName,
    pub label: String,
    pub title: String,
}

impl ChipView {
    pub fn new(ordinal: usize, name: &TokenName, registry: &TokenRegistry) -> Self {
        let definition = registry.definition(name).unwrap_or_default();
        let label = definition.display_label(name).to_string();
        let title = if definition.description.is_empty() {
            name.placeholder()
        } else {
            format!("{} | {}", label, definition.description)
        };
        Self {
            ordinal,
            name: name.clone(),
            label,
            title,
        }
    }

    /// Accessible name of the remove control
    pub fn remove_label(&self) -> String {
        format!("Remove {}", self.name.placeholder())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceNode {
    Text(String),
    Chip(ChipView),
}

/// Everything needed to draw the editing surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceView {
    pub nodes: Vec<SurfaceNode>,
    pub empty: bool,
    pub placeholder: String,
    pub focused: bool,
    pub caret: usize,
}

impl SurfaceView {
    pub fn from_editor(editor: &TokenEditor) -> Self {
        let registry = editor.registry();
        let mut ordinal = 0;
        let nodes = editor
            .document()
            .segments()
            .iter()
            .map(|segment| match segment {
                Segment::Text(text) => SurfaceNode::Text(text.clone()),
                Segment::Token(name) => {
                    let chip = ChipView::new(ordinal, name, registry);
                    ordinal += 1;
                    SurfaceNode::Chip(chip)
                }
            })
            .collect();

        Self {
            nodes,
            empty: editor.is_empty(),
            placeholder: editor.placeholder().to_string(),
            focused: editor.is_focused(),
            caret: editor.surface().cursor().offset,
        }
    }

    pub fn chips(&self) -> impl Iterator<Item = &ChipView> {
        self.nodes.iter().filter_map(|node| match node {
            SurfaceNode::Chip(chip) => Some(chip),
            SurfaceNode::Text(_) => None,
        })
    }
}
