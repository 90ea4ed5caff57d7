//! Command types for the Elm-style architecture
//!
//! Commands represent side effects the host should perform after an update.

/// Side effects returned from update functions
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Rebuild the editing surface from the document
    RenderSurface,
    /// Rebuild toolbar buttons (registry changed or form feedback updated)
    RenderToolbar,
    /// Copy the serialized value into the backing field without an event
    SyncBacking { value: String },
    /// Copy the value into the backing field and fire its `input` event
    EmitInput { value: String },
    /// Move keyboard focus to the surface
    Focus,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Combine optional commands, collapsing empty and single batches
    pub fn merge(cmds: impl IntoIterator<Item = Option<Cmd>>) -> Option<Cmd> {
        let mut cmds: Vec<Cmd> = cmds
            .into_iter()
            .flatten()
            .filter(|c| *c != Cmd::None)
            .collect();
        match cmds.len() {
            0 => None,
            1 => cmds.pop(),
            _ => Some(Cmd::Batch(cmds)),
        }
    }

    /// Commands in execution order with batches expanded
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            other => vec![other],
        }
    }

    /// The value a host should write into the backing field, if any
    pub fn backing_value(&self) -> Option<&str> {
        match self {
            Cmd::SyncBacking { value } | Cmd::EmitInput { value } => Some(value),
            Cmd::Batch(cmds) => cmds.iter().rev().find_map(|c| c.backing_value()),
            _ => None,
        }
    }

    /// Whether this command fires a change notification
    pub fn emits_input(&self) -> bool {
        match self {
            Cmd::EmitInput { .. } => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.emits_input()),
            _ => false,
        }
    }
}
