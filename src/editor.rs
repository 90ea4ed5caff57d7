//! TokenEditor - one mounted prompt template editor.
//!
//! The editor is the model of the Elm loop: hosts turn input events into
//! [`Msg`](crate::messages::Msg)s, pass them to [`crate::update::update`],
//! and execute the returned [`Cmd`]s.

use std::cell::RefCell;
use std::rc::Rc;

use crate::commands::Cmd;
use crate::document::{Document, TokenName};
use crate::editable::{EditConstraints, SurfaceState};
use crate::registry::{Subscription, TokenRegistry};
use crate::template::{parse, referenced_tokens, serialize};
use crate::toolbar::{CustomTokenForm, ToolbarModel};

/// How an editor is attached to its host.
#[derive(Debug, Clone, Default)]
pub struct EditorOptions {
    /// Id of the container to mount into. `None` means the host could not
    /// find it.
    pub mount: Option<String>,
    /// Current value of the plain-text field the editor mirrors into, if any
    pub backing: Option<String>,
    /// Hint shown while the surface is empty
    pub placeholder: String,
    pub constraints: EditConstraints,
}

impl EditorOptions {
    pub fn new(mount: impl Into<String>) -> Self {
        Self {
            mount: Some(mount.into()),
            ..Self::default()
        }
    }

    pub fn with_backing(mut self, value: impl Into<String>) -> Self {
        self.backing = Some(value.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_constraints(mut self, constraints: EditConstraints) -> Self {
        self.constraints = constraints;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetValueOptions {
    /// Skip the change notification (backing field is still updated)
    pub silent: bool,
}

impl SetValueOptions {
    pub const SILENT: Self = Self { silent: true };
}

#[derive(Debug)]
struct ToolbarCell {
    model: ToolbarModel,
    /// Registry changed since the host last rendered the toolbar
    stale: bool,
}

#[derive(Debug)]
pub struct TokenEditor {
    mount_id: String,
    pub(crate) surface: SurfaceState,
    pub(crate) form: CustomTokenForm,
    pub(crate) focused: bool,
    registry: TokenRegistry,
    toolbar: Rc<RefCell<ToolbarCell>>,
    placeholder: String,
    backing: Option<String>,
    _subscription: Subscription,
}

impl TokenEditor {
    /// Create an editor, loading its initial value from the backing field.
    /// Returns `None` when there is no mount point.
    pub fn mount(options: EditorOptions, registry: &TokenRegistry) -> Option<Self> {
        let Some(mount_id) = options.mount else {
            tracing::debug!("No mount point, editor not created");
            return None;
        };

        let toolbar = Rc::new(RefCell::new(ToolbarCell {
            model: ToolbarModel::from_registry(registry),
            stale: false,
        }));
        let weak = Rc::downgrade(&toolbar);
        let subscription = registry.subscribe(move |registry, _event| {
            if let Some(cell) = weak.upgrade() {
                let mut cell = cell.borrow_mut();
                cell.model = ToolbarModel::from_registry(registry);
                cell.stale = true;
            }
        });

        let initial = parse(options.backing.as_deref().unwrap_or_default());
        tracing::debug!(mount = %mount_id, atoms = initial.len_atoms(), "mounted token editor");

        Some(Self {
            mount_id,
            surface: SurfaceState::with_document(initial, options.constraints),
            form: CustomTokenForm::default(),
            focused: false,
            registry: registry.clone(),
            toolbar,
            placeholder: options.placeholder,
            backing: options.backing,
            _subscription: subscription,
        })
    }

    pub fn mount_id(&self) -> &str {
        &self.mount_id
    }

    /// Replace the content with a parsed template
    pub fn set_value(&mut self, value: &str, options: SetValueOptions) -> Cmd {
        self.surface.set_document(parse(value));
        self.changed(options.silent)
    }

    /// Current content as a template string
    pub fn get_value(&self) -> String {
        serialize(self.surface.document())
    }

    pub fn focus(&mut self) -> Cmd {
        self.focused = true;
        Cmd::Focus
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// No chips and only whitespace
    pub fn is_empty(&self) -> bool {
        self.surface.is_blank()
    }

    pub fn document(&self) -> &Document {
        self.surface.document()
    }

    pub fn surface(&self) -> &SurfaceState {
        &self.surface
    }

    pub fn referenced_tokens(&self) -> Vec<TokenName> {
        referenced_tokens(self.surface.document())
    }

    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    /// Toolbar as it should currently be rendered
    pub fn toolbar(&self) -> ToolbarModel {
        self.toolbar.borrow().model.clone()
    }

    pub fn form(&self) -> &CustomTokenForm {
        &self.form
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Value last written to the backing field
    pub fn backing_value(&self) -> Option<&str> {
        self.backing.as_deref()
    }

    /// `RenderToolbar` once after each registry change
    pub fn take_toolbar_refresh(&mut self) -> Option<Cmd> {
        let mut cell = self.toolbar.borrow_mut();
        std::mem::take(&mut cell.stale).then_some(Cmd::RenderToolbar)
    }

    /// Re-render and mirror the value after the document changed
    pub(crate) fn changed(&mut self, silent: bool) -> Cmd {
        let value = self.get_value();
        let mut cmds = vec![Cmd::RenderSurface];
        if let Some(backing) = self.backing.as_mut() {
            backing.clone_from(&value);
        }
        if !silent {
            cmds.push(Cmd::EmitInput { value });
        } else if self.backing.is_some() {
            cmds.push(Cmd::SyncBacking { value });
        }
        Cmd::batch(cmds)
    }
}
