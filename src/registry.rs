//! Shared token registry.
//!
//! Every editor on a page holds a clone of the same [`TokenRegistry`]. A
//! custom token registered through any of them is added here once, and all
//! subscribed editors are told to rebuild their toolbars.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::{NameError, TokenName};

/// Display metadata for one token.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenDefinition {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
}

impl TokenDefinition {
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
        }
    }

    /// Definition given to a token registered at runtime
    pub fn custom(label: &str) -> Self {
        Self::new(
            label,
            format!("Custom token, replaced with the real {} once saved.", label),
        )
    }

    /// Label to show, falling back to the raw name
    pub fn display_label<'a>(&'a self, name: &'a TokenName) -> &'a str {
        if self.label.trim().is_empty() {
            name.as_str()
        } else {
            &self.label
        }
    }
}

/// A labeled, ordered list of token names shown together in the toolbar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarGroup {
    pub label: String,
    #[serde(default)]
    pub tokens: Vec<TokenName>,
}

impl ToolbarGroup {
    pub fn new(label: impl Into<String>, tokens: impl IntoIterator<Item = TokenName>) -> Self {
        Self {
            label: label.into(),
            tokens: tokens.into_iter().collect(),
        }
    }
}

/// Outcome of a registration attempt that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// Newly added under the normalized name
    Registered(TokenName),
    /// A token with that name is already known; nothing changed
    AlreadyExists(TokenName),
}

impl Registration {
    pub fn name(&self) -> &TokenName {
        match self {
            Registration::Registered(name) | Registration::AlreadyExists(name) => name,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Registration::Registered(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("Enter a token name.")]
    MissingName,
    #[error(
        "Token names must start with a letter and contain only letters, digits or underscores (2-49 characters)."
    )]
    InvalidName(String),
}

impl From<NameError> for RegistrationError {
    fn from(err: NameError) -> Self {
        match err {
            NameError::Empty => RegistrationError::MissingName,
            NameError::Invalid(raw) => RegistrationError::InvalidName(raw),
        }
    }
}

/// Change notification delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    TokenRegistered {
        name: TokenName,
        definition: TokenDefinition,
    },
}

type Callback = Rc<dyn Fn(&TokenRegistry, &RegistryEvent)>;

struct Inner {
    definitions: BTreeMap<TokenName, TokenDefinition>,
    groups: Vec<ToolbarGroup>,
    custom: BTreeSet<TokenName>,
    subscribers: Vec<(u64, Callback)>,
    next_subscriber: u64,
}

/// Cheaply cloneable handle to shared token definitions.
#[derive(Clone)]
pub struct TokenRegistry {
    inner: Rc<RefCell<Inner>>,
}

impl fmt::Debug for TokenRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("TokenRegistry")
            .field("definitions", &inner.definitions.len())
            .field("groups", &inner.groups.len())
            .field("custom", &inner.custom)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::new(BTreeMap::new(), Vec::new())
    }
}

impl TokenRegistry {
    pub fn new(definitions: BTreeMap<TokenName, TokenDefinition>, groups: Vec<ToolbarGroup>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                definitions,
                groups,
                custom: BTreeSet::new(),
                subscribers: Vec::new(),
                next_subscriber: 0,
            })),
        }
    }

    /// Whether `other` is a handle to the same registry
    pub fn ptr_eq(&self, other: &TokenRegistry) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Known in a configured group, as a definition, or as a custom token
    pub fn contains(&self, name: &TokenName) -> bool {
        let inner = self.inner.borrow();
        inner.custom.contains(name)
            || inner.definitions.contains_key(name)
            || inner.groups.iter().any(|g| g.tokens.contains(name))
    }

    pub fn definition(&self, name: &TokenName) -> Option<TokenDefinition> {
        self.inner.borrow().definitions.get(name).cloned()
    }

    pub fn definitions(&self) -> BTreeMap<TokenName, TokenDefinition> {
        self.inner.borrow().definitions.clone()
    }

    /// Groups as configured, empty ones included
    pub fn groups(&self) -> Vec<ToolbarGroup> {
        self.inner.borrow().groups.clone()
    }

    /// Custom names in sorted order
    pub fn custom_tokens(&self) -> Vec<TokenName> {
        self.inner.borrow().custom.iter().cloned().collect()
    }

    pub fn is_custom(&self, name: &TokenName) -> bool {
        self.inner.borrow().custom.contains(name)
    }

    /// Register a custom token typed by the user.
    ///
    /// The name is normalized first (trimmed, whitespace runs become `_`)
    /// and must satisfy the custom name rules. An empty label falls back to
    /// the normalized name.
    pub fn register(
        &self,
        raw_name: &str,
        label: Option<&str>,
    ) -> Result<Registration, RegistrationError> {
        let name = TokenName::normalize_custom(raw_name)?;
        if self.contains(&name) {
            tracing::debug!(token = %name, "token already registered");
            return Ok(Registration::AlreadyExists(name));
        }

        let label = label
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(name.as_str())
            .to_string();
        Ok(self.register_definition(name, TokenDefinition::custom(&label)))
    }

    /// Add a custom token with an explicit definition and notify subscribers.
    pub fn register_definition(&self, name: TokenName, definition: TokenDefinition) -> Registration {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.custom.contains(&name) {
                return Registration::AlreadyExists(name);
            }
            inner.definitions.insert(name.clone(), definition.clone());
            inner.custom.insert(name.clone());
        }

        tracing::info!(token = %name, label = %definition.label, "registered custom token");
        self.notify(&RegistryEvent::TokenRegistered {
            name: name.clone(),
            definition,
        });
        Registration::Registered(name)
    }

    /// Call `callback` after every change until the returned handle drops.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&TokenRegistry, &RegistryEvent) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_subscriber;
        inner.next_subscriber += 1;
        inner.subscribers.push((id, Rc::new(callback)));
        Subscription {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn notify(&self, event: &RegistryEvent) {
        // Snapshot so callbacks may read the registry or (un)subscribe
        let callbacks: Vec<Callback> = self
            .inner
            .borrow()
            .subscribers
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for callback in callbacks {
            callback(self, event);
        }
    }
}

/// Keeps a registry subscription alive; unsubscribes on drop.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Inner>>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(inner) = self.registry.upgrade() else {
            return;
        };
        match inner.try_borrow_mut() {
            Ok(mut inner) => inner.subscribers.retain(|(id, _)| *id != self.id),
            Err(_) => tracing::warn!(id = self.id, "registry busy, subscription not removed"),
        };
    }
}
