//! Token names and custom-name normalization.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Any `{word}` shape accepted inside a stored template.
static TEMPLATE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("Invalid token name pattern"));

/// Names a user may register at runtime.
static CUSTOM_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_]{1,48}$").expect("Invalid custom token name pattern")
});

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace pattern"));

/// Errors produced when turning user input into a token name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("token name is empty")]
    Empty,
    #[error(
        "Token names must start with a letter and contain only letters, digits or underscores (2-49 characters): {0:?}"
    )]
    Invalid(String),
}

/// A validated token identifier (`[A-Za-z][A-Za-z0-9_]*`).
///
/// Stored templates may carry names produced by a looser process, so this
/// type only enforces the template grammar. Runtime registration goes through
/// [`TokenName::normalize_custom`], which applies the stricter length rule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenName(String);

impl TokenName {
    /// Validate a name against the template grammar.
    pub fn new(name: impl Into<String>) -> Result<Self, NameError> {
        let name = name.into();
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        if !TEMPLATE_NAME.is_match(&name) {
            return Err(NameError::Invalid(name));
        }
        Ok(Self(name))
    }

    /// Build a name from a scanner match that is already known to be valid.
    pub(crate) fn from_scanned(name: &str) -> Self {
        debug_assert!(TEMPLATE_NAME.is_match(name), "scanner produced {name:?}");
        Self(name.to_string())
    }

    /// Normalize raw user input into a custom token name.
    ///
    /// Trims, collapses internal whitespace runs to a single `_`, then checks
    /// `^[A-Za-z][A-Za-z0-9_]{1,48}$`.
    pub fn normalize_custom(raw: &str) -> Result<Self, NameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(NameError::Empty);
        }
        let collapsed = WHITESPACE_RUN.replace_all(trimmed, "_");
        if !CUSTOM_NAME.is_match(&collapsed) {
            return Err(NameError::Invalid(raw.to_string()));
        }
        Ok(Self(collapsed.into_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `{name}` form used in templates and tooltips.
    pub fn placeholder(&self) -> String {
        format!("{{{}}}", self.0)
    }
}

impl fmt::Display for TokenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TokenName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TokenName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for TokenName {
    type Error = NameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TokenName> for String {
    fn from(name: TokenName) -> Self {
        name.0
    }
}

impl PartialEq<str> for TokenName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TokenName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
