//! token-template - structured prompt template editing
//!
//! Prompt templates mix literal text with `{token}` placeholders. This crate
//! provides the document model, parser and serializer for that format, plus
//! an Elm-style editor in which placeholders are atomic chips, a toolbar of
//! insertable tokens backed by a shared registry, and the host glue for the
//! prompt authoring form.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod document;
pub mod editable;
pub mod editor;
pub mod fields;
pub mod input;
pub mod messages;
pub mod registry;
pub mod replay;
pub mod template;
pub mod toolbar;
pub mod tracing;
pub mod update;
pub mod util;
pub mod view;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::CatalogConfig;
pub use document::{Document, Segment, TokenName};
pub use editor::{EditorOptions, SetValueOptions, TokenEditor};
pub use messages::Msg;
pub use registry::{Registration, RegistrationError, TokenDefinition, TokenRegistry, ToolbarGroup};
