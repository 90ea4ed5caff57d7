//! Template string grammar.
//!
//! ```text
//! template := ( "{{" | "}}" | "{" name "}" | literal )*
//! name     := [A-Za-z][A-Za-z0-9_]*
//! ```
//!
//! [`parse`] and [`serialize`] are inverse up to canonical escaping:
//! `parse(&serialize(&parse(s))) == parse(s)` for every input.

mod parser;
mod render;
mod serializer;

pub use parser::{parse, parse_opt, Scanner};
pub use render::{referenced_tokens, render, render_template, TemplateContext};
pub use serializer::{escape_literal, serialize, serialize_segment};
