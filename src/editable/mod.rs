//! Editing surface for one prompt template.
//!
//! # Architecture
//!
//! - [`SurfaceState`]: document plus caret, selection and history
//! - [`EditConstraints`]: per-field restrictions (multi-line, max length)
//! - [`EditHistory`]: undo/redo stacks of [`EditOperation`]s
//! - [`SurfaceMsg`]: every caret, selection and editing action
//!
//! All offsets are atom offsets: one per character of text, one per chip.
//!
//! # Example
//!
//! ```
//! use token_template::editable::{EditConstraints, SurfaceState};
//! use token_template::template::{parse, serialize};
//!
//! let mut state = SurfaceState::with_document(parse("Hi {name}"), EditConstraints::surface());
//!
//! // Backspace right after a chip does nothing
//! assert!(!state.delete_backward());
//! state.insert_char('!');
//!
//! assert_eq!(serialize(state.document()), "Hi {name}!");
//! ```

mod constraints;
mod cursor;
mod history;
mod messages;
mod selection;
mod state;

pub use constraints::{CharFilter, EditConstraints};
pub use cursor::Cursor;
pub use history::{EditHistory, EditOperation};
pub use messages::{DeleteDirection, MoveTarget, SurfaceMsg};
pub use selection::Selection;
pub use state::SurfaceState;
