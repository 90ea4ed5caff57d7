//! Tracing setup and debug diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=cursor=debug,message=debug` - scoped filtering
//! - `RUST_LOG=token_template::registry=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/token-template/logs/token-template.log`
//! with daily rotation. File logging uses debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::document::Segment;
use crate::editable::SurfaceState;

/// Initialize tracing subscriber with console and file logging
///
/// Console output goes to stderr and respects RUST_LOG (default `warn`).
/// With `file_logging`, a debug-level daily log is also written to the
/// config `logs/` directory.
pub fn init(file_logging: bool) {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = if file_logging {
        match crate::config_paths::ensure_logs_dir() {
            Ok(logs_dir) => {
                let file_appender =
                    tracing_appender::rolling::daily(logs_dir, "token-template.log");
                Some(
                    fmt::layer()
                        .with_writer(file_appender)
                        .with_ansi(false)
                        .with_target(true)
                        .with_line_number(true)
                        .with_filter(EnvFilter::new("debug")),
                )
            }
            Err(e) => {
                eprintln!("Warning: Could not initialize file logging: {}", e);
                None
            }
        }
    } else {
        None
    };

    // A second init (tests, embedding hosts) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of caret/selection state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceSnapshot {
    pub cursor: usize,
    pub anchor: usize,
    pub head: usize,
    pub len_atoms: usize,
    pub token_count: usize,
    /// Adjacent or empty text segments found
    pub denormalized: bool,
}

impl SurfaceSnapshot {
    pub fn from_surface(surface: &SurfaceState) -> Self {
        let segments = surface.document().segments();
        let denormalized = segments.iter().any(|s| matches!(s, Segment::Text(t) if t.is_empty()))
            || segments
                .windows(2)
                .any(|w| matches!(w, [Segment::Text(_), Segment::Text(_)]));
        let selection = surface.selection();

        Self {
            cursor: surface.cursor().offset,
            anchor: selection.anchor,
            head: selection.head,
            len_atoms: surface.len_atoms(),
            token_count: surface.document().token_count(),
            denormalized,
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &SurfaceSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.cursor != other.cursor {
            changes.push(format!("caret: {} → {}", self.cursor, other.cursor));
        }
        let was_empty = self.anchor == self.head;
        let is_empty = other.anchor == other.head;
        if was_empty != is_empty {
            let status = if is_empty { "cleared" } else { "active" };
            changes.push(format!("selection {}", status));
        }
        if self.len_atoms != other.len_atoms {
            changes.push(format!("atoms: {} → {}", self.len_atoms, other.len_atoms));
        }
        if self.token_count != other.token_count {
            changes.push(format!("chips: {} → {}", self.token_count, other.token_count));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }

    /// Panic with context when the surface state is inconsistent
    pub fn assert_invariants(&self, context: &str) {
        assert!(
            self.cursor <= self.len_atoms,
            "[{}] caret {} past end {}",
            context,
            self.cursor,
            self.len_atoms
        );
        assert_eq!(
            self.head, self.cursor,
            "[{}] selection head out of sync with caret",
            context
        );
        assert!(
            self.anchor <= self.len_atoms,
            "[{}] selection anchor {} past end {}",
            context,
            self.anchor,
            self.len_atoms
        );
        assert!(!self.denormalized, "[{}] document not normalized", context);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::EditConstraints;
    use crate::template::parse;

    #[test]
    fn test_snapshot_diff() {
        let mut surface = SurfaceState::with_document(parse("ab{x}"), EditConstraints::surface());
        let before = SurfaceSnapshot::from_surface(&surface);
        surface.select(0, 2);
        let after = SurfaceSnapshot::from_surface(&surface);

        assert_eq!(
            before.diff(&after).as_deref(),
            Some("caret: 3 → 2; selection active")
        );
        assert_eq!(after.diff(&after), None);
        after.assert_invariants("test");
    }
}
