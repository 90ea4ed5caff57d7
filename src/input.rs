//! Keyboard mapping: DOM-style key events to messages.

use std::fmt;

use crate::editable::{MoveTarget, SurfaceMsg};
use crate::messages::Msg;

/// Modifier keys as a bitfield
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const SHIFT: Modifiers = Modifiers(0b0010);
    pub const ALT: Modifiers = Modifiers(0b0100);
    pub const META: Modifiers = Modifiers(0b1000); // Cmd on macOS, Win on Windows

    /// Create modifiers from the event's `ctrlKey`, `shiftKey`, `altKey`, `metaKey`
    pub const fn new(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= 0b0001;
        }
        if shift {
            bits |= 0b0010;
        }
        if alt {
            bits |= 0b0100;
        }
        if meta {
            bits |= 0b1000;
        }
        Modifiers(bits)
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b0001 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b0010 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b0100 != 0
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & 0b1000 != 0
    }

    /// Ctrl or Cmd. Browser hosts cannot tell the platform apart, so either counts.
    #[inline]
    pub const fn command(self) -> bool {
        self.ctrl() || self.meta()
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl() {
            parts.push("Ctrl");
        }
        if self.shift() {
            parts.push("Shift");
        }
        if self.alt() {
            parts.push("Alt");
        }
        if self.meta() {
            parts.push("Meta");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// Keys the surface reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Delete,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Tab,
    Escape,
    Char(char),
}

impl Key {
    /// Parse a `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Key> {
        let named = match key {
            "Enter" => Key::Enter,
            "Backspace" => Key::Backspace,
            "Delete" => Key::Delete,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "Home" => Key::Home,
            "End" => Key::End,
            "Tab" => Key::Tab,
            "Escape" => Key::Escape,
            _ => {
                let mut chars = key.chars();
                return match (chars.next(), chars.next()) {
                    (Some(ch), None) => Some(Key::Char(ch)),
                    _ => None,
                };
            }
        };
        Some(named)
    }
}

/// Map a key press to a message. `None` leaves the event to the host
/// (e.g. clipboard shortcuts, Tab focus traversal).
pub fn map_key(key: Key, mods: Modifiers) -> Option<Msg> {
    let shift = mods.shift();
    let moving = |target: MoveTarget| {
        Some(Msg::Surface(if shift {
            SurfaceMsg::MoveWithSelection(target)
        } else {
            SurfaceMsg::Move(target)
        }))
    };

    match key {
        Key::Enter => Some(Msg::Surface(SurfaceMsg::InsertNewline)),
        Key::Backspace => Some(Msg::Surface(SurfaceMsg::DeleteBackward)),
        Key::Delete => Some(Msg::Surface(SurfaceMsg::DeleteForward)),

        Key::ArrowLeft if mods.command() || mods.alt() => moving(MoveTarget::WordLeft),
        Key::ArrowRight if mods.command() || mods.alt() => moving(MoveTarget::WordRight),
        Key::ArrowLeft => moving(MoveTarget::Left),
        Key::ArrowRight => moving(MoveTarget::Right),
        // No visual lines in the model; up/down go to the logical line ends
        Key::ArrowUp => moving(MoveTarget::LineStart),
        Key::ArrowDown => moving(MoveTarget::LineEnd),
        Key::Home if mods.command() => moving(MoveTarget::DocumentStart),
        Key::End if mods.command() => moving(MoveTarget::DocumentEnd),
        Key::Home => moving(MoveTarget::LineStart),
        Key::End => moving(MoveTarget::LineEnd),

        // Ctrl+Alt is AltGr on Windows layouts and produces a printable character
        Key::Char(ch) if mods.command() && !(mods.ctrl() && mods.alt()) => match ch.to_ascii_lowercase() {
            'a' => Some(Msg::Surface(SurfaceMsg::SelectAll)),
            'z' if shift => Some(Msg::Surface(SurfaceMsg::Redo)),
            'z' => Some(Msg::Surface(SurfaceMsg::Undo)),
            'y' if mods.ctrl() => Some(Msg::Surface(SurfaceMsg::Redo)),
            _ => None,
        },
        Key::Char(ch) if ch.is_control() => None,
        Key::Char(ch) => Some(Msg::Surface(SurfaceMsg::InsertChar(ch))),

        Key::Escape => Some(Msg::Surface(SurfaceMsg::CollapseSelection)),
        Key::Tab => None,
    }
}

/// Parse and map in one step
pub fn map_dom_key(key: &str, mods: Modifiers) -> Option<Msg> {
    Key::from_dom(key).and_then(|key| map_key(key, mods))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(msg: SurfaceMsg) -> Option<Msg> {
        Some(Msg::Surface(msg))
    }

    #[test]
    fn test_editing_keys() {
        assert_eq!(map_dom_key("Enter", Modifiers::NONE), surface(SurfaceMsg::InsertNewline));
        assert_eq!(map_dom_key("Backspace", Modifiers::NONE), surface(SurfaceMsg::DeleteBackward));
        assert_eq!(map_dom_key("Delete", Modifiers::NONE), surface(SurfaceMsg::DeleteForward));
        assert_eq!(map_dom_key("x", Modifiers::NONE), surface(SurfaceMsg::InsertChar('x')));
        assert_eq!(map_dom_key("X", Modifiers::SHIFT), surface(SurfaceMsg::InsertChar('X')));
        assert_eq!(map_dom_key("é", Modifiers::NONE), surface(SurfaceMsg::InsertChar('é')));
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(map_dom_key("a", Modifiers::CTRL), surface(SurfaceMsg::SelectAll));
        assert_eq!(map_dom_key("z", Modifiers::META), surface(SurfaceMsg::Undo));
        assert_eq!(
            map_dom_key("Z", Modifiers::META | Modifiers::SHIFT),
            surface(SurfaceMsg::Redo)
        );
        assert_eq!(map_dom_key("y", Modifiers::CTRL), surface(SurfaceMsg::Redo));
        assert_eq!(map_dom_key("c", Modifiers::CTRL), None);
        assert_eq!(map_dom_key("v", Modifiers::META), None);
    }

    #[test]
    fn test_altgr_characters_insert() {
        let altgr = Modifiers::CTRL | Modifiers::ALT;
        assert_eq!(map_dom_key("@", altgr), surface(SurfaceMsg::InsertChar('@')));
        assert_eq!(map_dom_key("€", altgr), surface(SurfaceMsg::InsertChar('€')));
        assert_eq!(map_dom_key("a", altgr), surface(SurfaceMsg::InsertChar('a')));
        assert_eq!(
            map_dom_key("z", Modifiers::META | Modifiers::ALT),
            surface(SurfaceMsg::Undo)
        );
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            map_dom_key("ArrowLeft", Modifiers::SHIFT),
            surface(SurfaceMsg::MoveWithSelection(MoveTarget::Left))
        );
        assert_eq!(
            map_dom_key("ArrowRight", Modifiers::ALT),
            surface(SurfaceMsg::Move(MoveTarget::WordRight))
        );
        assert_eq!(
            map_dom_key("End", Modifiers::CTRL | Modifiers::SHIFT),
            surface(SurfaceMsg::MoveWithSelection(MoveTarget::DocumentEnd))
        );
        assert_eq!(map_dom_key("Home", Modifiers::NONE), surface(SurfaceMsg::Move(MoveTarget::LineStart)));
    }

    #[test]
    fn test_unhandled_keys() {
        assert_eq!(map_dom_key("Tab", Modifiers::NONE), None);
        assert_eq!(map_dom_key("F5", Modifiers::NONE), None);
        assert_eq!(map_dom_key("Shift", Modifiers::SHIFT), None);
        assert_eq!(format!("{}", Modifiers::CTRL | Modifiers::SHIFT), "Ctrl+Shift");
    }
}
