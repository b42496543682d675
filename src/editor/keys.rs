//! Keyboard input as the editor sees it

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Tab,
    Escape,
    ArrowUp,
    ArrowDown,
    Delete,
    Backspace,
    /// A key producing a single printable character
    Character(char),
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Enter" => Key::Enter,
            "Tab" => Key::Tab,
            "Escape" | "Esc" => Key::Escape,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "Delete" | "Del" => Key::Delete,
            "Backspace" => Key::Backspace,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Key::Character(ch),
                    _ => Key::Other,
                }
            }
        }
    }

    pub fn is_deletion(self) -> bool {
        matches!(self, Key::Delete | Key::Backspace)
    }
}

/// What the host should do with the native key event
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum KeyOutcome {
    /// The editor acted on the key; suppress the host default
    Handled,
    /// Let the host perform its default behavior
    Default,
}

impl KeyOutcome {
    pub fn prevent_default(self) -> bool {
        self == KeyOutcome::Handled
    }
}
