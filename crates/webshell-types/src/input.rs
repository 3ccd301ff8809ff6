//! Logical editor input events.
//!
//! Every front end maps its native keyboard input to these enums. The line
//! editor never sees raw key codes or escape sequences.

use serde::{Deserialize, Serialize};

/// A single logical key event delivered to the line editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditorKey {
    /// Submit the current line (Enter / Return).
    Submit,
    /// Delete the character before the cursor.
    Backspace,
    /// Move the cursor one character left.
    Left,
    /// Move the cursor one character right.
    Right,
    /// Move the cursor to the start of the line.
    Home,
    /// Move the cursor to the end of the line.
    End,
    /// Load the previous history entry.
    HistoryUp,
    /// Load the next history entry (or the draft past the end).
    HistoryDown,
    /// Insert a printable character at the cursor.
    Insert(char),
}

impl EditorKey {
    /// Whether this key changes the buffer contents (not just the cursor).
    pub fn is_edit(self) -> bool {
        matches!(self, EditorKey::Backspace | EditorKey::Insert(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_carries_char() {
        let k = EditorKey::Insert('x');
        assert_eq!(k, EditorKey::Insert('x'));
        assert_ne!(k, EditorKey::Insert('y'));
    }

    #[test]
    fn edit_keys() {
        assert!(EditorKey::Backspace.is_edit());
        assert!(EditorKey::Insert('a').is_edit());
        assert!(!EditorKey::Left.is_edit());
        assert!(!EditorKey::Submit.is_edit());
        assert!(!EditorKey::HistoryUp.is_edit());
    }

    #[test]
    fn keys_are_hashable() {
        use std::collections::HashSet;
        let set: HashSet<EditorKey> = [
            EditorKey::Submit,
            EditorKey::Backspace,
            EditorKey::Left,
            EditorKey::Right,
            EditorKey::Home,
            EditorKey::End,
            EditorKey::HistoryUp,
            EditorKey::HistoryDown,
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 8);
    }

    #[test]
    fn keys_round_trip_through_toml_value() {
        #[derive(Serialize, Deserialize)]
        struct Binding {
            key: EditorKey,
        }
        let text = toml::to_string(&Binding {
            key: EditorKey::HistoryUp,
        })
        .unwrap();
        let back: Binding = toml::from_str(&text).unwrap();
        assert_eq!(back.key, EditorKey::HistoryUp);
    }
}
