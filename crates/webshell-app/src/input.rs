//! Decode a line of terminal input into editor key events.
//!
//! Recognized sequences: `ESC [ A/B/C/D` (arrows), `ESC [ H/F` and
//! `ESC [ 1~/4~` (Home/End), and DEL or BS (backspace). Other control
//! characters and unknown escape sequences are dropped.

use std::iter::Peekable;
use std::str::Chars;

use webshell_types::input::EditorKey;

const ESC: char = '\x1b';

/// Keys for one input line, always ending with [`EditorKey::Submit`].
pub fn keys_for_line(line: &str) -> Vec<EditorKey> {
    let mut keys = Vec::with_capacity(line.len() + 1);
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        let key = match ch {
            ESC => escape_sequence(&mut chars),
            '\x7f' | '\x08' => Some(EditorKey::Backspace),
            c if c.is_control() && c != '\t' => None,
            c => Some(EditorKey::Insert(c)),
        };
        keys.extend(key);
    }
    keys.push(EditorKey::Submit);
    keys
}

/// Consume the rest of an escape sequence after `ESC`.
fn escape_sequence(chars: &mut Peekable<Chars<'_>>) -> Option<EditorKey> {
    // `ESC x` (Alt-modified key) is dropped together with `x`.
    if chars.next() != Some('[') {
        return None;
    }
    let mut params = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit() || *c == ';') {
        params.push(c);
    }
    let last = chars.next()?;
    match (params.as_str(), last) {
        ("", 'A') => Some(EditorKey::HistoryUp),
        ("", 'B') => Some(EditorKey::HistoryDown),
        ("", 'C') => Some(EditorKey::Right),
        ("", 'D') => Some(EditorKey::Left),
        ("", 'H') | ("1", '~') | ("7", '~') => Some(EditorKey::Home),
        ("", 'F') | ("4", '~') | ("8", '~') => Some(EditorKey::End),
        _ => {
            log::trace!("ignoring escape sequence ESC[{params}{last}");
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text() {
        assert_eq!(
            keys_for_line("ls"),
            vec![
                EditorKey::Insert('l'),
                EditorKey::Insert('s'),
                EditorKey::Submit
            ]
        );
    }

    #[test]
    fn empty_line_is_submit() {
        assert_eq!(keys_for_line(""), vec![EditorKey::Submit]);
    }

    #[test]
    fn arrows() {
        assert_eq!(
            keys_for_line("\x1b[A\x1b[B\x1b[C\x1b[D"),
            vec![
                EditorKey::HistoryUp,
                EditorKey::HistoryDown,
                EditorKey::Right,
                EditorKey::Left,
                EditorKey::Submit,
            ]
        );
    }

    #[test]
    fn home_end_variants() {
        let keys = keys_for_line("\x1b[H\x1b[F\x1b[1~\x1b[4~");
        assert_eq!(
            keys,
            vec![
                EditorKey::Home,
                EditorKey::End,
                EditorKey::Home,
                EditorKey::End,
                EditorKey::Submit,
            ]
        );
    }

    #[test]
    fn backspace_bytes() {
        let keys = keys_for_line("ab\x7f\x08");
        assert_eq!(keys[2], EditorKey::Backspace);
        assert_eq!(keys[3], EditorKey::Backspace);
    }

    #[test]
    fn unknown_sequences_dropped() {
        assert_eq!(
            keys_for_line("\x1b[5~x\x1bq\x01"),
            vec![EditorKey::Insert('x'), EditorKey::Submit]
        );
    }

    #[test]
    fn truncated_escape_at_end() {
        assert_eq!(keys_for_line("a\x1b["), vec![EditorKey::Insert('a'), EditorKey::Submit]);
    }

    #[test]
    fn unicode_inserts() {
        assert_eq!(keys_for_line("é")[0], EditorKey::Insert('é'));
    }
}
