//! Interactive line editor.
//!
//! The editor owns the input buffer, the cursor and the history list. Front
//! ends feed it logical [`EditorKey`] events and raw paste data; on submit it
//! tokenizes the line and hands complete lines to the registry.

use std::time::{Duration, Instant};

use webshell_types::config::ShellConfig;
use webshell_types::input::EditorKey;

use crate::interpreter::CommandRegistry;
use crate::sink::{NEWLINE, OutputSink};
use crate::state::ShellState;
use crate::tokenizer::tokenize;

/// Erase the current terminal line and return the carriage.
const CLEAR_LINE: &str = "\x1b[2K\r";
const CURSOR_LEFT: &str = "\x1b[D";
const CURSOR_RIGHT: &str = "\x1b[C";

/// Where the editor is in its prompt cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    /// A fresh prompt is showing after startup or a dispatched line.
    IdlePrompt,
    /// Input is being collected (including after an empty submit).
    Editing,
    /// The session ended; every event is ignored.
    Closed,
}

/// Character buffer with a cursor (`0 <= cursor <= len`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    chars: Vec<char>,
    cursor: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Insert at the cursor and advance past the inserted text.
    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.chars.insert(self.cursor, ch);
            self.cursor += 1;
        }
    }

    /// Remove the character before the cursor. Returns false at column 0.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.chars.remove(self.cursor);
        true
    }

    pub fn left(&mut self) -> bool {
        self.move_to(self.cursor.saturating_sub(1))
    }

    pub fn right(&mut self) -> bool {
        self.move_to((self.cursor + 1).min(self.chars.len()))
    }

    pub fn home(&mut self) -> bool {
        self.move_to(0)
    }

    pub fn end(&mut self) -> bool {
        self.move_to(self.chars.len())
    }

    /// Replace the contents and put the cursor at the end.
    pub fn set(&mut self, text: &str) {
        self.chars = text.chars().collect();
        self.cursor = self.chars.len();
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }

    fn move_to(&mut self, pos: usize) -> bool {
        let moved = pos != self.cursor;
        self.cursor = pos;
        moved
    }
}

/// Submitted lines plus a navigation cursor.
///
/// `cursor == entries.len()` means a new line is being edited. Whatever was
/// in the buffer when navigation left that position is kept as a draft and
/// handed back when navigation returns to it.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
    draft: Option<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line and reset navigation to the end.
    pub fn push(&mut self, line: &str) {
        self.entries.push(line.to_string());
        self.cursor = self.entries.len();
        self.draft = None;
    }

    /// Step back one entry. `current` is saved as the draft when leaving the
    /// end. Returns `None` at the first entry.
    pub fn up(&mut self, current: &str) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        if self.cursor == self.entries.len() {
            self.draft = Some(current.to_string());
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward one entry, or back to the draft. Returns `None` at the end.
    pub fn down(&mut self) -> Option<String> {
        if self.cursor >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        if self.cursor == self.entries.len() {
            Some(self.draft.take().unwrap_or_default())
        } else {
            Some(self.entries[self.cursor].clone())
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

/// The interaction loop of one session.
#[derive(Debug)]
pub struct LineEditor {
    prompt: String,
    continuation_prompt: String,
    paste_guard: Duration,
    buffer: LineBuffer,
    /// Earlier physical lines of an incomplete logical line, newline-terminated.
    continuation: String,
    history: History,
    state: EditorState,
    last_key: Option<Instant>,
}

impl LineEditor {
    pub fn new(config: &ShellConfig) -> Self {
        Self {
            prompt: config.prompt.clone(),
            continuation_prompt: config.continuation_prompt.clone(),
            paste_guard: Duration::from_millis(config.paste_guard_ms),
            buffer: LineBuffer::new(),
            continuation: String::new(),
            history: History::new(),
            state: EditorState::IdlePrompt,
            last_key: None,
        }
    }

    /// Draw the first prompt.
    pub fn start(&mut self, out: &mut dyn OutputSink) {
        self.render(out);
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == EditorState::Closed
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Text collected so far for an incomplete line.
    pub fn continuation(&self) -> &str {
        &self.continuation
    }

    /// Handle one key event.
    pub fn handle_key(
        &mut self,
        key: EditorKey,
        now: Instant,
        shell: &mut ShellState,
        registry: &CommandRegistry,
        out: &mut dyn OutputSink,
    ) {
        if self.is_closed() {
            return;
        }
        self.last_key = Some(now);
        match key {
            EditorKey::Submit => {
                self.submit(shell, registry, out);
                return;
            },
            EditorKey::Backspace => {
                if self.buffer.backspace() {
                    self.render(out);
                }
            },
            EditorKey::Left => {
                if self.buffer.left() {
                    out.write(CURSOR_LEFT);
                }
            },
            EditorKey::Right => {
                if self.buffer.right() {
                    out.write(CURSOR_RIGHT);
                }
            },
            EditorKey::Home => {
                if self.buffer.home() {
                    self.render(out);
                }
            },
            EditorKey::End => {
                if self.buffer.end() {
                    self.render(out);
                }
            },
            EditorKey::HistoryUp => {
                let current = self.buffer.text();
                if let Some(line) = self.history.up(&current) {
                    self.buffer.set(line);
                    self.state = EditorState::Editing;
                    self.render(out);
                }
            },
            EditorKey::HistoryDown => {
                if let Some(line) = self.history.down() {
                    self.buffer.set(&line);
                    self.state = EditorState::Editing;
                    self.render(out);
                }
            },
            EditorKey::Insert(ch) => {
                let mut tmp = [0u8; 4];
                self.buffer.insert_str(ch.encode_utf8(&mut tmp));
                self.render(out);
            },
        }
        if key.is_edit() {
            self.state = EditorState::Editing;
        }
    }

    /// Handle raw input data (a paste). Returns whether it was accepted.
    ///
    /// Data arriving within the paste guard of the last key event is the
    /// echo of that key and is dropped.
    pub fn handle_data(&mut self, data: &str, now: Instant, out: &mut dyn OutputSink) -> bool {
        if self.is_closed() {
            return false;
        }
        if let Some(last) = self.last_key
            && now.saturating_duration_since(last) < self.paste_guard
        {
            log::trace!("dropping data event inside paste guard: {data:?}");
            return false;
        }
        self.buffer.insert_str(data);
        self.state = EditorState::Editing;
        self.render(out);
        true
    }

    fn submit(&mut self, shell: &mut ShellState, registry: &CommandRegistry, out: &mut dyn OutputSink) {
        out.write(NEWLINE);
        let line = self.buffer.text();
        self.buffer.clear();
        if line.is_empty() && self.continuation.is_empty() {
            self.state = EditorState::Editing;
            self.render(out);
            return;
        }

        let full = std::mem::take(&mut self.continuation) + &line;
        let parsed = tokenize(&full, &shell.env);
        if parsed.incomplete {
            log::debug!("incomplete input, continuing");
            self.continuation = full + "\n";
            self.state = EditorState::Editing;
            self.render(out);
            return;
        }

        self.history.push(&full);
        let code = registry.dispatch(shell, out, &parsed.arguments);
        shell.record_exit_status(code);
        if shell.is_closed() {
            log::debug!("editor closed");
            self.state = EditorState::Closed;
            return;
        }
        self.state = EditorState::IdlePrompt;
        self.render(out);
    }

    /// Redraw the prompt line and place the terminal cursor.
    fn render(&self, out: &mut dyn OutputSink) {
        if self.is_closed() {
            return;
        }
        out.write(CLEAR_LINE);
        if self.continuation.is_empty() {
            out.write(&self.prompt);
        } else {
            out.write(&self.continuation_prompt);
        }
        out.write(&self.buffer.text());
        for _ in self.buffer.cursor()..self.buffer.len() {
            out.write(CURSOR_LEFT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::register_builtins;
    use crate::sink::BufferSink;

    struct Session {
        editor: LineEditor,
        shell: ShellState,
        registry: CommandRegistry,
        out: BufferSink,
        now: Instant,
    }

    impl Session {
        fn new() -> Self {
            let config = ShellConfig {
                prompt: "$ ".to_string(),
                ..ShellConfig::default()
            };
            let mut registry = CommandRegistry::new();
            register_builtins(&mut registry);
            let mut editor = LineEditor::new(&config);
            let mut out = BufferSink::new();
            editor.start(&mut out);
            Self {
                editor,
                shell: ShellState::from_config(&config).unwrap(),
                registry,
                out,
                now: Instant::now(),
            }
        }

        fn key(&mut self, key: EditorKey) {
            self.now += Duration::from_millis(100);
            self.editor
                .handle_key(key, self.now, &mut self.shell, &self.registry, &mut self.out);
        }

        fn type_str(&mut self, text: &str) {
            for ch in text.chars() {
                self.key(EditorKey::Insert(ch));
            }
        }

        fn submit(&mut self, text: &str) {
            self.type_str(text);
            self.key(EditorKey::Submit);
        }
    }

    #[test]
    fn start_draws_prompt() {
        let s = Session::new();
        assert_eq!(s.out.text, "\x1b[2K\r$ ");
        assert_eq!(s.editor.state(), EditorState::IdlePrompt);
    }

    #[test]
    fn typing_renders_line() {
        let mut s = Session::new();
        s.out.take();
        s.type_str("ab");
        assert_eq!(s.editor.buffer().text(), "ab");
        assert_eq!(s.editor.buffer().cursor(), 2);
        assert!(s.out.text.ends_with("\x1b[2K\r$ ab"));
        assert_eq!(s.editor.state(), EditorState::Editing);
    }

    #[test]
    fn insert_at_cursor_and_render_moves_back() {
        let mut s = Session::new();
        s.type_str("ac");
        s.key(EditorKey::Left);
        s.out.take();
        s.key(EditorKey::Insert('b'));
        assert_eq!(s.editor.buffer().text(), "abc");
        assert_eq!(s.editor.buffer().cursor(), 2);
        assert_eq!(s.out.text, "\x1b[2K\r$ abc\x1b[D");
    }

    #[test]
    fn backspace_removes_before_cursor() {
        let mut s = Session::new();
        s.type_str("abc");
        s.key(EditorKey::Left);
        s.key(EditorKey::Backspace);
        assert_eq!(s.editor.buffer().text(), "ac");
        assert_eq!(s.editor.buffer().cursor(), 1);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut s = Session::new();
        s.type_str("ab");
        s.key(EditorKey::Home);
        s.out.take();
        s.key(EditorKey::Backspace);
        assert_eq!(s.editor.buffer().text(), "ab");
        assert!(s.out.text.is_empty());
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut s = Session::new();
        s.type_str("ab");
        for _ in 0..5 {
            s.key(EditorKey::Right);
        }
        assert_eq!(s.editor.buffer().cursor(), 2);
        for _ in 0..5 {
            s.key(EditorKey::Left);
        }
        assert_eq!(s.editor.buffer().cursor(), 0);
        s.key(EditorKey::End);
        assert_eq!(s.editor.buffer().cursor(), 2);
    }

    #[test]
    fn arrow_moves_write_escape_only() {
        let mut s = Session::new();
        s.type_str("ab");
        s.out.take();
        s.key(EditorKey::Left);
        s.key(EditorKey::Right);
        assert_eq!(s.out.text, "\x1b[D\x1b[C");
    }

    #[test]
    fn empty_submit_redraws_prompt() {
        let mut s = Session::new();
        s.out.take();
        s.key(EditorKey::Submit);
        assert_eq!(s.out.text, "\r\n\x1b[2K\r$ ");
        assert!(s.editor.history().entries().is_empty());
        assert_eq!(s.shell.last_exit_status, 0);
        assert_eq!(s.editor.state(), EditorState::Editing);
        assert_eq!(s.editor.buffer().cursor(), 0);
    }

    #[test]
    fn submit_dispatches_and_records_status() {
        let mut s = Session::new();
        s.submit("echo hi");
        assert!(s.out.text.contains("hi\r\n"));
        assert_eq!(s.shell.last_exit_status, 0);
        s.submit("nope");
        assert_eq!(s.shell.last_exit_status, 127);
        assert_eq!(s.shell.var("?"), Some("127"));
        assert_eq!(s.editor.buffer().cursor(), 0);
        assert_eq!(s.editor.state(), EditorState::IdlePrompt);
    }

    #[test]
    fn exit_status_is_expandable() {
        let mut s = Session::new();
        s.submit("nope");
        s.out.take();
        s.submit("echo $?");
        assert!(s.out.text.contains("127\r\n"));
    }

    #[test]
    fn submissions_append_history_in_order() {
        let mut s = Session::new();
        let lines = ["echo one", "pwd", "FOO=bar", "nope"];
        for line in lines {
            s.submit(line);
            s.key(EditorKey::Submit);
        }
        assert_eq!(s.editor.history().entries(), lines);
        assert_eq!(s.editor.history().cursor(), lines.len());
    }

    #[test]
    fn history_up_down_restores_draft() {
        let mut s = Session::new();
        for line in ["a", "b", "c"] {
            s.submit(line);
        }
        let before: Vec<String> = s.editor.history().entries().to_vec();
        s.type_str("draft");
        for n in 1..=5 {
            for _ in 0..n {
                s.key(EditorKey::HistoryUp);
            }
            for _ in 0..n {
                s.key(EditorKey::HistoryDown);
            }
            assert_eq!(s.editor.buffer().text(), "draft", "after {n} steps");
        }
        assert_eq!(s.editor.history().entries(), before);
    }

    #[test]
    fn history_navigation_loads_entries() {
        let mut s = Session::new();
        s.submit("echo a");
        s.submit("echo b");
        s.key(EditorKey::HistoryUp);
        assert_eq!(s.editor.buffer().text(), "echo b");
        assert_eq!(s.editor.buffer().cursor(), 6);
        s.key(EditorKey::HistoryUp);
        assert_eq!(s.editor.buffer().text(), "echo a");
        // Up at the first entry is a no-op.
        s.key(EditorKey::HistoryUp);
        assert_eq!(s.editor.buffer().text(), "echo a");
        s.key(EditorKey::HistoryDown);
        s.key(EditorKey::HistoryDown);
        assert_eq!(s.editor.buffer().text(), "");
        // Down at the end is a no-op.
        s.out.take();
        s.key(EditorKey::HistoryDown);
        assert!(s.out.text.is_empty());
    }

    #[test]
    fn editing_recalled_line_leaves_history_alone() {
        let mut s = Session::new();
        s.submit("echo a");
        s.key(EditorKey::HistoryUp);
        s.key(EditorKey::Backspace);
        s.type_str("z");
        s.key(EditorKey::Submit);
        assert_eq!(s.editor.history().entries(), ["echo a", "echo z"]);
    }

    #[test]
    fn unterminated_quote_continues() {
        let mut s = Session::new();
        s.submit("echo \"abc");
        assert_eq!(s.editor.continuation(), "echo \"abc\n");
        assert!(s.editor.history().entries().is_empty());
        assert!(s.out.text.ends_with("\x1b[2K\r> "));

        s.out.take();
        s.submit("def\"");
        assert_eq!(s.editor.continuation(), "");
        assert_eq!(s.editor.history().entries(), ["echo \"abc\ndef\""]);
        assert!(s.out.text.contains("abc\ndef\r\n"));
    }

    #[test]
    fn incomplete_line_keeps_exit_status() {
        let mut s = Session::new();
        s.shell.record_exit_status(42);
        s.type_str("echo \"abc");
        s.out.take();
        s.key(EditorKey::Submit);
        assert_eq!(s.shell.last_exit_status, 42);
        assert_eq!(s.shell.var("?"), Some("42"));
        // Only the newline and the continuation prompt; nothing ran.
        assert_eq!(s.out.text, "\r\n\x1b[2K\r> ");
        assert!(s.editor.history().entries().is_empty());
        assert_eq!(s.editor.buffer().cursor(), 0);
    }

    #[test]
    fn trailing_backslash_continues() {
        let mut s = Session::new();
        s.submit("echo a\\");
        assert_eq!(s.editor.continuation(), "echo a\\\n");
        s.submit("b");
        assert!(s.out.text.contains("a\nb\r\n"));
    }

    #[test]
    fn exit_closes_editor() {
        let mut s = Session::new();
        s.submit("exit");
        assert!(s.editor.is_closed());
        assert!(s.shell.is_closed());
        assert!(s.out.text.is_empty());

        s.type_str("echo hi");
        s.key(EditorKey::Submit);
        assert!(s.out.text.is_empty());
        assert!(s.editor.history().entries().len() == 1);
        assert!(!s.editor.handle_data("x", s.now + Duration::from_secs(1), &mut s.out));
    }

    #[test]
    fn paste_inserts_at_cursor() {
        let mut s = Session::new();
        s.type_str("ad");
        s.key(EditorKey::Left);
        let later = s.now + Duration::from_millis(500);
        assert!(s.editor.handle_data("bc", later, &mut s.out));
        assert_eq!(s.editor.buffer().text(), "abcd");
        assert_eq!(s.editor.buffer().cursor(), 3);
    }

    #[test]
    fn data_inside_guard_is_dropped() {
        let mut s = Session::new();
        s.key(EditorKey::Insert('a'));
        let echo = s.now + Duration::from_millis(5);
        assert!(!s.editor.handle_data("a", echo, &mut s.out));
        assert_eq!(s.editor.buffer().text(), "a");
    }

    #[test]
    fn data_before_any_key_is_accepted() {
        let mut s = Session::new();
        assert!(s.editor.handle_data("ls", Instant::now(), &mut s.out));
        assert_eq!(s.editor.buffer().text(), "ls");
    }

    #[test]
    fn clear_redraws_prompt_after() {
        let mut s = Session::new();
        s.submit("clear");
        assert_eq!(s.out.clears, 1);
        assert_eq!(s.out.text, "\x1b[2K\r$ ");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn up_then_down_restores_buffer(
                lines in proptest::collection::vec("[a-z]{1,6}", 0..6),
                draft in "[a-z ]{0,8}",
                n in 0usize..10,
            ) {
                prop_assume!(!lines.iter().any(|l| l == "exit"));
                let mut s = Session::new();
                for line in &lines {
                    s.submit(line);
                }
                s.type_str(&draft);
                for _ in 0..n {
                    s.key(EditorKey::HistoryUp);
                }
                for _ in 0..n {
                    s.key(EditorKey::HistoryDown);
                }
                prop_assert_eq!(s.editor.buffer().text(), draft);
                prop_assert_eq!(s.editor.history().entries(), lines.as_slice());
            }

            #[test]
            fn cursor_never_leaves_buffer(keys in proptest::collection::vec(0u8..6, 0..40)) {
                let mut s = Session::new();
                for k in keys {
                    let key = match k {
                        0 => EditorKey::Left,
                        1 => EditorKey::Right,
                        2 => EditorKey::Home,
                        3 => EditorKey::End,
                        4 => EditorKey::Backspace,
                        _ => EditorKey::Insert('x'),
                    };
                    s.key(key);
                    let buf = s.editor.buffer();
                    prop_assert!(buf.cursor() <= buf.len());
                }
            }
        }
    }
}
