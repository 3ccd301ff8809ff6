//! Line tokenizer: quoting, escapes, `$VAR` and `~` expansion.
//!
//! Quoting is a mode toggle rather than a delimiter: `"` and `'` both flip
//! the same flag, and the quote characters themselves are never emitted.
//! A line that ends inside a quote or right after a backslash is reported as
//! incomplete so the caller can keep collecting input.

use std::collections::HashMap;

/// Result of tokenizing one (possibly continued) input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLine {
    /// Arguments in order, command name first.
    pub arguments: Vec<String>,
    /// An open quote or trailing escape remains at end of input.
    pub incomplete: bool,
}

/// Tokenize `raw` against the given environment.
pub fn tokenize(raw: &str, env: &HashMap<String, String>) -> ParsedLine {
    let mut scanner = Scanner::new(env);
    for ch in raw.chars() {
        scanner.feed(ch);
    }
    let parsed = scanner.finish();
    log::trace!("tokenize {raw:?} -> {parsed:?}");
    parsed
}

struct Scanner<'a> {
    env: &'a HashMap<String, String>,
    args: Vec<String>,
    current: String,
    escaped: bool,
    quoted: bool,
    pending_variable: bool,
    pending_home: bool,
}

impl<'a> Scanner<'a> {
    fn new(env: &'a HashMap<String, String>) -> Self {
        Self {
            env,
            args: Vec::new(),
            current: String::new(),
            escaped: false,
            quoted: false,
            pending_variable: false,
            pending_home: false,
        }
    }

    fn feed(&mut self, ch: char) {
        if self.escaped {
            self.current.push(ch);
            self.escaped = false;
            return;
        }
        // Control characters and space separate tokens outside quotes.
        if !self.quoted && ch <= ' ' {
            self.flush();
            return;
        }
        match ch {
            '\\' => self.escaped = true,
            '"' | '\'' => self.quoted = !self.quoted,
            '$' => self.pending_variable = true,
            '~' if !self.quoted && !self.pending_home => self.pending_home = true,
            _ => self.current.push(ch),
        }
    }

    /// End the current token, applying pending expansions.
    fn flush(&mut self) {
        if !self.current.is_empty() {
            let mut token = std::mem::take(&mut self.current);
            if self.pending_variable {
                token = self.variable(&token);
            }
            if self.pending_home {
                token.insert_str(0, self.home());
            }
            self.args.push(token);
        } else if self.pending_variable {
            self.args.push("$".to_string());
        } else if self.pending_home {
            let home = self.home().to_string();
            self.args.push(home);
        }
        self.pending_variable = false;
        self.pending_home = false;
    }

    fn finish(mut self) -> ParsedLine {
        let incomplete = self.quoted || self.escaped;
        self.flush();
        ParsedLine {
            arguments: self.args,
            incomplete,
        }
    }

    fn variable(&self, name: &str) -> String {
        self.env.get(name).cloned().unwrap_or_default()
    }

    fn home(&self) -> &'a str {
        self.env.get("HOME").map_or("/", String::as_str)
    }
}
