//! Output sink the shell writes through.
//!
//! The core never rasterizes text; it hands strings (with terminal escape
//! sequences) to whatever front end implements [`OutputSink`].

/// Line terminator written after every output line.
pub const NEWLINE: &str = "\r\n";

/// Escape sequence that clears the whole screen and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[1;1H";

/// Destination for terminal output.
pub trait OutputSink {
    /// Write raw text (may contain escape sequences).
    fn write(&mut self, text: &str);

    /// Clear the visible screen.
    fn clear(&mut self);
}

/// Sink that records everything in memory.
#[derive(Debug, Default, Clone)]
pub struct BufferSink {
    /// Everything written since the last [`BufferSink::take`].
    pub text: String,
    /// Number of `clear()` calls received.
    pub clears: usize,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return and reset the recorded text.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    /// Recorded text split into terminal lines.
    pub fn lines(&self) -> Vec<&str> {
        self.text
            .split(NEWLINE)
            .filter(|l| !l.is_empty())
            .collect()
    }
}

impl OutputSink for BufferSink {
    fn write(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn clear(&mut self) {
        self.text.clear();
        self.clears += 1;
    }
}
