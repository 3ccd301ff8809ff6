//! Terminal output sink over any `io::Write`.

use std::io::Write;

use webshell_terminal::OutputSink;
use webshell_terminal::sink::CLEAR_SCREEN;

/// Writes shell output straight to a byte stream, flushing after each write.
///
/// Write failures are logged and dropped: a broken terminal must not take
/// the session down with it.
pub struct StdoutSink<W: Write> {
    writer: W,
}

impl<W: Write> StdoutSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for StdoutSink<W> {
    fn write(&mut self, text: &str) {
        if let Err(e) = self
            .writer
            .write_all(text.as_bytes())
            .and_then(|()| self.writer.flush())
        {
            log::warn!("terminal write failed: {e}");
        }
    }

    fn clear(&mut self) {
        self.write(CLEAR_SCREEN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_through() {
        let mut sink = StdoutSink::new(Vec::new());
        sink.write("hello");
        sink.write("\r\n");
        assert_eq!(sink.into_inner(), b"hello\r\n");
    }

    #[test]
    fn clear_writes_escape() {
        let mut sink = StdoutSink::new(Vec::new());
        sink.clear();
        assert_eq!(sink.into_inner(), CLEAR_SCREEN.as_bytes());
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("closed"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_errors_are_swallowed() {
        let mut sink = StdoutSink::new(Broken);
        sink.write("x");
        sink.clear();
    }
}
