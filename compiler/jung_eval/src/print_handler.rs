//! Destination for `print` output.
//!
//! - `Stdout`: the default for the CLI
//! - `Buffer`: captured output for embedding hosts and tests
//! - `Silent`: discards everything
//!
//! Enum dispatch rather than a trait object; `print` is a hot path.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

/// Writes to stdout, flushing after every line so output interleaves
/// correctly with the REPL prompt.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    pub fn println(&self, msg: &str) {
        let mut out = std::io::stdout().lock();
        // A closed stdout is not a script error.
        let _ = writeln!(out, "{msg}");
        let _ = out.flush();
    }

    pub fn print(&self, msg: &str) {
        let mut out = std::io::stdout().lock();
        let _ = write!(out, "{msg}");
        let _ = out.flush();
    }
}

/// Captures output in memory.
#[derive(Default)]
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        BufferPrintHandler::default()
    }

    pub fn println(&self, msg: &str) {
        let mut buf = self.buffer.lock();
        buf.push_str(msg);
        buf.push('\n');
    }

    pub fn print(&self, msg: &str) {
        self.buffer.lock().push_str(msg);
    }

    pub fn get_output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

pub enum PrintHandlerImpl {
    Stdout(StdoutPrintHandler),
    Buffer(BufferPrintHandler),
    Silent,
}

impl PrintHandlerImpl {
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.println(msg),
            Self::Buffer(h) => h.println(msg),
            Self::Silent => {}
        }
    }

    pub fn print(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.print(msg),
            Self::Buffer(h) => h.print(msg),
            Self::Silent => {}
        }
    }

    /// Captured output; empty for handlers that don't capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_output(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

/// Print handler shared between an interpreter and its host.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn buffer_handler_println_appends_newline() {
        let handler = buffer_handler();
        handler.println("hello");
        handler.print("a");
        handler.print("b");
        assert_eq!(handler.get_output(), "hello\nab");
    }

    #[test]
    fn buffer_handler_clear_empties_buffer() {
        let handler = buffer_handler();
        handler.println("hello");
        handler.clear();
        assert!(handler.get_output().is_empty());
    }

    #[test]
    fn silent_handler_discards_output() {
        let handler = silent_handler();
        handler.println("hello");
        assert_eq!(handler.get_output(), "");
    }

    #[test]
    fn buffer_handler_is_shared_across_threads() {
        let handler = buffer_handler();
        let writer = Arc::clone(&handler);
        let joined = std::thread::spawn(move || {
            for _ in 0..50 {
                writer.println("a");
            }
        })
        .join();
        assert!(joined.is_ok());
        assert_eq!(handler.get_output().lines().count(), 50);
    }
}
