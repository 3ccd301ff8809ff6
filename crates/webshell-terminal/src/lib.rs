//! Command interpreter and line editor.
//!
//! The terminal is a registry-based dispatch system. Commands are records of
//! callbacks registered by name; the editor tokenizes submitted lines and the
//! registry resolves and runs them against the session's [`ShellState`].

pub mod command;
mod commands;
pub mod editor;
mod file_commands;
mod interpreter;
pub mod sink;
pub mod state;
pub mod tokenizer;

/// A command record and its builder.
pub use command::{Command, CommandBuilder, Invocation};
/// Register every built-in command into a registry.
pub use commands::register_builtins;
/// The line editor and its prompt-cycle state.
pub use editor::{EditorState, LineEditor};
/// Registry of available commands with dispatch.
pub use interpreter::CommandRegistry;
/// Where command and prompt output goes.
pub use sink::{BufferSink, OutputSink};
/// Mutable context shared by every command.
pub use state::ShellState;
/// Line tokenizer.
pub use tokenizer::{ParsedLine, tokenize};
