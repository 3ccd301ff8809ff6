//! Command registry and dispatch.
//!
//! Lookup is by exact name and the first registered match wins, so the same
//! name may be registered twice (an alias registered later never shadows the
//! original). Names nobody registered resolve to the unknown-command record.

use webshell_types::error::status;

use crate::command::{Command, Invocation};
use crate::sink::OutputSink;
use crate::state::ShellState;

/// Registry of available commands with dispatch.
#[derive(Debug)]
pub struct CommandRegistry {
    commands: Vec<Command>,
    fallback: Command,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            fallback: Command::unknown(),
        }
    }

    /// Register a command. Duplicates are kept; the first one wins lookup.
    pub fn register(&mut self, cmd: Command) {
        self.commands.push(cmd);
    }

    /// Find a registered command by exact name.
    pub fn find(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name() == name)
    }

    /// Resolve a name to its command, or to the unknown-command record.
    pub fn lookup(&self, name: &str) -> &Command {
        self.find(name).unwrap_or(&self.fallback)
    }

    /// All registered commands in registration order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Run one parsed line and return its exit status.
    ///
    /// `args[0]` is the command name. An empty argument list does nothing.
    pub fn dispatch(
        &self,
        state: &mut ShellState,
        out: &mut dyn OutputSink,
        args: &[String],
    ) -> i32 {
        let Some(name) = args.first() else {
            return status::SUCCESS;
        };
        let cmd = self.lookup(name);
        log::debug!(
            "dispatch {name:?} ({} args, registered: {})",
            args.len() - 1,
            self.find(name).is_some()
        );
        let mut inv = Invocation {
            name,
            state,
            out,
            registry: self,
        };
        let code = cmd.exec(&mut inv, args);
        log::debug!("{name:?} exited with {code}");
        code
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
