//! Command records and the default `exec` protocol.
//!
//! A command is a record of two callbacks (`on_exec`, `on_help`) plus a name
//! and description, built with [`Command::builder`]. A record built without
//! an `on_exec` behaves as the unknown-command handler, which is also what
//! the registry falls back to for names it does not know.

use std::fmt;

use webshell_types::error::{Result, ShellError, status};
use webshell_vfs::PathKind;

use crate::interpreter::CommandRegistry;
use crate::sink::{NEWLINE, OutputSink};
use crate::state::ShellState;

/// Handler for a normal invocation: `(invocation, options, positional)`.
pub type ExecFn = Box<dyn Fn(&mut Invocation<'_>, &[String], &[String]) -> Result<i32>>;

/// Handler for `NAME --help` and `help NAME`.
pub type HelpFn = Box<dyn Fn(&mut Invocation<'_>) -> Result<i32>>;

const NO_DESCRIPTION: &str = "No description available for this command";
const NO_HELP: &str = "This command does not provide any help messages.";

/// Everything a handler can reach during one call.
pub struct Invocation<'a> {
    /// The name the command was invoked as (first argument).
    pub name: &'a str,
    pub state: &'a mut ShellState,
    pub out: &'a mut dyn OutputSink,
    pub registry: &'a CommandRegistry,
}

impl Invocation<'_> {
    /// Write one line of output.
    pub fn println(&mut self, msg: impl AsRef<str>) {
        self.out.write(msg.as_ref());
        self.out.write(NEWLINE);
    }

    /// Write text without a line terminator.
    pub fn print(&mut self, msg: impl AsRef<str>) {
        self.out.write(msg.as_ref());
    }

    pub fn clear(&mut self) {
        self.out.clear();
    }

    /// Report an error as one output line and return its exit status.
    pub fn report(&mut self, err: &ShellError) -> i32 {
        self.println(err.to_string());
        err.exit_code()
    }

    /// Borrow this invocation for a call on behalf of another command name.
    pub fn reborrow<'b>(&'b mut self, name: &'b str) -> Invocation<'b> {
        Invocation {
            name,
            state: &mut *self.state,
            out: &mut *self.out,
            registry: self.registry,
        }
    }
}

/// A registered command.
pub struct Command {
    name: String,
    description: String,
    usage: Option<String>,
    on_exec: Option<ExecFn>,
    on_help: Option<HelpFn>,
}

impl Command {
    /// Start building a command record.
    pub fn builder(name: impl Into<String>) -> CommandBuilder {
        CommandBuilder {
            command: Command {
                name: name.into(),
                description: String::new(),
                usage: None,
                on_exec: None,
                on_help: None,
            },
        }
    }

    /// The unknown-command record.
    pub fn unknown() -> Self {
        Self::builder("").build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line description for `help`.
    pub fn description(&self) -> &str {
        if self.description.is_empty() {
            NO_DESCRIPTION
        } else {
            &self.description
        }
    }

    pub fn usage(&self) -> Option<&str> {
        self.usage.as_deref()
    }

    /// Run the command with its full argument list (name included).
    ///
    /// `NAME --help` goes straight to [`Command::on_help`]. Otherwise the
    /// arguments after the name are split into options and positional
    /// arguments and passed to [`Command::on_exec`].
    pub fn exec(&self, inv: &mut Invocation<'_>, args: &[String]) -> i32 {
        let rest = args.get(1..).unwrap_or_default();
        if rest.len() == 1 && rest[0] == "--help" {
            return self.on_help(inv);
        }
        let (options, positional) = split_options(rest);
        self.on_exec(inv, &options, &positional)
    }

    /// Invoke the exec callback, converting errors into a reported line.
    pub fn on_exec(&self, inv: &mut Invocation<'_>, options: &[String], args: &[String]) -> i32 {
        let result = match &self.on_exec {
            Some(handler) => handler(inv, options, args),
            None => unknown_exec(inv, options, args),
        };
        result.unwrap_or_else(|e| inv.report(&e))
    }

    /// Invoke the help callback, converting errors into a reported line.
    pub fn on_help(&self, inv: &mut Invocation<'_>) -> i32 {
        let result = match &self.on_help {
            Some(handler) => handler(inv),
            None => self.default_help(inv),
        };
        result.unwrap_or_else(|e| inv.report(&e))
    }

    fn default_help(&self, inv: &mut Invocation<'_>) -> Result<i32> {
        match &self.usage {
            Some(usage) => {
                inv.println(format!("{}: {}", self.name, self.description()));
                inv.println(format!("Usage: {usage}"));
            },
            None => inv.println(NO_HELP),
        }
        Ok(status::SUCCESS)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("usage", &self.usage)
            .field("custom_exec", &self.on_exec.is_some())
            .field("custom_help", &self.on_help.is_some())
            .finish()
    }
}

/// Builder for [`Command`] records.
pub struct CommandBuilder {
    command: Command,
}

impl CommandBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.command.description = description.into();
        self
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.command.usage = Some(usage.into());
        self
    }

    pub fn on_exec<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut Invocation<'_>, &[String], &[String]) -> Result<i32> + 'static,
    {
        self.command.on_exec = Some(Box::new(handler));
        self
    }

    pub fn on_help<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut Invocation<'_>) -> Result<i32> + 'static,
    {
        self.command.on_help = Some(Box::new(handler));
        self
    }

    pub fn build(self) -> Command {
        self.command
    }
}

/// Split arguments into options and positional arguments by token shape.
///
/// `--name` contributes the option `name`; `-abc` contributes `a`, `b` and
/// `c`; anything else is positional.
pub fn split_options(args: &[String]) -> (Vec<String>, Vec<String>) {
    let mut options = Vec::new();
    let mut positional = Vec::new();
    for arg in args {
        if let Some(long) = arg.strip_prefix("--") {
            options.push(long.to_string());
        } else if let Some(short) = arg.strip_prefix('-') {
            options.extend(short.chars().map(String::from));
        } else {
            positional.push(arg.clone());
        }
    }
    (options, positional)
}

/// Whether a command name should be treated as a path.
fn looks_like_path(name: &str) -> bool {
    name.contains('/') || name == "." || name == ".."
}

/// Behaviour of a command nobody registered.
///
/// A bare `KEY=VALUE` assigns an environment variable. A path-like name is
/// classified against the VFS; anything else is "command not found". Both
/// special cases apply only when the name is the sole positional argument.
fn unknown_exec(inv: &mut Invocation<'_>, _options: &[String], args: &[String]) -> Result<i32> {
    let name = inv.name;
    if args.is_empty()
        && let Some((key, value)) = name.split_once('=')
        && !key.is_empty()
    {
        log::debug!("assign {key}={value:?}");
        inv.state.set_var(key, value);
        return Ok(status::SUCCESS);
    }

    if args.is_empty() && looks_like_path(name) {
        let path = inv.state.resolve(name);
        return match inv.state.classify(&path) {
            PathKind::File => Err(ShellError::Blocked(format!("{name}: Permission denied"))),
            PathKind::Directory => Err(ShellError::Blocked(format!("{name}: Is a directory"))),
            PathKind::NotFound => Err(ShellError::NotFound(format!(
                "{name}: No such file or directory"
            ))),
        };
    }

    inv.println(format!("{name}: command not found"));
    inv.println("Use command 'help' for a list of available commands.");
    Ok(status::NOT_FOUND)
}
