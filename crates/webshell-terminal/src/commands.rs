//! Session built-ins: help, clear, exit, echo, env.

use webshell_types::error::{Result, ShellError, status};

use crate::command::Command;
use crate::file_commands;
use crate::interpreter::CommandRegistry;

/// Register every built-in command into a registry.
pub fn register_builtins(reg: &mut CommandRegistry) {
    reg.register(file_commands::cd());
    reg.register(clear());
    reg.register(file_commands::dir());
    reg.register(echo());
    reg.register(env());
    reg.register(exit());
    reg.register(help());
    reg.register(file_commands::ls());
    reg.register(file_commands::mkdir());
    reg.register(file_commands::pwd());
    reg.register(file_commands::touch());
}

/// Fail with `NAME: invalid option 'x'` on the first option, if any.
pub(crate) fn reject_options(name: &str, options: &[String]) -> Result<()> {
    match options.first() {
        Some(opt) => Err(ShellError::Usage(format!("{name}: invalid option '{opt}'"))),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

fn help() -> Command {
    Command::builder("help")
        .description("get available commands")
        .usage("help [command]")
        .on_exec(|inv, options, args| {
            reject_options("help", options)?;
            match args {
                [] => {
                    inv.println("Available commands: ");
                    let registry = inv.registry;
                    for cmd in registry.commands() {
                        inv.println(format!("\t{}: {}", cmd.name(), cmd.description()));
                    }
                    inv.println("Try 'help + command' for more detailed informations.");
                    Ok(status::SUCCESS)
                },
                [name] => {
                    let registry = inv.registry;
                    let cmd = registry.lookup(name);
                    Ok(cmd.on_help(&mut inv.reborrow(name)))
                },
                _ => Err(ShellError::Usage("Invalid options".into())),
            }
        })
        .build()
}

// ---------------------------------------------------------------------------
// clear / exit
// ---------------------------------------------------------------------------

fn clear() -> Command {
    Command::builder("clear")
        .description("clear terminal screen")
        .usage("clear")
        .on_exec(|inv, options, _| {
            reject_options("clear", options)?;
            inv.clear();
            Ok(status::SUCCESS)
        })
        .build()
}

fn exit() -> Command {
    Command::builder("exit")
        .description("exit current session")
        .usage("exit")
        .on_exec(|inv, options, _| {
            if let Some(opt) = options.first() {
                return Err(ShellError::Usage(format!("Invalid option: {opt}")));
            }
            log::info!("session closed by exit");
            inv.state.request_close();
            inv.clear();
            Ok(status::SUCCESS)
        })
        .build()
}

// ---------------------------------------------------------------------------
// echo / env
// ---------------------------------------------------------------------------

fn echo() -> Command {
    Command::builder("echo")
        .description("display a line of text")
        .usage("echo [-n] [text...]")
        .on_exec(|inv, options, args| {
            let mut newline = true;
            for opt in options {
                match opt.as_str() {
                    "n" => newline = false,
                    other => {
                        return Err(ShellError::Usage(format!("echo: invalid option '{other}'")));
                    },
                }
            }
            let text = args.join(" ");
            if newline {
                inv.println(text);
            } else {
                inv.print(text);
            }
            Ok(status::SUCCESS)
        })
        .build()
}

fn env() -> Command {
    Command::builder("env")
        .description("print environment variables")
        .usage("env")
        .on_exec(|inv, options, _| {
            reject_options("env", options)?;
            let mut vars: Vec<(String, String)> = inv
                .state
                .env
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            vars.sort();
            for (key, value) in vars {
                inv.println(format!("{key}={value}"));
            }
            Ok(status::SUCCESS)
        })
        .build()
}
