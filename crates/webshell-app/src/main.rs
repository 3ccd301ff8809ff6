//! WebShell terminal entry point.
//!
//! Runs one shell session on the controlling terminal. Every line read from
//! standard input is decoded into editor key events (arrow and Home/End
//! escape sequences included) and ends with a submit. The session ends on
//! `exit` or end of input.
//!
//! The configuration path comes from the first CLI argument or the
//! `WEBSHELL_CONFIG` environment variable.

mod input;
mod render;

use std::io::BufRead;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use render::StdoutSink;
use webshell_terminal::{CommandRegistry, LineEditor, ShellState, register_builtins};
use webshell_types::config::ShellConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("WEBSHELL_CONFIG").ok())
    {
        Some(path) => ShellConfig::load_or_default(Path::new(&path))?,
        None => ShellConfig::default(),
    };
    log::info!(
        "Starting WebShell (user {}, home {})",
        config.user,
        config.home
    );

    let mut shell = ShellState::from_config(&config)?;
    let mut registry = CommandRegistry::new();
    register_builtins(&mut registry);
    log::debug!("{} commands registered", registry.commands().len());

    let mut editor = LineEditor::new(&config);
    let mut out = StdoutSink::new(std::io::stdout());
    editor.start(&mut out);

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        for key in input::keys_for_line(&line) {
            editor.handle_key(key, Instant::now(), &mut shell, &registry, &mut out);
        }
        if editor.is_closed() {
            break;
        }
    }

    log::info!(
        "Session ended (last status {})",
        shell.last_exit_status
    );
    Ok(())
}
