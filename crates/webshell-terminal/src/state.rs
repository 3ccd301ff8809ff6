//! Session-wide shell state.
//!
//! One `ShellState` is created when a session starts and is passed by
//! reference to every dispatch and every editor transition.

use std::collections::HashMap;

use webshell_types::config::ShellConfig;
use webshell_types::error::{Result, ShellError};
use webshell_vfs::{MemoryVfs, PathKind};

/// Mutable context shared by every command in a session.
///
/// `cwd` is always a registered directory; [`ShellState::set_cwd`] is the
/// only way commands move it.
#[derive(Debug, Clone)]
pub struct ShellState {
    cwd: String,
    /// Environment variables (`HOME` is always seeded).
    pub env: HashMap<String, String>,
    /// The file and directory path sets.
    pub vfs: MemoryVfs,
    /// Exit status of the most recent dispatch.
    pub last_exit_status: i32,
    closed: bool,
}

impl ShellState {
    /// Create a session rooted at `/` with `HOME=/`.
    pub fn new() -> Self {
        let mut env = HashMap::new();
        env.insert("HOME".to_string(), "/".to_string());
        env.insert("PWD".to_string(), "/".to_string());
        env.insert("?".to_string(), "0".to_string());
        Self {
            cwd: "/".to_string(),
            env,
            vfs: MemoryVfs::new(),
            last_exit_status: 0,
            closed: false,
        }
    }

    /// Create a session from configuration: seed paths and variables, then
    /// start in the home directory.
    pub fn from_config(config: &ShellConfig) -> Result<Self> {
        let mut state = Self::new();
        let home = webshell_vfs::resolve("/", &config.home);
        state.vfs.create_dir_all(&home)?;
        for dir in &config.directories {
            state.vfs.create_dir_all(&webshell_vfs::resolve("/", dir))?;
        }
        for file in &config.files {
            state.vfs.create_file_all(&webshell_vfs::resolve("/", file))?;
        }
        for (key, value) in &config.env {
            state.set_var(key, value);
        }
        state.set_var("HOME", &home);
        state.set_var("USER", &config.user);
        state.set_cwd(&home)?;
        log::debug!(
            "shell state ready: home={home}, {} dirs, {} files",
            state.vfs.directories().count(),
            state.vfs.files().count()
        );
        Ok(state)
    }

    /// Current working directory.
    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    /// Change the working directory. The target must be a registered directory.
    pub fn set_cwd(&mut self, path: &str) -> Result<()> {
        match self.vfs.classify(path) {
            PathKind::Directory => {
                self.cwd = path.to_string();
                self.set_var("PWD", path);
                Ok(())
            },
            PathKind::File => Err(ShellError::Blocked(format!("{path}: Not a directory"))),
            PathKind::NotFound => Err(ShellError::NotFound(format!(
                "{path}: No such file or directory"
            ))),
        }
    }

    pub fn var(&self, name: &str) -> Option<&str> {
        self.env.get(name).map(String::as_str)
    }

    pub fn set_var(&mut self, name: &str, value: &str) {
        self.env.insert(name.to_string(), value.to_string());
    }

    /// Value of `HOME`, or `/` when unset.
    pub fn home(&self) -> &str {
        self.var("HOME").unwrap_or("/")
    }

    /// Resolve `target` against the working directory.
    pub fn resolve(&self, target: &str) -> String {
        webshell_vfs::resolve(&self.cwd, target)
    }

    /// Classify an already-resolved path.
    pub fn classify(&self, path: &str) -> PathKind {
        self.vfs.classify(path)
    }

    /// Store a dispatch result in `last_exit_status` and `$?`.
    pub fn record_exit_status(&mut self, code: i32) {
        self.last_exit_status = code;
        self.set_var("?", &code.to_string());
    }

    /// Mark the session as finished (the `exit` command).
    pub fn request_close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new()
    }
}
