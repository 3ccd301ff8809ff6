//! Path commands: pwd, cd, ls/dir, mkdir, touch.
//!
//! These are the only commands that create or move between VFS entries, so
//! they are responsible for keeping every directory's parent registered and
//! the working directory pointing at a directory.

use webshell_types::error::{Result, ShellError, status};
use webshell_vfs::PathKind;

use crate::command::{Command, Invocation};
use crate::commands::reject_options;

/// Run `op` for every operand, reporting failures without stopping.
///
/// Returns 0 if every operand succeeded, else the status of the last failure.
fn for_each_operand(
    inv: &mut Invocation<'_>,
    operands: &[String],
    mut op: impl FnMut(&mut Invocation<'_>, &str) -> Result<()>,
) -> i32 {
    let mut code = status::SUCCESS;
    for operand in operands {
        if let Err(e) = op(inv, operand) {
            code = inv.report(&e);
        }
    }
    code
}

/// Check that the parent of `path` is a directory before creating `path`.
fn require_parent_dir(inv: &Invocation<'_>, path: &str, prefix: &str) -> Result<()> {
    match inv.state.classify(&webshell_vfs::parent(path)) {
        PathKind::Directory => Ok(()),
        PathKind::File => Err(ShellError::Blocked(format!("{prefix}: Not a directory"))),
        PathKind::NotFound => Err(ShellError::NotFound(format!(
            "{prefix}: No such file or directory"
        ))),
    }
}

// ---------------------------------------------------------------------------
// pwd
// ---------------------------------------------------------------------------

pub(crate) fn pwd() -> Command {
    Command::builder("pwd")
        .description("print name of current working directory")
        .usage("pwd")
        .on_exec(|inv, options, _| {
            reject_options("pwd", options)?;
            let cwd = inv.state.cwd().to_string();
            inv.println(cwd);
            Ok(status::SUCCESS)
        })
        .build()
}

// ---------------------------------------------------------------------------
// cd
// ---------------------------------------------------------------------------

pub(crate) fn cd() -> Command {
    Command::builder("cd")
        .description("change the working directory")
        .usage("cd [dir]")
        .on_exec(|inv, options, args| {
            reject_options("cd", options)?;
            let target = match args {
                [] => inv.state.home().to_string(),
                [dir] => dir.clone(),
                _ => return Err(ShellError::Usage("cd: too many arguments".into())),
            };
            let path = inv.state.resolve(&target);
            match inv.state.classify(&path) {
                PathKind::Directory => inv.state.set_cwd(&path)?,
                PathKind::File => {
                    return Err(ShellError::Blocked(format!("cd: {target}: Not a directory")));
                },
                PathKind::NotFound => {
                    return Err(ShellError::NotFound(format!(
                        "cd: {target}: No such file or directory"
                    )));
                },
            }
            log::debug!("cwd -> {path}");
            Ok(status::SUCCESS)
        })
        .build()
}

// ---------------------------------------------------------------------------
// ls / dir
// ---------------------------------------------------------------------------

pub(crate) fn ls() -> Command {
    list_command("ls")
}

pub(crate) fn dir() -> Command {
    list_command("dir")
}

fn list_command(name: &'static str) -> Command {
    Command::builder(name)
        .description("list directory contents")
        .usage(format!("{name} [path...]"))
        .on_exec(move |inv, options, args| {
            reject_options(name, options)?;
            if args.is_empty() {
                let cwd = inv.state.cwd().to_string();
                list_one(inv, name, &cwd, false)?;
                return Ok(status::SUCCESS);
            }
            let headers = args.len() > 1;
            Ok(for_each_operand(inv, args, |inv, operand| {
                list_one(inv, name, operand, headers)
            }))
        })
        .build()
}

fn list_one(inv: &mut Invocation<'_>, name: &str, operand: &str, header: bool) -> Result<()> {
    let path = inv.state.resolve(operand);
    match inv.state.classify(&path) {
        PathKind::File => inv.println(operand),
        PathKind::Directory => {
            if header {
                inv.println(format!("{operand}:"));
            }
            for (entry, kind) in inv.state.vfs.children(&path) {
                let suffix = if kind == PathKind::Directory { "/" } else { "" };
                inv.println(format!("{entry}{suffix}"));
            }
        },
        PathKind::NotFound => {
            return Err(ShellError::NotFound(format!(
                "{name}: cannot access '{operand}': No such file or directory"
            )));
        },
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// mkdir
// ---------------------------------------------------------------------------

pub(crate) fn mkdir() -> Command {
    Command::builder("mkdir")
        .description("make directories")
        .usage("mkdir [-p] dir...")
        .on_exec(|inv, options, args| {
            let mut parents = false;
            for opt in options {
                match opt.as_str() {
                    "p" | "parents" => parents = true,
                    other => {
                        return Err(ShellError::Usage(format!("mkdir: invalid option '{other}'")));
                    },
                }
            }
            if args.is_empty() {
                return Err(ShellError::Usage("mkdir: missing operand".into()));
            }
            Ok(for_each_operand(inv, args, |inv, operand| {
                make_dir(inv, operand, parents)
            }))
        })
        .build()
}

fn make_dir(inv: &mut Invocation<'_>, operand: &str, parents: bool) -> Result<()> {
    let path = inv.state.resolve(operand);
    let prefix = format!("mkdir: cannot create directory '{operand}'");
    match inv.state.classify(&path) {
        PathKind::Directory if parents => return Ok(()),
        PathKind::Directory | PathKind::File => {
            return Err(ShellError::Usage(format!("{prefix}: File exists")));
        },
        PathKind::NotFound => {},
    }
    if parents {
        inv.state
            .vfs
            .create_dir_all(&path)
            .map_err(|_| ShellError::Blocked(format!("{prefix}: Not a directory")))
    } else {
        require_parent_dir(inv, &path, &prefix)?;
        inv.state.vfs.add_dir(&path)
    }
}

// ---------------------------------------------------------------------------
// touch
// ---------------------------------------------------------------------------

pub(crate) fn touch() -> Command {
    Command::builder("touch")
        .description("create empty files")
        .usage("touch file...")
        .on_exec(|inv, options, args| {
            reject_options("touch", options)?;
            if args.is_empty() {
                return Err(ShellError::Usage("touch: missing file operand".into()));
            }
            Ok(for_each_operand(inv, args, touch_one))
        })
        .build()
}

fn touch_one(inv: &mut Invocation<'_>, operand: &str) -> Result<()> {
    let path = inv.state.resolve(operand);
    if inv.state.classify(&path).exists() {
        return Ok(());
    }
    require_parent_dir(inv, &path, &format!("touch: cannot touch '{operand}'"))?;
    inv.state.vfs.add_file(&path)
}
