//! Flat in-memory path table.
//!
//! Existence is an exact-string lookup in one of two `BTreeSet`s. There is no
//! tree: a directory may be registered without its ancestors, and nothing
//! here walks parents on lookup. Commands that create entries go through
//! [`MemoryVfs::create_dir_all`] or check the parent themselves, which keeps
//! every directory's parent chain registered in practice.

use std::collections::BTreeSet;

use webshell_types::error::{Result, ShellError};

use crate::PathKind;
use crate::path::parent;

/// The file and directory path sets of one shell session.
#[derive(Debug, Clone)]
pub struct MemoryVfs {
    files: BTreeSet<String>,
    directories: BTreeSet<String>,
}

impl MemoryVfs {
    /// Create a table holding only the root directory.
    pub fn new() -> Self {
        let mut directories = BTreeSet::new();
        directories.insert("/".to_string());
        Self {
            files: BTreeSet::new(),
            directories,
        }
    }

    /// Classify `path` by exact membership: files first, then directories.
    pub fn classify(&self, path: &str) -> PathKind {
        if self.files.contains(path) {
            PathKind::File
        } else if self.directories.contains(path) {
            PathKind::Directory
        } else {
            PathKind::NotFound
        }
    }

    pub fn is_file(&self, path: &str) -> bool {
        self.classify(path) == PathKind::File
    }

    pub fn is_dir(&self, path: &str) -> bool {
        self.classify(path) == PathKind::Directory
    }

    pub fn exists(&self, path: &str) -> bool {
        self.classify(path).exists()
    }

    /// Register a directory. Registering an existing directory is a no-op.
    pub fn add_dir(&mut self, path: &str) -> Result<()> {
        if self.files.contains(path) {
            return Err(ShellError::Vfs(format!("file exists: {path}")));
        }
        if self.directories.insert(path.to_string()) {
            log::trace!("vfs: added directory {path}");
        }
        Ok(())
    }

    /// Register a file. Registering an existing file is a no-op.
    pub fn add_file(&mut self, path: &str) -> Result<()> {
        if self.directories.contains(path) {
            return Err(ShellError::Vfs(format!("is a directory: {path}")));
        }
        if self.files.insert(path.to_string()) {
            log::trace!("vfs: added file {path}");
        }
        Ok(())
    }

    /// Register a directory together with every missing ancestor.
    pub fn create_dir_all(&mut self, path: &str) -> Result<()> {
        if self.directories.contains(path) {
            return Ok(());
        }
        let par = parent(path);
        if par != path {
            self.create_dir_all(&par)?;
        }
        self.add_dir(path)
    }

    /// Register a file and every missing ancestor directory.
    pub fn create_file_all(&mut self, path: &str) -> Result<()> {
        self.create_dir_all(&parent(path))?;
        self.add_file(path)
    }

    /// Direct children of `dir`, sorted by name.
    pub fn children(&self, dir: &str) -> Vec<(String, PathKind)> {
        let prefix = if dir == "/" {
            "/".to_string()
        } else {
            format!("{dir}/")
        };
        let mut entries: Vec<(String, PathKind)> = Vec::new();
        for (set, kind) in [
            (&self.directories, PathKind::Directory),
            (&self.files, PathKind::File),
        ] {
            for key in set.range(prefix.clone()..) {
                if !key.starts_with(&prefix) {
                    break;
                }
                let rest = &key[prefix.len()..];
                if !rest.is_empty() && !rest.contains('/') {
                    entries.push((rest.to_string(), kind));
                }
            }
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// All registered files, sorted.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }

    /// All registered directories, sorted.
    pub fn directories(&self) -> impl Iterator<Item = &str> {
        self.directories.iter().map(String::as_str)
    }
}

impl Default for MemoryVfs {
    fn default() -> Self {
        Self::new()
    }
}
