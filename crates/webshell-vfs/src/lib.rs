//! Virtual file system for WebShell.
//!
//! The pseudo-filesystem is two flat sets of normalized absolute paths, one
//! for files and one for directories. Nothing here touches the host disk.
//! Path strings are resolved lexically by the functions in [`path`].

pub mod memory;
pub mod path;

pub use memory::MemoryVfs;
pub use path::{is_absolute, parent, resolve};

/// Classification of a virtual path against the path table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Directory,
    NotFound,
}

impl PathKind {
    /// Whether the path names an existing entry.
    pub fn exists(self) -> bool {
        self != PathKind::NotFound
    }
}
