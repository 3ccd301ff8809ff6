//! Foundation types for WebShell.
//!
//! This crate contains the types shared by every WebShell crate: the error
//! type and exit status conventions, the logical key events the line editor
//! consumes, and the session configuration.

pub mod config;
pub mod error;
pub mod input;
