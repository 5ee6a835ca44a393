//! Library side of the `biostudy` command-line tool.
//!
//! Kept separate from `main.rs` so the shell, settings and renderers can be
//! exercised from integration tests.

pub mod export;
pub mod logging;
pub mod recognizer;
pub mod render;
pub mod settings;
pub mod shell;
