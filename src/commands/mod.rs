//! Caller-facing operations. Each command takes the shared [`AppState`] and
//! returns a [`CommandError`] a presentation layer can show or match on.
//!
//! [`AppState`]: crate::state::AppState
//! [`CommandError`]: crate::error::CommandError

pub mod config;
pub mod history;
pub mod keychain;
pub mod models;
pub mod refine;
