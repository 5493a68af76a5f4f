//! Command handlers for the generator CLI.
//!
//! `emit-b` builds a [`Generator`](ftpkg_sdk::Generator); `validate` and
//! `context` only need a [`Checker`](ftpkg_sdk::Checker), so a broken template
//! setting never fails them. Output goes through [`crate::output`].

pub(crate) mod context;
pub(crate) mod emit;
pub(crate) mod validate;

pub(crate) use context::handle_context_command;
pub(crate) use emit::handle_emit_command;
pub(crate) use validate::handle_validate_command;
