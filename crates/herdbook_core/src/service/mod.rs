//! Use-case operations over the directory.
//!
//! # Responsibility
//! - Orchestrate repo calls into the command-level operations (add/edit/
//!   delete contact, schedule/edit/delete meeting, list, filter).
//! - Carry the user-facing failure modes; every error here is recoverable
//!   input feedback, never a crash.

pub mod directory_service;
pub mod filter;
