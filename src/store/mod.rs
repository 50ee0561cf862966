//! Versioned profile store.
//!
//! Profile documents live in a plain directory tree; every save is recorded
//! by a [`HistoryBackend`]. The shipped backend is [`GitBackend`], but any
//! implementation of the trait can be injected.
//!
//! The store assumes a single writer: nothing locks the directory, so two
//! processes saving at once can interleave their history commands.

pub mod backend;
pub mod command;
pub mod diff;
pub mod git;
pub mod manager;

pub use backend::{BranchInfo, BranchOp, HistoryBackend, HistoryEntry};
pub use git::GitBackend;
pub use manager::{ProfileListing, ProfileStore, SaveReceipt};
