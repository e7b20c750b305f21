//! Core error types for explorer-tabs-core
//!
//! This module provides the error types shared by the tab container and
//! its collaborators.

use crate::location::Location;
use crate::tab::TabId;
use std::io;
use thiserror::Error;

/// Errors reported by a navigation collaborator when a browse fails.
///
/// These never abort tab creation; the container retries against its
/// fallback chain and only surfaces the last one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The requested location does not exist.
    #[error("location not found: {0}")]
    NotFound(Location),

    /// The location exists but cannot be browsed as a folder.
    #[error("not a folder: {0}")]
    NotAFolder(Location),

    /// The user has no access to the location.
    #[error("access denied: {0}")]
    AccessDenied(Location),

    /// The location is temporarily unavailable (disconnected share, etc).
    #[error("location unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur in tab container operations.
///
/// Lookups by positional index are recoverable and surface as
/// [`TabError::IndexOutOfRange`]; lookups by id that fail inside the
/// container are contract violations and panic instead.
#[derive(Debug, Error)]
pub enum TabError {
    /// Tab with the specified ID was not found.
    ///
    /// Returned by the operations that accept ids from outside the
    /// container (commands, collaborator notifications).
    #[error("tab not found: {0}")]
    TabNotFound(TabId),

    /// A positional index supplied by the UI does not name a tab.
    #[error("tab index {index} out of range (tab count {count})")]
    IndexOutOfRange { index: usize, count: usize },

    /// A navigation failed and no fallback applied.
    #[error("navigation failed: {0}")]
    Navigation(#[from] NavigationError),

    /// A session record could not be encoded or decoded.
    #[error("invalid session data: {0}")]
    Session(#[from] serde_json::Error),

    /// Underlying IO error bubbled up from session files.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias using [`TabError`].
pub type TabResult<T> = Result<T, TabError>;
