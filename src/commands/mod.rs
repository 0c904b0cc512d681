//! # Command Layer
//!
//! Each command lives in its own submodule and implements a pure Rust function
//! over a [`Library`](crate::library::Library) and an
//! [`Annotator`](crate::annotator::Annotator).
//!
//! ## Role and Responsibilities
//!
//! Commands are where title changes are decided and written back:
//! - Select and reload items from the library
//! - Reconcile (or strip) each title
//! - Sync the item, then its parent album, only when the title changed
//! - Return a structured [`CmdResult`] describing what changed
//!
//! ## What Commands Do NOT Do
//!
//! - **Argument parsing** or query-language handling: callers hand over an
//!   [`ItemSelector`](crate::library::ItemSelector)
//! - **Terminal output**: messages are data, the host renders them
//! - **Persistence details**: tag writing and file moves belong to the library
//!
//! ## Testing Strategy
//!
//! Command tests run against
//! [`InMemoryLibrary`](crate::library::memory::InMemoryLibrary) and assert on
//! both the returned `CmdResult` and the library's sync log.
//!
//! ## Command Modules
//!
//! - [`update`]: Reconcile flags on selected items and their albums
//! - [`remove`]: Strip flags from selected items and their albums
//! - [`import`]: Import hooks, including representative item selection
//! - [`helpers`]: Write-back shared by all commands

use serde::Serialize;
use uuid::Uuid;

pub mod helpers;
pub mod import;
pub mod remove;
pub mod update;

pub use import::RepresentativePolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// A title that was written back to the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleChange {
    pub id: Uuid,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    pub changed_items: Vec<TitleChange>,
    pub changed_albums: Vec<TitleChange>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn is_unchanged(&self) -> bool {
        self.changed_items.is_empty() && self.changed_albums.is_empty()
    }

    /// Append the standard "N items, M albums" summary.
    pub(crate) fn summarize(&mut self, verb: &str) {
        if self.is_unchanged() {
            self.add_message(CmdMessage::info("Album flags already up to date"));
            return;
        }
        let items = self.changed_items.len();
        let albums = self.changed_albums.len();
        self.add_message(CmdMessage::success(format!(
            "{} flags on {} item{} and {} album{}",
            verb,
            items,
            if items == 1 { "" } else { "s" },
            albums,
            if albums == 1 { "" } else { "s" }
        )));
    }
}
