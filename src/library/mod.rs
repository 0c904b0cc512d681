//! # Library Layer
//!
//! Albumflags does not own any music data. It reads items from, and writes
//! titles back to, the host's library through the [`Library`] trait.
//!
//! ## What the Host Provides
//!
//! - **Selection**: resolve an [`ItemSelector`] to items, in library order.
//! - **Reload**: fetch the current state of an item or album by id.
//! - **Sync**: persist a changed item or album. Whether that also writes tags
//!   into audio files or moves files on disk is the host's decision, steered
//!   by the [`SyncOptions`] passed through untouched.
//!
//! ## Album Propagation
//!
//! Hosts commonly push album-level fields down to member items when an album
//! is stored. Commands therefore reload each item right before reconciling it
//! instead of trusting an earlier snapshot.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryLibrary`]: keeps everything in memory and records each
//!   sync. Used for testing the commands layer and by embedding hosts that
//!   manage persistence themselves.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::model::{Album, Item};

pub mod memory;

/// Which items a command operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSelector {
    All,
    Items(Vec<Uuid>),
    /// Every item of each album, album by album.
    Albums(Vec<Uuid>),
    /// Items whose album title contains the text (case-insensitive).
    AlbumTitle(String),
}

/// Host-level write flags forwarded with every sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOptions {
    /// Write tags into the media files
    pub write_tags: bool,
    /// Move files to match the host's path format
    pub move_files: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            write_tags: true,
            move_files: false,
        }
    }
}

/// Abstract interface to the host's item/album store.
pub trait Library {
    /// Items matching `selector`, in library order.
    fn select_items(&self, selector: &ItemSelector) -> Result<Vec<Item>>;

    /// Current state of an item.
    fn get_item(&self, id: &Uuid) -> Result<Item>;

    /// Current state of an album.
    fn get_album(&self, id: &Uuid) -> Result<Album>;

    /// Items belonging to an album, in library order.
    fn album_items(&self, id: &Uuid) -> Result<Vec<Item>>;

    /// Persist a changed item.
    fn sync_item(&mut self, item: &Item, options: SyncOptions) -> Result<()>;

    /// Persist a changed album.
    fn sync_album(&mut self, album: &Album, options: SyncOptions) -> Result<()>;
}
