use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use uuid::Uuid;

use super::{ItemSelector, Library, SyncOptions};
use crate::error::{FlagsError, Result};
use crate::model::{Album, Item};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncTarget {
    Item(Uuid),
    Album(Uuid),
}

/// One write that reached the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRecord {
    pub target: SyncTarget,
    pub album: String,
    pub options: SyncOptions,
    pub synced_at: DateTime<Utc>,
}

/// In-memory library.
///
/// Items and albums keep insertion order, which is the "library order" the
/// commands see. Syncing an album copies its title onto every member item,
/// the way album-level fields propagate in a real library.
#[derive(Debug, Default)]
pub struct InMemoryLibrary {
    items: IndexMap<Uuid, Item>,
    albums: IndexMap<Uuid, Album>,
    sync_log: Vec<SyncRecord>,
    simulate_write_error: bool,
}

impl InMemoryLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an album with its items. Items are attached to the album.
    pub fn insert_album(&mut self, album: Album, items: Vec<Item>) -> Uuid {
        let album_id = album.id;
        self.albums.insert(album_id, album);
        for item in items {
            self.insert_item(item.in_album(album_id));
        }
        album_id
    }

    /// Add a standalone item (or one already pointing at an album).
    pub fn insert_item(&mut self, item: Item) -> Uuid {
        let id = item.id;
        self.items.insert(id, item);
        id
    }

    /// Every sync performed so far, oldest first.
    pub fn sync_log(&self) -> &[SyncRecord] {
        &self.sync_log
    }

    pub fn clear_sync_log(&mut self) {
        self.sync_log.clear();
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    fn record(&mut self, target: SyncTarget, album: &str, options: SyncOptions) {
        self.sync_log.push(SyncRecord {
            target,
            album: album.to_string(),
            options,
            synced_at: Utc::now(),
        });
    }

    fn check_writable(&self) -> Result<()> {
        if self.simulate_write_error {
            return Err(FlagsError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl Library for InMemoryLibrary {
    fn select_items(&self, selector: &ItemSelector) -> Result<Vec<Item>> {
        match selector {
            ItemSelector::All => Ok(self.items.values().cloned().collect()),
            ItemSelector::Items(ids) => ids.iter().map(|id| self.get_item(id)).collect(),
            ItemSelector::Albums(ids) => {
                let mut items = Vec::new();
                for id in ids {
                    items.extend(self.album_items(id)?);
                }
                Ok(items)
            }
            ItemSelector::AlbumTitle(text) => {
                let needle = text.to_lowercase();
                Ok(self
                    .items
                    .values()
                    .filter(|item| item.album.to_lowercase().contains(&needle))
                    .cloned()
                    .collect())
            }
        }
    }

    fn get_item(&self, id: &Uuid) -> Result<Item> {
        self.items
            .get(id)
            .cloned()
            .ok_or(FlagsError::ItemNotFound(*id))
    }

    fn get_album(&self, id: &Uuid) -> Result<Album> {
        self.albums
            .get(id)
            .cloned()
            .ok_or(FlagsError::AlbumNotFound(*id))
    }

    fn album_items(&self, id: &Uuid) -> Result<Vec<Item>> {
        if !self.albums.contains_key(id) {
            return Err(FlagsError::AlbumNotFound(*id));
        }
        Ok(self
            .items
            .values()
            .filter(|item| item.album_id == Some(*id))
            .cloned()
            .collect())
    }

    fn sync_item(&mut self, item: &Item, options: SyncOptions) -> Result<()> {
        self.check_writable()?;
        if !self.items.contains_key(&item.id) {
            return Err(FlagsError::ItemNotFound(item.id));
        }
        self.items.insert(item.id, item.clone());
        self.record(SyncTarget::Item(item.id), &item.album, options);
        Ok(())
    }

    fn sync_album(&mut self, album: &Album, options: SyncOptions) -> Result<()> {
        self.check_writable()?;
        if !self.albums.contains_key(&album.id) {
            return Err(FlagsError::AlbumNotFound(album.id));
        }
        self.albums.insert(album.id, album.clone());
        for item in self.items.values_mut() {
            if item.album_id == Some(album.id) {
                item.album = album.album.clone();
            }
        }
        self.record(SyncTarget::Album(album.id), &album.album, options);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct LibraryFixture {
        pub library: InMemoryLibrary,
    }

    impl Default for LibraryFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl LibraryFixture {
        pub fn new() -> Self {
            Self {
                library: InMemoryLibrary::new(),
            }
        }

        /// Album whose tracks all share one audio format.
        pub fn with_album(
            mut self,
            title: &str,
            tracks: usize,
            (bitdepth, samplerate, channels): (u32, u32, u32),
        ) -> Self {
            let items = (0..tracks)
                .map(|i| {
                    Item::new(format!("Track {}", i + 1), title)
                        .with_audio(bitdepth, samplerate, channels)
                })
                .collect();
            self.library.insert_album(Album::new(title), items);
            self
        }

        /// Album whose tracks each have their own `(bitdepth, samplerate, channels)`.
        pub fn with_mixed_album(mut self, title: &str, formats: &[(u32, u32, u32)]) -> Self {
            let items = formats
                .iter()
                .enumerate()
                .map(|(i, (bitdepth, samplerate, channels))| {
                    Item::new(format!("Track {}", i + 1), title)
                        .with_audio(*bitdepth, *samplerate, *channels)
                })
                .collect();
            self.library.insert_album(Album::new(title), items);
            self
        }

        pub fn with_singleton(mut self, title: &str, album: &str, format: (u32, u32, u32)) -> Self {
            let (bitdepth, samplerate, channels) = format;
            self.library
                .insert_item(Item::new(title, album).with_audio(bitdepth, samplerate, channels));
            self
        }

        /// Id of the first album whose title contains `text`.
        pub fn album_id(&self, text: &str) -> Uuid {
            self.library
                .albums
                .values()
                .find(|album| album.album.contains(text))
                .map(|album| album.id)
                .expect("fixture album exists")
        }
    }
}
