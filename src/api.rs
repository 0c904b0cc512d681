//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. Hosts build one
//! [`AlbumFlagsApi`] per library and route their events and commands here.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Builds** the [`RuleSet`] from configuration once, failing fast on bad config
//! - **Dispatches** to the appropriate command function
//! - **Honors** the `auto` setting for import events
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **Persistence**: That belongs to the [`Library`] implementation
//!
//! ## Host Mapping
//!
//! | Host hook | Method |
//! |-----------|--------|
//! | `updateflags [-a] QUERY` | [`AlbumFlagsApi::update_flags`] |
//! | `removeflags [-a] QUERY` | [`AlbumFlagsApi::remove_flags`] |
//! | album imported event | [`AlbumFlagsApi::album_imported`] |
//! | item imported event | [`AlbumFlagsApi::item_imported`] |
//!
//! ## Generic Over Library
//!
//! `AlbumFlagsApi<L: Library>` is generic over the host's storage, so the same
//! facade runs against [`InMemoryLibrary`](crate::library::memory::InMemoryLibrary)
//! in tests.

use tracing::debug;
use uuid::Uuid;

use crate::annotator::{Annotator, Reconciled};
use crate::commands::{self, CmdMessage, CmdResult, RepresentativePolicy};
use crate::config::AlbumFlagsConfig;
use crate::error::Result;
use crate::library::{ItemSelector, Library, SyncOptions};
use crate::model::Item;
use crate::ruleset::RuleSet;

pub use crate::commands::{MessageLevel, TitleChange};

pub struct AlbumFlagsApi<L: Library> {
    library: L,
    annotator: Annotator,
    config: AlbumFlagsConfig,
    policy: RepresentativePolicy,
    sync_options: SyncOptions,
}

impl<L: Library> AlbumFlagsApi<L> {
    pub fn new(library: L, config: AlbumFlagsConfig) -> Result<Self> {
        let rules = RuleSet::from_config(&config)?;
        Ok(Self {
            library,
            annotator: Annotator::new(rules),
            config,
            policy: RepresentativePolicy::default(),
            sync_options: SyncOptions::default(),
        })
    }

    pub fn with_policy(mut self, policy: RepresentativePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_sync_options(mut self, options: SyncOptions) -> Self {
        self.sync_options = options;
        self
    }

    pub fn update_flags(&mut self, selector: &ItemSelector) -> Result<CmdResult> {
        commands::update::run(&mut self.library, &self.annotator, selector, self.sync_options)
    }

    pub fn remove_flags(&mut self, selector: &ItemSelector) -> Result<CmdResult> {
        commands::remove::run(&mut self.library, &self.annotator, selector, self.sync_options)
    }

    pub fn album_imported(&mut self, album_id: &Uuid) -> Result<CmdResult> {
        if !self.config.auto {
            return Ok(auto_disabled());
        }
        commands::import::album_imported(
            &mut self.library,
            &self.annotator,
            album_id,
            self.policy,
            self.sync_options,
        )
    }

    pub fn item_imported(&mut self, item_id: &Uuid) -> Result<CmdResult> {
        if !self.config.auto {
            return Ok(auto_disabled());
        }
        commands::import::item_imported(
            &mut self.library,
            &self.annotator,
            item_id,
            self.sync_options,
        )
    }

    /// Reconcile without touching the library.
    pub fn reconcile(&self, item: &Item) -> Reconciled {
        self.annotator.reconcile(item)
    }

    pub fn annotator(&self) -> &Annotator {
        &self.annotator
    }

    pub fn config(&self) -> &AlbumFlagsConfig {
        &self.config
    }

    pub fn library(&self) -> &L {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut L {
        &mut self.library
    }

    pub fn into_library(self) -> L {
        self.library
    }
}

fn auto_disabled() -> CmdResult {
    debug!("Automatic flag updates disabled, ignoring import event");
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(
        "Automatic flag updates are disabled (auto = false)",
    ));
    result
}
