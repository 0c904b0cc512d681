//! # Albumflags
//!
//! Albumflags appends bracketed flags to album titles based on track
//! metadata, and strips them again:
//!
//! ```text
//! "Album Name"  +  bitdepth=24, samplerate=96000, channels=6
//!     → "Album Name (24bit) (96kHz) (5.1)"
//! ```
//!
//! It is built to run inside a music library manager: the host supplies the
//! items, the config section and the write-back, albumflags decides the titles.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Builds the RuleSet from config                           │
//! │  - Entry points for host commands and import events         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*)                                 │
//! │  - Select, reload, reconcile, write back items and albums   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (annotator.rs, ruleset.rs, rules/*)                   │
//! │  - Pure: title + metadata in, title out                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Library Layer (library/*)                                  │
//! │  - Host storage behind the `Library` trait                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The core holds no mutable state once built, so an [`Annotator`] can be
//! shared across threads freely.
//!
//! ## Quick Start
//!
//! ```
//! use albumflags::{AlbumFlagsConfig, Annotator, Item, RuleSet};
//!
//! let config = AlbumFlagsConfig::from_toml_str(
//!     r#"flags = ["bitdepth", "samplerate", "channels"]"#,
//! ).unwrap();
//! let annotator = Annotator::new(RuleSet::from_config(&config).unwrap());
//!
//! let item = Item::new("Track 1", "Album Name (16bit)").with_audio(24, 96000, 6);
//! let result = annotator.reconcile(&item);
//! assert_eq!(result.title, "Album Name (24bit) (96kHz) (5.1)");
//! assert!(result.changed);
//! ```

pub mod annotator;
pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod library;
pub mod model;
pub mod rules;
pub mod ruleset;

pub use annotator::{Annotator, Reconciled};
pub use api::AlbumFlagsApi;
pub use config::AlbumFlagsConfig;
pub use error::{FlagsError, Result};
pub use library::{ItemSelector, Library, SyncOptions};
pub use model::{Album, FieldValue, Item};
pub use rules::Rule;
pub use ruleset::{RuleSet, RuleSpec};
