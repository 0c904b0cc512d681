//! # Configuration
//!
//! Albumflags configuration is managed by [`confique`], which handles layered
//! loading from TOML files, environment variables and compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `ALBUMFLAGS_AUTO`, `ALBUMFLAGS_MIN_BITDEPTH`,
//!    `ALBUMFLAGS_MIN_SAMPLERATE`.
//! 2. **Explicit file**: the path handed to [`AlbumFlagsConfig::load`].
//! 3. **User config**: `albumflags.toml` in the OS config directory (via `directories`).
//! 4. **Compiled defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `auto` | `true` | Update flags when albums/items are imported |
//! | `flags` | `[]` | Ordered flag list: `field:<name>`, `bitdepth`, `samplerate`, `channels` |
//! | `field_flags` | none | Per-field `value -> label` tables, keys may be `/regex/` |
//! | `bitdepth_flag.min_bitdepth` | `24` | Lowest bit depth that gets a flag |
//! | `samplerate_flag.min_samplerate` | `96000` | Lowest sample rate (Hz) that gets a flag |
//!
//! ## Example
//!
//! ```toml
//! flags = ["field:albumtype", "bitdepth", "samplerate", "channels"]
//!
//! [field_flags.albumtype]
//! ep = "EP"
//! live = "Live"
//! "/^remaster/" = "Remastered"
//!
//! [bitdepth_flag]
//! min_bitdepth = 24
//! ```
//!
//! Mapping tables keep their file order: when several `/regex/` keys match a
//! value, the first one listed wins.

use std::path::{Path, PathBuf};

use confique::Config;
use directories::ProjectDirs;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const CONFIG_FILE_NAME: &str = "albumflags.toml";

/// Ordered `value -> label` table for one metadata field.
pub type FieldMapping = IndexMap<String, String>;

/// Configuration for albumflags, stored in `albumflags.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AlbumFlagsConfig {
    /// Reconcile flags automatically when albums or items are imported
    #[config(default = true, env = "ALBUMFLAGS_AUTO")]
    pub auto: bool,

    /// Enabled flags, in the order they are appended to the title
    #[config(default = [])]
    pub flags: Vec<String>,

    /// Mapping tables for `field:<name>` flags, keyed by field name
    pub field_flags: Option<IndexMap<String, FieldMapping>>,

    #[config(nested)]
    pub bitdepth_flag: BitdepthFlagConfig,

    #[config(nested)]
    pub samplerate_flag: SamplerateFlagConfig,
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct BitdepthFlagConfig {
    /// Lowest bit depth (inclusive) that produces a flag
    #[config(default = 24, env = "ALBUMFLAGS_MIN_BITDEPTH")]
    pub min_bitdepth: u32,
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SamplerateFlagConfig {
    /// Lowest sample rate in Hz (inclusive) that produces a flag
    #[config(default = 96000, env = "ALBUMFLAGS_MIN_SAMPLERATE")]
    pub min_samplerate: u32,
}

impl Default for BitdepthFlagConfig {
    fn default() -> Self {
        Self { min_bitdepth: 24 }
    }
}

impl Default for SamplerateFlagConfig {
    fn default() -> Self {
        Self {
            min_samplerate: 96000,
        }
    }
}

impl Default for AlbumFlagsConfig {
    fn default() -> Self {
        Self {
            auto: true,
            flags: Vec::new(),
            field_flags: None,
            bitdepth_flag: BitdepthFlagConfig::default(),
            samplerate_flag: SamplerateFlagConfig::default(),
        }
    }
}

impl AlbumFlagsConfig {
    /// Load from an explicit file, layered over the user config and defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let mut builder = Self::builder().env().file(path);
        if let Some(user) = user_config_path() {
            builder = builder.file(user);
        }
        Ok(builder.load()?)
    }

    /// Load from the user config directory only (plus env and defaults).
    pub fn load_default() -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(user) = user_config_path() {
            builder = builder.file(user);
        }
        Ok(builder.load()?)
    }

    /// Parse a TOML document, filling unset keys from the compiled defaults.
    ///
    /// Hosts that embed their own config system hand us the plugin section this way.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Mapping table for a field, if one is configured.
    pub fn field_mapping(&self, field: &str) -> Option<&FieldMapping> {
        self.field_flags.as_ref().and_then(|tables| tables.get(field))
    }
}

/// `albumflags.toml` inside the OS-specific config directory.
pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "albumflags").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
