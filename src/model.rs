//! # Domain Model: Items, Albums and Field Values
//!
//! These types mirror the host library's records closely enough for flag
//! reconciliation: an [`Item`] is one track, an [`Album`] groups items and
//! carries its own title.
//!
//! ## Titles
//!
//! The `album` string on both types is the only thing albumflags writes. An
//! item's `album` and its parent album's `album` are kept identical by the
//! commands layer whenever flags are recalculated.
//!
//! ## Metadata Fields
//!
//! Besides the fixed audio properties (`bitdepth`, `samplerate`, `channels`),
//! items carry an open set of named fields (`media`, `albumstatus`,
//! `albumtype`, ...). A field holds either one string or a list. Hosts that
//! flatten multi-valued fields into a single `"a; b"` string are handled too:
//! [`FieldValue::values`] splits on `;`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Separator used by hosts that store multi-valued fields as one string.
pub const MULTI_VALUE_SEPARATOR: char = ';';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multi(Vec<String>),
}

impl FieldValue {
    /// Individual values in field order, trimmed, empties dropped.
    pub fn values(&self) -> Vec<&str> {
        match self {
            FieldValue::Single(s) => s
                .split(MULTI_VALUE_SEPARATOR)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .collect(),
            FieldValue::Multi(list) => list
                .iter()
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .collect(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Single(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Single(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        FieldValue::Multi(values)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub title: String,
    /// Album title as stored on the track, flags included.
    pub album: String,
    pub album_id: Option<Uuid>,
    pub bitdepth: u32,
    pub samplerate: u32,
    pub channels: u32,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl Item {
    pub fn new(title: impl Into<String>, album: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            album: album.into(),
            album_id: None,
            bitdepth: 0,
            samplerate: 0,
            channels: 0,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_audio(mut self, bitdepth: u32, samplerate: u32, channels: u32) -> Self {
        self.bitdepth = bitdepth;
        self.samplerate = samplerate;
        self.channels = channels;
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn in_album(mut self, album_id: Uuid) -> Self {
        self.album_id = Some(album_id);
        self
    }

    /// Named metadata field, `None` when the item doesn't carry it.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: Uuid,
    pub album: String,
}

impl Album {
    pub fn new(album: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            album: album.into(),
        }
    }
}
