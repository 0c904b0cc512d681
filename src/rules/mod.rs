//! # Flag Rules
//!
//! A [`Rule`] knows two things about one category of flag:
//!
//! - **generate**: given an [`Item`], which annotation (if any) it contributes.
//!   The result is either empty or one or more `" (VALUE)"` groups.
//! - **remove**: how to strip every annotation of its category from a title,
//!   including stale ones it would no longer produce (a changed threshold,
//!   a re-ripped album at a different sample rate, a relabelled mapping value).
//!
//! ## Categories
//!
//! | Rule | Produces | Removes |
//! |------|----------|---------|
//! | [`FieldMappingRule`] | mapped label per field value | any configured label |
//! | [`BitdepthRule`] | `(24bit)` when `bitdepth >= min` | `(<digits>bit)` |
//! | [`SamplerateRule`] | `(96kHz)`, `(44.1kHz)` when `samplerate >= min` | `(<digits>[.<digits>]kHz)` |
//! | [`ChannelsRule`] | `(5.1)` when `channels == 6` | `(5.1)` |
//!
//! Removal patterns always include the leading space and both brackets, so a
//! bare `24bit` or `5.1` in the album name itself is never touched.

mod channels;
mod mapping;
mod threshold;

pub use channels::ChannelsRule;
pub use mapping::{FieldMappingRule, MappingKey};
pub use threshold::{format_khz, BitdepthRule, SamplerateRule};

use regex::Regex;

use crate::model::Item;

/// Wrap a flag value in the bracket convention: `" (VALUE)"`.
pub fn annotation(value: &str) -> String {
    format!(" ({})", value)
}

/// One configured flag category.
#[derive(Debug, Clone)]
pub enum Rule {
    FieldMapping(FieldMappingRule),
    Bitdepth(BitdepthRule),
    Samplerate(SamplerateRule),
    Channels(ChannelsRule),
}

impl Rule {
    /// Strip every annotation this rule can recognize from `title`.
    pub fn remove(&self, title: &str) -> String {
        match self.removal_pattern() {
            Some(pattern) => pattern.replace_all(title, "").into_owned(),
            None => title.to_string(),
        }
    }

    /// The annotation(s) this rule contributes for the item's current metadata.
    pub fn generate(&self, item: &Item) -> String {
        match self {
            Rule::FieldMapping(rule) => rule.generate(item),
            Rule::Bitdepth(rule) => rule.generate(item),
            Rule::Samplerate(rule) => rule.generate(item),
            Rule::Channels(rule) => rule.generate(item),
        }
    }

    /// Config-style name, e.g. `field:media` or `bitdepth`.
    pub fn name(&self) -> String {
        match self {
            Rule::FieldMapping(rule) => format!("field:{}", rule.field()),
            Rule::Bitdepth(_) => "bitdepth".to_string(),
            Rule::Samplerate(_) => "samplerate".to_string(),
            Rule::Channels(_) => "channels".to_string(),
        }
    }

    fn removal_pattern(&self) -> Option<&Regex> {
        match self {
            Rule::FieldMapping(rule) => rule.removal_pattern(),
            Rule::Bitdepth(_) => Some(BitdepthRule::removal_pattern()),
            Rule::Samplerate(_) => Some(SamplerateRule::removal_pattern()),
            Rule::Channels(_) => Some(ChannelsRule::removal_pattern()),
        }
    }
}
