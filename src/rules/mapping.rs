//! Field mapping rules.
//!
//! A mapping table translates metadata values into flag labels:
//!
//! ```toml
//! [field_flags.albumstatus]
//! Promotion = "Promo"
//! "/^Bootleg/" = "Bootleg"
//! ```
//!
//! Keys wrapped in slashes are regular expressions, searched anywhere in the
//! value unless the expression anchors itself. An exact literal key always
//! beats a regex key; among regex keys the first one in table order wins.
//!
//! Each value of a multi-valued field is looked up on its own and the labels
//! are emitted in field order. Values without a match contribute nothing.

use indexmap::IndexMap;
use regex::Regex;

use super::annotation;
use crate::config::FieldMapping;
use crate::error::{FlagsError, Result};
use crate::model::Item;

/// A parsed mapping key.
#[derive(Debug, Clone)]
pub enum MappingKey {
    Literal(String),
    Pattern(Regex),
}

impl MappingKey {
    /// Parse a config key, compiling `/regex/` keys.
    pub fn parse(key: &str) -> Result<Self> {
        match regex_body(key) {
            Some(body) => Regex::new(body)
                .map(MappingKey::Pattern)
                .map_err(|source| FlagsError::InvalidPattern {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(MappingKey::Literal(key.to_string())),
        }
    }
}

/// The text between the slashes of a `/regex/` key.
fn regex_body(key: &str) -> Option<&str> {
    if key.len() >= 2 && key.starts_with('/') && key.ends_with('/') {
        Some(&key[1..key.len() - 1])
    } else {
        None
    }
}

#[derive(Debug, Clone)]
pub struct FieldMappingRule {
    field: String,
    literals: IndexMap<String, String>,
    patterns: Vec<(Regex, String)>,
    removal: Option<Regex>,
}

impl FieldMappingRule {
    pub fn new(field: impl Into<String>, mapping: &FieldMapping) -> Result<Self> {
        let mut literals = IndexMap::new();
        let mut patterns = Vec::new();

        for (key, label) in mapping {
            match MappingKey::parse(key)? {
                MappingKey::Literal(value) => {
                    literals.insert(value, label.clone());
                }
                MappingKey::Pattern(regex) => patterns.push((regex, label.clone())),
            }
        }

        Ok(Self {
            field: field.into(),
            literals,
            patterns,
            removal: removal_pattern(mapping.values())?,
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Label for a single field value, if any key matches.
    pub fn label_for(&self, value: &str) -> Option<&str> {
        if let Some(label) = self.literals.get(value) {
            return Some(label.as_str());
        }
        self.patterns
            .iter()
            .find(|(regex, _)| regex.is_match(value))
            .map(|(_, label)| label.as_str())
    }

    pub fn generate(&self, item: &Item) -> String {
        let Some(value) = item.field(&self.field) else {
            return String::new();
        };
        value
            .values()
            .into_iter()
            .filter_map(|v| self.label_for(v))
            .map(annotation)
            .collect()
    }

    pub(crate) fn removal_pattern(&self) -> Option<&Regex> {
        self.removal.as_ref()
    }
}

/// One alternation over every label the table can emit, escaped.
fn removal_pattern<'a>(labels: impl Iterator<Item = &'a String>) -> Result<Option<Regex>> {
    let mut escaped: Vec<String> = Vec::new();
    for label in labels {
        let label = regex::escape(label);
        if !escaped.contains(&label) {
            escaped.push(label);
        }
    }
    if escaped.is_empty() {
        return Ok(None);
    }
    let pattern = format!(r" \((?:{})\)", escaped.join("|"));
    Regex::new(&pattern)
        .map(Some)
        .map_err(|source| FlagsError::InvalidPattern {
            key: pattern.clone(),
            source,
        })
}
