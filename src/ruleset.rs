//! # Rule Sets
//!
//! A [`RuleSet`] is the ordered list of [`Rule`]s built from the `flags`
//! config key. Order matters: generated annotations are concatenated in rule
//! order, so `["bitdepth", "samplerate"]` yields `(24bit) (96kHz)` and never
//! `(96kHz) (24bit)`.
//!
//! ## Flag Entries
//!
//! | Entry | Rule |
//! |-------|------|
//! | `field:<name>` | [`FieldMappingRule`] using `field_flags.<name>` |
//! | `bitdepth` | [`BitdepthRule`] with `bitdepth_flag.min_bitdepth` |
//! | `samplerate` | [`SamplerateRule`] with `samplerate_flag.min_samplerate` |
//! | `channels` | [`ChannelsRule`] |
//!
//! Anything else is rejected when the set is built, as is a `field:<name>`
//! entry without a mapping table. A misconfigured set never silently produces
//! fewer flags.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::config::AlbumFlagsConfig;
use crate::error::{FlagsError, Result};
use crate::model::Item;
use crate::rules::{BitdepthRule, ChannelsRule, FieldMappingRule, Rule, SamplerateRule};

/// A parsed entry of the `flags` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSpec {
    Field(String),
    Bitdepth,
    Samplerate,
    Channels,
}

impl FromStr for RuleSpec {
    type Err = FlagsError;

    fn from_str(s: &str) -> Result<Self> {
        let entry = s.trim();
        match entry.split_once(':') {
            Some(("field", name)) if !name.trim().is_empty() => {
                Ok(RuleSpec::Field(name.trim().to_string()))
            }
            Some(("field", _)) => Err(FlagsError::MissingField(entry.to_string())),
            Some(_) => Err(FlagsError::UnknownRule(entry.to_string())),
            None => match entry {
                "bitdepth" => Ok(RuleSpec::Bitdepth),
                "samplerate" => Ok(RuleSpec::Samplerate),
                "channels" => Ok(RuleSpec::Channels),
                "field" => Err(FlagsError::MissingField(entry.to_string())),
                _ => Err(FlagsError::UnknownRule(entry.to_string())),
            },
        }
    }
}

impl fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSpec::Field(name) => write!(f, "field:{}", name),
            RuleSpec::Bitdepth => write!(f, "bitdepth"),
            RuleSpec::Samplerate => write!(f, "samplerate"),
            RuleSpec::Channels => write!(f, "channels"),
        }
    }
}

impl RuleSpec {
    /// Build the rule, pulling parameters from `config`.
    pub fn build(&self, config: &AlbumFlagsConfig) -> Result<Rule> {
        match self {
            RuleSpec::Field(name) => {
                let mapping = config
                    .field_mapping(name)
                    .ok_or_else(|| FlagsError::MissingMapping(name.clone()))?;
                Ok(Rule::FieldMapping(FieldMappingRule::new(name.clone(), mapping)?))
            }
            RuleSpec::Bitdepth => Ok(Rule::Bitdepth(BitdepthRule::new(
                config.bitdepth_flag.min_bitdepth,
            ))),
            RuleSpec::Samplerate => Ok(Rule::Samplerate(SamplerateRule::new(
                config.samplerate_flag.min_samplerate,
            ))),
            RuleSpec::Channels => Ok(Rule::Channels(ChannelsRule)),
        }
    }
}

/// Ordered, immutable collection of rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn from_config(config: &AlbumFlagsConfig) -> Result<Self> {
        let rules = config
            .flags
            .iter()
            .map(|entry| entry.parse::<RuleSpec>()?.build(config))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            count = rules.len(),
            rules = ?rules.iter().map(Rule::name).collect::<Vec<_>>(),
            "Built flag rule set"
        );
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Strip every known flag from `title`.
    ///
    /// Passes repeat until nothing more is removed: stripping one flag can
    /// close up text that another rule recognizes, e.g. `(24bit (5.1))`.
    pub fn remove_all(&self, title: &str) -> String {
        let mut current = title.to_string();
        loop {
            let next = self
                .rules
                .iter()
                .fold(current.clone(), |acc, rule| rule.remove(&acc));
            if next == current {
                return next;
            }
            current = next;
        }
    }

    /// Concatenate every rule's annotation for `item`, in rule order.
    pub fn generate_all(&self, item: &Item) -> String {
        self.rules.iter().map(|rule| rule.generate(item)).collect()
    }
}
