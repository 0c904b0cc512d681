//! Numeric threshold rules for bit depth and sample rate.
//!
//! The threshold only decides whether a flag is generated. Removal matches any
//! value in the unit, so lowering or raising `min_*` never strands old flags.

use once_cell::sync::Lazy;
use regex::Regex;

use super::annotation;
use crate::model::Item;

static BITDEPTH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" \(\d+bit\)").expect("bitdepth pattern is valid"));

static SAMPLERATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" \(\d+(?:\.\d+)?kHz\)").expect("samplerate pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitdepthRule {
    min_bitdepth: u32,
}

impl BitdepthRule {
    pub fn new(min_bitdepth: u32) -> Self {
        Self { min_bitdepth }
    }

    pub fn min_bitdepth(&self) -> u32 {
        self.min_bitdepth
    }

    pub fn generate(&self, item: &Item) -> String {
        if item.bitdepth >= self.min_bitdepth {
            annotation(&format!("{}bit", item.bitdepth))
        } else {
            String::new()
        }
    }

    pub(crate) fn removal_pattern() -> &'static Regex {
        &BITDEPTH_PATTERN
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerateRule {
    min_samplerate: u32,
}

impl SamplerateRule {
    pub fn new(min_samplerate: u32) -> Self {
        Self { min_samplerate }
    }

    pub fn min_samplerate(&self) -> u32 {
        self.min_samplerate
    }

    pub fn generate(&self, item: &Item) -> String {
        if item.samplerate >= self.min_samplerate {
            annotation(&format_khz(item.samplerate))
        } else {
            String::new()
        }
    }

    pub(crate) fn removal_pattern() -> &'static Regex {
        &SAMPLERATE_PATTERN
    }
}

/// Render a sample rate in kHz with no trailing zeros: `96000 -> "96kHz"`,
/// `44100 -> "44.1kHz"`, `22050 -> "22.05kHz"`.
pub fn format_khz(samplerate: u32) -> String {
    let whole = samplerate / 1000;
    let fraction = samplerate % 1000;
    if fraction == 0 {
        return format!("{}kHz", whole);
    }
    let digits = format!("{:03}", fraction);
    format!("{}.{}kHz", whole, digits.trim_end_matches('0'))
}
