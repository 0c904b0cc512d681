use once_cell::sync::Lazy;
use regex::Regex;

use super::annotation;
use crate::model::Item;

const SURROUND_CHANNELS: u32 = 6;
const SURROUND_LABEL: &str = "5.1";

static SURROUND_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" \(5\.1\)").expect("channels pattern is valid"));

/// Flags six-channel items as 5.1 surround.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelsRule;

impl ChannelsRule {
    pub fn generate(&self, item: &Item) -> String {
        if item.channels == SURROUND_CHANNELS {
            annotation(SURROUND_LABEL)
        } else {
            String::new()
        }
    }

    pub(crate) fn removal_pattern() -> &'static Regex {
        &SURROUND_PATTERN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_channels_is_surround() {
        let item = Item::new("Track", "Album").with_audio(24, 48000, 6);
        assert_eq!(ChannelsRule.generate(&item), " (5.1)");
    }

    #[test]
    fn other_channel_counts_are_not_flagged() {
        for channels in [1, 2, 4, 5, 7, 8] {
            let item = Item::new("Track", "Album").with_audio(24, 48000, channels);
            assert_eq!(ChannelsRule.generate(&item), "", "channels = {}", channels);
        }
    }

    #[test]
    fn pattern_matches_literal_dot_only() {
        assert!(ChannelsRule::removal_pattern().is_match("Album (5.1)"));
        assert!(!ChannelsRule::removal_pattern().is_match("Album (501)"));
    }
}
