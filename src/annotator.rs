//! # Reconciliation
//!
//! [`Annotator::reconcile`] turns whatever title an item currently carries
//! into the title its metadata implies:
//!
//! ```text
//! "Album Name (16bit) (44.1kHz)"      stored title
//!         │ RuleSet::remove_all
//!         ▼
//! "Album Name"                        base
//!         │ + RuleSet::generate_all
//!         ▼
//! "Album Name (24bit) (96kHz)"        reconciled title
//! ```
//!
//! The result depends only on the base title and the metadata, never on which
//! flags were there before, so running it twice is a no-op the second time.
//! Nothing here touches the library: callers decide what to write back.

use crate::model::Item;
use crate::ruleset::RuleSet;

/// Outcome of reconciling one title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub title: String,
    pub changed: bool,
}

impl Reconciled {
    fn compare(original: &str, title: String) -> Self {
        let changed = title != original;
        Self { title, changed }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Annotator {
    rules: RuleSet,
}

impl Annotator {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Strip stale flags from `item.album` and append fresh ones.
    pub fn reconcile(&self, item: &Item) -> Reconciled {
        let base = self.rules.remove_all(&item.album);
        let flags = self.rules.generate_all(item);
        Reconciled::compare(&item.album, base + &flags)
    }

    /// Strip all flags without regenerating any.
    pub fn strip(&self, item: &Item) -> Reconciled {
        Reconciled::compare(&item.album, self.rules.remove_all(&item.album))
    }

    /// Flags the item's metadata implies, without a title.
    pub fn flags_for(&self, item: &Item) -> String {
        self.rules.generate_all(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{BitdepthRule, ChannelsRule, Rule, SamplerateRule};

    fn annotator() -> Annotator {
        Annotator::new(RuleSet::new(vec![
            Rule::Bitdepth(BitdepthRule::new(24)),
            Rule::Samplerate(SamplerateRule::new(96000)),
            Rule::Channels(ChannelsRule),
        ]))
    }

    #[test]
    fn reconcile_appends_flags() {
        let item = Item::new("Track", "Album Name").with_audio(24, 96000, 6);
        let result = annotator().reconcile(&item);
        assert_eq!(result.title, "Album Name (24bit) (96kHz) (5.1)");
        assert!(result.changed);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let annotator = annotator();
        let mut item = Item::new("Track", "Album Name").with_audio(24, 96000, 6);
        item.album = annotator.reconcile(&item).title;

        let again = annotator.reconcile(&item);
        assert!(!again.changed);
        assert_eq!(again.title, "Album Name (24bit) (96kHz) (5.1)");
    }

    #[test]
    fn reconcile_replaces_stale_flags() {
        let item = Item::new("Track", "Album Name (16bit) (44.1kHz)").with_audio(24, 96000, 2);
        let result = annotator().reconcile(&item);
        assert_eq!(result.title, "Album Name (24bit) (96kHz)");
        assert!(result.changed);
    }

    #[test]
    fn reconcile_drops_flags_no_longer_earned() {
        let item = Item::new("Track", "Album Name (24bit) (5.1)").with_audio(16, 44100, 2);
        let result = annotator().reconcile(&item);
        assert_eq!(result.title, "Album Name");
        assert!(result.changed);
    }

    #[test]
    fn unflagged_item_is_unchanged() {
        let item = Item::new("Track", "Album Name").with_audio(16, 44100, 2);
        let result = annotator().reconcile(&item);
        assert_eq!(result.title, "Album Name");
        assert!(!result.changed);
    }

    #[test]
    fn strip_removes_without_regenerating() {
        let item = Item::new("Track", "Album Name (24bit) (96kHz)").with_audio(24, 96000, 2);
        let result = annotator().strip(&item);
        assert_eq!(result.title, "Album Name");
        assert!(result.changed);

        let bare = Item::new("Track", "Album Name").with_audio(24, 96000, 2);
        assert!(!annotator().strip(&bare).changed);
    }

    #[test]
    fn flags_for_ignores_title() {
        let item = Item::new("Track", "Anything (24bit)").with_audio(24, 192000, 2);
        assert_eq!(annotator().flags_for(&item), " (24bit) (192kHz)");
    }
}
