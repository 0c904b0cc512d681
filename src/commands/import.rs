//! Import hooks.
//!
//! When a whole album is imported, one representative item decides the flags
//! for the album. Items of one album can disagree (a 24-bit bonus disc next to
//! 16-bit tracks), so the choice is explicit:
//!
//! - [`RepresentativePolicy::First`]: the first item in library order.
//! - [`RepresentativePolicy::HighestResolution`]: the item with the greatest
//!   `(bitdepth, samplerate, channels)`, earliest on ties.
//!
//! Disagreement is reported as a warning either way.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::annotator::Annotator;
use crate::commands::update::update_item;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::library::{Library, SyncOptions};
use crate::model::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepresentativePolicy {
    #[default]
    First,
    HighestResolution,
}

impl RepresentativePolicy {
    /// Index of the representative within `items`.
    pub fn select(&self, items: &[Item]) -> Option<usize> {
        match self {
            RepresentativePolicy::First => (!items.is_empty()).then_some(0),
            RepresentativePolicy::HighestResolution => items
                .iter()
                .enumerate()
                // max_by_key keeps the last maximum; reverse to keep the earliest
                .rev()
                .max_by_key(|(_, item)| (item.bitdepth, item.samplerate, item.channels))
                .map(|(index, _)| index),
        }
    }
}

/// Reconcile a freshly imported album from its representative item.
pub fn album_imported<L: Library>(
    library: &mut L,
    annotator: &Annotator,
    album_id: &Uuid,
    policy: RepresentativePolicy,
    options: SyncOptions,
) -> Result<CmdResult> {
    let items = library.album_items(album_id)?;
    let mut result = CmdResult::default();

    let Some(index) = policy.select(&items) else {
        warn!(album = %album_id, "Imported album has no items");
        result.add_message(CmdMessage::warning(format!(
            "Album {} has no items, flags not updated",
            album_id
        )));
        return Ok(result);
    };

    let mut representative = items[index].clone();
    let flags = annotator.flags_for(&representative);
    let disagreeing = items
        .iter()
        .filter(|item| annotator.flags_for(item) != flags)
        .count();
    if disagreeing > 0 {
        warn!(
            album = %album_id,
            disagreeing,
            policy = ?policy,
            "Album items imply different flags"
        );
        result.add_message(CmdMessage::warning(format!(
            "{} of {} items imply different flags; using {:?} item \"{}\"",
            disagreeing,
            items.len(),
            policy,
            representative.title
        )));
    }

    debug!(album = %album_id, item = %representative.id, "Using representative item");
    update_item(library, annotator, &mut representative, options, &mut result)?;
    result.summarize("Updated");
    Ok(result)
}

/// Reconcile a freshly imported item.
pub fn item_imported<L: Library>(
    library: &mut L,
    annotator: &Annotator,
    item_id: &Uuid,
    options: SyncOptions,
) -> Result<CmdResult> {
    let mut item = library.get_item(item_id)?;
    let mut result = CmdResult::default();
    update_item(library, annotator, &mut item, options, &mut result)?;
    result.summarize("Updated");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::library::memory::fixtures::LibraryFixture;
    use crate::library::ItemSelector;
    use crate::model::Album;
    use crate::rules::{BitdepthRule, Rule, SamplerateRule};
    use crate::ruleset::RuleSet;

    fn annotator() -> Annotator {
        Annotator::new(RuleSet::new(vec![
            Rule::Bitdepth(BitdepthRule::new(24)),
            Rule::Samplerate(SamplerateRule::new(96000)),
        ]))
    }

    fn items(formats: &[(u32, u32, u32)]) -> Vec<Item> {
        formats
            .iter()
            .map(|(b, s, c)| Item::new("t", "Album").with_audio(*b, *s, *c))
            .collect()
    }

    #[test]
    fn first_policy_picks_first() {
        let list = items(&[(16, 44100, 2), (24, 96000, 2)]);
        assert_eq!(RepresentativePolicy::First.select(&list), Some(0));
        assert_eq!(RepresentativePolicy::First.select(&[]), None);
    }

    #[test]
    fn highest_resolution_prefers_quality_then_order() {
        let list = items(&[(16, 44100, 2), (24, 96000, 2), (24, 96000, 2), (24, 48000, 6)]);
        assert_eq!(RepresentativePolicy::HighestResolution.select(&list), Some(1));
        assert_eq!(RepresentativePolicy::HighestResolution.select(&[]), None);
    }

    #[test]
    fn album_import_flags_album() {
        let mut fixture = LibraryFixture::new().with_album("Album", 3, (24, 96000, 2));
        let album_id = fixture.album_id("Album");

        let result = album_imported(
            &mut fixture.library,
            &annotator(),
            &album_id,
            RepresentativePolicy::First,
            SyncOptions::default(),
        )
        .unwrap();

        assert_eq!(
            fixture.library.get_album(&album_id).unwrap().album,
            "Album (24bit) (96kHz)"
        );
        // Album sync carries the title to the other items
        for item in fixture.library.album_items(&album_id).unwrap() {
            assert_eq!(item.album, "Album (24bit) (96kHz)");
        }
        assert!(result
            .messages
            .iter()
            .all(|m| m.level != MessageLevel::Warning));
    }

    #[test]
    fn mixed_album_depends_on_policy_and_warns() {
        let formats = [(16, 44100, 2), (24, 96000, 2)];

        let mut fixture = LibraryFixture::new().with_mixed_album("Mixed", &formats);
        let album_id = fixture.album_id("Mixed");
        let result = album_imported(
            &mut fixture.library,
            &annotator(),
            &album_id,
            RepresentativePolicy::First,
            SyncOptions::default(),
        )
        .unwrap();
        assert_eq!(fixture.library.get_album(&album_id).unwrap().album, "Mixed");
        assert_eq!(result.messages[0].level, MessageLevel::Warning);

        let mut fixture = LibraryFixture::new().with_mixed_album("Mixed", &formats);
        let album_id = fixture.album_id("Mixed");
        album_imported(
            &mut fixture.library,
            &annotator(),
            &album_id,
            RepresentativePolicy::HighestResolution,
            SyncOptions::default(),
        )
        .unwrap();
        assert_eq!(
            fixture.library.get_album(&album_id).unwrap().album,
            "Mixed (24bit) (96kHz)"
        );
    }

    #[test]
    fn empty_album_warns_without_error() {
        let mut fixture = LibraryFixture::new();
        let album_id = fixture.library.insert_album(Album::new("Empty"), Vec::new());

        let result = album_imported(
            &mut fixture.library,
            &annotator(),
            &album_id,
            RepresentativePolicy::First,
            SyncOptions::default(),
        )
        .unwrap();

        assert!(result.is_unchanged());
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
    }

    #[test]
    fn item_import_flags_singleton() {
        let mut fixture = LibraryFixture::new().with_singleton("Loose", "Single", (24, 192000, 2));
        let id = fixture.library.select_items(&ItemSelector::All).unwrap()[0].id;

        let result = item_imported(
            &mut fixture.library,
            &annotator(),
            &id,
            SyncOptions::default(),
        )
        .unwrap();

        assert_eq!(result.changed_items.len(), 1);
        assert_eq!(
            fixture.library.get_item(&id).unwrap().album,
            "Single (24bit) (192kHz)"
        );
    }
}
