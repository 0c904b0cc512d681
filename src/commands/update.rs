use tracing::{debug, info};

use crate::annotator::Annotator;
use crate::commands::helpers::write_back;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::library::{ItemSelector, Library, SyncOptions};
use crate::model::Item;

/// Reconcile flags on every selected item and its album.
pub fn run<L: Library>(
    library: &mut L,
    annotator: &Annotator,
    selector: &ItemSelector,
    options: SyncOptions,
) -> Result<CmdResult> {
    let selected = library.select_items(selector)?;
    let mut result = CmdResult::default();

    for listed in selected {
        // A previous album sync may have rewritten this item's title.
        let mut item = library.get_item(&listed.id)?;
        update_item(library, annotator, &mut item, options, &mut result)?;
    }

    info!(
        items = result.changed_items.len(),
        albums = result.changed_albums.len(),
        "Updated album flags"
    );
    result.summarize("Updated");
    Ok(result)
}

pub(crate) fn update_item<L: Library>(
    library: &mut L,
    annotator: &Annotator,
    item: &mut Item,
    options: SyncOptions,
    result: &mut CmdResult,
) -> Result<()> {
    debug!(item = %item.id, title = %item.title, "Updating flags for item");
    let reconciled = annotator.reconcile(item);
    debug!(flags = %annotator.flags_for(item), "Generated flags");
    write_back(library, item, &reconciled.title, options, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::memory::fixtures::LibraryFixture;
    use crate::rules::{BitdepthRule, ChannelsRule, Rule, SamplerateRule};
    use crate::ruleset::RuleSet;

    fn annotator() -> Annotator {
        Annotator::new(RuleSet::new(vec![
            Rule::Bitdepth(BitdepthRule::new(24)),
            Rule::Samplerate(SamplerateRule::new(96000)),
            Rule::Channels(ChannelsRule),
        ]))
    }

    #[test]
    fn flags_every_item_and_album() {
        let mut fixture = LibraryFixture::new().with_album("Album Name", 3, (24, 96000, 6));
        let album_id = fixture.album_id("Album Name");

        let result = run(
            &mut fixture.library,
            &annotator(),
            &ItemSelector::All,
            SyncOptions::default(),
        )
        .unwrap();

        let album = fixture.library.get_album(&album_id).unwrap();
        assert_eq!(album.album, "Album Name (24bit) (96kHz) (5.1)");
        for item in fixture.library.album_items(&album_id).unwrap() {
            assert_eq!(item.album, "Album Name (24bit) (96kHz) (5.1)");
        }
        // First item changes the album, which propagates to the rest
        assert_eq!(result.changed_items.len(), 1);
        assert_eq!(result.changed_albums.len(), 1);
    }

    #[test]
    fn second_run_changes_nothing() {
        let mut fixture = LibraryFixture::new().with_album("Album Name", 2, (24, 192000, 2));
        let annotator = annotator();
        run(
            &mut fixture.library,
            &annotator,
            &ItemSelector::All,
            SyncOptions::default(),
        )
        .unwrap();
        fixture.library.clear_sync_log();

        let result = run(
            &mut fixture.library,
            &annotator,
            &ItemSelector::All,
            SyncOptions::default(),
        )
        .unwrap();

        assert!(result.is_unchanged());
        assert!(fixture.library.sync_log().is_empty());
        assert_eq!(result.messages[0].content, "Album flags already up to date");
    }

    #[test]
    fn only_selected_albums_are_touched() {
        let mut fixture = LibraryFixture::new()
            .with_album("Hi Res", 1, (24, 96000, 2))
            .with_album("Also Hi Res", 1, (24, 96000, 2));
        let target = fixture.album_id("Also");

        run(
            &mut fixture.library,
            &annotator(),
            &ItemSelector::Albums(vec![target]),
            SyncOptions::default(),
        )
        .unwrap();

        let other = fixture.album_id("Hi Res");
        assert_eq!(fixture.library.get_album(&other).unwrap().album, "Hi Res");
        assert_eq!(
            fixture.library.get_album(&target).unwrap().album,
            "Also Hi Res (24bit) (96kHz)"
        );
    }

    #[test]
    fn options_are_forwarded_to_library() {
        let mut fixture = LibraryFixture::new().with_singleton("Loose", "Single", (24, 96000, 2));
        let options = SyncOptions {
            write_tags: false,
            move_files: true,
        };

        run(&mut fixture.library, &annotator(), &ItemSelector::All, options).unwrap();

        assert_eq!(fixture.library.sync_log().len(), 1);
        assert_eq!(fixture.library.sync_log()[0].options, options);
    }
}
