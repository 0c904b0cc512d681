use tracing::{debug, info};

use crate::annotator::Annotator;
use crate::commands::helpers::write_back;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::library::{ItemSelector, Library, SyncOptions};

/// Strip every known flag from the selected items and their albums.
pub fn run<L: Library>(
    library: &mut L,
    annotator: &Annotator,
    selector: &ItemSelector,
    options: SyncOptions,
) -> Result<CmdResult> {
    let selected = library.select_items(selector)?;
    let mut result = CmdResult::default();

    for listed in selected {
        let mut item = library.get_item(&listed.id)?;
        debug!(item = %item.id, title = %item.title, "Removing flags for item");
        let stripped = annotator.strip(&item);
        write_back(library, &mut item, &stripped.title, options, &mut result)?;
    }

    info!(
        items = result.changed_items.len(),
        albums = result.changed_albums.len(),
        "Removed album flags"
    );
    result.summarize("Removed");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::update;
    use crate::config::FieldMapping;
    use crate::library::memory::fixtures::LibraryFixture;
    use crate::model::{Album, Item};
    use crate::rules::{BitdepthRule, FieldMappingRule, Rule, SamplerateRule};
    use crate::ruleset::RuleSet;

    fn annotator() -> Annotator {
        let mut albumtype = FieldMapping::new();
        albumtype.insert("live".into(), "Live".into());
        Annotator::new(RuleSet::new(vec![
            Rule::FieldMapping(FieldMappingRule::new("albumtype", &albumtype).unwrap()),
            Rule::Bitdepth(BitdepthRule::new(24)),
            Rule::Samplerate(SamplerateRule::new(96000)),
        ]))
    }

    #[test]
    fn remove_undoes_update() {
        let mut fixture = LibraryFixture::new().with_album("Album Name", 2, (24, 96000, 2));
        let album_id = fixture.album_id("Album Name");
        let annotator = annotator();

        update::run(
            &mut fixture.library,
            &annotator,
            &ItemSelector::All,
            SyncOptions::default(),
        )
        .unwrap();
        assert_eq!(
            fixture.library.get_album(&album_id).unwrap().album,
            "Album Name (24bit) (96kHz)"
        );

        let result = run(
            &mut fixture.library,
            &annotator,
            &ItemSelector::All,
            SyncOptions::default(),
        )
        .unwrap();

        assert_eq!(fixture.library.get_album(&album_id).unwrap().album, "Album Name");
        for item in fixture.library.album_items(&album_id).unwrap() {
            assert_eq!(item.album, "Album Name");
        }
        assert_eq!(result.changed_albums.len(), 1);
        assert_eq!(result.changed_albums[0].from, "Album Name (24bit) (96kHz)");
    }

    #[test]
    fn removes_flags_the_metadata_no_longer_supports() {
        let mut fixture = LibraryFixture::new();
        let item = Item::new("Track 1", "Concert (Live) (16bit)").with_audio(16, 44100, 2);
        fixture
            .library
            .insert_album(Album::new("Concert (Live) (16bit)"), vec![item]);

        run(
            &mut fixture.library,
            &annotator(),
            &ItemSelector::AlbumTitle("concert".into()),
            SyncOptions::default(),
        )
        .unwrap();

        let album_id = fixture.album_id("Concert");
        assert_eq!(fixture.library.get_album(&album_id).unwrap().album, "Concert");
    }

    #[test]
    fn nothing_to_remove() {
        let mut fixture = LibraryFixture::new().with_album("Plain", 2, (16, 44100, 2));
        let result = run(
            &mut fixture.library,
            &annotator(),
            &ItemSelector::All,
            SyncOptions::default(),
        )
        .unwrap();
        assert!(result.is_unchanged());
        assert!(fixture.library.sync_log().is_empty());
    }
}
