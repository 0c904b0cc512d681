use tracing::{debug, warn};

use crate::commands::{CmdMessage, CmdResult, TitleChange};
use crate::error::{FlagsError, Result};
use crate::library::{Library, SyncOptions};
use crate::model::Item;

/// Write `new_title` to the item and then to its parent album.
///
/// Each record is synced only if its stored title differs. The album is
/// compared against its own title, not the item's, since another item of the
/// same album may already have brought it up to date.
pub fn write_back<L: Library>(
    library: &mut L,
    item: &mut Item,
    new_title: &str,
    options: SyncOptions,
    result: &mut CmdResult,
) -> Result<()> {
    if item.album != new_title {
        debug!(item = %item.id, from = %item.album, to = %new_title, "Changing item album title");
        let from = std::mem::replace(&mut item.album, new_title.to_string());
        library.sync_item(item, options)?;
        result.changed_items.push(TitleChange {
            id: item.id,
            from,
            to: new_title.to_string(),
        });
    }

    let Some(album_id) = item.album_id else {
        return Ok(());
    };

    let mut album = match library.get_album(&album_id) {
        Ok(album) => album,
        Err(FlagsError::AlbumNotFound(id)) => {
            warn!(item = %item.id, album = %id, "Item points at a missing album, skipping album update");
            result.add_message(CmdMessage::warning(format!(
                "Album {} not found, only the item title was updated",
                id
            )));
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    if album.album != new_title {
        debug!(album = %album.id, from = %album.album, to = %new_title, "Changing album title");
        let from = std::mem::replace(&mut album.album, new_title.to_string());
        library.sync_album(&album, options)?;
        result.changed_albums.push(TitleChange {
            id: album.id,
            from,
            to: new_title.to_string(),
        });
    }

    Ok(())
}
