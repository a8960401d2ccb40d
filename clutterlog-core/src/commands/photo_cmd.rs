//! Photo Commands
//!
//! Photos are copied into the app's photo directory so an item keeps its
//! picture even if the original file moves.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::Path;

use uuid::Uuid;

use crate::AppState;

const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "heic", "bmp"];

/// Copy an image into the photo directory; returns the path to store as
/// the item's `photo_uri`
pub async fn import_photo(state: &AppState, source: &Path) -> Result<String, String> {
    let extension = source
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .filter(|e| PHOTO_EXTENSIONS.contains(&e.as_str()))
        .ok_or_else(|| format!("Not a supported image file: {}", source.display()))?;

    let photos_dir = &state.config.photos_dir;
    fs::create_dir_all(photos_dir)
        .map_err(|e| format!("Failed to create photos directory: {}", e))?;

    let target = photos_dir.join(format!("{}.{}", Uuid::new_v4(), extension));
    fs::copy(source, &target)
        .map_err(|e| format!("Failed to copy {}: {}", source.display(), e))?;

    log::info!("Photo imported to {}", target.display());
    Ok(target.to_string_lossy().to_string())
}

/// Remove a photo copied by `import_photo` that ended up attached to nothing
pub fn discard_photo(uri: &str) {
    if let Err(e) = fs::remove_file(uri) {
        log::warn!("Failed to remove {}: {}", uri, e);
    }
}

/// Delete files in the photo directory that no item points at; returns how
/// many were removed.
///
/// Stored photos are matched by file name, so a data directory reached
/// through another path (a symlink, a moved folder) keeps its photos.
pub async fn clean_unused_photos(state: &AppState) -> Result<usize, String> {
    let referenced: HashSet<OsString> = state
        .item_repo
        .photo_uris()
        .await
        .map_err(|e| e.to_string())?
        .iter()
        .filter_map(|uri| Path::new(uri).file_name().map(|name| name.to_os_string()))
        .collect();

    let photos_dir = &state.config.photos_dir;
    if !photos_dir.is_dir() {
        return Ok(0);
    }

    let entries = fs::read_dir(photos_dir)
        .map_err(|e| format!("Failed to read photos directory: {}", e))?;

    let mut removed = 0;
    for entry in entries {
        let entry = entry.map_err(|e| e.to_string())?;
        let path = entry.path();
        if !path.is_file() || referenced.contains(&entry.file_name()) {
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(e) => log::warn!("Failed to remove {}: {}", path.display(), e),
        }
    }

    log::info!("Removed {} unused photos", removed);
    Ok(removed)
}
