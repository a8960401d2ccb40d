//! Item editor: add, edit, delete, mark and photo attachment

use std::io::Write;
use std::path::Path;

use clutterlog_core::commands::{
    create_item, delete_item, discard_photo, ensure_vocabulary, get_item, import_photo,
    mark_item_status, update_item, ItemDraft,
};
use clutterlog_core::domain::{Item, UsedStatus, VocabularyKind};
use clutterlog_core::AppState;

use super::{fail, status_badge};
use crate::cli::{AddArgs, EditArgs};

async fn require_item(state: &AppState, id: &str) -> anyhow::Result<Item> {
    get_item(state, id)
        .await
        .map_err(fail)?
        .ok_or_else(|| anyhow::anyhow!("Item {} not found", id))
}

/// Picking a new category or location in the editor adds it to the list
async fn remember_choices<W: Write>(state: &AppState, item: &Item, out: &mut W) -> anyhow::Result<()> {
    let choices = [
        (VocabularyKind::Category, Some(item.category.as_str())),
        (VocabularyKind::Location, item.location.as_deref()),
    ];
    for (kind, value) in choices {
        let Some(value) = value else { continue };
        if ensure_vocabulary(state, kind, value).await.map_err(fail)? {
            writeln!(out, "New {} '{}' added to the list.", kind.label(), value)?;
        }
    }
    Ok(())
}

/// A photo imported for a save that then failed is not kept
fn keep_photo_if_saved<T>(saved: Result<T, String>, imported: Option<&str>) -> anyhow::Result<T> {
    saved.map_err(|e| {
        if let Some(uri) = imported {
            discard_photo(uri);
        }
        fail(e)
    })
}

pub async fn add<W: Write>(state: &AppState, args: AddArgs, out: &mut W) -> anyhow::Result<()> {
    let photo_uri = match &args.photo {
        Some(path) => Some(import_photo(state, path).await.map_err(fail)?),
        None => None,
    };

    let draft = ItemDraft {
        name: args.name,
        category: args.category,
        location: args.location,
        notes: args.notes,
        date_added: args.added,
        photo_uri: photo_uri.clone(),
    };
    let item = keep_photo_if_saved(create_item(state, draft).await, photo_uri.as_deref())?;
    remember_choices(state, &item, out).await?;

    writeln!(out, "Added {} ({})", item.name, item.id)?;
    Ok(())
}

pub async fn edit<W: Write>(state: &AppState, id: &str, fields: EditArgs, out: &mut W) -> anyhow::Result<()> {
    let item = require_item(state, id).await?;
    let mut draft = ItemDraft::from_item(&item);

    if let Some(name) = fields.name {
        draft.name = name;
    }
    if let Some(category) = fields.category {
        draft.category = category;
    }
    if let Some(location) = fields.location {
        draft.location = location;
    }
    if let Some(notes) = fields.notes {
        draft.notes = Some(notes);
    }
    if let Some(added) = fields.added {
        draft.date_added = Some(added);
    }
    let mut imported = None;
    if fields.remove_photo {
        draft.photo_uri = None;
    } else if let Some(path) = &fields.photo {
        imported = Some(import_photo(state, path).await.map_err(fail)?);
        draft.photo_uri = imported.clone();
    }

    let saved = keep_photo_if_saved(update_item(state, id, draft).await, imported.as_deref())?;
    remember_choices(state, &saved, out).await?;

    writeln!(out, "Saved {}", saved.name)?;
    Ok(())
}

pub async fn delete<W: Write>(state: &AppState, id: &str, out: &mut W) -> anyhow::Result<()> {
    let item = require_item(state, id).await?;
    delete_item(state, id).await.map_err(fail)?;
    writeln!(out, "Deleted {}", item.name)?;
    Ok(())
}

pub async fn mark<W: Write>(state: &AppState, id: &str, status: UsedStatus, out: &mut W) -> anyhow::Result<()> {
    let item = mark_item_status(state, id, status).await.map_err(fail)?;
    writeln!(out, "{}: {}", item.name, status_badge(item.used_status))?;
    Ok(())
}

pub async fn attach_photo<W: Write>(state: &AppState, id: &str, file: &Path, out: &mut W) -> anyhow::Result<()> {
    let item = require_item(state, id).await?;
    let mut draft = ItemDraft::from_item(&item);
    let imported = import_photo(state, file).await.map_err(fail)?;
    draft.photo_uri = Some(imported.clone());

    let saved = keep_photo_if_saved(update_item(state, id, draft).await, Some(imported.as_str()))?;
    writeln!(out, "Photo attached to {}", saved.name)?;
    Ok(())
}
