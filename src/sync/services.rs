use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info};

use crate::drive::{AccessToken, DriveError, FileQuery, FileStore};

/// Finds a non-trashed folder by exact name, creating it if absent.
/// With duplicate names the first match wins.
pub async fn find_or_create_folder(
    store: &dyn FileStore,
    token: &AccessToken,
    name: &str,
) -> Result<String, DriveError> {
    if let Some(id) = find_folder(store, token, name).await? {
        return Ok(id);
    }
    let id = store.create_folder(token, name).await?;
    info!(folder_id = %id, folder = name, "created sync folder");
    Ok(id)
}

async fn find_folder(
    store: &dyn FileStore,
    token: &AccessToken,
    name: &str,
) -> Result<Option<String>, DriveError> {
    let found = store.list(token, &FileQuery::folder(name)).await?;
    Ok(found.into_iter().next().map(|f| {
        debug!(folder_id = %f.id, folder = %f.name, "found sync folder");
        f.id
    }))
}

async fn find_file(
    store: &dyn FileStore,
    token: &AccessToken,
    folder_id: &str,
    name: &str,
) -> Result<Option<String>, DriveError> {
    let found = store.list(token, &FileQuery::file_in(folder_id, name)).await?;
    if found.len() > 1 {
        debug!(count = found.len(), file = name, "duplicate files in folder; using the first");
    }
    Ok(found.into_iter().next().map(|f| f.id))
}

/// Writes `payload` as JSON to `folder_name/file_name`, overwriting any
/// existing content. Returns the file id.
///
/// There is a window between the lookup and the create in which a concurrent
/// caller can create the same file; the store then holds two and later
/// lookups pick the first.
pub async fn upsert<T: Serialize + ?Sized>(
    store: &dyn FileStore,
    token: &AccessToken,
    folder_name: &str,
    file_name: &str,
    payload: &T,
) -> Result<String, DriveError> {
    let body = Bytes::from(serde_json::to_vec(payload)?);
    let folder_id = find_or_create_folder(store, token, folder_name).await?;

    match find_file(store, token, &folder_id, file_name).await? {
        Some(file_id) => {
            store.update_file(token, &file_id, body).await?;
            debug!(%file_id, "overwrote existing snapshot");
            Ok(file_id)
        }
        None => {
            let file_id = store.create_file(token, &folder_id, file_name, body).await?;
            debug!(%file_id, %folder_id, "created snapshot");
            Ok(file_id)
        }
    }
}

/// Reads the snapshot back. `None` when the folder or the file does not
/// exist; nothing is created.
pub async fn fetch(
    store: &dyn FileStore,
    token: &AccessToken,
    folder_name: &str,
    file_name: &str,
) -> Result<Option<serde_json::Value>, DriveError> {
    let Some(folder_id) = find_folder(store, token, folder_name).await? else {
        return Ok(None);
    };
    let Some(file_id) = find_file(store, token, &folder_id, file_name).await? else {
        return Ok(None);
    };
    let raw = store.download(token, &file_id).await?;
    Ok(Some(serde_json::from_slice(&raw)?))
}
