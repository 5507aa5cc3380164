//! Folder enumeration, flat or recursive.

use tracing::{debug, error};

use crate::models::FileRecord;
use crate::store::DriveStore;

/// List the non-trashed children of `folder_id`.
///
/// A failed listing is logged and reported as an empty folder.
async fn list_live_children(store: &dyn DriveStore, folder_id: &str) -> Vec<FileRecord> {
    match store.list_children(folder_id).await {
        Ok(children) => children.into_iter().filter(|c| !c.trashed).collect(),
        Err(e) => {
            error!(folder_id, error = %e, "failed to list folder, skipping it");
            Vec::new()
        }
    }
}

/// Enumerate the files under `root_id`.
///
/// Recursive walks are depth-first pre-order: every child is emitted before
/// the contents of that child, and `relative_path` holds the `/`-terminated
/// chain of folder names between the root and the record.
pub async fn walk(store: &dyn DriveStore, root_id: &str, recursive: bool) -> Vec<FileRecord> {
    let mut children = list_live_children(store, root_id).await;
    for child in &mut children {
        child.relative_path.clear();
    }
    if !recursive {
        return children;
    }

    let mut records = Vec::new();
    // Reversed so the stack pops children in listing order.
    let mut pending: Vec<FileRecord> = children.into_iter().rev().collect();

    while let Some(record) = pending.pop() {
        if record.is_folder() {
            let path = format!("{}{}/", record.relative_path, record.name);
            debug!(folder = %path, "descending");
            let nested = list_live_children(store, &record.id).await;
            pending.extend(nested.into_iter().rev().map(|mut child| {
                child.relative_path = path.clone();
                child
            }));
        }
        records.push(record);
    }

    records
}
