//! Shareable link lookup.
//!
//! Links are read, never granted: sharing relies on the folder's existing
//! permissions, and no permission is created here.

use tracing::{error, warn};

use crate::store::DriveStore;

/// Fetch the browser link for `file_id`, logging and returning `None` on failure.
pub async fn publish_link(store: &dyn DriveStore, file_id: &str) -> Option<String> {
    match store.web_view_link(file_id).await {
        Ok(Some(link)) => Some(link),
        Ok(None) => {
            warn!(file_id, "store returned no view link");
            None
        }
        Err(e) => {
            error!(file_id, error = %e, "failed to fetch view link");
            None
        }
    }
}
