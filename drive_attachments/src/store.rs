//! The remote file store capability consumed by the walker, exporter and
//! link publisher.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::FileRecord;

/// Operations this tool needs from a Drive-like file store.
#[async_trait]
pub trait DriveStore: Send + Sync {
    /// Direct children of a folder, trashed entries included.
    async fn list_children(&self, folder_id: &str) -> Result<Vec<FileRecord>>;

    /// The browser link for a file or folder, if the store has one.
    async fn web_view_link(&self, file_id: &str) -> Result<Option<String>>;

    /// Convert a Google-native file to `mime_type` and return the bytes.
    async fn export(&self, file_id: &str, mime_type: &str) -> Result<Vec<u8>>;

    async fn create_file(
        &self,
        name: &str,
        parent_id: &str,
        mime_type: &str,
        content: Vec<u8>,
    ) -> Result<FileRecord>;

    async fn create_folder(&self, name: &str, parent_id: &str) -> Result<FileRecord>;

    /// Server-side copy of `file_id` into `parent_id` under `name`.
    async fn copy_file(&self, file_id: &str, name: &str, parent_id: &str) -> Result<FileRecord>;
}
