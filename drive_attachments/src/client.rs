//! Google Drive API client backing the [`DriveStore`] capability.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use tracing::{debug, warn};

use crate::auth::Authenticator;
use crate::error::{DriveError, Result};
use crate::models::{
    ApiErrorResponse, FileListResponse, FileRecord, WebViewLinkResponse, FOLDER_MIME_TYPE,
};
use crate::store::DriveStore;

/// Base URL for Google Drive API v3.
const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Upload URL for Google Drive API.
const UPLOAD_API_BASE: &str = "https://www.googleapis.com/upload/drive/v3";

/// Largest page the files.list endpoint hands out.
const LIST_PAGE_SIZE: &str = "1000";

const RECORD_FIELDS: &str = "id, name, mimeType, parents, trashed";

/// Client for the Drive v3 REST API.
pub struct DriveClient {
    drive_id: Option<String>,
    auth: Authenticator,
    http: Client,
    api_base: String,
    upload_base: String,
}

impl DriveClient {
    /// Create a new DriveClient.
    ///
    /// # Arguments
    /// * `auth` - Authenticator for obtaining access tokens
    /// * `drive_id` - Shared Drive to scope listings to; `None` searches all drives
    pub fn new(auth: Authenticator, drive_id: Option<String>) -> Self {
        Self {
            drive_id,
            auth,
            http: Client::new(),
            api_base: DRIVE_API_BASE.to_string(),
            upload_base: UPLOAD_API_BASE.to_string(),
        }
    }

    /// Point the client at a different host, e.g. a local mock server.
    pub fn with_base_urls(mut self, api_base: impl Into<String>, upload_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self.upload_base = upload_base.into();
        self
    }
}

/// Turn a non-success response into an [`DriveError::ApiError`].
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_body = response.text().await.unwrap_or_default();
    if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&error_body) {
        return Err(DriveError::ApiError {
            status: api_error.error.code,
            message: api_error.error.message,
        });
    }
    Err(DriveError::ApiError {
        status: status.as_u16(),
        message: error_body,
    })
}

#[async_trait]
impl DriveStore for DriveClient {
    async fn list_children(&self, folder_id: &str) -> Result<Vec<FileRecord>> {
        let token = self.auth.get_access_token().await?;
        let query = format!("'{}' in parents", folder_id.replace('\'', "\\'"));
        let fields = format!("nextPageToken, files({})", RECORD_FIELDS);

        let mut request = self
            .http
            .get(format!("{}/files", self.api_base))
            .bearer_auth(&token)
            .query(&[
                ("q", query.as_str()),
                ("includeItemsFromAllDrives", "true"),
                ("supportsAllDrives", "true"),
                ("pageSize", LIST_PAGE_SIZE),
                ("fields", fields.as_str()),
            ]);

        request = match &self.drive_id {
            Some(drive_id) => request.query(&[("corpora", "drive"), ("driveId", drive_id.as_str())]),
            None => request.query(&[("corpora", "allDrives")]),
        };

        debug!(folder_id, "listing folder");
        let response = check(request.send().await?).await?;
        let list_response: FileListResponse = response.json().await?;

        if list_response.next_page_token.is_some() {
            warn!(
                folder_id,
                returned = list_response.files.len(),
                "folder listing truncated to the first page"
            );
        }

        Ok(list_response.files)
    }

    async fn web_view_link(&self, file_id: &str) -> Result<Option<String>> {
        let token = self.auth.get_access_token().await?;

        let response = self
            .http
            .get(format!("{}/files/{}", self.api_base, file_id))
            .bearer_auth(&token)
            .query(&[("supportsAllDrives", "true"), ("fields", "webViewLink")])
            .send()
            .await?;

        let link: WebViewLinkResponse = check(response).await?.json().await?;
        Ok(link.web_view_link)
    }

    async fn export(&self, file_id: &str, mime_type: &str) -> Result<Vec<u8>> {
        let token = self.auth.get_access_token().await?;

        let response = self
            .http
            .get(format!("{}/files/{}/export", self.api_base, file_id))
            .bearer_auth(&token)
            .query(&[("mimeType", mime_type)])
            .send()
            .await?;

        let bytes = check(response).await?.bytes().await?;
        debug!(file_id, size = bytes.len(), "exported file");
        Ok(bytes.to_vec())
    }

    async fn create_file(
        &self,
        name: &str,
        parent_id: &str,
        mime_type: &str,
        content: Vec<u8>,
    ) -> Result<FileRecord> {
        let token = self.auth.get_access_token().await?;

        let metadata = serde_json::json!({
            "name": name,
            "parents": [parent_id]
        });

        let metadata_part = Part::text(metadata.to_string()).mime_str("application/json")?;

        let file_part = Part::bytes(content)
            .file_name(name.to_string())
            .mime_str(mime_type)?;

        let form = Form::new()
            .part("metadata", metadata_part)
            .part("file", file_part);

        let response = self
            .http
            .post(format!("{}/files", self.upload_base))
            .bearer_auth(&token)
            .query(&[
                ("uploadType", "multipart"),
                ("supportsAllDrives", "true"),
                ("fields", RECORD_FIELDS),
            ])
            .multipart(form)
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    async fn create_folder(&self, name: &str, parent_id: &str) -> Result<FileRecord> {
        let token = self.auth.get_access_token().await?;

        let metadata = serde_json::json!({
            "name": name,
            "mimeType": FOLDER_MIME_TYPE,
            "parents": [parent_id]
        });

        let response = self
            .http
            .post(format!("{}/files", self.api_base))
            .bearer_auth(&token)
            .query(&[("supportsAllDrives", "true"), ("fields", RECORD_FIELDS)])
            .json(&metadata)
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    async fn copy_file(&self, file_id: &str, name: &str, parent_id: &str) -> Result<FileRecord> {
        let token = self.auth.get_access_token().await?;

        let metadata = serde_json::json!({
            "name": name,
            "parents": [parent_id]
        });

        let response = self
            .http
            .post(format!("{}/files/{}/copy", self.api_base, file_id))
            .bearer_auth(&token)
            .query(&[("supportsAllDrives", "true"), ("fields", RECORD_FIELDS)])
            .json(&metadata)
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }
}
