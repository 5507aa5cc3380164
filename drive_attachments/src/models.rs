//! Data models for Google Drive API requests and responses.

use serde::{Deserialize, Serialize};

pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";
pub const DOCUMENT_MIME_TYPE: &str = "application/vnd.google-apps.document";
pub const PRESENTATION_MIME_TYPE: &str = "application/vnd.google-apps.presentation";
pub const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// What a Drive entry is, as far as this tool cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Folder,
    Document,
    Presentation,
    Spreadsheet,
    Other,
}

impl FileKind {
    pub fn from_mime(mime_type: Option<&str>) -> Self {
        match mime_type {
            Some(FOLDER_MIME_TYPE) => FileKind::Folder,
            Some(DOCUMENT_MIME_TYPE) => FileKind::Document,
            Some(PRESENTATION_MIME_TYPE) => FileKind::Presentation,
            Some(SPREADSHEET_MIME_TYPE) => FileKind::Spreadsheet,
            _ => FileKind::Other,
        }
    }

    /// Google-native formats that get converted to PDF instead of copied.
    pub fn exports_to_pdf(self) -> bool {
        matches!(self, FileKind::Document | FileKind::Presentation)
    }
}

/// A file or folder discovered while walking a Drive folder.
///
/// `relative_path` and `link` are filled in locally and never read from the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub parents: Vec<String>,
    #[serde(default)]
    pub trashed: bool,
    #[serde(skip)]
    pub relative_path: String,
    #[serde(skip)]
    pub link: Option<String>,
}

impl FileRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, mime_type: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            mime_type: Some(mime_type.to_string()),
            parents: Vec::new(),
            trashed: false,
            relative_path: String::new(),
            link: None,
        }
    }

    pub fn kind(&self) -> FileKind {
        FileKind::from_mime(self.mime_type.as_deref())
    }

    pub fn is_folder(&self) -> bool {
        self.kind() == FileKind::Folder
    }
}

/// Response from the files.list API endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListResponse {
    #[serde(default)]
    pub files: Vec<FileRecord>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Response from files.get when only the view link is requested.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebViewLinkResponse {
    #[serde(default)]
    pub web_view_link: Option<String>,
}

/// Google API error response.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub code: u16,
    pub message: String,
}

/// Service account key as downloaded from the Cloud console.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceAccountCredentials {
    pub client_email: String,
    pub private_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_uri: Option<String>,
}

/// OAuth client credentials plus the user's refresh token.
///
/// `access_token` and `expiry` (Unix seconds) are the cached session, rewritten
/// after every refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizedUserCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_uri: Option<String>,
}

/// Credentials file contents, discriminated by Google's `type` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialsFile {
    ServiceAccount(ServiceAccountCredentials),
    AuthorizedUser(AuthorizedUserCredentials),
}

/// OAuth2 token response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub expires_in: u64,
}
