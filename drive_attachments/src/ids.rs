//! Accept Drive folder/file URLs wherever an ID is expected.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{DriveError, Result};

/// Folder, file and `open?id=` URL shapes, with the ID in the `id` group.
static DRIVE_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://drive\.google\.com/(?:drive/(?:u/\d+/)?folders/|file/d/|open\?id=)(?P<id>[A-Za-z0-9_-]+)",
    )
    .expect("Invalid Drive URL regex")
});

static ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid ID regex"));

/// Extract a Drive ID from a URL, or validate a raw ID.
///
/// ```
/// use drive_attachments::ids::extract_id;
///
/// let id = extract_id("https://drive.google.com/drive/folders/1abc123").unwrap();
/// assert_eq!(id, "1abc123");
/// assert_eq!(extract_id("1abc123").unwrap(), "1abc123");
/// ```
pub fn extract_id(url_or_id: &str) -> Result<String> {
    let trimmed = url_or_id.trim();

    if let Some(id) = DRIVE_URL_REGEX.captures(trimmed).and_then(|c| c.name("id")) {
        return Ok(id.as_str().to_string());
    }
    if ID_REGEX.is_match(trimmed) {
        return Ok(trimmed.to_string());
    }

    Err(DriveError::InvalidUrlOrId(url_or_id.to_string()))
}
