//! drive_attachments - manage a Google Drive folder of meeting attachments.
//!
//! This library provides functionality to:
//! - Walk a Drive folder, optionally recursively and filtered by name
//! - Build a Markdown table of contents of view links, ordered by the
//!   numbering prefix in each file name (`2.1 Budget.pdf`)
//! - Export Docs and Slides to PDF and copy other files into another folder,
//!   keeping the sub-folder structure
//!
//! # Example
//!
//! ```no_run
//! use drive_attachments::{build_table, Authenticator, DriveClient, Selection};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let auth = Authenticator::from_file("token.json")?;
//!     let client = DriveClient::new(auth, None);
//!
//!     let selection = Selection::new(true, None);
//!     if let Some(toc) = build_table(&client, "folder-id", &selection).await {
//!         println!("{}", toc);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod export;
pub mod filter;
pub mod ids;
pub mod links;
pub mod listing;
pub mod models;
pub mod store;
pub mod toc;
pub mod walker;

// Re-exports for convenience
pub use auth::Authenticator;
pub use client::DriveClient;
pub use error::{DriveError, Result};
pub use export::{export_files, ExportReport};
pub use filter::{NamePattern, Selection};
pub use ids::extract_id;
pub use listing::file_listing;
pub use models::{FileKind, FileRecord};
pub use store::DriveStore;
pub use toc::{build_table, sort_and_render, TableOfContents};
pub use walker::walk;
