//! Export Google Docs and Slides to PDF and copy everything else into a
//! destination folder, mirroring the source folder structure.

use std::collections::HashMap;

use tracing::{error, info};

use crate::error::Result;
use crate::filter::Selection;
use crate::models::{FileRecord, PDF_MIME_TYPE};
use crate::store::DriveStore;

/// Counts for one export run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub exported: usize,
    pub copied: usize,
    pub failed: usize,
}

impl std::fmt::Display for ExportReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} exported as PDF, {} copied, {} failed",
            self.exported, self.copied, self.failed
        )
    }
}

enum Outcome {
    Exported,
    Copied,
}

/// Destination sub-folders, resolved on demand and remembered by relative path.
struct DestinationTree<'a> {
    store: &'a dyn DriveStore,
    root_id: String,
    resolved: HashMap<String, String>,
}

impl<'a> DestinationTree<'a> {
    fn new(store: &'a dyn DriveStore, root_id: &str) -> Self {
        Self {
            store,
            root_id: root_id.to_string(),
            resolved: HashMap::new(),
        }
    }

    /// ID of the destination folder for a `/`-separated relative path,
    /// creating missing folders along the way.
    async fn resolve(&mut self, relative_path: &str) -> Result<String> {
        let mut parent_id = self.root_id.clone();
        let mut path = String::new();

        for segment in relative_path.split('/').filter(|s| !s.is_empty()) {
            path.push_str(segment);
            path.push('/');

            if let Some(id) = self.resolved.get(&path) {
                parent_id = id.clone();
                continue;
            }

            let id = self.get_or_create(&parent_id, segment).await?;
            self.resolved.insert(path.clone(), id.clone());
            parent_id = id;
        }

        Ok(parent_id)
    }

    /// Only direct children of `parent_id` are considered, so equally named
    /// folders in other branches never collide.
    async fn get_or_create(&self, parent_id: &str, name: &str) -> Result<String> {
        let existing = self
            .store
            .list_children(parent_id)
            .await?
            .into_iter()
            .find(|child| !child.trashed && child.is_folder() && child.name == name);

        match existing {
            Some(folder) => Ok(folder.id),
            None => {
                info!(parent_id, name, "creating destination folder");
                Ok(self.store.create_folder(name, parent_id).await?.id)
            }
        }
    }
}

async fn process_file(
    store: &dyn DriveStore,
    tree: &mut DestinationTree<'_>,
    record: &FileRecord,
) -> Result<Outcome> {
    let parent_id = tree.resolve(&record.relative_path).await?;

    if record.kind().exports_to_pdf() {
        let pdf = store.export(&record.id, PDF_MIME_TYPE).await?;
        let pdf_name = format!("{}.pdf", record.name);
        store
            .create_file(&pdf_name, &parent_id, PDF_MIME_TYPE, pdf)
            .await?;
        println!("Exported and uploaded {} as a PDF.", record.name);
        Ok(Outcome::Exported)
    } else {
        store
            .copy_file(&record.id, &record.name, &parent_id)
            .await?;
        if record.relative_path.is_empty() {
            println!("Copied {} to the target folder.", record.name);
        } else {
            println!("Copied {} to {}.", record.name, record.relative_path);
        }
        Ok(Outcome::Copied)
    }
}

/// Export or copy every selected file under `source_id` into `destination_id`.
///
/// Folders are not copied as objects; the destination tree is rebuilt from
/// each file's `relative_path`. A failing file is logged and counted, and the
/// remaining files are still processed.
pub async fn export_files(
    store: &dyn DriveStore,
    source_id: &str,
    destination_id: &str,
    selection: &Selection,
) -> ExportReport {
    let records = selection.collect(store, source_id).await;
    let mut report = ExportReport::default();

    if records.is_empty() {
        println!("No matching files found in the source folder.");
        return report;
    }

    let mut tree = DestinationTree::new(store, destination_id);

    for record in records.iter().filter(|r| !r.is_folder()) {
        println!("Processing {}...", record.name);

        match process_file(store, &mut tree, record).await {
            Ok(Outcome::Exported) => report.exported += 1,
            Ok(Outcome::Copied) => report.copied += 1,
            Err(e) => {
                error!(
                    file_id = %record.id,
                    name = %record.name,
                    error = %e,
                    "failed to export or copy file"
                );
                report.failed += 1;
            }
        }
    }

    report
}
