//! In-memory DriveStore used by the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use drive_attachments::models::FOLDER_MIME_TYPE;
use drive_attachments::{DriveError, DriveStore, FileRecord, Result};

#[derive(Default)]
struct State {
    files: Vec<FileRecord>,
    contents: HashMap<String, Vec<u8>>,
    next_id: usize,
    failing_lists: HashSet<String>,
    failing_exports: HashSet<String>,
    failing_links: HashSet<String>,
    list_calls: Vec<String>,
}

/// A folder tree kept in memory; children come back in insertion order.
#[derive(Default)]
pub struct FakeStore {
    state: Mutex<State>,
}

fn api_error(status: u16, message: &str) -> DriveError {
    DriveError::ApiError {
        status,
        message: message.to_string(),
    }
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, id: &str, name: &str, mime_type: &str, parent: &str) -> &Self {
        let mut record = FileRecord::new(id, name, mime_type);
        record.parents = vec![parent.to_string()];
        self.state.lock().unwrap().files.push(record);
        self
    }

    pub fn add_folder(&self, id: &str, name: &str, parent: &str) -> &Self {
        self.add(id, name, FOLDER_MIME_TYPE, parent)
    }

    pub fn add_trashed(&self, id: &str, name: &str, mime_type: &str, parent: &str) -> &Self {
        let mut record = FileRecord::new(id, name, mime_type);
        record.parents = vec![parent.to_string()];
        record.trashed = true;
        self.state.lock().unwrap().files.push(record);
        self
    }

    pub fn fail_listing(&self, folder_id: &str) {
        self.state.lock().unwrap().failing_lists.insert(folder_id.to_string());
    }

    pub fn fail_export(&self, file_id: &str) {
        self.state.lock().unwrap().failing_exports.insert(file_id.to_string());
    }

    pub fn fail_link(&self, file_id: &str) {
        self.state.lock().unwrap().failing_links.insert(file_id.to_string());
    }

    /// Non-trashed children of a folder.
    pub fn children_of(&self, parent: &str) -> Vec<FileRecord> {
        self.state
            .lock()
            .unwrap()
            .files
            .iter()
            .filter(|f| !f.trashed && f.parents.iter().any(|p| p == parent))
            .cloned()
            .collect()
    }

    pub fn child_names(&self, parent: &str) -> Vec<String> {
        self.children_of(parent).into_iter().map(|f| f.name).collect()
    }

    /// ID of the single child folder called `name`.
    pub fn folder_named(&self, parent: &str, name: &str) -> String {
        let matches: Vec<FileRecord> = self
            .children_of(parent)
            .into_iter()
            .filter(|f| f.is_folder() && f.name == name)
            .collect();
        assert_eq!(matches.len(), 1, "expected exactly one folder {:?} in {}", name, parent);
        matches[0].id.clone()
    }

    pub fn content(&self, file_id: &str) -> Option<Vec<u8>> {
        self.state.lock().unwrap().contents.get(file_id).cloned()
    }

    pub fn list_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().list_calls.clone()
    }

    fn insert_new(&self, name: &str, mime_type: &str, parent_id: &str) -> FileRecord {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let mut record = FileRecord::new(format!("new{}", state.next_id), name, mime_type);
        record.parents = vec![parent_id.to_string()];
        state.files.push(record.clone());
        record
    }
}

#[async_trait]
impl DriveStore for FakeStore {
    async fn list_children(&self, folder_id: &str) -> Result<Vec<FileRecord>> {
        let mut state = self.state.lock().unwrap();
        state.list_calls.push(folder_id.to_string());
        if state.failing_lists.contains(folder_id) {
            return Err(api_error(500, "backend error"));
        }
        Ok(state
            .files
            .iter()
            .filter(|f| f.parents.iter().any(|p| p == folder_id))
            .cloned()
            .collect())
    }

    async fn web_view_link(&self, file_id: &str) -> Result<Option<String>> {
        if self.state.lock().unwrap().failing_links.contains(file_id) {
            return Err(api_error(403, "insufficient permissions"));
        }
        Ok(Some(format!("https://drive.test/{}", file_id)))
    }

    async fn export(&self, file_id: &str, mime_type: &str) -> Result<Vec<u8>> {
        if self.state.lock().unwrap().failing_exports.contains(file_id) {
            return Err(api_error(500, "export failed"));
        }
        Ok(format!("{} of {}", mime_type, file_id).into_bytes())
    }

    async fn create_file(
        &self,
        name: &str,
        parent_id: &str,
        mime_type: &str,
        content: Vec<u8>,
    ) -> Result<FileRecord> {
        let record = self.insert_new(name, mime_type, parent_id);
        self.state
            .lock()
            .unwrap()
            .contents
            .insert(record.id.clone(), content);
        Ok(record)
    }

    async fn create_folder(&self, name: &str, parent_id: &str) -> Result<FileRecord> {
        Ok(self.insert_new(name, FOLDER_MIME_TYPE, parent_id))
    }

    async fn copy_file(&self, file_id: &str, name: &str, parent_id: &str) -> Result<FileRecord> {
        let mime_type = self
            .state
            .lock()
            .unwrap()
            .files
            .iter()
            .find(|f| f.id == file_id)
            .and_then(|f| f.mime_type.clone())
            .ok_or_else(|| api_error(404, "File not found"))?;
        Ok(self.insert_new(name, &mime_type, parent_id))
    }
}
