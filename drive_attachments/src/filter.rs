//! Name filtering and the walk + filter selection shared by every operation.

use regex::Regex;

use crate::error::Result;
use crate::models::FileRecord;
use crate::store::DriveStore;
use crate::walker::walk;

/// A regex that must match at the start of a file name.
///
/// The match does not have to cover the whole name: `Draft` accepts
/// `Draft 2.pdf` but not `Old Draft.pdf`.
#[derive(Debug, Clone)]
pub struct NamePattern {
    regex: Regex,
}

impl NamePattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{})", pattern))?;
        Ok(Self { regex })
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

/// Keep the records whose name matches `pattern`, in input order.
///
/// Folders are filtered like any other record.
pub fn filter(records: Vec<FileRecord>, pattern: Option<&NamePattern>) -> Vec<FileRecord> {
    match pattern {
        Some(pattern) => records
            .into_iter()
            .filter(|record| pattern.matches(&record.name))
            .collect(),
        None => records,
    }
}

/// Which files an operation works on.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub recursive: bool,
    pub pattern: Option<NamePattern>,
}

impl Selection {
    pub fn new(recursive: bool, pattern: Option<NamePattern>) -> Self {
        Self { recursive, pattern }
    }

    /// Walk `root_id` and apply the name filter.
    pub async fn collect(&self, store: &dyn DriveStore, root_id: &str) -> Vec<FileRecord> {
        let records = walk(store, root_id, self.recursive).await;
        filter(records, self.pattern.as_ref())
    }
}
