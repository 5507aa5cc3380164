//! Plain file listing for the `print` operation.

use crate::models::FileRecord;

/// Sorted names of `records`, skipping folders unless `include_folders` is set.
pub fn file_listing(records: &[FileRecord], include_folders: bool) -> Vec<String> {
    let mut names: Vec<String> = records
        .iter()
        .filter(|record| include_folders || !record.is_folder())
        .map(|record| record.name.clone())
        .collect();
    names.sort();
    names
}
