//! Table of contents built from numbered attachment names.
//!
//! Names such as `2.1 Budget.pdf` carry a dotted numeral prefix. Entries are
//! ordered by that prefix and indented by its depth, after all unnumbered
//! entries in alphabetical order.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::filter::Selection;
use crate::links::publish_link;
use crate::models::FileRecord;
use crate::store::DriveStore;

/// Fixed heading printed above the list.
pub const TOC_HEADING: &str = "Bilagor:";

/// Label of the link to the whole folder.
pub const FOLDER_LINK_LABEL: &str = "Samtliga bilagor";

/// `2.10.1 Foo`: dotted numerals directly followed by whitespace. `1. Intro`
/// does not count as numbered.
static NUMBERING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)*)\s").expect("Invalid numbering regex")
});

/// Final `.ext` suffix. Extensions never contain whitespace, so the dots of a
/// numbering prefix like `1.2.3 Deep` are left alone.
static EXTENSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[^.\s]+$").expect("Invalid extension regex"));

const INDENT: &str = "    ";

/// The integer components of a leading numeral prefix; empty when there is none.
pub fn numbering_key(name: &str) -> Vec<u64> {
    NUMBERING_REGEX
        .captures(name)
        .and_then(|c| c.get(1))
        .map(|prefix| {
            prefix
                .as_str()
                .split('.')
                .map(|part| part.parse().unwrap_or(u64::MAX))
                .collect()
        })
        .unwrap_or_default()
}

/// `name` without its final extension.
pub fn strip_extension(name: &str) -> &str {
    match EXTENSION_REGEX.find(name) {
        Some(ext) => &name[..ext.start()],
        None => name,
    }
}

/// Order records for the table of contents and render one Markdown bullet each.
pub fn sort_and_render(records: &[FileRecord]) -> Vec<String> {
    let mut unnumbered: Vec<(&FileRecord, String)> = Vec::new();
    let mut numbered: Vec<(Vec<u64>, String, &FileRecord)> = Vec::new();

    for record in records {
        let key = numbering_key(&record.name);
        let lower = record.name.to_lowercase();
        if key.is_empty() {
            unnumbered.push((record, lower));
        } else {
            numbered.push((key, lower, record));
        }
    }

    unnumbered.sort_by(|a, b| a.1.cmp(&b.1));
    numbered.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));

    unnumbered
        .into_iter()
        .map(|(record, _)| render_line(record, 0))
        .chain(
            numbered
                .into_iter()
                .map(|(key, _, record)| render_line(record, key.len())),
        )
        .collect()
}

fn render_line(record: &FileRecord, depth: usize) -> String {
    format!(
        "{}- [{}]({})",
        INDENT.repeat(depth.saturating_sub(2)),
        strip_extension(&record.name),
        record.link.as_deref().unwrap_or("")
    )
}

/// A rendered table of contents for one folder.
#[derive(Debug, Clone, PartialEq)]
pub struct TableOfContents {
    pub folder_link: Option<String>,
    pub lines: Vec<String>,
}

impl fmt::Display for TableOfContents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n{}\n", TOC_HEADING)?;
        if let Some(link) = &self.folder_link {
            writeln!(f, "[{}]({})\n", FOLDER_LINK_LABEL, link)?;
        }
        if self.lines.is_empty() {
            write!(f, "No shareable links were created.")
        } else {
            write!(f, "{}", self.lines.join("\n"))
        }
    }
}

/// Publish a link for every selected file and build the table of contents.
///
/// Returns `None` when the selection is empty.
pub async fn build_table(
    store: &dyn DriveStore,
    folder_id: &str,
    selection: &Selection,
) -> Option<TableOfContents> {
    let mut records = selection.collect(store, folder_id).await;
    if records.is_empty() {
        return None;
    }

    for record in &mut records {
        println!("Creating shareable link for: {}...", record.name);
        record.link = publish_link(store, &record.id).await;
        if record.link.is_none() {
            println!("Failed to create a shareable link for {}.", record.name);
        }
    }

    let folder_link = publish_link(store, folder_id).await;
    Some(TableOfContents {
        folder_link,
        lines: sort_and_render(&records),
    })
}
