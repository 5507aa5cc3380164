//! Tests for folder walking and selection against the in-memory store.

mod common;

use common::FakeStore;
use drive_attachments::models::{DOCUMENT_MIME_TYPE, PDF_MIME_TYPE};
use drive_attachments::{walk, FileRecord, NamePattern, Selection};

fn summary(records: &[FileRecord]) -> Vec<(String, String)> {
    records
        .iter()
        .map(|r| (r.relative_path.clone(), r.name.clone()))
        .collect()
}

fn pair(path: &str, name: &str) -> (String, String) {
    (path.to_string(), name.to_string())
}

mod flat {
    use super::*;

    #[tokio::test]
    async fn lists_direct_children_only() {
        let store = FakeStore::new();
        store
            .add("a", "A.pdf", PDF_MIME_TYPE, "root")
            .add_folder("sub", "sub", "root")
            .add("b", "B.pdf", PDF_MIME_TYPE, "sub");

        let records = walk(&store, "root", false).await;

        assert_eq!(summary(&records), vec![pair("", "A.pdf"), pair("", "sub")]);
        assert_eq!(store.list_calls(), vec!["root".to_string()]);
    }

    #[tokio::test]
    async fn excludes_trashed_entries() {
        let store = FakeStore::new();
        store
            .add("a", "A.pdf", PDF_MIME_TYPE, "root")
            .add_trashed("t", "Old.pdf", PDF_MIME_TYPE, "root");

        let records = walk(&store, "root", false).await;
        assert_eq!(summary(&records), vec![pair("", "A.pdf")]);
    }

    #[tokio::test]
    async fn listing_failure_yields_nothing() {
        let store = FakeStore::new();
        store.add("a", "A.pdf", PDF_MIME_TYPE, "root");
        store.fail_listing("root");

        assert!(walk(&store, "root", false).await.is_empty());
        assert!(walk(&store, "root", true).await.is_empty());
    }
}

mod recursive {
    use super::*;

    #[tokio::test]
    async fn tags_files_with_relative_path() {
        let store = FakeStore::new();
        store
            .add("a", "A.pdf", PDF_MIME_TYPE, "root")
            .add_folder("sub", "sub", "root")
            .add("b", "B.pdf", PDF_MIME_TYPE, "sub");

        let records = walk(&store, "root", true).await;

        let files: Vec<(String, String)> = summary(&records)
            .into_iter()
            .filter(|(_, name)| name != "sub")
            .collect();
        assert_eq!(files, vec![pair("", "A.pdf"), pair("sub/", "B.pdf")]);
    }

    #[tokio::test]
    async fn visits_depth_first_pre_order() {
        let store = FakeStore::new();
        store
            .add_folder("x", "x", "root")
            .add("y", "y.pdf", PDF_MIME_TYPE, "root")
            .add("x1", "x1.pdf", PDF_MIME_TYPE, "x")
            .add_folder("x2", "deeper", "x")
            .add("x21", "x21.pdf", DOCUMENT_MIME_TYPE, "x2")
            .add("x3", "x3.pdf", PDF_MIME_TYPE, "x");

        let records = walk(&store, "root", true).await;

        assert_eq!(
            summary(&records),
            vec![
                pair("", "x"),
                pair("x/", "x1.pdf"),
                pair("x/", "deeper"),
                pair("x/deeper/", "x21.pdf"),
                pair("x/", "x3.pdf"),
                pair("", "y.pdf"),
            ]
        );
    }

    #[tokio::test]
    async fn failed_subfolder_is_treated_as_empty() {
        let store = FakeStore::new();
        store
            .add_folder("bad", "bad", "root")
            .add("lost", "lost.pdf", PDF_MIME_TYPE, "bad")
            .add_folder("good", "good", "root")
            .add("kept", "kept.pdf", PDF_MIME_TYPE, "good");
        store.fail_listing("bad");

        let records = walk(&store, "root", true).await;

        assert_eq!(
            summary(&records),
            vec![pair("", "bad"), pair("", "good"), pair("good/", "kept.pdf")]
        );
    }

    #[tokio::test]
    async fn does_not_descend_into_trashed_folders() {
        let store = FakeStore::new();
        store
            .add_trashed("gone", "gone", drive_attachments::models::FOLDER_MIME_TYPE, "root")
            .add("inner", "inner.pdf", PDF_MIME_TYPE, "gone");

        assert!(walk(&store, "root", true).await.is_empty());
        assert_eq!(store.list_calls(), vec!["root".to_string()]);
    }
}

mod selection {
    use super::*;

    #[tokio::test]
    async fn filters_after_walking() {
        let store = FakeStore::new();
        store
            .add("1", "Draft1", PDF_MIME_TYPE, "root")
            .add("2", "Final", PDF_MIME_TYPE, "root")
            .add_folder("sub", "sub", "root")
            .add("3", "Draft2", PDF_MIME_TYPE, "sub");

        let selection = Selection::new(true, Some(NamePattern::new("^Draft").unwrap()));
        let records = selection.collect(&store, "root").await;

        assert_eq!(
            summary(&records),
            vec![pair("", "Draft1"), pair("sub/", "Draft2")]
        );
    }

    #[tokio::test]
    async fn folders_are_not_exempt_from_the_pattern() {
        let store = FakeStore::new();
        store
            .add_folder("f", "Archive", "root")
            .add("1", "Agenda.pdf", PDF_MIME_TYPE, "root");

        let selection = Selection::new(false, Some(NamePattern::new("Ag").unwrap()));
        let records = selection.collect(&store, "root").await;
        assert_eq!(summary(&records), vec![pair("", "Agenda.pdf")]);
    }
}
