//! Snapshot loading from a JSON file on disk.

use crate::domain::Snapshot;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a snapshot file.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse snapshot {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads and parses the snapshot at `path`.
pub async fn load_snapshot(path: &Path) -> Result<Snapshot, SnapshotError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let snapshot = parse_snapshot(&raw).map_err(|source| SnapshotError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!(
        "loaded snapshot {} ({} posts, {} library books)",
        path.display(),
        snapshot.posts.len(),
        snapshot.library.len()
    );
    Ok(snapshot)
}

/// Parses snapshot JSON. Derived comment fields (`depth`, `replies`) in the
/// input are ignored.
pub fn parse_snapshot(raw: &str) -> Result<Snapshot, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Short label for the header, e.g. `snapshot.json`.
pub fn source_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::{SnapshotError, load_snapshot, parse_snapshot, source_label};
    use crate::domain::{ApplicationStatus, BookCategory};
    use serde_json::json;
    use std::path::Path;

    fn snapshot_json() -> serde_json::Value {
        json!({
            "viewer": { "id": 3, "nickname": "mina" },
            "posts": [{
                "id": "p1",
                "communityName": "Slow Readers",
                "title": "Chapter 3",
                "authorId": 3,
                "content": "Thoughts?",
                "createdAt": "2026-03-01T09:00:00Z",
                "comments": [{
                    "id": "c1",
                    "authorId": 4,
                    "content": "Loved it",
                    "createdAt": "2026-03-01T10:00:00Z",
                    "depth": 7,
                    "replies": [{ "bogus": true }]
                }]
            }],
            "appliedCommunities": [{
                "id": 10,
                "name": "Slow Readers",
                "bookTitle": "Demian",
                "memberCount": 4,
                "capacity": 8,
                "createdAt": "2026-02-01T00:00:00Z",
                "status": "accepted",
                "appliedAt": "2026-02-02T00:00:00Z"
            }],
            "wishlist": [{
                "isbn": "9780141187013",
                "title": "Steppenwolf",
                "author": "Hermann Hesse",
                "category": "fiction",
                "addedAt": "2026-02-03T00:00:00Z"
            }]
        })
    }

    #[test]
    fn parse_ignores_derived_comment_fields() {
        let snapshot = parse_snapshot(&snapshot_json().to_string()).unwrap();
        let comment = &snapshot.posts[0].comments[0];

        assert_eq!(comment.depth, 0);
        assert!(comment.replies.is_empty());
        assert_eq!(comment.parent_id, None);
        assert!(!comment.is_edited);
    }

    #[test]
    fn parse_reads_flattened_communities_and_defaults_missing_lists() {
        let snapshot = parse_snapshot(&snapshot_json().to_string()).unwrap();

        assert_eq!(snapshot.viewer.id, 3);
        assert_eq!(snapshot.applied_communities[0].community.book_title, "Demian");
        assert_eq!(
            snapshot.applied_communities[0].status,
            ApplicationStatus::Accepted
        );
        assert_eq!(snapshot.wishlist[0].category, BookCategory::Fiction);
        assert!(snapshot.library.is_empty());
        assert!(snapshot.activities.is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let error = load_snapshot(Path::new("/nonexistent/folio/snapshot.json"))
            .await
            .unwrap_err();
        assert!(matches!(error, SnapshotError::Read { .. }));
    }

    #[test]
    fn label_is_the_file_name() {
        assert_eq!(source_label(Path::new("/tmp/data/snapshot.json")), "snapshot.json");
    }
}
