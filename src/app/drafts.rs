//! Persistent storage for unsent comment drafts.

use crate::app::state::PostScreenState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DRAFTS_DIR: &str = "drafts";
const DRAFT_FORMAT_VERSION: u8 = 1;

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("failed to access draft file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse draft file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize drafts")]
    Serialize(#[source] serde_json::Error),
}

/// Disk-backed draft storage rooted at `~/.folio/drafts`, one file per post.
#[derive(Debug, Clone)]
pub struct DraftStore {
    root: PathBuf,
}

impl DraftStore {
    /// Opens the store under `app_dir`, creating the directory if needed.
    pub fn open(app_dir: &Path) -> Result<Self, DraftError> {
        let root = app_dir.join(DRAFTS_DIR);
        fs::create_dir_all(&root).map_err(|source| DraftError::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    /// Restores drafts for the post shown in `screen`. Files written by an
    /// older format version are discarded.
    pub fn load_into(&self, screen: &mut PostScreenState) -> Result<usize, DraftError> {
        let path = self.file_path(&screen.post.id);
        if !path.exists() {
            return Ok(0);
        }

        let raw = fs::read_to_string(&path).map_err(|source| DraftError::Io {
            path: path.clone(),
            source,
        })?;
        let persisted: PersistedDrafts =
            serde_json::from_str(&raw).map_err(|source| DraftError::Parse {
                path: path.clone(),
                source,
            })?;

        if persisted.version != DRAFT_FORMAT_VERSION {
            log::info!("discarding outdated draft file {}", path.display());
            fs::remove_file(&path).map_err(|source| DraftError::Io { path, source })?;
            return Ok(0);
        }

        let restored = persisted.drafts.len();
        for (key, body) in persisted.drafts {
            screen.set_draft(key, body);
        }
        Ok(restored)
    }

    /// Writes the post's drafts, or removes the file when none remain.
    pub fn save(&self, screen: &PostScreenState) -> Result<(), DraftError> {
        if screen.drafts.is_empty() {
            return self.clear(&screen.post.id);
        }

        let persisted = PersistedDrafts {
            version: DRAFT_FORMAT_VERSION,
            post_id: screen.post.id.clone(),
            drafts: screen.drafts.clone(),
        };
        let content = serde_json::to_string_pretty(&persisted).map_err(DraftError::Serialize)?;

        let path = self.file_path(&screen.post.id);
        fs::write(&path, content).map_err(|source| DraftError::Io { path, source })
    }

    pub fn clear(&self, post_id: &str) -> Result<(), DraftError> {
        let path = self.file_path(post_id);
        if !path.exists() {
            return Ok(());
        }
        fs::remove_file(&path).map_err(|source| DraftError::Io { path, source })
    }

    /// Cheap change detector used to skip redundant writes.
    pub fn draft_signature(screen: &PostScreenState) -> String {
        let mut entries = screen.drafts.iter().collect::<Vec<_>>();
        entries.sort_by(|(left, _), (right, _)| left.cmp(right));

        let mut signature = format!("{}|", screen.post.id);
        for (key, value) in entries {
            signature.push_str(&format!("{key}:{value}|"));
        }
        signature
    }

    fn file_path(&self, post_id: &str) -> PathBuf {
        self.root
            .join(format!("post__{}.json", sanitize_path_fragment(post_id)))
    }
}

fn sanitize_path_fragment(value: &str) -> String {
    value
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.') {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedDrafts {
    version: u8,
    post_id: String,
    #[serde(default)]
    drafts: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::{DraftStore, sanitize_path_fragment};
    use crate::app::state::PostScreenState;
    use crate::fixtures;
    use std::env;
    use std::fs;

    fn screen() -> PostScreenState {
        let snapshot = fixtures::demo_snapshot();
        PostScreenState::new(snapshot.posts[0].clone(), snapshot.viewer)
    }

    #[test]
    fn drafts_round_trip_through_disk() {
        let dir = env::temp_dir().join(format!("folio-drafts-test-{}", std::process::id()));
        let store = DraftStore::open(&dir).unwrap();

        let mut original = screen();
        original.set_draft("reply:c-101".to_owned(), "unfinished".to_owned());
        store.save(&original).unwrap();

        let mut restored = screen();
        assert_eq!(store.load_into(&mut restored).unwrap(), 1);
        assert_eq!(restored.draft("reply:c-101"), Some("unfinished"));
        assert_eq!(
            DraftStore::draft_signature(&original),
            DraftStore::draft_signature(&restored)
        );

        restored.clear_draft("reply:c-101");
        store.save(&restored).unwrap();
        assert_eq!(store.load_into(&mut screen()).unwrap(), 0);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn path_fragments_are_sanitized() {
        assert_eq!(sanitize_path_fragment("post/1?x"), "post_1_x");
    }
}
