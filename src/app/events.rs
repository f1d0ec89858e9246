//! Background worker messages and async data-loading tasks.

use crate::domain::Snapshot;
use crate::fixtures;
use crate::source::{load_snapshot, source_label};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

const LOCAL_ECHO_DELAY: Duration = Duration::from_millis(250);

/// Message sent from background workers to the UI event loop.
#[derive(Debug)]
pub enum WorkerMessage {
    SnapshotLoaded {
        source_label: String,
        result: Result<Snapshot, String>,
    },
    CommentConfirmed {
        post_id: String,
        temp_id: String,
        server_id: String,
    },
}

/// Where snapshots come from.
#[derive(Debug, Clone)]
pub enum DataMode {
    Demo,
    Snapshot { path: PathBuf },
}

impl DataMode {
    pub fn label(&self) -> String {
        match self {
            Self::Demo => "demo".to_owned(),
            Self::Snapshot { path } => source_label(path),
        }
    }
}

/// Spawns async loading of a snapshot for `mode`.
pub fn spawn_load_snapshot(tx: UnboundedSender<WorkerMessage>, mode: DataMode) {
    tokio::spawn(async move {
        let source_label = mode.label();
        let result = match &mode {
            DataMode::Demo => Ok(fixtures::demo_snapshot()),
            DataMode::Snapshot { path } => load_snapshot(path).await.map_err(|error| {
                log::error!("{error}");
                format!("{error}: {}", root_cause(&error))
            }),
        };

        let _ = tx.send(WorkerMessage::SnapshotLoaded {
            source_label,
            result,
        });
    });
}

/// Confirms a locally created comment. There is no remote to post to, so
/// the confirmed id is derived from the temporary one after a short delay.
pub fn spawn_confirm_comment(
    tx: UnboundedSender<WorkerMessage>,
    post_id: String,
    temp_id: String,
) {
    tokio::spawn(async move {
        tokio::time::sleep(LOCAL_ECHO_DELAY).await;
        let server_id = format!("local-{}", temp_id.trim_start_matches("temp-"));
        log::debug!("confirming {temp_id} as {server_id} on post {post_id}");

        let _ = tx.send(WorkerMessage::CommentConfirmed {
            post_id,
            temp_id,
            server_id,
        });
    });
}

fn root_cause(error: &(dyn std::error::Error + 'static)) -> String {
    let mut current = error;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}

#[cfg(test)]
mod tests {
    use super::{DataMode, WorkerMessage, spawn_confirm_comment, spawn_load_snapshot};
    use std::path::PathBuf;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn demo_mode_loads_fixtures() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_load_snapshot(tx, DataMode::Demo);

        let Some(WorkerMessage::SnapshotLoaded {
            source_label,
            result,
        }) = rx.recv().await
        else {
            panic!("expected snapshot message");
        };
        assert_eq!(source_label, "demo");
        assert!(!result.unwrap().posts.is_empty());
    }

    #[tokio::test]
    async fn missing_snapshot_reports_error_text() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_load_snapshot(
            tx,
            DataMode::Snapshot {
                path: PathBuf::from("/nonexistent/folio.json"),
            },
        );

        let Some(WorkerMessage::SnapshotLoaded { result, .. }) = rx.recv().await else {
            panic!("expected snapshot message");
        };
        assert!(result.unwrap_err().contains("/nonexistent/folio.json"));
    }

    #[tokio::test]
    async fn confirmation_echoes_temp_id() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_confirm_comment(tx, "post-1".to_owned(), "temp-3".to_owned());

        let Some(WorkerMessage::CommentConfirmed { server_id, .. }) = rx.recv().await else {
            panic!("expected confirmation");
        };
        assert_eq!(server_id, "local-3");
    }
}
