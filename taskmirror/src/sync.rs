//! The one-directional push sync routine.
//!
//! [`SyncEngine::synchronize`] selects every task with no remote identifier,
//! creates one remote document per task under the authenticated user, and
//! writes the returned identifier back to the local row. Records are
//! processed strictly sequentially and failures are isolated per record: a
//! failed record stays unlinked and is selected again on the next pass.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::time::timeout;

use crate::remote::{AuthError, DocumentService, RemoteError, TaskDocument};
use crate::store::{StoreError, TaskStore};

/// Default cap on a single create-document round trip.
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(30);

/// A whole sync pass failed before any record was pushed.
#[derive(Error, Debug)]
pub enum SyncError {
    /// No resolvable user identity.
    #[error("authentication failed: {0}")]
    Authentication(#[from] AuthError),

    /// The batch query itself failed.
    #[error("could not read the local task table: {0}")]
    Store(#[from] StoreError),
}

/// Why a single record failed to sync.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// A record that was pushed and linked in this pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedRecord {
    pub local_id: i32,
    pub remote_id: String,
}

/// A record that was attempted and failed in this pass.
#[derive(Debug)]
pub struct SyncFailure {
    pub local_id: i32,
    pub error: RecordError,
}

/// Per-record outcomes of one [`SyncEngine::synchronize`] pass.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub linked: Vec<LinkedRecord>,
    pub failures: Vec<SyncFailure>,
}

impl SyncReport {
    /// Number of records attempted in this pass.
    pub fn attempted(&self) -> usize {
        self.linked.len() + self.failures.len()
    }

    /// True when every attempted record is now linked.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Pushes unlinked tasks to the remote document store.
///
/// Collaborators are injected: the engine owns no global state and can be
/// constructed against any [`DocumentService`].
pub struct SyncEngine {
    store: TaskStore,
    remote: Arc<dyn DocumentService>,
    collection: String,
    remote_timeout: Duration,
}

impl SyncEngine {
    pub fn new(
        store: TaskStore,
        remote: Arc<dyn DocumentService>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            store,
            remote,
            collection: collection.into(),
            remote_timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }

    /// Cap a single create-document round trip. A timeout fails only the
    /// record in flight; the batch continues.
    pub fn with_remote_timeout(mut self, remote_timeout: Duration) -> Self {
        self.remote_timeout = remote_timeout;
        self
    }

    /// Push every currently-unlinked task once.
    ///
    /// Resolves the user identity first — without a known user nothing is
    /// pushed. Then each record in the batch gets one create-document call
    /// and, on success, its `remote_id` written back. An empty batch makes
    /// no document-store calls and no local writes.
    ///
    /// If the create succeeds but the local write-back fails, the record is
    /// reported failed and stays unlinked, so the next pass pushes it again
    /// under a fresh document id. The orphaned document is logged, not
    /// reconciled.
    pub async fn synchronize(&self) -> Result<SyncReport, SyncError> {
        let user = self.remote.current_user().await?;
        let batch = self.store.unlinked().await?;

        let mut report = SyncReport::default();
        if batch.is_empty() {
            log::debug!("sync: nothing to push");
            return Ok(report);
        }
        log::info!("sync: pushing {} task(s) as user {}", batch.len(), user.id);

        for task in &batch {
            let document = TaskDocument::from_task(task, &user.id);
            let created = match timeout(
                self.remote_timeout,
                self.remote.create_document(&self.collection, document),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(RemoteError::Timeout(self.remote_timeout)),
            };

            let remote_id = match created {
                Ok(id) => id,
                Err(err) => {
                    log::warn!("sync: task {} not pushed: {err}", task.id);
                    report.failures.push(SyncFailure {
                        local_id: task.id,
                        error: err.into(),
                    });
                    continue;
                }
            };

            if let Err(err) = self.store.set_remote_id(task.id, &remote_id).await {
                // The document exists remotely but the row still looks
                // unsynced; the next pass re-pushes it as a new document.
                log::error!(
                    "sync: task {} created remotely as {remote_id} but the local update failed: {err}",
                    task.id
                );
                report.failures.push(SyncFailure {
                    local_id: task.id,
                    error: err.into(),
                });
                continue;
            }

            log::debug!("sync: task {} linked as {remote_id}", task.id);
            report.linked.push(LinkedRecord {
                local_id: task.id,
                remote_id,
            });
        }

        log::info!(
            "sync: {} linked, {} failed",
            report.linked.len(),
            report.failures.len()
        );
        Ok(report)
    }
}
