//! Connection facade and builder.

use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbErr};

use crate::remote::DocumentService;
use crate::schema;
use crate::store::TaskStore;
use crate::sync::{DEFAULT_REMOTE_TIMEOUT, RecordError, SyncEngine, SyncError, SyncReport};
use crate::task;

/// App-facing handle: the local store, the sync engine and the completion
/// write path behind one value.
pub struct TaskMirror {
    store: TaskStore,
    engine: SyncEngine,
    remote: Arc<dyn DocumentService>,
    collection: String,
}

impl TaskMirror {
    /// The local store adapter.
    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Run one push pass. See [`SyncEngine::synchronize`].
    pub async fn synchronize(&self) -> Result<SyncReport, SyncError> {
        self.engine.synchronize().await
    }

    /// Mark a task completed locally and, when it is linked, patch the
    /// remote document to match.
    ///
    /// This is a separate write path from [`synchronize`](Self::synchronize),
    /// which only ever creates documents. The local write lands first and is
    /// not rolled back if the remote patch fails — local state is the source
    /// of truth and the remote copy reflects sync-moment state only.
    pub async fn complete(&self, id: i32) -> Result<task::Model, RecordError> {
        let task = self.store.set_completed(id).await?;
        if let Some(remote_id) = &task.remote_id {
            self.remote
                .update_document(
                    &self.collection,
                    remote_id,
                    serde_json::json!({ "completed": true }),
                )
                .await?;
            log::debug!("task {}: remote document {remote_id} marked completed", id);
        }
        Ok(task)
    }
}

/// Builder for [`TaskMirror`].
pub struct TaskMirrorBuilder {
    database_url: String,
    remote: Arc<dyn DocumentService>,
    collection: String,
    remote_timeout: Duration,
}

impl TaskMirrorBuilder {
    pub fn new(database_url: &str, remote: Arc<dyn DocumentService>) -> Self {
        Self {
            database_url: database_url.to_string(),
            remote,
            collection: "tasks".to_string(),
            remote_timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }

    /// Remote collection the tasks are mirrored into. Defaults to `"tasks"`.
    pub fn with_collection(mut self, collection: &str) -> Self {
        self.collection = collection.to_string();
        self
    }

    /// See [`SyncEngine::with_remote_timeout`].
    pub fn with_remote_timeout(mut self, remote_timeout: Duration) -> Self {
        self.remote_timeout = remote_timeout;
        self
    }

    /// Connect, run the idempotent schema bootstrap, and assemble the handle.
    pub async fn build(self) -> Result<TaskMirror, DbErr> {
        let opts = ConnectOptions::new(&self.database_url);
        let conn = Database::connect(opts).await?;

        schema::create_tasks_table(&conn).await?;

        let store = TaskStore::new(conn);
        let engine = SyncEngine::new(store.clone(), self.remote.clone(), self.collection.clone())
            .with_remote_timeout(self.remote_timeout);

        Ok(TaskMirror {
            store,
            engine,
            remote: self.remote,
            collection: self.collection,
        })
    }
}
