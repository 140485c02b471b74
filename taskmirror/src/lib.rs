//! # taskmirror
//!
//! Offline-first task tracking with one-way push sync.
//!
//! taskmirror keeps task records in a local SQLite table (via SeaORM) and
//! mirrors newly created records into a remote document store under the
//! authenticated user. Sync is strictly local-to-remote and only covers
//! records that have never been pushed: each unlinked record gets one remote
//! document, and the document's identifier is written back as the record's
//! `remote_id`. Linked records are never re-selected; later edits stay
//! local unless another write path propagates them.
//!
//! ## Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use taskmirror::{AppwriteRemote, TaskMirrorBuilder};
//!
//! let remote = Arc::new(AppwriteRemote::new(
//!     "https://cloud.appwrite.io/v1",
//!     "<project-id>",
//!     "<database-id>",
//!     "<session-secret>",
//! ));
//! let mirror = TaskMirrorBuilder::new("sqlite:./tasks.db?mode=rwc", remote)
//!     .build()
//!     .await?;
//!
//! mirror.store().insert("Buy milk", "2%").await?;
//! let report = mirror.synchronize().await?;
//! assert!(report.is_clean());
//! ```
//!
//! ## Key types
//!
//! - [`TaskMirror`] / [`TaskMirrorBuilder`] — connection facade: bootstrap,
//!   store access, sync, the completion write path
//! - [`TaskStore`] — local table adapter
//! - [`SyncEngine`] — the push routine
//! - [`SyncReport`] — per-record outcomes of one pass
//! - [`DocumentService`] — the remote seam; [`AppwriteRemote`] implements it

pub mod mirror;
pub mod remote;
pub mod schema;
pub mod store;
pub mod sync;
pub mod task;

pub use mirror::{TaskMirror, TaskMirrorBuilder};
pub use remote::appwrite::AppwriteRemote;
pub use remote::{AuthError, DocumentService, RemoteError, TaskDocument, UserIdentity};
pub use store::{StoreError, TaskStore};
pub use sync::{
    DEFAULT_REMOTE_TIMEOUT, LinkedRecord, RecordError, SyncEngine, SyncError, SyncFailure,
    SyncReport,
};

// Re-export for callers that query the task entity directly
pub use sea_orm;
