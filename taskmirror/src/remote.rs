//! The remote document service seam.
//!
//! The sync engine talks to the document store exclusively through the
//! [`DocumentService`] trait, injected at construction. Production code uses
//! [`AppwriteRemote`](appwrite::AppwriteRemote); tests substitute an
//! in-memory double.

pub mod appwrite;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::task;

/// The authenticated user a sync pass runs under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: String,
    pub name: String,
}

/// One task as it appears in the remote collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDocument {
    pub name: String,
    pub description: String,
    pub completed: bool,
    pub user_id: String,
}

impl TaskDocument {
    /// The payload for a local task pushed under `user_id`. Fields reflect
    /// the record's state at the moment of the push.
    pub fn from_task(task: &task::Model, user_id: &str) -> Self {
        Self {
            name: task.name.clone(),
            description: task.description.clone(),
            completed: task.completed,
            user_id: user_id.to_string(),
        }
    }
}

/// Identity resolution failed. Fatal to a whole sync pass: nothing is pushed
/// without a known user.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("session rejected by the remote store: {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("identity request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed identity response: {0}")]
    InvalidResponse(String),
}

/// A document create or patch failed. Scoped to one record inside a sync
/// pass; the batch continues.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("remote request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("remote store rejected the request: {status}: {message}")]
    Api { status: u16, message: String },

    #[error("remote call timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("malformed remote response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait DocumentService: Send + Sync {
    /// Resolve the currently authenticated user.
    async fn current_user(&self) -> Result<UserIdentity, AuthError>;

    /// Create a new document in `collection` and return the identifier the
    /// remote store generated for it.
    ///
    /// Not idempotent: two calls with equal payloads create two distinct
    /// documents. Callers own any dedup semantics.
    async fn create_document(
        &self,
        collection: &str,
        document: TaskDocument,
    ) -> Result<String, RemoteError>;

    /// Patch fields of an existing document. Used by the completion write
    /// path only — the sync routine never updates documents.
    async fn update_document(
        &self,
        collection: &str,
        document_id: &str,
        patch: serde_json::Value,
    ) -> Result<(), RemoteError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_wire_shape() {
        let task = task::Model {
            id: 1,
            name: "Buy milk".into(),
            description: "2%".into(),
            completed: false,
            remote_id: None,
        };
        let value = serde_json::to_value(TaskDocument::from_task(&task, "user-1")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "Buy milk",
                "description": "2%",
                "completed": false,
                "user_id": "user-1",
            })
        );
    }
}
