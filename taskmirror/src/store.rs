//! Local store adapter for the `tasks` table.
//!
//! [`TaskStore`] is the only way the rest of the crate touches SQLite. Every
//! method is a single point-in-time statement — no long-held transactions —
//! so the surrounding app's list/edit/delete paths can write to the same
//! table while a sync pass is in flight.

use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, Statement,
};
use thiserror::Error;

use crate::task::{self, Entity as Task};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("local database error: {0}")]
    Database(#[from] DbErr),

    #[error("task {0} not found")]
    NotFound(i32),

    #[error("invalid task: {0}")]
    Invalid(String),
}

/// Read/write access to the local task table.
///
/// Cheap to clone: wraps a [`DatabaseConnection`] handle.
#[derive(Clone)]
pub struct TaskStore {
    db: DatabaseConnection,
}

impl TaskStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The underlying SeaORM connection, for callers that query the entity
    /// directly.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Insert a new task. It starts uncompleted and unlinked.
    pub async fn insert(&self, name: &str, description: &str) -> Result<task::Model, StoreError> {
        let name = name.trim();
        let description = description.trim();
        if name.is_empty() {
            return Err(StoreError::Invalid("name must not be empty".into()));
        }
        if description.is_empty() {
            return Err(StoreError::Invalid("description must not be empty".into()));
        }

        let row = task::ActiveModel {
            name: Set(name.to_string()),
            description: Set(description.to_string()),
            completed: Set(false),
            remote_id: Set(None),
            ..Default::default()
        };
        Ok(row.insert(&self.db).await?)
    }

    /// All tasks, in insertion order.
    pub async fn all(&self) -> Result<Vec<task::Model>, StoreError> {
        Ok(Task::find()
            .order_by_asc(task::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn get(&self, id: i32) -> Result<task::Model, StoreError> {
        Task::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    /// Tasks that have never been pushed to the remote store
    /// (`remote_id IS NULL`), in insertion order.
    pub async fn unlinked(&self) -> Result<Vec<task::Model>, StoreError> {
        Ok(Task::find()
            .filter(task::Column::RemoteId.is_null())
            .order_by_asc(task::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Record the remote identifier for a freshly pushed task.
    ///
    /// Zero affected rows means the row was deleted out from under the sync
    /// pass; a UNIQUE violation on `remote_id` surfaces as a database error.
    /// There is no inverse operation — a linked row stays linked.
    pub async fn set_remote_id(&self, id: i32, remote_id: &str) -> Result<(), StoreError> {
        let result = self
            .db
            .execute_raw(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                "UPDATE tasks SET remote_id = $1 WHERE id = $2",
                [remote_id.into(), id.into()],
            ))
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    /// Rename / re-describe an existing task.
    pub async fn update_details(
        &self,
        id: i32,
        name: &str,
        description: &str,
    ) -> Result<(), StoreError> {
        let name = name.trim();
        let description = description.trim();
        if name.is_empty() || description.is_empty() {
            return Err(StoreError::Invalid(
                "name and description must not be empty".into(),
            ));
        }

        let result = self
            .db
            .execute_raw(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                "UPDATE tasks SET name = $1, description = $2 WHERE id = $3",
                [name.into(), description.into(), id.into()],
            ))
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    /// Mark a task completed, returning its stored state (including any
    /// remote linkage, so the caller can decide whether to patch the remote
    /// copy).
    pub async fn set_completed(&self, id: i32) -> Result<task::Model, StoreError> {
        let result = self
            .db
            .execute_raw(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                "UPDATE tasks SET completed = $1 WHERE id = $2",
                [true.into(), id.into()],
            ))
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        self.get(id).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let result = Task::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
