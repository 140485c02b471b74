//! Local schema bootstrap.
//!
//! The `tasks` table is created by [`TaskMirrorBuilder::build()`](crate::TaskMirrorBuilder::build),
//! never by the sync engine. Creation is create-if-absent, so running it on
//! every startup is safe.

use sea_orm::{ConnectionTrait, DbErr, ExecResult};

/// Create the `tasks` table if it does not already exist.
pub async fn create_tasks_table(db: &impl ConnectionTrait) -> Result<ExecResult, DbErr> {
    db.execute_unprepared(
        "CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            completed BOOLEAN NOT NULL DEFAULT 0,
            remote_id TEXT UNIQUE
        )",
    )
    .await
}
