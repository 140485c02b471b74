//! SeaORM entity for the local `tasks` table.
//!
//! `remote_id` is the sync linkage: `None` means the record has never been
//! pushed to the remote store. The column is UNIQUE so two local rows can
//! never claim the same remote document.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
    pub completed: bool,
    #[sea_orm(unique)]
    pub remote_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether this record has been pushed to the remote store.
    pub fn is_linked(&self) -> bool {
        self.remote_id.is_some()
    }
}
