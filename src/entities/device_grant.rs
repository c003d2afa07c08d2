use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "device_grants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub device_code: String,
    #[sea_orm(unique)]
    pub user_code: String,
    pub client_id: String,
    pub subject_id: Option<String>,
    pub created_at: i64,
    pub expires_at: i64,
    /// Optimistic-concurrency counter, bumped on every successful update.
    pub row_version: i64,
    /// Serialized grant payload; the other columns are a queryable projection.
    pub data: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
