use crate::entities::device_grant::{ActiveModel, Column, Entity, Model};
use crate::errors::StoreError;
use crate::settings::Database as DbCfg;
use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, QueryFilter, Set,
    SqlErr,
};

/// A device-grant row as stored in the backend: the serialized payload plus
/// the indexed projection columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantRow {
    pub device_code: String,
    pub user_code: String,
    pub client_id: String,
    pub subject_id: Option<String>,
    pub created_at: i64,
    pub expires_at: i64,
    pub row_version: i64,
    pub data: String,
}

impl From<Model> for GrantRow {
    fn from(model: Model) -> Self {
        Self {
            device_code: model.device_code,
            user_code: model.user_code,
            client_id: model.client_id,
            subject_id: model.subject_id,
            created_at: model.created_at,
            expires_at: model.expires_at,
            row_version: model.row_version,
            data: model.data,
        }
    }
}

/// Result of a conditional write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Applied,
    /// The row was modified or removed since it was last read.
    Conflict,
}

/// Backend abstraction for device-grant rows.
///
/// Uniqueness of both codes is enforced by the backend on `insert`, and
/// write-write races surface as [`WriteOutcome::Conflict`] rather than
/// errors, so any store with conditional writes can implement this.
#[async_trait]
pub trait GrantRepository: Send + Sync {
    async fn insert(&self, row: GrantRow) -> Result<(), StoreError>;

    async fn find_by_device_code(&self, device_code: &str)
        -> Result<Option<GrantRow>, StoreError>;

    async fn find_by_user_code(&self, user_code: &str) -> Result<Option<GrantRow>, StoreError>;

    /// Compare-and-swap update keyed on the device code: applies only if the
    /// stored `row_version` still equals `expected_version`.
    async fn update(
        &self,
        row: GrantRow,
        expected_version: i64,
    ) -> Result<WriteOutcome, StoreError>;

    async fn delete(&self, device_code: &str) -> Result<WriteOutcome, StoreError>;

    /// Bulk-delete rows whose `expires_at` is before `now`; returns the
    /// number of rows removed.
    async fn delete_expired(&self, now: i64) -> Result<u64, StoreError>;
}

pub async fn connect(cfg: &DbCfg) -> Result<DatabaseConnection, StoreError> {
    let db = Database::connect(&cfg.url).await?;
    Ok(db)
}

/// SeaORM-backed repository over the `device_grants` table.
#[derive(Debug, Clone)]
pub struct SeaOrmGrantRepository {
    db: DatabaseConnection,
}

impl SeaOrmGrantRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GrantRepository for SeaOrmGrantRepository {
    async fn insert(&self, row: GrantRow) -> Result<(), StoreError> {
        let model = ActiveModel {
            device_code: Set(row.device_code.clone()),
            user_code: Set(row.user_code.clone()),
            client_id: Set(row.client_id),
            subject_id: Set(row.subject_id),
            created_at: Set(row.created_at),
            expires_at: Set(row.expires_at),
            row_version: Set(row.row_version),
            data: Set(row.data),
        };

        match model.insert(&self.db).await {
            Ok(_) => Ok(()),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(StoreError::Conflict {
                    device_code: row.device_code,
                    user_code: row.user_code,
                }),
                _ => Err(err.into()),
            },
        }
    }

    async fn find_by_device_code(
        &self,
        device_code: &str,
    ) -> Result<Option<GrantRow>, StoreError> {
        let model = Entity::find()
            .filter(Column::DeviceCode.eq(device_code))
            .one(&self.db)
            .await?;

        Ok(model.map(GrantRow::from))
    }

    async fn find_by_user_code(&self, user_code: &str) -> Result<Option<GrantRow>, StoreError> {
        let model = Entity::find()
            .filter(Column::UserCode.eq(user_code))
            .one(&self.db)
            .await?;

        Ok(model.map(GrantRow::from))
    }

    async fn update(
        &self,
        row: GrantRow,
        expected_version: i64,
    ) -> Result<WriteOutcome, StoreError> {
        let result = Entity::update_many()
            .col_expr(Column::ClientId, Expr::value(row.client_id))
            .col_expr(Column::SubjectId, Expr::value(row.subject_id))
            .col_expr(Column::ExpiresAt, Expr::value(row.expires_at))
            .col_expr(Column::Data, Expr::value(row.data))
            .col_expr(Column::RowVersion, Expr::value(expected_version + 1))
            .filter(Column::DeviceCode.eq(row.device_code))
            .filter(Column::RowVersion.eq(expected_version))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            Ok(WriteOutcome::Conflict)
        } else {
            Ok(WriteOutcome::Applied)
        }
    }

    async fn delete(&self, device_code: &str) -> Result<WriteOutcome, StoreError> {
        let result = Entity::delete_many()
            .filter(Column::DeviceCode.eq(device_code))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            Ok(WriteOutcome::Conflict)
        } else {
            Ok(WriteOutcome::Applied)
        }
    }

    async fn delete_expired(&self, now: i64) -> Result<u64, StoreError> {
        let result = Entity::delete_many()
            .filter(Column::ExpiresAt.lt(now))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
