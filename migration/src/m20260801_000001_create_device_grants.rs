use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create device_grants table for OAuth 2.0 Device Authorization Grant (RFC 8628)
        manager
            .create_table(
                Table::create()
                    .table(DeviceGrant::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DeviceGrant::DeviceCode)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DeviceGrant::UserCode).string().not_null())
                    .col(ColumnDef::new(DeviceGrant::ClientId).string().not_null())
                    .col(ColumnDef::new(DeviceGrant::SubjectId).string())
                    .col(
                        ColumnDef::new(DeviceGrant::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DeviceGrant::ExpiresAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DeviceGrant::RowVersion)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(DeviceGrant::Data).text().not_null())
                    .to_owned(),
            )
            .await?;

        // Unique index on user_code: it is the second lookup key and the
        // database enforces the one-record-per-code invariant
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_device_grants_user_code")
                    .table(DeviceGrant::Table)
                    .col(DeviceGrant::UserCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index on expires_at for efficient cleanup job
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_device_grants_expires_at")
                    .table(DeviceGrant::Table)
                    .col(DeviceGrant::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DeviceGrant::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum DeviceGrant {
    #[sea_orm(iden = "device_grants")]
    Table,
    DeviceCode,
    UserCode,
    ClientId,
    SubjectId,
    CreatedAt,
    ExpiresAt,
    RowVersion,
    Data,
}
