//! Create transaction table
//!
//! Minimal charging-session table referenced by `reservation.transaction_pk`.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Transaction::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transaction::TransactionPk)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Transaction::ChargeBoxId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transaction::IdTag).string().not_null())
                    .col(
                        ColumnDef::new(Transaction::StartTimestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transaction::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Transaction {
    Table,
    TransactionPk,
    #[iden = "chargeboxid"]
    ChargeBoxId,
    #[iden = "idtag"]
    IdTag,
    #[iden = "starttimestamp"]
    StartTimestamp,
}
