//! Create reservation table
//!
//! Stores charge point reservations with their status and the transaction
//! that consumed them.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_transaction::Transaction;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservation::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservation::ReservationPk)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reservation::TransactionPk).integer())
                    .col(ColumnDef::new(Reservation::IdTag).string().not_null())
                    .col(
                        ColumnDef::new(Reservation::ChargeBoxId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservation::StartDatetime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservation::ExpiryDatetime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservation::Status)
                            .string()
                            .not_null()
                            .default("WAITING"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_transaction")
                            .from(Reservation::Table, Reservation::TransactionPk)
                            .to(Transaction::Table, Transaction::TransactionPk)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservation_chargeboxid")
                    .table(Reservation::Table)
                    .col(Reservation::ChargeBoxId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservation_status")
                    .table(Reservation::Table)
                    .col(Reservation::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservation_expirydatetime")
                    .table(Reservation::Table)
                    .col(Reservation::ExpiryDatetime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservation::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Reservation {
    Table,
    ReservationPk,
    TransactionPk,
    #[iden = "idtag"]
    IdTag,
    #[iden = "chargeboxid"]
    ChargeBoxId,
    #[iden = "startdatetime"]
    StartDatetime,
    #[iden = "expirydatetime"]
    ExpiryDatetime,
    Status,
}
