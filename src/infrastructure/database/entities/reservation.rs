//! Reservation entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub reservation_pk: i32,

    #[sea_orm(nullable)]
    pub transaction_pk: Option<i32>,

    #[sea_orm(column_name = "idtag")]
    pub id_tag: String,

    #[sea_orm(column_name = "chargeboxid")]
    pub charge_box_id: String,

    #[sea_orm(column_name = "startdatetime")]
    pub start_datetime: DateTimeUtc,

    #[sea_orm(column_name = "expirydatetime")]
    pub expiry_datetime: DateTimeUtc,

    /// Reservation status: WAITING, ACCEPTED, CANCELLED, USED
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::transaction::Entity",
        from = "Column::TransactionPk",
        to = "super::transaction::Column::TransactionPk",
        on_delete = "SetNull"
    )]
    Transaction,
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
