//! Transaction entity
//!
//! Only the columns a reservation needs to reference a charging session.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transaction")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub transaction_pk: i32,

    #[sea_orm(column_name = "chargeboxid")]
    pub charge_box_id: String,

    #[sea_orm(column_name = "idtag")]
    pub id_tag: String,

    #[sea_orm(column_name = "starttimestamp")]
    pub start_timestamp: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reservation::Entity")]
    Reservation,
}

impl Related<super::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
