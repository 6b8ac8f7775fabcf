//! SeaORM Entity for user-registered target-price alerts
//!
//! Rows are insert-only. `fulfilled` defaults to false and is never
//! transitioned: no job currently evaluates target prices against the
//! price series.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "alerts")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub chain: String,
    #[sea_orm(column_type = "Decimal(Some((30, 10)))")]
    pub target_price: Decimal,
    pub email: String,
    pub fulfilled: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
