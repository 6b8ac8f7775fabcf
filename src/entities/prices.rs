//! SeaORM Entity for the per-chain price time series

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "prices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Chain identifier: "ethereum" or "polygon"
    pub chain: String,
    /// USD price at sample time
    #[sea_orm(column_type = "Decimal(Some((30, 10)))")]
    pub price: Decimal,
    /// Set by the collection job at insert time
    pub timestamp: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
