use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Persisted client row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "client")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub cpf: String,
    #[sea_orm(column_type = "Double")]
    pub income: f64,
    pub birth_date: DateTimeWithTimeZone,
    pub children: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
