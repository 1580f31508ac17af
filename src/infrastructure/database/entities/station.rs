//! Station entity

use sea_orm::entity::prelude::*;

/// Station status: Active, Inactive
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum Status {
    #[sea_orm(string_value = "Active")]
    Active,
    #[sea_orm(string_value = "Inactive")]
    Inactive,
}

/// Connector standard of the station
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(30))")]
pub enum Connector {
    #[sea_orm(string_value = "Type 1")]
    Type1,
    #[sea_orm(string_value = "Type 2")]
    Type2,
    #[sea_orm(string_value = "CCS")]
    Ccs,
    #[sea_orm(string_value = "CHAdeMO")]
    Chademo,
    #[sea_orm(string_value = "Tesla Supercharger")]
    TeslaSupercharger,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "stations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    pub latitude: f64,
    pub longitude: f64,

    pub status: Status,

    pub power_output: f64,

    pub connector_type: Connector,

    pub owner_id: String,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id"
    )]
    Owner,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
