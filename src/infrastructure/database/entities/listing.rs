//! Listing entity for database

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "listings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub host_id: i64,
    pub title: String,

    #[sea_orm(nullable)]
    pub description: Option<String>,

    /// Flat rate per night, in minor currency units
    pub nightly_rate: i64,

    #[sea_orm(nullable)]
    pub address: Option<String>,
    #[sea_orm(nullable)]
    pub city: Option<String>,
    #[sea_orm(nullable)]
    pub state: Option<String>,
    #[sea_orm(nullable)]
    pub zipcode: Option<String>,
    #[sea_orm(nullable)]
    pub room_type: Option<String>,

    #[sea_orm(nullable)]
    pub available_from: Option<Date>,
    #[sea_orm(nullable)]
    pub available_to: Option<Date>,

    /// Listing status: Available, Unlisted
    pub status: String,

    pub created_at: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::HostId",
        to = "super::user::Column::Id"
    )]
    Host,
    #[sea_orm(has_many = "super::booking::Entity")]
    Bookings,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Host.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
