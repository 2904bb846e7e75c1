//! SeaORM implementation of ListingRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::domain::listing::{Listing, ListingRepository, ListingStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::listing;

pub struct SeaOrmListingRepository {
    db: DatabaseConnection,
}

impl SeaOrmListingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: listing::Model) -> Listing {
    Listing {
        id: m.id,
        host_id: m.host_id,
        title: m.title,
        description: m.description,
        nightly_rate: m.nightly_rate,
        address: m.address,
        city: m.city,
        state: m.state,
        zipcode: m.zipcode,
        room_type: m.room_type,
        available_from: m.available_from,
        available_to: m.available_to,
        status: ListingStatus::from_str(&m.status),
        created_at: m.created_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

#[async_trait]
impl ListingRepository for SeaOrmListingRepository {
    async fn insert(&self, l: Listing) -> DomainResult<Listing> {
        debug!("Inserting listing: {} (host={})", l.title, l.host_id);

        let model = listing::ActiveModel {
            id: sea_orm::NotSet,
            host_id: Set(l.host_id),
            title: Set(l.title),
            description: Set(l.description),
            nightly_rate: Set(l.nightly_rate),
            address: Set(l.address),
            city: Set(l.city),
            state: Set(l.state),
            zipcode: Set(l.zipcode),
            room_type: Set(l.room_type),
            available_from: Set(l.available_from),
            available_to: Set(l.available_to),
            status: Set(l.status.as_str().to_string()),
            created_at: Set(l.created_at),
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Listing>> {
        let model = listing::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_page(&self, offset: u64, limit: u64) -> DomainResult<Vec<Listing>> {
        let models = listing::Entity::find()
            .order_by_desc(listing::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        listing::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn find_by_host(&self, host_id: i64) -> DomainResult<Vec<Listing>> {
        let models = listing::Entity::find()
            .filter(listing::Column::HostId.eq(host_id))
            .order_by_desc(listing::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
