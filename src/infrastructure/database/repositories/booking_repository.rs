//! SeaORM implementation of BookingRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use sea_orm::sea_query::ExprTrait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::domain::booking::{Booking, BookingKey, BookingRepository, BookingStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::booking;

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model) -> Booking {
    Booking {
        id: m.id,
        user_id: m.user_id,
        listing_id: m.listing_id,
        check_in: m.check_in,
        check_out: m.check_out,
        guests: m.guests,
        total_price: m.total_price,
        status: BookingStatus::from_str(&m.status),
        created_at: m.created_at,
    }
}

fn domain_to_active(b: &Booking) -> booking::ActiveModel {
    booking::ActiveModel {
        id: Set(b.id),
        user_id: Set(b.user_id),
        listing_id: Set(b.listing_id),
        check_in: Set(b.check_in),
        check_out: Set(b.check_out),
        guests: Set(b.guests),
        total_price: Set(b.total_price),
        status: Set(b.status.as_str().to_string()),
        created_at: Set(b.created_at),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    let msg = e.to_string();
    if msg.contains("UNIQUE") || msg.contains("unique") {
        DomainError::Conflict(msg)
    } else {
        DomainError::Storage(msg)
    }
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn insert(&self, b: Booking) -> DomainResult<Booking> {
        debug!(
            "Inserting booking: user={} listing={} {}..{}",
            b.user_id, b.listing_id, b.check_in, b.check_out
        );

        let mut model = domain_to_active(&b);
        model.id = sea_orm::NotSet;
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn update(&self, b: Booking) -> DomainResult<()> {
        debug!("Updating booking: {}", b.id);

        let existing = booking::Entity::find_by_id(b.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_none() {
            return Err(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: b.id.to_string(),
            });
        }

        domain_to_active(&b).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_for_user(&self, user_id: i64) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::UserId.eq(user_id))
            .order_by_desc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .order_by_desc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_active_overlapping(
        &self,
        listing_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude_id: Option<i64>,
    ) -> DomainResult<Vec<Booking>> {
        // Half-open intervals: existing.check_in < check_out AND
        // existing.check_out > check_in.
        let mut query = booking::Entity::find()
            .filter(booking::Column::ListingId.eq(listing_id))
            .filter(booking::Column::Status.ne(BookingStatus::Cancelled.as_str()))
            .filter(booking::Column::CheckIn.lt(check_out))
            .filter(booking::Column::CheckOut.gt(check_in));

        if let Some(id) = exclude_id {
            query = query.filter(booking::Column::Id.ne(id));
        }

        let models = query
            .order_by_asc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_exact_active(
        &self,
        key: &BookingKey,
        guests: i32,
    ) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find()
            .filter(booking::Column::UserId.eq(key.user_id))
            .filter(booking::Column::ListingId.eq(key.listing_id))
            .filter(booking::Column::CheckIn.eq(key.check_in))
            .filter(booking::Column::CheckOut.eq(key.check_out))
            .filter(booking::Column::Guests.eq(guests))
            .filter(booking::Column::Status.ne(BookingStatus::Cancelled.as_str()))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn duplicate_groups(&self) -> DomainResult<Vec<(BookingKey, u64)>> {
        // Status is not part of the grouping: a cancelled copy of a
        // reserved booking is still a duplicate.
        let rows: Vec<(i64, i64, NaiveDate, NaiveDate, i64)> = booking::Entity::find()
            .select_only()
            .column(booking::Column::UserId)
            .column(booking::Column::ListingId)
            .column(booking::Column::CheckIn)
            .column(booking::Column::CheckOut)
            .column_as(booking::Column::Id.count(), "cnt")
            .group_by(booking::Column::UserId)
            .group_by(booking::Column::ListingId)
            .group_by(booking::Column::CheckIn)
            .group_by(booking::Column::CheckOut)
            .having(booking::Column::Id.count().gt(1))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|(user_id, listing_id, check_in, check_out, cnt)| {
                (
                    BookingKey {
                        user_id,
                        listing_id,
                        check_in,
                        check_out,
                    },
                    cnt as u64,
                )
            })
            .collect())
    }

    async fn find_by_key(&self, key: &BookingKey) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(
                Condition::all()
                    .add(booking::Column::UserId.eq(key.user_id))
                    .add(booking::Column::ListingId.eq(key.listing_id))
                    .add(booking::Column::CheckIn.eq(key.check_in))
                    .add(booking::Column::CheckOut.eq(key.check_out)),
            )
            .order_by_asc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn delete_batch(&self, ids: &[i64]) -> DomainResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        debug!("Deleting {} bookings in one transaction", ids.len());

        let txn = self.db.begin().await.map_err(db_err)?;
        let result = booking::Entity::delete_many()
            .filter(booking::Column::Id.is_in(ids.iter().copied()))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        Ok(result.rows_affected)
    }
}
