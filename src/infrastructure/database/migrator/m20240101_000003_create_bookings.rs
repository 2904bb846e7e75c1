//! Create bookings table
//!
//! Stay reservations with a uniqueness constraint on the full
//! (user, listing, check_in, check_out) tuple. The constraint is the
//! last line of defense when concurrent requests race past the
//! application-level overlap check.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;
use super::m20240101_000002_create_listings::Listings;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Bookings::ListingId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Bookings::CheckIn).date().not_null())
                    .col(ColumnDef::new(Bookings::CheckOut).date().not_null())
                    .col(
                        ColumnDef::new(Bookings::Guests)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Bookings::TotalPrice)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .string()
                            .not_null()
                            .default("Reserved"),
                    )
                    .col(ColumnDef::new(Bookings::CreatedAt).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_user")
                            .from(Bookings::Table, Bookings::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_listing")
                            .from(Bookings::Table, Bookings::ListingId)
                            .to(Listings::Table, Listings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_listing")
                    .table(Bookings::Table)
                    .col(Bookings::ListingId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_status")
                    .table(Bookings::Table)
                    .col(Bookings::Status)
                    .to_owned(),
            )
            .await?;

        // Status is deliberately excluded: a cancelled row still pins
        // its exact tuple.
        manager
            .create_index(
                Index::create()
                    .name("uniq_booking_user_listing_dates")
                    .table(Bookings::Table)
                    .col(Bookings::UserId)
                    .col(Bookings::ListingId)
                    .col(Bookings::CheckIn)
                    .col(Bookings::CheckOut)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bookings {
    Table,
    Id,
    UserId,
    ListingId,
    CheckIn,
    CheckOut,
    Guests,
    TotalPrice,
    Status,
    CreatedAt,
}
