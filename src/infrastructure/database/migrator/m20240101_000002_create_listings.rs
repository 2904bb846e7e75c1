//! Create listings table
//!
//! Rental properties published by hosts, with a flat nightly rate.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Listings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Listings::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Listings::HostId).big_integer().not_null())
                    .col(ColumnDef::new(Listings::Title).string().not_null())
                    .col(ColumnDef::new(Listings::Description).text())
                    .col(
                        ColumnDef::new(Listings::NightlyRate)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Listings::Address).string())
                    .col(ColumnDef::new(Listings::City).string())
                    .col(ColumnDef::new(Listings::State).string())
                    .col(ColumnDef::new(Listings::Zipcode).string())
                    .col(ColumnDef::new(Listings::RoomType).string())
                    .col(ColumnDef::new(Listings::AvailableFrom).date())
                    .col(ColumnDef::new(Listings::AvailableTo).date())
                    .col(
                        ColumnDef::new(Listings::Status)
                            .string()
                            .not_null()
                            .default("Available"),
                    )
                    .col(ColumnDef::new(Listings::CreatedAt).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_listings_host")
                            .from(Listings::Table, Listings::HostId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_listings_host")
                    .table(Listings::Table)
                    .col(Listings::HostId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_listings_status")
                    .table(Listings::Table)
                    .col(Listings::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Listings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Listings {
    Table,
    Id,
    HostId,
    Title,
    Description,
    NightlyRate,
    Address,
    City,
    State,
    Zipcode,
    RoomType,
    AvailableFrom,
    AvailableTo,
    Status,
    CreatedAt,
}
