//! Secondary indexes backing the income threshold and name lookups.
use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_client::Client;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_client_income")
                    .table(Client::Table)
                    .col(Client::Income)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_client_name")
                    .table(Client::Table)
                    .col(Client::Name)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_client_name").table(Client::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_client_income").table(Client::Table).to_owned())
            .await
    }
}
