//! Create `client` table.
//!
//! Identifiers come from a BIGSERIAL sequence, so deleted ids are never handed out again.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Client::Table)
                    .if_not_exists()
                    .col(big_integer(Client::Id).auto_increment().primary_key())
                    .col(string_len(Client::Name, 255).not_null())
                    .col(string_len(Client::Cpf, 20).not_null())
                    .col(double(Client::Income).not_null())
                    .col(timestamp_with_time_zone(Client::BirthDate).not_null())
                    .col(integer(Client::Children).not_null().default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Client::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Client {
    Table,
    Id,
    Name,
    Cpf,
    Income,
    BirthDate,
    Children,
}
