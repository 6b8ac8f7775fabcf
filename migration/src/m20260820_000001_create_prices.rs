use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Prices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prices::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Prices::Chain).string().not_null())
                    .col(
                        ColumnDef::new(Prices::Price)
                            .decimal_len(30, 10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Prices::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Both job queries and the hourly endpoint filter on (chain, timestamp)
        manager
            .create_index(
                Index::create()
                    .name("idx_prices_chain_timestamp")
                    .table(Prices::Table)
                    .col(Prices::Chain)
                    .col(Prices::Timestamp)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Prices::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Prices {
    Table,
    Id,
    Chain,
    Price,
    Timestamp,
}
