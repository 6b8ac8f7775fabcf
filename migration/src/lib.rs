pub use sea_orm_migration::prelude::*;

mod m20260820_000001_create_prices;
mod m20260820_000002_create_alerts;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260820_000001_create_prices::Migration),
            Box::new(m20260820_000002_create_alerts::Migration),
        ]
    }
}
