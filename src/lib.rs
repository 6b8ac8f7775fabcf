// src/lib.rs

use sea_orm::DatabaseConnection;
use services::coingecko::CoinGeckoService;

// sea-orm's `mock` feature (enabled via dev-dependencies during `cargo test`)
// removes the `Clone` derive from `DatabaseConnection`, so test builds need a
// manual impl. All variants reachable in test builds are themselves `Clone`.
#[cfg_attr(not(test), derive(Clone))]
pub struct AppState {
    pub db: DatabaseConnection,
    pub coingecko: CoinGeckoService,
}

#[cfg(test)]
impl Clone for AppState {
    fn clone(&self) -> Self {
        let db = match &self.db {
            DatabaseConnection::SqlxPostgresPoolConnection(conn) => {
                DatabaseConnection::SqlxPostgresPoolConnection(conn.clone())
            }
            DatabaseConnection::MockDatabaseConnection(conn) => {
                DatabaseConnection::MockDatabaseConnection(conn.clone())
            }
            DatabaseConnection::Disconnected => DatabaseConnection::Disconnected,
        };
        Self {
            db,
            coingecko: self.coingecko.clone(),
        }
    }
}

pub mod entities {
    pub mod prelude;
    pub mod alerts;
    pub mod prices;
}

pub mod services {
    pub mod coingecko;
    pub mod mailer;
    pub mod moralis;
}

pub mod handlers;
pub mod jobs;
pub mod models;
