//! Price Collection Job
//!
//! Polls the Moralis price oracle for every tracked chain on a fixed
//! interval and appends successful results to the prices table. Chains
//! are processed independently: a failed fetch or insert for one chain
//! never blocks the other in the same cycle.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::env;
use tokio::time::{interval, Duration};
use tracing::{error, info};

use crate::entities::prices;
use crate::models::chain::Chain;
use crate::services::moralis::PriceFetcher;

/// Default collection interval in seconds (5 minutes)
const DEFAULT_FETCH_INTERVAL_SECS: u64 = 300;

/// Environment variable for the collection interval
const ENV_FETCH_INTERVAL: &str = "PRICE_FETCH_INTERVAL_SECS";

/// Start the price collection job
///
/// Spawns a background task that fetches the current USD price for each
/// tracked chain every `PRICE_FETCH_INTERVAL_SECS` seconds (default:
/// 300) and stores one sample per successful fetch.
pub async fn start_price_collection_job<F>(db: DatabaseConnection, fetcher: F)
where
    F: PriceFetcher + 'static,
{
    tokio::spawn(async move {
        let fetch_interval_secs: u64 = env::var(ENV_FETCH_INTERVAL)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_FETCH_INTERVAL_SECS);

        info!(
            fetch_interval_secs = fetch_interval_secs,
            "Starting price collection job"
        );

        let mut interval = interval(Duration::from_secs(fetch_interval_secs));

        loop {
            interval.tick().await;
            info!("Fetching prices for tracked chains");

            let stored = collect_prices(&db, &fetcher).await;

            info!(stored = stored, "Price collection cycle complete");
        }
    });
}

/// Run one collection cycle. Returns the number of samples stored.
///
/// A fetch failure skips persistence for that chain only; no retry
/// within the cycle and no record of the miss. An insert error is
/// logged and the remaining chains still get their turn.
pub async fn collect_prices(db: &DatabaseConnection, fetcher: &impl PriceFetcher) -> usize {
    let mut stored = 0;

    for chain in Chain::ALL {
        let Some(price) = fetcher.fetch_price(chain).await else {
            continue;
        };

        let sample = prices::ActiveModel {
            chain: Set(chain.as_str().to_string()),
            price: Set(price),
            timestamp: Set(Utc::now().fixed_offset()),
            ..Default::default()
        };

        match sample.insert(db).await {
            Ok(_) => stored += 1,
            Err(e) => {
                error!(chain = %chain, error = %e, "Failed to persist price sample");
            }
        }
    }

    stored
}
