use moka::future::Cache;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

const SPOT_CACHE_KEY: &str = "eth_btc_usd";
const SPOT_CACHE_TTL_SECS: u64 = 60;

/// CoinGecko spot-price source for the swap-rate quote.
#[derive(Clone)]
pub struct CoinGeckoService {
    client: Client,
    base_url: String,
    cache: Arc<Cache<String, EthBtcSpot>>,
}

/// USD spot prices for the ETH/BTC pair.
#[derive(Debug, Clone, Copy)]
pub struct EthBtcSpot {
    pub eth_usd: Decimal,
    pub btc_usd: Decimal,
}

#[derive(Debug, Deserialize)]
struct SimplePriceResponse {
    ethereum: UsdQuote,
    bitcoin: UsdQuote,
}

#[derive(Debug, Deserialize)]
struct UsdQuote {
    usd: f64,
}

impl CoinGeckoService {
    pub fn new(base_url: String) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(Duration::from_secs(SPOT_CACHE_TTL_SECS))
            .build();

        Self {
            client: Client::new(),
            base_url,
            cache: Arc::new(cache),
        }
    }

    pub async fn fetch_eth_btc_spot(
        &self,
    ) -> Result<EthBtcSpot, Box<dyn std::error::Error + Send + Sync>> {
        if let Some(cached) = self.cache.get(SPOT_CACHE_KEY).await {
            tracing::debug!("Cache hit for ETH/BTC spot prices");
            return Ok(cached);
        }

        let url = format!("{}/simple/price", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .query(&[("ids", "ethereum,bitcoin"), ("vs_currencies", "usd")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(format!("CoinGecko API error {}: {}", status, error_text).into());
        }

        let data: SimplePriceResponse = response.json().await?;

        let spot = EthBtcSpot {
            eth_usd: Decimal::from_f64_retain(data.ethereum.usd)
                .ok_or("Unrepresentable ethereum price")?,
            btc_usd: Decimal::from_f64_retain(data.bitcoin.usd)
                .ok_or("Unrepresentable bitcoin price")?,
        };

        self.cache.insert(SPOT_CACHE_KEY.to_string(), spot).await;

        Ok(spot)
    }
}
