use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::chain::Chain;

/// Per-call price source for the collection job. Implementations never
/// propagate upstream failures: a failed call is logged and reported as
/// `None` so one chain's outage cannot block another chain's cycle.
#[async_trait]
pub trait PriceFetcher: Send + Sync {
    async fn fetch_price(&self, chain: Chain) -> Option<Decimal>;
}

#[derive(Clone)]
pub struct MoralisService {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct TokenPriceResponse {
    #[serde(rename = "usdPrice")]
    usd_price: f64,
}

impl MoralisService {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    async fn fetch_usd_price(
        &self,
        chain: Chain,
    ) -> Result<Decimal, Box<dyn std::error::Error + Send + Sync>> {
        let url = format!("{}/erc20/{}/price", self.base_url, chain.contract_address());

        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .header("X-API-Key", &self.api_key)
            .query(&[("chain", "eth")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(format!("Moralis API error {}: {}", status, error_text).into());
        }

        let data: TokenPriceResponse = response.json().await?;

        let price = Decimal::from_f64_retain(data.usd_price)
            .ok_or_else(|| format!("Unrepresentable usdPrice {}", data.usd_price))?;

        if price <= Decimal::ZERO {
            return Err(format!("Non-positive usdPrice {} for {}", price, chain).into());
        }

        Ok(price)
    }
}

#[async_trait]
impl PriceFetcher for MoralisService {
    async fn fetch_price(&self, chain: Chain) -> Option<Decimal> {
        match self.fetch_usd_price(chain).await {
            Ok(price) => {
                tracing::debug!(chain = %chain, price = %price, "Fetched price from Moralis");
                Some(price)
            }
            Err(e) => {
                tracing::error!(chain = %chain, error = %e, "Failed to fetch price");
                None
            }
        }
    }
}
