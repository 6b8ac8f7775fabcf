use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRateQuery {
    pub eth_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRateResponse {
    pub btc_amount: Decimal,
    pub fee_eth: Decimal,
    pub fee_usd: Decimal,
}
