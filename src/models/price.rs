use serde::Deserialize;

use crate::models::chain::Chain;

#[derive(Debug, Clone, Deserialize)]
pub struct HourlyPricesQuery {
    pub chain: Chain,
}
