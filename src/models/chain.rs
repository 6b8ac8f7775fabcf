use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// WETH contract address, priced on the eth chain
const ETHEREUM_CONTRACT_ADDRESS: &str = "0xC02aaa39b223FE8D0A0e5C4F27eAD9083C756Cc2";
/// MATIC ERC-20 contract address, priced on the eth chain
const POLYGON_CONTRACT_ADDRESS: &str = "0x7d1afa7b718fb893db30a3abc0cfc608aacfebb0";

/// A tracked chain. The wire form is lowercase ("ethereum", "polygon"),
/// which is also how samples are keyed in the prices table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Ethereum,
    Polygon,
}

impl Chain {
    /// Every chain the collection and alert jobs track, in processing order.
    pub const ALL: [Chain; 2] = [Chain::Ethereum, Chain::Polygon];

    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Ethereum => "ethereum",
            Chain::Polygon => "polygon",
        }
    }

    /// ERC-20 contract whose USD price stands in for this chain's token.
    pub fn contract_address(&self) -> &'static str {
        match self {
            Chain::Ethereum => ETHEREUM_CONTRACT_ADDRESS,
            Chain::Polygon => POLYGON_CONTRACT_ADDRESS,
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Chain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ethereum" => Ok(Chain::Ethereum),
            "polygon" => Ok(Chain::Polygon),
            other => Err(format!(
                "Unknown chain '{}', expected 'ethereum' or 'polygon'",
                other
            )),
        }
    }
}
