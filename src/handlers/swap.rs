use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::common::ErrorResponse;
use crate::models::swap::{SwapRateQuery, SwapRateResponse};
use crate::services::coingecko::EthBtcSpot;
use crate::AppState;

/// Fee taken on the ETH side, as a fraction of the input amount
const FEE_RATE: Decimal = dec!(0.03);

/// GET /price/swap-rate?ethAmount=1.5
///
/// Indicative ETH -> BTC conversion at current CoinGecko spot prices,
/// with the fee quoted in both ETH and USD. Upstream trouble maps to
/// 503 rather than an empty quote.
pub async fn get_swap_rate(
    State(state): State<AppState>,
    Query(params): Query<SwapRateQuery>,
) -> Result<Json<SwapRateResponse>, (StatusCode, Json<ErrorResponse>)> {
    let spot = state.coingecko.fetch_eth_btc_spot().await.map_err(|e| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: format!("Failed to fetch swap rate: {}", e),
            }),
        )
    })?;

    let quote = compute_swap_quote(params.eth_amount, spot).ok_or_else(|| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "Upstream returned a non-positive BTC price".to_string(),
            }),
        )
    })?;

    Ok(Json(quote))
}

/// `None` when the BTC leg cannot be priced (non-positive spot).
pub(crate) fn compute_swap_quote(
    eth_amount: Decimal,
    spot: EthBtcSpot,
) -> Option<SwapRateResponse> {
    if spot.btc_usd <= Decimal::ZERO {
        return None;
    }

    let btc_amount = eth_amount * spot.eth_usd / spot.btc_usd;
    let fee_eth = eth_amount * FEE_RATE;
    let fee_usd = fee_eth * spot.eth_usd;

    Some(SwapRateResponse {
        btc_amount,
        fee_eth,
        fee_usd,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_at_spot_with_three_percent_fee() {
        let spot = EthBtcSpot {
            eth_usd: dec!(2000),
            btc_usd: dec!(40000),
        };

        let quote = compute_swap_quote(dec!(1), spot).unwrap();
        assert_eq!(quote.btc_amount, dec!(0.05));
        assert_eq!(quote.fee_eth, dec!(0.03));
        assert_eq!(quote.fee_usd, dec!(60));

        let quote = compute_swap_quote(dec!(2.5), spot).unwrap();
        assert_eq!(quote.btc_amount, dec!(0.125));
        assert_eq!(quote.fee_eth, dec!(0.075));
        assert_eq!(quote.fee_usd, dec!(150));
    }

    #[test]
    fn refuses_to_quote_against_non_positive_btc_price() {
        let spot = EthBtcSpot {
            eth_usd: dec!(2000),
            btc_usd: Decimal::ZERO,
        };
        assert!(compute_swap_quote(dec!(1), spot).is_none());
    }
}
