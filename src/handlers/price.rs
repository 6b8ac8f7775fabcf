use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder};

use crate::entities::{prelude::*, prices};
use crate::models::common::ErrorResponse;
use crate::models::price::HourlyPricesQuery;
use crate::AppState;

/// GET /price/hourly?chain=ethereum
///
/// All samples for the chain from the last 24 hours, ascending by
/// timestamp.
pub async fn get_hourly_prices(
    State(state): State<AppState>,
    Query(params): Query<HourlyPricesQuery>,
) -> Result<Json<Vec<prices::Model>>, (StatusCode, Json<ErrorResponse>)> {
    let cutoff = (Utc::now() - chrono::Duration::hours(24)).fixed_offset();

    let samples = Prices::find()
        .filter(prices::Column::Chain.eq(params.chain.as_str()))
        .filter(prices::Column::Timestamp.gt(cutoff))
        .order_by(prices::Column::Timestamp, Order::Asc)
        .all(&state.db)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Database error: {}", e),
                }),
            )
        })?;

    Ok(Json(samples))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chain::Chain;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_state(db: sea_orm::DatabaseConnection) -> AppState {
        AppState {
            db,
            coingecko: crate::services::coingecko::CoinGeckoService::new(
                "http://localhost".to_string(),
            ),
        }
    }

    fn test_router(db: sea_orm::DatabaseConnection) -> Router {
        Router::new()
            .route("/price/hourly", get(get_hourly_prices))
            .with_state(test_state(db))
    }

    fn sample(id: i32, chain: Chain, price: rust_decimal::Decimal, minutes_ago: i64) -> prices::Model {
        prices::Model {
            id,
            chain: chain.as_str().to_string(),
            price,
            timestamp: (Utc::now() - chrono::Duration::minutes(minutes_ago)).fixed_offset(),
        }
    }

    #[tokio::test]
    async fn returns_samples_in_ascending_order() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                sample(1, Chain::Ethereum, dec!(1990), 120),
                sample(2, Chain::Ethereum, dec!(2000), 60),
                sample(3, Chain::Ethereum, dec!(2070), 5),
            ]])
            .into_connection();

        let response = test_router(db)
            .oneshot(
                Request::builder()
                    .uri("/price/hourly?chain=ethereum")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();

        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        let ids: Vec<i64> = rows.iter().map(|r| r["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(rows.iter().all(|r| r["chain"] == "ethereum"));
    }

    #[tokio::test]
    async fn rejects_unknown_chain_before_touching_store() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let response = test_router(db)
            .oneshot(
                Request::builder()
                    .uri("/price/hourly?chain=solana")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
