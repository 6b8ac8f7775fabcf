use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set};

use crate::entities::alerts;
use crate::models::alert::{is_valid_email, SetAlertRequest};
use crate::models::common::ErrorResponse;
use crate::AppState;

/// POST /price/set-alert
///
/// Persists a target-price alert request. An unsupported chain is
/// rejected by deserialization before this handler runs. The record is
/// stored with `fulfilled = false`; nothing currently evaluates it.
pub async fn set_price_alert(
    State(state): State<AppState>,
    Json(payload): Json<SetAlertRequest>,
) -> Result<Json<alerts::Model>, (StatusCode, Json<ErrorResponse>)> {
    if payload.target_price <= Decimal::ZERO {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "targetPrice must be greater than zero".to_string(),
            }),
        ));
    }

    if !is_valid_email(&payload.email) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("'{}' is not a valid email address", payload.email),
            }),
        ));
    }

    let new_alert = alerts::ActiveModel {
        chain: Set(payload.chain.as_str().to_string()),
        target_price: Set(payload.target_price),
        email: Set(payload.email),
        fulfilled: Set(false),
        created_at: Set(Utc::now().fixed_offset()),
        ..Default::default()
    };

    let created = new_alert.insert(&state.db).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to insert alert: {}", e),
            }),
        )
    })?;

    Ok(Json(created))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chain::Chain;
    use axum::extract::State;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn test_state(db: sea_orm::DatabaseConnection) -> AppState {
        AppState {
            db,
            coingecko: crate::services::coingecko::CoinGeckoService::new(
                "http://localhost".to_string(),
            ),
        }
    }

    #[tokio::test]
    async fn persists_alert_with_fulfilled_false() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![alerts::Model {
                id: 7,
                chain: "ethereum".to_string(),
                target_price: dec!(3000),
                email: "a@b.com".to_string(),
                fulfilled: false,
                created_at: Utc::now().fixed_offset(),
            }]])
            .into_connection();

        let payload = SetAlertRequest {
            chain: Chain::Ethereum,
            target_price: dec!(3000),
            email: "a@b.com".to_string(),
        };

        let Json(created) = set_price_alert(State(test_state(db)), Json(payload))
            .await
            .unwrap();

        assert_eq!(created.id, 7);
        assert_eq!(created.chain, "ethereum");
        assert_eq!(created.target_price, dec!(3000));
        assert!(!created.fulfilled);
    }

    #[tokio::test]
    async fn rejects_invalid_email_without_persisting() {
        // No seeded results: an attempted insert would surface as a
        // 500, not the expected 400.
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let payload = SetAlertRequest {
            chain: Chain::Polygon,
            target_price: dec!(1),
            email: "not-an-email".to_string(),
        };

        let err = set_price_alert(State(test_state(db)), Json(payload))
            .await
            .unwrap_err();

        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_non_positive_target_price() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let payload = SetAlertRequest {
            chain: Chain::Ethereum,
            target_price: dec!(0),
            email: "a@b.com".to_string(),
        };

        let err = set_price_alert(State(test_state(db)), Json(payload))
            .await
            .unwrap_err();

        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unsupported_chain_is_rejected_at_deserialization() {
        let result: Result<SetAlertRequest, _> = serde_json::from_str(
            r#"{"chain": "solana", "targetPrice": 3000, "email": "a@b.com"}"#,
        );
        assert!(result.is_err());
    }
}
