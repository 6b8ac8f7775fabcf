use axum::routing::{get, post};
use axum::Router;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use std::env;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chainwatch_backend::services::coingecko::CoinGeckoService;
use chainwatch_backend::services::moralis::MoralisService;
use chainwatch_backend::{handlers, jobs, AppState};

const DEFAULT_MORALIS_BASE_URL: &str = "https://deep-index.moralis.io/api/v2";
const DEFAULT_COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,chainwatch_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Connect to database
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    tracing::info!("Connecting to database...");
    let db = Database::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    // Run migrations
    tracing::info!("Running migrations...");
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let moralis_api_key = env::var("MORALIS_API_KEY").expect("MORALIS_API_KEY must be set");
    let moralis_base_url = env::var("MORALIS_API_BASE_URL")
        .unwrap_or_else(|_| DEFAULT_MORALIS_BASE_URL.to_string());
    let moralis = MoralisService::new(moralis_api_key, moralis_base_url);

    let coingecko_base_url = env::var("COINGECKO_API_BASE_URL")
        .unwrap_or_else(|_| DEFAULT_COINGECKO_BASE_URL.to_string());
    let coingecko = CoinGeckoService::new(coingecko_base_url);

    // Start background jobs: 5-minute price collection and hourly
    // threshold alerting, each on its own timer.
    jobs::price_collection_sync::start_price_collection_job(db.clone(), moralis).await;
    jobs::threshold_alert_sync::start_threshold_alert_job(db.clone()).await;

    let state = AppState { db, coingecko };

    // Build router
    let app = Router::new()
        .route("/", get(health))
        .route("/price/hourly", get(handlers::price::get_hourly_prices))
        .route("/price/swap-rate", get(handlers::swap::get_swap_rate))
        .route("/price/set-alert", post(handlers::alert::set_price_alert))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .unwrap();

    tracing::info!("Server listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}

async fn health() -> &'static str {
    "chainwatch backend up"
}
