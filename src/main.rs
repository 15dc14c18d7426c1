//! Maildeck server entry point.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Method};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use maildeck::adapters::auth::JwtSessions;
use maildeck::adapters::google::{GmailMailAdapter, GoogleIdentityProvider};
use maildeck::adapters::http::{app_router, AppState};
use maildeck::adapters::postgres::{
    PostgresTransactionRepository, PostgresUserRepository, PostgresWorkspaceRepository,
};
use maildeck::adapters::stripe::StripePaymentAdapter;
use maildeck::application::handlers::billing::PlanPrices;
use maildeck::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        stripe_test_mode = config.payment.is_test_mode(),
        "Starting maildeck"
    );

    // Database
    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    // Adapters
    let upstream_timeout = Duration::from_secs(config.server.upstream_timeout_secs);
    let sessions = Arc::new(JwtSessions::new(&config.auth));

    let state = AppState {
        identity_provider: Arc::new(GoogleIdentityProvider::new(
            &config.google,
            upstream_timeout,
        )),
        mail_provider: Arc::new(GmailMailAdapter::new(&config.google, upstream_timeout)),
        payment_provider: Arc::new(StripePaymentAdapter::new(&config.payment, upstream_timeout)),
        user_repository: Arc::new(PostgresUserRepository::new(pool.clone())),
        workspace_repository: Arc::new(PostgresWorkspaceRepository::new(pool.clone())),
        transaction_repository: Arc::new(PostgresTransactionRepository::new(pool)),
        token_issuer: sessions.clone(),
        session_validator: sessions,
        allowed_domain: config.google.allowed_domain.clone(),
        admin_email: config.google.admin_email.clone(),
        prices: PlanPrices {
            monthly_price_id: config.payment.monthly_price_id.clone(),
            yearly_price_id: config.payment.yearly_price_id.clone(),
            success_url: config.payment.success_url.clone(),
            cancel_url: config.payment.cancel_url.clone(),
        },
    };

    // CORS: explicit origins when configured, permissive in development.
    let cors = if config.server.cors_origins_list().is_empty() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = config
            .server
            .cors_origins_list()
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers([axum::http::header::AUTHORIZATION, axum::http::header::CONTENT_TYPE])
    };

    let app = app_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
