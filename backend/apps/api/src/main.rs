//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use auth::{AuthConfig, PgUserRepository};
use axum::{
    Json, Router, http,
    http::{Method, StatusCode, header},
};
use qna::{EmailNotifier, PgQnaRepository, QnaConfig};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,qna=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Token secret is shared by the signer (auth) and verifier (qna)
    let (auth_config, qna_config) = if cfg!(debug_assertions) && env::var("SECRET").is_err() {
        let auth_config = AuthConfig::development();
        let qna_config = QnaConfig {
            token_secret: auth_config.token_secret,
        };
        (auth_config, qna_config)
    } else {
        let secret = env::var("SECRET").expect("SECRET must be set in production");
        (
            AuthConfig::from_secret_str(&secret),
            QnaConfig::from_secret_str(&secret),
        )
    };

    // Answer notifications are best-effort; missing SMTP config just
    // disables them
    let smtp_url = env::var("SMTP_URL").ok();
    let smtp_from = env::var("SMTP_FROM").ok();
    let notifier = EmailNotifier::from_config(smtp_url.as_deref(), smtp_from.as_deref());

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let user_repo = PgUserRepository::new(pool.clone());
    let qna_repo = PgQnaRepository::new(pool.clone());

    let app = Router::new()
        .nest(
            "/api/v1/auth",
            auth::auth_router(user_repo.clone(), auth_config.clone()),
        )
        .nest("/api/v1/user", auth::user_router(user_repo, auth_config))
        .nest(
            "/api/v1/question",
            qna::question_router(qna_repo.clone(), notifier.clone(), qna_config.clone()),
        )
        .nest(
            "/api/v1/answer",
            qna::answer_router(qna_repo, notifier, qna_config),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    // Release the pool before exiting
    // (unreachable under normal operation; serve runs until killed)
    Ok(())
}

/// Uniform response for requests no route handles
async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "message": "Not found" })),
    )
}
