//! Blufacade Backend
//!
//! REST backend for the careers page and client logo gallery, with SQLite
//! persistence and image uploads relayed to Cloudinary.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod uploads;

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Request},
    middleware::{self, Next},
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;
use uploads::{CloudinaryRelay, UploadRelay};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub uploads: Arc<dyn UploadRelay>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Blufacade Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.jwt_secret.is_none() {
        tracing::warn!(
            "No JWT secret configured (BLUFACADE_JWT_SECRET). Admin logo endpoints will fail!"
        );
    }
    if config.cloudinary.is_none() {
        tracing::warn!("Cloudinary is not configured. Logo uploads will fail!");
    }
    if !config.protect_careers {
        tracing::info!("Careers and job posting writes are not behind bearer auth");
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Initialize image upload relay
    let uploads: Arc<dyn UploadRelay> = Arc::new(CloudinaryRelay::new(
        config.cloudinary.clone(),
        config.upload_timeout,
    )?);

    let state = AppState {
        repo,
        uploads,
        config: Arc::new(config.clone()),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let secret = state.config.jwt_secret.clone();
    let admin_auth = middleware::from_fn(move |req: Request, next: Next| {
        auth::bearer_auth_layer(secret.clone(), req, next)
    });

    let protect_careers = state.config.protect_careers;
    let careers_secret = state.config.jwt_secret.clone();
    let careers_auth = middleware::from_fn(move |req: Request, next: Next| {
        auth::optional_bearer_auth_layer(protect_careers, careers_secret.clone(), req, next)
    });

    // Careers page and job postings. Reads are always public; writes are
    // guarded only when BLUFACADE_PROTECT_CAREERS is set.
    let careers_routes = Router::new()
        .route(
            "/admin/careers",
            get(api::get_careers).merge(put(api::update_careers).layer(careers_auth.clone())),
        )
        .route(
            "/admin/careers/jobs",
            get(api::list_jobs).merge(post(api::create_job).layer(careers_auth.clone())),
        )
        .route(
            "/admin/careers/jobs/{id}",
            get(api::get_job).merge(
                put(api::update_job)
                    .delete(api::delete_job)
                    .layer(careers_auth),
            ),
        )
        .route("/careers/jobs", get(api::list_active_jobs));

    // Client logo administration
    let admin_logo_routes = Router::new()
        .route("/admin/client-logos", get(api::list_client_logos))
        .route("/admin/client-logos", post(api::create_client_logo))
        .route(
            "/admin/client-logos",
            delete(api::delete_client_logo_by_query),
        )
        .route("/admin/client-logos/{id}", get(api::get_client_logo))
        .route("/admin/client-logos/{id}", put(api::update_client_logo))
        .route("/admin/client-logos/{id}", delete(api::delete_client_logo))
        .layer(admin_auth);

    // Public reads
    let public_routes = Router::new()
        .route("/client-logos", get(api::list_public_client_logos))
        .route("/status", get(api::get_status));

    let api_routes = careers_routes
        .merge(admin_logo_routes)
        .merge(public_routes);

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(state.config.max_upload_bytes)),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
