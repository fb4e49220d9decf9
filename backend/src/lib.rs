use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod scoring;

use auth::rate_limit::RateLimitState;
use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub rate_limiter: RateLimitState,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
            rate_limiter: RateLimitState::new(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let login_routes = Router::new()
        .route("/api/auth/login", post(handlers::auth::login))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::rate_limit::rate_limit_login,
        ));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .merge(login_routes);

    let protected_routes = Router::new()
        .route("/api/me", get(handlers::auth::me))
        // Months
        .route("/api/months", get(handlers::months::list_months))
        .route(
            "/api/months/:month",
            get(handlers::months::get_month).put(handlers::months::update_month),
        )
        // Days
        .route(
            "/api/days/:date",
            get(handlers::days::get_day).put(handlers::days::update_day),
        )
        // Rule sets
        .route("/api/rule-sets", get(handlers::rule_sets::list_rule_sets))
        .route("/api/rule-sets/:key", get(handlers::rule_sets::get_rule_set))
        .route(
            "/api/rule-sets/:key/days",
            get(handlers::rule_sets::rule_set_days),
        )
        // Foods
        .route(
            "/api/foods",
            get(handlers::foods::list_foods).post(handlers::foods::create_food),
        )
        .route(
            "/api/foods/:id",
            put(handlers::foods::update_food).delete(handlers::foods::delete_food),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors_layer(&state.config))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = std::iter::once(&config.frontend_url)
        .chain(&config.cors_extra_origins)
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}
