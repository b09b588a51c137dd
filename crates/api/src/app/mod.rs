//! HTTP application wiring (Axum router + shared services).
//!
//! - `services.rs`: the stores and the optional payment gateway
//! - `routes/`: handlers, one file per area
//! - `dto.rs`: query and view shapes that only the HTTP layer needs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Extension, Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::middleware::{self, AuthState, API_KEY_HEADER};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the tests).
pub fn build_app(config: &Config, services: Arc<AppServices>) -> Router {
    let auth_state = AuthState::new(config.api_key.clone(), config.dev_mode);

    let gateway_routes = routes::payments::router().route_layer(
        axum::middleware::from_fn_with_state(services.clone(), middleware::require_gateway),
    );

    // Protected routes: API key first, then (for payments) a configured gateway.
    let protected = routes::router()
        .merge(gateway_routes)
        .route_layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::api_key_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/api/health", get(routes::system::health))
        .route("/api/webhooks/stripe", post(routes::webhooks::stripe_webhook))
        .nest("/api", protected)
        .fallback(routes::system::not_found)
        .layer(Extension(services))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config.frontend_url)),
        )
}

pub use services::AppServices;

fn cors_layer(frontend_url: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(API_KEY_HEADER),
        ])
        .allow_credentials(true);

    match HeaderValue::from_str(frontend_url) {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            tracing::warn!(frontend_url, "FRONTEND_URL is not a valid origin; CORS disabled");
            layer
        }
    }
}
