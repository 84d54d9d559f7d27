use axum::{
    Router,
    extract::FromRef,
    http::HeaderName,
    middleware,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey as ApiKeyScheme, ApiKeyValue, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Server-side access boundary.
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

// Client-side role guard and route table.
pub mod guard;

// Module for routing segregation (Public, Protected).
pub mod routes;
use routes::{protected, public};

// --- Public Re-exports ---

pub use auth::{ApiKey, ApiKeyGate, X_API_KEY, api_key_middleware};
pub use config::{AppConfig, Env};
pub use error::{AuthError, RouteError};

/// ApiDoc
///
/// Generated OpenAPI document, served at `/api-docs/openapi.json`. Declares the
/// `x-api-key` header scheme so Swagger UI can send the key on protected calls.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::health, handlers::verify_api_key),
    components(schemas(models::ErrorBody, models::KeyStatus, models::HealthStatus)),
    modifiers(&ApiKeySecurity),
    tags(
        (name = "invoice-portal", description = "Invoice portal access boundary")
    )
)]
struct ApiDoc;

struct ApiKeySecurity;

impl Modify for ApiKeySecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKeyScheme::Header(ApiKeyValue::new(
                    X_API_KEY.as_str(),
                ))),
            );
        }
    }
}

/// AppState
///
/// Shared, immutable state handed to every request. The gate only needs the
/// configuration; collaborators mounting their own routes read what they need from
/// here through `FromRef`.
#[derive(Clone)]
pub struct AppState {
    /// Configuration: The loaded, immutable environment configuration.
    pub config: AppConfig,
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the built-in routes (health, docs, key verification).
pub fn create_router(state: AppState) -> Router {
    create_router_with(state, Router::new())
}

/// create_router_with
///
/// Same as [`create_router`], with `extra_protected` merged into the protected router.
/// Every route in `extra_protected` sits behind the API-key gate: a request without
/// the configured `x-api-key` never reaches its handler.
pub fn create_router_with(state: AppState, extra_protected: Router<AppState>) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        // Protected Routes: the gate runs as a route layer, so unmatched paths still 404.
        .merge(
            protected::protected_routes()
                .merge(extra_protected)
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    api_key_middleware,
                )),
        )
        .with_state(state);

    // 3. Observability and Correlation Layers
    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS Layer
        .layer(cors)
}

/// trace_span_logger
///
/// Span factory for `TraceLayer`: tags every log line of a request with its method,
/// URI and `x-request-id`. Request headers are not recorded, so the API key never
/// reaches the logs.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
