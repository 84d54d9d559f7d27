use axum::Json;

use crate::{
    auth::ApiKeyGate,
    models::{ErrorBody, HealthStatus, KeyStatus},
};

// --- Handlers ---

/// health
///
/// [Public Route] Liveness probe. Never touches the gate.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthStatus))
)]
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
    })
}

/// verify_api_key
///
/// [Protected Route] Lets a client check its key without side effects.
///
/// The gate already ran as a route layer; the `ApiKeyGate` argument repeats the check
/// so the handler stays safe if it is ever mounted outside the protected router.
#[utoipa::path(
    get,
    path = "/api/verify",
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Key accepted", body = KeyStatus),
        (status = 401, description = "Missing or invalid key", body = ErrorBody)
    )
)]
pub async fn verify_api_key(_gate: ApiKeyGate) -> Json<KeyStatus> {
    Json(KeyStatus { valid: true })
}
