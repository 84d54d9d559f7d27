use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

// --- Response Schemas (Output) ---

/// ErrorBody
///
/// JSON body of every rejection written by the access boundary, e.g.
/// `{"error":"Unauthorized: Invalid API key"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ErrorBody {
    #[schema(example = "Unauthorized: Invalid API key")]
    pub error: String,
}

/// KeyStatus
///
/// Output schema for GET /api/verify. Only ever produced for admitted requests, so
/// `valid` is always true on the wire; rejected keys get an `ErrorBody` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct KeyStatus {
    pub valid: bool,
}

/// HealthStatus
///
/// Liveness payload for load balancers (GET /health).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct HealthStatus {
    #[schema(example = "ok")]
    pub status: String,
}
