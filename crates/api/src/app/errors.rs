use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

/// The fixed body every guarded endpoint returns on failed authorization.
pub fn unauthorized() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        axum::Json(json!({ "error": "Unauthorized" })),
    )
        .into_response()
}

/// Handler-owned error shape: `{ "error": string, "details"?: string }`.
pub fn json_error(
    status: StatusCode,
    error: impl Into<String>,
    details: Option<String>,
) -> axum::response::Response {
    let body = match details {
        Some(details) => json!({ "error": error.into(), "details": details }),
        None => json!({ "error": error.into() }),
    };

    (status, axum::Json(body)).into_response()
}

pub async fn not_found() -> axum::response::Response {
    json_error(StatusCode::NOT_FOUND, "Not found", None)
}
