//! Admin token check for privileged routes.

use std::sync::Arc;

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::Response,
};

use super::state::AppState;
use super::types::{ApiResponse, error_codes};

type AuthRejection = (StatusCode, Json<ApiResponse<()>>);

/// Axum middleware guarding the admin and RPC routes.
pub async fn admin_auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AuthRejection> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    check_admin_token(state.admin_token(), auth_header).inspect_err(|(status, _)| {
        tracing::warn!(
            status = status.as_u16(),
            path = %request.uri().path(),
            "Rejected unauthenticated admin request"
        );
    })?;

    Ok(next.run(request).await)
}

/// Validate an `Authorization` header value against the configured token.
pub fn check_admin_token(expected: Option<&str>, auth_header: Option<&str>) -> Result<(), AuthRejection> {
    let Some(expected) = expected else {
        return Ok(());
    };

    let auth_header = auth_header.ok_or((
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::<()>::error(
            error_codes::MISSING_AUTH,
            "Missing Authorization header",
        )),
    ))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or((
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::<()>::error(
            error_codes::AUTH_FAILED,
            "Invalid token format",
        )),
    ))?;

    if !constant_time_eq(token.as_bytes(), expected.as_bytes()) {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<()>::error(
                error_codes::AUTH_FAILED,
                "Invalid admin token",
            )),
        ));
    }

    Ok(())
}

/// Byte comparison whose timing depends only on the lengths
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
