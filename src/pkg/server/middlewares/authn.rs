use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use standard_error::{StandardError, Status};

use crate::{prelude::Result, token};

/// Gate for mutating routes: a bearer token signed with the service secret
/// and carrying the admin claim. Reads stay anonymous.
pub async fn require_admin(headers: HeaderMap, request: Request, next: Next) -> Result<Response> {
    let claims = match bearer_token(&headers) {
        Some(raw) => token::verify_token(&raw)?,
        None => {
            tracing::warn!("token missing, authentication denied");
            return Err(StandardError::new("ERR-AUTH-001").code(StatusCode::UNAUTHORIZED));
        }
    };
    if !claims.is_admin {
        tracing::warn!("user {} is not an admin, denied", &claims.username);
        return Err(StandardError::new("ERR-AUTH-002").code(StatusCode::UNAUTHORIZED));
    }
    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    value
        .strip_prefix("Bearer ")
        .map(|raw| raw.trim().to_string())
}
