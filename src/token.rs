use axum::http::StatusCode;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use standard_error::{StandardError, Status};

use crate::{conf::settings, prelude::Result};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub is_admin: bool,
    pub exp: i64,
}

pub fn generate_token(username: &str, is_admin: bool) -> Result<String> {
    let expiration = Utc::now() + chrono::Duration::hours(24);
    let claims = Claims {
        username: username.to_string(),
        is_admin,
        exp: expiration.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
    )
    .map_err(|_| StandardError::new("ERR-AUTH-001").code(StatusCode::UNAUTHORIZED))
}

pub fn verify_token(token: &str) -> Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| StandardError::new("ERR-AUTH-001").code(StatusCode::UNAUTHORIZED))
}
