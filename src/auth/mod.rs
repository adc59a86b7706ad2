//! Bearer-token authentication for admin endpoints.
//!
//! Tokens are HS256 JWTs issued elsewhere; this module only verifies them
//! against the server-held secret.

use std::collections::HashSet;

use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Identity claims carried by an admin token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminClaims {
    pub admin_id: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
    /// Expiration time (Unix timestamp), validated when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

/// Bearer authentication layer function that takes the secret as a parameter.
///
/// On success the decoded [`AdminClaims`] are stored in the request
/// extensions for handlers to pick up.
pub async fn bearer_auth_layer(
    secret: Option<String>,
    mut request: Request,
    next: Next,
) -> Response {
    match authorize(secret.as_deref(), request.headers()) {
        Ok(claims) => {
            tracing::debug!(admin = %claims.email, "Admin token accepted");
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(err) => {
            tracing::warn!("Admin request rejected: {}", err);
            err.into_response()
        }
    }
}

/// Bearer authentication that can be switched off by configuration.
pub async fn optional_bearer_auth_layer(
    enabled: bool,
    secret: Option<String>,
    request: Request,
    next: Next,
) -> Response {
    if !enabled {
        return next.run(request).await;
    }
    bearer_auth_layer(secret, request, next).await
}

/// Check the `Authorization` header against the configured secret.
pub fn authorize(secret: Option<&str>, headers: &HeaderMap) -> Result<AdminClaims, AppError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Authorization header required".to_string()))?;

    let secret = secret
        .ok_or_else(|| AppError::AuthNotConfigured("JWT secret not configured".to_string()))?;

    verify_token(token, secret)
}

/// Verify an HS256 token signature and expiry.
pub fn verify_token(token: &str, secret: &str) -> Result<AdminClaims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Tokens without `exp` are accepted; tokens with one must not be expired.
    validation.required_spec_claims = HashSet::new();

    decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!("Token verification failed: {}", e);
        AppError::Unauthorized("Invalid or expired token".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn sign(secret: &str, exp: Option<u64>) -> String {
        let claims = AdminClaims {
            admin_id: "admin-1".to_string(),
            email: "admin@blufacade.example".to_string(),
            role: "admin".to_string(),
            exp,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    fn in_one_hour() -> u64 {
        (chrono::Utc::now().timestamp() + 3600) as u64
    }

    #[test]
    fn test_valid_token_exposes_claims() {
        let token = sign("secret", Some(in_one_hour()));
        let claims = authorize(Some("secret"), &bearer(&token)).unwrap();
        assert_eq!(claims.admin_id, "admin-1");
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn test_token_without_expiry_accepted() {
        let token = sign("secret", None);
        assert!(verify_token(&token, "secret").is_ok());
    }

    #[test]
    fn test_missing_header() {
        let err = authorize(Some("secret"), &HeaderMap::new()).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
        assert_eq!(err.message(), "Authorization header required");
    }

    #[test]
    fn test_malformed_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Token abc"));
        assert!(matches!(
            authorize(Some("secret"), &headers),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = sign("other-secret", Some(in_one_hour()));
        let err = authorize(Some("secret"), &bearer(&token)).unwrap_err();
        assert_eq!(err.message(), "Invalid or expired token");
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = sign("secret", Some(1_000_000));
        assert!(verify_token(&token, "secret").is_err());
    }

    #[test]
    fn test_missing_secret_is_configuration_error() {
        let token = sign("secret", None);
        assert!(matches!(
            authorize(None, &bearer(&token)),
            Err(AppError::AuthNotConfigured(_))
        ));
    }
}
