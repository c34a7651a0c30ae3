use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::shared::error::ApiError;
use crate::shared::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

/// Caller identity attached to the request extensions once the bearer
/// token checks out.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub subject: String,
    pub claims: TokenClaims,
}

/// Sign an HS256 token for `subject`. The server does not run a login flow
/// of its own; this exists for tooling and tests against a known secret.
pub fn issue_token(subject: &str, secret: &str, ttl_secs: u64) -> Result<String, ApiError> {
    let now = chrono::Utc::now().timestamp();
    let claims = TokenClaims {
        sub: subject.to_string(),
        iat: now,
        exp: now + ttl_secs as i64,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("Token signing failed: {e}")))
}

pub fn validate_jwt(token: &str, secret: &str) -> Result<TokenClaims, ApiError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["sub", "exp"]);

    decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            ApiError::Unauthorized("Token expired".to_string())
        }
        _ => ApiError::Unauthorized(format!("Invalid token: {e}")),
    })
}

/// Bearer middleware guarding every `/api` route.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = match bearer_token(&request) {
        Ok(token) => token,
        Err(e) => return e.into_response(),
    };

    match validate_jwt(&token, &state.config.auth.jwt_secret) {
        Ok(claims) => {
            request.extensions_mut().insert(AuthenticatedUser {
                subject: claims.sub.clone(),
                claims,
            });
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

fn bearer_token(request: &Request<Body>) -> Result<String, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization token".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::to_string)
        .ok_or_else(|| ApiError::Unauthorized("Invalid authorization format".to_string()))
}

/// GET /api/auth/validate-token — reaching this handler means the bearer
/// middleware already accepted the token.
pub async fn validate_token(
    Extension(user): Extension<AuthenticatedUser>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "valid",
        "subject": user.subject,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn issued_token_round_trips() {
        let token = issue_token("ana@example.com", SECRET, 60).unwrap();
        let claims = validate_jwt(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "ana@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = chrono::Utc::now().timestamp();
        let claims = TokenClaims {
            sub: "ana@example.com".to_string(),
            iat: now - 600,
            exp: now - 120,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let err = validate_jwt(&token, SECRET).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token("ana@example.com", SECRET, 60).unwrap();
        assert!(validate_jwt(&token, "other-secret").is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(validate_jwt("not.a.jwt", SECRET).is_err());
    }
}
