use axum::{
    RequestPartsExt,
    extract::{Request, State},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use super::http::server::{api_entities::api_error::ApiErrorResponse, app_state::AppState};
use crate::args::AuthArgs;

/// The authenticated caller, as issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub exp: usize,
    #[serde(default)]
    pub iss: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Token not found")]
    TokenNotFound,
    #[error("Invalid signature")]
    InvalidSignature,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = StatusCode::UNAUTHORIZED;
        let body = ApiErrorResponse {
            code: "E_UNAUTHORIZED".to_string(),
            message: self.to_string(),
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Verifies bearer tokens against the identity provider's key.
#[derive(Clone)]
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtVerifier")
            .field("algorithms", &self.validation.algorithms)
            .finish()
    }
}

impl JwtVerifier {
    pub fn from_args(args: &AuthArgs) -> Result<Self, anyhow::Error> {
        let (key, algorithm) = match (&args.jwt_public_key, &args.jwt_secret) {
            (Some(pem), _) => (
                DecodingKey::from_rsa_pem(pem.replace("\\n", "\n").as_bytes())?,
                Algorithm::RS256,
            ),
            (None, Some(secret)) => (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256),
            (None, None) => {
                anyhow::bail!("either AUTH_JWT_PUBLIC_KEY or AUTH_JWT_SECRET must be set")
            }
        };

        let mut validation = Validation::new(algorithm);
        if let Some(issuer) = &args.issuer {
            validation.set_issuer(&[issuer]);
        }

        Ok(Self { key, validation })
    }

    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let data = decode::<JwtClaims>(token, &self.key, &self.validation).map_err(|e| {
            debug!("Rejected token: {}", e);
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::InvalidToken,
            }
        })?;

        if data.claims.sub.is_empty() {
            error!("Token without subject");
            return Err(AuthError::InvalidToken);
        }

        Ok(Identity {
            user_id: data.claims.sub,
        })
    }
}

pub async fn extract_token_from_bearer(parts: &mut Parts) -> Result<String, AuthError> {
    let TypedHeader(Authorization(bearer)) = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .map_err(|_| AuthError::TokenNotFound)?;

    Ok(bearer.token().to_string())
}

/// Requires a valid bearer token and exposes the caller as an [`Identity`] extension.
pub async fn auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let (mut parts, body) = req.into_parts();
    let token = extract_token_from_bearer(&mut parts).await?;
    let identity = state.verifier.verify(&token)?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
