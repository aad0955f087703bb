//! Validation of the access tokens Consumers present to a Provider's endpoint
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The only signing algorithm tokens are accepted with.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TokenError {
    #[error("secret is required")]
    MissingSecret,
    #[error("jwt signature is required")]
    Unsigned,
    #[error("invalid algorithm")]
    InvalidAlgorithm,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("jwt malformed: {0}")]
    Malformed(String),
    #[error("Token has no expiry value")]
    MissingExpiry,
    #[error("Token has expired")]
    Expired { expired_at: f64 },
}

/// Decoded token payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Expiry, seconds since the epoch. Fractional values are accepted.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub exp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub iat: Option<f64>,
    /// Everything besides `exp` and `iat`.
    #[serde(flatten)]
    pub claims: Map<String, Value>,
}

impl TokenClaims {
    pub fn get(&self, claim: &str) -> Option<&Value> {
        self.claims.get(claim)
    }
}

pub fn validate_token(secret: Option<&str>, token: &str) -> Result<TokenClaims, TokenError> {
    validate_token_at(secret, token, Utc::now())
}

/// Checks, in order: secret presence, signature and algorithm, expiry claim
/// presence, expiry value. Each stage fails with its own error.
pub fn validate_token_at(
    secret: Option<&str>,
    token: &str,
    now: DateTime<Utc>,
) -> Result<TokenClaims, TokenError> {
    let secret = secret
        .filter(|s| !s.is_empty())
        .ok_or(TokenError::MissingSecret)?;

    let claims = verify(secret, token)?;

    let exp = claims.exp.ok_or(TokenError::MissingExpiry)?;
    if exp < now.timestamp() as f64 {
        return Err(TokenError::Expired { expired_at: exp });
    }
    Ok(claims)
}

fn verify(secret: &str, token: &str) -> Result<TokenClaims, TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(TokenError::Malformed(format!(
            "expected 3 segments, got {}",
            segments.len()
        )));
    }
    if segments[2].is_empty() {
        return Err(TokenError::Unsigned);
    }
    if header_algorithm(segments[0])? != "HS256" {
        return Err(TokenError::InvalidAlgorithm);
    }

    // Expiry is checked by the caller so that a missing claim is told apart
    // from an expired one.
    let mut validation = Validation::new(TOKEN_ALGORITHM);
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    jsonwebtoken::decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenError::InvalidAlgorithm
        }
        _ => TokenError::Malformed(e.to_string()),
    })
}

#[derive(Deserialize)]
struct JoseHeader {
    alg: String,
}

/// Reads `alg` as written, so names the decoder has no variant for (`none`,
/// `HS1024`) are still reported as an algorithm mismatch.
fn header_algorithm(segment: &str) -> Result<String, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .map_err(|e| TokenError::Malformed(format!("invalid header encoding: {}", e)))?;
    let header: JoseHeader = serde_json::from_slice(&bytes)
        .map_err(|e| TokenError::Malformed(format!("invalid header: {}", e)))?;
    Ok(header.alg)
}
