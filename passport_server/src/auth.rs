//! Bearer credentials issued by the passport service.
//!
//! Credentials are HS256 JWTs. Only the passport service holds the signing secret; everyone else checks a
//! credential by calling `/check_token`.
use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::*;
use serde::{Deserialize, Serialize};

use crate::{config::AuthConfig, errors::AuthError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub user_id: String,
    pub iat: i64,
    pub exp: i64,
}

pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: chrono::Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.reveal().as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            lifetime: config.token_lifetime,
        }
    }

    pub fn issue_token(&self, user_id: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = JwtClaims { user_id: user_id.to_string(), iat: now, exp: now + self.lifetime.num_seconds() };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::CouldNotIssueToken(e.to_string()))?;
        trace!("🔐️ Issued token for {user_id}, valid until {}", claims.exp);
        Ok(token)
    }

    /// Checks the signature and expiry of a credential and returns its claims.
    pub fn verify(&self, token: &str) -> Result<JwtClaims, AuthError> {
        let data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken(e.to_string()),
        })?;
        if data.claims.user_id.trim().is_empty() {
            return Err(AuthError::InvalidToken("Token has no subject".into()));
        }
        Ok(data.claims)
    }
}
