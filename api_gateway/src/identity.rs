//! The Identity Verifier boundary.
//!
//! The gateway never inspects a credential itself. It hands the raw value to the passport service, which either
//! answers with the subject it was issued to or rejects it.
use std::time::Duration;

use log::*;
use msg_common::SubjectId;
use thiserror::Error;

use crate::data_objects::{CheckTokenRequest, CheckTokenResponse};

#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    #[error("The identity service rejected the credential with status {0}")]
    Rejected(u16),
    #[error("The identity service could not be reached. {0}")]
    Unreachable(String),
    #[error("The identity service sent an unexpected response. {0}")]
    MalformedResponse(String),
}

/// Resolves a raw credential to the subject it was issued to.
#[allow(async_fn_in_trait)]
pub trait IdentityVerifier {
    async fn verify(&self, credential: &str) -> Result<SubjectId, IdentityError>;
}

/// Checks credentials against `GET {passport}/check_token`.
#[derive(Debug, Clone)]
pub struct PassportVerifier {
    client: reqwest::Client,
    check_token_url: String,
}

impl PassportVerifier {
    pub fn new(passport_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, check_token_url: format!("{passport_url}/check_token") })
    }
}

impl IdentityVerifier for PassportVerifier {
    async fn verify(&self, credential: &str) -> Result<SubjectId, IdentityError> {
        let response = self
            .client
            .get(&self.check_token_url)
            .json(&CheckTokenRequest { token: credential.to_string() })
            .send()
            .await
            .map_err(|e| IdentityError::Unreachable(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            debug!("🔐️ Credential rejected by the identity service ({status})");
            return Err(IdentityError::Rejected(status.as_u16()));
        }
        let body = response
            .json::<CheckTokenResponse>()
            .await
            .map_err(|e| IdentityError::MalformedResponse(e.to_string()))?;
        SubjectId::new(body.user_id).ok_or_else(|| IdentityError::MalformedResponse("Empty user_id".into()))
    }
}
