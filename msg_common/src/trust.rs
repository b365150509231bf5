//! The trusted subject assertion.
//!
//! The gateway authenticates the client once, then tells the backend services who the caller is by attaching the
//! subject identifier to the internal request. Backends accept this value without looking at the original
//! credential. This only holds if the backends cannot be reached from outside the private network.
//!
//! When the services share an internal secret, the gateway also sends an HMAC-SHA256 of the subject
//! ([`SUBJECT_SIGNATURE_HEADER`]) and the backends refuse assertions that do not carry a valid one. This stops a
//! host inside the network from claiming an arbitrary identity just by setting a header.

use std::fmt::Display;

use hmac::{Hmac, Mac};
use log::*;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::Secret;

/// The header the passport service reads the asserted subject from.
pub const USER_ID_HEADER: &str = "X-User-Id";
/// The metadata key the posts RPC service reads the asserted subject from.
pub const ACTOR_METADATA_KEY: &str = "actor_user_id";
/// base64(HMAC-SHA256(internal secret, subject)). Only present when an internal secret is configured.
pub const SUBJECT_SIGNATURE_HEADER: &str = "X-Subject-Signature";

type HmacSha256 = Hmac<Sha256>;

/// The identity of the caller, as resolved by the identity service. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    /// Returns `None` for empty or whitespace-only identifiers.
    pub fn new<S: Into<String>>(id: S) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for SubjectId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<String> for SubjectId {
    fn eq(&self, other: &String) -> bool {
        &self.0 == other
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrustError {
    #[error("No subject assertion was attached to the request")]
    MissingSubject,
    #[error("The subject assertion is not signed")]
    MissingSignature,
    #[error("The subject assertion signature is invalid")]
    InvalidSignature,
    #[error("The internal secret cannot be used as an HMAC key")]
    InvalidKey,
}

fn mac_for(secret: &Secret<String>, subject: &SubjectId) -> Result<HmacSha256, TrustError> {
    let mut mac = HmacSha256::new_from_slice(secret.reveal().as_bytes()).map_err(|_| TrustError::InvalidKey)?;
    mac.update(subject.as_str().as_bytes());
    Ok(mac)
}

/// Signs the subject with the internal secret.
pub fn sign_subject(secret: &Secret<String>, subject: &SubjectId) -> Result<String, TrustError> {
    let mac = mac_for(secret, subject)?;
    Ok(base64::encode(mac.finalize().into_bytes()))
}

/// Checks a signature produced by [`sign_subject`] in constant time.
pub fn verify_subject(secret: &Secret<String>, subject: &SubjectId, signature: &str) -> Result<(), TrustError> {
    let raw = base64::decode(signature.trim()).map_err(|_| TrustError::InvalidSignature)?;
    mac_for(secret, subject)?.verify_slice(&raw).map_err(|_| TrustError::InvalidSignature)
}

/// Validates an incoming assertion as found in the request metadata.
///
/// If `secret` is `None` the subject is accepted as-is.
pub fn check_assertion(
    subject: Option<&str>,
    signature: Option<&str>,
    secret: Option<&Secret<String>>,
) -> Result<SubjectId, TrustError> {
    let subject = subject.and_then(SubjectId::new).ok_or(TrustError::MissingSubject)?;
    if let Some(secret) = secret {
        let signature = signature.ok_or_else(|| {
            warn!("🔐️ Unsigned subject assertion for {subject} rejected");
            TrustError::MissingSignature
        })?;
        verify_subject(secret, &subject, signature).map_err(|e| {
            warn!("🔐️ Subject assertion for {subject} rejected. {e}");
            e
        })?;
    }
    trace!("🔐️ Accepted subject assertion for {subject}");
    Ok(subject)
}

/// The trust settings of one service: whether assertions are signed, and with which key.
#[derive(Debug, Clone, Default)]
pub struct TrustConfig {
    secret: Option<Secret<String>>,
}

impl TrustConfig {
    pub fn new(secret: Option<Secret<String>>) -> Self {
        Self { secret }
    }

    pub fn is_signed(&self) -> bool {
        self.secret.is_some()
    }

    /// The signature to attach to an outbound assertion, if assertions are signed.
    pub fn sign(&self, subject: &SubjectId) -> Result<Option<String>, TrustError> {
        self.secret.as_ref().map(|s| sign_subject(s, subject)).transpose()
    }

    pub fn check(&self, subject: Option<&str>, signature: Option<&str>) -> Result<SubjectId, TrustError> {
        check_assertion(subject, signature, self.secret.as_ref())
    }
}
