//! Authentication middleware for the gateway.
//! This middleware can be placed on any route or scope.
//!
//! It reads the credential from the `Authorization` header, asks the identity verifier who it belongs to, and stores
//! the resulting [`SubjectId`] in the request extensions. The `Authorization` header is removed before the inner
//! service runs, so nothing behind this middleware can forward the credential. Any failure ends the request with a
//! 401 and the inner service is never called.

use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error,
    FromRequest,
    HttpMessage,
    HttpRequest,
};
use futures::future::LocalBoxFuture;
use log::*;
use msg_common::SubjectId;

use crate::{errors::GatewayError, identity::IdentityVerifier};

/// Extracts the credential from an `Authorization` header value. A leading `Bearer ` is optional and matched
/// case-insensitively. Returns `None` if nothing is left.
pub fn credential_from_header(value: &str) -> Option<&str> {
    let value = value.trim_start();
    let credential = match value.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("bearer ") => value[7..].trim(),
        _ => value.trim(),
    };
    if credential.is_empty() {
        None
    } else {
        Some(credential)
    }
}

pub struct AuthenticationFactory<V> {
    verifier: Rc<V>,
}

impl<V> AuthenticationFactory<V> {
    pub fn new(verifier: Rc<V>) -> Self {
        Self { verifier }
    }
}

impl<S, B, V> Transform<S, ServiceRequest> for AuthenticationFactory<V>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    V: IdentityVerifier + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthenticationService<S, V>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthenticationService { verifier: Rc::clone(&self.verifier), service: Rc::new(service) }))
    }
}

pub struct AuthenticationService<S, V> {
    verifier: Rc<V>,
    service: Rc<S>,
}

impl<S, B, V> Service<ServiceRequest> for AuthenticationService<S, V>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    V: IdentityVerifier + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = Rc::clone(&self.verifier);
        Box::pin(async move {
            let credential = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(credential_from_header)
                .map(String::from);
            let Some(credential) = credential else {
                debug!("🔐️ No credential on {} {}", req.method(), req.path());
                return Err(GatewayError::Unauthenticated.into());
            };
            let subject = verifier.verify(&credential).await.map_err(|e| {
                info!("🔐️ Credential for {} {} was not accepted. {e}", req.method(), req.path());
                GatewayError::Unauthenticated
            })?;
            trace!("🔐️ {} {} authenticated as {subject}", req.method(), req.path());
            req.headers_mut().remove(AUTHORIZATION);
            req.extensions_mut().insert(subject);
            service.call(req).await
        })
    }
}

/// The subject established by [`AuthenticationFactory`] for this request.
#[derive(Debug, Clone)]
pub struct AuthenticatedSubject(pub SubjectId);

impl FromRequest for AuthenticatedSubject {
    type Error = GatewayError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let subject = req.extensions().get::<SubjectId>().cloned();
        ready(subject.map(AuthenticatedSubject).ok_or(GatewayError::Unauthenticated))
    }
}
