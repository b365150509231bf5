//! Extracts the subject a call is made on behalf of from the `actor_user_id` metadata.
use std::future::{ready, Ready};

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use log::*;
use msg_common::{
    trust::{ACTOR_METADATA_KEY, SUBJECT_SIGNATURE_HEADER},
    SubjectId,
    TrustConfig,
};

use crate::errors::ServerError;

#[derive(Debug, Clone)]
pub struct Actor(pub SubjectId);

impl FromRequest for Actor {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let header = |name: &str| req.headers().get(name).and_then(|v| v.to_str().ok());
        let result = match req.app_data::<web::Data<TrustConfig>>() {
            Some(trust) => trust.check(header(ACTOR_METADATA_KEY), header(SUBJECT_SIGNATURE_HEADER)),
            None => TrustConfig::default().check(header(ACTOR_METADATA_KEY), None),
        };
        if let Err(e) = &result {
            debug!("💻️ Call to {} rejected. {e}", req.path());
        }
        ready(result.map(Actor).map_err(ServerError::from))
    }
}
