//! Extracts the subject asserted by the gateway on `/me` requests.
use std::future::{ready, Ready};

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use msg_common::{
    trust::{SUBJECT_SIGNATURE_HEADER, USER_ID_HEADER},
    SubjectId,
    TrustConfig,
};

use crate::errors::ServerError;

#[derive(Debug, Clone)]
pub struct AssertedSubject(pub SubjectId);

impl FromRequest for AssertedSubject {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let header = |name: &str| req.headers().get(name).and_then(|v| v.to_str().ok());
        let result = match req.app_data::<web::Data<TrustConfig>>() {
            Some(trust) => trust.check(header(USER_ID_HEADER), header(SUBJECT_SIGNATURE_HEADER)),
            None => TrustConfig::default().check(header(USER_ID_HEADER), None),
        };
        ready(result.map(AssertedSubject).map_err(ServerError::from))
    }
}
