//! HTTP proxy to the passport service.
//!
//! Requests are forwarded with their method, body and end-to-end headers. On protected calls the gateway removes
//! every header a client could use to claim an identity and adds its own assertion.
use std::time::Duration;

use actix_web::{
    http::{header::HeaderMap as InboundHeaders, StatusCode},
    web,
    HttpRequest,
    HttpResponse,
};
use log::*;
use msg_common::{
    trust::{SUBJECT_SIGNATURE_HEADER, USER_ID_HEADER},
    SubjectId,
    TrustConfig,
};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};

use crate::errors::GatewayError;

const HOP_BY_HOP: [&str; 8] =
    ["host", "connection", "content-length", "transfer-encoding", "keep-alive", "upgrade", "te", "trailer"];

fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP.contains(&name) || name.starts_with("proxy-")
}

fn is_identity_header(name: &str) -> bool {
    name == "authorization"
        || name.eq_ignore_ascii_case(USER_ID_HEADER)
        || name.eq_ignore_ascii_case(SUBJECT_SIGNATURE_HEADER)
}

/// The headers to send upstream for an inbound request. Header names arrive lower-cased.
pub fn outbound_headers(inbound: &InboundHeaders, protected: bool) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in inbound {
        let name = name.as_str();
        if is_hop_by_hop(name) || (protected && is_identity_header(name)) {
            continue;
        }
        match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_bytes(value.as_bytes())) {
            (Ok(name), Ok(value)) => {
                headers.append(name, value);
            },
            _ => warn!("🚪️ Dropping header {name}, it cannot be forwarded"),
        }
    }
    headers
}

#[derive(Debug, Clone)]
pub struct PassportProxy {
    client: reqwest::Client,
    base_url: String,
    trust: TrustConfig,
}

impl PassportProxy {
    pub fn new(base_url: &str, timeout: Duration, trust: TrustConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url: base_url.to_string(), trust })
    }

    /// Forwards the request to `path` on the passport service and relays the answer. When `subject` is given, the
    /// call is made on its behalf.
    pub async fn forward(
        &self,
        req: &HttpRequest,
        body: web::Bytes,
        path: &str,
        subject: Option<&SubjectId>,
    ) -> Result<HttpResponse, GatewayError> {
        let url = format!("{}{path}", self.base_url);
        let method = reqwest::Method::from_bytes(req.method().as_str().as_bytes())
            .map_err(|e| GatewayError::ProxyError(e.to_string()))?;
        let mut headers = outbound_headers(req.headers(), subject.is_some());
        if let Some(subject) = subject {
            self.assert_subject(&mut headers, subject)?;
        }
        trace!("🚪️ Proxying {method} {} to {url}", req.path());
        let response = self
            .client
            .request(method, &url)
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(|e| GatewayError::ProxyError(e.to_string()))?;
        let status = StatusCode::from_u16(response.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
        let content_type = response.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()).map(String::from);
        let bytes = response.bytes().await.map_err(|e| GatewayError::ProxyError(e.to_string()))?;
        let mut relay = HttpResponse::build(status);
        if let Some(content_type) = content_type {
            relay.content_type(content_type);
        }
        Ok(relay.body(bytes))
    }

    fn assert_subject(&self, headers: &mut HeaderMap, subject: &SubjectId) -> Result<(), GatewayError> {
        set_header(headers, USER_ID_HEADER, subject.as_str())?;
        let signature = self.trust.sign(subject).map_err(|e| GatewayError::ProxyError(e.to_string()))?;
        if let Some(signature) = signature {
            set_header(headers, SUBJECT_SIGNATURE_HEADER, &signature)?;
        }
        Ok(())
    }
}

fn set_header(headers: &mut HeaderMap, name: &str, value: &str) -> Result<(), GatewayError> {
    let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| GatewayError::ProxyError(e.to_string()))?;
    let value = HeaderValue::from_str(value).map_err(|e| GatewayError::ProxyError(e.to_string()))?;
    headers.insert(name, value);
    Ok(())
}
