// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JSON-over-HTTP transport to the backend services.
//!
//! Every call is `POST {base_url}/{Service}/{Method}` with the request message
//! as the JSON body. A 2xx reply carries the response message; any other reply
//! carries an [`RpcStatusBody`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use url::Url;

use super::error::{RpcCode, RpcError, RpcStatusBody};

/// Path probed by readiness checks.
const HEALTH_PATH: &str = "health";

/// A connection to one backend service.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Invoke `method` (e.g. `CommentService/Create`) with a JSON request message.
    async fn invoke(&self, method: &str, request: Value) -> Result<Value, RpcError>;

    /// Check that the backend answers at all.
    async fn ping(&self) -> Result<(), RpcError>;
}

/// Invoke `method` with typed request and response messages.
pub(crate) async fn call<Req, Resp>(
    transport: &dyn RpcTransport,
    method: &str,
    request: &Req,
) -> Result<Resp, RpcError>
where
    Req: Serialize + ?Sized,
    Resp: DeserializeOwned,
{
    let body = serde_json::to_value(request).map_err(|e| RpcError::Encode(e.to_string()))?;
    tracing::debug!(method, "Invoking backend RPC");
    let value = transport.invoke(method, body).await?;
    serde_json::from_value(value).map_err(|e| RpcError::Decode(format!("{method}: {e}")))
}

/// reqwest-backed [`RpcTransport`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: Url,
    http: Client,
}

impl HttpTransport {
    /// Create a transport for the service rooted at `base_url`.
    ///
    /// `timeout` bounds each call, connection setup included.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, RpcError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RpcError::Unavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: with_trailing_slash(base_url),
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, RpcError> {
        self.base_url
            .join(path)
            .map_err(|e| RpcError::Encode(format!("invalid method path {path}: {e}")))
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn invoke(&self, method: &str, request: Value) -> Result<Value, RpcError> {
        let url = self.endpoint(method)?;
        let response = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| RpcError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let bytes = response
                .bytes()
                .await
                .map_err(|e| RpcError::Unavailable(e.to_string()))?;
            // Empty replies stand for the empty message.
            if bytes.is_empty() {
                return Ok(Value::Object(Default::default()));
            }
            return serde_json::from_slice(&bytes)
                .map_err(|e| RpcError::Decode(format!("{method}: {e}")));
        }

        match response.json::<RpcStatusBody>().await {
            Ok(body) => Err(body.into()),
            Err(_) => Err(RpcError::status(
                code_for_http_status(status),
                format!("HTTP {status} from {method}"),
            )),
        }
    }

    async fn ping(&self) -> Result<(), RpcError> {
        let response = self
            .http
            .get(self.endpoint(HEALTH_PATH)?)
            .send()
            .await
            .map_err(|e| RpcError::Unavailable(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(RpcError::Unavailable(format!(
                "HTTP {} from health endpoint",
                response.status()
            )))
        }
    }
}

/// Base URLs are joined with relative method paths, so they must end in `/`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Fallback code when a backend replies with a non-2xx status and no status body.
fn code_for_http_status(status: StatusCode) -> RpcCode {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => RpcCode::InvalidArgument,
        StatusCode::NOT_FOUND => RpcCode::NotFound,
        StatusCode::CONFLICT => RpcCode::AlreadyExists,
        StatusCode::UNAUTHORIZED => RpcCode::Unauthenticated,
        StatusCode::FORBIDDEN => RpcCode::PermissionDenied,
        StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::BAD_GATEWAY
        | StatusCode::GATEWAY_TIMEOUT => RpcCode::Unavailable,
        _ => RpcCode::Internal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base: &str) -> HttpTransport {
        HttpTransport::new(Url::parse(base).unwrap(), Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let t = transport("http://post-service:9001/rpc");
        assert_eq!(t.base_url().as_str(), "http://post-service:9001/rpc/");
    }

    #[test]
    fn endpoint_appends_method_path() {
        let t = transport("http://post-service:9001/rpc");
        assert_eq!(
            t.endpoint("CommentService/Create").unwrap().as_str(),
            "http://post-service:9001/rpc/CommentService/Create"
        );

        let root = transport("http://auth-service:9000");
        assert_eq!(
            root.endpoint("AuthService/VerifyToken").unwrap().as_str(),
            "http://auth-service:9000/AuthService/VerifyToken"
        );
    }

    #[test]
    fn http_status_fallback_codes() {
        assert_eq!(code_for_http_status(StatusCode::NOT_FOUND), RpcCode::NotFound);
        assert_eq!(
            code_for_http_status(StatusCode::UNAUTHORIZED),
            RpcCode::Unauthenticated
        );
        assert_eq!(
            code_for_http_status(StatusCode::BAD_GATEWAY),
            RpcCode::Unavailable
        );
        assert_eq!(
            code_for_http_status(StatusCode::IM_A_TEAPOT),
            RpcCode::Internal
        );
    }

    #[tokio::test]
    async fn unreachable_backend_is_unavailable() {
        // Port 9 (discard) on localhost is not expected to accept connections.
        let t = transport("http://127.0.0.1:9");
        let err = t
            .invoke("AuthService/VerifyToken", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, RpcError::Unavailable(_)));
    }
}
