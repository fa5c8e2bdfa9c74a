//! JSON-over-HTTP transport for the practice API.
//!
//! Browser build (`csr`): real requests via `gloo-net`, cookies omitted,
//! bearer auth when a token is supplied.
//! Other builds: every request fails with `ApiError::Network` so native tests
//! and tooling never touch the network.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become `ApiError::Rejected` carrying the server's
//! `{"error": ...}` text; 2xx bodies that do not decode become
//! `ApiError::Malformed`. Nothing is retried.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::gateway::{AuthGateway, LOGIN_PATH, VERIFY_PATH};
use super::types::{Credentials, LoginResponse, VerifyResponse};
use crate::config::ClientConfig;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        })
    }
}

/// A request description, independent of the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<serde_json::Value>,
    pub bearer: Option<String>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: None, bearer: None }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Malformed` if `body` cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Malformed(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    #[must_use]
    pub fn query(mut self, pairs: Vec<(&'static str, String)>) -> Self {
        self.query = pairs;
        self
    }

    #[must_use]
    pub fn bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_owned());
        self
    }
}

/// `Authorization` header value for a bearer token.
pub fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

/// Turn a status code and raw body into a typed result.
///
/// # Errors
///
/// `Rejected` for non-2xx statuses, `Malformed` for undecodable 2xx bodies.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        log::error!("response error: status {status}");
        return Err(ApiError::rejected(status, body));
    }
    serde_json::from_str(body).map_err(|e| {
        log::error!("response decode failed: {e}");
        ApiError::Malformed(e.to_string())
    })
}

/// HTTP client bound to one API base URL.
#[derive(Debug, Clone, Default)]
pub struct HttpClient {
    config: ClientConfig,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send `request` and decode a JSON response.
    ///
    /// # Errors
    ///
    /// See the module docs for the error mapping.
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let url = self.config.url(&request.path);
        log::debug!("sending request: {} {url}", request.method);

        #[cfg(feature = "csr")]
        {
            use gloo_net::http::Request;
            use web_sys::RequestCredentials;

            let mut builder = match request.method {
                Method::Get => Request::get(&url),
                Method::Post => Request::post(&url),
                Method::Put => Request::put(&url),
                Method::Delete => Request::delete(&url),
            };
            builder = builder
                .header("Content-Type", crate::config::CONTENT_TYPE_JSON)
                .credentials(if self.config.with_credentials {
                    RequestCredentials::Include
                } else {
                    RequestCredentials::Omit
                })
                .query(request.query.iter().map(|(k, v)| (*k, v.as_str())));
            if let Some(token) = request.bearer.as_deref() {
                builder = builder.header("Authorization", &bearer_header(token));
            }

            let sent = match request.body.as_ref() {
                Some(body) => builder.json(body).map_err(network_error)?.send().await,
                None => builder.send().await,
            };
            let resp = sent.map_err(network_error)?;
            let status = resp.status();
            log::debug!("received response: {status} {url}");
            let text = resp.text().await.map_err(network_error)?;
            decode_response(status, &text)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            log::error!("request error: no transport outside the browser for {url}");
            Err(ApiError::Network("not available outside the browser".to_owned()))
        }
    }
}

#[cfg(feature = "csr")]
fn network_error(e: gloo_net::Error) -> ApiError {
    log::error!("request error: {e}");
    ApiError::Network(e.to_string())
}

impl AuthGateway for HttpClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        self.execute(ApiRequest::post(LOGIN_PATH).json(credentials)?).await
    }

    async fn verify(&self, token: &str) -> Result<VerifyResponse, ApiError> {
        self.execute(ApiRequest::post(VERIFY_PATH).bearer(token)).await
    }
}
