// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! JSON-RPC client.
//!
//! Turns call arguments into a [`Request`], POSTs it to the server endpoint
//! through the injected [`HttpTransport`] and wraps the reply into a
//! [`Response`]. The client adds no retry, timeout or backoff of its own.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::{Request, Response};
use crate::config::ClientConfig;
use crate::core::constants::{http, timeouts};
use crate::core::errors::RpcError;
use crate::transport::{HttpRequest, HttpTransport, ReqwestTransport};

/// JSON-RPC 2.0 client over HTTP
#[derive(Clone)]
pub struct Client {
    endpoint: String,
    headers: HeaderMap,
    transport: Arc<dyn HttpTransport>,
}

impl Client {
    /// Client with default headers and the default `reqwest` transport
    pub fn new(endpoint: impl Into<String>) -> Result<Self, RpcError> {
        Self::builder(endpoint).build()
    }

    pub fn builder(endpoint: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(endpoint)
    }

    /// Client configured from a loaded [`ClientConfig`]
    pub fn from_config(config: &ClientConfig) -> Result<Self, RpcError> {
        let endpoint = config.endpoint.clone().ok_or_else(|| {
            RpcError::Configuration("no server endpoint configured".to_string())
        })?;

        Self::builder(endpoint)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Headers sent with every request
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn transport(&self) -> Arc<dyn HttpTransport> {
        Arc::clone(&self.transport)
    }

    /// Replace the transport. Affects subsequent calls only.
    pub fn set_transport(&mut self, transport: Arc<dyn HttpTransport>) -> &mut Self {
        self.transport = transport;
        self
    }

    /// Send a call with default id, method and version
    pub async fn call(
        &self,
        params: impl IntoIterator<Item = Value>,
    ) -> Result<Response, RpcError> {
        let request = Request::new(params);
        self.send(&request).await
    }

    /// Send a prepared request.
    ///
    /// Transport failures are returned as [`RpcError::Transport`]. Any
    /// completed HTTP exchange, whatever its status, yields a [`Response`].
    pub async fn send(&self, request: &Request) -> Result<Response, RpcError> {
        let body = request.to_json()?;

        debug!(
            endpoint = %self.endpoint,
            method = %request.method(),
            id = request.id(),
            "Sending JSON-RPC request"
        );

        let http_response = self
            .transport
            .send(HttpRequest {
                method: Method::POST,
                url: self.endpoint.clone(),
                headers: self.headers.clone(),
                body,
            })
            .await?;

        let response = Response::from_http(http_response);
        debug!(
            status = response.status_code(),
            id = ?response.id(),
            "Received JSON-RPC response"
        );

        if response.is_error() {
            warn!(
                endpoint = %self.endpoint,
                method = %request.method(),
                status = response.status_code(),
                rpc_error = response.is_rpc_error(),
                decode_error = response.decode_error().is_some(),
                "JSON-RPC call returned an error"
            );
        }

        Ok(response)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Client`].
///
/// Headers given here are merged over the defaults
/// (`Accept` and `Content-Type` set to `application/json`) in call order, so
/// the last write to a name wins. Names compare case-insensitively, so
/// `content-type` replaces the default.
pub struct ClientBuilder {
    endpoint: String,
    headers: Vec<PendingHeaders>,
    timeout: Duration,
    connect_timeout: Duration,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl ClientBuilder {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            headers: Vec::new(),
            timeout: Duration::from_secs(timeouts::DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(timeouts::DEFAULT_CONNECT_TIMEOUT_SECS),
            transport: None,
        }
    }

    /// Add or override a default header. Validated in [`build`](Self::build).
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(PendingHeaders::Raw(name.into(), value.into()));
        self
    }

    /// Merge an already typed header map. Every value of a multi-valued
    /// name is kept, replacing whatever was set for that name before.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.push(PendingHeaders::Typed(headers));
        self
    }

    /// Request timeout for the default transport
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Connect timeout for the default transport
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Use this transport instead of building a `reqwest` one.
    /// Timeouts set on the builder are then ignored.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<Client, RpcError> {
        if self.endpoint.trim().is_empty() {
            return Err(RpcError::Configuration(
                "server endpoint must not be empty".to_string(),
            ));
        }

        let mut headers = default_headers();
        for pending in self.headers {
            match pending {
                PendingHeaders::Raw(name, value) => {
                    let (name, value) = parse_header(&name, &value)?;
                    headers.insert(name, value);
                }
                PendingHeaders::Typed(map) => merge_headers(&mut headers, map),
            }
        }

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(self.timeout, self.connect_timeout)?),
        };

        Ok(Client {
            endpoint: self.endpoint,
            headers,
            transport,
        })
    }
}

/// Header writes recorded by the builder, applied in order by `build`
enum PendingHeaders {
    Raw(String, String),
    Typed(HeaderMap),
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), RpcError> {
    let invalid = |reason: String| RpcError::InvalidHeader {
        name: name.to_string(),
        reason,
    };
    let header_name =
        HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
    let header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
    Ok((header_name, header_value))
}

// Names present in `extra` replace their old values entirely; all values
// of a multi-valued name are carried over.
fn merge_headers(headers: &mut HeaderMap, extra: HeaderMap) {
    let mut current: Option<HeaderName> = None;
    for (name, value) in extra {
        // `into_iter` yields the name only for the first value of each entry
        if let Some(name) = name {
            headers.remove(&name);
            current = Some(name);
        }
        if let Some(name) = &current {
            headers.append(name.clone(), value);
        }
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(http::JSON_MEDIA_TYPE));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(http::JSON_MEDIA_TYPE));
    headers
}
