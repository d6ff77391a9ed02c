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

//! Default transport backed by a pooled `reqwest` client.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

use super::{HttpRequest, HttpResponse, HttpTransport};
use crate::core::constants::timeouts;
use crate::core::errors::{RpcError, TransportError};

/// HTTP transport using `reqwest` with connection pooling.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: Client,
    // None when wrapping a client whose timeout is not known here
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    /// Create a transport with the given request and connect timeouts
    ///
    /// # Returns
    /// * `Result<Self, RpcError>` - transport or `Configuration` error if the
    ///   underlying client cannot be built
    pub fn new(timeout: Duration, connect_timeout: Duration) -> Result<Self, RpcError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .tcp_nodelay(true)
            .pool_idle_timeout(Duration::from_secs(timeouts::POOL_IDLE_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                RpcError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            timeout: Some(timeout),
        })
    }

    /// Wrap an already configured `reqwest::Client`.
    /// Its timeout is not inspected, so [`timeout`](Self::timeout) is `None`.
    pub fn with_client(http_client: Client) -> Self {
        Self {
            http_client,
            timeout: None,
        }
    }

    /// Request timeout applied by this transport, if it set one
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn classify(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            match self.timeout {
                Some(limit) => {
                    TransportError::Timeout(format!("no response after {}s", limit.as_secs()))
                }
                None => TransportError::Timeout(e.to_string()),
            }
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!(
            method = %request.method,
            url = %request.url,
            bytes = request.body.len(),
            "Sending HTTP request"
        );

        let response = self
            .http_client
            .request(request.method, &request.url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await
            .map_err(|e| {
                error!(url = %request.url, error = %e, "HTTP request failed");
                self.classify(e)
            })?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::with_client(Client::new())
    }
}
