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

//! HTTP transport seam.
//!
//! The client never talks to an HTTP library directly. It hands a plain
//! [`HttpRequest`] to an [`HttpTransport`] and gets a plain [`HttpResponse`]
//! back, so pooling, TLS and timeouts stay the transport's business and tests
//! can substitute an in-memory double.

pub mod http;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::Method;

use crate::core::constants;
use crate::core::errors::TransportError;

pub use self::http::ReqwestTransport;

/// Outgoing HTTP request as produced by the client
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: String,
}

/// Completed HTTP exchange as returned by a transport
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// All `Content-Type` values joined with a comma.
    /// Values that are not visible ASCII are skipped.
    pub fn content_type(&self) -> String {
        self.headers
            .get_all(CONTENT_TYPE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect::<Vec<_>>()
            .join(constants::http::HEADER_VALUE_SEPARATOR)
    }

    pub fn is_success(&self) -> bool {
        (constants::http::SUCCESS_MIN..=constants::http::SUCCESS_MAX).contains(&self.status)
    }
}

/// Capability that performs one HTTP exchange.
///
/// Implementations own retries, timeouts and connection reuse. Failures to
/// complete the exchange are reported as [`TransportError`]; a completed
/// exchange with any status code is a successful `send`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
