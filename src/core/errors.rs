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

//! Error types for the JSON-RPC client.
//!
//! Protocol-level conditions (non-2xx status, RPC `error` objects, undecodable
//! bodies) are recorded on [`Response`](crate::rpc::Response) and only become
//! an [`RpcError`] when the caller asks for one via `into_result()`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::core::constants::jsonrpc;

/// Main error type for the client
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RpcError {
    /// The transport could not complete the HTTP exchange
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// A value could not be represented as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A default header name or value was rejected
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Client configuration was missing or invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The server answered with a status outside 200..=299
    #[error("HTTP error: status {status}")]
    Http { status: u16 },

    /// The server answered with a JSON-RPC error object
    #[error("JSON-RPC error {} ({}): {}", .0.code, .0.label(), .0.message)]
    Rpc(JsonRpcErrorObject),

    /// The body was labelled JSON but could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// Failures raised by an [`HttpTransport`](crate::transport::HttpTransport)
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TransportError {
    /// The request did not complete in time
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// No connection could be established
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Any other failure while building or sending the request
    #[error("Request failed: {0}")]
    Request(String),
}

/// Why a JSON-labelled response body could not be decoded into an envelope
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("malformed JSON body: {0}")]
    Malformed(String),

    #[error("expected a JSON object body, found {0}")]
    NotAnObject(&'static str),
}

/// JSON-RPC error object as extracted from a response
///
/// Servers are not always strict about the shape, so extraction is lenient:
/// a missing or non-numeric `code` becomes [`jsonrpc::ERROR_INTERNAL`] and a
/// missing `message` becomes empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcErrorObject {
    /// Build from the raw `error` value of a response
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self {
                code: map
                    .get("code")
                    .and_then(Value::as_i64)
                    .unwrap_or(jsonrpc::ERROR_INTERNAL),
                message: map
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                data: map.get("data").cloned(),
            },
            Value::String(s) => Self {
                code: jsonrpc::ERROR_INTERNAL,
                message: s.clone(),
                data: None,
            },
            other => Self {
                code: jsonrpc::ERROR_INTERNAL,
                message: String::new(),
                data: Some(other.clone()),
            },
        }
    }

    /// Standard label for the error code
    pub fn label(&self) -> &'static str {
        match self.code {
            jsonrpc::ERROR_PARSE => "Parse error",
            jsonrpc::ERROR_INVALID_REQUEST => "Invalid request",
            jsonrpc::ERROR_METHOD_NOT_FOUND => "Method not found",
            jsonrpc::ERROR_INVALID_PARAMS => "Invalid params",
            jsonrpc::ERROR_INTERNAL => "Internal error",
            -32099..=-32000 => "Server error",
            _ => "Application error",
        }
    }
}
