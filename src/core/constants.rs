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

//! lightrpc Constants - Single source of truth for all default values.
//!
//! Envelope defaults, header values, configuration keys and timeouts live
//! here so the request builder, the client and the config loader agree.

/// JSON-RPC 2.0 envelope defaults and keys
pub mod jsonrpc {
    /// Protocol version written to the `jsonrpc` key
    pub const VERSION: &str = "2.0";
    /// Method used when none is set on a request
    pub const DEFAULT_METHOD: &str = "call";
    /// Request ID used when none is set
    pub const DEFAULT_ID: i64 = 0;

    pub const KEY_ID: &str = "id";
    pub const KEY_METHOD: &str = "method";
    pub const KEY_VERSION: &str = "jsonrpc";
    pub const KEY_PARAMS: &str = "params";
    pub const KEY_RESULT: &str = "result";
    pub const KEY_ERROR: &str = "error";

    /// Parse error (standard JSON-RPC)
    pub const ERROR_PARSE: i64 = -32700;
    /// Invalid request (standard JSON-RPC)
    pub const ERROR_INVALID_REQUEST: i64 = -32600;
    /// Method not found (standard JSON-RPC)
    pub const ERROR_METHOD_NOT_FOUND: i64 = -32601;
    /// Invalid params (standard JSON-RPC)
    pub const ERROR_INVALID_PARAMS: i64 = -32602;
    /// Internal error (standard JSON-RPC)
    pub const ERROR_INTERNAL: i64 = -32603;
}

/// HTTP defaults
pub mod http {
    /// Media type for both `Accept` and `Content-Type`
    pub const JSON_MEDIA_TYPE: &str = "application/json";
    /// Substring the response content type must contain for the body to be decoded
    pub const JSON_MARKER: &str = "json";
    /// Separator used when a header carries several values
    pub const HEADER_VALUE_SEPARATOR: &str = ",";
    /// Inclusive range of HTTP statuses that are not network errors
    pub const SUCCESS_MIN: u16 = 200;
    pub const SUCCESS_MAX: u16 = 299;
}

/// Transport timeouts
pub mod timeouts {
    /// Whole-request timeout in seconds
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Connection establishment timeout in seconds
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
    /// How long idle pooled connections are kept
    pub const POOL_IDLE_TIMEOUT_SECS: u64 = 90;
}

/// Configuration Environment Variables
pub mod config {
    pub const ENV_ENDPOINT: &str = "LIGHTRPC_ENDPOINT";
    pub const ENV_TIMEOUT_SECS: &str = "LIGHTRPC_TIMEOUT_SECS";
    pub const ENV_CONNECT_TIMEOUT_SECS: &str = "LIGHTRPC_CONNECT_TIMEOUT_SECS";
    pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
    pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

    pub const DEFAULT_LOG_LEVEL: &str = "info";
    pub const DEFAULT_LOG_FORMAT: &str = "text";
    pub const LOG_FORMATS: &[&str] = &["text", "json"];
}
