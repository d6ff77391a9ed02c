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

//! JSON-RPC response envelope.
//!
//! A [`Response`] is built from a completed HTTP exchange and parsed exactly
//! once, in the constructor:
//!
//! 1. A status outside `200..=299` marks a network error. Parsing continues.
//! 2. Unless the joined `Content-Type` contains `json` (case-insensitive) the
//!    body is treated as absent.
//! 3. The body is decoded as a JSON object. Empty bodies and `null` count as
//!    absent; anything else that is not an object is a [`DecodeError`].
//! 4. `id`, the error flag and the `result`/`error` payload are extracted.
//!
//! Protocol conditions never fail construction; they are reported through
//! [`Response::is_error`] and friends.

use reqwest::header::HeaderMap;
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

use crate::core::constants::{http, jsonrpc};
use crate::core::errors::{DecodeError, JsonRpcErrorObject, RpcError};
use crate::transport::HttpResponse;

#[derive(Debug, Clone)]
pub struct Response {
    status_code: u16,
    headers: HeaderMap,
    network_error: bool,
    rpc_error: bool,
    decode_error: Option<DecodeError>,
    id: Option<i64>,
    data: Value,
    raw_body: Map<String, Value>,
}

impl Response {
    /// Parse a raw HTTP response.
    pub fn from_http(http_response: HttpResponse) -> Self {
        let network_error = !http_response.is_success();
        let has_json_body = is_json(&http_response.content_type());
        let HttpResponse {
            status,
            headers,
            body,
        } = http_response;

        let mut response = Self {
            status_code: status,
            headers,
            network_error,
            rpc_error: false,
            decode_error: None,
            id: None,
            data: empty_object(),
            raw_body: Map::new(),
        };

        if has_json_body {
            match decode_body(&body) {
                Ok(Some(decoded)) => response.extract(decoded),
                Ok(None) => {}
                Err(e) => response.decode_error = Some(e),
            }
        }

        response
    }

    fn extract(&mut self, body: Map<String, Value>) {
        self.id = body.get(jsonrpc::KEY_ID).and_then(coerce_id);
        self.rpc_error = body
            .get(jsonrpc::KEY_ERROR)
            .is_some_and(|error| !error.is_null());

        let key = if self.rpc_error {
            jsonrpc::KEY_ERROR
        } else {
            jsonrpc::KEY_RESULT
        };
        self.data = match body.get(key) {
            None | Some(Value::Null) => empty_object(),
            Some(value) => value.clone(),
        };
        self.raw_body = body;
    }

    /// True on an RPC error, a non-2xx status or an undecodable JSON body.
    pub fn is_error(&self) -> bool {
        self.rpc_error || self.network_error || self.decode_error.is_some()
    }

    pub fn is_network_error(&self) -> bool {
        self.network_error
    }

    pub fn is_rpc_error(&self) -> bool {
        self.rpc_error
    }

    pub fn decode_error(&self) -> Option<&DecodeError> {
        self.decode_error.as_ref()
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// The `result` or `error` payload, whichever applies.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// The payload unless the server reported an RPC error.
    pub fn result(&self) -> Option<&Value> {
        (!self.rpc_error).then_some(&self.data)
    }

    /// The payload if the server reported an RPC error.
    pub fn error(&self) -> Option<&Value> {
        self.rpc_error.then_some(&self.data)
    }

    /// Field of the payload. `None` when absent or when the payload is not an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// The full decoded body, not just the payload.
    pub fn to_envelope(&self) -> &Map<String, Value> {
        &self.raw_body
    }

    pub fn to_json(&self) -> Result<String, RpcError> {
        Ok(serde_json::to_string(&self.raw_body)?)
    }

    /// Collapse into a `Result` for callers that only care about success.
    pub fn into_result(self) -> Result<Value, RpcError> {
        if let Some(e) = self.decode_error {
            return Err(RpcError::Decode(e));
        }
        if self.rpc_error {
            return Err(RpcError::Rpc(JsonRpcErrorObject::from_value(&self.data)));
        }
        if self.network_error {
            return Err(RpcError::Http {
                status: self.status_code,
            });
        }
        Ok(self.data)
    }
}

impl From<HttpResponse> for Response {
    fn from(http_response: HttpResponse) -> Self {
        Self::from_http(http_response)
    }
}

impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw_body.serialize(serializer)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

fn is_json(content_type: &str) -> bool {
    content_type.to_lowercase().contains(http::JSON_MARKER)
}

fn decode_body(body: &[u8]) -> Result<Option<Map<String, Value>>, DecodeError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(Some(map)),
        Ok(Value::Null) => Ok(None),
        Ok(other) => Err(DecodeError::NotAnObject(kind_of(&other))),
        Err(e) => Err(DecodeError::Malformed(e.to_string())),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// Integer coercion for the response id. Floats and fractional numeric
// strings truncate toward zero, anything else is treated as no id.
fn coerce_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f as i64)
            })
        }
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, CONTENT_TYPE};
    use serde_json::json;

    fn http_response(status: u16, content_type: &str, body: &str) -> HttpResponse {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        HttpResponse::new(status, headers, body.to_string())
    }

    fn json_response(body: Value) -> Response {
        Response::from_http(http_response(200, "application/json", &body.to_string()))
    }

    #[test]
    fn test_result_response_parsing() {
        let response = json_response(json!({"id": 1, "jsonrpc": "2.0", "result": {"foo": "bar"}}));

        assert!(!response.is_error());
        assert_eq!(response.get("foo"), Some(&json!("bar")));
        assert_eq!(response.data(), &json!({"foo": "bar"}));
        assert_eq!(response.result(), Some(&json!({"foo": "bar"})));
        assert_eq!(response.error(), None);
        assert_eq!(response.id(), Some(1));
        assert_eq!(response.status_code(), 200);
    }

    #[test]
    fn test_error_response_parsing() {
        let response = json_response(json!({"id": 1, "jsonrpc": "2.0", "error": {"code": "bar"}}));

        assert!(response.is_error());
        assert!(response.is_rpc_error());
        assert!(!response.is_network_error());
        assert_eq!(response.get("code"), Some(&json!("bar")));
        assert_eq!(response.data(), &json!({"code": "bar"}));
        assert_eq!(response.error(), Some(&json!({"code": "bar"})));
        assert_eq!(response.result(), None);
    }

    #[test]
    fn test_null_error_is_not_an_error() {
        let response = json_response(json!({"id": 2, "jsonrpc": "2.0", "result": 5, "error": null}));

        assert!(!response.is_error());
        assert_eq!(response.result(), Some(&json!(5)));
        // scalar payloads have no fields
        assert_eq!(response.get("anything"), None);
    }

    #[test]
    fn test_json_serialization_returns_raw_body() {
        let body = r#"{"id":1,"jsonrpc":"2.0","error":{"code":"bar"}}"#;
        let response = Response::from_http(http_response(200, "application/json", body));

        assert_eq!(response.to_json().unwrap(), body);
        assert_eq!(response.to_string(), body);
        assert_eq!(serde_json::to_string(&response).unwrap(), body);
        assert_eq!(
            Value::Object(response.to_envelope().clone()),
            json!({"id": 1, "jsonrpc": "2.0", "error": {"code": "bar"}})
        );
    }

    #[test]
    fn test_non_json_content_type_skips_parsing() {
        let body = r#"<?xml version="1.0" encoding="UTF-8"?><root><bar>foo</bar></root>"#;
        let response = Response::from_http(http_response(200, "application/xml", body));

        assert!(response.to_envelope().is_empty());
        assert!(!response.is_error());
        assert_eq!(response.id(), None);
        assert_eq!(response.data(), &json!({}));
        assert_eq!(response.to_string(), "{}");
    }

    #[test]
    fn test_non_json_content_type_ignores_json_looking_body() {
        let response = Response::from_http(http_response(
            200,
            "text/plain",
            r#"{"id":1,"error":{"code":1}}"#,
        ));

        assert!(!response.is_rpc_error());
        assert!(response.to_envelope().is_empty());
    }

    #[test]
    fn test_content_type_match_is_case_insensitive() {
        let response = Response::from_http(http_response(
            200,
            "Application/JSON; charset=utf-8",
            r#"{"id":1,"result":{"ok":true}}"#,
        ));
        assert_eq!(response.get("ok"), Some(&json!(true)));

        let response = Response::from_http(http_response(
            200,
            "application/vnd.api+json",
            r#"{"id":1,"result":[]}"#,
        ));
        assert_eq!(response.result(), Some(&json!([])));
    }

    #[test]
    fn test_multi_valued_content_type_is_joined_before_matching() {
        let mut headers = HeaderMap::new();
        headers.append(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        headers.append(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = Response::from_http(HttpResponse::new(
            200,
            headers,
            r#"{"id":2,"result":{"ok":true}}"#,
        ));
        assert!(!response.is_error());
        assert_eq!(response.id(), Some(2));
        assert_eq!(response.get("ok"), Some(&json!(true)));
    }

    #[test]
    fn test_missing_content_type_skips_parsing() {
        let response = Response::from_http(HttpResponse::new(
            200,
            HeaderMap::new(),
            r#"{"id":1,"result":{}}"#,
        ));
        assert!(response.to_envelope().is_empty());
        assert_eq!(response.id(), None);
    }

    #[test]
    fn test_network_error_regardless_of_body() {
        let response = Response::from_http(http_response(500, "text/html", "<h1>oops</h1>"));
        assert!(response.is_error());
        assert!(response.is_network_error());

        // body still parsed alongside the network error
        let response = Response::from_http(http_response(
            503,
            "application/json",
            r#"{"id":4,"result":{"foo":"bar"}}"#,
        ));
        assert!(response.is_error());
        assert!(!response.is_rpc_error());
        assert_eq!(response.id(), Some(4));
        assert_eq!(response.result(), Some(&json!({"foo": "bar"})));
    }

    #[test]
    fn test_missing_payload_defaults_to_empty_object() {
        let response = json_response(json!({"id": 1, "jsonrpc": "2.0"}));

        assert!(!response.is_error());
        assert_eq!(response.data(), &json!({}));
        assert_eq!(response.to_envelope().len(), 2);
    }

    #[test]
    fn test_malformed_json_records_decode_error() {
        let response = Response::from_http(http_response(200, "application/json", "{\"id\": 1,"));

        assert!(response.is_error());
        assert!(!response.is_rpc_error());
        assert!(matches!(response.decode_error(), Some(DecodeError::Malformed(_))));
        assert!(response.to_envelope().is_empty());
        assert_eq!(response.data(), &json!({}));
    }

    #[test]
    fn test_non_object_json_records_decode_error() {
        let response = Response::from_http(http_response(200, "application/json", "[1,2]"));
        assert_eq!(
            response.decode_error(),
            Some(&DecodeError::NotAnObject("an array"))
        );
    }

    #[test]
    fn test_empty_and_null_bodies_are_absent() {
        for body in ["", "  \n", "null"] {
            let response = Response::from_http(http_response(200, "application/json", body));
            assert!(!response.is_error(), "body {:?}", body);
            assert!(response.to_envelope().is_empty());
        }
    }

    #[test]
    fn test_id_coercion() {
        let cases = [
            (json!(7), Some(7)),
            (json!(-2), Some(-2)),
            (json!(3.9), Some(3)),
            (json!("42"), Some(42)),
            (json!("3.5"), Some(3)),
            (json!(" -2.9 "), Some(-2)),
            (json!("NaN"), None),
            (json!("inf"), None),
            (json!("abc"), None),
            (json!(true), Some(1)),
            (json!(null), None),
            (json!([1]), None),
        ];
        for (id, expected) in cases {
            let response = json_response(json!({"id": id.clone(), "result": {}}));
            assert_eq!(response.id(), expected, "id {}", id);
        }
    }

    #[test]
    fn test_getters_are_idempotent() {
        let response = json_response(json!({"id": 1, "result": {"foo": "bar"}}));

        assert_eq!(response.result(), response.result());
        assert_eq!(response.get("foo"), response.get("foo"));
        assert_eq!(response.data(), response.data());
        assert_eq!(response.to_json().unwrap(), response.to_json().unwrap());
    }

    #[test]
    fn test_into_result() {
        let ok = json_response(json!({"id": 1, "result": {"foo": "bar"}}));
        assert_eq!(ok.into_result().unwrap(), json!({"foo": "bar"}));

        let rpc = json_response(json!({"id": 1, "error": {"code": -32601, "message": "Method not found"}}));
        match rpc.into_result() {
            Err(RpcError::Rpc(obj)) => {
                assert_eq!(obj.code, -32601);
                assert_eq!(obj.message, "Method not found");
            }
            other => panic!("Expected RpcError::Rpc, got {:?}", other),
        }

        let http = Response::from_http(http_response(502, "text/html", ""));
        assert!(matches!(http.into_result(), Err(RpcError::Http { status: 502 })));

        let bad = Response::from_http(http_response(200, "application/json", "nope"));
        assert!(matches!(bad.into_result(), Err(RpcError::Decode(_))));
    }
}
