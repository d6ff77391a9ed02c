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

//! JSON-RPC request envelope.
//!
//! A [`Request`] is a pure data builder: positional parameters plus the
//! `id`/`method`/`jsonrpc` header fields. Its serialized form always carries
//! exactly the keys `id`, `method`, `jsonrpc`, `params`, in that order.

use serde::ser::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

use crate::core::constants::jsonrpc;
use crate::core::errors::RpcError;

/// Wire shape of a request. Field order is the key order on the wire.
#[derive(serde::Serialize)]
struct Envelope<'a> {
    id: i64,
    method: &'a str,
    jsonrpc: &'a str,
    params: &'a [Value],
}

/// A single JSON-RPC 2.0 call
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    id: i64,
    method: String,
    version: String,
    params: Vec<Value>,
}

impl Request {
    /// Create a request with default id, method and version.
    /// `params` keep their order.
    pub fn new(params: impl IntoIterator<Item = Value>) -> Self {
        Self {
            id: jsonrpc::DEFAULT_ID,
            method: jsonrpc::DEFAULT_METHOD.to_string(),
            version: jsonrpc::VERSION.to_string(),
            params: params.into_iter().collect(),
        }
    }

    /// Create a request from typed values.
    ///
    /// Fails with [`RpcError::Serialization`] on the first value that has no
    /// JSON representation (e.g. a map with non-string keys).
    pub fn try_from_params<I, T>(params: I) -> Result<Self, RpcError>
    where
        I: IntoIterator<Item = T>,
        T: serde::Serialize,
    {
        let params = params
            .into_iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(params))
    }

    pub fn set_id(&mut self, id: i64) -> &mut Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn set_method(&mut self, method: impl Into<String>) -> &mut Self {
        self.method = method.into();
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Set the `jsonrpc` version string. Not validated.
    pub fn set_version(&mut self, version: impl Into<String>) -> &mut Self {
        self.version = version.into();
        self
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    fn envelope(&self) -> Envelope<'_> {
        Envelope {
            id: self.id,
            method: &self.method,
            jsonrpc: &self.version,
            params: &self.params,
        }
    }

    /// The four-key envelope as a JSON object.
    pub fn to_envelope(&self) -> Value {
        let mut map = serde_json::Map::with_capacity(4);
        map.insert(jsonrpc::KEY_ID.to_string(), Value::from(self.id));
        map.insert(jsonrpc::KEY_METHOD.to_string(), Value::from(self.method.as_str()));
        map.insert(jsonrpc::KEY_VERSION.to_string(), Value::from(self.version.as_str()));
        map.insert(jsonrpc::KEY_PARAMS.to_string(), Value::Array(self.params.clone()));
        Value::Object(map)
    }

    /// Compact JSON encoding of the envelope.
    pub fn to_json(&self) -> Result<String, RpcError> {
        Ok(serde_json::to_string(&self.envelope())?)
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Serialize for Request {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.envelope().serialize(serializer)
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let request = Request::default();
        assert_eq!(request.id(), 0);
        assert_eq!(request.method(), "call");
        assert_eq!(request.version(), "2.0");
        assert!(request.params().is_empty());
    }

    #[test]
    fn test_id_setter_is_fluent() {
        let mut request = Request::default();
        let returned: *const Request = request.set_id(9);

        assert!(std::ptr::eq(returned, &request));
        assert_eq!(request.id(), 9);

        request.set_id(-3);
        assert_eq!(request.id(), -3);
    }

    #[test]
    fn test_method_setter_is_fluent() {
        let mut request = Request::default();
        let returned: *const Request = request.set_method("ring-ha-ha-ha");

        assert!(std::ptr::eq(returned, &request));
        assert_eq!(request.method(), "ring-ha-ha-ha");

        request.set_method("");
        assert_eq!(request.method(), "");
    }

    #[test]
    fn test_version_setter_is_not_validated() {
        let mut request = Request::default();
        let returned: *const Request = request.set_version("9.0");

        assert!(std::ptr::eq(returned, &request));
        assert_eq!(request.version(), "9.0");
    }

    #[test]
    fn test_setters_chain() {
        let mut request = Request::new(vec![json!(1)]);
        request.set_id(7).set_method("sum").set_version("2.0");

        assert_eq!(
            request.to_envelope(),
            json!({"id": 7, "method": "sum", "jsonrpc": "2.0", "params": [1]})
        );
    }

    #[test]
    fn test_params_keep_order() {
        let request = Request::new(vec![json!("foo"), json!("bar"), json!(["baz"])]);
        assert_eq!(
            request.to_envelope()["params"],
            json!(["foo", "bar", ["baz"]])
        );
    }

    #[test]
    fn test_json_string_serialization() {
        let request = Request::new(vec![json!("foo"), json!("bar"), json!(["baz"])]);
        let expected = r#"{"id":0,"method":"call","jsonrpc":"2.0","params":["foo","bar",["baz"]]}"#;

        assert_eq!(request.to_json().unwrap(), expected);
        assert_eq!(request.to_string(), expected);
        assert_eq!(serde_json::to_string(&request).unwrap(), expected);
    }

    #[test]
    fn test_envelope_key_order() {
        let request = Request::new(vec![json!({"z": 1, "a": 2})]);
        let envelope = request.to_envelope();
        let keys: Vec<&str> = envelope
            .as_object()
            .expect("envelope must be an object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["id", "method", "jsonrpc", "params"]);

        // nested object keys are left as given
        assert_eq!(
            serde_json::to_string(&envelope["params"][0]).unwrap(),
            r#"{"z":1,"a":2}"#
        );
    }

    #[test]
    fn test_try_from_params_typed_values() {
        let request = Request::try_from_params([1u32, 2, 3]).unwrap();
        assert_eq!(request.params(), &[json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn test_try_from_params_rejects_non_string_keys() {
        use std::collections::BTreeMap;

        let mut bad = BTreeMap::new();
        bad.insert(vec![1u8], "value");

        let result = Request::try_from_params([bad]);
        assert!(matches!(result, Err(RpcError::Serialization(_))));
    }
}
