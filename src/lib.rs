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

//! lightrpc: a minimal JSON-RPC 2.0 client.
//!
//! Builds request envelopes, POSTs them over HTTP through a pluggable
//! transport and parses the replies into result/error responses.

pub mod config;
pub mod core;
pub mod rpc;
pub mod transport;
pub mod utils;

pub use crate::core::errors::{DecodeError, JsonRpcErrorObject, RpcError, TransportError};
pub use crate::rpc::{Client, ClientBuilder, Request, Response};
pub use crate::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
