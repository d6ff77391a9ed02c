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

//! Client configuration loaded from environment variables.

use serde::{Deserialize, Serialize};
use std::env;

use crate::core::constants::{config as keys, timeouts};
use crate::core::errors::RpcError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub log_level: String,
    pub log_format: String, // "json" or "text"
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults. The result is validated before
    /// it is returned.
    ///
    /// # Returns
    /// * `Result<Self, RpcError>` - Config instance or `Configuration` error
    pub fn from_env() -> Result<Self, RpcError> {
        let config = Self {
            endpoint: Self::get_optional_env(keys::ENV_ENDPOINT),
            timeout_secs: Self::parse_u64_or_default(
                keys::ENV_TIMEOUT_SECS,
                timeouts::DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            connect_timeout_secs: Self::parse_u64_or_default(
                keys::ENV_CONNECT_TIMEOUT_SECS,
                timeouts::DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
            log_level: Self::get_env_or_default(keys::ENV_LOG_LEVEL, keys::DEFAULT_LOG_LEVEL),
            log_format: Self::get_env_or_default(keys::ENV_LOG_FORMAT, keys::DEFAULT_LOG_FORMAT)
                .to_lowercase(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RpcError> {
        if let Some(endpoint) = &self.endpoint {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(RpcError::Configuration(format!(
                    "{} must be an http(s) URL, got '{}'",
                    keys::ENV_ENDPOINT,
                    endpoint
                )));
            }
        }

        if self.timeout_secs == 0 {
            return Err(RpcError::Configuration(format!(
                "{} must be greater than 0",
                keys::ENV_TIMEOUT_SECS
            )));
        }

        if self.connect_timeout_secs == 0 {
            return Err(RpcError::Configuration(format!(
                "{} must be greater than 0",
                keys::ENV_CONNECT_TIMEOUT_SECS
            )));
        }

        if !keys::LOG_FORMATS.contains(&self.log_format.as_str()) {
            return Err(RpcError::Configuration(format!(
                "{} must be one of {:?}, got '{}'",
                keys::ENV_LOG_FORMAT,
                keys::LOG_FORMATS,
                self.log_format
            )));
        }

        Ok(())
    }

    fn get_env_or_default(key: &str, default: &str) -> String {
        env::var(key).unwrap_or_else(|_| default.to_string())
    }

    fn get_optional_env(key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
            _ => None,
        }
    }

    fn parse_u64_or_default(key: &str, default: u64) -> Result<u64, RpcError> {
        match env::var(key) {
            Ok(value) if !value.trim().is_empty() => value.trim().parse::<u64>().map_err(|e| {
                RpcError::Configuration(format!("{} is not a valid number: {}", key, e))
            }),
            _ => Ok(default),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: timeouts::DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: timeouts::DEFAULT_CONNECT_TIMEOUT_SECS,
            log_level: keys::DEFAULT_LOG_LEVEL.to_string(),
            log_format: keys::DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}
