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

//! Tracing subscriber setup.
//!
//! Logs go to stderr so that stdout stays free for command output.
//! `RUST_LOG`, when set, takes precedence over the configured level.

use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

use crate::config::ClientConfig;
use crate::core::errors::RpcError;

/// Install the global subscriber described by `config`.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &ClientConfig) -> Result<(), RpcError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    let installed = if config.log_format == "json" {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };

    installed.map_err(|e| {
        RpcError::Configuration(format!("Failed to install tracing subscriber: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails_cleanly() {
        let config = ClientConfig {
            log_format: "json".to_string(),
            ..ClientConfig::default()
        };

        // Another test may already have installed a subscriber; either way
        // the second call must report an error instead of panicking.
        let _ = init_tracing(&config);
        assert!(matches!(
            init_tracing(&config),
            Err(RpcError::Configuration(_))
        ));
    }
}
