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

// Command line entry point: send one JSON-RPC call and print the response body

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde_json::Value;
use std::process::ExitCode;
use std::time::Duration;
use tracing::info;

use lightrpc::config::ClientConfig;
use lightrpc::core::constants::jsonrpc;
use lightrpc::utils::logging::init_tracing;
use lightrpc::{Client, Request};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON-RPC server URL (falls back to LIGHTRPC_ENDPOINT)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Method to call
    #[arg(short, long, default_value = jsonrpc::DEFAULT_METHOD)]
    method: String,

    /// Request id
    #[arg(long, default_value_t = jsonrpc::DEFAULT_ID, allow_negative_numbers = true)]
    id: i64,

    /// Extra header as "Name: value", may be repeated
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Positional parameters. Each is parsed as JSON, otherwise sent as a string.
    #[arg(allow_hyphen_values = true)]
    params: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env().unwrap_or_else(|e| {
        eprintln!(
            "Warning: Failed to load config from env, using defaults: {}",
            e
        );
        ClientConfig::default()
    });

    if let Some(endpoint) = cli.endpoint {
        config.endpoint = Some(endpoint);
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    config.validate()?;

    // A subscriber may already be set by an embedding process
    let _ = init_tracing(&config);

    let endpoint = config
        .endpoint
        .clone()
        .ok_or_else(|| anyhow!("Missing --endpoint (or LIGHTRPC_ENDPOINT)"))?;

    let mut builder = Client::builder(endpoint)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs));
    for header in &cli.headers {
        let (name, value) = parse_header(header)?;
        builder = builder.header(name, value);
    }
    let client = builder.build()?;

    let mut request = Request::new(cli.params.into_iter().map(parse_param));
    request.set_id(cli.id).set_method(cli.method);

    info!(endpoint = %client.endpoint(), method = %request.method(), "Calling");
    let response = client.send(&request).await?;

    println!("{}", response.to_json()?);

    if response.is_error() {
        eprintln!(
            "Error: HTTP {} (rpc error: {}, decode error: {})",
            response.status_code(),
            response.is_rpc_error(),
            response
                .decode_error()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "none".to_string())
        );
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_param(raw: String) -> Value {
    serde_json::from_str(&raw).unwrap_or(Value::String(raw))
}

fn parse_header(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once(':')
        .with_context(|| format!("header '{}' must look like 'Name: value'", raw))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}
