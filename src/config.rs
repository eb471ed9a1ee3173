//! Configuration management for the assistant.
//!
//! Configuration can be set via environment variables:
//! - `NILAI_API_KEY` - Required. Bearer token for the nilAI endpoint.
//! - `NILAI_BASE_URL` - Required. Base URL of the nilAI API (no trailing `/chat/completions`).
//! - `NILAI_MODEL` - Optional. Model identifier. Defaults to `meta-llama/Llama-3.1-8B-Instruct`.
//! - `HEDERA_ACCOUNT_ID` - Optional. Operator account id (`0.0.x`).
//! - `HEDERA_PRIVATE_KEY` - Optional. Operator ECDSA private key for transfers.
//! - `MIRROR_NODE_URL` - Optional. Defaults to the public testnet mirror node.
//! - `LEDGER_GATEWAY_URL` - Optional. Transaction gateway for transfer submission.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `3000`.
//! - `REQUEST_TIMEOUT_SECS` - Optional. Timeout per reasoner/ledger HTTP call. Defaults to `30`.
//! - `TOOL_TIMEOUT_SECS` - Optional. Timeout per capability invocation. Defaults to `30`.

use std::time::Duration;

use thiserror::Error;

use crate::ledger::LedgerCredentials;

const DEFAULT_MODEL: &str = "meta-llama/Llama-3.1-8B-Instruct";
const DEFAULT_MIRROR_NODE_URL: &str = "https://testnet.mirrornode.hedera.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Assistant configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// nilAI API key
    pub nilai_api_key: String,

    /// nilAI base URL
    pub nilai_base_url: String,

    /// Model identifier sent with every completion request
    pub nilai_model: String,

    /// Operator account id (appended to the user turn as context)
    pub hedera_account_id: Option<String>,

    /// Operator private key (needed by the transfer capability)
    pub hedera_private_key: Option<String>,

    /// Mirror node base URL for read queries
    pub mirror_node_url: String,

    /// Transaction gateway base URL for transfer submission
    pub ledger_gateway_url: Option<String>,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Timeout applied to each outbound HTTP call
    pub request_timeout: Duration,

    /// Timeout applied to each capability invocation
    pub tool_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `NILAI_API_KEY` or
    /// `NILAI_BASE_URL` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let nilai_api_key = std::env::var("NILAI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("NILAI_API_KEY".to_string()))?;

        let nilai_base_url = std::env::var("NILAI_BASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("NILAI_BASE_URL".to_string()))?;

        let nilai_model =
            std::env::var("NILAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let hedera_account_id = std::env::var("HEDERA_ACCOUNT_ID").ok();
        let hedera_private_key = std::env::var("HEDERA_PRIVATE_KEY").ok();

        let mirror_node_url = std::env::var("MIRROR_NODE_URL")
            .unwrap_or_else(|_| DEFAULT_MIRROR_NODE_URL.to_string());

        let ledger_gateway_url = std::env::var("LEDGER_GATEWAY_URL").ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let request_timeout = parse_secs("REQUEST_TIMEOUT_SECS", 30)?;
        let tool_timeout = parse_secs("TOOL_TIMEOUT_SECS", 30)?;

        Ok(Self {
            nilai_api_key,
            nilai_base_url,
            nilai_model,
            hedera_account_id,
            hedera_private_key,
            mirror_node_url,
            ledger_gateway_url,
            host,
            port,
            request_timeout,
            tool_timeout,
        })
    }

    /// Operator credentials from the environment, when both halves are set.
    pub fn operator_credentials(&self) -> Option<LedgerCredentials> {
        match (&self.hedera_account_id, &self.hedera_private_key) {
            (Some(account_id), Some(private_key)) => Some(LedgerCredentials {
                account_id: account_id.clone(),
                private_key: private_key.clone(),
            }),
            _ => None,
        }
    }
}

fn parse_secs(var: &str, default: u64) -> Result<Duration, ConfigError> {
    let secs = std::env::var(var)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|e| ConfigError::InvalidValue(var.to_string(), format!("{}", e)))?;
    Ok(Duration::from_secs(secs))
}
