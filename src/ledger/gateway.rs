//! Transaction gateway client for transfer submission.
//!
//! The gateway is an operator-run service that holds the gRPC submission
//! path and signs with the operator key it is handed. The assistant only
//! speaks REST to it.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use super::LedgerCredentials;

/// Client for the transaction gateway.
pub struct TransactionGateway {
    client: reqwest::Client,
    base_url: String,
}

/// Request body for `POST /api/v1/transactions/transfer`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransferRequest<'a> {
    operator_account_id: &'a str,
    operator_private_key: &'a str,
    transfers: &'a Value,
}

impl TransactionGateway {
    /// Create a new gateway client.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Submit an HBAR transfer.
    ///
    /// `transfers` is passed through exactly as extracted from the action
    /// intent; the gateway owns validation of recipients and amounts.
    /// Returns the gateway response, typically
    /// `{"transactionId": "0.0.x@s.n", "status": "SUCCESS"}`.
    pub async fn transfer(
        &self,
        credentials: &LedgerCredentials,
        transfers: &Value,
    ) -> anyhow::Result<Value> {
        let url = format!(
            "{}/api/v1/transactions/transfer",
            self.base_url.trim_end_matches('/')
        );

        let request = TransferRequest {
            operator_account_id: &credentials.account_id,
            operator_private_key: &credentials.private_key,
            transfers,
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Transaction gateway error ({}): {}", status, body);
        }

        Ok(response.json().await?)
    }
}
