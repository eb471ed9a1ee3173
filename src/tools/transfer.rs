//! HBAR transfer capability.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::ledger::{LedgerCredentials, TransactionGateway};

use super::Tool;

/// Transfer HBAR from the operator account via the transaction gateway.
pub struct TransferHbar {
    gateway: Option<Arc<TransactionGateway>>,
    credentials: Option<LedgerCredentials>,
}

impl TransferHbar {
    pub fn new(
        gateway: Option<Arc<TransactionGateway>>,
        credentials: Option<LedgerCredentials>,
    ) -> Self {
        Self {
            gateway,
            credentials,
        }
    }
}

#[async_trait]
impl Tool for TransferHbar {
    fn name(&self) -> &str {
        "transfer_hbar_tool"
    }

    fn description(&self) -> &str {
        "Transfer HBAR (requires parameters: {\"transfers\": [{\"accountId\": \"0.0.1234\", \"amount\": 10}]})"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "transfers": {
                    "type": "array",
                    "description": "Recipients and amounts in HBAR",
                    "items": {
                        "type": "object",
                        "properties": {
                            "accountId": {"type": "string"},
                            "amount": {"type": "number"}
                        },
                        "required": ["accountId", "amount"]
                    }
                }
            },
            "required": ["transfers"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<Value> {
        let gateway = self
            .gateway
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Transaction gateway is not configured"))?;
        let credentials = self
            .credentials
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Operator credentials are not configured"))?;

        let transfers = args
            .get("transfers")
            .filter(|t| t.is_array())
            .ok_or_else(|| anyhow::anyhow!("Missing 'transfers' argument"))?;

        tracing::info!(
            recipients = transfers.as_array().map(|a| a.len()).unwrap_or(0),
            "Submitting HBAR transfer"
        );

        gateway.transfer(credentials, transfers).await
    }
}
