//! HBAR balance query capability.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::ledger::MirrorNodeClient;

use super::Tool;

/// Query the HBAR balance of the operator account (or an explicit one).
pub struct BalanceQuery {
    mirror: Arc<MirrorNodeClient>,
    default_account: Option<String>,
}

impl BalanceQuery {
    pub fn new(mirror: Arc<MirrorNodeClient>, default_account: Option<String>) -> Self {
        Self {
            mirror,
            default_account,
        }
    }
}

#[async_trait]
impl Tool for BalanceQuery {
    fn name(&self) -> &str {
        "get_hbar_balance_query_tool"
    }

    fn description(&self) -> &str {
        "Check HBAR balance (no parameters needed)"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "accountId": {
                    "type": "string",
                    "description": "Account to query instead of the operator account (optional)"
                }
            }
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<Value> {
        let account_id = match args["accountId"].as_str() {
            Some(explicit) => explicit.to_string(),
            None => self
                .default_account
                .clone()
                .ok_or_else(|| anyhow::anyhow!("No account id available for balance query"))?,
        };

        self.mirror.hbar_balance(&account_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn tool_without_default() -> BalanceQuery {
        let mirror = Arc::new(MirrorNodeClient::new(
            "https://mirror.example",
            Duration::from_secs(1),
        ));
        BalanceQuery::new(mirror, None)
    }

    #[tokio::test]
    async fn test_missing_account_id_is_a_capability_fault() {
        let err = tool_without_default()
            .execute(json!({}))
            .await
            .expect_err("no default and no explicit account id");
        assert!(err.to_string().contains("account id"));
    }

    #[test]
    fn test_contract_name() {
        assert_eq!(tool_without_default().name(), "get_hbar_balance_query_tool");
    }
}
