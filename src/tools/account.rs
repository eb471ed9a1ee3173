//! Account details query capability.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::ledger::MirrorNodeClient;

use super::Tool;

/// Fetch account details from the mirror node.
pub struct AccountQuery {
    mirror: Arc<MirrorNodeClient>,
    default_account: Option<String>,
}

impl AccountQuery {
    pub fn new(mirror: Arc<MirrorNodeClient>, default_account: Option<String>) -> Self {
        Self {
            mirror,
            default_account,
        }
    }
}

#[async_trait]
impl Tool for AccountQuery {
    fn name(&self) -> &str {
        "get_account_query_tool"
    }

    fn description(&self) -> &str {
        "Get account details (optional parameters: {\"accountId\": \"0.0.xxxx\"})"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "accountId": {
                    "type": "string",
                    "description": "Account to look up, e.g. 0.0.1234 (optional)"
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
                .ok_or_else(|| anyhow::anyhow!("No account id available for account query"))?,
        };

        self.mirror.account_info(&account_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_missing_account_id_is_a_capability_fault() {
        let mirror = Arc::new(MirrorNodeClient::new(
            "https://mirror.example",
            Duration::from_secs(1),
        ));
        let tool = AccountQuery::new(mirror, None);

        let err = tool.execute(json!({})).await.expect_err("no account id");
        assert!(err.to_string().contains("account id"));
    }
}
