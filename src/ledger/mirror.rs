//! Mirror node REST client for read-only ledger queries.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};

/// Tinybars per HBAR.
const TINYBARS_PER_HBAR: u64 = 100_000_000;

/// Read-only client for the Hedera mirror node REST API.
pub struct MirrorNodeClient {
    client: reqwest::Client,
    base_url: String,
}

/// Response from `GET /api/v1/balances`.
#[derive(Debug, Deserialize)]
struct BalancesResponse {
    #[serde(default)]
    balances: Vec<AccountBalance>,
}

/// A single account balance entry.
#[derive(Debug, Deserialize)]
struct AccountBalance {
    account: String,
    /// Balance in tinybars
    balance: u64,
}

/// Response from `GET /api/v1/accounts/{id}` (the fields the assistant
/// surfaces; the mirror node returns much more).
#[derive(Debug, Deserialize)]
struct AccountResponse {
    account: String,
    #[serde(default)]
    memo: String,
    #[serde(default)]
    deleted: bool,
    balance: Option<NestedBalance>,
}

#[derive(Debug, Deserialize)]
struct NestedBalance {
    balance: u64,
}

impl MirrorNodeClient {
    /// Create a new mirror node client.
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

    /// Query the HBAR balance of an account.
    ///
    /// Returns `{"accountId": ..., "hbars": ...}` with the balance as a
    /// decimal HBAR string.
    pub async fn hbar_balance(&self, account_id: &str) -> anyhow::Result<Value> {
        let url = format!(
            "{}/api/v1/balances?account.id={}",
            self.base_url.trim_end_matches('/'),
            account_id
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Mirror node error ({}): {}", status, body);
        }

        let parsed: BalancesResponse = response.json().await?;
        let entry = parsed
            .balances
            .into_iter()
            .find(|b| b.account == account_id)
            .ok_or_else(|| anyhow::anyhow!("Account {} not found on the ledger", account_id))?;

        Ok(json!({
            "accountId": entry.account,
            "hbars": tinybars_to_hbar(entry.balance),
        }))
    }

    /// Query account details.
    pub async fn account_info(&self, account_id: &str) -> anyhow::Result<Value> {
        let url = format!(
            "{}/api/v1/accounts/{}",
            self.base_url.trim_end_matches('/'),
            account_id
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Mirror node error ({}): {}", status, body);
        }

        let parsed: AccountResponse = response.json().await?;
        Ok(json!({
            "accountId": parsed.account,
            "hbars": parsed.balance.map(|b| tinybars_to_hbar(b.balance)),
            "memo": parsed.memo,
            "deleted": parsed.deleted,
        }))
    }
}

/// Render a tinybar amount as a decimal HBAR string, trailing zeros
/// trimmed.
pub fn tinybars_to_hbar(tinybars: u64) -> String {
    let whole = tinybars / TINYBARS_PER_HBAR;
    let frac = tinybars % TINYBARS_PER_HBAR;

    if frac == 0 {
        return whole.to_string();
    }

    let frac_str = format!("{:08}", frac);
    format!("{}.{}", whole, frac_str.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tinybar_conversion() {
        assert_eq!(tinybars_to_hbar(0), "0");
        assert_eq!(tinybars_to_hbar(100_000_000), "1");
        assert_eq!(tinybars_to_hbar(4_200_000_000), "42");
        assert_eq!(tinybars_to_hbar(4_206_900_000), "42.069");
        assert_eq!(tinybars_to_hbar(1), "0.00000001");
        assert_eq!(tinybars_to_hbar(150_000_000), "1.5");
    }

    #[test]
    fn test_balances_response_deserialization() {
        let body = r#"{
            "timestamp": "1700000000.000000000",
            "balances": [
                {"account": "0.0.1234", "balance": 4206900000, "tokens": []}
            ],
            "links": {"next": null}
        }"#;

        let parsed: BalancesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.balances.len(), 1);
        assert_eq!(parsed.balances[0].account, "0.0.1234");
        assert_eq!(tinybars_to_hbar(parsed.balances[0].balance), "42.069");
    }

    #[test]
    fn test_account_response_deserialization() {
        let body = r#"{
            "account": "0.0.1234",
            "balance": {"balance": 150000000, "timestamp": "1700000000.0"},
            "memo": "ops account",
            "deleted": false,
            "key": {"_type": "ECDSA_SECP256K1", "key": "abc"}
        }"#;

        let parsed: AccountResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.account, "0.0.1234");
        assert_eq!(parsed.memo, "ops account");
        assert_eq!(parsed.balance.unwrap().balance, 150_000_000);
    }
}
