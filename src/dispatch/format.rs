//! Formatting stage: turn a raw capability result back into prose.
//!
//! The explorer link is part of the output contract: the prompt asks the
//! model for it, and `ensure_explorer_link` enforces it afterwards so the
//! guarantee does not depend on model compliance.

use regex::Regex;
use serde_json::Value;

use crate::llm::ChatMessage;

const EXPLORER_URL_PREFIX: &str =
    "https://testnet.hederaexplorer.io/search-details/transaction/";

/// System prompt for the formatting stage.
const FORMAT_SYSTEM_PROMPT: &str = r#"You are a Hedera blockchain assistant. Format the tool result into a clear, human-readable response.

For balance results: Show the balance clearly
For transfer results: Show transaction ID and status
For errors: Explain what went wrong

If a transaction ID is present, append a Testnet explorer link on a new line using this format:
Explorer: https://testnet.hederaexplorer.io/search-details/transaction/<TRANSACTION_ID>

Be concise and helpful."#;

/// Build the formatting conversation: presentation rules, then the
/// original request with the action name and serialized raw result.
pub fn messages(user_text: &str, tool_name: &str, raw_result: &Value) -> Vec<ChatMessage> {
    let serialized = serde_json::to_string(raw_result).unwrap_or_else(|_| raw_result.to_string());

    let user_content = format!(
        "User asked: \"{}\"\nTool used: {}\nTool result: {}\n\nPlease format this into a clear response for the user.",
        user_text, tool_name, serialized
    );

    vec![
        ChatMessage::system(FORMAT_SYSTEM_PROMPT),
        ChatMessage::user(user_content),
    ]
}

/// Find a Hedera transaction id in a serialized result.
///
/// Matches both the SDK form `0.0.1234@1700000000.123456789` and the
/// mirror/explorer form `0.0.1234-1700000000-123456789`. Bare account ids
/// do not match.
pub fn detect_transaction_id(text: &str) -> Option<String> {
    let pattern = Regex::new(r"\d+\.\d+\.\d+[@-]\d+[.-]\d+").unwrap();
    pattern.find(text).map(|m| m.as_str().to_string())
}

/// Append the deterministic explorer line when the raw result carries a
/// transaction id the formatted text does not already link to.
pub fn ensure_explorer_link(formatted: String, raw_result: &Value) -> String {
    let serialized = serde_json::to_string(raw_result).unwrap_or_default();
    let Some(transaction_id) = detect_transaction_id(&serialized) else {
        return formatted;
    };

    let link = format!("{}{}", EXPLORER_URL_PREFIX, transaction_id);
    if formatted.contains(&link) {
        return formatted;
    }

    tracing::debug!(%transaction_id, "Appending explorer link to formatted result");
    format!("{}\nExplorer: {}", formatted.trim_end(), link)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_messages_embed_request_tool_and_result() {
        let result = json!({"hbars": "42"});
        let messages = messages("What's my balance?", "get_hbar_balance_query_tool", &result);

        assert_eq!(messages.len(), 2);
        assert!(messages[0].content.contains("human-readable"));
        assert!(messages[1].content.contains("What's my balance?"));
        assert!(messages[1].content.contains("get_hbar_balance_query_tool"));
        assert!(messages[1].content.contains(r#"{"hbars":"42"}"#));
    }

    #[test]
    fn test_detects_at_form_transaction_id() {
        let id = detect_transaction_id(
            r#"{"transactionId":"0.0.1234@1700000000.123456789","status":"SUCCESS"}"#,
        );
        assert_eq!(id.as_deref(), Some("0.0.1234@1700000000.123456789"));
    }

    #[test]
    fn test_detects_dash_form_transaction_id() {
        let id = detect_transaction_id("submitted as 0.0.1234-1700000000-123456789 just now");
        assert_eq!(id.as_deref(), Some("0.0.1234-1700000000-123456789"));
    }

    #[test]
    fn test_bare_account_id_does_not_match() {
        assert_eq!(detect_transaction_id(r#"{"accountId":"0.0.1234"}"#), None);
        assert_eq!(detect_transaction_id("balance of 0.0.800 is 42"), None);
    }

    #[test]
    fn test_explorer_link_appended_when_missing() {
        let raw = json!({"transactionId": "0.0.1234@1700000000.123456789", "status": "SUCCESS"});
        let formatted = ensure_explorer_link("Transfer complete.".to_string(), &raw);

        assert!(formatted.starts_with("Transfer complete."));
        assert!(formatted.ends_with(
            "Explorer: https://testnet.hederaexplorer.io/search-details/transaction/0.0.1234@1700000000.123456789"
        ));
    }

    #[test]
    fn test_explorer_link_not_duplicated() {
        let raw = json!({"transactionId": "0.0.1234@1700000000.123456789"});
        let already = format!(
            "Done.\nExplorer: {}0.0.1234@1700000000.123456789",
            EXPLORER_URL_PREFIX
        );
        let formatted = ensure_explorer_link(already.clone(), &raw);
        assert_eq!(formatted, already);
    }

    #[test]
    fn test_no_link_without_transaction_id() {
        let raw = json!({"hbars": "42"});
        let formatted = ensure_explorer_link("Your balance is 42 HBAR.".to_string(), &raw);
        assert_eq!(formatted, "Your balance is 42 HBAR.");
    }
}
