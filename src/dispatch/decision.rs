//! Decision stage: turn free-form user text into an action intent or a
//! direct answer.
//!
//! The model is not a guaranteed JSON emitter, so the parse is a total
//! function: anything that is not a complete intent object is the direct
//! answer, verbatim. No partial extraction is attempted.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::llm::ChatMessage;

use super::DispatchContext;

/// System prompt for the decision stage. Enumerates the fixed capability
/// set with worked examples so the model either emits one intent object or
/// answers in prose.
const DECISION_SYSTEM_PROMPT: &str = r#"You are a Hedera blockchain assistant. Analyze the user's request and determine:

1. If a tool is needed, respond with JSON: {"toolName": "tool_name", "parameters": {...}}
2. If no tool is needed, respond with your answer directly

Available tools:
- get_hbar_balance_query_tool: Check HBAR balance (no parameters needed)
- get_account_query_tool: Get account details (optional parameters: {"accountId": "0.0.xxxx"})
- transfer_hbar_tool: Transfer HBAR (requires parameters: {"transfers": [{"accountId": "0.0.1234", "amount": 10}]})

Examples:
- "What's my balance?" → {"toolName": "get_hbar_balance_query_tool", "parameters": {}}
- "Show details for 0.0.1234" → {"toolName": "get_account_query_tool", "parameters": {"accountId": "0.0.1234"}}
- "Transfer 10 HBAR to 0.0.800" → {"toolName": "transfer_hbar_tool", "parameters": {"transfers": [{"accountId": "0.0.800", "amount": 10}]}}
- "Hello" → "Hello! I can help you check HBAR balances and send transfers."

Return ONLY JSON for tool calls, or plain text for general responses."#;

/// A structured action extracted from the model's decision output.
/// Transient: created and discarded within one dispatch call.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ActionIntent {
    #[serde(rename = "toolName")]
    pub tool_name: String,
    /// Parameter object, `{}` when the model omitted it
    #[serde(default)]
    pub parameters: Value,
}

/// Tagged result of parsing the decision output. Exactly one variant,
/// never both, never neither.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// The model asked for a capability invocation
    Action(ActionIntent),
    /// The model answered directly; the text is returned verbatim
    Direct(String),
}

/// Build the two-message decision conversation: the fixed system prompt,
/// then the user request with the caller-supplied account id appended.
pub fn messages(user_text: &str, ctx: &DispatchContext) -> Vec<ChatMessage> {
    let user_content = match &ctx.account_id {
        Some(account_id) => format!("{}\n\nAccount ID: {}", user_text, account_id),
        None => user_text.to_string(),
    };

    vec![
        ChatMessage::system(DECISION_SYSTEM_PROMPT),
        ChatMessage::user(user_content),
    ]
}

/// Parse the raw decision output.
///
/// A trimmed strict JSON parse that yields an object with a `toolName`
/// string becomes an `Action`; everything else (malformed JSON, non-object
/// JSON, objects that are not intents) is a `Direct` answer carrying the
/// entire raw response unmodified.
pub fn parse_decision(raw: &str) -> Decision {
    match serde_json::from_str::<ActionIntent>(raw.trim()) {
        Ok(mut intent) => {
            if !intent.parameters.is_object() {
                intent.parameters = Value::Object(Map::new());
            }
            Decision::Action(intent)
        }
        Err(_) => Decision::Direct(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_intent_with_parameters() {
        let decision =
            parse_decision(r#"{"toolName": "transfer_hbar_tool", "parameters": {"transfers": [{"accountId": "0.0.800", "amount": 10}]}}"#);

        match decision {
            Decision::Action(intent) => {
                assert_eq!(intent.tool_name, "transfer_hbar_tool");
                assert_eq!(
                    intent.parameters,
                    json!({"transfers": [{"accountId": "0.0.800", "amount": 10}]})
                );
            }
            Decision::Direct(_) => panic!("expected an action"),
        }
    }

    #[test]
    fn test_missing_parameters_default_to_empty_object() {
        let decision = parse_decision(r#"{"toolName": "get_hbar_balance_query_tool"}"#);
        match decision {
            Decision::Action(intent) => assert_eq!(intent.parameters, json!({})),
            Decision::Direct(_) => panic!("expected an action"),
        }
    }

    #[test]
    fn test_null_parameters_default_to_empty_object() {
        let decision =
            parse_decision(r#"{"toolName": "get_hbar_balance_query_tool", "parameters": null}"#);
        match decision {
            Decision::Action(intent) => assert_eq!(intent.parameters, json!({})),
            Decision::Direct(_) => panic!("expected an action"),
        }
    }

    #[test]
    fn test_prose_is_a_direct_answer() {
        let raw = "Hello! I can help you check HBAR balances and send transfers.";
        assert_eq!(parse_decision(raw), Decision::Direct(raw.to_string()));
    }

    #[test]
    fn test_surrounding_whitespace_is_tolerated_for_intents() {
        let decision = parse_decision("  {\"toolName\": \"get_hbar_balance_query_tool\"}\n");
        assert!(matches!(decision, Decision::Action(_)));
    }

    #[test]
    fn test_direct_answer_is_returned_unmodified() {
        // The raw output is the terminal artifact; trimming is only for the
        // parse attempt.
        let raw = "  not json  ";
        assert_eq!(parse_decision(raw), Decision::Direct(raw.to_string()));
    }

    #[test]
    fn test_non_object_json_is_a_direct_answer() {
        assert!(matches!(parse_decision("[1, 2, 3]"), Decision::Direct(_)));
        assert!(matches!(parse_decision("\"quoted\""), Decision::Direct(_)));
        assert!(matches!(parse_decision("42"), Decision::Direct(_)));
    }

    #[test]
    fn test_object_without_tool_name_is_a_direct_answer() {
        assert!(matches!(
            parse_decision(r#"{"parameters": {}}"#),
            Decision::Direct(_)
        ));
    }

    #[test]
    fn test_parse_is_total() {
        for raw in ["", "{", "{}", "null", "JSON: {\"toolName\":\"x\"}"] {
            // Every input yields exactly one variant; none may panic.
            let _ = parse_decision(raw);
        }
    }

    #[test]
    fn test_messages_order_and_account_context() {
        let ctx = DispatchContext {
            account_id: Some("0.0.1234".to_string()),
        };
        let messages = messages("What's my balance?", &ctx);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, crate::llm::Role::System);
        assert!(messages[0].content.contains("get_hbar_balance_query_tool"));
        assert!(messages[1]
            .content
            .ends_with("What's my balance?\n\nAccount ID: 0.0.1234"));
    }

    #[test]
    fn test_messages_without_account_context() {
        let ctx = DispatchContext { account_id: None };
        let messages = messages("Hello", &ctx);
        assert_eq!(messages[1].content, "Hello");
    }
}
