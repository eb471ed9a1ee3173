//! Three-phase dispatch pipeline.
//!
//! One dispatch call moves through `DECIDING → {DIRECT_ANSWER | EXECUTING
//! → FORMATTING}` with no retries and no re-entrant transitions. At most
//! one capability is invoked per call.
//!
//! Fault policy: reasoner transport faults are fatal and propagate to the
//! caller; everything that goes wrong at the capability boundary (unknown
//! name, capability fault, capability timeout) is downgraded to data and
//! fed into the formatting stage so the user still gets a plain-language
//! explanation.

pub mod decision;
pub mod format;

pub use decision::{parse_decision, ActionIntent, Decision};

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::llm::{LlmClient, ReasonerError};
use crate::tools::ToolRegistry;

const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(30);

/// Caller-supplied context for one dispatch call.
#[derive(Debug, Clone, Default)]
pub struct DispatchContext {
    /// Account id appended to the user turn so the model can answer
    /// account-relative questions
    pub account_id: Option<String>,
}

impl DispatchContext {
    pub fn with_account(account_id: impl Into<String>) -> Self {
        Self {
            account_id: Some(account_id.into()),
        }
    }
}

/// Terminal artifact of a dispatch call. Never mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchResult {
    pub content: String,
    pub role: String,
}

impl DispatchResult {
    fn assistant(content: String) -> Self {
        Self {
            content,
            role: "assistant".to_string(),
        }
    }
}

/// The dispatch pipeline: a reasoner, a capability registry, and a
/// capability timeout.
///
/// Both collaborators are injected at construction. The registry is
/// read-only for the dispatcher's lifetime, so one dispatcher can serve
/// concurrent calls.
pub struct Dispatcher {
    reasoner: Arc<dyn LlmClient>,
    registry: ToolRegistry,
    tool_timeout: Duration,
}

impl Dispatcher {
    pub fn new(reasoner: Arc<dyn LlmClient>, registry: ToolRegistry) -> Self {
        Self {
            reasoner,
            registry,
            tool_timeout: DEFAULT_TOOL_TIMEOUT,
        }
    }

    pub fn with_tool_timeout(mut self, tool_timeout: Duration) -> Self {
        self.tool_timeout = tool_timeout;
        self
    }

    /// The capability registry this dispatcher resolves against.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Run one request through the pipeline.
    ///
    /// # Errors
    ///
    /// Returns `ReasonerError` when a reasoner call fails; the remaining
    /// stages are aborted and no further capability is invoked.
    pub async fn dispatch(
        &self,
        user_text: &str,
        ctx: &DispatchContext,
    ) -> Result<DispatchResult, ReasonerError> {
        let raw_decision = self
            .reasoner
            .complete(&decision::messages(user_text, ctx))
            .await?;

        let intent = match parse_decision(&raw_decision) {
            Decision::Direct(text) => {
                tracing::debug!("Decision stage produced a direct answer");
                return Ok(DispatchResult::assistant(text));
            }
            Decision::Action(intent) => intent,
        };

        tracing::info!(tool = %intent.tool_name, "Decision stage selected a capability");
        let raw_result = self.execute(&intent).await;

        let formatted = self
            .reasoner
            .complete(&format::messages(user_text, &intent.tool_name, &raw_result))
            .await?;

        Ok(DispatchResult::assistant(format::ensure_explorer_link(
            formatted,
            &raw_result,
        )))
    }

    /// Execution stage: resolve and invoke the chosen capability.
    ///
    /// Always produces a result value; unknown names, capability faults
    /// and capability timeouts become error strings, never propagated
    /// faults.
    async fn execute(&self, intent: &ActionIntent) -> Value {
        let Some(tool) = self.registry.resolve(&intent.tool_name) else {
            tracing::warn!(tool = %intent.tool_name, "Unknown capability requested");
            return Value::String(format!("Error: tool {} not found", intent.tool_name));
        };

        let invocation = tool.execute(intent.parameters.clone());
        match tokio::time::timeout(self.tool_timeout, invocation).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                tracing::warn!(tool = %intent.tool_name, error = %e, "Capability fault");
                Value::String(format!("Error: {}", e))
            }
            Err(_) => {
                tracing::warn!(tool = %intent.tool_name, "Capability invocation timed out");
                Value::String(format!(
                    "Error: tool {} timed out after {}s",
                    intent.tool_name,
                    self.tool_timeout.as_secs()
                ))
            }
        }
    }
}
