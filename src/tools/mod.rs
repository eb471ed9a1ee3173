//! Capability system for the assistant.
//!
//! Capabilities are the actions the pipeline can take against the ledger.
//! Each one is a named, invocable unit; the registry maps action names to
//! capabilities and is read-only after construction, so concurrent
//! dispatches can share it without locking.
//!
//! The registry is always constructed explicitly and handed to the
//! dispatcher. There is no module-level default set: tests substitute fake
//! capabilities through the same constructor.

mod account;
mod balance;
mod transfer;

pub use account::AccountQuery;
pub use balance::BalanceQuery;
pub use transfer::TransferHbar;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

/// Information about a capability for display purposes.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

/// Trait for implementing capabilities.
///
/// `execute` receives the parameter object exactly as the decision stage
/// extracted it. Parameter validation is the capability's own business;
/// the pipeline performs no coercion.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this capability.
    fn name(&self) -> &str;

    /// A one-line description of what this capability does.
    fn description(&self) -> &str;

    /// JSON schema for the capability's parameters.
    fn parameters_schema(&self) -> Value;

    /// Invoke the capability with the given parameter object.
    async fn execute(&self, args: Value) -> anyhow::Result<Value>;
}

/// Registry of available capabilities, keyed by action name.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn empty() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Build a registry from an explicit capability list.
    ///
    /// Action names must be unique; a duplicate keeps the first binding
    /// and is reported, never silently shadowed.
    pub fn register(tools: Vec<Arc<dyn Tool>>) -> Self {
        let mut map: HashMap<String, Arc<dyn Tool>> = HashMap::new();
        for tool in tools {
            let name = tool.name().to_string();
            if map.contains_key(&name) {
                debug_assert!(false, "duplicate capability name: {}", name);
                tracing::warn!("Ignoring duplicate capability registration: {}", name);
                continue;
            }
            map.insert(name, tool);
        }

        tracing::debug!("Capability registry built with {} entries", map.len());
        Self { tools: map }
    }

    /// Resolve a capability by action name. Pure lookup, no side effects.
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Check if a capability exists by name.
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// List all registered capabilities.
    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.tools
            .values()
            .map(|t| ToolInfo {
                name: t.name().to_string(),
                description: t.description().to_string(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
