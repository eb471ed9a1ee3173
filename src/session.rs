//! Scoped session construction.
//!
//! A session owns one dispatcher (reasoner + capability registry) and the
//! account context it answers for. The front ends build one session per
//! process, except when a request overrides the operator credentials: in
//! that case a fresh session is constructed for that single call and
//! discarded afterwards, so no credential state is ever shared across
//! requests.

use std::sync::Arc;

use crate::config::Config;
use crate::dispatch::{DispatchContext, DispatchResult, Dispatcher};
use crate::ledger::{LedgerCredentials, MirrorNodeClient, TransactionGateway};
use crate::llm::{NilaiClient, ReasonerError};
use crate::tools::{AccountQuery, BalanceQuery, Tool, ToolRegistry, TransferHbar};

/// One dispatch pipeline bound to an account context.
pub struct Session {
    dispatcher: Dispatcher,
    account_id: Option<String>,
}

impl Session {
    /// Build a session with the operator credentials from configuration.
    pub fn new(config: &Config) -> Self {
        Self::build(config, config.operator_credentials())
    }

    /// Build a request-scoped session with explicit override credentials.
    ///
    /// Constructs a fresh reasoner client and a fresh registry; nothing is
    /// reused from the process-wide session.
    pub fn with_credentials(config: &Config, credentials: LedgerCredentials) -> Self {
        Self::build(config, Some(credentials))
    }

    fn build(config: &Config, credentials: Option<LedgerCredentials>) -> Self {
        let reasoner = Arc::new(NilaiClient::new(
            config.nilai_api_key.clone(),
            config.nilai_base_url.clone(),
            config.nilai_model.clone(),
            config.request_timeout,
        ));

        let mirror = Arc::new(MirrorNodeClient::new(
            config.mirror_node_url.clone(),
            config.request_timeout,
        ));
        let gateway = config
            .ledger_gateway_url
            .as_ref()
            .map(|url| Arc::new(TransactionGateway::new(url.clone(), config.request_timeout)));

        let account_id = credentials.as_ref().map(|c| c.account_id.clone());

        let tools: Vec<Arc<dyn Tool>> = vec![
            Arc::new(BalanceQuery::new(Arc::clone(&mirror), account_id.clone())),
            Arc::new(AccountQuery::new(mirror, account_id.clone())),
            Arc::new(TransferHbar::new(gateway, credentials)),
        ];

        let dispatcher = Dispatcher::new(reasoner, ToolRegistry::register(tools))
            .with_tool_timeout(config.tool_timeout);

        Self {
            dispatcher,
            account_id,
        }
    }

    /// The account this session answers for, if any.
    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    /// The dispatcher backing this session.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Dispatch one request under this session's account context.
    pub async fn dispatch(&self, user_text: &str) -> Result<DispatchResult, ReasonerError> {
        let ctx = DispatchContext {
            account_id: self.account_id.clone(),
        };
        self.dispatcher.dispatch(user_text, &ctx).await
    }
}
