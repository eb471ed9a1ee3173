//! Ledger service clients.
//!
//! Reads go to the public mirror node REST API; writes go to an
//! operator-run transaction gateway that holds the signing path. Both are
//! plain HTTP clients, configured once and shared read-only.

mod gateway;
mod mirror;

pub use gateway::TransactionGateway;
pub use mirror::MirrorNodeClient;

/// Operator credentials for a scoped session.
///
/// Created per session from the environment, or per request when the
/// caller overrides them; never shared across scopes.
#[derive(Debug, Clone)]
pub struct LedgerCredentials {
    /// Account id in `shard.realm.num` form (e.g. `0.0.1234`)
    pub account_id: String,
    /// ECDSA private key used by the gateway to sign transfers
    pub private_key: String,
}
