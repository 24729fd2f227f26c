//! JSON-RPC adapter: the [`Node`] trait over a node's RPC actions.

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use lattice_wallet_core::amount::parse_raw;
use lattice_wallet_core::{Address, BigUint, Block, BlockHash, BlockSubtype, Work};

use crate::error::{NodeError, Result};
use crate::messages::{AccountInfo, BlockInfo, Receivable, ReceivableEntry};
use crate::traits::Node;
use crate::transport::RpcTransport;

/// Error text a node uses for an account with no blocks.
pub const ACCOUNT_NOT_FOUND: &str = "Account not found";

/// RPC adapter configuration.
#[derive(Debug, Clone, Default)]
pub struct RpcConfig {
    /// Use the legacy `pending` action name instead of `receivable`.
    pub use_pending: bool,

    /// Extra fields merged into every `work_generate` request
    /// (for example a work server API key).
    pub work_payload: Map<String, Value>,
}

/// A [`Node`] backed by JSON-RPC.
pub struct RpcNode<T> {
    transport: T,
    config: RpcConfig,
}

impl<T: RpcTransport> RpcNode<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, RpcConfig::default())
    }

    pub fn with_config(transport: T, config: RpcConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    /// Send one action and surface a node-reported `error` as an `Err`.
    pub async fn call(&self, payload: Value) -> Result<Value> {
        let response = self.transport.post(&payload).await?;

        if let Some(error) = response.get("error") {
            let message = match error.as_str() {
                Some(text) => text.to_string(),
                None => error.to_string(),
            };
            if message == ACCOUNT_NOT_FOUND {
                let account = payload["account"].as_str().unwrap_or_default();
                return Err(NodeError::AccountNotFound(account.to_string()));
            }
            warn!(action = %payload["action"], error = %message, "node reported error");
            return Err(NodeError::Rpc(message));
        }

        Ok(response)
    }
}

fn str_field<'a>(response: &'a Value, name: &str) -> Result<&'a str> {
    response
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| NodeError::InvalidResponse(format!("missing string field {name:?}")))
}

/// Decode the `blocks` field of a `receivable` response.
///
/// With `source` the entries are objects; without, bare amounts. Nodes send
/// an empty string instead of an empty object when nothing is receivable.
fn parse_receivable(response: &Value) -> Result<Vec<Receivable>> {
    let blocks = match response.get("blocks") {
        Some(Value::Object(blocks)) => blocks,
        Some(Value::String(s)) if s.is_empty() => return Ok(Vec::new()),
        Some(Value::Array(a)) if a.is_empty() => return Ok(Vec::new()),
        _ => return Err(NodeError::InvalidResponse("missing receivable blocks".into())),
    };

    blocks
        .iter()
        .map(|(hash, entry)| -> Result<Receivable> {
            let hash = BlockHash::from_hex(hash)?;
            match entry {
                Value::String(amount) => Ok(Receivable {
                    hash,
                    amount: parse_raw(amount)?,
                    source: None,
                }),
                other => {
                    let entry: ReceivableEntry = serde_json::from_value(other.clone())?;
                    Ok(Receivable {
                        hash,
                        amount: entry.amount,
                        source: entry.source,
                    })
                }
            }
        })
        .collect()
}

#[async_trait]
impl<T: RpcTransport> Node for RpcNode<T> {
    async fn account_info(&self, account: &Address) -> Result<AccountInfo> {
        let response = self
            .call(json!({
                "action": "account_info",
                "account": account.as_str(),
                "representative": "true",
            }))
            .await?;
        Ok(serde_json::from_value(response)?)
    }

    async fn block_info(&self, hash: &BlockHash) -> Result<BlockInfo> {
        let response = self
            .call(json!({
                "action": "block_info",
                "hash": hash.to_hex(),
                "json_block": "true",
            }))
            .await?;
        Ok(serde_json::from_value(response)?)
    }

    async fn receivable(
        &self,
        account: &Address,
        count: u32,
        threshold: &BigUint,
    ) -> Result<Vec<Receivable>> {
        let action = if self.config.use_pending {
            "pending"
        } else {
            "receivable"
        };
        let mut payload = json!({
            "action": action,
            "account": account.as_str(),
            "count": count.to_string(),
            "source": "true",
        });
        if *threshold != BigUint::default() {
            payload["threshold"] = Value::String(threshold.to_string());
        }

        let response = self.call(payload).await?;
        parse_receivable(&response)
    }

    async fn process(
        &self,
        block: &Block,
        subtype: BlockSubtype,
        do_work: bool,
    ) -> Result<BlockHash> {
        let mut payload = json!({
            "action": "process",
            "json_block": "true",
            "subtype": subtype.as_str(),
            "block": serde_json::to_value(block)?,
        });
        if do_work {
            payload["do_work"] = Value::Bool(true);
        }

        debug!(account = %block.account(), %subtype, do_work, "submitting block");
        let response = self.call(payload).await?;
        Ok(BlockHash::from_hex(str_field(&response, "hash")?)?)
    }

    async fn work_generate(&self, root: &BlockHash) -> Result<Work> {
        let mut payload = Map::new();
        payload.insert("action".into(), json!("work_generate"));
        payload.insert("hash".into(), json!(root.to_hex()));
        for (key, value) in &self.config.work_payload {
            payload.insert(key.clone(), value.clone());
        }

        debug!(root = %root, "requesting work from node");
        let response = self.call(Value::Object(payload)).await?;
        Ok(Work::from_hex(str_field(&response, "work")?)?)
    }
}
