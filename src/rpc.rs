//! A minimal JSON-RPC transport implementing [`RollupRpcClient`] against a
//! real Godwoken rollup node, using the same request/response envelope
//! shapes as `raiko-host::prover::json_rpc`.

use alloy_primitives::U256;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::account_resolver::RollupRpcClient;

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a, P> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: P,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    #[allow(dead_code)]
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<T>,
    error: Option<JsonRpcError>,
}

/// A `RollupRpcClient` backed by `reqwest`, speaking JSON-RPC 2.0 to a
/// single Godwoken endpoint.
pub struct JsonRpcRollupClient {
    http: reqwest::Client,
    endpoint: String,
}

impl JsonRpcRollupClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        JsonRpcRollupClient {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    async fn call<P: Serialize, T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        params: P,
    ) -> anyhow::Result<T> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };
        let response: JsonRpcResponse<T> = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .json()
            .await?;
        if let Some(err) = response.error {
            anyhow::bail!("rollup RPC `{method}` failed: {}", err.message);
        }
        response
            .result
            .ok_or_else(|| anyhow::anyhow!("rollup RPC `{method}` returned no result"))
    }
}

fn hex_hash(hash: [u8; 32]) -> String {
    format!("0x{}", hex::encode(hash))
}

fn hex_address(address: [u8; 20]) -> String {
    format!("0x{}", hex::encode(address))
}

#[async_trait]
impl RollupRpcClient for JsonRpcRollupClient {
    async fn get_account_id_by_script_hash(
        &self,
        script_hash: [u8; 32],
    ) -> anyhow::Result<Option<u32>> {
        let result: Option<String> = self
            .call("gw_get_account_id_by_script_hash", [hex_hash(script_hash)])
            .await?;
        result
            .map(|s| {
                let digits = s.trim_start_matches("0x");
                u32::from_str_radix(digits, 16)
                    .map_err(|e| anyhow::anyhow!("invalid account id `{s}`: {e}"))
            })
            .transpose()
    }

    async fn get_script_hash(&self, account_id: u32) -> anyhow::Result<[u8; 32]> {
        let result: String = self
            .call("gw_get_script_hash", [format!("0x{account_id:x}")])
            .await?;
        let bytes = hex::decode(result.trim_start_matches("0x"))?;
        let mut hash = [0u8; 32];
        if bytes.len() != 32 {
            anyhow::bail!("script hash has unexpected length {}", bytes.len());
        }
        hash.copy_from_slice(&bytes);
        Ok(hash)
    }

    async fn get_balance(&self, address: [u8; 20], sudt_id: u32) -> anyhow::Result<U256> {
        let result: String = self
            .call(
                "gw_get_balance",
                (hex_address(address), format!("0x{sudt_id:x}")),
            )
            .await?;
        let digits = result.trim_start_matches("0x");
        U256::from_str_radix(digits, 16)
            .map_err(|e| anyhow::anyhow!("invalid balance `{result}`: {e}"))
    }
}
