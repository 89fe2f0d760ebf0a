//! The orchestrator: decodes an Ethereum legacy transaction, validates it,
//! recovers its sender, resolves both ends against the rollup, and
//! assembles a signed Godwoken L2 transaction.
//!
//! Local, cheap checks (size, gas bounds) run before any RPC call; the
//! only suspension points are the sender's account-id lookup, its balance
//! query, and (for a `to` address) its account-id and script-hash lookups.

use crate::account_resolver::{self, RollupRpcClient, NATIVE_SUDT_ID};
use crate::cache::AutoCreateAccountCacheEntry;
use crate::config::ChainConfig;
use crate::error::Error;
use crate::keccak::keccak;
use crate::model::{L2Transaction, RawL2Transaction};
use crate::polyjuice::{self, PolyjuiceArgs};
use crate::rlp_codec;
use crate::signature;
use crate::validators;

/// The outcome of a successful transcode.
pub struct TranscodeOutput {
    pub l2_tx: L2Transaction,
    /// Present when the sender had no registered account yet; the caller
    /// is responsible for persisting it (§6).
    pub auto_create: Option<AutoCreateAccountCacheEntry>,
}

enum Recipient {
    Create,
    NativeTransfer([u8; 20]),
    Call(u32),
}

/// Transcodes a raw RLP-encoded Ethereum legacy transaction into a signed
/// Godwoken L2 transaction.
pub async fn transcode(
    raw: &[u8],
    client: &dyn RollupRpcClient,
    cfg: &ChainConfig,
) -> Result<TranscodeOutput, Error> {
    let tx = rlp_codec::decode(raw)?;
    let canonical = rlp_codec::encode_canonical(&tx);

    validators::validate_size(canonical.len(), cfg).map_err(|e| {
        tracing::warn!(error = %e, "rejected transaction on size validation");
        e
    })?;
    let gas_limit = validators::validate_gas_limit(&tx.gas_limit, cfg).map_err(|e| {
        tracing::warn!(error = %e, "rejected transaction on gas limit validation");
        e
    })?;
    let gas_price = validators::validate_gas_price(&tx.gas_price, cfg).map_err(|e| {
        tracing::warn!(error = %e, "rejected transaction on gas price validation");
        e
    })?;

    let recovered = signature::recover(&tx)?;
    let from_address = recovered.address;

    tracing::debug!(address = %hex::encode(from_address), "resolving sender account id");
    let resolved_from = account_resolver::account_id_of(client, cfg, from_address).await?;
    let balance = client
        .get_balance(from_address, NATIVE_SUDT_ID)
        .await
        .map_err(Error::Upstream)?;
    validators::validate_balance(from_address, balance, tx.value.to_u256(), gas_limit, gas_price)
        .map_err(|e| {
            tracing::warn!(error = %e, "rejected transaction on balance validation");
            e
        })?;

    let eth_tx_hash = keccak(&canonical);
    let (from_id, auto_create) = match resolved_from {
        Some(id) => (id, None),
        None => {
            tracing::debug!(
                address = %hex::encode(from_address),
                "sender has no registered account, taking auto-create-account path"
            );
            (
                cfg.auto_create_account_from_id,
                Some(AutoCreateAccountCacheEntry {
                    tx: raw.to_vec(),
                    from_address,
                    eth_tx_hash,
                }),
            )
        }
    };

    let is_create = tx.is_contract_creation();
    validators::validate_intrinsic_gas(gas_limit, &tx.data, is_create).map_err(|e| {
        tracing::warn!(error = %e, "rejected transaction on intrinsic gas validation");
        e
    })?;

    let recipient = classify_recipient(client, cfg, tx.to).await?;
    let (to_id, call_kind_is_create, native_transfer_to) = match recipient {
        Recipient::Create => (cfg.polyjuice_creator_account_id, true, None),
        Recipient::NativeTransfer(addr) => (cfg.polyjuice_creator_account_id, false, Some(addr)),
        Recipient::Call(id) => (id, false, None),
    };

    let args = polyjuice::encode(
        &PolyjuiceArgs {
            is_create: call_kind_is_create,
            gas_limit,
            gas_price,
            value: tx
                .value
                .to_u128()
                .ok_or_else(|| Error::Decode("value exceeds 128 bits".into()))?,
            input: tx.data.clone(),
        },
        native_transfer_to,
    );

    let nonce = tx
        .nonce
        .to_u32()
        .ok_or_else(|| Error::Decode("nonce exceeds 32 bits".into()))?;
    let chain_id = if matches!(tx.v, 27 | 28) { 0 } else { cfg.web3_chain_id };

    let raw_l2 = RawL2Transaction {
        chain_id,
        from_id,
        to_id,
        nonce,
        args,
    };

    Ok(TranscodeOutput {
        l2_tx: L2Transaction {
            raw: raw_l2,
            signature: recovered.signature65,
        },
        auto_create,
    })
}

async fn classify_recipient(
    client: &dyn RollupRpcClient,
    cfg: &ChainConfig,
    to: Option<[u8; 20]>,
) -> Result<Recipient, Error> {
    let Some(addr) = to else {
        return Ok(Recipient::Create);
    };

    tracing::debug!(address = %hex::encode(addr), "resolving recipient account id");
    let resolved = account_resolver::account_id_of(client, cfg, addr).await?;

    let is_native_transfer = match resolved {
        None => true,
        Some(id) => {
            tracing::debug!(address = %hex::encode(addr), account_id = id, "resolving recipient script hash");
            account_resolver::is_eoa(client, cfg, addr, id).await?
        }
    };

    if is_native_transfer {
        Ok(Recipient::NativeTransfer(addr))
    } else {
        let id = resolved.ok_or_else(|| Error::RecipientNotFound {
            address: hex::encode(addr),
        })?;
        Ok(Recipient::Call(id))
    }
}
