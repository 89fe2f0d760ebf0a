//! Projects a decoded transaction into an Ethereum-shaped "pending
//! transaction" JSON view, for gateways that want to answer
//! `eth_getTransactionByHash` before the L2 transaction has landed in a
//! committed block.
//!
//! The pending block hash is synthetic: a deterministic, non-cryptographic
//! "bump" of the tip block hash (XOR its last byte with `0x01`), just
//! enough to give callers a stable-but-distinguishable placeholder.

use serde::Serialize;

use crate::config::ChainConfig;
use crate::model::EthTx;
use crate::quantity::Quantity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingView {
    pub hash: String,
    pub block_hash: String,
    pub block_number: String,
    pub transaction_index: String,
    pub from: String,
    pub to: Option<String>,
    pub gas: String,
    pub gas_price: String,
    pub input: String,
    pub nonce: String,
    pub value: String,
    pub v: String,
    pub r: String,
    pub s: String,
}

/// Builds the pending-transaction view for `tx`.
///
/// `tip_block_hash`/`tip_block_number` are the rollup's current tip, as
/// observed by the caller; the projected view claims the transaction will
/// land in `tip_block_number + 1`.
pub fn project(
    tx: &EthTx,
    eth_tx_hash: [u8; 32],
    from_address: [u8; 20],
    tip_block_hash: [u8; 32],
    tip_block_number: u64,
    cfg: &ChainConfig,
) -> PendingView {
    PendingView {
        hash: hex_prefixed(&eth_tx_hash),
        block_hash: hex_prefixed(&bump(tip_block_hash)),
        block_number: Quantity::from_u64(tip_block_number + 1).to_hex(),
        transaction_index: cfg.pending_transaction_index.clone(),
        from: hex_prefixed(&from_address),
        to: tx.to.map(|a| hex_prefixed(&a)),
        gas: tx.gas_limit.to_hex(),
        gas_price: tx.gas_price.to_hex(),
        input: hex_prefixed(&tx.data),
        nonce: tx.nonce.to_hex(),
        value: tx.value.to_hex(),
        v: if tx.v % 2 == 0 { "0x1".to_string() } else { "0x0".to_string() },
        r: hex_prefixed(&tx.r),
        s: hex_prefixed(&tx.s),
    }
}

fn hex_prefixed(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes.as_ref()))
}

fn bump(hash: [u8; 32]) -> [u8; 32] {
    let mut out = hash;
    out[31] ^= 0x01;
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ChainConfig {
        ChainConfig::new(
            2022,
            3,
            [0xAA; 32],
            [0xBB; 32],
            4,
            crate::config::DEFAULT_PENDING_TRANSACTION_INDEX,
            120_000,
            21_000,
            12_500_000,
            0,
            u128::MAX,
        )
        .unwrap()
    }

    fn sample_tx() -> EthTx {
        EthTx {
            nonce: Quantity::from_u64(5),
            gas_price: Quantity::from_u64(1),
            gas_limit: Quantity::from_u64(21_000),
            to: Some([0x11; 20]),
            value: Quantity::from_u64(0),
            data: vec![],
            v: 27,
            r: [0x01; 32],
            s: [0x02; 32],
        }
    }

    #[test]
    fn bump_is_deterministic_and_differs_from_tip() {
        let tip = [0x10; 32];
        let bumped = bump(tip);
        assert_ne!(bumped, tip);
        assert_eq!(bump(tip), bumped);
    }

    #[test]
    fn projects_expected_fields() {
        let tx = sample_tx();
        let view = project(&tx, [0x03; 32], [0x04; 20], [0x10; 32], 99, &cfg());
        assert_eq!(view.block_number, "0x64");
        assert_eq!(
            view.transaction_index,
            crate::config::DEFAULT_PENDING_TRANSACTION_INDEX
        );
        assert_eq!(view.v, "0x0");
        assert_ne!(view.block_hash, hex_prefixed(&[0x10u8; 32]));
    }

    #[test]
    fn even_v_renders_recovery_byte_one() {
        let mut tx = sample_tx();
        tx.v = 28;
        let view = project(&tx, [0x03; 32], [0x04; 20], [0x10; 32], 0, &cfg());
        assert_eq!(view.v, "0x1");
    }
}
