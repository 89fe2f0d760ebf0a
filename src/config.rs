//! A borrowed configuration snapshot, constructed once by the caller and
//! threaded through every transcoder operation. Mirrors the way
//! `raiko-host::prover::context::Context` is built once and shared via
//! `Handler` rather than read from a global.

use crate::error::Error;

/// Chain-level parameters the transcoder needs but never mutates.
///
/// Missing or invalid configuration is a [`Error::Config`] raised at
/// construction time (see [`ChainConfig::new`]), never while handling a
/// request.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// The `chain_id` this gateway reports for EIP-155 signed transactions.
    pub web3_chain_id: u64,
    /// The Polyjuice "creator" account id used for contract-creation and
    /// native-transfer `to_id`s.
    pub polyjuice_creator_account_id: u32,
    /// The rollup's configured ETH-account-lock code hash, used to derive
    /// EOA script hashes.
    pub eth_account_lock_code_hash: [u8; 32],
    /// The rollup script hash, folded into every EOA lock-script args.
    pub rollup_script_hash: [u8; 32],
    /// The sentinel `from_id` substituted for not-yet-registered senders
    /// on the auto-create-account fast path.
    pub auto_create_account_from_id: u32,
    /// The literal `transactionIndex` string rendered for pending views. Must
    /// be a marker value distinct from any non-negative index a committed
    /// transaction could have (see [`DEFAULT_PENDING_TRANSACTION_INDEX`]).
    pub pending_transaction_index: String,
    /// Upper bound on accepted raw transaction byte length.
    pub max_transaction_size: usize,
    pub min_gas_limit: u64,
    pub max_gas_limit: u64,
    pub min_gas_price: u128,
    pub max_gas_price: u128,
}

impl ChainConfig {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        web3_chain_id: u64,
        polyjuice_creator_account_id: u32,
        eth_account_lock_code_hash: [u8; 32],
        rollup_script_hash: [u8; 32],
        auto_create_account_from_id: u32,
        pending_transaction_index: impl Into<String>,
        max_transaction_size: usize,
        min_gas_limit: u64,
        max_gas_limit: u64,
        min_gas_price: u128,
        max_gas_price: u128,
    ) -> Result<Self, Error> {
        if web3_chain_id == 0 {
            return Err(Error::Config("web3_chain_id must be non-zero".into()));
        }
        if min_gas_limit > max_gas_limit {
            return Err(Error::Config(
                "min_gas_limit must not exceed max_gas_limit".into(),
            ));
        }
        if min_gas_price > max_gas_price {
            return Err(Error::Config(
                "min_gas_price must not exceed max_gas_price".into(),
            ));
        }
        if max_transaction_size == 0 {
            return Err(Error::Config("max_transaction_size must be non-zero".into()));
        }
        let pending_transaction_index = pending_transaction_index.into();
        if pending_transaction_index.is_empty() {
            return Err(Error::Config(
                "pending_transaction_index must not be empty".into(),
            ));
        }
        Ok(ChainConfig {
            web3_chain_id,
            polyjuice_creator_account_id,
            eth_account_lock_code_hash,
            rollup_script_hash,
            auto_create_account_from_id,
            pending_transaction_index,
            max_transaction_size,
            min_gas_limit,
            max_gas_limit,
            min_gas_price,
            max_gas_price,
        })
    }
}

/// A `transactionIndex` marker that cannot collide with any real index: a
/// block can't plausibly contain `u64::MAX` transactions, so this value is
/// always distinguishable from a committed transaction's position.
pub const DEFAULT_PENDING_TRANSACTION_INDEX: &str = "0xffffffffffffffff";
