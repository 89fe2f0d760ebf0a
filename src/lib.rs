//! `gw_eth_transcoder` turns RLP-encoded Ethereum legacy transactions into
//! signed Godwoken/Polyjuice L2 transactions, the way the godwoken-web3
//! JSON-RPC gateway needs to before forwarding a client's `eth_sendRawTransaction`
//! call to the rollup. It owns RLP decoding, EIP-155 signature recovery,
//! Polyjuice args assembly, pre-submission validation, and account
//! resolution against the rollup; it does not execute transactions,
//! maintain chain state, or speak the gateway's own HTTP/JSON-RPC framing.

pub mod account_resolver;
pub mod cache;
pub mod config;
pub mod error;
pub mod keccak;
pub mod model;
pub mod pending_view;
pub mod polyjuice;
pub mod quantity;
pub mod rlp_codec;
pub mod rpc;
pub mod signature;
pub mod transcoder;
pub mod validators;

pub use account_resolver::RollupRpcClient;
pub use cache::AutoCreateAccountCacheEntry;
pub use config::ChainConfig;
pub use error::Error;
pub use model::{EthTx, L2Transaction, PolyjuiceTx, RawL2Transaction};
pub use transcoder::{transcode, TranscodeOutput};
