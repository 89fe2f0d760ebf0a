//! The data model this crate transcodes between: an RLP-decoded Ethereum
//! legacy transaction on one side, a Godwoken/Polyjuice L2 transaction on
//! the other.

use crate::quantity::Quantity;
use serde::Serialize;

/// A decoded Ethereum legacy transaction. Produced by [`crate::rlp_codec::decode`].
///
/// `r` and `s` are always normalized to 32-byte big-endian arrays on
/// decode, so any consumer of this type is already "Polyjuice-ready" with
/// respect to signature shape; there is no separate signed/unsigned
/// variant of this struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthTx {
    pub nonce: Quantity,
    pub gas_price: Quantity,
    pub gas_limit: Quantity,
    pub to: Option<[u8; 20]>,
    pub value: Quantity,
    pub data: Vec<u8>,
    pub v: u64,
    pub r: [u8; 32],
    pub s: [u8; 32],
}

impl EthTx {
    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }
}

/// An `EthTx` after signature recovery and Polyjuice-args assembly. Shares
/// `EthTx`'s shape exactly; kept as a distinct name to mirror the
/// terminology in the transcoding pipeline's steps without duplicating the
/// struct.
pub type PolyjuiceTx = EthTx;

/// The raw, unsigned body of a Godwoken L2 transaction, as sent over the
/// rollup's JSON-RPC `submit_l2transaction` method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawL2Transaction {
    pub chain_id: u64,
    pub from_id: u32,
    pub to_id: u32,
    pub nonce: u32,
    #[serde(with = "hex_bytes")]
    pub args: Vec<u8>,
}

/// A complete, signed L2 transaction ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct L2Transaction {
    pub raw: RawL2Transaction,
    #[serde(with = "hex_bytes")]
    pub signature: [u8; 65],
}

mod hex_bytes {
    use serde::Serializer;

    pub fn serialize<S, T>(bytes: T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: AsRef<[u8]>,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes.as_ref())))
    }
}
