//! EIP-155 signing-message reconstruction and secp256k1 public-key
//! recovery, grounded on `zeth-primitives`' `transactions::ethereum`
//! (`recover_from`, `is_y_odd`) and on the Godwoken lock algorithm's
//! `Secp256k1Eth::recover`, which treats `signature[64]` as a raw 0/1
//! recovery id rather than remapping it from 27/28.

use k256::ecdsa::{RecoveryId, Signature as K256Signature, VerifyingKey};
use rlp::RlpStream;

use crate::error::Error;
use crate::keccak::keccak;
use crate::model::EthTx;
use crate::quantity::Quantity;
use crate::rlp_codec::append_to;

/// The result of recovering a transaction's sender.
pub struct Recovered {
    pub address: [u8; 20],
    /// The chain id folded into `v` for an EIP-155 transaction, or `0` for
    /// a pre-EIP-155 transaction (`v` in `{27, 28}`).
    pub chain_id: u64,
    /// `r || s || recovery_id`, where `recovery_id` is the raw 0/1 value
    /// (not 27/28) this crate's Polyjuice consumers expect.
    pub signature65: [u8; 65],
}

/// Recovers the sender address and assembles the 65-byte Polyjuice-style
/// signature for `tx`.
pub fn recover(tx: &EthTx) -> Result<Recovered, Error> {
    let (message, chain_id, recovery_byte) = signing_message(tx)?;

    let sig = K256Signature::from_scalars(tx.r, tx.s)
        .map_err(|e| Error::Signature(format!("invalid r/s scalars: {e}")))?;
    let recovery_id = RecoveryId::from_byte(recovery_byte)
        .ok_or_else(|| Error::Signature(format!("invalid recovery id {recovery_byte}")))?;

    let verifying_key = VerifyingKey::recover_from_prehash(&message, &sig, recovery_id)
        .map_err(|e| Error::Signature(format!("public key recovery failed: {e}")))?;

    let encoded_point = verifying_key.to_encoded_point(false);
    let pubkey_bytes = encoded_point.as_bytes();
    // Uncompressed point is `0x04 || X (32) || Y (32)`; Ethereum addresses
    // hash everything after the `0x04` prefix byte.
    let hash = keccak(&pubkey_bytes[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);

    let mut signature65 = [0u8; 65];
    signature65[0..32].copy_from_slice(&tx.r);
    signature65[32..64].copy_from_slice(&tx.s);
    signature65[64] = recovery_byte;

    Ok(Recovered {
        address,
        chain_id,
        signature65,
    })
}

/// Reconstructs the EIP-155 (or pre-EIP-155) signing message and derives
/// the recovery-id byte expected from `v`.
fn signing_message(tx: &EthTx) -> Result<([u8; 32], u64, u8), Error> {
    match tx.v {
        27 => Ok((legacy_message(tx), 0, 0)),
        28 => Ok((legacy_message(tx), 0, 1)),
        v if v >= 35 => {
            let (chain_id, recovery_byte) = if v % 2 == 0 {
                ((v - 36) / 2, 1)
            } else {
                ((v - 35) / 2, 0)
            };
            Ok((eip155_message(tx, chain_id), chain_id, recovery_byte))
        }
        v => Err(Error::Signature(format!("unsupported recovery id v={v}"))),
    }
}

fn legacy_message(tx: &EthTx) -> [u8; 32] {
    let mut stream = RlpStream::new_list(6);
    append_legacy_fields(tx, &mut stream);
    keccak(stream.out())
}

fn eip155_message(tx: &EthTx, chain_id: u64) -> [u8; 32] {
    let mut stream = RlpStream::new_list(9);
    append_legacy_fields(tx, &mut stream);
    stream.append(&Quantity::from_u64(chain_id).as_rlp_bytes());
    stream.append_empty_data();
    stream.append_empty_data();
    keccak(stream.out())
}

fn append_legacy_fields(tx: &EthTx, stream: &mut RlpStream) {
    stream.append(&tx.nonce.as_rlp_bytes());
    stream.append(&tx.gas_price.as_rlp_bytes());
    stream.append(&tx.gas_limit.as_rlp_bytes());
    append_to(stream, tx.to);
    stream.append(&tx.value.as_rlp_bytes());
    stream.append(&tx.data.as_slice());
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::ecdsa::{signature::hazmat::PrehashSigner, SigningKey};
    use rstest::rstest;

    fn sample_tx(v: u64, r: [u8; 32], s: [u8; 32]) -> EthTx {
        EthTx {
            nonce: Quantity::from_u64(0),
            gas_price: Quantity::from_u64(1_000_000_000),
            gas_limit: Quantity::from_u64(21_000),
            to: Some([0x11; 20]),
            value: Quantity::from_u64(1),
            data: Vec::new(),
            v,
            r,
            s,
        }
    }

    fn sign_and_recover(chain_id: Option<u64>) {
        let signing_key = SigningKey::from_bytes(&[0x42; 32].into()).unwrap();
        let mut tx = sample_tx(27, [0; 32], [0; 32]);
        let message = match chain_id {
            None => legacy_message(&tx),
            Some(cid) => eip155_message(&tx, cid),
        };
        let (sig, recid): (K256Signature, RecoveryId) =
            signing_key.sign_prehash(&message).unwrap();
        let recovery_byte = recid.to_byte();
        tx.v = match chain_id {
            None => 27 + recovery_byte as u64,
            Some(cid) => cid * 2 + 35 + recovery_byte as u64,
        };
        tx.r.copy_from_slice(&sig.r().to_bytes());
        tx.s.copy_from_slice(&sig.s().to_bytes());

        let recovered = recover(&tx).unwrap();
        let expected_address = {
            let verifying_key = VerifyingKey::from(&signing_key);
            let encoded_point = verifying_key.to_encoded_point(false);
            let hash = keccak(&encoded_point.as_bytes()[1..]);
            let mut addr = [0u8; 20];
            addr.copy_from_slice(&hash[12..]);
            addr
        };
        assert_eq!(recovered.address, expected_address);
        assert_eq!(recovered.chain_id, chain_id.unwrap_or(0));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(1))]
    #[case(Some(2022))]
    fn recovers_sender_for_pre_and_post_eip155(#[case] chain_id: Option<u64>) {
        sign_and_recover(chain_id);
    }

    #[test]
    fn rejects_out_of_range_v() {
        let tx = sample_tx(5, [1; 32], [1; 32]);
        assert!(matches!(recover(&tx), Err(Error::Signature(_))));
    }
}
