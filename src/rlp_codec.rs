//! RLP decode/encode of the 9-field Ethereum legacy transaction tuple:
//! `[nonce, gasPrice, gasLimit, to, value, data, v, r, s]`.

use rlp::{Rlp, RlpStream};

use crate::error::Error;
use crate::model::EthTx;
use crate::quantity::Quantity;

/// Decodes a raw RLP-encoded legacy transaction.
///
/// Every integer field is accepted in its canonical minimal-length form
/// (empty bytes denotes zero); non-canonical encodings are not rejected
/// explicitly, matching the spec's scope — a byte sequence that
/// round-trips through [`encode_canonical`] is accepted.
pub fn decode(raw: &[u8]) -> Result<EthTx, Error> {
    let rlp = Rlp::new(raw);
    if !rlp.is_list() {
        return Err(Error::Decode("top-level item is not an RLP list".into()));
    }
    let count = rlp
        .item_count()
        .map_err(|e| Error::Decode(format!("malformed RLP list: {e}")))?;
    if count != 9 {
        return Err(Error::Decode(format!(
            "expected 9 transaction fields, found {count}"
        )));
    }

    let nonce = Quantity::from_rlp_bytes(field(&rlp, 0)?);
    let gas_price = Quantity::from_rlp_bytes(field(&rlp, 1)?);
    let gas_limit = Quantity::from_rlp_bytes(field(&rlp, 2)?);
    let to = decode_to(field(&rlp, 3)?)?;
    let value = Quantity::from_rlp_bytes(field(&rlp, 4)?);
    let data = field(&rlp, 5)?.to_vec();
    let v = Quantity::from_rlp_bytes(field(&rlp, 6)?)
        .to_u64()
        .ok_or_else(|| Error::Decode("`v` does not fit in 64 bits".into()))?;
    let r = pad32(field(&rlp, 7)?)?;
    let s = pad32(field(&rlp, 8)?)?;

    Ok(EthTx {
        nonce,
        gas_price,
        gas_limit,
        to,
        value,
        data,
        v,
        r,
        s,
    })
}

/// Canonically re-encodes a decoded transaction using minimal-length
/// integers. Round-tripping a canonically-encoded input through
/// [`decode`] then `encode_canonical` reproduces the original bytes.
pub fn encode_canonical(tx: &EthTx) -> Vec<u8> {
    let mut stream = RlpStream::new_list(9);
    stream.append(&tx.nonce.as_rlp_bytes());
    stream.append(&tx.gas_price.as_rlp_bytes());
    stream.append(&tx.gas_limit.as_rlp_bytes());
    append_to(&mut stream, tx.to);
    stream.append(&tx.value.as_rlp_bytes());
    stream.append(&tx.data.as_slice());
    stream.append(&Quantity::from_u64(tx.v).as_rlp_bytes());
    stream.append(&minimal(&tx.r));
    stream.append(&minimal(&tx.s));
    stream.out().to_vec()
}

pub fn append_to(stream: &mut RlpStream, to: Option<[u8; 20]>) {
    match to {
        Some(addr) => {
            stream.append(&addr.as_slice());
        }
        None => {
            stream.append_empty_data();
        }
    }
}

fn field<'a>(rlp: &'a Rlp<'a>, index: usize) -> Result<&'a [u8], Error> {
    rlp.at(index)
        .map_err(|e| Error::Decode(format!("missing field {index}: {e}")))?
        .data()
        .map_err(|e| Error::Decode(format!("malformed field {index}: {e}")))
}

fn decode_to(bytes: &[u8]) -> Result<Option<[u8; 20]>, Error> {
    match bytes.len() {
        0 => Ok(None),
        20 => {
            let mut addr = [0u8; 20];
            addr.copy_from_slice(bytes);
            Ok(Some(addr))
        }
        n => Err(Error::Decode(format!("`to` must be 0 or 20 bytes, got {n}"))),
    }
}

fn pad32(bytes: &[u8]) -> Result<[u8; 32], Error> {
    if bytes.len() > 32 {
        return Err(Error::Decode(format!(
            "signature component exceeds 32 bytes ({})",
            bytes.len()
        )));
    }
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(bytes);
    Ok(out)
}

/// Strips leading zero bytes from a fixed-width array for canonical RLP
/// re-encoding (the stored representation keeps the 32-byte padding for
/// signature math; RLP wants the minimal form back).
pub fn minimal(bytes: &[u8; 32]) -> Vec<u8> {
    match bytes.iter().position(|&b| b != 0) {
        Some(i) => bytes[i..].to_vec(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn decode_rejects_non_list() {
        let err = decode(&hex!("82ffff"));
        assert!(err.is_err());
    }

    #[test]
    fn decode_rejects_wrong_field_count() {
        let mut stream = RlpStream::new_list(3);
        stream.append_empty_data();
        stream.append_empty_data();
        stream.append_empty_data();
        let err = decode(&stream.out());
        assert!(matches!(err, Err(Error::Decode(_))));
    }

    #[test]
    fn decode_rejects_bad_to_length() {
        let mut stream = RlpStream::new_list(9);
        stream.append(&Quantity::zero().as_rlp_bytes());
        stream.append(&Quantity::zero().as_rlp_bytes());
        stream.append(&Quantity::zero().as_rlp_bytes());
        stream.append(&[0u8; 19].as_slice());
        stream.append(&Quantity::zero().as_rlp_bytes());
        stream.append(&[].as_slice());
        stream.append(&Quantity::from_u64(27).as_rlp_bytes());
        stream.append(&[0u8; 32].as_slice());
        stream.append(&[0u8; 32].as_slice());
        let err = decode(&stream.out());
        assert!(matches!(err, Err(Error::Decode(_))));
    }

    #[test]
    fn round_trip_contract_creation() {
        let mut stream = RlpStream::new_list(9);
        stream.append(&Quantity::from_u64(7).as_rlp_bytes());
        stream.append(&Quantity::from_u64(1_000_000_000).as_rlp_bytes());
        stream.append(&Quantity::from_u64(200_000).as_rlp_bytes());
        stream.append_empty_data();
        stream.append(&Quantity::zero().as_rlp_bytes());
        stream.append(&hex!("6001600155").as_slice());
        stream.append(&Quantity::from_u64(27).as_rlp_bytes());
        stream.append(&minimal(&[0xAB; 32]));
        stream.append(&minimal(&[0xCD; 32]));
        let raw = stream.out().to_vec();

        let tx = decode(&raw).unwrap();
        assert!(tx.to.is_none());
        assert_eq!(tx.nonce.to_u64(), Some(7));
        assert_eq!(encode_canonical(&tx), raw);
    }

    #[test]
    fn nonce_empty_bytes_is_zero() {
        let mut stream = RlpStream::new_list(9);
        stream.append_empty_data();
        stream.append(&Quantity::from_u64(1).as_rlp_bytes());
        stream.append(&Quantity::from_u64(21_000).as_rlp_bytes());
        stream.append(&[0u8; 20].as_slice());
        stream.append_empty_data();
        stream.append(&[].as_slice());
        stream.append(&Quantity::from_u64(28).as_rlp_bytes());
        stream.append(&minimal(&[0x01; 32]));
        stream.append(&minimal(&[0x02; 32]));
        let tx = decode(&stream.out()).unwrap();
        assert!(tx.nonce.is_zero());
    }
}
